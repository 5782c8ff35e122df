//! Assigned interface addresses and IP classification helpers.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr};

use ipnet::IpNet;
use serde::Serialize;

/// One address assigned to an interface.
///
/// The OS may report an address with its network prefix or as a bare address;
/// [`InterfaceAddr::ip`] extracts the underlying IP value from either form so
/// callers never branch on the representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InterfaceAddr {
    /// Address with its network prefix (e.g., `192.168.1.2/24`).
    Network(IpNet),
    /// Address without prefix information.
    Bare(IpAddr),
    /// Non-IP address family (link-layer, etc.); carries no IP value.
    Unsupported,
}

impl InterfaceAddr {
    /// Returns the underlying IP value, or `None` for non-IP families.
    #[must_use]
    pub fn ip(&self) -> Option<IpAddr> {
        match self {
            Self::Network(net) => Some(net.addr()),
            Self::Bare(ip) => Some(*ip),
            Self::Unsupported => None,
        }
    }

    /// Builds a prefix-bearing address, falling back to [`InterfaceAddr::Bare`]
    /// when the prefix length is out of range for the address family.
    #[must_use]
    pub fn with_prefix(ip: IpAddr, prefix_len: u8) -> Self {
        IpNet::new(ip, prefix_len).map_or(Self::Bare(ip), Self::Network)
    }
}

impl From<IpNet> for InterfaceAddr {
    fn from(net: IpNet) -> Self {
        Self::Network(net)
    }
}

impl From<IpAddr> for InterfaceAddr {
    fn from(ip: IpAddr) -> Self {
        Self::Bare(ip)
    }
}

impl fmt::Display for InterfaceAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(net) => write!(f, "{net}"),
            Self::Bare(ip) => write!(f, "{ip}"),
            Self::Unsupported => write!(f, "<unsupported>"),
        }
    }
}

/// Narrows an IP value to its 4-byte form.
///
/// IPv4 values narrow to themselves and IPv4-mapped IPv6 values
/// (`::ffff:a.b.c.d`) narrow to the embedded IPv4. Any other IPv6 value
/// has no 4-byte form.
#[must_use]
pub const fn narrow_to_ipv4(ip: IpAddr) -> Option<Ipv4Addr> {
    match ip {
        IpAddr::V4(v4) => Some(v4),
        IpAddr::V6(v6) => v6.to_ipv4_mapped(),
    }
}

/// Returns true for loopback values, including IPv4-mapped `127.0.0.0/8`.
#[must_use]
pub const fn is_loopback(ip: IpAddr) -> bool {
    match narrow_to_ipv4(ip) {
        Some(v4) => v4.is_loopback(),
        None => ip.is_loopback(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv6Addr;

    fn ip(s: &str) -> IpAddr {
        s.parse().unwrap()
    }

    mod interface_addr {
        use super::*;

        #[test]
        fn network_form_exposes_host_address() {
            let addr = InterfaceAddr::Network("192.168.1.2/24".parse().unwrap());
            assert_eq!(addr.ip(), Some(ip("192.168.1.2")));
        }

        #[test]
        fn bare_form_exposes_address() {
            let addr = InterfaceAddr::Bare(ip("10.0.0.5"));
            assert_eq!(addr.ip(), Some(ip("10.0.0.5")));
        }

        #[test]
        fn unsupported_has_no_ip() {
            assert_eq!(InterfaceAddr::Unsupported.ip(), None);
        }

        #[test]
        fn with_prefix_builds_network_form() {
            let addr = InterfaceAddr::with_prefix(ip("10.1.2.3"), 8);
            assert_eq!(addr, InterfaceAddr::Network("10.1.2.3/8".parse().unwrap()));
        }

        #[test]
        fn with_prefix_out_of_range_falls_back_to_bare() {
            let addr = InterfaceAddr::with_prefix(ip("10.1.2.3"), 33);
            assert_eq!(addr, InterfaceAddr::Bare(ip("10.1.2.3")));
        }

        #[test]
        fn display_formats_each_form() {
            let net = InterfaceAddr::Network("fe80::1/64".parse().unwrap());
            assert_eq!(net.to_string(), "fe80::1/64");
            assert_eq!(InterfaceAddr::Bare(ip("10.0.0.1")).to_string(), "10.0.0.1");
            assert_eq!(InterfaceAddr::Unsupported.to_string(), "<unsupported>");
        }
    }

    mod narrowing {
        use super::*;

        #[test]
        fn ipv4_narrows_to_itself() {
            assert_eq!(
                narrow_to_ipv4(ip("192.168.1.2")),
                Some(Ipv4Addr::new(192, 168, 1, 2))
            );
        }

        #[test]
        fn ipv4_mapped_ipv6_narrows_to_embedded_ipv4() {
            assert_eq!(
                narrow_to_ipv4(ip("::ffff:10.0.0.7")),
                Some(Ipv4Addr::new(10, 0, 0, 7))
            );
        }

        #[test]
        fn ipv6_only_has_no_ipv4_form() {
            assert_eq!(narrow_to_ipv4(ip("fe80::1")), None);
            assert_eq!(narrow_to_ipv4(IpAddr::V6(Ipv6Addr::UNSPECIFIED)), None);
        }
    }

    mod loopback {
        use super::*;

        #[test]
        fn ipv4_loopback_range() {
            assert!(is_loopback(ip("127.0.0.1")));
            assert!(is_loopback(ip("127.255.0.9")));
            assert!(!is_loopback(ip("10.0.0.1")));
        }

        #[test]
        fn ipv6_loopback() {
            assert!(is_loopback(ip("::1")));
            assert!(!is_loopback(ip("fe80::1")));
        }

        #[test]
        fn ipv4_mapped_loopback() {
            assert!(is_loopback(ip("::ffff:127.0.0.1")));
        }
    }
}
