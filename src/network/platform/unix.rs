//! Unix interface enumeration using `getifaddrs(3)`.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use nix::ifaddrs::getifaddrs;
use nix::net::if_::InterfaceFlags as IfFlags;
use nix::sys::socket::SockaddrStorage;

use crate::network::{FetchError, Interface, InterfaceAddr, InterfaceFlags, InterfaceSource};

/// Unix implementation of [`InterfaceSource`] backed by `getifaddrs(3)`.
///
/// `getifaddrs` returns one entry per (interface, address) pair. Interfaces
/// are derived by grouping entries by name in first-seen order; each
/// [`InterfaceSource::addresses`] call queries the OS again so results
/// always reflect current state.
///
/// # Example
///
/// ```no_run
/// use localaddr::network::{InterfaceSource, platform::UnixSource};
///
/// let source = UnixSource::new();
/// for iface in source.interfaces().expect("Failed to list interfaces") {
///     println!("{}: {}", iface.name, iface.flags);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct UnixSource {
    _private: (),
}

impl UnixSource {
    /// Creates a new `getifaddrs`-backed source.
    #[must_use]
    pub const fn new() -> Self {
        Self { _private: () }
    }
}

impl InterfaceSource for UnixSource {
    fn interfaces(&self) -> Result<Vec<Interface>, FetchError> {
        let entries = getifaddrs()?;
        Ok(group_interfaces(
            entries.map(|entry| (entry.interface_name, map_flags(entry.flags))),
        ))
    }

    fn addresses(&self, interface: &Interface) -> Result<Vec<InterfaceAddr>, FetchError> {
        let entries = getifaddrs()?;
        Ok(entries
            .filter(|entry| entry.interface_name == interface.name)
            .filter_map(|entry| parse_address(entry.address.as_ref(), entry.netmask.as_ref()))
            .collect())
    }
}

/// Collapses per-address entries into one [`Interface`] per name.
///
/// Order follows the first appearance of each name; flags of repeated
/// entries are merged.
fn group_interfaces(entries: impl IntoIterator<Item = (String, InterfaceFlags)>) -> Vec<Interface> {
    let mut interfaces: Vec<Interface> = Vec::new();
    for (name, flags) in entries {
        match interfaces.iter_mut().find(|iface| iface.name == name) {
            Some(existing) => existing.flags |= flags,
            None => interfaces.push(Interface::new(name, flags)),
        }
    }
    interfaces
}

/// Maps `IFF_*` flags to [`InterfaceFlags`].
fn map_flags(flags: IfFlags) -> InterfaceFlags {
    const MAPPING: [(IfFlags, InterfaceFlags); 6] = [
        (IfFlags::IFF_UP, InterfaceFlags::UP),
        (IfFlags::IFF_LOOPBACK, InterfaceFlags::LOOPBACK),
        (IfFlags::IFF_BROADCAST, InterfaceFlags::BROADCAST),
        (IfFlags::IFF_POINTOPOINT, InterfaceFlags::POINT_TO_POINT),
        (IfFlags::IFF_MULTICAST, InterfaceFlags::MULTICAST),
        (IfFlags::IFF_RUNNING, InterfaceFlags::RUNNING),
    ];

    MAPPING
        .iter()
        .filter(|(os, _)| flags.contains(*os))
        .fold(InterfaceFlags::EMPTY, |acc, (_, ours)| acc | *ours)
}

/// Converts a `getifaddrs` entry to an [`InterfaceAddr`].
///
/// Returns `None` for entries without an address. IP entries with a valid
/// netmask become [`InterfaceAddr::Network`], IP entries without one become
/// [`InterfaceAddr::Bare`], and other families become
/// [`InterfaceAddr::Unsupported`].
fn parse_address(
    address: Option<&SockaddrStorage>,
    netmask: Option<&SockaddrStorage>,
) -> Option<InterfaceAddr> {
    let address = address?;

    let ip = if let Some(sin) = address.as_sockaddr_in() {
        IpAddr::V4(Ipv4Addr::from(sin.ip()))
    } else if let Some(sin6) = address.as_sockaddr_in6() {
        IpAddr::V6(Ipv6Addr::from(sin6.ip()))
    } else {
        return Some(InterfaceAddr::Unsupported);
    };

    Some(match netmask.and_then(|mask| prefix_len(ip, mask)) {
        Some(prefix) => InterfaceAddr::with_prefix(ip, prefix),
        None => InterfaceAddr::Bare(ip),
    })
}

/// Converts a netmask of the same family as `ip` to a prefix length.
fn prefix_len(ip: IpAddr, mask: &SockaddrStorage) -> Option<u8> {
    match ip {
        IpAddr::V4(_) => {
            let mask = Ipv4Addr::from(mask.as_sockaddr_in()?.ip());
            ipnet::ipv4_mask_to_prefix(mask).ok()
        }
        IpAddr::V6(_) => {
            let mask = Ipv6Addr::from(mask.as_sockaddr_in6()?.ip());
            ipnet::ipv6_mask_to_prefix(mask).ok()
        }
    }
}
