//! Interface representation and state flags.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use serde::Serialize;

/// State flags reported by the OS for a network interface.
///
/// Only [`InterfaceFlags::UP`] and [`InterfaceFlags::LOOPBACK`] take part in
/// address resolution; the remaining bits are carried for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct InterfaceFlags(u32);

impl InterfaceFlags {
    /// No flags set.
    pub const EMPTY: Self = Self(0);
    /// Interface is administratively and operationally up.
    pub const UP: Self = Self(1 << 0);
    /// Interface is a loopback interface.
    pub const LOOPBACK: Self = Self(1 << 1);
    /// Interface supports broadcast.
    pub const BROADCAST: Self = Self(1 << 2);
    /// Interface is a point-to-point link (PPP, tunnels).
    pub const POINT_TO_POINT: Self = Self(1 << 3);
    /// Interface supports multicast.
    pub const MULTICAST: Self = Self(1 << 4);
    /// Interface resources are allocated and running.
    pub const RUNNING: Self = Self(1 << 5);

    const NAMES: [(Self, &'static str); 6] = [
        (Self::UP, "up"),
        (Self::LOOPBACK, "loopback"),
        (Self::BROADCAST, "broadcast"),
        (Self::POINT_TO_POINT, "pointtopoint"),
        (Self::MULTICAST, "multicast"),
        (Self::RUNNING, "running"),
    ];

    /// Creates flags from raw bits.
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Returns the raw bits.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Returns true if every bit in `other` is also set in `self`.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns true if the up flag is set.
    #[must_use]
    pub const fn is_up(self) -> bool {
        self.contains(Self::UP)
    }

    /// Returns true if the loopback flag is set.
    #[must_use]
    pub const fn is_loopback(self) -> bool {
        self.contains(Self::LOOPBACK)
    }
}

impl BitOr for InterfaceFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for InterfaceFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for InterfaceFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (flag, name) in Self::NAMES {
            if self.contains(flag) {
                if !first {
                    f.write_str("|")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        if first {
            f.write_str("0")?;
        }
        Ok(())
    }
}

/// A single network interface as reported by the OS.
///
/// Addresses are not stored here: they are requested per interface from an
/// [`InterfaceSource`](super::InterfaceSource), which may fail independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Interface {
    /// The OS name of the interface (e.g., "eth0", "Wi-Fi").
    pub name: String,
    /// State flags at enumeration time.
    pub flags: InterfaceFlags,
}

impl Interface {
    /// Creates a new interface.
    #[must_use]
    pub fn new(name: impl Into<String>, flags: InterfaceFlags) -> Self {
        Self {
            name: name.into(),
            flags,
        }
    }

    /// Returns true if the interface is up and not a loopback interface.
    #[must_use]
    pub const fn is_candidate(&self) -> bool {
        self.flags.is_up() && !self.flags.is_loopback()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod interface_flags {
        use super::*;

        #[test]
        fn empty_has_no_flags() {
            assert!(!InterfaceFlags::EMPTY.is_up());
            assert!(!InterfaceFlags::EMPTY.is_loopback());
            assert_eq!(InterfaceFlags::EMPTY.bits(), 0);
        }

        #[test]
        fn bitor_combines_flags() {
            let flags = InterfaceFlags::UP | InterfaceFlags::LOOPBACK;
            assert!(flags.is_up());
            assert!(flags.is_loopback());
            assert!(!flags.contains(InterfaceFlags::MULTICAST));
        }

        #[test]
        fn bitor_assign_accumulates() {
            let mut flags = InterfaceFlags::UP;
            flags |= InterfaceFlags::RUNNING;
            assert!(flags.contains(InterfaceFlags::UP | InterfaceFlags::RUNNING));
        }

        #[test]
        fn from_bits_round_trips_raw_value() {
            let flags = InterfaceFlags::from_bits(0b11);
            assert_eq!(flags, InterfaceFlags::UP | InterfaceFlags::LOOPBACK);
        }

        #[test]
        fn display_lists_set_flags() {
            let flags = InterfaceFlags::UP | InterfaceFlags::MULTICAST;
            assert_eq!(flags.to_string(), "up|multicast");
        }

        #[test]
        fn display_empty_is_zero() {
            assert_eq!(InterfaceFlags::EMPTY.to_string(), "0");
        }
    }

    mod interface {
        use super::*;

        #[test]
        fn up_non_loopback_is_candidate() {
            let iface = Interface::new("eth0", InterfaceFlags::UP | InterfaceFlags::BROADCAST);
            assert!(iface.is_candidate());
        }

        #[test]
        fn down_is_not_candidate() {
            let iface = Interface::new("eth0", InterfaceFlags::BROADCAST);
            assert!(!iface.is_candidate());
        }

        #[test]
        fn loopback_is_not_candidate() {
            let iface = Interface::new("lo", InterfaceFlags::UP | InterfaceFlags::LOOPBACK);
            assert!(!iface.is_candidate());
        }

        #[test]
        fn serializes_flags_as_bits() {
            let iface = Interface::new("eth0", InterfaceFlags::UP);
            let json = serde_json::to_string(&iface).unwrap();
            assert_eq!(json, r#"{"name":"eth0","flags":1}"#);
        }
    }
}
