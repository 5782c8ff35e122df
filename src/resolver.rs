//! Primary local IPv4 address resolution.
//!
//! [`AddressResolver`] walks the interfaces reported by an
//! [`InterfaceSource`] and returns the first IPv4 address found on an up,
//! non-loopback interface. [`resolve`] runs it against the host OS.
//!
//! # Selection Rules
//!
//! - Interfaces and addresses are visited in OS order; nothing is re-sorted
//! - Interfaces that are down or flagged loopback are skipped
//! - Addresses with no IP value, loopback values, and values without a
//!   4-byte form are skipped
//! - The first surviving address wins, even if later interfaces qualify
//!
//! Every failure is returned to the caller unchanged; there is no retry
//! and no partial result.

use std::net::Ipv4Addr;

use thiserror::Error;

use crate::network::platform::PlatformSource;
use crate::network::{
    FetchError, Interface, InterfaceAddr, InterfaceSource, is_loopback, narrow_to_ipv4,
};

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;

/// Error type for address resolution.
///
/// The variant tells callers whether the network layer itself failed
/// or simply had no suitable address configured.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The OS interface list could not be obtained.
    #[error("failed to list network interfaces: {0}")]
    InterfaceEnumeration(#[source] FetchError),

    /// The address list of one interface could not be obtained.
    #[error("failed to list addresses of interface '{interface}': {source}")]
    AddressEnumeration {
        /// Name of the interface whose addresses were requested.
        interface: String,
        /// Underlying enumeration error.
        #[source]
        source: FetchError,
    },

    /// Enumeration succeeded but no address qualified.
    #[error("not connected to the network")]
    NoAddressFound,
}

impl ResolveError {
    /// Returns the underlying enumeration error, if any.
    #[must_use]
    pub const fn fetch_error(&self) -> Option<&FetchError> {
        match self {
            Self::InterfaceEnumeration(source) | Self::AddressEnumeration { source, .. } => {
                Some(source)
            }
            Self::NoAddressFound => None,
        }
    }

    /// Returns true if no qualifying address was found.
    #[must_use]
    pub const fn is_no_address(&self) -> bool {
        matches!(self, Self::NoAddressFound)
    }
}

/// Finds the first non-loopback IPv4 address of an up interface.
///
/// Stateless: every call enumerates interfaces afresh, so it is safe to
/// call repeatedly or from several threads.
///
/// # Type Parameters
///
/// - `S`: The interface source (implements [`InterfaceSource`])
///
/// # Examples
///
/// ```no_run
/// use localaddr::AddressResolver;
///
/// let resolver = AddressResolver::system();
/// println!("{}", resolver.resolve()?);
/// # Ok::<(), localaddr::ResolveError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct AddressResolver<S> {
    source: S,
}

impl AddressResolver<PlatformSource> {
    /// Creates a resolver backed by the host OS.
    #[must_use]
    pub const fn system() -> Self {
        Self::new(PlatformSource::new())
    }
}

impl<S> AddressResolver<S> {
    /// Creates a resolver reading from `source`.
    #[must_use]
    pub const fn new(source: S) -> Self {
        Self { source }
    }

    /// Returns a reference to the interface source.
    pub const fn source(&self) -> &S {
        &self.source
    }
}

impl<S: InterfaceSource> AddressResolver<S> {
    /// Returns the first qualifying address in dotted-decimal form.
    ///
    /// # Errors
    ///
    /// - [`ResolveError::InterfaceEnumeration`] if the interface list is unavailable
    /// - [`ResolveError::AddressEnumeration`] if a candidate interface's addresses
    ///   are unavailable; later interfaces are not tried
    /// - [`ResolveError::NoAddressFound`] if nothing qualifies
    pub fn resolve(&self) -> Result<String, ResolveError> {
        self.resolve_ipv4().map(|addr| addr.to_string())
    }

    /// Returns the first qualifying address.
    ///
    /// # Errors
    ///
    /// Same as [`AddressResolver::resolve`].
    pub fn resolve_ipv4(&self) -> Result<Ipv4Addr, ResolveError> {
        let interfaces = self
            .source
            .interfaces()
            .map_err(ResolveError::InterfaceEnumeration)?;

        for interface in &interfaces {
            if !interface.is_candidate() {
                tracing::trace!(
                    interface = %interface.name,
                    flags = %interface.flags,
                    "Skipping interface (down or loopback)"
                );
                continue;
            }

            if let Some(addr) = self.first_address_of(interface)? {
                tracing::debug!(interface = %interface.name, %addr, "Selected local address");
                return Ok(addr);
            }
        }

        tracing::debug!(
            interfaces = interfaces.len(),
            "No up non-loopback interface has an IPv4 address"
        );
        Err(ResolveError::NoAddressFound)
    }

    fn first_address_of(&self, interface: &Interface) -> Result<Option<Ipv4Addr>, ResolveError> {
        let addresses = self.source.addresses(interface).map_err(|source| {
            ResolveError::AddressEnumeration {
                interface: interface.name.clone(),
                source,
            }
        })?;

        Ok(addresses.iter().find_map(|addr| {
            let selected = qualifying_ipv4(addr);
            if selected.is_none() {
                tracing::trace!(interface = %interface.name, %addr, "Skipping address");
            }
            selected
        }))
    }
}

/// Returns the address's IPv4 value if it is present, not loopback, and
/// representable in 4 bytes.
#[must_use]
pub fn qualifying_ipv4(addr: &InterfaceAddr) -> Option<Ipv4Addr> {
    let ip = addr.ip()?;
    if is_loopback(ip) {
        return None;
    }
    narrow_to_ipv4(ip)
}

/// Returns the first non-loopback IPv4 address of an up interface on this host.
///
/// Shorthand for `AddressResolver::system().resolve()`.
///
/// # Errors
///
/// See [`AddressResolver::resolve`].
pub fn resolve() -> Result<String, ResolveError> {
    AddressResolver::system().resolve()
}
