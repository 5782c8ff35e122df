//! Application startup and utilities.
//!
//! This module contains exit codes and tracing setup that support the
//! main entry point.

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Application exit codes.
pub mod exit_code {
    use localaddr::ResolveError;

    /// Success.
    pub const SUCCESS: u8 = 0;

    /// No qualifying address - not connected to the network.
    pub const NO_ADDRESS: u8 = 1;

    /// Interface or address list unavailable, or output could not be written.
    pub const RUNTIME_ERROR: u8 = 2;

    /// Maps a resolution failure to its exit code.
    #[must_use]
    pub const fn for_error(error: &ResolveError) -> u8 {
        if error.is_no_address() {
            NO_ADDRESS
        } else {
            RUNTIME_ERROR
        }
    }
}

/// Sets up the tracing subscriber for logging.
///
/// Logs go to stderr so stdout carries only the address.
pub fn setup_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::exit_code;
    use localaddr::ResolveError;
    use localaddr::network::FetchError;

    fn platform_error() -> FetchError {
        FetchError::Platform {
            message: "boom".to_string(),
        }
    }

    #[test]
    fn no_address_maps_to_one() {
        assert_eq!(
            exit_code::for_error(&ResolveError::NoAddressFound),
            exit_code::NO_ADDRESS
        );
    }

    #[test]
    fn interface_enumeration_maps_to_runtime_error() {
        let error = ResolveError::InterfaceEnumeration(platform_error());
        assert_eq!(exit_code::for_error(&error), exit_code::RUNTIME_ERROR);
    }

    #[test]
    fn address_enumeration_maps_to_runtime_error() {
        let error = ResolveError::AddressEnumeration {
            interface: "eth0".to_string(),
            source: platform_error(),
        };
        assert_eq!(exit_code::for_error(&error), exit_code::RUNTIME_ERROR);
    }

    #[test]
    fn codes_are_distinct() {
        assert_ne!(exit_code::SUCCESS, exit_code::NO_ADDRESS);
        assert_ne!(exit_code::NO_ADDRESS, exit_code::RUNTIME_ERROR);
    }
}
