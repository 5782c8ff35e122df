//! Interface enumeration trait and error types.

use super::{Interface, InterfaceAddr};
use thiserror::Error;

/// Error type for interface and address enumeration.
///
/// Describes what went wrong without dictating recovery strategy.
/// Callers decide how to handle each error variant.
#[derive(Debug, Error)]
pub enum FetchError {
    /// OS call failed with an errno.
    #[cfg(unix)]
    #[error("OS error: {0}")]
    Os(#[from] nix::errno::Errno),

    /// Windows API call failed.
    #[cfg(windows)]
    #[error("Windows API error: {0}")]
    WindowsApi(#[from] windows::core::Error),

    /// Permission denied to access network information.
    #[error("Permission denied: {context}")]
    PermissionDenied {
        /// Additional context about what permission was denied.
        context: String,
    },

    /// Platform-specific error with a generic message.
    #[error("Platform error: {message}")]
    Platform {
        /// Error message describing the platform-specific failure.
        message: String,
    },
}

/// Trait for enumerating network interfaces and their assigned addresses.
///
/// # Design
///
/// - The OS collaborator sits behind this trait so resolution logic can be
///   exercised against scripted interface lists in tests
/// - Platform-specific implementations are provided in [`platform`](super::platform)
/// - Interface and address enumeration are separate calls and fail separately
///
/// # Example
///
/// ```
/// use localaddr::network::{FetchError, Interface, InterfaceAddr, InterfaceFlags, InterfaceSource};
///
/// struct Fixed;
///
/// impl InterfaceSource for Fixed {
///     fn interfaces(&self) -> Result<Vec<Interface>, FetchError> {
///         Ok(vec![Interface::new("eth0", InterfaceFlags::UP)])
///     }
///
///     fn addresses(&self, _interface: &Interface) -> Result<Vec<InterfaceAddr>, FetchError> {
///         Ok(vec![InterfaceAddr::Network("192.168.1.2/24".parse().unwrap())])
///     }
/// }
///
/// assert_eq!(Fixed.interfaces().unwrap()[0].name, "eth0");
/// ```
pub trait InterfaceSource: Send + Sync {
    /// Lists all network interfaces in the order the OS reports them.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] when the interface list cannot be obtained
    /// (platform API failure, insufficient permissions).
    fn interfaces(&self) -> Result<Vec<Interface>, FetchError>;

    /// Lists the addresses assigned to `interface` in the order the OS reports them.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] when the address list for this interface
    /// cannot be obtained.
    fn addresses(&self, interface: &Interface) -> Result<Vec<InterfaceAddr>, FetchError>;
}

impl<T: InterfaceSource + ?Sized> InterfaceSource for &T {
    fn interfaces(&self) -> Result<Vec<Interface>, FetchError> {
        (**self).interfaces()
    }

    fn addresses(&self, interface: &Interface) -> Result<Vec<InterfaceAddr>, FetchError> {
        (**self).addresses(interface)
    }
}

impl<T: InterfaceSource + ?Sized> InterfaceSource for Box<T> {
    fn interfaces(&self) -> Result<Vec<Interface>, FetchError> {
        self.as_ref().interfaces()
    }

    fn addresses(&self, interface: &Interface) -> Result<Vec<InterfaceAddr>, FetchError> {
        self.as_ref().addresses(interface)
    }
}
