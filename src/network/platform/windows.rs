//! Windows interface enumeration using `GetAdaptersAddresses`.

use crate::network::{FetchError, Interface, InterfaceAddr, InterfaceFlags, InterfaceSource};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use windows::Win32::Foundation::WIN32_ERROR;
use windows::Win32::NetworkManagement::IpHelper::{
    GAA_FLAG_SKIP_ANYCAST, GAA_FLAG_SKIP_DNS_SERVER, GAA_FLAG_SKIP_MULTICAST, GetAdaptersAddresses,
    IF_TYPE_SOFTWARE_LOOPBACK, IP_ADAPTER_ADDRESSES_LH,
};
use windows::Win32::NetworkManagement::Ndis::{IF_OPER_STATUS, IfOperStatusUp};
use windows::Win32::Networking::WinSock::{
    AF_INET, AF_INET6, AF_UNSPEC, SOCKADDR_IN, SOCKADDR_IN6,
};

/// Interface type for PPP (Point-to-Point Protocol) adapters.
/// Value from Windows SDK `iptypes.h` - not exported by the `windows` crate.
const IF_TYPE_PPP: u32 = 23;

/// Interface type for tunnel adapters (VPN, etc.).
/// Value from Windows SDK `iptypes.h` - not exported by the `windows` crate.
const IF_TYPE_TUNNEL: u32 = 131;

/// Buffer size hint for `GetAdaptersAddresses`.
/// The API will tell us the actual required size if this is insufficient.
const INITIAL_BUFFER_SIZE: u32 = 16384;

/// Windows implementation of [`InterfaceSource`] using `GetAdaptersAddresses`.
///
/// Adapters are identified by their friendly name. Each call queries the
/// networking stack afresh.
///
/// # Example
///
/// ```no_run
/// use localaddr::network::{InterfaceSource, platform::WindowsSource};
///
/// let source = WindowsSource::new();
/// for iface in source.interfaces().expect("Failed to list interfaces") {
///     println!("{}: {}", iface.name, iface.flags);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct WindowsSource {
    _private: (),
}

impl WindowsSource {
    /// Creates a new Windows interface source.
    #[must_use]
    pub const fn new() -> Self {
        Self { _private: () }
    }
}

impl InterfaceSource for WindowsSource {
    fn interfaces(&self) -> Result<Vec<Interface>, FetchError> {
        walk_adapters(|adapter| {
            let name = adapter_name(adapter)?;
            Some(Interface::new(
                name,
                map_flags(adapter.OperStatus, adapter.IfType),
            ))
        })
    }

    fn addresses(&self, interface: &Interface) -> Result<Vec<InterfaceAddr>, FetchError> {
        let mut matches = walk_adapters(|adapter| {
            (adapter_name(adapter)? == interface.name).then(|| collect_addresses(adapter))
        })?;
        Ok(if matches.is_empty() {
            Vec::new()
        } else {
            matches.swap_remove(0)
        })
    }
}

/// Walks the adapter list returned by `GetAdaptersAddresses`, keeping the
/// values `visit` produces in OS order.
fn walk_adapters<T>(
    mut visit: impl FnMut(&IP_ADAPTER_ADDRESSES_LH) -> Option<T>,
) -> Result<Vec<T>, FetchError> {
    let raw_adapters = get_adapter_addresses()?;

    let mut results = Vec::new();
    // SAFETY: GetAdaptersAddresses returns a properly aligned buffer for IP_ADAPTER_ADDRESSES_LH.
    #[allow(clippy::cast_ptr_alignment)]
    let mut current = raw_adapters.as_ptr().cast::<IP_ADAPTER_ADDRESSES_LH>();

    // SAFETY: The linked list is valid as long as the buffer (`raw_adapters`) is alive.
    while !current.is_null() {
        let adapter = unsafe { &*current };

        if let Some(value) = visit(adapter) {
            results.push(value);
        }

        current = adapter.Next;
    }

    Ok(results)
}

/// Calls `GetAdaptersAddresses` and returns the raw buffer containing adapter data.
///
/// This function handles the two-call pattern:
/// 1. First call with estimated buffer size
/// 2. Retry with exact size if buffer was too small
fn get_adapter_addresses() -> Result<Vec<u8>, FetchError> {
    let flags = GAA_FLAG_SKIP_ANYCAST | GAA_FLAG_SKIP_MULTICAST | GAA_FLAG_SKIP_DNS_SERVER;
    let family = u32::from(AF_UNSPEC.0);

    let mut buffer: Vec<u8> = vec![0u8; INITIAL_BUFFER_SIZE as usize];
    let mut size = INITIAL_BUFFER_SIZE;

    // SAFETY: We provide a valid buffer and size. The function writes adapter
    // information to the buffer and updates `size` with the required length.
    let result = unsafe {
        GetAdaptersAddresses(
            family,
            flags,
            None,
            Some(buffer.as_mut_ptr().cast()),
            &raw mut size,
        )
    };

    handle_api_result(result, &mut buffer, &mut size, flags, family)?;

    Ok(buffer)
}

/// Handles the result of `GetAdaptersAddresses`, retrying once with a larger buffer.
///
/// Excluded from coverage: the overflow and failure paths need real API failures.
#[cfg(not(tarpaulin_include))]
fn handle_api_result(
    result: u32,
    buffer: &mut Vec<u8>,
    size: &mut u32,
    flags: windows::Win32::NetworkManagement::IpHelper::GET_ADAPTERS_ADDRESSES_FLAGS,
    family: u32,
) -> Result<(), FetchError> {
    use windows::Win32::Foundation::{ERROR_ACCESS_DENIED, ERROR_BUFFER_OVERFLOW, NO_ERROR};

    let result = if result == ERROR_BUFFER_OVERFLOW.0 {
        buffer.resize(*size as usize, 0);

        // SAFETY: Same as above, but with correctly sized buffer
        unsafe {
            GetAdaptersAddresses(
                family,
                flags,
                None,
                Some(buffer.as_mut_ptr().cast()),
                &raw mut *size,
            )
        }
    } else {
        result
    };

    if result == ERROR_ACCESS_DENIED.0 {
        return Err(FetchError::PermissionDenied {
            context: "GetAdaptersAddresses".to_string(),
        });
    }
    if result != NO_ERROR.0 {
        return Err(windows::core::Error::from(WIN32_ERROR(result)).into());
    }

    Ok(())
}

/// Reads the adapter's friendly name, or `None` if it is not valid UTF-16.
fn adapter_name(adapter: &IP_ADAPTER_ADDRESSES_LH) -> Option<String> {
    // SAFETY: FriendlyName points to a NUL-terminated wide string inside the buffer.
    unsafe { adapter.FriendlyName.to_string().ok() }
}

/// Maps operational status and `IF_TYPE_*` to [`InterfaceFlags`].
fn map_flags(oper_status: IF_OPER_STATUS, if_type: u32) -> InterfaceFlags {
    let mut flags = InterfaceFlags::EMPTY;
    if oper_status == IfOperStatusUp {
        flags |= InterfaceFlags::UP | InterfaceFlags::RUNNING;
    }
    match if_type {
        IF_TYPE_SOFTWARE_LOOPBACK => flags |= InterfaceFlags::LOOPBACK,
        IF_TYPE_TUNNEL | IF_TYPE_PPP => flags |= InterfaceFlags::POINT_TO_POINT,
        _ => {}
    }
    flags
}

/// Collects unicast addresses, with their on-link prefix, in OS order.
#[allow(clippy::cast_ptr_alignment)]
fn collect_addresses(adapter: &IP_ADAPTER_ADDRESSES_LH) -> Vec<InterfaceAddr> {
    let mut addresses = Vec::new();

    let mut unicast = adapter.FirstUnicastAddress;

    // SAFETY: Each unicast entry is valid as long as the parent adapter buffer is alive.
    while !unicast.is_null() {
        let addr_entry = unsafe { &*unicast };

        // SAFETY: The Address field points to either SOCKADDR_IN or SOCKADDR_IN6.
        if let Some(sockaddr) = unsafe { addr_entry.Address.lpSockaddr.as_ref() } {
            let ip = match sockaddr.sa_family {
                f if f == AF_INET => {
                    // SAFETY: Family is AF_INET, so this is a valid cast.
                    let sockaddr_in =
                        unsafe { &*(std::ptr::from_ref(sockaddr).cast::<SOCKADDR_IN>()) };
                    let octets = unsafe { sockaddr_in.sin_addr.S_un.S_un_b };
                    Some(IpAddr::V4(Ipv4Addr::new(
                        octets.s_b1,
                        octets.s_b2,
                        octets.s_b3,
                        octets.s_b4,
                    )))
                }
                f if f == AF_INET6 => {
                    // SAFETY: Family is AF_INET6, so this is a valid cast.
                    let sockaddr_in6 =
                        unsafe { &*(std::ptr::from_ref(sockaddr).cast::<SOCKADDR_IN6>()) };
                    let octets = unsafe { sockaddr_in6.sin6_addr.u.Byte };
                    Some(IpAddr::V6(Ipv6Addr::from(octets)))
                }
                _ => None,
            };

            addresses.push(ip.map_or(InterfaceAddr::Unsupported, |ip| {
                InterfaceAddr::with_prefix(ip, addr_entry.OnLinkPrefixLength)
            }));
        }

        unicast = addr_entry.Next;
    }

    addresses
}
