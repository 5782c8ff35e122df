//! localaddr: primary local IPv4 address lookup
//!
//! A library for finding the machine's first non-loopback IPv4 address
//! on an up network interface.
//!
//! ```no_run
//! let address = localaddr::resolve()?;
//! println!("{address}");
//! # Ok::<(), localaddr::ResolveError>(())
//! ```

pub mod cli;
pub mod network;
pub mod resolver;

pub use resolver::{AddressResolver, ResolveError, resolve};
