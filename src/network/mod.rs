//! Network layer for enumerating interfaces and their addresses.
//!
//! This module provides types and traits for:
//! - Representing network interfaces ([`Interface`], [`InterfaceFlags`])
//! - Representing assigned addresses in either form ([`InterfaceAddr`])
//! - Enumerating interfaces and addresses ([`InterfaceSource`])
//! - Platform-specific implementations ([`platform`])

mod address;
mod interface;
pub mod platform;
mod source;

pub use address::{InterfaceAddr, is_loopback, narrow_to_ipv4};
pub use interface::{Interface, InterfaceFlags};
pub use source::{FetchError, InterfaceSource};
