//! CLI argument parsing and output rendering using clap and serde.
//!
//! The command-line wrapper around [`resolve`](crate::resolve) takes no
//! configuration beyond output format and verbosity.

use std::net::Ipv4Addr;

use clap::{Parser, ValueEnum};
use serde::Serialize;

/// localaddr: print the machine's primary non-loopback IPv4 address
///
/// Picks the first IPv4 address of the first up, non-loopback interface.
#[derive(Debug, Parser)]
#[command(name = "localaddr")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(long, short, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Enable verbose logging
    #[arg(long, short)]
    pub verbose: bool,
}

/// Output format for the resolved address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Bare dotted-decimal address
    #[default]
    Text,
    /// JSON object: `{"address":"..."}`
    Json,
}

/// JSON body written for a resolved address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Output {
    /// The resolved address.
    pub address: Ipv4Addr,
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }
}

impl OutputFormat {
    /// Renders `address` in this format.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render(self, address: Ipv4Addr) -> Result<String, serde_json::Error> {
        match self {
            Self::Text => Ok(address.to_string()),
            Self::Json => serde_json::to_string(&Output { address }),
        }
    }
}
