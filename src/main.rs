//! localaddr: primary local IPv4 address lookup
//!
//! Entry point for the localaddr command.

use localaddr::AddressResolver;
use localaddr::cli::Cli;
use std::process::ExitCode;

mod app;

use app::{exit_code, setup_tracing};

/// Main entry point.
///
/// Excluded from coverage as it's the thin wrapper around testable components.
#[cfg(not(tarpaulin_include))]
fn main() -> ExitCode {
    let cli = Cli::parse_args();
    setup_tracing(cli.verbose);

    let address = match AddressResolver::system().resolve_ipv4() {
        Ok(address) => address,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::from(exit_code::for_error(&e));
        }
    };

    match cli.format.render(address) {
        Ok(output) => {
            println!("{output}");
            ExitCode::from(exit_code::SUCCESS)
        }
        Err(e) => {
            tracing::error!("Failed to render output: {e}");
            ExitCode::from(exit_code::RUNTIME_ERROR)
        }
    }
}
