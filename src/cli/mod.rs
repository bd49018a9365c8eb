//! CLI module for tapcanvas.
//!
//! - Argument parsing
//! - Version display
//! - Headless hotspot export
//!
//! The dispatcher runs early in `main()`, before the terminal is touched:
//!
//! ```ignore
//! use tapcanvas::cli::{parse_args, run_cli_command};
//!
//! let command = parse_args(std::env::args());
//! if let Some(result) = run_cli_command(&command) {
//!     // CLI command was executed, exit with result
//! }
//! // No CLI command, continue to the interactive prototype
//! ```

pub mod args;
pub mod export;
pub mod version;

pub use args::{parse_args, CliCommand, CliOptions, USAGE};
pub use export::{export_hotspots, handle_export_command};
pub use version::{handle_version_command, version_line, version_report, VERSION};

use color_eyre::eyre::eyre;
use color_eyre::Result;

use crate::startup::AppConfig;

/// Run a CLI command if applicable.
///
/// * `None` - the command is `Run` (no CLI action needed)
/// * `Some(Ok(()))` - a CLI command executed successfully
/// * `Some(Err(e))` - a CLI command failed
pub fn run_cli_command(command: &CliCommand) -> Option<Result<()>> {
    match command {
        CliCommand::Version => handle_version_command(),
        CliCommand::Help => {
            println!("{}", USAGE);
            Some(Ok(()))
        }
        CliCommand::Invalid(message) => Some(Err(eyre!("{}\n\n{}", message, USAGE))),
        CliCommand::Export(options) => {
            let config = AppConfig::from_env().with_cli(options);
            Some(handle_export_command(&config))
        }
        CliCommand::Run(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_returns_none() {
        assert!(run_cli_command(&CliCommand::Run(CliOptions::default())).is_none());
    }

    #[test]
    fn test_version_returns_instead_of_exiting() {
        assert!(matches!(run_cli_command(&CliCommand::Version), Some(Ok(()))));
    }

    #[test]
    fn test_invalid_is_error() {
        let result = run_cli_command(&CliCommand::Invalid("bad".to_string()));
        assert!(matches!(result, Some(Err(_))));
    }
}
