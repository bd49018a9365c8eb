//! Command-line argument parsing for tapcanvas.

use std::path::PathBuf;

/// Options shared by the interactive and export commands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOptions {
    /// `--assets <dir|url>`
    pub assets: Option<String>,
    /// `--watch <dir>`: per-screen hotspot files to merge and watch
    pub watch: Option<PathBuf>,
    /// `--author`: start in author mode
    pub author: bool,
    /// `--capture-dir <dir>`
    pub capture_dir: Option<PathBuf>,
}

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Load the prototype, print the serialized hotspot map and exit
    Export(CliOptions),
    /// Run the interactive prototype (default)
    Run(CliOptions),
    /// Bad arguments, with the message to print
    Invalid(String),
}

pub const USAGE: &str = "\
Usage: tapcanvas [OPTIONS]

Options:
  --assets <dir|url>     Prototype location (screens.json, hotspot.json, workflows.json)
  --watch <dir>          Merge and watch per-screen <screenId>.json hotspot files
  --author               Start in author mode
  --capture-dir <dir>    Where captures are written
  --export               Print the hotspot map as JSON and copy it to the clipboard
  -V, --version          Show version
  -h, --help             Show this help";

/// Parse command-line arguments and return the command to run.
///
/// # Examples
///
/// ```
/// use tapcanvas::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["tapcanvas".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), CliCommand::Version);
/// ```
pub fn parse_args<I>(args: I) -> CliCommand
where
    I: Iterator<Item = String>,
{
    let mut options = CliOptions::default();
    let mut export = false;
    // Skip the program name
    let mut args = args.skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => return CliCommand::Version,
            "--help" | "-h" => return CliCommand::Help,
            "--export" => export = true,
            "--author" => options.author = true,
            "--assets" | "--watch" | "--capture-dir" => {
                let Some(value) = args.next() else {
                    return CliCommand::Invalid(format!("{} needs a value", arg));
                };
                match arg.as_str() {
                    "--assets" => options.assets = Some(value),
                    "--watch" => options.watch = Some(PathBuf::from(value)),
                    _ => options.capture_dir = Some(PathBuf::from(value)),
                }
            }
            other => return CliCommand::Invalid(format!("unknown argument: {}", other)),
        }
    }

    if export {
        CliCommand::Export(options)
    } else {
        CliCommand::Run(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliCommand {
        let mut all = vec!["tapcanvas".to_string()];
        all.extend(args.iter().map(|s| s.to_string()));
        parse_args(all.into_iter())
    }

    #[test]
    fn test_parse_version_flags() {
        assert_eq!(parse(&["--version"]), CliCommand::Version);
        assert_eq!(parse(&["-V"]), CliCommand::Version);
    }

    #[test]
    fn test_parse_no_args() {
        assert_eq!(parse(&[]), CliCommand::Run(CliOptions::default()));
    }

    #[test]
    fn test_parse_run_options() {
        let command = parse(&["--assets", "http://localhost:8000", "--author", "--watch", "shots"]);
        assert_eq!(
            command,
            CliCommand::Run(CliOptions {
                assets: Some("http://localhost:8000".to_string()),
                watch: Some(PathBuf::from("shots")),
                author: true,
                capture_dir: None,
            })
        );
    }

    #[test]
    fn test_parse_export() {
        match parse(&["--export", "--assets", "proto"]) {
            CliCommand::Export(options) => assert_eq!(options.assets.as_deref(), Some("proto")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_missing_value() {
        assert!(matches!(parse(&["--assets"]), CliCommand::Invalid(_)));
    }

    #[test]
    fn test_parse_unknown_flag() {
        assert_eq!(
            parse(&["--unknown"]),
            CliCommand::Invalid("unknown argument: --unknown".to_string())
        );
    }
}
