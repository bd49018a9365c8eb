//! `--version`: the build and what it can read.

use crate::traits::{HOTSPOTS_ASSET, SCREENS_ASSET, WORKFLOWS_ASSET};

/// The current version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Screen image formats compiled into the `image` dependency.
pub const IMAGE_FORMATS: &[&str] = &["png", "jpeg"];

/// First line of the report, also used in the startup log.
pub fn version_line() -> String {
    format!("tapcanvas {}", VERSION)
}

/// Version plus the documents, sources and image formats this build reads.
pub fn version_report() -> String {
    [
        version_line(),
        format!(
            "  documents: {}, {}, {}",
            SCREENS_ASSET, HOTSPOTS_ASSET, WORKFLOWS_ASSET
        ),
        "  sources:   directory, http(s) base URL".to_string(),
        format!("  images:    {}", IMAGE_FORMATS.join(", ")),
    ]
    .join("\n")
}

pub fn handle_version_command() -> Option<color_eyre::Result<()>> {
    println!("{}", version_report());
    Some(Ok(()))
}
