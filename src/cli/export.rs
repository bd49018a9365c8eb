//! `--export`: load the prototype headless and print the hotspot map.

use color_eyre::Result;

use crate::clipboard;
use crate::error::{ErrorContext, ResultExt};
use crate::startup::{load_prototype, AppConfig};
use crate::store::HotspotStore;

/// Load, serialize, copy and print. Returns the printed JSON.
pub async fn export_hotspots(config: &AppConfig) -> Result<String> {
    let loader = config.asset_loader()?;
    let prototype = load_prototype(loader, config).await.with_context(|| {
        ErrorContext::new("export")
            .with_component("cli")
            .with_asset(config.assets.clone())
    })?;

    let mut store = HotspotStore::new();
    store.load(prototype.hotspots);
    let export = clipboard::export(store.serialize());
    eprintln!("{}", export.summary());
    Ok(export.json)
}

/// Handle the --export command.
pub fn handle_export_command(config: &AppConfig) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    let json = runtime.block_on(export_hotspots(config))?;
    println!("{}", json);
    Ok(())
}
