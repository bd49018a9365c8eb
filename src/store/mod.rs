//! Hotspot store: the authoritative hotspot map and the active-screen list.
//!
//! The store owns `screen id → [Hotspot]` and publishes the validated list
//! for the active screen through a [`Signal`]. Everything the overlay shows
//! comes out of [`HotspotStore::set_active_screen`] or a mutation that
//! republishes.

mod action;
mod sanitize;
mod validate;

pub use action::{resolve, ActionOutcome, LOGIN_ID_FIELD, LOGIN_PASSWORD_FIELD};
pub use sanitize::sanitize;
pub use validate::check;

use serde_json::Value;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::error::{ActionError, LoadError};
use crate::models::{Hotspot, HotspotDocument, HotspotMap, InputValues};
use crate::signal::Signal;

/// Owner of all hotspot records.
#[derive(Debug, Default)]
pub struct HotspotStore {
    hotspots: HotspotMap,
    active_screen: Option<String>,
    active: Signal<Vec<Hotspot>>,
}

impl HotspotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole mapping. The active screen, if any, is republished.
    pub fn load(&mut self, hotspots: HotspotMap) {
        let total: usize = hotspots.values().map(Vec::len).sum();
        info!(
            "Loaded {} hotspots across {} screens",
            total,
            hotspots.len()
        );
        self.hotspots = hotspots;
        if let Some(screen_id) = self.active_screen.clone() {
            self.publish(&screen_id);
        }
    }

    /// Parse a hotspot document and [`load`](Self::load) it.
    ///
    /// Accepts both the wrapped `{ "screens": {...} }` form that
    /// [`serialize`](Self::serialize) produces and a bare `{ id: [...] }`
    /// map.
    pub fn load_json(&mut self, text: &str, asset: &str) -> Result<(), LoadError> {
        let map = parse_hotspots(text, asset)?;
        self.load(map);
        Ok(())
    }

    /// Every hotspot configured for `screen_id`, valid or not.
    pub fn hotspots_for(&self, screen_id: &str) -> &[Hotspot] {
        self.hotspots
            .get(screen_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The full mapping.
    pub fn hotspots(&self) -> &HotspotMap {
        &self.hotspots
    }

    /// Make `screen_id` the active screen and publish its valid hotspots.
    pub fn set_active_screen(&mut self, screen_id: &str) {
        self.active_screen = Some(screen_id.to_string());
        self.publish(screen_id);
    }

    pub fn active_screen(&self) -> Option<&str> {
        self.active_screen.as_deref()
    }

    /// Snapshot of the published list.
    pub fn active_hotspots(&self) -> Vec<Hotspot> {
        self.active.snapshot()
    }

    /// Find a hotspot in the published list by id.
    pub fn active_hotspot(&self, id: &str) -> Option<Hotspot> {
        self.active.borrow().iter().find(|h| h.id == id).cloned()
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<Hotspot>> {
        self.active.subscribe()
    }

    /// Number of publications so far.
    pub fn publication_count(&self) -> u64 {
        self.active.version()
    }

    /// `true` when the hotspot may be shown. Violations are logged.
    pub fn validate(&self, hotspot: &Hotspot) -> bool {
        match check(hotspot) {
            Ok(()) => true,
            Err(e) => {
                warn!("{}", e);
                false
            }
        }
    }

    /// See [`sanitize()`].
    pub fn sanitize(&self, text: &str) -> String {
        sanitize(text)
    }

    /// See [`resolve`].
    pub fn resolve_action(
        &self,
        hotspot: &Hotspot,
        input_values: &InputValues,
    ) -> Result<ActionOutcome, ActionError> {
        resolve(hotspot, input_values)
    }

    /// Insert a hotspot, replacing an existing one with the same id.
    pub fn add_hotspot(&mut self, screen_id: &str, hotspot: Hotspot) {
        let list = self.hotspots.entry(screen_id.to_string()).or_default();
        match list.iter_mut().find(|h| h.id == hotspot.id) {
            Some(existing) => {
                debug!("Replacing hotspot {} on {}", hotspot.id, screen_id);
                *existing = hotspot;
            }
            None => {
                info!("Added hotspot {} to {}", hotspot.id, screen_id);
                list.push(hotspot);
            }
        }
        self.republish_if_active(screen_id);
    }

    /// Replace one screen's whole list, as a hotspot source file re-merge
    /// does. Republishes when the screen is active.
    pub fn replace_screen(&mut self, screen_id: &str, hotspots: Vec<Hotspot>) {
        info!("Replaced {} hotspots on {}", hotspots.len(), screen_id);
        self.hotspots.insert(screen_id.to_string(), hotspots);
        self.republish_if_active(screen_id);
    }

    /// Replace the hotspot with the same id. Returns `false` when no such
    /// hotspot exists on `screen_id`; nothing changes in that case.
    pub fn update_hotspot(&mut self, screen_id: &str, hotspot: Hotspot) -> bool {
        let Some(existing) = self
            .hotspots
            .get_mut(screen_id)
            .and_then(|list| list.iter_mut().find(|h| h.id == hotspot.id))
        else {
            warn!("Update for unknown hotspot {} on {}", hotspot.id, screen_id);
            return false;
        };
        debug!("Updated hotspot {} on {}", hotspot.id, screen_id);
        *existing = hotspot;
        self.republish_if_active(screen_id);
        true
    }

    /// Next free `<screen>_<n>` id.
    pub fn next_hotspot_id(&self, screen_id: &str) -> String {
        let list = self.hotspots_for(screen_id);
        let mut n = list.len() + 1;
        loop {
            let candidate = format!("{}_{}", screen_id, n);
            if !list.iter().any(|h| h.id == candidate) {
                return candidate;
            }
            n += 1;
        }
    }

    /// Pretty JSON `{ "screens": { id: [Hotspot] } }`.
    pub fn serialize(&self) -> String {
        let document = HotspotDocument {
            screens: self.hotspots.clone(),
        };
        // Strings, finite numbers and maps only; serialization cannot fail.
        serde_json::to_string_pretty(&document).unwrap_or_else(|e| {
            warn!("Hotspot serialization failed: {}", e);
            String::from("{}")
        })
    }

    fn republish_if_active(&mut self, screen_id: &str) {
        if self.active_screen.as_deref() == Some(screen_id) {
            self.publish(screen_id);
        }
    }

    fn publish(&mut self, screen_id: &str) {
        let list: Vec<Hotspot> = self
            .hotspots_for(screen_id)
            .iter()
            .filter(|h| self.validate(h))
            .cloned()
            .collect();
        debug!("Publishing {} hotspots for {}", list.len(), screen_id);
        self.active.set(list);
    }
}

/// Parse a hotspot document in either the wrapped or the bare form.
pub fn parse_hotspots(text: &str, asset: &str) -> Result<HotspotMap, LoadError> {
    parse_document(text).map_err(|e| LoadError::Malformed {
        asset: asset.to_string(),
        message: e.to_string(),
    })
}

fn parse_document(text: &str) -> Result<HotspotMap, serde_json::Error> {
    let value: Value = serde_json::from_str(text)?;
    let wrapped = value
        .as_object()
        .map(|obj| obj.len() == 1 && obj.get("screens").is_some_and(Value::is_object))
        .unwrap_or(false);
    if wrapped {
        let document: HotspotDocument = serde_json::from_value(value)?;
        Ok(document.screens)
    } else {
        serde_json::from_value(value)
    }
}
