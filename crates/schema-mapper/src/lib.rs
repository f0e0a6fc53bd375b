//! Interactive editor for mappings between two JSON schemas.

pub mod actions;
pub mod app;
pub mod cache;
pub mod canvas;
pub mod effects;
pub mod native;
pub mod serialization;
pub mod state;
pub mod store;
pub mod versioned;
pub mod web;

use crate::app::MapperApp;
use crate::state::State;
use crate::store::Store;
use schema_tree::MapperSettings;
use std::path::Path;
use tracing::{info, warn};

/// Optional settings file looked up in the working directory.
pub const SETTINGS_FILE: &str = "schema-mapper.json";

/// Settings from `path` if it exists; defaults otherwise, including when
/// the file is unreadable or invalid.
pub fn load_settings(path: &Path) -> MapperSettings {
    if !path.exists() {
        return MapperSettings::default();
    }
    match MapperSettings::load(path) {
        Ok(settings) => {
            info!(path = %path.display(), "settings loaded");
            settings
        }
        Err(e) => {
            warn!(path = %path.display(), "{e}. Using default settings.");
            MapperSettings::default()
        }
    }
}

pub fn create_app(_cc: &eframe::CreationContext<'_>) -> MapperApp {
    let settings = if cfg!(target_arch = "wasm32") {
        MapperSettings::default()
    } else {
        load_settings(Path::new(SETTINGS_FILE))
    };
    MapperApp::new(State::new(Store::new(settings)))
}
