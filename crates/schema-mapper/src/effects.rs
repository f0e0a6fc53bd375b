use crate::store::Store;
use schema_tree::Side;
use std::path::PathBuf;
use tracing::error;

/// Deferred effects that must run outside the main reducer (e.g., file IO)
#[derive(Debug, Clone)]
pub enum Effect {
    /// Read a schema document into one side
    OpenSchemaFile { side: Side, path: PathBuf },
    /// Save current project to disk
    SaveToFile { path: PathBuf },
    /// Load a project from disk
    LoadFromFile { path: PathBuf },
}

/// Execute a single effect against the store
pub fn run(store: &mut Store, effect: Effect) {
    let result = match effect {
        Effect::OpenSchemaFile { side, path } => {
            open_schema_file(store, side, &path)
        }
        Effect::SaveToFile { path } => store
            .save_to_file(&path)
            .map_err(|e| e.to_string()),
        Effect::LoadFromFile { path } => store
            .load_from_file(&path)
            .map_err(|e| e.to_string()),
    };
    if let Err(e) = result {
        error!("{e}");
        store.error_message = Some(e);
    }
}

fn open_schema_file(
    store: &mut Store,
    side: Side,
    path: &std::path::Path,
) -> Result<(), String> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        format!("Failed to read {}: {}", path.display(), e)
    })?;
    store.set_schema_text(side, text);
    store.apply_schema_text(side).map_err(|e| e.to_string())
}
