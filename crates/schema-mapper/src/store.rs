use crate::serialization::{
    ProjectError, load_from_file, model_to_serializable, save_to_file,
    serializable_to_model,
};
use crate::versioned::Versioned;
use schema_tree::{
    EdgeAuthoringSession, MapperSettings, MappingModel, SchemaError, Side,
    parse_schema,
};
use std::path::Path;
use tracing::info;

/// Everything the editor knows. Only the reducer and effects write to it.
pub struct Store {
    pub model: Versioned<MappingModel>,
    pub session: EdgeAuthoringSession,
    pub settings: MapperSettings,

    // Input panel
    pub input_side: Side,
    source_text: String,
    target_text: String,
    pub intermediate_name: String,

    pub error_message: Option<String>,
}

impl Store {
    pub fn new(settings: MapperSettings) -> Self {
        Self {
            model: Versioned::new(MappingModel::new()),
            session: EdgeAuthoringSession::new(settings.distance_threshold),
            settings,
            input_side: Side::Source,
            source_text: String::new(),
            target_text: String::new(),
            intermediate_name: String::new(),
            error_message: None,
        }
    }

    pub fn schema_text(&self, side: Side) -> &str {
        match side {
            Side::Source => &self.source_text,
            Side::Target => &self.target_text,
        }
    }

    pub fn set_schema_text(&mut self, side: Side, text: String) {
        match side {
            Side::Source => self.source_text = text,
            Side::Target => self.target_text = text,
        }
    }

    /// Parse the text buffer of `side` and rebuild that graph. On a parse
    /// failure the model is left untouched.
    pub fn apply_schema_text(&mut self, side: Side) -> Result<(), SchemaError> {
        let schema = parse_schema(self.schema_text(side))?;
        self.model.get_mut().set_schema(side, schema);
        Ok(())
    }

    pub fn save_to_file(&self, path: &Path) -> Result<(), ProjectError> {
        save_to_file(&model_to_serializable(self.model.get()), path)?;
        info!(path = %path.display(), "project saved");
        Ok(())
    }

    /// Replace the whole model with a saved project. The schema text
    /// buffers are refilled from the loaded schemas.
    pub fn load_from_file(&mut self, path: &Path) -> Result<(), ProjectError> {
        let project = load_from_file(path)?;
        let texts = [
            (Side::Source, project.source_schema.as_ref()),
            (Side::Target, project.target_schema.as_ref()),
        ]
        .map(|(side, schema)| {
            let text = schema
                .map(serde_json::to_string_pretty)
                .transpose()?
                .unwrap_or_default();
            Ok::<_, ProjectError>((side, text))
        });

        let model = serializable_to_model(project)?;
        for entry in texts {
            let (side, text) = entry?;
            self.set_schema_text(side, text);
        }
        self.model.set(model);
        self.session =
            EdgeAuthoringSession::new(self.settings.distance_threshold);
        info!(path = %path.display(), "project loaded");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEMA: &str = r#"{"type": "object", "properties": {"a": {"type": "string"}}}"#;

    #[test]
    fn test_apply_schema_text_rebuilds_selected_side() {
        let mut store = Store::new(MapperSettings::default());
        store.set_schema_text(Side::Target, SCHEMA.to_string());
        store.apply_schema_text(Side::Target).unwrap();

        assert!(store.model.get().source.is_empty());
        assert_eq!(store.model.get().target.len(), 2);
        assert_eq!(store.model.version(), 1);
    }

    #[test]
    fn test_invalid_text_leaves_model_alone() {
        let mut store = Store::new(MapperSettings::default());
        store.set_schema_text(Side::Source, SCHEMA.to_string());
        store.apply_schema_text(Side::Source).unwrap();

        store.set_schema_text(Side::Source, "{ nope".to_string());
        assert!(store.apply_schema_text(Side::Source).is_err());
        assert_eq!(store.model.get().source.len(), 2);
        assert_eq!(store.model.version(), 1);
    }

    #[test]
    fn test_save_then_load_restores_model_and_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mapping.json");

        let mut store = Store::new(MapperSettings::default());
        store.set_schema_text(Side::Source, SCHEMA.to_string());
        store.apply_schema_text(Side::Source).unwrap();
        store
            .model
            .get_mut()
            .add_intermediate_node("upper")
            .unwrap();
        store
            .model
            .get_mut()
            .add_mapping_edge("$.a", "intermediate.upper");
        store.save_to_file(&path).unwrap();

        let mut fresh = Store::new(MapperSettings::default());
        fresh.load_from_file(&path).unwrap();
        let model = fresh.model.get();
        assert_eq!(model.source.len(), 2);
        assert!(model.target.is_empty());
        assert_eq!(model.intermediate, store.model.get().intermediate);
        assert!(fresh.schema_text(Side::Source).contains("\"a\""));
        assert_eq!(fresh.schema_text(Side::Target), "");
    }
}
