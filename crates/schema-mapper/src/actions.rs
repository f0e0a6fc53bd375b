use crate::effects::Effect;
use crate::store::Store;
use schema_tree::{MappingError, Point, Scene, Side, Transition};
use std::path::PathBuf;
use tracing::{debug, warn};

/// Actions that can be dispatched to modify the editor state
#[derive(Debug, Clone)]
pub enum Action {
    // Schema Input Actions
    /// Choose which side the input panel edits
    SetInputSide { side: Side },
    /// Replace the schema text buffer of one side
    SetSchemaText { side: Side, text: String },
    /// Parse the text buffer of one side and rebuild its graph
    LoadSchema { side: Side },

    // Intermediate Layer Actions
    /// Update the name typed for the next intermediate node
    SetIntermediateName { name: String },
    /// Append an intermediate node with the given name
    CreateIntermediateNode { name: String },
    /// Drop all intermediate nodes and mapping edges
    ClearIntermediate,

    // Edge Authoring Actions, in canvas coordinates
    PointerDown { at: Point },
    PointerMove { at: Point },
    PointerUp { at: Point },

    // File Operations
    /// Read a schema file into one side
    OpenSchemaFile { side: Side, path: PathBuf },
    /// Save current project to file
    SaveToFile { path: PathBuf },
    /// Load project from file
    LoadFromFile { path: PathBuf },
    /// Clear any error message
    ClearErrorMessage,
}

/// Apply a single action to modify the store state. Pointer actions are
/// hit-tested against `scene`, the last composed render of the model.
pub fn update(store: &mut Store, scene: &Scene, action: Action) -> Vec<Effect> {
    match action {
        // Schema Input Actions
        Action::SetInputSide { side } => {
            store.input_side = side;
            vec![]
        }
        Action::SetSchemaText { side, text } => {
            store.set_schema_text(side, text);
            vec![]
        }
        Action::LoadSchema { side } => {
            if let Err(e) = store.apply_schema_text(side) {
                warn!(?side, "schema rejected: {e}");
                store.error_message = Some(e.to_string());
            }
            vec![]
        }

        // Intermediate Layer Actions
        Action::SetIntermediateName { name } => {
            store.intermediate_name = name;
            vec![]
        }
        Action::CreateIntermediateNode { name } => {
            // an empty name is rejected before the model version moves
            let created = if name.is_empty() {
                Err(MappingError::InvalidName)
            } else {
                store
                    .model
                    .get_mut()
                    .add_intermediate_node(&name)
                    .map(|_| ())
            };
            match created {
                Ok(()) => store.intermediate_name.clear(),
                Err(e) => {
                    warn!("intermediate node rejected: {e}");
                    store.error_message = Some(e.to_string());
                }
            }
            vec![]
        }
        Action::ClearIntermediate => {
            store.model.get_mut().clear_intermediate();
            vec![]
        }

        // Edge Authoring Actions
        Action::PointerDown { at } => {
            store.session.pointer_down(scene, at);
            vec![]
        }
        Action::PointerMove { at } => {
            store.session.pointer_move(at);
            vec![]
        }
        Action::PointerUp { at } => {
            if let Transition::Committed(edge) =
                store.session.pointer_up(scene, at)
            {
                store
                    .model
                    .get_mut()
                    .add_mapping_edge(edge.source, edge.target);
            }
            vec![]
        }

        // File Operations
        Action::OpenSchemaFile { side, path } => {
            debug!(?side, path = %path.display(), "opening schema file");
            vec![Effect::OpenSchemaFile { side, path }]
        }
        Action::SaveToFile { path } => vec![Effect::SaveToFile { path }],
        Action::LoadFromFile { path } => {
            vec![Effect::LoadFromFile { path }]
        }
        Action::ClearErrorMessage => {
            store.error_message = None;
            vec![]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schema_tree::{MapperSettings, MappingEdge};

    fn store_with_schemas() -> Store {
        let mut store = Store::new(MapperSettings::default());
        for (side, text) in [
            (
                Side::Source,
                r#"{"type": "object", "properties": {"a": {"type": "string"}}}"#,
            ),
            (
                Side::Target,
                r#"{"type": "object", "properties": {"x": {"type": "string"}}}"#,
            ),
        ] {
            update(
                &mut store,
                &Scene::default(),
                Action::SetSchemaText {
                    side,
                    text: text.to_string(),
                },
            );
            update(&mut store, &Scene::default(), Action::LoadSchema { side });
        }
        store
    }

    fn scene(store: &Store) -> Scene {
        Scene::compose(store.model.get(), &store.settings).unwrap()
    }

    fn position(scene: &Scene, id: &str) -> Point {
        scene
            .source
            .nodes
            .iter()
            .chain(&scene.target.nodes)
            .find(|p| p.id == id)
            .map(|p| p.position)
            .unwrap()
    }

    #[test]
    fn test_invalid_schema_sets_error_message() {
        let mut store = Store::new(MapperSettings::default());
        let scene = Scene::default();
        update(
            &mut store,
            &scene,
            Action::SetSchemaText {
                side: Side::Source,
                text: "not json".to_string(),
            },
        );
        update(&mut store, &scene, Action::LoadSchema { side: Side::Source });
        assert!(store.error_message.is_some());
        assert!(store.model.get().source.is_empty());

        update(&mut store, &scene, Action::ClearErrorMessage);
        assert_eq!(store.error_message, None);
    }

    #[test]
    fn test_create_intermediate_clears_name() {
        let mut store = Store::new(MapperSettings::default());
        let scene = Scene::default();
        update(
            &mut store,
            &scene,
            Action::SetIntermediateName {
                name: "split".to_string(),
            },
        );
        let name = store.intermediate_name.clone();
        update(&mut store, &scene, Action::CreateIntermediateNode { name });
        assert_eq!(store.model.get().intermediate.nodes.len(), 1);
        assert!(store.intermediate_name.is_empty());
    }

    #[test]
    fn test_empty_intermediate_name_is_reported() {
        let mut store = Store::new(MapperSettings::default());
        update(
            &mut store,
            &Scene::default(),
            Action::CreateIntermediateNode {
                name: String::new(),
            },
        );
        assert!(store.model.get().intermediate.nodes.is_empty());
        assert_eq!(store.model.version(), 0);
        assert_eq!(
            store.error_message.as_deref(),
            Some("intermediate node name must not be empty")
        );
    }

    #[test]
    fn test_pointer_gesture_commits_edge() {
        let mut store = store_with_schemas();
        let scene = scene(&store);
        let (a, x) = (position(&scene, "$.a"), position(&scene, "$.x"));

        update(&mut store, &scene, Action::PointerDown { at: a });
        update(
            &mut store,
            &scene,
            Action::PointerMove {
                at: Point::new(500.0, 500.0),
            },
        );
        assert!(store.session.drag_line(&scene).is_some());
        update(&mut store, &scene, Action::PointerUp { at: x });

        assert_eq!(
            store.model.get().intermediate.edges,
            vec![MappingEdge::new("$.a", "$.x")]
        );
        assert!(store.session.is_idle());
    }

    #[test]
    fn test_drag_does_not_touch_model_version() {
        let mut store = store_with_schemas();
        let scene = scene(&store);
        let version = store.model.version();

        let a = position(&scene, "$.a");
        update(&mut store, &scene, Action::PointerDown { at: a });
        update(&mut store, &scene, Action::PointerMove { at: a });
        update(
            &mut store,
            &scene,
            Action::PointerUp {
                at: Point::new(0.0, 0.0),
            },
        );
        assert_eq!(store.model.version(), version);
    }

    #[test]
    fn test_file_actions_become_effects() {
        let mut store = Store::new(MapperSettings::default());
        let effects = update(
            &mut store,
            &Scene::default(),
            Action::SaveToFile {
                path: PathBuf::from("out.json"),
            },
        );
        assert!(matches!(
            effects.as_slice(),
            [Effect::SaveToFile { .. }]
        ));
    }
}
