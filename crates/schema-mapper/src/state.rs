use crate::actions::{self, Action};
use crate::cache::Cache;
use crate::effects::{self, Effect};
use crate::store::Store;
use schema_tree::Scene;

pub struct State {
    pub store: Store,
    pub cache: Cache,
    action_queue: Vec<Action>,
    effect_queue: Vec<Effect>,
}

impl State {
    pub fn new(store: Store) -> Self {
        Self {
            store,
            cache: Cache::new(),
            action_queue: Vec::new(),
            effect_queue: Vec::new(),
        }
    }

    pub fn dispatch(&mut self, action: Action) {
        self.action_queue.push(action);
    }

    /// Run queued actions in order. Each one sees the scene composed
    /// from the model as left by the previous action; a scene that
    /// failed to compose offers nothing to hit.
    pub fn flush_actions(&mut self) {
        let actions = std::mem::take(&mut self.action_queue);
        let unavailable = Scene::default();
        for action in actions {
            let scene = self
                .cache
                .scene
                .get(&self.store)
                .as_ref()
                .unwrap_or(&unavailable);
            let mut effects =
                actions::update(&mut self.store, scene, action);
            self.effect_queue.append(&mut effects);
        }
    }

    pub fn flush_effects(&mut self) {
        let effects = std::mem::take(&mut self.effect_queue);
        for effect in effects {
            effects::run(&mut self.store, effect);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schema_tree::{EdgePolicy, MapperSettings, Point, Side};

    fn state(settings: MapperSettings) -> State {
        let mut state = State::new(Store::new(settings));
        for (side, text) in [
            (
                Side::Source,
                r#"{"type": "object", "properties": {"a": {"type": "string"}}}"#,
            ),
            (Side::Target, r#"{"type": "string"}"#),
        ] {
            state.dispatch(Action::SetSchemaText {
                side,
                text: text.to_string(),
            });
            state.dispatch(Action::LoadSchema { side });
        }
        state.flush_actions();
        state
    }

    #[test]
    fn test_actions_see_the_scene_of_earlier_actions() {
        let mut state = state(MapperSettings::default());
        // source root sits at the left margin, target root at the right
        state.dispatch(Action::PointerDown {
            at: Point::new(100.0, 500.0),
        });
        state.dispatch(Action::PointerUp {
            at: Point::new(900.0, 500.0),
        });
        state.flush_actions();
        let edges = &state.store.model.get().intermediate.edges;
        assert_eq!(edges.len(), 1);
        assert_eq!((edges[0].source.as_str(), edges[0].target.as_str()), ("$", "$"));
    }

    #[test]
    fn test_failed_scene_disables_hit_testing() {
        let settings = MapperSettings {
            unresolved_edges: EdgePolicy::FailFast,
            ..MapperSettings::default()
        };
        let mut state = state(settings);
        state.store.model.get_mut().add_mapping_edge("$.gone", "$");
        assert!(state.cache.scene.get(&state.store).is_err());

        state.dispatch(Action::PointerDown {
            at: Point::new(100.0, 500.0),
        });
        state.flush_actions();
        assert!(state.store.session.is_idle());
    }

    #[test]
    fn test_effects_run_after_flush() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("p.json");
        let mut state = state(MapperSettings::default());

        state.dispatch(Action::SaveToFile { path: path.clone() });
        state.flush_actions();
        assert!(!path.exists());
        state.flush_effects();
        assert!(path.exists());
    }
}
