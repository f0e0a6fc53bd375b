use crate::store::Store;
use crate::versioned::Memoized;
use schema_tree::{Scene, SceneError};

pub struct Cache {
    /// Composed render of the model, rebuilt whenever the model changes
    pub scene: Memoized<Store, u64, Result<Scene, SceneError>>,
}

impl Cache {
    pub fn new() -> Self {
        let scene = Memoized::new(
            |s: &Store| s.model.version(),
            |s: &Store| Scene::compose(s.model.get(), &s.settings),
        );

        Self { scene }
    }
}

impl Default for Cache {
    fn default() -> Self {
        Self::new()
    }
}
