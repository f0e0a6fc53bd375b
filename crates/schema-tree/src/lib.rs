//! Headless core of the schema mapper: turns JSON schemas into laid-out
//! trees, keeps the user's mappings between them and drives the
//! press-drag-release gesture that authors new mappings.

pub mod geometry;
pub mod graph;
pub mod layout;
pub mod mapping;
pub mod scene;
pub mod schema;
pub mod session;
pub mod settings;

pub use geometry::{Point, Rect, Segment};
pub use graph::{SchemaEdge, SchemaGraph, SchemaNode, TreeParts};
pub use layout::{TreeLayout, layout_tree};
pub use mapping::{
    IntermediateNode, MappingEdge, MappingError, MappingModel, NodeRef,
    Pool, Side,
};
pub use scene::{Canvas, Scene, SceneError, UnresolvedEdge};
pub use schema::{Schema, SchemaError, parse_schema};
pub use session::{EdgeAuthoringSession, Transition};
pub use settings::{EdgePolicy, MapperSettings, SettingsError};
