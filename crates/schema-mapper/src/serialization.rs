use schema_tree::{MappingEdge, MappingError, MappingModel, Schema, Side};
use serde::{Deserialize, Serialize};
use std::path::Path;

// ------------------------------------------------------------------
// Serialization structures
// ------------------------------------------------------------------

/// On-disk form of a mapping project. Schemas are stored as the
/// documents they were built from; the graphs are rebuilt on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializableProject {
    #[serde(default)]
    pub source_schema: Option<Schema>,
    #[serde(default)]
    pub target_schema: Option<Schema>,
    /// Intermediate node names in creation order
    #[serde(default)]
    pub intermediate_nodes: Vec<String>,
    #[serde(default)]
    pub mapping_edges: Vec<MappingEdge>,
}

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("failed to access project file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse project: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid project: {0}")]
    Mapping(#[from] MappingError),
}

// ------------------------------------------------------------------
// Conversion functions
// ------------------------------------------------------------------

fn loaded_schema(model: &MappingModel, side: Side) -> Option<Schema> {
    let graph = model.graph(side);
    (!graph.is_empty()).then(|| graph.schema().clone())
}

pub fn model_to_serializable(model: &MappingModel) -> SerializableProject {
    SerializableProject {
        source_schema: loaded_schema(model, Side::Source),
        target_schema: loaded_schema(model, Side::Target),
        intermediate_nodes: model
            .intermediate
            .nodes
            .iter()
            .map(|node| node.name().to_string())
            .collect(),
        mapping_edges: model.intermediate.edges.clone(),
    }
}

pub fn serializable_to_model(
    project: SerializableProject,
) -> Result<MappingModel, ProjectError> {
    let mut model = MappingModel::new();
    if let Some(schema) = project.source_schema {
        model.set_schema(Side::Source, schema);
    }
    if let Some(schema) = project.target_schema {
        model.set_schema(Side::Target, schema);
    }
    for name in &project.intermediate_nodes {
        model.add_intermediate_node(name)?;
    }
    // edges are restored verbatim, dangling ones included
    for edge in project.mapping_edges {
        model.add_mapping_edge(edge.source, edge.target);
    }
    Ok(model)
}

// ------------------------------------------------------------------
// File I/O
// ------------------------------------------------------------------

pub fn save_to_file(
    project: &SerializableProject,
    path: &Path,
) -> Result<(), ProjectError> {
    let json = serde_json::to_string_pretty(project)?;
    std::fs::write(path, json)?;
    Ok(())
}

pub fn load_from_file(
    path: &Path,
) -> Result<SerializableProject, ProjectError> {
    let json_str = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json_str)?)
}

// ------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------
