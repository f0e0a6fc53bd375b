// Mapping model: the two schema graphs plus the user-authored
// intermediate layer connecting them

use crate::graph::{PATH_DELIMITER, SchemaGraph};
use crate::schema::Schema;
use petgraph::stable_graph::NodeIndex;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const INTERMEDIATE_SEGMENT: &str = "intermediate";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Source,
    Target,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::Source, Side::Target];

    pub fn label(self) -> &'static str {
        match self {
            Side::Source => "Source",
            Side::Target => "Target",
        }
    }
}

/// Which end of a mapping edge a lookup is for. Each end sees its own
/// schema graph followed by the intermediate nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pool {
    /// Source graph, then intermediate nodes
    Upstream,
    /// Target graph, then intermediate nodes
    Downstream,
}

impl Pool {
    pub fn side(self) -> Side {
        match self {
            Pool::Upstream => Side::Source,
            Pool::Downstream => Side::Target,
        }
    }
}

/// A resolved node, pointing into one of the model's node lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeRef {
    Schema { side: Side, index: NodeIndex },
    Intermediate(usize),
}

/// User-created node standing for a transformation step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntermediateNode {
    pub id: String,
    pub path: Vec<String>,
}

impl IntermediateNode {
    pub fn new(name: &str) -> Self {
        let path =
            vec![INTERMEDIATE_SEGMENT.to_string(), name.to_string()];
        Self {
            id: path.join(PATH_DELIMITER),
            path,
        }
    }

    pub fn name(&self) -> &str {
        self.path.last().map(String::as_str).unwrap_or_default()
    }
}

/// "`source` feeds `target`". Endpoints are resolved lazily at draw time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingEdge {
    pub source: String,
    pub target: String,
}

impl MappingEdge {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntermediateLayer {
    pub nodes: Vec<IntermediateNode>,
    pub edges: Vec<MappingEdge>,
}

/// Source and target schema graphs with the intermediate layer.
///
/// Node and edge lists tolerate duplicates: the same intermediate name
/// or the same connection may be added more than once.
#[derive(Debug, Clone, Default)]
pub struct MappingModel {
    pub source: SchemaGraph,
    pub target: SchemaGraph,
    pub intermediate: IntermediateLayer,
}

impl MappingModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn graph(&self, side: Side) -> &SchemaGraph {
        match side {
            Side::Source => &self.source,
            Side::Target => &self.target,
        }
    }

    /// Replace one side with a freshly built graph. Mapping edges are
    /// kept even if their endpoints no longer exist.
    pub fn set_schema(&mut self, side: Side, schema: Schema) {
        let graph = SchemaGraph::from_schema(schema);
        debug!(?side, nodes = graph.len(), "schema graph rebuilt");
        match side {
            Side::Source => self.source = graph,
            Side::Target => self.target = graph,
        }
    }

    pub fn add_intermediate_node(
        &mut self,
        name: &str,
    ) -> Result<&IntermediateNode, MappingError> {
        if name.is_empty() {
            return Err(MappingError::InvalidName);
        }
        let nodes = &mut self.intermediate.nodes;
        nodes.push(IntermediateNode::new(name));
        debug!(name, "intermediate node added");
        Ok(&nodes[nodes.len() - 1])
    }

    pub fn add_mapping_edge(
        &mut self,
        source: impl Into<String>,
        target: impl Into<String>,
    ) {
        let edge = MappingEdge::new(source, target);
        debug!(source = %edge.source, target = %edge.target, "mapping edge added");
        self.intermediate.edges.push(edge);
    }

    pub fn clear_intermediate(&mut self) {
        self.intermediate = IntermediateLayer::default();
    }

    /// First node in `pool` carrying `id`: the schema graph wins over
    /// intermediate nodes, and earlier intermediate nodes win over
    /// later duplicates.
    pub fn resolve(&self, id: &str, pool: Pool) -> Option<NodeRef> {
        let side = pool.side();
        if let Some(index) = self.graph(side).find(id) {
            return Some(NodeRef::Schema { side, index });
        }
        self.intermediate
            .nodes
            .iter()
            .position(|node| node.id == id)
            .map(NodeRef::Intermediate)
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum MappingError {
    #[error("intermediate node name must not be empty")]
    InvalidName,
}
