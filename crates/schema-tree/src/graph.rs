// Schema graph module - decomposes a schema document into a tree of
// path-addressed nodes annotated with layout metadata

use crate::schema::{Schema, is_object, properties, schema_type};
use petgraph::Direction;
use petgraph::stable_graph::{NodeIndex, StableGraph};
use petgraph::visit::EdgeRef;
use serde::Serialize;
use std::collections::HashMap;

pub const PATH_DELIMITER: &str = ".";
pub const ROOT_SEGMENT: &str = "$";

/// One schema location.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaNode {
    /// Dot-joined path from the graph root, e.g. `$.foo.bar`
    pub id: String,
    pub path: Vec<String>,
    pub depth: usize,
    pub schema_type: Option<String>,
    pub is_leaf: bool,
    /// Depth of the deepest descendant (own depth for leaves)
    pub max_depth: usize,
    /// Leaf descendants, never below 1
    pub leaf_count: usize,
}

impl SchemaNode {
    /// Last path segment.
    pub fn name(&self) -> &str {
        self.path.last().map(String::as_str).unwrap_or_default()
    }

    pub fn label(&self) -> String {
        match &self.schema_type {
            Some(kind) => format!("{} ({})", self.name(), kind),
            None => self.name().to_string(),
        }
    }
}

/// Parent to child link inside one schema graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaEdge {
    pub source: String,
    pub target: String,
}

/// Flat builder output: descendants precede their parent in `nodes`,
/// and each parent edge precedes the edges of the child's subtree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TreeParts {
    pub nodes: Vec<SchemaNode>,
    pub edges: Vec<SchemaEdge>,
}

pub fn path_id(path: &[String]) -> String {
    path.join(PATH_DELIMITER)
}

/// Decompose a schema rooted at `$`.
pub fn build(schema: &Schema) -> TreeParts {
    schema_to_tree(schema, vec![ROOT_SEGMENT.to_string()], 0)
}

/// Decompose `schema` as if it sat at `base_path`, `depth` levels below
/// the graph root.
///
/// Only `object` schemas have children. An object without `properties`
/// therefore ends up with no children and a clamped leaf count of 1,
/// while still reporting `is_leaf == false`.
pub fn schema_to_tree(
    schema: &Schema,
    base_path: Vec<String>,
    depth: usize,
) -> TreeParts {
    let id = path_id(&base_path);
    let mut parts = TreeParts::default();

    let is_leaf = !is_object(schema);
    if !is_leaf {
        for (key, sub_schema) in properties(schema) {
            let mut path = base_path.clone();
            path.push(key.clone());

            parts.edges.push(SchemaEdge {
                source: id.clone(),
                target: path_id(&path),
            });

            let child = schema_to_tree(sub_schema, path, depth + 1);
            parts.nodes.extend(child.nodes);
            parts.edges.extend(child.edges);
        }
    }

    let max_depth = parts
        .nodes
        .iter()
        .map(|node| node.depth)
        .fold(depth, usize::max);
    let leaf_count =
        parts.nodes.iter().filter(|node| node.is_leaf).count().max(1);

    parts.nodes.push(SchemaNode {
        id,
        path: base_path,
        depth,
        schema_type: schema_type(schema).map(str::to_string),
        is_leaf,
        max_depth,
        leaf_count,
    });

    parts
}

pub type SchemaTree = StableGraph<SchemaNode, ()>;

/// A built schema together with its tree and an id index.
///
/// Node indices follow builder order, so iterating `nodes()` yields the
/// same sequence the builder produced.
#[derive(Debug, Clone)]
pub struct SchemaGraph {
    schema: Schema,
    tree: SchemaTree,
    edges: Vec<SchemaEdge>,
    index: HashMap<String, NodeIndex>,
    root: Option<NodeIndex>,
}

impl Default for SchemaGraph {
    /// No schema loaded yet: no nodes, no root.
    fn default() -> Self {
        Self {
            schema: Schema::Object(Default::default()),
            tree: SchemaTree::default(),
            edges: Vec::new(),
            index: HashMap::new(),
            root: None,
        }
    }
}

impl SchemaGraph {
    pub fn from_schema(schema: Schema) -> Self {
        let parts = build(&schema);
        Self::from_parts(schema, parts)
    }

    pub fn from_parts(schema: Schema, parts: TreeParts) -> Self {
        let mut tree = SchemaTree::default();
        let mut index = HashMap::new();

        // Dotted property keys can collide with nested paths; the first
        // node carrying an id owns it.
        for node in parts.nodes {
            let id = node.id.clone();
            let idx = tree.add_node(node);
            index.entry(id).or_insert(idx);
        }

        for edge in &parts.edges {
            if let (Some(&source), Some(&target)) =
                (index.get(&edge.source), index.get(&edge.target))
            {
                tree.add_edge(source, target, ());
            }
        }

        let root = tree
            .node_indices()
            .find(|&idx| tree[idx].depth == 0);

        Self {
            schema,
            tree,
            edges: parts.edges,
            index,
            root,
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn tree(&self) -> &SchemaTree {
        &self.tree
    }

    pub fn edges(&self) -> &[SchemaEdge] {
        &self.edges
    }

    pub fn root(&self) -> Option<NodeIndex> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.tree.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.node_count() == 0
    }

    pub fn node(&self, idx: NodeIndex) -> Option<&SchemaNode> {
        self.tree.node_weight(idx)
    }

    pub fn find(&self, id: &str) -> Option<NodeIndex> {
        self.index.get(id).copied()
    }

    /// Nodes in builder order.
    pub fn nodes(
        &self,
    ) -> impl Iterator<Item = (NodeIndex, &SchemaNode)> + '_ {
        self.tree
            .node_indices()
            .filter_map(|idx| self.tree.node_weight(idx).map(|n| (idx, n)))
    }

    /// Direct children in property order.
    pub fn children(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut outgoing: Vec<_> = self
            .tree
            .edges_directed(idx, Direction::Outgoing)
            .map(|edge| (edge.id(), edge.target()))
            .collect();
        outgoing.sort_by_key(|(edge_idx, _)| *edge_idx);
        outgoing.into_iter().map(|(_, target)| target).collect()
    }
}
