// Render pass: derives positions for every node of a mapping model and
// replays them onto a canvas through two drawing primitives

use crate::geometry::{Point, Segment};
use crate::layout::{TreeLayout, layout_tree};
use crate::mapping::{MappingEdge, MappingModel, NodeRef, Pool, Side};
use crate::settings::{EdgePolicy, MapperSettings};
use std::fmt;
use tracing::warn;

/// Drawing surface. The scene never needs more than lines and labels.
pub trait Canvas {
    /// Reset the surface; called once at the start of every paint.
    fn clear(&mut self);
    fn line(&mut self, from: Point, to: Point);
    fn label(&mut self, at: Point, text: &str);
}

/// A node with a position, ready for hit testing and painting.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedNode {
    pub node: NodeRef,
    pub id: String,
    pub label: String,
    pub position: Point,
}

#[derive(Debug, Clone, Default)]
pub struct PlacedTree {
    /// Positioned nodes in builder order
    pub nodes: Vec<PlacedNode>,
    pub layout: TreeLayout,
}

fn place_tree(
    model: &MappingModel,
    side: Side,
    settings: &MapperSettings,
) -> PlacedTree {
    let graph = model.graph(side);
    let bounds = match side {
        Side::Source => settings.source_bounds(),
        Side::Target => settings.target_bounds(),
    };
    let layout = layout_tree(graph, bounds);

    let nodes = graph
        .nodes()
        .filter_map(|(index, node)| {
            layout.position(index).map(|position| PlacedNode {
                node: NodeRef::Schema { side, index },
                id: node.id.clone(),
                label: node.label(),
                position,
            })
        })
        .collect();

    PlacedTree { nodes, layout }
}

fn place_intermediate(
    model: &MappingModel,
    settings: &MapperSettings,
) -> Vec<PlacedNode> {
    let nodes = &model.intermediate.nodes;
    if nodes.is_empty() {
        return Vec::new();
    }
    let column = settings.intermediate_bounds();
    let dy = column.height / nodes.len() as f32;

    nodes
        .iter()
        .enumerate()
        .map(|(i, node)| PlacedNode {
            node: NodeRef::Intermediate(i),
            id: node.id.clone(),
            label: node.name().to_string(),
            position: Point::new(column.x, column.y + i as f32 * dy),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Source,
    Target,
}

/// A mapping edge with an endpoint missing from the current model.
#[derive(Debug, Clone, PartialEq)]
pub struct UnresolvedEdge {
    pub edge: MappingEdge,
    pub endpoint: Endpoint,
}

impl fmt::Display for UnresolvedEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (end, id) = match self.endpoint {
            Endpoint::Source => ("source", &self.edge.source),
            Endpoint::Target => ("target", &self.edge.target),
        };
        write!(
            f,
            "{} endpoint `{}` of mapping {} -> {} not found",
            end, id, self.edge.source, self.edge.target
        )
    }
}

/// Immutable snapshot of one render pass.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub source: PlacedTree,
    pub target: PlacedTree,
    pub intermediate: Vec<PlacedNode>,
    pub mapping_segments: Vec<Segment>,
    /// Edges skipped under [`EdgePolicy::Skip`]
    pub unresolved: Vec<UnresolvedEdge>,
}

impl Scene {
    pub fn compose(
        model: &MappingModel,
        settings: &MapperSettings,
    ) -> Result<Self, SceneError> {
        let mut scene = Scene {
            source: place_tree(model, Side::Source, settings),
            target: place_tree(model, Side::Target, settings),
            intermediate: place_intermediate(model, settings),
            ..Default::default()
        };

        for edge in &model.intermediate.edges {
            match scene.edge_segment(model, edge) {
                Ok(segment) => scene.mapping_segments.push(segment),
                Err(unresolved) => match settings.unresolved_edges {
                    EdgePolicy::Skip => {
                        warn!("skipping mapping edge: {}", unresolved);
                        scene.unresolved.push(unresolved);
                    }
                    EdgePolicy::FailFast => {
                        return Err(SceneError::UnresolvedReference(
                            unresolved,
                        ));
                    }
                },
            }
        }

        Ok(scene)
    }

    pub fn tree(&self, side: Side) -> &PlacedTree {
        match side {
            Side::Source => &self.source,
            Side::Target => &self.target,
        }
    }

    pub fn position(&self, node: NodeRef) -> Option<Point> {
        match node {
            NodeRef::Schema { side, index } => {
                self.tree(side).layout.position(index)
            }
            NodeRef::Intermediate(i) => {
                self.intermediate.get(i).map(|placed| placed.position)
            }
        }
    }

    fn edge_segment(
        &self,
        model: &MappingModel,
        edge: &MappingEdge,
    ) -> Result<Segment, UnresolvedEdge> {
        let locate = |id: &str, pool: Pool, endpoint: Endpoint| {
            model
                .resolve(id, pool)
                .and_then(|node| self.position(node))
                .ok_or_else(|| UnresolvedEdge {
                    edge: edge.clone(),
                    endpoint,
                })
        };
        let from = locate(&edge.source, Pool::Upstream, Endpoint::Source)?;
        let to = locate(&edge.target, Pool::Downstream, Endpoint::Target)?;
        Ok(Segment::new(from, to))
    }

    /// Candidates for one end of an edge: the side's schema nodes first,
    /// then the intermediate column.
    pub fn candidates(
        &self,
        pool: Pool,
    ) -> impl Iterator<Item = &PlacedNode> + '_ {
        self.tree(pool.side())
            .nodes
            .iter()
            .chain(self.intermediate.iter())
    }

    /// First candidate strictly closer than `threshold`. Ties go to list
    /// order, not to the nearest node.
    pub fn hit_test(
        &self,
        pool: Pool,
        at: Point,
        threshold: f32,
    ) -> Option<&PlacedNode> {
        self.candidates(pool)
            .find(|placed| placed.position.distance(at) < threshold)
    }

    /// Replay the scene: both trees, the pending drag line, mapping
    /// edges and finally the intermediate labels.
    pub fn paint<C: Canvas + ?Sized>(
        &self,
        canvas: &mut C,
        drag_line: Option<Segment>,
    ) {
        canvas.clear();
        for tree in [&self.source, &self.target] {
            for placed in &tree.nodes {
                canvas.label(placed.position, &placed.label);
            }
            for segment in &tree.layout.segments {
                canvas.line(segment.from, segment.to);
            }
        }
        if let Some(segment) = drag_line {
            canvas.line(segment.from, segment.to);
        }
        for segment in &self.mapping_segments {
            canvas.line(segment.from, segment.to);
        }
        for placed in &self.intermediate {
            canvas.label(placed.position, &placed.label);
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum SceneError {
    #[error("unresolved reference: {0}")]
    UnresolvedReference(UnresolvedEdge),
}
