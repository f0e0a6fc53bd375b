use crate::geometry::{Point, Rect, Segment};
use crate::graph::SchemaGraph;
use petgraph::stable_graph::NodeIndex;
use std::collections::HashMap;

/// Output of one layout pass. Positions are keyed by node index and are
/// only meaningful for the graph version they were computed from.
#[derive(Debug, Clone, Default)]
pub struct TreeLayout {
    pub positions: HashMap<NodeIndex, Point>,
    /// Parent to child segments, emitted after the child was placed
    pub segments: Vec<Segment>,
}

impl TreeLayout {
    pub fn position(&self, idx: NodeIndex) -> Option<Point> {
        self.positions.get(&idx).copied()
    }
}

/// Lay out the whole graph inside `bounds`. A graph without a root
/// produces an empty layout.
///
/// Pass a negative width to grow the tree leftward from `bounds.x`.
pub fn layout_tree(graph: &SchemaGraph, bounds: Rect) -> TreeLayout {
    let mut layout = TreeLayout::default();
    if let Some(root) = graph.root() {
        layout_subtree(graph, root, bounds, &mut layout);
    }
    layout
}

/// Place `root` at the anchor of `bounds` and recurse into its children.
pub fn layout_subtree(
    graph: &SchemaGraph,
    root: NodeIndex,
    bounds: Rect,
    layout: &mut TreeLayout,
) {
    let origin = bounds.anchor();
    layout.positions.insert(root, origin);

    for (child, region) in partition(graph, root, bounds) {
        layout_subtree(graph, child, region, layout);
        if let Some(to) = layout.position(child) {
            layout.segments.push(Segment::new(origin, to));
        }
    }
}

/// Split `bounds` among the direct children of `root`.
///
/// Horizontally, a child advances by `width / (remaining levels)`, so
/// deeper subtrees take smaller steps. Vertically, children get stacked
/// bands proportional to `leaf_count / root.leaf_count`.
pub fn partition(
    graph: &SchemaGraph,
    root: NodeIndex,
    bounds: Rect,
) -> Vec<(NodeIndex, Rect)> {
    let Some(parent) = graph.node(root) else {
        return Vec::new();
    };
    let total_leaves = parent.leaf_count.max(1) as f32;

    let mut current_y = bounds.y;
    let mut regions = Vec::new();
    for child_idx in graph.children(root) {
        let Some(child) = graph.node(child_idx) else {
            continue;
        };
        let levels =
            (child.max_depth.saturating_sub(child.depth) + 1) as f32;
        let sub_x = bounds.x + bounds.width / levels;
        let sub_w = bounds.width - (sub_x - bounds.x);
        let sub_h =
            bounds.height * child.leaf_count as f32 / total_leaves;

        regions.push((
            child_idx,
            Rect::new(sub_x, current_y, sub_w, sub_h),
        ));
        current_y += sub_h;
    }
    regions
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const EPS: f32 = 1e-3;

    fn example_graph() -> SchemaGraph {
        SchemaGraph::from_schema(json!({
            "type": "object",
            "properties": {
                "a": {"type": "string"},
                "b": {
                    "type": "object",
                    "properties": {"c": {"type": "number"}}
                }
            }
        }))
    }

    fn wide_graph() -> SchemaGraph {
        SchemaGraph::from_schema(json!({
            "type": "object",
            "properties": {
                "one": {"type": "string"},
                "two": {
                    "type": "object",
                    "properties": {
                        "x": {"type": "string"},
                        "y": {"type": "string"},
                        "z": {
                            "type": "object",
                            "properties": {
                                "deep": {"type": "boolean"}
                            }
                        }
                    }
                },
                "three": {"type": "number"}
            }
        }))
    }

    fn at(layout: &TreeLayout, graph: &SchemaGraph, id: &str) -> Point {
        layout.position(graph.find(id).unwrap()).unwrap()
    }

    fn close(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < EPS && (a.y - b.y).abs() < EPS
    }

    #[test]
    fn test_example_layout_in_square() {
        let graph = example_graph();
        let bounds = Rect::new(0.0, 0.0, 400.0, 400.0);
        let layout = layout_tree(&graph, bounds);

        let regions = partition(&graph, graph.root().unwrap(), bounds);
        let heights: Vec<_> = regions.iter().map(|(_, r)| r.height).collect();
        assert_eq!(heights, vec![200.0, 200.0]);

        assert!(close(at(&layout, &graph, "$"), Point::new(0.0, 200.0)));
        // leaf: full advance
        assert!(close(at(&layout, &graph, "$.a"), Point::new(400.0, 100.0)));
        // two levels remaining: half advance
        assert!(close(at(&layout, &graph, "$.b"), Point::new(200.0, 300.0)));
        assert!(close(
            at(&layout, &graph, "$.b.c"),
            Point::new(400.0, 300.0)
        ));
    }

    #[test]
    fn test_bands_fill_height_proportionally() {
        let graph = wide_graph();
        let bounds = Rect::new(10.0, 20.0, 300.0, 500.0);
        let root = graph.root().unwrap();
        let root_leaves = graph.node(root).unwrap().leaf_count as f32;

        let regions = partition(&graph, root, bounds);
        let total: f32 = regions.iter().map(|(_, r)| r.height).sum();
        assert!((total - bounds.height).abs() < EPS);

        let mut expected_y = bounds.y;
        for (idx, region) in &regions {
            let leaves = graph.node(*idx).unwrap().leaf_count as f32;
            let expected = bounds.height * leaves / root_leaves;
            assert!((region.height - expected).abs() < EPS);
            assert!((region.y - expected_y).abs() < EPS);
            expected_y += region.height;
        }
    }

    #[test]
    fn test_negative_width_mirrors_positions() {
        let graph = wide_graph();
        let anchor_x = 500.0;
        let ltr = layout_tree(&graph, Rect::new(anchor_x, 0.0, 300.0, 600.0));
        let rtl =
            layout_tree(&graph, Rect::new(anchor_x, 0.0, -300.0, 600.0));

        assert_eq!(ltr.positions.len(), graph.len());
        for (idx, p) in &ltr.positions {
            let q = rtl.position(*idx).unwrap();
            let mirrored = Point::new(2.0 * anchor_x - p.x, p.y);
            assert!(close(q, mirrored), "{:?} vs {:?}", q, mirrored);
        }
    }

    #[test]
    fn test_segments_join_parent_and_child_positions() {
        let graph = wide_graph();
        let layout = layout_tree(&graph, Rect::new(0.0, 0.0, 250.0, 800.0));

        assert_eq!(layout.segments.len(), graph.edges().len());
        for edge in graph.edges() {
            let from = at(&layout, &graph, &edge.source);
            let to = at(&layout, &graph, &edge.target);
            assert!(
                layout
                    .segments
                    .iter()
                    .any(|s| close(s.from, from) && close(s.to, to)),
                "missing segment {:?}",
                edge
            );
        }
    }

    #[test]
    fn test_deepest_child_segment_comes_first() {
        let graph = example_graph();
        let layout = layout_tree(&graph, Rect::new(0.0, 0.0, 400.0, 400.0));
        let order: Vec<_> = layout.segments.iter().map(|s| s.to).collect();
        // $.a, then $.b.c (inside $.b's recursion), then $.b
        assert_eq!(order.len(), 3);
        assert!(close(order[0], Point::new(400.0, 100.0)));
        assert!(close(order[1], Point::new(400.0, 300.0)));
        assert!(close(order[2], Point::new(200.0, 300.0)));
    }

    #[test]
    fn test_layout_without_root_is_empty() {
        let layout =
            layout_tree(&SchemaGraph::default(), Rect::new(0.0, 0.0, 1.0, 1.0));
        assert!(layout.positions.is_empty());
        assert!(layout.segments.is_empty());
    }

    #[test]
    fn test_empty_object_sibling_overflows_parent_band() {
        // `meta` is an object without properties: it takes a full band
        // but is not counted in the root's leaf count.
        let graph = SchemaGraph::from_schema(json!({
            "type": "object",
            "properties": {
                "meta": {"type": "object"},
                "name": {"type": "string"}
            }
        }));
        let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
        let regions = partition(&graph, graph.root().unwrap(), bounds);
        let total: f32 = regions.iter().map(|(_, r)| r.height).sum();
        assert!((total - 200.0).abs() < EPS);
    }
}
