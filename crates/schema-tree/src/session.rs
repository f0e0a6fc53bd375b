// Edge authoring: press on a source-side node, drag, release on a
// target-side node to commit a mapping edge

use crate::geometry::{Point, Segment};
use crate::mapping::{MappingEdge, NodeRef, Pool};
use crate::scene::Scene;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Default)]
enum AuthoringState {
    #[default]
    Idle,
    Selecting {
        node: NodeRef,
        node_id: String,
        /// Last pointer position seen while dragging
        pointer: Option<Point>,
    },
}

/// What a pointer event did to the session.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// The event had no effect
    Ignored,
    Selected { node_id: String },
    Dragged,
    /// Released over a target-side node; the caller stores the edge
    Committed(MappingEdge),
    /// Released over empty space; the pending edge is dropped
    Released,
}

#[derive(Debug, Clone)]
pub struct EdgeAuthoringSession {
    state: AuthoringState,
    threshold: f32,
}

impl EdgeAuthoringSession {
    pub fn new(threshold: f32) -> Self {
        Self {
            state: AuthoringState::Idle,
            threshold,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.state == AuthoringState::Idle
    }

    /// Id of the node a pending edge starts from.
    pub fn selected_id(&self) -> Option<&str> {
        match &self.state {
            AuthoringState::Selecting { node_id, .. } => Some(node_id.as_str()),
            AuthoringState::Idle => None,
        }
    }

    /// Select the first source-side node under the pointer. A press
    /// over empty space leaves the session as it was.
    pub fn pointer_down(&mut self, scene: &Scene, at: Point) -> Transition {
        let Some(hit) = scene.hit_test(Pool::Upstream, at, self.threshold)
        else {
            return Transition::Ignored;
        };
        debug!(node = %hit.id, "edge authoring: node selected");
        self.state = AuthoringState::Selecting {
            node: hit.node,
            node_id: hit.id.clone(),
            pointer: None,
        };
        Transition::Selected {
            node_id: hit.id.clone(),
        }
    }

    pub fn pointer_move(&mut self, at: Point) -> Transition {
        match &mut self.state {
            AuthoringState::Selecting { pointer, .. } => {
                *pointer = Some(at);
                Transition::Dragged
            }
            AuthoringState::Idle => Transition::Ignored,
        }
    }

    /// Finish the gesture. Always returns the session to `Idle`.
    pub fn pointer_up(&mut self, scene: &Scene, at: Point) -> Transition {
        let AuthoringState::Selecting { node_id, .. } =
            std::mem::take(&mut self.state)
        else {
            return Transition::Ignored;
        };

        match scene.hit_test(Pool::Downstream, at, self.threshold) {
            Some(hit) => {
                debug!(from = %node_id, to = %hit.id, "edge authoring: committed");
                Transition::Committed(MappingEdge::new(
                    node_id,
                    hit.id.clone(),
                ))
            }
            None => {
                debug!(from = %node_id, "edge authoring: released on empty space");
                Transition::Released
            }
        }
    }

    /// Temporary line from the selected node to the pointer.
    pub fn drag_line(&self, scene: &Scene) -> Option<Segment> {
        match &self.state {
            AuthoringState::Selecting {
                node,
                pointer: Some(pointer),
                ..
            } => scene
                .position(*node)
                .map(|from| Segment::new(from, *pointer)),
            _ => None,
        }
    }
}
