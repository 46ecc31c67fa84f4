use crate::math::Point2;

use super::edge::EdgeId;

slotmap::new_key_type! {
    /// Unique identifier for a vertex in the cut graph.
    pub struct VertexId;
}

/// One entry in a vertex's edge fan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexEdge {
    /// The incident edge.
    pub edge: EdgeId,
    /// Whether the edge starts at this vertex (`true`) or ends here (`false`).
    pub forward: bool,
}

/// Data associated with a cut-graph vertex.
#[derive(Debug, Clone)]
pub struct VertexData {
    /// The 2D position of the vertex on the cut plane.
    pub point: Point2,
    /// Incident edges, sorted ascending by the angle at which each edge
    /// leaves this vertex.
    pub edges: Vec<VertexEdge>,
}

impl VertexData {
    /// Creates a new vertex at the given point, with no incident edges.
    #[must_use]
    pub fn new(point: Point2) -> Self {
        Self {
            point,
            edges: Vec::new(),
        }
    }
}
