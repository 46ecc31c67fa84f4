use crate::host::ObjectId;
use crate::math::angle::normalize_degrees;

use super::vertex::VertexId;

slotmap::new_key_type! {
    /// Unique identifier for an edge in the cut graph.
    pub struct EdgeId;
}

/// Data associated with a cut-graph edge.
///
/// An edge is the intersection of one scene object with the cut plane,
/// and remembers that object so portal lookups can reach back into the
/// host catalog.
#[derive(Debug, Clone)]
pub struct EdgeData {
    /// Start vertex of the edge.
    pub start: VertexId,
    /// End vertex of the edge.
    pub end: VertexId,
    /// The scene object whose section produced this edge.
    pub source: ObjectId,
    /// Cached direction of the edge in degrees, start to end, in `[0, 360)`.
    pub angle: f64,
}

impl EdgeData {
    /// Angle of the edge as seen from one of its endpoints.
    ///
    /// Seen from the end vertex the edge points the opposite way, so the
    /// cached angle is flipped half a turn.
    #[must_use]
    pub fn angle_from(&self, forward: bool) -> f64 {
        if forward {
            self.angle
        } else {
            normalize_degrees(self.angle + 180.0)
        }
    }
}
