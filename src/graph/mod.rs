pub mod edge;
pub mod vertex;

pub use edge::{EdgeData, EdgeId};
pub use vertex::{VertexData, VertexEdge, VertexId};

use crate::error::GraphError;
use crate::host::ObjectId;
use crate::math::{angle, Point2};
use slotmap::SlotMap;

/// Planar graph of section edges on a single cut plane.
///
/// Vertices and edges live in arenas and reference each other via typed
/// IDs (generational indices). Each vertex keeps its incident edges as a
/// fan sorted ascending by departure angle, which is what the perimeter
/// walk and the angular callout scan rely on.
#[derive(Debug, Default)]
pub struct CutGraph {
    vertices: SlotMap<VertexId, VertexData>,
    edges: SlotMap<EdgeId, EdgeData>,
}

impl CutGraph {
    /// Creates a new, empty cut graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Vertex operations ---

    /// Inserts a vertex at the given point and returns its ID.
    pub fn add_vertex(&mut self, point: Point2) -> VertexId {
        self.vertices.insert(VertexData::new(point))
    }

    /// Returns a reference to the vertex data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the vertex is not in the graph.
    pub fn vertex(&self, id: VertexId) -> Result<&VertexData, GraphError> {
        self.vertices
            .get(id)
            .ok_or_else(|| GraphError::EntityNotFound("vertex".into()))
    }

    /// Iterates over all vertices in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = (VertexId, &VertexData)> {
        self.vertices.iter()
    }

    /// Number of vertices in the graph.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    // --- Edge operations ---

    /// Inserts an edge between two existing vertices and returns its ID.
    ///
    /// The edge's direction angle is computed and cached, and the edge is
    /// spliced into both endpoint fans, which keeps each fan sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if either endpoint is missing from the graph, or
    /// if both endpoints are the same vertex.
    pub fn add_edge(
        &mut self,
        start: VertexId,
        end: VertexId,
        source: ObjectId,
    ) -> Result<EdgeId, GraphError> {
        if start == end {
            return Err(GraphError::InvalidEdge(
                "edge endpoints must be distinct".into(),
            ));
        }
        let start_point = self.vertex(start)?.point;
        let end_point = self.vertex(end)?.point;
        let direction = angle::direction_degrees(&(end_point - start_point));

        let id = self.edges.insert(EdgeData {
            start,
            end,
            source,
            angle: direction,
        });
        self.attach(start, VertexEdge { edge: id, forward: true });
        self.attach(end, VertexEdge { edge: id, forward: false });
        Ok(id)
    }

    /// Returns a reference to the edge data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the edge is not in the graph.
    pub fn edge(&self, id: EdgeId) -> Result<&EdgeData, GraphError> {
        self.edges
            .get(id)
            .ok_or_else(|| GraphError::EntityNotFound("edge".into()))
    }

    /// Iterates over all edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &EdgeData)> {
        self.edges.iter()
    }

    /// Number of edges in the graph.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn attach(&mut self, vertex: VertexId, entry: VertexEdge) {
        let edges = &self.edges;
        if let Some(data) = self.vertices.get_mut(vertex) {
            data.edges.push(entry);
            data.edges.sort_by(|a, b| {
                let a_angle = edges[a.edge].angle_from(a.forward);
                let b_angle = edges[b.edge].angle_from(b.forward);
                a_angle.total_cmp(&b_angle)
            });
        }
    }
}
