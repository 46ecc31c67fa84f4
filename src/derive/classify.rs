use tracing::debug;

use crate::dimension::Dimension;
use crate::error::GraphError;
use crate::math::MIN_EDGE_LENGTH;

use super::Derivation;

/// Creates one framing record per usable section edge, then wires record
/// connectivity from the vertex fans.
///
/// Degenerate edges produce no record and never appear in connection
/// lists. Connection lists keep fan order, so walks over them inherit
/// the angular ordering of the graph.
pub fn create_dimensions(ctx: &mut Derivation<'_>) -> Result<(), GraphError> {
    let graph = ctx.graph;

    for (edge_id, edge) in graph.edges() {
        let start = graph.vertex(edge.start)?.point;
        let end = graph.vertex(edge.end)?.point;

        let mut dim = Dimension::new(start, end);
        if dim.length <= MIN_EDGE_LENGTH {
            debug!(source = edge.source.0, "skipping degenerate section edge");
            continue;
        }
        dim.graph_edges = [Some(edge_id), Some(edge_id)];
        dim.source = Some(edge.source);
        dim.portal = ctx.hosts.hosts_portal(edge.source);

        ctx.dim_by_edge.insert(edge_id, ctx.dims.len());
        ctx.dims.push(dim);
    }

    for index in 0..ctx.dims.len() {
        let Some(own_edge) = ctx.dims[index].graph_edges[0] else {
            continue;
        };
        let edge = graph.edge(own_edge)?;
        for (endpoint, vertex_id) in [(0, edge.start), (1, edge.end)] {
            let fan = &graph.vertex(vertex_id)?.edges;
            for entry in fan {
                if entry.edge == own_edge {
                    continue;
                }
                if let Some(&other) = ctx.dim_by_edge.get(entry.edge) {
                    ctx.dims[index].connections[endpoint].push(other);
                }
            }
        }
    }

    Ok(())
}
