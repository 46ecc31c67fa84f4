use std::collections::HashSet;

use tracing::warn;

use crate::dimension::AngularDimension;
use crate::error::GraphError;
use crate::graph::EdgeId;
use crate::math::angle::normalize_degrees;
use crate::math::same_point;

use super::Derivation;

/// Emits an angular callout at every corner where adjacent records meet
/// at an off-square, off-straight angle.
///
/// Each record is inspected at both endpoints against its immediate fan
/// neighbours. A shared corner is only measured once; the fan entry of a
/// record already handled is skipped, so a pair of records never yields
/// the same callout twice.
pub fn add_corner_callouts(ctx: &mut Derivation<'_>, framing: &[usize]) -> Result<(), GraphError> {
    let graph = ctx.graph;
    let mut processed: HashSet<EdgeId> = HashSet::new();

    for &d in framing {
        for vertex in 0..2 {
            let Some(edge_id) = ctx.dims[d].graph_edges[vertex] else {
                continue;
            };
            let edge = graph.edge(edge_id)?;
            let corner_point = ctx.dims[d].points[vertex];
            // Resolve the corner by position: a merged span can carry a
            // backing edge whose orientation is flipped relative to the
            // span itself.
            let (corner, forward) = if same_point(&graph.vertex(edge.start)?.point, &corner_point) {
                (edge.start, true)
            } else {
                (edge.end, false)
            };
            let angle = edge.angle_from(forward);

            let fan = &graph.vertex(corner)?.edges;
            if fan.len() <= 1 {
                continue;
            }
            let Some(e) = fan.iter().position(|entry| entry.edge == edge_id) else {
                warn!("corner fan does not contain its own edge");
                continue;
            };

            let next = fan[(e + 1) % fan.len()];
            if !processed.contains(&next.edge) {
                if let Some(&other) = ctx.dim_by_edge.get(next.edge) {
                    let angle0 = graph.edge(next.edge)?.angle_from(next.forward);
                    let diff = normalize_degrees(angle0 - angle);
                    if is_called_out(diff) {
                        create_callout(ctx, d, vertex, other);
                    }
                }
            }

            let prev = fan[(e + fan.len() - 1) % fan.len()];
            if !processed.contains(&prev.edge) {
                if let Some(&other) = ctx.dim_by_edge.get(prev.edge) {
                    let angle1 = graph.edge(prev.edge)?.angle_from(prev.forward);
                    let diff = normalize_degrees(angle - angle1);
                    if is_called_out(diff) {
                        let other_vertex = usize::from(!prev.forward);
                        create_callout(ctx, other, other_vertex, d);
                    }
                }
            }

            processed.insert(edge_id);
        }
    }
    Ok(())
}

/// Square and straight corners carry no callout; a one degree band
/// around each absorbs drafting noise.
pub fn is_called_out(angle_degrees: f64) -> bool {
    const THRESHOLD: f64 = 1.0;
    (angle_degrees >= THRESHOLD && angle_degrees <= 90.0 - THRESHOLD)
        || (angle_degrees >= 90.0 + THRESHOLD && angle_degrees <= 180.0 - THRESHOLD)
}

/// Adds a callout centred on `dims[dim1].points[vertex1]`, with one arm
/// along each record away from the corner.
pub fn create_callout(ctx: &mut Derivation<'_>, dim1: usize, vertex1: usize, dim2: usize) {
    let arm = ctx.options.angular_arm;
    let first = &ctx.dims[dim1];
    let center = first.points[vertex1];
    let start = if vertex1 == 0 {
        center + arm * first.dir
    } else {
        center - arm * first.dir
    };
    let second = &ctx.dims[dim2];
    let end = if same_point(&second.points[0], &center) {
        center + arm * second.dir
    } else {
        center - arm * second.dir
    };
    ctx.angular.push(AngularDimension { start, end, center });
}
