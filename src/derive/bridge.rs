use crate::dimension::{Dimension, DimensionKind};
use crate::error::GraphError;
use crate::math::angle::{direction_degrees, normalize_degrees};
use crate::math::same_point;

use super::{angular, Derivation};

/// Endpoint pair tying two islands together. Two specs describing the
/// same pair from opposite sides compare equal.
#[derive(Debug, Clone, Copy)]
struct BridgeSpec {
    dim_a: usize,
    vert_a: usize,
    dim_b: usize,
    vert_b: usize,
}

impl PartialEq for BridgeSpec {
    fn eq(&self, other: &Self) -> bool {
        (self.dim_a == other.dim_a
            && self.vert_a == other.vert_a
            && self.dim_b == other.dim_b
            && self.vert_b == other.vert_b)
            || (self.dim_a == other.dim_b
                && self.vert_a == other.vert_b
                && self.dim_b == other.dim_a
                && self.vert_b == other.vert_a)
    }
}

/// Ties disjoint islands together with bridging dimensions.
///
/// Each island proposes a bridge to the closest endpoint outside itself;
/// mutual proposals collapse into one. Every bridge yields an active
/// bridging record plus a reference record anchoring angular callouts at
/// both landing points.
pub fn connect_islands(ctx: &mut Derivation<'_>, islands: &[Vec<usize>]) -> Result<(), GraphError> {
    if islands.len() < 2 {
        return Ok(());
    }

    let mut bridges: Vec<BridgeSpec> = Vec::new();
    for island in 0..islands.len() {
        let mut others: Vec<usize> = Vec::new();
        for p in 1..islands.len() {
            others.extend_from_slice(&islands[(island + p) % islands.len()]);
        }

        let Some(spec) = closest_pair(&ctx.dims, &islands[island], &others) else {
            continue;
        };
        if !bridges.contains(&spec) {
            bridges.push(spec);
        }
    }

    for spec in &bridges {
        bridge_dimensions(ctx, spec)?;
    }
    Ok(())
}

/// Brute-force closest endpoint pair between an island and the rest of
/// the plan. The x distance check is a running prefilter against the
/// best distance so far.
fn closest_pair(dims: &[Dimension], island: &[usize], others: &[usize]) -> Option<BridgeSpec> {
    let mut min_dist2 = f64::INFINITY;
    let mut min_dist = f64::INFINITY;
    let mut best = None;
    for &a in island {
        for vert_a in 0..2 {
            let position = dims[a].points[vert_a];
            for &b in others {
                for vert_b in 0..2 {
                    let candidate = dims[b].points[vert_b];
                    if (candidate.x - position.x).abs() < min_dist {
                        let dist2 = (candidate - position).norm_squared();
                        if dist2 < min_dist2 {
                            min_dist2 = dist2;
                            min_dist = dist2.sqrt();
                            best = Some(BridgeSpec {
                                dim_a: a,
                                vert_a,
                                dim_b: b,
                                vert_b,
                            });
                        }
                    }
                }
            }
        }
    }
    best
}

/// Emits the bridging and reference records for one bridge and measures
/// the landing angles at both ends against the full corner fan.
fn bridge_dimensions(ctx: &mut Derivation<'_>, spec: &BridgeSpec) -> Result<(), GraphError> {
    let v1 = ctx.dims[spec.dim_a].points[spec.vert_a];
    let v2 = ctx.dims[spec.dim_b].points[spec.vert_b];

    let mut bridging = Dimension::new(v1, v2);
    bridging.kind = DimensionKind::Bridging;
    bridging.active = true;
    ctx.dims.push(bridging);

    let mut reference = Dimension::new(v1, v2);
    reference.kind = DimensionKind::Reference;
    reference.active = true;
    let ref_dir = reference.dir;
    let ref_index = ctx.dims.len();
    ctx.dims.push(reference);

    let graph = ctx.graph;
    let base_angle = direction_degrees(&ref_dir);
    for bridge_vertex in 0..2 {
        let (host_dim, host_vert) = if bridge_vertex == 0 {
            (spec.dim_a, spec.vert_a)
        } else {
            (spec.dim_b, spec.vert_b)
        };
        // The reference line is measured outward from each landing point.
        let angle = if bridge_vertex == 0 {
            base_angle
        } else {
            normalize_degrees(base_angle + 180.0)
        };

        let Some(edge_id) = ctx.dims[host_dim].graph_edges[host_vert] else {
            continue;
        };
        let edge = graph.edge(edge_id)?;
        let landing = ctx.dims[host_dim].points[host_vert];
        let corner = if same_point(&graph.vertex(edge.start)?.point, &landing) {
            edge.start
        } else {
            edge.end
        };

        let mut min_diff = 400.0;
        let mut max_diff = -1.0;
        let mut min_entry = None;
        let mut max_entry = None;
        for &entry in &graph.vertex(corner)?.edges {
            let departure = graph.edge(entry.edge)?.angle_from(entry.forward);
            let diff = normalize_degrees(departure - angle);
            if diff < min_diff {
                min_diff = diff;
                min_entry = Some(entry);
            }
            if diff > max_diff {
                max_diff = diff;
                max_entry = Some(entry);
            }
        }

        // Anticlockwise gap to the nearest edge, then the clockwise one.
        if let Some(entry) = min_entry {
            if angular::is_called_out(min_diff) {
                if let Some(&other) = ctx.dim_by_edge.get(entry.edge) {
                    angular::create_callout(ctx, ref_index, bridge_vertex, other);
                }
            }
        }
        if let Some(entry) = max_entry {
            let clockwise = 360.0 - max_diff;
            if angular::is_called_out(clockwise) {
                if let Some(&other) = ctx.dim_by_edge.get(entry.edge) {
                    let other_vertex = usize::from(!entry.forward);
                    angular::create_callout(ctx, other, other_vertex, ref_index);
                }
            }
        }
    }
    Ok(())
}
