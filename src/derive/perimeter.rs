use tracing::warn;

use crate::dimension::{Dimension, FixedAxes, TextSide};
use crate::math::angle::ccw_turn_key;
use crate::math::{same_point, Point2, Vector2};

use super::propagate;

/// Walks an island's outer boundary anticlockwise from its lowest point
/// and pins every visited record as fully fixed at depth zero.
///
/// Returns the boundary records in walk order together with the start
/// point, or `None` when the island has no walkable boundary. Ties for
/// the lowest point break towards the smaller x coordinate, so the same
/// plan always starts its walk at the same corner.
pub fn walk_perimeter(dims: &mut [Dimension], framing: &[usize]) -> Option<(Vec<usize>, Point2)> {
    let Some((lowest_dim, low_index)) = lowest_endpoint(dims, framing) else {
        warn!("island has no record to anchor a perimeter walk");
        return None;
    };
    let start_point = dims[lowest_dim].points[low_index];

    let Some(start) = outward_start_edge(dims, lowest_dim, low_index, &start_point) else {
        warn!("no outward edge at the perimeter start point");
        return None;
    };

    let mut in_perimeter = vec![false; dims.len()];
    let mut order = Vec::new();
    let mut current = start;
    let mut current_point = start_point;

    while !in_perimeter[current] {
        in_perimeter[current] = true;
        order.push(current);

        let mut next = None;
        let mut matched = false;
        for i in 0..2 {
            if same_point(&dims[current].points[i], &current_point) {
                current_point = dims[current].points[1 - i];
                // The reference direction looks back along the travelled
                // span, so the smallest anticlockwise turn from it hugs
                // the outside of the island.
                let back = if i == 0 {
                    -dims[current].dir
                } else {
                    dims[current].dir
                };
                next = tightest_left_turn(dims, &current_point, &back, current, 1 - i);
                dims[current].side = if i == 0 { TextSide::Right } else { TextSide::Left };
                matched = true;
                break;
            }
        }
        if !matched {
            break;
        }
        match next {
            Some(n) => current = n,
            None => {
                warn!("perimeter walk hit a dead end before closing");
                break;
            }
        }
    }

    for &d in &order {
        dims[d].active = true;
        dims[d].depth = 0;
        dims[d].start_fixed = FixedAxes { x: true, y: true };
        dims[d].end_fixed = FixedAxes { x: true, y: true };
        propagate::propagate_vertical(dims, d, 0);
        propagate::propagate_vertical(dims, d, 1);
        propagate::propagate_horizontal(dims, d, 0);
        propagate::propagate_horizontal(dims, d, 1);
    }

    Some((order, start_point))
}

/// Endpoint with the smallest `(y, x)` over the island's framing.
fn lowest_endpoint(dims: &[Dimension], framing: &[usize]) -> Option<(usize, usize)> {
    let mut best = None;
    let mut min = (f64::INFINITY, f64::INFINITY);
    for &d in framing {
        for i in 0..2 {
            let p = dims[d].points[i];
            if (p.y, p.x) < min {
                min = (p.y, p.x);
                best = Some((d, i));
            }
        }
    }
    best
}

/// Record leaving the start point most strongly towards positive x,
/// considering the anchoring record itself and everything meeting it
/// there. Nothing lies below the start point, so this is the outermost
/// departure.
fn outward_start_edge(
    dims: &[Dimension],
    lowest_dim: usize,
    low_index: usize,
    start_point: &Point2,
) -> Option<usize> {
    let mut candidates = dims[lowest_dim].connections[low_index].clone();
    candidates.push(lowest_dim);

    let mut best = None;
    let mut max_x = f64::NEG_INFINITY;
    for &c in &candidates {
        let mut x = dims[c].dir.x;
        if same_point(&dims[c].points[1], start_point) {
            x = -x;
        }
        if x > max_x {
            max_x = x;
            best = Some(c);
        }
    }
    best
}

/// Connected record at `dims[d].points[vert]` whose outgoing direction
/// makes the smallest anticlockwise turn from `reference`.
fn tightest_left_turn(
    dims: &[Dimension],
    point: &Point2,
    reference: &Vector2,
    d: usize,
    vert: usize,
) -> Option<usize> {
    let mut min_key = 5.0;
    let mut best = None;
    for &c in &dims[d].connections[vert] {
        let candidate = if same_point(&dims[c].points[0], point) {
            dims[c].dir
        } else {
            -dims[c].dir
        };
        let key = ccw_turn_key(reference, &candidate);
        if key < min_key {
            min_key = key;
            best = Some(c);
        }
    }
    best
}
