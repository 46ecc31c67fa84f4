use crate::dimension::Dimension;
use crate::math::{same_point, Point2};

/// Copies the endpoint status of `dims[d]` at `vert` into every record
/// sharing that endpoint.
pub fn spread_status(dims: &mut [Dimension], d: usize, vert: usize) {
    let point = dims[d].points[vert];
    let status = dims[d].fixed(vert);
    for idx in 0..dims[d].connections[vert].len() {
        let n = dims[d].connections[vert][idx];
        if same_point(&dims[n].points[0], &point) {
            dims[n].start_fixed.merge(status);
        } else {
            dims[n].end_fixed.merge(status);
        }
    }
}

/// Marks a record's Y extent as fixed and spreads that status outward
/// through connected horizontal runs.
///
/// Runs are walked with an explicit work list; a record whose Y flags are
/// already both set is not re-entered, which keeps the spread linear on
/// grid-like plans.
pub fn propagate_horizontal(dims: &mut [Dimension], d: usize, vert: usize) {
    let mut work = vec![(d, vert)];
    while let Some((current, vert)) = work.pop() {
        dims[current].start_fixed.y = true;
        dims[current].end_fixed.y = true;
        spread_status(dims, current, 0);
        spread_status(dims, current, 1);

        let point = dims[current].points[vert];
        let far = dims[current].points[1 - vert];
        let along_axis = dims[current].horizontal;
        for idx in 0..dims[current].connections[vert].len() {
            let n = dims[current].connections[vert][idx];
            if !dims[n].horizontal {
                continue;
            }
            let reach = far_endpoint(dims, n, &point);
            // Keep going only where the run continues past this endpoint
            // instead of doubling back along the current record.
            let continues = !along_axis || ((reach.x > point.x) ^ (point.x < far.x));
            if continues && !(dims[n].start_fixed.y && dims[n].end_fixed.y) {
                work.push((n, usize::from(same_point(&dims[n].points[0], &point))));
            }
        }
    }
}

/// Marks a record's X extent as fixed and spreads that status outward
/// through connected vertical runs. Mirror image of
/// [`propagate_horizontal`].
pub fn propagate_vertical(dims: &mut [Dimension], d: usize, vert: usize) {
    let mut work = vec![(d, vert)];
    while let Some((current, vert)) = work.pop() {
        dims[current].start_fixed.x = true;
        dims[current].end_fixed.x = true;
        spread_status(dims, current, 0);
        spread_status(dims, current, 1);

        let point = dims[current].points[vert];
        let far = dims[current].points[1 - vert];
        let along_axis = dims[current].vertical;
        for idx in 0..dims[current].connections[vert].len() {
            let n = dims[current].connections[vert][idx];
            if !dims[n].vertical {
                continue;
            }
            let reach = far_endpoint(dims, n, &point);
            let continues = !along_axis || ((reach.y > point.y) ^ (point.y < far.y));
            if continues && !(dims[n].start_fixed.x && dims[n].end_fixed.x) {
                work.push((n, usize::from(same_point(&dims[n].points[0], &point))));
            }
        }
    }
}

/// Labels every framing record with its hop count from the depth-0
/// perimeter, sweeping until a full pass assigns nothing.
///
/// Returns one past the deepest label actually assigned; the activation
/// sweep simply finds nobody on its last level.
pub fn assign_depths(dims: &mut [Dimension], framing: &[usize]) -> u32 {
    let mut depth = 1;
    loop {
        let mut changed = false;
        for &d in framing {
            for endpoint in 0..2 {
                for idx in 0..dims[d].connections[endpoint].len() {
                    let n = dims[d].connections[endpoint][idx];
                    if dims[d].depth > depth && dims[n].depth == depth - 1 {
                        dims[d].depth = depth;
                        changed = true;
                    }
                }
            }
        }
        depth += 1;
        if !changed {
            break;
        }
    }
    depth - 1
}

/// Activates framing dimensions level by level until every reachable
/// endpoint is pinned on both axes.
///
/// An axis-aligned record whose endpoints are already derivable stays
/// inactive; activating it fixes both ends as soon as either is known.
/// Diagonal records always get their own dimension.
pub fn activate_by_depth(dims: &mut [Dimension], framing: &[usize], max_depth: u32) {
    for depth in 1..=max_depth {
        for &d in framing {
            if dims[d].depth != depth {
                continue;
            }
            if dims[d].horizontal {
                if !dims[d].start_fixed.x || !dims[d].end_fixed.x {
                    dims[d].active = true;
                    let fixed = dims[d].start_fixed.x || dims[d].end_fixed.x;
                    dims[d].start_fixed.x = fixed;
                    dims[d].end_fixed.x = fixed;
                    if fixed {
                        propagate_vertical(dims, d, 0);
                        propagate_vertical(dims, d, 1);
                    }
                }
            } else if dims[d].vertical {
                if !dims[d].start_fixed.y || !dims[d].end_fixed.y {
                    dims[d].active = true;
                    let fixed = dims[d].start_fixed.y || dims[d].end_fixed.y;
                    dims[d].start_fixed.y = fixed;
                    dims[d].end_fixed.y = fixed;
                    if fixed {
                        propagate_horizontal(dims, d, 0);
                        propagate_horizontal(dims, d, 1);
                    }
                }
            } else {
                dims[d].active = true;
            }
            spread_status(dims, d, 0);
            spread_status(dims, d, 1);
        }
    }
}

fn far_endpoint(dims: &[Dimension], n: usize, point: &Point2) -> Point2 {
    if same_point(&dims[n].points[0], point) {
        dims[n].points[1]
    } else {
        dims[n].points[0]
    }
}
