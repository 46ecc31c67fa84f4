use tracing::warn;

use crate::dimension::{Dimension, DimensionKind, DimensionState};
use crate::host::ObjectId;
use crate::math::{are_parallel, same_point};

/// Collapses each portal and its flanking wall run into one framing span,
/// demoting the run members to opening dimensions.
///
/// A run extends from the portal in both directions through records that
/// are parallel to it and either portals themselves or cut from the same
/// host object, stopping at junctions. The replacement span takes over
/// the run's outer connections so the rest of the pipeline never sees the
/// consumed records.
pub fn merge_portal_runs(dims: &mut Vec<Dimension>, framing: &mut Vec<usize>) {
    let mut replacements = Vec::new();

    for slot in 0..framing.len() {
        let d = framing[slot];
        if dims[d].state != DimensionState::Live || !dims[d].portal {
            continue;
        }
        let Some(host) = anchor_host(dims, d) else {
            continue;
        };

        let mut runs = [absorb_run(dims, d, 0, host), absorb_run(dims, d, 1, host)];
        if runs[0].cycled || runs[1].cycled {
            // A looping run cannot be collapsed; keep the portal itself
            // visible as a plain framing dimension.
            dims[d].active = true;
        }
        if runs[0].members.is_empty() && runs[1].members.is_empty() {
            continue;
        }
        // A side that absorbed nothing is represented by the portal itself.
        if runs[0].members.is_empty() {
            runs[0].members.push(d);
            runs[0].outer_vert = 0;
        } else if runs[1].members.is_empty() {
            runs[1].members.push(d);
            runs[1].outer_vert = 1;
        }
        let (Some(&first), Some(&last)) = (runs[0].members.last(), runs[1].members.last()) else {
            continue;
        };

        let span_index = dims.len();
        let mut span = Dimension::new(
            dims[first].points[runs[0].outer_vert],
            dims[last].points[runs[1].outer_vert],
        );
        span.connections[0] = dims[first].connections[runs[0].outer_vert].clone();
        span.connections[1] = dims[last].connections[runs[1].outer_vert].clone();
        span.side = dims[first].side;
        span.graph_edges[0] = dims[first].graph_edges[runs[0].outer_vert];
        span.graph_edges[1] = dims[last].graph_edges[runs[1].outer_vert];

        // Outer neighbours now connect to the span instead of the run ends.
        for k in 0..span.connections[0].len() {
            relink(dims, span.connections[0][k], first, span_index);
        }
        for k in 0..span.connections[1].len() {
            relink(dims, span.connections[1][k], last, span_index);
        }
        dims.push(span);
        replacements.push(span_index);

        drop_longest_opening(dims, &runs);
        dims[d].active = true;
        dims[d].kind = DimensionKind::Opening;
        dims[d].state = DimensionState::Consumed;
        for run in &runs {
            for &member in &run.members {
                dims[member].kind = DimensionKind::Opening;
                dims[member].state = DimensionState::Consumed;
            }
        }
    }

    framing.retain(|&d| dims[d].state == DimensionState::Live);
    framing.extend(replacements);
}

/// The host object flanking a portal, taken from whichever portal end has
/// exactly one neighbour. Portals boxed in by junctions at both ends have
/// no anchor and are left alone, as are portals whose only neighbour is a
/// synthetic span.
fn anchor_host(dims: &[Dimension], d: usize) -> Option<ObjectId> {
    if dims[d].connections[0].len() == 1 {
        dims[dims[d].connections[0][0]].source
    } else if dims[d].connections[1].len() == 1 {
        dims[dims[d].connections[1][0]].source
    } else {
        None
    }
}

struct RunAbsorption {
    /// Absorbed records, nearest first.
    members: Vec<usize>,
    /// Endpoint index of the last member facing away from the portal.
    outer_vert: usize,
    cycled: bool,
}

fn absorb_run(dims: &[Dimension], origin: usize, side: usize, host: ObjectId) -> RunAbsorption {
    let mut members = Vec::new();
    let mut outer_vert = side;
    let mut current = origin;
    let mut next_vert = side;
    let direction = dims[origin].dir;

    loop {
        let point = dims[current].points[next_vert];
        if dims[current].connections[next_vert].len() != 1 {
            break;
        }
        let next = dims[current].connections[next_vert][0];
        if !dims[next].portal && dims[next].source != Some(host) {
            break;
        }
        if !are_parallel(&direction, &dims[next].dir) {
            break;
        }
        if members.contains(&next) {
            warn!(record = next, "portal run loops back on itself");
            return RunAbsorption {
                members: Vec::new(),
                outer_vert: side,
                cycled: true,
            };
        }
        members.push(next);
        next_vert = usize::from(same_point(&dims[next].points[0], &point));
        outer_vert = next_vert;
        current = next;
    }

    RunAbsorption {
        members,
        outer_vert,
        cycled: false,
    }
}

/// Deactivates the longest non-portal member so the run is dimensioned by
/// its remainder; every other member stays active as an opening callout.
fn drop_longest_opening(dims: &mut [Dimension], runs: &[RunAbsorption; 2]) {
    let mut longest: Option<usize> = None;
    let mut longest_length = 0.0;
    for run in runs {
        for &member in &run.members {
            if !dims[member].portal && dims[member].length > longest_length {
                longest_length = dims[member].length;
                longest = Some(member);
            }
        }
    }
    for run in runs {
        for &member in &run.members {
            dims[member].active = longest != Some(member);
        }
    }
}

fn relink(dims: &mut [Dimension], neighbour: usize, from: usize, to: usize) {
    for endpoint in 0..2 {
        for connection in &mut dims[neighbour].connections[endpoint] {
            if *connection == from {
                *connection = to;
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point2;

    fn record(start: (f64, f64), end: (f64, f64), source: i32) -> Dimension {
        let mut dim = Dimension::new(Point2::new(start.0, start.1), Point2::new(end.0, end.1));
        dim.source = Some(ObjectId(source));
        dim
    }

    /// Wall, door, wall in a straight line, with a foreign wall beyond.
    fn door_between_walls() -> Vec<Dimension> {
        let mut outer = record((-5.0, 0.0), (0.0, 0.0), 11);
        let mut wall_a = record((0.0, 0.0), (4.0, 0.0), 10);
        let mut door = record((4.0, 0.0), (6.0, 0.0), 20);
        let mut wall_b = record((6.0, 0.0), (10.0, 0.0), 10);
        door.portal = true;

        outer.connections[1] = vec![1];
        wall_a.connections[0] = vec![0];
        wall_a.connections[1] = vec![2];
        door.connections[0] = vec![1];
        door.connections[1] = vec![3];
        wall_b.connections[0] = vec![2];

        vec![outer, wall_a, door, wall_b]
    }

    #[test]
    fn door_run_collapses_to_span() {
        let mut dims = door_between_walls();
        let mut framing = vec![0, 1, 2, 3];

        merge_portal_runs(&mut dims, &mut framing);

        // One replacement span across the whole run.
        assert_eq!(dims.len(), 5);
        let span = &dims[4];
        assert_eq!(span.points[0], Point2::new(0.0, 0.0));
        assert_eq!(span.points[1], Point2::new(10.0, 0.0));
        assert_eq!(span.kind, DimensionKind::Framing);
        assert_eq!(span.state, DimensionState::Live);
        assert_eq!(span.connections[0], vec![0]);
        assert!(span.connections[1].is_empty());

        // The foreign wall now connects to the span.
        assert_eq!(dims[0].connections[1], vec![4]);

        // Run members are demoted to openings; the walk stops at the
        // foreign wall.
        assert_eq!(framing, vec![0, 4]);
        for member in [1, 2, 3] {
            assert_eq!(dims[member].kind, DimensionKind::Opening);
            assert_eq!(dims[member].state, DimensionState::Consumed);
        }
        assert_eq!(dims[0].kind, DimensionKind::Framing);

        // Both flanking walls are equally long: the first found is dropped
        // and the other stays as the opening callout.
        assert!(!dims[1].active);
        assert!(dims[3].active);
        assert!(dims[2].active);
    }

    #[test]
    fn boxed_in_portal_is_left_alone() {
        let mut dims = door_between_walls();
        // Give the door a second neighbour at each end.
        dims[2].connections[0].push(3);
        dims[2].connections[1].push(1);
        let mut framing = vec![0, 1, 2, 3];

        merge_portal_runs(&mut dims, &mut framing);

        assert_eq!(dims.len(), 4);
        assert_eq!(framing, vec![0, 1, 2, 3]);
        assert_eq!(dims[2].state, DimensionState::Live);
        assert!(!dims[2].active);
    }

    #[test]
    fn dead_end_portal_spans_from_its_own_endpoint() {
        let mut wall = record((0.0, 0.0), (4.0, 0.0), 10);
        let mut door = record((4.0, 0.0), (6.0, 0.0), 20);
        door.portal = true;
        wall.connections[1] = vec![1];
        door.connections[0] = vec![0];
        let mut dims = vec![wall, door];
        let mut framing = vec![0, 1];

        merge_portal_runs(&mut dims, &mut framing);

        assert_eq!(dims.len(), 3);
        let span = &dims[2];
        assert_eq!(span.points[0], Point2::new(0.0, 0.0));
        assert_eq!(span.points[1], Point2::new(6.0, 0.0));
        assert_eq!(framing, vec![2]);

        // The wall is the longest member and loses its callout.
        assert!(!dims[0].active);
        assert!(dims[1].active);
        assert_eq!(dims[1].kind, DimensionKind::Opening);
    }
}
