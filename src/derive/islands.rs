use crate::dimension::{Dimension, TextSide};
use crate::math::{midpoint, Point2};

/// Partitions records into connected islands.
///
/// Uses an explicit stack instead of recursion so pathological graphs
/// cannot exhaust the call stack. Neighbours are pushed in reverse so
/// members come out in depth-first preorder, which keeps all downstream
/// list-order-sensitive passes deterministic.
pub fn find_islands(dims: &[Dimension]) -> Vec<Vec<usize>> {
    let mut assigned = vec![false; dims.len()];
    let mut islands = Vec::new();

    for seed in 0..dims.len() {
        if assigned[seed] {
            continue;
        }
        let mut members = Vec::new();
        let mut stack = vec![seed];
        while let Some(d) = stack.pop() {
            if assigned[d] {
                continue;
            }
            assigned[d] = true;
            members.push(d);
            for endpoint in [1, 0] {
                for &n in dims[d].connections[endpoint].iter().rev() {
                    if !assigned[n] {
                        stack.push(n);
                    }
                }
            }
        }
        islands.push(members);
    }

    islands
}

/// Picks each record's text side from its orientation relative to the
/// island's bounding-box centre.
pub fn assign_text_sides(dims: &mut [Dimension], island: &[usize]) {
    let mut low = Point2::new(f64::INFINITY, f64::INFINITY);
    let mut high = Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
    for &d in island {
        for point in &dims[d].points {
            low.x = low.x.min(point.x);
            low.y = low.y.min(point.y);
            high.x = high.x.max(point.x);
            high.y = high.y.max(point.y);
        }
    }
    let centre = midpoint(&low, &high);

    for &d in island {
        let to_centre = centre - dims[d].points[0];
        dims[d].side = if dims[d].dir.perp(&to_centre) > 0.0 {
            TextSide::Left
        } else {
            TextSide::Right
        };
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn chain(points: &[(f64, f64)]) -> Vec<Dimension> {
        let mut dims: Vec<Dimension> = points
            .windows(2)
            .map(|pair| {
                Dimension::new(
                    Point2::new(pair[0].0, pair[0].1),
                    Point2::new(pair[1].0, pair[1].1),
                )
            })
            .collect();
        for i in 0..dims.len() {
            if i > 0 {
                dims[i].connections[0].push(i - 1);
            }
            if i + 1 < dims.len() {
                dims[i].connections[1].push(i + 1);
            }
        }
        dims
    }

    #[test]
    fn disjoint_chains_form_separate_islands() {
        let mut dims = chain(&[(0.0, 0.0), (5.0, 0.0), (10.0, 0.0)]);
        let far = chain(&[(100.0, 0.0), (105.0, 0.0)]);
        let offset = dims.len();
        for mut dim in far {
            for endpoint in 0..2 {
                for n in &mut dim.connections[endpoint] {
                    *n += offset;
                }
            }
            dims.push(dim);
        }

        let islands = find_islands(&dims);
        assert_eq!(islands.len(), 2);
        assert_eq!(islands[0], vec![0, 1]);
        assert_eq!(islands[1], vec![2]);
    }

    #[test]
    fn island_members_in_preorder() {
        // A fork: record 0 connects to 1 and 2 at its end.
        let mut dims = vec![
            Dimension::new(Point2::new(0.0, 0.0), Point2::new(10.0, 0.0)),
            Dimension::new(Point2::new(10.0, 0.0), Point2::new(20.0, 0.0)),
            Dimension::new(Point2::new(10.0, 0.0), Point2::new(10.0, 10.0)),
        ];
        dims[0].connections[1] = vec![1, 2];
        dims[1].connections[0] = vec![0, 2];
        dims[2].connections[0] = vec![0, 1];

        let islands = find_islands(&dims);
        assert_eq!(islands, vec![vec![0, 1, 2]]);
    }

    #[test]
    fn text_sides_follow_island_centre() {
        // Square built anticlockwise from the origin.
        let mut dims = chain(&[
            (0.0, 0.0),
            (10.0, 0.0),
            (10.0, 10.0),
            (0.0, 10.0),
            (0.0, 0.0),
        ]);
        let island: Vec<usize> = (0..dims.len()).collect();
        assign_text_sides(&mut dims, &island);

        // Centre sits to the left of every anticlockwise edge.
        for dim in &dims {
            assert_eq!(dim.side, TextSide::Left);
        }
    }
}
