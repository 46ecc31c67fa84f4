use crate::dimension::{Dimension, DimensionKind, TextSide};
use crate::math::{are_parallel, same_point, Point2, MIN_EDGE_LENGTH};

/// Collapses each collinear run of perimeter records into one overall
/// massing dimension.
///
/// Walk order and start point come from the perimeter walk, so runs are
/// contiguous slices of `perimeter`. The massing record sits on the
/// right-hand side of the walk, outside the island. A run of a single
/// record is fully replaced by its massing copy; longer runs keep their
/// framing records alongside the total.
pub fn merge_perimeter_runs(dims: &mut Vec<Dimension>, perimeter: &[usize], walk_start: Point2) {
    let mut start_point = walk_start;
    let mut start = 0;
    while start < perimeter.len() {
        let first = perimeter[start];
        let run_dir = dims[first].dir;
        let mut next_point = far_end(&dims[first], &start_point);
        let mut end = start + 1;
        while end < perimeter.len() && are_parallel(&run_dir, &dims[perimeter[end]].dir) {
            next_point = far_end(&dims[perimeter[end]], &next_point);
            end += 1;
        }

        let mut massing = Dimension::new(start_point, next_point);
        massing.kind = DimensionKind::Massing;
        massing.active = true;
        massing.side = TextSide::Right;
        // An out-and-back run nets a zero span and is not worth a record.
        if massing.length > MIN_EDGE_LENGTH {
            dims.push(massing);
        }

        if end - start == 1 {
            // The massing copy already measures a single-record run.
            dims[first].active = false;
        }

        start = end;
        start_point = next_point;
    }
}

fn far_end(dim: &Dimension, point: &Point2) -> Point2 {
    if same_point(&dim.points[0], point) {
        dim.points[1]
    } else {
        dim.points[0]
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use slotmap::SecondaryMap;

    use super::*;
    use crate::derive::{classify, perimeter, Derivation};
    use crate::dimension::DimensionOptions;
    use crate::graph::CutGraph;
    use crate::host::{HostCatalog, ObjectId};
    use crate::math::Point2;

    fn classified(graph: &CutGraph) -> Vec<Dimension> {
        let hosts = HostCatalog::new();
        let mut ctx = Derivation {
            graph,
            hosts: &hosts,
            options: DimensionOptions::default(),
            dims: Vec::new(),
            dim_by_edge: SecondaryMap::new(),
            angular: Vec::new(),
        };
        classify::create_dimensions(&mut ctx).unwrap();
        ctx.dims
    }

    #[test]
    fn square_sides_become_massing_records() {
        let mut graph = CutGraph::new();
        let a = graph.add_vertex(Point2::new(0.0, 0.0));
        let b = graph.add_vertex(Point2::new(10.0, 0.0));
        let c = graph.add_vertex(Point2::new(10.0, 10.0));
        let d = graph.add_vertex(Point2::new(0.0, 10.0));
        for (from, to) in [(a, b), (b, c), (c, d), (d, a)] {
            graph.add_edge(from, to, ObjectId(1)).unwrap();
        }
        let mut dims = classified(&graph);
        let framing = vec![0, 1, 2, 3];
        let (walk, start) = perimeter::walk_perimeter(&mut dims, &framing).unwrap();

        merge_perimeter_runs(&mut dims, &walk, start);

        assert_eq!(dims.len(), 8);
        for massing in &dims[4..] {
            assert_eq!(massing.kind, DimensionKind::Massing);
            assert!(massing.active);
            assert_eq!(massing.side, TextSide::Right);
            assert!((massing.length - 10.0).abs() < 1e-9);
        }
        // Each side is a single-record run, replaced by its massing copy.
        for side in &dims[..4] {
            assert!(!side.active);
        }
    }

    #[test]
    fn split_side_merges_into_one_run() {
        let mut graph = CutGraph::new();
        let a = graph.add_vertex(Point2::new(0.0, 0.0));
        let b = graph.add_vertex(Point2::new(4.0, 0.0));
        let c = graph.add_vertex(Point2::new(10.0, 0.0));
        let d = graph.add_vertex(Point2::new(10.0, 6.0));
        let e = graph.add_vertex(Point2::new(0.0, 6.0));
        for (from, to) in [(a, b), (b, c), (c, d), (d, e), (e, a)] {
            graph.add_edge(from, to, ObjectId(1)).unwrap();
        }
        let mut dims = classified(&graph);
        let framing = vec![0, 1, 2, 3, 4];
        let (walk, start) = perimeter::walk_perimeter(&mut dims, &framing).unwrap();
        assert_eq!(walk, vec![0, 1, 2, 3, 4]);

        merge_perimeter_runs(&mut dims, &walk, start);

        let massing: Vec<&Dimension> = dims
            .iter()
            .filter(|dim| dim.kind == DimensionKind::Massing)
            .collect();
        assert_eq!(massing.len(), 4);
        assert!((massing[0].length - 10.0).abs() < 1e-9);
        // The split halves survive next to their merged total.
        assert!(dims[0].active);
        assert!(dims[1].active);
        // Single-record runs are replaced outright.
        assert!(!dims[2].active);
        assert!(!dims[3].active);
        assert!(!dims[4].active);
    }

    #[test]
    fn out_and_back_run_produces_no_massing() {
        let mut graph = CutGraph::new();
        let a = graph.add_vertex(Point2::new(0.0, 0.0));
        let b = graph.add_vertex(Point2::new(10.0, 0.0));
        graph.add_edge(a, b, ObjectId(1)).unwrap();
        graph.add_edge(b, a, ObjectId(1)).unwrap();

        let mut dims = classified(&graph);
        let (walk, start) = perimeter::walk_perimeter(&mut dims, &[0, 1]).unwrap();
        assert_eq!(walk.len(), 2);

        merge_perimeter_runs(&mut dims, &walk, start);

        // The doubled edge cancels itself out.
        assert_eq!(dims.len(), 2);
    }
}
