//! Floor-plan dimensioning demo.
//!
//! Builds the cut graph of a small house (two rooms joined by a door in
//! the shared wall) and a detached garage with a chamfered corner, then
//! derives the dimension set and prints every record that would land on
//! the drawing sheet.
//!
//! ```text
//! +--------+--------+          +-----\
//! |        |        |          |      \
//! |       door      |          |       |
//! |        |        |          |       |
//! +--------+--------+          +-------+
//! house, shared wall at x=500  garage, chamfer at (1400,180)
//! ```
//!
//! Usage:
//! ```text
//! cargo run --example floorplan
//! ```

use autodim::derive::DeriveDimensions;
use autodim::dimension::DimensionKind;
use autodim::graph::CutGraph;
use autodim::host::{ChildKind, HostCatalog, HostObject, ObjectId};
use autodim::math::Point2;
use autodim::AutodimError;

fn main() -> Result<(), AutodimError> {
    // Default: WARN for everything, INFO for autodim.
    // Override with RUST_LOG env var (e.g. RUST_LOG=autodim=debug).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("floorplan=info".parse().unwrap_or_default())
        .add_directive("autodim=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let (graph, hosts) = floor_plan()?;
    let set = DeriveDimensions::new(&graph, &hosts).execute()?;

    println!(
        "{} records, {} active, {} angular callouts",
        set.dimensions.len(),
        set.active().count(),
        set.angular.len()
    );
    for dim in set.active() {
        let [start, end] = dim.points;
        println!(
            "  {:9} {:7.1} cm  ({:6.1}, {:6.1}) -> ({:6.1}, {:6.1})  text at ({:6.1}, {:6.1})",
            kind_name(dim.kind),
            dim.length,
            start.x,
            start.y,
            end.x,
            end.y,
            dim.text_position.x,
            dim.text_position.y,
        );
    }
    for angular in &set.angular {
        println!(
            "  corner at ({:6.1}, {:6.1})  arms ({:6.1}, {:6.1}) / ({:6.1}, {:6.1})",
            angular.center.x,
            angular.center.y,
            angular.start.x,
            angular.start.y,
            angular.end.x,
            angular.end.y,
        );
    }
    Ok(())
}

/// Two rooms separated by a doored wall, plus a detached garage whose
/// far corner is chamfered at 45 degrees. Coordinates in centimetres.
fn floor_plan() -> Result<(CutGraph, HostCatalog), AutodimError> {
    let mut graph = CutGraph::new();

    // House outline, anticlockwise from the origin. The bottom and top
    // walls are split where the shared wall meets them.
    let a = graph.add_vertex(Point2::new(0.0, 0.0));
    let b = graph.add_vertex(Point2::new(500.0, 0.0));
    let c = graph.add_vertex(Point2::new(900.0, 0.0));
    let d = graph.add_vertex(Point2::new(900.0, 400.0));
    let e = graph.add_vertex(Point2::new(500.0, 400.0));
    let f = graph.add_vertex(Point2::new(0.0, 400.0));
    graph.add_edge(a, b, ObjectId(1))?;
    graph.add_edge(b, c, ObjectId(1))?;
    graph.add_edge(c, d, ObjectId(2))?;
    graph.add_edge(d, e, ObjectId(3))?;
    graph.add_edge(e, f, ObjectId(3))?;
    graph.add_edge(f, a, ObjectId(4))?;

    // Shared wall carrying a 90cm door between the rooms.
    let sill = graph.add_vertex(Point2::new(500.0, 150.0));
    let head = graph.add_vertex(Point2::new(500.0, 240.0));
    graph.add_edge(b, sill, ObjectId(5))?;
    graph.add_edge(sill, head, ObjectId(6))?;
    graph.add_edge(head, e, ObjectId(5))?;

    // Detached garage, its top-right corner cut at 45 degrees.
    let g1 = graph.add_vertex(Point2::new(1100.0, 0.0));
    let g2 = graph.add_vertex(Point2::new(1400.0, 0.0));
    let g3 = graph.add_vertex(Point2::new(1400.0, 180.0));
    let g4 = graph.add_vertex(Point2::new(1330.0, 250.0));
    let g5 = graph.add_vertex(Point2::new(1100.0, 250.0));
    graph.add_edge(g1, g2, ObjectId(7))?;
    graph.add_edge(g2, g3, ObjectId(7))?;
    graph.add_edge(g3, g4, ObjectId(7))?;
    graph.add_edge(g4, g5, ObjectId(7))?;
    graph.add_edge(g5, g1, ObjectId(7))?;

    let mut hosts = HostCatalog::new();
    for wall in [1, 2, 3, 4, 5, 7] {
        hosts.insert(ObjectId(wall), HostObject::new(vec![ChildKind::Wall]));
    }
    hosts.insert(ObjectId(6), HostObject::new(vec![ChildKind::Door]));
    Ok((graph, hosts))
}

fn kind_name(kind: DimensionKind) -> &'static str {
    match kind {
        DimensionKind::Opening => "opening",
        DimensionKind::Framing => "framing",
        DimensionKind::Massing => "massing",
        DimensionKind::Bridging => "bridging",
        DimensionKind::Reference => "reference",
    }
}
