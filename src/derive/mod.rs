//! Derivation of dimension records from a cut-plane graph.
//!
//! The pipeline classifies every section edge into a dimension record,
//! groups records into connected islands, collapses portal runs into
//! opening spans, walks each island's outer perimeter, activates the
//! interior framing dimensions needed to pin every endpoint, merges
//! collinear perimeter runs into massing dimensions, bridges disjoint
//! islands, and finally places dimension text.

mod angular;
mod assemble;
mod bridge;
mod classify;
mod islands;
mod massing;
mod openings;
mod perimeter;
mod propagate;

use slotmap::SecondaryMap;
use tracing::debug;

use crate::dimension::{AngularDimension, Dimension, DimensionOptions, DimensionSet};
use crate::error::Result;
use crate::graph::{CutGraph, EdgeId};
use crate::host::HostCatalog;

/// Derives the dimension set for one cut plane.
pub struct DeriveDimensions<'a> {
    graph: &'a CutGraph,
    hosts: &'a HostCatalog,
    options: DimensionOptions,
}

impl<'a> DeriveDimensions<'a> {
    /// Creates a new derivation over a cut graph and its host catalog.
    #[must_use]
    pub fn new(graph: &'a CutGraph, hosts: &'a HostCatalog) -> Self {
        Self {
            graph,
            hosts,
            options: DimensionOptions::default(),
        }
    }

    /// Overrides the default text offsets and arm lengths.
    #[must_use]
    pub fn with_options(mut self, options: DimensionOptions) -> Self {
        self.options = options;
        self
    }

    /// Executes the derivation.
    ///
    /// Malformed islands (for example an island whose records were all
    /// consumed by opening spans) degrade to fewer emitted dimensions and
    /// a `warn` log rather than an error.
    ///
    /// # Errors
    ///
    /// Propagates cut-graph lookup failures; a graph built solely through
    /// [`CutGraph::add_vertex`] and [`CutGraph::add_edge`] never produces
    /// them.
    pub fn execute(self) -> Result<DimensionSet> {
        let mut ctx = Derivation {
            graph: self.graph,
            hosts: self.hosts,
            options: self.options,
            dims: Vec::new(),
            dim_by_edge: SecondaryMap::new(),
            angular: Vec::new(),
        };

        // Step 1: classify section edges into dimension records.
        classify::create_dimensions(&mut ctx)?;

        // Step 2: group records into connected islands.
        let islands = islands::find_islands(&ctx.dims);

        // Step 3: process each island independently.
        for island in &islands {
            process_island(&mut ctx, island)?;
        }

        // Step 4: bridge disjoint islands with their closest links.
        bridge::connect_islands(&mut ctx, &islands)?;

        // Step 5: place dimension text.
        assemble::place_text(&mut ctx.dims, &ctx.options);

        debug!(
            islands = islands.len(),
            dimensions = ctx.dims.len(),
            active = ctx.dims.iter().filter(|d| d.active).count(),
            angular = ctx.angular.len(),
            "derived dimension set"
        );

        Ok(DimensionSet {
            dimensions: ctx.dims,
            angular: ctx.angular,
        })
    }
}

/// Shared state threaded through the pipeline stages.
struct Derivation<'a> {
    graph: &'a CutGraph,
    hosts: &'a HostCatalog,
    options: DimensionOptions,
    dims: Vec<Dimension>,
    /// Primitive record index per cut edge. Synthetic records (opening
    /// spans, massing, bridging) are never entered here.
    dim_by_edge: SecondaryMap<EdgeId, usize>,
    angular: Vec<AngularDimension>,
}

fn process_island(ctx: &mut Derivation<'_>, island: &[usize]) -> Result<()> {
    let mut framing: Vec<usize> = island.to_vec();

    // Step 1: pick the text side of every record relative to the island centre.
    islands::assign_text_sides(&mut ctx.dims, island);

    // Step 2: collapse portal runs into opening spans.
    openings::merge_portal_runs(&mut ctx.dims, &mut framing);

    // Step 3: walk the outer perimeter anticlockwise and pin it. An island
    // without a walkable perimeter is skipped entirely.
    let Some((perimeter, walk_start)) = perimeter::walk_perimeter(&mut ctx.dims, &framing) else {
        return Ok(());
    };

    // Step 4: activate interior framing dimensions that pin floating endpoints.
    let max_depth = propagate::assign_depths(&mut ctx.dims, &framing);
    propagate::activate_by_depth(&mut ctx.dims, &framing, max_depth);

    // Step 5: call out non-square corners.
    angular::add_corner_callouts(ctx, &framing)?;

    // Step 6: merge collinear perimeter runs into massing dimensions.
    massing::merge_perimeter_runs(&mut ctx.dims, &perimeter, walk_start);

    Ok(())
}
