//! Dimension records and the derived output set.
//!
//! A [`Dimension`] starts life as a classified cut edge and is then
//! reshaped by the pipeline stages: portal runs collapse into opening
//! spans, the perimeter walk pins statuses, and the massing pass adds
//! merged outer runs. The record keeps everything those stages need in
//! one place rather than spreading state over side tables.

use crate::graph::EdgeId;
use crate::host::ObjectId;
use crate::math::{are_parallel, Point2, Vector2, MIN_EDGE_LENGTH};

/// Default text offset for opening dimensions, in world units (cm).
const OPENING_OFFSET: f64 = 56.0;
/// Default text offset for framing dimensions, in world units (cm).
const FRAMING_OFFSET: f64 = 76.0;
/// Default text offset for massing dimensions, in world units (cm).
const MASSING_OFFSET: f64 = 96.0;
/// Default text offset for bridging dimensions, in world units (cm).
const BRIDGING_OFFSET: f64 = 30.0;
/// Default arm length for angular callout legs, in world units (cm).
const ANGULAR_ARM: f64 = 20.0;

/// How a dimension is rendered and which text offset it gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DimensionKind {
    /// Width of a door, window or panel run within its host.
    Opening,
    /// Edge-level dimension used for framing callouts.
    Framing,
    /// Merged run along the outer perimeter.
    Massing,
    /// Closest link between two disjoint islands.
    Bridging,
    /// Anchor leg for angular callouts at a bridge endpoint.
    Reference,
}

/// Which side of the span the dimension text sits on, relative to its
/// direction vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TextSide {
    Left,
    Right,
}

/// Whether a record still takes part in the framing connectivity.
///
/// Records absorbed into a merged opening span are kept for output (an
/// active consumed record still emits as an opening dimension) but no
/// longer belong to the framing graph that the perimeter walk, status
/// propagation and massing passes operate on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DimensionState {
    Live,
    Consumed,
}

/// Per-endpoint constraint status, one flag per axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FixedAxes {
    pub x: bool,
    pub y: bool,
}

impl FixedAxes {
    /// Merges another status into this one.
    pub fn merge(&mut self, other: FixedAxes) {
        self.x |= other.x;
        self.y |= other.y;
    }
}

/// A single linear dimension record.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dimension {
    /// Span endpoints in cut-plane coordinates.
    pub points: [Point2; 2],
    /// Unit direction from the first endpoint to the second, or zero for
    /// a degenerate span.
    pub dir: Vector2,
    /// Span length.
    pub length: f64,
    /// Whether the span is parallel to the X axis (within ~1 degree).
    pub horizontal: bool,
    /// Whether the span is parallel to the Y axis (within ~1 degree).
    pub vertical: bool,
    /// Whether the source object hosts a portal.
    pub portal: bool,
    pub kind: DimensionKind,
    /// Only active records emit text.
    pub active: bool,
    pub side: TextSide,
    /// Final text anchor, filled in during output assembly.
    pub text_position: Point2,
    /// Hops from the perimeter, filled in by the depth pass.
    pub depth: u32,
    /// Scene object behind this record, if it came from a single cut edge.
    pub source: Option<ObjectId>,
    /// Cut edge backing each endpoint, used for angular callouts.
    pub graph_edges: [Option<EdgeId>; 2],
    /// Constraint status of the first endpoint.
    pub start_fixed: FixedAxes,
    /// Constraint status of the second endpoint.
    pub end_fixed: FixedAxes,
    /// Indices of records sharing each endpoint.
    pub connections: [Vec<usize>; 2],
    pub state: DimensionState,
}

impl Dimension {
    /// Depth value of records never reached by the depth pass.
    pub const UNREACHED: u32 = u32::MAX;

    /// Creates a record spanning the two points.
    ///
    /// Direction, length and the axis flags are derived from the span.
    /// A span shorter than the degeneracy threshold gets a zero direction
    /// and neither axis flag.
    #[must_use]
    pub fn new(start: Point2, end: Point2) -> Self {
        let delta = end - start;
        let length = delta.norm();
        let dir = if length > MIN_EDGE_LENGTH {
            delta / length
        } else {
            Vector2::zeros()
        };
        let horizontal = length > MIN_EDGE_LENGTH && are_parallel(&dir, &Vector2::x());
        let vertical = length > MIN_EDGE_LENGTH && are_parallel(&dir, &Vector2::y());

        Self {
            points: [start, end],
            dir,
            length,
            horizontal,
            vertical,
            portal: false,
            kind: DimensionKind::Framing,
            active: false,
            side: TextSide::Left,
            text_position: Point2::origin(),
            depth: Self::UNREACHED,
            source: None,
            graph_edges: [None, None],
            start_fixed: FixedAxes::default(),
            end_fixed: FixedAxes::default(),
            connections: [Vec::new(), Vec::new()],
            state: DimensionState::Live,
        }
    }

    /// Index of the endpoint coinciding with `point`, if either does.
    #[must_use]
    pub fn endpoint_index(&self, point: &Point2) -> Option<usize> {
        if crate::math::same_point(&self.points[0], point) {
            Some(0)
        } else if crate::math::same_point(&self.points[1], point) {
            Some(1)
        } else {
            None
        }
    }

    /// Constraint status of the given endpoint.
    #[must_use]
    pub fn fixed(&self, endpoint: usize) -> FixedAxes {
        if endpoint == 0 {
            self.start_fixed
        } else {
            self.end_fixed
        }
    }

    /// Mutable constraint status of the given endpoint.
    pub fn fixed_mut(&mut self, endpoint: usize) -> &mut FixedAxes {
        if endpoint == 0 {
            &mut self.start_fixed
        } else {
            &mut self.end_fixed
        }
    }
}

/// An angular callout between two spans meeting at a point.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AngularDimension {
    /// Tip of the arm along the first span.
    pub start: Point2,
    /// Tip of the arm along the second span.
    pub end: Point2,
    /// The shared corner point.
    pub center: Point2,
}

/// Text offsets and arm lengths used when assembling output.
///
/// All values are in world units (cm). The defaults match standard
/// architectural drafting distances.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DimensionOptions {
    pub opening_offset: f64,
    pub framing_offset: f64,
    pub massing_offset: f64,
    pub bridging_offset: f64,
    /// Leg length of angular callout arms.
    pub angular_arm: f64,
}

impl Default for DimensionOptions {
    fn default() -> Self {
        Self {
            opening_offset: OPENING_OFFSET,
            framing_offset: FRAMING_OFFSET,
            massing_offset: MASSING_OFFSET,
            bridging_offset: BRIDGING_OFFSET,
            angular_arm: ANGULAR_ARM,
        }
    }
}

impl DimensionOptions {
    /// Text offset for a dimension kind.
    ///
    /// Reference records anchor angular callouts and carry their text on
    /// the span itself, so their offset is zero.
    #[must_use]
    pub fn offset_for(&self, kind: DimensionKind) -> f64 {
        match kind {
            DimensionKind::Opening => self.opening_offset,
            DimensionKind::Framing => self.framing_offset,
            DimensionKind::Massing => self.massing_offset,
            DimensionKind::Bridging => self.bridging_offset,
            DimensionKind::Reference => 0.0,
        }
    }
}

/// Everything the derivation produces for one cut plane.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DimensionSet {
    /// All linear records, active or not, in creation order.
    pub dimensions: Vec<Dimension>,
    /// Angular callouts.
    pub angular: Vec<AngularDimension>,
}

impl DimensionSet {
    /// Iterates over the records that actually emit text.
    ///
    /// Degenerate spans can end up active (a portal run can collapse to a
    /// point); they carry no drawable extent and are filtered here.
    pub fn active(&self) -> impl Iterator<Item = &Dimension> {
        self.dimensions
            .iter()
            .filter(|dim| dim.active && dim.length > MIN_EDGE_LENGTH)
    }
}
