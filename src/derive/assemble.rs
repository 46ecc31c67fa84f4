use crate::dimension::{Dimension, DimensionKind, DimensionOptions, TextSide};
use crate::math::{left_normal, midpoint, MIN_EDGE_LENGTH};

/// Fills in the text anchor of every renderable record.
///
/// Text sits at the span midpoint, pushed perpendicular to the span
/// towards the record's text side by the offset for its kind. Reference
/// records carry their text on the line itself. Inactive and degenerate
/// records are left untouched.
pub fn place_text(dims: &mut [Dimension], options: &DimensionOptions) {
    for dim in dims.iter_mut() {
        if !dim.active || dim.length <= MIN_EDGE_LENGTH {
            continue;
        }
        let mid = midpoint(&dim.points[0], &dim.points[1]);
        if dim.kind == DimensionKind::Reference {
            dim.text_position = mid;
            continue;
        }
        let mut offset = left_normal(&dim.dir) * options.offset_for(dim.kind);
        if dim.side == TextSide::Right {
            offset = -offset;
        }
        dim.text_position = mid + offset;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::math::Point2;

    fn horizontal_span() -> Dimension {
        Dimension::new(Point2::new(0.0, 0.0), Point2::new(10.0, 0.0))
    }

    #[test]
    fn text_lands_on_the_record_side() {
        let mut left = horizontal_span();
        left.active = true;
        let mut right = horizontal_span();
        right.active = true;
        right.side = TextSide::Right;
        let mut dims = vec![left, right];

        place_text(&mut dims, &DimensionOptions::default());

        assert_relative_eq!(dims[0].text_position.x, 5.0, epsilon = 1e-9);
        assert_relative_eq!(dims[0].text_position.y, 76.0, epsilon = 1e-9);
        assert_relative_eq!(dims[1].text_position.y, -76.0, epsilon = 1e-9);
    }

    #[test]
    fn offsets_follow_the_dimension_kind() {
        let mut massing = horizontal_span();
        massing.active = true;
        massing.kind = DimensionKind::Massing;
        let mut opening = horizontal_span();
        opening.active = true;
        opening.kind = DimensionKind::Opening;
        let mut dims = vec![massing, opening];

        place_text(&mut dims, &DimensionOptions::default());

        assert_relative_eq!(dims[0].text_position.y, 96.0, epsilon = 1e-9);
        assert_relative_eq!(dims[1].text_position.y, 56.0, epsilon = 1e-9);
    }

    #[test]
    fn reference_text_stays_on_the_line() {
        let mut reference = horizontal_span();
        reference.active = true;
        reference.kind = DimensionKind::Reference;
        let mut dims = vec![reference];

        place_text(&mut dims, &DimensionOptions::default());

        assert_relative_eq!(dims[0].text_position.x, 5.0, epsilon = 1e-9);
        assert_relative_eq!(dims[0].text_position.y, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn inactive_and_degenerate_records_keep_their_default_anchor() {
        let inactive = horizontal_span();
        let mut collapsed = Dimension::new(Point2::new(3.0, 3.0), Point2::new(3.0, 3.0));
        collapsed.active = true;
        let mut dims = vec![inactive, collapsed];

        place_text(&mut dims, &DimensionOptions::default());

        assert_eq!(dims[0].text_position, Point2::origin());
        assert_eq!(dims[1].text_position, Point2::origin());
    }
}
