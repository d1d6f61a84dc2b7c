use log::trace;
use rustc_hash::FxHashMap;

use crate::geometry::{Coordinate, LineSegment, MovementType};

/// Sparse overlap counts. Every present key maps to a count of at least 1.
pub type OverlapMap = FxHashMap<Coordinate, u32>;

/// Which segment directions an accumulator rasterizes.
///
/// Horizontal and vertical segments are always included. Diagonals which are
/// not at exactly 45 degrees are never rasterized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DiagonalPolicy {
    /// Drop anything that is not horizontal or vertical...
    pub filter_diagonals: bool,
    /// ...unless it is a 45 degree diagonal and this is set.
    pub include_45_diagonals: bool,
}

impl DiagonalPolicy {
    /// Only horizontal and vertical segments.
    pub const fn orthogonal_only() -> Self {
        Self {
            filter_diagonals: true,
            include_45_diagonals: false,
        }
    }

    /// Horizontal, vertical, and 45 degree diagonal segments.
    pub const fn with_45_diagonals() -> Self {
        Self {
            filter_diagonals: true,
            include_45_diagonals: true,
        }
    }

    /// No diagonal filtering.
    pub const fn unfiltered() -> Self {
        Self {
            filter_diagonals: false,
            include_45_diagonals: false,
        }
    }

    pub fn includes(self, movement: MovementType) -> bool {
        match movement {
            MovementType::Horizontal | MovementType::Vertical => true,
            MovementType::Diagonal45 => !self.filter_diagonals || self.include_45_diagonals,
            MovementType::OtherDiagonal => false,
        }
    }
}

/// Counts how many line segments cover each grid point.
#[derive(Debug, Clone, Default)]
pub struct LineGridAccumulator {
    policy: DiagonalPolicy,
    overlaps: OverlapMap,
}

impl LineGridAccumulator {
    pub fn new(policy: DiagonalPolicy) -> Self {
        Self {
            policy,
            overlaps: OverlapMap::default(),
        }
    }

    pub fn policy(&self) -> DiagonalPolicy {
        self.policy
    }

    /// Rasterize `segment` onto the grid, incrementing every point it covers.
    ///
    /// Segments whose direction the policy excludes are silently skipped.
    pub fn add_segment(&mut self, segment: LineSegment) {
        let movement = segment.movement();
        if !self.policy.includes(movement) {
            trace!("skipping {movement:?} segment {segment:?}");
            return;
        }
        // `includes` never admits `OtherDiagonal`, so this is always `Some`
        let Some(points) = segment.points() else {
            return;
        };
        for point in points {
            *self.overlaps.entry(point).or_insert(0) += 1;
        }
    }

    /// The number of points covered by at least `threshold` segments.
    pub fn count_at_or_above(&self, threshold: u32) -> usize {
        self.overlaps
            .values()
            .filter(|&&count| count >= threshold)
            .count()
    }

    /// How many segments cover `point`; 0 if it was never visited.
    pub fn get(&self, point: Coordinate) -> u32 {
        self.overlaps.get(&point).copied().unwrap_or_default()
    }

    pub fn overlaps(&self) -> &OverlapMap {
        &self.overlaps
    }

    /// The number of distinct points visited.
    pub fn len(&self) -> usize {
        self.overlaps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overlaps.is_empty()
    }

    /// The highest overlap count observed, or 0 when empty.
    pub fn max_overlap(&self) -> u32 {
        self.overlaps.values().copied().max().unwrap_or_default()
    }
}

impl Extend<LineSegment> for LineGridAccumulator {
    fn extend<T: IntoIterator<Item = LineSegment>>(&mut self, iter: T) {
        for segment in iter {
            self.add_segment(segment);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn accumulate(policy: DiagonalPolicy, segments: &[LineSegment]) -> LineGridAccumulator {
        let mut accumulator = LineGridAccumulator::new(policy);
        accumulator.extend(segments.iter().copied());
        accumulator
    }

    #[rstest]
    #[case(DiagonalPolicy::unfiltered(), MovementType::Horizontal, true)]
    #[case(DiagonalPolicy::unfiltered(), MovementType::Diagonal45, true)]
    #[case(DiagonalPolicy { filter_diagonals: false, include_45_diagonals: true }, MovementType::Diagonal45, true)]
    #[case(DiagonalPolicy::orthogonal_only(), MovementType::Vertical, true)]
    #[case(DiagonalPolicy::orthogonal_only(), MovementType::Diagonal45, false)]
    #[case(DiagonalPolicy::orthogonal_only(), MovementType::OtherDiagonal, false)]
    #[case(DiagonalPolicy::with_45_diagonals(), MovementType::Horizontal, true)]
    #[case(DiagonalPolicy::with_45_diagonals(), MovementType::Diagonal45, true)]
    #[case(DiagonalPolicy::with_45_diagonals(), MovementType::OtherDiagonal, false)]
    fn inclusion_table(
        #[case] policy: DiagonalPolicy,
        #[case] movement: MovementType,
        #[case] expect: bool,
    ) {
        assert_eq!(policy.includes(movement), expect);
    }

    #[test]
    fn overlapping_horizontals() {
        let accumulator = accumulate(
            DiagonalPolicy::unfiltered(),
            &[
                LineSegment::new((0, 9), (5, 9)),
                LineSegment::new((0, 9), (2, 9)),
            ],
        );
        assert_eq!(accumulator.count_at_or_above(2), 3);
        for x in 0..=2 {
            assert_eq!(accumulator.get(Coordinate::new(x, 9)), 2);
        }
    }

    #[rstest]
    #[case(DiagonalPolicy::orthogonal_only(), 0)]
    #[case(DiagonalPolicy::with_45_diagonals(), 3)]
    #[case(DiagonalPolicy::unfiltered(), 3)]
    fn diagonal_filtering(#[case] policy: DiagonalPolicy, #[case] expect: usize) {
        let accumulator = accumulate(policy, &[LineSegment::new((1, 1), (3, 3))]);
        assert_eq!(accumulator.count_at_or_above(1), expect);
    }

    #[rstest]
    #[case(DiagonalPolicy::with_45_diagonals())]
    #[case(DiagonalPolicy::unfiltered())]
    fn other_diagonals_are_skipped(#[case] policy: DiagonalPolicy) {
        let accumulator = accumulate(policy, &[LineSegment::new((5, 5), (8, 4))]);
        assert!(accumulator.is_empty());
        assert_eq!(accumulator.count_at_or_above(1), 0);
    }

    #[rstest]
    #[case(DiagonalPolicy::orthogonal_only(), (-2_000_000_000, 0), (2_000_000_000, 1))]
    #[case(DiagonalPolicy::with_45_diagonals(), (-2_000_000_000, 0), (2_000_000_000, 1))]
    #[case(DiagonalPolicy::unfiltered(), (-2_000_000_000, 0), (2_000_000_000, 1))]
    #[case(DiagonalPolicy::with_45_diagonals(), (-2_000_000_000, 0), (2_000_000_000, 294_967_296))]
    #[case(DiagonalPolicy::unfiltered(), (-2_000_000_000, 0), (2_000_000_000, 294_967_296))]
    #[case(DiagonalPolicy::orthogonal_only(), (i32::MIN, i32::MIN), (i32::MAX, i32::MAX))]
    fn extreme_excluded_segments_are_skipped(
        #[case] policy: DiagonalPolicy,
        #[case] start: (i32, i32),
        #[case] end: (i32, i32),
    ) {
        let accumulator = accumulate(policy, &[LineSegment::new(start, end)]);
        assert!(accumulator.is_empty());
    }

    #[rstest]
    #[case(DiagonalPolicy::orthogonal_only(), (i32::MAX, i32::MIN), (i32::MAX - 2, i32::MIN), 3)]
    #[case(DiagonalPolicy::orthogonal_only(), (i32::MIN, i32::MAX - 1), (i32::MIN, i32::MAX), 2)]
    #[case(DiagonalPolicy::orthogonal_only(), (i32::MIN + 2, i32::MAX - 2), (i32::MIN, i32::MAX), 0)]
    #[case(DiagonalPolicy::with_45_diagonals(), (i32::MIN + 2, i32::MAX - 2), (i32::MIN, i32::MAX), 3)]
    #[case(DiagonalPolicy::unfiltered(), (i32::MAX - 1, i32::MIN + 1), (i32::MAX, i32::MIN), 2)]
    fn segments_at_the_grid_edge(
        #[case] policy: DiagonalPolicy,
        #[case] start: (i32, i32),
        #[case] end: (i32, i32),
        #[case] expect: usize,
    ) {
        let accumulator = accumulate(policy, &[LineSegment::new(start, end)]);
        assert_eq!(accumulator.count_at_or_above(1), expect);
        if expect > 0 {
            assert_eq!(accumulator.get(Coordinate::from(end)), 1);
        }
    }

    #[test]
    fn degenerate_segment_increments_one_point() {
        let mut accumulator = LineGridAccumulator::default();
        accumulator.add_segment(LineSegment::new((3, 3), (1, 3)));
        let before = accumulator.overlaps().clone();
        accumulator.add_segment(LineSegment::new((2, 3), (2, 3)));

        let changed: Vec<_> = accumulator
            .overlaps()
            .iter()
            .filter(|(point, count)| before.get(*point) != Some(*count))
            .collect();
        assert_eq!(changed, vec![(&Coordinate::new(2, 3), &2)]);
        assert_eq!(accumulator.len(), before.len());
    }

    #[test]
    fn thresholds_are_monotonic() {
        let accumulator = accumulate(
            DiagonalPolicy::unfiltered(),
            &[
                LineSegment::new((0, 0), (4, 0)),
                LineSegment::new((2, 0), (2, 4)),
                LineSegment::new((0, 2), (4, 2)),
                LineSegment::new((0, 0), (4, 4)),
            ],
        );
        assert_eq!(accumulator.max_overlap(), 3);
        assert_eq!(accumulator.count_at_or_above(0), accumulator.len());
        assert_eq!(accumulator.count_at_or_above(1), accumulator.len());
        let counts: Vec<_> = (0..=5).map(|t| accumulator.count_at_or_above(t)).collect();
        assert!(counts.windows(2).all(|pair| pair[0] >= pair[1]));
        assert_eq!(accumulator.count_at_or_above(4), 0);
    }

    #[test]
    fn order_does_not_matter() {
        let segments = [
            LineSegment::new((0, 9), (5, 9)),
            LineSegment::new((8, 0), (0, 8)),
            LineSegment::new((9, 4), (3, 4)),
            LineSegment::new((2, 2), (2, 1)),
            LineSegment::new((6, 4), (2, 0)),
        ];
        let forward = accumulate(DiagonalPolicy::unfiltered(), &segments);
        let mut reversed = segments;
        reversed.reverse();
        let backward = accumulate(DiagonalPolicy::unfiltered(), &reversed);
        assert_eq!(forward.overlaps(), backward.overlaps());
    }
}
