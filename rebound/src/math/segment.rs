//! Line segments and segment/segment intersection.

use crate::math::{sort_two, FreeCoordinate, FreePoint, FreeVector};

/// Tolerance used when classifying segment intersections: cross products
/// whose perpendicular distance is below this count as parallel/collinear,
/// and intersection parameters may exceed the `[0, 1]` range by this much
/// (so that exact endpoint touches are not lost to rounding).
const INTERSECTION_EPSILON: FreeCoordinate = 1e-9;

/// A directed straight line segment between two points.
///
/// Zero-length segments are legal and represent “no movement”.
#[expect(clippy::exhaustive_structs)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineSegment {
    /// Where the segment begins. Queries which select among intersection
    /// points measure distance from here.
    pub start: FreePoint,
    /// Where the segment ends.
    pub end: FreePoint,
}

impl LineSegment {
    /// Constructs a [`LineSegment`] from its two endpoints.
    #[inline]
    pub fn new(start: impl Into<FreePoint>, end: impl Into<FreePoint>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// The vector from `start` to `end`.
    #[inline]
    pub fn displacement(self) -> FreeVector {
        self.end - self.start
    }

    /// Euclidean length of the segment. Zero for degenerate segments.
    #[inline]
    pub fn length(self) -> FreeCoordinate {
        self.displacement().length()
    }

    fn is_degenerate(self) -> bool {
        self.start == self.end
    }

    /// Returns the unique point at which `self` and `other` intersect, or
    /// [`None`] if they do not intersect or the intersection is not a single
    /// point.
    ///
    /// Touching exactly at an endpoint counts as an intersection. Parallel
    /// and collinear overlapping segments have no *unique* intersection
    /// point and produce [`None`] — except collinear segments that share
    /// exactly one boundary point, which touch there and nowhere else.
    pub fn intersection(self, other: LineSegment) -> Option<FreePoint> {
        let d1 = self.displacement();
        let d2 = other.displacement();
        let offset = other.start - self.start;
        let denominator = d1.cross(d2);

        if denominator.abs() <= INTERSECTION_EPSILON * d1.length().max(1.0) * d2.length().max(1.0) {
            return self.parallel_intersection(other);
        }

        let t = offset.cross(d2) / denominator;
        let u = offset.cross(d1) / denominator;
        let range = -INTERSECTION_EPSILON..=(1.0 + INTERSECTION_EPSILON);
        if range.contains(&t) && range.contains(&u) {
            Some(self.start + d1 * t)
        } else {
            None
        }
    }

    /// Intersection of segments already known to be parallel (or degenerate).
    fn parallel_intersection(self, other: LineSegment) -> Option<FreePoint> {
        // Degenerate segments are points; they intersect whatever they lie on.
        if self.is_degenerate() {
            return other.contains_point(self.start).then_some(self.start);
        }
        if other.is_degenerate() {
            return self.contains_point(other.start).then_some(other.start);
        }

        let d1 = self.displacement();
        let length = d1.length();
        // Parallel but not collinear: no intersection.
        if ((other.start - self.start).cross(d1) / length).abs() > INTERSECTION_EPSILON {
            return None;
        }

        // Collinear. Positions along `self`, in arena units from `start`.
        let project = |p: FreePoint| (p - self.start).dot(d1) / length;
        let mut b0 = project(other.start);
        let mut b1 = project(other.end);
        sort_two(&mut b0, &mut b1);
        let low = b0.max(0.0);
        let high = b1.min(length);

        if low - high > INTERSECTION_EPSILON {
            return None; // disjoint
        }
        if high - low > INTERSECTION_EPSILON {
            return None; // overlap is a whole sub-segment, not a unique point
        }
        let along = ((low + high) / 2.0).clamp(0.0, length);
        Some(self.start + d1 * (along / length))
    }

    /// Whether `point` lies on this segment, within a small tolerance.
    pub fn contains_point(self, point: FreePoint) -> bool {
        if self.is_degenerate() {
            return (point - self.start).length() <= INTERSECTION_EPSILON;
        }
        let d = self.displacement();
        let length = d.length();
        let offset = point - self.start;
        (offset.cross(d) / length).abs() <= INTERSECTION_EPSILON
            && (-INTERSECTION_EPSILON..=length + INTERSECTION_EPSILON)
                .contains(&(offset.dot(d) / length))
    }
}
