//! Axis-aligned rectangles: the [`Rect`] type.

use core::fmt;

use crate::math::{ArenaSize, FreeCoordinate, FreePoint, FreeVector, LineSegment, Side};

/// Axis-aligned rectangle with strictly positive width and height.
///
/// Defined by its upper-left corner plus a size, in arena coordinates where
/// +y points down; so `upper_left` carries both the minimum x and the
/// minimum y, and [`Side::Top`] is the edge at `upper_left.y`.
#[derive(Clone, Copy, PartialEq)]
pub struct Rect {
    upper_left: FreePoint,
    size: ArenaSize,
}

/// Error from [`Rect::checked_new`]: rectangles must not be flat or inverted.
#[derive(Clone, Copy, Debug, PartialEq, displaydoc::Display)]
#[displaydoc("rectangle extent must be positive and finite, got {width} × {height}")]
pub struct InvalidRectSize {
    width: FreeCoordinate,
    height: FreeCoordinate,
}

impl std::error::Error for InvalidRectSize {}

impl Rect {
    /// Constructs a [`Rect`] from its upper-left corner and extent.
    ///
    /// Panics if `width` or `height` is not positive and finite; use
    /// [`Rect::checked_new`] to report that to the caller instead.
    #[inline]
    #[track_caller]
    pub fn new(upper_left: impl Into<FreePoint>, width: FreeCoordinate, height: FreeCoordinate) -> Self {
        match Self::checked_new(upper_left.into(), width, height) {
            Ok(rect) => rect,
            Err(error) => panic!("{error}"),
        }
    }

    /// Constructs a [`Rect`] from its upper-left corner and extent, reporting
    /// a non-positive or non-finite extent as an error.
    pub fn checked_new(
        upper_left: impl Into<FreePoint>,
        width: FreeCoordinate,
        height: FreeCoordinate,
    ) -> Result<Self, InvalidRectSize> {
        // `>` is false for NaN, so this also rejects NaN extents.
        if width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite() {
            Ok(Self {
                upper_left: upper_left.into(),
                size: ArenaSize::new(width, height),
            })
        } else {
            Err(InvalidRectSize { width, height })
        }
    }

    /// The corner of the rectangle with the minimum x and minimum y.
    #[inline]
    pub fn upper_left(&self) -> FreePoint {
        self.upper_left
    }

    /// Width and height of the rectangle. Always positive.
    #[inline]
    pub fn size(&self) -> ArenaSize {
        self.size
    }

    /// The center of the enclosed area.
    #[inline]
    pub fn center(&self) -> FreePoint {
        self.upper_left + self.size.to_vector() / 2.0
    }

    /// Returns the position of the boundary line the given side lies on:
    /// an x coordinate for the vertical sides, a y coordinate for the
    /// horizontal ones.
    #[inline]
    pub fn side_coordinate(&self, side: Side) -> FreeCoordinate {
        match side {
            Side::Top => self.upper_left.y,
            Side::Bottom => self.upper_left.y + self.size.height,
            Side::Left => self.upper_left.x,
            Side::Right => self.upper_left.x + self.size.width,
        }
    }

    /// Returns the given boundary edge as a [`LineSegment`].
    ///
    /// Horizontal edges run left to right; vertical edges run top to bottom.
    pub fn edge(&self, side: Side) -> LineSegment {
        let left = self.side_coordinate(Side::Left);
        let right = self.side_coordinate(Side::Right);
        let top = self.side_coordinate(Side::Top);
        let bottom = self.side_coordinate(Side::Bottom);
        match side {
            Side::Top => LineSegment::new([left, top], [right, top]),
            Side::Bottom => LineSegment::new([left, bottom], [right, bottom]),
            Side::Left => LineSegment::new([left, top], [left, bottom]),
            Side::Right => LineSegment::new([right, top], [right, bottom]),
        }
    }

    /// Returns whether this rectangle, including its boundary, contains the point.
    #[inline]
    pub fn contains(&self, point: FreePoint) -> bool {
        let lower_right = self.upper_left + self.size.to_vector();
        self.upper_left.x <= point.x
            && point.x <= lower_right.x
            && self.upper_left.y <= point.y
            && point.y <= lower_right.y
    }

    /// Returns whether `point` lies on the rectangle's boundary, within
    /// `tolerance` in each axis.
    pub fn on_boundary(&self, point: FreePoint, tolerance: FreeCoordinate) -> bool {
        let left = self.side_coordinate(Side::Left);
        let right = self.side_coordinate(Side::Right);
        let top = self.side_coordinate(Side::Top);
        let bottom = self.side_coordinate(Side::Bottom);

        let within_x = (left - tolerance..=right + tolerance).contains(&point.x);
        let within_y = (top - tolerance..=bottom + tolerance).contains(&point.y);

        let on_vertical_edge =
            within_y && ((point.x - left).abs() <= tolerance || (point.x - right).abs() <= tolerance);
        let on_horizontal_edge =
            within_x && ((point.y - top).abs() <= tolerance || (point.y - bottom).abs() <= tolerance);

        on_vertical_edge || on_horizontal_edge
    }

    /// Translate this rectangle by the specified offset.
    #[inline]
    #[must_use]
    pub fn translate(self, offset: FreeVector) -> Self {
        Self {
            upper_left: self.upper_left + offset,
            size: self.size,
        }
    }
}

impl fmt::Debug for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Rect { upper_left, size } = *self;
        f.debug_tuple("Rect")
            .field(&(upper_left.x..=upper_left.x + size.width))
            .field(&(upper_left.y..=upper_left.y + size.height))
            .finish()
    }
}
