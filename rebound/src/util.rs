//! Tools that we could imagine being in the Rust standard library, but aren't.

use core::fmt;

use manyfmt::Fmt;

/// Format type for [`manyfmt::Fmt`] which is similar to [`fmt::Debug`], but
/// uses an alternate concise format.
///
/// This format may be on one line despite the pretty-printing option, and
/// may lose precision or Rust syntax in favor of a short at-a-glance
/// representation.
#[expect(clippy::exhaustive_structs)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct ConciseDebug;

impl<T: fmt::Debug, U> Fmt<ConciseDebug> for euclid::Point2D<T, U> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>, _: &ConciseDebug) -> fmt::Result {
        write!(fmt, "({:+.3?}, {:+.3?})", self.x, self.y)
    }
}

impl<T: fmt::Debug, U> Fmt<ConciseDebug> for euclid::Vector2D<T, U> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>, _: &ConciseDebug) -> fmt::Result {
        write!(fmt, "({:+.3?}, {:+.3?})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use euclid::{point2, vec2};
    use manyfmt::Refmt as _;

    #[test]
    fn concise_debug_2d() {
        let point: euclid::default::Point2D<f64> = point2(1.0, -2.5);
        assert_eq!(
            format!("{}", point.refmt(&ConciseDebug)),
            "(+1.000, -2.500)"
        );
        let vector: euclid::default::Vector2D<f64> = vec2(0.5, 10.0);
        assert_eq!(
            format!("{}", vector.refmt(&ConciseDebug)),
            "(+0.500, +10.000)"
        );
    }
}
