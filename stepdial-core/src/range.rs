//! Closed decimal interval used for both the maximum range and the slider range.

use std::fmt;
use std::str::FromStr;

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::RangeError;

/// Closed interval `[lower, upper]` of decimal values. `lower <= upper` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DecimalRange {
    lower: Decimal,
    upper: Decimal,
}

impl DecimalRange {
    /// Creates a range, rejecting inverted bounds.
    pub fn new(lower: Decimal, upper: Decimal) -> Result<Self, RangeError> {
        if lower > upper {
            return Err(RangeError::Inverted { lower, upper });
        }
        Ok(Self { lower, upper })
    }

    /// Creates a range from two bounds in either order.
    pub fn from_bounds(a: Decimal, b: Decimal) -> Self {
        if a <= b {
            Self { lower: a, upper: b }
        } else {
            Self { lower: b, upper: a }
        }
    }

    /// Degenerate range containing a single value.
    pub fn point(value: Decimal) -> Self {
        Self {
            lower: value,
            upper: value,
        }
    }

    pub fn lower(&self) -> Decimal {
        self.lower
    }

    pub fn upper(&self) -> Decimal {
        self.upper
    }

    pub fn width(&self) -> Decimal {
        self.upper.saturating_sub(self.lower)
    }

    pub fn contains(&self, value: Decimal) -> bool {
        self.lower <= value && value <= self.upper
    }

    /// True when `self` lies entirely inside `outer`.
    pub fn is_within(&self, outer: &DecimalRange) -> bool {
        outer.lower <= self.lower && self.upper <= outer.upper
    }

    pub fn clamp(&self, value: Decimal) -> Decimal {
        value.clamp(self.lower, self.upper)
    }

    /// Intersects with `outer`. A range disjoint from `outer` collapses onto
    /// the nearest bound of `outer`, so the result is always inside it.
    pub fn clamped_to(&self, outer: &DecimalRange) -> Self {
        Self {
            lower: outer.clamp(self.lower),
            upper: outer.clamp(self.upper),
        }
    }

    /// Smallest range covering both `self` and `value`.
    pub fn expanded_to_include(&self, value: Decimal) -> Self {
        Self {
            lower: self.lower.min(value),
            upper: self.upper.max(value),
        }
    }

    /// Linear coordinate of `value` in this range: 0 at `lower`, 1 at `upper`.
    ///
    /// Not clamped. A zero-width range maps everything to 0.
    pub fn fraction_of(&self, value: Decimal) -> f64 {
        let width = self.width();
        if width.is_zero() {
            return 0.0;
        }
        value
            .saturating_sub(self.lower)
            .checked_div(width)
            .and_then(|fraction| fraction.to_f64())
            .unwrap_or(0.0)
    }

    /// Inverse of [`fraction_of`](Self::fraction_of).
    pub fn interpolate(&self, fraction: Decimal) -> Decimal {
        self.lower
            .saturating_add(fraction.saturating_mul(self.width()))
    }
}

impl fmt::Display for DecimalRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.lower.normalize(), self.upper.normalize())
    }
}

impl FromStr for DecimalRange {
    type Err = RangeError;

    /// Parses `lower..upper`, e.g. `2..8` or `-0.5..1.5`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || RangeError::Malformed(s.to_string());
        let (lower, upper) = s.trim().split_once("..").ok_or_else(malformed)?;
        let lower = Decimal::from_str(lower.trim()).map_err(|_| malformed())?;
        let upper = Decimal::from_str(upper.trim()).map_err(|_| malformed())?;
        Self::new(lower, upper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn range(lower: Decimal, upper: Decimal) -> DecimalRange {
        DecimalRange::new(lower, upper).unwrap()
    }

    #[test]
    fn new_rejects_inverted_bounds() {
        let err = DecimalRange::new(dec!(5), dec!(1)).unwrap_err();
        assert_eq!(
            err,
            RangeError::Inverted {
                lower: dec!(5),
                upper: dec!(1)
            }
        );
    }

    #[test]
    fn from_bounds_orders_its_arguments() {
        let r = DecimalRange::from_bounds(dec!(8), dec!(2));
        assert_eq!(r.lower(), dec!(2));
        assert_eq!(r.upper(), dec!(8));
    }

    #[test]
    fn clamped_to_intersects() {
        let outer = range(dec!(0), dec!(10));
        let r = range(dec!(-5), dec!(4)).clamped_to(&outer);
        assert_eq!(r, range(dec!(0), dec!(4)));
        assert!(r.is_within(&outer));
    }

    #[test]
    fn clamped_to_collapses_disjoint_range() {
        let outer = range(dec!(0), dec!(10));
        let r = range(dec!(20), dec!(30)).clamped_to(&outer);
        assert_eq!(r, DecimalRange::point(dec!(10)));
    }

    #[test]
    fn expanded_to_include_grows_one_side() {
        let r = range(dec!(2), dec!(8));
        assert_eq!(r.expanded_to_include(dec!(9)), range(dec!(2), dec!(9)));
        assert_eq!(r.expanded_to_include(dec!(1)), range(dec!(1), dec!(8)));
        assert_eq!(r.expanded_to_include(dec!(5)), r);
    }

    #[test]
    fn fraction_and_interpolate_are_inverse() {
        let r = range(dec!(200), dec!(800));
        assert_eq!(r.fraction_of(dec!(500)), 0.5);
        assert_eq!(r.interpolate(dec!(0.25)), dec!(350));
        // Outside the range the coordinate is not clamped.
        assert_eq!(r.fraction_of(dec!(1400)), 2.0);
    }

    #[test]
    fn zero_width_fraction_is_zero() {
        assert_eq!(DecimalRange::point(dec!(3)).fraction_of(dec!(3)), 0.0);
    }

    #[test]
    fn parse_range_text() {
        assert_eq!("2..8".parse::<DecimalRange>().unwrap(), range(dec!(2), dec!(8)));
        assert_eq!(
            "-0.5 .. 1.5".parse::<DecimalRange>().unwrap(),
            range(dec!(-0.5), dec!(1.5))
        );
        assert!(matches!(
            "8..2".parse::<DecimalRange>(),
            Err(RangeError::Inverted { .. })
        ));
        assert!(matches!(
            "2-8".parse::<DecimalRange>(),
            Err(RangeError::Malformed(_))
        ));
    }

    #[test]
    fn display_strips_trailing_zeros() {
        assert_eq!(range(dec!(0.50), dec!(10.00)).to_string(), "0.5..10");
    }
}
