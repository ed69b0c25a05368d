//! Decimal converters: one strategy per host numeric kind.
//!
//! A converter maps the host value type (what the external binding stores)
//! onto [`Decimal`], renders canonical text, parses field text, and derives
//! step sizes. The binding model does all of its arithmetic in decimals and
//! only touches host values at the edges.

use std::fmt;
use std::str::FromStr;

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

use crate::range::DecimalRange;

/// Number of steps an auto-computed step size aims for, as a power of ten.
const STEP_COUNT_EXPONENT: i32 = 2;

/// Largest scale a [`Decimal`] can carry.
const MAX_SCALE: i32 = 28;

/// Host numeric kind behind a setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumericKind {
    Integer,
    Float,
}

impl NumericKind {
    pub fn label(self) -> &'static str {
        match self {
            NumericKind::Integer => "integer",
            NumericKind::Float => "float",
        }
    }
}

impl fmt::Display for NumericKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for NumericKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "integer" | "int" | "i64" => Ok(NumericKind::Integer),
            "float" | "real" | "f64" => Ok(NumericKind::Float),
            other => Err(format!("unknown numeric kind '{other}' (expected integer or float)")),
        }
    }
}

/// Conversion strategy between a host numeric type and [`Decimal`].
pub trait DecimalConverter {
    type Value: Copy + PartialEq + fmt::Debug + fmt::Display;

    fn kind(&self) -> NumericKind;

    fn value_to_decimal(&self, value: Self::Value) -> Decimal;

    fn decimal_to_value(&self, decimal: Decimal) -> Self::Value;

    /// Floor applied to auto-computed step sizes.
    fn minimum_step_size(&self) -> Decimal;

    fn decimal_to_string(&self, decimal: Decimal) -> String {
        canonical_string(decimal)
    }

    fn value_to_string(&self, value: Self::Value) -> String {
        self.decimal_to_string(self.value_to_decimal(value))
    }

    /// Parses field text. `None` when the text is not a number.
    fn parse_decimal(&self, text: &str) -> Option<Decimal> {
        parse_decimal_text(text)
    }

    /// Step size giving roughly 100 steps across `range`:
    /// `max(minimum_step_size, 10^(floor(log10(width)) - 2))`.
    fn make_step_size(&self, range: &DecimalRange) -> Decimal {
        let width = range.width();
        let step = if width > Decimal::ZERO {
            pow10(floor_log10(width) - STEP_COUNT_EXPONENT)
        } else {
            Decimal::ONE
        };
        step.max(self.minimum_step_size())
    }

    /// [`make_step_size`](Self::make_step_size) over raw host bounds, in either order.
    fn make_step_size_for_values(&self, lower: Self::Value, upper: Self::Value) -> Decimal {
        let range =
            DecimalRange::from_bounds(self.value_to_decimal(lower), self.value_to_decimal(upper));
        self.make_step_size(&range)
    }
}

/// Converter for integral settings, backed by `i64`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntegerConverter;

impl DecimalConverter for IntegerConverter {
    type Value = i64;

    fn kind(&self) -> NumericKind {
        NumericKind::Integer
    }

    fn value_to_decimal(&self, value: i64) -> Decimal {
        Decimal::from(value)
    }

    fn decimal_to_value(&self, decimal: Decimal) -> i64 {
        round_half_away(decimal).to_i64().unwrap_or(if decimal.is_sign_negative() {
            i64::MIN
        } else {
            i64::MAX
        })
    }

    // Integers cannot step by less than one.
    fn minimum_step_size(&self) -> Decimal {
        Decimal::ONE
    }

    fn decimal_to_string(&self, decimal: Decimal) -> String {
        canonical_string(round_half_away(decimal))
    }

    // Clamped to the i64 span so the quantity always matches the host value.
    fn parse_decimal(&self, text: &str) -> Option<Decimal> {
        parse_decimal_text(text)
            .map(round_half_away)
            .map(|d| d.clamp(Decimal::from(i64::MIN), Decimal::from(i64::MAX)))
    }
}

/// Converter for real-valued settings, backed by `f64`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FloatConverter;

impl DecimalConverter for FloatConverter {
    type Value = f64;

    fn kind(&self) -> NumericKind {
        NumericKind::Float
    }

    fn value_to_decimal(&self, value: f64) -> Decimal {
        if value.is_nan() {
            return Decimal::ZERO;
        }
        if value.is_infinite() {
            return if value > 0.0 { Decimal::MAX } else { Decimal::MIN };
        }
        // The shortest round-trip text keeps 0.1 as 0.1 instead of its binary expansion.
        Decimal::from_str(&value.to_string())
            .ok()
            .or_else(|| Decimal::from_f64(value))
            .unwrap_or(if value > 0.0 { Decimal::MAX } else { Decimal::MIN })
    }

    fn decimal_to_value(&self, decimal: Decimal) -> f64 {
        decimal.to_f64().unwrap_or(0.0)
    }

    // No floor: real settings may step below one.
    fn minimum_step_size(&self) -> Decimal {
        Decimal::ZERO
    }
}

/// Rounds to the nearest integer, halves away from zero.
pub fn round_half_away(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Nearest whole number of steps from zero to `value`.
pub fn step_number_of(value: Decimal, step_size: Decimal) -> Decimal {
    value
        .checked_div(step_size)
        .map(round_half_away)
        .unwrap_or(Decimal::ZERO)
}

/// Nearest multiple of `step_size`.
pub fn snap(value: Decimal, step_size: Decimal) -> Decimal {
    step_number_of(value, step_size).saturating_mul(step_size)
}

/// `floor(log10(value))` for a positive decimal, computed exactly from its
/// mantissa and scale.
pub fn floor_log10(value: Decimal) -> i32 {
    let digits = value.mantissa().unsigned_abs().to_string().len() as i32;
    digits - 1 - value.scale() as i32
}

/// `10^exponent`, saturating at the limits of [`Decimal`].
pub fn pow10(exponent: i32) -> Decimal {
    if exponent >= 0 {
        let exponent = exponent.min(MAX_SCALE) as u32;
        Decimal::from_i128_with_scale(10_i128.pow(exponent), 0)
    } else {
        let scale = (-exponent).min(MAX_SCALE) as u32;
        Decimal::new(1, scale)
    }
}

/// Canonical text: trailing zeros stripped, never an exponent, `-0` as `0`.
pub fn canonical_string(value: Decimal) -> String {
    value.normalize().to_string()
}

fn parse_decimal_text(text: &str) -> Option<Decimal> {
    let cleaned: String = text.trim().chars().filter(|c| *c != '_').collect();
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .ok()
}
