//! Scripted operations: a small text syntax for driving a setting.
//!
//! ```text
//! inc  inc:3  dec  dec:2  text:999999  value:42  rescale:0.5  range:2..8  drag:0.25
//! ```

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::control::Setting;
use crate::error::ScriptError;
use crate::range::DecimalRange;

#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Increment(u32),
    Decrement(u32),
    /// Type the text into the field, then commit it.
    Text(String),
    /// External owner writes a new value.
    Value(Decimal),
    Rescale(Decimal),
    Range(DecimalRange),
    /// Full drag gesture ending at the given slider position.
    Drag(f64),
}

impl Operation {
    pub fn apply(&self, setting: &mut dyn Setting) {
        match self {
            Operation::Increment(steps) => setting.increment(*steps),
            Operation::Decrement(steps) => setting.decrement(*steps),
            Operation::Text(text) => {
                setting.set_field_text(text);
                setting.commit_text();
            }
            Operation::Value(value) => setting.set_external(*value),
            Operation::Rescale(factor) => setting.rescale(*factor),
            Operation::Range(range) => setting.set_slider_range(*range),
            Operation::Drag(position) => {
                setting.begin_drag();
                setting.drag_to(*position);
                setting.end_drag();
            }
        }
    }
}

/// Parses a whitespace- or comma-separated list of operations.
pub fn parse_operations(script: &str) -> Result<Vec<Operation>, ScriptError> {
    script
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .map(str::parse::<Operation>)
        .collect()
}

impl FromStr for Operation {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (op, arg) = match s.split_once(':') {
            Some((op, arg)) => (op.trim(), Some(arg.trim())),
            None => (s.trim(), None),
        };
        let invalid = |arg: &str| ScriptError::InvalidArgument {
            op: op.to_string(),
            arg: arg.to_string(),
        };
        let required = || arg.ok_or_else(|| ScriptError::MissingArgument(op.to_string()));

        match op {
            "inc" | "dec" => {
                let steps = match arg {
                    Some(arg) => arg.parse::<u32>().map_err(|_| invalid(arg))?,
                    None => 1,
                };
                Ok(if op == "inc" {
                    Operation::Increment(steps)
                } else {
                    Operation::Decrement(steps)
                })
            }
            // Text is kept verbatim; a bad number is the model's problem, not the parser's.
            "text" => Ok(Operation::Text(required()?.to_string())),
            "value" => {
                let arg = required()?;
                Decimal::from_str(arg)
                    .map(Operation::Value)
                    .map_err(|_| invalid(arg))
            }
            "rescale" => {
                let arg = required()?;
                Decimal::from_str(arg)
                    .map(Operation::Rescale)
                    .map_err(|_| invalid(arg))
            }
            "range" => Ok(Operation::Range(required()?.parse()?)),
            "drag" => {
                let arg = required()?;
                match arg.parse::<f64>() {
                    Ok(position) if position.is_finite() => Ok(Operation::Drag(position)),
                    _ => Err(invalid(arg)),
                }
            }
            other => Err(ScriptError::UnknownOperation(other.to_string())),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Increment(steps) => write!(f, "inc:{steps}"),
            Operation::Decrement(steps) => write!(f, "dec:{steps}"),
            Operation::Text(text) => write!(f, "text:{text}"),
            Operation::Value(value) => write!(f, "value:{value}"),
            Operation::Rescale(factor) => write!(f, "rescale:{factor}"),
            Operation::Range(range) => write!(f, "range:{range}"),
            Operation::Drag(position) => write!(f, "drag:{position}"),
        }
    }
}
