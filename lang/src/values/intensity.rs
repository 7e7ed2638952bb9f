use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Power target of an interval, as fractions of the reference threshold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "kebab-case")]
pub enum Intensity {
    /// A single target for the whole interval.
    Constant(f64),
    /// A linear ramp from the first to the second value.
    Range(f64, f64),
    /// A ramp that starts wherever the previous interval ended.
    RangeEnd(f64),
    /// No target.
    #[default]
    Free,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PowerError {
    #[error("empty power value")]
    Empty,
    #[error("invalid power value '{0}'")]
    Invalid(String),
}

impl Intensity {
    /// Starting value, unknown for `RangeEnd` and `Free`.
    pub fn start(&self) -> Option<f64> {
        match self {
            Intensity::Constant(value) => Some(*value),
            Intensity::Range(from, _) => Some(*from),
            Intensity::RangeEnd(_) | Intensity::Free => None,
        }
    }

    /// Final value, unknown only for `Free`.
    pub fn end(&self) -> Option<f64> {
        match self {
            Intensity::Constant(value) => Some(*value),
            Intensity::Range(_, to) | Intensity::RangeEnd(to) => Some(*to),
            Intensity::Free => None,
        }
    }

    pub fn is_free(&self) -> bool {
        matches!(self, Intensity::Free)
    }

    /// Semantic comparison where a flat range equals the matching constant.
    ///
    /// `PartialEq` stays structural so `Range(x, x)` and `Constant(x)` remain
    /// distinguishable to whoever renders the workout.
    pub fn is_equivalent(&self, other: &Intensity) -> bool {
        self.flattened() == other.flattened()
    }

    fn flattened(&self) -> Intensity {
        match *self {
            Intensity::Range(from, to) if from == to => Intensity::Constant(from),
            other => other,
        }
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Intensity::Constant(value) => write!(f, "{}", Percent(*value)),
            Intensity::Range(from, to) => write!(f, "{}..{}", Percent(*from), Percent(*to)),
            Intensity::RangeEnd(to) => write!(f, "..{}", Percent(*to)),
            Intensity::Free => write!(f, "free"),
        }
    }
}

struct Percent(f64);

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let percent = (self.0 * 1000.0).round() / 10.0;
        if percent.fract() == 0.0 {
            write!(f, "{}%", percent as i64)
        } else {
            write!(f, "{:.1}%", percent)
        }
    }
}

/// Parses a percentage (`75%`, `62.5%`) or a decimal fraction (`0.75`).
///
/// Bare integers are rejected: `75` could mean either 75% or 7500%.
pub fn parse_power(text: &str) -> Result<f64, PowerError> {
    if text.is_empty() {
        return Err(PowerError::Empty);
    }

    let invalid = || PowerError::Invalid(text.to_string());

    let (number, scale) = match text.strip_suffix('%') {
        Some(number) => (number, 100.0),
        None if text.contains('.') => (text, 1.0),
        None => return Err(invalid()),
    };

    let well_formed = !number.is_empty()
        && number.chars().all(|c| c.is_ascii_digit() || c == '.')
        && number.chars().filter(|&c| c == '.').count() <= 1
        && number.chars().any(|c| c.is_ascii_digit());
    if !well_formed {
        return Err(invalid());
    }

    number
        .parse::<f64>()
        .map(|value| value / scale)
        .map_err(|_| invalid())
}
