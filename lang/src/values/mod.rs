//! Scalar value types shared by the tokenizer, parser and repeat detector.

mod duration;
mod intensity;

#[cfg(test)]
mod tests;

pub use duration::{Duration, DurationError};
pub use intensity::{parse_power, Intensity, PowerError};
