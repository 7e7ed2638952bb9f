//! Workout model produced by the parser.

use crate::values::{Duration, Intensity};
use serde::Serialize;

pub use crate::lexer::token::IntervalLabel;

/// Name given to workouts that declare none.
pub const DEFAULT_WORKOUT_NAME: &str = "Untitled";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Workout {
    pub name: String,
    pub author: String,
    pub description: String,
    /// Unique tags in the order they were first declared.
    pub tags: Vec<String>,
    pub intervals: Vec<Interval>,
}

impl Workout {
    pub fn total_duration(&self) -> Duration {
        self.intervals.iter().map(|interval| interval.duration).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Interval {
    #[serde(rename = "type")]
    pub label: IntervalLabel,
    pub duration: Duration,
    pub intensity: Intensity,
    pub cadence: Option<u32>,
    pub comments: Vec<Comment>,
}

impl Interval {
    /// Compares the parts that matter for training: duration, intensity and
    /// cadence. Label and comments are ignored.
    pub fn same_effort(&self, other: &Interval) -> bool {
        self.duration == other.duration && self.intensity == other.intensity && self.cadence == other.cadence
    }
}

/// A message shown `offset` after the start of its interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comment {
    pub offset: Duration,
    pub text: String,
}
