use serde::Serialize;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul, Sub};
use std::str::FromStr;
use thiserror::Error;

/// A non-negative span of time with one-second resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct Duration {
    seconds: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationError {
    #[error("empty duration")]
    Empty,
    #[error("invalid duration '{0}'")]
    Invalid(String),
    #[error("component out of range in duration '{0}'")]
    OutOfRange(String),
}

impl Duration {
    pub const ZERO: Duration = Duration { seconds: 0 };
    pub const MAX: Duration = Duration { seconds: u32::MAX };

    pub const fn from_seconds(seconds: u32) -> Self {
        Self { seconds }
    }

    pub const fn seconds(self) -> u32 {
        self.seconds
    }

    pub fn is_zero(self) -> bool {
        self.seconds == 0
    }

    pub fn checked_add(self, other: Duration) -> Option<Duration> {
        self.seconds.checked_add(other.seconds).map(Duration::from_seconds)
    }

    /// Subtraction that refuses to go below zero.
    pub fn checked_sub(self, other: Duration) -> Option<Duration> {
        self.seconds.checked_sub(other.seconds).map(Duration::from_seconds)
    }

    pub fn checked_mul(self, times: u32) -> Option<Duration> {
        self.seconds.checked_mul(times).map(Duration::from_seconds)
    }

    fn parse_clock(text: &str) -> Result<Self, DurationError> {
        let parts: Vec<&str> = text.split(':').collect();
        if parts.len() > 3 || parts.iter().any(|p| p.is_empty() || !p.bytes().all(|b| b.is_ascii_digit())) {
            return Err(DurationError::Invalid(text.to_string()));
        }

        let (head, tail) = parts.split_first().ok_or(DurationError::Empty)?;
        let mut seconds = parse_number(head, text)?;
        for part in tail {
            let value = parse_number(part, text)?;
            if part.len() != 2 || value >= 60 {
                return Err(DurationError::OutOfRange(text.to_string()));
            }
            seconds = seconds
                .checked_mul(60)
                .and_then(|s| s.checked_add(value))
                .ok_or_else(|| DurationError::OutOfRange(text.to_string()))?;
        }

        Ok(Duration::from_seconds(seconds))
    }

    fn parse_units(text: &str) -> Result<Self, DurationError> {
        let invalid = || DurationError::Invalid(text.to_string());
        let mut seconds: u32 = 0;
        let mut digits = String::new();
        // Units must appear at most once each, largest first.
        let mut last_rank = 0;

        for ch in text.chars() {
            if ch.is_ascii_digit() {
                digits.push(ch);
                continue;
            }

            let (rank, factor) = match ch {
                'h' => (1, 3600),
                'm' => (2, 60),
                's' => (3, 1),
                _ => return Err(invalid()),
            };
            if digits.is_empty() || rank <= last_rank {
                return Err(invalid());
            }
            last_rank = rank;

            let value = parse_number(&digits, text)?;
            seconds = value
                .checked_mul(factor)
                .and_then(|v| seconds.checked_add(v))
                .ok_or_else(|| DurationError::OutOfRange(text.to_string()))?;
            digits.clear();
        }

        if !digits.is_empty() {
            return Err(invalid());
        }

        Ok(Duration::from_seconds(seconds))
    }
}

fn parse_number(digits: &str, whole: &str) -> Result<u32, DurationError> {
    digits
        .parse::<u32>()
        .map_err(|_| DurationError::OutOfRange(whole.to_string()))
}

impl FromStr for Duration {
    type Err = DurationError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        if text.is_empty() {
            return Err(DurationError::Empty);
        }

        if text.bytes().all(|b| b.is_ascii_digit()) {
            return parse_number(text, text).map(Duration::from_seconds);
        }

        if text.contains(':') {
            return Self::parse_clock(text);
        }

        Self::parse_units(text)
    }
}

impl Add for Duration {
    type Output = Duration;

    /// Panics when the sum does not fit; use [`Duration::checked_add`] for
    /// values that come straight from source text.
    fn add(self, other: Duration) -> Duration {
        match self.checked_add(other) {
            Some(result) => result,
            None => panic!("duration addition overflow: {} + {}", self, other),
        }
    }
}

impl Sub for Duration {
    type Output = Duration;

    /// Panics when `other` is longer than `self`; use [`Duration::checked_sub`]
    /// when the operands are not known to be ordered.
    fn sub(self, other: Duration) -> Duration {
        match self.checked_sub(other) {
            Some(result) => result,
            None => panic!("duration subtraction underflow: {} - {}", self, other),
        }
    }
}

impl Mul<u32> for Duration {
    type Output = Duration;

    fn mul(self, times: u32) -> Duration {
        match self.checked_mul(times) {
            Some(result) => result,
            None => panic!("duration multiplication overflow: {} * {}", self, times),
        }
    }
}

impl Sum for Duration {
    fn sum<I: Iterator<Item = Duration>>(iter: I) -> Duration {
        iter.fold(Duration::ZERO, Add::add)
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hours = self.seconds / 3600;
        let minutes = (self.seconds % 3600) / 60;
        let seconds = self.seconds % 60;
        if hours > 0 {
            write!(f, "{}:{:02}:{:02}", hours, minutes, seconds)
        } else {
            write!(f, "{}:{:02}", minutes, seconds)
        }
    }
}
