//! Unified error handling for the workout compiler.
//!
//! Every error produced while compiling a workout carries the source location
//! a caller can point the user at.


use crate::lexer::{LexError, SourceLocation};
use crate::parser::{ParseError, ParseErrorKind};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkoutError {
    /// Malformed literal syntax
    #[error("LexError at {location}: {message}")]
    LexError {
        message: String,
        location: SourceLocation,
    },

    /// Grammar violation
    #[error("ParseError at {location}: {message}")]
    ParseError {
        kind: ParseErrorKind,
        message: String,
        location: SourceLocation,
    },
}

impl WorkoutError {
    /// Get a short error kind description (e.g., "LexicalError", "MissingDuration").
    pub fn kind(&self) -> &'static str {
        match self {
            WorkoutError::LexError { .. } => "LexicalError",
            WorkoutError::ParseError { kind, .. } => match kind {
                ParseErrorKind::MissingDuration => "MissingDuration",
                ParseErrorKind::MalformedComment => "MalformedComment",
                ParseErrorKind::InvalidOffsetSequence => "InvalidOffsetSequence",
                ParseErrorKind::UnexpectedToken => "UnexpectedToken",
                ParseErrorKind::DuplicateDirective => "DuplicateDirective",
                ParseErrorKind::InvalidDuration => "InvalidDuration",
                ParseErrorKind::OffsetOutOfRange => "OffsetOutOfRange",
            },
        }
    }

    pub fn message(&self) -> &str {
        match self {
            WorkoutError::LexError { message, .. } | WorkoutError::ParseError { message, .. } => message,
        }
    }

    pub fn location(&self) -> SourceLocation {
        match self {
            WorkoutError::LexError { location, .. } | WorkoutError::ParseError { location, .. } => *location,
        }
    }
}

impl From<LexError> for WorkoutError {
    fn from(err: LexError) -> Self {
        WorkoutError::LexError {
            message: err.to_string(),
            location: err.location(),
        }
    }
}

impl From<ParseError> for WorkoutError {
    fn from(err: ParseError) -> Self {
        WorkoutError::ParseError {
            kind: err.kind,
            message: err.message,
            location: err.location,
        }
    }
}
