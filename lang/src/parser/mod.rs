pub mod ast;
mod offsets;

use crate::lexer::{HeaderLabel, IntervalLabel, SourceLocation, Token, TokenKind};
use crate::values::{Duration, Intensity};
use ast::*;
use offsets::PendingComment;
use std::num::NonZeroU32;
use thiserror::Error;

/// Power, in watts, that a `W` literal is measured against by default.
pub const DEFAULT_REFERENCE_THRESHOLD: NonZeroU32 = match NonZeroU32::new(250) {
    Some(threshold) => threshold,
    None => panic!("default reference threshold must be non-zero"),
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    MissingDuration,
    MalformedComment,
    InvalidOffsetSequence,
    UnexpectedToken,
    DuplicateDirective,
    InvalidDuration,
    OffsetOutOfRange,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub message: String,
    pub location: SourceLocation,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, message: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            kind,
            message: message.into(),
            location,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Watts corresponding to an intensity of 1.0.
    pub reference_threshold: NonZeroU32,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            reference_threshold: DEFAULT_REFERENCE_THRESHOLD,
        }
    }
}

#[derive(Debug, Default)]
struct Header {
    name: Option<String>,
    author: Option<String>,
    description: Option<String>,
    tags: Vec<String>,
}

#[derive(Debug, Default)]
struct Directives {
    duration: Option<Duration>,
    intensity: Option<Intensity>,
    cadence: Option<u32>,
}

pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
    config: ParserConfig,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self::with_config(tokens, ParserConfig::default())
    }

    pub fn with_config(tokens: Vec<Token>, config: ParserConfig) -> Self {
        Self {
            tokens,
            current: 0,
            config,
        }
    }

    pub fn parse_workout(&mut self) -> Result<Workout, ParseError> {
        let header = self.parse_header();
        let intervals = self.parse_intervals()?;

        let name = header.name.unwrap_or_else(|| {
            tracing::debug!("workout has no name, using {:?}", DEFAULT_WORKOUT_NAME);
            DEFAULT_WORKOUT_NAME.to_string()
        });

        Ok(Workout {
            name,
            author: header.author.unwrap_or_default(),
            description: header.description.unwrap_or_default(),
            tags: header.tags,
            intervals,
        })
    }

    fn parse_header(&mut self) -> Header {
        let mut header = Header::default();

        while let Some(token) = self.peek() {
            match &token.kind {
                kind if kind.is_blank() => self.advance(),
                TokenKind::Header(label) => {
                    let label = *label;
                    self.advance();
                    let text = self.extract_text();
                    match label {
                        HeaderLabel::Name => header.name = Some(text),
                        HeaderLabel::Author => header.author = Some(text),
                        HeaderLabel::Description => header.description = Some(text),
                        HeaderLabel::Tags => {
                            for tag in text.split(',').map(str::trim).filter(|tag| !tag.is_empty()) {
                                if !header.tags.iter().any(|existing| existing == tag) {
                                    header.tags.push(tag.to_string());
                                }
                            }
                        }
                    }
                }
                // Headers are optional; anything else starts the intervals.
                _ => break,
            }
        }

        header
    }

    /// Joins the text lines following a header label.
    fn extract_text(&mut self) -> String {
        let mut lines = Vec::new();
        while let Some(Token {
            kind: TokenKind::Text(text),
            ..
        }) = self.peek()
        {
            lines.push(text.clone());
            self.advance();
        }
        lines.join("\n").trim().to_string()
    }

    fn parse_intervals(&mut self) -> Result<Vec<Interval>, ParseError> {
        let mut intervals = Vec::new();
        // Every block duration and folded comment offset fits once the total does.
        let mut total = Duration::ZERO;

        while let Some(token) = self.peek() {
            match &token.kind {
                kind if kind.is_blank() => self.advance(),
                TokenKind::IntervalLabel(label) => {
                    let label = *label;
                    let location = token.location();
                    self.advance();
                    let interval = self.parse_interval(label, location)?;
                    total = total.checked_add(interval.duration).ok_or_else(|| {
                        ParseError::new(
                            ParseErrorKind::InvalidDuration,
                            format!("{} interval makes the workout longer than {}", label, Duration::MAX),
                            location,
                        )
                    })?;
                    intervals.push(interval);
                }
                _ => return Err(unexpected_token(token)),
            }
        }

        Ok(intervals)
    }

    fn parse_interval(&mut self, label: IntervalLabel, location: SourceLocation) -> Result<Interval, ParseError> {
        let directives = self.parse_directives()?;

        let duration = directives.duration.ok_or_else(|| {
            ParseError::new(
                ParseErrorKind::MissingDuration,
                format!("Duration not specified for {} interval", label),
                location,
            )
        })?;

        let pending = self.parse_comments()?;
        let comments = offsets::resolve_comments(pending, duration)?;

        Ok(Interval {
            label,
            duration,
            intensity: directives.intensity.unwrap_or_default(),
            cadence: directives.cadence,
            comments,
        })
    }

    fn parse_directives(&mut self) -> Result<Directives, ParseError> {
        let mut directives = Directives::default();
        let threshold = f64::from(self.config.reference_threshold.get());

        while let Some(token) = self.peek() {
            let location = token.location();
            match &token.kind {
                kind if kind.is_blank() => {}
                TokenKind::Duration(duration) => {
                    if duration.is_zero() {
                        return Err(ParseError::new(
                            ParseErrorKind::InvalidDuration,
                            "Interval duration must be greater than zero",
                            location,
                        ));
                    }
                    set_once(&mut directives.duration, *duration, "Duration", location)?;
                }
                TokenKind::Cadence(rpm) => set_once(&mut directives.cadence, *rpm, "Cadence", location)?,
                TokenKind::Intensity(value) => {
                    set_once(&mut directives.intensity, Intensity::Constant(*value), "Power", location)?
                }
                TokenKind::IntensityRange(from, to) => {
                    set_once(&mut directives.intensity, Intensity::Range(*from, *to), "Power", location)?
                }
                TokenKind::IntensityRangeEnd(to) => {
                    set_once(&mut directives.intensity, Intensity::RangeEnd(*to), "Power", location)?
                }
                TokenKind::Watts(watts) => {
                    let value = f64::from(*watts) / threshold;
                    set_once(&mut directives.intensity, Intensity::Constant(value), "Power", location)?
                }
                _ => break,
            }
            self.advance();
        }

        Ok(directives)
    }

    fn parse_comments(&mut self) -> Result<Vec<PendingComment>, ParseError> {
        let mut pending = Vec::new();

        loop {
            self.skip_blank_lines();
            let start = match self.peek() {
                Some(token) if token.kind == TokenKind::CommentStart => token.location(),
                _ => break,
            };
            self.advance();

            let (kind, offset, offset_location) = match self.peek() {
                Some(Token {
                    kind: TokenKind::Offset(kind, offset),
                    span,
                }) if span.start.row == start.row => (*kind, *offset, span.start),
                Some(token) if token.location().row == start.row => {
                    return Err(ParseError::new(
                        ParseErrorKind::MalformedComment,
                        format!("Expected comment offset, got {}", token.kind),
                        token.location(),
                    ))
                }
                _ => {
                    return Err(ParseError::new(
                        ParseErrorKind::MalformedComment,
                        "Expected comment offset",
                        start,
                    ))
                }
            };
            self.advance();

            let text = match self.peek() {
                Some(Token {
                    kind: TokenKind::Text(text),
                    span,
                }) if span.start.row == start.row && !text.is_empty() => text.clone(),
                _ => {
                    return Err(ParseError::new(
                        ParseErrorKind::MalformedComment,
                        "Expected comment text after offset",
                        offset_location,
                    ))
                }
            };
            self.advance();

            pending.push(PendingComment {
                kind,
                offset,
                text,
                location: offset_location,
            });
        }

        Ok(pending)
    }

    fn skip_blank_lines(&mut self) {
        while self.peek().is_some_and(|token| token.kind.is_blank()) {
            self.advance();
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.current)
    }

    fn advance(&mut self) {
        if self.current < self.tokens.len() {
            self.current += 1;
        }
    }
}

fn set_once<T>(slot: &mut Option<T>, value: T, directive: &str, location: SourceLocation) -> Result<(), ParseError> {
    if slot.is_some() {
        return Err(ParseError::new(
            ParseErrorKind::DuplicateDirective,
            format!("{} specified more than once for this interval", directive),
            location,
        ));
    }
    *slot = Some(value);
    Ok(())
}

fn unexpected_token(token: &Token) -> ParseError {
    ParseError::new(
        ParseErrorKind::UnexpectedToken,
        format!("Unexpected {} where an interval was expected", token.kind),
        token.location(),
    )
}

pub fn parse(tokens: Vec<Token>) -> Result<Workout, ParseError> {
    Parser::new(tokens).parse_workout()
}

pub fn parse_with_config(tokens: Vec<Token>, config: ParserConfig) -> Result<Workout, ParseError> {
    Parser::with_config(tokens, config).parse_workout()
}
