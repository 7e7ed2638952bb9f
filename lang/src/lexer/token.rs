use crate::values::Duration;
use serde::Serialize;
use std::fmt;

/// Position in source text (row and column, both 1-indexed, columns in chars)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct SourceLocation {
    pub row: u32,
    pub col: u32,
}

impl SourceLocation {
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row, self.col)
    }
}

/// Span representing a range of characters on one line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: SourceLocation,
    pub end: SourceLocation,
}

impl Span {
    pub fn new(start: SourceLocation, end: SourceLocation) -> Self {
        Self { start, end }
    }
}

/// Labels allowed in the workout header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderLabel {
    Name,
    Author,
    Description,
    Tags,
}

impl HeaderLabel {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Name" => Some(HeaderLabel::Name),
            "Author" => Some(HeaderLabel::Author),
            "Description" => Some(HeaderLabel::Description),
            "Tags" => Some(HeaderLabel::Tags),
            _ => None,
        }
    }
}

/// Kinds of interval a workout can be made of
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum IntervalLabel {
    Warmup,
    Rest,
    Interval,
    Cooldown,
    FreeRide,
    Ramp,
    SteadyState,
}

impl IntervalLabel {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Warmup" => Some(IntervalLabel::Warmup),
            "Rest" => Some(IntervalLabel::Rest),
            "Interval" => Some(IntervalLabel::Interval),
            "Cooldown" => Some(IntervalLabel::Cooldown),
            "FreeRide" => Some(IntervalLabel::FreeRide),
            "Ramp" => Some(IntervalLabel::Ramp),
            "SteadyState" => Some(IntervalLabel::SteadyState),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            IntervalLabel::Warmup => "Warmup",
            IntervalLabel::Rest => "Rest",
            IntervalLabel::Interval => "Interval",
            IntervalLabel::Cooldown => "Cooldown",
            IntervalLabel::FreeRide => "FreeRide",
            IntervalLabel::Ramp => "Ramp",
            IntervalLabel::SteadyState => "SteadyState",
        }
    }
}

impl fmt::Display for IntervalLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a comment offset relates to its neighbours
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetKind {
    /// `@1:30` - measured from the interval start
    Absolute,
    /// `@+30s` - measured from the previous comment
    RelativePlus,
    /// `@-10s` - measured back from the next comment or the interval end
    RelativeMinus,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Line-level labels
    Header(HeaderLabel),
    IntervalLabel(IntervalLabel),

    // Interval directives
    Duration(Duration),
    Cadence(u32),
    Watts(u32),
    Intensity(f64),
    IntensityRange(f64, f64),
    IntensityRangeEnd(f64),

    // Comments
    CommentStart,
    Offset(OffsetKind, Duration),

    // Header values, comment bodies and anything unrecognised.
    // Blank lines are kept as empty text.
    Text(String),
}

impl TokenKind {
    /// True for the tokens that configure an interval.
    pub fn is_directive(&self) -> bool {
        matches!(
            self,
            TokenKind::Duration(_)
                | TokenKind::Cadence(_)
                | TokenKind::Watts(_)
                | TokenKind::Intensity(_)
                | TokenKind::IntensityRange(..)
                | TokenKind::IntensityRangeEnd(_)
        )
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, TokenKind::Text(text) if text.is_empty())
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Header(label) => write!(f, "header {:?}", label),
            TokenKind::IntervalLabel(label) => write!(f, "interval label {}", label),
            TokenKind::Duration(duration) => write!(f, "duration {}", duration),
            TokenKind::Cadence(rpm) => write!(f, "cadence {}rpm", rpm),
            TokenKind::Watts(watts) => write!(f, "power {}W", watts),
            TokenKind::Intensity(value) => write!(f, "power {}", value),
            TokenKind::IntensityRange(from, to) => write!(f, "power range {}..{}", from, to),
            TokenKind::IntensityRangeEnd(to) => write!(f, "power range ..{}", to),
            TokenKind::CommentStart => write!(f, "comment"),
            TokenKind::Offset(kind, duration) => {
                let sign = match kind {
                    OffsetKind::Absolute => "",
                    OffsetKind::RelativePlus => "+",
                    OffsetKind::RelativeMinus => "-",
                };
                write!(f, "comment offset {}{}", sign, duration)
            }
            TokenKind::Text(text) if text.is_empty() => write!(f, "blank line"),
            TokenKind::Text(text) => write!(f, "text \"{}\"", text),
        }
    }
}

/// Token with position information
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn location(&self) -> SourceLocation {
        self.span.start
    }
}
