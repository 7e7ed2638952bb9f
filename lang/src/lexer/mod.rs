pub mod token;

pub use token::{HeaderLabel, IntervalLabel, OffsetKind, SourceLocation, Span, Token, TokenKind};

use crate::values::{parse_power, Duration};
use thiserror::Error;

#[cfg(test)]
mod tests;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("Invalid duration '{text}'")]
    InvalidDuration { text: String, location: SourceLocation },
    #[error("Invalid power '{text}'")]
    InvalidPower { text: String, location: SourceLocation },
    #[error("Invalid cadence '{text}'")]
    InvalidCadence { text: String, location: SourceLocation },
    #[error("Invalid comment offset '{text}'")]
    InvalidOffset { text: String, location: SourceLocation },
    #[error("Unrecognized interval parameter '{text}'")]
    UnrecognizedParameter { text: String, location: SourceLocation },
    #[error("Missing value after '{directive}:'")]
    MissingValue {
        directive: &'static str,
        location: SourceLocation,
    },
    #[error("Unexpected input '{text}'")]
    UnexpectedInput { text: String, location: SourceLocation },
    #[error("Unterminated comment text")]
    UnterminatedComment { location: SourceLocation },
}

impl LexError {
    pub fn location(&self) -> SourceLocation {
        match self {
            LexError::InvalidDuration { location, .. }
            | LexError::InvalidPower { location, .. }
            | LexError::InvalidCadence { location, .. }
            | LexError::InvalidOffset { location, .. }
            | LexError::UnrecognizedParameter { location, .. }
            | LexError::MissingValue { location, .. }
            | LexError::UnexpectedInput { location, .. }
            | LexError::UnterminatedComment { location } => *location,
        }
    }
}

pub type LexResult = Result<Vec<Token>, LexError>;

/// Splits workout source into located tokens, one line at a time.
pub fn lex(input: &str) -> LexResult {
    let mut tokens = Vec::new();

    for (index, line) in input.lines().enumerate() {
        let row = u32::try_from(index + 1).unwrap_or(u32::MAX);
        LineLexer::new(line, row).lex_into(&mut tokens)?;
    }

    Ok(tokens)
}

/// Single-line directives that attach a value to the current interval.
#[derive(Debug, Clone, Copy)]
enum Directive {
    Duration,
    Power,
    Cadence,
}

impl Directive {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "Duration" => Some(Directive::Duration),
            "Power" => Some(Directive::Power),
            "Cadence" => Some(Directive::Cadence),
            _ => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Directive::Duration => "Duration",
            Directive::Power => "Power",
            Directive::Cadence => "Cadence",
        }
    }
}

struct LineLexer {
    input: Vec<char>,
    position: usize,
    row: u32,
}

impl LineLexer {
    fn new(line: &str, row: u32) -> Self {
        Self {
            input: line.chars().collect(),
            position: 0,
            row,
        }
    }

    fn lex_into(&mut self, tokens: &mut Vec<Token>) -> Result<(), LexError> {
        self.skip_whitespace();
        let start = self.current_location();

        if self.is_at_end() {
            tokens.push(Token::new(TokenKind::Text(String::new()), Span::new(start, start)));
            return Ok(());
        }

        if self.peek() == '@' {
            return self.lex_comment(tokens);
        }

        let line_start = self.position;
        let name = self.lex_identifier();
        let label_span = Span::new(start, self.current_location());
        let has_colon = self.peek() == ':';

        if has_colon {
            if let Some(header) = HeaderLabel::from_name(&name) {
                self.advance();
                tokens.push(Token::new(TokenKind::Header(header), label_span));
                self.lex_rest_as_text(tokens);
                return Ok(());
            }

            if let Some(directive) = Directive::from_name(&name) {
                self.advance();
                return self.lex_directive(directive, tokens);
            }
        }

        if let Some(label) = IntervalLabel::from_name(&name) {
            if has_colon {
                self.advance();
                tokens.push(Token::new(TokenKind::IntervalLabel(label), label_span));
                return self.lex_parameters(tokens);
            }

            self.skip_whitespace();
            if self.is_at_end() {
                tokens.push(Token::new(TokenKind::IntervalLabel(label), label_span));
                return Ok(());
            }
        }

        // Free text: header continuation or something the parser will reject.
        self.position = line_start;
        self.lex_rest_as_text(tokens);
        Ok(())
    }

    fn lex_comment(&mut self, tokens: &mut Vec<Token>) -> Result<(), LexError> {
        let start = self.current_location();
        self.advance(); // Skip '@'
        tokens.push(Token::new(TokenKind::CommentStart, Span::new(start, self.current_location())));

        self.skip_whitespace();
        if self.is_at_end() {
            return Ok(());
        }

        if matches!(self.peek(), '+' | '-' | '0'..='9') {
            let (word, span) = self.lex_word();
            let (kind, literal) = match word.chars().next() {
                Some('+') => (OffsetKind::RelativePlus, &word[1..]),
                Some('-') => (OffsetKind::RelativeMinus, &word[1..]),
                _ => (OffsetKind::Absolute, word.as_str()),
            };
            let duration = literal.parse::<Duration>().map_err(|_| LexError::InvalidOffset {
                text: word.clone(),
                location: span.start,
            })?;
            tokens.push(Token::new(TokenKind::Offset(kind, duration), span));
            self.skip_whitespace();
        }

        if self.is_at_end() {
            return Ok(());
        }

        if self.peek() != '"' {
            self.lex_rest_as_text(tokens);
            return Ok(());
        }

        let quote = self.current_location();
        self.advance(); // Skip opening quote
        let mut text = String::new();
        loop {
            if self.is_at_end() {
                return Err(LexError::UnterminatedComment { location: quote });
            }
            let ch = self.advance();
            if ch == '"' {
                break;
            }
            text.push(ch);
        }
        let end = self.current_location();

        self.skip_whitespace();
        if !self.is_at_end() {
            let location = self.current_location();
            return Err(LexError::UnexpectedInput {
                text: self.rest(),
                location,
            });
        }

        if !text.is_empty() {
            tokens.push(Token::new(TokenKind::Text(text), Span::new(quote, end)));
        }
        Ok(())
    }

    fn lex_directive(&mut self, directive: Directive, tokens: &mut Vec<Token>) -> Result<(), LexError> {
        self.skip_whitespace();
        if self.is_at_end() {
            return Err(LexError::MissingValue {
                directive: directive.name(),
                location: self.current_location(),
            });
        }

        let (word, span) = self.lex_word();
        self.skip_whitespace();
        if !self.is_at_end() {
            let location = self.current_location();
            return Err(LexError::UnexpectedInput {
                text: self.rest(),
                location,
            });
        }

        let location = span.start;
        let kind = match directive {
            Directive::Duration => word
                .parse::<Duration>()
                .map(TokenKind::Duration)
                .map_err(|_| LexError::InvalidDuration { text: word.clone(), location })?,
            Directive::Power => power_token(&word, location)?,
            Directive::Cadence => {
                let digits = word.strip_suffix("rpm").unwrap_or(&word);
                cadence_token(digits, &word, location)?
            }
        };

        tokens.push(Token::new(kind, span));
        Ok(())
    }

    fn lex_parameters(&mut self, tokens: &mut Vec<Token>) -> Result<(), LexError> {
        loop {
            self.skip_whitespace();
            if self.is_at_end() {
                return Ok(());
            }

            let (word, span) = self.lex_word();
            let kind = parameter_token(&word, span.start)?;
            tokens.push(Token::new(kind, span));
        }
    }

    fn lex_rest_as_text(&mut self, tokens: &mut Vec<Token>) {
        self.skip_whitespace();
        if self.is_at_end() {
            return;
        }
        let start = self.current_location();
        let text = self.rest();
        let width = u32::try_from(text.chars().count()).unwrap_or(u32::MAX);
        let end = SourceLocation::new(self.row, start.col.saturating_add(width));
        tokens.push(Token::new(TokenKind::Text(text), Span::new(start, end)));
    }

    fn lex_identifier(&mut self) -> String {
        let mut name = String::new();
        while !self.is_at_end() && self.peek().is_ascii_alphanumeric() {
            name.push(self.advance());
        }
        name
    }

    fn lex_word(&mut self) -> (String, Span) {
        let start = self.current_location();
        let mut word = String::new();
        while !self.is_at_end() && !self.peek().is_whitespace() {
            word.push(self.advance());
        }
        (word, Span::new(start, self.current_location()))
    }

    /// Consumes the remainder of the line, trailing whitespace trimmed.
    fn rest(&mut self) -> String {
        let text: String = self.input[self.position..].iter().collect();
        self.position = self.input.len();
        text.trim_end().to_string()
    }

    fn current_location(&self) -> SourceLocation {
        let col = u32::try_from(self.position + 1).unwrap_or(u32::MAX);
        SourceLocation::new(self.row, col)
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn skip_whitespace(&mut self) {
        while !self.is_at_end() && self.peek().is_whitespace() {
            self.position += 1;
        }
    }

    fn peek(&self) -> char {
        self.input.get(self.position).copied().unwrap_or('\0')
    }

    fn advance(&mut self) -> char {
        let ch = self.peek();
        self.position += 1;
        ch
    }
}

/// Classifies one inline interval parameter.
fn parameter_token(word: &str, location: SourceLocation) -> Result<TokenKind, LexError> {
    if let Some(digits) = word.strip_suffix("rpm") {
        return cadence_token(digits, word, location);
    }

    // Durations never contain these characters, so anything that does is power.
    let looks_like_power = word.ends_with('%')
        || word.ends_with('W')
        || word.contains(['.', '-']);
    if looks_like_power {
        return power_token(word, location);
    }

    word.parse::<Duration>()
        .map(TokenKind::Duration)
        .map_err(|_| LexError::UnrecognizedParameter {
            text: word.to_string(),
            location,
        })
}

fn power_token(word: &str, location: SourceLocation) -> Result<TokenKind, LexError> {
    let invalid = || LexError::InvalidPower {
        text: word.to_string(),
        location,
    };

    if let Some(watts) = word.strip_suffix('W') {
        return parse_digits(watts).map(TokenKind::Watts).ok_or_else(invalid);
    }

    if let Some(to) = word.strip_prefix("->").or_else(|| word.strip_prefix("..")) {
        return parse_power(to)
            .map(TokenKind::IntensityRangeEnd)
            .map_err(|_| invalid());
    }

    if let Some((from, to)) = word.split_once("..").or_else(|| word.split_once('-')) {
        let from = parse_power(from).map_err(|_| invalid())?;
        let to = parse_power(to).map_err(|_| invalid())?;
        return Ok(TokenKind::IntensityRange(from, to));
    }

    parse_power(word).map(TokenKind::Intensity).map_err(|_| invalid())
}

fn cadence_token(digits: &str, word: &str, location: SourceLocation) -> Result<TokenKind, LexError> {
    parse_digits(digits)
        .map(TokenKind::Cadence)
        .ok_or_else(|| LexError::InvalidCadence {
            text: word.to_string(),
            location,
        })
}

fn parse_digits(text: &str) -> Option<u32> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}
