//! CLI output formatting for text and JSON modes.

use lang::lexer::SourceLocation;
use lang::parser::ast::{Comment, Interval, Workout};
use lang::repeats::Block;
use lang::{CompiledWorkout, WorkoutError};
use serde::Serialize;
use std::fmt;

/// Output mode for CLI execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable outline (default)
    Text,
    /// Single JSON document
    Json,
}

#[derive(Debug, Serialize)]
pub struct JsonWorkoutOutput<'a> {
    #[serde(rename = "type")]
    pub output_type: &'static str,
    #[serde(flatten)]
    pub compiled: &'a CompiledWorkout,
}

#[derive(Debug, Serialize)]
pub struct JsonErrorOutput<'a> {
    #[serde(rename = "type")]
    pub output_type: &'static str,
    pub kind: &'static str,
    pub message: &'a str,
    pub location: SourceLocation,
}

pub fn format_workout_json(compiled: &CompiledWorkout) -> serde_json::Result<String> {
    serde_json::to_string(&JsonWorkoutOutput {
        output_type: "workout",
        compiled,
    })
}

pub fn format_error_json(error: &WorkoutError) -> serde_json::Result<String> {
    serde_json::to_string(&JsonErrorOutput {
        output_type: "error",
        kind: error.kind(),
        message: error.message(),
        location: error.location(),
    })
}

/// Renders the error with the offending source line and a caret under the column.
pub fn format_error_text(error: &WorkoutError, source: &str) -> String {
    ErrorReport { error, source }.to_string()
}

/// Human-readable outline of the compiled workout.
pub fn format_workout_text(compiled: &CompiledWorkout) -> String {
    Outline(compiled).to_string()
}

struct ErrorReport<'a> {
    error: &'a WorkoutError,
    source: &'a str,
}

impl fmt::Display for ErrorReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let location = self.error.location();
        writeln!(f, "{}", self.error)?;

        let line = usize::try_from(location.row)
            .ok()
            .and_then(|row| row.checked_sub(1))
            .and_then(|index| self.source.lines().nth(index));
        let Some(line) = line else {
            return Ok(());
        };

        let gutter = location.row.to_string();
        let padding = " ".repeat(gutter.len());
        let caret_indent = " ".repeat(location.col.saturating_sub(1) as usize);
        writeln!(f, "{} |", padding)?;
        writeln!(f, "{} | {}", gutter, line)?;
        writeln!(f, "{} | {}^", padding, caret_indent)
    }
}

struct Outline<'a>(&'a CompiledWorkout);

impl fmt::Display for Outline<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_header(f, &self.0.workout)?;
        writeln!(f)?;

        for block in &self.0.blocks {
            match block {
                Block::Single(interval) => {
                    writeln!(f, "{}", IntervalLine(interval))?;
                    write_comments(f, &interval.comments)?;
                }
                Block::Repeated(repeated) => {
                    writeln!(
                        f,
                        "{}x [{} / {}]",
                        repeated.times,
                        IntervalLine(repeated.on()),
                        IntervalLine(repeated.off())
                    )?;
                    write_comments(f, &repeated.comments)?;
                }
            }
        }

        Ok(())
    }
}

fn write_header(f: &mut fmt::Formatter<'_>, workout: &Workout) -> fmt::Result {
    writeln!(f, "Name: {}", workout.name)?;
    if !workout.author.is_empty() {
        writeln!(f, "Author: {}", workout.author)?;
    }
    if !workout.description.is_empty() {
        let mut lines = workout.description.lines();
        writeln!(f, "Description: {}", lines.next().unwrap_or_default())?;
        for line in lines {
            writeln!(f, "  {}", line)?;
        }
    }
    if !workout.tags.is_empty() {
        writeln!(f, "Tags: {}", workout.tags.join(", "))?;
    }
    writeln!(f, "Duration: {}", workout.total_duration())
}

struct IntervalLine<'a>(&'a Interval);

impl fmt::Display for IntervalLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let interval = self.0;
        write!(f, "{} {} {}", interval.label, interval.duration, interval.intensity)?;
        if let Some(cadence) = interval.cadence {
            write!(f, " {}rpm", cadence)?;
        }
        Ok(())
    }
}

fn write_comments(f: &mut fmt::Formatter<'_>, comments: &[Comment]) -> fmt::Result {
    for comment in comments {
        writeln!(f, "  @{} {}", comment.offset, comment.text)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lang::compile;

    const SOURCE: &str = "\
Name: Sweet spot
Author: Coach
Description: Two blocks.
  Stay seated.
Tags: threshold

Warmup: 10m 40%..75%
Interval: 1m 100% 95rpm
  @0 Go
  @-10s Almost
Rest: 30s 50%
Interval: 1m 100% 95rpm
Rest: 30s 50%
FreeRide: 5m
";

    #[test]
    fn test_text_output() {
        let compiled = compile(SOURCE).unwrap();
        let text = format_workout_text(&compiled);
        assert_eq!(
            text,
            "\
Name: Sweet spot
Author: Coach
Description: Two blocks.
  Stay seated.
Tags: threshold
Duration: 18:00

Warmup 10:00 40%..75%
2x [Interval 1:00 100% 95rpm / Rest 0:30 50%]
  @0:00 Go
  @0:50 Almost
FreeRide 5:00 free
"
        );
    }

    #[test]
    fn test_text_output_minimal_header() {
        let compiled = compile("Rest: 1m").unwrap();
        assert_eq!(
            format_workout_text(&compiled),
            "Name: Untitled\nDuration: 1:00\n\nRest 1:00 free\n"
        );
    }

    #[test]
    fn test_json_workout_output() {
        let compiled = compile(SOURCE).unwrap();
        let json = format_workout_json(&compiled).unwrap();
        assert!(json.starts_with(r#"{"type":"workout","workout":{"name":"Sweet spot""#));
        assert!(json.contains(r#""kind":"repeated""#));
        assert!(json.contains(r#""times":2"#));
    }

    #[test]
    fn test_json_error_output() {
        let error = compile("Name: X\nRest\n").unwrap_err();
        let json = format_error_json(&error).unwrap();
        assert_eq!(
            json,
            r#"{"type":"error","kind":"MissingDuration","message":"Duration not specified for Rest interval","location":{"row":2,"col":1}}"#
        );
    }

    #[test]
    fn test_error_text_points_at_source() {
        let source = "Name: X\nInterval: 5m abc%\n";
        let error = compile(source).unwrap_err();
        let expected = format!(
            "LexError at 2:14: Invalid power 'abc%'\n  |\n2 | Interval: 5m abc%\n  | {}^\n",
            " ".repeat(13)
        );
        assert_eq!(format_error_text(&error, source), expected);
    }

    #[test]
    fn test_error_text_without_matching_source_line() {
        let error = compile("Rest\n").unwrap_err();
        assert_eq!(
            format_error_text(&error, ""),
            "ParseError at 1:1: Duration not specified for Rest interval\n"
        );
    }
}
