//! Resolution of comment offsets to absolute positions within an interval.
//!
//! `@1:00` is absolute, `@+10s` counts from the previous comment and `@-10s`
//! counts back from the next comment, or from the end of the interval when it
//! is the last one. Backward chains are resolved in one reverse pass and
//! forward references in one forward pass, so long chains never recurse.

use super::ast::Comment;
use super::{ParseError, ParseErrorKind};
use crate::lexer::{OffsetKind, SourceLocation};
use crate::values::Duration;

/// A comment as written, before its offset is made absolute.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PendingComment {
    pub kind: OffsetKind,
    pub offset: Duration,
    pub text: String,
    pub location: SourceLocation,
}

/// What a `RelativeMinus` offset counts back from.
enum Anchor {
    At(Duration),
    /// The following comment, written at this location, is relative to its
    /// predecessor.
    Forward(SourceLocation),
}

pub(crate) fn resolve_comments(
    pending: Vec<PendingComment>,
    interval_duration: Duration,
) -> Result<Vec<Comment>, ParseError> {
    let mut resolved: Vec<Option<Duration>> = vec![None; pending.len()];
    let mut anchor = Anchor::At(interval_duration);

    for (index, comment) in pending.iter().enumerate().rev() {
        match comment.kind {
            OffsetKind::Absolute => {
                resolved[index] = Some(comment.offset);
                anchor = Anchor::At(comment.offset);
            }
            OffsetKind::RelativeMinus => {
                let reference = match anchor {
                    Anchor::At(reference) => reference,
                    Anchor::Forward(location) => {
                        return Err(ParseError::new(
                            ParseErrorKind::InvalidOffsetSequence,
                            "Negative offset can not be followed by a positive offset",
                            location,
                        ))
                    }
                };
                let offset = reference.checked_sub(comment.offset).ok_or_else(|| {
                    ParseError::new(
                        ParseErrorKind::OffsetOutOfRange,
                        format!(
                            "Offset -{} resolves to before the start of the interval",
                            comment.offset
                        ),
                        comment.location,
                    )
                })?;
                resolved[index] = Some(offset);
                anchor = Anchor::At(offset);
            }
            OffsetKind::RelativePlus => anchor = Anchor::Forward(comment.location),
        }
    }

    let mut previous = Duration::ZERO;
    let mut comments = Vec::with_capacity(pending.len());
    for (comment, resolved) in pending.into_iter().zip(resolved) {
        let offset = match resolved {
            Some(offset) => offset,
            None => previous.checked_add(comment.offset).ok_or_else(|| {
                ParseError::new(
                    ParseErrorKind::OffsetOutOfRange,
                    format!("Offset +{} resolves past the longest supported duration", comment.offset),
                    comment.location,
                )
            })?,
        };
        previous = offset;
        comments.push(Comment {
            offset,
            text: comment.text,
        });
    }

    Ok(comments)
}
