//! Folding of alternating work/rest pairs into repeated blocks.


use crate::parser::ast::{Comment, Interval};
use crate::values::Duration;
use serde::Serialize;

/// An on/off pair of intervals performed `times` times in a row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepeatedInterval {
    pub intervals: [Interval; 2],
    pub times: u32,
    /// Comments of the first repetition, offsets relative to the block start.
    pub comments: Vec<Comment>,
}

impl RepeatedInterval {
    pub fn on(&self) -> &Interval {
        &self.intervals[0]
    }

    pub fn off(&self) -> &Interval {
        &self.intervals[1]
    }

    pub fn duration(&self) -> Duration {
        (self.on().duration + self.off().duration) * self.times
    }
}

/// One element of the render-ready sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Block {
    Single(Interval),
    Repeated(RepeatedInterval),
}

impl Block {
    pub fn duration(&self) -> Duration {
        match self {
            Block::Single(interval) => interval.duration,
            Block::Repeated(repeated) => repeated.duration(),
        }
    }
}

/// Number of consecutive pairs starting at `start` that match the first one.
fn run_length(intervals: &[Interval], start: usize) -> usize {
    let Some([on, off]) = intervals.get(start..start + 2) else {
        return 0;
    };

    intervals[start..]
        .chunks_exact(2)
        .take_while(|pair| pair[0].same_effort(on) && pair[1].same_effort(off))
        .count()
}

fn first_occurrence_comments(on: &Interval, off: &Interval) -> Option<Vec<Comment>> {
    let mut comments = on.comments.clone();
    for comment in &off.comments {
        comments.push(Comment {
            offset: comment.offset.checked_add(on.duration)?,
            text: comment.text.clone(),
        });
    }
    Some(comments)
}

/// Builds the folded block, or `None` when its duration or shifted comment
/// offsets would not fit in a [`Duration`].
fn fold(on: &Interval, off: &Interval, times: usize) -> Option<RepeatedInterval> {
    let times = u32::try_from(times).ok()?;
    on.duration.checked_add(off.duration)?.checked_mul(times)?;

    Some(RepeatedInterval {
        comments: first_occurrence_comments(on, off)?,
        intervals: [on.clone(), off.clone()],
        times,
    })
}

/// Collapses every run of two or more identical on/off pairs into a
/// [`RepeatedInterval`]; all other intervals pass through in order.
pub fn detect_repeats(intervals: &[Interval]) -> Vec<Block> {
    let mut blocks = Vec::with_capacity(intervals.len());
    let mut index = 0;

    while index < intervals.len() {
        let times = run_length(intervals, index);
        let repeated = if times < 2 {
            None
        } else {
            fold(&intervals[index], &intervals[index + 1], times)
        };

        let Some(repeated) = repeated else {
            blocks.push(Block::Single(intervals[index].clone()));
            index += 1;
            continue;
        };

        tracing::trace!(index, times, on = %repeated.on().label, off = %repeated.off().label, "folding repeated pair");
        blocks.push(Block::Repeated(repeated));
        index += times * 2;
    }

    blocks
}
