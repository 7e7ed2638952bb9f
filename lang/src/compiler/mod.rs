//! Compilation pipeline: source text → tokens → workout → render-ready blocks.


use crate::error::WorkoutError;
use crate::lexer::lex;
use crate::parser::ast::Workout;
use crate::parser::{Parser, ParserConfig};
use crate::repeats::{detect_repeats, Block};
use serde::Serialize;
use tracing::debug;

/// Configuration for the compiler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompilerConfig {
    pub parser: ParserConfig,
    /// Fold alternating on/off pairs into repeated blocks
    pub fold_repeats: bool,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            parser: ParserConfig::default(),
            fold_repeats: true,
        }
    }
}

/// A parsed workout together with the block sequence a renderer consumes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompiledWorkout {
    pub workout: Workout,
    pub blocks: Vec<Block>,
}

pub struct Compiler {
    config: CompilerConfig,
}

impl Compiler {
    pub fn new() -> Self {
        Self::with_config(CompilerConfig::default())
    }

    pub fn with_config(config: CompilerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// Tokenizes and parses `source` without building blocks.
    pub fn parse(&self, source: &str) -> Result<Workout, WorkoutError> {
        let tokens = lex(source)?;
        debug!(tokens = tokens.len(), "tokenized workout");

        let workout = Parser::with_config(tokens, self.config.parser).parse_workout()?;
        debug!(
            name = %workout.name,
            intervals = workout.intervals.len(),
            "parsed workout"
        );

        Ok(workout)
    }

    pub fn compile(&self, source: &str) -> Result<CompiledWorkout, WorkoutError> {
        let workout = self.parse(source)?;

        let blocks = if self.config.fold_repeats {
            detect_repeats(&workout.intervals)
        } else {
            workout.intervals.iter().cloned().map(Block::Single).collect()
        };
        debug!(blocks = blocks.len(), "built render blocks");

        Ok(CompiledWorkout { workout, blocks })
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

/// Compiles `source` with the default configuration.
pub fn compile(source: &str) -> Result<CompiledWorkout, WorkoutError> {
    Compiler::new().compile(source)
}
