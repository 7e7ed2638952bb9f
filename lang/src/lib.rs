//! Front end of the zwiftout workout compiler.
//!
//! Workout descriptions are tokenized by [`lexer`], turned into a
//! [`parser::ast::Workout`] by [`parser`], and folded into render-ready
//! [`repeats::Block`]s by [`repeats`]. [`compiler`] runs the whole pipeline.

pub mod compiler;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod repeats;
pub mod values;

pub use compiler::{compile, CompiledWorkout, Compiler, CompilerConfig};
pub use error::WorkoutError;
