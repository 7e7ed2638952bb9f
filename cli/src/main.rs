//! zwiftout CLI - workout description compiler
//!
//! Usage:
//!   zwiftout <FILE>              Print the compiled workout outline
//!   zwiftout -o json <FILE>      Print the compiled workout as JSON
//!   zwiftout --ftp 280 <FILE>    Measure `W` power values against 280 W
//!   cat file | zwiftout          Read the workout from stdin

mod output;

use clap::Parser;
use output::{format_error_json, format_error_text, format_workout_json, format_workout_text, OutputMode};
use std::io::{self, Read};
use std::num::NonZeroU32;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use lang::parser::ParserConfig;
use lang::{Compiler, CompilerConfig};

/// Environment variable holding the tracing filter (e.g. `debug`).
const LOG_ENV: &str = "ZWIFTOUT_LOG";

/// Workout description compiler
#[derive(Parser, Debug)]
#[command(name = "zwiftout")]
#[command(version, about = "Compile workout descriptions into structured workouts", long_about = None)]
struct Args {
    /// The workout file to compile (reads stdin when omitted)
    file: Option<PathBuf>,

    /// Output format: text (default), json
    #[arg(short = 'o', long = "output", value_name = "FORMAT")]
    output: Option<String>,

    /// Reference threshold in watts used to normalize `W` power values
    #[arg(long = "ftp", value_name = "WATTS", env = "ZWIFTOUT_FTP")]
    ftp: Option<NonZeroU32>,

    /// Keep every interval separate instead of folding repeated pairs
    #[arg(long = "no-repeats")]
    no_repeats: bool,
}

/// Source of the workout being compiled
enum Source {
    File { path: PathBuf, content: String },
    Stdin { content: String },
}

impl Source {
    fn content(&self) -> &str {
        match self {
            Source::File { content, .. } => content,
            Source::Stdin { content } => content,
        }
    }

    fn name(&self) -> String {
        match self {
            Source::File { path, .. } => path.display().to_string(),
            Source::Stdin { .. } => "<stdin>".to_string(),
        }
    }
}

fn parse_output_mode(args: &Args) -> Result<OutputMode, String> {
    match args.output.as_deref() {
        None | Some("text") => Ok(OutputMode::Text),
        Some("json") => Ok(OutputMode::Json),
        Some(other) => Err(format!("Invalid output format: '{}'. Use: text, json", other)),
    }
}

fn get_source(args: &Args) -> Result<Source, String> {
    if let Some(ref path) = args.file {
        let content =
            std::fs::read_to_string(path).map_err(|e| format!("Error reading file {:?}: {}", path, e))?;
        return Ok(Source::File {
            path: path.clone(),
            content,
        });
    }

    // Try stdin if not a TTY
    if !atty::is(atty::Stream::Stdin) {
        let mut content = String::new();
        io::stdin()
            .read_to_string(&mut content)
            .map_err(|e| format!("Error reading from stdin: {}", e))?;
        return Ok(Source::Stdin { content });
    }

    Err("No input provided. Use: zwiftout <FILE>, or pipe a workout to stdin".to_string())
}

fn compiler_config(args: &Args) -> CompilerConfig {
    let mut parser = ParserConfig::default();
    if let Some(ftp) = args.ftp {
        parser.reference_threshold = ftp;
    }

    CompilerConfig {
        parser,
        fold_repeats: !args.no_repeats,
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging();

    let output_mode = match parse_output_mode(&args) {
        Ok(mode) => mode,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(1);
        }
    };

    let source = match get_source(&args) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(1);
        }
    };

    let config = compiler_config(&args);
    debug!(
        source = %source.name(),
        threshold = config.parser.reference_threshold.get(),
        fold_repeats = config.fold_repeats,
        "compiling workout"
    );

    match output_mode {
        OutputMode::Text => run_text_mode(&source, config),
        OutputMode::Json => run_json_mode(&source, config),
    }
}

fn run_text_mode(source: &Source, config: CompilerConfig) -> ExitCode {
    let compiler = Compiler::with_config(config);
    match compiler.compile(source.content()) {
        Ok(compiled) => {
            info!(blocks = compiled.blocks.len(), "compiled {}", source.name());
            print!("{}", format_workout_text(&compiled));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprint!("{}: {}", source.name(), format_error_text(&e, source.content()));
            ExitCode::from(2)
        }
    }
}

fn run_json_mode(source: &Source, config: CompilerConfig) -> ExitCode {
    let compiler = Compiler::with_config(config);
    let (rendered, code) = match compiler.compile(source.content()) {
        Ok(compiled) => (format_workout_json(&compiled), ExitCode::SUCCESS),
        Err(e) => (format_error_json(&e), ExitCode::from(2)),
    };

    match rendered {
        Ok(json) => {
            println!("{}", json);
            code
        }
        Err(e) => {
            eprintln!("Error serializing output: {}", e);
            ExitCode::from(1)
        }
    }
}
