//! CLI module for stylelens
//!
//! ## Commands
//!
//! - `check <files...>` - Report scanner and parser issues
//! - `tree <file>` - Print the syntax tree
//! - `tokens <file>` - Print the token stream
//! - `symbols <file>` - List declared symbols, or the symbols visible at `--offset`
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use stylelens_core::lang::dialect::Dialect;

use crate::symbols::SymbolKind;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    /// At least one checked file has issues.
    pub const ISSUES: ExitCode = ExitCode(1);
    /// The command itself could not run (bad arguments, unreadable file).
    pub const FAILURE: ExitCode = ExitCode(2);
}

/// Error type for CLI operations.
///
/// The CLI entry point catches these errors, prints them, and exits with [`CliError::exit_code`].
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("cannot read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("source file '{path}' is too large ({size} bytes, max {max} bytes)")]
    TooLarge { path: PathBuf, size: u64, max: u64 },

    #[error("cannot infer the dialect of '{0}': use --dialect css|scss|less")]
    UnknownDialect(PathBuf),

    #[error("offset {offset} is outside '{path}' ({len} bytes) or not on a character boundary")]
    InvalidOffset { path: PathBuf, offset: usize, len: usize },

    #[error("cannot serialize output: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::FAILURE
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Dialect names accepted by `--dialect`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DialectArg {
    Css,
    Scss,
    Less,
}

impl From<DialectArg> for Dialect {
    fn from(arg: DialectArg) -> Self {
        match arg {
            DialectArg::Css => Dialect::Css,
            DialectArg::Scss => Dialect::Scss,
            DialectArg::Less => Dialect::Less,
        }
    }
}

/// Symbol kinds accepted by `--kind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Variable,
    Mixin,
    Function,
    Import,
    Keyframes,
}

impl From<KindArg> for SymbolKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Variable => SymbolKind::Variable,
            KindArg::Mixin => SymbolKind::Mixin,
            KindArg::Function => SymbolKind::Function,
            KindArg::Import => SymbolKind::Import,
            KindArg::Keyframes => SymbolKind::Keyframes,
        }
    }
}

/// Analyze CSS, SCSS and Less files
#[derive(Parser, Debug)]
#[command(name = "stylelens")]
#[command(version = VERSION)]
#[command(about = "Analyze CSS, SCSS and Less files", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Grammar to use (default: inferred from the file extension)
    #[arg(long, value_enum, global = true)]
    pub dialect: Option<DialectArg>,

    /// Print machine-readable JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Report scanner and parser issues
    Check {
        /// Files to check
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,
    },

    /// Print the syntax tree
    Tree {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Print the token stream
    Tokens {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Include whitespace and comment tokens
        #[arg(long)]
        trivia: bool,
    },

    /// List declared symbols, or the symbols visible at an offset
    Symbols {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Byte offset to resolve from
        #[arg(long)]
        offset: Option<usize>,
        /// Only show symbols of this kind
        #[arg(long, value_enum)]
        kind: Option<KindArg>,
    },
}

/// Output options shared by all commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Options {
    pub dialect: Option<Dialect>,
    pub json: bool,
}

impl Options {
    /// The dialect to parse `path` with: `--dialect`, else the file extension.
    pub fn dialect_for(&self, path: &Path) -> CliResult<Dialect> {
        self.dialect
            .or_else(|| Dialect::from_path(path))
            .ok_or_else(|| CliError::UnknownDialect(path.to_path_buf()))
    }
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(e.exit_code().0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    let options = Options {
        dialect: cli.dialect.map(Dialect::from),
        json: cli.json,
    };
    tracing::debug!(?options, command = ?cli.command, "running command");

    match cli.command {
        Command::Check { files } => commands::check_files(&files, options),
        Command::Tree { file } => commands::print_tree(&file, options),
        Command::Tokens { file, trivia } => commands::print_tokens(&file, trivia, options),
        Command::Symbols { file, offset, kind } => {
            commands::print_symbols(&file, offset, kind.map(SymbolKind::from), options)
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
