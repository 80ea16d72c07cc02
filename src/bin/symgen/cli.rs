//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use symgen::UnknownEntryPolicy;

/// symgen - Rust FFI declarations from firmware symbol tables
#[derive(Parser)]
#[command(name = "symgen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Use this config file instead of ~/.symgen and .symgen
    #[arg(long, global = true, env = "SYMGEN_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a symbol table to Rust extern declarations
    Generate(GenerateArgs),

    /// Build example applications and optionally install them
    Examples(ExamplesArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct GenerateArgs {
    /// Symbol table (api_symbols.csv)
    pub filename: PathBuf,

    /// Only emit symbols whose name starts with this prefix
    #[arg(short, long)]
    pub match_prefix: Option<String>,

    /// Strip the match prefix from declared names
    #[arg(short = 'S', long)]
    pub strip_prefix: bool,

    /// What to do with rows that are neither Variable nor Function
    #[arg(long)]
    pub unknown_entry: Option<UnknownEntryPolicy>,

    /// Write declarations to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct ExamplesArgs {
    /// Examples to build (defaults to the configured list)
    pub names: Vec<String>,

    /// Copy built examples to the device
    #[arg(short, long)]
    pub install: bool,

    /// Workspace containing the examples
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}
