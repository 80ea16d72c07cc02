//! symgen CLI - Rust FFI declarations from firmware symbol tables

use std::io::IsTerminal;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use symgen::util::diagnostic::{self, Diagnostic};
use symgen::SymbolError;

mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::generate::TableInput;

fn main() {
    let cli = Cli::parse();
    let color = !cli.no_color && std::io::stderr().is_terminal();

    if let Err(e) = run(cli, color) {
        report(&e, color);
        std::process::exit(1);
    }
}

fn run(cli: Cli, color: bool) -> Result<()> {
    // Set up logging; stdout is reserved for generated declarations
    let filter = if cli.verbose {
        EnvFilter::new("symgen=debug")
    } else {
        EnvFilter::new("symgen=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(color)
        .without_time()
        .init();

    let config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Generate(args) => commands::generate::execute(args, &config),
        Commands::Examples(args) => commands::examples::execute(args, &config),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}

fn report(err: &anyhow::Error, color: bool) {
    let diag = match (err.downcast_ref::<SymbolError>(), err.downcast_ref::<TableInput>()) {
        (Some(symbol_err), Some(input)) => symbol_err.to_diagnostic_at(&input.path),
        (Some(symbol_err), None) => symbol_err.to_diagnostic(),
        (None, _) => Diagnostic::error(format!("{:#}", err)),
    };

    diagnostic::emit(&diag, color);
}
