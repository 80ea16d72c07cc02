//! `symgen generate` command
//!
//! Converts a symbol table into Rust extern declarations.

use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::cli::GenerateArgs;
use symgen::{Config, GenerateOptions, GenerateSummary, NameMatcher};

pub fn execute(args: GenerateArgs, config: &Config) -> Result<()> {
    // Flags override config
    let match_prefix = args.match_prefix.or_else(|| config.generate.match_prefix.clone());
    let strip_prefix = args.strip_prefix || config.generate.strip_prefix;
    let unknown_entry = args
        .unknown_entry
        .or(config.generate.unknown_entry)
        .unwrap_or_default();

    let matcher = NameMatcher::new()
        .with_match_prefix(match_prefix)
        .with_strip_prefix(strip_prefix);

    let opts = GenerateOptions::new(&args.filename)
        .with_matcher(matcher)
        .with_unknown_entry(unknown_entry);

    let summary = match args.output {
        Some(ref path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            run(&opts, BufWriter::new(file))?
        }
        None => run(&opts, BufWriter::new(io::stdout().lock()))?,
    };

    report(&summary);
    Ok(())
}

/// Error context naming the symbol table being processed.
#[derive(Debug)]
pub struct TableInput {
    pub path: PathBuf,
}

impl fmt::Display for TableInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to generate declarations from {}", self.path.display())
    }
}

fn run<W: Write>(opts: &GenerateOptions, out: W) -> Result<GenerateSummary> {
    symgen::generate(opts, out).with_context(|| TableInput {
        path: opts.input.clone(),
    })
}

fn report(summary: &GenerateSummary) {
    tracing::info!(
        "Emitted {} declarations ({} private, {} unmatched, {} unsupported skipped)",
        summary.emitted,
        summary.skipped_private,
        summary.skipped_unmatched,
        summary.skipped_unsupported
    );

    if !summary.opaque_types.is_empty() {
        tracing::info!(
            "{} type names were passed through unresolved and must be declared elsewhere",
            summary.opaque_types.len()
        );
        for name in &summary.opaque_types {
            tracing::debug!("  opaque: {}", name);
        }
    }
}
