//! Symbol table to declaration pipeline.
//!
//! One sequential pass: load → visibility filter → name matcher → resolve →
//! emit. Declarations are written as soon as they are produced, so output for
//! earlier rows stays on the writer if a later row aborts the run.

use std::collections::BTreeSet;
use std::io::{Read, Write};
use std::path::PathBuf;
use std::str::FromStr;

use serde::Deserialize;

use crate::bindings::{Declaration, DeclarationEmitter};
use crate::symbols::{public_only, NameMatcher, SymbolError, SymbolReader};

/// What to do with rows whose `entry` is neither Variable nor Function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownEntryPolicy {
    /// Drop the row and keep going
    #[default]
    Skip,
    /// Abort the run
    Error,
}

impl FromStr for UnknownEntryPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "skip" => Ok(UnknownEntryPolicy::Skip),
            "error" => Ok(UnknownEntryPolicy::Error),
            _ => Err(format!("unknown entry policy: {} (expected skip or error)", s)),
        }
    }
}

/// Options for a generate run.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Symbol table path
    pub input: PathBuf,

    /// Name selection and renaming
    pub matcher: NameMatcher,

    /// Policy for unsupported entry kinds
    pub unknown_entry: UnknownEntryPolicy,
}

impl GenerateOptions {
    /// Create options for the given table with no filtering.
    pub fn new(input: impl Into<PathBuf>) -> Self {
        GenerateOptions {
            input: input.into(),
            matcher: NameMatcher::new(),
            unknown_entry: UnknownEntryPolicy::default(),
        }
    }

    /// Set the name matcher.
    pub fn with_matcher(mut self, matcher: NameMatcher) -> Self {
        self.matcher = matcher;
        self
    }

    /// Set the unsupported entry policy.
    pub fn with_unknown_entry(mut self, policy: UnknownEntryPolicy) -> Self {
        self.unknown_entry = policy;
        self
    }
}

/// Counts from a generate run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateSummary {
    /// Declarations written
    pub emitted: usize,

    /// Rows dropped for not being public
    pub skipped_private: usize,

    /// Public rows dropped by the match prefix
    pub skipped_unmatched: usize,

    /// Rows dropped for an unsupported entry kind
    pub skipped_unsupported: usize,

    /// Unknown base spellings that were passed through unresolved
    pub opaque_types: BTreeSet<String>,
}

/// Generate declarations for the symbol table at `opts.input`.
pub fn generate<W: Write>(opts: &GenerateOptions, out: W) -> Result<GenerateSummary, SymbolError> {
    tracing::debug!("Loading symbol table {}", opts.input.display());
    let reader = SymbolReader::from_path(&opts.input)?;
    run(reader, &opts.matcher, opts.unknown_entry, out)
}

/// Generate declarations from CSV text.
pub fn generate_from_reader<R: Read, W: Write>(
    input: R,
    matcher: &NameMatcher,
    unknown_entry: UnknownEntryPolicy,
    out: W,
) -> Result<GenerateSummary, SymbolError> {
    run(SymbolReader::from_reader(input), matcher, unknown_entry, out)
}

fn run<R: Read, W: Write>(
    reader: SymbolReader<R>,
    matcher: &NameMatcher,
    unknown_entry: UnknownEntryPolicy,
    out: W,
) -> Result<GenerateSummary, SymbolError> {
    if matcher.strip_is_inert() {
        tracing::debug!("--strip-prefix has no effect without --match-prefix");
    }

    let mut summary = GenerateSummary::default();
    let mut emitter = DeclarationEmitter::new(out);

    let mut total = 0;
    let mut public = 0;
    for record in public_only(reader.records()?.inspect(|_| total += 1)) {
        let record = record?;
        public += 1;

        let Some(emitted_name) = matcher.emitted_name(&record.name) else {
            summary.skipped_unmatched += 1;
            continue;
        };

        let decl = match Declaration::from_record(&record, emitted_name) {
            Ok(decl) => decl,
            Err(SymbolError::UnsupportedEntryKind { ref name, ref entry, line })
                if unknown_entry == UnknownEntryPolicy::Skip =>
            {
                tracing::debug!(
                    "Skipping `{}`: unsupported entry kind `{}` (line {:?})",
                    name,
                    entry,
                    line
                );
                summary.skipped_unsupported += 1;
                continue;
            }
            Err(e) => return Err(e),
        };

        for ty in decl.types().filter(|t| t.base.is_opaque()) {
            summary.opaque_types.insert(ty.base.name().to_string());
        }

        emitter.emit(&decl)?;
        summary.emitted += 1;
    }

    emitter.flush()?;
    summary.skipped_private = total - public;

    Ok(summary)
}
