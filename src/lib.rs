//! symgen - Rust FFI declarations from firmware symbol tables
//!
//! This crate turns the `api_symbols.csv` table exported by a firmware build
//! into Rust `extern` declarations, and wraps the cargo invocations used to
//! build and install example applications.

pub mod bindings;
pub mod ops;
pub mod symbols;
pub mod util;

pub use bindings::{Declaration, DeclarationEmitter, TypeSpec};
pub use ops::{generate, GenerateOptions, GenerateSummary, UnknownEntryPolicy};
pub use symbols::{NameMatcher, SymbolError, SymbolReader, SymbolRecord};
pub use util::config::Config;
