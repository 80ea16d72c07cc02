//! Firmware symbol tables.
//!
//! A symbol table is a CSV listing of the variables and functions a firmware
//! image exports, with their visibility and native (C) type spellings. This
//! module loads those rows and narrows them down to the symbols that should
//! get declarations.

pub mod errors;
pub mod filter;
pub mod loader;

use std::fmt;

pub use errors::SymbolError;
pub use filter::{public_only, NameMatcher};
pub use loader::{Records, SymbolReader};

/// Marker used in the `status` column for exported symbols.
pub const PUBLIC_MARKER: &str = "+";

/// The kind of a symbol table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    Variable,
    Function,
    /// Any other `entry` value (`Header`, `Version`, ...).
    Other(String),
}

impl EntryKind {
    /// Parse an `entry` column value. Never fails; unknown kinds are kept.
    pub fn parse(s: &str) -> Self {
        match s {
            "Variable" => EntryKind::Variable,
            "Function" => EntryKind::Function,
            other => EntryKind::Other(other.to_string()),
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::Variable => write!(f, "Variable"),
            EntryKind::Function => write!(f, "Function"),
            EntryKind::Other(s) => write!(f, "{}", s),
        }
    }
}

/// Symbol visibility from the `status` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Private,
}

impl Visibility {
    /// Anything other than the public marker counts as private.
    pub fn parse(s: &str) -> Self {
        if s == PUBLIC_MARKER {
            Visibility::Public
        } else {
            Visibility::Private
        }
    }
}

/// One row of a symbol table. All fields are whitespace-trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolRecord {
    /// Native symbol name
    pub name: String,

    /// Row kind
    pub entry_kind: EntryKind,

    /// Export status
    pub visibility: Visibility,

    /// Native type spelling (variable type, or function return type)
    pub ty: String,

    /// Comma-joined native parameter spellings (functions only)
    pub params: String,

    /// 1-based line in the source table
    pub line: Option<u64>,
}

impl SymbolRecord {
    /// Create a record with no source line.
    pub fn new(
        name: impl Into<String>,
        entry_kind: EntryKind,
        visibility: Visibility,
        ty: impl Into<String>,
        params: impl Into<String>,
    ) -> Self {
        SymbolRecord {
            name: name.into(),
            entry_kind,
            visibility,
            ty: ty.into(),
            params: params.into(),
            line: None,
        }
    }

    /// Check if the symbol is exported.
    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }
}
