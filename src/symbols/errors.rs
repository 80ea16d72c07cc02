//! Symbol table error types and diagnostics.

use std::path::Path;

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use super::EntryKind;
use crate::util::diagnostic::{suggestions, Diagnostic};

/// Error while loading a symbol table or emitting declarations from it.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum SymbolError {
    #[error("malformed symbol table: {message}")]
    #[diagnostic(
        code(symgen::load::malformed_input),
        help("Every row needs as many columns as the header, and the header needs `name`, `entry`, `status` and `type`")
    )]
    MalformedInput {
        /// 1-based line in the table, when the problem is tied to a row
        line: Option<u64>,
        message: String,
    },

    #[error("unsupported entry kind `{entry}` for `{name}`")]
    #[diagnostic(
        code(symgen::generate::unsupported_entry),
        help("Only `Variable` and `Function` rows produce declarations; pass `--unknown-entry skip` to ignore others")
    )]
    UnsupportedEntryKind {
        name: String,
        entry: String,
        line: Option<u64>,
    },

    #[error("expected a {expected} declaration for `{name}`, got a {found}")]
    #[diagnostic(code(symgen::emit::type_mismatch))]
    TypeMismatch {
        name: String,
        expected: EntryKind,
        found: EntryKind,
    },

    #[error("variable `{name}` has no type")]
    #[diagnostic(code(symgen::emit::missing_type))]
    MissingType { name: String },

    #[error("I/O error: {0}")]
    #[diagnostic(code(symgen::io))]
    Io(#[from] std::io::Error),
}

impl SymbolError {
    /// Shorthand for a row-level `MalformedInput`.
    pub fn malformed(line: Option<u64>, message: impl Into<String>) -> Self {
        SymbolError::MalformedInput {
            line,
            message: message.into(),
        }
    }

    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::error(self.to_string());

        match self {
            SymbolError::MalformedInput {
                line: Some(line), ..
            } => {
                diag = diag.with_context(format!("at line {}", line));
            }
            SymbolError::UnsupportedEntryKind {
                line: Some(line), ..
            } => {
                diag = diag.with_context(format!("at line {}", line));
            }
            SymbolError::TypeMismatch { .. } | SymbolError::MissingType { .. } => {
                diag = diag.with_context("this is an internal error in declaration emission");
            }
            SymbolError::Io(_) => {
                diag = diag.with_suggestion(suggestions::NO_TABLE);
            }
            _ => {}
        }

        if let Some(code) = MietteDiagnostic::code(self) {
            diag = diag.with_context(format!("code: {}", code));
        }
        if let Some(help) = MietteDiagnostic::help(self) {
            diag = diag.with_suggestion(help.to_string());
        }

        diag
    }

    /// Convert to a diagnostic pointing at the symbol table `path`.
    pub fn to_diagnostic_at(&self, path: &Path) -> Diagnostic {
        self.to_diagnostic().with_location(path)
    }
}

impl From<csv::Error> for SymbolError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line());
        match err.into_kind() {
            csv::ErrorKind::Io(e) => SymbolError::Io(e),
            csv::ErrorKind::UnequalLengths {
                expected_len, len, ..
            } => SymbolError::malformed(
                line,
                format!("row has {} columns, header has {}", len, expected_len),
            ),
            csv::ErrorKind::Utf8 { err, .. } => {
                SymbolError::malformed(line, format!("invalid UTF-8: {}", err))
            }
            other => SymbolError::malformed(line, format!("{:?}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_diagnostic_has_line_and_help() {
        let err = SymbolError::malformed(Some(7), "row has 3 columns, header has 5");
        let output = err.to_diagnostic().format(false);

        assert!(output.contains("error: malformed symbol table"));
        assert!(output.contains("at line 7"));
        assert!(output.contains("code: symgen::load::malformed_input"));
        assert!(output.contains("help: consider:"));
    }

    #[test]
    fn test_diagnostic_at_names_table() {
        let err = SymbolError::malformed(Some(3), "row has 3 columns, header has 5");
        let output = err
            .to_diagnostic_at(Path::new("targets/f7/api_symbols.csv"))
            .format(false);

        assert!(output.contains("  --> targets/f7/api_symbols.csv\n"));
        assert!(output.contains("at line 3"));
    }

    #[test]
    fn test_type_mismatch_message() {
        let err = SymbolError::TypeMismatch {
            name: "furi_get_tick".to_string(),
            expected: EntryKind::Variable,
            found: EntryKind::Function,
        };
        assert_eq!(
            err.to_string(),
            "expected a Variable declaration for `furi_get_tick`, got a Function"
        );
    }
}
