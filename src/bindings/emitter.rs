//! Rust `extern` declaration emission.
//!
//! Each symbol becomes one self-contained block of Rust items suitable for
//! pasting inside an `extern "C" { ... }` block:
//!
//! ```text
//! #[link_name = "furi_thread_alloc"]
//! pub fn thread_alloc(_arg0: u32) -> *mut FuriThread;
//! ```

use std::io::Write;

use super::types::TypeSpec;
use crate::symbols::{EntryKind, SymbolError, SymbolRecord};

/// Parameter list spelling for a function without parameters.
const VOID_PARAMS: &str = "void";

/// C variadic marker in a parameter list.
const VARIADIC: &str = "...";

/// One declaration, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Variable or Function
    pub kind: EntryKind,

    /// Name the item is declared under
    pub emitted_name: String,

    /// Native symbol name, when it differs from `emitted_name`
    pub link_name: Option<String>,

    /// Variable type, or function return type (`None` = returns nothing)
    pub return_type: Option<TypeSpec>,

    /// Positional parameter types (functions only)
    pub params: Vec<TypeSpec>,

    /// Whether the function takes C varargs after `params`
    pub variadic: bool,
}

impl Declaration {
    /// Build the declaration for a record, resolving all of its types.
    ///
    /// Rows whose kind is neither Variable nor Function fail with
    /// [`SymbolError::UnsupportedEntryKind`].
    pub fn from_record(record: &SymbolRecord, emitted_name: &str) -> Result<Self, SymbolError> {
        let link_name = (emitted_name != record.name).then(|| record.name.clone());

        let (return_type, params, variadic) = match record.entry_kind {
            EntryKind::Variable => (Some(TypeSpec::resolve(&record.ty)), Vec::new(), false),
            EntryKind::Function => {
                let (params, variadic) = resolve_params(&record.params);
                (TypeSpec::resolve_return(&record.ty), params, variadic)
            }
            EntryKind::Other(ref entry) => {
                return Err(SymbolError::UnsupportedEntryKind {
                    name: record.name.clone(),
                    entry: entry.clone(),
                    line: record.line,
                })
            }
        };

        Ok(Declaration {
            kind: record.entry_kind.clone(),
            emitted_name: emitted_name.to_string(),
            link_name,
            return_type,
            params,
            variadic,
        })
    }

    /// Iterate over every resolved type in the declaration.
    pub fn types(&self) -> impl Iterator<Item = &TypeSpec> {
        self.return_type.iter().chain(self.params.iter())
    }
}

/// Split and resolve a comma-joined parameter list.
///
/// An empty list or a lone `void` yields no parameters. A trailing `...`
/// marks the function variadic.
fn resolve_params(raw: &str) -> (Vec<TypeSpec>, bool) {
    let raw = raw.trim();
    if raw.is_empty() || raw == VOID_PARAMS {
        return (Vec::new(), false);
    }

    let mut spellings: Vec<&str> = raw
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();

    let variadic = spellings.last() == Some(&VARIADIC);
    if variadic {
        spellings.pop();
    }

    (spellings.into_iter().map(TypeSpec::resolve).collect(), variadic)
}

/// Streams declarations to a writer.
pub struct DeclarationEmitter<W> {
    out: W,
}

impl<W: Write> DeclarationEmitter<W> {
    /// Create an emitter writing to `out`.
    pub fn new(out: W) -> Self {
        DeclarationEmitter { out }
    }

    /// Write one declaration block.
    pub fn emit(&mut self, decl: &Declaration) -> Result<(), SymbolError> {
        match decl.kind {
            EntryKind::Function => self.emit_function(decl),
            _ => self.emit_variable(decl),
        }
    }

    /// Write an extern static.
    pub fn emit_variable(&mut self, decl: &Declaration) -> Result<(), SymbolError> {
        check_kind(decl, EntryKind::Variable)?;

        let ty = decl
            .return_type
            .as_ref()
            .ok_or_else(|| SymbolError::MissingType {
                name: decl.emitted_name.clone(),
            })?;

        let mut block = link_name_attr(decl);
        block.push_str(&format!("pub static {}: {};\n", decl.emitted_name, ty));

        self.out.write_all(block.as_bytes())?;
        Ok(())
    }

    /// Write an extern function.
    pub fn emit_function(&mut self, decl: &Declaration) -> Result<(), SymbolError> {
        check_kind(decl, EntryKind::Function)?;

        let mut params: Vec<String> = decl
            .params
            .iter()
            .enumerate()
            .map(|(n, ty)| format!("_arg{}: {}", n, ty))
            .collect();
        if decl.variadic {
            params.push(VARIADIC.to_string());
        }

        let ret = match decl.return_type {
            Some(ref ty) => format!(" -> {}", ty),
            None => String::new(),
        };

        let mut block = link_name_attr(decl);
        block.push_str(&format!(
            "pub fn {}({}){};\n",
            decl.emitted_name,
            params.join(", "),
            ret
        ));

        self.out.write_all(block.as_bytes())?;
        Ok(())
    }

    /// Flush the underlying writer.
    pub fn flush(&mut self) -> Result<(), SymbolError> {
        self.out.flush()?;
        Ok(())
    }

    /// Unwrap the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

fn check_kind(decl: &Declaration, expected: EntryKind) -> Result<(), SymbolError> {
    if decl.kind != expected {
        return Err(SymbolError::TypeMismatch {
            name: decl.emitted_name.clone(),
            expected,
            found: decl.kind.clone(),
        });
    }
    Ok(())
}

fn link_name_attr(decl: &Declaration) -> String {
    match decl.link_name {
        Some(ref name) => format!("#[link_name = \"{}\"]\n", name),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::Visibility;

    fn function(name: &str, ty: &str, params: &str) -> SymbolRecord {
        SymbolRecord::new(name, EntryKind::Function, Visibility::Public, ty, params)
    }

    fn variable(name: &str, ty: &str) -> SymbolRecord {
        SymbolRecord::new(name, EntryKind::Variable, Visibility::Public, ty, "")
    }

    fn render(decl: &Declaration) -> String {
        let mut emitter = DeclarationEmitter::new(Vec::new());
        emitter.emit(decl).unwrap();
        String::from_utf8(emitter.into_inner()).unwrap()
    }

    #[test]
    fn test_variable_without_rename() {
        let record = variable("furi_hal_version", "uint32_t");
        let decl = Declaration::from_record(&record, "furi_hal_version").unwrap();
        assert_eq!(decl.link_name, None);
        assert_eq!(render(&decl), "pub static furi_hal_version: u32;\n");
    }

    #[test]
    fn test_variable_with_rename() {
        let record = variable("furi_hal_name", "const char*");
        let decl = Declaration::from_record(&record, "hal_name").unwrap();
        assert_eq!(
            render(&decl),
            "#[link_name = \"furi_hal_name\"]\npub static hal_name: *const c_char;\n"
        );
    }

    #[test]
    fn test_function_with_rename() {
        let decl = Declaration::from_record(
            &function("furi_hal_init", "void", "uint8_t, FuriThread*"),
            "hal_init",
        )
        .unwrap();
        assert_eq!(
            render(&decl),
            "#[link_name = \"furi_hal_init\"]\n\
             pub fn hal_init(_arg0: u8, _arg1: *mut FuriThread);\n"
        );
    }

    #[test]
    fn test_function_with_return() {
        let record = function("furi_get_tick", "uint32_t", "");
        let decl = Declaration::from_record(&record, "furi_get_tick").unwrap();
        assert_eq!(render(&decl), "pub fn furi_get_tick() -> u32;\n");
    }

    #[test]
    fn test_empty_or_void_params_emit_nothing() {
        for params in ["", "void", " void "] {
            let decl = Declaration::from_record(&function("f", "int", params), "f").unwrap();
            assert!(decl.params.is_empty(), "params = {:?}", params);
            assert_eq!(render(&decl), "pub fn f() -> i32;\n");
        }
    }

    #[test]
    fn test_variadic_function() {
        let decl = Declaration::from_record(
            &function("furi_log_print_format", "void", "FuriLogLevel, const char*, ..."),
            "furi_log_print_format",
        )
        .unwrap();
        assert!(decl.variadic);
        assert_eq!(
            render(&decl),
            "pub fn furi_log_print_format(_arg0: FuriLogLevel, _arg1: *const c_char, ...);\n"
        );
    }

    #[test]
    fn test_unsupported_entry_kind() {
        let record = SymbolRecord::new(
            "furi.h",
            EntryKind::Other("Header".into()),
            Visibility::Public,
            "",
            "",
        );
        let err = Declaration::from_record(&record, "furi.h").unwrap_err();
        assert!(matches!(
            err,
            SymbolError::UnsupportedEntryKind { ref entry, .. } if entry == "Header"
        ));
    }

    #[test]
    fn test_emitter_rejects_wrong_path() {
        let decl = Declaration::from_record(&function("f", "void", ""), "f").unwrap();
        let mut emitter = DeclarationEmitter::new(Vec::new());

        let err = emitter.emit_variable(&decl).unwrap_err();
        assert!(matches!(
            err,
            SymbolError::TypeMismatch {
                expected: EntryKind::Variable,
                found: EntryKind::Function,
                ..
            }
        ));
        assert!(emitter.into_inner().is_empty());
    }

    #[test]
    fn test_types_iterates_return_then_params() {
        let decl = Declaration::from_record(&function("f", "Foo*", "Bar, int"), "f").unwrap();
        let names: Vec<_> = decl.types().map(|t| t.base.name().to_string()).collect();
        assert_eq!(names, vec!["Foo", "Bar", "i32"]);
    }
}
