//! Native type resolution.
//!
//! Maps C type spellings from a symbol table onto Rust FFI types. Only a small
//! set of primitives is recognized; every other base spelling is passed
//! through as-is and assumed to name an opaque type declared elsewhere in the
//! bindings.

use std::fmt;

/// Trailing indirection marker.
const POINTER_MARKER: char = '*';

/// Native spelling that means "no value" in return position.
const VOID: &str = "void";

/// Native base spelling → Rust primitive.
///
/// This is an ABI contract with the firmware: keep it value-for-value.
/// `const char` and `const uint8_t` are the pointee halves of the
/// `const char*` / `const uint8_t*` entries and resolve with a `*const`
/// innermost layer.
const COMPAT_TABLE: &[(&str, HostPrimitive)] = &[
    ("int", HostPrimitive::new("i32")),
    ("int8_t", HostPrimitive::new("i8")),
    ("uint8_t", HostPrimitive::new("u8")),
    ("int16_t", HostPrimitive::new("i16")),
    ("uint16_t", HostPrimitive::new("u16")),
    ("int32_t", HostPrimitive::new("i32")),
    ("uint32_t", HostPrimitive::new("u32")),
    ("size_t", HostPrimitive::new("usize")),
    ("_Bool", HostPrimitive::new("bool")),
    ("const char", HostPrimitive::constant("c_char")),
    ("const uint8_t", HostPrimitive::constant("u8")),
];

/// A Rust primitive from the compatibility table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostPrimitive {
    /// Rust type name
    pub name: &'static str,

    /// Whether the native pointee is const-qualified
    pub is_const: bool,
}

impl HostPrimitive {
    const fn new(name: &'static str) -> Self {
        HostPrimitive {
            name,
            is_const: false,
        }
    }

    const fn constant(name: &'static str) -> Self {
        HostPrimitive {
            name,
            is_const: true,
        }
    }

    /// Look up a native base spelling.
    pub fn lookup(base: &str) -> Option<Self> {
        COMPAT_TABLE
            .iter()
            .find(|(native, _)| *native == base)
            .map(|(_, host)| *host)
    }
}

/// The base of a resolved type, with pointers removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostBase {
    /// Known primitive
    Primitive(HostPrimitive),

    /// Unrecognized spelling, passed through unchanged
    Opaque(String),
}

impl HostBase {
    /// The Rust spelling of the base.
    pub fn name(&self) -> &str {
        match self {
            HostBase::Primitive(p) => p.name,
            HostBase::Opaque(s) => s.as_str(),
        }
    }

    /// Check if this base was passed through unresolved.
    pub fn is_opaque(&self) -> bool {
        matches!(self, HostBase::Opaque(_))
    }

    fn is_const(&self) -> bool {
        matches!(self, HostBase::Primitive(p) if p.is_const)
    }
}

/// A resolved type: a base wrapped in `pointer_depth` pointer layers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSpec {
    pub base: HostBase,
    pub pointer_depth: usize,
}

impl TypeSpec {
    /// Resolve a native type spelling.
    ///
    /// Never fails: unknown bases become [`HostBase::Opaque`].
    pub fn resolve(raw: &str) -> Self {
        let (base, pointer_depth) = strip_pointers(raw);
        let base = match HostPrimitive::lookup(base) {
            Some(primitive) => HostBase::Primitive(primitive),
            None => HostBase::Opaque(base.to_string()),
        };

        TypeSpec {
            base,
            pointer_depth,
        }
    }

    /// Resolve a function return type. `void` (and an empty spelling) means
    /// the function returns nothing.
    pub fn resolve_return(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() || raw == VOID {
            return None;
        }
        Some(Self::resolve(raw))
    }

    /// Check if this is a pointer type.
    pub fn is_pointer(&self) -> bool {
        self.pointer_depth > 0
    }

    /// Get the Rust type.
    pub fn as_rust(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TypeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Outermost layer first; only the innermost layer can be `*const`.
        for depth in (1..=self.pointer_depth).rev() {
            if depth == 1 && self.base.is_const() {
                f.write_str("*const ")?;
            } else {
                f.write_str("*mut ")?;
            }
        }
        f.write_str(self.base.name())
    }
}

/// Strip trailing pointer markers, returning the base spelling and the number
/// of markers removed.
fn strip_pointers(raw: &str) -> (&str, usize) {
    let mut base = raw.trim();
    let mut depth = 0;

    while let Some(inner) = base.strip_suffix(POINTER_MARKER) {
        base = inner.trim_end();
        depth += 1;
    }

    (base, depth)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn primitive(name: &str) -> Option<&'static str> {
        HostPrimitive::lookup(name).map(|p| p.name)
    }

    #[test]
    fn test_compat_table_values() {
        assert_eq!(primitive("int"), Some("i32"));
        assert_eq!(primitive("int8_t"), Some("i8"));
        assert_eq!(primitive("uint8_t"), Some("u8"));
        assert_eq!(primitive("int16_t"), Some("i16"));
        assert_eq!(primitive("uint16_t"), Some("u16"));
        assert_eq!(primitive("int32_t"), Some("i32"));
        assert_eq!(primitive("uint32_t"), Some("u32"));
        assert_eq!(primitive("size_t"), Some("usize"));
        assert_eq!(primitive("_Bool"), Some("bool"));
        assert_eq!(primitive("uint64_t"), None);
    }

    #[test]
    fn test_const_pointer_entries_render_as_table() {
        assert_eq!(TypeSpec::resolve("const char*").as_rust(), "*const c_char");
        assert_eq!(TypeSpec::resolve("const uint8_t*").as_rust(), "*const u8");
    }

    #[test]
    fn test_const_char_pointer_depth() {
        let ty = TypeSpec::resolve("const char*");
        assert_eq!(ty.pointer_depth, 1);
        assert_eq!(ty.base.name(), "c_char");
        assert!(!ty.base.is_opaque());
    }

    #[test]
    fn test_primitive_independent_of_depth() {
        for (native, host) in COMPAT_TABLE {
            for depth in 0..=3 {
                let raw = format!("{}{}", native, "*".repeat(depth));
                let ty = TypeSpec::resolve(&raw);
                assert_eq!(ty.base, HostBase::Primitive(*host), "{}", raw);
                assert_eq!(ty.pointer_depth, depth, "{}", raw);
            }
        }
        assert_eq!(TypeSpec::resolve("uint32_t**").as_rust(), "*mut *mut u32");
    }

    #[test]
    fn test_unknown_base_passthrough() {
        let ty = TypeSpec::resolve("FuriThread**");
        assert_eq!(ty.base, HostBase::Opaque("FuriThread".to_string()));
        assert_eq!(ty.pointer_depth, 2);
        assert_eq!(ty.as_rust(), "*mut *mut FuriThread");

        let ty = TypeSpec::resolve("FuriThread");
        assert_eq!(ty.pointer_depth, 0);
        assert_eq!(ty.as_rust(), "FuriThread");
    }

    #[test]
    fn test_pointer_markers_with_whitespace() {
        let ty = TypeSpec::resolve("  Canvas * * ");
        assert_eq!(ty.pointer_depth, 2);
        assert_eq!(ty.base.name(), "Canvas");
    }

    #[test]
    fn test_nested_const_char_pointer() {
        assert_eq!(
            TypeSpec::resolve("const char**").as_rust(),
            "*mut *const c_char"
        );
    }

    #[test]
    fn test_const_base_by_value() {
        assert_eq!(TypeSpec::resolve("const char").as_rust(), "c_char");
    }

    #[test]
    fn test_return_void_is_absent() {
        assert_eq!(TypeSpec::resolve_return("void"), None);
        assert_eq!(TypeSpec::resolve_return(" void "), None);
        assert_eq!(TypeSpec::resolve_return(""), None);
        assert_eq!(
            TypeSpec::resolve_return("void*").map(|t| t.as_rust()),
            Some("*mut void".to_string())
        );
    }

    #[test]
    fn test_void_in_resolve_is_not_special() {
        let ty = TypeSpec::resolve("void");
        assert!(ty.base.is_opaque());
        assert!(!ty.is_pointer());
    }
}
