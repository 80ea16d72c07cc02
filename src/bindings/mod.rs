//! FFI declaration generation for firmware symbols.
//!
//! This module resolves native type spellings into Rust types and renders
//! symbols as `extern` item declarations.

pub mod emitter;
pub mod types;

pub use emitter::{Declaration, DeclarationEmitter};
pub use types::{HostBase, HostPrimitive, TypeSpec};
