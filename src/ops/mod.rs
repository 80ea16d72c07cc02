//! High-level operations.
//!
//! This module contains the implementation of symgen commands.

pub mod examples;
pub mod generate;

pub use examples::{
    build_examples, BuiltUnit, CargoExampleBuilder, DeviceTransfer, StorageToolTransfer,
    UnitBuilder,
};
pub use generate::{
    generate, generate_from_reader, GenerateOptions, GenerateSummary, UnknownEntryPolicy,
};
