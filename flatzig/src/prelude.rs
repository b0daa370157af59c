//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types.
//!
//! ```ignore
//! use flatzig::prelude::*;
//! ```

// Schema model
pub use flatzig_schema::{
    BaseKind, Enum, EnumVal, Field, Object, Prelude, Schema, TypeDesc,
};

// Generation entry points
pub use flatzig_codegen::{
    CodegenError, GeneratedFile, Generator, GeneratorOptions, IndexDoc, generate_schema,
    write_output,
};
