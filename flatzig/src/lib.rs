//! # Flatzig
//!
//! Zig code generation for zero-copy binary serialization schemas.
//!
//! Flatzig turns a loaded schema model (tables, structs, enums, unions)
//! into Zig source files built around a packed/unpacked type duality:
//! every schema object gets a zero-copy accessor type over raw wire
//! bytes and a plain value type, with conversions in both directions.
//!
//! ## Features
//!
//! - **Zero-copy accessors** - Generated packed types read wire bytes in
//!   place through vtable or fixed-offset lookup
//! - **Value types** - Generated unpacked types with declared defaults
//!   and builder-based pack routines
//! - **Cross-file schemas** - Per-file modules with tracked imports plus
//!   one shared index re-exporting every declaration
//! - **Union support** - Tagged unions with implicit tag-field handling
//!
//! ## Quick Start
//!
//! ```ignore
//! use flatzig::prelude::*;
//!
//! let opts = GeneratorOptions::default();
//! let files = flatzig::codegen::generate_schema(&schema, &preludes, &opts)?;
//! flatzig::codegen::write_output(&files, &opts)?;
//! ```
//!
//! ## Crate Organization
//!
//! - [`schema`] - The schema object model (objects, fields, enums, types)
//! - [`codegen`] - Zig source generation from a schema model

pub mod prelude;

/// Schema object model.
pub mod schema {
    pub use flatzig_schema::*;
}

/// Zig code generation from schema models.
pub mod codegen {
    pub use flatzig_codegen::*;
}
