//! # Flatzig Codegen
//!
//! Zig code generation from binary schema models.
//!
//! This crate provides:
//! - Zig source generation for tables, structs, enums and unions
//! - Packed (zero-copy accessor) and unpacked (plain value) type pairs
//! - Pack/unpack routine generation over the runtime builder
//! - A shared index document re-exporting every generated declaration

pub mod error;
pub mod generator;
pub mod imports;
pub mod intern;
pub mod name;
pub mod resolve;
pub mod zig;

pub use error::CodegenError;
pub use generator::{GeneratedFile, Generator, GeneratorOptions, IndexDoc};

use flatzig_schema::{Prelude, Schema};

/// Generates the output documents for one schema: one Zig source file per
/// prelude plus the shared index document.
///
/// # Errors
/// Returns `CodegenError` if any file's generation fails; no partial
/// output is returned.
pub fn generate_schema(
    schema: &Schema,
    preludes: &[Prelude],
    opts: &GeneratorOptions,
) -> Result<Vec<GeneratedFile>, CodegenError> {
    let mut index = IndexDoc::new();
    let mut files = Vec::with_capacity(preludes.len() + 1);

    for prelude in preludes {
        let generator = Generator::new(schema, prelude, opts);
        files.push(generator.generate(&mut index)?);
    }

    if !index.is_empty() {
        files.push(index.into_file(opts));
    }
    Ok(files)
}

/// Writes generated documents to disk, creating the output directory if
/// needed.
///
/// # Errors
/// Returns `CodegenError` on any filesystem failure.
pub fn write_output(files: &[GeneratedFile], opts: &GeneratorOptions) -> Result<(), CodegenError> {
    std::fs::create_dir_all(&opts.output_directory)?;
    for file in files {
        tracing::debug!(path = %file.path.display(), bytes = file.contents.len(), "writing output");
        std::fs::write(&file.path, &file.contents)?;
    }
    Ok(())
}
