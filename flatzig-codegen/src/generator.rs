//! Per-file generation driver.
//!
//! One [`Generator`] pass over one schema file produces one Zig source
//! document plus entries in the shared [`IndexDoc`]. The mutable state of
//! a pass (string pool, import tracker) lives in a [`FileContext`] that
//! is constructed at the start of the file and discarded at its end, so
//! passes over independent files share nothing and may run in parallel.

use std::path::{Path, PathBuf};

use flatzig_schema::{Prelude, Schema};

use crate::error::CodegenError;
use crate::imports::{self, ImportTracker};
use crate::intern::Interner;
use crate::zig::{EnumEmitter, ObjectEmitter};

/// Options controlling output placement and naming.
#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    /// Directory the generated documents are written into.
    pub output_directory: PathBuf,
    /// Extension appended to each schema file's base name.
    pub file_extension: String,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            output_directory: PathBuf::from("."),
            file_extension: ".fb.zig".to_string(),
        }
    }
}

/// Mutable state scoped to one output file's generation.
///
/// Exclusively owned by the file's generation pass; never shared across
/// files.
#[derive(Debug, Default)]
pub struct FileContext {
    /// Deduplicating pool for generated text fragments.
    pub interner: Interner,
    /// Import requirements of the current file.
    pub imports: ImportTracker,
    extension: String,
}

impl FileContext {
    /// Creates a fresh context for one file, using the given output file
    /// extension when deriving import paths.
    #[must_use]
    pub fn new(extension: impl Into<String>) -> Self {
        Self {
            interner: Interner::new(),
            imports: ImportTracker::new(),
            extension: extension.into(),
        }
    }

    /// Registers an import of the generated module for `declaring_file`
    /// and returns the module alias to reference it by.
    ///
    /// # Errors
    /// Returns [`CodegenError::ImportConflict`] if two distinct files
    /// derive the same alias.
    pub fn register_import(&mut self, declaring_file: &str) -> Result<String, CodegenError> {
        let alias = imports::module_name(declaring_file);
        let path = output_file_name(declaring_file, &self.extension);
        self.imports.require(&alias, &path)?;
        Ok(alias)
    }
}

/// Derives the generated output file name for a schema file path:
/// base name without its extension, plus the configured extension.
#[must_use]
pub fn output_file_name(schema_path: &str, extension: &str) -> String {
    let stem = Path::new(schema_path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(schema_path);
    format!("{stem}{extension}")
}

/// One generated output document.
#[derive(Debug, Clone)]
pub struct GeneratedFile {
    /// Path of the document, inside the output directory.
    pub path: PathBuf,
    /// Full document contents.
    pub contents: String,
}

/// Shared index document accumulating one re-export per generated
/// declaration across all files of a generation run.
#[derive(Debug, Clone, Default)]
pub struct IndexDoc {
    entries: String,
}

impl IndexDoc {
    /// Creates an empty index document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a re-export of `declaration` from `file`.
    pub fn add(&mut self, declaration: &str, file: &str) {
        imports::emit_index_entry(&mut self.entries, declaration, file);
    }

    /// Whether no entries were added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Finishes the index into a document placed in the output directory.
    #[must_use]
    pub fn into_file(self, opts: &GeneratorOptions) -> GeneratedFile {
        let mut contents = String::from("//! generated by flatzig\n\n");
        contents.push_str(&self.entries);
        GeneratedFile {
            path: opts.output_directory.join("lib.zig"),
            contents,
        }
    }
}

/// Code generator for one schema file.
pub struct Generator<'a> {
    schema: &'a Schema,
    prelude: &'a Prelude,
    opts: &'a GeneratorOptions,
}

impl<'a> Generator<'a> {
    /// Creates a generator over one schema file.
    #[must_use]
    pub fn new(schema: &'a Schema, prelude: &'a Prelude, opts: &'a GeneratorOptions) -> Self {
        Self {
            schema,
            prelude,
            opts,
        }
    }

    /// Generates the source document for this file and appends its
    /// re-exports to the shared index.
    ///
    /// Only declarations whose declaring file matches the prelude's
    /// origin path are emitted; references to the rest resolve through
    /// imports.
    ///
    /// # Errors
    /// Any [`CodegenError`] aborts the file; partial output must be
    /// discarded.
    pub fn generate(&self, index: &mut IndexDoc) -> Result<GeneratedFile, CodegenError> {
        let mut ctx = FileContext::new(self.opts.file_extension.clone());
        let out_name = output_file_name(&self.prelude.bin_path, &self.opts.file_extension);

        let mut body = String::new();
        let enum_emitter = EnumEmitter::new(self.schema);
        let object_emitter = ObjectEmitter::new(self.schema);

        for def in &self.schema.enums {
            if def.declaring_file != self.prelude.bin_path {
                continue;
            }
            tracing::debug!(name = %def.name, file = %out_name, "generating enum");
            body.push_str(&enum_emitter.generate(def, &mut ctx)?);
            for declaration in enum_emitter.declaration_names(def) {
                index.add(&declaration, &out_name);
            }
        }

        for (i, obj) in self.schema.objects.iter().enumerate() {
            if obj.declaring_file != self.prelude.bin_path {
                continue;
            }
            tracing::debug!(name = %obj.name, file = %out_name, "generating object");
            let is_root = self.schema.is_root(i);
            body.push_str(&object_emitter.generate(obj, is_root, &mut ctx)?);
            for declaration in object_emitter.declaration_names(obj) {
                index.add(&declaration, &out_name);
            }
        }

        let mut contents = String::new();
        self.emit_header(&mut contents);
        contents.push_str("const std = @import(\"std\");\n");
        contents.push_str("const flatzig = @import(\"flatzig\");\n");
        ctx.imports.emit(&mut contents);
        contents.push('\n');
        contents.push_str(&body);

        Ok(GeneratedFile {
            path: self.opts.output_directory.join(out_name),
            contents,
        })
    }

    fn emit_header(&self, out: &mut String) {
        out.push_str(&format!(
            "//! generated by flatzig from {}\n",
            self.prelude.bin_path
        ));
        out.push_str(&format!("//! schema: {}\n", self.prelude.name));
        if let Some(ident) = &self.prelude.file_ident {
            out.push_str(&format!("//! file identifier: {ident}\n"));
        }
        out.push('\n');
    }
}
