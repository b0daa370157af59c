//! Cross-file import tracking and index re-exports.
//!
//! Each generated file references other generated files through a module
//! alias derived from the referenced schema file's base name. The tracker
//! records which aliases the current file needs and flushes one import
//! statement per distinct alias; it also appends re-export entries to the
//! shared per-directory index document.

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::CodegenError;
use crate::name;

/// Derives a module alias from a schema file path.
///
/// Pure function of the path: the base name without its extension,
/// converted to a snake-case identifier. Safe to recompute redundantly
/// across parallel per-file generation passes.
#[must_use]
pub fn module_name(path: &str) -> String {
    let stem = Path::new(path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(path);
    name::escape_if_reserved(&name::to_snake_case(stem))
}

/// Records the import requirements of one generated file.
///
/// Exclusively owned by one file's generation context; constructed at the
/// start of the pass and discarded at its end.
#[derive(Debug, Clone, Default)]
pub struct ImportTracker {
    /// Alias to module path, kept sorted for deterministic emission.
    imports: BTreeMap<String, String>,
}

impl ImportTracker {
    /// Creates an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers that the current file imports `path` under `alias`.
    ///
    /// Re-registering the identical alias/path pair is a no-op.
    ///
    /// # Errors
    /// Returns [`CodegenError::ImportConflict`] if the alias is already
    /// registered for a different path.
    pub fn require(&mut self, alias: &str, path: &str) -> Result<(), CodegenError> {
        match self.imports.get(alias) {
            Some(existing) if existing == path => Ok(()),
            Some(existing) => Err(CodegenError::ImportConflict {
                alias: alias.to_string(),
                existing: existing.clone(),
                conflicting: path.to_string(),
            }),
            None => {
                self.imports.insert(alias.to_string(), path.to_string());
                Ok(())
            }
        }
    }

    /// Number of distinct registered aliases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.imports.len()
    }

    /// Whether no imports were registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.imports.is_empty()
    }

    /// Flushes one import statement per distinct alias.
    pub fn emit(&self, out: &mut String) {
        for (alias, path) in &self.imports {
            out.push_str(&format!("const {alias} = @import(\"{path}\");\n"));
        }
    }
}

/// Appends a re-export of `declaration` from `file` to the shared index
/// document, so consumers can reference every generated type through one
/// central entry point.
pub fn emit_index_entry(out: &mut String, declaration: &str, file: &str) {
    out.push_str(&format!(
        "pub const {declaration} = @import(\"{file}\").{declaration};\n"
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_name_from_path() {
        assert_eq!(module_name("schemas/monster.fbs"), "monster");
        assert_eq!(module_name("weapon_data.fbs"), "weapon_data");
        assert_eq!(module_name("HitBox.fbs"), "hit_box");
    }

    #[test]
    fn test_module_name_escapes_reserved() {
        assert_eq!(module_name("test.fbs"), "@\"test\"");
    }

    #[test]
    fn test_require_is_idempotent() {
        let mut tracker = ImportTracker::new();
        tracker.require("monster", "monster.fb.zig").unwrap();
        tracker.require("monster", "monster.fb.zig").unwrap();
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn test_require_detects_conflicts() {
        let mut tracker = ImportTracker::new();
        tracker.require("monster", "a/monster.fb.zig").unwrap();

        let err = tracker.require("monster", "b/monster.fb.zig").unwrap_err();
        assert!(matches!(err, CodegenError::ImportConflict { .. }));
    }

    #[test]
    fn test_emit_is_sorted_and_formatted() {
        let mut tracker = ImportTracker::new();
        tracker.require("weapon", "weapon.fb.zig").unwrap();
        tracker.require("monster", "monster.fb.zig").unwrap();

        let mut out = String::new();
        tracker.emit(&mut out);
        assert_eq!(
            out,
            "const monster = @import(\"monster.fb.zig\");\n\
             const weapon = @import(\"weapon.fb.zig\");\n"
        );
    }

    #[test]
    fn test_index_entry_format() {
        let mut out = String::new();
        emit_index_entry(&mut out, "Monster", "monster.fb.zig");
        emit_index_entry(&mut out, "PackedMonster", "monster.fb.zig");
        assert!(out.contains("pub const Monster = @import(\"monster.fb.zig\").Monster;\n"));
        assert!(out.contains("pub const PackedMonster = @import(\"monster.fb.zig\").PackedMonster;\n"));
    }
}
