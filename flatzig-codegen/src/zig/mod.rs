//! Zig code generation modules.

pub mod enums;
pub mod objects;
pub mod pack;

pub use enums::EnumEmitter;
pub use objects::ObjectEmitter;
pub use pack::PackEmitter;

use flatzig_schema::Field;

/// Returns the vtable byte offset for a field id.
///
/// The vtable starts with two metadata entries (vtable size, table
/// size), so slot `id` lives at byte `4 + 2 * id`.
#[must_use]
pub const fn voffset(id: u16) -> u16 {
    4 + 2 * id
}

/// Appends the field's documentation lines as `///` comments at the
/// given indentation.
pub fn emit_doc_lines(out: &mut String, field: &Field, indent: &str) {
    for line in &field.documentation {
        out.push_str(&format!("{indent}/// {line}\n"));
    }
}
