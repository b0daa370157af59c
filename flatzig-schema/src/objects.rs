//! Object, field and schema definitions.
//!
//! An [`Object`] is either a struct (fixed-size, inline-embedded) or a
//! table (offset-addressed, extensible). Field ids determine the wire
//! vtable slot order, so every consumer iterates fields through
//! [`Object::sorted_fields`] instead of declaration order.

use crate::types::{BaseKind, Enum, TypeDesc};

/// Complete schema for one compilation unit.
///
/// Produced by the schema loader; read-only during generation. Reference
/// kinds in [`TypeDesc`](crate::TypeDesc) index into [`Schema::objects`]
/// and [`Schema::enums`].
#[derive(Debug, Clone, Default)]
pub struct Schema {
    /// Declared objects (structs and tables).
    pub objects: Vec<Object>,
    /// Declared enums and unions.
    pub enums: Vec<Enum>,
    /// Index of the designated root table, if any.
    pub root_table: Option<usize>,
    /// Wire file identifier (4 characters), if declared.
    pub file_ident: Option<String>,
    /// Declared file extension for serialized buffers, if any.
    pub file_ext: Option<String>,
}

impl Schema {
    /// Creates an empty schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the object at the given index, if present.
    #[must_use]
    pub fn object(&self, index: usize) -> Option<&Object> {
        self.objects.get(index)
    }

    /// Returns the enum at the given index, if present.
    #[must_use]
    pub fn enum_def(&self, index: usize) -> Option<&Enum> {
        self.enums.get(index)
    }

    /// Returns true if the object at the given index is the root table.
    #[must_use]
    pub fn is_root(&self, index: usize) -> bool {
        self.root_table == Some(index)
    }
}

/// Declared object: a struct or a table.
#[derive(Debug, Clone)]
pub struct Object {
    /// Object name as declared in the schema.
    pub name: String,
    /// Fields in declaration order. Use [`Object::sorted_fields`] for
    /// wire order.
    pub fields: Vec<Field>,
    /// True for structs (fixed layout, no vtable), false for tables.
    pub is_struct: bool,
    /// Fixed byte size (structs only; zero for tables).
    pub bytesize: u16,
    /// Minimum alignment (structs only; zero for tables).
    pub minalign: u16,
    /// Schema source file this object was declared in.
    pub declaring_file: String,
}

impl Object {
    /// Creates a new table definition.
    #[must_use]
    pub fn table(name: impl Into<String>, declaring_file: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            is_struct: false,
            bytesize: 0,
            minalign: 0,
            declaring_file: declaring_file.into(),
        }
    }

    /// Creates a new struct definition with the given size and alignment.
    #[must_use]
    pub fn strukt(
        name: impl Into<String>,
        declaring_file: impl Into<String>,
        bytesize: u16,
        minalign: u16,
    ) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            is_struct: true,
            bytesize,
            minalign,
            declaring_file: declaring_file.into(),
        }
    }

    /// Adds a field to the object.
    pub fn add_field(&mut self, field: Field) {
        self.fields.push(field);
    }

    /// Returns the fields sorted by ascending id.
    ///
    /// This order is used for both vtable slot emission and struct
    /// in-memory field emission; declaration order is never load-bearing.
    #[must_use]
    pub fn sorted_fields(&self) -> Vec<&Field> {
        let mut fields: Vec<&Field> = self.fields.iter().collect();
        fields.sort_by_key(|f| f.id);
        fields
    }

    /// Returns the number of vtable slots a table instance needs:
    /// one past the highest field id, deprecated and tag fields included.
    #[must_use]
    pub fn slot_count(&self) -> u16 {
        self.fields.iter().map(|f| f.id + 1).max().unwrap_or(0)
    }
}

/// Field belonging to exactly one object.
#[derive(Debug, Clone)]
pub struct Field {
    /// Field name as declared in the schema.
    pub name: String,
    /// Numeric id; determines the wire vtable slot.
    pub id: u16,
    /// Byte offset within the owning struct (structs only).
    pub offset: u16,
    /// Type descriptor.
    pub ty: TypeDesc,
    /// Declared integer default (integer, bool and enum kinds).
    pub default_int: i64,
    /// Declared floating point default (float kinds).
    pub default_real: f64,
    /// True if the field is deprecated; no accessor is emitted and the
    /// field is never written.
    pub deprecated: bool,
    /// Padding bytes to emit before this field (structs only).
    pub padding: u16,
    /// Documentation lines forwarded onto the generated accessor.
    pub documentation: Vec<String>,
}

impl Field {
    /// Creates a field with the given name, id and type.
    #[must_use]
    pub fn new(name: impl Into<String>, id: u16, ty: TypeDesc) -> Self {
        Self {
            name: name.into(),
            id,
            offset: 0,
            ty,
            default_int: 0,
            default_real: 0.0,
            deprecated: false,
            padding: 0,
            documentation: Vec::new(),
        }
    }

    /// Returns a copy with the struct byte offset set.
    #[must_use]
    pub fn at_offset(mut self, offset: u16) -> Self {
        self.offset = offset;
        self
    }

    /// Returns a copy with the integer default set.
    #[must_use]
    pub fn with_default_int(mut self, default: i64) -> Self {
        self.default_int = default;
        self
    }

    /// Returns a copy with the floating point default set.
    #[must_use]
    pub fn with_default_real(mut self, default: f64) -> Self {
        self.default_real = default;
        self
    }

    /// Returns a copy with the struct padding set.
    #[must_use]
    pub fn with_padding(mut self, padding: u16) -> Self {
        self.padding = padding;
        self
    }

    /// Returns true if this is the implicit union-tag field.
    ///
    /// Tag fields follow the `{union_field}_type` naming convention and
    /// are suppressed from every user-visible enumeration; the tag is
    /// regenerated implicitly at pack time from the sibling union value.
    #[must_use]
    pub const fn is_implicit_tag(&self) -> bool {
        matches!(self.ty.kind, BaseKind::UType(_))
    }
}

/// Per-file generation metadata.
///
/// Used only for header comments and root-type detection; carries no
/// structural invariants.
#[derive(Debug, Clone, Default)]
pub struct Prelude {
    /// Path of the originating schema binary.
    pub bin_path: String,
    /// Logical schema name.
    pub name: String,
    /// Wire file identifier, if declared.
    pub file_ident: Option<String>,
    /// Declared root type name, if any.
    pub root_type_name: Option<String>,
}

impl Prelude {
    /// Creates a prelude with the given origin path and logical name.
    #[must_use]
    pub fn new(bin_path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            bin_path: bin_path.into(),
            name: name.into(),
            file_ident: None,
            root_type_name: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(name: &str, id: u16) -> Field {
        Field::new(name, id, TypeDesc::new(BaseKind::I32))
    }

    #[test]
    fn test_sorted_fields_ignores_declaration_order() {
        let mut obj = Object::table("Scrambled", "test.fbs");
        obj.add_field(field("c", 2));
        obj.add_field(field("a", 0));
        obj.add_field(field("b", 1));

        let ids: Vec<u16> = obj.sorted_fields().iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn test_sorted_fields_is_stable() {
        let mut obj = Object::table("Dup", "test.fbs");
        obj.add_field(field("first", 1));
        obj.add_field(field("second", 1));

        let names: Vec<&str> = obj.sorted_fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[test]
    fn test_slot_count() {
        let mut obj = Object::table("T", "test.fbs");
        assert_eq!(obj.slot_count(), 0);

        obj.add_field(field("a", 0));
        obj.add_field(field("gap", 4));
        assert_eq!(obj.slot_count(), 5);
    }

    #[test]
    fn test_implicit_tag_predicate() {
        let tag = Field::new("weapon_type", 0, TypeDesc::new(BaseKind::UType(0)));
        assert!(tag.is_implicit_tag());

        let value = Field::new("weapon", 1, TypeDesc::new(BaseKind::Union(0)));
        assert!(!value.is_implicit_tag());
    }

    #[test]
    fn test_schema_lookup() {
        let mut schema = Schema::new();
        schema.objects.push(Object::table("Monster", "monster.fbs"));
        schema.root_table = Some(0);

        assert!(schema.object(0).is_some());
        assert!(schema.object(1).is_none());
        assert!(schema.is_root(0));
        assert!(!schema.is_root(1));
    }

    #[test]
    fn test_struct_definition() {
        let mut vec3 = Object::strukt("Vec3", "math.fbs", 12, 4);
        vec3.add_field(field("x", 0).at_offset(0));
        vec3.add_field(field("y", 1).at_offset(4));
        vec3.add_field(field("z", 2).at_offset(8));

        assert!(vec3.is_struct);
        assert_eq!(vec3.bytesize, 12);
        assert_eq!(vec3.minalign, 4);
        assert_eq!(vec3.sorted_fields()[2].offset, 8);
    }
}
