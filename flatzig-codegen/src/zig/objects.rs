//! Object declaration emission: packed accessor and unpacked value forms.
//!
//! Every object produces a pair of declarations over the same id-ordered
//! field sequence: the packed form wraps raw wire bytes behind per-field
//! accessors (vtable-indirect for tables, fixed-offset for structs), the
//! unpacked form is a plain aggregate built by calling each accessor.
//! Deprecated fields and implicit union-tag fields are filtered at every
//! enumeration site.

use flatzig_schema::{BaseKind, Field, Object, Schema, TypeDesc};

use crate::error::CodegenError;
use crate::generator::FileContext;
use crate::name;
use crate::resolve::{self, TypeResolver};
use crate::zig::pack::PackEmitter;
use crate::zig::{emit_doc_lines, voffset};

/// Emitter for packed/unpacked object declaration pairs.
pub struct ObjectEmitter<'a> {
    schema: &'a Schema,
    resolver: TypeResolver<'a>,
}

impl<'a> ObjectEmitter<'a> {
    /// Creates an emitter over the given schema.
    #[must_use]
    pub fn new(schema: &'a Schema) -> Self {
        Self {
            schema,
            resolver: TypeResolver::new(schema),
        }
    }

    /// Returns the top-level declaration names this object produces.
    #[must_use]
    pub fn declaration_names(&self, obj: &Object) -> Vec<String> {
        vec![
            name::type_name(&obj.name, true),
            name::type_name(&obj.name, false),
        ]
    }

    /// Generates the packed and unpacked declarations for one object.
    ///
    /// # Errors
    /// Any resolution failure aborts the file's generation.
    pub fn generate(
        &self,
        obj: &Object,
        is_root: bool,
        ctx: &mut FileContext,
    ) -> Result<String, CodegenError> {
        let mut out = self.packed_decl(obj, is_root, ctx)?;
        out.push_str(&self.unpacked_decl(obj, ctx)?);
        Ok(out)
    }

    /// Fields visible to accessors and the unpacked aggregate: id order,
    /// deprecated and implicit-tag fields dropped.
    fn visible_fields(obj: &Object) -> Vec<&Field> {
        obj.sorted_fields()
            .into_iter()
            .filter(|f| !f.deprecated && !f.is_implicit_tag())
            .collect()
    }

    // ----- packed (wire-accessor) form -----

    fn packed_decl(
        &self,
        obj: &Object,
        is_root: bool,
        ctx: &mut FileContext,
    ) -> Result<String, CodegenError> {
        let packed_name = name::type_name(&obj.name, true);

        let mut out = String::new();
        out.push_str(&format!("pub const {packed_name} = struct {{\n"));
        out.push_str("    table: flatzig.Table,\n\n");

        out.push_str(&format!(
            "    pub fn init(bytes: []u8, pos: u32) {packed_name} {{\n"
        ));
        out.push_str("        return .{ .table = flatzig.Table.init(bytes, pos) };\n");
        out.push_str("    }\n");

        if is_root {
            // Root entry point: skips the leading size prefix.
            out.push_str(&format!(
                "\n    pub fn initRoot(size_prefixed_bytes: []u8) flatzig.Error!{packed_name} {{\n"
            ));
            out.push_str(
                "        return .{ .table = try flatzig.Table.initRoot(size_prefixed_bytes) };\n",
            );
            out.push_str("    }\n");

            if let Some(ident) = &self.schema.file_ident {
                out.push_str(&format!(
                    "\n    pub fn verifyFileIdent(self: {packed_name}) bool {{\n"
                ));
                out.push_str(&format!(
                    "        return self.table.hasFileIdent(\"{ident}\");\n"
                ));
                out.push_str("    }\n");
            }
        }

        for field in Self::visible_fields(obj) {
            out.push('\n');
            if obj.is_struct {
                out.push_str(&self.struct_accessor(obj, field, ctx)?);
            } else {
                out.push_str(&self.table_accessor(obj, field, ctx)?);
            }
        }

        out.push_str("};\n\n");
        Ok(out)
    }

    /// Table accessors: vtable-indirect lookup, slot 0 means absent.
    fn table_accessor(
        &self,
        obj: &Object,
        field: &Field,
        ctx: &mut FileContext,
    ) -> Result<String, CodegenError> {
        let packed_name = name::type_name(&obj.name, true);
        let fn_name = name::function_name(&field.name);
        let vo = voffset(field.id);

        let mut out = String::new();
        emit_doc_lines(&mut out, field, "    ");

        match field.ty.kind {
            kind if kind.is_scalar() => {
                let zig = kind.zig_name().expect("scalar kind");
                if field.ty.optional {
                    out.push_str(&format!(
                        "    pub fn {fn_name}(self: {packed_name}) ?{zig} {{\n"
                    ));
                    out.push_str(&format!(
                        "        return self.table.readField({zig}, {vo});\n"
                    ));
                } else {
                    let default = resolve::default_value(field)?;
                    out.push_str(&format!(
                        "    pub fn {fn_name}(self: {packed_name}) {zig} {{\n"
                    ));
                    out.push_str(&format!(
                        "        return self.table.readFieldWithDefault({zig}, {vo}, {default});\n"
                    ));
                }
                out.push_str("    }\n");
                out.push_str(&self.table_mutator(obj, field, zig, false));
            }
            BaseKind::Enum(index) => {
                let zig = self.underlying_zig(index)?;
                let enum_ty = self.resolve_str(&field.ty.clone().with_optional(false), ctx)?;
                if field.ty.optional {
                    out.push_str(&format!(
                        "    pub fn {fn_name}(self: {packed_name}) ?{enum_ty} {{\n"
                    ));
                    out.push_str(&format!(
                        "        return if (self.table.readField({zig}, {vo})) |v| @enumFromInt(v) else null;\n"
                    ));
                } else {
                    out.push_str(&format!(
                        "    pub fn {fn_name}(self: {packed_name}) {enum_ty} {{\n"
                    ));
                    out.push_str(&format!(
                        "        return @enumFromInt(self.table.readFieldWithDefault({zig}, {vo}, {}));\n",
                        field.default_int
                    ));
                }
                out.push_str("    }\n");
                out.push_str(&self.table_mutator(obj, field, zig, true));
            }
            BaseKind::Str => {
                // Absent string decodes to "".
                out.push_str(&format!(
                    "    pub fn {fn_name}(self: {packed_name}) []const u8 {{\n"
                ));
                out.push_str(&format!("        return self.table.byteVector({vo});\n"));
                out.push_str("    }\n");
            }
            BaseKind::Vector => {
                let elem = self.vector_element(field, true, ctx)?;
                out.push_str(&format!(
                    "    pub fn {fn_name}(self: {packed_name}) []align(1) const {elem} {{\n"
                ));
                out.push_str(&format!(
                    "        return self.table.vector({elem}, {vo});\n"
                ));
                out.push_str("    }\n");
            }
            BaseKind::Obj(_) => {
                let packed_ty = self.resolve_str(
                    &field.ty.clone().with_packed(true).with_optional(false),
                    ctx,
                )?;
                out.push_str(&format!(
                    "    pub fn {fn_name}(self: {packed_name}) ?{packed_ty} {{\n"
                ));
                out.push_str(&format!(
                    "        const t = self.table.readObjectField({vo}) orelse return null;\n"
                ));
                out.push_str("        return .{ .table = t };\n");
                out.push_str("    }\n");
            }
            BaseKind::Union(_) => {
                let packed_ty = self.resolve_str(
                    &field.ty.clone().with_packed(true).with_optional(false),
                    ctx,
                )?;
                // The tag lives in the sibling implicit-tag field's slot.
                let tag_field = obj
                    .fields
                    .iter()
                    .find(|f| f.is_implicit_tag() && f.id + 1 == field.id)
                    .ok_or_else(|| {
                        CodegenError::generation(format!(
                            "union field '{}' has no sibling tag field",
                            field.name
                        ))
                    })?;
                let tag_vo = voffset(tag_field.id);
                out.push_str(&format!(
                    "    pub fn {fn_name}(self: {packed_name}) ?{packed_ty} {{\n"
                ));
                out.push_str(&format!(
                    "        const u = self.table.readUnionField({tag_vo}, {vo}) orelse return null;\n"
                ));
                out.push_str(&format!(
                    "        return {packed_ty}.init(@enumFromInt(u.tag), u.table);\n"
                ));
                out.push_str("    }\n");
            }
            _ => {
                return Err(CodegenError::generation(format!(
                    "unsupported table field kind {} for '{}'",
                    field.ty.kind.describe(),
                    field.name
                )));
            }
        }
        Ok(out)
    }

    /// Scalar/enum mutator through the vtable slot; fails (false) when
    /// the slot is absent.
    fn table_mutator(&self, obj: &Object, field: &Field, zig: &str, is_enum: bool) -> String {
        let packed_name = name::type_name(&obj.name, true);
        let set_name = name::function_name(&format!("set_{}", field.name));
        let vo = voffset(field.id);

        let mut out = String::new();
        if is_enum {
            out.push_str(&format!(
                "\n    pub fn {set_name}(self: {packed_name}, value: anytype) bool {{\n"
            ));
            out.push_str(&format!(
                "        return self.table.mutateField({zig}, {vo}, @intFromEnum(value));\n"
            ));
        } else {
            out.push_str(&format!(
                "\n    pub fn {set_name}(self: {packed_name}, value: {zig}) bool {{\n"
            ));
            out.push_str(&format!(
                "        return self.table.mutateField({zig}, {vo}, value);\n"
            ));
        }
        out.push_str("    }\n");
        out
    }

    /// Struct accessors: direct fixed-offset reads, no presence check.
    fn struct_accessor(
        &self,
        obj: &Object,
        field: &Field,
        ctx: &mut FileContext,
    ) -> Result<String, CodegenError> {
        let packed_name = name::type_name(&obj.name, true);
        let fn_name = name::function_name(&field.name);
        let offset = field.offset;

        let mut out = String::new();
        emit_doc_lines(&mut out, field, "    ");

        match field.ty.kind {
            kind if kind.is_scalar() => {
                let zig = kind.zig_name().expect("scalar kind");
                out.push_str(&format!(
                    "    pub fn {fn_name}(self: {packed_name}) {zig} {{\n"
                ));
                out.push_str(&format!(
                    "        return self.table.read({zig}, self.table.pos + {offset});\n"
                ));
                out.push_str("    }\n");

                let set_name = name::function_name(&format!("set_{}", field.name));
                out.push_str(&format!(
                    "\n    pub fn {set_name}(self: {packed_name}, value: {zig}) void {{\n"
                ));
                out.push_str(&format!(
                    "        self.table.mutate({zig}, self.table.pos + {offset}, value);\n"
                ));
                out.push_str("    }\n");
            }
            BaseKind::Enum(index) => {
                let zig = self.underlying_zig(index)?;
                let enum_ty = self.resolve_str(&field.ty.clone().with_optional(false), ctx)?;
                out.push_str(&format!(
                    "    pub fn {fn_name}(self: {packed_name}) {enum_ty} {{\n"
                ));
                out.push_str(&format!(
                    "        return @enumFromInt(self.table.read({zig}, self.table.pos + {offset}));\n"
                ));
                out.push_str("    }\n");

                let set_name = name::function_name(&format!("set_{}", field.name));
                out.push_str(&format!(
                    "\n    pub fn {set_name}(self: {packed_name}, value: {enum_ty}) void {{\n"
                ));
                out.push_str(&format!(
                    "        self.table.mutate({zig}, self.table.pos + {offset}, @intFromEnum(value));\n"
                ));
                out.push_str("    }\n");
            }
            BaseKind::Obj(_) => {
                // Nested structs are embedded inline.
                let packed_ty = self.resolve_str(
                    &field.ty.clone().with_packed(true).with_optional(false),
                    ctx,
                )?;
                out.push_str(&format!(
                    "    pub fn {fn_name}(self: {packed_name}) {packed_ty} {{\n"
                ));
                out.push_str(&format!(
                    "        return .{{ .table = self.table.at(self.table.pos + {offset}) }};\n"
                ));
                out.push_str("    }\n");
            }
            BaseKind::Array(len) => {
                let elem = field.ty.inherited_element().ok_or_else(|| {
                    CodegenError::generation(format!(
                        "array field '{}' without element type",
                        field.name
                    ))
                })?;
                if elem.kind.is_scalar() {
                    let zig = elem.kind.zig_name().expect("scalar kind");
                    out.push_str(&format!(
                        "    pub fn {fn_name}(self: {packed_name}) [{len}]{zig} {{\n"
                    ));
                    out.push_str(&format!(
                        "        return self.table.readArray({zig}, {len}, self.table.pos + {offset});\n"
                    ));
                } else {
                    // Non-scalar elements come back as a read-only view
                    // slice over the inline bytes.
                    let elem_ty = self.resolve_str(&elem.with_packed(true), ctx)?;
                    out.push_str(&format!(
                        "    pub fn {fn_name}(self: {packed_name}) []align(1) const {elem_ty} {{\n"
                    ));
                    out.push_str(&format!(
                        "        return self.table.viewArray({elem_ty}, {len}, self.table.pos + {offset});\n"
                    ));
                }
                out.push_str("    }\n");
            }
            _ => {
                return Err(CodegenError::generation(format!(
                    "unsupported struct field kind {} for '{}'",
                    field.ty.kind.describe(),
                    field.name
                )));
            }
        }
        Ok(out)
    }

    // ----- unpacked (value) form -----

    fn unpacked_decl(&self, obj: &Object, ctx: &mut FileContext) -> Result<String, CodegenError> {
        let packed_name = name::type_name(&obj.name, true);
        let unpacked_name = name::type_name(&obj.name, false);
        let fields = Self::visible_fields(obj);

        let mut out = String::new();
        out.push_str(&format!("pub const {unpacked_name} = struct {{\n"));

        for field in &fields {
            emit_doc_lines(&mut out, field, "    ");
            out.push_str(&self.unpacked_field(obj, field, ctx)?);
        }
        if !fields.is_empty() {
            out.push('\n');
        }

        // Conversion from the packed view is the construction path.
        out.push_str(&format!(
            "    pub fn init(packed_value: {packed_name}) {unpacked_name} {{\n"
        ));
        if fields.is_empty() {
            out.push_str("        _ = packed_value;\n");
            out.push_str("        return .{};\n");
        } else {
            out.push_str("        return .{\n");
            for field in &fields {
                out.push_str(&self.init_assignment(obj, field, ctx)?);
            }
            out.push_str("        };\n");
        }
        out.push_str("    }\n\n");

        let pack_emitter = PackEmitter::new(self.schema);
        out.push_str(&pack_emitter.generate(obj, ctx)?);

        out.push_str("};\n\n");
        Ok(out)
    }

    /// One unpacked aggregate field with its declared default.
    fn unpacked_field(
        &self,
        obj: &Object,
        field: &Field,
        ctx: &mut FileContext,
    ) -> Result<String, CodegenError> {
        let f_name = name::field_name(&field.name);

        let decl = match field.ty.kind {
            kind if kind.is_scalar() => {
                let zig = kind.zig_name().expect("scalar kind");
                if field.ty.optional {
                    format!("    {f_name}: ?{zig} = null,\n")
                } else {
                    let default = resolve::default_value(field)?;
                    format!("    {f_name}: {zig} = {default},\n")
                }
            }
            BaseKind::Enum(_) => {
                let enum_ty = self.resolve_str(&field.ty.clone().with_optional(false), ctx)?;
                if field.ty.optional {
                    format!("    {f_name}: ?{enum_ty} = null,\n")
                } else {
                    let default = resolve::default_value(field)?;
                    format!("    {f_name}: {enum_ty} = {default},\n")
                }
            }
            BaseKind::Str => format!("    {f_name}: []const u8 = \"\",\n"),
            BaseKind::Vector => {
                let elem = self.vector_element(field, true, ctx)?;
                format!("    {f_name}: []align(1) const {elem} = &.{{}},\n")
            }
            BaseKind::Obj(_) => {
                let unpacked_ty = self.resolve_str(
                    &field.ty.clone().with_packed(false).with_optional(false),
                    ctx,
                )?;
                if obj.is_struct {
                    format!("    {f_name}: {unpacked_ty},\n")
                } else {
                    format!("    {f_name}: ?{unpacked_ty} = null,\n")
                }
            }
            BaseKind::Union(_) => {
                let unpacked_ty = self.resolve_str(
                    &field.ty.clone().with_packed(false).with_optional(false),
                    ctx,
                )?;
                format!("    {f_name}: {unpacked_ty} = .none,\n")
            }
            BaseKind::Array(len) => {
                let elem = field.ty.inherited_element().ok_or_else(|| {
                    CodegenError::generation(format!(
                        "array field '{}' without element type",
                        field.name
                    ))
                })?;
                if elem.kind.is_scalar() {
                    let zig = elem.kind.zig_name().expect("scalar kind");
                    format!("    {f_name}: [{len}]{zig},\n")
                } else {
                    let elem_ty = self.resolve_str(&elem.with_packed(true), ctx)?;
                    format!("    {f_name}: []align(1) const {elem_ty} = &.{{}},\n")
                }
            }
            _ => {
                return Err(CodegenError::generation(format!(
                    "unsupported field kind {} for '{}'",
                    field.ty.kind.describe(),
                    field.name
                )));
            }
        };
        Ok(decl)
    }

    /// One assignment inside the packed-to-unpacked conversion.
    fn init_assignment(
        &self,
        obj: &Object,
        field: &Field,
        ctx: &mut FileContext,
    ) -> Result<String, CodegenError> {
        let f_name = name::field_name(&field.name);
        let fn_name = name::function_name(&field.name);

        let line = match field.ty.kind {
            BaseKind::Obj(_) => {
                let unpacked_ty = self.resolve_str(
                    &field.ty.clone().with_packed(false).with_optional(false),
                    ctx,
                )?;
                if obj.is_struct {
                    format!(
                        "            .{f_name} = {unpacked_ty}.init(packed_value.{fn_name}()),\n"
                    )
                } else {
                    format!(
                        "            .{f_name} = if (packed_value.{fn_name}()) |v| {unpacked_ty}.init(v) else null,\n"
                    )
                }
            }
            BaseKind::Union(_) => {
                let unpacked_ty = self.resolve_str(
                    &field.ty.clone().with_packed(false).with_optional(false),
                    ctx,
                )?;
                format!(
                    "            .{f_name} = if (packed_value.{fn_name}()) |v| {unpacked_ty}.init(v) else .none,\n"
                )
            }
            _ => format!("            .{f_name} = packed_value.{fn_name}(),\n"),
        };
        Ok(line)
    }

    // ----- shared helpers -----

    fn vector_element(
        &self,
        field: &Field,
        packed: bool,
        ctx: &mut FileContext,
    ) -> Result<String, CodegenError> {
        let elem = field.ty.inherited_element().ok_or_else(|| {
            CodegenError::generation(format!(
                "vector field '{}' without element type",
                field.name
            ))
        })?;
        self.resolve_str(&elem.with_packed(packed), ctx)
    }

    fn underlying_zig(&self, index: usize) -> Result<&'static str, CodegenError> {
        let underlying = self.resolver.underlying_of(index)?;
        underlying.zig_name().ok_or_else(|| {
            CodegenError::generation("enum underlying kind is not an integer".to_string())
        })
    }

    fn resolve_str(&self, ty: &TypeDesc, ctx: &mut FileContext) -> Result<String, CodegenError> {
        let sym = self.resolver.resolve(ty, ctx)?;
        Ok(ctx.interner.resolve(sym).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flatzig_schema::{Enum, EnumVal};

    /// Table with fields declared out of id order, covering every table
    /// field kind.
    fn monster_schema() -> Schema {
        let mut schema = Schema::new();

        let mut vec3 = Object::strukt("Vec3", "monster.fbs", 12, 4);
        vec3.add_field(Field::new("x", 0, TypeDesc::new(BaseKind::F32)).at_offset(0));
        vec3.add_field(Field::new("y", 1, TypeDesc::new(BaseKind::F32)).at_offset(4));
        vec3.add_field(Field::new("z", 2, TypeDesc::new(BaseKind::F32)).at_offset(8));

        let mut weapon = Enum::new("Weapon", BaseKind::U8, "monster.fbs");
        weapon.is_union = true;
        weapon.add_value(EnumVal::new("NONE", 0));
        weapon.add_value(EnumVal::with_payload(
            "Sword",
            1,
            TypeDesc::new(BaseKind::Obj(2)),
        ));

        let mut monster = Object::table("Monster", "monster.fbs");
        // Declared out of id order on purpose.
        monster.add_field(Field::new("name", 3, TypeDesc::new(BaseKind::Str)));
        monster.add_field(
            Field::new("hp", 0, TypeDesc::new(BaseKind::I16)).with_default_int(100),
        );
        monster.add_field(Field::new(
            "mana",
            1,
            TypeDesc::new(BaseKind::I16).with_optional(true),
        ));
        monster.add_field(Field::new(
            "inventory",
            2,
            TypeDesc::vector(TypeDesc::new(BaseKind::U8)),
        ));
        monster.add_field(Field::new("pos", 4, TypeDesc::new(BaseKind::Obj(1))));
        monster.add_field(Field::new(
            "equipped_type",
            5,
            TypeDesc::new(BaseKind::UType(0)),
        ));
        monster.add_field(Field::new("equipped", 6, TypeDesc::new(BaseKind::Union(0))));

        let mut sword = Object::table("Sword", "monster.fbs");
        sword.add_field(
            Field::new("damage", 0, TypeDesc::new(BaseKind::I32)).with_default_int(10),
        );

        schema.objects.push(monster);
        schema.objects.push(vec3);
        schema.objects.push(sword);
        schema.enums.push(weapon);
        schema.root_table = Some(0);
        schema.file_ident = Some("MONS".to_string());
        schema
    }

    fn generate_monster() -> String {
        let schema = monster_schema();
        let emitter = ObjectEmitter::new(&schema);
        let mut ctx = FileContext::new(".fb.zig");
        emitter
            .generate(&schema.objects[0], true, &mut ctx)
            .expect("generate")
    }

    #[test]
    fn test_accessor_order_follows_ids() {
        let out = generate_monster();

        // Voffsets in the packed decl must be monotonically increasing
        // even though fields were declared out of order.
        let packed = &out[..out.find("pub const Monster").unwrap()];
        let mut offsets = Vec::new();
        for token in ["readFieldWithDefault(i16, ", "readField(i16, ", "vector(u8, ", "byteVector("] {
            let mut start = 0;
            while let Some(found) = packed[start..].find(token) {
                let rest = &packed[start + found + token.len()..];
                let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
                offsets.push((start + found, digits.parse::<u32>().unwrap()));
                start += found + token.len();
            }
        }
        offsets.sort_by_key(|(pos, _)| *pos);
        let values: Vec<u32> = offsets.iter().map(|(_, v)| *v).collect();
        let mut sorted = values.clone();
        sorted.sort_unstable();
        assert_eq!(values, sorted);
        assert_eq!(values.first(), Some(&4));
    }

    #[test]
    fn test_scalar_accessor_and_mutator() {
        let out = generate_monster();
        assert!(out.contains("pub fn hp(self: PackedMonster) i16 {"));
        assert!(out.contains("return self.table.readFieldWithDefault(i16, 4, 100);"));
        assert!(out.contains("pub fn setHp(self: PackedMonster, value: i16) bool {"));
        assert!(out.contains("return self.table.mutateField(i16, 4, value);"));
    }

    #[test]
    fn test_optional_scalar_accessor() {
        let out = generate_monster();
        assert!(out.contains("pub fn mana(self: PackedMonster) ?i16 {"));
        assert!(out.contains("return self.table.readField(i16, 6);"));
    }

    #[test]
    fn test_string_and_vector_accessors() {
        let out = generate_monster();
        assert!(out.contains("pub fn name(self: PackedMonster) []const u8 {"));
        assert!(out.contains("return self.table.byteVector(10);"));
        assert!(out.contains("pub fn inventory(self: PackedMonster) []align(1) const u8 {"));
        assert!(out.contains("return self.table.vector(u8, 8);"));
    }

    #[test]
    fn test_object_accessor_is_indirect_and_optional() {
        let out = generate_monster();
        assert!(out.contains("pub fn pos(self: PackedMonster) ?monster.PackedVec3 {"));
        assert!(out.contains("const t = self.table.readObjectField(12) orelse return null;"));
    }

    #[test]
    fn test_union_accessor_dispatches_by_tag() {
        let out = generate_monster();
        assert!(out.contains("pub fn equipped(self: PackedMonster) ?monster.PackedWeapon {"));
        // Tag slot at id 5, value slot at id 6.
        assert!(out.contains("const u = self.table.readUnionField(14, 16) orelse return null;"));
        assert!(out.contains("return monster.PackedWeapon.init(@enumFromInt(u.tag), u.table);"));
    }

    #[test]
    fn test_union_without_tag_sibling_is_an_error() {
        let mut schema = monster_schema();
        // A union at id 0 cannot have a lower-id tag sibling; the model
        // can represent it, so generation must reject it instead of
        // panicking.
        let mut broken = Object::table("Broken", "monster.fbs");
        broken.add_field(Field::new("equipped", 0, TypeDesc::new(BaseKind::Union(0))));
        schema.objects.push(broken);

        let emitter = ObjectEmitter::new(&schema);
        let mut ctx = FileContext::new(".fb.zig");
        let err = emitter
            .generate(&schema.objects[3], false, &mut ctx)
            .unwrap_err();
        assert!(matches!(err, CodegenError::Generation { .. }));
    }

    #[test]
    fn test_implicit_tag_field_is_suppressed() {
        let out = generate_monster();
        // No accessor and no unpacked aggregate field for the tag.
        assert!(!out.contains("equippedType"));
        assert!(!out.contains("equipped_type:"));
    }

    #[test]
    fn test_root_initializer_and_file_ident() {
        let out = generate_monster();
        assert!(out.contains(
            "pub fn initRoot(size_prefixed_bytes: []u8) flatzig.Error!PackedMonster {"
        ));
        assert!(out.contains("return self.table.hasFileIdent(\"MONS\");"));
    }

    #[test]
    fn test_non_root_has_no_root_initializer() {
        let schema = monster_schema();
        let emitter = ObjectEmitter::new(&schema);
        let mut ctx = FileContext::new(".fb.zig");
        let out = emitter
            .generate(&schema.objects[2], false, &mut ctx)
            .expect("generate");
        assert!(!out.contains("initRoot"));
    }

    #[test]
    fn test_struct_accessors_use_fixed_offsets() {
        let schema = monster_schema();
        let emitter = ObjectEmitter::new(&schema);
        let mut ctx = FileContext::new(".fb.zig");
        let out = emitter
            .generate(&schema.objects[1], false, &mut ctx)
            .expect("generate");

        assert!(out.contains("pub fn x(self: PackedVec3) f32 {"));
        assert!(out.contains("return self.table.read(f32, self.table.pos + 0);"));
        assert!(out.contains("return self.table.read(f32, self.table.pos + 8);"));
        // No vtable lookups anywhere in a struct accessor.
        assert!(!out.contains("readField"));
        // In-place mutator.
        assert!(out.contains("pub fn setX(self: PackedVec3, value: f32) void {"));
        assert!(out.contains("self.table.mutate(f32, self.table.pos + 0, value);"));
    }

    #[test]
    fn test_unpacked_defaults() {
        let out = generate_monster();
        assert!(out.contains("hp: i16 = 100,"));
        assert!(out.contains("mana: ?i16 = null,"));
        assert!(out.contains("name: []const u8 = \"\","));
        assert!(out.contains("inventory: []align(1) const u8 = &.{},"));
        assert!(out.contains("pos: ?monster.Vec3 = null,"));
        assert!(out.contains("equipped: monster.Weapon = .none,"));
    }

    #[test]
    fn test_conversion_calls_every_accessor() {
        let out = generate_monster();
        assert!(out.contains(".hp = packed_value.hp(),"));
        assert!(out.contains(".mana = packed_value.mana(),"));
        assert!(out.contains(".name = packed_value.name(),"));
        assert!(out.contains(".inventory = packed_value.inventory(),"));
        assert!(out.contains(
            ".pos = if (packed_value.pos()) |v| monster.Vec3.init(v) else null,"
        ));
        assert!(out.contains(
            ".equipped = if (packed_value.equipped()) |v| monster.Weapon.init(v) else .none,"
        ));
    }

    #[test]
    fn test_fixed_array_accessor() {
        let mut schema = Schema::new();
        let mut transform = Object::strukt("Transform", "math.fbs", 64, 4);
        transform.add_field(Field::new(
            "mat",
            0,
            TypeDesc::array(16, TypeDesc::new(BaseKind::F32)),
        ));
        schema.objects.push(transform);

        let emitter = ObjectEmitter::new(&schema);
        let mut ctx = FileContext::new(".fb.zig");
        let out = emitter
            .generate(&schema.objects[0], false, &mut ctx)
            .expect("generate");

        assert!(out.contains("pub fn mat(self: PackedTransform) [16]f32 {"));
        assert!(out.contains("return self.table.readArray(f32, 16, self.table.pos + 0);"));
        assert!(out.contains("mat: [16]f32,"));
    }

    #[test]
    fn test_reserved_field_name_is_escaped() {
        let mut schema = Schema::new();
        let mut t = Object::table("Loop", "loop.fbs");
        t.add_field(Field::new("for", 0, TypeDesc::new(BaseKind::U8)));
        schema.objects.push(t);

        let emitter = ObjectEmitter::new(&schema);
        let mut ctx = FileContext::new(".fb.zig");
        let out = emitter
            .generate(&schema.objects[0], false, &mut ctx)
            .expect("generate");

        assert!(out.contains("pub fn @\"for\"(self: PackedLoop) u8 {"));
        assert!(out.contains("@\"for\": u8 = 0,"));
    }
}
