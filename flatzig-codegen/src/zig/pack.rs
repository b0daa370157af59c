//! Encode routine emission.
//!
//! Each unpacked type carries a `pack` routine serializing it through the
//! runtime builder. Tables serialize every out-of-line value (strings,
//! vectors, nested tables, unions) before the slot table opens, because
//! the slot writes need the finished offsets; structs write their fields
//! inline at fixed offsets with explicit padding. Every builder call is
//! fallible and aborts the routine on first failure.

use flatzig_schema::{BaseKind, Field, Object, Schema};

use crate::error::CodegenError;
use crate::generator::FileContext;
use crate::name;
use crate::resolve::{self, TypeResolver};

/// Emitter for the unpacked form's `pack` routine.
pub struct PackEmitter<'a> {
    resolver: TypeResolver<'a>,
}

impl<'a> PackEmitter<'a> {
    /// Creates an emitter over the given schema.
    #[must_use]
    pub fn new(schema: &'a Schema) -> Self {
        Self {
            resolver: TypeResolver::new(schema),
        }
    }

    /// Generates the `pack` routine body for one object.
    ///
    /// # Errors
    /// Fails when a field's kind has no encode rule or a reference cannot
    /// be resolved.
    pub fn generate(&self, obj: &Object, ctx: &mut FileContext) -> Result<String, CodegenError> {
        let unpacked_name = name::type_name(&obj.name, false);

        let mut out = String::new();
        out.push_str(&format!(
            "    pub fn pack(self: {unpacked_name}, builder: *flatzig.Builder) flatzig.Builder.Error!u32 {{\n"
        ));

        let fields: Vec<&Field> = obj
            .sorted_fields()
            .into_iter()
            .filter(|f| !f.deprecated)
            .collect();

        if fields.is_empty() {
            out.push_str("        _ = self;\n");
            out.push_str("        _ = builder;\n");
            out.push_str("        return 0;\n");
            out.push_str("    }\n");
            return Ok(out);
        }

        if obj.is_struct {
            self.struct_body(obj, &fields, &mut out)?;
        } else {
            self.table_body(obj, &fields, &mut out, ctx)?;
        }

        out.push_str("    }\n");
        Ok(out)
    }

    /// Struct encoding: one prep for the whole footprint, then in-order
    /// writes with the recorded inter-field padding.
    fn struct_body(
        &self,
        obj: &Object,
        fields: &[&Field],
        out: &mut String,
    ) -> Result<(), CodegenError> {
        out.push_str(&format!(
            "        try builder.prep({}, {});\n",
            obj.minalign, obj.bytesize
        ));

        for field in fields {
            if field.padding > 0 {
                out.push_str(&format!("        try builder.pad({});\n", field.padding));
            }
            let f_name = name::field_name(&field.name);
            match field.ty.kind {
                kind if kind.is_scalar() => {
                    let zig = kind.zig_name().expect("scalar kind");
                    out.push_str(&format!(
                        "        try builder.write({zig}, self.{f_name});\n"
                    ));
                }
                BaseKind::Enum(index) => {
                    let zig = self.underlying_zig(index)?;
                    out.push_str(&format!(
                        "        try builder.write({zig}, @intFromEnum(self.{f_name}));\n"
                    ));
                }
                BaseKind::Obj(_) => {
                    // Nested structs write inline; the returned offset is
                    // meaningless here.
                    out.push_str(&format!(
                        "        _ = try self.{f_name}.pack(builder);\n"
                    ));
                }
                BaseKind::Array(len) => {
                    let elem = field.ty.inherited_element().ok_or_else(|| {
                        CodegenError::generation(format!(
                            "array field '{}' without element type",
                            field.name
                        ))
                    })?;
                    if let Some(zig) = elem.kind.zig_name() {
                        out.push_str(&format!(
                            "        try builder.writeArray({zig}, {len}, self.{f_name});\n"
                        ));
                    } else {
                        out.push_str(&format!(
                            "        try builder.writeBytes(std.mem.sliceAsBytes(self.{f_name}));\n"
                        ));
                    }
                }
                _ => {
                    return Err(CodegenError::generation(format!(
                        "unsupported struct field kind {} for '{}'",
                        field.ty.kind.describe(),
                        field.name
                    )));
                }
            }
        }

        out.push_str("        return builder.offset();\n");
        Ok(())
    }

    /// Table encoding: out-of-line sub-serializations first, then the
    /// slot table with default elision.
    fn table_body(
        &self,
        obj: &Object,
        fields: &[&Field],
        out: &mut String,
        ctx: &mut FileContext,
    ) -> Result<(), CodegenError> {
        // Phase one: every offset-valued field is serialized before the
        // table opens and cached under its field name.
        for field in fields {
            let f_name = name::field_name(&field.name);
            let cache = cache_name(field);
            match field.ty.kind {
                BaseKind::Str => {
                    out.push_str(&format!(
                        "        const {cache} = try builder.createString(self.{f_name});\n"
                    ));
                }
                BaseKind::Vector => {
                    let elem = field.ty.inherited_element().ok_or_else(|| {
                        CodegenError::generation(format!(
                            "vector field '{}' without element type",
                            field.name
                        ))
                    })?;
                    let elem_ty = self.resolve_str(&elem.with_packed(true), ctx)?;
                    out.push_str(&format!(
                        "        const {cache} = try builder.createVector({elem_ty}, self.{f_name});\n"
                    ));
                }
                BaseKind::Obj(_) => {
                    out.push_str(&format!(
                        "        const {cache} = if (self.{f_name}) |v| try v.pack(builder) else 0;\n"
                    ));
                }
                BaseKind::Union(_) => {
                    out.push_str(&format!(
                        "        const {cache} = try self.{f_name}.pack(builder);\n"
                    ));
                }
                _ => {}
            }
        }

        out.push_str(&format!(
            "        try builder.startTable({});\n",
            obj.slot_count()
        ));

        // Phase two: slot writes in the same id order.
        for field in fields {
            let f_name = name::field_name(&field.name);
            let cache = cache_name(field);
            match field.ty.kind {
                kind if kind.is_scalar() => {
                    let zig = kind.zig_name().expect("scalar kind");
                    if field.ty.optional {
                        out.push_str(&format!(
                            "        if (self.{f_name}) |v| try builder.appendSlot({zig}, {}, v);\n",
                            field.id
                        ));
                    } else {
                        let default = resolve::default_value(field)?;
                        out.push_str(&format!(
                            "        try builder.appendSlotWithDefault({zig}, {}, self.{f_name}, {default});\n",
                            field.id
                        ));
                    }
                }
                BaseKind::Enum(index) => {
                    let zig = self.underlying_zig(index)?;
                    if field.ty.optional {
                        out.push_str(&format!(
                            "        if (self.{f_name}) |v| try builder.appendSlot({zig}, {}, @intFromEnum(v));\n",
                            field.id
                        ));
                    } else {
                        out.push_str(&format!(
                            "        try builder.appendSlotWithDefault({zig}, {}, @intFromEnum(self.{f_name}), {});\n",
                            field.id, field.default_int
                        ));
                    }
                }
                BaseKind::UType(index) => {
                    // The tag slot reads the sibling union field; the tag
                    // field itself has no unpacked counterpart.
                    let zig = self.underlying_zig(index)?;
                    let sibling = name::field_name(name::strip_tag_suffix(&field.name));
                    out.push_str(&format!(
                        "        try builder.appendSlotWithDefault({zig}, {}, @intFromEnum(self.{sibling}), 0);\n",
                        field.id
                    ));
                }
                BaseKind::Str | BaseKind::Vector | BaseKind::Obj(_) | BaseKind::Union(_) => {
                    out.push_str(&format!(
                        "        try builder.appendSlotOffset({}, {cache});\n",
                        field.id
                    ));
                }
                _ => {
                    return Err(CodegenError::generation(format!(
                        "unsupported table field kind {} for '{}'",
                        field.ty.kind.describe(),
                        field.name
                    )));
                }
            }
        }

        out.push_str("        return builder.endTable();\n");
        Ok(())
    }

    fn underlying_zig(&self, index: usize) -> Result<&'static str, CodegenError> {
        let underlying = self.resolver.underlying_of(index)?;
        underlying.zig_name().ok_or_else(|| {
            CodegenError::generation("enum underlying kind is not an integer".to_string())
        })
    }

    fn resolve_str(
        &self,
        ty: &flatzig_schema::TypeDesc,
        ctx: &mut FileContext,
    ) -> Result<String, CodegenError> {
        let sym = self.resolver.resolve(ty, ctx)?;
        Ok(ctx.interner.resolve(sym).to_string())
    }
}

/// Local name an out-of-line serialization is cached under.
fn cache_name(field: &Field) -> String {
    format!("{}_", name::to_snake_case(&field.name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use flatzig_schema::{Enum, EnumVal, TypeDesc};

    fn monster_schema() -> Schema {
        let mut schema = Schema::new();

        let mut weapon = Enum::new("Weapon", BaseKind::U8, "monster.fbs");
        weapon.is_union = true;
        weapon.add_value(EnumVal::new("NONE", 0));
        weapon.add_value(EnumVal::with_payload(
            "Sword",
            1,
            TypeDesc::new(BaseKind::Obj(1)),
        ));

        let mut monster = Object::table("Monster", "monster.fbs");
        monster.add_field(
            Field::new("hp", 0, TypeDesc::new(BaseKind::I16)).with_default_int(100),
        );
        monster.add_field(Field::new(
            "mana",
            1,
            TypeDesc::new(BaseKind::I16).with_optional(true),
        ));
        monster.add_field(Field::new("name", 2, TypeDesc::new(BaseKind::Str)));
        monster.add_field(Field::new(
            "inventory",
            3,
            TypeDesc::vector(TypeDesc::new(BaseKind::U8)),
        ));
        monster.add_field(Field::new(
            "equipped_type",
            4,
            TypeDesc::new(BaseKind::UType(0)),
        ));
        monster.add_field(Field::new("equipped", 5, TypeDesc::new(BaseKind::Union(0))));

        let mut vec3 = Object::strukt("Vec3", "monster.fbs", 16, 4);
        vec3.add_field(Field::new("x", 0, TypeDesc::new(BaseKind::F32)).at_offset(0));
        vec3.add_field(Field::new("y", 1, TypeDesc::new(BaseKind::F32)).at_offset(4));
        vec3.add_field(
            Field::new("z", 2, TypeDesc::new(BaseKind::F32))
                .at_offset(12)
                .with_padding(4),
        );

        schema.objects.push(monster);
        schema.objects.push(Object::table("Sword", "monster.fbs"));
        schema.objects.push(vec3);
        schema.enums.push(weapon);
        schema
    }

    fn pack_for(index: usize) -> String {
        let schema = monster_schema();
        let emitter = PackEmitter::new(&schema);
        let mut ctx = FileContext::new(".fb.zig");
        emitter.generate(&schema.objects[index], &mut ctx).unwrap()
    }

    #[test]
    fn test_out_of_line_values_precede_table_open() {
        let out = pack_for(0);

        let name_cache = out.find("const name_ = try builder.createString(self.name);").unwrap();
        let inv_cache = out
            .find("const inventory_ = try builder.createVector(u8, self.inventory);")
            .unwrap();
        let union_cache = out
            .find("const equipped_ = try self.equipped.pack(builder);")
            .unwrap();
        let open = out.find("try builder.startTable(6);").unwrap();

        assert!(name_cache < open);
        assert!(inv_cache < open);
        assert!(union_cache < open);
    }

    #[test]
    fn test_table_scalar_slots_elide_defaults() {
        let out = pack_for(0);
        assert!(out.contains(
            "try builder.appendSlotWithDefault(i16, 0, self.hp, 100);"
        ));
        // Optional scalars write directly, no elision.
        assert!(out.contains("if (self.mana) |v| try builder.appendSlot(i16, 1, v);"));
    }

    #[test]
    fn test_offset_slots_reference_cached_values() {
        let out = pack_for(0);
        assert!(out.contains("try builder.appendSlotOffset(2, name_);"));
        assert!(out.contains("try builder.appendSlotOffset(3, inventory_);"));
        assert!(out.contains("try builder.appendSlotOffset(5, equipped_);"));
    }

    #[test]
    fn test_union_tag_slot_reads_sibling_field() {
        let out = pack_for(0);
        assert!(out.contains(
            "try builder.appendSlotWithDefault(u8, 4, @intFromEnum(self.equipped), 0);"
        ));
        // No unpacked counterpart for the tag field itself.
        assert!(!out.contains("self.equipped_type"));
        assert!(!out.contains("self.equippedType"));
    }

    #[test]
    fn test_struct_pack_is_direct_and_padded() {
        let out = pack_for(2);
        assert!(out.contains("try builder.prep(4, 16);"));
        assert!(out.contains("try builder.write(f32, self.x);"));

        // Padding recorded on z is emitted before its write.
        let pad = out.find("try builder.pad(4);").unwrap();
        let z = out.find("try builder.write(f32, self.z);").unwrap();
        assert!(pad < z);

        // Structs never open a slot table and never elide defaults.
        assert!(!out.contains("startTable"));
        assert!(!out.contains("appendSlot"));
        assert!(out.contains("return builder.offset();"));
    }

    #[test]
    fn test_empty_object_degenerates() {
        let out = pack_for(1);
        assert!(out.contains("_ = self;"));
        assert!(out.contains("_ = builder;"));
        assert!(out.contains("return 0;"));
        assert!(!out.contains("startTable"));
    }

    #[test]
    fn test_deprecated_fields_are_skipped() {
        let mut schema = monster_schema();
        schema.objects[0].fields[0].deprecated = true;

        let emitter = PackEmitter::new(&schema);
        let mut ctx = FileContext::new(".fb.zig");
        let out = emitter.generate(&schema.objects[0], &mut ctx).unwrap();

        assert!(!out.contains("self.hp"));
        // Slot count still spans the deprecated id.
        assert!(out.contains("try builder.startTable(6);"));
    }
}
