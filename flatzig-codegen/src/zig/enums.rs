//! Enum and union declaration emission.
//!
//! A plain enum becomes a single closed Zig enum. A union becomes two
//! declarations mirroring the object duality: a packed union whose tag is
//! a plain closed enum, and an unpacked union tagged by the packed
//! union's `Tag` type, with a conversion from packed to unpacked and a
//! pack routine that discards the tag (the tag is encoded separately by
//! the sibling tag field of the owning table).

use flatzig_schema::{Enum, EnumVal, Schema};

use crate::error::CodegenError;
use crate::generator::FileContext;
use crate::name;
use crate::resolve::TypeResolver;

/// Emitter for enum and union declarations.
pub struct EnumEmitter<'a> {
    resolver: TypeResolver<'a>,
}

impl<'a> EnumEmitter<'a> {
    /// Creates an emitter over the given schema.
    #[must_use]
    pub fn new(schema: &'a Schema) -> Self {
        Self {
            resolver: TypeResolver::new(schema),
        }
    }

    /// Returns the top-level declaration names this enum produces.
    #[must_use]
    pub fn declaration_names(&self, def: &Enum) -> Vec<String> {
        if def.is_union {
            vec![
                name::type_name(&def.name, true),
                name::type_name(&def.name, false),
            ]
        } else {
            vec![name::type_name(&def.name, false)]
        }
    }

    /// Generates the declaration(s) for one enum or union.
    ///
    /// # Errors
    /// Fails if a union payload type cannot be resolved.
    pub fn generate(&self, def: &Enum, ctx: &mut FileContext) -> Result<String, CodegenError> {
        if def.is_union {
            let mut out = self.generate_packed_union(def, ctx)?;
            out.push_str(&self.generate_unpacked_union(def, ctx)?);
            Ok(out)
        } else {
            self.generate_enum(def)
        }
    }

    /// Generates a plain closed enum declaration.
    fn generate_enum(&self, def: &Enum) -> Result<String, CodegenError> {
        let type_name = name::type_name(&def.name, false);
        let underlying = def.underlying.zig_name().ok_or_else(|| {
            CodegenError::generation(format!(
                "enum '{}' has non-integer underlying kind",
                def.name
            ))
        })?;

        let mut out = String::new();
        out.push_str(&format!("pub const {type_name} = enum({underlying}) {{\n"));
        for value in sorted_values(def) {
            out.push_str(&format!(
                "    {} = {},\n",
                name::field_name(&value.name),
                value.value
            ));
        }
        out.push_str("};\n\n");
        Ok(out)
    }

    /// Generates the packed union: an inferred closed-tag union over the
    /// wire-accessor payload types, with the tag-dispatch constructor
    /// used by table union accessors.
    fn generate_packed_union(
        &self,
        def: &Enum,
        ctx: &mut FileContext,
    ) -> Result<String, CodegenError> {
        let packed_name = name::type_name(&def.name, true);
        let underlying = def.underlying.zig_name().ok_or_else(|| {
            CodegenError::generation(format!(
                "union '{}' has non-integer tag kind",
                def.name
            ))
        })?;

        let mut out = String::new();
        out.push_str(&format!(
            "pub const {packed_name} = union(enum({underlying})) {{\n"
        ));
        out.push_str(&format!(
            "    pub const Tag = std.meta.Tag({packed_name});\n\n"
        ));

        for value in sorted_values(def) {
            out.push_str(&self.variant_decl(value, true, ctx)?);
        }

        out.push_str(&format!(
            "\n    pub fn init(tag: Tag, table: flatzig.Table) {packed_name} {{\n"
        ));
        out.push_str("        return switch (tag) {\n");
        for value in sorted_values(def) {
            let variant = name::field_name(&value.name);
            if value.is_none_variant() {
                out.push_str(&format!("            .{variant} => .{variant},\n"));
            } else {
                out.push_str(&format!(
                    "            .{variant} => .{{ .{variant} = .{{ .table = table }} }},\n"
                ));
            }
        }
        out.push_str("        };\n");
        out.push_str("    }\n");
        out.push_str("};\n\n");
        Ok(out)
    }

    /// Generates the unpacked union: tagged by the packed union's tag,
    /// with per-tag conversion and the pack delegation.
    fn generate_unpacked_union(
        &self,
        def: &Enum,
        ctx: &mut FileContext,
    ) -> Result<String, CodegenError> {
        let packed_name = name::type_name(&def.name, true);
        let unpacked_name = name::type_name(&def.name, false);

        let mut out = String::new();
        out.push_str(&format!(
            "pub const {unpacked_name} = union({packed_name}.Tag) {{\n"
        ));

        for value in sorted_values(def) {
            out.push_str(&self.variant_decl(value, false, ctx)?);
        }

        // Conversion: delegate each payload to its own conversion and
        // re-tag the result.
        out.push_str(&format!(
            "\n    pub fn init(packed_value: {packed_name}) {unpacked_name} {{\n"
        ));
        out.push_str("        return switch (packed_value) {\n");
        for value in sorted_values(def) {
            let variant = name::field_name(&value.name);
            if value.is_none_variant() {
                out.push_str(&format!("            .{variant} => .{variant},\n"));
            } else {
                let payload = value.union_type.clone().ok_or_else(|| {
                    CodegenError::generation(format!(
                        "union variant '{}' has no payload type",
                        value.name
                    ))
                })?;
                let unpacked_payload =
                    self.resolve_str(&payload.with_packed(false), ctx)?;
                out.push_str(&format!(
                    "            .{variant} => |v| .{{ .{variant} = {unpacked_payload}.init(v) }},\n"
                ));
            }
        }
        out.push_str("        };\n");
        out.push_str("    }\n");

        // Pack discards the tag and delegates to the active payload.
        out.push_str(&format!(
            "\n    pub fn pack(self: {unpacked_name}, builder: *flatzig.Builder) flatzig.Builder.Error!u32 {{\n"
        ));
        out.push_str("        return switch (self) {\n");
        for value in sorted_values(def) {
            let variant = name::field_name(&value.name);
            if value.is_none_variant() {
                out.push_str(&format!("            .{variant} => 0,\n"));
            } else {
                out.push_str(&format!("            .{variant} => |v| v.pack(builder),\n"));
            }
        }
        out.push_str("        };\n");
        out.push_str("    }\n");
        out.push_str("};\n\n");
        Ok(out)
    }

    fn variant_decl(
        &self,
        value: &EnumVal,
        packed: bool,
        ctx: &mut FileContext,
    ) -> Result<String, CodegenError> {
        let variant = name::field_name(&value.name);
        match &value.union_type {
            None => Ok(format!("    {variant},\n")),
            Some(payload) => {
                let rendered = self.resolve_str(&payload.clone().with_packed(packed), ctx)?;
                Ok(format!("    {variant}: {rendered},\n"))
            }
        }
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

/// Union tags are contiguous on the wire; emit variants in ascending tag
/// order so the inferred tag enum matches the schema values.
fn sorted_values(def: &Enum) -> Vec<&EnumVal> {
    let mut values: Vec<&EnumVal> = def.values.iter().collect();
    values.sort_by_key(|v| v.value);
    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use flatzig_schema::{BaseKind, Object, TypeDesc};

    fn union_schema() -> Schema {
        let mut schema = Schema::new();
        schema.objects.push(Object::table("Sword", "weapon.fbs"));
        schema.objects.push(Object::table("Gun", "weapon.fbs"));

        let mut weapon = Enum::new("Weapon", BaseKind::U8, "weapon.fbs");
        weapon.is_union = true;
        weapon.add_value(EnumVal::with_payload(
            "Gun",
            2,
            TypeDesc::new(BaseKind::Obj(1)),
        ));
        weapon.add_value(EnumVal::new("NONE", 0));
        weapon.add_value(EnumVal::with_payload(
            "Sword",
            1,
            TypeDesc::new(BaseKind::Obj(0)),
        ));
        schema.enums.push(weapon);
        schema
    }

    #[test]
    fn test_plain_enum() {
        let mut schema = Schema::new();
        let mut color = Enum::new("Color", BaseKind::I8, "colors.fbs");
        color.add_value(EnumVal::new("Red", 0));
        color.add_value(EnumVal::new("Green", 1));
        schema.enums.push(color);

        let emitter = EnumEmitter::new(&schema);
        let mut ctx = FileContext::new(".fb.zig");
        let out = emitter.generate(&schema.enums[0], &mut ctx).unwrap();

        assert!(out.contains("pub const Color = enum(i8) {"));
        assert!(out.contains("    red = 0,\n"));
        assert!(out.contains("    green = 1,\n"));
        assert_eq!(emitter.declaration_names(&schema.enums[0]), vec!["Color"]);
    }

    #[test]
    fn test_union_emits_packed_and_unpacked() {
        let schema = union_schema();
        let emitter = EnumEmitter::new(&schema);
        let mut ctx = FileContext::new(".fb.zig");
        let out = emitter.generate(&schema.enums[0], &mut ctx).unwrap();

        assert!(out.contains("pub const PackedWeapon = union(enum(u8)) {"));
        assert!(out.contains("pub const Tag = std.meta.Tag(PackedWeapon);"));
        assert!(out.contains("pub const Weapon = union(PackedWeapon.Tag) {"));
        assert_eq!(
            emitter.declaration_names(&schema.enums[0]),
            vec!["PackedWeapon", "Weapon"]
        );
    }

    #[test]
    fn test_union_variants_in_tag_order() {
        let schema = union_schema();
        let emitter = EnumEmitter::new(&schema);
        let mut ctx = FileContext::new(".fb.zig");
        let out = emitter.generate(&schema.enums[0], &mut ctx).unwrap();

        // Declared out of order (Gun, NONE, Sword) but emitted by tag.
        let none = out.find("    none,\n").unwrap();
        let sword = out.find("    sword: weapon.PackedSword,\n").unwrap();
        let gun = out.find("    gun: weapon.PackedGun,\n").unwrap();
        assert!(none < sword && sword < gun);
    }

    #[test]
    fn test_union_conversion_delegates_per_tag() {
        let schema = union_schema();
        let emitter = EnumEmitter::new(&schema);
        let mut ctx = FileContext::new(".fb.zig");
        let out = emitter.generate(&schema.enums[0], &mut ctx).unwrap();

        assert!(out.contains(".sword => |v| .{ .sword = weapon.Sword.init(v) },"));
        assert!(out.contains(".gun => |v| .{ .gun = weapon.Gun.init(v) },"));
    }

    #[test]
    fn test_union_pack_discards_tag() {
        let schema = union_schema();
        let emitter = EnumEmitter::new(&schema);
        let mut ctx = FileContext::new(".fb.zig");
        let out = emitter.generate(&schema.enums[0], &mut ctx).unwrap();

        // No tag write in the union's own pack; NONE packs to offset 0.
        assert!(out.contains("            .none => 0,\n"));
        assert!(out.contains(".sword => |v| v.pack(builder),"));
        let pack_body = &out[out.find("pub fn pack").unwrap()..];
        assert!(!pack_body.contains("@intFromEnum"));
    }
}
