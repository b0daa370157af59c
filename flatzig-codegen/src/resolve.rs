//! Type resolution: schema type descriptors to Zig type strings.
//!
//! Containers recurse on their element with the container's
//! packed/optional flags; declared references resolve through the
//! referenced type's declaring file, registering an import requirement as
//! a side effect. Rendered strings are interned in the file context.

use flatzig_schema::{BaseKind, Field, Schema, TypeDesc};

use crate::error::CodegenError;
use crate::generator::FileContext;
use crate::intern::Symbol;
use crate::name;

/// Resolves schema type descriptors against one schema.
pub struct TypeResolver<'a> {
    schema: &'a Schema,
}

impl<'a> TypeResolver<'a> {
    /// Creates a resolver over the given schema.
    #[must_use]
    pub fn new(schema: &'a Schema) -> Self {
        Self { schema }
    }

    /// Renders the Zig type for a descriptor, registering any import the
    /// rendered name requires.
    ///
    /// # Errors
    /// Returns [`CodegenError::UnresolvedTypeReference`] if the
    /// descriptor points at an index not present in the schema; the
    /// current file's generation must abort rather than emit invalid
    /// code.
    pub fn resolve(&self, ty: &TypeDesc, ctx: &mut FileContext) -> Result<Symbol, CodegenError> {
        let rendered = self.render(ty, ctx)?;
        Ok(ctx.interner.intern_owned(rendered))
    }

    fn render(&self, ty: &TypeDesc, ctx: &mut FileContext) -> Result<String, CodegenError> {
        match ty.kind {
            BaseKind::Vector => {
                let elem = self.element_of(ty, ctx)?;
                Ok(format!("[]align(1) const {elem}"))
            }
            BaseKind::Array(len) => {
                let elem = self.element_of(ty, ctx)?;
                Ok(format!("[{len}]{elem}"))
            }
            BaseKind::Obj(index) => {
                let obj = self.schema.object(index).ok_or_else(|| {
                    unresolved(index, "object")
                })?;
                let alias = ctx.register_import(&obj.declaring_file)?;
                let type_name = name::type_name(&obj.name, ty.packed);
                Ok(mark_optional(ty, format!("{alias}.{type_name}")))
            }
            BaseKind::Enum(index) => {
                let def = self.schema.enum_def(index).ok_or_else(|| {
                    unresolved(index, "enum")
                })?;
                let alias = ctx.register_import(&def.declaring_file)?;
                let type_name = name::type_name(&def.name, false);
                Ok(mark_optional(ty, format!("{alias}.{type_name}")))
            }
            BaseKind::Union(index) => {
                let def = self.schema.enum_def(index).ok_or_else(|| {
                    unresolved(index, "union")
                })?;
                let alias = ctx.register_import(&def.declaring_file)?;
                let type_name = name::type_name(&def.name, ty.packed);
                Ok(mark_optional(ty, format!("{alias}.{type_name}")))
            }
            BaseKind::UType(index) => {
                let def = self.schema.enum_def(index).ok_or_else(|| {
                    unresolved(index, "union-tag")
                })?;
                let alias = ctx.register_import(&def.declaring_file)?;
                let packed_name = name::type_name(&def.name, true);
                Ok(format!("{alias}.{packed_name}.Tag"))
            }
            // Strings read as byte slices; absence decodes to the empty
            // string, so no optional marker applies.
            BaseKind::Str => Ok("[]const u8".to_string()),
            _ => {
                let scalar = ty.kind.zig_name().ok_or_else(|| {
                    CodegenError::generation(format!(
                        "no rendering for {} descriptor",
                        ty.kind.describe()
                    ))
                })?;
                Ok(mark_optional(ty, scalar.to_string()))
            }
        }
    }

    fn element_of(&self, ty: &TypeDesc, ctx: &mut FileContext) -> Result<String, CodegenError> {
        let elem = ty.inherited_element().ok_or_else(|| {
            CodegenError::generation(format!(
                "{} descriptor without an element type",
                ty.kind.describe()
            ))
        })?;
        self.render(&elem, ctx)
    }

    /// Returns the underlying scalar kind of an enum or union-tag
    /// reference.
    ///
    /// # Errors
    /// Returns [`CodegenError::UnresolvedTypeReference`] for a dangling
    /// enum index.
    pub fn underlying_of(&self, index: usize) -> Result<BaseKind, CodegenError> {
        self.schema
            .enum_def(index)
            .map(|def| def.underlying)
            .ok_or_else(|| unresolved(index, "enum"))
    }
}

fn unresolved(index: usize, kind: &'static str) -> CodegenError {
    tracing::error!(index, kind, "unresolved type reference");
    CodegenError::UnresolvedTypeReference { index, kind }
}

fn mark_optional(ty: &TypeDesc, rendered: String) -> String {
    if ty.optional {
        format!("?{rendered}")
    } else {
        rendered
    }
}

/// Renders the declared default value of a field as a Zig expression.
///
/// # Errors
/// Returns [`CodegenError::InvalidDefaultForType`] for base kinds with no
/// default-rendering rule (strings, vectors, objects, unions).
pub fn default_value(field: &Field) -> Result<String, CodegenError> {
    let kind = field.ty.kind;
    if kind == BaseKind::Bool {
        return Ok(if field.default_int != 0 { "true" } else { "false" }.to_string());
    }
    if kind.is_integer() {
        return Ok(field.default_int.to_string());
    }
    if kind.is_float() {
        return Ok(format!("{:?}", field.default_real));
    }
    if matches!(kind, BaseKind::Enum(_) | BaseKind::UType(_)) {
        return Ok(format!("@enumFromInt({})", field.default_int));
    }
    tracing::error!(kind = kind.describe(), field = %field.name, "no default value rule");
    Err(CodegenError::InvalidDefaultForType {
        kind: kind.describe(),
        field: field.name.clone(),
    })
}
