//! Type descriptors and enum definitions.
//!
//! A [`TypeDesc`] describes the wire type of a single field: a scalar, a
//! string, a container (vector or fixed array), or a reference to a
//! declared object, enum or union. Containers carry their element type in
//! [`TypeDesc::element`] and the element is always rendered with the
//! container's `packed`/`optional` flags, never its own.

/// Base kind of a type descriptor.
///
/// Reference kinds (`Obj`, `Enum`, `Union`, `UType`) carry an index into
/// the owning [`Schema`](crate::Schema)'s object or enum tables. `UType`
/// is the implicit union-tag kind: a `UType` field is the synthesized
/// sibling of a union field and is never rendered as a user-visible
/// accessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseKind {
    /// Boolean (1 byte on the wire).
    Bool,
    /// Signed 8-bit integer.
    I8,
    /// Unsigned 8-bit integer.
    U8,
    /// Signed 16-bit integer.
    I16,
    /// Unsigned 16-bit integer.
    U16,
    /// Signed 32-bit integer.
    I32,
    /// Unsigned 32-bit integer.
    U32,
    /// Signed 64-bit integer.
    I64,
    /// Unsigned 64-bit integer.
    U64,
    /// 32-bit floating point.
    F32,
    /// 64-bit floating point.
    F64,
    /// Length-prefixed UTF-8 string.
    Str,
    /// Length-prefixed vector; element type in [`TypeDesc::element`].
    Vector,
    /// Fixed-size inline array of the given length; element type in
    /// [`TypeDesc::element`].
    Array(u16),
    /// Reference to a declared object (struct or table) by index.
    Obj(usize),
    /// Reference to a declared enum by index.
    Enum(usize),
    /// Reference to a declared union by enum index.
    Union(usize),
    /// Implicit union-tag reference by enum index.
    UType(usize),
}

impl BaseKind {
    /// Returns true for fixed-width numeric and boolean kinds.
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        matches!(
            self,
            Self::Bool
                | Self::I8
                | Self::U8
                | Self::I16
                | Self::U16
                | Self::I32
                | Self::U32
                | Self::I64
                | Self::U64
                | Self::F32
                | Self::F64
        )
    }

    /// Returns true for integer kinds (signed or unsigned).
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(
            self,
            Self::I8
                | Self::U8
                | Self::I16
                | Self::U16
                | Self::I32
                | Self::U32
                | Self::I64
                | Self::U64
        )
    }

    /// Returns true for floating point kinds.
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }

    /// Returns the wire size of a scalar kind in bytes, or `None` for
    /// non-scalar kinds.
    #[must_use]
    pub const fn scalar_size(&self) -> Option<u16> {
        match self {
            Self::Bool | Self::I8 | Self::U8 => Some(1),
            Self::I16 | Self::U16 => Some(2),
            Self::I32 | Self::U32 | Self::F32 => Some(4),
            Self::I64 | Self::U64 | Self::F64 => Some(8),
            _ => None,
        }
    }

    /// Returns the Zig type name for a scalar kind, or `None` otherwise.
    #[must_use]
    pub const fn zig_name(&self) -> Option<&'static str> {
        match self {
            Self::Bool => Some("bool"),
            Self::I8 => Some("i8"),
            Self::U8 => Some("u8"),
            Self::I16 => Some("i16"),
            Self::U16 => Some("u16"),
            Self::I32 => Some("i32"),
            Self::U32 => Some("u32"),
            Self::I64 => Some("i64"),
            Self::U64 => Some("u64"),
            Self::F32 => Some("f32"),
            Self::F64 => Some("f64"),
            _ => None,
        }
    }

    /// Short kind name used in diagnostics.
    #[must_use]
    pub const fn describe(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::I8 => "i8",
            Self::U8 => "u8",
            Self::I16 => "i16",
            Self::U16 => "u16",
            Self::I32 => "i32",
            Self::U32 => "u32",
            Self::I64 => "i64",
            Self::U64 => "u64",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::Str => "string",
            Self::Vector => "vector",
            Self::Array(_) => "array",
            Self::Obj(_) => "object",
            Self::Enum(_) => "enum",
            Self::Union(_) => "union",
            Self::UType(_) => "union-tag",
        }
    }
}

/// Full type descriptor for a field or container element.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDesc {
    /// Base kind of the type.
    pub kind: BaseKind,
    /// Element type for `Vector` and `Array` kinds.
    pub element: Option<Box<TypeDesc>>,
    /// Whether the field is optional (nullable).
    pub optional: bool,
    /// Whether the wire-accessor ("packed") form is selected when
    /// rendering referenced object and union types.
    pub packed: bool,
}

impl TypeDesc {
    /// Creates a descriptor with the given base kind and no element.
    #[must_use]
    pub const fn new(kind: BaseKind) -> Self {
        Self {
            kind,
            element: None,
            optional: false,
            packed: false,
        }
    }

    /// Creates a vector descriptor over the given element type.
    #[must_use]
    pub fn vector(element: TypeDesc) -> Self {
        Self {
            kind: BaseKind::Vector,
            element: Some(Box::new(element)),
            optional: false,
            packed: false,
        }
    }

    /// Creates a fixed-array descriptor over the given element type.
    #[must_use]
    pub fn array(length: u16, element: TypeDesc) -> Self {
        Self {
            kind: BaseKind::Array(length),
            element: Some(Box::new(element)),
            optional: false,
            packed: false,
        }
    }

    /// Returns a copy with the optional flag set.
    #[must_use]
    pub fn with_optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    /// Returns a copy with the packed flag set.
    #[must_use]
    pub fn with_packed(mut self, packed: bool) -> Self {
        self.packed = packed;
        self
    }

    /// Returns the element descriptor with this container's
    /// `packed`/`optional` flags inherited, replacing the element's own.
    ///
    /// Returns `None` if the descriptor has no element.
    #[must_use]
    pub fn inherited_element(&self) -> Option<TypeDesc> {
        self.element.as_deref().map(|e| {
            let mut elem = e.clone();
            elem.optional = self.optional;
            elem.packed = self.packed;
            elem
        })
    }

    /// Returns true if this descriptor is a container kind.
    #[must_use]
    pub const fn is_container(&self) -> bool {
        matches!(self.kind, BaseKind::Vector | BaseKind::Array(_))
    }
}

/// Declared enum or union definition.
///
/// A union is an enum whose values carry payload type references; the
/// zero-valued entry with no payload is the NONE variant.
#[derive(Debug, Clone)]
pub struct Enum {
    /// Enum name as declared in the schema.
    pub name: String,
    /// Underlying integer kind.
    pub underlying: BaseKind,
    /// Ordered set of values.
    pub values: Vec<EnumVal>,
    /// True if this enum represents a union.
    pub is_union: bool,
    /// Schema source file this enum was declared in.
    pub declaring_file: String,
}

impl Enum {
    /// Creates a new plain enum definition.
    #[must_use]
    pub fn new(name: impl Into<String>, underlying: BaseKind, declaring_file: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            underlying,
            values: Vec::new(),
            is_union: false,
            declaring_file: declaring_file.into(),
        }
    }

    /// Adds a value to the enum.
    pub fn add_value(&mut self, value: EnumVal) {
        self.values.push(value);
    }

    /// Looks up a value by name.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&EnumVal> {
        self.values.iter().find(|v| v.name == name)
    }
}

/// Single enum value.
#[derive(Debug, Clone)]
pub struct EnumVal {
    /// Value name.
    pub name: String,
    /// Integer tag.
    pub value: i64,
    /// Payload type for union members; `None` marks the NONE variant.
    pub union_type: Option<TypeDesc>,
}

impl EnumVal {
    /// Creates a plain enum value with no union payload.
    #[must_use]
    pub fn new(name: impl Into<String>, value: i64) -> Self {
        Self {
            name: name.into(),
            value,
            union_type: None,
        }
    }

    /// Creates a union member carrying the given payload type.
    #[must_use]
    pub fn with_payload(name: impl Into<String>, value: i64, payload: TypeDesc) -> Self {
        Self {
            name: name.into(),
            value,
            union_type: Some(payload),
        }
    }

    /// Returns true if this is the NONE variant of a union.
    #[must_use]
    pub const fn is_none_variant(&self) -> bool {
        self.union_type.is_none()
    }
}
