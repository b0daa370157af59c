//! Identifier synthesis: case conversion and reserved-word escaping.
//!
//! Schema names arrive in arbitrary casing and may collide with Zig
//! keywords or builtin primitive type names. Every generated identifier
//! routes through [`escape_if_reserved`] so the output stays a single
//! valid identifier token.

/// Zig keywords that must be escaped when used as identifiers.
const KEYWORDS: &[&str] = &[
    "addrspace",
    "align",
    "allowzero",
    "and",
    "anyframe",
    "anytype",
    "asm",
    "async",
    "await",
    "break",
    "callconv",
    "catch",
    "comptime",
    "const",
    "continue",
    "defer",
    "else",
    "enum",
    "errdefer",
    "error",
    "export",
    "extern",
    "fn",
    "for",
    "if",
    "inline",
    "linksection",
    "noalias",
    "noinline",
    "nosuspend",
    "opaque",
    "or",
    "orelse",
    "packed",
    "pub",
    "resume",
    "return",
    "struct",
    "suspend",
    "switch",
    "test",
    "threadlocal",
    "try",
    "union",
    "unreachable",
    "usingnamespace",
    "var",
    "volatile",
    "while",
];

/// Builtin non-integer primitive type names.
const PRIMITIVES: &[&str] = &[
    "anyerror",
    "anyopaque",
    "bool",
    "comptime_float",
    "comptime_int",
    "f128",
    "f16",
    "f32",
    "f64",
    "f80",
    "false",
    "isize",
    "noreturn",
    "null",
    "true",
    "type",
    "undefined",
    "usize",
    "void",
];

/// Splits a raw name into words on `_`, `-`, space and camel humps.
fn split_words(raw: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();

    for c in raw.chars() {
        if c == '_' || c == '-' || c == ' ' {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
        } else if c.is_uppercase() && current.chars().last().is_some_and(char::is_lowercase) {
            words.push(std::mem::take(&mut current));
            current.push(c);
        } else {
            current.push(c);
        }
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// Converts a raw name to `snake_case`.
#[must_use]
pub fn to_snake_case(raw: &str) -> String {
    split_words(raw)
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

/// Converts a raw name to `camelCase`.
#[must_use]
pub fn to_camel_case(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for (i, word) in split_words(raw).iter().enumerate() {
        if i == 0 {
            out.push_str(&word.to_lowercase());
        } else {
            push_capitalized(&mut out, word);
        }
    }
    out
}

/// Converts a raw name to `TitleCase`.
#[must_use]
pub fn to_title_case(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for word in split_words(raw) {
        push_capitalized(&mut out, &word);
    }
    out
}

fn push_capitalized(out: &mut String, word: &str) {
    let mut chars = word.chars();
    if let Some(first) = chars.next() {
        out.extend(first.to_uppercase());
        out.push_str(&chars.as_str().to_lowercase());
    }
}

/// Returns true if the identifier is a Zig builtin integer type name
/// (`u8`, `i64`, ... with an arbitrary bit width).
fn is_integer_type_name(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some('u' | 'i')) && {
        let rest = chars.as_str();
        !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit())
    }
}

/// Returns true if the identifier collides with a keyword or builtin
/// primitive type name.
#[must_use]
pub fn is_reserved(identifier: &str) -> bool {
    KEYWORDS.binary_search(&identifier).is_ok()
        || PRIMITIVES.binary_search(&identifier).is_ok()
        || is_integer_type_name(identifier)
}

/// Wraps the identifier in the `@"..."` escape if it is reserved.
///
/// Any input is accepted; empty input yields empty output. The transform
/// is deterministic, so re-applying it to the same raw name always
/// produces the same escaped output.
#[must_use]
pub fn escape_if_reserved(identifier: &str) -> String {
    if is_reserved(identifier) {
        format!("@\"{identifier}\"")
    } else {
        identifier.to_string()
    }
}

/// Synthesizes a `snake_case` field identifier.
#[must_use]
pub fn field_name(raw: &str) -> String {
    escape_if_reserved(&to_snake_case(raw))
}

/// Synthesizes a `camelCase` function identifier.
#[must_use]
pub fn function_name(raw: &str) -> String {
    escape_if_reserved(&to_camel_case(raw))
}

/// Synthesizes a `TitleCase` type identifier.
///
/// The `packed` form carries a `Packed` prefix so the two declarations
/// generated for one schema type never collide.
#[must_use]
pub fn type_name(raw: &str, packed: bool) -> String {
    let title = to_title_case(raw);
    if packed {
        escape_if_reserved(&format!("Packed{title}"))
    } else {
        escape_if_reserved(&title)
    }
}

/// Strips the fixed `_type` suffix from an implicit union-tag field name.
///
/// Tag fields are never named directly; callers strip the suffix and
/// name the sibling union field instead.
#[must_use]
pub fn strip_tag_suffix(raw: &str) -> &str {
    raw.strip_suffix("_type").unwrap_or(raw)
}
