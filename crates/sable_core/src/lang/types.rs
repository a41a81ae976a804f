//! Builtin type-name vocabulary.
//!
//! This registry lists the type names seeded into the global scope before any user code is parsed, together with
//! a coarse [`BuiltinShape`] describing what each name denotes.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive** (`Int32` is a type, `int32` is an ordinary identifier).
//! - This module is vocabulary only. The bit-level type encoding lives in `sable_syntax::types`.
//!
//! ## Examples
//! ```rust
//! use sable_core::lang::types::{self, BuiltinShape, BuiltinTypeId};
//!
//! assert_eq!(types::from_str("UInt16"), Some(BuiltinTypeId::UInt16));
//! assert_eq!(types::info_for(BuiltinTypeId::Int64).shape, BuiltinShape::Integer { bits: 64, signed: true });
//! ```

/// Stable identifier for builtin type names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinTypeId {
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
    Char,
    String,
    List,
    Array,
    Dict,
    Set,
    /// The generic "any type" name.
    Type,
    None,
    Auto,
}

/// What a builtin type name denotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinShape {
    Bool,
    Integer { bits: u8, signed: bool },
    Float { bits: u8 },
    Char,
    String,
    List,
    Array,
    Dict,
    Set,
    /// `type`: a binding that denotes some type.
    Meta,
    None,
    /// `auto`: the type is inferred from an initializer.
    Inferred,
}

/// Metadata for a builtin type name.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinTypeInfo {
    pub id: BuiltinTypeId,
    pub canonical: &'static str,
    pub shape: BuiltinShape,
    pub description: &'static str,
}

/// Registry of builtin type names.
pub const BUILTIN_TYPES: &[BuiltinTypeInfo] = &[
    info(BuiltinTypeId::Bool, "Bool", BuiltinShape::Bool, "Boolean value."),
    info(BuiltinTypeId::Int8, "Int8", int(8, true), "Signed 8-bit integer."),
    info(BuiltinTypeId::Int16, "Int16", int(16, true), "Signed 16-bit integer."),
    info(BuiltinTypeId::Int32, "Int32", int(32, true), "Signed 32-bit integer."),
    info(BuiltinTypeId::Int64, "Int64", int(64, true), "Signed 64-bit integer."),
    info(BuiltinTypeId::UInt8, "UInt8", int(8, false), "Unsigned 8-bit integer."),
    info(BuiltinTypeId::UInt16, "UInt16", int(16, false), "Unsigned 16-bit integer."),
    info(BuiltinTypeId::UInt32, "UInt32", int(32, false), "Unsigned 32-bit integer."),
    info(BuiltinTypeId::UInt64, "UInt64", int(64, false), "Unsigned 64-bit integer."),
    info(
        BuiltinTypeId::Float32,
        "Float32",
        BuiltinShape::Float { bits: 32 },
        "Single precision float.",
    ),
    info(
        BuiltinTypeId::Float64,
        "Float64",
        BuiltinShape::Float { bits: 64 },
        "Double precision float.",
    ),
    info(BuiltinTypeId::Char, "Char", BuiltinShape::Char, "Single character."),
    info(BuiltinTypeId::String, "String", BuiltinShape::String, "List of characters."),
    info(BuiltinTypeId::List, "List", BuiltinShape::List, "Growable sequence."),
    info(BuiltinTypeId::Array, "Array", BuiltinShape::Array, "Fixed-size sequence."),
    info(BuiltinTypeId::Dict, "Dict", BuiltinShape::Dict, "Key/value mapping."),
    info(BuiltinTypeId::Set, "Set", BuiltinShape::Set, "Unordered unique collection."),
    info(BuiltinTypeId::Type, "type", BuiltinShape::Meta, "Any type name."),
    info(BuiltinTypeId::None, "none", BuiltinShape::None, "Absence of a value."),
    info(BuiltinTypeId::Auto, "auto", BuiltinShape::Inferred, "Inferred from the initializer."),
];

/// Return the canonical spelling for a builtin type.
pub fn as_str(id: BuiltinTypeId) -> &'static str {
    info_for(id).canonical
}

/// Return the full metadata entry for a builtin type.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: BuiltinTypeId) -> &'static BuiltinTypeInfo {
    BUILTIN_TYPES
        .iter()
        .find(|t| t.id == id)
        .expect("builtin type info missing")
}

/// Resolve a type name to a [`BuiltinTypeId`].
pub fn from_str(name: &str) -> Option<BuiltinTypeId> {
    BUILTIN_TYPES.iter().find(|t| t.canonical == name).map(|t| t.id)
}

const fn int(bits: u8, signed: bool) -> BuiltinShape {
    BuiltinShape::Integer { bits, signed }
}

const fn info(
    id: BuiltinTypeId,
    canonical: &'static str,
    shape: BuiltinShape,
    description: &'static str,
) -> BuiltinTypeInfo {
    BuiltinTypeInfo {
        id,
        canonical,
        shape,
        description,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_names_round_trip() {
        for t in BUILTIN_TYPES {
            assert_eq!(from_str(t.canonical), Some(t.id));
            assert_eq!(as_str(t.id), t.canonical);
        }
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert_eq!(from_str("int32"), None);
        assert_eq!(from_str("Type"), None);
        assert_eq!(from_str("type"), Some(BuiltinTypeId::Type));
    }

    #[test]
    fn integer_widths_cover_both_signednesses() {
        let ints: Vec<_> = BUILTIN_TYPES
            .iter()
            .filter_map(|t| match t.shape {
                BuiltinShape::Integer { bits, signed } => Some((bits, signed)),
                _ => None,
            })
            .collect();
        for bits in [8, 16, 32, 64] {
            assert!(ints.contains(&(bits, true)));
            assert!(ints.contains(&(bits, false)));
        }
    }
}
