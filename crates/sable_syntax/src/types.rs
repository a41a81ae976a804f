//! Bit-packed type descriptors.
//!
//! A [`SymbolType`] is a set of [`TypeFlags`]: primitive kind, compound kind and modifiers in one integer. The
//! top [`TypeFlags::TYPE`] bit means "this binding names a type" rather than "this binding holds a value of it".
//!
//! Other layers combine types only through [`SymbolType::mask`], [`SymbolType::append`] and
//! [`SymbolType::without`] (plus the predicates built on them), so the bit layout can change without touching call
//! sites.
//!
//! ## Examples
//! ```rust
//! use sable_syntax::types::{SymbolType, Width};
//!
//! let int32 = SymbolType::int(Width::W32, true);
//! assert_eq!(int32.as_type().for_value(), int32);
//! assert_eq!(SymbolType::meta().for_value(), SymbolType::meta().append(SymbolType::auto()));
//! assert_eq!(int32.as_type().to_string(), "type Int32");
//! ```

use bitflags::bitflags;
use sable_core::lang::types::{self as builtin, BuiltinShape, BuiltinTypeId};
use std::fmt;

bitflags! {
    /// Raw type bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TypeFlags: u32 {
        const INTEGER   = 1 << 0;
        const SIGNED    = 1 << 1;
        const W8        = 1 << 2;
        const W16       = 1 << 3;
        const W32       = 1 << 4;
        const W64       = 1 << 5;
        const CHAR      = 1 << 6;
        const LIST      = 1 << 7;
        const STRING    = Self::CHAR.bits() | Self::LIST.bits();
        const STRUCT    = 1 << 8;
        const DICT      = Self::STRUCT.bits() | Self::LIST.bits();
        const ARRAY     = 1 << 9;
        const SET       = Self::STRUCT.bits() | Self::ARRAY.bits();
        const BOOL      = 1 << 10;
        const FUNCTION  = 1 << 11;
        const REFERENCE = 1 << 12;
        const POINTER   = 1 << 13;
        /// Variadic template parameter (`Ts...`).
        const PACK      = 1 << 14;
        /// Inferred from an initializer.
        const AUTO      = 1 << 15;
        const NONE      = 1 << 16;
        const FLOAT     = 1 << 17;
        /// Declared through a template definition; generic arguments may follow.
        const TEMPLATE  = 1 << 18;
        /// The binding denotes a type, not a value.
        const TYPE      = 1 << 31;

        const WIDTH     = Self::W8.bits() | Self::W16.bits() | Self::W32.bits() | Self::W64.bits();
    }
}

/// Integer/float width classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Width {
    W8,
    W16,
    W32,
    W64,
}

impl Width {
    pub fn from_bits(bits: u8) -> Option<Width> {
        match bits {
            8 => Some(Width::W8),
            16 => Some(Width::W16),
            32 => Some(Width::W32),
            64 => Some(Width::W64),
            _ => None,
        }
    }

    fn flag(self) -> TypeFlags {
        match self {
            Width::W8 => TypeFlags::W8,
            Width::W16 => TypeFlags::W16,
            Width::W32 => TypeFlags::W32,
            Width::W64 => TypeFlags::W64,
        }
    }
}

/// A type descriptor. The empty set means "unknown".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SymbolType(TypeFlags);

impl SymbolType {
    pub const UNKNOWN: SymbolType = SymbolType(TypeFlags::empty());

    // ---- sanctioned operations -------------------------------------------

    /// Keep only the bits also present in `other`.
    pub fn mask(self, other: SymbolType) -> SymbolType {
        SymbolType(self.0 & other.0)
    }

    /// Add the bits of `other`.
    pub fn append(self, other: SymbolType) -> SymbolType {
        SymbolType(self.0 | other.0)
    }

    /// Remove the bits of `other`.
    pub fn without(self, other: SymbolType) -> SymbolType {
        SymbolType(self.0 & !other.0)
    }

    // ---- predicates ---------------------------------------------------------

    /// `true` if every bit of `other` is set.
    pub fn contains(self, other: SymbolType) -> bool {
        self.mask(other) == other
    }

    /// `true` if any bit of `other` is set.
    pub fn intersects(self, other: SymbolType) -> bool {
        !self.mask(other).is_unknown()
    }

    pub fn is_unknown(self) -> bool {
        self.0.is_empty()
    }

    /// The binding names a type.
    pub fn is_type(self) -> bool {
        self.contains(Self::meta())
    }

    /// Generic arguments may follow a binding of this type (a type name or a template).
    pub fn is_generic_capable(self) -> bool {
        self.intersects(Self::meta().append(Self::template()))
    }

    pub fn is_function(self) -> bool {
        self.contains(Self::function())
    }

    pub fn is_integer(self) -> bool {
        self.0.contains(TypeFlags::INTEGER)
    }

    pub fn is_float(self) -> bool {
        self.0.contains(TypeFlags::FLOAT)
    }

    /// A signed integer.
    pub fn is_signed(self) -> bool {
        self.0.contains(TypeFlags::SIGNED)
    }

    pub fn is_numeric(self) -> bool {
        self.is_integer() || self.is_float()
    }

    // ---- decay --------------------------------------------------------------

    /// Decay a declared type to the type of a value bound with it.
    ///
    /// Strip `PACK`; a bare `TYPE` becomes `TYPE | AUTO`, anything else loses its `TYPE` bit.
    pub fn for_value(self) -> SymbolType {
        let t = self.without(Self::pack());
        if t == Self::meta() {
            t.append(Self::auto())
        } else {
            t.without(Self::meta())
        }
    }

    /// The type-name form of this type.
    pub fn as_type(self) -> SymbolType {
        self.append(Self::meta())
    }

    /// Width class of an integer or float type.
    pub fn width(self) -> Option<Width> {
        [Width::W64, Width::W32, Width::W16, Width::W8]
            .into_iter()
            .find(|w| self.0.contains(w.flag()))
    }

    // ---- named constructors -------------------------------------------------

    pub fn int(width: Width, signed: bool) -> SymbolType {
        let mut flags = TypeFlags::INTEGER | width.flag();
        if signed {
            flags |= TypeFlags::SIGNED;
        }
        SymbolType(flags)
    }

    pub fn float(width: Width) -> SymbolType {
        SymbolType(TypeFlags::FLOAT | width.flag())
    }

    pub const fn bool() -> SymbolType {
        SymbolType(TypeFlags::BOOL)
    }

    pub const fn char() -> SymbolType {
        SymbolType(TypeFlags::CHAR)
    }

    pub const fn string() -> SymbolType {
        SymbolType(TypeFlags::STRING)
    }

    pub const fn list() -> SymbolType {
        SymbolType(TypeFlags::LIST)
    }

    pub const fn array() -> SymbolType {
        SymbolType(TypeFlags::ARRAY)
    }

    pub const fn dict() -> SymbolType {
        SymbolType(TypeFlags::DICT)
    }

    pub const fn set() -> SymbolType {
        SymbolType(TypeFlags::SET)
    }

    pub const fn structure() -> SymbolType {
        SymbolType(TypeFlags::STRUCT)
    }

    pub const fn function() -> SymbolType {
        SymbolType(TypeFlags::FUNCTION)
    }

    pub const fn reference() -> SymbolType {
        SymbolType(TypeFlags::REFERENCE)
    }

    pub const fn pointer() -> SymbolType {
        SymbolType(TypeFlags::POINTER)
    }

    pub const fn pack() -> SymbolType {
        SymbolType(TypeFlags::PACK)
    }

    pub const fn auto() -> SymbolType {
        SymbolType(TypeFlags::AUTO)
    }

    pub const fn none() -> SymbolType {
        SymbolType(TypeFlags::NONE)
    }

    pub const fn template() -> SymbolType {
        SymbolType(TypeFlags::TEMPLATE)
    }

    /// The bare `TYPE` bit: "some type".
    pub const fn meta() -> SymbolType {
        SymbolType(TypeFlags::TYPE)
    }

    /// The type-name form of a builtin (e.g. `Int32` → `INTEGER|SIGNED|W32|TYPE`).
    pub fn builtin(id: BuiltinTypeId) -> SymbolType {
        let value = match builtin::info_for(id).shape {
            BuiltinShape::Bool => Self::bool(),
            BuiltinShape::Integer { bits, signed } => match Width::from_bits(bits) {
                Some(w) => Self::int(w, signed),
                None => Self::UNKNOWN,
            },
            BuiltinShape::Float { bits } => match Width::from_bits(bits) {
                Some(w) => Self::float(w),
                None => Self::UNKNOWN,
            },
            BuiltinShape::Char => Self::char(),
            BuiltinShape::String => Self::string(),
            BuiltinShape::List => Self::list(),
            BuiltinShape::Array => Self::array(),
            BuiltinShape::Dict => Self::dict(),
            BuiltinShape::Set => Self::set(),
            BuiltinShape::Meta => Self::UNKNOWN,
            BuiltinShape::None => Self::none(),
            BuiltinShape::Inferred => Self::auto(),
        };
        value.as_type()
    }
}

impl fmt::Display for SymbolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unknown() {
            return f.write_str("unknown");
        }
        if *self == Self::meta() {
            return f.write_str("type");
        }
        let prefix = if self.is_type() { "type " } else { "" };
        let mut value = self.without(Self::meta());
        let mut suffix = String::new();
        if value.contains(Self::pointer()) {
            value = value.without(Self::pointer());
            suffix.push('*');
        }
        if value.contains(Self::reference()) {
            value = value.without(Self::reference());
            suffix.push('&');
        }

        // `auto` and `none` are spelled without the `type ` prefix.
        let named = builtin::BUILTIN_TYPES
            .iter()
            .filter(|t| t.shape != BuiltinShape::Meta)
            .find(|t| Self::builtin(t.id).without(Self::meta()) == value);
        match named {
            Some(t) if matches!(t.shape, BuiltinShape::Inferred | BuiltinShape::None) => {
                write!(f, "{}{}", t.canonical, suffix)
            }
            Some(t) => write!(f, "{}{}{}", prefix, t.canonical, suffix),
            None if value.is_unknown() => write!(f, "type{}", suffix),
            None => {
                let names: Vec<String> = value.0.iter_names().map(|(n, _)| n.to_ascii_lowercase()).collect();
                write!(f, "{}{}{}", prefix, names.join("|"), suffix)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn composite_flags_share_bits() {
        assert!(SymbolType::string().contains(SymbolType::char()));
        assert!(SymbolType::string().contains(SymbolType::list()));
        assert!(SymbolType::dict().contains(SymbolType::structure()));
        assert!(SymbolType::set().contains(SymbolType::array()));
        assert!(!SymbolType::list().contains(SymbolType::string()));
    }

    #[test]
    fn mask_append_without() {
        let t = SymbolType::int(Width::W16, false).append(SymbolType::pointer());
        assert_eq!(t.mask(SymbolType::pointer()), SymbolType::pointer());
        assert_eq!(t.without(SymbolType::pointer()), SymbolType::int(Width::W16, false));
        assert!(SymbolType::UNKNOWN.is_unknown());
    }

    #[test]
    fn decay_of_bare_type_adds_auto() {
        let t = SymbolType::meta();
        assert_eq!(t.for_value(), SymbolType::meta().append(SymbolType::auto()));
        assert_eq!(t.append(SymbolType::pack()).for_value(), t.for_value());
    }

    #[test]
    fn decay_of_type_name_clears_type_bit() {
        let int32 = SymbolType::builtin(BuiltinTypeId::Int32);
        assert_eq!(int32.for_value(), SymbolType::int(Width::W32, true));
        let auto = SymbolType::builtin(BuiltinTypeId::Auto);
        assert_eq!(auto.for_value(), SymbolType::auto());
    }

    #[test]
    fn generic_capability() {
        assert!(SymbolType::builtin(BuiltinTypeId::List).is_generic_capable());
        assert!(SymbolType::function().append(SymbolType::template()).is_generic_capable());
        assert!(!SymbolType::int(Width::W32, true).is_generic_capable());
    }

    #[test]
    fn numeric_predicates() {
        let u16 = SymbolType::int(Width::W16, false);
        assert!(u16.is_integer() && u16.is_numeric());
        assert!(!u16.is_signed());
        assert!(SymbolType::int(Width::W16, true).is_signed());
        assert!(SymbolType::float(Width::W32).is_float());
        assert!(!SymbolType::float(Width::W32).is_signed());
        assert!(!SymbolType::string().is_numeric());
    }

    #[test]
    fn inferred_and_none_types_print_without_prefix() {
        assert_eq!(SymbolType::builtin(BuiltinTypeId::Auto).to_string(), "auto");
        assert_eq!(SymbolType::none().as_type().append(SymbolType::pointer()).to_string(), "none*");
        assert_eq!(SymbolType::builtin(BuiltinTypeId::Bool).to_string(), "type Bool");
    }

    #[test]
    fn display_uses_builtin_spellings() {
        assert_eq!(SymbolType::int(Width::W32, true).to_string(), "Int32");
        assert_eq!(SymbolType::builtin(BuiltinTypeId::UInt8).to_string(), "type UInt8");
        assert_eq!(SymbolType::string().to_string(), "String");
        assert_eq!(SymbolType::meta().to_string(), "type");
        assert_eq!(SymbolType::auto().to_string(), "auto");
        assert_eq!(SymbolType::builtin(BuiltinTypeId::None).to_string(), "none");
        assert_eq!(
            SymbolType::float(Width::W64).append(SymbolType::pointer()).to_string(),
            "Float64*"
        );
        assert_eq!(SymbolType::UNKNOWN.to_string(), "unknown");
        assert_eq!(
            SymbolType::function().append(SymbolType::template()).to_string(),
            "function|template"
        );
    }

    #[test]
    fn width_reports_largest_class() {
        assert_eq!(SymbolType::int(Width::W8, true).width(), Some(Width::W8));
        assert_eq!(SymbolType::bool().width(), None);
    }

    fn any_type() -> impl Strategy<Value = SymbolType> {
        any::<u32>().prop_map(|bits| SymbolType(TypeFlags::from_bits_truncate(bits)))
    }

    proptest! {
        #[test]
        fn decay_law(t in any_type()) {
            let bare = t.without(SymbolType::pack());
            let decayed = t.for_value();
            if bare == SymbolType::meta() {
                prop_assert_eq!(decayed, bare.append(SymbolType::auto()));
            } else {
                prop_assert_eq!(decayed, bare.without(SymbolType::meta()));
                prop_assert!(!decayed.is_type());
            }
            prop_assert!(!decayed.intersects(SymbolType::pack()));
        }
    }
}
