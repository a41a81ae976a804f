//! Operator vocabulary.
//!
//! This module defines the canonical operator set (symbol operators like `+` and word operators like `and`) along
//! with the metadata the parser's precedence chain relies on: an [`OperatorClass`] per operator, a relative
//! precedence, and fixity.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**.
//! - Word operators (`and`, `or`, `not`) have [`OperatorInfo::is_keyword_spelling`] set to `true`. They never appear
//!   in the keyword registry.
//! - Some spellings play more than one role (`-` is both additive and negation, `*` is both multiplicative and
//!   dereference). The registry records the *binary* role; the parser handles the prefix forms.
//!
//! ## Examples
//! ```rust
//! use sable_core::lang::operators::{self, OperatorClass, OperatorId};
//!
//! assert_eq!(operators::from_str("+"), Some(OperatorId::Plus));
//! assert_eq!(operators::class(OperatorId::And), OperatorClass::Logical);
//! assert!(operators::info_for(OperatorId::Star).precedence > operators::info_for(OperatorId::Plus).precedence);
//! ```

/// Define whether an operator is infix (binary), prefix or postfix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fixity {
    Infix,
    Prefix,
    /// Usable both before and after its operand (`++`, `--`).
    PrefixOrPostfix,
}

/// Precedence family an operator belongs to.
///
/// The parser has one climbing level per binary class; a level folds operators by matching on this class
/// instead of comparing spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorClass {
    Multiplicative,
    Additive,
    Shift,
    Bitwise,
    Relational,
    Logical,
    Assignment,
    IncDec,
    Invert,
}

/// Stable identifier for every operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorId {
    // Arithmetic
    Plus,
    Minus,
    Star,
    Slash,
    Percent,

    // Increment / decrement
    PlusPlus,
    MinusMinus,

    // Shift
    Shl,
    Shr,

    // Bitwise
    Amp,
    Pipe,
    Caret,

    // Comparison
    EqEq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Logical
    AmpAmp,
    PipePipe,

    // Unary inversion
    Bang,
    Tilde,

    // Assignment
    Eq,
    PlusEq,
    MinusEq,
    StarEq,
    SlashEq,
    PercentEq,
    AmpEq,
    PipeEq,
    CaretEq,
    ShlEq,
    ShrEq,

    // Word operators
    And,
    Or,
    Not,
}

/// Metadata for an operator.
///
/// ## Notes
/// - `precedence` is a relative ordering where higher binds tighter. Operators of one class share a precedence.
#[derive(Debug, Clone, Copy)]
pub struct OperatorInfo {
    pub id: OperatorId,
    pub spelling: &'static str,
    pub class: OperatorClass,
    pub precedence: u8,
    pub fixity: Fixity,
    pub is_keyword_spelling: bool,
}

/// Registry of all operators.
pub const OPERATORS: &[OperatorInfo] = &[
    // Arithmetic
    op(OperatorId::Star, "*", OperatorClass::Multiplicative, Fixity::Infix),
    op(OperatorId::Slash, "/", OperatorClass::Multiplicative, Fixity::Infix),
    op(OperatorId::Percent, "%", OperatorClass::Multiplicative, Fixity::Infix),
    op(OperatorId::Plus, "+", OperatorClass::Additive, Fixity::Infix),
    op(OperatorId::Minus, "-", OperatorClass::Additive, Fixity::Infix),
    // Increment / decrement
    op(OperatorId::PlusPlus, "++", OperatorClass::IncDec, Fixity::PrefixOrPostfix),
    op(OperatorId::MinusMinus, "--", OperatorClass::IncDec, Fixity::PrefixOrPostfix),
    // Shift
    op(OperatorId::Shl, "<<", OperatorClass::Shift, Fixity::Infix),
    op(OperatorId::Shr, ">>", OperatorClass::Shift, Fixity::Infix),
    // Bitwise
    op(OperatorId::Amp, "&", OperatorClass::Bitwise, Fixity::Infix),
    op(OperatorId::Pipe, "|", OperatorClass::Bitwise, Fixity::Infix),
    op(OperatorId::Caret, "^", OperatorClass::Bitwise, Fixity::Infix),
    // Comparison
    op(OperatorId::EqEq, "==", OperatorClass::Relational, Fixity::Infix),
    op(OperatorId::NotEq, "!=", OperatorClass::Relational, Fixity::Infix),
    op(OperatorId::Lt, "<", OperatorClass::Relational, Fixity::Infix),
    op(OperatorId::LtEq, "<=", OperatorClass::Relational, Fixity::Infix),
    op(OperatorId::Gt, ">", OperatorClass::Relational, Fixity::Infix),
    op(OperatorId::GtEq, ">=", OperatorClass::Relational, Fixity::Infix),
    // Logical
    op(OperatorId::AmpAmp, "&&", OperatorClass::Logical, Fixity::Infix),
    op(OperatorId::PipePipe, "||", OperatorClass::Logical, Fixity::Infix),
    // Unary inversion
    op(OperatorId::Bang, "!", OperatorClass::Invert, Fixity::Prefix),
    op(OperatorId::Tilde, "~", OperatorClass::Invert, Fixity::Prefix),
    // Assignment
    op(OperatorId::Eq, "=", OperatorClass::Assignment, Fixity::Infix),
    op(OperatorId::PlusEq, "+=", OperatorClass::Assignment, Fixity::Infix),
    op(OperatorId::MinusEq, "-=", OperatorClass::Assignment, Fixity::Infix),
    op(OperatorId::StarEq, "*=", OperatorClass::Assignment, Fixity::Infix),
    op(OperatorId::SlashEq, "/=", OperatorClass::Assignment, Fixity::Infix),
    op(OperatorId::PercentEq, "%=", OperatorClass::Assignment, Fixity::Infix),
    op(OperatorId::AmpEq, "&=", OperatorClass::Assignment, Fixity::Infix),
    op(OperatorId::PipeEq, "|=", OperatorClass::Assignment, Fixity::Infix),
    op(OperatorId::CaretEq, "^=", OperatorClass::Assignment, Fixity::Infix),
    op(OperatorId::ShlEq, "<<=", OperatorClass::Assignment, Fixity::Infix),
    op(OperatorId::ShrEq, ">>=", OperatorClass::Assignment, Fixity::Infix),
    // Word operators (keyword spellings)
    word(OperatorId::And, "and", OperatorClass::Logical, Fixity::Infix),
    word(OperatorId::Or, "or", OperatorClass::Logical, Fixity::Infix),
    word(OperatorId::Not, "not", OperatorClass::Invert, Fixity::Prefix),
];

/// Return the full metadata entry for an operator.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: OperatorId) -> &'static OperatorInfo {
    OPERATORS.iter().find(|o| o.id == id).expect("operator info missing")
}

/// Return the canonical spelling for an operator.
pub fn as_str(id: OperatorId) -> &'static str {
    info_for(id).spelling
}

/// Return the precedence family of an operator.
pub fn class(id: OperatorId) -> OperatorClass {
    info_for(id).class
}

/// Resolve an operator spelling to its identifier.
///
/// ## Returns
/// - `Some(OperatorId)` if the spelling exists in [`OPERATORS`].
/// - `None` otherwise.
pub fn from_str(spelling: &str) -> Option<OperatorId> {
    OPERATORS.iter().find(|o| o.spelling == spelling).map(|o| o.id)
}

/// Resolve a *word* operator (`and`, `or`, `not`) from an identifier-shaped spelling.
pub fn from_word(word: &str) -> Option<OperatorId> {
    OPERATORS
        .iter()
        .find(|o| o.is_keyword_spelling && o.spelling == word)
        .map(|o| o.id)
}

/// Return `true` for the ordering comparisons (`<`, `<=`, `>`, `>=`) that may chain into a range test.
pub fn is_ordering(id: OperatorId) -> bool {
    matches!(id, OperatorId::Lt | OperatorId::LtEq | OperatorId::Gt | OperatorId::GtEq)
}

// --- helpers -----------------------------------------------------------------

const fn precedence_of(class: OperatorClass) -> u8 {
    match class {
        OperatorClass::Assignment => 5,
        OperatorClass::Logical => 10,
        OperatorClass::Relational => 30,
        OperatorClass::Bitwise => 40,
        OperatorClass::Shift => 50,
        OperatorClass::Additive => 60,
        OperatorClass::Multiplicative => 70,
        OperatorClass::IncDec => 80,
        OperatorClass::Invert => 90,
    }
}

const fn op(id: OperatorId, spelling: &'static str, class: OperatorClass, fixity: Fixity) -> OperatorInfo {
    OperatorInfo {
        id,
        spelling,
        class,
        precedence: precedence_of(class),
        fixity,
        is_keyword_spelling: false,
    }
}

const fn word(id: OperatorId, spelling: &'static str, class: OperatorClass, fixity: Fixity) -> OperatorInfo {
    OperatorInfo {
        is_keyword_spelling: true,
        ..op(id, spelling, class, fixity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_operator_round_trips_through_its_spelling() {
        for o in OPERATORS {
            assert_eq!(from_str(o.spelling), Some(o.id), "{}", o.spelling);
            assert_eq!(as_str(o.id), o.spelling);
        }
    }

    #[test]
    fn word_operators_are_flagged() {
        assert_eq!(from_word("and"), Some(OperatorId::And));
        assert_eq!(from_word("not"), Some(OperatorId::Not));
        assert_eq!(from_word("&&"), None);
        assert!(info_for(OperatorId::Or).is_keyword_spelling);
        assert!(!info_for(OperatorId::PipePipe).is_keyword_spelling);
    }

    #[test]
    fn precedence_chain_is_ordered_tightest_first() {
        let chain = [
            OperatorId::Bang,
            OperatorId::PlusPlus,
            OperatorId::Star,
            OperatorId::Plus,
            OperatorId::Shl,
            OperatorId::Amp,
            OperatorId::Lt,
            OperatorId::AmpAmp,
            OperatorId::Eq,
        ];
        for pair in chain.windows(2) {
            assert!(
                info_for(pair[0]).precedence > info_for(pair[1]).precedence,
                "{:?} should bind tighter than {:?}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn ordering_excludes_equality() {
        assert!(is_ordering(OperatorId::GtEq));
        assert!(!is_ordering(OperatorId::EqEq));
        assert!(!is_ordering(OperatorId::NotEq));
    }
}
