//! Best-effort expression typing.
//!
//! [`resolve`] computes the [`SymbolType`] of an expression node from literals, operators and the symbols its
//! identifiers are bound to. It exists to give `auto` declarations a type; it is not a type checker and never
//! reports errors. Anything it cannot work out is [`SymbolType::UNKNOWN`].
//!
//! ## Examples
//! ```rust
//! use sable_syntax::{parse_str, resolver};
//! use sable_syntax::types::SymbolType;
//!
//! let result = parse_str("1 + 2.0");
//! let ty = resolver::resolve(&result.nodes[0], &result.symbols);
//! assert_eq!(ty, SymbolType::float(sable_syntax::types::Width::W64));
//! ```

use crate::ast::{Node, NodeKind};
use crate::symbols::SymbolTable;
use crate::types::{SymbolType, Width};
use sable_core::lang::operators::{OperatorClass, OperatorId};

/// Type of the value `node` evaluates to.
pub fn resolve(node: &Node, symbols: &SymbolTable) -> SymbolType {
    match &node.kind {
        NodeKind::Int(_) => SymbolType::int(Width::W32, true),
        NodeKind::Float { single: true, .. } => SymbolType::float(Width::W32),
        NodeKind::Float { .. } => SymbolType::float(Width::W64),
        NodeKind::Str(_) => SymbolType::string(),
        NodeKind::Char(_) => SymbolType::char(),
        NodeKind::Bool(_) => SymbolType::bool(),
        NodeKind::Null => SymbolType::pointer(),
        NodeKind::List(_) => SymbolType::list(),
        NodeKind::Dict(_) => SymbolType::dict(),
        NodeKind::Ident(_) | NodeKind::DottedIdent(_) => symbol_type(node, symbols),
        NodeKind::Binary { lhs, rhs } => match node.token.kind.operator_class() {
            Some(OperatorClass::Relational | OperatorClass::Logical) => SymbolType::bool(),
            _ => promote(resolve(lhs, symbols), resolve(rhs, symbols)),
        },
        NodeKind::Between { .. } => SymbolType::bool(),
        NodeKind::Invert(operand) => match node.operator() {
            Some(OperatorId::Bang | OperatorId::Not) => SymbolType::bool(),
            _ => resolve(operand, symbols),
        },
        NodeKind::PrefixIncDec(operand) | NodeKind::PostfixIncDec(operand) => resolve(operand, symbols),
        NodeKind::Deref(operand) => resolve(operand, symbols).without(SymbolType::pointer()),
        NodeKind::Call { callee, .. } => {
            let Some(id) = bound_symbol(callee) else {
                return SymbolType::UNKNOWN;
            };
            let symbol = symbols.get(id);
            if symbol.ty.is_type() {
                symbol.ty.for_value()
            } else {
                symbol.return_type.unwrap_or(SymbolType::UNKNOWN)
            }
        }
        NodeKind::Index { target, .. } => {
            if resolve(target, symbols) == SymbolType::string() {
                SymbolType::char()
            } else {
                SymbolType::UNKNOWN
            }
        }
        NodeKind::Slice { target, .. } => resolve(target, symbols),
        NodeKind::New { ty, .. } => match &ty.kind {
            NodeKind::TypeDecl(decl) => decl.ty.for_value().append(SymbolType::pointer()),
            _ => SymbolType::pointer(),
        },
        NodeKind::Lambda { .. } => SymbolType::function(),
        NodeKind::Assignment { value, .. } => resolve(value, symbols),
        _ => SymbolType::UNKNOWN,
    }
}

/// Symbol bound by an identifier, or by the last part of a dotted identifier.
fn bound_symbol(node: &Node) -> Option<crate::symbols::SymbolId> {
    match &node.kind {
        NodeKind::Ident(ident) => ident.symbol,
        NodeKind::DottedIdent(parts) => parts.last().and_then(bound_symbol),
        _ => None,
    }
}

fn symbol_type(node: &Node, symbols: &SymbolTable) -> SymbolType {
    bound_symbol(node).map_or(SymbolType::UNKNOWN, |id| symbols.get(id).ty)
}

/// Arithmetic promotion: float wins, the wider width wins, signed if either side is.
fn promote(lhs: SymbolType, rhs: SymbolType) -> SymbolType {
    if lhs == rhs {
        return lhs;
    }
    if !lhs.is_numeric() || !rhs.is_numeric() {
        return SymbolType::UNKNOWN;
    }
    let width = lhs.width().max(rhs.width()).unwrap_or(Width::W32);
    if lhs.is_float() || rhs.is_float() {
        return SymbolType::float(width);
    }
    SymbolType::int(width, lhs.is_signed() || rhs.is_signed())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_str;

    fn type_of(source: &str) -> SymbolType {
        let result = parse_str(source);
        let last = result.nodes.last().expect("at least one node");
        resolve(last, &result.symbols)
    }

    #[test]
    fn literals() {
        assert_eq!(type_of("1"), SymbolType::int(Width::W32, true));
        assert_eq!(type_of("1.5"), SymbolType::float(Width::W64));
        assert_eq!(type_of("1.5f"), SymbolType::float(Width::W32));
        assert_eq!(type_of("\"s\""), SymbolType::string());
        assert_eq!(type_of("'c'"), SymbolType::char());
        assert_eq!(type_of("true"), SymbolType::bool());
        assert_eq!(type_of("nullptr"), SymbolType::pointer());
        assert_eq!(type_of("[1, 2]"), SymbolType::list());
    }

    #[test]
    fn promotion_rules() {
        let i32 = SymbolType::int(Width::W32, true);
        let u8 = SymbolType::int(Width::W8, false);
        let i64 = SymbolType::int(Width::W64, true);
        assert_eq!(promote(i32, i32), i32);
        assert_eq!(promote(u8, i64), i64);
        assert_eq!(promote(u8, SymbolType::int(Width::W16, false)), SymbolType::int(Width::W16, false));
        assert_eq!(promote(u8, SymbolType::float(Width::W32)), SymbolType::float(Width::W32));
        assert_eq!(promote(SymbolType::string(), i32), SymbolType::UNKNOWN);
        // signedness comes from either side, width from the wider one
        assert_eq!(promote(SymbolType::int(Width::W32, false), SymbolType::int(Width::W8, true)), i32);
        assert_eq!(promote(SymbolType::float(Width::W32), SymbolType::float(Width::W64)), SymbolType::float(Width::W64));
    }

    #[test]
    fn operators() {
        assert_eq!(type_of("1 < 2"), SymbolType::bool());
        assert_eq!(type_of("1 and 0"), SymbolType::bool());
        assert_eq!(type_of("!1"), SymbolType::bool());
        assert_eq!(type_of("-1"), SymbolType::int(Width::W32, true));
        assert_eq!(type_of("1 * 2.0f"), SymbolType::float(Width::W32));
    }

    #[test]
    fn identifiers_and_calls() {
        assert_eq!(type_of("Int64 n; n"), SymbolType::int(Width::W64, true));
        assert_eq!(
            type_of("function f() -> Bool { return true; } f()"),
            SymbolType::bool()
        );
        assert_eq!(type_of("String s; s[0]"), SymbolType::char());
        assert_eq!(type_of("Int32(3)"), SymbolType::int(Width::W32, true));
        assert_eq!(type_of("undefined"), SymbolType::UNKNOWN);
    }

    #[test]
    fn new_yields_pointer() {
        assert_eq!(
            type_of("new Int32()"),
            SymbolType::int(Width::W32, true).append(SymbolType::pointer())
        );
    }
}
