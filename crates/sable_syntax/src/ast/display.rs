//! S-expression rendering of AST nodes.
//!
//! `(tag child child ...)` with the tag names of [`NodeTag::as_str`]. Operators are printed in infix position
//! between their operands, absent optional children as `_`, and grouped child lists (call arguments, generic
//! arguments, base classes) as their own parenthesised group.

use super::{ClassKind, ForHeader, Node, NodeKind, NodeTag};
use crate::types::SymbolType;
use std::fmt;

enum Part<'a> {
    Node(&'a Node),
    Opt(Option<&'a Node>),
    Text(String),
    Group(&'static str, &'a [Node]),
}

fn sexpr(f: &mut fmt::Formatter<'_>, head: &str, parts: &[Part<'_>]) -> fmt::Result {
    write!(f, "({}", head)?;
    for part in parts {
        match part {
            Part::Node(node) => write!(f, " {}", node)?,
            Part::Opt(Some(node)) => write!(f, " {}", node)?,
            Part::Opt(None) => f.write_str(" _")?,
            Part::Text(text) => write!(f, " {}", text)?,
            Part::Group(name, nodes) => {
                write!(f, " ({}", name)?;
                for node in nodes.iter() {
                    write!(f, " {}", node)?;
                }
                f.write_str(")")?;
            }
        }
    }
    f.write_str(")")
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = self.tag().as_str();
        let op = || Part::Text(self.token.describe());
        match &self.kind {
            NodeKind::Ident(ident) => {
                let pack = if ident.ty.contains(SymbolType::pack()) { "..." } else { "" };
                write!(f, "(ident {}{})", ident.name, pack)
            }
            NodeKind::DottedIdent(parts) => sexpr(f, tag, &parts.iter().map(Part::Node).collect::<Vec<_>>()),
            NodeKind::Int(value) => write!(f, "(int {})", value),
            NodeKind::Float { value, single } => {
                write!(f, "(float {:?}{})", value, if *single { "f" } else { "" })
            }
            NodeKind::Str(value) => write!(f, "(string {:?})", value),
            NodeKind::Char(value) => write!(f, "(char {:?})", value),
            NodeKind::Bool(value) => write!(f, "(bool {})", value),
            NodeKind::Null => f.write_str("(null)"),
            NodeKind::List(items) => sexpr(f, tag, &items.iter().map(Part::Node).collect::<Vec<_>>()),
            NodeKind::Dict(entries) => {
                f.write_str("(dict")?;
                for (key, value) in entries {
                    write!(f, " (entry {} {})", key, value)?;
                }
                f.write_str(")")
            }
            NodeKind::Slice { target, start, end } => sexpr(
                f,
                tag,
                &[Part::Node(target), Part::Opt(start.as_deref()), Part::Opt(end.as_deref())],
            ),
            NodeKind::Index { target, index } => sexpr(f, tag, &[Part::Node(target), Part::Node(index)]),
            NodeKind::Call { callee, generics, args } => {
                let mut parts = vec![Part::Node(callee)];
                if !generics.is_empty() {
                    parts.push(Part::Group("generics", generics));
                }
                parts.push(Part::Group("args", args));
                sexpr(f, tag, &parts)
            }
            NodeKind::Lambda { params, ret, body } => {
                let mut parts = vec![Part::Node(params)];
                if let Some(ret) = ret {
                    parts.push(Part::Node(ret));
                }
                parts.push(Part::Node(body));
                sexpr(f, tag, &parts)
            }
            NodeKind::Deref(operand) | NodeKind::Delete(operand) | NodeKind::ReturnType(operand) => {
                sexpr(f, tag, &[Part::Node(operand)])
            }
            NodeKind::Invert(operand) | NodeKind::PrefixIncDec(operand) => sexpr(f, tag, &[op(), Part::Node(operand)]),
            NodeKind::PostfixIncDec(operand) => sexpr(f, tag, &[Part::Node(operand), op()]),
            NodeKind::Binary { lhs, rhs } => sexpr(f, tag, &[Part::Node(lhs), op(), Part::Node(rhs)]),
            NodeKind::Between { lower, value, upper } => {
                let op2 = self
                    .marks
                    .first()
                    .map(|t| t.describe())
                    .unwrap_or_else(|| "?".to_string());
                sexpr(
                    f,
                    tag,
                    &[
                        Part::Node(lower),
                        op(),
                        Part::Node(value),
                        Part::Text(op2),
                        Part::Node(upper),
                    ],
                )
            }
            NodeKind::Assignment { target, value } => sexpr(f, tag, &[Part::Node(target), op(), Part::Node(value)]),
            NodeKind::New { ty, args } => match args {
                Some(args) => sexpr(f, tag, &[Part::Node(ty), Part::Group("args", args)]),
                None => sexpr(f, tag, &[Part::Node(ty)]),
            },
            NodeKind::Import { module, alias, items } => {
                let mut parts = vec![Part::Node(module)];
                if let Some(alias) = alias {
                    parts.push(Part::Text(format!("(as {})", alias)));
                }
                parts.extend(items.iter().map(Part::Node));
                sexpr(f, tag, &parts)
            }
            NodeKind::ImportIdent { name, alias } => match alias {
                Some(alias) => sexpr(f, tag, &[Part::Node(name), Part::Text(format!("(as {})", alias))]),
                None => sexpr(f, tag, &[Part::Node(name)]),
            },
            NodeKind::Return(value) => match value {
                Some(value) => sexpr(f, tag, &[Part::Node(value)]),
                None => sexpr(f, tag, &[]),
            },
            NodeKind::If { cond, body } | NodeKind::Elif { cond, body } => {
                sexpr(f, tag, &[Part::Node(cond), Part::Node(body)])
            }
            NodeKind::Else { body } => sexpr(f, tag, &[Part::Node(body)]),
            NodeKind::IfStatement(branches) => sexpr(f, tag, &branches.iter().map(Part::Node).collect::<Vec<_>>()),
            NodeKind::For { header, body } => match header {
                ForHeader::Classic { init, cond, step } => sexpr(
                    f,
                    tag,
                    &[
                        Part::Opt(init.as_deref()),
                        Part::Opt(cond.as_deref()),
                        Part::Opt(step.as_deref()),
                        Part::Node(body),
                    ],
                ),
                ForHeader::Each { binding, iterable } => sexpr(
                    f,
                    "for-each",
                    &[Part::Node(binding), Part::Node(iterable), Part::Node(body)],
                ),
            },
            NodeKind::While { cond, body, do_while } => {
                if *do_while {
                    sexpr(f, "do-while", &[Part::Node(body), Part::Node(cond)])
                } else {
                    sexpr(f, tag, &[Part::Node(cond), Part::Node(body)])
                }
            }
            NodeKind::Class {
                kind,
                visibility,
                name,
                bases,
                body,
            } => {
                let head = match kind {
                    ClassKind::Class => "class",
                    ClassKind::Enum => "enum",
                };
                let mut parts = Vec::new();
                if let Some(visibility) = visibility {
                    parts.push(Part::Node(visibility));
                }
                parts.push(Part::Node(name));
                if !bases.is_empty() {
                    parts.push(Part::Group("bases", bases));
                }
                parts.push(Part::Node(body));
                sexpr(f, head, &parts)
            }
            NodeKind::StorageSpec | NodeKind::Visibility | NodeKind::Comment => sexpr(f, tag, &[op()]),
            NodeKind::TypeDecl(decl) => {
                let mut parts = Vec::new();
                if let Some(storage) = &decl.storage {
                    parts.push(Part::Node(storage));
                }
                parts.push(Part::Node(&decl.name));
                if !decl.generics.is_empty() {
                    parts.push(Part::Group("generics", &decl.generics));
                }
                parts.extend(self.marks.iter().map(|m| Part::Text(m.describe())));
                sexpr(f, tag, &parts)
            }
            NodeKind::IdentDef { ty, name, default } => {
                let mut parts = vec![Part::Node(ty), Part::Node(name)];
                if let Some(default) = default {
                    parts.push(Part::Node(default));
                }
                sexpr(f, tag, &parts)
            }
            NodeKind::Params(params) => sexpr(f, tag, &params.iter().map(Part::Node).collect::<Vec<_>>()),
            NodeKind::TemplateDef { params, item } => {
                sexpr(f, tag, &[Part::Group("params", params), Part::Node(item)])
            }
            NodeKind::FunctionDef(def) | NodeKind::OperatorDef(def) => {
                let mut parts = Vec::new();
                parts.extend(def.visibility.as_ref().map(Part::Node));
                parts.extend(def.storage.as_ref().map(Part::Node));
                if self.tag() == NodeTag::OperatorDef {
                    if let Some(symbol) = self.marks.first() {
                        parts.push(Part::Text(symbol.describe()));
                    }
                }
                parts.extend(def.name.as_ref().map(Part::Node));
                parts.push(Part::Node(&def.params));
                parts.extend(def.ret.as_ref().map(Part::Node));
                parts.push(Part::Node(&def.body));
                sexpr(f, tag, &parts)
            }
            NodeKind::Block { statements, closed } => {
                let head = if *closed { tag } else { "block!" };
                sexpr(f, head, &statements.iter().map(Part::Node).collect::<Vec<_>>())
            }
            NodeKind::Invalid => f.write_str("(invalid)"),
        }
    }
}
