//! Abstract syntax tree for Sable.
//!
//! Every syntactic form is one variant of the closed [`NodeKind`] enum, wrapped in a [`Node`] that carries the
//! node's anchor token, its source span and the comments attached to it. Nodes own their children; the only
//! outward references are the [`SymbolId`]s identifier nodes hold into the parse's symbol table.
//!
//! ## Notes
//! - Nodes are built once by the parser. The two sanctioned mutators are [`Node::extend_span`] and
//!   [`Node::attach_symbol`], both used while the owning parse is still running.
//! - [`Node::is_valid`] is the conjunction of the anchor token's validity and the validity of every child that is
//!   present. A missing optional child never makes a node invalid.
//! - `Display` renders an S-expression (see `display.rs`), which is what the snapshot tests pin down.

mod display;

use crate::lexer::Token;
use crate::source::Span;
use crate::symbols::{Symbol, SymbolId, SymbolOrigin};
use crate::types::SymbolType;
use sable_core::lang::operators::{self, OperatorClass, OperatorId};

/// A parsed node plus its anchor token, span and attached comments.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    /// The token this node was built from (keyword, operator, identifier, literal...).
    pub token: Token,
    pub span: Span,
    /// Secondary keyword/operator tokens owned by this node (`as`, `import` after `from`, the second operator of a
    /// chained relation, pointer/reference modifiers, the `while` of a do-while...).
    pub marks: Vec<Token>,
    /// Comments on the lines before this node.
    pub leading: Vec<Token>,
    /// Comments inside this node or after it on its last line.
    pub trailing: Vec<Token>,
}

/// An identifier occurrence.
#[derive(Debug, Clone, PartialEq)]
pub struct Ident {
    pub name: String,
    /// Bound symbol, when the name resolved.
    pub symbol: Option<SymbolId>,
    /// Type observed when the symbol was attached.
    pub ty: SymbolType,
    pub role: IdentRole,
    /// The occurrence introduces the binding.
    pub declaration: bool,
    /// The bound symbol is a builtin.
    pub builtin: bool,
}

/// What an identifier occurrence refers to, beyond its type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IdentRole {
    #[default]
    Variable,
    Parameter,
    /// Member of a class or enum.
    Property,
    /// Name of an enum declaration.
    Enum,
    /// Segment of an import path.
    Namespace,
}

/// Whether a class body is a `class` or an `enum`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassKind {
    Class,
    Enum,
}

/// The two `for` forms.
#[derive(Debug, Clone, PartialEq)]
pub enum ForHeader {
    /// `for (init; cond; step)`
    Classic {
        init: Option<Box<Node>>,
        cond: Option<Box<Node>>,
        step: Option<Box<Node>>,
    },
    /// `for (Type x : iterable)`
    Each { binding: Box<Node>, iterable: Box<Node> },
}

/// Shared shape of function and operator definitions.
#[derive(Debug, Clone, PartialEq)]
pub struct Callable {
    pub visibility: Option<Node>,
    pub storage: Option<Node>,
    /// Function name; `None` for operator definitions (the operator token is the node's first mark).
    pub name: Option<Node>,
    pub params: Node,
    pub ret: Option<Node>,
    pub body: Node,
}

/// A `[storage] Type[<args>][&|*]` type reference.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDecl {
    pub storage: Option<Box<Node>>,
    /// Identifier or dotted identifier naming the type.
    pub name: Box<Node>,
    pub generics: Vec<Node>,
    /// Type-name form including pointer/reference modifiers.
    pub ty: SymbolType,
}

/// Every syntactic form.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    // ---- values ----
    Ident(Ident),
    DottedIdent(Vec<Node>),
    Int(u64),
    Float { value: f64, single: bool },
    Str(String),
    Char(char),
    Bool(bool),
    Null,
    List(Vec<Node>),
    Dict(Vec<(Node, Node)>),
    Slice {
        target: Box<Node>,
        start: Option<Box<Node>>,
        end: Option<Box<Node>>,
    },
    Index {
        target: Box<Node>,
        index: Box<Node>,
    },
    Call {
        callee: Box<Node>,
        generics: Vec<Node>,
        args: Vec<Node>,
    },
    Lambda {
        params: Box<Node>,
        ret: Option<Box<Node>>,
        body: Box<Node>,
    },

    // ---- operators (operator in `token`) ----
    Deref(Box<Node>),
    Invert(Box<Node>),
    PrefixIncDec(Box<Node>),
    PostfixIncDec(Box<Node>),
    Binary {
        lhs: Box<Node>,
        rhs: Box<Node>,
    },
    /// `lower op1 value op2 upper`; `op1` is the anchor token, `op2` the first mark.
    Between {
        lower: Box<Node>,
        value: Box<Node>,
        upper: Box<Node>,
    },
    Assignment {
        target: Box<Node>,
        value: Box<Node>,
    },

    // ---- statements ----
    Delete(Box<Node>),
    New {
        ty: Box<Node>,
        args: Option<Vec<Node>>,
    },
    Import {
        module: Box<Node>,
        alias: Option<Box<Node>>,
        items: Vec<Node>,
    },
    ImportIdent {
        name: Box<Node>,
        alias: Option<Box<Node>>,
    },
    Return(Option<Box<Node>>),
    If {
        cond: Box<Node>,
        body: Box<Node>,
    },
    Elif {
        cond: Box<Node>,
        body: Box<Node>,
    },
    Else {
        body: Box<Node>,
    },
    IfStatement(Vec<Node>),
    For {
        header: ForHeader,
        body: Box<Node>,
    },
    While {
        cond: Box<Node>,
        body: Box<Node>,
        do_while: bool,
    },

    // ---- declarations ----
    Class {
        kind: ClassKind,
        visibility: Option<Box<Node>>,
        name: Box<Node>,
        bases: Vec<Node>,
        body: Box<Node>,
    },
    /// Storage/location keyword (in `token`).
    StorageSpec,
    TypeDecl(TypeDecl),
    IdentDef {
        ty: Box<Node>,
        name: Box<Node>,
        default: Option<Box<Node>>,
    },
    Params(Vec<Node>),
    ReturnType(Box<Node>),
    TemplateDef {
        params: Vec<Node>,
        item: Box<Node>,
    },
    FunctionDef(Box<Callable>),
    OperatorDef(Box<Callable>),
    /// Visibility keyword (in `token`); a bare `public:` section label when it stands alone.
    Visibility,
    Block {
        statements: Vec<Node>,
        closed: bool,
    },
    /// A comment that could not be attached to a statement.
    Comment,
    /// Placeholder for a construct that failed to parse.
    Invalid,
}

/// Fieldless mirror of [`NodeKind`], one tag per syntactic form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeTag {
    Ident,
    DottedIdent,
    Int,
    Float,
    Str,
    Char,
    Bool,
    Null,
    List,
    Dict,
    Slice,
    Index,
    Call,
    Lambda,
    Deref,
    Invert,
    PrefixIncDec,
    PostfixIncDec,
    Multiplicative,
    Additive,
    Shift,
    Bitwise,
    Relational,
    Logical,
    Between,
    Assignment,
    Delete,
    New,
    Import,
    ImportIdent,
    Return,
    If,
    Elif,
    Else,
    IfStatement,
    For,
    While,
    Class,
    StorageSpec,
    TypeDecl,
    IdentDef,
    Params,
    ReturnType,
    TemplateDef,
    FunctionDef,
    OperatorDef,
    Visibility,
    Block,
    Comment,
    Invalid,
}

impl NodeTag {
    /// Name used as the head of the S-expression rendering.
    pub fn as_str(self) -> &'static str {
        match self {
            NodeTag::Ident => "ident",
            NodeTag::DottedIdent => "dotted",
            NodeTag::Int => "int",
            NodeTag::Float => "float",
            NodeTag::Str => "string",
            NodeTag::Char => "char",
            NodeTag::Bool => "bool",
            NodeTag::Null => "null",
            NodeTag::List => "list",
            NodeTag::Dict => "dict",
            NodeTag::Slice => "slice",
            NodeTag::Index => "index",
            NodeTag::Call => "call",
            NodeTag::Lambda => "lambda",
            NodeTag::Deref => "deref",
            NodeTag::Invert => "invert",
            NodeTag::PrefixIncDec => "pre-incdec",
            NodeTag::PostfixIncDec => "post-incdec",
            NodeTag::Multiplicative => "mul",
            NodeTag::Additive => "add",
            NodeTag::Shift => "shift",
            NodeTag::Bitwise => "bit",
            NodeTag::Relational => "rel",
            NodeTag::Logical => "logic",
            NodeTag::Between => "between",
            NodeTag::Assignment => "assign",
            NodeTag::Delete => "delete",
            NodeTag::New => "new",
            NodeTag::Import => "import",
            NodeTag::ImportIdent => "import-ident",
            NodeTag::Return => "return",
            NodeTag::If => "if",
            NodeTag::Elif => "elif",
            NodeTag::Else => "else",
            NodeTag::IfStatement => "if-statement",
            NodeTag::For => "for",
            NodeTag::While => "while",
            NodeTag::Class => "class",
            NodeTag::StorageSpec => "storage",
            NodeTag::TypeDecl => "type",
            NodeTag::IdentDef => "ident-def",
            NodeTag::Params => "params",
            NodeTag::ReturnType => "return-type",
            NodeTag::TemplateDef => "template",
            NodeTag::FunctionDef => "function",
            NodeTag::OperatorDef => "operator",
            NodeTag::Visibility => "visibility",
            NodeTag::Block => "block",
            NodeTag::Comment => "comment",
            NodeTag::Invalid => "invalid",
        }
    }
}

impl Node {
    /// Build a node anchored at `token`; the span starts as the token's span.
    pub fn new(kind: NodeKind, token: Token) -> Self {
        Self {
            span: token.span,
            kind,
            token,
            marks: Vec::new(),
            leading: Vec::new(),
            trailing: Vec::new(),
        }
    }

    /// A placeholder for a missing or broken construct.
    pub fn invalid(token: Token) -> Self {
        Self::new(NodeKind::Invalid, token)
    }

    /// An unresolved identifier node.
    pub fn ident(name: impl Into<String>, token: Token) -> Self {
        Self::new(
            NodeKind::Ident(Ident {
                name: name.into(),
                symbol: None,
                ty: SymbolType::UNKNOWN,
                role: IdentRole::Variable,
                declaration: false,
                builtin: false,
            }),
            token,
        )
    }

    pub fn with_mark(mut self, token: Token) -> Self {
        self.extend_span(token.span);
        self.marks.push(token);
        self
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.extend_span(span);
        self
    }

    /// Grow the span to also cover `span`.
    pub fn extend_span(&mut self, span: Span) {
        self.span = self.span.merge(span);
    }

    /// Grow the span to cover `child` and return the child boxed.
    pub fn adopt(&mut self, child: Node) -> Box<Node> {
        self.extend_span(child.span);
        Box::new(child)
    }

    /// Bind an identifier node to a symbol. No-op on other kinds.
    pub fn attach_symbol(&mut self, id: SymbolId, symbol: &Symbol, role: IdentRole) {
        if let NodeKind::Ident(ident) = &mut self.kind {
            ident.symbol = Some(id);
            ident.ty = symbol.ty;
            ident.builtin = symbol.origin == SymbolOrigin::Builtin;
            ident.role = role;
        }
    }

    /// Mark an identifier node as the declaring occurrence. No-op on other kinds.
    pub fn mark_declaration(&mut self) {
        if let NodeKind::Ident(ident) = &mut self.kind {
            ident.declaration = true;
        }
    }

    pub fn as_ident(&self) -> Option<&Ident> {
        match &self.kind {
            NodeKind::Ident(ident) => Some(ident),
            _ => None,
        }
    }

    pub fn as_ident_mut(&mut self) -> Option<&mut Ident> {
        match &mut self.kind {
            NodeKind::Ident(ident) => Some(ident),
            _ => None,
        }
    }

    /// Operator carried by the anchor token, for operator nodes.
    pub fn operator(&self) -> Option<OperatorId> {
        self.token.operator_id()
    }

    pub fn tag(&self) -> NodeTag {
        match &self.kind {
            NodeKind::Ident(_) => NodeTag::Ident,
            NodeKind::DottedIdent(_) => NodeTag::DottedIdent,
            NodeKind::Int(_) => NodeTag::Int,
            NodeKind::Float { .. } => NodeTag::Float,
            NodeKind::Str(_) => NodeTag::Str,
            NodeKind::Char(_) => NodeTag::Char,
            NodeKind::Bool(_) => NodeTag::Bool,
            NodeKind::Null => NodeTag::Null,
            NodeKind::List(_) => NodeTag::List,
            NodeKind::Dict(_) => NodeTag::Dict,
            NodeKind::Slice { .. } => NodeTag::Slice,
            NodeKind::Index { .. } => NodeTag::Index,
            NodeKind::Call { .. } => NodeTag::Call,
            NodeKind::Lambda { .. } => NodeTag::Lambda,
            NodeKind::Deref(_) => NodeTag::Deref,
            NodeKind::Invert(_) => NodeTag::Invert,
            NodeKind::PrefixIncDec(_) => NodeTag::PrefixIncDec,
            NodeKind::PostfixIncDec(_) => NodeTag::PostfixIncDec,
            NodeKind::Binary { .. } => match self.operator().map(operators::class) {
                Some(OperatorClass::Multiplicative) => NodeTag::Multiplicative,
                Some(OperatorClass::Additive) => NodeTag::Additive,
                Some(OperatorClass::Shift) => NodeTag::Shift,
                Some(OperatorClass::Bitwise) => NodeTag::Bitwise,
                Some(OperatorClass::Relational) => NodeTag::Relational,
                Some(OperatorClass::Logical) => NodeTag::Logical,
                _ => NodeTag::Invalid,
            },
            NodeKind::Between { .. } => NodeTag::Between,
            NodeKind::Assignment { .. } => NodeTag::Assignment,
            NodeKind::Delete(_) => NodeTag::Delete,
            NodeKind::New { .. } => NodeTag::New,
            NodeKind::Import { .. } => NodeTag::Import,
            NodeKind::ImportIdent { .. } => NodeTag::ImportIdent,
            NodeKind::Return(_) => NodeTag::Return,
            NodeKind::If { .. } => NodeTag::If,
            NodeKind::Elif { .. } => NodeTag::Elif,
            NodeKind::Else { .. } => NodeTag::Else,
            NodeKind::IfStatement(_) => NodeTag::IfStatement,
            NodeKind::For { .. } => NodeTag::For,
            NodeKind::While { .. } => NodeTag::While,
            NodeKind::Class { .. } => NodeTag::Class,
            NodeKind::StorageSpec => NodeTag::StorageSpec,
            NodeKind::TypeDecl(_) => NodeTag::TypeDecl,
            NodeKind::IdentDef { .. } => NodeTag::IdentDef,
            NodeKind::Params(_) => NodeTag::Params,
            NodeKind::ReturnType(_) => NodeTag::ReturnType,
            NodeKind::TemplateDef { .. } => NodeTag::TemplateDef,
            NodeKind::FunctionDef(_) => NodeTag::FunctionDef,
            NodeKind::OperatorDef(_) => NodeTag::OperatorDef,
            NodeKind::Visibility => NodeTag::Visibility,
            NodeKind::Block { .. } => NodeTag::Block,
            NodeKind::Comment => NodeTag::Comment,
            NodeKind::Invalid => NodeTag::Invalid,
        }
    }

    /// Direct children in source order.
    pub fn children(&self) -> Vec<&Node> {
        let mut out: Vec<&Node> = Vec::new();
        match &self.kind {
            NodeKind::Ident(_)
            | NodeKind::Int(_)
            | NodeKind::Float { .. }
            | NodeKind::Str(_)
            | NodeKind::Char(_)
            | NodeKind::Bool(_)
            | NodeKind::Null
            | NodeKind::StorageSpec
            | NodeKind::Visibility
            | NodeKind::Comment
            | NodeKind::Invalid => {}
            NodeKind::DottedIdent(parts) | NodeKind::List(parts) | NodeKind::Params(parts) => out.extend(parts),
            NodeKind::IfStatement(branches) => out.extend(branches),
            NodeKind::Block { statements, .. } => out.extend(statements),
            NodeKind::Dict(entries) => {
                for (k, v) in entries {
                    out.push(k);
                    out.push(v);
                }
            }
            NodeKind::Slice { target, start, end } => {
                out.push(target);
                out.extend(start.as_deref());
                out.extend(end.as_deref());
            }
            NodeKind::Index { target, index } => {
                out.push(target);
                out.push(index);
            }
            NodeKind::Call { callee, generics, args } => {
                out.push(callee);
                out.extend(generics);
                out.extend(args);
            }
            NodeKind::Lambda { params, ret, body } => {
                out.push(params);
                out.extend(ret.as_deref());
                out.push(body);
            }
            NodeKind::Deref(operand)
            | NodeKind::Invert(operand)
            | NodeKind::PrefixIncDec(operand)
            | NodeKind::PostfixIncDec(operand)
            | NodeKind::Delete(operand)
            | NodeKind::ReturnType(operand) => out.push(operand),
            NodeKind::Binary { lhs, rhs } => {
                out.push(lhs);
                out.push(rhs);
            }
            NodeKind::Between { lower, value, upper } => {
                out.push(lower);
                out.push(value);
                out.push(upper);
            }
            NodeKind::Assignment { target, value } => {
                out.push(target);
                out.push(value);
            }
            NodeKind::New { ty, args } => {
                out.push(ty);
                if let Some(args) = args {
                    out.extend(args);
                }
            }
            NodeKind::Import { module, alias, items } => {
                out.push(module);
                out.extend(alias.as_deref());
                out.extend(items);
            }
            NodeKind::ImportIdent { name, alias } => {
                out.push(name);
                out.extend(alias.as_deref());
            }
            NodeKind::Return(value) => out.extend(value.as_deref()),
            NodeKind::If { cond, body } | NodeKind::Elif { cond, body } => {
                out.push(cond);
                out.push(body);
            }
            NodeKind::Else { body } => out.push(body),
            NodeKind::For { header, body } => {
                match header {
                    ForHeader::Classic { init, cond, step } => {
                        out.extend(init.as_deref());
                        out.extend(cond.as_deref());
                        out.extend(step.as_deref());
                    }
                    ForHeader::Each { binding, iterable } => {
                        out.push(binding);
                        out.push(iterable);
                    }
                }
                out.push(body);
            }
            NodeKind::While { cond, body, do_while } => {
                if *do_while {
                    out.push(body);
                    out.push(cond);
                } else {
                    out.push(cond);
                    out.push(body);
                }
            }
            NodeKind::Class {
                visibility,
                name,
                bases,
                body,
                ..
            } => {
                out.extend(visibility.as_deref());
                out.push(name);
                out.extend(bases);
                out.push(body);
            }
            NodeKind::TypeDecl(decl) => {
                out.extend(decl.storage.as_deref());
                out.push(&decl.name);
                out.extend(&decl.generics);
            }
            NodeKind::IdentDef { ty, name, default } => {
                out.push(ty);
                out.push(name);
                out.extend(default.as_deref());
            }
            NodeKind::TemplateDef { params, item } => {
                out.extend(params);
                out.push(item);
            }
            NodeKind::FunctionDef(def) | NodeKind::OperatorDef(def) => {
                out.extend(def.visibility.as_ref());
                out.extend(def.storage.as_ref());
                out.extend(def.name.as_ref());
                out.push(&def.params);
                out.extend(def.ret.as_ref());
                out.push(&def.body);
            }
        }
        out
    }

    /// A node is valid when its anchor token is valid and every present child is valid.
    pub fn is_valid(&self) -> bool {
        let own = match &self.kind {
            NodeKind::Invalid => false,
            NodeKind::Block { closed, .. } => *closed,
            _ => true,
        };
        own && self.token.is_valid() && self.children().into_iter().all(Node::is_valid)
    }

    /// Depth-first pre-order walk over this node and its descendants.
    pub fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a Node)) {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }
}
