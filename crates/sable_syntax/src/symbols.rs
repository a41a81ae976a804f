//! Scoped symbol table.
//!
//! Scopes form a parent-linked chain stored in an arena. The table tracks one *current* scope; `find` walks from it
//! towards the global scope, while `add`/`insert`/`find_local` only touch the current scope. Popping a scope never
//! frees it, so a [`SymbolId`] kept by an AST identifier stays resolvable after parsing.
//!
//! ## Examples
//! ```rust
//! use sable_syntax::symbols::{Symbol, SymbolTable};
//! use sable_syntax::types::SymbolType;
//!
//! let mut table = SymbolTable::new();
//! let outer = table.add(Symbol::new("x", SymbolType::bool())).unwrap();
//! table.push();
//! let inner = table.add(Symbol::new("x", SymbolType::char())).unwrap();
//! assert_eq!(table.find("x"), Some(inner));
//! table.pop();
//! assert_eq!(table.find("x"), Some(outer));
//! ```

use crate::types::SymbolType;
use sable_core::lang::types::BUILTIN_TYPES;
use std::collections::HashMap;
use thiserror::Error;

/// Index of a symbol in its [`SymbolTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(u32);

/// Index of a scope in its [`SymbolTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(u32);

impl SymbolId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl ScopeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// How a symbol came into existence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SymbolOrigin {
    /// Seeded into the global scope before parsing.
    Builtin,
    #[default]
    Declared,
    /// A function, lambda or template parameter.
    Parameter,
    /// Brought in by an `import` statement.
    Imported,
}

/// A named, typed binding.
///
/// Two symbols are equal when their names and type bits are equal.
#[derive(Debug, Clone)]
pub struct Symbol {
    pub name: String,
    pub ty: SymbolType,
    /// Member scope, for classes and enums.
    pub scope: Option<ScopeId>,
    /// Declared return type, for functions.
    pub return_type: Option<SymbolType>,
    pub origin: SymbolOrigin,
    defined_in: ScopeId,
}

impl Symbol {
    pub fn new(name: impl Into<String>, ty: SymbolType) -> Self {
        Self {
            name: name.into(),
            ty,
            scope: None,
            return_type: None,
            origin: SymbolOrigin::Declared,
            defined_in: GLOBAL,
        }
    }

    pub fn with_origin(mut self, origin: SymbolOrigin) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_return_type(mut self, ty: SymbolType) -> Self {
        self.return_type = Some(ty);
        self
    }

    /// Scope the symbol is bound in.
    pub fn defined_in(&self) -> ScopeId {
        self.defined_in
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.ty == other.ty
    }
}

/// One scope: bindings plus the link to its parent.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    parent: Option<ScopeId>,
    owner: Option<SymbolId>,
    bindings: HashMap<String, SymbolId>,
}

impl Scope {
    pub fn parent(&self) -> Option<ScopeId> {
        self.parent
    }

    /// The class/enum symbol whose members live here, if any.
    pub fn owner(&self) -> Option<SymbolId> {
        self.owner
    }

    pub fn get(&self, name: &str) -> Option<SymbolId> {
        self.bindings.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, SymbolId)> {
        self.bindings.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

/// Errors raised by symbol-table mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SymbolError {
    #[error("symbol `{name}` is already defined in this scope")]
    AlreadyDefined { name: String, existing: SymbolId },
}

const GLOBAL: ScopeId = ScopeId(0);

/// Arena of symbols and scopes with a current-scope cursor.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
    scopes: Vec<Scope>,
    current: ScopeId,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    /// A table whose global scope holds the builtin type names.
    pub fn new() -> Self {
        let mut table = Self::empty();
        for info in BUILTIN_TYPES {
            let symbol = Symbol::new(info.canonical, SymbolType::builtin(info.id)).with_origin(SymbolOrigin::Builtin);
            table.insert(symbol);
        }
        table
    }

    /// A table with an empty global scope.
    pub fn empty() -> Self {
        Self {
            symbols: Vec::new(),
            scopes: vec![Scope::default()],
            current: GLOBAL,
        }
    }

    pub fn global(&self) -> ScopeId {
        GLOBAL
    }

    pub fn current(&self) -> ScopeId {
        self.current
    }

    pub fn get(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.index()]
    }

    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.index()]
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SymbolId, &Symbol)> {
        self.symbols.iter().enumerate().map(|(i, s)| (SymbolId(i as u32), s))
    }

    // ---- binding ------------------------------------------------------------

    /// Bind a new symbol in the current scope.
    ///
    /// ## Errors
    /// - [`SymbolError::AlreadyDefined`] if the name is already bound in the current scope. The existing binding is
    ///   left untouched.
    pub fn add(&mut self, symbol: Symbol) -> Result<SymbolId, SymbolError> {
        self.add_in(self.current, symbol)
    }

    /// Bind a new symbol in `scope` rather than the current one.
    pub fn add_in(&mut self, scope: ScopeId, mut symbol: Symbol) -> Result<SymbolId, SymbolError> {
        if let Some(existing) = self.scopes[scope.index()].get(&symbol.name) {
            return Err(SymbolError::AlreadyDefined {
                name: symbol.name,
                existing,
            });
        }
        symbol.defined_in = scope;
        let id = SymbolId(self.symbols.len() as u32);
        self.scopes[scope.index()].bindings.insert(symbol.name.clone(), id);
        self.symbols.push(symbol);
        Ok(id)
    }

    /// Bind `symbol` in the current scope, overwriting a local binding of the same name in place.
    pub fn insert(&mut self, mut symbol: Symbol) -> SymbolId {
        symbol.defined_in = self.current;
        match self.find_local(&symbol.name) {
            Some(id) => {
                self.symbols[id.index()] = symbol;
                id
            }
            None => {
                let id = SymbolId(self.symbols.len() as u32);
                self.scopes[self.current.index()]
                    .bindings
                    .insert(symbol.name.clone(), id);
                self.symbols.push(symbol);
                id
            }
        }
    }

    // ---- lookup -------------------------------------------------------------

    /// Look `name` up from the current scope outwards.
    pub fn find(&self, name: &str) -> Option<SymbolId> {
        let mut scope = Some(self.current);
        while let Some(id) = scope {
            let s = &self.scopes[id.index()];
            if let Some(found) = s.get(name) {
                return Some(found);
            }
            scope = s.parent;
        }
        None
    }

    /// Look `name` up in the current scope only.
    pub fn find_local(&self, name: &str) -> Option<SymbolId> {
        self.scopes[self.current.index()].get(name)
    }

    /// Look `name` up in one specific scope, without walking parents.
    pub fn find_in(&self, scope: ScopeId, name: &str) -> Option<SymbolId> {
        self.scopes[scope.index()].get(name)
    }

    // ---- scope cursor -------------------------------------------------------

    /// Open a child of the current scope and make it current.
    ///
    /// ## Returns
    /// - The scope that was current before the call.
    pub fn push(&mut self) -> ScopeId {
        let previous = self.current;
        self.current = self.new_scope(Some(previous), None);
        tracing::trace!(scope = self.current.0, parent = previous.0, "push scope");
        previous
    }

    /// Make the parent of the current scope current. The global scope is never popped.
    ///
    /// ## Returns
    /// - The scope that was current before the call.
    pub fn pop(&mut self) -> ScopeId {
        let popped = self.current;
        if let Some(parent) = self.scopes[popped.index()].parent {
            self.current = parent;
        }
        tracing::trace!(scope = popped.0, current = self.current.0, "pop scope");
        popped
    }

    /// Make `scope` current.
    ///
    /// ## Returns
    /// - The scope that was current before the call.
    pub fn enter(&mut self, scope: ScopeId) -> ScopeId {
        std::mem::replace(&mut self.current, scope)
    }

    // ---- mutation -----------------------------------------------------------

    /// Give a symbol a member scope and mark it `STRUCT | TYPE`.
    ///
    /// The member scope's parent is the current scope, so a class declared under `template<...>` sees the
    /// template parameters. Calling this twice returns the same scope.
    pub fn allocate_struct(&mut self, id: SymbolId) -> ScopeId {
        if let Some(scope) = self.symbols[id.index()].scope {
            return scope;
        }
        let scope = self.new_scope(Some(self.current), Some(id));
        let symbol = &mut self.symbols[id.index()];
        symbol.scope = Some(scope);
        symbol.ty = symbol
            .ty
            .mask(SymbolType::template())
            .append(SymbolType::structure().as_type());
        scope
    }

    pub fn update_type(&mut self, id: SymbolId, ty: SymbolType) {
        self.symbols[id.index()].ty = ty;
    }

    /// Point a value symbol at the member scope of its class, so `value.member` resolves.
    pub fn set_scope(&mut self, id: SymbolId, scope: ScopeId) {
        self.symbols[id.index()].scope = Some(scope);
    }

    pub fn set_return_type(&mut self, id: SymbolId, ty: SymbolType) {
        self.symbols[id.index()].return_type = Some(ty);
    }

    /// `true` when the symbol is bound inside a class/enum member scope.
    pub fn is_member(&self, id: SymbolId) -> bool {
        self.scopes[self.get(id).defined_in.index()].owner.is_some()
    }

    fn new_scope(&mut self, parent: Option<ScopeId>, owner: Option<SymbolId>) -> ScopeId {
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(Scope {
            parent,
            owner,
            bindings: HashMap::new(),
        });
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Width;
    use sable_core::lang::types::BuiltinTypeId;

    #[test]
    fn global_scope_is_seeded_with_builtins() {
        let table = SymbolTable::new();
        for name in ["Bool", "Int8", "UInt64", "Char", "String", "List", "Dict", "Set", "type", "none", "auto"] {
            let id = table.find(name).unwrap_or_else(|| panic!("missing builtin {name}"));
            assert_eq!(table.get(id).origin, SymbolOrigin::Builtin);
            assert!(table.get(id).ty.is_type(), "{name} should name a type");
        }
        let int32 = table.find("Int32").unwrap();
        assert_eq!(table.get(int32).ty, SymbolType::builtin(BuiltinTypeId::Int32));
    }

    #[test]
    fn add_rejects_local_collision_and_keeps_original() {
        let mut table = SymbolTable::empty();
        let first = table.add(Symbol::new("x", SymbolType::bool())).unwrap();
        let err = table.add(Symbol::new("x", SymbolType::char())).unwrap_err();
        assert_eq!(
            err,
            SymbolError::AlreadyDefined {
                name: "x".into(),
                existing: first
            }
        );
        assert_eq!(table.get(first).ty, SymbolType::bool());
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn insert_overwrites_in_place() {
        let mut table = SymbolTable::empty();
        let first = table.insert(Symbol::new("x", SymbolType::bool()));
        let second = table.insert(Symbol::new("x", SymbolType::char()));
        assert_eq!(first, second);
        assert_eq!(table.get(first).ty, SymbolType::char());
    }

    #[test]
    fn shadowing_leaves_outer_binding_alone() {
        let mut table = SymbolTable::empty();
        let outer = table.add(Symbol::new("x", SymbolType::bool())).unwrap();
        let previous = table.push();
        assert_eq!(previous, table.global());
        let inner = table.add(Symbol::new("x", SymbolType::int(Width::W8, true))).unwrap();
        assert_ne!(outer, inner);
        assert_eq!(table.find("x"), Some(inner));
        assert_eq!(table.find_local("x"), Some(inner));
        table.pop();
        assert_eq!(table.find("x"), Some(outer));
        assert_eq!(table.get(outer).ty, SymbolType::bool());
    }

    #[test]
    fn find_local_does_not_walk_parents() {
        let mut table = SymbolTable::empty();
        table.add(Symbol::new("x", SymbolType::bool())).unwrap();
        table.push();
        assert!(table.find_local("x").is_none());
        assert!(table.find("x").is_some());
    }

    #[test]
    fn global_scope_is_never_popped() {
        let mut table = SymbolTable::empty();
        table.pop();
        assert_eq!(table.current(), table.global());
    }

    #[test]
    fn allocate_struct_creates_member_scope() {
        let mut table = SymbolTable::empty();
        let foo = table
            .add(Symbol::new("Foo", SymbolType::template()))
            .unwrap();
        let members = table.allocate_struct(foo);
        assert_eq!(table.allocate_struct(foo), members);
        assert_eq!(
            table.get(foo).ty,
            SymbolType::structure().as_type().append(SymbolType::template())
        );

        let previous = table.enter(members);
        let field = table.add(Symbol::new("x", SymbolType::bool())).unwrap();
        table.enter(previous);

        assert!(table.find("x").is_none());
        assert_eq!(table.find_in(members, "x"), Some(field));
        assert!(table.is_member(field));
        assert!(!table.is_member(foo));
        assert_eq!(table.scope(members).owner(), Some(foo));
    }

    #[test]
    fn symbols_compare_by_name_and_type() {
        let a = Symbol::new("x", SymbolType::bool());
        let b = Symbol::new("x", SymbolType::bool()).with_origin(SymbolOrigin::Parameter);
        let c = Symbol::new("x", SymbolType::char());
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
