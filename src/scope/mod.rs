//! Lexical scope analysis and scope-aware renaming.
//!
//! [`ScopeManager::analyze`] numbers every identifier occurrence of a tree and
//! builds the scope tree with its variables and references. Renames only touch
//! the manager's occurrence-name table; [`ScopeManager::apply`] writes the
//! current names back into the tree. A stage that rebuilds parts of the tree
//! while it renames can therefore record renames as it goes and apply them once
//! at the end.

mod analyzer;
mod rename;

use rustc_hash::FxHashMap;

use crate::ast::{IdentId, Node};

pub use rename::{RESERVED_WORDS, choose_unique_name, is_reserved, rename_variable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VarId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Global,
    Function,
    /// Holds the name of a named function expression, enclosing its function scope.
    FunctionExpressionName,
    Block,
    /// Loop head declaring `let`/`const` bindings.
    For,
    Catch,
    Class,
    ClassStaticBlock,
    Switch,
    With,
}

impl ScopeKind {
    /// Scopes that `var` declarations hoist to.
    pub const fn is_variable_scope(self) -> bool {
        matches!(self, Self::Global | Self::Function | Self::ClassStaticBlock)
    }
}

#[derive(Debug, Clone)]
pub struct Variable {
    pub name: String,
    pub scope: ScopeId,
    /// Declaring occurrences.
    pub identifiers: Vec<IdentId>,
    /// Resolved reading or writing occurrences.
    pub references: Vec<IdentId>,
    /// Set once the variable has been named on purpose; automatic naming skips it.
    pub keep_name: bool,
}

#[derive(Debug, Clone)]
pub struct Scope {
    pub kind: ScopeKind,
    pub upper: Option<ScopeId>,
    pub children: Vec<ScopeId>,
    /// Variables declared here, in declaration order.
    pub variables: Vec<VarId>,
    pub set: FxHashMap<String, VarId>,
    /// References made directly in this scope.
    pub references: Vec<IdentId>,
    /// References made in this scope or below that it does not resolve.
    pub through: Vec<IdentId>,
}

impl Scope {
    fn new(kind: ScopeKind, upper: Option<ScopeId>) -> Self {
        Self {
            kind,
            upper,
            children: Vec::new(),
            variables: Vec::new(),
            set: FxHashMap::default(),
            references: Vec::new(),
            through: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScopeManager {
    scopes: Vec<Scope>,
    variables: Vec<Variable>,
    /// Current name of every identifier occurrence, indexed by `IdentId`.
    names: Vec<String>,
    /// Variable each declaring or resolved occurrence belongs to.
    occurrence_vars: Vec<Option<VarId>>,
    /// Scope each binding or reference occurrence appears in.
    occurrence_scopes: Vec<Option<ScopeId>>,
    /// Function scopes in source order.
    function_scopes: Vec<ScopeId>,
}

impl ScopeManager {
    /// Numbers the identifiers of `tree` and builds its scope tree.
    pub fn analyze(tree: &mut Node) -> Self {
        analyzer::analyze(tree)
    }

    pub const fn root(&self) -> ScopeId {
        ScopeId(0)
    }

    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.0]
    }

    pub fn variable(&self, id: VarId) -> &Variable {
        &self.variables[id.0]
    }

    /// All scopes, parents before children.
    pub fn scope_ids(&self) -> impl Iterator<Item = ScopeId> {
        (0..self.scopes.len()).map(ScopeId)
    }

    /// Function and arrow function scopes in source order.
    pub fn function_scopes(&self) -> &[ScopeId] {
        &self.function_scopes
    }

    /// `scope` and everything nested in it, parents before children.
    pub fn descendants(&self, scope: ScopeId) -> Vec<ScopeId> {
        let mut result = Vec::new();
        let mut stack = vec![scope];
        while let Some(id) = stack.pop() {
            result.push(id);
            stack.extend(self.scope(id).children.iter().rev());
        }
        result
    }

    /// Variable declared or referenced by an identifier occurrence.
    pub fn variable_of(&self, ident: IdentId) -> Option<VarId> {
        self.occurrence_vars.get(ident.0 as usize).copied().flatten()
    }

    /// Innermost scope an identifier occurrence appears in.
    pub fn scope_of(&self, ident: IdentId) -> Option<ScopeId> {
        self.occurrence_scopes.get(ident.0 as usize).copied().flatten()
    }

    /// Current name of an identifier occurrence.
    pub fn name_of(&self, ident: IdentId) -> Option<&str> {
        if ident.is_none() {
            return None;
        }
        self.names.get(ident.0 as usize).map(String::as_str)
    }

    /// Whether `name` is declared in `scope` or any scope enclosing it.
    pub fn is_visible(&self, scope: ScopeId, name: &str) -> bool {
        let mut current = Some(scope);
        while let Some(id) = current {
            let scope = self.scope(id);
            if scope.set.contains_key(name) {
                return true;
            }
            current = scope.upper;
        }
        false
    }

    /// Names of references no scope declares, such as `window` or `require`.
    pub fn global_references(&self) -> impl Iterator<Item = &str> {
        self.scope(self.root())
            .through
            .iter()
            .filter_map(|ident| self.name_of(*ident))
    }

    pub fn is_global_reference(&self, name: &str) -> bool {
        self.global_references().any(|reference| reference == name)
    }

    /// Writes the current occurrence names back into `tree`.
    ///
    /// Identifiers that were not numbered by this manager (nodes built from
    /// patterns, or a different tree) are left alone.
    pub fn apply(&self, tree: &mut Node) {
        tree.for_each_identifier_mut(&mut |ident| {
            if let Some(name) = self.name_of(ident.id) {
                if ident.name != name {
                    ident.name = name.to_string();
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::parse_program;

    fn analyzed(source: &str) -> (Node, ScopeManager) {
        let mut tree = parse_program(source).unwrap();
        let manager = ScopeManager::analyze(&mut tree);
        (tree, manager)
    }

    fn names_in(manager: &ScopeManager, scope: ScopeId) -> Vec<String> {
        manager
            .scope(scope)
            .variables
            .iter()
            .map(|v| manager.variable(*v).name.clone())
            .collect()
    }

    #[test]
    fn test_var_hoists_out_of_blocks() {
        let (_, manager) = analyzed("function f() { { var a = 1; let b = 2; } }");
        let function_scope = manager.function_scopes()[0];
        assert_eq!(names_in(&manager, function_scope), vec!["arguments", "a"]);
        let block = manager.scope(function_scope).children[0];
        assert_eq!(manager.scope(block).kind, ScopeKind::Block);
        assert_eq!(names_in(&manager, block), vec!["b"]);
    }

    #[test]
    fn test_forward_reference_to_function_resolves() {
        let (_, manager) = analyzed("f(); function f() {}");
        let root = manager.root();
        let var = manager.scope(root).set["f"];
        assert_eq!(manager.variable(var).references.len(), 1);
    }

    #[test]
    fn test_unresolved_references_pass_through() {
        let (_, manager) = analyzed("function f() { return window.x + y; }");
        let function_scope = manager.function_scopes()[0];
        let through: Vec<_> = manager
            .scope(function_scope)
            .through
            .iter()
            .filter_map(|id| manager.name_of(*id))
            .collect();
        assert_eq!(through, vec!["window", "y"]);
    }

    #[test]
    fn test_let_in_for_head_gets_own_scope() {
        let (_, manager) = analyzed("for (let i = 0; i < 3; i++) {}");
        let for_scope = manager.scope(manager.root()).children[0];
        assert_eq!(manager.scope(for_scope).kind, ScopeKind::For);
        assert_eq!(names_in(&manager, for_scope), vec!["i"]);
    }

    #[test]
    fn test_named_function_expression_scope() {
        let (_, manager) = analyzed("x = function g() { return g; };");
        let name_scope = manager.scope(manager.root()).children[0];
        assert_eq!(
            manager.scope(name_scope).kind,
            ScopeKind::FunctionExpressionName
        );
        assert_eq!(names_in(&manager, name_scope), vec!["g"]);
    }

    #[test]
    fn test_property_names_are_not_references() {
        let (_, manager) = analyzed("var a = {b: 1}; a.b = a[c];");
        let root = manager.scope(manager.root());
        let referenced: Vec<_> = root
            .references
            .iter()
            .filter_map(|id| manager.name_of(*id))
            .collect();
        assert_eq!(referenced, vec!["a", "a", "c"]);
    }

    #[test]
    fn test_apply_writes_back_renames() {
        let (mut tree, mut manager) = analyzed("var a = 1; a++;");
        let var = manager.scope(manager.root()).set["a"];
        rename_variable(&mut manager, var, "counter");
        manager.apply(&mut tree);
        assert_eq!(tree, parse_program("var counter = 1; counter++;").unwrap());
    }
}
