use super::{Scope, ScopeId, ScopeKind, ScopeManager, VarId, Variable};
use crate::ast::{Class, Function, IdentId, Identifier, Node};

pub(super) fn analyze(tree: &mut Node) -> ScopeManager {
    // Occurrence 0 is `IdentId::NONE`.
    let mut names = vec![String::new()];
    tree.for_each_identifier_mut(&mut |ident| {
        ident.id = IdentId(names.len() as u32);
        names.push(ident.name.clone());
    });

    let count = names.len();
    let mut analyzer = Analyzer {
        manager: ScopeManager {
            scopes: vec![Scope::new(ScopeKind::Global, None)],
            variables: Vec::new(),
            names,
            occurrence_vars: vec![None; count],
            occurrence_scopes: vec![None; count],
            function_scopes: Vec::new(),
        },
        current: ScopeId(0),
        pending: vec![Vec::new()],
    };
    analyzer.visit(tree);
    analyzer.close_scope();
    analyzer.manager
}

struct Analyzer {
    manager: ScopeManager,
    current: ScopeId,
    /// References waiting for resolution, one list per open scope.
    pending: Vec<Vec<IdentId>>,
}

fn is_lexical_declaration(node: &Node) -> bool {
    matches!(node, Node::VariableDeclaration { kind, .. } if kind != "var")
}

impl Analyzer {
    fn open_scope(&mut self, kind: ScopeKind) {
        let id = ScopeId(self.manager.scopes.len());
        self.manager
            .scopes
            .push(Scope::new(kind, Some(self.current)));
        self.manager.scopes[self.current.0].children.push(id);
        if kind == ScopeKind::Function {
            self.manager.function_scopes.push(id);
        }
        self.current = id;
        self.pending.push(Vec::new());
    }

    /// Resolves the references left in the current scope and hands the rest
    /// to the enclosing scope.
    fn close_scope(&mut self) {
        let id = self.current;
        let references = self.pending.pop().unwrap_or_default();
        let manager = &mut self.manager;
        let dynamic = manager.scopes[id.0].kind == ScopeKind::With;

        let mut unresolved = Vec::new();
        for reference in references {
            let name = &manager.names[reference.0 as usize];
            let resolved = if dynamic {
                None
            } else {
                manager.scopes[id.0].set.get(name).copied()
            };
            match resolved {
                Some(var) => {
                    manager.variables[var.0].references.push(reference);
                    manager.occurrence_vars[reference.0 as usize] = Some(var);
                }
                None => unresolved.push(reference),
            }
        }

        manager.scopes[id.0].through.extend_from_slice(&unresolved);
        if let Some(upper) = manager.scopes[id.0].upper {
            if let Some(pending) = self.pending.last_mut() {
                pending.extend(unresolved);
            }
            self.current = upper;
        }
    }

    fn variable_scope(&self) -> ScopeId {
        let mut id = self.current;
        loop {
            let scope = &self.manager.scopes[id.0];
            match scope.upper {
                Some(upper) if !scope.kind.is_variable_scope() => id = upper,
                _ => return id,
            }
        }
    }

    fn variable_named(&mut self, scope: ScopeId, name: &str) -> VarId {
        if let Some(var) = self.manager.scopes[scope.0].set.get(name) {
            return *var;
        }
        let var = VarId(self.manager.variables.len());
        self.manager.variables.push(Variable {
            name: name.to_string(),
            scope,
            identifiers: Vec::new(),
            references: Vec::new(),
            keep_name: false,
        });
        let scope = &mut self.manager.scopes[scope.0];
        scope.variables.push(var);
        scope.set.insert(name.to_string(), var);
        var
    }

    fn declare(&mut self, ident: &Identifier, scope: ScopeId) {
        let var = self.variable_named(scope, &ident.name);
        if ident.id.is_none() {
            return;
        }
        self.manager.variables[var.0].identifiers.push(ident.id);
        self.manager.occurrence_vars[ident.id.0 as usize] = Some(var);
        self.manager.occurrence_scopes[ident.id.0 as usize] = Some(self.current);
    }

    fn reference(&mut self, ident: &Identifier) {
        if ident.id.is_none() {
            return;
        }
        self.manager.scopes[self.current.0]
            .references
            .push(ident.id);
        self.manager.occurrence_scopes[ident.id.0 as usize] = Some(self.current);
        if let Some(pending) = self.pending.last_mut() {
            pending.push(ident.id);
        }
    }

    fn visit_all(&mut self, nodes: &[Node]) {
        for node in nodes {
            self.visit(node);
        }
    }

    fn visit_children(&mut self, node: &Node) {
        for slot in node.slots() {
            slot.for_each(|child| self.visit(child));
        }
    }

    fn declare_pattern(&mut self, pattern: &Node, scope: ScopeId) {
        match pattern {
            Node::Identifier(ident) => self.declare(ident, scope),
            Node::ObjectPattern { properties } => {
                for property in properties {
                    match property {
                        Node::Property {
                            key,
                            value,
                            computed,
                            ..
                        } => {
                            if *computed {
                                self.visit(key);
                            }
                            self.declare_pattern(value, scope);
                        }
                        other => self.declare_pattern(other, scope),
                    }
                }
            }
            Node::ArrayPattern { elements } => {
                for element in elements.iter().flatten() {
                    self.declare_pattern(element, scope);
                }
            }
            Node::RestElement { argument } => self.declare_pattern(argument, scope),
            Node::AssignmentPattern { left, right } => {
                self.declare_pattern(left, scope);
                self.visit(right);
            }
            other => self.visit(other),
        }
    }

    /// Left-hand side of an assignment or a `for-in`/`for-of` head.
    fn visit_target(&mut self, target: &Node) {
        match target {
            Node::Identifier(ident) => self.reference(ident),
            Node::ObjectPattern { properties } => {
                for property in properties {
                    match property {
                        Node::Property {
                            key,
                            value,
                            computed,
                            ..
                        } => {
                            if *computed {
                                self.visit(key);
                            }
                            self.visit_target(value);
                        }
                        other => self.visit_target(other),
                    }
                }
            }
            Node::ArrayPattern { elements } => {
                for element in elements.iter().flatten() {
                    self.visit_target(element);
                }
            }
            Node::RestElement { argument } => self.visit_target(argument),
            Node::AssignmentPattern { left, right } => {
                self.visit_target(left);
                self.visit(right);
            }
            other => self.visit(other),
        }
    }

    fn visit_function(&mut self, func: &Function) {
        self.open_scope(ScopeKind::Function);
        let scope = self.current;
        self.variable_named(scope, "arguments");
        for param in &func.params {
            self.declare_pattern(param, scope);
        }
        if let Some(body) = func.body.statements() {
            self.visit_all(body);
        }
        self.close_scope();
    }

    fn visit_class(&mut self, class: &Class, name_inside: bool) {
        if let Some(super_class) = &class.super_class {
            self.visit(super_class);
        }
        self.open_scope(ScopeKind::Class);
        if name_inside {
            if let Some(Node::Identifier(ident)) = class.id.as_deref() {
                self.declare(ident, self.current);
            }
        }
        self.visit(&class.body);
        self.close_scope();
    }

    fn visit(&mut self, node: &Node) {
        match node {
            Node::Identifier(ident) => self.reference(ident),
            Node::BlockStatement { body } => {
                self.open_scope(ScopeKind::Block);
                self.visit_all(body);
                self.close_scope();
            }
            Node::StaticBlock { body } => {
                self.open_scope(ScopeKind::ClassStaticBlock);
                self.visit_all(body);
                self.close_scope();
            }
            Node::FunctionDeclaration(func) => {
                if let Some(Node::Identifier(ident)) = func.id.as_deref() {
                    self.declare(ident, self.current);
                }
                self.visit_function(func);
            }
            Node::FunctionExpression(func) => match func.id.as_deref() {
                Some(Node::Identifier(ident)) => {
                    self.open_scope(ScopeKind::FunctionExpressionName);
                    self.declare(ident, self.current);
                    self.visit_function(func);
                    self.close_scope();
                }
                _ => self.visit_function(func),
            },
            Node::ArrowFunctionExpression { params, body, .. } => {
                self.open_scope(ScopeKind::Function);
                let scope = self.current;
                for param in params {
                    self.declare_pattern(param, scope);
                }
                match body.as_ref() {
                    Node::BlockStatement { body } => self.visit_all(body),
                    expression => self.visit(expression),
                }
                self.close_scope();
            }
            Node::ClassDeclaration(class) => {
                if let Some(Node::Identifier(ident)) = class.id.as_deref() {
                    self.declare(ident, self.current);
                }
                self.visit_class(class, false);
            }
            Node::ClassExpression(class) => self.visit_class(class, true),
            Node::VariableDeclaration { kind, declarations } => {
                let scope = if kind == "var" {
                    self.variable_scope()
                } else {
                    self.current
                };
                for declarator in declarations {
                    if let Node::VariableDeclarator { id, init } = declarator {
                        self.declare_pattern(id, scope);
                        if let Some(init) = init {
                            self.visit(init);
                        }
                    }
                }
            }
            Node::ForStatement { init, .. } => {
                let scoped = init.as_deref().is_some_and(is_lexical_declaration);
                if scoped {
                    self.open_scope(ScopeKind::For);
                }
                self.visit_children(node);
                if scoped {
                    self.close_scope();
                }
            }
            Node::ForInStatement { left, right, body }
            | Node::ForOfStatement {
                left, right, body, ..
            } => {
                let scoped = is_lexical_declaration(left);
                if scoped {
                    self.open_scope(ScopeKind::For);
                }
                if matches!(left.as_ref(), Node::VariableDeclaration { .. }) {
                    self.visit(left);
                } else {
                    self.visit_target(left);
                }
                self.visit(right);
                self.visit(body);
                if scoped {
                    self.close_scope();
                }
            }
            Node::CatchClause { param, body } => {
                self.open_scope(ScopeKind::Catch);
                if let Some(param) = param {
                    let scope = self.current;
                    self.declare_pattern(param, scope);
                }
                self.visit(body);
                self.close_scope();
            }
            Node::SwitchStatement {
                discriminant,
                cases,
            } => {
                self.visit(discriminant);
                self.open_scope(ScopeKind::Switch);
                self.visit_all(cases);
                self.close_scope();
            }
            Node::WithStatement { object, body } => {
                self.visit(object);
                self.open_scope(ScopeKind::With);
                self.visit(body);
                self.close_scope();
            }
            Node::LabeledStatement { body, .. } => self.visit(body),
            Node::BreakStatement { .. }
            | Node::ContinueStatement { .. }
            | Node::MetaProperty { .. }
            | Node::PrivateIdentifier { .. } => {}
            Node::MemberExpression {
                object,
                property,
                computed,
                ..
            } => {
                self.visit(object);
                if *computed {
                    self.visit(property);
                }
            }
            Node::Property {
                key,
                value,
                computed,
                ..
            }
            | Node::MethodDefinition {
                key,
                value,
                computed,
                ..
            } => {
                if *computed {
                    self.visit(key);
                }
                self.visit(value);
            }
            Node::PropertyDefinition {
                key,
                value,
                computed,
                ..
            } => {
                if *computed {
                    self.visit(key);
                }
                if let Some(value) = value {
                    self.visit(value);
                }
            }
            Node::AssignmentExpression { left, right, .. } => {
                self.visit_target(left);
                self.visit(right);
            }
            _ => self.visit_children(node),
        }
    }
}
