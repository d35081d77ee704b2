use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::Result;
use crate::ast::{Identifier, Node};
use crate::patterns::{CaptureMap, CompileError, Pattern, compile, matches};
use crate::scope::{ScopeManager, choose_unique_name, rename_variable};

#[derive(Debug, Clone, Copy)]
enum Deduction {
    /// Last segment of the module path in `placeholder2`.
    ModulePath,
    /// The property name in `placeholder2`.
    PropertyName,
    /// The constructor called with `new`.
    Constructor,
    Fixed(&'static str),
}

struct Idiom {
    pattern: Pattern,
    deduction: Deduction,
}

const DECLARATION_KINDS: [&str; 3] = ["var", "let", "const"];

fn idiom_sources() -> Vec<(String, Deduction)> {
    let mut sources = Vec::new();
    for kind in DECLARATION_KINDS {
        sources.push((
            format!("{kind} placeholder1 = require('placeholder2');"),
            Deduction::ModulePath,
        ));
        sources.push((
            format!("{kind} placeholder1 = _interopRequireDefault(require('placeholder2'));"),
            Deduction::ModulePath,
        ));
        sources.push((
            format!("{kind} placeholder1 = require('placeholder2').placeholder3();"),
            Deduction::ModulePath,
        ));
    }
    for kind in DECLARATION_KINDS {
        sources.push((
            format!("{kind} placeholder1 = expression1.placeholder2;"),
            Deduction::PropertyName,
        ));
    }
    for kind in DECLARATION_KINDS {
        sources.push((
            format!("{kind} placeholder1 = expression1('placeholder2');"),
            Deduction::ModulePath,
        ));
    }
    for kind in DECLARATION_KINDS {
        sources.push((
            format!("{kind} placeholder1 = new placeholder2(expression1_repeatable_optional);"),
            Deduction::Constructor,
        ));
    }
    for kind in ["var", "let"] {
        sources.push((
            format!(
                "for ({kind} placeholder1 = expression1; expression2_optional; expression3_optional) statement1;"
            ),
            Deduction::Fixed("index"),
        ));
        sources.push((
            format!("for ({kind} placeholder1 in expression1) statement1;"),
            Deduction::Fixed("key"),
        ));
        sources.push((
            format!("for ({kind} placeholder1 of expression1) statement1;"),
            Deduction::Fixed("item"),
        ));
    }
    sources
}

fn compile_idioms() -> std::result::Result<Vec<Idiom>, CompileError> {
    idiom_sources()
        .into_iter()
        .map(|(source, deduction)| {
            Ok(Idiom {
                pattern: compile(&source)?,
                deduction,
            })
        })
        .collect()
}

lazy_static! {
    static ref IDIOMS: std::result::Result<Vec<Idiom>, CompileError> = compile_idioms();
    static ref LAST_SEGMENT: Regex = Regex::new(r"([^/]+)/*$").unwrap();
    static ref TRAILING_NON_WORD: Regex = Regex::new(r"[^A-Za-z0-9_]+$").unwrap();
    static ref INNER_SEPARATOR: Regex = Regex::new(r"[^A-Za-z0-9_]+([A-Za-z0-9_])").unwrap();
}

/// `content/script-messenger.js/` becomes `scriptMessengerJs`.
fn name_from_module_path(path: &str) -> Option<String> {
    let segment = LAST_SEGMENT.captures(path)?.get(1)?.as_str();
    let trimmed = TRAILING_NON_WORD.replace(segment, "");
    if trimmed.is_empty() {
        return None;
    }
    let camel = INNER_SEPARATOR.replace_all(&trimmed, |caps: &Captures<'_>| caps[1].to_uppercase());
    Some(camel.into_owned())
}

/// `WeakMap` becomes `weakMap`, `DOMParser` becomes `domparser`. All-caps
/// names such as `URL` give nothing.
fn name_from_constructor(name: &str) -> Option<String> {
    if !name.chars().any(char::is_lowercase) {
        return None;
    }
    let mut chars = name.chars();
    let first = chars.next()?;
    let rest = chars.as_str();
    if rest.starts_with(char::is_uppercase) {
        return Some(name.to_lowercase());
    }
    Some(first.to_lowercase().chain(rest.chars()).collect())
}

/// Identifier declared by a declaration or loop head.
fn declared_identifier(node: &Node) -> Option<&Identifier> {
    let declaration = match node {
        Node::VariableDeclaration { .. } => node,
        Node::ForStatement {
            init: Some(init), ..
        } => init,
        Node::ForInStatement { left, .. } | Node::ForOfStatement { left, .. } => left,
        _ => return None,
    };
    let Node::VariableDeclaration { declarations, .. } = declaration else {
        return None;
    };
    let Node::VariableDeclarator { id, .. } = declarations.first()? else {
        return None;
    };
    id.as_identifier()
}

/// Constructor of `var x = new Ctor(...)`, as currently named.
fn constructor_name<'a>(node: &'a Node, manager: &'a ScopeManager) -> Option<&'a str> {
    let Node::VariableDeclaration { declarations, .. } = node else {
        return None;
    };
    let Node::VariableDeclarator {
        init: Some(init), ..
    } = declarations.first()?
    else {
        return None;
    };
    let Node::NewExpression { callee, .. } = init.as_ref() else {
        return None;
    };
    let ident = callee.as_identifier()?;
    Some(manager.name_of(ident.id).unwrap_or(&ident.name))
}

impl Deduction {
    fn derive(self, captures: &CaptureMap, node: &Node, manager: &ScopeManager) -> Option<String> {
        match self {
            Self::ModulePath => name_from_module_path(captures.get("placeholder2")?.as_name()?),
            Self::PropertyName => captures.get("placeholder2")?.as_name().map(str::to_string),
            Self::Constructor => name_from_constructor(constructor_name(node, manager)?),
            Self::Fixed(name) => Some(name.to_string()),
        }
    }
}

/// Renames variables after the values they are initialized with.
///
/// Recognizes `require` imports (plain, interop-wrapped, or followed by a
/// method call), calls with a single string argument, property reads,
/// constructor calls, and loop variables (`index`, `key`, `item`). The first
/// idiom that matches a declaration and yields a name wins.
pub fn deduce_variable_names(tree: &mut Node) -> Result<()> {
    let idioms = IDIOMS.as_ref().map_err(Clone::clone)?;
    let mut manager = ScopeManager::analyze(tree);
    visit(tree, idioms, &mut manager);
    manager.apply(tree);
    Ok(())
}

fn visit(node: &Node, idioms: &[Idiom], manager: &mut ScopeManager) {
    deduce_at(node, idioms, manager);
    for slot in node.slots() {
        slot.for_each(|child| visit(child, idioms, manager));
    }
}

fn deduce_at(node: &Node, idioms: &[Idiom], manager: &mut ScopeManager) {
    let Some(ident) = declared_identifier(node) else {
        return;
    };
    let empty = CaptureMap::default();
    let Some(name) = idioms.iter().find_map(|idiom| {
        let captures = matches(&idiom.pattern, node, &empty)?;
        idiom.deduction.derive(&captures, node, manager)
    }) else {
        return;
    };

    let Some(var) = manager.variable_of(ident.id) else {
        return;
    };
    let variable = manager.variable(var);
    if variable.name == name {
        return;
    }
    let scope = manager.scope_of(ident.id).unwrap_or(variable.scope);
    let name = choose_unique_name(manager, scope, &name);
    tracing::trace!(from = %variable.name, to = %name, "deduced variable name");
    rename_variable(manager, var, &name);
}
