use super::{ScopeId, ScopeManager, VarId};

pub const RESERVED_WORDS: &[&str] = &[
    "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete", "do",
    "else", "export", "extends", "finally", "for", "function", "if", "import", "in", "instanceof",
    "new", "return", "super", "switch", "this", "throw", "try", "typeof", "var", "void", "while",
    "with", "yield",
];

pub fn is_reserved(name: &str) -> bool {
    RESERVED_WORDS.contains(&name)
}

/// Picks a name based on `candidate` that no variable visible from `scope` uses.
///
/// A leading digit gets a `_` prefix; collisions with visible variables,
/// undeclared globals or keywords get a numeric suffix starting at 2.
pub fn choose_unique_name(manager: &ScopeManager, scope: ScopeId, candidate: &str) -> String {
    let base = if candidate.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{candidate}")
    } else {
        candidate.to_string()
    };

    let mut result = base.clone();
    let mut suffix = 1;
    while is_reserved(&result)
        || manager.is_visible(scope, &result)
        || manager.is_global_reference(&result)
    {
        suffix += 1;
        result = format!("{base}{suffix}");
    }
    result
}

/// Renames a variable and every occurrence that refers to it.
///
/// Besides the variable's own declarations and resolved references, this
/// covers references recorded on the declaring scope under the old name and
/// unresolved references in nested scopes, stopping at any nested scope that
/// declares the old name itself. The variable is marked as deliberately named.
pub fn rename_variable(manager: &mut ScopeManager, var: VarId, new_name: &str) {
    let variable = &manager.variables[var.0];
    let scope = variable.scope;
    let old_name = variable.name.clone();
    let occurrences: Vec<_> = variable
        .identifiers
        .iter()
        .chain(&variable.references)
        .copied()
        .collect();

    manager.scopes[scope.0].set.remove(&old_name);
    manager.variables[var.0].keep_name = true;

    for ident in occurrences {
        manager.names[ident.0 as usize] = new_name.to_string();
    }

    let direct: Vec<_> = manager.scopes[scope.0].references.clone();
    rename_matching(manager, &direct, &old_name, new_name);

    let children = manager.scopes[scope.0].children.clone();
    for child in children {
        rename_in_child(manager, child, &old_name, new_name);
    }

    manager.variables[var.0].name = new_name.to_string();
    manager.scopes[scope.0].set.insert(new_name.to_string(), var);
}

fn rename_matching(
    manager: &mut ScopeManager,
    occurrences: &[crate::ast::IdentId],
    old_name: &str,
    new_name: &str,
) {
    for ident in occurrences {
        let name = &mut manager.names[ident.0 as usize];
        if *name == old_name {
            *name = new_name.to_string();
        }
    }
}

fn rename_in_child(manager: &mut ScopeManager, scope: ScopeId, old_name: &str, new_name: &str) {
    if manager.scopes[scope.0].set.contains_key(old_name) {
        return;
    }

    let through = manager.scopes[scope.0].through.clone();
    rename_matching(manager, &through, old_name, new_name);

    let children = manager.scopes[scope.0].children.clone();
    for child in children {
        rename_in_child(manager, child, old_name, new_name);
    }
}
