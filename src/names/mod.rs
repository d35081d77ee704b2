//! Variable naming: synthetic names for every local, and names deduced from
//! what a variable is initialized with.

mod deduce;
mod dictionary;
mod phonetic;

use rustc_hash::FxHashSet;

use crate::scope::{ScopeId, ScopeKind, ScopeManager, is_reserved, rename_variable};

pub use deduce::deduce_variable_names;
pub use dictionary::DictionaryNames;
pub use phonetic::PhoneticNames;

/// Supplies fresh variable names.
pub trait NameSource {
    /// Next name for which `taken` returns false.
    fn next_name(&mut self, taken: &dyn Fn(&str) -> bool) -> String;
}

/// Renames every variable in `from` and the scopes nested in it.
///
/// The global scope is left alone, as are variables that were already named
/// on purpose and the implicit `arguments`. Generated names never collide with
/// any declared name or with a global the code references.
pub fn generate_variable_names(
    manager: &mut ScopeManager,
    from: ScopeId,
    source: &mut dyn NameSource,
) {
    let mut used: FxHashSet<String> = manager
        .scope_ids()
        .flat_map(|scope| manager.scope(scope).set.keys().cloned())
        .chain(manager.global_references().map(str::to_string))
        .collect();

    let mut renamed = 0usize;
    for scope in manager.descendants(from) {
        if manager.scope(scope).kind == ScopeKind::Global {
            continue;
        }
        let variables = manager.scope(scope).variables.clone();
        for var in variables {
            let variable = manager.variable(var);
            if variable.keep_name || variable.name == "arguments" {
                continue;
            }
            let name = source.next_name(&|name: &str| is_reserved(name) || used.contains(name));
            used.insert(name.clone());
            rename_variable(manager, var, &name);
            renamed += 1;
        }
    }
    tracing::debug!(renamed, "generated variable names");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::parse_program;

    fn generated(source: &str, names: &mut dyn NameSource) -> crate::ast::Node {
        let mut tree = parse_program(source).unwrap();
        let mut manager = ScopeManager::analyze(&mut tree);
        let root = manager.root();
        generate_variable_names(&mut manager, root, names);
        manager.apply(&mut tree);
        tree
    }

    #[test]
    fn test_globals_keep_their_names() {
        assert_eq!(
            generated(
                "var a = 1; function test(b, c) { var d = b + c + a; return d; }",
                &mut DictionaryNames::new()
            ),
            parse_program(
                "var a = 1; function test(_able_act_, _dark_owner_) { var _quiet_clock_ = _able_act_ + _dark_owner_ + a; return _quiet_clock_; }"
            )
            .unwrap()
        );
    }

    #[test]
    fn test_arguments_and_kept_names_are_skipped() {
        let mut tree = parse_program("function test(a) { return arguments[0] + a; }").unwrap();
        let mut manager = ScopeManager::analyze(&mut tree);
        let function_scope = manager.function_scopes()[0];
        let param = manager.scope(function_scope).set["a"];
        rename_variable(&mut manager, param, "value");
        let root = manager.root();
        generate_variable_names(&mut manager, root, &mut PhoneticNames::new());
        manager.apply(&mut tree);
        assert_eq!(
            tree,
            parse_program("function test(value) { return arguments[0] + value; }").unwrap()
        );
    }

    #[test]
    fn test_generated_names_avoid_globals() {
        let tree = generated(
            "function test(a) { return baba(a); }",
            &mut PhoneticNames::new()
        );
        assert_eq!(
            tree,
            parse_program("function test(bababa) { return baba(bababa); }").unwrap()
        );
    }
}
