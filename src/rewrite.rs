//! Rule-driven simplification of minified code.
//!
//! Each rule is a pair of patterns. Rules are tried in order on every node,
//! parents before children; a rule that fired is dropped from that node's
//! candidate list so it cannot fire again on its own output.

use lazy_static::lazy_static;

use crate::ast::{Function, Node, SlotMut};
use crate::patterns::{CaptureMap, CompileError, Pattern, compile, fill, matches};
use crate::scope::{ScopeManager, choose_unique_name, rename_variable};
use crate::Result;

struct Rule {
    pattern: Pattern,
    replacement: Pattern,
    /// Only applies to nodes sitting directly in a statement list, where the
    /// replacement may expand into several statements.
    statement_list_only: bool,
}

const INTEROP_HELPER: &str = "
    function placeholder1(placeholder2)
    {
      return placeholder2 && placeholder2.__esModule
        ? placeholder2
        : { default: placeholder2 };
    }
";

const INTEROP_HELPER_NAMED: &str = "
    function _interopRequireDefault(obj)
    {
      return obj && obj.__esModule
        ? obj
        : { default: obj };
    }
";

const RULE_SOURCES: &[(&str, &str, bool)] = &[
    ("!1", "false", false),
    ("!0", "true", false),
    ("void 0", "undefined", false),
    ("expression1 && expression2;", "if (expression1) expression2;", false),
    ("expression1 || expression2;", "if (!expression1) expression2;", false),
    (
        "expression1 ? expression2 : expression3;",
        "if (expression1) expression2; else expression3;",
        false,
    ),
    (
        "return expression1 ? expression2 : expression3;",
        "if (expression1) return expression2; else return expression3;",
        false,
    ),
    ("expression1, expression2;", "expression1; expression2;", false),
    (
        "expression1, expression2, expression3_repeatable;",
        "expression1; expression2, expression3;",
        false,
    ),
    (
        "return expression1, expression2;",
        "expression1; return expression2;",
        false,
    ),
    (
        "return expression1, expression2, expression3_repeatable;",
        "expression1; return expression2, expression3;",
        false,
    ),
    (
        "var expression1, expression2_repeatable;",
        "var expression1; var expression2;",
        true,
    ),
    (
        "let expression1, expression2_repeatable;",
        "let expression1; let expression2;",
        true,
    ),
    (
        "if (expression1) statement1_multiLine; else statement2_optional;",
        "if (expression1) { statement1; } else statement2;",
        false,
    ),
    (
        "if (expression1) statement1; else statement2_multiLine;",
        "if (expression1) statement1; else { statement2; }",
        false,
    ),
    (
        "while (expression1) statement1_multiLine;",
        "while (expression1) { statement1; }",
        false,
    ),
    (
        "do statement1_multiLine; while (expression1);",
        "do { statement1; } while (expression1);",
        false,
    ),
    (
        "for (expression1_orDeclaration_optional; expression2_optional; expression3_optional) statement1_multiLine;",
        "for (expression1; expression2; expression3) { statement1; }",
        false,
    ),
    (
        "for (expression1_orDeclaration in expression2) statement1_multiLine;",
        "for (expression1 in expression2) { statement1; }",
        false,
    ),
    (
        "for (expression1_orDeclaration of expression2) statement1_multiLine;",
        "for (expression1 of expression2) { statement1; }",
        false,
    ),
    (INTEROP_HELPER, INTEROP_HELPER_NAMED, false),
];

fn compile_rules() -> std::result::Result<Vec<Rule>, CompileError> {
    RULE_SOURCES
        .iter()
        .map(|&(pattern, replacement, statement_list_only)| {
            Ok(Rule {
                pattern: compile(pattern)?,
                replacement: compile(replacement)?,
                statement_list_only,
            })
        })
        .collect()
}

lazy_static! {
    static ref RULES: std::result::Result<Vec<Rule>, CompileError> = compile_rules();
}

/// Rewrites `tree` in place, including any renames a rule implies.
pub fn rewrite_code(tree: &mut Node) -> Result<()> {
    let rules = RULES.as_ref().map_err(Clone::clone)?;
    let mut manager = ScopeManager::analyze(tree);
    let mut rewriter = Rewriter {
        rules,
        manager: &mut manager,
    };
    rewriter.visit(tree, false)?;
    manager.apply(tree);
    Ok(())
}

const fn is_statement_list(node: &Node) -> bool {
    matches!(
        node,
        Node::Program { .. }
            | Node::BlockStatement { .. }
            | Node::SwitchCase { .. }
            | Node::StaticBlock { .. }
    )
}

/// Replaces nested programs in a statement list by their statements.
fn splice_programs(body: &mut Vec<Node>) {
    if !body.iter().any(|node| matches!(node, Node::Program { .. })) {
        return;
    }
    for node in std::mem::take(body) {
        match node {
            Node::Program { body: inner } => body.extend(inner),
            other => body.push(other),
        }
    }
}

struct Rewriter<'a> {
    rules: &'a [Rule],
    manager: &'a mut ScopeManager,
}

impl Rewriter<'_> {
    fn visit(&mut self, node: &mut Node, in_list: bool) -> Result<()> {
        self.rewrite_node(node, in_list)?;

        let list_parent = is_statement_list(node);
        for slot in node.slots_mut() {
            let child_in_list = list_parent && matches!(slot, SlotMut::List(_));
            slot.try_for_each_mut(|child| {
                self.visit(child, child_in_list)?;
                if !child_in_list {
                    if let Node::Program { body } = child {
                        *child = Node::BlockStatement {
                            body: std::mem::take(body),
                        };
                    }
                }
                Ok::<_, crate::DebundleError>(())
            })?;
        }

        match node {
            Node::Program { body }
            | Node::BlockStatement { body }
            | Node::StaticBlock { body }
            | Node::SwitchCase {
                consequent: body, ..
            } => splice_programs(body),
            _ => {}
        }
        Ok(())
    }

    fn rewrite_node(&mut self, node: &mut Node, in_list: bool) -> Result<()> {
        let mut candidates: Vec<&Rule> = self
            .rules
            .iter()
            .filter(|rule| in_list || !rule.statement_list_only)
            .collect();
        let empty = CaptureMap::default();

        loop {
            let found = candidates
                .iter()
                .enumerate()
                .find_map(|(i, rule)| matches(&rule.pattern, node, &empty).map(|c| (i, c)));
            let Some((index, captures)) = found else {
                return Ok(());
            };
            let rule = candidates.remove(index);
            let mut result = fill(&rule.replacement, &captures)?;

            if let (Node::FunctionDeclaration(old), Node::FunctionDeclaration(new)) =
                (&*node, &mut result)
            {
                self.rename_function(old, new);
            }
            *node = result;
        }
    }

    /// Carries a rule-assigned function name over to the function's variable.
    fn rename_function(&mut self, old: &Function, new: &mut Function) {
        let (Some(Node::Identifier(old_id)), Some(Node::Identifier(new_id))) =
            (old.id.as_deref(), new.id.as_deref_mut())
        else {
            return;
        };
        let Some(var) = self.manager.variable_of(old_id.id) else {
            return;
        };
        let variable = self.manager.variable(var);
        if variable.name != new_id.name {
            new_id.name = choose_unique_name(self.manager, variable.scope, &new_id.name);
        }
        rename_variable(self.manager, var, &new_id.name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::parse_program;

    fn rewritten(source: &str) -> Node {
        let mut tree = parse_program(source).unwrap();
        rewrite_code(&mut tree).unwrap();
        tree
    }

    #[test]
    fn test_rule_table_compiles() {
        assert_eq!(RULES.as_ref().map(Vec::len).ok(), Some(RULE_SOURCES.len()));
    }

    #[test]
    fn test_constants_are_simplified() {
        assert_eq!(
            rewritten(
                "function test() { var x = !1, y = void 0; if (x && !y) return !0; return void 0; }"
            ),
            parse_program(
                "function test() { var x = false; var y = undefined; if (x && !y) return true; return undefined; }"
            )
            .unwrap()
        );
    }

    #[test]
    fn test_sequence_splits_into_statements() {
        assert_eq!(
            rewritten("a = 2, b++;"),
            parse_program("a = 2; b++;").unwrap()
        );
        assert_eq!(
            rewritten("function f() { return a(), b(), c; }"),
            parse_program("function f() { a(); b(); return c; }").unwrap()
        );
    }

    #[test]
    fn test_split_in_unbraced_body_gets_block() {
        assert_eq!(
            rewritten("if (x) a(), b();"),
            parse_program("if (x) { a(); b(); }").unwrap()
        );
    }

    #[test]
    fn test_for_init_declarations_stay_together() {
        let source = "for (var i = 0, j = 1; i < j; i++) f(i);";
        assert_eq!(rewritten(source), parse_program(source).unwrap());
    }

    #[test]
    fn test_short_circuit_becomes_if() {
        assert_eq!(
            rewritten("exists(x) && doSomething(x);"),
            parse_program("if (exists(x)) doSomething(x);").unwrap()
        );
    }

    #[test]
    fn test_interop_helper_is_named() {
        assert_eq!(
            rewritten(
                "function a(b) { return b && b.__esModule ? b : {default: b}; } var c = a(require('x'));"
            ),
            parse_program(
                "function _interopRequireDefault(obj) { if (obj && obj.__esModule) return obj; else return {default: obj}; } var c = _interopRequireDefault(require('x'));"
            )
            .unwrap()
        );
    }

    #[test]
    fn test_interop_helper_name_avoids_collision() {
        assert_eq!(
            rewritten(
                "function _interopRequireDefault() {} function outer() { function a(b) { return b && b.__esModule ? b : {default: b}; } return a(x); }"
            ),
            parse_program(
                "function _interopRequireDefault() {} function outer() { function _interopRequireDefault2(obj) { if (obj && obj.__esModule) return obj; else return {default: obj}; } return _interopRequireDefault2(x); }"
            )
            .unwrap()
        );
    }
}
