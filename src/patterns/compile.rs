use lazy_static::lazy_static;
use regex::Regex;

use super::placeholder::{GenericPlaceholder, GenericTarget, Placeholder};
use super::{CompileError, Pattern};
use crate::ast::{self, Node};

lazy_static! {
    static ref EXPRESSION_NAME: Regex = Regex::new(r"^expression\d+(?:_\w+)?$").unwrap();
    static ref STATEMENT_NAME: Regex = Regex::new(r"^statement\d+(?:_\w+)?$").unwrap();
    static ref GENERIC_NAME: Regex = Regex::new(r"^placeholder\d+$").unwrap();
}

/// Parses pattern source and turns placeholder identifiers into placeholder nodes.
///
/// A single-statement pattern compiles to that statement, and a lone
/// expression statement written without a trailing `;` compiles to the bare
/// expression.
pub fn compile(source: &str) -> Result<Pattern, CompileError> {
    let mut root = ast::parse_program(source).map_err(|e| CompileError(e.to_string()))?;
    replace_placeholders(&mut root)?;

    if let Node::Program { body } = &mut root {
        if body.len() == 1 {
            root = body.remove(0);
        }
    }
    if !source.trim_end().ends_with(';') {
        if let Node::ExpressionStatement { expression } = root {
            root = *expression;
        }
    }

    Ok(Pattern { root })
}

fn replace_placeholders(node: &mut Node) -> Result<(), CompileError> {
    for slot in node.slots_mut() {
        slot.try_for_each_mut(replace_placeholders)?;
    }

    let replacement = match node {
        Node::Identifier(ident) if EXPRESSION_NAME.is_match(&ident.name) => {
            Some(Node::ExpressionPlaceholder(Placeholder::expression(&ident.name)?))
        }
        Node::Identifier(ident) if STATEMENT_NAME.is_match(&ident.name) => {
            Some(Node::StatementPlaceholder(Placeholder::statement(&ident.name)?))
        }
        Node::Identifier(ident) if GENERIC_NAME.is_match(&ident.name) => {
            Some(Node::GenericPlaceholder(GenericPlaceholder {
                name: ident.name.clone(),
                target: GenericTarget::Identifier,
            }))
        }
        Node::Literal(lit) => match lit.as_str() {
            Some(value) if GENERIC_NAME.is_match(value) => {
                Some(Node::GenericPlaceholder(GenericPlaceholder {
                    name: value.to_string(),
                    target: GenericTarget::StringLiteral,
                }))
            }
            _ => None,
        },
        // `var expression1, expression2_repeatable;` matches whole declarators.
        Node::VariableDeclarator { id, init: None } => match id.as_ref() {
            Node::ExpressionPlaceholder(placeholder) => {
                Some(Node::ExpressionPlaceholder(placeholder.clone()))
            }
            _ => None,
        },
        Node::ExpressionStatement { expression } => match expression.as_ref() {
            Node::StatementPlaceholder(placeholder) => {
                Some(Node::StatementPlaceholder(placeholder.clone()))
            }
            _ => None,
        },
        _ => None,
    };

    if let Some(replacement) = replacement {
        *node = replacement;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::placeholder::Restriction;

    #[test]
    fn test_statement_placeholder_collapses_its_statement() {
        let pattern = compile("statement12;").unwrap();
        let Node::StatementPlaceholder(p) = pattern.root() else {
            panic!("expected statement placeholder, got {:?}", pattern.root());
        };
        assert_eq!(p.name, "statement12");
    }

    #[test]
    fn test_trailing_semicolon_keeps_expression_statement() {
        assert!(matches!(
            compile("x = 2;").unwrap().root(),
            Node::ExpressionStatement { .. }
        ));
        assert!(matches!(
            compile("x = 2").unwrap().root(),
            Node::AssignmentExpression { .. }
        ));
    }

    #[test]
    fn test_identifiers_in_property_position_become_placeholders() {
        let pattern = compile("expression1.placeholder2").unwrap();
        let Node::MemberExpression { object, property, .. } = pattern.root() else {
            panic!("expected member expression");
        };
        assert!(matches!(object.as_ref(), Node::ExpressionPlaceholder(_)));
        assert!(matches!(
            property.as_ref(),
            Node::GenericPlaceholder(GenericPlaceholder {
                target: GenericTarget::Identifier,
                ..
            })
        ));
    }

    #[test]
    fn test_string_literal_placeholder() {
        let pattern = compile("require('placeholder1')").unwrap();
        let Node::CallExpression { arguments, .. } = pattern.root() else {
            panic!("expected call");
        };
        assert!(matches!(
            &arguments[0],
            Node::GenericPlaceholder(GenericPlaceholder {
                target: GenericTarget::StringLiteral,
                ..
            })
        ));
    }

    #[test]
    fn test_restriction_modifier() {
        let pattern = compile("eval(expression1_literal)").unwrap();
        let Node::CallExpression { arguments, .. } = pattern.root() else {
            panic!("expected call");
        };
        let Node::ExpressionPlaceholder(p) = &arguments[0] else {
            panic!("expected placeholder");
        };
        assert_eq!(p.restriction, Restriction::Literal);
    }

    #[test]
    fn test_declarator_placeholder_stands_for_whole_declarator() {
        let pattern = compile("var expression1, expression2_repeatable;").unwrap();
        let Node::VariableDeclaration { declarations, .. } = pattern.root() else {
            panic!("expected declaration, got {:?}", pattern.root());
        };
        assert!(matches!(&declarations[0], Node::ExpressionPlaceholder(p) if !p.repeatable));
        assert!(matches!(&declarations[1], Node::ExpressionPlaceholder(p) if p.repeatable));

        let pattern = compile("var placeholder1 = expression1;").unwrap();
        let Node::VariableDeclaration { declarations, .. } = pattern.root() else {
            panic!("expected declaration");
        };
        assert!(matches!(&declarations[0], Node::VariableDeclarator { init: Some(_), .. }));
    }

    #[test]
    fn test_unknown_modifier_fails_compilation() {
        assert!(compile("expression1_sometimes + 1").is_err());
    }
}
