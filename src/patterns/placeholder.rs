//! Placeholder nodes of compiled patterns and their modifier parsing.

use super::CompileError;
use crate::ast::Node;

/// Extra condition a placeholder puts on the node kind it accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Restriction {
    #[default]
    None,
    /// Expressions other than identifiers and literals, statements other than declarations.
    Strict,
    Identifier,
    Literal,
    Declaration,
    ClassDeclaration,
    FunctionDeclaration,
    VariableDeclaration,
}

/// `expressionN` / `statementN` placeholder with its modifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// Name without modifiers, e.g. `expression1`.
    pub name: String,
    pub optional: bool,
    pub repeatable: bool,
    pub or_declaration: bool,
    pub multi_line: bool,
    pub restriction: Restriction,
}

impl Placeholder {
    fn bare(name: &str) -> Self {
        Self {
            name: name.to_string(),
            optional: false,
            repeatable: false,
            or_declaration: false,
            multi_line: false,
            restriction: Restriction::None,
        }
    }

    /// Parses `expression3_literal_repeatable` style names.
    pub fn expression(full_name: &str) -> Result<Self, CompileError> {
        let mut parts = full_name.split('_');
        let mut placeholder = Self::bare(parts.next().unwrap_or_default());
        for modifier in parts {
            match modifier {
                "optional" => placeholder.optional = true,
                "repeatable" => placeholder.repeatable = true,
                "strict" => placeholder.restriction = Restriction::Strict,
                "identifier" => placeholder.restriction = Restriction::Identifier,
                "literal" => placeholder.restriction = Restriction::Literal,
                "orDeclaration" => placeholder.or_declaration = true,
                _ => {
                    return Err(CompileError(format!(
                        "unknown expression placeholder modifier `{modifier}` in {full_name}"
                    )));
                }
            }
        }
        Ok(placeholder)
    }

    /// Parses `statement2_multiLine_optional` style names.
    pub fn statement(full_name: &str) -> Result<Self, CompileError> {
        let mut parts = full_name.split('_');
        let mut placeholder = Self::bare(parts.next().unwrap_or_default());
        for modifier in parts {
            match modifier {
                "optional" => placeholder.optional = true,
                "repeatable" => placeholder.repeatable = true,
                "strict" => placeholder.restriction = Restriction::Strict,
                "declaration" => placeholder.restriction = Restriction::Declaration,
                "classDeclaration" => placeholder.restriction = Restriction::ClassDeclaration,
                "functionDeclaration" => {
                    placeholder.restriction = Restriction::FunctionDeclaration;
                }
                "variableDeclaration" => {
                    placeholder.restriction = Restriction::VariableDeclaration;
                }
                "multiLine" => placeholder.multi_line = true,
                _ => {
                    return Err(CompileError(format!(
                        "unknown statement placeholder modifier `{modifier}` in {full_name}"
                    )));
                }
            }
        }
        Ok(placeholder)
    }

    /// Whether an expression slot holding `node` (or nothing) satisfies this placeholder.
    ///
    /// Unrestricted expression placeholders also take variable declarators so
    /// that declarator lists can be matched like sequences.
    pub fn accepts_expression(&self, node: Option<&Node>) -> bool {
        let Some(node) = node else {
            return self.optional;
        };
        if self.or_declaration && matches!(node, Node::VariableDeclaration { .. }) {
            return true;
        }
        match self.restriction {
            Restriction::Strict => node.is_strict_expression(),
            Restriction::Identifier => matches!(node, Node::Identifier(_)),
            Restriction::Literal => matches!(node, Node::Literal(_)),
            _ => node.is_expression() || matches!(node, Node::VariableDeclarator { .. }),
        }
    }

    pub fn accepts_statement(&self, node: Option<&Node>) -> bool {
        let Some(node) = node else {
            return self.optional;
        };
        let kind_ok = match self.restriction {
            Restriction::Strict => node.is_strict_statement(),
            Restriction::Declaration => node.is_declaration(),
            Restriction::ClassDeclaration => matches!(node, Node::ClassDeclaration(_)),
            Restriction::FunctionDeclaration => matches!(node, Node::FunctionDeclaration(_)),
            Restriction::VariableDeclaration => {
                matches!(node, Node::VariableDeclaration { .. })
            }
            _ => node.is_statement(),
        };
        kind_ok && !(self.multi_line && node.is_single_line_statement())
    }
}

/// What a `placeholderN` stood for in the pattern source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenericTarget {
    Identifier,
    StringLiteral,
}

/// `placeholderN` in identifier or string position, capturing a plain name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenericPlaceholder {
    pub name: String,
    pub target: GenericTarget,
}

impl GenericPlaceholder {
    /// The name `node` contributes when it sits where this placeholder does.
    pub fn value_of<'n>(&self, node: &'n Node) -> Option<&'n str> {
        match (self.target, node) {
            (GenericTarget::Identifier, Node::Identifier(ident)) => Some(&ident.name),
            (GenericTarget::StringLiteral, Node::Literal(lit)) => lit.as_str(),
            _ => None,
        }
    }

    pub fn rebuild(&self, value: &str) -> Node {
        match self.target {
            GenericTarget::Identifier => Node::identifier(value),
            GenericTarget::StringLiteral => Node::string(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifiers_are_parsed() {
        let p = Placeholder::expression("expression4_literal_repeatable_optional").unwrap();
        assert_eq!(p.name, "expression4");
        assert!(p.optional && p.repeatable);
        assert_eq!(p.restriction, Restriction::Literal);

        let s = Placeholder::statement("statement1_multiLine").unwrap();
        assert_eq!(s.name, "statement1");
        assert!(s.multi_line);
    }

    #[test]
    fn test_unknown_modifier_is_rejected() {
        assert!(Placeholder::expression("expression1_bogus").is_err());
        assert!(Placeholder::statement("statement1_literal").is_err());
    }

    #[test]
    fn test_multi_line_rejects_simple_statements() {
        let p = Placeholder::statement("statement1_multiLine").unwrap();
        assert!(!p.accepts_statement(Some(&Node::EmptyStatement)));
        assert!(!p.accepts_statement(Some(&Node::BlockStatement { body: vec![] })));
        assert!(p.accepts_statement(Some(&Node::DebuggerStatement)));
    }

    #[test]
    fn test_strict_expression_rejects_leaves() {
        let p = Placeholder::expression("expression1_strict").unwrap();
        assert!(!p.accepts_expression(Some(&Node::identifier("a"))));
        assert!(!p.accepts_expression(Some(&Node::string("a"))));
        assert!(p.accepts_expression(Some(&Node::ThisExpression)));
    }
}
