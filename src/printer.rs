//! Prints the owned tree back to JavaScript source.
//!
//! Two-space indent, K&R braces, double-quoted strings. Parentheses are
//! inserted from operator precedence only, and braces are never added to
//! unbraced bodies except where an `else` would otherwise bind to the wrong
//! `if`.

use std::fmt::Write as _;

use crate::ast::{Class, Function, Literal, LiteralValue, Node};
use crate::output::Output;

const SEQUENCE: u8 = 1;
const ASSIGNMENT: u8 = 2;
const CONDITIONAL: u8 = 3;
const LOGICAL_OR: u8 = 4;
const LOGICAL_AND: u8 = 5;
const UNARY: u8 = 15;
const POSTFIX: u8 = 16;
const CALL: u8 = 17;
const PRIMARY: u8 = 18;

pub fn print(tree: &Node) -> String {
    let mut printer = Printer {
        out: Output::new("  "),
        no_in: false,
    };
    printer.statement(tree);
    printer.out.finish()
}

fn binary_precedence(operator: &str) -> u8 {
    match operator {
        "|" => 6,
        "^" => 7,
        "&" => 8,
        "==" | "!=" | "===" | "!==" => 9,
        "<" | ">" | "<=" | ">=" | "in" | "instanceof" => 10,
        "<<" | ">>" | ">>>" => 11,
        "+" | "-" => 12,
        "*" | "/" | "%" => 13,
        "**" => 14,
        _ => LOGICAL_OR,
    }
}

fn precedence(node: &Node) -> u8 {
    match node {
        Node::SequenceExpression { .. } => SEQUENCE,
        Node::ArrowFunctionExpression { .. }
        | Node::AssignmentExpression { .. }
        | Node::YieldExpression { .. } => ASSIGNMENT,
        Node::ConditionalExpression { .. } => CONDITIONAL,
        Node::LogicalExpression { operator, .. } => {
            if operator == "&&" {
                LOGICAL_AND
            } else {
                LOGICAL_OR
            }
        }
        Node::BinaryExpression { operator, .. } => binary_precedence(operator),
        Node::UnaryExpression { .. } | Node::AwaitExpression { .. } => UNARY,
        Node::UpdateExpression { prefix, .. } => {
            if *prefix {
                UNARY
            } else {
                POSTFIX
            }
        }
        Node::CallExpression { .. }
        | Node::NewExpression { .. }
        | Node::MemberExpression { .. }
        | Node::ChainExpression { .. }
        | Node::TaggedTemplateExpression { .. }
        | Node::ImportExpression { .. } => CALL,
        _ => PRIMARY,
    }
}

/// `??` cannot be mixed with `||` or `&&` without parentheses.
fn mixes_nullish(operator: &str, operand: &Node) -> bool {
    match operand {
        Node::LogicalExpression {
            operator: inner, ..
        } => (operator == "??") != (inner == "??"),
        _ => false,
    }
}

/// Whether a `new` callee contains a call that would otherwise take the
/// argument list.
fn has_call(node: &Node) -> bool {
    match node {
        Node::CallExpression { .. } => true,
        Node::MemberExpression { object, .. } => has_call(object),
        _ => false,
    }
}

/// An `if` without `else` at the tail of `node`.
fn ends_with_open_if(node: &Node) -> bool {
    match node {
        Node::IfStatement {
            alternate: None, ..
        } => true,
        Node::IfStatement {
            alternate: Some(alternate),
            ..
        } => ends_with_open_if(alternate),
        Node::LabeledStatement { body, .. }
        | Node::WhileStatement { body, .. }
        | Node::WithStatement { body, .. }
        | Node::ForStatement { body, .. }
        | Node::ForInStatement { body, .. }
        | Node::ForOfStatement { body, .. } => ends_with_open_if(body),
        _ => false,
    }
}

/// `let[...]` opening a statement reads as a destructuring declaration.
fn is_let_subscript(node: &Node) -> bool {
    matches!(
        node,
        Node::MemberExpression { object, computed: true, .. }
            if object.as_identifier().is_some_and(|ident| ident.name == "let")
    )
}

fn shorthand_holds(key: &Node, value: &Node) -> bool {
    let Some(key) = key.as_identifier() else {
        return false;
    };
    match value {
        Node::Identifier(value) => value.name == key.name,
        Node::AssignmentPattern { left, .. } => {
            left.as_identifier().is_some_and(|left| left.name == key.name)
        }
        _ => false,
    }
}

fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{8}' => out.push_str("\\b"),
            '\u{b}' => out.push_str("\\v"),
            '\u{c}' => out.push_str("\\f"),
            '\0' => {
                if chars.peek().is_some_and(char::is_ascii_digit) {
                    out.push_str("\\x00");
                } else {
                    out.push_str("\\0");
                }
            }
            '\u{2028}' | '\u{2029}' => {
                let _ = write!(out, "\\u{:04X}", c as u32);
            }
            c if c.is_control() => {
                if (c as u32) < 0x100 {
                    let _ = write!(out, "\\x{:02X}", c as u32);
                } else {
                    let _ = write!(out, "\\u{:04X}", c as u32);
                }
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn format_number(value: f64) -> String {
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    format!("{value}")
}

struct Printer {
    out: Output,
    no_in: bool,
}

impl Printer {
    fn token(&mut self, text: &str) {
        self.out.add_token(text);
    }

    fn statement(&mut self, node: &Node) {
        match node {
            Node::Program { body } => {
                for statement in body {
                    self.out.add_newline();
                    self.statement(statement);
                }
            }
            Node::ExpressionStatement { expression } => {
                let destructuring = matches!(
                    expression.as_ref(),
                    Node::AssignmentExpression { left, .. }
                        if matches!(left.as_ref(), Node::ObjectPattern { .. })
                );
                if destructuring {
                    self.token("(");
                    self.expression(expression, SEQUENCE);
                    self.token(")");
                } else {
                    self.expression_at(expression, SEQUENCE, true);
                }
                self.token(";");
            }
            Node::BlockStatement { body } => self.block_body(body),
            Node::EmptyStatement => self.token(";"),
            Node::DebuggerStatement => self.token("debugger;"),
            Node::WithStatement { object, body } => {
                self.token("with (");
                self.expression(object, SEQUENCE);
                self.token(")");
                self.nested(body);
            }
            Node::ReturnStatement { argument } => {
                self.token("return");
                if let Some(argument) = argument {
                    self.token(" ");
                    self.expression(argument, SEQUENCE);
                }
                self.token(";");
            }
            Node::LabeledStatement { label, body } => {
                self.expression(label, PRIMARY);
                self.token(": ");
                self.statement(body);
            }
            Node::BreakStatement { label } | Node::ContinueStatement { label } => {
                self.token(if matches!(node, Node::BreakStatement { .. }) {
                    "break"
                } else {
                    "continue"
                });
                if let Some(label) = label {
                    self.token(" ");
                    self.expression(label, PRIMARY);
                }
                self.token(";");
            }
            Node::IfStatement {
                test,
                consequent,
                alternate,
            } => self.if_statement(test, consequent, alternate.as_deref()),
            Node::SwitchStatement {
                discriminant,
                cases,
            } => {
                self.token("switch (");
                self.expression(discriminant, SEQUENCE);
                self.token(") {");
                self.out.add_indent();
                for case in cases {
                    self.out.add_newline();
                    self.statement(case);
                }
                self.out.remove_indent();
                self.out.add_newline();
                self.token("}");
            }
            Node::SwitchCase { test, consequent } => {
                match test {
                    Some(test) => {
                        self.token("case ");
                        self.expression(test, SEQUENCE);
                        self.token(":");
                    }
                    None => self.token("default:"),
                }
                self.out.add_indent();
                for statement in consequent {
                    self.out.add_newline();
                    self.statement(statement);
                }
                self.out.remove_indent();
            }
            Node::ThrowStatement { argument } => {
                self.token("throw ");
                self.expression(argument, SEQUENCE);
                self.token(";");
            }
            Node::TryStatement {
                block,
                handler,
                finalizer,
            } => {
                self.token("try ");
                self.statement(block);
                if let Some(handler) = handler {
                    self.token(" ");
                    self.statement(handler);
                }
                if let Some(finalizer) = finalizer {
                    self.token(" finally ");
                    self.statement(finalizer);
                }
            }
            Node::CatchClause { param, body } => {
                self.token("catch ");
                if let Some(param) = param {
                    self.token("(");
                    self.expression(param, ASSIGNMENT);
                    self.token(") ");
                }
                self.statement(body);
            }
            Node::WhileStatement { test, body } => {
                self.token("while (");
                self.expression(test, SEQUENCE);
                self.token(")");
                self.nested(body);
            }
            Node::DoWhileStatement { body, test } => {
                self.token("do");
                self.nested(body);
                if matches!(body.as_ref(), Node::BlockStatement { .. }) {
                    self.token(" ");
                } else {
                    self.out.add_newline();
                }
                self.token("while (");
                self.expression(test, SEQUENCE);
                self.token(");");
            }
            Node::ForStatement {
                init,
                test,
                update,
                body,
            } => {
                self.token("for (");
                if let Some(init) = init {
                    // `in` would end the initializer.
                    self.no_in = true;
                    self.expression(init, SEQUENCE);
                    self.no_in = false;
                }
                self.token(";");
                if let Some(test) = test {
                    self.token(" ");
                    self.expression(test, SEQUENCE);
                }
                self.token(";");
                if let Some(update) = update {
                    self.token(" ");
                    self.expression(update, SEQUENCE);
                }
                self.token(")");
                self.nested(body);
            }
            Node::ForInStatement { left, right, body } => {
                self.token("for (");
                self.expression(left, CALL);
                self.token(" in ");
                self.expression(right, SEQUENCE);
                self.token(")");
                self.nested(body);
            }
            Node::ForOfStatement {
                left,
                right,
                body,
                is_await,
            } => {
                self.token(if *is_await { "for await (" } else { "for (" });
                self.expression(left, CALL);
                self.token(" of ");
                self.expression(right, ASSIGNMENT);
                self.token(")");
                self.nested(body);
            }
            Node::FunctionDeclaration(func) => self.function(func),
            Node::VariableDeclaration { .. } => {
                self.expression(node, SEQUENCE);
                self.token(";");
            }
            Node::ClassDeclaration(class) => self.class(class),
            Node::StatementPlaceholder(placeholder) => {
                self.token(&placeholder.name);
                self.token(";");
            }
            other => self.expression(other, SEQUENCE),
        }
    }

    fn block_body(&mut self, body: &[Node]) {
        self.token("{");
        if body.is_empty() {
            self.token("}");
            return;
        }
        self.out.add_indent();
        for statement in body {
            self.out.add_newline();
            self.statement(statement);
        }
        self.out.remove_indent();
        self.out.add_newline();
        self.token("}");
    }

    /// Body of a compound statement: blocks stay on the header line, anything
    /// else goes on the next line, indented.
    fn nested(&mut self, body: &Node) {
        match body {
            Node::BlockStatement { body } => {
                self.out.add_space();
                self.block_body(body);
            }
            Node::EmptyStatement => self.token(";"),
            other => {
                self.out.add_indent();
                self.out.add_newline();
                self.statement(other);
                self.out.remove_indent();
            }
        }
    }

    fn if_statement(&mut self, test: &Node, consequent: &Node, alternate: Option<&Node>) {
        self.token("if (");
        self.expression(test, SEQUENCE);
        self.token(")");

        let dangling = alternate.is_some() && ends_with_open_if(consequent);
        if dangling {
            self.token(" {");
            self.out.add_indent();
            self.out.add_newline();
            self.statement(consequent);
            self.out.remove_indent();
            self.out.add_newline();
            self.token("}");
        } else {
            self.nested(consequent);
        }

        let Some(alternate) = alternate else {
            return;
        };
        if dangling || matches!(consequent, Node::BlockStatement { .. }) {
            self.token(" ");
        } else {
            self.out.add_newline();
        }
        self.token("else");
        if matches!(alternate, Node::IfStatement { .. }) {
            self.token(" ");
            self.statement(alternate);
        } else {
            self.nested(alternate);
        }
    }

    fn function(&mut self, func: &Function) {
        if func.is_async {
            self.token("async ");
        }
        self.token(if func.generator { "function*" } else { "function" });
        if let Some(id) = &func.id {
            self.token(" ");
            self.expression(id, PRIMARY);
        }
        self.list(&func.params);
        self.token(" ");
        self.statement(&func.body);
    }

    /// Method shorthand shared by object literals and class bodies.
    fn method(&mut self, key: &Node, computed: bool, kind: &str, value: &Node) {
        let Some(func) = value.as_function() else {
            self.property_key(key, computed);
            self.token(": ");
            self.expression(value, ASSIGNMENT);
            return;
        };
        if kind == "get" || kind == "set" {
            self.token(kind);
            self.token(" ");
        }
        if func.is_async {
            self.token("async ");
        }
        if func.generator {
            self.token("*");
        }
        self.property_key(key, computed);
        self.list(&func.params);
        self.token(" ");
        self.statement(&func.body);
    }

    fn class(&mut self, class: &Class) {
        self.token("class");
        if let Some(id) = &class.id {
            self.token(" ");
            self.expression(id, PRIMARY);
        }
        if let Some(super_class) = &class.super_class {
            self.token(" extends ");
            self.expression(super_class, CALL);
        }
        self.token(" ");
        let Node::ClassBody { body } = class.body.as_ref() else {
            self.statement(&class.body);
            return;
        };
        self.token("{");
        if body.is_empty() {
            self.token("}");
            return;
        }
        self.out.add_indent();
        for member in body {
            self.out.add_newline();
            self.class_member(member);
        }
        self.out.remove_indent();
        self.out.add_newline();
        self.token("}");
    }

    fn class_member(&mut self, member: &Node) {
        match member {
            Node::MethodDefinition {
                key,
                value,
                kind,
                computed,
                is_static,
            } => {
                if *is_static {
                    self.token("static ");
                }
                self.method(key, *computed, kind, value);
            }
            Node::PropertyDefinition {
                key,
                value,
                computed,
                is_static,
            } => {
                if *is_static {
                    self.token("static ");
                }
                self.property_key(key, *computed);
                if let Some(value) = value {
                    self.token(" = ");
                    self.expression(value, ASSIGNMENT);
                }
                self.token(";");
            }
            Node::StaticBlock { body } => {
                self.token("static ");
                self.block_body(body);
            }
            other => self.statement(other),
        }
    }

    fn property_key(&mut self, key: &Node, computed: bool) {
        if computed {
            self.token("[");
            self.expression(key, ASSIGNMENT);
            self.token("]");
        } else {
            self.expression(key, PRIMARY);
        }
    }

    fn property(&mut self, node: &Node) {
        let Node::Property {
            key,
            value,
            kind,
            computed,
            method,
            shorthand,
        } = node
        else {
            self.expression(node, ASSIGNMENT);
            return;
        };
        if *method || kind != "init" {
            self.method(key, *computed, kind, value);
        } else if *shorthand && !*computed && shorthand_holds(key, value) {
            self.expression(value, ASSIGNMENT);
        } else {
            self.property_key(key, *computed);
            self.token(": ");
            self.expression(value, ASSIGNMENT);
        }
    }

    /// Parenthesized, comma separated list of parameters or arguments.
    fn list(&mut self, items: &[Node]) {
        self.token("(");
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.token(", ");
            }
            self.expression(item, ASSIGNMENT);
        }
        self.token(")");
    }

    fn elements(&mut self, elements: &[Option<Node>]) {
        self.token("[");
        for (i, element) in elements.iter().enumerate() {
            if i > 0 {
                self.token(", ");
            }
            if let Some(element) = element {
                self.expression(element, ASSIGNMENT);
            }
        }
        if matches!(elements.last(), Some(None)) {
            self.token(",");
        }
        self.token("]");
    }

    fn literal(&mut self, literal: &Literal) {
        match &literal.value {
            LiteralValue::String(value) => self.token(&quote(value)),
            LiteralValue::Number(value) => match &literal.raw {
                Some(raw) => self.token(raw),
                None => self.token(&format_number(*value)),
            },
            LiteralValue::Boolean(value) => self.token(if *value { "true" } else { "false" }),
            LiteralValue::Null => self.token("null"),
            LiteralValue::RegExp { pattern, flags } => {
                self.token(&format!("/{pattern}/{flags}"));
            }
            LiteralValue::BigInt(text) => self.token(text),
        }
    }

    fn expression(&mut self, node: &Node, min: u8) {
        self.expression_at(node, min, false);
    }

    /// Prints an expression, parenthesized when its precedence is below `min`.
    ///
    /// `start` is set along the leftmost edge of an expression statement or an
    /// arrow body, where a leading `function`, `class` or `{` would be read as
    /// something else.
    fn expression_at(&mut self, node: &Node, min: u8, start: bool) {
        let ambiguous_start = start
            && (matches!(
                node,
                Node::FunctionExpression(_)
                    | Node::ClassExpression(_)
                    | Node::ObjectExpression { .. }
            ) || is_let_subscript(node));
        let bare_in = self.no_in
            && matches!(node, Node::BinaryExpression { operator, .. } if operator == "in");
        if precedence(node) < min || ambiguous_start || bare_in {
            self.token("(");
            self.expression_at(node, SEQUENCE, false);
            self.token(")");
            return;
        }

        match node {
            Node::Identifier(ident) => self.token(&ident.name),
            Node::PrivateIdentifier { name } => self.token(&format!("#{name}")),
            Node::Literal(literal) => self.literal(literal),
            Node::ThisExpression => self.token("this"),
            Node::Super => self.token("super"),
            Node::ArrayExpression { elements } | Node::ArrayPattern { elements } => {
                self.elements(elements);
            }
            Node::ObjectExpression { properties } => {
                self.token("{");
                if properties.is_empty() {
                    self.token("}");
                    return;
                }
                self.out.add_indent();
                for (i, property) in properties.iter().enumerate() {
                    self.out.add_newline();
                    self.property(property);
                    if i + 1 < properties.len() {
                        self.token(",");
                    }
                }
                self.out.remove_indent();
                self.out.add_newline();
                self.token("}");
            }
            Node::ObjectPattern { properties } => {
                self.token("{");
                for (i, property) in properties.iter().enumerate() {
                    if i > 0 {
                        self.token(", ");
                    }
                    self.property(property);
                }
                self.token("}");
            }
            Node::Property { .. } => self.property(node),
            Node::FunctionExpression(func) => self.function(func),
            Node::ArrowFunctionExpression {
                params,
                body,
                is_async,
                ..
            } => {
                if *is_async {
                    self.token("async ");
                }
                self.list(params);
                self.token(" => ");
                match body.as_ref() {
                    Node::BlockStatement { body } => self.block_body(body),
                    expression => self.expression_at(expression, ASSIGNMENT, true),
                }
            }
            Node::ClassExpression(class) => self.class(class),
            Node::TemplateLiteral {
                quasis,
                expressions,
            } => {
                self.out.add_template_literal("`");
                for (i, quasi) in quasis.iter().enumerate() {
                    self.expression(quasi, PRIMARY);
                    if let Some(expression) = expressions.get(i) {
                        self.out.add_template_literal("${");
                        self.expression(expression, SEQUENCE);
                        self.out.add_template_literal("}");
                    }
                }
                self.out.add_template_literal("`");
            }
            Node::TemplateElement { raw, .. } => self.out.add_template_literal(raw),
            Node::TaggedTemplateExpression { tag, quasi } => {
                self.expression_at(tag, CALL, start);
                self.expression(quasi, PRIMARY);
            }
            Node::MemberExpression {
                object,
                property,
                computed,
                optional,
            } => {
                let wrap = matches!(object.as_ref(), Node::ChainExpression { .. })
                    || matches!(
                        object.as_ref(),
                        Node::Literal(Literal {
                            value: LiteralValue::Number(_),
                            ..
                        })
                    );
                if wrap {
                    self.token("(");
                    self.expression(object, SEQUENCE);
                    self.token(")");
                } else {
                    self.expression_at(object, CALL, start);
                }
                if *computed {
                    self.token(if *optional { "?.[" } else { "[" });
                    self.expression(property, SEQUENCE);
                    self.token("]");
                } else {
                    self.token(if *optional { "?." } else { "." });
                    self.expression(property, PRIMARY);
                }
            }
            Node::CallExpression {
                callee,
                arguments,
                optional,
            } => {
                if matches!(callee.as_ref(), Node::ChainExpression { .. }) {
                    self.token("(");
                    self.expression(callee, SEQUENCE);
                    self.token(")");
                } else {
                    self.expression_at(callee, CALL, start);
                }
                if *optional {
                    self.token("?.");
                }
                self.list(arguments);
            }
            Node::NewExpression { callee, arguments } => {
                self.token("new ");
                if has_call(callee) || precedence(callee) < CALL {
                    self.token("(");
                    self.expression(callee, SEQUENCE);
                    self.token(")");
                } else {
                    self.expression(callee, CALL);
                }
                self.list(arguments);
            }
            Node::ChainExpression { expression } => self.expression_at(expression, CALL, start),
            Node::UnaryExpression { operator, argument } => {
                self.token(operator);
                let word = operator.starts_with(|c: char| c.is_ascii_alphabetic());
                let doubled = match argument.as_ref() {
                    Node::UnaryExpression {
                        operator: inner, ..
                    }
                    | Node::UpdateExpression {
                        operator: inner,
                        prefix: true,
                        ..
                    } => operator.chars().next() == inner.chars().next(),
                    _ => false,
                };
                if word || doubled {
                    self.token(" ");
                }
                self.expression(argument, UNARY);
            }
            Node::UpdateExpression {
                operator,
                prefix,
                argument,
            } => {
                if *prefix {
                    self.token(operator);
                    self.expression(argument, UNARY);
                } else {
                    self.expression_at(argument, POSTFIX, start);
                    self.token(operator);
                }
            }
            Node::BinaryExpression {
                operator,
                left,
                right,
            }
            | Node::LogicalExpression {
                operator,
                left,
                right,
            } => {
                let own = precedence(node);
                let (mut left_min, mut right_min) = if operator == "**" {
                    (POSTFIX, own)
                } else {
                    (own, own + 1)
                };
                if mixes_nullish(operator, left) {
                    left_min = PRIMARY;
                }
                if mixes_nullish(operator, right) {
                    right_min = PRIMARY;
                }
                self.expression_at(left, left_min, start);
                self.token(" ");
                self.token(operator);
                self.token(" ");
                self.expression(right, right_min);
            }
            Node::AssignmentExpression {
                operator,
                left,
                right,
            } => {
                self.expression_at(left, CALL, start);
                self.token(" ");
                self.token(operator);
                self.token(" ");
                self.expression(right, ASSIGNMENT);
            }
            Node::ConditionalExpression {
                test,
                consequent,
                alternate,
            } => {
                self.expression_at(test, LOGICAL_OR, start);
                self.token(" ? ");
                self.expression(consequent, ASSIGNMENT);
                self.token(" : ");
                self.expression(alternate, ASSIGNMENT);
            }
            Node::SequenceExpression { expressions } => {
                for (i, expression) in expressions.iter().enumerate() {
                    if i > 0 {
                        self.token(", ");
                    }
                    self.expression_at(expression, ASSIGNMENT, start && i == 0);
                }
            }
            Node::YieldExpression { argument, delegate } => {
                self.token(if *delegate { "yield*" } else { "yield" });
                if let Some(argument) = argument {
                    self.token(" ");
                    self.expression(argument, ASSIGNMENT);
                }
            }
            Node::AwaitExpression { argument } => {
                self.token("await ");
                self.expression(argument, UNARY);
            }
            Node::SpreadElement { argument } | Node::RestElement { argument } => {
                self.token("...");
                self.expression(argument, ASSIGNMENT);
            }
            Node::AssignmentPattern { left, right } => {
                self.expression(left, CALL);
                self.token(" = ");
                self.expression(right, ASSIGNMENT);
            }
            Node::ImportExpression { source, options } => {
                self.token("import(");
                self.expression(source, ASSIGNMENT);
                if let Some(options) = options {
                    self.token(", ");
                    self.expression(options, ASSIGNMENT);
                }
                self.token(")");
            }
            Node::MetaProperty { meta, property } => {
                self.expression(meta, PRIMARY);
                self.token(".");
                self.expression(property, PRIMARY);
            }
            Node::VariableDeclaration { kind, declarations } => {
                self.token(kind);
                self.token(" ");
                for (i, declarator) in declarations.iter().enumerate() {
                    if i > 0 {
                        self.token(", ");
                    }
                    self.expression(declarator, ASSIGNMENT);
                }
            }
            Node::VariableDeclarator { id, init } => {
                self.expression(id, ASSIGNMENT);
                if let Some(init) = init {
                    self.token(" = ");
                    self.expression(init, ASSIGNMENT);
                }
            }
            Node::ExpressionPlaceholder(placeholder) => self.token(&placeholder.name),
            Node::GenericPlaceholder(generic) => self.token(&generic.name),
            statement => self.statement(statement),
        }
    }
}
