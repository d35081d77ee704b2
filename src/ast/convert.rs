//! Conversion from the oxc arena AST into the owned [`Node`] tree.

use std::cell::Cell;

use oxc_allocator::Allocator;
use oxc_ast::ast as js;
use oxc_parser::{ParseOptions, Parser};
use oxc_span::{GetSpan, SourceType, Span};

use super::{Class, Function, Literal, LiteralValue, Node};
use crate::{DebundleError, Result};

/// Deepest statement and expression nesting accepted by [`parse_program`].
pub const MAX_NESTING: usize = 2000;

/// Parses script text into an owned tree.
///
/// Top-level `return` is accepted so that statement fragments used as
/// patterns parse on their own. Input nested deeper than [`MAX_NESTING`]
/// levels is rejected.
pub fn parse_program(source: &str) -> Result<Node> {
    parse_with_nesting_limit(source, MAX_NESTING)
}

fn parse_with_nesting_limit(source: &str, max_nesting: usize) -> Result<Node> {
    let allocator = Allocator::default();
    let options = ParseOptions {
        allow_return_outside_function: true,
        ..ParseOptions::default()
    };
    let parse_result = Parser::new(&allocator, source, SourceType::cjs())
        .with_options(options)
        .parse();

    if let Some(error) = parse_result.errors.first() {
        return Err(DebundleError::Parse(format!("{error:?}")));
    }

    let converter = Converter {
        source,
        depth: Cell::new(0),
        max_nesting,
    };
    converter.program(&parse_result.program)
}

struct Converter<'s> {
    source: &'s str,
    depth: Cell<usize>,
    max_nesting: usize,
}

fn boxed(node: Node) -> Box<Node> {
    Box::new(node)
}

impl Converter<'_> {
    fn program(&self, program: &js::Program<'_>) -> Result<Node> {
        let mut body = self.directives(&program.directives);
        body.extend(self.statements(&program.body)?);
        Ok(Node::Program { body })
    }

    /// Runs `convert` one nesting level deeper.
    fn nested<T>(&self, span: Span, convert: impl FnOnce() -> Result<T>) -> Result<T> {
        let depth = self.depth.get() + 1;
        if depth > self.max_nesting {
            let snippet: String = span.source_text(self.source).chars().take(60).collect();
            return Err(DebundleError::Parse(format!(
                "nesting deeper than {} levels at `{snippet}`",
                self.max_nesting
            )));
        }
        self.depth.set(depth);
        let result = convert();
        self.depth.set(depth - 1);
        result
    }

    fn text(&self, span: Span) -> String {
        span.source_text(self.source).to_string()
    }

    fn unsupported(&self, span: Span) -> DebundleError {
        let snippet: String = span.source_text(self.source).chars().take(60).collect();
        DebundleError::Parse(format!("unsupported syntax: `{snippet}`"))
    }

    fn directives(&self, directives: &[js::Directive<'_>]) -> Vec<Node> {
        directives
            .iter()
            .map(|directive| {
                Node::expression_statement(Node::string(directive.expression.value.as_str()))
            })
            .collect()
    }

    fn statements(&self, statements: &[js::Statement<'_>]) -> Result<Vec<Node>> {
        statements.iter().map(|s| self.statement(s)).collect()
    }

    fn block(&self, block: &js::BlockStatement<'_>) -> Result<Node> {
        Ok(Node::BlockStatement {
            body: self.statements(&block.body)?,
        })
    }

    fn function_body(&self, body: &js::FunctionBody<'_>) -> Result<Node> {
        let mut statements = self.directives(&body.directives);
        statements.extend(self.statements(&body.statements)?);
        Ok(Node::BlockStatement { body: statements })
    }

    fn boxed_expression(&self, expr: &js::Expression<'_>) -> Result<Box<Node>> {
        self.expression(expr).map(boxed)
    }

    fn optional_expression(&self, expr: Option<&js::Expression<'_>>) -> Result<Option<Box<Node>>> {
        expr.map(|e| self.boxed_expression(e)).transpose()
    }

    fn boxed_statement(&self, stmt: &js::Statement<'_>) -> Result<Box<Node>> {
        self.statement(stmt).map(boxed)
    }

    fn statement(&self, stmt: &js::Statement<'_>) -> Result<Node> {
        self.nested(stmt.span(), || self.statement_kind(stmt))
    }

    fn statement_kind(&self, stmt: &js::Statement<'_>) -> Result<Node> {
        let node = match stmt {
            js::Statement::BlockStatement(block) => self.block(block)?,
            js::Statement::ExpressionStatement(s) => Node::ExpressionStatement {
                expression: self.boxed_expression(&s.expression)?,
            },
            js::Statement::EmptyStatement(_) => Node::EmptyStatement,
            js::Statement::DebuggerStatement(_) => Node::DebuggerStatement,
            js::Statement::WithStatement(s) => Node::WithStatement {
                object: self.boxed_expression(&s.object)?,
                body: self.boxed_statement(&s.body)?,
            },
            js::Statement::ReturnStatement(s) => Node::ReturnStatement {
                argument: self.optional_expression(s.argument.as_ref())?,
            },
            js::Statement::LabeledStatement(s) => Node::LabeledStatement {
                label: boxed(Node::identifier(s.label.name.as_str())),
                body: self.boxed_statement(&s.body)?,
            },
            js::Statement::BreakStatement(s) => Node::BreakStatement {
                label: s
                    .label
                    .as_ref()
                    .map(|label| boxed(Node::identifier(label.name.as_str()))),
            },
            js::Statement::ContinueStatement(s) => Node::ContinueStatement {
                label: s
                    .label
                    .as_ref()
                    .map(|label| boxed(Node::identifier(label.name.as_str()))),
            },
            js::Statement::IfStatement(s) => Node::IfStatement {
                test: self.boxed_expression(&s.test)?,
                consequent: self.boxed_statement(&s.consequent)?,
                alternate: s
                    .alternate
                    .as_ref()
                    .map(|alt| self.boxed_statement(alt))
                    .transpose()?,
            },
            js::Statement::SwitchStatement(s) => {
                let mut cases = Vec::with_capacity(s.cases.len());
                for case in &s.cases {
                    cases.push(Node::SwitchCase {
                        test: self.optional_expression(case.test.as_ref())?,
                        consequent: self.statements(&case.consequent)?,
                    });
                }
                Node::SwitchStatement {
                    discriminant: self.boxed_expression(&s.discriminant)?,
                    cases,
                }
            }
            js::Statement::ThrowStatement(s) => Node::ThrowStatement {
                argument: self.boxed_expression(&s.argument)?,
            },
            js::Statement::TryStatement(s) => {
                let handler = match &s.handler {
                    Some(handler) => Some(boxed(Node::CatchClause {
                        param: handler
                            .param
                            .as_ref()
                            .map(|param| self.binding(&param.pattern).map(boxed))
                            .transpose()?,
                        body: boxed(self.block(&handler.body)?),
                    })),
                    None => None,
                };
                Node::TryStatement {
                    block: boxed(self.block(&s.block)?),
                    handler,
                    finalizer: s
                        .finalizer
                        .as_ref()
                        .map(|block| self.block(block).map(boxed))
                        .transpose()?,
                }
            }
            js::Statement::WhileStatement(s) => Node::WhileStatement {
                test: self.boxed_expression(&s.test)?,
                body: self.boxed_statement(&s.body)?,
            },
            js::Statement::DoWhileStatement(s) => Node::DoWhileStatement {
                body: self.boxed_statement(&s.body)?,
                test: self.boxed_expression(&s.test)?,
            },
            js::Statement::ForStatement(s) => Node::ForStatement {
                init: s
                    .init
                    .as_ref()
                    .map(|init| self.for_init(init).map(boxed))
                    .transpose()?,
                test: self.optional_expression(s.test.as_ref())?,
                update: self.optional_expression(s.update.as_ref())?,
                body: self.boxed_statement(&s.body)?,
            },
            js::Statement::ForInStatement(s) => Node::ForInStatement {
                left: boxed(self.for_left(&s.left)?),
                right: self.boxed_expression(&s.right)?,
                body: self.boxed_statement(&s.body)?,
            },
            js::Statement::ForOfStatement(s) => Node::ForOfStatement {
                left: boxed(self.for_left(&s.left)?),
                right: self.boxed_expression(&s.right)?,
                body: self.boxed_statement(&s.body)?,
                is_await: s.r#await,
            },
            js::Statement::VariableDeclaration(decl) => self.variable_declaration(decl)?,
            js::Statement::FunctionDeclaration(func) => {
                Node::FunctionDeclaration(self.function(func)?)
            }
            js::Statement::ClassDeclaration(class) => Node::ClassDeclaration(self.class(class)?),
            other => return Err(self.unsupported(other.span())),
        };
        Ok(node)
    }

    fn variable_declaration(&self, decl: &js::VariableDeclaration<'_>) -> Result<Node> {
        let kind = match decl.kind {
            js::VariableDeclarationKind::Var => "var",
            js::VariableDeclarationKind::Let => "let",
            js::VariableDeclarationKind::Const => "const",
            _ => return Err(self.unsupported(decl.span)),
        };
        let mut declarations = Vec::with_capacity(decl.declarations.len());
        for declarator in &decl.declarations {
            declarations.push(Node::VariableDeclarator {
                id: boxed(self.binding(&declarator.id)?),
                init: self.optional_expression(declarator.init.as_ref())?,
            });
        }
        Ok(Node::VariableDeclaration {
            kind: kind.to_string(),
            declarations,
        })
    }

    fn for_init(&self, init: &js::ForStatementInit<'_>) -> Result<Node> {
        if let js::ForStatementInit::VariableDeclaration(decl) = init {
            return self.variable_declaration(decl);
        }
        match init.as_expression() {
            Some(expr) => self.expression(expr),
            None => Err(self.unsupported(init.span())),
        }
    }

    fn for_left(&self, left: &js::ForStatementLeft<'_>) -> Result<Node> {
        if let js::ForStatementLeft::VariableDeclaration(decl) = left {
            return self.variable_declaration(decl);
        }
        match left.as_assignment_target() {
            Some(target) => self.assignment_target(target),
            None => Err(self.unsupported(left.span())),
        }
    }

    fn function(&self, func: &js::Function<'_>) -> Result<Function> {
        let Some(body) = &func.body else {
            return Err(self.unsupported(func.span));
        };
        Ok(Function {
            id: func
                .id
                .as_ref()
                .map(|id| boxed(Node::identifier(id.name.as_str()))),
            params: self.params(&func.params)?,
            body: boxed(self.function_body(body)?),
            generator: func.generator,
            is_async: func.r#async,
        })
    }

    fn params(&self, params: &js::FormalParameters<'_>) -> Result<Vec<Node>> {
        let mut nodes = params
            .items
            .iter()
            .map(|param| self.binding(&param.pattern))
            .collect::<Result<Vec<_>>>()?;
        if let Some(rest) = &params.rest {
            nodes.push(Node::RestElement {
                argument: boxed(self.binding(&rest.rest.argument)?),
            });
        }
        Ok(nodes)
    }

    fn class(&self, class: &js::Class<'_>) -> Result<Class> {
        let mut body = Vec::with_capacity(class.body.body.len());
        for element in &class.body.body {
            body.push(match element {
                js::ClassElement::MethodDefinition(method) => Node::MethodDefinition {
                    key: boxed(self.property_key(&method.key)?),
                    value: boxed(Node::FunctionExpression(self.function(&method.value)?)),
                    kind: match method.kind {
                        js::MethodDefinitionKind::Constructor => "constructor",
                        js::MethodDefinitionKind::Method => "method",
                        js::MethodDefinitionKind::Get => "get",
                        js::MethodDefinitionKind::Set => "set",
                    }
                    .to_string(),
                    computed: method.computed,
                    is_static: method.r#static,
                },
                js::ClassElement::PropertyDefinition(prop) => Node::PropertyDefinition {
                    key: boxed(self.property_key(&prop.key)?),
                    value: self.optional_expression(prop.value.as_ref())?,
                    computed: prop.computed,
                    is_static: prop.r#static,
                },
                js::ClassElement::StaticBlock(block) => Node::StaticBlock {
                    body: self.statements(&block.body)?,
                },
                other => return Err(self.unsupported(other.span())),
            });
        }
        Ok(Class {
            id: class
                .id
                .as_ref()
                .map(|id| boxed(Node::identifier(id.name.as_str()))),
            super_class: self.optional_expression(class.super_class.as_ref())?,
            body: boxed(Node::ClassBody { body }),
        })
    }

    fn property_key(&self, key: &js::PropertyKey<'_>) -> Result<Node> {
        match key {
            js::PropertyKey::StaticIdentifier(id) => Ok(Node::identifier(id.name.as_str())),
            js::PropertyKey::PrivateIdentifier(id) => Ok(Node::PrivateIdentifier {
                name: id.name.to_string(),
            }),
            _ => match key.as_expression() {
                Some(expr) => self.expression(expr),
                None => Err(self.unsupported(key.span())),
            },
        }
    }

    fn binding(&self, pattern: &js::BindingPattern<'_>) -> Result<Node> {
        match pattern {
            js::BindingPattern::BindingIdentifier(id) => Ok(Node::identifier(id.name.as_str())),
            js::BindingPattern::ObjectPattern(pat) => {
                let mut properties = Vec::with_capacity(pat.properties.len());
                for prop in &pat.properties {
                    properties.push(Node::Property {
                        key: boxed(self.property_key(&prop.key)?),
                        value: boxed(self.binding(&prop.value)?),
                        kind: "init".to_string(),
                        computed: prop.computed,
                        method: false,
                        shorthand: prop.shorthand,
                    });
                }
                if let Some(rest) = &pat.rest {
                    properties.push(Node::RestElement {
                        argument: boxed(self.binding(&rest.argument)?),
                    });
                }
                Ok(Node::ObjectPattern { properties })
            }
            js::BindingPattern::ArrayPattern(pat) => {
                let mut elements = pat
                    .elements
                    .iter()
                    .map(|element| element.as_ref().map(|e| self.binding(e)).transpose())
                    .collect::<Result<Vec<_>>>()?;
                if let Some(rest) = &pat.rest {
                    elements.push(Some(Node::RestElement {
                        argument: boxed(self.binding(&rest.argument)?),
                    }));
                }
                Ok(Node::ArrayPattern { elements })
            }
            js::BindingPattern::AssignmentPattern(pat) => Ok(Node::AssignmentPattern {
                left: boxed(self.binding(&pat.left)?),
                right: self.boxed_expression(&pat.right)?,
            }),
        }
    }

    fn assignment_target(&self, target: &js::AssignmentTarget<'_>) -> Result<Node> {
        match target {
            js::AssignmentTarget::AssignmentTargetIdentifier(id) => {
                Ok(Node::identifier(id.name.as_str()))
            }
            js::AssignmentTarget::StaticMemberExpression(m) => self.static_member(m),
            js::AssignmentTarget::ComputedMemberExpression(m) => self.computed_member(m),
            js::AssignmentTarget::PrivateFieldExpression(m) => self.private_field(m),
            js::AssignmentTarget::ArrayAssignmentTarget(array) => {
                let mut elements = array
                    .elements
                    .iter()
                    .map(|element| element.as_ref().map(|e| self.maybe_default(e)).transpose())
                    .collect::<Result<Vec<_>>>()?;
                if let Some(rest) = &array.rest {
                    elements.push(Some(Node::RestElement {
                        argument: boxed(self.assignment_target(&rest.target)?),
                    }));
                }
                Ok(Node::ArrayPattern { elements })
            }
            js::AssignmentTarget::ObjectAssignmentTarget(object) => {
                let mut properties = Vec::with_capacity(object.properties.len());
                for prop in &object.properties {
                    properties.push(match prop {
                        js::AssignmentTargetProperty::AssignmentTargetPropertyIdentifier(p) => {
                            let name = Node::identifier(p.binding.name.as_str());
                            let value = match &p.init {
                                Some(init) => Node::AssignmentPattern {
                                    left: boxed(name.clone()),
                                    right: self.boxed_expression(init)?,
                                },
                                None => name.clone(),
                            };
                            Node::Property {
                                key: boxed(name),
                                value: boxed(value),
                                kind: "init".to_string(),
                                computed: false,
                                method: false,
                                shorthand: true,
                            }
                        }
                        js::AssignmentTargetProperty::AssignmentTargetPropertyProperty(p) => {
                            Node::Property {
                                key: boxed(self.property_key(&p.name)?),
                                value: boxed(self.maybe_default(&p.binding)?),
                                kind: "init".to_string(),
                                computed: p.computed,
                                method: false,
                                shorthand: false,
                            }
                        }
                    });
                }
                if let Some(rest) = &object.rest {
                    properties.push(Node::RestElement {
                        argument: boxed(self.assignment_target(&rest.target)?),
                    });
                }
                Ok(Node::ObjectPattern { properties })
            }
            other => Err(self.unsupported(other.span())),
        }
    }

    fn maybe_default(&self, target: &js::AssignmentTargetMaybeDefault<'_>) -> Result<Node> {
        if let js::AssignmentTargetMaybeDefault::AssignmentTargetWithDefault(with_default) = target
        {
            return Ok(Node::AssignmentPattern {
                left: boxed(self.assignment_target(&with_default.binding)?),
                right: self.boxed_expression(&with_default.init)?,
            });
        }
        match target.as_assignment_target() {
            Some(inner) => self.assignment_target(inner),
            None => Err(self.unsupported(target.span())),
        }
    }

    fn simple_target(&self, target: &js::SimpleAssignmentTarget<'_>) -> Result<Node> {
        match target {
            js::SimpleAssignmentTarget::AssignmentTargetIdentifier(id) => {
                Ok(Node::identifier(id.name.as_str()))
            }
            js::SimpleAssignmentTarget::StaticMemberExpression(m) => self.static_member(m),
            js::SimpleAssignmentTarget::ComputedMemberExpression(m) => self.computed_member(m),
            js::SimpleAssignmentTarget::PrivateFieldExpression(m) => self.private_field(m),
            other => Err(self.unsupported(other.span())),
        }
    }

    fn static_member(&self, member: &js::StaticMemberExpression<'_>) -> Result<Node> {
        Ok(Node::MemberExpression {
            object: self.boxed_expression(&member.object)?,
            property: boxed(Node::identifier(member.property.name.as_str())),
            computed: false,
            optional: member.optional,
        })
    }

    fn computed_member(&self, member: &js::ComputedMemberExpression<'_>) -> Result<Node> {
        Ok(Node::MemberExpression {
            object: self.boxed_expression(&member.object)?,
            property: self.boxed_expression(&member.expression)?,
            computed: true,
            optional: member.optional,
        })
    }

    fn private_field(&self, member: &js::PrivateFieldExpression<'_>) -> Result<Node> {
        Ok(Node::MemberExpression {
            object: self.boxed_expression(&member.object)?,
            property: boxed(Node::PrivateIdentifier {
                name: member.field.name.to_string(),
            }),
            computed: false,
            optional: member.optional,
        })
    }

    fn call(&self, call: &js::CallExpression<'_>) -> Result<Node> {
        Ok(Node::CallExpression {
            callee: self.boxed_expression(&call.callee)?,
            arguments: self.arguments(&call.arguments)?,
            optional: call.optional,
        })
    }

    fn arguments(&self, arguments: &[js::Argument<'_>]) -> Result<Vec<Node>> {
        arguments
            .iter()
            .map(|arg| match arg {
                js::Argument::SpreadElement(spread) => Ok(Node::SpreadElement {
                    argument: self.boxed_expression(&spread.argument)?,
                }),
                _ => match arg.as_expression() {
                    Some(expr) => self.expression(expr),
                    None => Err(self.unsupported(arg.span())),
                },
            })
            .collect()
    }

    fn template(&self, template: &js::TemplateLiteral<'_>) -> Result<Node> {
        Ok(Node::TemplateLiteral {
            quasis: template
                .quasis
                .iter()
                .map(|quasi| Node::TemplateElement {
                    raw: quasi.value.raw.to_string(),
                    tail: quasi.tail,
                })
                .collect(),
            expressions: template
                .expressions
                .iter()
                .map(|e| self.expression(e))
                .collect::<Result<_>>()?,
        })
    }

    fn literal(&self, value: LiteralValue, span: Span) -> Node {
        Node::Literal(Literal {
            value,
            raw: Some(self.text(span)),
        })
    }

    fn expression(&self, expr: &js::Expression<'_>) -> Result<Node> {
        self.nested(expr.span(), || self.expression_kind(expr))
    }

    fn expression_kind(&self, expr: &js::Expression<'_>) -> Result<Node> {
        let node = match expr {
            js::Expression::Identifier(id) => Node::identifier(id.name.as_str()),
            js::Expression::NumericLiteral(n) => {
                self.literal(LiteralValue::Number(n.value), n.span)
            }
            js::Expression::StringLiteral(s) => {
                self.literal(LiteralValue::String(s.value.to_string()), s.span)
            }
            js::Expression::BooleanLiteral(b) => {
                self.literal(LiteralValue::Boolean(b.value), b.span)
            }
            js::Expression::NullLiteral(n) => self.literal(LiteralValue::Null, n.span),
            js::Expression::BigIntLiteral(n) => {
                self.literal(LiteralValue::BigInt(self.text(n.span)), n.span)
            }
            js::Expression::RegExpLiteral(r) => {
                let text = self.text(r.span);
                let split = text.rfind('/').unwrap_or(0);
                let pattern = text.get(1..split).unwrap_or_default().to_string();
                let flags = text.get(split + 1..).unwrap_or_default().to_string();
                self.literal(LiteralValue::RegExp { pattern, flags }, r.span)
            }
            js::Expression::ThisExpression(_) => Node::ThisExpression,
            js::Expression::Super(_) => Node::Super,
            js::Expression::TemplateLiteral(t) => self.template(t)?,
            js::Expression::BinaryExpression(b) => Node::BinaryExpression {
                operator: b.operator.as_str().to_string(),
                left: self.boxed_expression(&b.left)?,
                right: self.boxed_expression(&b.right)?,
            },
            js::Expression::LogicalExpression(l) => Node::LogicalExpression {
                operator: l.operator.as_str().to_string(),
                left: self.boxed_expression(&l.left)?,
                right: self.boxed_expression(&l.right)?,
            },
            js::Expression::PrivateInExpression(p) => Node::BinaryExpression {
                operator: "in".to_string(),
                left: boxed(Node::PrivateIdentifier {
                    name: p.left.name.to_string(),
                }),
                right: self.boxed_expression(&p.right)?,
            },
            js::Expression::UnaryExpression(u) => Node::UnaryExpression {
                operator: u.operator.as_str().to_string(),
                argument: self.boxed_expression(&u.argument)?,
            },
            js::Expression::UpdateExpression(u) => Node::UpdateExpression {
                operator: u.operator.as_str().to_string(),
                prefix: u.prefix,
                argument: boxed(self.simple_target(&u.argument)?),
            },
            js::Expression::AssignmentExpression(a) => Node::AssignmentExpression {
                operator: a.operator.as_str().to_string(),
                left: boxed(self.assignment_target(&a.left)?),
                right: self.boxed_expression(&a.right)?,
            },
            js::Expression::ConditionalExpression(c) => Node::ConditionalExpression {
                test: self.boxed_expression(&c.test)?,
                consequent: self.boxed_expression(&c.consequent)?,
                alternate: self.boxed_expression(&c.alternate)?,
            },
            js::Expression::CallExpression(c) => self.call(c)?,
            js::Expression::NewExpression(n) => Node::NewExpression {
                callee: self.boxed_expression(&n.callee)?,
                arguments: self.arguments(&n.arguments)?,
            },
            js::Expression::StaticMemberExpression(m) => self.static_member(m)?,
            js::Expression::ComputedMemberExpression(m) => self.computed_member(m)?,
            js::Expression::PrivateFieldExpression(m) => self.private_field(m)?,
            js::Expression::ArrayExpression(a) => {
                let mut elements = Vec::with_capacity(a.elements.len());
                for element in &a.elements {
                    elements.push(match element {
                        js::ArrayExpressionElement::Elision(_) => None,
                        js::ArrayExpressionElement::SpreadElement(spread) => {
                            Some(Node::SpreadElement {
                                argument: self.boxed_expression(&spread.argument)?,
                            })
                        }
                        _ => match element.as_expression() {
                            Some(e) => Some(self.expression(e)?),
                            None => return Err(self.unsupported(element.span())),
                        },
                    });
                }
                Node::ArrayExpression { elements }
            }
            js::Expression::ObjectExpression(o) => {
                let mut properties = Vec::with_capacity(o.properties.len());
                for prop in &o.properties {
                    properties.push(match prop {
                        js::ObjectPropertyKind::ObjectProperty(p) => Node::Property {
                            key: boxed(self.property_key(&p.key)?),
                            value: self.boxed_expression(&p.value)?,
                            kind: match p.kind {
                                js::PropertyKind::Init => "init",
                                js::PropertyKind::Get => "get",
                                js::PropertyKind::Set => "set",
                            }
                            .to_string(),
                            computed: p.computed,
                            method: p.method,
                            shorthand: p.shorthand,
                        },
                        js::ObjectPropertyKind::SpreadProperty(spread) => Node::SpreadElement {
                            argument: self.boxed_expression(&spread.argument)?,
                        },
                    });
                }
                Node::ObjectExpression { properties }
            }
            js::Expression::FunctionExpression(f) => Node::FunctionExpression(self.function(f)?),
            js::Expression::ArrowFunctionExpression(arrow) => {
                let params = self.params(&arrow.params)?;
                if arrow.expression {
                    let body = match arrow.body.statements.first() {
                        Some(js::Statement::ExpressionStatement(s)) => {
                            self.expression(&s.expression)?
                        }
                        _ => return Err(self.unsupported(arrow.span)),
                    };
                    Node::ArrowFunctionExpression {
                        params,
                        body: boxed(body),
                        expression: true,
                        is_async: arrow.r#async,
                    }
                } else {
                    Node::ArrowFunctionExpression {
                        params,
                        body: boxed(self.function_body(&arrow.body)?),
                        expression: false,
                        is_async: arrow.r#async,
                    }
                }
            }
            js::Expression::ClassExpression(c) => Node::ClassExpression(self.class(c)?),
            js::Expression::SequenceExpression(s) => Node::SequenceExpression {
                expressions: s
                    .expressions
                    .iter()
                    .map(|e| self.expression(e))
                    .collect::<Result<_>>()?,
            },
            js::Expression::AwaitExpression(a) => Node::AwaitExpression {
                argument: self.boxed_expression(&a.argument)?,
            },
            js::Expression::YieldExpression(y) => Node::YieldExpression {
                argument: self.optional_expression(y.argument.as_ref())?,
                delegate: y.delegate,
            },
            js::Expression::TaggedTemplateExpression(t) => Node::TaggedTemplateExpression {
                tag: self.boxed_expression(&t.tag)?,
                quasi: boxed(self.template(&t.quasi)?),
            },
            js::Expression::ImportExpression(i) => Node::ImportExpression {
                source: self.boxed_expression(&i.source)?,
                options: self.optional_expression(i.options.as_ref())?,
            },
            js::Expression::ChainExpression(c) => Node::ChainExpression {
                expression: boxed(self.chain_element(&c.expression)?),
            },
            js::Expression::MetaProperty(m) => Node::MetaProperty {
                meta: boxed(Node::identifier(m.meta.name.as_str())),
                property: boxed(Node::identifier(m.property.name.as_str())),
            },
            js::Expression::ParenthesizedExpression(p) => return self.expression(&p.expression),
            other => return Err(self.unsupported(other.span())),
        };
        Ok(node)
    }

    fn chain_element(&self, element: &js::ChainElement<'_>) -> Result<Node> {
        match element {
            js::ChainElement::CallExpression(c) => self.call(c),
            js::ChainElement::StaticMemberExpression(m) => self.static_member(m),
            js::ChainElement::ComputedMemberExpression(m) => self.computed_member(m),
            js::ChainElement::PrivateFieldExpression(m) => self.private_field(m),
            other => Err(self.unsupported(other.span())),
        }
    }
}
