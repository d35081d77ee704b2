//! Uniform access to the children of a node.
//!
//! Matching, filling and the generic walkers treat every node as a list of
//! child slots plus a handful of scalar fields. The slot lists below are the
//! single place that knows the field layout of each node kind.

use super::{Class, Function, Node};

pub enum Slot<'a> {
    One(&'a Node),
    Opt(Option<&'a Node>),
    List(&'a [Node]),
    Holey(&'a [Option<Node>]),
}

pub enum SlotMut<'a> {
    One(&'a mut Node),
    Opt(&'a mut Option<Box<Node>>),
    List(&'a mut Vec<Node>),
    Holey(&'a mut Vec<Option<Node>>),
}

impl SlotMut<'_> {
    pub fn for_each_mut(self, mut f: impl FnMut(&mut Node)) {
        match self {
            SlotMut::One(node) => f(node),
            SlotMut::Opt(node) => {
                if let Some(node) = node {
                    f(node);
                }
            }
            SlotMut::List(nodes) => nodes.iter_mut().for_each(f),
            SlotMut::Holey(nodes) => nodes.iter_mut().flatten().for_each(f),
        }
    }

    pub fn try_for_each_mut<E>(
        self,
        mut f: impl FnMut(&mut Node) -> Result<(), E>,
    ) -> Result<(), E> {
        match self {
            SlotMut::One(node) => f(node),
            SlotMut::Opt(node) => node.as_deref_mut().map_or(Ok(()), f),
            SlotMut::List(nodes) => nodes.iter_mut().try_for_each(f),
            SlotMut::Holey(nodes) => nodes.iter_mut().flatten().try_for_each(f),
        }
    }
}

impl Slot<'_> {
    pub fn for_each(&self, mut f: impl FnMut(&Node)) {
        match self {
            Slot::One(node) => f(node),
            Slot::Opt(node) => {
                if let Some(node) = node {
                    f(node);
                }
            }
            Slot::List(nodes) => nodes.iter().for_each(f),
            Slot::Holey(nodes) => nodes.iter().flatten().for_each(f),
        }
    }
}

fn function_slots(func: &Function) -> Vec<Slot<'_>> {
    vec![
        Slot::Opt(func.id.as_deref()),
        Slot::List(&func.params),
        Slot::One(&func.body),
    ]
}

fn function_slots_mut(func: &mut Function) -> Vec<SlotMut<'_>> {
    vec![
        SlotMut::Opt(&mut func.id),
        SlotMut::List(&mut func.params),
        SlotMut::One(&mut func.body),
    ]
}

fn class_slots(class: &Class) -> Vec<Slot<'_>> {
    vec![
        Slot::Opt(class.id.as_deref()),
        Slot::Opt(class.super_class.as_deref()),
        Slot::One(&class.body),
    ]
}

fn class_slots_mut(class: &mut Class) -> Vec<SlotMut<'_>> {
    vec![
        SlotMut::Opt(&mut class.id),
        SlotMut::Opt(&mut class.super_class),
        SlotMut::One(&mut class.body),
    ]
}

impl Node {
    /// Child slots in source order.
    pub fn slots(&self) -> Vec<Slot<'_>> {
        use Slot::{Holey, List, One, Opt};
        match self {
            Self::Program { body }
            | Self::BlockStatement { body }
            | Self::ClassBody { body }
            | Self::StaticBlock { body } => vec![List(body)],
            Self::ExpressionStatement { expression } | Self::ChainExpression { expression } => {
                vec![One(expression)]
            }
            Self::WithStatement { object, body } => vec![One(object), One(body)],
            Self::ReturnStatement { argument } | Self::YieldExpression { argument, .. } => {
                vec![Opt(argument.as_deref())]
            }
            Self::LabeledStatement { label, body } => vec![One(label), One(body)],
            Self::BreakStatement { label } | Self::ContinueStatement { label } => {
                vec![Opt(label.as_deref())]
            }
            Self::IfStatement {
                test,
                consequent,
                alternate,
            } => vec![One(test), One(consequent), Opt(alternate.as_deref())],
            Self::SwitchStatement {
                discriminant,
                cases,
            } => vec![One(discriminant), List(cases)],
            Self::SwitchCase { test, consequent } => {
                vec![Opt(test.as_deref()), List(consequent)]
            }
            Self::ThrowStatement { argument }
            | Self::AwaitExpression { argument }
            | Self::SpreadElement { argument }
            | Self::RestElement { argument }
            | Self::UnaryExpression { argument, .. }
            | Self::UpdateExpression { argument, .. } => vec![One(argument)],
            Self::TryStatement {
                block,
                handler,
                finalizer,
            } => vec![
                One(block),
                Opt(handler.as_deref()),
                Opt(finalizer.as_deref()),
            ],
            Self::CatchClause { param, body } => vec![Opt(param.as_deref()), One(body)],
            Self::WhileStatement { test, body } => vec![One(test), One(body)],
            Self::DoWhileStatement { body, test } => vec![One(body), One(test)],
            Self::ForStatement {
                init,
                test,
                update,
                body,
            } => vec![
                Opt(init.as_deref()),
                Opt(test.as_deref()),
                Opt(update.as_deref()),
                One(body),
            ],
            Self::ForInStatement { left, right, body }
            | Self::ForOfStatement {
                left, right, body, ..
            } => vec![One(left), One(right), One(body)],
            Self::FunctionDeclaration(func) | Self::FunctionExpression(func) => {
                function_slots(func)
            }
            Self::ClassDeclaration(class) | Self::ClassExpression(class) => class_slots(class),
            Self::VariableDeclaration { declarations, .. } => vec![List(declarations)],
            Self::VariableDeclarator { id, init } => vec![One(id), Opt(init.as_deref())],
            Self::MethodDefinition { key, value, .. } => vec![One(key), One(value)],
            Self::PropertyDefinition { key, value, .. } => {
                vec![One(key), Opt(value.as_deref())]
            }
            Self::ArrayExpression { elements } | Self::ArrayPattern { elements } => {
                vec![Holey(elements)]
            }
            Self::ObjectExpression { properties } | Self::ObjectPattern { properties } => {
                vec![List(properties)]
            }
            Self::Property { key, value, .. } => vec![One(key), One(value)],
            Self::ArrowFunctionExpression { params, body, .. } => vec![List(params), One(body)],
            Self::TemplateLiteral {
                quasis,
                expressions,
            } => vec![List(quasis), List(expressions)],
            Self::TaggedTemplateExpression { tag, quasi } => vec![One(tag), One(quasi)],
            Self::MemberExpression {
                object, property, ..
            } => vec![One(object), One(property)],
            Self::CallExpression {
                callee, arguments, ..
            }
            | Self::NewExpression { callee, arguments } => vec![One(callee), List(arguments)],
            Self::BinaryExpression { left, right, .. }
            | Self::LogicalExpression { left, right, .. }
            | Self::AssignmentExpression { left, right, .. }
            | Self::AssignmentPattern { left, right } => vec![One(left), One(right)],
            Self::ConditionalExpression {
                test,
                consequent,
                alternate,
            } => vec![One(test), One(consequent), One(alternate)],
            Self::SequenceExpression { expressions } => vec![List(expressions)],
            Self::ImportExpression { source, options } => {
                vec![One(source), Opt(options.as_deref())]
            }
            Self::MetaProperty { meta, property } => vec![One(meta), One(property)],
            Self::EmptyStatement
            | Self::DebuggerStatement
            | Self::Identifier(_)
            | Self::PrivateIdentifier { .. }
            | Self::Literal(_)
            | Self::ThisExpression
            | Self::Super
            | Self::TemplateElement { .. }
            | Self::ExpressionPlaceholder(_)
            | Self::StatementPlaceholder(_)
            | Self::GenericPlaceholder(_) => Vec::new(),
        }
    }

    /// Mutable counterpart of [`Node::slots`], in the same order.
    pub fn slots_mut(&mut self) -> Vec<SlotMut<'_>> {
        use SlotMut::{Holey, List, One, Opt};
        match self {
            Self::Program { body }
            | Self::BlockStatement { body }
            | Self::ClassBody { body }
            | Self::StaticBlock { body } => vec![List(body)],
            Self::ExpressionStatement { expression } | Self::ChainExpression { expression } => {
                vec![One(expression)]
            }
            Self::WithStatement { object, body } => vec![One(object), One(body)],
            Self::ReturnStatement { argument } | Self::YieldExpression { argument, .. } => {
                vec![Opt(argument)]
            }
            Self::LabeledStatement { label, body } => vec![One(label), One(body)],
            Self::BreakStatement { label } | Self::ContinueStatement { label } => {
                vec![Opt(label)]
            }
            Self::IfStatement {
                test,
                consequent,
                alternate,
            } => vec![One(test), One(consequent), Opt(alternate)],
            Self::SwitchStatement {
                discriminant,
                cases,
            } => vec![One(discriminant), List(cases)],
            Self::SwitchCase { test, consequent } => vec![Opt(test), List(consequent)],
            Self::ThrowStatement { argument }
            | Self::AwaitExpression { argument }
            | Self::SpreadElement { argument }
            | Self::RestElement { argument }
            | Self::UnaryExpression { argument, .. }
            | Self::UpdateExpression { argument, .. } => vec![One(argument)],
            Self::TryStatement {
                block,
                handler,
                finalizer,
            } => vec![One(block), Opt(handler), Opt(finalizer)],
            Self::CatchClause { param, body } => vec![Opt(param), One(body)],
            Self::WhileStatement { test, body } => vec![One(test), One(body)],
            Self::DoWhileStatement { body, test } => vec![One(body), One(test)],
            Self::ForStatement {
                init,
                test,
                update,
                body,
            } => vec![Opt(init), Opt(test), Opt(update), One(body)],
            Self::ForInStatement { left, right, body }
            | Self::ForOfStatement {
                left, right, body, ..
            } => vec![One(left), One(right), One(body)],
            Self::FunctionDeclaration(func) | Self::FunctionExpression(func) => {
                function_slots_mut(func)
            }
            Self::ClassDeclaration(class) | Self::ClassExpression(class) => {
                class_slots_mut(class)
            }
            Self::VariableDeclaration { declarations, .. } => vec![List(declarations)],
            Self::VariableDeclarator { id, init } => vec![One(id), Opt(init)],
            Self::MethodDefinition { key, value, .. } => vec![One(key), One(value)],
            Self::PropertyDefinition { key, value, .. } => vec![One(key), Opt(value)],
            Self::ArrayExpression { elements } | Self::ArrayPattern { elements } => {
                vec![Holey(elements)]
            }
            Self::ObjectExpression { properties } | Self::ObjectPattern { properties } => {
                vec![List(properties)]
            }
            Self::Property { key, value, .. } => vec![One(key), One(value)],
            Self::ArrowFunctionExpression { params, body, .. } => vec![List(params), One(body)],
            Self::TemplateLiteral {
                quasis,
                expressions,
            } => vec![List(quasis), List(expressions)],
            Self::TaggedTemplateExpression { tag, quasi } => vec![One(tag), One(quasi)],
            Self::MemberExpression {
                object, property, ..
            } => vec![One(object), One(property)],
            Self::CallExpression {
                callee, arguments, ..
            }
            | Self::NewExpression { callee, arguments } => vec![One(callee), List(arguments)],
            Self::BinaryExpression { left, right, .. }
            | Self::LogicalExpression { left, right, .. }
            | Self::AssignmentExpression { left, right, .. }
            | Self::AssignmentPattern { left, right } => vec![One(left), One(right)],
            Self::ConditionalExpression {
                test,
                consequent,
                alternate,
            } => vec![One(test), One(consequent), One(alternate)],
            Self::SequenceExpression { expressions } => vec![List(expressions)],
            Self::ImportExpression { source, options } => vec![One(source), Opt(options)],
            Self::MetaProperty { meta, property } => vec![One(meta), One(property)],
            Self::EmptyStatement
            | Self::DebuggerStatement
            | Self::Identifier(_)
            | Self::PrivateIdentifier { .. }
            | Self::Literal(_)
            | Self::ThisExpression
            | Self::Super
            | Self::TemplateElement { .. }
            | Self::ExpressionPlaceholder(_)
            | Self::StatementPlaceholder(_)
            | Self::GenericPlaceholder(_) => Vec::new(),
        }
    }

    /// Compares the kind and the scalar fields of two nodes, ignoring children.
    pub fn same_shape(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Self::VariableDeclaration { kind: a, .. },
                Self::VariableDeclaration { kind: b, .. },
            ) => a == b,
            (
                Self::MethodDefinition {
                    kind: a,
                    computed: ac,
                    is_static: as_,
                    ..
                },
                Self::MethodDefinition {
                    kind: b,
                    computed: bc,
                    is_static: bs,
                    ..
                },
            ) => a == b && ac == bc && as_ == bs,
            (
                Self::PropertyDefinition {
                    computed: ac,
                    is_static: as_,
                    ..
                },
                Self::PropertyDefinition {
                    computed: bc,
                    is_static: bs,
                    ..
                },
            ) => ac == bc && as_ == bs,
            (Self::Identifier(a), Self::Identifier(b)) => a.name == b.name,
            (Self::PrivateIdentifier { name: a }, Self::PrivateIdentifier { name: b }) => a == b,
            (Self::Literal(a), Self::Literal(b)) => a == b,
            (
                Self::Property {
                    kind: a,
                    computed: ac,
                    method: am,
                    shorthand: ash,
                    ..
                },
                Self::Property {
                    kind: b,
                    computed: bc,
                    method: bm,
                    shorthand: bsh,
                    ..
                },
            ) => a == b && ac == bc && am == bm && ash == bsh,
            (Self::FunctionDeclaration(a), Self::FunctionDeclaration(b))
            | (Self::FunctionExpression(a), Self::FunctionExpression(b)) => {
                a.generator == b.generator && a.is_async == b.is_async
            }
            (
                Self::ArrowFunctionExpression {
                    expression: ae,
                    is_async: aa,
                    ..
                },
                Self::ArrowFunctionExpression {
                    expression: be,
                    is_async: ba,
                    ..
                },
            ) => ae == be && aa == ba,
            (
                Self::TemplateElement { raw: a, tail: at },
                Self::TemplateElement { raw: b, tail: bt },
            ) => a == b && at == bt,
            (
                Self::MemberExpression {
                    computed: ac,
                    optional: ao,
                    ..
                },
                Self::MemberExpression {
                    computed: bc,
                    optional: bo,
                    ..
                },
            ) => ac == bc && ao == bo,
            (
                Self::CallExpression { optional: a, .. },
                Self::CallExpression { optional: b, .. },
            ) => a == b,
            (
                Self::ForOfStatement { is_await: a, .. },
                Self::ForOfStatement { is_await: b, .. },
            ) => a == b,
            (
                Self::UpdateExpression {
                    operator: a,
                    prefix: ap,
                    ..
                },
                Self::UpdateExpression {
                    operator: b,
                    prefix: bp,
                    ..
                },
            ) => a == b && ap == bp,
            (Self::UnaryExpression { operator: a, .. }, Self::UnaryExpression { operator: b, .. })
            | (
                Self::BinaryExpression { operator: a, .. },
                Self::BinaryExpression { operator: b, .. },
            )
            | (
                Self::LogicalExpression { operator: a, .. },
                Self::LogicalExpression { operator: b, .. },
            )
            | (
                Self::AssignmentExpression { operator: a, .. },
                Self::AssignmentExpression { operator: b, .. },
            ) => a == b,
            (
                Self::YieldExpression { delegate: a, .. },
                Self::YieldExpression { delegate: b, .. },
            ) => a == b,
            (Self::ExpressionPlaceholder(a), Self::ExpressionPlaceholder(b))
            | (Self::StatementPlaceholder(a), Self::StatementPlaceholder(b)) => a == b,
            (Self::GenericPlaceholder(a), Self::GenericPlaceholder(b)) => a == b,
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }
}
