//! Owned JavaScript syntax tree.
//!
//! The oxc AST lives in an arena tied to the parser's allocator, which makes it
//! awkward to splice nodes between trees, cache compiled patterns, or hand a
//! module body from one stage to the next. Everything downstream of the parser
//! therefore works on this owned, ESTree-shaped tree instead.

mod convert;
mod slots;

pub use convert::{MAX_NESTING, parse_program};
pub use slots::{Slot, SlotMut};

use crate::patterns::placeholder::{GenericPlaceholder, Placeholder};

/// Occurrence number of an identifier, assigned by the scope analyzer.
///
/// `IdentId::NONE` marks identifiers that have not been analyzed yet (freshly
/// parsed trees and nodes built from patterns).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IdentId(pub u32);

impl IdentId {
    pub const NONE: Self = Self(0);

    pub const fn is_none(self) -> bool {
        self.0 == 0
    }
}

#[derive(Debug, Clone)]
pub struct Identifier {
    pub name: String,
    pub id: IdentId,
}

impl Identifier {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: IdentId::NONE,
        }
    }
}

// Occurrence ids are bookkeeping, two identifiers are the same if they read the same.
impl PartialEq for Identifier {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    String(String),
    Number(f64),
    Boolean(bool),
    Null,
    RegExp { pattern: String, flags: String },
    BigInt(String),
}

#[derive(Debug, Clone)]
pub struct Literal {
    pub value: LiteralValue,
    /// Source text of the literal, kept for printing numbers as written.
    pub raw: Option<String>,
}

impl Literal {
    pub fn string(value: impl Into<String>) -> Self {
        Self {
            value: LiteralValue::String(value.into()),
            raw: None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match &self.value {
            LiteralValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl PartialEq for Literal {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub id: Option<Box<Node>>,
    pub params: Vec<Node>,
    /// Always a `BlockStatement`.
    pub body: Box<Node>,
    pub generator: bool,
    pub is_async: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Class {
    pub id: Option<Box<Node>>,
    pub super_class: Option<Box<Node>>,
    /// Always a `ClassBody`.
    pub body: Box<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Program {
        body: Vec<Node>,
    },

    // Statements
    ExpressionStatement {
        expression: Box<Node>,
    },
    BlockStatement {
        body: Vec<Node>,
    },
    EmptyStatement,
    DebuggerStatement,
    WithStatement {
        object: Box<Node>,
        body: Box<Node>,
    },
    ReturnStatement {
        argument: Option<Box<Node>>,
    },
    LabeledStatement {
        label: Box<Node>,
        body: Box<Node>,
    },
    BreakStatement {
        label: Option<Box<Node>>,
    },
    ContinueStatement {
        label: Option<Box<Node>>,
    },
    IfStatement {
        test: Box<Node>,
        consequent: Box<Node>,
        alternate: Option<Box<Node>>,
    },
    SwitchStatement {
        discriminant: Box<Node>,
        cases: Vec<Node>,
    },
    SwitchCase {
        test: Option<Box<Node>>,
        consequent: Vec<Node>,
    },
    ThrowStatement {
        argument: Box<Node>,
    },
    TryStatement {
        block: Box<Node>,
        handler: Option<Box<Node>>,
        finalizer: Option<Box<Node>>,
    },
    CatchClause {
        param: Option<Box<Node>>,
        body: Box<Node>,
    },
    WhileStatement {
        test: Box<Node>,
        body: Box<Node>,
    },
    DoWhileStatement {
        body: Box<Node>,
        test: Box<Node>,
    },
    ForStatement {
        init: Option<Box<Node>>,
        test: Option<Box<Node>>,
        update: Option<Box<Node>>,
        body: Box<Node>,
    },
    ForInStatement {
        left: Box<Node>,
        right: Box<Node>,
        body: Box<Node>,
    },
    ForOfStatement {
        left: Box<Node>,
        right: Box<Node>,
        body: Box<Node>,
        is_await: bool,
    },

    // Declarations
    FunctionDeclaration(Function),
    VariableDeclaration {
        kind: String,
        declarations: Vec<Node>,
    },
    VariableDeclarator {
        id: Box<Node>,
        init: Option<Box<Node>>,
    },
    ClassDeclaration(Class),
    ClassBody {
        body: Vec<Node>,
    },
    MethodDefinition {
        key: Box<Node>,
        value: Box<Node>,
        kind: String,
        computed: bool,
        is_static: bool,
    },
    PropertyDefinition {
        key: Box<Node>,
        value: Option<Box<Node>>,
        computed: bool,
        is_static: bool,
    },
    StaticBlock {
        body: Vec<Node>,
    },

    // Expressions
    Identifier(Identifier),
    PrivateIdentifier {
        name: String,
    },
    Literal(Literal),
    ThisExpression,
    Super,
    ArrayExpression {
        elements: Vec<Option<Node>>,
    },
    ObjectExpression {
        properties: Vec<Node>,
    },
    Property {
        key: Box<Node>,
        value: Box<Node>,
        kind: String,
        computed: bool,
        method: bool,
        shorthand: bool,
    },
    FunctionExpression(Function),
    ArrowFunctionExpression {
        params: Vec<Node>,
        /// A `BlockStatement`, or the returned expression when `expression` is set.
        body: Box<Node>,
        expression: bool,
        is_async: bool,
    },
    ClassExpression(Class),
    TemplateLiteral {
        quasis: Vec<Node>,
        expressions: Vec<Node>,
    },
    TemplateElement {
        raw: String,
        tail: bool,
    },
    TaggedTemplateExpression {
        tag: Box<Node>,
        quasi: Box<Node>,
    },
    MemberExpression {
        object: Box<Node>,
        property: Box<Node>,
        computed: bool,
        optional: bool,
    },
    CallExpression {
        callee: Box<Node>,
        arguments: Vec<Node>,
        optional: bool,
    },
    NewExpression {
        callee: Box<Node>,
        arguments: Vec<Node>,
    },
    ChainExpression {
        expression: Box<Node>,
    },
    UnaryExpression {
        operator: String,
        argument: Box<Node>,
    },
    UpdateExpression {
        operator: String,
        prefix: bool,
        argument: Box<Node>,
    },
    BinaryExpression {
        operator: String,
        left: Box<Node>,
        right: Box<Node>,
    },
    LogicalExpression {
        operator: String,
        left: Box<Node>,
        right: Box<Node>,
    },
    AssignmentExpression {
        operator: String,
        left: Box<Node>,
        right: Box<Node>,
    },
    ConditionalExpression {
        test: Box<Node>,
        consequent: Box<Node>,
        alternate: Box<Node>,
    },
    SequenceExpression {
        expressions: Vec<Node>,
    },
    YieldExpression {
        argument: Option<Box<Node>>,
        delegate: bool,
    },
    AwaitExpression {
        argument: Box<Node>,
    },
    SpreadElement {
        argument: Box<Node>,
    },
    ImportExpression {
        source: Box<Node>,
        options: Option<Box<Node>>,
    },
    MetaProperty {
        meta: Box<Node>,
        property: Box<Node>,
    },

    // Binding patterns
    ObjectPattern {
        properties: Vec<Node>,
    },
    ArrayPattern {
        elements: Vec<Option<Node>>,
    },
    RestElement {
        argument: Box<Node>,
    },
    AssignmentPattern {
        left: Box<Node>,
        right: Box<Node>,
    },

    // Only found in compiled patterns
    ExpressionPlaceholder(Placeholder),
    StatementPlaceholder(Placeholder),
    GenericPlaceholder(GenericPlaceholder),
}

impl Node {
    pub fn identifier(name: impl Into<String>) -> Self {
        Self::Identifier(Identifier::new(name))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::Literal(Literal::string(value))
    }

    pub fn expression_statement(expression: Self) -> Self {
        Self::ExpressionStatement {
            expression: Box::new(expression),
        }
    }

    /// ESTree type name of the node.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Program { .. } => "Program",
            Self::ExpressionStatement { .. } => "ExpressionStatement",
            Self::BlockStatement { .. } => "BlockStatement",
            Self::EmptyStatement => "EmptyStatement",
            Self::DebuggerStatement => "DebuggerStatement",
            Self::WithStatement { .. } => "WithStatement",
            Self::ReturnStatement { .. } => "ReturnStatement",
            Self::LabeledStatement { .. } => "LabeledStatement",
            Self::BreakStatement { .. } => "BreakStatement",
            Self::ContinueStatement { .. } => "ContinueStatement",
            Self::IfStatement { .. } => "IfStatement",
            Self::SwitchStatement { .. } => "SwitchStatement",
            Self::SwitchCase { .. } => "SwitchCase",
            Self::ThrowStatement { .. } => "ThrowStatement",
            Self::TryStatement { .. } => "TryStatement",
            Self::CatchClause { .. } => "CatchClause",
            Self::WhileStatement { .. } => "WhileStatement",
            Self::DoWhileStatement { .. } => "DoWhileStatement",
            Self::ForStatement { .. } => "ForStatement",
            Self::ForInStatement { .. } => "ForInStatement",
            Self::ForOfStatement { .. } => "ForOfStatement",
            Self::FunctionDeclaration(_) => "FunctionDeclaration",
            Self::VariableDeclaration { .. } => "VariableDeclaration",
            Self::VariableDeclarator { .. } => "VariableDeclarator",
            Self::ClassDeclaration(_) => "ClassDeclaration",
            Self::ClassBody { .. } => "ClassBody",
            Self::MethodDefinition { .. } => "MethodDefinition",
            Self::PropertyDefinition { .. } => "PropertyDefinition",
            Self::StaticBlock { .. } => "StaticBlock",
            Self::Identifier(_) => "Identifier",
            Self::PrivateIdentifier { .. } => "PrivateIdentifier",
            Self::Literal(_) => "Literal",
            Self::ThisExpression => "ThisExpression",
            Self::Super => "Super",
            Self::ArrayExpression { .. } => "ArrayExpression",
            Self::ObjectExpression { .. } => "ObjectExpression",
            Self::Property { .. } => "Property",
            Self::FunctionExpression(_) => "FunctionExpression",
            Self::ArrowFunctionExpression { .. } => "ArrowFunctionExpression",
            Self::ClassExpression(_) => "ClassExpression",
            Self::TemplateLiteral { .. } => "TemplateLiteral",
            Self::TemplateElement { .. } => "TemplateElement",
            Self::TaggedTemplateExpression { .. } => "TaggedTemplateExpression",
            Self::MemberExpression { .. } => "MemberExpression",
            Self::CallExpression { .. } => "CallExpression",
            Self::NewExpression { .. } => "NewExpression",
            Self::ChainExpression { .. } => "ChainExpression",
            Self::UnaryExpression { .. } => "UnaryExpression",
            Self::UpdateExpression { .. } => "UpdateExpression",
            Self::BinaryExpression { .. } => "BinaryExpression",
            Self::LogicalExpression { .. } => "LogicalExpression",
            Self::AssignmentExpression { .. } => "AssignmentExpression",
            Self::ConditionalExpression { .. } => "ConditionalExpression",
            Self::SequenceExpression { .. } => "SequenceExpression",
            Self::YieldExpression { .. } => "YieldExpression",
            Self::AwaitExpression { .. } => "AwaitExpression",
            Self::SpreadElement { .. } => "SpreadElement",
            Self::ImportExpression { .. } => "ImportExpression",
            Self::MetaProperty { .. } => "MetaProperty",
            Self::ObjectPattern { .. } => "ObjectPattern",
            Self::ArrayPattern { .. } => "ArrayPattern",
            Self::RestElement { .. } => "RestElement",
            Self::AssignmentPattern { .. } => "AssignmentPattern",
            Self::ExpressionPlaceholder(_) => "ExpressionPlaceholder",
            Self::StatementPlaceholder(_) => "StatementPlaceholder",
            Self::GenericPlaceholder(_) => "GenericPlaceholder",
        }
    }

    /// Kinds whose ESTree name ends in `Expression`, plus the bare leaves.
    pub fn is_expression(&self) -> bool {
        self.type_name().ends_with("Expression")
            || matches!(
                self,
                Self::Identifier(_) | Self::Literal(_) | Self::TemplateLiteral { .. }
            )
    }

    /// Kinds whose ESTree name ends in `Expression`, excluding identifiers and literals.
    pub fn is_strict_expression(&self) -> bool {
        self.type_name().ends_with("Expression")
    }

    pub fn is_statement(&self) -> bool {
        self.is_strict_statement() || self.is_declaration()
    }

    pub fn is_strict_statement(&self) -> bool {
        self.type_name().ends_with("Statement")
    }

    pub const fn is_declaration(&self) -> bool {
        matches!(
            self,
            Self::VariableDeclaration { .. }
                | Self::FunctionDeclaration(_)
                | Self::ClassDeclaration(_)
        )
    }

    /// Statements that already print on one line (or carry their own braces).
    pub const fn is_single_line_statement(&self) -> bool {
        matches!(
            self,
            Self::EmptyStatement
                | Self::BlockStatement { .. }
                | Self::ExpressionStatement { .. }
                | Self::ReturnStatement { .. }
                | Self::ThrowStatement { .. }
        )
    }

    pub fn as_identifier(&self) -> Option<&Identifier> {
        match self {
            Self::Identifier(ident) => Some(ident),
            _ => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Self::Literal(lit) => Some(lit),
            _ => None,
        }
    }

    /// Statement list of a program, block, or function body.
    pub fn statements(&self) -> Option<&[Self]> {
        match self {
            Self::Program { body } | Self::BlockStatement { body } => Some(body),
            Self::FunctionDeclaration(func) | Self::FunctionExpression(func) => {
                func.body.statements()
            }
            _ => None,
        }
    }

    pub fn statements_mut(&mut self) -> Option<&mut Vec<Self>> {
        match self {
            Self::Program { body } | Self::BlockStatement { body } => Some(body),
            Self::FunctionDeclaration(func) | Self::FunctionExpression(func) => {
                func.body.statements_mut()
            }
            _ => None,
        }
    }

    pub const fn as_function(&self) -> Option<&Function> {
        match self {
            Self::FunctionDeclaration(func) | Self::FunctionExpression(func) => Some(func),
            _ => None,
        }
    }

    /// Visits every identifier in the subtree, including labels and property names.
    pub fn for_each_identifier_mut(&mut self, f: &mut impl FnMut(&mut Identifier)) {
        if let Self::Identifier(ident) = self {
            f(ident);
            return;
        }
        for slot in self.slots_mut() {
            slot.for_each_mut(|child| child.for_each_identifier_mut(f));
        }
    }
}
