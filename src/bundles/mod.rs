//! Splitting Browserify and Webpack bundles into their modules.
//!
//! A bundle is recognized by the shape of its wrapper. The module table it
//! passes to the runtime is unpacked, each module gets a path-like name, and
//! each module factory becomes a tree of its own with the factory parameters
//! renamed to `require`, `module` and `exports`.

mod formats;
mod resolve;
mod table;

use lazy_static::lazy_static;

use crate::ast::{IdentId, Node, parse_program};
use crate::names::{NameSource, generate_variable_names};
use crate::patterns::{CaptureMap, CompileError, Pattern, compile, matches};
use crate::scope::{ScopeId, ScopeKind, ScopeManager, rename_variable};
use crate::{DebundleError, Result};

pub use formats::BundleFormat;
pub use resolve::relative_name;
pub use table::{ModuleId, NameTable};

use resolve::Dependency;

lazy_static! {
    static ref FACTORY: std::result::Result<Pattern, CompileError> =
        compile("(function (expression1_repeatable_optional) {statement1_repeatable_optional;})");
    static ref EVAL_CALL: std::result::Result<Pattern, CompileError> =
        compile("eval(expression1_literal);");
}

/// One module of a bundle, as a standalone tree.
#[derive(Debug, Clone)]
pub struct Module {
    pub name: String,
    /// `Program` holding the factory function as its only statement.
    tree: Node,
    scopes: ScopeManager,
    /// The factory function's scope.
    scope: ScopeId,
}

impl Module {
    /// Statements of the module body.
    pub fn body(&self) -> &[Node] {
        match &self.tree {
            Node::Program { body } => match body.first() {
                Some(Node::ExpressionStatement { expression }) => {
                    expression.statements().unwrap_or_default()
                }
                _ => &[],
            },
            _ => &[],
        }
    }

    pub const fn scopes(&self) -> &ScopeManager {
        &self.scopes
    }

    pub const fn scope(&self) -> ScopeId {
        self.scope
    }

    /// Gives every variable of the module fresh names from `source`.
    pub fn generate_variable_names(&mut self, source: &mut dyn NameSource) {
        generate_variable_names(&mut self.scopes, self.scope, source);
        self.scopes.apply(&mut self.tree);
    }

    /// The module body as a program of its own.
    pub fn into_program(self) -> Node {
        let body = match self.tree {
            Node::Program { mut body } if !body.is_empty() => match body.swap_remove(0) {
                Node::ExpressionStatement { mut expression } => {
                    expression.statements_mut().map(std::mem::take).unwrap_or_default()
                }
                _ => Vec::new(),
            },
            _ => Vec::new(),
        };
        Node::Program { body }
    }
}

/// Splits a parsed bundle into its modules, in name assignment order.
pub fn parse_modules(tree: &Node) -> Result<Vec<Module>> {
    let detected = formats::detect(tree)?;
    tracing::debug!(
        format = ?detected.format,
        entries = detected.entries.len(),
        "recognized bundle"
    );

    let modules = module_table(detected.format, &detected.modules)?;
    let ids: Vec<ModuleId> = modules.iter().map(|(id, _)| id.clone()).collect();
    let dependencies = match detected.format {
        BundleFormat::Browserify => dependencies(&modules)?,
        BundleFormat::Webpack => Vec::new(),
    };
    let names = resolve::resolve_names(detected.format, &detected.entries, &ids, &dependencies);

    let mut result = Vec::with_capacity(modules.len());
    for (id, name) in names.iter() {
        let Some((_, entry)) = modules.iter().find(|(module_id, _)| module_id == id) else {
            continue;
        };
        tracing::trace!(module = %id, name, "extracting module");
        result.push(Module::new(name.to_string(), entry.factory.clone(), detected.format)?);
    }
    Ok(result)
}

/// A module table value.
struct ModuleEntry<'a> {
    factory: &'a Node,
    /// Browserify's map from required names to module ids.
    requires: Option<&'a Node>,
}

fn module_table(format: BundleFormat, modules: &Node) -> Result<Vec<(ModuleId, ModuleEntry<'_>)>> {
    let factory_pattern = FACTORY.as_ref().map_err(Clone::clone)?;
    let empty = CaptureMap::default();

    object_entries(modules)?
        .into_iter()
        .map(|(id, value)| {
            let entry = match format {
                BundleFormat::Browserify => match value {
                    Node::ArrayExpression { elements } => match elements.as_slice() {
                        [Some(factory), Some(requires)] => ModuleEntry {
                            factory,
                            requires: Some(requires),
                        },
                        _ => return Err(not_a_pair()),
                    },
                    _ => return Err(not_a_pair()),
                },
                BundleFormat::Webpack => {
                    if matches(factory_pattern, value, &empty).is_none() {
                        return Err(DebundleError::Shape("Module entry is not a function".to_string()));
                    }
                    ModuleEntry {
                        factory: value,
                        requires: None,
                    }
                }
            };
            Ok((id, entry))
        })
        .collect()
}

fn not_a_pair() -> DebundleError {
    DebundleError::Shape("Module entry is not a two elements array".to_string())
}

/// Keys and values of an array or object literal. Array holes are skipped
/// and array keys are indices.
#[allow(clippy::cast_possible_wrap)]
fn object_entries(node: &Node) -> Result<Vec<(ModuleId, &Node)>> {
    match node {
        Node::ArrayExpression { elements } => Ok(elements
            .iter()
            .enumerate()
            .filter_map(|(index, element)| {
                element.as_ref().map(|e| (ModuleId::Number(index as i64), e))
            })
            .collect()),
        Node::ObjectExpression { properties } => properties
            .iter()
            .map(|property| {
                let key_error =
                    || DebundleError::Shape("Literal or identifier property name expected".to_string());
                let Node::Property { key, value, .. } = property else {
                    return Err(key_error());
                };
                let id = match key.as_ref() {
                    Node::Identifier(ident) => ModuleId::String(ident.name.clone()),
                    Node::Literal(literal) => {
                        ModuleId::from_literal(literal).map_err(|_| key_error())?
                    }
                    _ => return Err(key_error()),
                };
                Ok((id, value.as_ref()))
            })
            .collect(),
        other => Err(DebundleError::Shape(format!(
            "Object expected, got {}",
            other.type_name()
        ))),
    }
}

fn dependencies(modules: &[(ModuleId, ModuleEntry<'_>)]) -> Result<Vec<Dependency>> {
    let mut result = Vec::new();
    for (parent, entry) in modules {
        let Some(requires) = entry.requires else {
            continue;
        };
        for (name, target) in object_entries(requires)? {
            let target = match target {
                Node::Literal(literal) => ModuleId::from_literal(literal)?,
                _ => {
                    return Err(DebundleError::Shape(
                        "Expected module reference to be a literal expression".to_string(),
                    ));
                }
            };
            result.push(Dependency {
                parent: parent.clone(),
                name: name.to_string(),
                target,
            });
        }
    }
    Ok(result)
}

impl Module {
    fn new(name: String, mut factory: Node, format: BundleFormat) -> Result<Self> {
        let factory_pattern = FACTORY.as_ref().map_err(Clone::clone)?;
        if matches(factory_pattern, &factory, &CaptureMap::default()).is_none() {
            return Err(DebundleError::Shape(
                "Module code doesn't have the expected format".to_string(),
            ));
        }
        inline_trailing_eval(&mut factory)?;

        let mut tree = Node::Program {
            body: vec![Node::expression_statement(factory)],
        };
        let mut scopes = ScopeManager::analyze(&mut tree);
        let scope = factory_scope(&scopes)?;

        let params: Vec<Option<IdentId>> = match &tree {
            Node::Program { body } => body
                .first()
                .and_then(|statement| match statement {
                    Node::ExpressionStatement { expression } => expression.as_function(),
                    _ => None,
                })
                .map(|function| {
                    function
                        .params
                        .iter()
                        .map(|param| param.as_identifier().map(|ident| ident.id))
                        .collect()
                })
                .unwrap_or_default(),
            _ => Vec::new(),
        };
        for (param, new_name) in params.into_iter().zip(format.parameter_names()) {
            if let Some(var) = param.and_then(|id| scopes.variable_of(id)) {
                rename_variable(&mut scopes, var, new_name);
            }
        }
        scopes.apply(&mut tree);

        Ok(Self {
            name,
            tree,
            scopes,
            scope,
        })
    }
}

/// Replaces a final `eval("...")` statement with the code it evaluates.
fn inline_trailing_eval(factory: &mut Node) -> Result<()> {
    let eval_pattern = EVAL_CALL.as_ref().map_err(Clone::clone)?;
    let Some(body) = factory.statements_mut() else {
        return Ok(());
    };
    let source = body.last().and_then(|last| {
        let captures = matches(eval_pattern, last, &CaptureMap::default())?;
        captures
            .get("expression1")?
            .as_node()?
            .as_literal()?
            .as_str()
            .map(str::to_string)
    });
    if let Some(source) = source {
        let Node::Program { body: statements } = parse_program(&source)? else {
            return Ok(());
        };
        body.pop();
        body.extend(statements);
    }
    Ok(())
}

/// Scope of the factory function, below the name scope of a named one.
fn factory_scope(scopes: &ScopeManager) -> Result<ScopeId> {
    let missing = || DebundleError::Shape("Module code doesn't have the expected format".to_string());
    let first = *scopes.scope(scopes.root()).children.first().ok_or_else(missing)?;
    if scopes.scope(first).kind == ScopeKind::FunctionExpressionName {
        return scopes.scope(first).children.first().copied().ok_or_else(missing);
    }
    Ok(first)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn modules(source: &str) -> Vec<Module> {
        parse_modules(&parse_program(source).unwrap()).unwrap()
    }

    fn shape_error(source: &str) -> String {
        match parse_modules(&parse_program(source).unwrap()) {
            Err(DebundleError::Shape(message)) => message,
            other => panic!("expected a shape error, got {other:?}"),
        }
    }

    #[test]
    fn test_factory_parameters_are_renamed() {
        let result = modules("!function(m){ r(r.s = 0); }([function(a, b, c) { b.x = c(1); a.y = 2; }]);");
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "/main");
        assert_eq!(
            Node::Program {
                body: result[0].body().to_vec()
            },
            parse_program("exports.x = require(1); module.y = 2;").unwrap()
        );
    }

    #[test]
    fn test_module_as_program() {
        let result = modules("!function(m){}([function(a) { var x = a; }]);");
        assert_eq!(result[0].scopes().scope(result[0].scope()).kind, ScopeKind::Function);
        assert_eq!(
            result[0].clone().into_program(),
            parse_program("var x = module;").unwrap()
        );
    }

    #[test]
    fn test_trailing_eval_is_inlined() {
        let result = modules(
            r#"!function(m){}([function(a, b) { a.id = 1; eval("b.x = 1;\nb.y = 2;"); }]);"#,
        );
        assert_eq!(
            result[0].clone().into_program(),
            parse_program("module.id = 1; exports.x = 1; exports.y = 2;").unwrap()
        );
    }

    #[test]
    fn test_malformed_tables() {
        assert_eq!(
            shape_error("(function(){})()({1: function(){}}, {}, [1]);"),
            "Module entry is not a two elements array"
        );
        assert_eq!(
            shape_error("!function(m){}([42]);"),
            "Module entry is not a function"
        );
        assert_eq!(
            shape_error("!function(m){}(modules);"),
            "Object expected, got Identifier"
        );
        assert_eq!(
            shape_error("(function(){})()({1: [function(){}, {a: b}]}, {}, [1]);"),
            "Expected module reference to be a literal expression"
        );
    }

    #[test]
    fn test_missing_modules_are_skipped() {
        let result = modules("!function(m){ r(r.s = 9); }([function(){}]);");
        let names: Vec<_> = result.iter().map(|module| module.name.as_str()).collect();
        assert_eq!(names, ["/0"]);
    }
}
