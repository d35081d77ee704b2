//! Recognized bundle shapes.

use lazy_static::lazy_static;

use super::table::ModuleId;
use crate::ast::{Literal, Node};
use crate::patterns::{CaptureMap, CompileError, Pattern, compile, matches};
use crate::{DebundleError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BundleFormat {
    Browserify,
    Webpack,
}

impl BundleFormat {
    /// Names for the module factory's parameters, in order.
    pub const fn parameter_names(self) -> [&'static str; 3] {
        match self {
            Self::Browserify => ["require", "module", "exports"],
            Self::Webpack => ["module", "exports", "require"],
        }
    }
}

// `expression1` is the module table, `expression3` the entry list.
const BROWSERIFY: &[&str] = &[
    "(function(){statement1_repeatable_optional;})()(expression1, expression2, expression3); statement2_repeatable_optional;",
    "expression0 = function(){statement1_repeatable_optional;}()(expression1, expression2, expression3); statement2_repeatable_optional;",
    "!function(){statement1_repeatable_optional;}()(expression1, expression2, expression3); statement2_repeatable_optional;",
    "expression00 = function placeholder0(expression0_repeatable){statement1_repeatable_optional;}(expression1, expression2, expression3); statement2_repeatable_optional;",
    "!function placeholder0(expression0_repeatable){statement1_repeatable_optional;}(expression1, expression2, expression3); statement2_repeatable_optional;",
    "!function(expression0_repeatable){statement0_repeatable_optional;}(function(){var placeholder00; return function placeholder1(expression00_repeatable){statement1_repeatable_optional;}(expression1, expression2, expression3)(expression4);}); statement2_repeatable_optional;",
];

// `expression1` is the module table; `statement1`, when present, is the
// runtime body searched for entry points.
const WEBPACK: &[&str] = &[
    "(function(expression0){statement1_repeatable_optional;})(expression1); statement2_repeatable_optional;",
    "!function(expression0){statement1_repeatable_optional;}(expression1); statement2_repeatable_optional;",
    "placeholder1.placeholder2 = function(expression0){statement1_repeatable_optional;}(expression1); statement2_repeatable_optional;",
    "(placeholder1.placeholder2 = placeholder1.placeholder2 || []).push([[expression0_literal_repeatable], expression1]); statement2_repeatable_optional;",
    "\"use strict\"; (placeholder1.placeholder2 = placeholder1.placeholder2 || []).push([[expression0_literal_repeatable], expression1]); statement2_repeatable_optional;",
    "\"use strict\"; (placeholder1.placeholder2 = placeholder1.placeholder2 || []).push([[expression0_literal_repeatable], expression1, expression2]); statement2_repeatable_optional;",
    "(placeholder1.placeholder2 = placeholder1.placeholder2 || []).push([[expression0_literal_repeatable], expression1, expression2]); statement2_repeatable_optional;",
    "var placeholder1 = placeholder2([expression0_literal_repeatable], expression1, expression2); statement2_repeatable_optional;",
    "!function(expression0_repeatable){statement0_repeatable_optional;}(placeholder00, function(){return function(expression00){statement1_repeatable_optional;}(expression1).placeholder1;}); statement2_repeatable_optional;",
];

const ENTRY_CALL: &str = "placeholder1(placeholder1.s = expression1_literal)";

const BROWSERIFY_ENTRIES: &str = "[expression1_literal_repeatable_optional]";

/// A runtime statement that names an entry module in `expression1`.
enum EntryPattern {
    Single(Pattern),
    /// A sequence whose tail items are searched for the entry call.
    Nested { outer: Pattern, inner: Pattern },
}

impl EntryPattern {
    fn entry(&self, statement: &Node) -> Option<Literal> {
        let empty = CaptureMap::default();
        let captures = match self {
            Self::Single(pattern) => matches(pattern, statement, &empty)?,
            Self::Nested { outer, inner } => matches(outer, statement, &empty)?
                .get("expression1")?
                .as_nodes()?
                .iter()
                .flatten()
                .find_map(|item| matches(inner, item, &empty))?,
        };
        captures.get("expression1")?.as_node()?.as_literal().cloned()
    }
}

struct Formats {
    browserify: Vec<Pattern>,
    webpack: Vec<Pattern>,
    browserify_entries: Pattern,
    webpack_entries: Vec<EntryPattern>,
}

fn compile_all(sources: &[&str]) -> std::result::Result<Vec<Pattern>, CompileError> {
    sources.iter().map(|source| compile(source)).collect()
}

fn compile_formats() -> std::result::Result<Formats, CompileError> {
    let nested = |outer: &str| -> std::result::Result<EntryPattern, CompileError> {
        Ok(EntryPattern::Nested {
            outer: compile(outer)?,
            inner: compile(ENTRY_CALL)?,
        })
    };
    let single = |source: &str| compile(source).map(EntryPattern::Single);

    Ok(Formats {
        browserify: compile_all(BROWSERIFY)?,
        webpack: compile_all(WEBPACK)?,
        browserify_entries: compile(BROWSERIFY_ENTRIES)?,
        webpack_entries: vec![
            single("return placeholder1(placeholder1.s = expression1_literal);")?,
            single("return placeholder1(placeholder1.s = expression1_literal), expression2_repeatable;")?,
            nested("return expression0, expression1_repeatable;")?,
            single("placeholder1(placeholder1.s = expression1_literal);")?,
            single("placeholder1(placeholder1.s = expression1_literal), expression2_repeatable;")?,
            nested("expression0, expression1_repeatable;")?,
            single("placeholder1.push([expression1_literal, expression2_literal_repeatable_optional]);")?,
            single("placeholder1.push([expression1_literal, expression2_literal_repeatable_optional]), expression3_repeatable;")?,
        ],
    })
}

lazy_static! {
    static ref FORMATS: std::result::Result<Formats, CompileError> = compile_formats();
}

/// What a recognized bundle wrapper captured.
#[derive(Debug)]
pub struct Detected {
    pub format: BundleFormat,
    /// The module table, an array or object literal.
    pub modules: Node,
    pub entries: Vec<ModuleId>,
}

/// Matches the whole program against the known bundle wrappers, Browserify
/// first.
pub fn detect(tree: &Node) -> Result<Detected> {
    let formats = FORMATS.as_ref().map_err(Clone::clone)?;
    let empty = CaptureMap::default();
    let find = |patterns: &[Pattern]| {
        patterns
            .iter()
            .find_map(|pattern| matches(pattern, tree, &empty))
    };

    if let Some(mut captures) = find(&formats.browserify) {
        let modules = take_node(&mut captures, "expression1")?;
        let entry_list = take_node(&mut captures, "expression3")?;
        let entries = browserify_entries(&formats.browserify_entries, &entry_list)?;
        return Ok(Detected {
            format: BundleFormat::Browserify,
            modules,
            entries,
        });
    }

    if let Some(mut captures) = find(&formats.webpack) {
        let modules = take_node(&mut captures, "expression1")?;
        let entries = match captures.remove("statement1") {
            Some(statements) => webpack_entries(&formats.webpack_entries, &statements.into_nodes())?,
            None => Vec::new(),
        };
        return Ok(Detected {
            format: BundleFormat::Webpack,
            modules,
            entries,
        });
    }

    Err(DebundleError::Format(
        "The script is not in a known Webpack or Browserify format.".to_string(),
    ))
}

fn take_node(captures: &mut CaptureMap, name: &str) -> Result<Node> {
    captures
        .remove(name)
        .and_then(|capture| capture.into_nodes().into_iter().next())
        .ok_or_else(|| DebundleError::Shape(format!("Bundle wrapper captured no {name}")))
}

fn browserify_entries(pattern: &Pattern, entry_list: &Node) -> Result<Vec<ModuleId>> {
    let captures = matches(pattern, entry_list, &CaptureMap::default())
        .ok_or_else(|| DebundleError::Shape("Entry points are not an array".to_string()))?;
    let Some(items) = captures.get("expression1").and_then(|c| c.as_nodes()) else {
        return Ok(Vec::new());
    };
    items
        .iter()
        .flatten()
        .map(|item| match item.as_literal() {
            Some(literal) => ModuleId::from_literal(literal),
            None => Err(DebundleError::Shape("Entry points are not an array".to_string())),
        })
        .collect()
}

/// Every entry-point statement in the runtime body, in order. A statement
/// may contribute more than once.
fn webpack_entries(patterns: &[EntryPattern], statements: &[Node]) -> Result<Vec<ModuleId>> {
    let mut entries = Vec::new();
    for statement in statements {
        for pattern in patterns {
            if let Some(literal) = pattern.entry(statement) {
                entries.push(ModuleId::from_literal(&literal)?);
            }
        }
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::parse_program;

    fn detected(source: &str) -> Detected {
        detect(&parse_program(source).unwrap()).unwrap()
    }

    #[test]
    fn test_pattern_tables_compile() {
        let formats = FORMATS.as_ref().unwrap();
        assert_eq!(formats.browserify.len(), BROWSERIFY.len());
        assert_eq!(formats.webpack.len(), WEBPACK.len());
    }

    #[test]
    fn test_browserify_wrapper() {
        let result = detected("(function(){ return r; })()({1: [function(r, m, e) {}, {}]}, {}, [1, 'x']);");
        assert_eq!(result.format, BundleFormat::Browserify);
        assert_eq!(
            result.entries,
            [ModuleId::Number(1), ModuleId::String("x".to_string())]
        );
        assert_eq!(result.modules.type_name(), "ObjectExpression");
    }

    #[test]
    fn test_browserify_entries_must_be_array() {
        let tree = parse_program("(function(){ return r; })()({}, {}, 1);").unwrap();
        assert!(matches!(detect(&tree), Err(DebundleError::Shape(_))));
    }

    #[test]
    fn test_webpack_entry_statements() {
        let result = detected(
            "(function(m){ r.m = m; return r(r.s = 5); })([function(){}]);",
        );
        assert_eq!(result.format, BundleFormat::Webpack);
        assert_eq!(result.entries, [ModuleId::Number(5)]);

        let result = detected("!function(m){ a(), r(r.s = 'app'); }({});");
        assert_eq!(result.entries, [ModuleId::String("app".to_string())]);

        let result = detected("!function(m){ q.push([7, 8]), go(); }([]);");
        assert_eq!(result.entries, [ModuleId::Number(7)]);
    }

    #[test]
    fn test_chunk_without_runtime_has_no_entries() {
        let result = detected("(self.chunks = self.chunks || []).push([[1], {}, [[2]]]);");
        assert_eq!(result.format, BundleFormat::Webpack);
        assert!(result.entries.is_empty());
    }

    #[test]
    fn test_unknown_format() {
        let tree = parse_program("console.log(1);").unwrap();
        assert!(matches!(detect(&tree), Err(DebundleError::Format(_))));
    }
}
