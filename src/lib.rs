//! # js-debundle-rs
//!
//! Splits Browserify and Webpack bundles into their modules and makes
//! minified JavaScript readable again: variables get real names, compressed
//! idioms are expanded into plain statements, and the result is reformatted.
//!
//! ## Example
//!
//! ```rust
//! use js_debundle_rs::{beautify, Options};
//!
//! let code = "function test(a){return a&&a.run(),void 0}";
//! let options = Options::default();
//! let beautified = beautify(code, &options).expect("beautification failed");
//! assert!(beautified.contains("if ("));
//! ```

pub mod ast;
pub mod bundles;
pub mod io;
pub mod names;
pub mod options;
pub mod output;
pub mod patterns;
pub mod printer;
pub mod rewrite;
pub mod scope;

use std::path::{Path, PathBuf};

pub use bundles::{Module, parse_modules};
pub use io::{ModuleManifest, parse_script, read_script, save_script, write_modules};
pub use names::{deduce_variable_names, generate_variable_names};
pub use options::{NameStyle, Options};
pub use patterns::{CompileError, FillError};
pub use printer::print;
pub use rewrite::rewrite_code;

#[derive(Debug, thiserror::Error)]
pub enum DebundleError {
    #[error("parse failed: {0}")]
    Parse(String),

    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Fill(#[from] FillError),

    #[error("{0}")]
    Format(String),

    #[error("{0}")]
    Shape(String),

    #[error("Unexpected module output path outside of target directory: {}", path.display())]
    PathEscape { path: PathBuf },

    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write manifest: {0}")]
    Manifest(String),

    #[error("failed to start worker thread: {0}")]
    Thread(#[source] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DebundleError>;

/// A module extracted from a bundle, ready to be written out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleOutput {
    pub name: String,
    pub code: String,
}

/// Stack for the worker thread running a pipeline. Every tree walk recurses,
/// so this bounds the nesting the pipeline can handle.
const PIPELINE_STACK_SIZE: usize = 256 * 1024 * 1024;

/// Runs `job` on a thread whose stack fits [`ast::MAX_NESTING`] levels.
fn on_large_stack<T: Send>(job: impl FnOnce() -> Result<T> + Send) -> Result<T> {
    std::thread::scope(|scope| {
        let handle = std::thread::Builder::new()
            .name("js-debundle".to_string())
            .stack_size(PIPELINE_STACK_SIZE)
            .spawn_scoped(scope, job)
            .map_err(DebundleError::Thread)?;
        handle
            .join()
            .unwrap_or_else(|payload| std::panic::resume_unwind(payload))
    })
}

/// Beautifies a single script.
///
/// Variables are renamed first, then the code is rewritten, then names are
/// deduced from the rewritten code, so that the deduction sees declarations
/// split one per statement.
pub fn beautify(source: &str, options: &Options) -> Result<String> {
    on_large_stack(|| {
        let tree = beautify_tree(parse_script(source)?, options)?;
        Ok(print(&tree))
    })
}

/// Beautifies the script at `path` in place.
pub fn beautify_file(path: &Path, options: &Options) -> Result<()> {
    on_large_stack(|| {
        let tree = beautify_tree(read_script(path)?, options)?;
        save_script(&tree, path)
    })?;
    tracing::info!(script = %path.display(), "beautified");
    Ok(())
}

fn beautify_tree(mut tree: ast::Node, options: &Options) -> Result<ast::Node> {
    if options.renames_variables() {
        let mut manager = scope::ScopeManager::analyze(&mut tree);
        let root = manager.root();
        generate_variable_names(&mut manager, root, options.name_style.source().as_mut());
        manager.apply(&mut tree);
    }
    finish(tree, options)
}

/// Splits a bundle into its modules and beautifies each of them.
pub fn unbundle(source: &str, options: &Options) -> Result<Vec<ModuleOutput>> {
    on_large_stack(|| unbundle_source(source, options))
}

fn unbundle_source(source: &str, options: &Options) -> Result<Vec<ModuleOutput>> {
    let tree = parse_script(source)?;
    let modules = parse_modules(&tree)?;
    tracing::debug!(modules = modules.len(), "split bundle");

    modules
        .into_iter()
        .map(|mut module| {
            if options.renames_variables() {
                module.generate_variable_names(options.name_style.source().as_mut());
            }
            let name = module.name.clone();
            let code = print(&finish(module.into_program(), options)?);
            Ok(ModuleOutput { name, code })
        })
        .collect()
}

/// Unbundles the script at `script` into `target_dir`, writing the manifest
/// named in `options` if any.
pub fn unbundle_file(
    script: &Path,
    target_dir: &Path,
    options: &Options,
) -> Result<ModuleManifest> {
    let source = io::read_source(script)?;
    let modules = on_large_stack(|| unbundle_source(&source, options))?;
    write_modules(target_dir, &modules, options.manifest.as_deref())
}

fn finish(mut tree: ast::Node, options: &Options) -> Result<ast::Node> {
    if options.rewrites_code() {
        rewrite_code(&mut tree)?;
    }
    if options.renames_variables() {
        deduce_variable_names(&mut tree)?;
    }
    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_beautify() {
        let result = beautify("function test(){return 42;}", &Options::default())
            .expect("beautification failed");
        assert_eq!(result, "function test() {\n  return 42;\n}\n");
    }

    #[test]
    fn test_reformat_only() {
        let options = Options {
            mods: false,
            ..Options::default()
        };
        let result = beautify("var a=!0;a&&b()", &options).unwrap();
        assert_eq!(result, "var a = !0;\na && b();\n");
    }

    #[test]
    fn test_split_declarations_get_deduced_names() {
        let result = beautify(
            "function f(){var a=require('fs'),b=require('path');return a.read(b)}",
            &Options::default(),
        )
        .unwrap();
        assert!(result.contains("var fs = require(\"fs\");\n"), "{result}");
        assert!(result.contains("var path = require(\"path\");\n"), "{result}");
        assert!(result.contains("return fs.read(path);"), "{result}");
    }

    #[test]
    fn test_long_operator_chain() {
        let chain = vec!["a"; 1500].join(" + ");
        let result = beautify(&format!("x = {chain};"), &Options::default()).unwrap();
        assert!(result.starts_with("x = a + a + a"), "{}", &result[..40]);
    }

    #[test]
    fn test_nesting_beyond_limit_is_an_error() {
        let chain = vec!["a"; ast::MAX_NESTING + 10].join(" + ");
        let error = beautify(&format!("x = {chain};"), &Options::default()).unwrap_err();
        assert!(matches!(error, DebundleError::Parse(_)), "{error}");
    }

    #[test]
    fn test_unknown_bundle_format() {
        let error = unbundle("console.log(1);", &Options::default()).unwrap_err();
        assert_eq!(
            error.to_string(),
            "The script is not in a known Webpack or Browserify format."
        );
    }
}
