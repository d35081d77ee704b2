//! Reading scripts and writing results to disk.

use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::ast::{Node, parse_program};
use crate::printer::print;
use crate::{DebundleError, ModuleOutput, Result};

/// Parses script text into a tree.
pub fn parse_script(source: &str) -> Result<Node> {
    parse_program(source)
}

pub fn read_script(path: &Path) -> Result<Node> {
    let source = read_source(path)?;
    parse_script(&source)
}

pub(crate) fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| DebundleError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Prints `tree` to `path`, creating missing parent directories.
pub fn save_script(tree: &Node, path: &Path) -> Result<()> {
    write_file(path, &print(tree))
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| DebundleError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, contents).map_err(|source| DebundleError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Where a module named `name` lands under `target_dir`.
///
/// The name is split on `/` and joined segment by segment; `.js` is added
/// when the last segment has no dot. Names that climb out of `target_dir`
/// are rejected before anything is written.
pub fn module_path(target_dir: &Path, name: &str) -> Result<PathBuf> {
    let mut segments: Vec<&str> = name.trim_start_matches('/').split('/').collect();
    let file_name = match segments.last() {
        Some(last) if !last.contains('.') => format!("{last}.js"),
        Some(last) => (*last).to_string(),
        None => "index.js".to_string(),
    };
    segments.pop();

    let relative: PathBuf = segments.iter().copied().chain([file_name.as_str()]).collect();
    let mut depth = 0usize;
    for component in relative.components() {
        match component {
            Component::Normal(_) => depth += 1,
            Component::CurDir => {}
            Component::ParentDir if depth > 0 => depth -= 1,
            _ => {
                return Err(DebundleError::PathEscape {
                    path: target_dir.join(&relative),
                });
            }
        }
    }
    if depth == 0 {
        return Err(DebundleError::PathEscape {
            path: target_dir.join(&relative),
        });
    }
    Ok(target_dir.join(relative))
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ModuleManifest {
    pub target_dir: PathBuf,
    pub modules: Vec<ManifestEntry>,
    pub total_modules: usize,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ManifestEntry {
    pub name: String,
    pub path: PathBuf,
}

impl ModuleManifest {
    fn new(target_dir: PathBuf) -> Self {
        Self {
            target_dir,
            modules: Vec::new(),
            total_modules: 0,
        }
    }

    fn add_module(&mut self, name: String, path: PathBuf) {
        self.modules.push(ManifestEntry { name, path });
        self.total_modules += 1;
    }
}

/// Writes each module to its own file under `target_dir`, and the manifest
/// to `manifest` when given.
///
/// Every output path is checked before the first write, so a bundle with
/// one escaping name writes nothing.
pub fn write_modules(
    target_dir: &Path,
    modules: &[ModuleOutput],
    manifest: Option<&Path>,
) -> Result<ModuleManifest> {
    let paths = modules
        .iter()
        .map(|module| module_path(target_dir, &module.name))
        .collect::<Result<Vec<_>>>()?;

    let mut written = ModuleManifest::new(target_dir.to_path_buf());
    for (module, path) in modules.iter().zip(paths) {
        write_file(&path, &module.code)?;
        tracing::debug!(name = %module.name, path = %path.display(), "wrote module");
        written.add_module(module.name.clone(), path);
    }

    if let Some(manifest_path) = manifest {
        let json = serde_json::to_string_pretty(&written)
            .map_err(|e| DebundleError::Manifest(e.to_string()))?;
        write_file(manifest_path, &json)?;
    }
    Ok(written)
}
