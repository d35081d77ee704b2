//! Module naming from entry points and Browserify dependency maps.

use lazy_static::lazy_static;
use regex::Regex;
use rustc_hash::FxHashSet;

use super::formats::BundleFormat;
use super::table::{ModuleId, NameTable};

lazy_static! {
    static ref LAST_SEGMENT: Regex = Regex::new(r"[^/]+$").unwrap();
    static ref SLASH_RUN: Regex = Regex::new(r"/+").unwrap();
    static ref CURRENT_DIR: Regex = Regex::new(r"/\./").unwrap();
    static ref PARENT_DIR: Regex = Regex::new(r"[^/]+/\.\./").unwrap();
    static ref LEADING_PARENT_DIRS: Regex = Regex::new(r"(?:/\.\.)+/").unwrap();
    static ref TRAILING_SLASHES: Regex = Regex::new(r"/+$").unwrap();
}

/// `require(name)` inside module `parent` resolving to module `target`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    pub parent: ModuleId,
    pub name: String,
    pub target: ModuleId,
}

fn is_relative(name: &str) -> bool {
    name.starts_with("./") || name.starts_with("../")
}

/// Name of a module required as `name` from the module named `parent`.
///
/// `./` is taken relative to the parent's directory, anything else relative
/// to the parent itself, so `../x` from `/lib/a` is `/lib/x`.
pub fn relative_name(parent: &str, name: &str) -> String {
    let mut name = name.to_string();
    if name.ends_with('/') {
        name.push_str("index");
    }

    let joined = if name.starts_with("./") {
        format!("{}/{name}", LAST_SEGMENT.replace(parent, ""))
    } else {
        format!("{parent}/{name}")
    };

    let mut result = SLASH_RUN.replace_all(&joined, "/").into_owned();
    while CURRENT_DIR.is_match(&result) {
        result = CURRENT_DIR.replacen(&result, 1, "/").into_owned();
    }
    while PARENT_DIR.is_match(&result) {
        result = PARENT_DIR.replacen(&result, 1, "").into_owned();
    }
    result = LEADING_PARENT_DIRS.replacen(&result, 1, "/").into_owned();
    TRAILING_SLASHES.replace(&result, "").into_owned()
}

/// Names every module in `module_ids`.
///
/// Entry points come first: a single one is `/main`. Browserify modules
/// required by an absolute name are named after it and the rest are derived
/// from their parents until nothing changes. Whatever is left is named after
/// its id.
pub fn resolve_names(
    format: BundleFormat,
    entries: &[ModuleId],
    module_ids: &[ModuleId],
    dependencies: &[Dependency],
) -> NameTable {
    let mut names = NameTable::default();

    if let [entry] = entries {
        names.set(entry.clone(), "/main".to_string());
    } else {
        // Every entry writes to the first one's slot; only the last
        // numbered name survives.
        for i in 0..entries.len() {
            names.set(entries[0].clone(), format!("/main{}", i + 1));
        }
    }

    if format == BundleFormat::Browserify {
        // Modules named after a package or their own id; relaxation leaves
        // them alone.
        let mut absolute = FxHashSet::default();
        for dependency in dependencies {
            if !is_relative(&dependency.name) {
                let separator = if dependency.name.ends_with('/') { "" } else { "/" };
                names.set(
                    dependency.target.clone(),
                    format!("/{}{separator}", dependency.name),
                );
                absolute.insert(dependency.target.clone());
            }
        }
        for id in module_ids {
            if let ModuleId::String(name) = id {
                if !absolute.contains(id) && !names.contains(id) {
                    names.set(id.clone(), format!("/{name}"));
                    absolute.insert(id.clone());
                }
            }
        }
        relax(&mut names, &absolute, dependencies);
    }

    for id in module_ids {
        if !names.contains(id) {
            names.set(id.clone(), format!("/{id}"));
        }
    }

    for name in names.names_mut() {
        let trimmed = TRAILING_SLASHES.replace(name, "");
        if !trimmed.is_empty() && trimmed.len() != name.len() {
            *name = trimmed.into_owned();
        }
    }
    names
}

/// Derives names of relatively required modules from their parents.
fn relax(
    names: &mut NameTable,
    absolute: &FxHashSet<ModuleId>,
    dependencies: &[Dependency],
) {
    let mut warned = FxHashSet::default();
    let mut changed = true;
    while changed {
        changed = false;
        for dependency in dependencies {
            if absolute.contains(&dependency.target) {
                continue;
            }
            let Some(parent) = names.get(&dependency.parent) else {
                continue;
            };
            let name = relative_name(parent, &dependency.name);
            match names.get(&dependency.target) {
                Some(existing) if existing == name => {}
                Some(existing) => {
                    if warned.insert(dependency.target.clone()) {
                        tracing::warn!(
                            module = %dependency.target,
                            existing,
                            conflicting = %name,
                            "conflicting module names"
                        );
                    }
                }
                None => {
                    names.set(dependency.target.clone(), name);
                    changed = true;
                }
            }
        }
    }
}
