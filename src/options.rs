use std::default::Default;
use std::path::PathBuf;

use crate::names::{DictionaryNames, NameSource, PhoneticNames};

#[derive(Debug, Clone)]
pub struct Options {
    /// Master switch; when off the input is only reformatted.
    pub mods: bool,
    /// Rewrite minified idioms into plain statements.
    pub code: bool,
    /// Generate and deduce variable names.
    pub vars: bool,
    pub name_style: NameStyle,
    /// Where `write_modules` records what it wrote.
    pub manifest: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NameStyle {
    /// `_adjective_noun_` combinations.
    #[default]
    Dictionary,
    /// Pronounceable syllables.
    Phonetic,
}

impl NameStyle {
    /// A fresh name source, starting from its first name.
    pub fn source(self) -> Box<dyn NameSource> {
        match self {
            Self::Dictionary => Box::new(DictionaryNames::new()),
            Self::Phonetic => Box::new(PhoneticNames::new()),
        }
    }
}

impl Options {
    pub const fn renames_variables(&self) -> bool {
        self.mods && self.vars
    }

    pub const fn rewrites_code(&self) -> bool {
        self.mods && self.code
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            mods: true,
            code: true,
            vars: true,
            name_style: NameStyle::Dictionary,
            manifest: None,
        }
    }
}
