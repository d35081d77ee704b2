use std::fmt;

use rustc_hash::FxHashMap;

use crate::ast::{Literal, LiteralValue};
use crate::{DebundleError, Result};

/// Key of a module in the bundle's module table.
///
/// Numeric and string ids are distinct: `1` and `"1"` name different modules.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ModuleId {
    Number(i64),
    String(String),
}

impl ModuleId {
    pub fn from_literal(literal: &Literal) -> Result<Self> {
        match &literal.value {
            LiteralValue::String(value) => Ok(Self::String(value.clone())),
            LiteralValue::Number(value) => Self::from_number(*value),
            _ => Err(DebundleError::Shape(
                "Expected module reference to be a literal expression".to_string(),
            )),
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn from_number(value: f64) -> Result<Self> {
        if value.is_finite() && value.fract() == 0.0 {
            Ok(Self::Number(value as i64))
        } else {
            Err(DebundleError::Shape(format!(
                "Module id {value} is not an integer"
            )))
        }
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => f.write_str(s),
        }
    }
}

/// Module names in the order they were first assigned.
#[derive(Debug, Default, Clone)]
pub struct NameTable {
    entries: Vec<(ModuleId, String)>,
    index: FxHashMap<ModuleId, usize>,
}

impl NameTable {
    pub fn get(&self, id: &ModuleId) -> Option<&str> {
        self.index.get(id).map(|&i| self.entries[i].1.as_str())
    }

    pub fn contains(&self, id: &ModuleId) -> bool {
        self.index.contains_key(id)
    }

    /// Assigns `name`; an id that already has a name keeps its position.
    pub fn set(&mut self, id: ModuleId, name: String) {
        if let Some(&i) = self.index.get(&id) {
            self.entries[i].1 = name;
        } else {
            self.index.insert(id.clone(), self.entries.len());
            self.entries.push((id, name));
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ModuleId, &str)> {
        self.entries.iter().map(|(id, name)| (id, name.as_str()))
    }

    pub fn names_mut(&mut self) -> impl Iterator<Item = &mut String> {
        self.entries.iter_mut().map(|(_, name)| name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_from_literals() {
        let number = Literal {
            value: LiteralValue::Number(12.0),
            raw: None,
        };
        assert_eq!(ModuleId::from_literal(&number).unwrap(), ModuleId::Number(12));
        assert_eq!(
            ModuleId::from_literal(&Literal::string("12")).unwrap(),
            ModuleId::String("12".to_string())
        );
        assert!(ModuleId::from_number(1.5).is_err());
        assert!(
            ModuleId::from_literal(&Literal {
                value: LiteralValue::Null,
                raw: None
            })
            .is_err()
        );
    }

    #[test]
    fn test_reassignment_keeps_order() {
        let mut table = NameTable::default();
        table.set(ModuleId::Number(3), "/main".to_string());
        table.set(ModuleId::String("x".to_string()), "/x".to_string());
        table.set(ModuleId::Number(3), "/other".to_string());

        let names: Vec<_> = table.iter().map(|(id, name)| (id.to_string(), name)).collect();
        assert_eq!(names, [("3".to_string(), "/other"), ("x".to_string(), "/x")]);
        assert!(!table.contains(&ModuleId::String("3".to_string())));
    }
}
