//! Structural pattern matching over JavaScript syntax trees.
//!
//! A pattern is ordinary JavaScript source in which identifiers named
//! `expressionN`, `statementN` and `placeholderN` stand for holes. Compiling a
//! pattern parses it and swaps those identifiers for placeholder nodes; matching
//! a tree against it yields the nodes each placeholder stood for, and filling it
//! with captures builds a fresh tree.
//!
//! Placeholder names take modifiers separated by underscores:
//! `expression1_repeatable_optional`, `statement2_multiLine`, and so on. See
//! [`placeholder::Placeholder`] for the full list.

mod compile;
mod fill;
mod matcher;
pub mod placeholder;

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::ast::Node;

pub use compile::compile;
pub use fill::fill;
pub use matcher::matches;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid pattern: {0}")]
pub struct CompileError(pub String);

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FillError {
    #[error("no value for placeholder {0}")]
    Missing(String),

    #[error("placeholder {0} captured nothing but its position requires a node")]
    Absent(String),

    #[error("placeholder {0} captured a list but its position holds a single node")]
    NotSingle(String),
}

/// Compiled pattern tree, ready to match or fill.
#[derive(Debug, Clone, PartialEq)]
pub struct Pattern {
    root: Node,
}

impl Pattern {
    pub const fn root(&self) -> &Node {
        &self.root
    }
}

/// What a placeholder stood for in a matched tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Capture {
    /// Single placeholder; `None` when an optional one matched an absent node.
    Node(Option<Node>),
    /// Repeatable placeholder; holes are kept for sparse arrays.
    Nodes(Vec<Option<Node>>),
    /// Generic placeholder in identifier or string position.
    Name(String),
}

impl Capture {
    pub const fn as_node(&self) -> Option<&Node> {
        match self {
            Self::Node(Some(node)) => Some(node),
            _ => None,
        }
    }

    pub fn as_nodes(&self) -> Option<&[Option<Node>]> {
        match self {
            Self::Nodes(nodes) => Some(nodes),
            _ => None,
        }
    }

    pub fn as_name(&self) -> Option<&str> {
        match self {
            Self::Name(name) => Some(name),
            _ => None,
        }
    }

    /// Non-hole nodes of a repeatable capture, or the single node of a plain one.
    pub fn into_nodes(self) -> Vec<Node> {
        match self {
            Self::Node(node) => node.into_iter().collect(),
            Self::Nodes(nodes) => nodes.into_iter().flatten().collect(),
            Self::Name(_) => Vec::new(),
        }
    }
}

pub type CaptureMap = FxHashMap<String, Capture>;
