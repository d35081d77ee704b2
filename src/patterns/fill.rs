use super::{Capture, CaptureMap, FillError, Pattern};
use crate::ast::{Node, SlotMut};

/// Builds a new tree from `pattern`, substituting captured nodes for placeholders.
///
/// Repeatable captures are spliced into list positions; an absent optional
/// capture drops its list element or leaves an optional field empty.
pub fn fill(pattern: &Pattern, captures: &CaptureMap) -> Result<Node, FillError> {
    let root = pattern.root();
    if let Some(name) = placeholder_name(root) {
        return resolve_single(root, name, captures);
    }
    let mut node = root.clone();
    fill_in_place(&mut node, captures)?;
    Ok(node)
}

fn placeholder_name(node: &Node) -> Option<&str> {
    match node {
        Node::ExpressionPlaceholder(p) | Node::StatementPlaceholder(p) => Some(&p.name),
        Node::GenericPlaceholder(g) => Some(&g.name),
        _ => None,
    }
}

fn lookup<'c>(name: &str, captures: &'c CaptureMap) -> Result<&'c Capture, FillError> {
    captures
        .get(name)
        .ok_or_else(|| FillError::Missing(name.to_string()))
}

/// Value for a placeholder in a position that may be empty.
fn resolve_optional(
    placeholder: &Node,
    name: &str,
    captures: &CaptureMap,
) -> Result<Option<Node>, FillError> {
    match lookup(name, captures)? {
        Capture::Node(node) => Ok(node.clone()),
        Capture::Nodes(_) => Err(FillError::NotSingle(name.to_string())),
        Capture::Name(value) => match placeholder {
            Node::GenericPlaceholder(generic) => Ok(Some(generic.rebuild(value))),
            _ => Ok(Some(Node::identifier(value.as_str()))),
        },
    }
}

fn resolve_single(placeholder: &Node, name: &str, captures: &CaptureMap) -> Result<Node, FillError> {
    resolve_optional(placeholder, name, captures)?.ok_or_else(|| FillError::Absent(name.to_string()))
}

/// Values for a placeholder sitting in a list, holes included.
fn resolve_many(
    placeholder: &Node,
    name: &str,
    captures: &CaptureMap,
) -> Result<Vec<Option<Node>>, FillError> {
    match lookup(name, captures)? {
        Capture::Nodes(nodes) => Ok(nodes.clone()),
        Capture::Node(None) => Ok(Vec::new()),
        _ => Ok(vec![resolve_optional(placeholder, name, captures)?]),
    }
}

fn fill_child(child: &mut Node, captures: &CaptureMap) -> Result<(), FillError> {
    match placeholder_name(child) {
        Some(name) => {
            let name = name.to_string();
            *child = resolve_single(child, &name, captures)?;
            Ok(())
        }
        None => fill_in_place(child, captures),
    }
}

fn fill_in_place(node: &mut Node, captures: &CaptureMap) -> Result<(), FillError> {
    for slot in node.slots_mut() {
        match slot {
            SlotMut::One(child) => fill_child(child, captures)?,
            SlotMut::Opt(child) => {
                let Some(inner) = child.as_deref_mut() else {
                    continue;
                };
                match placeholder_name(inner) {
                    Some(name) => {
                        let name = name.to_string();
                        *child = resolve_optional(inner, &name, captures)?.map(Box::new);
                    }
                    None => fill_in_place(inner, captures)?,
                }
            }
            SlotMut::List(children) => {
                let mut filled = Vec::with_capacity(children.len());
                for mut child in children.drain(..) {
                    match placeholder_name(&child) {
                        Some(name) => {
                            filled.extend(resolve_many(&child, name, captures)?.into_iter().flatten());
                        }
                        None => {
                            fill_in_place(&mut child, captures)?;
                            filled.push(child);
                        }
                    }
                }
                *children = filled;
            }
            SlotMut::Holey(children) => {
                let mut filled = Vec::with_capacity(children.len());
                for child in children.drain(..) {
                    match child {
                        Some(mut child) => match placeholder_name(&child) {
                            Some(name) => filled.extend(resolve_many(&child, name, captures)?),
                            None => {
                                fill_in_place(&mut child, captures)?;
                                filled.push(Some(child));
                            }
                        },
                        None => filled.push(None),
                    }
                }
                *children = filled;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::compile;

    fn captures(entries: &[(&str, Capture)]) -> CaptureMap {
        entries
            .iter()
            .map(|(name, capture)| ((*name).to_string(), capture.clone()))
            .collect()
    }

    #[test]
    fn test_missing_capture_is_an_error() {
        let pattern = compile("if (expression1) a = 2; else if (expression2) a = 3;").unwrap();
        let caps = captures(&[("expression1", Capture::Node(Some(Node::identifier("x"))))]);
        assert_eq!(
            fill(&pattern, &caps),
            Err(FillError::Missing("expression2".to_string()))
        );
    }

    #[test]
    fn test_absent_optional_empties_field() {
        let pattern = compile("if (expression1) statement1; else statement2_optional;").unwrap();
        let caps = captures(&[
            ("expression1", Capture::Node(Some(Node::identifier("x")))),
            ("statement1", Capture::Node(Some(Node::EmptyStatement))),
            ("statement2", Capture::Node(None)),
        ]);
        let Node::IfStatement { alternate, .. } = fill(&pattern, &caps).unwrap() else {
            panic!("expected if statement");
        };
        assert!(alternate.is_none());
    }

    #[test]
    fn test_generic_placeholder_rebuilds_string() {
        let pattern = compile("require('placeholder1')").unwrap();
        let caps = captures(&[("placeholder1", Capture::Name("fs".to_string()))]);
        let Node::CallExpression { arguments, .. } = fill(&pattern, &caps).unwrap() else {
            panic!("expected call");
        };
        assert_eq!(arguments, vec![Node::string("fs")]);
    }
}
