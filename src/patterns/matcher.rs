use super::placeholder::Placeholder;
use super::{Capture, CaptureMap, Pattern};
use crate::ast::{Node, Slot};

/// Matches `node` against `pattern`, extending a copy of `captures`.
///
/// Returns `None` when the tree does not match or when a placeholder that is
/// already bound in `captures` would be bound to a different value.
pub fn matches(pattern: &Pattern, node: &Node, captures: &CaptureMap) -> Option<CaptureMap> {
    let mut result = captures.clone();
    match_node(pattern.root(), Some(node), &mut result).then_some(result)
}

#[derive(Clone, Copy)]
enum Position {
    Expression,
    Statement,
}

fn placeholder_of(node: &Node) -> Option<(&Placeholder, Position)> {
    match node {
        Node::ExpressionPlaceholder(p) => Some((p, Position::Expression)),
        Node::StatementPlaceholder(p) => Some((p, Position::Statement)),
        _ => None,
    }
}

fn accepts(placeholder: &Placeholder, position: Position, node: Option<&Node>) -> bool {
    match position {
        Position::Expression => placeholder.accepts_expression(node),
        Position::Statement => placeholder.accepts_statement(node),
    }
}

fn is_repeatable(node: Option<&Node>) -> bool {
    node.and_then(placeholder_of).is_some_and(|(p, _)| p.repeatable)
}

fn bind(captures: &mut CaptureMap, name: &str, value: Capture) -> bool {
    match captures.get(name) {
        Some(existing) => *existing == value,
        None => {
            captures.insert(name.to_string(), value);
            true
        }
    }
}

fn match_node(pattern: &Node, node: Option<&Node>, captures: &mut CaptureMap) -> bool {
    if let Some((placeholder, position)) = placeholder_of(pattern) {
        return accepts(placeholder, position, node)
            && bind(captures, &placeholder.name, Capture::Node(node.cloned()));
    }

    let Some(node) = node else {
        return false;
    };

    if let Node::GenericPlaceholder(generic) = pattern {
        return match generic.value_of(node) {
            Some(value) => bind(captures, &generic.name, Capture::Name(value.to_string())),
            None => false,
        };
    }

    if !pattern.same_shape(node) {
        return false;
    }

    let pattern_slots = pattern.slots();
    let node_slots = node.slots();
    if pattern_slots.len() != node_slots.len() {
        return false;
    }

    pattern_slots
        .iter()
        .zip(&node_slots)
        .all(|(p, n)| match_slot(p, n, captures))
}

fn match_slot(pattern: &Slot<'_>, node: &Slot<'_>, captures: &mut CaptureMap) -> bool {
    match (pattern, node) {
        (Slot::One(p), Slot::One(n)) => match_node(p, Some(*n), captures),
        (Slot::Opt(p), Slot::Opt(n)) => match p {
            Some(p) => match_node(p, *n, captures),
            None => n.is_none(),
        },
        (Slot::List(p), Slot::List(n)) => {
            let patterns: Vec<_> = p.iter().map(Some).collect();
            let nodes: Vec<_> = n.iter().map(Some).collect();
            match_list(&patterns, &nodes, captures)
        }
        (Slot::Holey(p), Slot::Holey(n)) => {
            let patterns: Vec<_> = p.iter().map(Option::as_ref).collect();
            let nodes: Vec<_> = n.iter().map(Option::as_ref).collect();
            match_list(&patterns, &nodes, captures)
        }
        _ => false,
    }
}

/// Matches a node list, letting each repeatable placeholder take a run of nodes.
///
/// A repeatable placeholder takes as many nodes as it accepts, leaving enough
/// behind for the fixed elements that follow it. It needs at least one node
/// unless it is also optional.
fn match_list(
    patterns: &[Option<&Node>],
    nodes: &[Option<&Node>],
    captures: &mut CaptureMap,
) -> bool {
    let mut next = 0;

    for (index, pattern) in patterns.iter().enumerate() {
        let repeatable = pattern
            .and_then(placeholder_of)
            .filter(|(placeholder, _)| placeholder.repeatable);

        if let Some((placeholder, position)) = repeatable {
            let fixed_after = patterns[index + 1..]
                .iter()
                .filter(|p| !is_repeatable(**p))
                .count();
            let available = nodes.len().saturating_sub(next).saturating_sub(fixed_after);

            let taken = nodes[next..next + available]
                .iter()
                .take_while(|n| accepts(placeholder, position, **n))
                .count();
            if taken == 0 && !placeholder.optional {
                return false;
            }

            let run = nodes[next..next + taken]
                .iter()
                .map(|n| n.cloned())
                .collect();
            if !bind(captures, &placeholder.name, Capture::Nodes(run)) {
                return false;
            }
            next += taken;
            continue;
        }

        let Some(node) = nodes.get(next) else {
            return false;
        };
        let ok = match pattern {
            Some(p) => match_node(p, *node, captures),
            None => node.is_none(),
        };
        if !ok {
            return false;
        }
        next += 1;
    }

    next == nodes.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::parse_program;
    use crate::patterns::compile;

    fn first_statement(source: &str) -> Node {
        let program = parse_program(source).unwrap();
        program.statements().unwrap()[0].clone()
    }

    fn expression_of(source: &str) -> Node {
        match first_statement(source) {
            Node::ExpressionStatement { expression } => *expression,
            other => other,
        }
    }

    #[test]
    fn test_bound_placeholder_must_repeat_identically() {
        let pattern = compile("expression1 + expression1").unwrap();
        let empty = CaptureMap::default();
        assert!(matches(&pattern, &expression_of("a.b + a.b;"), &empty).is_some());
        assert!(matches(&pattern, &expression_of("a.b + a.c;"), &empty).is_none());
    }

    #[test]
    fn test_existing_captures_constrain_match() {
        let pattern = compile("expression1 + 1").unwrap();
        let mut prior = CaptureMap::default();
        prior.insert("expression1".to_string(), Capture::Node(Some(Node::identifier("x"))));
        assert!(matches(&pattern, &expression_of("x + 1;"), &prior).is_some());
        assert!(matches(&pattern, &expression_of("y + 1;"), &prior).is_none());
    }

    #[test]
    fn test_repeatable_leaves_room_for_trailing_elements() {
        let pattern = compile("f(expression1_repeatable, expression2)").unwrap();
        let captures =
            matches(&pattern, &expression_of("f(a, b, c);"), &CaptureMap::default()).unwrap();
        assert_eq!(captures["expression1"].as_nodes().unwrap().len(), 2);
        assert_eq!(
            captures["expression2"].as_node(),
            Some(&Node::identifier("c"))
        );
    }

    #[test]
    fn test_optional_repeatable_takes_holes() {
        let pattern = compile("[expression1_repeatable_optional]").unwrap();
        let captures =
            matches(&pattern, &expression_of("[a, , b];"), &CaptureMap::default()).unwrap();
        let nodes = captures["expression1"].as_nodes().unwrap();
        assert_eq!(nodes.len(), 3);
        assert!(nodes[1].is_none());
    }

    #[test]
    fn test_generic_placeholder_captures_name() {
        let pattern = compile("require('placeholder1')").unwrap();
        let captures = matches(
            &pattern,
            &expression_of("require(\"lodash\");"),
            &CaptureMap::default(),
        )
        .unwrap();
        assert_eq!(captures["placeholder1"].as_name(), Some("lodash"));
    }
}
