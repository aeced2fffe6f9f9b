use std::collections::HashSet;

use thiserror::Error;

use crate::tree::{Key, Node, NodeTag};

/// A broken structural invariant of a query document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeViolation {
    #[error("key {key} is used by more than one node")]
    DuplicateKey { key: Key },
    #[error("query {key} must have exactly one ctes and one select child")]
    Query { key: Key },
    #[error("select {key} must have exactly columns, from, where children in that order")]
    Select { key: Key },
    #[error("from {key} must have exactly one table child")]
    From { key: Key },
    #[error("column {key} must have one var child and at most one alias child")]
    Column { key: Key },
    #[error("join {key} must have exactly one table and one joinOn child")]
    Join { key: Key },
    #[error("joinOn {key} must have exactly two var children")]
    JoinOn { key: Key },
}

fn count(node: &Node, tag: NodeTag) -> usize {
    node.children().iter().filter(|c| c.tag == tag).count()
}

fn check(node: &Node) -> Option<ShapeViolation> {
    let key = node.key.clone();
    match node.tag {
        NodeTag::Query => (count(node, NodeTag::Ctes) != 1 || count(node, NodeTag::Select) != 1)
            .then_some(ShapeViolation::Query { key }),
        NodeTag::Select => {
            let tags: Vec<NodeTag> = node.children().iter().map(|c| c.tag).collect();
            (tags != [NodeTag::Columns, NodeTag::From, NodeTag::Where])
                .then_some(ShapeViolation::Select { key })
        }
        NodeTag::From => (count(node, NodeTag::Table) != 1).then_some(ShapeViolation::From { key }),
        NodeTag::Column => (count(node, NodeTag::Var) != 1 || count(node, NodeTag::Alias) > 1)
            .then_some(ShapeViolation::Column { key }),
        NodeTag::Join => (count(node, NodeTag::Table) != 1 || count(node, NodeTag::JoinOn) != 1)
            .then_some(ShapeViolation::Join { key }),
        NodeTag::JoinOn => {
            let vars = count(node, NodeTag::Var);
            (vars != 2 || node.children().len() != 2).then_some(ShapeViolation::JoinOn { key })
        }
        NodeTag::Base
        | NodeTag::List
        | NodeTag::Var
        | NodeTag::Ctes
        | NodeTag::Cte
        | NodeTag::Columns
        | NodeTag::Where
        | NodeTag::Table
        | NodeTag::Alias
        | NodeTag::SourceTable => None,
    }
}

/// Check every node under `root` against the document invariants.
/// Incomplete constructs (a CTE without alias, an unpicked table) are valid.
pub fn validate(root: &Node) -> Vec<ShapeViolation> {
    let mut seen = HashSet::new();
    let mut violations = Vec::new();
    root.visit(&mut |node| {
        if !seen.insert(&node.key) {
            violations.push(ShapeViolation::DuplicateKey { key: node.key.clone() });
        }
        if let Some(violation) = check(node) {
            violations.push(violation);
        }
    });
    violations
}
