// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
// REWRITE STATUS //////////////////////////////////////////////////////////////////
// The uniform result every simplification pass returns, so a driver can run passes
// one after another without knowing what each of them does.
// Change groups live here as a side table instead of being written onto the nodes.

use crate::symbolic::symbolic_node::{Node, Op};
use std::collections::BTreeMap;
use std::fmt;
use strum_macros::Display;

/// Kind of change a pass performed, printed in SCREAMING_SNAKE_CASE for step listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeKind {
    CollectLikeTerms,
}

/// Error types for simplification passes
#[derive(Debug, Clone, PartialEq)]
pub enum RewriteError {
    /// the pass was handed an operator it does not work on
    UnsupportedOperation(Op),
    /// the flattening precondition does not hold for the input node
    MalformedInput(String),
}

impl fmt::Display for RewriteError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RewriteError::UnsupportedOperation(op) => write!(f, "Operation not supported: {}", op),
            RewriteError::MalformedInput(msg) => write!(f, "Malformed input: {}", msg),
        }
    }
}

impl std::error::Error for RewriteError {}

/// Traceability side table linking operands of the old node and of the new node to
/// the change group they belong to.
///
/// Indices are positions in the operand list of the old node (`inputs`) and of the
/// new node (`outputs`). Several inputs can share a group; every group has at most one
/// output. Group ids start at 1.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeGroups {
    inputs: BTreeMap<usize, usize>,
    outputs: BTreeMap<usize, usize>,
}

impl ChangeGroups {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tag_input(&mut self, input_index: usize, group: usize) {
        self.inputs.insert(input_index, group);
    }

    pub fn tag_output(&mut self, output_index: usize, group: usize) {
        self.outputs.insert(output_index, group);
    }

    pub fn group_of_input(&self, input_index: usize) -> Option<usize> {
        self.inputs.get(&input_index).copied()
    }

    pub fn group_of_output(&self, output_index: usize) -> Option<usize> {
        self.outputs.get(&output_index).copied()
    }

    /// input operand indices of a group, in their original order
    pub fn inputs_of(&self, group: usize) -> Vec<usize> {
        self.inputs
            .iter()
            .filter(|(_, g)| **g == group)
            .map(|(index, _)| *index)
            .collect()
    }

    pub fn output_of(&self, group: usize) -> Option<usize> {
        self.outputs
            .iter()
            .find(|(_, g)| **g == group)
            .map(|(index, _)| *index)
    }

    pub fn group_count(&self) -> usize {
        self.outputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty() && self.outputs.is_empty()
    }
}

/// A rewrite that took place: the node before, the node after and how they relate.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeChange {
    pub kind: ChangeKind,
    pub old_node: Node,
    pub new_node: Node,
    /// whether a further manual step is implied before the next pass
    pub needs_manual_step: bool,
    pub groups: ChangeGroups,
}

/// Outcome of running a pass on a node.
#[derive(Debug, Clone, PartialEq)]
pub enum RewriteStatus {
    Unchanged(Node),
    Changed(NodeChange),
}

impl RewriteStatus {
    pub fn no_change(node: Node) -> Self {
        RewriteStatus::Unchanged(node)
    }

    pub fn node_changed(
        kind: ChangeKind,
        old_node: Node,
        new_node: Node,
        needs_manual_step: bool,
        groups: ChangeGroups,
    ) -> Self {
        RewriteStatus::Changed(NodeChange {
            kind,
            old_node,
            new_node,
            needs_manual_step,
            groups,
        })
    }

    pub fn has_changed(&self) -> bool {
        matches!(self, RewriteStatus::Changed(_))
    }

    /// The node a driver continues with: the new node if changed, the original otherwise.
    pub fn node(&self) -> &Node {
        match self {
            RewriteStatus::Unchanged(node) => node,
            RewriteStatus::Changed(change) => &change.new_node,
        }
    }

    pub fn into_node(self) -> Node {
        match self {
            RewriteStatus::Unchanged(node) => node,
            RewriteStatus::Changed(change) => change.new_node,
        }
    }

    pub fn change_kind(&self) -> Option<ChangeKind> {
        match self {
            RewriteStatus::Unchanged(_) => None,
            RewriteStatus::Changed(change) => Some(change.kind),
        }
    }

    pub fn change(&self) -> Option<&NodeChange> {
        match self {
            RewriteStatus::Unchanged(_) => None,
            RewriteStatus::Changed(change) => Some(change),
        }
    }
}

/// A single simplification pass. Implemented by every rewrite so a driver can keep
/// them as `Box<dyn SimplificationPass>` and run them in turn.
pub trait SimplificationPass {
    /// Get pass name for debugging/logging
    fn name(&self) -> &str;
    /// Rewrite `node` if the pass applies to it
    fn apply(&self, node: &Node) -> Result<RewriteStatus, RewriteError>;
}

//___________________________________TESTS____________________________________
