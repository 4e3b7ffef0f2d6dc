// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
//! # Like Term Collection Module
//!
//! This module implements one pass of the simplifier: grouping the like terms of a flattened
//! n-ary sum or product so that a later pass can combine them.
//!
//! ## Strategy
//!
//! 1. **Classification**: each operand is put into a bucket keyed by its algebraic identity:
//!    a bare number, a fraction of two numbers, the name of the symbol of a polynomial term,
//!    or "other" for everything else
//! 2. **Decision**: the node is rewritten only if there is more than one bucket and at least
//!    one bucket other than "other" holds several operands
//! 3. **Rewrite**: buckets are emitted symbol names first (alphabetically), numbers last in
//!    sums and first in products, fractions last; a bucket with several members becomes a
//!    parenthesized sub-expression; "other" operands trail untouched
//!
//! ## Examples
//!
//! - `x + 3 + x + 2` → `(x + x) + (3 + 2)`
//! - `3 * x^2 * 4` → `(3 * 4) * x^2`
//! - `y + y + x + x` → `(x + x) + (y + y)`
//! - `x + y + 2` → unchanged
//!
//! Exponents are not part of a symbol bucket key by default, so `x` and `x^2` land in the same
//! bucket; `CollectorConfig::exponent_in_key` separates them for sums.
//!
//! Every emitted operand is linked to the input operands it was built from through a
//! `ChangeGroups` side table carried by the returned `RewriteStatus`.

use crate::Utils::config::CollectorConfig;
use crate::symbolic::polynomial_term::PolynomialTerm;
use crate::symbolic::rewrite_status::{
    ChangeGroups, ChangeKind, RewriteError, RewriteStatus, SimplificationPass,
};
use crate::symbolic::symbolic_node::{Node, Op};
use itertools::Itertools;
use log::{debug, info, trace};
use std::collections::BTreeMap;

/// Bucket an operand is classified into.
///
/// Derived ordering puts `Constant` < `ConstantFraction` < `Symbol(..)` < `Other`, and symbols
/// among themselves lexicographically by code point.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TermKey {
    Constant,
    ConstantFraction,
    Symbol(String),
    Other,
}

/// An operand together with its position in the operand list of the classified node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassifiedTerm<'a> {
    pub index: usize,
    pub node: &'a Node,
}

/// Operands of one node grouped by `TermKey`.
///
/// Every operand appears in exactly one bucket, no bucket is empty and members keep their
/// original left-to-right order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassifiedTerms<'a> {
    buckets: BTreeMap<TermKey, Vec<ClassifiedTerm<'a>>>,
}

impl<'a> ClassifiedTerms<'a> {
    fn push(&mut self, key: TermKey, index: usize, node: &'a Node) {
        self.buckets
            .entry(key)
            .or_default()
            .push(ClassifiedTerm { index, node });
    }

    pub fn get(&self, key: &TermKey) -> Option<&[ClassifiedTerm<'a>]> {
        self.buckets.get(key).map(|members| members.as_slice())
    }

    pub fn contains(&self, key: &TermKey) -> bool {
        self.buckets.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &TermKey> {
        self.buckets.keys()
    }

    /// number of distinct buckets
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// symbol keys in lexicographic order
    pub fn symbol_keys(&self) -> Vec<&TermKey> {
        self.buckets
            .keys()
            .filter(|key| matches!(key, TermKey::Symbol(_)))
            .collect()
    }

    /// Buckets joined as `key: [a, b]` for logging.
    pub fn describe(&self) -> String {
        self.buckets
            .iter()
            .map(|(key, members)| {
                format!(
                    "{:?}: [{}]",
                    key,
                    members.iter().map(|m| m.node.to_string()).join(", ")
                )
            })
            .join("; ")
    }
}

/// The like-term collection pass.
#[derive(Debug, Clone, Default)]
pub struct LikeTermCollector {
    config: CollectorConfig,
}

impl LikeTermCollector {
    pub fn new(config: CollectorConfig) -> Self {
        LikeTermCollector { config }
    }

    pub fn config(&self) -> &CollectorConfig {
        &self.config
    }

    /// Put every operand of `node` into a bucket.
    ///
    /// `op` must be `+` or `*`, anything else is an `UnsupportedOperation` error. Operands that
    /// are parenthesized numbers or polynomial terms are classified by their inner node.
    pub fn classify<'a>(
        &self,
        node: &'a Node,
        op: Op,
    ) -> Result<ClassifiedTerms<'a>, RewriteError> {
        if op != Op::Add && op != Op::Mul {
            return Err(RewriteError::UnsupportedOperation(op));
        }
        let mut terms = ClassifiedTerms::default();
        for (index, operand) in node.args().iter().enumerate() {
            let key = match op {
                Op::Add => self.addition_key(operand),
                _ => self.multiplication_key(operand),
            };
            terms.push(key, index, operand);
        }
        debug!("classified operands of {}: {}", node, terms.describe());
        Ok(terms)
    }

    fn addition_key(&self, operand: &Node) -> TermKey {
        let inner = operand.unwrap_parenthesis();
        if inner.is_constant(false) {
            TermKey::Constant
        } else if inner.is_constant_fraction(false) {
            TermKey::ConstantFraction
        } else if let Some(term) = PolynomialTerm::recognize(inner) {
            if self.config.exponent_in_key {
                TermKey::Symbol(format!("{}^{}", term.symbol_name(), term.exponent_node()))
            } else {
                TermKey::Symbol(term.symbol_name().to_string())
            }
        } else {
            TermKey::Other
        }
    }

    fn multiplication_key(&self, operand: &Node) -> TermKey {
        let inner = operand.unwrap_parenthesis();
        if inner.is_constant(true) {
            TermKey::Constant
        } else if inner.is_constant_fraction(true) {
            TermKey::ConstantFraction
        } else {
            // factors only bucket when they are bare: x or x^e
            match PolynomialTerm::recognize(inner) {
                Some(term) if term.is_bare() => TermKey::Symbol(term.symbol_name().to_string()),
                _ => TermKey::Other,
            }
        }
    }

    /// True if the operands of `node` can be usefully regrouped.
    ///
    /// Needs more than one kind of term, and more than one term of at least one kind other
    /// than `Other`. Nodes that are not `+`/`*` operator nodes, or that break the flattening
    /// precondition, are never collectable.
    pub fn can_collect(&self, node: &Node) -> bool {
        let op = match node.op() {
            Some(op @ (Op::Add | Op::Mul)) => op,
            _ => return false,
        };
        if check_flattened(node, op).is_err() {
            return false;
        }
        match self.classify(node, op) {
            Ok(terms) => worth_collecting(&terms),
            Err(_) => false,
        }
    }

    /// Regroup the like terms of `node`.
    ///
    /// Returns `Unchanged` for non-operator nodes and for nodes that `can_collect` rejects,
    /// `UnsupportedOperation` for `- / ^` operator nodes and `MalformedInput` when an operand
    /// is itself an explicit node of the same operator.
    pub fn collect(&self, node: &Node) -> Result<RewriteStatus, RewriteError> {
        let op = match node.op() {
            Some(op @ (Op::Add | Op::Mul)) => op,
            Some(other) => return Err(RewriteError::UnsupportedOperation(other)),
            None => return Ok(RewriteStatus::no_change(node.clone())),
        };
        check_flattened(node, op)?;

        let terms = self.classify(node, op)?;
        if !worth_collecting(&terms) {
            trace!("nothing to collect in {}", node);
            return Ok(RewriteStatus::no_change(node.clone()));
        }

        let mut order: Vec<TermKey> = terms.symbol_keys().into_iter().cloned().collect();
        if terms.contains(&TermKey::Constant) {
            match op {
                // x^2 + (x + x) + 4
                Op::Add => order.push(TermKey::Constant),
                // (3 * 4) * x^2
                _ => order.insert(0, TermKey::Constant),
            }
        }
        if terms.contains(&TermKey::ConstantFraction) {
            order.push(TermKey::ConstantFraction);
        }

        let mut groups = ChangeGroups::new();
        let mut new_args: Vec<Node> = Vec::with_capacity(node.args().len());
        for (position, key) in order.into_iter().enumerate() {
            let group = position + 1;
            let members = terms.get(&key).unwrap_or(&[]);
            let emitted = match members {
                [single] => single.node.clone(),
                _ => Node::parenthesis(Node::operator(
                    op,
                    members.iter().map(|m| m.node.clone()).collect(),
                )),
            };
            trace!("group {} ({:?}): {}", group, key, emitted);
            for member in members {
                groups.tag_input(member.index, group);
            }
            groups.tag_output(new_args.len(), group);
            new_args.push(emitted);
        }
        // anything else (parenthesized sums, functions, products) trails untouched
        if let Some(others) = terms.get(&TermKey::Other) {
            new_args.extend(others.iter().map(|m| m.node.clone()));
        }

        let new_node = node.with_args(new_args);
        info!("collected like terms: {} -> {}", node, new_node);
        Ok(RewriteStatus::node_changed(
            ChangeKind::CollectLikeTerms,
            node.clone(),
            new_node,
            false,
            groups,
        ))
    }
}

impl SimplificationPass for LikeTermCollector {
    fn name(&self) -> &str {
        "collect like terms"
    }

    fn apply(&self, node: &Node) -> Result<RewriteStatus, RewriteError> {
        self.collect(node)
    }
}

/// more than one kind of term, and a repeated kind that is not `Other`
fn worth_collecting(terms: &ClassifiedTerms) -> bool {
    terms.len() > 1
        && terms
            .buckets
            .iter()
            .any(|(key, members)| *key != TermKey::Other && members.len() > 1)
}

/// No operand may be an explicit node of the same operator. Implicit products such as `2x`
/// are polynomial terms and are allowed inside a product.
fn check_flattened(node: &Node, op: Op) -> Result<(), RewriteError> {
    match node
        .args()
        .iter()
        .find(|operand| operand.is_operator(op) && !operand.is_implicit())
    {
        Some(nested) => Err(RewriteError::MalformedInput(format!(
            "operand '{}' of '{}' is not flattened",
            nested, node
        ))),
        None => Ok(()),
    }
}

/// Classify the operands of `node` under `op` with the default configuration.
pub fn classify(node: &Node, op: Op) -> Result<ClassifiedTerms<'_>, RewriteError> {
    LikeTermCollector::default().classify(node, op)
}

/// See `LikeTermCollector::can_collect`.
pub fn can_collect(node: &Node) -> bool {
    LikeTermCollector::default().can_collect(node)
}

/// See `LikeTermCollector::collect`.
pub fn collect(node: &Node) -> Result<RewriteStatus, RewriteError> {
    LikeTermCollector::default().collect(node)
}
