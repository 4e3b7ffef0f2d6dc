#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
///________________________________________________________________________________________________________________________________
/// # Symbolic node
/// the n-ary expression tree the simplification passes work on: operators with any number
/// of operands, grouping parentheses, constants, symbols and function calls
///# Example
/// ```
/// use RustedTermCollector::symbolic::symbolic_node::{Node, Op};
/// let x = Node::symbol("x");
/// let sum = Node::operator(Op::Add, vec![x.clone(), Node::constant(3.0), x]);
/// assert_eq!(sum.to_string(), "x + 3 + x");
/// ```
/// ________________________________________________________________________________________________________________________________
pub mod symbolic_node;
/// turns a String expression into an already flattened `Node`
pub mod parse_node;
/// recognizes `coefficient * symbol ^ exponent` terms
pub mod polynomial_term;
/// result contract shared by all simplification passes: change kinds, change groups, errors
pub mod rewrite_status;
///________________________________________________________________________________________________________________________________
/// # Like term collector
/// groups the like terms of a flattened sum or product
///# Example
/// ```
/// use RustedTermCollector::symbolic::parse_node::parse_node;
/// use RustedTermCollector::symbolic::like_term_collector::{can_collect, collect};
/// let node = parse_node("x + 3 + x + 2").unwrap();
/// assert!(can_collect(&node));
/// let status = collect(&node).unwrap();
/// assert_eq!(status.node().to_string(), "(x + x) + (3 + 2)");
/// // a second pass has nothing left to do
/// assert!(!can_collect(status.node()));
/// ```
/// ________________________________________________________________________________________________________________________________
pub mod like_term_collector;
mod like_term_collector_tests;
