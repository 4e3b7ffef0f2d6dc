// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
//! Recognition of polynomial terms: `coefficient * symbol ^ exponent`, any part of which
//! may be implicit.
//!
//! Accepted shapes:
//! - `x`
//! - `x^e` with `e` a non-negative constant or constant fraction
//! - `c * x`, `c * x^e`, `cx`, `cx^e` where `c` is a constant or constant fraction
//! - `x / c`, `c * x / d` (coefficient recorded as `1/d` or `c/d`)
//! - `-t` for any of the above
//!
//! Only single-symbol terms are recognized: `x * y` is not a polynomial term here.
use crate::symbolic::symbolic_node::{Node, Op};

/// A recognized polynomial term. Borrows the pieces of the node it was built from.
#[derive(Debug, Clone, PartialEq)]
pub struct PolynomialTerm<'a> {
    symbol: &'a str,
    exponent: Option<&'a Node>,
    coefficient: Option<Node>,
    negated: bool,
}

impl<'a> PolynomialTerm<'a> {
    /// Try to read `node` as a polynomial term, `None` if it is anything else.
    pub fn recognize(node: &'a Node) -> Option<PolynomialTerm<'a>> {
        match node {
            Node::Symbol(_) | Node::Operator { op: Op::Pow, .. } => Self::symbol_power(node),
            Node::Operator {
                op: Op::Sub, args, ..
            } if args.len() == 1 => {
                let mut inner = Self::recognize(&args[0])?;
                inner.negated = !inner.negated;
                Some(inner)
            }
            Node::Operator {
                op: Op::Mul, args, ..
            } => {
                // exactly a coefficient followed by a coefficient-free term
                if args.len() != 2 || !is_coefficient(&args[0]) {
                    return None;
                }
                let mut term = Self::symbol_power(&args[1])?;
                term.coefficient = Some(args[0].clone());
                Some(term)
            }
            Node::Operator {
                op: Op::Div, args, ..
            } => {
                if args.len() != 2 || !args[1].is_constant(true) {
                    return None;
                }
                let mut term = Self::recognize(&args[0])?;
                if term.negated {
                    return None;
                }
                let numerator = term.coefficient.take().unwrap_or(Node::constant(1.0));
                term.coefficient = Some(Node::operator(Op::Div, vec![numerator, args[1].clone()]));
                Some(term)
            }
            _ => None,
        }
    }

    /// `x` or `x^e` with no coefficient
    fn symbol_power(node: &'a Node) -> Option<PolynomialTerm<'a>> {
        match node {
            Node::Symbol(name) => Some(PolynomialTerm {
                symbol: name,
                exponent: None,
                coefficient: None,
                negated: false,
            }),
            Node::Operator {
                op: Op::Pow, args, ..
            } if args.len() == 2 => match (&args[0], &args[1]) {
                (Node::Symbol(name), exponent) if is_non_negative_exponent(exponent) => {
                    Some(PolynomialTerm {
                        symbol: name,
                        exponent: Some(exponent),
                        coefficient: None,
                        negated: false,
                    })
                }
                _ => None,
            },
            _ => None,
        }
    }

    pub fn symbol_name(&self) -> &'a str {
        self.symbol
    }

    /// explicit exponent node, `None` means an implicit exponent of 1
    pub fn exponent(&self) -> Option<&'a Node> {
        self.exponent
    }

    /// Exponent with the implicit `1` made explicit.
    pub fn exponent_node(&self) -> Node {
        match self.exponent {
            Some(exponent) => exponent.clone(),
            None => Node::constant(1.0),
        }
    }

    pub fn coefficient(&self) -> Option<&Node> {
        self.coefficient.as_ref()
    }

    pub fn has_coefficient(&self) -> bool {
        self.coefficient.is_some()
    }

    pub fn is_negated(&self) -> bool {
        self.negated
    }

    /// true for a bare `x` or `x^e`: no coefficient and no sign
    pub fn is_bare(&self) -> bool {
        self.coefficient.is_none() && !self.negated
    }
}

fn is_coefficient(node: &Node) -> bool {
    node.is_constant(true) || node.is_constant_fraction(true)
}

fn is_non_negative_exponent(node: &Node) -> bool {
    match node {
        Node::Const(value) => *value >= 0.0,
        Node::Operator {
            op: Op::Div, args, ..
        } if node.is_constant_fraction(false) => match (&args[0], &args[1]) {
            (Node::Const(num), Node::Const(den)) => *num * *den >= 0.0,
            _ => false,
        },
        _ => false,
    }
}

//___________________________________TESTS____________________________________
