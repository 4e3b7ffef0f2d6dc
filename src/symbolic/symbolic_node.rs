// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
//! # Symbolic Node Module
//!
//! This module provides the n-ary expression tree consumed by the simplification passes.
//! Unlike a binary tree, an operator node holds an ordered vector of operands, so that a
//! flattened sum `x + 3 + x + 2` is one `Add` node with four children. That is the shape
//! the like-term collector works on.
//!
//! ## Main Structures and Methods
//!
//! ### `Op` Enum
//! The five operators an operator node can carry: `+`, `-`, `*`, `/`, `^`.
//!
//! ### `Node` Enum
//! - **Operator**: `Operator { op, args, implicit }` - n-ary operation, `implicit` marks
//!   juxtaposed multiplication such as `2x`
//! - **Parenthesis**: `Parenthesis(Box<Node>)` - grouping only, wraps exactly one child
//! - **Constants**: `Const(f64)` - numerical literal
//! - **Symbols**: `Symbol(String)` - identifiers like "x", "y"
//! - **Functions**: `Function { name, args }` - calls like `sin(x)`
//!
//! A unary minus is an `Operator` with op `Sub` and a single operand.
//!
//! ## Interesting Code Features
//!
//! 1. **No mutable annotations on nodes**: change groups produced by a rewrite are
//!    kept in a side table (`rewrite_status::ChangeGroups`), the tree itself stays plain data
//! 2. **Clone is a deep copy**: owned children mean a cloned subtree can never alias its source
//! 3. **Lookthrough helpers**: `unwrap_parenthesis` strips any depth of grouping parentheses

#![allow(non_camel_case_types)]

use itertools::Itertools;
use std::fmt;
use strum_macros::{Display, EnumIter};

/// Operator carried by an `Node::Operator`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter)]
pub enum Op {
    #[strum(to_string = "+")]
    Add,
    #[strum(to_string = "-")]
    Sub,
    #[strum(to_string = "*")]
    Mul,
    #[strum(to_string = "/")]
    Div,
    #[strum(to_string = "^")]
    Pow,
}

impl Op {
    /// parse an operator from its printed symbol
    pub fn from_char(c: char) -> Option<Op> {
        match c {
            '+' => Some(Op::Add),
            '-' => Some(Op::Sub),
            '*' => Some(Op::Mul),
            '/' => Some(Op::Div),
            '^' => Some(Op::Pow),
            _ => None,
        }
    }
}

/// Core n-ary expression tree.
///
/// Each variant owns its children, so the whole tree is plain data: it can be cloned,
/// compared structurally and sent between threads without any coordination.
///
/// # Examples
/// ```
/// use RustedTermCollector::symbolic::symbolic_node::{Node, Op};
/// let x = Node::symbol("x");
/// let term = Node::implicit_mul(vec![Node::constant(2.0), x.clone()]);
/// assert!(term.is_implicit());
/// assert_eq!(term.to_string(), "2x");
/// let grouped = Node::parenthesis(Node::parenthesis(x.clone()));
/// assert_eq!(grouped.unwrap_parenthesis(), &x);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    /// n-ary operation: args[0] op args[1] op ...
    Operator {
        op: Op,
        args: Vec<Node>,
        /// juxtaposed multiplication, printed without an operator sign
        implicit: bool,
    },
    /// grouping parentheses around exactly one child
    Parenthesis(Box<Node>),
    /// numerical literal
    Const(f64),
    /// symbolic variable
    Symbol(String),
    /// function call, e.g. sin(x)
    Function { name: String, args: Vec<Node> },
}

impl Node {
    //___________________________________CONSTRUCTORS____________________________________

    pub fn operator(op: Op, args: Vec<Node>) -> Node {
        Node::Operator {
            op,
            args,
            implicit: false,
        }
    }

    /// juxtaposed product like 2x or 3x^2
    pub fn implicit_mul(args: Vec<Node>) -> Node {
        Node::Operator {
            op: Op::Mul,
            args,
            implicit: true,
        }
    }

    pub fn unary_minus(arg: Node) -> Node {
        Node::operator(Op::Sub, vec![arg])
    }

    pub fn parenthesis(inner: Node) -> Node {
        Node::Parenthesis(Box::new(inner))
    }

    pub fn constant(value: f64) -> Node {
        Node::Const(value)
    }

    pub fn symbol(name: &str) -> Node {
        Node::Symbol(name.to_string())
    }

    pub fn function(name: &str, args: Vec<Node>) -> Node {
        Node::Function {
            name: name.to_string(),
            args,
        }
    }

    /// Create several symbols from a comma-separated string: "x, y, z"
    pub fn Symbols(symbols: &str) -> Vec<Node> {
        symbols
            .split(',')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(Node::symbol)
            .collect()
    }

    //___________________________________PREDICATES____________________________________

    /// true if this is an operator node with the given operator
    pub fn is_operator(&self, op: Op) -> bool {
        matches!(self, Node::Operator { op: node_op, .. } if *node_op == op)
    }

    /// true for `-a`: a subtraction node with a single operand
    pub fn is_unary_minus(&self) -> bool {
        matches!(self, Node::Operator { op: Op::Sub, args, .. } if args.len() == 1)
    }

    pub fn is_symbol(&self) -> bool {
        matches!(self, Node::Symbol(_))
    }

    pub fn is_parenthesis(&self) -> bool {
        matches!(self, Node::Parenthesis(_))
    }

    /// Bare numeric literal. With `allow_unary_minus` a negated literal `-(3)` counts too.
    pub fn is_constant(&self, allow_unary_minus: bool) -> bool {
        match self {
            Node::Const(_) => true,
            Node::Operator {
                op: Op::Sub, args, ..
            } if allow_unary_minus && args.len() == 1 => matches!(args[0], Node::Const(_)),
            _ => false,
        }
    }

    /// Division of two numeric literals, e.g. `2/3`.
    pub fn is_constant_fraction(&self, allow_unary_minus: bool) -> bool {
        match self {
            Node::Operator {
                op: Op::Div, args, ..
            } => args.len() == 2 && args.iter().all(|a| a.is_constant(allow_unary_minus)),
            Node::Operator {
                op: Op::Sub, args, ..
            } if allow_unary_minus && args.len() == 1 => args[0].is_constant_fraction(false),
            _ => false,
        }
    }

    //___________________________________ACCESSORS____________________________________

    pub fn op(&self) -> Option<Op> {
        match self {
            Node::Operator { op, .. } => Some(*op),
            _ => None,
        }
    }

    /// children of an operator or function node, empty slice otherwise
    pub fn args(&self) -> &[Node] {
        match self {
            Node::Operator { args, .. } | Node::Function { args, .. } => args,
            _ => &[],
        }
    }

    pub fn is_implicit(&self) -> bool {
        matches!(self, Node::Operator { implicit: true, .. })
    }

    /// Look through any depth of grouping parentheses.
    pub fn unwrap_parenthesis(&self) -> &Node {
        let mut node = self;
        while let Node::Parenthesis(inner) = node {
            node = inner;
        }
        node
    }

    /// Shallow copy of an operator node with its operands replaced.
    ///
    /// Operator and implicit flag are kept; any other node is returned unchanged
    /// (there are no operands to replace).
    pub fn with_args(&self, new_args: Vec<Node>) -> Node {
        match self {
            Node::Operator { op, implicit, .. } => Node::Operator {
                op: *op,
                args: new_args,
                implicit: *implicit,
            },
            _ => self.clone(),
        }
    }

    /// total number of nodes in the tree
    pub fn size(&self) -> usize {
        match self {
            Node::Operator { args, .. } | Node::Function { args, .. } => {
                1 + args.iter().map(|a| a.size()).sum::<usize>()
            }
            Node::Parenthesis(inner) => 1 + inner.size(),
            Node::Const(_) | Node::Symbol(_) => 1,
        }
    }
}

/// Pretty printer in infix notation.
///
/// `+ - * /` operands are separated by spaced signs, `^` is printed tight and implicit
/// products are juxtaposed. Besides `Parenthesis` nodes, brackets are added only where an
/// operand would otherwise be read back with a different structure, e.g. a fraction that
/// is not the first factor of a product: `3 * (1 / 2)`.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Node::Const(val) => write!(f, "{}", val),
            Node::Symbol(name) => write!(f, "{}", name),
            Node::Parenthesis(inner) => write!(f, "({})", inner),
            Node::Function { name, args } => {
                write!(f, "{}({})", name, args.iter().map(|a| a.to_string()).join(", "))
            }
            Node::Operator { op, args, implicit } => {
                if *op == Op::Sub && args.len() == 1 {
                    return if needs_brackets(self, 0, &args[0]) {
                        write!(f, "-({})", args[0])
                    } else {
                        write!(f, "-{}", args[0])
                    };
                }
                let separator = match (op, implicit) {
                    (Op::Mul, true) => String::new(),
                    (Op::Pow, _) => op.to_string(),
                    _ => format!(" {} ", op),
                };
                let mut printed = args.iter().enumerate().map(|(position, arg)| {
                    if needs_brackets(self, position, arg) {
                        format!("({})", arg)
                    } else {
                        arg.to_string()
                    }
                });
                write!(f, "{}", printed.join(&separator))
            }
        }
    }
}

/// True if `child`, printed at `position` among the operands of `parent`, has to be
/// bracketed to parse back into the same tree.
fn needs_brackets(parent: &Node, position: usize, child: &Node) -> bool {
    let (parent_op, parent_implicit) = match parent {
        Node::Operator { op, implicit, .. } => (*op, *implicit),
        _ => return false,
    };
    let (child_op, child_implicit) = match child {
        Node::Operator { op, implicit, .. } => (*op, *implicit),
        // -2^2 reads as -(2^2), 2-3 as a difference
        Node::Const(value) => {
            return *value < 0.0
                && ((parent_op == Op::Pow && position == 0) || (parent_implicit && position > 0));
        }
        _ => return false,
    };
    let child_is_sum = child_op == Op::Add || (child_op == Op::Sub && !child.is_unary_minus());
    match parent_op {
        Op::Add => child_is_sum,
        // unary minus, or a binary difference
        Op::Sub if parent.args().len() == 1 => {
            child_is_sum || child_op == Op::Div || (child_op == Op::Mul && !child_implicit)
        }
        Op::Sub => child_is_sum,
        Op::Mul if parent_implicit => {
            child_op != Op::Pow && !(position == 0 && child.is_unary_minus())
        }
        Op::Mul => {
            child_is_sum
                || (child_op == Op::Mul && !child_implicit)
                || (child_op == Op::Div && position > 0)
        }
        Op::Div => {
            child_is_sum
                || (position > 0 && matches!(child_op, Op::Div | Op::Mul) && !child_implicit)
        }
        // the exponent is parsed as a unary operand, the base as an atom
        Op::Pow => !(position > 0 && child.is_unary_minus()),
    }
}

//___________________________________MACROS____________________________________

/// Macro to create symbolic nodes from a comma-separated list
/// Usage: symbols!(x, y, z) -> creates Node::Symbol x, y, z
#[macro_export]
macro_rules! symbols {
    ($($var:ident),+ $(,)?) => {
        {
            ($(
                $crate::symbolic::symbolic_node::Node::symbol(stringify!($var))
            ),+)
        }
    };
}

//___________________________________TESTS____________________________________
