// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
//! turns a String expression into an already flattened `Node` tree
//!
//! Grammar (whitespace-insensitive):
//! ```text
//! sum      := product (('+' | '-') product)*
//! product  := implicit (('*' | '/') implicit)*
//! implicit := unary (juxtaposed power)*      2x, 3x^2, 2(x+1)
//! unary    := '-' unary | power
//! power    := atom ('^' unary)?
//! atom     := number | ident '(' args ')' | ident | '(' sum ')'
//! ```
//! While parsing, a chain of `+` becomes a single n-ary `Add` node and `a - b` is stored as
//! `a + (-b)`, with `-3` and `-1/2` kept as a negative constant and a fraction with a
//! negative numerator; a chain of `*` becomes a single n-ary `Mul`. So the result already
//! satisfies the flattening contract of the collection passes.
//!
//!# Example
//! ```
//! use RustedTermCollector::symbolic::parse_node::parse_node;
//! let node = parse_node("x + 3 + x + 2").unwrap();
//! assert_eq!(node.args().len(), 4);
//! assert_eq!(node.to_string(), "x + 3 + x + 2");
//! ```
use crate::symbolic::symbolic_node::{Node, Op};
use log::trace;
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::take_while,
    character::complete::{char, digit1, multispace0, satisfy},
    combinator::{map, opt, recognize},
    multi::separated_list0,
    sequence::{delimited, pair, preceded},
};
use std::fmt;

/// Error types for the expression parser
#[derive(Debug, Clone, PartialEq)]
pub enum ParseNodeError {
    /// nothing could be parsed at all
    InvalidSyntax(String),
    /// a prefix parsed but some input was left over
    TrailingInput(String),
}

impl fmt::Display for ParseNodeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ParseNodeError::InvalidSyntax(msg) => write!(f, "Invalid expression syntax: {}", msg),
            ParseNodeError::TrailingInput(rest) => {
                write!(f, "Unexpected input after expression: '{}'", rest)
            }
        }
    }
}

impl std::error::Error for ParseNodeError {}

/// single character token surrounded by optional whitespace
fn token<'a>(c: char) -> impl FnMut(&'a str) -> IResult<&'a str, char> {
    move |input: &'a str| delimited(multispace0, char(c), multispace0).parse(input)
}

fn number(input: &str) -> IResult<&str, f64> {
    let (rest, digits) = recognize(pair(digit1, opt(pair(char('.'), digit1)))).parse(input)?;
    match digits.parse::<f64>() {
        Ok(value) => Ok((rest, value)),
        Err(_) => Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Float,
        ))),
    }
}

fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        satisfy(|c: char| c.is_alphabetic()),
        take_while(|c: char| c.is_alphanumeric() || c == '_'),
    ))
    .parse(input)
}

fn function_call(input: &str) -> IResult<&str, Node> {
    let (rest, name) = identifier(input)?;
    let (rest, args) =
        delimited(char('('), separated_list0(token(','), sum), token(')')).parse(rest)?;
    Ok((rest, Node::function(name, args)))
}

fn atom(input: &str) -> IResult<&str, Node> {
    let (input, _) = multispace0(input)?;
    alt((
        map(number, Node::constant),
        function_call,
        map(identifier, Node::symbol),
        map(delimited(token('('), sum, token(')')), Node::parenthesis),
    ))
    .parse(input)
}

fn power(input: &str) -> IResult<&str, Node> {
    let (rest, base) = atom(input)?;
    let (rest, exponent) = opt(preceded(token('^'), unary)).parse(rest)?;
    let node = match exponent {
        Some(exponent) => Node::operator(Op::Pow, vec![base, exponent]),
        None => base,
    };
    Ok((rest, node))
}

fn unary(input: &str) -> IResult<&str, Node> {
    let (input, _) = multispace0(input)?;
    if let Ok((rest, _)) = token('-')(input) {
        let (rest, operand) = unary(rest)?;
        return Ok((rest, negate(operand)));
    }
    power(input)
}

/// `-c` becomes the constant `-c` and `-(n/d)` the fraction `-n/d`, anything else a unary minus
fn negate(node: Node) -> Node {
    match node {
        Node::Const(value) => Node::constant(-value),
        Node::Operator {
            op: Op::Div, args, ..
        } => match args.as_slice() {
            [Node::Const(numerator), Node::Const(denominator)] => Node::operator(
                Op::Div,
                vec![Node::constant(-*numerator), Node::constant(*denominator)],
            ),
            _ => Node::unary_minus(Node::operator(Op::Div, args)),
        },
        other => Node::unary_minus(other),
    }
}

/// juxtaposition: a factor directly followed by a symbol, function or bracket
fn implicit(input: &str) -> IResult<&str, Node> {
    let (mut rest, first) = unary(input)?;
    let mut factors = vec![first];
    loop {
        let (after_space, _) = multispace0(rest)?;
        let starts_factor = after_space
            .chars()
            .next()
            .is_some_and(|c| c.is_alphabetic() || c == '(');
        if !starts_factor {
            break;
        }
        match power(after_space) {
            Ok((next, factor)) => {
                factors.push(factor);
                rest = next;
            }
            Err(_) => break,
        }
    }
    let node = if factors.len() == 1 {
        factors.remove(0)
    } else {
        Node::implicit_mul(factors)
    };
    Ok((rest, node))
}

fn collapse_product(mut factors: Vec<Node>) -> Node {
    if factors.len() == 1 {
        factors.remove(0)
    } else {
        Node::operator(Op::Mul, factors)
    }
}

fn product(input: &str) -> IResult<&str, Node> {
    let (mut rest, first) = implicit(input)?;
    let mut factors = vec![first];
    loop {
        if let Ok((next, _)) = token('*')(rest) {
            let (next, factor) = implicit(next)?;
            factors.push(factor);
            rest = next;
        } else if let Ok((next, _)) = token('/')(rest) {
            let (next, divisor) = implicit(next)?;
            let numerator = collapse_product(std::mem::take(&mut factors));
            factors.push(Node::operator(Op::Div, vec![numerator, divisor]));
            rest = next;
        } else {
            break;
        }
    }
    Ok((rest, collapse_product(factors)))
}

fn sum(input: &str) -> IResult<&str, Node> {
    let (mut rest, first) = product(input)?;
    let mut terms = vec![first];
    loop {
        if let Ok((next, _)) = token('+')(rest) {
            let (next, term) = product(next)?;
            terms.push(term);
            rest = next;
        } else if let Ok((next, _)) = token('-')(rest) {
            let (next, term) = product(next)?;
            terms.push(negate(term));
            rest = next;
        } else {
            break;
        }
    }
    let node = if terms.len() == 1 {
        terms.remove(0)
    } else {
        Node::operator(Op::Add, terms)
    };
    Ok((rest, node))
}

/// Parse a whole string into a `Node`, rejecting trailing garbage.
pub fn parse_node(input: &str) -> Result<Node, ParseNodeError> {
    trace!("parsing expression: {}", input);
    match sum(input) {
        Ok((rest, node)) => {
            let rest = rest.trim();
            if rest.is_empty() {
                Ok(node)
            } else {
                Err(ParseNodeError::TrailingInput(rest.to_string()))
            }
        }
        Err(e) => Err(ParseNodeError::InvalidSyntax(format!("{} in '{}'", e, input))),
    }
}

impl Node {
    /// parse a string expression, see `parse_node`
    pub fn parse(input: &str) -> Result<Node, ParseNodeError> {
        parse_node(input)
    }
}

//___________________________________TESTS____________________________________
