// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
#![allow(non_snake_case)]

use crate::Utils::config::CollectorConfig;
use crate::symbolic::like_term_collector::{LikeTermCollector, classify};
use crate::symbolic::parse_node::parse_node;
use crate::symbolic::rewrite_status::{RewriteError, RewriteStatus};
use crate::symbolic::symbolic_node::Op;
use log::{info, warn};

/// print one collection step: before, after and the change groups
fn print_step(input: &str, collector: &LikeTermCollector) {
    let node = match parse_node(input) {
        Ok(node) => node,
        Err(e) => {
            warn!("cannot parse '{}': {}", input, e);
            return;
        }
    };
    match collector.collect(&node) {
        Ok(RewriteStatus::Changed(change)) => {
            println!("{}:  {}  ->  {}", change.kind, change.old_node, change.new_node);
            for (position, operand) in change.new_node.args().iter().enumerate() {
                match change.groups.group_of_output(position) {
                    Some(group) => println!(
                        "   group {}: {} built from operands {:?}",
                        group,
                        operand,
                        change.groups.inputs_of(group)
                    ),
                    None => println!("   untouched: {}", operand),
                }
            }
        }
        Ok(RewriteStatus::Unchanged(node)) => println!("no change:  {}", node),
        Err(RewriteError::UnsupportedOperation(op)) => {
            println!("{} is not a sum or product (top operator {})", node, op)
        }
        Err(e) => warn!("{}", e),
    }
}

pub fn collect_examples(example: usize) {
    match example {
        0 => {
            // ADDITION: like symbols grouped alphabetically, numbers at the end
            let collector = LikeTermCollector::default();
            for input in ["x + 3 + x + 2", "y + y + x + x", "2x - x + 3 - 5 + y^2"] {
                print_step(input, &collector);
            }
        }
        1 => {
            // MULTIPLICATION: numbers first
            let collector = LikeTermCollector::default();
            for input in ["3 * x^2 * 4", "x * 2 * x * 5 * y"] {
                print_step(input, &collector);
            }
        }
        2 => {
            // NOTHING TO DO: every kind of term occurs once, or the node is not + or *
            let collector = LikeTermCollector::default();
            for input in ["x + y + 2", "x / 2", "x"] {
                print_step(input, &collector);
            }
        }
        3 => {
            // OTHER TERMS: parenthesized sums and function calls trail untouched
            let collector = LikeTermCollector::default();
            let input = "x + (a+b) + sin(x) + x";
            if let Ok(node) = parse_node(input) {
                if let Ok(terms) = classify(&node, Op::Add) {
                    println!("buckets of {}: {}", node, terms.describe());
                }
            }
            print_step(input, &collector);
        }
        4 => {
            // EXPONENT IN KEY: x and x^2 no longer share a bucket
            let input = "x^2 + x + x + 2";
            print_step(input, &LikeTermCollector::default());
            let config = CollectorConfig {
                exponent_in_key: true,
                ..CollectorConfig::default()
            };
            print_step(input, &LikeTermCollector::new(config));
        }
        _ => {
            info!("no example with number {}", example);
        }
    }
}
