// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
//___________________________________TESTS____________________________________

#[cfg(test)]
mod tests {
    use crate::Utils::config::CollectorConfig;
    use crate::symbolic::like_term_collector::{
        LikeTermCollector, TermKey, can_collect, classify, collect,
    };
    use crate::symbolic::parse_node::parse_node;
    use crate::symbolic::rewrite_status::{
        ChangeKind, RewriteError, RewriteStatus, SimplificationPass,
    };
    use crate::symbolic::symbolic_node::{Node, Op};
    use crate::symbols;

    /// collect the parsed input and print the node the pass hands on
    fn collected(input: &str) -> String {
        let node = parse_node(input).unwrap();
        collect(&node).unwrap().node().to_string()
    }

    fn bucket_indices(node: &Node, op: Op, key: &TermKey) -> Vec<usize> {
        classify(node, op)
            .unwrap()
            .get(key)
            .map(|members| members.iter().map(|m| m.index).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_every_operand_in_exactly_one_bucket() {
        let node = parse_node("x + 3 + 2x^2 + (a + b) + 1/2 + y + sin(x) + -4 + (7)").unwrap();
        let terms = classify(&node, Op::Add).unwrap();
        let mut seen: Vec<usize> = terms
            .keys()
            .flat_map(|key| terms.get(key).unwrap().iter().map(|m| m.index))
            .collect();
        seen.sort();
        assert_eq!(seen, (0..node.args().len()).collect::<Vec<_>>());
        assert!(terms.keys().all(|key| !terms.get(key).unwrap().is_empty()));

        assert_eq!(bucket_indices(&node, Op::Add, &TermKey::Constant), vec![1, 7, 8]);
        assert_eq!(bucket_indices(&node, Op::Add, &TermKey::ConstantFraction), vec![4]);
        assert_eq!(bucket_indices(&node, Op::Add, &TermKey::Symbol("x".into())), vec![0, 2]);
        assert_eq!(bucket_indices(&node, Op::Add, &TermKey::Symbol("y".into())), vec![5]);
        assert_eq!(bucket_indices(&node, Op::Add, &TermKey::Other), vec![3, 6]);
    }

    #[test]
    fn test_order_preserved_within_bucket() {
        let (x, y) = symbols!(x, y);
        let a = x.clone();
        let b = y;
        let c = Node::implicit_mul(vec![Node::constant(2.0), x]);
        let node = Node::operator(Op::Add, vec![a.clone(), b.clone(), c.clone()]);
        let terms = classify(&node, Op::Add).unwrap();
        let x_bucket: Vec<&Node> = terms
            .get(&TermKey::Symbol("x".into()))
            .unwrap()
            .iter()
            .map(|m| m.node)
            .collect();
        assert_eq!(x_bucket, vec![&a, &c]);
        let y_bucket: Vec<&Node> = terms
            .get(&TermKey::Symbol("y".into()))
            .unwrap()
            .iter()
            .map(|m| m.node)
            .collect();
        assert_eq!(y_bucket, vec![&b]);
    }

    #[test]
    fn test_classify_rejects_other_operators() {
        let node = parse_node("x - 3").unwrap();
        for op in [Op::Sub, Op::Div, Op::Pow] {
            assert_eq!(
                classify(&node, op).unwrap_err(),
                RewriteError::UnsupportedOperation(op)
            );
        }
    }

    #[test]
    fn test_multiplication_classification() {
        // bare symbols and powers bucket by name, anything with a coefficient is other
        let node = parse_node("3 * x^2 * x * 2y * (4) * 1/2").unwrap();
        // 3 * x^2 * x * 2y * (4) * 1 / 2 parses as (3 * x^2 * x * 2y * (4) * 1) / 2
        assert!(node.is_operator(Op::Div));
        let product = &node.args()[0];
        assert_eq!(bucket_indices(product, Op::Mul, &TermKey::Constant), vec![0, 4, 5]);
        assert_eq!(bucket_indices(product, Op::Mul, &TermKey::Symbol("x".into())), vec![1, 2]);
        assert_eq!(bucket_indices(product, Op::Mul, &TermKey::Other), vec![3]);

        let negated = Node::operator(
            Op::Mul,
            vec![Node::unary_minus(Node::constant(2.0)), Node::symbol("x")],
        );
        assert_eq!(bucket_indices(&negated, Op::Mul, &TermKey::Constant), vec![0]);
    }

    #[test]
    fn test_constants_trail_in_sums() {
        assert_eq!(collected("x + 3 + x + 2"), "(x + x) + (3 + 2)");
    }

    #[test]
    fn test_constants_lead_in_products() {
        assert_eq!(collected("3 * x^2 * 4"), "(3 * 4) * x^2");
        assert_eq!(collected("x * 2 * x * 5 * y"), "(2 * 5) * (x * x) * y");
    }

    #[test]
    fn test_fractions_always_last() {
        assert_eq!(collected("1/2 + x + 1/3 + 4 + x"), "(x + x) + 4 + (1 / 2 + 1 / 3)");
        let product = Node::operator(
            Op::Mul,
            vec![
                parse_node("1/2").unwrap(),
                Node::symbol("x"),
                Node::constant(3.0),
                Node::symbol("x"),
            ],
        );
        let result = collect(&product).unwrap();
        assert_eq!(result.node().to_string(), "3 * (x * x) * (1 / 2)");
    }

    #[test]
    fn test_collected_product_reads_back_as_product() {
        let printed = collected("1/2 * x * 3 * x");
        assert_eq!(printed, "3 * (x * x) * (1 / 2)");
        let reparsed = parse_node(&printed).unwrap();
        assert_eq!(reparsed.op(), Some(Op::Mul));
        assert_eq!(reparsed.args().len(), 3);
        assert!(reparsed.args()[2].unwrap_parenthesis().is_constant_fraction(false));
    }

    #[test]
    fn test_subtracted_fractions_bucket_with_fractions() {
        let subtracted = parse_node("x + 1/3 - 1/2 + x").unwrap();
        let added = parse_node("x + 1/3 + -1/2 + x").unwrap();
        for node in [&subtracted, &added] {
            assert_eq!(bucket_indices(node, Op::Add, &TermKey::ConstantFraction), vec![1, 2]);
            assert_eq!(bucket_indices(node, Op::Add, &TermKey::Other), Vec::<usize>::new());
        }
        assert_eq!(collected("x + 1/3 - 1/2 + x"), "(x + x) + (1 / 3 + -1 / 2)");
        assert_eq!(collected("x + 1/3 + -1/2 + x"), "(x + x) + (1 / 3 + -1 / 2)");
        // subtracted constants already fold the same way
        assert_eq!(collected("x + 3 - 2 + x"), "(x + x) + (3 + -2)");
    }

    #[test]
    fn test_no_op_guard() {
        let node = parse_node("x + y + 2").unwrap();
        assert!(!can_collect(&node));
        assert_eq!(collect(&node).unwrap(), RewriteStatus::Unchanged(node.clone()));

        // a single kind of term is already homogeneous
        let node = parse_node("x + x + 2x").unwrap();
        assert!(!can_collect(&node));
        // repeated terms only in the other bucket do not count
        let node = parse_node("x + (a + b) + (c + d)").unwrap();
        assert!(!can_collect(&node));
    }

    #[test]
    fn test_grouping_trigger() {
        let node = parse_node("x + x + y").unwrap();
        assert!(can_collect(&node));
        let status = collect(&node).unwrap();
        let new_node = status.node();
        assert_eq!(new_node.to_string(), "(x + x) + y");
        assert!(new_node.is_operator(Op::Add));
        assert_eq!(new_node.args().len(), 2);
        match &new_node.args()[0] {
            Node::Parenthesis(inner) => {
                assert!(inner.is_operator(Op::Add));
                assert_eq!(inner.args(), &[Node::symbol("x"), Node::symbol("x")]);
            }
            other => panic!("expected a parenthesized group, got {}", other),
        }
        assert_eq!(new_node.args()[1], Node::symbol("y"));
    }

    #[test]
    fn test_other_bucket_passthrough() {
        let node = parse_node("x + (a+b) + x").unwrap();
        let status = collect(&node).unwrap();
        assert_eq!(status.node().to_string(), "(x + x) + (a + b)");
        assert_eq!(status.node().args()[1], node.args()[1]);

        let change = status.change().unwrap();
        assert_eq!(change.groups.group_of_input(0), Some(1));
        assert_eq!(change.groups.group_of_input(2), Some(1));
        assert_eq!(change.groups.group_of_input(1), None);
        assert_eq!(change.groups.group_of_output(1), None);
        assert_eq!(change.groups.group_count(), 1);
    }

    #[test]
    fn test_alphabetical_symbol_order() {
        assert_eq!(collected("y + y + x + x"), "(x + x) + (y + y)");
        assert_eq!(collected("b + a + ab + a + b"), "(a + a) + ab + (b + b)");
    }

    #[test]
    fn test_change_groups_and_status() {
        let node = parse_node("x + 3 + x + 2").unwrap();
        let status = collect(&node).unwrap();
        assert!(status.has_changed());
        assert_eq!(status.change_kind(), Some(ChangeKind::CollectLikeTerms));
        let change = status.change().unwrap();
        assert_eq!(change.old_node, node);
        assert!(!change.needs_manual_step);
        assert_eq!(change.groups.inputs_of(1), vec![0, 2]);
        assert_eq!(change.groups.inputs_of(2), vec![1, 3]);
        assert_eq!(change.groups.output_of(1), Some(0));
        assert_eq!(change.groups.output_of(2), Some(1));

        // single members keep their group too
        let node = parse_node("x + x + y").unwrap();
        let status = collect(&node).unwrap();
        let groups = &status.change().unwrap().groups;
        assert_eq!(groups.group_of_input(2), Some(2));
        assert_eq!(groups.group_of_output(1), Some(2));
    }

    #[test]
    fn test_no_further_collection_after_one_pass() {
        let inputs = [
            "x + 3 + x + 2",
            "3 * x^2 * 4",
            "x + x + y",
            "y + y + x + x",
            "x + (a+b) + x",
            "1/2 + x + 1/3 + 4 + x",
            "2x - x + 3 - 5 + y^2",
            "x * 2 * x * 5 * y * sin(x)",
            "(x) + x + 2 + (3)",
        ];
        for input in inputs {
            let node = parse_node(input).unwrap();
            let status = collect(&node).unwrap();
            assert!(status.has_changed(), "expected a change for {}", input);
            assert!(
                !can_collect(status.node()),
                "{} collected to {} is still collectable",
                input,
                status.node()
            );
        }
    }

    #[test]
    fn test_exponent_ignored_in_bucket_key() {
        assert_eq!(collected("x^2 + x + x + 2"), "(x^2 + x + x) + 2");
    }

    #[test]
    fn test_exponent_in_key_option() {
        let config = CollectorConfig {
            exponent_in_key: true,
            ..CollectorConfig::default()
        };
        let collector = LikeTermCollector::new(config);
        let node = parse_node("x^2 + x + x + 2").unwrap();
        let status = collector.collect(&node).unwrap();
        assert_eq!(status.node().to_string(), "(x + x) + x^2 + 2");

        let node = parse_node("x^2 + x + 2").unwrap();
        assert!(!collector.can_collect(&node));
        // symbol-only keys put x^2 and x together
        assert!(can_collect(&node));
    }

    #[test]
    fn test_negative_coefficients_bucket_by_symbol() {
        assert_eq!(collected("2x - x + 3"), "(2x + -x) + 3");
        assert_eq!(collected("-x + y - 3y"), "-x + (y + -3y)");
    }

    #[test]
    fn test_parenthesized_operands_are_looked_through() {
        assert_eq!(collected("(x) + x + 2"), "((x) + x) + 2");
        assert_eq!(collected("x + (3) + y + 2"), "x + y + ((3) + 2)");
    }

    #[test]
    fn test_implicit_products_allowed_inside_products() {
        assert_eq!(collected("3 * 2x * x * 4"), "(3 * 4) * x * 2x");
        let x = Node::symbol("x");
        let implicit = Node::implicit_mul(vec![Node::constant(2.0), x.clone(), x]);
        let status = collect(&implicit).unwrap();
        assert!(status.node().is_implicit());
        assert_eq!(status.node().to_string(), "2(x * x)");
    }

    #[test]
    fn test_unsupported_and_non_operator_nodes() {
        let division = parse_node("x / 2").unwrap();
        assert!(!can_collect(&division));
        assert_eq!(
            collect(&division).unwrap_err(),
            RewriteError::UnsupportedOperation(Op::Div)
        );
        let power = parse_node("x^2").unwrap();
        assert_eq!(
            collect(&power).unwrap_err(),
            RewriteError::UnsupportedOperation(Op::Pow)
        );

        let x = Node::symbol("x");
        assert!(!can_collect(&x));
        assert_eq!(collect(&x).unwrap(), RewriteStatus::Unchanged(x.clone()));
    }

    #[test]
    fn test_malformed_nested_sum() {
        let x = Node::symbol("x");
        let nested = Node::operator(Op::Add, vec![x.clone(), Node::constant(1.0)]);
        let node = Node::operator(Op::Add, vec![x.clone(), nested, x]);
        assert!(!can_collect(&node));
        assert!(matches!(collect(&node), Err(RewriteError::MalformedInput(_))));
    }

    #[test]
    fn test_input_is_not_modified_and_decision_is_stable() {
        let node = parse_node("x + 3 + x + 2").unwrap();
        let before = node.clone();
        let first = can_collect(&node);
        let _ = collect(&node).unwrap();
        assert_eq!(node, before);
        assert_eq!(can_collect(&node), first);
        assert_eq!(collect(&node).unwrap(), collect(&before).unwrap());
    }

    #[test]
    fn test_pass_through_trait_object() {
        let passes: Vec<Box<dyn SimplificationPass>> = vec![Box::new(LikeTermCollector::default())];
        let mut node = parse_node("y + y + x + x + 1").unwrap();
        for pass in &passes {
            let status = pass.apply(&node).unwrap();
            println!("{}: {}", pass.name(), status.node());
            node = status.into_node();
        }
        assert_eq!(node.to_string(), "(x + x) + (y + y) + 1");
    }
}
