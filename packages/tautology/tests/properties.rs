use rand::{rngs::StdRng, Rng, SeedableRng};
use tautology::{Evaluate, ExpressionTree, Interpretation};
use test_log::test;

const VARIABLES: [&str; 5] = ["a", "b", "c", "d", "x1"];
const BINARY_OPERATORS: [&str; 9] = ["=", "~", ">", "^", "|", "->", "=>", "<=>", "&"];

fn maybe_bracketed(rng: &mut StdRng, expression: String) -> String {
    if rng.random_bool(0.7) {
        format!("({expression})")
    } else {
        expression
    }
}

/// Any expression produced here is valid: operands are complete expressions and
/// the scan accepts a complete expression wherever an operand is expected.
fn random_expression(rng: &mut StdRng, depth: usize) -> String {
    if depth == 0 || rng.random_bool(0.2) {
        return VARIABLES[rng.random_range(0..VARIABLES.len())].to_owned();
    }

    if rng.random_bool(0.25) {
        let operand = random_expression(rng, depth - 1);

        return format!("!{}", maybe_bracketed(rng, operand));
    }

    let left = random_expression(rng, depth - 1);
    let right = random_expression(rng, depth - 1);
    let operator = BINARY_OPERATORS[rng.random_range(0..BINARY_OPERATORS.len())];

    format!(
        "{} {operator} {}",
        maybe_bracketed(rng, left),
        maybe_bracketed(rng, right)
    )
}

fn random_trees(count: usize) -> Vec<(String, ExpressionTree)> {
    let mut rng = StdRng::seed_from_u64(0x7a07);

    (0..count)
        .map(|_| {
            let input = random_expression(&mut rng, 5);
            let tree = ExpressionTree::parse(&input)
                .unwrap_or_else(|e| panic!("failed to parse {input:?}: {e}"));

            (input, tree)
        })
        .collect()
}

#[test]
fn canonical_form_round_trips() {
    for (input, tree) in random_trees(300) {
        let canonical = tree.to_string();
        let reparsed = ExpressionTree::parse(&canonical).unwrap();

        assert_eq!(reparsed, tree, "input: {input:?}, canonical: {canonical:?}");
        assert_eq!(reparsed.to_string(), canonical);
    }
}

#[test]
fn truth_table_has_a_row_per_assignment() {
    for (input, tree) in random_trees(100) {
        let table = tree.truth_table();
        let n = tree.variables().len();

        assert_eq!(table.rows.len(), 1 << n, "input: {input:?}");
        assert_eq!(table.grid().len(), (1 << n) + 1);
        assert_eq!(table.header.len(), n + 1);
        assert!(table.rows.iter().all(|row| row.values.len() == n));
    }
}

#[test]
fn tautology_agrees_with_truth_table() {
    let mut tautologies = 0;

    for (input, tree) in random_trees(200) {
        let table = tree.truth_table();
        let all_true = table.results().all(|result| result);

        assert_eq!(tree.is_tautology(), all_true, "input: {input:?}");
        assert_eq!(table.attributes().valid, all_true);

        tautologies += usize::from(all_true);
    }

    log::info!("{tautologies} of 200 random expressions are tautologies");
}

#[test]
fn truth_table_agrees_with_evaluation() {
    for (input, tree) in random_trees(50) {
        let table = tree.truth_table();

        for row in &table.rows {
            let interpretation: Interpretation = tree
                .variables()
                .iter()
                .cloned()
                .zip(row.values.iter().copied())
                .collect();

            assert_eq!(
                tree.evaluate(&interpretation),
                Ok(row.result),
                "input: {input:?}, interpretation: {interpretation}"
            );
        }
    }
}
