use tautology::{
    truth_table::{PropositionAttributes, TruthTableRow},
    Cell, ExpressionTree,
};
use test_log::test;

fn parse(input: &str) -> ExpressionTree {
    ExpressionTree::parse(input).unwrap()
}

fn row(values: &[bool], result: bool) -> TruthTableRow {
    TruthTableRow {
        values: values.to_vec(),
        result,
    }
}

#[test]
fn implication_table() {
    let table = parse("a -> b").truth_table();

    assert_eq!(table.header, vec!["a", "b", "a>b"]);
    assert_eq!(
        table.rows,
        vec![
            row(&[true, true], true),
            row(&[true, false], false),
            row(&[false, true], true),
            row(&[false, false], true),
        ]
    );
}

#[test]
fn rows_follow_registration_order() {
    let table = parse("c|a^b").truth_table();

    assert_eq!(table.header, vec!["c", "a", "b", "(c|a)^b"]);
    assert_eq!(table.rows.len(), 8);

    let assignments = table
        .rows
        .iter()
        .map(|row| row.values.clone())
        .collect::<Vec<_>>();

    assert_eq!(assignments[0], vec![true, true, true]);
    assert_eq!(assignments[1], vec![true, true, false]);
    assert_eq!(assignments[2], vec![true, false, true]);
    assert_eq!(assignments[7], vec![false, false, false]);
}

#[test]
fn header_uses_the_normalized_expression() {
    let table = parse("(p <=> q) & !p").truth_table();

    assert_eq!(table.header.last().map(String::as_str), Some("(p=q)^!p"));
}

#[test]
fn grid_has_a_header_row() {
    let grid = parse("!a").truth_table().grid();

    assert_eq!(
        grid,
        vec![
            vec![Cell::Label("a".to_owned()), Cell::Label("!a".to_owned())],
            vec![Cell::Value(true), Cell::Value(false)],
            vec![Cell::Value(false), Cell::Value(true)],
        ]
    );
}

#[test]
fn tables_are_reproducible() {
    let input = "(a~b)>(c=d)|e";

    assert_eq!(parse(input).truth_table(), parse(input).truth_table());
}

#[test]
fn attributes() {
    let test_cases = [
        ("a|!a", true, true),
        ("a^!a", false, false),
        ("a>b", false, true),
    ];

    for (input, valid, satisfiable) in test_cases {
        assert_eq!(
            parse(input).truth_table().attributes(),
            PropositionAttributes { valid, satisfiable },
            "input: {input}"
        );
    }
}

#[test]
fn markdown_rendering() {
    colored::control::set_override(false);

    let rendered = parse("a^b").truth_table().to_string();

    assert_eq!(
        rendered,
        "|a|b|a^b|\n|:-:|:-:|:-:|\n|T|T|T|\n|T|F|F|\n|F|T|F|\n|F|F|F|\n"
    );
}
