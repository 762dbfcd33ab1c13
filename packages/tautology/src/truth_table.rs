use std::{fmt::Display, ops::ControlFlow};

use colored::Colorize;
use serde::Serialize;

use crate::ast::ExpressionTree;

/// One cell of the presentation grid: the header row holds labels, every other
/// row holds truth values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Label(String),
    Value(bool),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TruthTableRow {
    /// Variable values, in the order of [`TruthTable::header`].
    pub values: Vec<bool>,
    pub result: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PropositionAttributes {
    pub valid: bool,
    pub satisfiable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TruthTable {
    /// Variable names followed by the expression itself.
    pub header: Vec<String>,
    pub rows: Vec<TruthTableRow>,
}

impl TruthTable {
    pub fn results(&self) -> impl Iterator<Item = bool> + '_ {
        self.rows.iter().map(|row| row.result)
    }

    /// The table as rows of cells, header first.
    pub fn grid(&self) -> Vec<Vec<Cell>> {
        let header: Vec<Cell> = self.header.iter().cloned().map(Cell::Label).collect();

        let rows = self.rows.iter().map(|row| {
            row.values
                .iter()
                .chain([&row.result])
                .map(|&value| Cell::Value(value))
                .collect::<Vec<_>>()
        });

        std::iter::once(header).chain(rows).collect()
    }

    pub fn attributes(&self) -> PropositionAttributes {
        let mut valid = true;
        let mut satisfiable = false;

        for result in self.results() {
            valid &= result;
            satisfiable |= result;
        }

        PropositionAttributes { valid, satisfiable }
    }
}

fn truth_value(value: bool) -> &'static str {
    if value {
        "T"
    } else {
        "F"
    }
}

impl Display for TruthTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for label in &self.header {
            write!(f, "|{}", label.blue())?;
        }
        writeln!(f, "|")?;

        for _ in 0..self.header.len() {
            write!(f, "|:-:")?;
        }
        writeln!(f, "|")?;

        for row in &self.rows {
            for &value in &row.values {
                write!(f, "|{}", truth_value(value))?;
            }

            let result = truth_value(row.result);
            write!(
                f,
                "|{}",
                if row.result {
                    result.green()
                } else {
                    result.red()
                }
            )?;
            writeln!(f, "|")?;
        }

        Ok(())
    }
}

impl ExpressionTree {
    /// Every assignment of the variables, first variable outermost and `true`
    /// before `false`, paired with the value of the expression.
    pub fn truth_table(&self) -> TruthTable {
        let header = self
            .variables
            .iter()
            .map(|variable| variable.0.clone())
            .chain([self.expression.clone()])
            .collect();

        let mut rows = Vec::new();
        let _ = self.for_each_completion(&mut vec![None; self.variables.len()], &mut |values| {
            rows.push(TruthTableRow {
                values: values.to_vec(),
                result: self.evaluate_complete(values),
            });

            ControlFlow::Continue(())
        });

        log::debug!("Truth table of \"{}\" has {} rows", self.expression, rows.len());

        TruthTable { header, rows }
    }
}
