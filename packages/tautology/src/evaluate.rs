use std::{convert::Infallible, fmt::Display, ops::ControlFlow};

use indexmap::IndexMap;
use itertools::Itertools;

use crate::{
    ast::{ExpressionTree, Node, NodeRef, Variable},
    error::EvaluationError,
};

/// Truth values for (some of) the variables of an expression.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Interpretation(pub IndexMap<Variable, bool>);

impl Interpretation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, variable: impl Into<Variable>, value: bool) -> Self {
        self.0.insert(variable.into(), value);

        self
    }

    pub fn get(&self, variable: &Variable) -> Option<bool> {
        self.0.get(variable).copied()
    }
}

impl<V: Into<Variable>> FromIterator<(V, bool)> for Interpretation {
    fn from_iter<T: IntoIterator<Item = (V, bool)>>(iter: T) -> Self {
        Interpretation(
            iter.into_iter()
                .map(|(variable, value)| (variable.into(), value))
                .collect(),
        )
    }
}

impl Display for Interpretation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let variable_list = self
            .0
            .iter()
            .map(|(variable, &value)| format!("{}{variable}", if value { "" } else { "!" }))
            .join(", ");

        write!(f, "{{{}}}", variable_list)
    }
}

pub trait Evaluate {
    fn evaluate(&self, interpretation: &Interpretation) -> Result<bool, EvaluationError>;
}

impl NodeRef<'_> {
    /// Post-order walk; `value_of` supplies the value of each variable by its
    /// position in the tree's variable list. Both operands of a binary operator
    /// are always evaluated.
    fn fold_with<E>(
        &self,
        value_of: &mut impl FnMut(usize, &Variable) -> Result<bool, E>,
    ) -> Result<bool, E> {
        match self.node() {
            Node::Variable(index) => match self.variable() {
                Some(variable) => value_of(*index, variable),
                None => unreachable!("variable nodes always index the variable list"),
            },
            Node::Unary { operator, .. } => {
                let values = self
                    .children()
                    .map(|child| child.fold_with(value_of))
                    .collect::<Result<Vec<_>, _>>()?;

                Ok(operator.apply(values[0]))
            }
            Node::Binary { operator, .. } => {
                let values = self
                    .children()
                    .map(|child| child.fold_with(value_of))
                    .collect::<Result<Vec<_>, _>>()?;

                Ok(operator.apply(values[0], values[1]))
            }
        }
    }
}

impl Evaluate for NodeRef<'_> {
    fn evaluate(&self, interpretation: &Interpretation) -> Result<bool, EvaluationError> {
        self.fold_with(&mut |_, variable| {
            interpretation
                .get(variable)
                .ok_or_else(|| EvaluationError::UnboundVariable {
                    variable: variable.clone(),
                })
        })
    }
}

impl Evaluate for ExpressionTree {
    fn evaluate(&self, interpretation: &Interpretation) -> Result<bool, EvaluationError> {
        self.root().evaluate(interpretation)
    }
}

impl ExpressionTree {
    /// Evaluates under a complete assignment given in variable-list order.
    pub fn evaluate_assignment(&self, values: &[bool]) -> Result<bool, EvaluationError> {
        if values.len() != self.variables.len() {
            return Err(EvaluationError::AssignmentLength {
                expected: self.variables.len(),
                actual: values.len(),
            });
        }

        Ok(self.evaluate_complete(values))
    }

    /// `values` must hold exactly one value per variable.
    pub(crate) fn evaluate_complete(&self, values: &[bool]) -> bool {
        self.root()
            .fold_with(&mut |index, _| Ok::<_, Infallible>(values[index]))
            .unwrap_or_else(|never| match never {})
    }

    /// Visits every completion of `assignment`, depth first: the first unbound
    /// variable is tried with `true` before `false`. Stops early on `Break`.
    pub(crate) fn for_each_completion(
        &self,
        assignment: &mut Vec<Option<bool>>,
        visit: &mut impl FnMut(&[bool]) -> ControlFlow<()>,
    ) -> ControlFlow<()> {
        let Some(index) = assignment.iter().position(Option::is_none) else {
            let values = assignment.iter().flatten().copied().collect::<Vec<_>>();

            return visit(&values);
        };

        for value in [true, false] {
            assignment[index] = Some(value);

            let flow = self.for_each_completion(assignment, visit);
            if flow.is_break() {
                assignment[index] = None;

                return flow;
            }
        }

        assignment[index] = None;

        ControlFlow::Continue(())
    }

    pub fn is_tautology(&self) -> bool {
        self.is_tautology_given(&Interpretation::default())
    }

    /// Whether every completion of the partial `interpretation` makes the
    /// expression true. Variables the expression does not mention are ignored.
    pub fn is_tautology_given(&self, interpretation: &Interpretation) -> bool {
        let mut assignment = self
            .variables
            .iter()
            .map(|variable| interpretation.get(variable))
            .collect::<Vec<_>>();

        let mut cases = 0usize;
        let flow = self.for_each_completion(&mut assignment, &mut |values| {
            cases += 1;

            if self.evaluate_complete(values) {
                ControlFlow::Continue(())
            } else {
                ControlFlow::Break(())
            }
        });

        let tautology = flow.is_continue();

        log::debug!(
            "\"{}\" is {}a tautology ({cases} cases checked)",
            self.expression,
            if tautology { "" } else { "not " }
        );

        tautology
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    #[test]
    fn completions_are_enumerated_true_first() {
        let tree = ExpressionTree::parse("a^b").unwrap();

        let mut seen = vec![];
        let mut assignment = vec![None, None];
        let _ = tree.for_each_completion(&mut assignment, &mut |values| {
            seen.push(values.to_vec());
            ControlFlow::Continue(())
        });

        assert_eq!(
            seen,
            vec![
                vec![true, true],
                vec![true, false],
                vec![false, true],
                vec![false, false],
            ]
        );
        assert_eq!(assignment, vec![None, None]);
    }

    #[test]
    fn bound_variables_are_not_split() {
        let tree = ExpressionTree::parse("a|b|c").unwrap();

        let mut seen = vec![];
        let mut assignment = vec![None, Some(false), None];
        let _ = tree.for_each_completion(&mut assignment, &mut |values| {
            seen.push(values.to_vec());
            ControlFlow::Continue(())
        });

        assert_eq!(seen.len(), 4);
        assert!(seen.iter().all(|values| !values[1]));
    }

    #[test]
    fn enumeration_stops_on_break() {
        let tree = ExpressionTree::parse("a^b^c").unwrap();

        let mut visits = 0;
        let flow = tree.for_each_completion(&mut vec![None; 3], &mut |_| {
            visits += 1;
            ControlFlow::Break(())
        });

        assert!(flow.is_break());
        assert_eq!(visits, 1);
    }
}
