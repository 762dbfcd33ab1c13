use std::fmt::{self, Display};

use indexmap::IndexSet;
use winnow::{
    combinator::alt,
    token::{any, take_while},
    PResult, Parser,
};

use crate::{
    ast::{
        BinaryOperator, ExpressionTree, Node, NodeArena, NodeId, Operator, UnaryOperator, Variable,
    },
    error::ParseError,
    explanation::Explain,
    normalize::{is_identifier_char, normalize},
};

pub const DEFAULT_MAX_VARIABLES: usize = 10;

/// Knobs for [`parse_expression`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Upper bound on distinct variables. Tautology checking and truth tables are
    /// exponential in this number.
    pub max_variables: usize,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_variables(mut self, max_variables: usize) -> Self {
        self.max_variables = max_variables;

        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_variables: DEFAULT_MAX_VARIABLES,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Identifier(&'a str),
    Unary(UnaryOperator),
    Binary(BinaryOperator),
    OpenBracket,
    CloseBracket,
    Separator,
}

impl Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Identifier(name) => write!(f, "variable `{name}`"),
            Token::Unary(operator) => write!(f, "unary operator `{operator}`"),
            Token::Binary(operator) => write!(f, "binary operator `{operator}`"),
            Token::OpenBracket => write!(f, "open bracket"),
            Token::CloseBracket => write!(f, "close bracket"),
            Token::Separator => write!(f, "separator"),
        }
    }
}

fn next_token<'a>(input: &mut &'a str) -> PResult<Token<'a>> {
    alt((
        take_while(1.., is_identifier_char).map(Token::Identifier),
        any.verify_map(UnaryOperator::from_symbol).map(Token::Unary),
        any.verify_map(BinaryOperator::from_symbol).map(Token::Binary),
        '('.value(Token::OpenBracket),
        ')'.value(Token::CloseBracket),
        take_while(1.., char::is_whitespace).value(Token::Separator),
    ))
    .parse_next(input)
}

/// Parses `input` in a single left-to-right pass.
///
/// Binary operators have no precedence: `a^b|c` groups as `(a^b)|c`. Brackets are
/// the only way to change the grouping.
pub fn parse_expression(
    input: &str,
    options: ParseOptions,
    explanation: &mut impl Explain,
) -> Result<ExpressionTree, ParseError> {
    let expression = normalize(input);
    explanation.step(|| format!("Normalized \"{input}\" to \"{expression}\""));

    let mut builder = TreeBuilder::new(options);
    let mut remainder = expression.as_str();

    while !remainder.is_empty() {
        let before = remainder;

        let Ok(token) = next_token(&mut remainder) else {
            log::debug!("Unrecognized symbol at offset {}", expression.len() - before.len());

            return Err(ParseError::UnrecognizedSymbol {
                remainder: before.to_owned(),
            });
        };

        log::trace!("Read {token} at offset {}", expression.len() - before.len());

        explanation.with_subexplanation(
            || format!("Reading {token} at the beginning of \"{before}\""),
            |explanation| builder.push(token, explanation),
        )?;
    }

    let tree = builder.finish(expression)?;

    log::debug!(
        "Parsed \"{}\" into {} nodes over {} variables",
        tree.expression(),
        tree.node_count(),
        tree.variables().len()
    );
    explanation.step(|| format!("Result: {tree}"));

    Ok(tree)
}

/// Scan state: the node under construction and the parents waiting behind each
/// open bracket (`None` when the bracket opened a fresh expression).
struct TreeBuilder {
    arena: NodeArena,
    variables: IndexSet<Variable>,
    max_variables: usize,
    current: Option<NodeId>,
    open_parents: Vec<Option<NodeId>>,
}

impl TreeBuilder {
    fn new(options: ParseOptions) -> Self {
        Self {
            arena: NodeArena::default(),
            variables: IndexSet::new(),
            max_variables: options.max_variables,
            current: None,
            open_parents: Vec::new(),
        }
    }

    fn push(&mut self, token: Token, explanation: &mut impl Explain) -> Result<(), ParseError> {
        match token {
            Token::Identifier(name) => self.variable(name, explanation),
            Token::Unary(operator) => self.unary(operator, explanation),
            Token::Binary(operator) => self.binary(operator, explanation),
            Token::OpenBracket => self.open_bracket(explanation),
            Token::CloseBracket => self.close_bracket(explanation),
            Token::Separator => Ok(()),
        }
    }

    /// The operator of `id`, if it is still waiting for an operand.
    fn pending_operator(&self, id: NodeId) -> Option<Operator> {
        let node = self.arena.get(id);

        node.is_awaiting_operand()
            .then(|| node.operator())
            .flatten()
    }

    fn describe(&self, id: NodeId) -> String {
        match self.arena.get(id) {
            Node::Variable(index) => self
                .variables
                .get_index(*index)
                .map(|variable| variable.to_string())
                .unwrap_or_default(),
            node => node
                .operator()
                .map(|operator| operator.to_string())
                .unwrap_or_default(),
        }
    }

    fn register_variable(&mut self, name: &str) -> Result<usize, ParseError> {
        let (index, _) = self.variables.insert_full(Variable::from(name));

        if self.variables.len() > self.max_variables {
            return Err(ParseError::TooManyVariables {
                max: self.max_variables,
            });
        }

        Ok(index)
    }

    /// Once a unary operator receives its operand it is done; walk up through any
    /// chain of such operators to the node that still matters.
    fn climb_completed_unary(&self, mut id: NodeId) -> NodeId {
        loop {
            let node = self.arena.get(id);

            match self.arena.parent(id) {
                Some(parent) if node.is_unary() && !node.is_awaiting_operand() => id = parent,
                _ => return id,
            }
        }
    }

    fn variable(&mut self, name: &str, explanation: &mut impl Explain) -> Result<(), ParseError> {
        let index = self.register_variable(name)?;

        match self.current {
            Some(parent) if self.pending_operator(parent).is_none() => {
                Err(ParseError::MalformedOperandPlacement {
                    operand: name.to_owned(),
                })
            }
            Some(parent) => {
                let leaf = self.arena.push(Node::Variable(index), None);
                self.arena.attach(parent, leaf);

                let current = self.climb_completed_unary(parent);
                self.current = Some(current);

                explanation.step(|| {
                    format!(
                        "`{name}` is an operand of `{}`, continuing from `{}`",
                        self.describe(parent),
                        self.describe(current)
                    )
                });

                Ok(())
            }
            None => {
                self.current = Some(self.arena.push(Node::Variable(index), None));

                explanation.step(|| format!("`{name}` starts a new expression"));

                Ok(())
            }
        }
    }

    fn unary(
        &mut self,
        operator: UnaryOperator,
        explanation: &mut impl Explain,
    ) -> Result<(), ParseError> {
        if let Some(parent) = self.current {
            if self.pending_operator(parent).is_none() {
                return Err(ParseError::MalformedUnaryPlacement);
            }
        }

        let node = self.arena.push(Node::unary(operator), None);

        if let Some(parent) = self.current {
            self.arena.attach(parent, node);

            explanation.step(|| {
                format!(
                    "`{operator}` is an operand of `{}`",
                    self.describe(parent)
                )
            });
        } else {
            explanation.step(|| format!("`{operator}` starts a new expression"));
        }

        self.current = Some(node);

        Ok(())
    }

    fn binary(
        &mut self,
        operator: BinaryOperator,
        explanation: &mut impl Explain,
    ) -> Result<(), ParseError> {
        let Some(left) = self.current else {
            return Err(ParseError::BinaryOperatorAtStart { operator });
        };

        if let Some(pending) = self.pending_operator(left) {
            return Err(ParseError::OperatorWithoutOperand { operator: pending });
        }

        // A complete operand is always the top of what has been built so far.
        debug_assert!(self.arena.parent(left).is_none());

        let node = self.arena.push(Node::binary(operator, left), None);
        self.arena.set_parent(left, node);
        self.current = Some(node);

        explanation.step(|| {
            format!(
                "`{operator}` takes `{}` as its left operand",
                self.describe(left)
            )
        });

        Ok(())
    }

    fn open_bracket(&mut self, explanation: &mut impl Explain) -> Result<(), ParseError> {
        if let Some(id) = self.current {
            if self.pending_operator(id).is_none() {
                return Err(ParseError::MalformedOperandPlacement {
                    operand: "(".to_owned(),
                });
            }
        }

        let parent = self.current.take();
        self.open_parents.push(parent);

        explanation.step(|| match parent {
            Some(parent) => format!(
                "`{}` waits for the bracketed expression",
                self.describe(parent)
            ),
            None => "The bracket opens a new expression".to_owned(),
        });

        Ok(())
    }

    fn close_bracket(&mut self, explanation: &mut impl Explain) -> Result<(), ParseError> {
        let Some(enclosing) = self.open_parents.pop() else {
            return Err(ParseError::UnbalancedCloseBracket);
        };

        let Some(inner) = self.current else {
            return Err(ParseError::EmptyBrackets);
        };

        if let Some(operator) = self.pending_operator(inner) {
            return Err(ParseError::OperatorWithoutOperand { operator });
        }

        if let Some(parent) = enclosing {
            self.arena.attach(parent, inner);
            self.current = Some(self.climb_completed_unary(parent));

            explanation.step(|| {
                format!(
                    "The bracketed `{}` is an operand of `{}`",
                    self.describe(inner),
                    self.describe(parent)
                )
            });
        } else {
            explanation.step(|| {
                format!(
                    "The bracketed `{}` stands on its own",
                    self.describe(inner)
                )
            });
        }

        Ok(())
    }

    fn finish(self, expression: String) -> Result<ExpressionTree, ParseError> {
        if !self.open_parents.is_empty() {
            return Err(ParseError::UnbalancedOpenBracket {
                unclosed: self.open_parents.len(),
            });
        }

        let Some(mut root) = self.current else {
            return Err(ParseError::EmptyExpression);
        };

        match self.arena.get(root) {
            Node::Binary { operator, children } if children.len() < 2 => {
                return Err(ParseError::IncompleteBinaryOperator {
                    operator: *operator,
                });
            }
            Node::Unary { children, .. } if children.is_empty() => {
                return Err(ParseError::IncompleteUnaryOperator);
            }
            _ => {}
        }

        while let Some(parent) = self.arena.parent(root) {
            root = parent;
        }

        Ok(ExpressionTree {
            expression,
            variables: self.variables,
            arena: self.arena,
            root,
        })
    }
}
