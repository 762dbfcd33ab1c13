use derive_more::derive::{Display, Error};

use crate::ast::{BinaryOperator, Operator, Variable};

/// Reasons an expression can be rejected. Parsing stops at the first one.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[display("Expression is empty.")]
    EmptyExpression,

    #[display("Number of variables cannot exceed {max}.")]
    TooManyVariables { max: usize },

    /// A value (variable or bracketed sub-expression) directly follows another value.
    #[display("\"{operand}\" can only follow an operator that is missing an operand.")]
    MalformedOperandPlacement { operand: String },

    #[display("Unary operator must be bare or follow an operator that is missing an operand.")]
    MalformedUnaryPlacement,

    #[display("Expression cannot start with binary operator \"{operator}\", prefix notation is not supported.")]
    BinaryOperatorAtStart { operator: BinaryOperator },

    /// Something other than an operand arrived while `operator` was still waiting for one.
    #[display("Operator \"{operator}\" is missing an operand.")]
    OperatorWithoutOperand { operator: Operator },

    #[display("Close bracket does not match any open bracket.")]
    UnbalancedCloseBracket,

    #[display("{unclosed} bracket(s) left open at the end of the expression.")]
    UnbalancedOpenBracket { unclosed: usize },

    #[display("Brackets cannot be empty.")]
    EmptyBrackets,

    #[display("Unrecognized symbol in expression! \"{remainder}\"")]
    UnrecognizedSymbol { remainder: String },

    #[display("Binary operator \"{operator}\" did not have two operands.")]
    IncompleteBinaryOperator { operator: BinaryOperator },

    #[display("Unary operator at the end of the expression did not have an operand.")]
    IncompleteUnaryOperator,
}

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum EvaluationError {
    #[display("No value provided for variable \"{variable}\".")]
    UnboundVariable { variable: Variable },

    #[display("Expected values for {expected} variables, got {actual}.")]
    AssignmentLength { expected: usize, actual: usize },
}
