//! Parsing, evaluation and truth tables for propositional expressions written
//! with single-character connectives:
//!
//! | symbol | aliases      | meaning       |
//! |:------:|:------------:|---------------|
//! | `!`    |              | negation      |
//! | `^`    | `&`          | conjunction   |
//! | `\|`   |              | disjunction   |
//! | `>`    | `->`, `=>`   | implication   |
//! | `=`    | `<->`, `<=>` | equivalence   |
//! | `~`    |              | inequivalence |
//!
//! Binary connectives have no precedence and group left to right, so brackets
//! are the only way to nest to the right.
//!
//! ```
//! use tautology::ExpressionTree;
//!
//! let tree: ExpressionTree = "(a -> b) & a -> b".parse().unwrap();
//!
//! assert_eq!(tree.to_string(), "((a>b)^a)>b");
//! assert!(tree.is_tautology());
//! assert_eq!(tree.truth_table().rows.len(), 4);
//! ```

pub mod ast;
pub mod error;
pub mod evaluate;
pub mod explanation;
pub mod normalize;
pub mod parser;
pub mod truth_table;

pub use ast::{ExpressionTree, Variable};
pub use error::{EvaluationError, ParseError};
pub use evaluate::{Evaluate, Interpretation};
pub use parser::{parse_expression, ParseOptions, DEFAULT_MAX_VARIABLES};
pub use truth_table::{Cell, TruthTable};
