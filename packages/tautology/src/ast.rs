use std::{fmt, str::FromStr};

use derive_more::derive::{Display, From};
use enum_as_inner::EnumAsInner;
use indexmap::IndexSet;
use strum::{EnumIter, IntoEnumIterator};
use termtree::Tree;

use crate::{
    error::ParseError,
    explanation::DiscardedExplanation,
    parser::{parse_expression, ParseOptions},
};

#[derive(Debug, Display, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Variable(pub String);

impl From<&str> for Variable {
    fn from(name: &str) -> Self {
        Variable(name.to_owned())
    }
}

impl From<String> for Variable {
    fn from(name: String) -> Self {
        Variable(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum UnaryOperator {
    Negation,
}

impl UnaryOperator {
    pub fn symbol(self) -> char {
        match self {
            UnaryOperator::Negation => '!',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        Self::iter().find(|operator| operator.symbol() == symbol)
    }

    pub fn apply(self, value: bool) -> bool {
        match self {
            UnaryOperator::Negation => !value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum BinaryOperator {
    Equivalence,
    Inequivalence,
    Implication,
    Conjunction,
    Disjunction,
}

impl BinaryOperator {
    pub fn symbol(self) -> char {
        match self {
            BinaryOperator::Equivalence => '=',
            BinaryOperator::Inequivalence => '~',
            BinaryOperator::Implication => '>',
            BinaryOperator::Conjunction => '^',
            BinaryOperator::Disjunction => '|',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        Self::iter().find(|operator| operator.symbol() == symbol)
    }

    pub fn apply(self, left: bool, right: bool) -> bool {
        match self {
            BinaryOperator::Equivalence => left == right,
            BinaryOperator::Inequivalence => left != right,
            BinaryOperator::Implication => !left || right,
            BinaryOperator::Conjunction => left && right,
            BinaryOperator::Disjunction => left || right,
        }
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Either kind of connective, used where the arity does not matter (mostly diagnostics).
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, From)]
pub enum Operator {
    Unary(UnaryOperator),
    Binary(BinaryOperator),
}

/// Index of a node inside the arena of its [`ExpressionTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone, PartialEq, Eq, EnumAsInner)]
pub enum Node {
    /// Position of the variable in [`ExpressionTree::variables`].
    Variable(usize),
    Unary {
        operator: UnaryOperator,
        children: Vec<NodeId>,
    },
    Binary {
        operator: BinaryOperator,
        children: Vec<NodeId>,
    },
}

impl Node {
    pub fn unary(operator: UnaryOperator) -> Self {
        Node::Unary {
            operator,
            children: Vec::with_capacity(1),
        }
    }

    pub fn binary(operator: BinaryOperator, left: NodeId) -> Self {
        let mut children = Vec::with_capacity(2);
        children.push(left);

        Node::Binary { operator, children }
    }

    pub fn is_operator(&self) -> bool {
        !self.is_variable()
    }

    pub fn operator(&self) -> Option<Operator> {
        match self {
            Node::Variable(_) => None,
            Node::Unary { operator, .. } => Some((*operator).into()),
            Node::Binary { operator, .. } => Some((*operator).into()),
        }
    }

    pub fn arity(&self) -> usize {
        match self {
            Node::Variable(_) => 0,
            Node::Unary { .. } => 1,
            Node::Binary { .. } => 2,
        }
    }

    pub fn children(&self) -> &[NodeId] {
        match self {
            Node::Variable(_) => &[],
            Node::Unary { children, .. } | Node::Binary { children, .. } => children,
        }
    }

    /// An operator that has not yet received all of its operands.
    pub fn is_awaiting_operand(&self) -> bool {
        self.children().len() < self.arity()
    }
}

/// Flat storage for the nodes of a tree. Children are owned top-down through
/// [`NodeId`]s; the parent links are navigational only.
#[derive(Debug, Clone, Default)]
pub(crate) struct NodeArena {
    nodes: Vec<Node>,
    parents: Vec<Option<NodeId>>,
}

impl NodeArena {
    pub fn push(&mut self, node: Node, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());

        self.nodes.push(node);
        self.parents.push(parent);

        id
    }

    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parents[id.0]
    }

    pub fn set_parent(&mut self, child: NodeId, parent: NodeId) {
        self.parents[child.0] = Some(parent);
    }

    /// Appends `child` as the next operand of `parent`.
    pub fn attach(&mut self, parent: NodeId, child: NodeId) {
        debug_assert!(self.get(parent).is_awaiting_operand());

        match &mut self.nodes[parent.0] {
            Node::Unary { children, .. } | Node::Binary { children, .. } => children.push(child),
            Node::Variable(_) => return,
        }

        self.set_parent(child, parent);
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }
}

/// A fully parsed propositional expression.
///
/// Trees only come out of [`parse_expression`] (or the constructors below, which
/// wrap it) and are never mutated afterwards.
#[derive(Debug, Clone)]
pub struct ExpressionTree {
    pub(crate) expression: String,
    pub(crate) variables: IndexSet<Variable>,
    pub(crate) arena: NodeArena,
    pub(crate) root: NodeId,
}

impl ExpressionTree {
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        Self::parse_with(input, ParseOptions::default())
    }

    pub fn parse_with(input: &str, options: ParseOptions) -> Result<Self, ParseError> {
        parse_expression(input, options, &mut DiscardedExplanation)
    }

    /// The normalized expression the tree was parsed from.
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Distinct variables, in order of first appearance.
    pub fn variables(&self) -> &IndexSet<Variable> {
        &self.variables
    }

    pub fn root(&self) -> NodeRef<'_> {
        NodeRef {
            tree: self,
            id: self.root,
        }
    }

    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_>> {
        (id.0 < self.arena.len()).then_some(NodeRef { tree: self, id })
    }

    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    pub fn get_tree(&self) -> Tree<String> {
        self.root().get_tree()
    }
}

impl FromStr for ExpressionTree {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ExpressionTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.root())
    }
}

/// Trees compare by shape, operators and variable names; arena layout is irrelevant.
impl PartialEq for ExpressionTree {
    fn eq(&self, other: &Self) -> bool {
        self.root() == other.root()
    }
}

impl Eq for ExpressionTree {}

/// A borrowed view of one node and the subtree below it.
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    tree: &'a ExpressionTree,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn node(&self) -> &'a Node {
        self.tree.arena.get(self.id)
    }

    pub fn parent(&self) -> Option<NodeRef<'a>> {
        self.tree.arena.parent(self.id).map(|id| self.with_id(id))
    }

    pub fn children(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let tree = self.tree;

        self.node()
            .children()
            .iter()
            .map(move |&id| NodeRef { tree, id })
    }

    pub fn is_operator(&self) -> bool {
        self.node().is_operator()
    }

    /// The variable this node names, if it is a leaf.
    pub fn variable(&self) -> Option<&'a Variable> {
        self.node()
            .as_variable()
            .and_then(|&index| self.tree.variables.get_index(index))
    }

    pub fn symbol(&self) -> String {
        match self.node().operator() {
            Some(operator) => operator.to_string(),
            None => self
                .variable()
                .map(|variable| variable.0.clone())
                .unwrap_or_default(),
        }
    }

    pub fn get_tree(&self) -> Tree<String> {
        Tree::new(self.symbol()).with_leaves(self.children().map(|child| child.get_tree()))
    }

    fn with_id(&self, id: NodeId) -> NodeRef<'a> {
        NodeRef {
            tree: self.tree,
            id,
        }
    }
}

fn write_operand(f: &mut fmt::Formatter<'_>, operand: NodeRef<'_>) -> fmt::Result {
    if operand.is_operator() {
        write!(f, "({operand})")
    } else {
        write!(f, "{operand}")
    }
}

impl fmt::Display for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.node() {
            Node::Variable(_) => write!(f, "{}", self.symbol()),
            Node::Unary { operator, .. } => {
                write!(f, "{operator}")?;

                for child in self.children() {
                    write_operand(f, child)?;
                }

                Ok(())
            }
            Node::Binary { operator, .. } => {
                for (i, child) in self.children().enumerate() {
                    if i > 0 {
                        write!(f, "{operator}")?;
                    }

                    write_operand(f, child)?;
                }

                Ok(())
            }
        }
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        let same_node = match (self.node(), other.node()) {
            (Node::Variable(_), Node::Variable(_)) => self.variable() == other.variable(),
            (Node::Unary { operator: a, .. }, Node::Unary { operator: b, .. }) => a == b,
            (Node::Binary { operator: a, .. }, Node::Binary { operator: b, .. }) => a == b,
            _ => false,
        };

        same_node
            && self.node().children().len() == other.node().children().len()
            && self.children().zip(other.children()).all(|(a, b)| a == b)
    }
}

impl Eq for NodeRef<'_> {}
