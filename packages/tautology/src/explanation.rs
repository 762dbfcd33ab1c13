use std::fmt::Display;

use enum_as_inner::EnumAsInner;
use termtree::Tree;

/// Sink for human-readable steps. Steps are passed as closures so that
/// [`DiscardedExplanation`] never pays for formatting.
pub trait Explain {
    fn step(&mut self, step: impl FnOnce() -> String);

    fn with_subexplanation<T>(
        &mut self,
        description: impl FnOnce() -> String,
        function: impl FnOnce(&mut Self) -> T,
    ) -> T;
}

#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, EnumAsInner)]
enum ExplanationComponent {
    Step(String),
    Explanation(Explanation),
}

#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Explanation {
    description: String,
    components: Vec<ExplanationComponent>,
}

impl Explanation {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            components: Vec::new(),
        }
    }

    pub fn subexplanation(&mut self, description: impl Into<String>) -> &mut Self {
        self.components
            .push(ExplanationComponent::Explanation(Explanation::new(
                description,
            )));

        match self.components.last_mut().and_then(|c| c.as_explanation_mut()) {
            Some(explanation) => explanation,
            None => unreachable!("a subexplanation was just pushed"),
        }
    }

    /// Every step recorded so far, depth first, without the nesting.
    pub fn steps(&self) -> Vec<&str> {
        self.components
            .iter()
            .flat_map(|component| match component {
                ExplanationComponent::Step(step) => vec![step.as_str()],
                ExplanationComponent::Explanation(explanation) => explanation.steps(),
            })
            .collect()
    }

    pub fn get_tree(&self) -> Tree<String> {
        let leaves = self.components.iter().map(|component| match component {
            ExplanationComponent::Step(step) => Tree::new(step.clone()),
            ExplanationComponent::Explanation(explanation) => explanation.get_tree(),
        });

        Tree::new(self.description.clone()).with_leaves(leaves)
    }
}

impl Explain for Explanation {
    fn step(&mut self, step: impl FnOnce() -> String) {
        let step = ExplanationComponent::Step(step());

        if self.components.last() != Some(&step) {
            self.components.push(step);
        }
    }

    fn with_subexplanation<T>(
        &mut self,
        description: impl FnOnce() -> String,
        function: impl FnOnce(&mut Self) -> T,
    ) -> T {
        let explanation = self.subexplanation(description());
        function(explanation)
    }
}

impl Display for Explanation {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.get_tree())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DiscardedExplanation;

impl Explain for DiscardedExplanation {
    fn step(&mut self, _step: impl FnOnce() -> String) {}

    fn with_subexplanation<T>(
        &mut self,
        _description: impl FnOnce() -> String,
        function: impl FnOnce(&mut Self) -> T,
    ) -> T {
        function(self)
    }
}
