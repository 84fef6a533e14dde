//! Fluent construction of command-tree nodes.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::arguments::ArgumentType;
use crate::context::CommandContext;
use crate::errors::CommandSyntaxError;
use crate::modifier::RedirectModifier;
use crate::tree::{Command, CommandNode, CommandRequirement};

/// A node under construction. Build a tree bottom-up with [`literal`] and
/// [`argument`], wiring children with [`Self::then`], then hand the root(s)
/// to [`crate::command_dispatcher::CommandDispatcher::register`].
pub struct ArgumentBuilder<S> {
    node: CommandNode<S>,
}

impl<S> ArgumentBuilder<S> {
    fn from_node(node: CommandNode<S>) -> Self {
        Self { node }
    }

    /// Adds `child` as a child of this node, merging into an existing
    /// same-named child of the same kind.
    ///
    /// # Panics
    /// Panics if this node is already forwarded (a forwarded node cannot
    /// take children) or if a same-named child of a different kind already
    /// exists — both indicate a bug in the tree being built, not bad user
    /// input.
    pub fn then(mut self, child: ArgumentBuilder<S>) -> Self {
        let child_node = Arc::new(RwLock::new(child.node));
        self.node
            .add_child(&child_node)
            .unwrap_or_else(|e| panic!("invalid command tree: {e}"));
        self
    }

    pub fn executes<F>(mut self, command: F) -> Self
    where
        F: Fn(&CommandContext<S>) -> Result<i32, CommandSyntaxError> + Send + Sync + 'static,
    {
        self.node.command = Some(Arc::new(command));
        self
    }

    pub fn requires<F>(mut self, requirement: F) -> Self
    where
        F: Fn(&S) -> bool + Send + Sync + 'static,
    {
        self.node.requirement = Some(Arc::new(requirement));
        self
    }

    pub fn requirement(&self) -> Option<&CommandRequirement<S>> {
        self.node.requirement.as_ref()
    }

    /// Redirects to `target`: after matching this node, parsing/execution
    /// continues as though it had jumped straight to `target`.
    ///
    /// # Panics
    /// Panics if this node already has children.
    pub fn redirect(self, target: Arc<RwLock<CommandNode<S>>>) -> Self {
        self.forward(target, None, false)
    }

    /// Like [`Self::redirect`], but the modifier's returned sources are
    /// each executed independently, and results accumulate as a fork count
    /// rather than a single result.
    ///
    /// # Panics
    /// Panics if this node already has children.
    pub fn fork(self, target: Arc<RwLock<CommandNode<S>>>, modifier: RedirectModifier<S>) -> Self {
        self.forward(target, Some(modifier), true)
    }

    fn forward(
        mut self,
        target: Arc<RwLock<CommandNode<S>>>,
        modifier: Option<RedirectModifier<S>>,
        forks: bool,
    ) -> Self {
        self.node
            .set_redirect(target, modifier, forks)
            .unwrap_or_else(|e| panic!("invalid command tree: {e}"));
        self
    }

    pub fn build(self) -> CommandNode<S> {
        self.node
    }
}

/// Starts a new literal node matching the exact token `name`.
pub fn literal<S>(name: impl Into<String>) -> ArgumentBuilder<S> {
    ArgumentBuilder::from_node(CommandNode::literal(name))
}

/// Starts a new argument node named `name`, parsed with `argument_type`.
pub fn argument<S, A>(name: impl Into<String>, argument_type: A) -> ArgumentBuilder<S>
where
    S: Send + Sync + 'static,
    A: ArgumentType<S>,
{
    ArgumentBuilder::from_node(CommandNode::argument(name, Arc::new(argument_type)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arguments::integer;

    #[test]
    fn then_attaches_child() {
        let node = literal::<()>("foo")
            .then(literal("bar").executes(|_| Ok(1)))
            .build();
        assert_eq!(node.children().count(), 1);
    }

    #[test]
    fn argument_node_carries_type_name() {
        let node = argument::<(), _>("count", integer()).build();
        assert_eq!(node.name(), "count");
        assert_eq!(node.usage_text(), "<count>");
    }

    #[test]
    #[should_panic(expected = "invalid command tree")]
    fn then_panics_on_kind_mismatch() {
        let _ = literal::<()>("foo")
            .then(literal("x"))
            .then(argument("x", integer()));
    }
}
