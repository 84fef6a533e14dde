//! The command tree: nodes, child storage, merging, and per-node parsing,
//! suggestion, and usage-text primitives.

use std::sync::Arc;

use futures::future::BoxFuture;
use indexmap::IndexMap;
use parking_lot::RwLock;

use crate::arguments::ErasedArgumentType;
use crate::context::{CommandContext, CommandContextBuilder, ParsedArgument};
use crate::errors::{BuiltInErrorKind, CommandSyntaxError, CommandTreeError};
use crate::modifier::RedirectModifier;
use crate::string_reader::StringReader;
use crate::suggestion::{Suggestions, SuggestionsBuilder};

/// A command's executable body. Returning `Err` propagates per the
/// execution error-propagation policy (swallowed and reported to the
/// result consumer only inside a forked branch).
pub type Command<S> = Arc<dyn Fn(&CommandContext<S>) -> Result<i32, CommandSyntaxError> + Send + Sync>;

/// A predicate gating whether a source may use a node.
pub type CommandRequirement<S> = Arc<dyn Fn(&S) -> bool + Send + Sync>;

pub(crate) struct ArgumentData<S> {
    pub name: String,
    pub argument_type: Arc<dyn ErasedArgumentType<S>>,
}

pub(crate) enum NodeKind<S> {
    Root,
    Literal { name: String },
    Argument(ArgumentData<S>),
}

/// One node in the command tree: a `Root`, `Literal`, or `Argument`, with
/// optional executable body, requirement, and redirect/fork wiring.
///
/// Children are kept in two views over the same entries: `children`
/// (insertion-order dictionary, the canonical store) and a `literals`/
/// `arguments` split used by [`Self::get_relevant_nodes`] to implement the
/// "literal beats argument" dispatch rule in O(1) for the literal case.
pub struct CommandNode<S> {
    kind: NodeKind<S>,
    children: IndexMap<String, Arc<RwLock<CommandNode<S>>>>,
    literals: IndexMap<String, Arc<RwLock<CommandNode<S>>>>,
    arguments: Vec<Arc<RwLock<CommandNode<S>>>>,
    pub command: Option<Command<S>>,
    pub requirement: Option<CommandRequirement<S>>,
    pub redirect: Option<Arc<RwLock<CommandNode<S>>>>,
    pub modifier: Option<RedirectModifier<S>>,
    pub forks: bool,
}

impl<S> CommandNode<S> {
    pub fn root() -> Self {
        Self {
            kind: NodeKind::Root,
            children: IndexMap::new(),
            literals: IndexMap::new(),
            arguments: Vec::new(),
            command: None,
            requirement: None,
            redirect: None,
            modifier: None,
            forks: false,
        }
    }

    pub(crate) fn literal(name: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::Literal { name: name.into() },
            ..Self::root()
        }
    }

    pub(crate) fn argument(name: impl Into<String>, argument_type: Arc<dyn ErasedArgumentType<S>>) -> Self {
        Self {
            kind: NodeKind::Argument(ArgumentData { name: name.into(), argument_type }),
            ..Self::root()
        }
    }

    pub fn name(&self) -> &str {
        match &self.kind {
            NodeKind::Root => "",
            NodeKind::Literal { name } => name,
            NodeKind::Argument(data) => &data.name,
        }
    }

    pub fn is_root(&self) -> bool {
        matches!(self.kind, NodeKind::Root)
    }

    pub fn is_literal(&self) -> bool {
        matches!(self.kind, NodeKind::Literal { .. })
    }

    pub fn is_argument(&self) -> bool {
        matches!(self.kind, NodeKind::Argument(_))
    }

    /// Short literal strings this node would accept, used only for
    /// ambiguity detection: a literal's sole example is its own spelling; an
    /// argument's examples come from its [`crate::arguments::ArgumentType`].
    pub(crate) fn examples(&self) -> Vec<String> {
        match &self.kind {
            NodeKind::Root => Vec::new(),
            NodeKind::Literal { name } => vec![name.clone()],
            NodeKind::Argument(data) => data.argument_type.examples(),
        }
    }

    pub fn children(&self) -> impl Iterator<Item = &Arc<RwLock<CommandNode<S>>>> {
        self.children.values()
    }

    pub fn child(&self, name: &str) -> Option<Arc<RwLock<CommandNode<S>>>> {
        self.children.get(name).cloned()
    }

    pub fn can_use(&self, source: &S) -> bool {
        match &self.requirement {
            Some(requirement) => requirement(source),
            None => true,
        }
    }

    pub fn usage_text(&self) -> String {
        match &self.kind {
            NodeKind::Root => String::new(),
            NodeKind::Literal { name } => name.clone(),
            NodeKind::Argument(data) => format!("<{}>", data.name),
        }
    }

    /// Registers `child` under this node, merging into an existing
    /// same-named child of the same kind rather than duplicating it.
    pub fn add_child(&mut self, child: &Arc<RwLock<CommandNode<S>>>) -> Result<(), CommandTreeError> {
        if matches!(child.read().kind, NodeKind::Root) {
            return Err(CommandTreeError::AddChildOfRoot);
        }
        if self.redirect.is_some() {
            return Err(CommandTreeError::ThenOnForwardedNode);
        }

        let name = child.read().name().to_string();
        if let Some(existing) = self.children.get(&name).cloned() {
            let kinds_match = {
                let existing_read = existing.read();
                let child_read = child.read();
                matches!(
                    (&existing_read.kind, &child_read.kind),
                    (NodeKind::Literal { .. }, NodeKind::Literal { .. })
                        | (NodeKind::Argument(_), NodeKind::Argument(_))
                )
            };
            if !kinds_match {
                return Err(CommandTreeError::NodeKindMismatch { name });
            }
            let incoming_command = child.read().command.clone();
            if incoming_command.is_some() {
                existing.write().command = incoming_command;
            }
            let grandchildren: Vec<_> = child.read().children.values().cloned().collect();
            for grandchild in &grandchildren {
                existing.write().add_child(grandchild)?;
            }
            return Ok(());
        }

        let is_literal = matches!(child.read().kind, NodeKind::Literal { .. });
        if is_literal {
            self.literals.insert(name.clone(), child.clone());
        } else {
            self.arguments.push(child.clone());
        }
        self.children.insert(name, child.clone());
        Ok(())
    }

    /// Sets this node's redirect target. Rejected if the node already has
    /// children (forwarding and children are mutually exclusive).
    pub fn set_redirect(
        &mut self,
        target: Arc<RwLock<CommandNode<S>>>,
        modifier: Option<RedirectModifier<S>>,
        forks: bool,
    ) -> Result<(), CommandTreeError> {
        if !self.children.is_empty() {
            return Err(CommandTreeError::ForwardNodeWithChildren);
        }
        self.redirect = Some(target);
        self.modifier = modifier;
        self.forks = forks;
        Ok(())
    }

    /// Literal-children shadow arguments: if the next unquoted word names a
    /// literal child, it is the *only* relevant child; otherwise every
    /// argument child is relevant, in declaration order.
    pub(crate) fn get_relevant_nodes(&self, reader: &mut StringReader) -> Vec<Arc<RwLock<CommandNode<S>>>> {
        if !self.literals.is_empty() {
            let cursor = reader.cursor();
            let word = reader.read_unquoted_string().to_string();
            reader.set_cursor(cursor);
            if let Some(literal) = self.literals.get(&word) {
                return vec![literal.clone()];
            }
        }
        self.arguments.clone()
    }

    fn parse_literal(&self, reader: &mut StringReader, name: &str) -> Result<(), CommandSyntaxError> {
        let start = reader.cursor();
        if reader.can_read_length(name.len()) {
            let end = start + name.len();
            if &reader.string()[start..end] == name {
                reader.set_cursor(end);
                if !reader.can_read() || reader.peek() == ' ' {
                    return Ok(());
                }
                reader.set_cursor(start);
            }
        }
        Err(BuiltInErrorKind::LiteralIncorrect { expected: name.to_string() }.create_with_context(reader))
    }

    /// Attempts to consume this node's token from `reader`, recording a
    /// parsed argument into `ctx` for [`NodeKind::Argument`] nodes.
    pub(crate) fn parse_with_context(
        &self,
        reader: &mut StringReader,
        ctx: &mut CommandContextBuilder<S>,
    ) -> Result<(), CommandSyntaxError> {
        match &self.kind {
            NodeKind::Root => Ok(()),
            NodeKind::Literal { name } => self.parse_literal(reader, name),
            NodeKind::Argument(data) => {
                let start = reader.cursor();
                let value = data.argument_type.parse_erased(reader)?;
                let range = crate::string_range::StringRange::between(start, reader.cursor());
                ctx.with_argument(data.name.clone(), ParsedArgument::new(range, value));
                Ok(())
            }
        }
    }

    /// Whether `input` alone (with no further trailing tokens besides a
    /// single separator) would be accepted by this node. Used only for
    /// ambiguity detection — it never mutates the tree or context.
    pub(crate) fn is_valid_input(&self, input: &str) -> bool {
        match &self.kind {
            NodeKind::Root => true,
            NodeKind::Literal { name } => {
                let mut reader = StringReader::new(input);
                self.parse_literal(&mut reader, name).is_ok()
            }
            NodeKind::Argument(data) => {
                let mut reader = StringReader::new(input);
                match data.argument_type.parse_erased(&mut reader) {
                    Ok(_) => !reader.can_read() || reader.peek() == ' ',
                    Err(_) => false,
                }
            }
        }
    }

    pub(crate) fn list_suggestions<'a>(
        &'a self,
        ctx: &'a CommandContext<S>,
        mut builder: SuggestionsBuilder,
    ) -> BoxFuture<'a, Suggestions> {
        match &self.kind {
            NodeKind::Root => Box::pin(futures::future::ready(builder.build())),
            NodeKind::Literal { name } => {
                builder.auto_suggest(name);
                Box::pin(futures::future::ready(builder.build()))
            }
            NodeKind::Argument(data) => data.argument_type.list_suggestions_erased(ctx, builder),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn literal_node(name: &str) -> Arc<RwLock<CommandNode<()>>> {
        Arc::new(RwLock::new(CommandNode::literal(name)))
    }

    #[test]
    fn add_child_rejects_root() {
        let mut root = CommandNode::<()>::root();
        let other_root = Arc::new(RwLock::new(CommandNode::root()));
        assert_eq!(root.add_child(&other_root).unwrap_err(), CommandTreeError::AddChildOfRoot);
    }

    #[test]
    fn add_child_merges_same_named_literal() {
        let mut root = CommandNode::<()>::root();
        root.add_child(&literal_node("foo")).unwrap();
        root.add_child(&literal_node("foo")).unwrap();
        assert_eq!(root.children().count(), 1);
    }

    #[test]
    fn add_child_rejects_kind_mismatch() {
        let mut root = CommandNode::<()>::root();
        root.add_child(&literal_node("foo")).unwrap();
        let arg = Arc::new(RwLock::new(CommandNode::<()>::argument(
            "foo",
            Arc::new(crate::arguments::bool_arg()),
        )));
        assert!(matches!(
            root.add_child(&arg).unwrap_err(),
            CommandTreeError::NodeKindMismatch { .. }
        ));
    }

    #[test]
    fn redirect_rejected_when_node_has_children() {
        let mut node = CommandNode::<()>::literal("foo");
        node.add_child(&literal_node("bar")).unwrap();
        let target = Arc::new(RwLock::new(CommandNode::root()));
        assert_eq!(
            node.set_redirect(target, None, false).unwrap_err(),
            CommandTreeError::ForwardNodeWithChildren
        );
    }

    #[test]
    fn get_relevant_nodes_prefers_matching_literal() {
        let mut root = CommandNode::<()>::root();
        root.add_child(&literal_node("foo")).unwrap();
        root.add_child(&literal_node("bar")).unwrap();
        let mut reader = StringReader::new("foo rest");
        let relevant = root.get_relevant_nodes(&mut reader);
        assert_eq!(relevant.len(), 1);
        assert_eq!(relevant[0].read().name(), "foo");
        assert_eq!(reader.cursor(), 0);
    }
}
