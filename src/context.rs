//! Parse/execute state: the mutable builder used while walking the tree,
//! the immutable context it produces, and the redirect-chain bookkeeping
//! execution walks over.

use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::errors::CommandTreeError;
use crate::modifier::RedirectModifier;
use crate::string_range::StringRange;
use crate::tree::{Command, CommandNode};

/// A single parsed argument value, type-erased behind [`Any`] so
/// `CommandContext::arguments` can hold arbitrarily-typed values in one map.
#[derive(Clone)]
pub struct ParsedArgument {
    pub range: StringRange,
    pub(crate) value: Arc<dyn Any + Send + Sync>,
}

impl ParsedArgument {
    pub fn new(range: StringRange, value: Arc<dyn Any + Send + Sync>) -> Self {
        Self { range, value }
    }
}

/// A tree node that matched, and the span of input it consumed.
pub struct ParsedCommandNode<S> {
    pub node: Arc<RwLock<CommandNode<S>>>,
    pub range: StringRange,
}

impl<S> Clone for ParsedCommandNode<S> {
    fn clone(&self) -> Self {
        Self { node: self.node.clone(), range: self.range }
    }
}

/// Where a fresh suggestion pass should resume from: the node whose
/// children should be asked for completions, and the byte offset the
/// replacement range starts at.
pub(crate) struct SuggestionContext<S> {
    pub parent: Arc<RwLock<CommandNode<S>>>,
    pub start_pos: usize,
}

/// Accumulates context state while [`crate::command_dispatcher::CommandDispatcher`]
/// walks the tree. Cloned at every branch point the parser explores, so
/// every field here must be cheap to clone (reference-counted or `Copy`).
pub struct CommandContextBuilder<S> {
    pub(crate) source: Arc<S>,
    pub(crate) root_node: Arc<RwLock<CommandNode<S>>>,
    pub(crate) nodes: Vec<ParsedCommandNode<S>>,
    pub(crate) arguments: HashMap<String, ParsedArgument>,
    pub(crate) command: Option<Command<S>>,
    pub(crate) child: Option<Rc<CommandContext<S>>>,
    pub(crate) modifier: Option<RedirectModifier<S>>,
    pub(crate) forks: bool,
    pub(crate) range: StringRange,
}

impl<S> Clone for CommandContextBuilder<S> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            root_node: self.root_node.clone(),
            nodes: self.nodes.clone(),
            arguments: self.arguments.clone(),
            command: self.command.clone(),
            child: self.child.clone(),
            modifier: self.modifier.clone(),
            forks: self.forks,
            range: self.range,
        }
    }
}

impl<S> CommandContextBuilder<S> {
    pub fn new(source: Arc<S>, root_node: Arc<RwLock<CommandNode<S>>>, start: usize) -> Self {
        Self {
            source,
            root_node,
            nodes: Vec::new(),
            arguments: HashMap::new(),
            command: None,
            child: None,
            modifier: None,
            forks: false,
            range: StringRange::at(start),
        }
    }

    pub fn source(&self) -> &Arc<S> {
        &self.source
    }

    pub fn range(&self) -> StringRange {
        self.range
    }

    pub fn has_nodes(&self) -> bool {
        !self.nodes.is_empty()
    }

    pub fn with_argument(&mut self, name: String, argument: ParsedArgument) -> &mut Self {
        self.arguments.insert(name, argument);
        self
    }

    pub fn with_command(&mut self, command: Option<Command<S>>) -> &mut Self {
        self.command = command;
        self
    }

    pub fn with_node(&mut self, node: Arc<RwLock<CommandNode<S>>>, range: StringRange) -> &mut Self {
        self.nodes.push(ParsedCommandNode { node, range });
        self.range = StringRange::encompass(self.range, range);
        self.modifier = None;
        self.forks = false;
        self
    }

    pub fn with_redirect_modifier(&mut self, modifier: Option<RedirectModifier<S>>) -> &mut Self {
        self.modifier = modifier;
        self
    }

    pub fn with_forks(&mut self, forks: bool) -> &mut Self {
        self.forks = forks;
        self
    }

    pub fn with_child(&mut self, child: Rc<CommandContext<S>>) -> &mut Self {
        self.child = Some(child);
        self
    }

    pub fn build(&self, input: impl Into<String>) -> CommandContext<S> {
        CommandContext {
            source: self.source.clone(),
            input: input.into(),
            arguments: self.arguments.clone(),
            command: self.command.clone(),
            root_node: self.root_node.clone(),
            nodes: self.nodes.clone(),
            range: self.range,
            child: self.child.clone(),
            parent: RefCell::new(Weak::new()),
            modifier: self.modifier.clone(),
            forks: self.forks,
        }
    }
}

/// The fully-built, read-mostly context handed to commands, requirements,
/// modifiers, and the result consumer.
///
/// `parent` is set only after construction (via [`Self::attach_to_parent`])
/// since it's a back-pointer to an enclosing `Rc` that can't exist until
/// this context itself has been wrapped in one; it is purely a navigation
/// aid and never consulted by parsing or execution.
pub struct CommandContext<S> {
    pub source: Arc<S>,
    pub input: String,
    pub(crate) arguments: HashMap<String, ParsedArgument>,
    pub command: Option<Command<S>>,
    pub root_node: Arc<RwLock<CommandNode<S>>>,
    pub nodes: Vec<ParsedCommandNode<S>>,
    pub range: StringRange,
    pub child: Option<Rc<CommandContext<S>>>,
    parent: RefCell<Weak<CommandContext<S>>>,
    pub modifier: Option<RedirectModifier<S>>,
    pub forks: bool,
}

impl<S> CommandContext<S> {
    pub fn has_nodes(&self) -> bool {
        !self.nodes.is_empty()
    }

    /// Retrieves a previously parsed argument by name, failing if it's
    /// absent or was parsed as a different type.
    pub fn get_argument<T: Clone + Send + Sync + 'static>(&self, name: &str) -> Result<T, CommandTreeError> {
        let parsed = self
            .arguments
            .get(name)
            .ok_or_else(|| CommandTreeError::NoSuchArgument { name: name.to_string() })?;
        parsed
            .value
            .downcast_ref::<T>()
            .cloned()
            .ok_or_else(|| CommandTreeError::ArgumentTypeMismatch { name: name.to_string() })
    }

    /// A shallow copy of this context with a different `source` and `input`,
    /// used when expanding a redirect/fork to each of the modifier's
    /// returned sources.
    pub fn copy_for(&self, source: Arc<S>, input: impl Into<String>) -> Self {
        Self {
            source,
            input: input.into(),
            arguments: self.arguments.clone(),
            command: self.command.clone(),
            root_node: self.root_node.clone(),
            nodes: self.nodes.clone(),
            range: self.range,
            child: self.child.clone(),
            parent: RefCell::new(self.parent.borrow().clone()),
            modifier: self.modifier.clone(),
            forks: self.forks,
        }
    }

    /// Points this context's parent back-link at `parent`. Called once, by
    /// whichever code wraps this context in an `Rc`.
    pub fn attach_to_parent(&self, parent: &Rc<CommandContext<S>>) {
        *self.parent.borrow_mut() = Rc::downgrade(parent);
    }

    pub fn parent(&self) -> Option<Rc<CommandContext<S>>> {
        self.parent.borrow().upgrade()
    }

    /// Walks `context`'s redirect-child chain, attaching each child's
    /// `parent` back-link to its immediate enclosing context. Called once
    /// the whole chain exists as `Rc`s, since a context can't point to its
    /// own `Rc` until after it's been wrapped in one.
    pub(crate) fn link_children(context: &Rc<CommandContext<S>>) {
        if let Some(child) = &context.child {
            child.attach_to_parent(context);
            CommandContext::link_children(child);
        }
    }

    /// Finds the node whose children should be asked for completions at
    /// `cursor`, and the byte offset the replacement should start at.
    ///
    /// If `cursor` is past this context's matched range, descends into the
    /// redirect child (if any) or resumes just past the last matched node;
    /// otherwise walks the matched nodes for the one bracketing `cursor`.
    pub(crate) fn find_suggestion_context(&self, cursor: usize) -> SuggestionContext<S> {
        if cursor > self.range.end {
            if let Some(child) = &self.child {
                return child.find_suggestion_context(cursor);
            }
            if let Some(last) = self.nodes.last() {
                return SuggestionContext { parent: last.node.clone(), start_pos: last.range.end + 1 };
            }
            return SuggestionContext { parent: self.root_node.clone(), start_pos: self.range.start };
        }

        let mut previous = self.root_node.clone();
        for node in &self.nodes {
            if node.range.start <= cursor && cursor <= node.range.end {
                return SuggestionContext { parent: previous, start_pos: node.range.start };
            }
            previous = node.node.clone();
        }
        SuggestionContext { parent: previous, start_pos: self.range.start }
    }
}
