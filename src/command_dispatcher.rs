//! The dispatcher: registration, parsing, execution, usage generation, and
//! completion suggestions over a [`CommandNode`] tree.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::ambiguity::{find_ambiguities, AmbiguityConsumer};
use crate::builder::ArgumentBuilder;
use crate::context::{CommandContext, CommandContextBuilder};
use crate::errors::{BuiltInErrorKind, CommandSyntaxError};
use crate::result_consumer::{DefaultResultConsumer, ResultConsumer};
use crate::string_range::StringRange;
use crate::string_reader::StringReader;
use crate::suggestion::{Suggestions, SuggestionsBuilder};
use crate::tree::CommandNode;

/// The outcome of [`CommandDispatcher::parse`]: the context accumulated so
/// far, the reader positioned just past whatever was consumed, and the
/// per-sibling errors recorded along the way (used to explain a residual
/// parse in [`CommandDispatcher::execute_parsed`]).
pub struct ParseResults<S> {
    pub context: CommandContextBuilder<S>,
    pub reader: StringReader,
    pub exceptions: Vec<(Arc<RwLock<CommandNode<S>>>, CommandSyntaxError)>,
}

/// The root of a command tree, and the engine that parses, executes, and
/// suggests completions against it.
pub struct CommandDispatcher<S> {
    pub root: Arc<RwLock<CommandNode<S>>>,
    consumer: Box<dyn ResultConsumer<S> + Send + Sync>,
}

impl<S> CommandDispatcher<S> {
    pub fn new() -> Self {
        Self {
            root: Arc::new(RwLock::new(CommandNode::root())),
            consumer: Box::new(DefaultResultConsumer),
        }
    }

    pub fn with_consumer(consumer: impl ResultConsumer<S> + Send + Sync + 'static) -> Self {
        Self {
            root: Arc::new(RwLock::new(CommandNode::root())),
            consumer: Box::new(consumer),
        }
    }

    /// Registers `node` as a child of the root, merging into an existing
    /// same-named child.
    pub fn register(&mut self, node: ArgumentBuilder<S>) -> Arc<RwLock<CommandNode<S>>> {
        let built = Arc::new(RwLock::new(node.build()));
        self.root
            .write()
            .add_child(&built)
            .unwrap_or_else(|e| panic!("invalid command tree: {e}"));
        debug!(name = built.read().name(), "registered command");
        built
    }

    pub fn parse(&self, command: impl Into<StringReader>, source: S) -> ParseResults<S> {
        let reader = command.into();
        let source = Arc::new(source);
        let context = CommandContextBuilder::new(source, self.root.clone(), reader.cursor());
        self.parse_nodes(&self.root, &reader, context)
    }

    fn parse_nodes(
        &self,
        node: &Arc<RwLock<CommandNode<S>>>,
        original_reader: &StringReader,
        context_so_far: CommandContextBuilder<S>,
    ) -> ParseResults<S> {
        let source = context_so_far.source().clone();
        let mut errors: Vec<(Arc<RwLock<CommandNode<S>>>, CommandSyntaxError)> = Vec::new();
        let mut potentials: Vec<ParseResults<S>> = Vec::new();
        let cursor = original_reader.cursor();

        let relevant = node.read().get_relevant_nodes(&mut original_reader.clone());
        for child in relevant {
            if !child.read().can_use(&source) {
                continue;
            }

            let mut context = context_so_far.clone();
            let mut reader = original_reader.clone();

            if let Err(err) = child.read().parse_with_context(&mut reader, &mut context) {
                errors.push((
                    child.clone(),
                    BuiltInErrorKind::DispatcherParseException { message: err.kind.to_string() }
                        .create_with_context(&reader),
                ));
                reader.set_cursor(cursor);
                continue;
            }
            if reader.can_read() && reader.peek() != ' ' {
                errors.push((
                    child.clone(),
                    BuiltInErrorKind::DispatcherExpectedArgumentSeparator.create_with_context(&reader),
                ));
                reader.set_cursor(cursor);
                continue;
            }

            context.with_node(child.clone(), StringRange::between(cursor, reader.cursor()));
            // Unconditional: the deepest matched node's command wins, even if it has
            // none — an intermediate ancestor's executable does not carry through.
            context.with_command(child.read().command.clone());
            context.with_redirect_modifier(child.read().modifier.clone());
            context.with_forks(child.read().forks);

            let redirect = child.read().redirect.clone();
            let can_continue = reader.can_read_length(if redirect.is_none() { 2 } else { 1 });
            if can_continue {
                reader.skip();
                if let Some(redirect) = redirect {
                    let child_context =
                        CommandContextBuilder::new(source.clone(), redirect.clone(), reader.cursor());
                    let parse = self.parse_nodes(&redirect, &reader, child_context);
                    let built_child = Rc::new(parse.context.build(parse.reader.string()));
                    context.with_child(built_child);
                    return ParseResults {
                        context,
                        reader: parse.reader,
                        exceptions: parse.exceptions,
                    };
                }
                potentials.push(self.parse_nodes(&child, &reader, context));
            } else {
                potentials.push(ParseResults { context, reader, exceptions: Vec::new() });
            }
        }

        if !potentials.is_empty() {
            if potentials.len() > 1 {
                potentials.sort_by(|a, b| {
                    if !a.reader.can_read() && b.reader.can_read() {
                        return Ordering::Less;
                    }
                    if a.reader.can_read() && !b.reader.can_read() {
                        return Ordering::Greater;
                    }
                    if a.exceptions.is_empty() && !b.exceptions.is_empty() {
                        return Ordering::Less;
                    }
                    if !a.exceptions.is_empty() && b.exceptions.is_empty() {
                        return Ordering::Greater;
                    }
                    Ordering::Equal
                });
            }
            return potentials.into_iter().next().unwrap();
        }

        ParseResults { context: context_so_far, reader: original_reader.clone(), exceptions: errors }
    }

    /// Parses and executes `input` in one step.
    pub fn execute(&self, input: impl Into<StringReader>, source: S) -> Result<i32, CommandSyntaxError> {
        let parse = self.parse(input, source);
        self.execute_parsed(parse)
    }

    /// Executes a previously parsed command.
    pub fn execute_parsed(&self, parse: ParseResults<S>) -> Result<i32, CommandSyntaxError> {
        if parse.reader.can_read() {
            return Err(if parse.exceptions.len() == 1 {
                parse.exceptions[0].1.clone()
            } else if parse.context.range().is_empty() {
                BuiltInErrorKind::DispatcherUnknownCommand.create_with_context(&parse.reader)
            } else {
                BuiltInErrorKind::DispatcherUnknownArgument.create_with_context(&parse.reader)
            });
        }

        let command_text = parse.reader.string().to_string();
        let original = Rc::new(parse.context.build(command_text.clone()));
        CommandContext::link_children(&original);

        let mut found_command = false;
        let mut result: i32 = 0;
        let mut successful_forks: i32 = 0;
        let mut forked = false;

        let mut queue: Vec<Rc<CommandContext<S>>> = vec![original.clone()];
        while !queue.is_empty() {
            let mut next: Vec<Rc<CommandContext<S>>> = Vec::new();
            for context in queue {
                if let Some(child) = context.child.clone() {
                    forked |= context.forks;
                    if child.has_nodes() {
                        found_command = true;
                    }
                    match &context.modifier {
                        None => {
                            next.push(Rc::new(child.copy_for(context.source.clone(), command_text.clone())));
                        }
                        Some(modifier) => match modifier(&context) {
                            Ok(sources) => {
                                for source in sources {
                                    next.push(Rc::new(child.copy_for(Arc::new(source), command_text.clone())));
                                }
                            }
                            Err(err) => {
                                self.consumer.on_command_complete(&context, false, 0);
                                if !forked {
                                    return Err(err);
                                }
                            }
                        },
                    }
                } else if let Some(command) = context.command.clone() {
                    found_command = true;
                    match command(&context) {
                        Ok(value) => {
                            result += value;
                            self.consumer.on_command_complete(&context, true, value);
                            successful_forks += 1;
                        }
                        Err(err) => {
                            self.consumer.on_command_complete(&context, false, 0);
                            if !forked {
                                return Err(err);
                            }
                        }
                    }
                }
            }
            queue = next;
        }

        if !found_command {
            self.consumer.on_command_complete(&original, false, 0);
            return Err(BuiltInErrorKind::DispatcherUnknownCommand.create_with_context(&parse.reader));
        }

        Ok(if forked { successful_forks } else { result })
    }

    /// BFS from the root along children (never redirects); the sequence of
    /// names from (excluding) root to (including) `target`, or empty if
    /// `target` isn't reachable.
    pub fn get_path(&self, target: &Arc<RwLock<CommandNode<S>>>) -> Vec<String> {
        let mut queue = std::collections::VecDeque::new();
        queue.push_back((self.root.clone(), Vec::new()));
        while let Some((node, path)) = queue.pop_front() {
            if Arc::ptr_eq(&node, target) {
                return path;
            }
            for child in node.read().children() {
                let mut child_path = path.clone();
                child_path.push(child.read().name().to_string());
                queue.push_back((child.clone(), child_path));
            }
        }
        Vec::new()
    }

    /// Walks named children from the root; `None` on the first missing link.
    pub fn find_node(&self, path: &[&str]) -> Option<Arc<RwLock<CommandNode<S>>>> {
        let mut node = self.root.clone();
        for name in path {
            node = node.read().child(name)?;
        }
        Some(node)
    }

    pub fn find_ambiguities(&self, consumer: &mut dyn AmbiguityConsumer<S>) {
        find_ambiguities(&self.root, consumer);
    }

    pub fn get_all_usage(&self, node: &Arc<RwLock<CommandNode<S>>>, source: &S, restricted: bool) -> Vec<String> {
        let mut result = Vec::new();
        self.get_all_usage_recursive(node, source, &mut result, "", restricted);
        result
    }

    fn get_all_usage_recursive(
        &self,
        node: &Arc<RwLock<CommandNode<S>>>,
        source: &S,
        result: &mut Vec<String>,
        prefix: &str,
        restricted: bool,
    ) {
        let node_read = node.read();
        if restricted && !node_read.can_use(source) {
            return;
        }
        if node_read.command.is_some() {
            result.push(prefix.to_owned());
        }
        if let Some(redirect) = node_read.redirect.clone() {
            let redirect_text = if Arc::ptr_eq(&redirect, &self.root) {
                "...".to_string()
            } else {
                format!("-> {}", redirect.read().usage_text())
            };
            if prefix.is_empty() {
                result.push(format!("{} {redirect_text}", node_read.usage_text()));
            } else {
                result.push(format!("{prefix} {redirect_text}"));
            }
        } else {
            let children: Vec<_> = node_read.children().cloned().collect();
            drop(node_read);
            for child in children {
                let child_prefix = {
                    let child_read = child.read();
                    if prefix.is_empty() {
                        child_read.usage_text()
                    } else {
                        format!("{prefix} {}", child_read.usage_text())
                    }
                };
                self.get_all_usage_recursive(&child, source, result, &child_prefix, restricted);
            }
        }
    }

    /// Compact usage descriptions for each usable child of `node`.
    pub fn get_smart_usage(
        &self,
        node: &Arc<RwLock<CommandNode<S>>>,
        source: &S,
    ) -> Vec<(Arc<RwLock<CommandNode<S>>>, String)> {
        let mut result = Vec::new();
        let node_read = node.read();
        let optional = node_read.command.is_some();
        let children: Vec<_> = node_read.children().cloned().collect();
        drop(node_read);
        for child in children {
            if let Some(usage) = self.get_smart_usage_recursive(&child, source, optional, false) {
                result.push((child.clone(), usage));
            }
        }
        result
    }

    fn get_smart_usage_recursive(
        &self,
        node: &Arc<RwLock<CommandNode<S>>>,
        source: &S,
        optional: bool,
        deep: bool,
    ) -> Option<String> {
        let node_read = node.read();
        if !node_read.can_use(source) {
            return None;
        }

        let this = if optional { format!("[{}]", node_read.usage_text()) } else { node_read.usage_text() };
        let child_optional = node_read.command.is_some();
        let open = if child_optional { "[" } else { "(" };
        let close = if child_optional { "]" } else { ")" };

        if deep {
            return Some(this);
        }

        if let Some(redirect) = node_read.redirect.clone() {
            let redirect_text = if Arc::ptr_eq(&redirect, &self.root) {
                "...".to_string()
            } else {
                format!("-> {}", redirect.read().usage_text())
            };
            return Some(format!("{this} {redirect_text}"));
        }

        let children: Vec<_> = node_read
            .children()
            .filter(|child| child.read().can_use(source))
            .cloned()
            .collect();
        drop(node_read);

        match children.len().cmp(&1) {
            Ordering::Less => {}
            Ordering::Equal => {
                if let Some(usage) =
                    self.get_smart_usage_recursive(&children[0], source, child_optional, child_optional)
                {
                    return Some(format!("{this} {usage}"));
                }
            }
            Ordering::Greater => {
                let mut child_usage = HashSet::new();
                for child in &children {
                    if let Some(usage) = self.get_smart_usage_recursive(child, source, child_optional, true) {
                        child_usage.insert(usage);
                    }
                }
                match child_usage.len().cmp(&1) {
                    Ordering::Less => {}
                    Ordering::Equal => {
                        let usage = child_usage.into_iter().next().unwrap();
                        let usage = if child_optional { format!("[{usage}]") } else { usage };
                        return Some(format!("{this} {usage}"));
                    }
                    Ordering::Greater => {
                        let mut builder = String::new();
                        builder.push_str(open);
                        for (i, child) in children.iter().enumerate() {
                            if i > 0 {
                                builder.push('|');
                            }
                            builder.push_str(&child.read().usage_text());
                        }
                        builder.push_str(close);
                        return Some(format!("{this} {builder}"));
                    }
                }
            }
        }

        Some(this)
    }

    /// Completion suggestions at the end of the parsed input.
    pub async fn get_completion_suggestions(&self, parse: ParseResults<S>) -> Suggestions {
        let cursor = parse.reader.total_length();
        self.get_completion_suggestions_with_cursor(parse, cursor, None).await
    }

    /// Completion suggestions at an arbitrary `cursor` position, with an
    /// optional cooperative cancellation flag checked once per sibling.
    pub async fn get_completion_suggestions_with_cursor(
        &self,
        parse: ParseResults<S>,
        cursor: usize,
        cancelled: Option<&AtomicBool>,
    ) -> Suggestions {
        let full_input = parse.reader.string().to_string();
        let context = parse.context.build(full_input.clone());

        let node_before_cursor = context.find_suggestion_context(cursor);
        let start = usize::min(node_before_cursor.start_pos, cursor);

        let truncated_input = full_input[..cursor].to_string();
        let truncated_input_lowercase = truncated_input.to_lowercase();

        let children: Vec<_> = node_before_cursor.parent.read().children().cloned().collect();

        let mut all_suggestions = Vec::new();
        for child in children {
            if cancelled.map(|flag| flag.load(AtomicOrdering::Relaxed)).unwrap_or(false) {
                break;
            }
            let builder =
                SuggestionsBuilder::new_with_lowercase(&truncated_input, &truncated_input_lowercase, start);
            let suggestions = child.read().list_suggestions(&context, builder).await;
            all_suggestions.push(suggestions);
        }

        Suggestions::merge(&full_input, &all_suggestions)
    }

    /// Synchronous convenience wrapper for hosts with no async runtime of
    /// their own.
    pub fn get_completion_suggestions_sync(&self, parse: ParseResults<S>) -> Suggestions {
        futures::executor::block_on(self.get_completion_suggestions(parse))
    }

    /// Synchronous convenience wrapper around
    /// [`Self::get_completion_suggestions_with_cursor`].
    pub fn get_completion_suggestions_with_cursor_sync(
        &self,
        parse: ParseResults<S>,
        cursor: usize,
    ) -> Suggestions {
        futures::executor::block_on(self.get_completion_suggestions_with_cursor(parse, cursor, None))
    }
}

impl<S> Default for CommandDispatcher<S> {
    fn default() -> Self {
        Self::new()
    }
}
