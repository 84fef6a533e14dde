//! A tree-based command dispatcher: parse, execute, and suggest completions
//! for structured command grammars against a generic source type `S`.
//!
//! Build a tree with [`builder::literal`]/[`builder::argument`], register it
//! with a [`command_dispatcher::CommandDispatcher`], then [`parse`][cd] and
//! [`execute`][ce] input strings against it.
//!
//! [cd]: command_dispatcher::CommandDispatcher::parse
//! [ce]: command_dispatcher::CommandDispatcher::execute

pub mod ambiguity;
pub mod arguments;
pub mod builder;
pub mod command_dispatcher;
pub mod context;
pub mod errors;
pub mod modifier;
pub mod prelude;
pub mod result_consumer;
pub mod string_range;
pub mod string_reader;
pub mod suggestion;
pub mod tree;
