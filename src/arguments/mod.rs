//! The typed-argument system: a small capability set (parse, suggest,
//! name, examples) every argument value type implements, plus the built-in
//! family of types from `spec.md` §4.2.

mod bool_arg;
mod char_arg;
mod enum_arg;
mod numeric;
mod string_arg;

pub use bool_arg::{bool_arg, BoolArgumentType};
pub use char_arg::CharArgumentType;
pub use enum_arg::EnumArgumentType;
pub use numeric::{double, float, integer, long, DoubleArgumentType, FloatArgumentType,
    IntegerArgumentType, LongArgumentType, NumberArgumentType};
pub use string_arg::{greedy_string, string, word, StringArgKind, StringArgumentType};

use std::any::Any;
use std::sync::Arc;

use futures::future::BoxFuture;

use crate::context::CommandContext;
use crate::errors::CommandSyntaxError;
use crate::string_reader::StringReader;
use crate::suggestion::{Suggestions, SuggestionsBuilder};

/// A typed argument value parser. Implementors provide:
/// - `parse`: consume the reader and produce a `Value`.
/// - `list_suggestions`: propose completions for the partial input captured
///   in `builder` (defaults to proposing nothing).
/// - `type_name`/`examples`: used in usage text and ambiguity detection.
pub trait ArgumentType<S>: Send + Sync + 'static {
    type Value: Send + Sync + 'static;

    fn parse(&self, reader: &mut StringReader) -> Result<Self::Value, CommandSyntaxError>;

    fn list_suggestions<'a>(
        &'a self,
        _ctx: &'a CommandContext<S>,
        builder: SuggestionsBuilder,
    ) -> BoxFuture<'a, Suggestions> {
        Box::pin(futures::future::ready(builder.build()))
    }

    fn type_name(&self) -> &'static str;

    /// Short literal strings used only for ambiguity detection (`spec.md`
    /// §4.8), never shown to users.
    fn examples(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Type-erased view of an [`ArgumentType`], used so a [`crate::tree::CommandNode`]
/// can hold arbitrary argument value types behind one concrete field.
pub(crate) trait ErasedArgumentType<S>: Send + Sync {
    fn parse_erased(
        &self,
        reader: &mut StringReader,
    ) -> Result<Arc<dyn Any + Send + Sync>, CommandSyntaxError>;

    fn list_suggestions_erased<'a>(
        &'a self,
        ctx: &'a CommandContext<S>,
        builder: SuggestionsBuilder,
    ) -> BoxFuture<'a, Suggestions>;

    fn type_name(&self) -> &'static str;

    fn examples(&self) -> Vec<String>;
}

impl<S, A> ErasedArgumentType<S> for A
where
    A: ArgumentType<S>,
{
    fn parse_erased(
        &self,
        reader: &mut StringReader,
    ) -> Result<Arc<dyn Any + Send + Sync>, CommandSyntaxError> {
        let value = self.parse(reader)?;
        Ok(Arc::new(value))
    }

    fn list_suggestions_erased<'a>(
        &'a self,
        ctx: &'a CommandContext<S>,
        builder: SuggestionsBuilder,
    ) -> BoxFuture<'a, Suggestions> {
        self.list_suggestions(ctx, builder)
    }

    fn type_name(&self) -> &'static str {
        ArgumentType::type_name(self)
    }

    fn examples(&self) -> Vec<String> {
        ArgumentType::examples(self)
    }
}
