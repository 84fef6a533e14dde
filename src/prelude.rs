//! The common surface most callers need: re-exports it so `use brigadier::prelude::*;`
//! covers building, registering, and running a command tree.

pub use crate::ambiguity::{find_ambiguities, AmbiguityConsumer};
pub use crate::arguments::{
    bool_arg, double, float, greedy_string, integer, long, string, word, ArgumentType,
    BoolArgumentType, CharArgumentType, DoubleArgumentType, EnumArgumentType, FloatArgumentType,
    IntegerArgumentType, LongArgumentType, NumberArgumentType, StringArgKind, StringArgumentType,
};
pub use crate::builder::{argument, literal, ArgumentBuilder};
pub use crate::command_dispatcher::{CommandDispatcher, ParseResults};
pub use crate::context::{CommandContext, CommandContextBuilder, ParsedArgument, ParsedCommandNode};
pub use crate::errors::{BuiltInErrorKind, CommandSyntaxError, CommandTreeError};
pub use crate::modifier::{single_redirect_modifier, RedirectModifier};
pub use crate::result_consumer::{DefaultResultConsumer, ResultConsumer};
pub use crate::string_range::StringRange;
pub use crate::string_reader::StringReader;
pub use crate::suggestion::{Suggestion, Suggestions, SuggestionsBuilder};
pub use crate::tree::{Command, CommandNode, CommandRequirement};
