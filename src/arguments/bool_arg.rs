use futures::future::BoxFuture;

use crate::context::CommandContext;
use crate::errors::CommandSyntaxError;
use crate::string_reader::StringReader;
use crate::suggestion::{Suggestions, SuggestionsBuilder};

use super::ArgumentType;

#[derive(Debug, Clone, Copy, Default)]
pub struct BoolArgumentType;

impl<S: Send + Sync + 'static> ArgumentType<S> for BoolArgumentType {
    type Value = bool;

    fn parse(&self, reader: &mut StringReader) -> Result<bool, CommandSyntaxError> {
        reader.read_bool()
    }

    fn list_suggestions<'a>(
        &'a self,
        _ctx: &'a CommandContext<S>,
        mut builder: SuggestionsBuilder,
    ) -> BoxFuture<'a, Suggestions> {
        builder.auto_suggest("true");
        builder.auto_suggest("false");
        Box::pin(futures::future::ready(builder.build()))
    }

    fn type_name(&self) -> &'static str {
        "bool"
    }

    fn examples(&self) -> Vec<String> {
        vec!["true".into(), "false".into()]
    }
}

pub fn bool_arg() -> BoolArgumentType {
    BoolArgumentType
}
