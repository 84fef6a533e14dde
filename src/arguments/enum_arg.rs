use futures::future::BoxFuture;

use crate::context::CommandContext;
use crate::errors::{BuiltInErrorKind, CommandSyntaxError};
use crate::string_reader::StringReader;
use crate::suggestion::{Suggestions, SuggestionsBuilder};

use super::ArgumentType;

/// A closed set of string-valued variants, matched exactly (case-sensitive)
/// against a quoted-or-unquoted string read the same way [`super::string`]
/// reads one.
#[derive(Debug, Clone)]
pub struct EnumArgumentType<T> {
    variants: Vec<T>,
}

impl<T: AsRef<str> + Clone> EnumArgumentType<T> {
    pub fn new(variants: impl IntoIterator<Item = T>) -> Self {
        Self { variants: variants.into_iter().collect() }
    }
}

impl<S, T> ArgumentType<S> for EnumArgumentType<T>
where
    S: Send + Sync + 'static,
    T: AsRef<str> + Clone + Send + Sync + 'static,
{
    type Value = T;

    fn parse(&self, reader: &mut StringReader) -> Result<T, CommandSyntaxError> {
        let start = reader.cursor();
        let value = reader.read_string()?;
        if let Some(found) = self.variants.iter().find(|v| v.as_ref() == value) {
            Ok(found.clone())
        } else {
            reader.set_cursor(start);
            Err(BuiltInErrorKind::ReaderInvalidValue { value }.create_with_context(reader))
        }
    }

    fn list_suggestions<'a>(
        &'a self,
        _ctx: &'a CommandContext<S>,
        mut builder: SuggestionsBuilder,
    ) -> BoxFuture<'a, Suggestions> {
        for variant in &self.variants {
            builder.auto_suggest(variant.as_ref());
        }
        Box::pin(futures::future::ready(builder.build()))
    }

    fn type_name(&self) -> &'static str {
        "enum"
    }

    fn examples(&self) -> Vec<String> {
        self.variants.iter().map(|v| v.as_ref().to_string()).collect()
    }
}
