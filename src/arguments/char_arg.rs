use crate::errors::{BuiltInErrorKind, CommandSyntaxError};
use crate::string_reader::StringReader;

use super::ArgumentType;

/// A single character, consumed unconditionally (no quoting, no escapes).
#[derive(Debug, Clone, Copy, Default)]
pub struct CharArgumentType;

impl<S: Send + Sync + 'static> ArgumentType<S> for CharArgumentType {
    type Value = char;

    fn parse(&self, reader: &mut StringReader) -> Result<char, CommandSyntaxError> {
        if !reader.can_read() {
            return Err(BuiltInErrorKind::ReaderExpectedValue.create_with_context(reader));
        }
        Ok(reader.read())
    }

    fn type_name(&self) -> &'static str {
        "char"
    }

    fn examples(&self) -> Vec<String> {
        vec!["c".into(), "1".into()]
    }
}
