//! Structured errors for parsing and execution.
//!
//! Syntax errors ([`CommandSyntaxError`]) are expected during normal parsing
//! and execution and always carry the position at which they occurred.
//! Misuse of the builder/context API ([`CommandTreeError`]) indicates a bug
//! in the host application and is never produced by user input.

use std::fmt;

use crate::string_reader::StringReader;

/// Number of characters of surrounding input shown by [`CommandSyntaxError`]'s
/// `Display` impl, matching the original implementation's default.
pub const DEFAULT_CONTEXT_AMOUNT: usize = 10;

/// The kind of a syntax error, independent of where it occurred.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuiltInErrorKind {
    #[error("Value must not be less than {min}, found {found}")]
    ValueTooLow { min: String, found: String },
    #[error("Value must not be more than {max}, found {found}")]
    ValueTooHigh { max: String, found: String },
    #[error("Expected literal {expected}")]
    LiteralIncorrect { expected: String },
    #[error("Expected quote to start a string")]
    ReaderExpectedStartOfQuote,
    #[error("Unclosed quoted string")]
    ReaderExpectedEndOfQuote,
    #[error("Invalid escape sequence '\\{character}' in quoted string")]
    ReaderInvalidEscape { character: char },
    #[error("Invalid value '{value}'")]
    ReaderInvalidValue { value: String },
    #[error("Expected value")]
    ReaderExpectedValue,
    #[error("Expected '{symbol}'")]
    ReaderExpectedSymbol { symbol: char },
    #[error("Expected one of `{symbols}`")]
    ReaderExpectedOneOf { symbols: String },
    #[error("Unknown command")]
    DispatcherUnknownCommand,
    #[error("Incorrect argument for command")]
    DispatcherUnknownArgument,
    #[error("Expected whitespace to end one argument, but found trailing data")]
    DispatcherExpectedArgumentSeparator,
    #[error("Could not parse command: {message}")]
    DispatcherParseException { message: String },
}

/// A syntax error produced while reading, parsing, or executing a command.
///
/// Carries a snapshot of the input and cursor position at the point of
/// failure so the caller can render a `...text<--[HERE]` style message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSyntaxError {
    pub kind: BuiltInErrorKind,
    pub input: Option<String>,
    pub cursor: usize,
}

impl CommandSyntaxError {
    pub fn new(kind: BuiltInErrorKind) -> Self {
        Self {
            kind,
            input: None,
            cursor: 0,
        }
    }

    /// Attaches a snapshot of `reader`'s string and cursor to this error.
    pub fn with_context(mut self, reader: &StringReader) -> Self {
        self.input = Some(reader.string().to_owned());
        self.cursor = reader.cursor();
        self
    }

    /// Renders the `...<context>...<--[HERE]` message using `context_amount`
    /// characters of preceding input.
    pub fn message_with_context(&self, context_amount: usize) -> String {
        let mut out = self.kind.to_string();
        if let Some(input) = &self.input {
            if !input.is_empty() {
                let cursor = self.cursor.min(input.len());
                let start = cursor.saturating_sub(context_amount);
                out.push_str(" at position ");
                out.push_str(&cursor.to_string());
                out.push_str(": ");
                if cursor > context_amount {
                    out.push_str("...");
                }
                out.push_str(&input[start..cursor]);
                out.push_str("<--[HERE]");
            }
        }
        out
    }
}

impl fmt::Display for CommandSyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message_with_context(DEFAULT_CONTEXT_AMOUNT))
    }
}

impl std::error::Error for CommandSyntaxError {}

/// Constructors for the built-in error kinds, each producing a
/// [`CommandSyntaxError`] already annotated with its failing reader's
/// context.
impl BuiltInErrorKind {
    pub fn create_with_context(self, reader: &StringReader) -> CommandSyntaxError {
        CommandSyntaxError::new(self).with_context(reader)
    }
}

/// Programmer misuse of the tree-building or context APIs. Never produced
/// by user input; always indicates a bug in the host application.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandTreeError {
    #[error("Cannot add a root node as a child of another node")]
    AddChildOfRoot,
    #[error("Node '{name}' already exists with a different kind")]
    NodeKindMismatch { name: String },
    #[error("Cannot forward a node that has children")]
    ForwardNodeWithChildren,
    #[error("Cannot add children to a forwarded node")]
    ThenOnForwardedNode,
    #[error("No such argument '{name}' for this command")]
    NoSuchArgument { name: String },
    #[error("Argument '{name}' exists but is not of the requested type")]
    ArgumentTypeMismatch { name: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_without_context_is_just_the_kind() {
        let err = CommandSyntaxError::new(BuiltInErrorKind::DispatcherUnknownCommand);
        assert_eq!(err.to_string(), "Unknown command");
    }

    #[test]
    fn message_with_context_marks_the_cursor() {
        let reader = StringReader::from_str_at("foo bar", 4);
        let err = BuiltInErrorKind::ReaderExpectedValue.create_with_context(&reader);
        assert_eq!(err.message_with_context(10), "Expected value at position 4: foo <--[HERE]");
    }

    #[test]
    fn message_with_context_truncates_long_prefixes() {
        let reader = StringReader::from_str_at("0123456789ABCDEF", 16);
        let err = BuiltInErrorKind::ReaderExpectedValue.create_with_context(&reader);
        assert_eq!(
            err.message_with_context(4),
            "Expected value at position 16: ...CDEF<--[HERE]"
        );
    }
}
