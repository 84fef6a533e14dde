use crate::errors::CommandSyntaxError;
use crate::string_reader::StringReader;

use super::ArgumentType;

/// Which of the three string-reading strategies an instance of
/// [`StringArgumentType`] uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringArgKind {
    /// A single unquoted word: `[0-9 A-Z a-z _ - . +]+`.
    Word,
    /// A quoted-or-unquoted string (quoting lets it contain whitespace).
    Phrase,
    /// Everything left on the line, verbatim.
    Greedy,
}

#[derive(Debug, Clone, Copy)]
pub struct StringArgumentType {
    kind: StringArgKind,
}

impl StringArgumentType {
    pub fn word() -> Self {
        Self { kind: StringArgKind::Word }
    }

    pub fn phrase() -> Self {
        Self { kind: StringArgKind::Phrase }
    }

    pub fn greedy() -> Self {
        Self { kind: StringArgKind::Greedy }
    }

    pub fn kind(&self) -> StringArgKind {
        self.kind
    }
}

impl<S: Send + Sync + 'static> ArgumentType<S> for StringArgumentType {
    type Value = String;

    fn parse(&self, reader: &mut StringReader) -> Result<String, CommandSyntaxError> {
        match self.kind {
            StringArgKind::Word => Ok(reader.read_unquoted_string().to_owned()),
            StringArgKind::Phrase => reader.read_string(),
            StringArgKind::Greedy => {
                let text = reader.remaining().to_owned();
                reader.set_cursor(reader.total_length());
                Ok(text)
            }
        }
    }

    fn type_name(&self) -> &'static str {
        match self.kind {
            StringArgKind::Word => "word",
            StringArgKind::Phrase => "string",
            StringArgKind::Greedy => "greedy string",
        }
    }

    fn examples(&self) -> Vec<String> {
        match self.kind {
            StringArgKind::Word => vec!["word".into(), "words_with_underscores".into()],
            StringArgKind::Phrase => {
                vec!["\"quoted phrase\"".into(), "word".into(), "\"\"".into()]
            }
            StringArgKind::Greedy => {
                vec!["word".into(), "words with spaces".into(), "\"and symbols\"".into()]
            }
        }
    }
}

pub fn word() -> StringArgumentType {
    StringArgumentType::word()
}

pub fn string() -> StringArgumentType {
    StringArgumentType::phrase()
}

pub fn greedy_string() -> StringArgumentType {
    StringArgumentType::greedy()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(arg: &StringArgumentType, input: &str) -> (String, String) {
        let mut reader = StringReader::new(input);
        let value = ArgumentType::<std::sync::Arc<()>>::parse(arg, &mut reader).unwrap();
        (value, reader.remaining().to_owned())
    }

    #[test]
    fn word_stops_at_whitespace() {
        let (value, remaining) = parse(&word(), "hello world");
        assert_eq!(value, "hello");
        assert_eq!(remaining, " world");
    }

    #[test]
    fn phrase_reads_quoted_spaces() {
        let (value, remaining) = parse(&string(), "\"hello world\" rest");
        assert_eq!(value, "hello world");
        assert_eq!(remaining, " rest");
    }

    #[test]
    fn greedy_consumes_everything() {
        let (value, remaining) = parse(&greedy_string(), "all of this, \"quotes\" included");
        assert_eq!(value, "all of this, \"quotes\" included");
        assert_eq!(remaining, "");
    }
}
