//! A cursor over an input command string, plus the low-level tokenizers
//! (unquoted word, quoted string, numeric prefix) every argument type is
//! built on.

use num_traits::Num;

use crate::errors::{BuiltInErrorKind, CommandSyntaxError};

const SYNTAX_ESCAPE: char = '\\';
const SYNTAX_SINGLE_QUOTE: char = '\'';
const SYNTAX_DOUBLE_QUOTE: char = '"';

/// A numeric type `read_value` can parse, with the scan rules that apply to
/// it (whether `.` and leading `-` are part of its allowed-character set)
/// and the type name reported in error messages and usage text.
pub trait Numeric: Copy + PartialOrd + std::fmt::Display + Num + 'static {
    const TYPE_NAME: &'static str;
    const ALLOW_FLOAT: bool;
    const ALLOW_NEGATIVE: bool;
}

macro_rules! impl_numeric {
    ($t:ty, $name:expr, $float:expr, $neg:expr) => {
        impl Numeric for $t {
            const TYPE_NAME: &'static str = $name;
            const ALLOW_FLOAT: bool = $float;
            const ALLOW_NEGATIVE: bool = $neg;
        }
    };
}

impl_numeric!(i32, "int", false, true);
impl_numeric!(i64, "int", false, true);
impl_numeric!(u32, "uint", false, false);
impl_numeric!(u64, "uint", false, false);
impl_numeric!(f32, "float", true, true);
impl_numeric!(f64, "float", true, true);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringReader {
    string: String,
    cursor: usize,
}

impl StringReader {
    pub fn new(string: impl Into<String>) -> Self {
        Self {
            string: string.into(),
            cursor: 0,
        }
    }

    /// Constructs a reader already positioned at `cursor`. Mainly useful for
    /// tests and for re-creating the failure snapshot embedded in an error.
    pub fn from_str_at(string: impl Into<String>, cursor: usize) -> Self {
        let mut reader = Self::new(string);
        reader.set_cursor(cursor);
        reader
    }

    pub fn string(&self) -> &str {
        &self.string
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn set_cursor(&mut self, cursor: usize) {
        self.cursor = cursor;
    }

    pub fn total_length(&self) -> usize {
        self.string.len()
    }

    pub fn remaining_length(&self) -> usize {
        self.string.len() - self.cursor
    }

    pub fn read_part(&self) -> &str {
        &self.string[..self.cursor]
    }

    pub fn remaining(&self) -> &str {
        &self.string[self.cursor..]
    }

    /// Whether `length` more characters can be read from the cursor.
    pub fn can_read_length(&self, length: usize) -> bool {
        self.remaining().chars().take(length).count() == length
    }

    pub fn can_read(&self) -> bool {
        self.can_read_length(1)
    }

    pub fn peek(&self) -> char {
        self.peek_at(0)
    }

    pub fn peek_at(&self, offset: usize) -> char {
        self.remaining()
            .chars()
            .nth(offset)
            .expect("peek past end of input")
    }

    pub fn read(&mut self) -> char {
        let c = self.peek();
        self.cursor += c.len_utf8();
        c
    }

    pub fn skip(&mut self) {
        let c = self.peek();
        self.cursor += c.len_utf8();
    }

    pub fn skip_whitespace(&mut self) {
        while self.can_read() && self.peek().is_whitespace() {
            self.skip();
        }
    }

    pub fn is_allowed_in_unquoted_string(c: char) -> bool {
        c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '+')
    }

    pub fn is_quoted_string_start(c: char) -> bool {
        c == SYNTAX_DOUBLE_QUOTE || c == SYNTAX_SINGLE_QUOTE
    }

    pub fn is_allowed_number(c: char, allow_float: bool, allow_negative: bool) -> bool {
        c.is_ascii_digit() || (allow_float && c == '.') || (allow_negative && c == '-')
    }

    /// The maximal run of `[0-9 A-Z a-z _ - . +]`, possibly empty.
    pub fn read_unquoted_string(&mut self) -> &str {
        let start = self.cursor;
        while self.can_read() && Self::is_allowed_in_unquoted_string(self.peek()) {
            self.skip();
        }
        &self.string[start..self.cursor]
    }

    /// Reads until `terminator` (consuming it), honoring `\\` as the escape
    /// character; the only legal escapes inside the body are `\\terminator`
    /// and `\\\\`.
    pub fn read_string_until(&mut self, terminator: char) -> Result<String, CommandSyntaxError> {
        self.read_string_until_one_of(&[terminator])
    }

    pub fn read_string_until_one_of(
        &mut self,
        terminators: &[char],
    ) -> Result<String, CommandSyntaxError> {
        let mut result = String::new();
        let mut escaped = false;
        while self.can_read() {
            let c = self.read();
            if escaped {
                if c == SYNTAX_ESCAPE || terminators.contains(&c) {
                    result.push(c);
                    escaped = false;
                } else {
                    self.cursor -= c.len_utf8();
                    return Err(BuiltInErrorKind::ReaderInvalidEscape { character: c }
                        .create_with_context(self));
                }
            } else if c == SYNTAX_ESCAPE {
                escaped = true;
            } else if terminators.contains(&c) {
                return Ok(result);
            } else {
                result.push(c);
            }
        }
        Err(BuiltInErrorKind::ReaderExpectedEndOfQuote.create_with_context(self))
    }

    pub fn read_quoted_string(&mut self) -> Result<String, CommandSyntaxError> {
        if !self.can_read() {
            return Ok(String::new());
        }
        let next = self.peek();
        if !Self::is_quoted_string_start(next) {
            return Err(BuiltInErrorKind::ReaderExpectedStartOfQuote.create_with_context(self));
        }
        self.skip();
        self.read_string_until(next)
    }

    /// Quoted-or-unquoted: if the next character starts a quote, behaves as
    /// [`Self::read_quoted_string`]; otherwise reads an unquoted word
    /// (possibly empty).
    pub fn read_string(&mut self) -> Result<String, CommandSyntaxError> {
        if !self.can_read() {
            return Ok(String::new());
        }
        let next = self.peek();
        if Self::is_quoted_string_start(next) {
            self.skip();
            self.read_string_until(next)
        } else {
            Ok(self.read_unquoted_string().to_owned())
        }
    }

    pub fn read_bool(&mut self) -> Result<bool, CommandSyntaxError> {
        let start = self.cursor;
        let value = self.read_string()?;
        if value.is_empty() {
            self.cursor = start;
            return Err(BuiltInErrorKind::ReaderExpectedValue.create_with_context(self));
        }
        match value.as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => {
                self.cursor = start;
                Err(BuiltInErrorKind::ReaderInvalidValue { value }.create_with_context(self))
            }
        }
    }

    /// Reads the maximal numeric prefix allowed for `T` and parses it.
    /// Restores the cursor to the start on failure.
    pub fn read_value<T: Numeric>(&mut self) -> Result<T, CommandSyntaxError> {
        let start = self.cursor;
        while self.can_read() && Self::is_allowed_number(self.peek(), T::ALLOW_FLOAT, T::ALLOW_NEGATIVE)
        {
            self.skip();
        }
        let value = self.string[start..self.cursor].to_string();
        if value.is_empty() {
            return Err(BuiltInErrorKind::ReaderExpectedValue.create_with_context(self));
        }
        T::from_str_radix(&value, 10).map_err(|_| {
            self.cursor = start;
            BuiltInErrorKind::ReaderInvalidValue { value: value.clone() }.create_with_context(self)
        })
    }

    pub fn expect(&mut self, c: char) -> Result<(), CommandSyntaxError> {
        if !self.can_read() || self.peek() != c {
            return Err(BuiltInErrorKind::ReaderExpectedSymbol { symbol: c }.create_with_context(self));
        }
        self.skip();
        Ok(())
    }
}

impl From<&str> for StringReader {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for StringReader {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}
