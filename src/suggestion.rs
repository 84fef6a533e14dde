//! Completion suggestions: records, the in-progress builder, and the
//! case-insensitive merge across sibling branches.

use crate::string_range::StringRange;

/// A single completion suggestion: the range of the input it would replace,
/// the replacement text, and an optional tooltip.
///
/// Two suggestions compare equal when their `text` matches under
/// case-folded comparison — see [`Suggestions::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub range: StringRange,
    pub text: String,
    pub tooltip: Option<String>,
}

impl Suggestion {
    pub fn new(range: StringRange, text: impl Into<String>) -> Self {
        Self {
            range,
            text: text.into(),
            tooltip: None,
        }
    }

    pub fn with_tooltip(range: StringRange, text: impl Into<String>, tooltip: impl Into<String>) -> Self {
        Self {
            range,
            text: text.into(),
            tooltip: Some(tooltip.into()),
        }
    }

    /// Splices `self.text` into `input` at `self.range`, keeping whatever
    /// falls outside the range untouched.
    pub fn apply(&self, input: &str) -> String {
        if self.range.start == 0 && self.range.end == input.len() {
            return self.text.clone();
        }
        let mut result = String::with_capacity(self.range.start + self.text.len() + input.len());
        if self.range.start > 0 {
            result.push_str(&input[..self.range.start]);
        }
        result.push_str(&self.text);
        if self.range.end < input.len() {
            result.push_str(&input[self.range.end..]);
        }
        result
    }

    /// Widens this suggestion to cover `range`, padding `text` with the
    /// corresponding slice of `command` on whichever side grew.
    fn expand(mut self, command: &str, range: StringRange) -> Self {
        if self.range == range {
            return self;
        }
        if range.start < self.range.start {
            let mut text = command[range.start..self.range.start].to_string();
            text.push_str(&self.text);
            self.text = text;
        }
        if range.end > self.range.end {
            self.text.push_str(&command[self.range.end..range.end]);
        }
        self.range = range;
        self
    }

    fn fold_key(&self) -> String {
        self.text.to_lowercase()
    }
}

/// An ordered set of [`Suggestion`]s, deduplicated and sorted by
/// case-folded text, targeting a single overall input [`StringRange`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestions {
    pub range: StringRange,
    pub list: Vec<Suggestion>,
}

impl Suggestions {
    pub fn empty(range: StringRange) -> Self {
        Self {
            range,
            list: Vec::new(),
        }
    }

    /// Sorts and deduplicates `list` by case-folded text.
    pub fn new(range: StringRange, mut list: Vec<Suggestion>) -> Self {
        list.sort_by(|a, b| a.fold_key().cmp(&b.fold_key()));
        list.dedup_by(|a, b| a.fold_key() == b.fold_key());
        Self { range, list }
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Merges `suggestions` against the full `command` string: `N=0` yields
    /// empty, `N=1` is the identity, otherwise every suggestion is expanded
    /// to the union range and re-deduplicated.
    pub fn merge(command: &str, suggestions: &[Suggestions]) -> Self {
        match suggestions.len() {
            0 => Suggestions::empty(StringRange::at(0)),
            1 => suggestions[0].clone(),
            _ => {
                let all: Vec<Suggestion> = suggestions
                    .iter()
                    .flat_map(|s| s.list.iter().cloned())
                    .collect();
                Self::create(command, all)
            }
        }
    }

    fn create(command: &str, suggestions: Vec<Suggestion>) -> Self {
        let Some(first) = suggestions.first() else {
            return Suggestions::empty(StringRange::at(0));
        };
        let range = suggestions
            .iter()
            .fold(first.range, |acc, s| StringRange::encompass(acc, s.range));
        let expanded = suggestions
            .into_iter()
            .map(|s| s.expand(command, range))
            .collect();
        Suggestions::new(range, expanded)
    }
}

/// Accumulates suggestions for a single argument-type's `list_suggestions`
/// call. `start` is the byte offset in the full input where the suggested
/// replacement begins.
#[derive(Debug, Clone)]
pub struct SuggestionsBuilder {
    input: String,
    input_lowercase: String,
    start: usize,
    result: Vec<Suggestion>,
}

impl SuggestionsBuilder {
    pub fn new(input: impl Into<String>, start: usize) -> Self {
        let input = input.into();
        let input_lowercase = input.to_lowercase();
        Self::new_with_lowercase(input, input_lowercase, start)
    }

    pub fn new_with_lowercase(
        input: impl Into<String>,
        input_lowercase: impl Into<String>,
        start: usize,
    ) -> Self {
        Self {
            input: input.into(),
            input_lowercase: input_lowercase.into(),
            start,
            result: Vec::new(),
        }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn remaining(&self) -> &str {
        &self.input[self.start..]
    }

    pub fn remaining_lowercase(&self) -> &str {
        &self.input_lowercase[self.start..]
    }

    pub fn suggest(&mut self, text: impl Into<String>) -> &mut Self {
        let text = text.into();
        if text != self.remaining() {
            self.result.push(Suggestion::new(
                StringRange::between(self.start, self.input.len()),
                text,
            ));
        }
        self
    }

    pub fn suggest_with_tooltip(
        &mut self,
        text: impl Into<String>,
        tooltip: impl Into<String>,
    ) -> &mut Self {
        let text = text.into();
        if text != self.remaining() {
            self.result.push(Suggestion::with_tooltip(
                StringRange::between(self.start, self.input.len()),
                text,
                tooltip,
            ));
        }
        self
    }

    /// Adds `text` iff it starts with the remaining, case-folded input.
    pub fn auto_suggest(&mut self, text: &str) -> &mut Self {
        if text.to_lowercase().starts_with(self.remaining_lowercase()) {
            self.suggest(text);
        }
        self
    }

    pub fn auto_suggest_with_tooltip(&mut self, text: &str, tooltip: &str) -> &mut Self {
        if text.to_lowercase().starts_with(self.remaining_lowercase()) {
            self.suggest_with_tooltip(text, tooltip);
        }
        self
    }

    pub fn add(&mut self, other: &SuggestionsBuilder) -> &mut Self {
        self.result.extend(other.result.iter().cloned());
        self
    }

    pub fn build(&self) -> Suggestions {
        Suggestions::new(
            StringRange::between(self.start, self.input.len()),
            self.result.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggest_skips_text_matching_remaining() {
        let mut builder = SuggestionsBuilder::new("foo", 0);
        builder.suggest("foo");
        assert!(builder.build().is_empty());
    }

    #[test]
    fn auto_suggest_is_case_insensitive() {
        let mut builder = SuggestionsBuilder::new("B", 0);
        builder.auto_suggest("bar");
        builder.auto_suggest("baz");
        builder.auto_suggest("foo");
        let suggestions = builder.build();
        let texts: Vec<_> = suggestions.list.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["bar", "baz"]);
    }

    #[test]
    fn merge_dedups_case_insensitively() {
        let a = Suggestions::new(
            StringRange::at(0),
            vec![Suggestion::new(StringRange::between(0, 1), "Foo")],
        );
        let b = Suggestions::new(
            StringRange::at(0),
            vec![Suggestion::new(StringRange::between(0, 1), "foo")],
        );
        let merged = Suggestions::merge("f", &[a, b]);
        assert_eq!(merged.list.len(), 1);
    }

    #[test]
    fn apply_splices_into_input() {
        let suggestion = Suggestion::new(StringRange::between(4, 4), "world");
        assert_eq!(suggestion.apply("foo "), "foo world");
    }
}
