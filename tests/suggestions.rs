//! Completion suggestions: auto-suggest over literal siblings, suggestion
//! merging, and cursor-position-dependent suggestion contexts.

use brigadier::prelude::*;

fn texts(suggestions: &Suggestions) -> Vec<String> {
    suggestions.list.iter().map(|s| s.text.clone()).collect()
}

#[test]
fn partial_prefix_suggests_matching_siblings_only() {
    let mut dispatcher: CommandDispatcher<()> = CommandDispatcher::new();
    dispatcher.register(literal("foo").executes(|_| Ok(1)));
    dispatcher.register(literal("bar").executes(|_| Ok(1)));
    dispatcher.register(literal("baz").executes(|_| Ok(1)));

    let parse = dispatcher.parse("b", ());
    let suggestions = dispatcher.get_completion_suggestions_sync(parse);

    assert_eq!(texts(&suggestions), vec!["bar", "baz"]);
    assert_eq!(suggestions.range, StringRange::between(0, 1));
}

#[test]
fn empty_input_suggests_every_top_level_literal_sorted_case_insensitively() {
    let mut dispatcher: CommandDispatcher<()> = CommandDispatcher::new();
    dispatcher.register(literal("foo").executes(|_| Ok(1)));
    dispatcher.register(literal("bar").executes(|_| Ok(1)));
    dispatcher.register(literal("baz").executes(|_| Ok(1)));

    let parse = dispatcher.parse("", ());
    let suggestions = dispatcher.get_completion_suggestions_sync(parse);

    assert_eq!(texts(&suggestions), vec!["bar", "baz", "foo"]);
    assert_eq!(suggestions.range, StringRange::at(0));
}

#[test]
fn cursor_inside_an_earlier_token_suggests_that_tokens_completions() {
    let mut dispatcher: CommandDispatcher<()> = CommandDispatcher::new();
    dispatcher.register(
        literal("parent_one")
            .then(literal("faz").executes(|_| Ok(1)))
            .then(literal("fbz").executes(|_| Ok(1)))
            .then(literal("gaz").executes(|_| Ok(1))),
    );
    dispatcher.register(literal("parent_two").executes(|_| Ok(1)));

    let input = "parent_one faz ";

    let suggestions_at_8 =
        dispatcher.get_completion_suggestions_with_cursor_sync(dispatcher.parse(input, ()), 8);
    assert_eq!(texts(&suggestions_at_8), vec!["parent_one"]);
    assert_eq!(suggestions_at_8.range, StringRange::between(0, 8));

    let suggestions_at_11 =
        dispatcher.get_completion_suggestions_with_cursor_sync(dispatcher.parse(input, ()), 11);
    assert_eq!(texts(&suggestions_at_11), vec!["faz", "fbz", "gaz"]);
    assert_eq!(suggestions_at_11.range, StringRange::at(11));

    let suggestions_at_12 =
        dispatcher.get_completion_suggestions_with_cursor_sync(dispatcher.parse(input, ()), 12);
    assert_eq!(texts(&suggestions_at_12), vec!["faz", "fbz"]);
    assert_eq!(suggestions_at_12.range, StringRange::between(11, 12));
}
