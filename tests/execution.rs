//! End-to-end execution behavior: plain commands, shared subtrees, and the
//! boundary cases around which node's command actually runs.

use brigadier::prelude::*;

#[test]
fn single_literal_executes() {
    let mut dispatcher: CommandDispatcher<()> = CommandDispatcher::new();
    dispatcher.register(literal("foo").executes(|_| Ok(42)));

    assert_eq!(dispatcher.execute("foo", ()).unwrap(), 42);
}

#[test]
fn sibling_literals_under_a_shared_base_both_execute() {
    let mut dispatcher: CommandDispatcher<()> = CommandDispatcher::new();
    dispatcher.register(
        literal("base")
            .then(literal("foo").executes(|_| Ok(42)))
            .then(literal("bar").executes(|_| Ok(42))),
    );

    assert_eq!(dispatcher.execute("base foo", ()).unwrap(), 42);
    assert_eq!(dispatcher.execute("base bar", ()).unwrap(), 42);
}

#[test]
fn trailing_unregistered_word_is_unknown_argument() {
    let mut dispatcher: CommandDispatcher<()> = CommandDispatcher::new();
    dispatcher.register(literal("foo").executes(|_| Ok(42)));

    let err = dispatcher.execute("foo bar", ()).unwrap_err();
    assert_eq!(err.kind, BuiltInErrorKind::DispatcherUnknownArgument);
    assert_eq!(err.cursor, 4);
}

#[test]
fn deepest_matched_node_without_a_command_shadows_an_ancestors_executable() {
    let mut dispatcher: CommandDispatcher<()> = CommandDispatcher::new();
    dispatcher.register(
        literal("foo")
            .executes(|_| Ok(42))
            .then(argument::<(), _>("bar", integer())),
    );

    let err = dispatcher.execute("foo 5", ()).unwrap_err();
    assert_eq!(err.kind, BuiltInErrorKind::DispatcherUnknownCommand);
    assert_eq!(err.cursor, 5);
}

#[test]
fn empty_input_is_unknown_command_at_cursor_zero() {
    let dispatcher: CommandDispatcher<()> = CommandDispatcher::new();
    let err = dispatcher.execute("", ()).unwrap_err();
    assert_eq!(err.kind, BuiltInErrorKind::DispatcherUnknownCommand);
    assert_eq!(err.cursor, 0);
}

#[test]
fn trailing_characters_with_no_separator_fail_before_the_next_token() {
    let mut dispatcher: CommandDispatcher<()> = CommandDispatcher::new();
    dispatcher.register(
        literal("n").then(argument::<(), _>("v", integer()).executes(|_| Ok(1))),
    );

    let err = dispatcher.execute("n 12abc", ()).unwrap_err();
    assert_eq!(err.kind, BuiltInErrorKind::DispatcherExpectedArgumentSeparator);
    assert_eq!(err.cursor, 4);
}

#[test]
fn argument_value_is_retrievable_in_the_command_body() {
    let mut dispatcher: CommandDispatcher<()> = CommandDispatcher::new();
    dispatcher.register(
        literal("echo").then(
            argument::<(), _>("text", string()).executes(|ctx| {
                let text = ctx.get_argument::<String>("text").unwrap();
                Ok(text.len() as i32)
            }),
        ),
    );

    assert_eq!(dispatcher.execute(r#"echo "hi there""#, ()).unwrap(), 8);
}

#[test]
fn requirement_hides_a_command_from_an_unauthorized_source() {
    let mut dispatcher: CommandDispatcher<bool> = CommandDispatcher::new();
    dispatcher.register(
        literal("admin")
            .requires(|source: &bool| *source)
            .executes(|_| Ok(1)),
    );

    let err = dispatcher.execute("admin", false).unwrap_err();
    assert_eq!(err.kind, BuiltInErrorKind::DispatcherUnknownCommand);
    assert_eq!(dispatcher.execute("admin", true).unwrap(), 1);
}
