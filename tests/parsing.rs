//! Parsing-level behaviors that don't depend on execution: residual input,
//! argument retrieval, and tree registration idempotence.

use brigadier::prelude::*;

#[test]
fn registering_the_same_subtree_twice_does_not_duplicate_children() {
    let mut dispatcher: CommandDispatcher<()> = CommandDispatcher::new();
    dispatcher.register(literal("foo").then(literal("bar").executes(|_| Ok(1))));
    dispatcher.register(literal("foo").then(literal("bar").executes(|_| Ok(1))));

    assert_eq!(dispatcher.root.read().children().count(), 1);
    let foo = dispatcher.find_node(&["foo"]).unwrap();
    assert_eq!(foo.read().children().count(), 1);
}

#[test]
fn parse_context_range_encompasses_every_matched_node() {
    let mut dispatcher: CommandDispatcher<()> = CommandDispatcher::new();
    dispatcher.register(
        literal("tp").then(argument::<(), _>("distance", integer()).executes(|_| Ok(1))),
    );

    let parse = dispatcher.parse("tp 5", ());
    assert_eq!(parse.context.range(), StringRange::between(0, 4));
}

#[test]
fn quoted_string_with_bad_escape_fails_at_the_offending_character() {
    let mut reader = StringReader::new(r#""a\nb""#);
    let err = reader.read_quoted_string().unwrap_err();
    assert_eq!(err.kind, BuiltInErrorKind::ReaderInvalidEscape { character: 'n' });
    assert_eq!(err.cursor, 3);
}

#[test]
fn numeric_parse_stops_at_the_valid_prefix() {
    let mut reader = StringReader::new("12.34");
    let value: i32 = reader.read_value().unwrap();
    assert_eq!(value, 12);
    assert_eq!(reader.remaining(), ".34");
}

/// A custom argument type whose `parse` always fails, standing in for a
/// host-defined argument that throws mid-parse.
#[derive(Debug, Clone, Copy, Default)]
struct AlwaysFailsArgumentType;

impl ArgumentType<()> for AlwaysFailsArgumentType {
    type Value = i32;

    fn parse(&self, reader: &mut StringReader) -> Result<i32, CommandSyntaxError> {
        Err(BuiltInErrorKind::ReaderExpectedValue.create_with_context(reader))
    }

    fn type_name(&self) -> &'static str {
        "always-fails"
    }
}

#[test]
fn a_custom_arguments_parse_error_surfaces_as_a_dispatcher_parse_exception() {
    let mut dispatcher: CommandDispatcher<()> = CommandDispatcher::new();
    dispatcher.register(
        literal("cmd").then(argument::<(), _>("x", AlwaysFailsArgumentType).executes(|_| Ok(1))),
    );

    let err = dispatcher.execute("cmd 5", ()).unwrap_err();
    assert!(matches!(
        err.kind,
        BuiltInErrorKind::DispatcherParseException { .. }
    ));
}
