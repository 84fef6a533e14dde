//! Redirects and forks: continuing parsing/execution from another node's
//! children while carrying the accumulated context along.

use std::sync::Arc;

use brigadier::prelude::*;

#[test]
fn redirect_to_root_lets_a_literal_loop_back_on_itself() {
    let mut dispatcher: CommandDispatcher<()> = CommandDispatcher::new();
    dispatcher.register(literal("actual").executes(|_| Ok(42)));
    let root = dispatcher.root.clone();
    dispatcher.register(literal("redirected").redirect(root));

    let result = dispatcher.execute("redirected redirected actual", ()).unwrap();
    assert_eq!(result, 42);

    let parse = dispatcher.parse("redirected redirected actual", ());
    assert_eq!(parse.context.range(), StringRange::between(0, 10));

    let built = parse.context.build("redirected redirected actual");
    let middle = built.child.as_ref().expect("one nested redirect context");
    let innermost = middle.child.as_ref().expect("two nested redirect contexts");
    assert!(innermost.child.is_none());
    assert_eq!(innermost.range, StringRange::between(22, 28));
}

#[test]
fn fork_runs_the_target_once_per_source_the_modifier_returns() {
    let mut dispatcher: CommandDispatcher<i32> = CommandDispatcher::new();
    dispatcher.register(literal("actual").executes(|_| Ok(42)));
    let root = dispatcher.root.clone();
    let modifier: RedirectModifier<i32> = Arc::new(|_ctx| Ok(vec![1, 2]));
    dispatcher.register(literal("fork").fork(root, modifier));

    let result = dispatcher.execute("fork actual", 0).unwrap();
    assert_eq!(result, 2);
}

#[test]
fn fork_swallows_a_per_source_error_without_failing_the_whole_execution() {
    let mut dispatcher: CommandDispatcher<i32> = CommandDispatcher::new();
    dispatcher.register(literal("actual").executes(|ctx| {
        if *ctx.source == 1 {
            Err(BuiltInErrorKind::DispatcherUnknownCommand.create_with_context(&StringReader::new("")))
        } else {
            Ok(42)
        }
    }));
    let root = dispatcher.root.clone();
    let modifier: RedirectModifier<i32> = Arc::new(|_ctx| Ok(vec![1, 2]));
    dispatcher.register(literal("fork").fork(root, modifier));

    let result = dispatcher.execute("fork actual", 0).unwrap();
    assert_eq!(result, 1);
}
