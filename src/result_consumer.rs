//! The callback invoked once per executed (or forked) command.

use crate::context::CommandContext;

/// Invoked by [`crate::command_dispatcher::CommandDispatcher::execute_parsed`]
/// once per command or forked sub-command, whether it succeeded or not.
pub trait ResultConsumer<S>: Send + Sync {
    fn on_command_complete(&self, context: &CommandContext<S>, success: bool, result: i32);
}

/// A consumer that discards every notification. Used when the host doesn't
/// need per-command telemetry.
pub struct DefaultResultConsumer;

impl<S> ResultConsumer<S> for DefaultResultConsumer {
    fn on_command_complete(&self, _context: &CommandContext<S>, _success: bool, _result: i32) {}
}
