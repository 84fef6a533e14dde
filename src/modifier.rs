//! Redirect modifiers: functions that turn the current source into zero or
//! more sources for a redirected continuation.

use std::sync::Arc;

use crate::context::CommandContext;
use crate::errors::CommandSyntaxError;

/// `S -> Vec<S>`, applied to the context at the point a redirect is
/// followed. Returning more than one source only has the intended
/// "fork" effect on execution when the owning node's `forks` flag is set.
pub type RedirectModifier<S> =
    Arc<dyn Fn(&CommandContext<S>) -> Result<Vec<S>, CommandSyntaxError> + Send + Sync>;

/// Wraps a `S -> S` closure as the degenerate, always-one-element-`Vec`
/// flavor of [`RedirectModifier`].
pub fn single_redirect_modifier<S, F>(modifier: F) -> RedirectModifier<S>
where
    S: Send + Sync + 'static,
    F: Fn(&CommandContext<S>) -> Result<S, CommandSyntaxError> + Send + Sync + 'static,
{
    Arc::new(move |ctx| modifier(ctx).map(|source| vec![source]))
}
