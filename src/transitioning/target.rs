//! Contracts implemented by transition targets.

use crate::core::ContentState;
use crate::machine::Completion;

/// Something that can present a state.
///
/// Called on the presentation executor. Implementations must eventually
/// call [`Completion::complete`] exactly once; the state machine does not
/// process further requests until they do (or drop the completion).
pub trait StateTransitioning<S>: Send + Sync + 'static {
    fn transition(&self, state: &S, animated: bool, completion: Completion);
}

/// Show/hide operations per visual category.
///
/// Every operation defaults to a no-op, so a controller only implements
/// the categories it actually presents.
#[allow(unused_variables)]
pub trait ViewStateTransitioning<S: ContentState>: Send + Sync + 'static {
    /// Called right before a transition begins
    fn will_transition(&self, state: &S, animated: bool) {}

    /// Called right after a transition ends
    fn did_transition(&self, state: &S, animated: bool) {}

    fn show_empty_view(&self, state: &S, animated: bool) {}

    fn hide_empty_view(&self, state: &S, animated: bool) {}

    /// Show an error replacing the view
    fn show_obtrusive_error(&self, error: &S::Error, state: &S, animated: bool) {}

    /// Show an error on top of existing content
    fn show_non_obtrusive_error(&self, error: &S::Error, state: &S, animated: bool) {}

    fn hide_error(&self, state: &S, animated: bool) {}

    /// Show a loading indicator replacing the view
    fn show_obtrusive_loading_indicator(&self, state: &S, animated: bool) {}

    /// Show a loading indicator on top of existing content
    fn show_non_obtrusive_loading_indicator(&self, state: &S, animated: bool) {}

    fn hide_loading_indicator(&self, state: &S, animated: bool) {}
}
