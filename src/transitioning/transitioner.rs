//! Applies decision plans to a controller.

use crate::core::{plan, ContentState, Presentation, TransitionPlan, TransitionStep};
use crate::machine::Completion;
use crate::transitioning::target::{StateTransitioning, ViewStateTransitioning};
use std::marker::PhantomData;
use std::sync::{Arc, Weak};
use tracing::trace;

/// Bridges a state machine to a [`ViewStateTransitioning`] controller.
///
/// Holds the controller weakly: once it is released, transitions only
/// signal completion.
pub struct Transitioner<S, C> {
    controller: Weak<C>,
    _phantom: PhantomData<fn(&S)>,
}

impl<S, C> Transitioner<S, C>
where
    S: ContentState,
    C: ViewStateTransitioning<S>,
{
    pub fn new(controller: &Arc<C>) -> Self {
        Self {
            controller: Arc::downgrade(controller),
            _phantom: PhantomData,
        }
    }

    pub fn controller(&self) -> Option<Arc<C>> {
        self.controller.upgrade()
    }
}

impl<S, C> StateTransitioning<S> for Transitioner<S, C>
where
    S: ContentState,
    C: ViewStateTransitioning<S>,
{
    fn transition(&self, state: &S, animated: bool, completion: Completion) {
        match self.controller.upgrade() {
            Some(controller) => {
                controller.will_transition(state, animated);
                apply(plan(state), &*controller, state, animated);
                controller.did_transition(state, animated);
            }
            None => trace!(state = state.name(), "controller released, nothing to present"),
        }

        completion.complete();
    }
}

/// Invoke every step of `plan` on `controller`, in order.
pub fn apply<S, C>(plan: TransitionPlan<S::Error>, controller: &C, state: &S, animated: bool)
where
    S: ContentState,
    C: ViewStateTransitioning<S> + ?Sized,
{
    for step in plan {
        match step {
            TransitionStep::HideEmptyView => controller.hide_empty_view(state, animated),
            TransitionStep::HideError => controller.hide_error(state, animated),
            TransitionStep::HideLoadingIndicator => controller.hide_loading_indicator(state, animated),
            TransitionStep::ShowEmptyView => controller.show_empty_view(state, animated),
            TransitionStep::ShowLoadingIndicator(Presentation::Obtrusive) => {
                controller.show_obtrusive_loading_indicator(state, animated)
            }
            TransitionStep::ShowLoadingIndicator(Presentation::NonObtrusive) => {
                controller.show_non_obtrusive_loading_indicator(state, animated)
            }
            TransitionStep::ShowError(Presentation::Obtrusive, error) => {
                controller.show_obtrusive_error(&error, state, animated)
            }
            TransitionStep::ShowError(Presentation::NonObtrusive, error) => {
                controller.show_non_obtrusive_error(&error, state, animated)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{State, StateError, ViewState};
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        calls: Mutex<Vec<String>>,
    }

    impl Recorder {
        fn log(&self, call: impl Into<String>) {
            self.calls.lock().unwrap().push(call.into());
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl ViewStateTransitioning<ViewState> for Recorder {
        fn will_transition(&self, state: &ViewState, animated: bool) {
            self.log(format!("will:{}:{animated}", state.name()));
        }

        fn did_transition(&self, state: &ViewState, animated: bool) {
            self.log(format!("did:{}:{animated}", state.name()));
        }

        fn show_empty_view(&self, _: &ViewState, _: bool) {
            self.log("showEmptyView");
        }

        fn hide_empty_view(&self, _: &ViewState, _: bool) {
            self.log("hideEmptyView");
        }

        fn show_obtrusive_error(&self, error: &StateError, _: &ViewState, _: bool) {
            self.log(format!("showObtrusiveError({error})"));
        }

        fn show_non_obtrusive_error(&self, error: &StateError, _: &ViewState, _: bool) {
            self.log(format!("showNonObtrusiveError({error})"));
        }

        fn hide_error(&self, _: &ViewState, _: bool) {
            self.log("hideError");
        }

        fn show_obtrusive_loading_indicator(&self, _: &ViewState, _: bool) {
            self.log("showObtrusiveLoadingIndicator");
        }

        fn show_non_obtrusive_loading_indicator(&self, _: &ViewState, _: bool) {
            self.log("showNonObtrusiveLoadingIndicator");
        }

        fn hide_loading_indicator(&self, _: &ViewState, _: bool) {
            self.log("hideLoadingIndicator");
        }
    }

    /// Controller relying entirely on the default no-op operations.
    struct Silent;

    impl ViewStateTransitioning<ViewState> for Silent {}

    #[test]
    fn hooks_wrap_plan_steps() {
        let recorder = Arc::new(Recorder::default());
        let transitioner = Transitioner::<ViewState, _>::new(&recorder);

        transitioner.transition(&ViewState::empty(), true, Completion::detached());

        assert_eq!(
            recorder.calls(),
            vec![
                "will:Empty:true",
                "hideEmptyView",
                "hideError",
                "hideLoadingIndicator",
                "showEmptyView",
                "did:Empty:true",
            ]
        );
    }

    #[test]
    fn errors_are_forwarded_to_error_hooks() {
        let recorder = Arc::new(Recorder::default());
        let transitioner = Transitioner::<ViewState, _>::new(&recorder);

        transitioner.transition(
            &ViewState::loading_over(ViewState::empty_with_error("offline")),
            false,
            Completion::detached(),
        );

        assert_eq!(
            recorder.calls()[4..],
            [
                "showNonObtrusiveLoadingIndicator",
                "showObtrusiveError(offline)",
                "did:Loading:false",
            ]
        );
    }

    #[tokio::test]
    async fn released_controller_still_completes() {
        let recorder = Arc::new(Recorder::default());
        let transitioner = Transitioner::<ViewState, _>::new(&recorder);
        drop(recorder);

        assert!(transitioner.controller().is_none());

        let (completion, signal) = Completion::channel();
        transitioner.transition(&ViewState::content(), true, completion);
        assert!(signal.await.is_ok());
    }

    #[tokio::test]
    async fn default_operations_are_no_ops() {
        let silent = Arc::new(Silent);
        let transitioner = Transitioner::<ViewState, _>::new(&silent);

        let (completion, signal) = Completion::channel();
        transitioner.transition(
            &ViewState::loading_over(ViewState::content_with_error("x")),
            true,
            completion,
        );
        assert!(signal.await.is_ok());
    }
}
