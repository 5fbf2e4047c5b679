//! Caller-facing state API.

use crate::core::{ContentState, State};
use crate::error::TransitionError;
use crate::machine::{StateMachine, TransitionOutcome};
use crate::transitioning::target::ViewStateTransitioning;
use crate::transitioning::transitioner::Transitioner;
use std::sync::Arc;
use tracing::warn;

/// Something whose state can be set and queried.
pub trait Stateful<S: State> {
    /// Request `new_state`; fire-and-forget.
    fn set_state(&self, new_state: S, animated: bool);

    /// The last committed state.
    fn current_state(&self) -> Option<S>;
}

/// Gives access to the state machine coordinating `Self`.
pub trait HasStateMachine<S: State> {
    fn state_machine(&self) -> &StateMachine<S>;
}

/// Pairs a state machine with a [`Transitioner`] for one controller.
///
/// The binding owns the transitioner while the machine only refers to it
/// weakly, so dropping the binding releases the target and any requests
/// still queued are dropped.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use viewstate::core::ViewState;
/// use viewstate::machine::{PresentationThread, StateMachine, TransitionOutcome};
/// use viewstate::transitioning::{Stateful, StatefulBinding, ViewStateTransitioning};
///
/// struct ListScreen;
/// impl ViewStateTransitioning<ViewState> for ListScreen {}
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let presentation = PresentationThread::spawn("presentation").unwrap();
/// let machine = StateMachine::<ViewState>::new(presentation.handle()).unwrap();
/// let screen = Arc::new(ListScreen);
/// let binding = StatefulBinding::new(machine, &screen);
///
/// let outcome = binding.set_state_and_wait(ViewState::empty(), false).await.unwrap();
/// assert_eq!(outcome, TransitionOutcome::Applied);
/// assert!(binding.current_state().is_some());
/// # }
/// ```
pub struct StatefulBinding<S, C>
where
    S: ContentState,
    C: ViewStateTransitioning<S>,
{
    machine: StateMachine<S>,
    transitioner: Arc<Transitioner<S, C>>,
}

impl<S, C> StatefulBinding<S, C>
where
    S: ContentState,
    C: ViewStateTransitioning<S>,
{
    pub fn new(machine: StateMachine<S>, controller: &Arc<C>) -> Self {
        Self {
            machine,
            transitioner: Arc::new(Transitioner::new(controller)),
        }
    }

    /// Request `new_state` and run `completion` with the outcome.
    pub fn set_state_with<F>(
        &self,
        new_state: S,
        animated: bool,
        completion: F,
    ) -> Result<(), TransitionError>
    where
        F: FnOnce(TransitionOutcome) + Send + 'static,
    {
        self.machine
            .transition(&self.transitioner, new_state, animated, completion)
    }

    /// Request `new_state` and wait until it has been presented or skipped.
    pub async fn set_state_and_wait(
        &self,
        new_state: S,
        animated: bool,
    ) -> Result<TransitionOutcome, TransitionError> {
        self.machine
            .transition_and_wait(&self.transitioner, new_state, animated)
            .await
    }
}

impl<S, C> Stateful<S> for StatefulBinding<S, C>
where
    S: ContentState,
    C: ViewStateTransitioning<S>,
{
    fn set_state(&self, new_state: S, animated: bool) {
        if let Err(e) = self.machine.submit(&self.transitioner, new_state, animated) {
            warn!("Failed to request state transition: {}", e);
        }
    }

    fn current_state(&self) -> Option<S> {
        self.machine.current_state()
    }
}

impl<S, C> HasStateMachine<S> for StatefulBinding<S, C>
where
    S: ContentState,
    C: ViewStateTransitioning<S>,
{
    fn state_machine(&self) -> &StateMachine<S> {
        &self.machine
    }
}
