//! State machine serializing transitions onto a single worker.

use crate::core::{State, StateHistory, StateTransition};
use crate::error::TransitionError;
use crate::machine::completion::{Completion, CompletionHandler, TransitionOutcome};
use crate::machine::config::{MachineConfig, StateMachineBuilder};
use crate::machine::executor::PresentationExecutor;
use crate::transitioning::StateTransitioning;
use chrono::Utc;
use std::sync::{Arc, PoisonError, RwLock, Weak};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, trace, warn, Instrument};

/// A queued transition request.
struct Job<S: State> {
    target: Weak<dyn StateTransitioning<S>>,
    state: S,
    animated: bool,
    completion: Option<CompletionHandler>,
}

/// State owned by the machine and shared with its worker.
struct Shared<S: State> {
    config: MachineConfig,
    current: RwLock<Option<S>>,
    history: RwLock<StateHistory<S>>,
}

impl<S: State> Shared<S> {
    fn current(&self) -> Option<S> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn is_current(&self, state: &S) -> bool {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|current| current.compares_equal_to(state))
    }

    /// Make `state` the current state and record the transition.
    fn commit(&self, state: S) -> u64 {
        let from = self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(state.clone());

        let mut history = self.history.write().unwrap_or_else(PoisonError::into_inner);
        let sequence = history.last().map_or(1, |last| last.sequence + 1);
        history.push(StateTransition {
            from,
            to: state,
            timestamp: Utc::now(),
            sequence,
        });
        sequence
    }
}

/// Coordinates transitions of exactly one target.
///
/// Requests are queued in order on a private worker task. For each
/// request the worker skips states that compare equal to the current
/// state, commits the new state, posts the target's transition to the
/// presentation executor and then waits for the target to signal
/// completion before it looks at the next request.
///
/// The machine only keeps a weak reference to a target; requests for a
/// target that has been released are dropped.
///
/// Dropping every clone of the machine stops the worker once the queued
/// requests have been processed.
#[derive(Clone)]
pub struct StateMachine<S: State> {
    shared: Arc<Shared<S>>,
    jobs: mpsc::UnboundedSender<Job<S>>,
}

impl<S: State> StateMachine<S> {
    /// Create a machine with the default configuration on the current
    /// tokio runtime.
    pub fn new<E: PresentationExecutor>(executor: E) -> Result<Self, TransitionError> {
        Self::builder().executor(executor).build()
    }

    pub fn builder() -> StateMachineBuilder<S> {
        StateMachineBuilder::new()
    }

    pub(crate) fn spawn(
        config: MachineConfig,
        executor: Arc<dyn PresentationExecutor>,
        runtime: &Handle,
    ) -> Self {
        let history = match config.history_capacity {
            Some(capacity) => StateHistory::with_capacity(capacity),
            None => StateHistory::new(),
        };
        let shared = Arc::new(Shared {
            config,
            current: RwLock::new(None),
            history: RwLock::new(history),
        });

        let (jobs, receiver) = mpsc::unbounded_channel();
        let span = tracing::debug_span!("state_machine", label = %shared.config.label);
        runtime.spawn(run_worker(Arc::clone(&shared), receiver, executor).instrument(span));

        Self { shared, jobs }
    }

    /// Request a transition of `target` to `new_state`.
    ///
    /// Returns immediately. `completion` runs exactly once, after the
    /// target has finished presenting the state or as soon as the request
    /// is skipped.
    pub fn transition<T, F>(
        &self,
        target: &Arc<T>,
        new_state: S,
        animated: bool,
        completion: F,
    ) -> Result<(), TransitionError>
    where
        T: StateTransitioning<S>,
        F: FnOnce(TransitionOutcome) + Send + 'static,
    {
        self.enqueue(target, new_state, animated, Some(Box::new(completion)))
    }

    /// Request a transition without waiting for its outcome.
    pub fn submit<T>(&self, target: &Arc<T>, new_state: S, animated: bool) -> Result<(), TransitionError>
    where
        T: StateTransitioning<S>,
    {
        self.enqueue(target, new_state, animated, None)
    }

    /// Request a transition and wait for its outcome.
    pub async fn transition_and_wait<T>(
        &self,
        target: &Arc<T>,
        new_state: S,
        animated: bool,
    ) -> Result<TransitionOutcome, TransitionError>
    where
        T: StateTransitioning<S>,
    {
        let (sender, receiver) = oneshot::channel();
        self.transition(target, new_state, animated, move |outcome| {
            let _ = sender.send(outcome);
        })?;
        receiver.await.map_err(|_| TransitionError::OutcomeDropped)
    }

    fn enqueue<T>(
        &self,
        target: &Arc<T>,
        state: S,
        animated: bool,
        completion: Option<CompletionHandler>,
    ) -> Result<(), TransitionError>
    where
        T: StateTransitioning<S>,
    {
        let target: Weak<T> = Arc::downgrade(target);
        let target: Weak<dyn StateTransitioning<S>> = target;
        debug!(
            machine = %self.shared.config.label,
            state = state.name(),
            animated,
            "transition requested"
        );
        self.jobs
            .send(Job {
                target,
                state,
                animated,
                completion,
            })
            .map_err(|_| TransitionError::WorkerStopped {
                label: self.shared.config.label.clone(),
            })
    }

    /// The last committed state, `None` before the first transition.
    ///
    /// May lag behind requests that are still queued.
    pub fn current_state(&self) -> Option<S> {
        self.shared.current()
    }

    /// Snapshot of the committed transitions.
    pub fn history(&self) -> StateHistory<S> {
        self.shared
            .history
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn label(&self) -> &str {
        &self.shared.config.label
    }

    pub fn config(&self) -> &MachineConfig {
        &self.shared.config
    }

    /// Whether the worker has stopped accepting requests.
    pub fn is_stopped(&self) -> bool {
        self.jobs.is_closed()
    }
}

async fn run_worker<S: State>(
    shared: Arc<Shared<S>>,
    mut jobs: mpsc::UnboundedReceiver<Job<S>>,
    executor: Arc<dyn PresentationExecutor>,
) {
    let timeout = shared.config.completion_timeout();

    while let Some(job) = jobs.recv().await {
        let Job {
            target,
            state,
            animated,
            completion,
        } = job;

        let outcome = process(&shared, &*executor, target, state, animated, timeout).await;

        if let Some(completion) = completion {
            completion(outcome);
        }
    }

    info!(machine = %shared.config.label, "state machine worker stopped");
}

async fn process<S: State>(
    shared: &Shared<S>,
    executor: &dyn PresentationExecutor,
    target: Weak<dyn StateTransitioning<S>>,
    state: S,
    animated: bool,
    timeout: Option<Duration>,
) -> TransitionOutcome {
    let Some(target) = target.upgrade() else {
        trace!(state = state.name(), "target released, dropping transition");
        return TransitionOutcome::TargetReleased;
    };

    if shared.is_current(&state) {
        debug!(state = state.name(), "state unchanged, skipping transition");
        return TransitionOutcome::SkippedDuplicate;
    }

    let sequence = shared.commit(state.clone());
    debug!(state = state.name(), sequence, "state committed");

    let (completion, signal) = Completion::channel();
    executor.post(Box::new(move || {
        target.transition(&state, animated, completion);
    }));

    await_completion(signal, timeout, sequence).await
}

/// Hold the worker until the target signals completion.
async fn await_completion(
    signal: oneshot::Receiver<()>,
    timeout: Option<Duration>,
    sequence: u64,
) -> TransitionOutcome {
    let finished = match timeout {
        None => signal.await,
        Some(limit) => match tokio::time::timeout(limit, signal).await {
            Ok(finished) => finished,
            Err(_) => {
                warn!(
                    sequence,
                    timeout_ms = limit.as_millis() as u64,
                    "target did not complete transition in time, resuming"
                );
                return TransitionOutcome::TimedOut;
            }
        },
    };

    match finished {
        Ok(()) => TransitionOutcome::Applied,
        Err(_) => {
            warn!(sequence, "target dropped its completion without signalling it");
            TransitionOutcome::Abandoned
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ViewState;
    use crate::machine::executor::PresentationThread;
    use std::sync::Mutex;
    use tokio::time::timeout;

    const WAIT: Duration = Duration::from_secs(5);

    /// Hands every transition to the test, which decides when to complete it.
    struct Probe {
        sender: mpsc::UnboundedSender<(ViewState, bool, Completion)>,
    }

    impl StateTransitioning<ViewState> for Probe {
        fn transition(&self, state: &ViewState, animated: bool, completion: Completion) {
            let _ = self.sender.send((state.clone(), animated, completion));
        }
    }

    fn probe() -> (Arc<Probe>, mpsc::UnboundedReceiver<(ViewState, bool, Completion)>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Arc::new(Probe { sender }), receiver)
    }

    /// Completes immediately and records what it presented.
    #[derive(Default)]
    struct Immediate {
        presented: Mutex<Vec<ViewState>>,
    }

    impl StateTransitioning<ViewState> for Immediate {
        fn transition(&self, state: &ViewState, _animated: bool, completion: Completion) {
            self.presented.lock().unwrap().push(state.clone());
            completion.complete();
        }
    }

    fn machine(presentation: &PresentationThread) -> StateMachine<ViewState> {
        StateMachine::new(presentation.handle()).unwrap()
    }

    /// Enqueue right away and hand back a receiver for the outcome.
    fn request<T: StateTransitioning<ViewState>>(
        machine: &StateMachine<ViewState>,
        target: &Arc<T>,
        state: ViewState,
    ) -> oneshot::Receiver<TransitionOutcome> {
        let (done, outcome) = oneshot::channel();
        machine
            .transition(target, state, true, move |outcome| {
                let _ = done.send(outcome);
            })
            .unwrap();
        outcome
    }

    #[tokio::test]
    async fn first_transition_commits_state() {
        let presentation = PresentationThread::spawn("presentation").unwrap();
        let machine = machine(&presentation);
        let target = Arc::new(Immediate::default());

        assert!(machine.current_state().is_none());

        let outcome = machine
            .transition_and_wait(&target, ViewState::empty(), true)
            .await
            .unwrap();

        assert_eq!(outcome, TransitionOutcome::Applied);
        assert_eq!(machine.current_state(), Some(ViewState::empty()));
        assert_eq!(*target.presented.lock().unwrap(), vec![ViewState::empty()]);
    }

    #[tokio::test]
    async fn duplicate_state_is_skipped_but_completes() {
        let presentation = PresentationThread::spawn("presentation").unwrap();
        let machine = machine(&presentation);
        let target = Arc::new(Immediate::default());

        let first = machine
            .transition_and_wait(&target, ViewState::content(), true)
            .await
            .unwrap();
        let second = machine
            .transition_and_wait(&target, ViewState::content_with_error("ignored"), true)
            .await
            .unwrap();

        assert_eq!(first, TransitionOutcome::Applied);
        assert_eq!(second, TransitionOutcome::SkippedDuplicate);
        assert_eq!(target.presented.lock().unwrap().len(), 1);
        assert_eq!(machine.current_state(), Some(ViewState::content()));
        assert_eq!(machine.history().len(), 1);
    }

    #[tokio::test]
    async fn bare_loading_is_never_a_duplicate() {
        let presentation = PresentationThread::spawn("presentation").unwrap();
        let machine = machine(&presentation);
        let target = Arc::new(Immediate::default());

        for _ in 0..2 {
            let outcome = machine
                .transition_and_wait(&target, ViewState::loading(), false)
                .await
                .unwrap();
            assert_eq!(outcome, TransitionOutcome::Applied);
        }
        assert_eq!(target.presented.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn next_transition_waits_for_completion() {
        let presentation = PresentationThread::spawn("presentation").unwrap();
        let machine = machine(&presentation);
        let (target, mut presented) = probe();

        machine.submit(&target, ViewState::loading(), true).unwrap();
        machine.submit(&target, ViewState::content(), false).unwrap();

        let (state, animated, completion) = timeout(WAIT, presented.recv()).await.unwrap().unwrap();
        assert_eq!(state, ViewState::loading());
        assert!(animated);

        // the second request stays queued while the first is in flight
        assert!(timeout(Duration::from_millis(100), presented.recv()).await.is_err());
        assert_eq!(machine.current_state(), Some(ViewState::loading()));

        completion.complete();

        let (state, animated, completion) = timeout(WAIT, presented.recv()).await.unwrap().unwrap();
        assert_eq!(state, ViewState::content());
        assert!(!animated);
        completion.complete();
    }

    #[tokio::test]
    async fn completion_handler_runs_after_target_completes() {
        let presentation = PresentationThread::spawn("presentation").unwrap();
        let machine = machine(&presentation);
        let (target, mut presented) = probe();
        let (done, mut outcomes) = mpsc::unbounded_channel();

        machine
            .transition(&target, ViewState::empty(), true, move |outcome| {
                let _ = done.send(outcome);
            })
            .unwrap();

        let (_, _, completion) = timeout(WAIT, presented.recv()).await.unwrap().unwrap();
        assert!(outcomes.try_recv().is_err());

        completion.complete();
        let outcome = timeout(WAIT, outcomes.recv()).await.unwrap();
        assert_eq!(outcome, Some(TransitionOutcome::Applied));
    }

    #[tokio::test]
    async fn released_target_is_dropped_silently() {
        let presentation = PresentationThread::spawn("presentation").unwrap();
        let machine = machine(&presentation);
        let (blocker, mut presented) = probe();
        let target = Arc::new(Immediate::default());

        // hold the worker so the second request is still queued when the target goes away
        machine.submit(&blocker, ViewState::loading(), true).unwrap();
        let (done, outcome) = oneshot::channel();
        machine
            .transition(&target, ViewState::content(), true, move |outcome| {
                let _ = done.send(outcome);
            })
            .unwrap();

        let (_, _, completion) = timeout(WAIT, presented.recv()).await.unwrap().unwrap();
        drop(target);
        completion.complete();

        let outcome = timeout(WAIT, outcome).await.unwrap().unwrap();
        assert_eq!(outcome, TransitionOutcome::TargetReleased);
        assert_eq!(machine.current_state(), Some(ViewState::loading()));
    }

    #[tokio::test]
    async fn dropped_completion_resumes_worker() {
        let presentation = PresentationThread::spawn("presentation").unwrap();
        let machine = machine(&presentation);
        let (target, mut presented) = probe();

        machine.submit(&target, ViewState::loading(), true).unwrap();
        let (_, _, completion) = timeout(WAIT, presented.recv()).await.unwrap().unwrap();
        drop(completion);

        let outcome = request(&machine, &target, ViewState::empty());
        let (state, _, completion) = timeout(WAIT, presented.recv()).await.unwrap().unwrap();
        assert_eq!(state, ViewState::empty());
        completion.complete();
        assert_eq!(
            timeout(WAIT, outcome).await.unwrap().unwrap(),
            TransitionOutcome::Applied
        );
    }

    #[tokio::test]
    async fn completion_timeout_releases_worker() {
        let presentation = PresentationThread::spawn("presentation").unwrap();
        let machine = StateMachine::<ViewState>::builder()
            .completion_timeout(Duration::from_millis(50))
            .executor(presentation.handle())
            .build()
            .unwrap();
        let (target, mut presented) = probe();

        let first = request(&machine, &target, ViewState::loading());
        let held = tokio::spawn(async move {
            // keep the completion alive without signalling it
            let (_, _, completion) = presented.recv().await.unwrap();
            tokio::time::sleep(Duration::from_millis(200)).await;
            completion.complete();
            presented
        });

        assert_eq!(
            timeout(WAIT, first).await.unwrap().unwrap(),
            TransitionOutcome::TimedOut
        );
        assert_eq!(machine.current_state(), Some(ViewState::loading()));

        let mut presented = held.await.unwrap();
        let second = request(&machine, &target, ViewState::empty());
        let (_, _, completion) = timeout(WAIT, presented.recv()).await.unwrap().unwrap();
        completion.complete();
        assert_eq!(
            timeout(WAIT, second).await.unwrap().unwrap(),
            TransitionOutcome::Applied
        );
    }

    #[tokio::test]
    async fn history_records_committed_transitions_in_order() {
        let presentation = PresentationThread::spawn("presentation").unwrap();
        let machine = machine(&presentation);
        let target = Arc::new(Immediate::default());

        for state in [
            ViewState::loading(),
            ViewState::content(),
            ViewState::content(),
            ViewState::content_with_error("stale"),
            ViewState::empty(),
        ] {
            machine.transition_and_wait(&target, state, false).await.unwrap();
        }

        let history = machine.history();
        let sequences: Vec<u64> = history.transitions().map(|t| t.sequence).collect();
        assert_eq!(sequences, vec![1, 2, 3]);
        assert_eq!(
            history.get_path(),
            vec![&ViewState::loading(), &ViewState::content(), &ViewState::empty()]
        );
        assert!(history.transitions().next().unwrap().from.is_none());
    }

    #[test]
    fn requests_fail_once_worker_has_stopped() {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();
        let presentation = PresentationThread::spawn("presentation").unwrap();
        let machine = StateMachine::<ViewState>::builder()
            .label("short-lived")
            .executor(presentation.handle())
            .runtime(runtime.handle().clone())
            .build()
            .unwrap();

        // dropping the runtime drops the worker and its queue
        drop(runtime);

        let target = Arc::new(Immediate::default());
        assert!(machine.is_stopped());
        assert!(matches!(
            machine.submit(&target, ViewState::empty(), true),
            Err(TransitionError::WorkerStopped { label }) if label == "short-lived"
        ));
    }
}
