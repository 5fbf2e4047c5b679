//! Completion signalling between the presentation executor and the worker.

use tokio::sync::oneshot;

/// Final result of a transition request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// The state was committed and the target finished presenting it
    Applied,

    /// The state compared equal to the current state; nothing happened
    SkippedDuplicate,

    /// The target was released before the request was processed
    TargetReleased,

    /// The state was committed but the target dropped its completion
    /// without signalling it
    Abandoned,

    /// The state was committed but the target did not signal completion
    /// within the configured timeout
    TimedOut,
}

impl TransitionOutcome {
    /// Whether the requested state became the current state.
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Applied | Self::Abandoned | Self::TimedOut)
    }
}

/// Caller-supplied handler, invoked exactly once per request.
pub type CompletionHandler = Box<dyn FnOnce(TransitionOutcome) + Send + 'static>;

/// Handle a target uses to signal that its presentation work is done.
///
/// The state machine processes no further request until this handle is
/// completed or dropped.
#[derive(Debug)]
#[must_use = "the state machine stays suspended until the completion is signalled"]
pub struct Completion {
    signal: oneshot::Sender<()>,
}

impl Completion {
    pub(crate) fn channel() -> (Self, oneshot::Receiver<()>) {
        let (signal, receiver) = oneshot::channel();
        (Self { signal }, receiver)
    }

    /// A completion nobody waits for, for driving a target directly.
    pub fn detached() -> Self {
        Self::channel().0
    }

    /// Signal that the transition has finished.
    pub fn complete(self) {
        // the worker may have given up waiting after a timeout
        let _ = self.signal.send(());
    }

    /// Whether the worker is no longer waiting for this completion.
    pub fn is_abandoned(&self) -> bool {
        self.signal.is_closed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn complete_signals_receiver() {
        let (completion, receiver) = Completion::channel();
        completion.complete();
        assert!(receiver.await.is_ok());
    }

    #[tokio::test]
    async fn dropped_completion_closes_receiver() {
        let (completion, receiver) = Completion::channel();
        drop(completion);
        assert!(receiver.await.is_err());
    }

    #[test]
    fn detached_completion_is_abandoned() {
        let completion = Completion::detached();
        assert!(completion.is_abandoned());
        completion.complete();
    }

    #[test]
    fn committed_outcomes() {
        assert!(TransitionOutcome::Applied.is_committed());
        assert!(TransitionOutcome::TimedOut.is_committed());
        assert!(TransitionOutcome::Abandoned.is_committed());
        assert!(!TransitionOutcome::SkippedDuplicate.is_committed());
        assert!(!TransitionOutcome::TargetReleased.is_committed());
    }
}
