//! History of committed state transitions.
//!
//! Only transitions that were committed by the state machine are recorded:
//! duplicates and transitions for released targets never reach the
//! history. The history lives in memory only.

use super::state::State;
use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use std::time::Duration;

/// Record of a single committed transition.
#[derive(Clone, Debug)]
pub struct StateTransition<S: State> {
    /// The state that was current before, `None` for the first transition
    pub from: Option<S>,
    /// The committed state
    pub to: S,
    /// When the state was committed
    pub timestamp: DateTime<Utc>,
    /// Position of this transition among all commits of the machine
    pub sequence: u64,
}

/// Ordered history of committed transitions.
///
/// History is immutable - the `record` method returns a new history
/// with the transition added. With a capacity set, only the most recent
/// transitions are kept.
///
/// # Example
///
/// ```rust
/// use viewstate::core::{StateHistory, StateTransition, ViewState};
/// use chrono::Utc;
///
/// let history = StateHistory::new()
///     .record(StateTransition {
///         from: None,
///         to: ViewState::loading(),
///         timestamp: Utc::now(),
///         sequence: 1,
///     })
///     .record(StateTransition {
///         from: Some(ViewState::loading()),
///         to: ViewState::content(),
///         timestamp: Utc::now(),
///         sequence: 2,
///     });
///
/// let path = history.get_path();
/// assert_eq!(path.len(), 2); // Loading -> Content
/// ```
#[derive(Clone, Debug)]
pub struct StateHistory<S: State> {
    transitions: VecDeque<StateTransition<S>>,
    capacity: Option<usize>,
}

impl<S: State> Default for StateHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StateHistory<S> {
    /// Create a new, unbounded, empty history.
    pub fn new() -> Self {
        Self {
            transitions: VecDeque::new(),
            capacity: None,
        }
    }

    /// Create an empty history keeping at most `capacity` transitions.
    ///
    /// Storage grows with the retained transitions, not with `capacity`.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            transitions: VecDeque::new(),
            capacity: Some(capacity),
        }
    }

    /// Record a transition, returning a new history.
    pub fn record(&self, transition: StateTransition<S>) -> Self {
        let mut next = self.clone();
        next.push(transition);
        next
    }

    pub(crate) fn push(&mut self, transition: StateTransition<S>) {
        self.transitions.push_back(transition);
        if let Some(capacity) = self.capacity {
            while self.transitions.len() > capacity {
                self.transitions.pop_front();
            }
        }
    }

    /// Get the path of states traversed.
    ///
    /// Starts with the `from` state of the oldest retained transition when
    /// there is one, followed by the `to` state of each transition.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::new();
        if let Some(from) = self.transitions.front().and_then(|t| t.from.as_ref()) {
            path.push(from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Time between the oldest and newest retained transitions.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.front(), self.transitions.back()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// Retained transitions, oldest first.
    pub fn transitions(&self) -> impl ExactSizeIterator<Item = &StateTransition<S>> {
        self.transitions.iter()
    }

    pub fn last(&self) -> Option<&StateTransition<S>> {
        self.transitions.back()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }
}
