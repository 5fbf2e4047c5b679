//! Core state traits for view-state transitions.
//!
//! A [`State`] only needs to know whether it is equivalent to another
//! state. A [`ContentState`] additionally describes what the view has to
//! show: whether content exists, whether loading is in progress and
//! whether an error should be surfaced.

use std::fmt::{Debug, Display};

/// Trait for states driven through a state machine.
///
/// Equivalence is deliberately not `PartialEq`: two states may carry
/// different payloads (an error message, for example) and still be the
/// same state as far as the view is concerned.
///
/// # Required Traits
///
/// - `Clone`: the machine keeps its own copy of the committed state
/// - `Debug`: states show up in tracing output
/// - `Send` + `Sync`: states cross from the worker to the presentation executor
///
/// # Example
///
/// ```rust
/// use viewstate::core::State;
///
/// #[derive(Clone, Debug)]
/// enum Screen {
///     Idle,
///     Busy { progress: u8 },
/// }
///
/// impl State for Screen {
///     fn compares_equal_to(&self, other: &Self) -> bool {
///         matches!(
///             (self, other),
///             (Self::Idle, Self::Idle) | (Self::Busy { .. }, Self::Busy { .. })
///         )
///     }
/// }
///
/// assert!(Screen::Busy { progress: 10 }.compares_equal_to(&Screen::Busy { progress: 90 }));
/// assert!(!Screen::Idle.compares_equal_to(&Screen::Busy { progress: 0 }));
/// ```
pub trait State: Clone + Debug + Send + Sync + 'static {
    /// Check if `self` compares equal to `other`.
    ///
    /// The state machine skips a transition when the new state compares
    /// equal to the current one.
    fn compares_equal_to(&self, other: &Self) -> bool;

    /// Get the state's name for logging.
    ///
    /// Default implementation returns `"state"`.
    fn name(&self) -> &str {
        "state"
    }
}

/// A state that describes which visual categories a view should present.
pub trait ContentState: State {
    /// Application error carried by the state. The core never inspects it
    /// beyond presence; it is forwarded to the error hooks.
    type Error: Clone + Display + Debug + Send + Sync + 'static;

    /// Whether content is being loaded.
    fn is_loading(&self) -> bool;

    /// Whether content is available.
    fn has_content(&self) -> bool;

    /// The associated error, if any.
    fn error(&self) -> Option<&Self::Error>;
}
