//! Reference content state: loading, empty or content.

use super::state::{ContentState, State};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Opaque, human-readable application error carried by a [`ViewState`].
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct StateError {
    message: String,
}

impl StateError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Capture the description of any error.
    pub fn from_error(error: &(dyn std::error::Error + 'static)) -> Self {
        Self::new(error.to_string())
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<&str> for StateError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<String> for StateError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

/// What a view currently shows.
///
/// `Loading` wraps the state that was showing when loading started, so a
/// refresh over existing content keeps reporting that content exists.
///
/// # Example
///
/// ```rust
/// use viewstate::core::{ContentState, State, StateError, ViewState};
///
/// let refreshing = ViewState::loading_over(ViewState::content());
/// assert!(refreshing.is_loading());
/// assert!(refreshing.has_content());
///
/// let failed = ViewState::loading_over(ViewState::empty_with_error(StateError::new("offline")));
/// assert!(!failed.has_content());
/// assert_eq!(failed.error().map(|e| e.message()), Some("offline"));
///
/// // bare loading states never compare equal, not even to themselves
/// assert!(!ViewState::loading().compares_equal_to(&ViewState::loading()));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ViewState {
    /// Loading, optionally on top of a previous state
    Loading(Option<Box<ViewState>>),

    /// Nothing to show, optionally because of an error
    Empty(Option<StateError>),

    /// Content is shown, optionally alongside an error
    Content(Option<StateError>),
}

impl ViewState {
    pub fn loading() -> Self {
        Self::Loading(None)
    }

    pub fn loading_over(inner: ViewState) -> Self {
        Self::Loading(Some(Box::new(inner)))
    }

    pub fn empty() -> Self {
        Self::Empty(None)
    }

    pub fn empty_with_error(error: impl Into<StateError>) -> Self {
        Self::Empty(Some(error.into()))
    }

    pub fn content() -> Self {
        Self::Content(None)
    }

    pub fn content_with_error(error: impl Into<StateError>) -> Self {
        Self::Content(Some(error.into()))
    }

    /// The state wrapped by a `Loading` state.
    pub fn inner(&self) -> Option<&ViewState> {
        match self {
            Self::Loading(inner) => inner.as_deref(),
            _ => None,
        }
    }
}

impl State for ViewState {
    fn compares_equal_to(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Loading(Some(lhs)), Self::Loading(Some(rhs))) => lhs.compares_equal_to(rhs),
            // an absent inner state is never equal to anything
            (Self::Loading(_), Self::Loading(_)) => false,
            (Self::Empty(_), Self::Empty(_)) => true,
            (Self::Content(_), Self::Content(_)) => true,
            _ => false,
        }
    }

    fn name(&self) -> &str {
        match self {
            Self::Loading(_) => "Loading",
            Self::Empty(_) => "Empty",
            Self::Content(_) => "Content",
        }
    }
}

impl ContentState for ViewState {
    type Error = StateError;

    fn is_loading(&self) -> bool {
        matches!(self, Self::Loading(_))
    }

    fn has_content(&self) -> bool {
        match self {
            Self::Content(_) => true,
            Self::Loading(inner) => inner.as_ref().is_some_and(|s| s.has_content()),
            Self::Empty(_) => false,
        }
    }

    fn error(&self) -> Option<&StateError> {
        match self {
            Self::Empty(error) | Self::Content(error) => error.as_ref(),
            Self::Loading(inner) => inner.as_ref().and_then(|s| s.error()),
        }
    }
}
