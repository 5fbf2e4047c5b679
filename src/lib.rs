//! Viewstate: serialized, deduplicated view-state transitions
//!
//! Viewstate keeps a view's loading, empty, error and content presentation
//! consistent while state changes arrive asynchronously. It follows a
//! "pure core, imperative shell" layout: deciding what to show is a pure
//! function of the state, while the state machine around it serializes
//! requests and hands the visual work to a presentation executor.
//!
//! # Core Concepts
//!
//! - **State**: application-defined values compared with `compares_equal_to`
//! - **ContentState**: states describing loading, content and error
//! - **Decision engine**: maps a content state to ordered show/hide steps
//! - **State machine**: one transition in flight at a time, in request
//!   order, skipping states equal to the current one
//! - **Overlays**: a default presentation of each category in a container
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use viewstate::core::ViewState;
//! use viewstate::machine::{PresentationThread, StateMachine, TransitionOutcome};
//! use viewstate::overlay::{OverlayPresenter, OverlayStack, Rect, ViewCategory};
//! use viewstate::transitioning::StatefulBinding;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let presentation = PresentationThread::spawn("presentation").unwrap();
//! let screen = Arc::new(OverlayPresenter::new(OverlayStack::new(Rect::new(
//!     0.0, 0.0, 320.0, 480.0,
//! ))));
//! let binding = StatefulBinding::new(StateMachine::<ViewState>::new(presentation.handle()).unwrap(), &screen);
//!
//! binding.set_state_and_wait(ViewState::loading(), true).await.unwrap();
//! assert_eq!(screen.container().count(ViewCategory::Loading), 1);
//!
//! let outcome = binding.set_state_and_wait(ViewState::empty(), true).await.unwrap();
//! assert_eq!(outcome, TransitionOutcome::Applied);
//! assert_eq!(screen.container().count(ViewCategory::Loading), 0);
//! assert_eq!(screen.container().count(ViewCategory::Empty), 1);
//! # }
//! ```

pub mod core;
pub mod error;
pub mod machine;
pub mod overlay;
pub mod transitioning;

// Re-export commonly used types
pub use crate::core::{ContentState, State, StateError, ViewState};
pub use crate::error::{ConfigError, TransitionError};
pub use crate::machine::{Completion, StateMachine, TransitionOutcome};
pub use crate::transitioning::{Stateful, StatefulBinding, StateTransitioning, ViewStateTransitioning};
