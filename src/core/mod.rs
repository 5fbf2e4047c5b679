//! Pure core of view-state transitions.
//!
//! This module contains everything that has no side effects:
//! - State definitions via the `State` and `ContentState` traits
//! - The reference `ViewState`
//! - The decision engine mapping a content state to show/hide steps
//! - Immutable history of committed transitions

mod decision;
mod history;
mod state;
mod view_state;

pub use decision::{plan, Presentation, TransitionPlan, TransitionStep};
pub use history::{StateHistory, StateTransition};
pub use state::{ContentState, State};
pub use view_state::{StateError, ViewState};
