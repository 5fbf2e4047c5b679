//! Target contracts and the glue between state machine and controller.
//!
//! - `StateTransitioning`: what the state machine drives
//! - `ViewStateTransitioning`: show/hide operations per category
//! - `Transitioner`: applies decision plans to a controller
//! - `Stateful`: caller-facing `set_state`/`current_state`

mod stateful;
mod target;
mod transitioner;

pub use stateful::{HasStateMachine, Stateful, StatefulBinding};
pub use target::{StateTransitioning, ViewStateTransitioning};
pub use transitioner::{apply, Transitioner};
