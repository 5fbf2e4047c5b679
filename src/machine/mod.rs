//! State machine runtime: the imperative shell around the pure core.
//!
//! # Key Concepts
//!
//! - **Worker**: one tokio task per machine, processing requests in order
//! - **Presentation executor**: the only context that touches targets
//! - **Completion**: the gate holding the worker until a target is done
//! - **Configuration**: validated settings and a fluent builder

mod completion;
mod config;
mod executor;
mod state_machine;

pub use completion::{Completion, CompletionHandler, TransitionOutcome};
pub use config::{MachineConfig, StateMachineBuilder, DEFAULT_HISTORY_CAPACITY, DEFAULT_LABEL};
pub use executor::{
    presentation_loop, PresentationExecutor, PresentationHandle, PresentationLoop,
    PresentationTask, PresentationThread,
};
pub use state_machine::StateMachine;
