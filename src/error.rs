//! Error types for state machine construction and transition requests.

use thiserror::Error;

/// Errors returned by the state machine.
///
/// Skipped duplicates and released targets are not errors; they are
/// reported as a [`TransitionOutcome`](crate::machine::TransitionOutcome).
#[derive(Debug, Error)]
pub enum TransitionError {
    #[error("State machine worker '{label}' has stopped")]
    WorkerStopped { label: String },

    #[error("Transition outcome was dropped before it was reported")]
    OutcomeDropped,

    #[error("No tokio runtime available to spawn the state machine worker")]
    NoRuntime,

    #[error("Invalid state machine configuration: {}", format_config_errors(.0))]
    Config(Vec<ConfigError>),
}

/// Problems found while validating a [`MachineConfig`](crate::machine::MachineConfig).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("Machine label must not be empty")]
    EmptyLabel,

    #[error("Completion timeout must be greater than zero")]
    ZeroTimeout,

    #[error("History capacity must be greater than zero")]
    ZeroHistoryCapacity,

    #[error("A presentation executor is required. Call .executor(..) before .build()")]
    MissingExecutor,

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

fn format_config_errors(errors: &[ConfigError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
