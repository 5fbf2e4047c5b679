//! State machine configuration and builder.

use crate::core::State;
use crate::error::{ConfigError, TransitionError};
use crate::machine::executor::PresentationExecutor;
use crate::machine::state_machine::StateMachine;
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use tokio::runtime::Handle;

/// Default label used in logs and errors.
pub const DEFAULT_LABEL: &str = "viewstate.machine";

/// Default number of committed transitions kept in history.
pub const DEFAULT_HISTORY_CAPACITY: usize = 64;

/// Tunables of a state machine.
///
/// Missing fields take their default when deserialized.
///
/// # Example
///
/// ```rust
/// use viewstate::machine::MachineConfig;
/// use std::time::Duration;
///
/// let config = MachineConfig::from_json(r#"{ "label": "inbox", "completion_timeout_ms": 500 }"#).unwrap();
/// assert_eq!(config.label, "inbox");
/// assert_eq!(config.completion_timeout(), Some(Duration::from_millis(500)));
/// assert_eq!(config.history_capacity, Some(64));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// Name of the machine in logs
    pub label: String,

    /// How long to wait for a target to signal completion. `None` waits
    /// forever.
    pub completion_timeout_ms: Option<u64>,

    /// How many committed transitions to keep. `None` keeps all of them.
    pub history_capacity: Option<usize>,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            label: DEFAULT_LABEL.to_string(),
            completion_timeout_ms: None,
            history_capacity: Some(DEFAULT_HISTORY_CAPACITY),
        }
    }
}

impl MachineConfig {
    /// Parse a configuration from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self, TransitionError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| TransitionError::Config(vec![ConfigError::Parse(e.to_string())]))?;
        config.into_validated()
    }

    pub fn completion_timeout(&self) -> Option<Duration> {
        self.completion_timeout_ms.map(Duration::from_millis)
    }

    /// Validate every field, accumulating ALL problems.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<ConfigError>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<ConfigError>>> = Vec::new();

        checks.push(if self.label.trim().is_empty() {
            Validation::fail(ConfigError::EmptyLabel)
        } else {
            Validation::success(())
        });

        checks.push(if self.completion_timeout_ms == Some(0) {
            Validation::fail(ConfigError::ZeroTimeout)
        } else {
            Validation::success(())
        });

        checks.push(if self.history_capacity == Some(0) {
            Validation::fail(ConfigError::ZeroHistoryCapacity)
        } else {
            Validation::success(())
        });

        Validation::all_vec(checks).map(|_| ())
    }

    /// Validate and return the configuration, or every problem found.
    pub fn into_validated(self) -> Result<Self, TransitionError> {
        match self.validate() {
            Validation::Success(_) => Ok(self),
            Validation::Failure(errors) => Err(TransitionError::Config(
                errors.iter().cloned().collect(),
            )),
        }
    }
}

/// Builder for constructing state machines with a fluent API.
///
/// A presentation executor is required. The worker task is spawned on
/// the runtime given with [`runtime`](Self::runtime), or on the current
/// tokio runtime.
pub struct StateMachineBuilder<S: State> {
    config: MachineConfig,
    executor: Option<Arc<dyn PresentationExecutor>>,
    runtime: Option<Handle>,
    _phantom: PhantomData<S>,
}

impl<S: State> StateMachineBuilder<S> {
    pub fn new() -> Self {
        Self {
            config: MachineConfig::default(),
            executor: None,
            runtime: None,
            _phantom: PhantomData,
        }
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: MachineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.config.label = label.into();
        self
    }

    /// Stop waiting for a target after `timeout`.
    ///
    /// Rounded up to whole milliseconds; only a zero `timeout` is rejected
    /// by [`build`](Self::build). The runtime must have its time driver
    /// enabled.
    pub fn completion_timeout(mut self, timeout: Duration) -> Self {
        self.config.completion_timeout_ms = Some(timeout_millis(timeout));
        self
    }

    pub fn history_capacity(mut self, capacity: usize) -> Self {
        self.config.history_capacity = Some(capacity);
        self
    }

    pub fn unbounded_history(mut self) -> Self {
        self.config.history_capacity = None;
        self
    }

    /// Set the executor all target operations run on (required).
    pub fn executor<E: PresentationExecutor>(mut self, executor: E) -> Self {
        self.executor = Some(Arc::new(executor));
        self
    }

    /// Spawn the worker on this runtime instead of the current one.
    pub fn runtime(mut self, runtime: Handle) -> Self {
        self.runtime = Some(runtime);
        self
    }

    /// Build the state machine.
    /// Returns an error listing every configuration problem found.
    pub fn build(self) -> Result<StateMachine<S>, TransitionError> {
        let mut errors: Vec<ConfigError> = match self.config.validate() {
            Validation::Success(_) => Vec::new(),
            Validation::Failure(errors) => errors.iter().cloned().collect(),
        };
        if self.executor.is_none() {
            errors.push(ConfigError::MissingExecutor);
        }

        let executor = match self.executor {
            Some(executor) if errors.is_empty() => executor,
            _ => return Err(TransitionError::Config(errors)),
        };

        let runtime = match self.runtime {
            Some(runtime) => runtime,
            None => Handle::try_current().map_err(|_| TransitionError::NoRuntime)?,
        };

        Ok(StateMachine::spawn(self.config, executor, &runtime))
    }
}

fn timeout_millis(timeout: Duration) -> u64 {
    let millis = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
    if millis == 0 && !timeout.is_zero() {
        1
    } else {
        millis
    }
}

impl<S: State> Default for StateMachineBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}
