//! Fluent `AgentBuilder`.
//!
//! # Example
//!
//! ```rust,ignore
//! let prey = AgentBuilder::new()
//!     .agent_type("Prey")
//!     .parameter(Parameter::of::<i64>("visionRadius").required().with_value(2)?)
//!     .behavior(PreyBehavior)
//!     .build()?;
//! ```

use std::sync::Arc;

use ares_params::{Parameter, Parameters};

use crate::{Agent, AgentError, AgentResult, Behavior};

/// Type label given to agents whose builder never set one.
pub const DEFAULT_AGENT_TYPE: &str = "Agent";

/// Collects a type label, parameters and exactly one behavior, then builds
/// one [`Agent`] with a fresh id.
pub struct AgentBuilder {
    agent_type: String,
    parameters: Parameters,
    behavior:   Option<Arc<dyn Behavior>>,
    error:      Option<String>,
}

impl Default for AgentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentBuilder {
    pub fn new() -> Self {
        Self {
            agent_type: DEFAULT_AGENT_TYPE.to_owned(),
            parameters: Parameters::new(),
            behavior:   None,
            error:      None,
        }
    }

    pub fn agent_type(mut self, agent_type: impl Into<String>) -> Self {
        self.agent_type = agent_type.into();
        self
    }

    /// Declare a parameter.  A duplicate key is remembered and reported by
    /// [`build`](Self::build).
    pub fn parameter(mut self, param: Parameter) -> Self {
        if let Err(e) = self.parameters.insert(param) {
            self.error.get_or_insert(e.to_string());
        }
        self
    }

    /// Replace the whole parameter record.
    pub fn parameters(mut self, parameters: Parameters) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn behavior(mut self, behavior: impl Behavior + 'static) -> Self {
        self.behavior = Some(Arc::new(behavior));
        self
    }

    /// Share an existing behavior handle (one per factory).
    pub fn shared_behavior(mut self, behavior: Arc<dyn Behavior>) -> Self {
        self.behavior = Some(behavior);
        self
    }

    /// Build the agent.
    ///
    /// Fails with `IllegalState` if no behavior was registered or a
    /// parameter key was declared twice.  Required parameters may still be
    /// unset here; behaviors report them as `MissingParameter` when they run.
    pub fn build(self) -> AgentResult<Agent> {
        if let Some(e) = self.error {
            return Err(AgentError::IllegalState(e));
        }
        let behavior = self
            .behavior
            .ok_or_else(|| AgentError::IllegalState("agent has no behavior".into()))?;
        Ok(Agent::new(self.agent_type, self.parameters, behavior))
    }
}
