//! `Agent`: one occupant of a grid cell.

use std::fmt;
use std::sync::Arc;

use ares_core::AgentId;
use ares_params::{Access, ParamError, ParamValue, Parameters};

use crate::{AgentError, AgentResult, Behavior};

/// A stateful entity placed on a grid cell.
///
/// Owns a private `Parameters` record; the behavior is shared with every
/// sibling built by the same factory.  `Agent` is deliberately not `Clone`:
/// a copy would carry the same id and break identity.
pub struct Agent {
    id:         AgentId,
    agent_type: String,
    parameters: Parameters,
    behavior:   Arc<dyn Behavior>,
}

impl Agent {
    pub(crate) fn new(
        agent_type: String,
        parameters: Parameters,
        behavior:   Arc<dyn Behavior>,
    ) -> Self {
        Self {
            id: AgentId::next(),
            agent_type,
            parameters,
            behavior,
        }
    }

    pub fn id(&self) -> AgentId {
        self.id
    }

    /// The type label other behaviors match on (`"Prey"`, `"Tree"`, ...).
    pub fn agent_type(&self) -> &str {
        &self.agent_type
    }

    pub fn is_type(&self, agent_type: &str) -> bool {
        self.agent_type == agent_type
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Unrestricted write access, for configuring an agent before it runs.
    pub fn parameters_mut(&mut self) -> &mut Parameters {
        &mut self.parameters
    }

    /// Record a run-time output value.
    ///
    /// Only keys declared with [`Access::Observed`] may be written here;
    /// configuration inputs stay fixed once the simulation is running.
    pub fn observe(&mut self, key: &str, value: impl Into<ParamValue>) -> AgentResult<()> {
        match self.parameters.parameter(key).map(|p| p.access()) {
            Some(Access::Observed) => Ok(self.parameters.set(key, value)?),
            Some(Access::Config) => Err(AgentError::IllegalState(format!(
                "`{key}` is a configuration parameter and cannot be observed"
            ))),
            None => Err(ParamError::NotFound(key.to_owned()).into()),
        }
    }

    /// Clear a run-time output value.
    pub fn clear_observed(&mut self, key: &str) -> AgentResult<()> {
        match self.parameters.parameter(key).map(|p| p.access()) {
            Some(Access::Observed) => Ok(self.parameters.clear(key)?),
            Some(Access::Config) => Err(AgentError::IllegalState(format!(
                "`{key}` is a configuration parameter and cannot be cleared at run time"
            ))),
            None => Err(ParamError::NotFound(key.to_owned()).into()),
        }
    }

    /// A shared handle to this agent's behavior.
    pub fn behavior(&self) -> Arc<dyn Behavior> {
        Arc::clone(&self.behavior)
    }
}

impl fmt::Debug for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Agent")
            .field("id", &self.id)
            .field("agent_type", &self.agent_type)
            .field("behavior", &self.behavior.name())
            .field("parameters", &self.parameters)
            .finish()
    }
}
