//! `Model`: a configurable recipe for an initial `State` plus a stop rule.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use ares_agent::{State, StateSnapshot};
use ares_core::SimRng;
use ares_params::Parameters;

use crate::{AgentTemplates, ModelError, ModelResult};

/// Lays out the initial grid from the model's parameters and templates.
pub type InitFn =
    Arc<dyn Fn(&Parameters, &AgentTemplates, &mut SimRng) -> ModelResult<State> + Send + Sync>;

/// `(previous, current) -> finished`, evaluated after every step.
pub type ExitFn = Arc<dyn Fn(&StateSnapshot, &StateSnapshot) -> bool + Send + Sync>;

/// A named model: its own parameters, its agent templates, an init function
/// and an exit predicate.  Built by [`ModelBuilder`](crate::ModelBuilder).
#[derive(Clone)]
pub struct Model {
    pub(crate) name:       String,
    pub(crate) parameters: Parameters,
    pub(crate) templates:  AgentTemplates,
    pub(crate) init:       InitFn,
    pub(crate) exit:       ExitFn,
}

impl Model {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn parameters_mut(&mut self) -> &mut Parameters {
        &mut self.parameters
    }

    pub fn templates(&self) -> &AgentTemplates {
        &self.templates
    }

    pub fn templates_mut(&mut self) -> &mut AgentTemplates {
        &mut self.templates
    }

    /// Every unset required key: model keys bare, template keys as
    /// `Template.key`.
    pub fn missing_required(&self) -> Vec<String> {
        let mut missing: Vec<String> = self
            .parameters
            .missing_required()
            .into_iter()
            .map(str::to_owned)
            .collect();
        missing.extend(self.templates.missing_required());
        missing
    }

    pub fn is_runnable(&self) -> bool {
        self.missing_required().is_empty()
    }

    /// Produce the initial state.
    ///
    /// Fails with [`ModelError::NotRunnable`] listing every missing key
    /// before the init function is consulted.
    pub fn init(&self, rng: &mut SimRng) -> ModelResult<State> {
        let missing = self.missing_required();
        if !missing.is_empty() {
            return Err(ModelError::NotRunnable(missing));
        }
        let state = (self.init)(&self.parameters, &self.templates, rng)?;
        debug!(model = %self.name, agents = state.agent_count(), "initial state ready");
        Ok(state)
    }

    pub fn is_finished(&self, previous: &StateSnapshot, current: &StateSnapshot) -> bool {
        (self.exit)(previous, current)
    }
}

impl fmt::Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("name", &self.name)
            .field("parameters", &self.parameters)
            .field("templates", &self.templates)
            .finish_non_exhaustive()
    }
}
