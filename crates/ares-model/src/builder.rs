//! Fluent builder for [`Model`].
//!
//! # Example
//!
//! ```rust,ignore
//! let model = ModelBuilder::new("Single Prey")
//!     .parameter(Parameter::of::<i64>("size").required())
//!     .agent("Prey", BehaviorFactory::prey())
//!     .init(|params, templates, _rng| {
//!         let size = params.require::<i64>("size")? as u32;
//!         let mut state = State::new(size, size);
//!         state.add_agent(Pos::new(0, 0), templates.spawn("Prey")?)?;
//!         Ok(state)
//!     })
//!     .exit(|_, current| current.agent_count() == 0)
//!     .build()?;
//! ```

use std::sync::Arc;

use ares_agent::{State, StateSnapshot};
use ares_behavior::AgentFactory;
use ares_core::SimRng;
use ares_params::{ParamValue, Parameter, Parameters};

use crate::{AgentTemplate, AgentTemplates, ExitFn, InitFn, Model, ModelError, ModelResult};

/// Accumulates a name, model parameters, agent templates, one init function
/// and one exit predicate.
///
/// Declaration errors (duplicate keys or template names) are remembered and
/// reported by [`build`](Self::build), so the chain never breaks midway.
pub struct ModelBuilder {
    name:       String,
    parameters: Parameters,
    templates:  AgentTemplates,
    init:       Option<InitFn>,
    exit:       Option<ExitFn>,
    error:      Option<ModelError>,
}

impl ModelBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name:       name.into(),
            parameters: Parameters::new(),
            templates:  AgentTemplates::new(),
            init:       None,
            exit:       None,
            error:      None,
        }
    }

    fn fail(&mut self, e: ModelError) {
        self.error.get_or_insert(e);
    }

    /// Declare a model parameter.
    pub fn parameter(mut self, param: Parameter) -> Self {
        if let Err(e) = self.parameters.insert(param) {
            self.fail(e.into());
        }
        self
    }

    /// Declare an agent template called `name`, with the factory's default
    /// values.
    pub fn agent(self, name: impl Into<String>, factory: impl AgentFactory + 'static) -> Self {
        self.shared_agent(name, Arc::new(factory))
    }

    pub fn shared_agent(mut self, name: impl Into<String>, factory: Arc<dyn AgentFactory>) -> Self {
        let result = AgentTemplate::new(factory).and_then(|t| self.templates.insert(name, t));
        if let Err(e) = result {
            self.fail(e);
        }
        self
    }

    /// Override a default value on an already declared template.
    pub fn agent_value(
        mut self,
        name:  &str,
        key:   &str,
        value: impl Into<ParamValue>,
    ) -> Self {
        let result = self
            .templates
            .get_mut(name)
            .and_then(|t| t.parameters_mut().set(key, value).map_err(ModelError::from));
        if let Err(e) = result {
            self.fail(e);
        }
        self
    }

    pub fn init(
        mut self,
        f: impl Fn(&Parameters, &AgentTemplates, &mut SimRng) -> ModelResult<State> + Send + Sync + 'static,
    ) -> Self {
        self.init = Some(Arc::new(f));
        self
    }

    pub fn exit(
        mut self,
        f: impl Fn(&StateSnapshot, &StateSnapshot) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.exit = Some(Arc::new(f));
        self
    }

    /// Fails with `IllegalState` if the init function or exit predicate is
    /// missing, or with the first declaration error.
    pub fn build(self) -> ModelResult<Model> {
        if let Some(e) = self.error {
            return Err(e);
        }
        let init = self
            .init
            .ok_or_else(|| ModelError::IllegalState(format!("model `{}` has no init function", self.name)))?;
        let exit = self
            .exit
            .ok_or_else(|| ModelError::IllegalState(format!("model `{}` has no exit predicate", self.name)))?;
        Ok(Model {
            name: self.name,
            parameters: self.parameters,
            templates: self.templates,
            init,
            exit,
        })
    }
}
