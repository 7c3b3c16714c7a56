//! Agent templates: one factory plus the values its agents start with.

use std::fmt;
use std::sync::Arc;

use ares_agent::Agent;
use ares_behavior::AgentFactory;
use ares_params::Parameters;

use crate::{ModelError, ModelResult};

/// A named kind of agent inside a model.
///
/// `parameters` is the record the user edits while configuring; every agent
/// spawned from the template gets its own copy of it.
#[derive(Clone)]
pub struct AgentTemplate {
    factory:    Arc<dyn AgentFactory>,
    parameters: Parameters,
}

impl AgentTemplate {
    pub fn new(factory: Arc<dyn AgentFactory>) -> ModelResult<Self> {
        let parameters = factory.parameters()?;
        Ok(Self { factory, parameters })
    }

    pub fn agent_type(&self) -> &str {
        self.factory.agent_type()
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn parameters_mut(&mut self) -> &mut Parameters {
        &mut self.parameters
    }

    /// Build one agent with a private copy of this template's values.
    pub fn spawn(&self) -> ModelResult<Agent> {
        Ok(self.factory.create(&self.parameters)?)
    }
}

impl fmt::Debug for AgentTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgentTemplate")
            .field("agent_type", &self.agent_type())
            .field("parameters", &self.parameters)
            .finish()
    }
}

/// Templates by name, in declaration order.
#[derive(Clone, Debug, Default)]
pub struct AgentTemplates {
    entries: Vec<(String, AgentTemplate)>,
}

impl AgentTemplates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, template: AgentTemplate) -> ModelResult<()> {
        let name = name.into();
        if self.contains(&name) {
            return Err(ModelError::Duplicate { what: "agent template", name });
        }
        self.entries.push((name, template));
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    pub fn get(&self, name: &str) -> ModelResult<&AgentTemplate> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, t)| t)
            .ok_or_else(|| ModelError::UnknownAgent(name.to_owned()))
    }

    pub fn get_mut(&mut self, name: &str) -> ModelResult<&mut AgentTemplate> {
        self.entries
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, t)| t)
            .ok_or_else(|| ModelError::UnknownAgent(name.to_owned()))
    }

    /// Spawn one agent from the template called `name`.
    pub fn spawn(&self, name: &str) -> ModelResult<Agent> {
        self.get(name)?.spawn()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AgentTemplate)> {
        self.entries.iter().map(|(n, t)| (n.as_str(), t))
    }

    /// Unset required keys across all templates, as `Template.key`.
    pub fn missing_required(&self) -> Vec<String> {
        self.iter()
            .flat_map(|(name, t)| {
                t.parameters()
                    .missing_required()
                    .into_iter()
                    .map(move |key| format!("{name}.{key}"))
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
