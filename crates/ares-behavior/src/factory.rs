//! Named agent constructors.
//!
//! An [`AgentFactory`] knows one agent kind: its type label, the parameters
//! it declares (with defaults) and the behavior its agents share.  Models
//! keep one factory per agent template and call [`AgentFactory::create`]
//! once per placed agent, so every agent gets its own parameter record.

use std::fmt;
use std::sync::Arc;

use ares_agent::{Agent, AgentBuilder, AgentResult, Behavior, NoopBehavior};
use ares_params::{ParamResult, Parameters};

use crate::labels::{BURNT, FIRE, PREDATOR, PREY, TREE};
use crate::{
    BehaviorError, BehaviorResult, FireBehavior, PredatorBehavior, PreyBehavior,
    SegregationBehavior, fire, predator, prey, segregation,
};

// ── AgentFactory ──────────────────────────────────────────────────────────────

pub trait AgentFactory: Send + Sync {
    /// Label given to every agent this factory builds.
    fn agent_type(&self) -> &str;

    /// A fresh declaration of this kind's parameters, defaults applied.
    fn parameters(&self) -> ParamResult<Parameters>;

    /// Build one agent from a complete parameter record.
    fn build(&self, parameters: Parameters) -> AgentResult<Agent>;

    /// Build one agent, copying every value set in `values` onto a fresh
    /// declaration.  Keys this kind does not declare are ignored.
    fn create(&self, values: &Parameters) -> AgentResult<Agent> {
        let mut parameters = self.parameters()?;
        parameters.apply_values(values)?;
        self.build(parameters)
    }
}

// ── BehaviorFactory ───────────────────────────────────────────────────────────

/// An [`AgentFactory`] made of a type label, a declaration function and a
/// shared behavior.  All built-in kinds are instances of it.
#[derive(Clone)]
pub struct BehaviorFactory {
    agent_type: String,
    declare:    fn() -> ParamResult<Parameters>,
    behavior:   Arc<dyn Behavior>,
}

impl BehaviorFactory {
    pub fn new(
        agent_type: impl Into<String>,
        declare:    fn() -> ParamResult<Parameters>,
        behavior:   impl Behavior + 'static,
    ) -> Self {
        Self {
            agent_type: agent_type.into(),
            declare,
            behavior: Arc::new(behavior),
        }
    }

    pub fn predator() -> Self {
        Self::new(PREDATOR, predator::parameters, PredatorBehavior)
    }

    pub fn prey() -> Self {
        Self::new(PREY, prey::parameters, PreyBehavior)
    }

    /// A segregating agent.  Schelling models use one factory per group,
    /// each with its own label.
    pub fn segregation(agent_type: impl Into<String>) -> Self {
        Self::new(agent_type, segregation::parameters, SegregationBehavior)
    }

    pub fn fire() -> Self {
        Self::new(FIRE, fire::parameters, FireBehavior)
    }

    pub fn tree() -> Self {
        Self::new(TREE, fire::tree_parameters, NoopBehavior)
    }

    pub fn burnt() -> Self {
        Self::new(BURNT, || Ok(Parameters::new()), NoopBehavior)
    }
}

impl AgentFactory for BehaviorFactory {
    fn agent_type(&self) -> &str {
        &self.agent_type
    }

    fn parameters(&self) -> ParamResult<Parameters> {
        (self.declare)()
    }

    fn build(&self, parameters: Parameters) -> AgentResult<Agent> {
        AgentBuilder::new()
            .agent_type(self.agent_type.clone())
            .parameters(parameters)
            .shared_behavior(Arc::clone(&self.behavior))
            .build()
    }
}

impl fmt::Debug for BehaviorFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BehaviorFactory")
            .field("agent_type", &self.agent_type)
            .field("behavior", &self.behavior.name())
            .finish()
    }
}

// ── FactoryRegistry ───────────────────────────────────────────────────────────

/// Factories by name, in registration order.
#[derive(Clone, Default)]
pub struct FactoryRegistry {
    entries: Vec<(String, Arc<dyn AgentFactory>)>,
}

impl FactoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every built-in kind, registered under its type label
    /// (`"Segregation"` for the Schelling agent).
    pub fn builtin() -> Self {
        let mut r = Self::new();
        let builtins = [
            BehaviorFactory::predator(),
            BehaviorFactory::prey(),
            BehaviorFactory::segregation("Segregation"),
            BehaviorFactory::fire(),
            BehaviorFactory::tree(),
            BehaviorFactory::burnt(),
        ];
        for factory in builtins {
            let name = factory.agent_type().to_owned();
            let factory: Arc<dyn AgentFactory> = Arc::new(factory);
            r.entries.push((name, factory));
        }
        r
    }

    pub fn register(
        &mut self,
        name:    impl Into<String>,
        factory: impl AgentFactory + 'static,
    ) -> BehaviorResult<()> {
        let name = name.into();
        if self.contains(&name) {
            return Err(BehaviorError::DuplicateAgent(name));
        }
        let factory: Arc<dyn AgentFactory> = Arc::new(factory);
        self.entries.push((name, factory));
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    pub fn get(&self, name: &str) -> BehaviorResult<Arc<dyn AgentFactory>> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, f)| Arc::clone(f))
            .ok_or_else(|| BehaviorError::UnknownAgent(name.to_owned()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// Look up `name` and build one agent from `values`.
    pub fn create(&self, name: &str, values: &Parameters) -> BehaviorResult<Agent> {
        Ok(self.get(name)?.create(values)?)
    }
}
