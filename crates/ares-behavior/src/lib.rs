//! `ares-behavior`: the built-in behavior library and agent factories.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                      |
//! |-----------------|---------------------------------------------------------------|
//! | [`labels`]      | Agent type labels and parameter keys shared across behaviors  |
//! | [`predator`]    | `PredatorBehavior`: eat the first prey in sight               |
//! | [`prey`]        | `PreyBehavior`: flee from the centroid of nearby predators    |
//! | [`segregation`] | `SegregationBehavior`: Schelling relocation                   |
//! | [`fire`]        | `FireBehavior`: directional spread and fuel depletion         |
//! | [`factory`]     | `AgentFactory` trait, `BehaviorFactory`, `FactoryRegistry`    |
//! | [`error`]       | `BehaviorError`, `BehaviorResult<T>`                          |
//!
//! # Design notes
//!
//! Behaviors hold no state.  Every input is a parameter on the acting agent,
//! read through `state.agent_at(pos)` at the start of the tick; a missing
//! required input surfaces as `ParamError::MissingParameter`.
//!
//! Trees and burnt cells are passive: they use `NoopBehavior` and only
//! matter because fire looks for them.

pub mod error;
pub mod factory;
pub mod fire;
pub mod labels;
pub mod predator;
pub mod prey;
pub mod segregation;

#[cfg(test)]
mod tests;

pub use error::{BehaviorError, BehaviorResult};
pub use factory::{AgentFactory, BehaviorFactory, FactoryRegistry};
pub use fire::FireBehavior;
pub use predator::PredatorBehavior;
pub use prey::PreyBehavior;
pub use segregation::SegregationBehavior;

// ── Shared helpers ────────────────────────────────────────────────────────────

use ares_agent::{Agent, AgentResult, State, StateError};
use ares_core::Pos;
use ares_params::ParamError;

/// The agent whose turn it is.
pub(crate) fn acting(state: &State, pos: Pos) -> AgentResult<&Agent> {
    state.agent_at(pos).ok_or_else(|| StateError::NotFound(pos).into())
}

pub(crate) fn acting_mut(state: &mut State, pos: Pos) -> AgentResult<&mut Agent> {
    state.agent_at_mut(pos).ok_or_else(|| StateError::NotFound(pos).into())
}

/// Read a strictly positive integer radius.
pub(crate) fn radius_param(agent: &Agent, key: &str) -> AgentResult<u32> {
    let raw = agent.parameters().require::<i64>(key)?;
    u32::try_from(raw)
        .ok()
        .filter(|r| *r > 0)
        .ok_or_else(|| {
            ParamError::DomainValidation {
                key:    key.to_owned(),
                value:  raw.to_string(),
                domain: "radius must be a positive integer".into(),
            }
            .into()
        })
}
