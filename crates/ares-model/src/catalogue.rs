//! The built-in models.
//!
//! Each model lays its agents out on a random square grid of side `size`
//! and exposes one template per agent kind.  Grid size and agent counts are
//! required and have no default; template values come with usable defaults.

use ares_agent::State;
use ares_behavior::labels::{
    DIRECTION, FIRE, PREDATOR, PREY, RADIUS, THRESHOLD, TREE, VISION_RADIUS,
    VISION_RADIUS_PREDATOR, VISION_RADIUS_PREY,
};
use ares_behavior::{BehaviorFactory, FactoryRegistry};
use ares_core::{DirectionVector, SimRng};
use ares_params::{Parameter, ParameterDomain, Parameters};

use crate::{AgentTemplates, Model, ModelBuilder, ModelError, ModelResult};

pub const PREDATOR_PREY: &str = "Predator-Prey";
pub const SCHELLING: &str = "Schelling";
pub const FIRE_SPREAD: &str = "Fire Spread";

pub const SIZE: &str = "size";
pub const MAX_SIZE: i64 = 1_000;

pub const NUMBER_OF_PREDATORS: &str = "numberOfPredators";
pub const NUMBER_OF_PREYS: &str = "numberOfPreys";
pub const NUMBER_OF_TYPE_A: &str = "numberOfAgentsTypeA";
pub const NUMBER_OF_TYPE_B: &str = "numberOfAgentsTypeB";
pub const NUMBER_OF_FIRES: &str = "numberOfFires";
pub const NUMBER_OF_TREES: &str = "numberOfTrees";

pub const TYPE_A: &str = "TypeA";
pub const TYPE_B: &str = "TypeB";

// ── Models ────────────────────────────────────────────────────────────────────

/// Predators hunt prey; finished once no prey is left.
pub fn predator_prey() -> ModelResult<Model> {
    let kinds = FactoryRegistry::builtin();
    ModelBuilder::new(PREDATOR_PREY)
        .parameter(size_parameter())
        .parameter(count_parameter(NUMBER_OF_PREDATORS, "number of predators (0 - n)"))
        .parameter(count_parameter(NUMBER_OF_PREYS, "number of prey (0 - n)"))
        .shared_agent(PREDATOR, kinds.get(PREDATOR)?)
        .shared_agent(PREY, kinds.get(PREY)?)
        .agent_value(PREDATOR, VISION_RADIUS_PREDATOR, 1)
        .agent_value(PREY, VISION_RADIUS_PREY, 1)
        .init(|params, templates, rng| {
            scatter(
                params,
                templates,
                &[(PREDATOR, NUMBER_OF_PREDATORS), (PREY, NUMBER_OF_PREYS)],
                rng,
            )
        })
        .exit(|_, current| current.count_of(PREY) == 0)
        .build()
}

/// Two groups relocate until everyone is satisfied; finished when a step
/// moves nobody.
pub fn schelling() -> ModelResult<Model> {
    ModelBuilder::new(SCHELLING)
        .parameter(size_parameter())
        .parameter(count_parameter(NUMBER_OF_TYPE_A, "number of type A agents (0 - n)"))
        .parameter(count_parameter(NUMBER_OF_TYPE_B, "number of type B agents (0 - n)"))
        .agent(TYPE_A, BehaviorFactory::segregation("A"))
        .agent(TYPE_B, BehaviorFactory::segregation("B"))
        .agent_value(TYPE_A, THRESHOLD, 0.5)
        .agent_value(TYPE_A, VISION_RADIUS, 1)
        .agent_value(TYPE_B, THRESHOLD, 0.5)
        .agent_value(TYPE_B, VISION_RADIUS, 1)
        .init(|params, templates, rng| {
            scatter(
                params,
                templates,
                &[(TYPE_A, NUMBER_OF_TYPE_A), (TYPE_B, NUMBER_OF_TYPE_B)],
                rng,
            )
        })
        .exit(|previous, current| previous.same_placement(current))
        .build()
}

/// Fires spread east through a random forest; finished when a step changes
/// no cell's type.
pub fn fire_spread() -> ModelResult<Model> {
    let kinds = FactoryRegistry::builtin();
    ModelBuilder::new(FIRE_SPREAD)
        .parameter(size_parameter())
        .parameter(count_parameter(NUMBER_OF_FIRES, "number of fires (0 - n)"))
        .parameter(count_parameter(NUMBER_OF_TREES, "number of trees (0 - n)"))
        .shared_agent(FIRE, kinds.get(FIRE)?)
        .shared_agent(TREE, kinds.get(TREE)?)
        .agent_value(FIRE, RADIUS, 1)
        .agent_value(FIRE, DIRECTION, DirectionVector::new(1.0, 0.0))
        .init(|params, templates, rng| {
            scatter(
                params,
                templates,
                &[(FIRE, NUMBER_OF_FIRES), (TREE, NUMBER_OF_TREES)],
                rng,
            )
        })
        .exit(|previous, current| previous.same_types(current))
        .build()
}

// ── Shared pieces ─────────────────────────────────────────────────────────────

fn size_parameter() -> Parameter {
    Parameter::of::<i64>(SIZE)
        .required()
        .with_domain(ParameterDomain::typed::<i64>("grid side length (1 - 1000)", |n| {
            (1..=MAX_SIZE).contains(n)
        }))
}

fn count_parameter(key: &str, description: &str) -> Parameter {
    Parameter::of::<i64>(key)
        .required()
        .with_domain(ParameterDomain::int_at_most(description, MAX_SIZE * MAX_SIZE))
}

/// Place `count_key` agents of each `template` on distinct, uniformly
/// random cells of a `size × size` grid.
pub fn scatter(
    params:    &Parameters,
    templates: &AgentTemplates,
    groups:    &[(&str, &str)],
    rng:       &mut SimRng,
) -> ModelResult<State> {
    let size = u32::try_from(params.require::<i64>(SIZE)?)
        .map_err(|_| ModelError::IllegalState("grid size out of range".into()))?;

    let mut counts = Vec::with_capacity(groups.len());
    for &(template, count_key) in groups {
        let n = u64::try_from(params.require::<i64>(count_key)?)
            .map_err(|_| ModelError::IllegalState(format!("`{count_key}` is negative")))?;
        counts.push((template, n));
    }

    let cells = u64::from(size) * u64::from(size);
    let agents: u64 = counts.iter().map(|(_, n)| n).sum();
    if agents > cells {
        return Err(ModelError::Overcrowded { agents, cells });
    }

    let mut state = State::new(size, size);
    let mut free = state.free_positions();
    rng.shuffle(&mut free);
    let mut slots = free.into_iter();
    for (template, n) in counts {
        for _ in 0..n {
            let pos = slots.next().ok_or(ModelError::Overcrowded { agents, cells })?;
            state.add_agent(pos, templates.spawn(template)?)?;
        }
    }
    Ok(state)
}
