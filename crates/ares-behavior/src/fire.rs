//! Directional fire spread over a forest of trees.
//!
//! A fire converts every `"Tree"` inside its cone into a new fire, then
//! burns its own fuel.  Trees and burnt cells are passive agents.

use tracing::{debug, trace};

use ares_agent::{Agent, AgentBuilder, AgentResult, Behavior, NoopBehavior, State};
use ares_core::{DirectionVector, Pos, SimRng, inside_cone};
use ares_params::{ParamResult, Parameter, ParameterDomain, Parameters};

use crate::labels::{ANGLE, BURN_RATE, BURNT, DIRECTION, FIRE, FLAMMABILITY, FUEL, RADIUS, TREE};
use crate::{acting, acting_mut, radius_param};

pub const DEFAULT_ANGLE: f64 = 45.0;
pub const DEFAULT_FUEL: f64 = 3.0;
pub const DEFAULT_BURN_RATE: f64 = 1.0;

/// The spreading properties a fire hands down to the trees it ignites.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Spread {
    pub radius:    u32,
    pub direction: DirectionVector,
    /// Half-angle of the cone, in degrees.
    pub angle:     f64,
    pub burn_rate: f64,
}

impl Spread {
    /// Build a fire agent with these spreading properties and `fuel`.
    pub fn ignite(&self, fuel: f64) -> AgentResult<Agent> {
        let mut p = parameters()?;
        p.set(RADIUS, i64::from(self.radius))?;
        p.set(DIRECTION, self.direction)?;
        p.set(ANGLE, self.angle)?;
        p.set(BURN_RATE, self.burn_rate)?;
        p.set(FUEL, fuel.max(0.0))?;
        AgentBuilder::new()
            .agent_type(FIRE)
            .parameters(p)
            .behavior(FireBehavior)
            .build()
    }

    /// Cells this fire reaches from `center`, in row-major order.
    fn reach(&self, state: &State, center: Pos) -> Vec<Pos> {
        state
            .positions_in_radius(center, self.radius)
            .into_iter()
            .filter(|&p| inside_cone(p, center, self.direction, self.radius as f64, self.angle))
            .collect()
    }
}

// ── FireBehavior ──────────────────────────────────────────────────────────────

/// Spread, then burn.
///
/// 1. Every `"Tree"` inside the cone (half-angle `angle` around `direction`,
///    Euclidean reach `radius`, own cell excluded) is replaced in place by a
///    new fire inheriting this fire's spread and taking the tree's `fuel`.
/// 2. `fuel` drops by `burnRate`; at zero or below the cell becomes an inert
///    `"Burnt"` agent.
///
/// Fires created during a tick do not act until the next tick: the
/// simulation only visits agents present when the tick began.
#[derive(Default, Debug, Clone, Copy)]
pub struct FireBehavior;

impl Behavior for FireBehavior {
    fn tick(&self, state: &mut State, pos: Pos, _rng: &mut SimRng) -> AgentResult<()> {
        let agent = acting(state, pos)?;
        let p = agent.parameters();
        let spread = Spread {
            radius:    radius_param(agent, RADIUS)?,
            direction: p.require::<DirectionVector>(DIRECTION)?,
            angle:     p.require::<f64>(ANGLE)?,
            burn_rate: p.require::<f64>(BURN_RATE)?,
        };
        let fuel = p.require::<f64>(FUEL)?;

        let trees: Vec<(Pos, f64)> = spread
            .reach(state, pos)
            .into_iter()
            .filter_map(|cell| {
                let tree = state.agent_at(cell).filter(|a| a.is_type(TREE))?;
                Some((cell, tree.parameters().get::<f64>(FUEL).unwrap_or(0.0)))
            })
            .collect();
        for (cell, tree_fuel) in trees {
            state.replace_agent(cell, spread.ignite(tree_fuel)?)?;
            trace!(from = %pos, to = %cell, "fire spread");
        }

        let remaining = fuel - spread.burn_rate;
        if remaining <= 0.0 {
            state.replace_agent(pos, burnt()?)?;
            debug!(at = %pos, "fire burnt out");
        } else {
            acting_mut(state, pos)?.parameters_mut().set(FUEL, remaining)?;
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "fire"
    }
}

/// An inert `"Burnt"` cell.
pub fn burnt() -> AgentResult<Agent> {
    AgentBuilder::new().agent_type(BURNT).behavior(NoopBehavior).build()
}

// ── Declarations ──────────────────────────────────────────────────────────────

/// Parameter declarations for a fire agent.
pub fn parameters() -> ParamResult<Parameters> {
    let mut p = Parameters::new();
    p.insert(
        Parameter::of::<i64>(RADIUS)
            .required()
            .with_domain(ParameterDomain::positive_int("spread radius (1 - n)")),
    )?;
    p.insert(
        Parameter::of::<DirectionVector>(DIRECTION)
            .required()
            .with_domain(ParameterDomain::typed::<DirectionVector>(
                "spread direction (non-zero vector)",
                |d| !d.is_zero() && d.x.is_finite() && d.y.is_finite(),
            )),
    )?;
    p.insert(
        Parameter::of::<f64>(ANGLE)
            .required()
            .with_domain(ParameterDomain::float_range("cone half-angle in degrees (0 - 180)", 0.0, 180.0))
            .with_value(DEFAULT_ANGLE)?,
    )?;
    p.insert(
        Parameter::of::<f64>(FUEL)
            .required()
            .with_domain(non_negative("remaining fuel (0 - n)"))
            .with_value(DEFAULT_FUEL)?,
    )?;
    p.insert(
        Parameter::of::<f64>(BURN_RATE)
            .required()
            .with_domain(ParameterDomain::typed::<f64>("fuel burnt per tick (> 0)", |r| {
                *r > 0.0 && r.is_finite()
            }))
            .with_value(DEFAULT_BURN_RATE)?,
    )?;
    Ok(p)
}

/// Parameter declarations for a tree.
///
/// `flammability` is carried for display; trees in a fire's cone always
/// ignite.
pub fn tree_parameters() -> ParamResult<Parameters> {
    let mut p = Parameters::new();
    p.insert(
        Parameter::of::<f64>(FUEL)
            .required()
            .with_domain(non_negative("fuel a fire gains from this tree (0 - n)"))
            .with_value(DEFAULT_FUEL)?,
    )?;
    p.insert(
        Parameter::of::<f64>(FLAMMABILITY)
            .with_domain(ParameterDomain::float_range("flammability (0.0 - 1.0)", 0.0, 1.0))
            .with_value(1.0)?,
    )?;
    Ok(p)
}

fn non_negative(description: &str) -> ParameterDomain {
    ParameterDomain::typed::<f64>(description, |x| *x >= 0.0 && x.is_finite())
}
