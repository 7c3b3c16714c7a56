//! Predator: eat the first prey in sight.

use tracing::debug;

use ares_agent::{AgentResult, Behavior, State};
use ares_core::{Pos, SimRng};
use ares_params::{ParamResult, Parameter, ParameterDomain, Parameters};

use crate::labels::{PREY, VISION_RADIUS_PREDATOR};
use crate::{acting, radius_param};

/// Scans the cells within `visionRadiusPredator` (row-major, excluding its
/// own) and takes the first `"Prey"`: the prey is removed and the predator
/// moves into the vacated cell.  Nothing in sight means no move.
#[derive(Default, Debug, Clone, Copy)]
pub struct PredatorBehavior;

impl Behavior for PredatorBehavior {
    fn tick(&self, state: &mut State, pos: Pos, _rng: &mut SimRng) -> AgentResult<()> {
        let radius = radius_param(acting(state, pos)?, VISION_RADIUS_PREDATOR)?;

        let Some((target, prey)) = state
            .agents_in_radius(pos, radius)
            .into_iter()
            .find(|(_, a)| a.is_type(PREY))
            .map(|(p, a)| (p, a.id()))
        else {
            return Ok(());
        };

        state.remove_agent(target, prey)?;
        state.move_agent(pos, target)?;
        debug!(from = %pos, to = %target, %prey, "predator caught prey");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "predator"
    }
}

/// Parameter declarations for a predator agent.
pub fn parameters() -> ParamResult<Parameters> {
    let mut p = Parameters::new();
    p.insert(
        Parameter::of::<i64>(VISION_RADIUS_PREDATOR)
            .required()
            .with_domain(ParameterDomain::positive_int("predator vision radius (1 - n)")),
    )?;
    Ok(p)
}
