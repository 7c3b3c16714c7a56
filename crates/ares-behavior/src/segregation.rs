//! Schelling segregation: move away when too few neighbours are alike.

use tracing::debug;

use ares_agent::{AgentResult, Behavior, State};
use ares_core::{Pos, SimRng};
use ares_params::{ParamResult, Parameter, ParameterDomain, Parameters};

use crate::labels::{RATIO, THRESHOLD, VISION_RADIUS};
use crate::{acting, acting_mut, radius_param};

/// `ratio = same-type neighbours / all neighbours` within `visionRadius`.
///
/// An agent with no neighbours is satisfied.  When `ratio < threshold` the
/// agent relocates to a free cell sampled uniformly from the whole grid; if
/// the grid is full it stays.
///
/// If the agent declares a `ratio` parameter the last computed ratio is
/// recorded there (and cleared when there are no neighbours).
#[derive(Default, Debug, Clone, Copy)]
pub struct SegregationBehavior;

impl Behavior for SegregationBehavior {
    fn tick(&self, state: &mut State, pos: Pos, rng: &mut SimRng) -> AgentResult<()> {
        let agent = acting(state, pos)?;
        let threshold = agent.parameters().require::<f64>(THRESHOLD)?;
        let radius = radius_param(agent, VISION_RADIUS)?;
        let records_ratio = agent.parameters().contains(RATIO);

        let neighbours = state.agents_in_radius(pos, radius);
        let total = neighbours.len();
        let same = neighbours
            .iter()
            .filter(|(_, a)| a.agent_type() == agent.agent_type())
            .count();

        if total == 0 {
            if records_ratio {
                acting_mut(state, pos)?.clear_observed(RATIO)?;
            }
            return Ok(());
        }

        let ratio = same as f64 / total as f64;
        if records_ratio {
            acting_mut(state, pos)?.observe(RATIO, ratio)?;
        }
        if ratio >= threshold {
            return Ok(());
        }

        let free = state.free_positions();
        if let Some(&target) = rng.choose(&free) {
            state.move_agent(pos, target)?;
            debug!(from = %pos, to = %target, ratio, threshold, "unsatisfied agent relocated");
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "segregation"
    }
}

/// Parameter declarations for a segregating agent, including the observed
/// `ratio` output.
pub fn parameters() -> ParamResult<Parameters> {
    let mut p = Parameters::new();
    p.insert(
        Parameter::of::<f64>(THRESHOLD)
            .required()
            .with_domain(ParameterDomain::float_range("tolerance threshold (0.0 - 1.0)", 0.0, 1.0)),
    )?;
    p.insert(
        Parameter::of::<i64>(VISION_RADIUS)
            .required()
            .with_domain(ParameterDomain::positive_int("vision radius (1 - n)")),
    )?;
    p.insert(Parameter::of::<f64>(RATIO).observed())?;
    Ok(p)
}
