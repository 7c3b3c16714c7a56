//! Prey: flee from the centroid of nearby predators.

use tracing::{debug, trace};

use ares_agent::{AgentResult, Behavior, State, StateError};
use ares_core::{Pos, SimRng};
use ares_params::{ParamResult, Parameter, ParameterDomain, Parameters};

use crate::labels::{PREDATOR, VISION_RADIUS_PREY};
use crate::{acting, radius_param};

/// Collects the `"Predator"`s within `visionRadiusPrey` and moves directly
/// away from their centroid.
///
/// The flee vector is `round(self - centroid)` and the target is
/// `self + flee`, clamped into the grid.  A blocked target leaves the prey
/// where it is.
#[derive(Default, Debug, Clone, Copy)]
pub struct PreyBehavior;

impl Behavior for PreyBehavior {
    fn tick(&self, state: &mut State, pos: Pos, _rng: &mut SimRng) -> AgentResult<()> {
        let radius = radius_param(acting(state, pos)?, VISION_RADIUS_PREY)?;

        let predators: Vec<Pos> = state
            .agents_in_radius(pos, radius)
            .into_iter()
            .filter(|(_, a)| a.is_type(PREDATOR))
            .map(|(p, _)| p)
            .collect();
        let Some(flee) = flee_vector(pos, &predators) else {
            return Ok(());
        };

        let (width, height) = state.dimensions();
        let target = (pos + flee).clamp_to(width, height);
        if target == pos {
            return Ok(());
        }
        match state.move_agent(pos, target) {
            Ok(()) => {
                debug!(from = %pos, to = %target, "prey fled");
                Ok(())
            }
            Err(StateError::OccupiedCell(_)) => {
                trace!(at = %pos, blocked = %target, "prey cornered");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn name(&self) -> &'static str {
        "prey"
    }
}

/// `round(pos - centroid(threats))`, or `None` when there are no threats.
pub fn flee_vector(pos: Pos, threats: &[Pos]) -> Option<Pos> {
    if threats.is_empty() {
        return None;
    }
    let n = threats.len() as f64;
    let cx = threats.iter().map(|p| p.x as f64).sum::<f64>() / n;
    let cy = threats.iter().map(|p| p.y as f64).sum::<f64>() / n;
    Some(Pos::new(
        (pos.x as f64 - cx).round() as i32,
        (pos.y as f64 - cy).round() as i32,
    ))
}

/// Parameter declarations for a prey agent.
pub fn parameters() -> ParamResult<Parameters> {
    let mut p = Parameters::new();
    p.insert(
        Parameter::of::<i64>(VISION_RADIUS_PREY)
            .required()
            .with_domain(ParameterDomain::positive_int("prey vision radius (1 - n)")),
    )?;
    Ok(p)
}
