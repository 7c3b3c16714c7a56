//! Per-tick output published to subscribers.

use std::sync::Arc;

use ares_agent::StateSnapshot;
use ares_core::{SimulationId, Tick};

/// One completed tick of one simulation.
///
/// The snapshot sits behind an `Arc`: every subscriber of the simulation
/// receives the same immutable copy.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationOutputData {
    pub simulation_id: SimulationId,
    pub tick:          Tick,
    pub finished:      bool,
    pub snapshot:      Arc<StateSnapshot>,
}
