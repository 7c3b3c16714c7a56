//! Flat rows written by output backends.

use ares_agent::CellSnapshot;
use ares_sim::SimulationOutputData;

/// One occupied cell of one published tick.
#[derive(Debug, Clone, PartialEq)]
pub struct CellRow {
    pub simulation_id: u32,
    pub tick:          u64,
    pub x:             i32,
    pub y:             i32,
    pub agent_id:      u64,
    pub agent_type:    String,
    /// `key=value` pairs joined by `;`, in declaration order.
    pub parameters:    String,
}

impl CellRow {
    pub fn from_cell(frame: &SimulationOutputData, cell: &CellSnapshot) -> Self {
        let parameters = cell
            .parameters
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join(";");
        Self {
            simulation_id: frame.simulation_id.get(),
            tick:          frame.tick.0,
            x:             cell.pos.x,
            y:             cell.pos.y,
            agent_id:      cell.agent_id.get(),
            agent_type:    cell.agent_type.clone(),
            parameters,
        }
    }
}

/// Per-tick totals of one simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub simulation_id: u32,
    pub tick:          u64,
    pub finished:      bool,
    pub agents:        u64,
}

impl From<&SimulationOutputData> for TickSummaryRow {
    fn from(frame: &SimulationOutputData) -> Self {
        Self {
            simulation_id: frame.simulation_id.get(),
            tick:          frame.tick.0,
            finished:      frame.finished,
            agents:        frame.snapshot.agent_count() as u64,
        }
    }
}
