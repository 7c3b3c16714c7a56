//! Immutable copies of a `State`, safe to hand to other threads.

use ares_core::{AgentId, Pos};
use ares_params::ParamValue;

/// One occupied cell at the moment the snapshot was taken.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellSnapshot {
    pub pos:        Pos,
    pub agent_id:   AgentId,
    pub agent_type: String,
    /// Every parameter that had a value, in declaration order.
    pub parameters: Vec<(String, ParamValue)>,
}

impl CellSnapshot {
    pub fn parameter(&self, key: &str) -> Option<&ParamValue> {
        self.parameters.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }
}

/// The occupied cells of a grid, in row-major order.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StateSnapshot {
    pub width:  u32,
    pub height: u32,
    pub cells:  Vec<CellSnapshot>,
}

impl StateSnapshot {
    pub fn new(width: u32, height: u32, cells: Vec<CellSnapshot>) -> Self {
        Self { width, height, cells }
    }

    pub fn cell_at(&self, pos: Pos) -> Option<&CellSnapshot> {
        self.cells
            .binary_search_by_key(&(pos.y, pos.x), |c| (c.pos.y, c.pos.x))
            .ok()
            .map(|i| &self.cells[i])
    }

    pub fn agent_count(&self) -> usize {
        self.cells.len()
    }

    pub fn count_of(&self, agent_type: &str) -> usize {
        self.cells.iter().filter(|c| c.agent_type == agent_type).count()
    }

    /// `true` iff both snapshots have the same agents on the same cells.
    pub fn same_placement(&self, other: &StateSnapshot) -> bool {
        self.cells.len() == other.cells.len()
            && self
                .cells
                .iter()
                .zip(&other.cells)
                .all(|(a, b)| a.pos == b.pos && a.agent_id == b.agent_id)
    }

    /// `true` iff both snapshots have the same type label on every cell,
    /// regardless of agent identity.
    pub fn same_types(&self, other: &StateSnapshot) -> bool {
        self.cells.len() == other.cells.len()
            && self
                .cells
                .iter()
                .zip(&other.cells)
                .all(|(a, b)| a.pos == b.pos && a.agent_type == b.agent_type)
    }
}
