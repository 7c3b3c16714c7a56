//! `State`: a bounded rectangular grid with at most one agent per cell.
//!
//! # Storage
//!
//! Cells are a dense row-major `Vec<Option<Agent>>` (`index = y * width + x`).
//! Grids are small and almost every query touches a compact neighbourhood,
//! so a flat vector beats any sparse index here.
//!
//! # Ordering
//!
//! Every query that returns several cells returns them in row-major order
//! (ascending `y`, then ascending `x`).  Behaviors that "take the first"
//! match are therefore deterministic for a given grid.

use ares_core::{AgentId, Pos, SimRng};

use crate::{Agent, AgentResult, CellSnapshot, StateError, StateResult, StateSnapshot};

pub struct State {
    width:  u32,
    height: u32,
    cells:  Vec<Option<Agent>>,
    count:  usize,
}

impl State {
    /// An empty `width × height` grid.
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize;
        let mut cells = Vec::with_capacity(len);
        cells.resize_with(len, || None);
        Self { width, height, cells, count: 0 }
    }

    // ── Geometry ──────────────────────────────────────────────────────────

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.width && (pos.y as u32) < self.height
    }

    #[inline]
    fn index(&self, pos: Pos) -> Option<usize> {
        self.in_bounds(pos)
            .then(|| pos.y as usize * self.width as usize + pos.x as usize)
    }

    #[inline]
    fn checked_index(&self, pos: Pos) -> StateResult<usize> {
        self.index(pos).ok_or(StateError::OutOfBounds(pos))
    }

    #[inline]
    fn pos_of_index(&self, i: usize) -> Pos {
        let w = self.width as usize;
        Pos::new((i % w) as i32, (i / w) as i32)
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    pub fn agent_at(&self, pos: Pos) -> Option<&Agent> {
        self.index(pos).and_then(|i| self.cells[i].as_ref())
    }

    pub fn agent_at_mut(&mut self, pos: Pos) -> Option<&mut Agent> {
        self.index(pos).and_then(|i| self.cells[i].as_mut())
    }

    /// `true` iff `pos` is inside the grid and unoccupied.
    pub fn is_free(&self, pos: Pos) -> bool {
        self.index(pos).is_some_and(|i| self.cells[i].is_none())
    }

    /// Current position of the agent with `id`.  Linear scan.
    pub fn position_of(&self, id: AgentId) -> Option<Pos> {
        self.agents().find(|(_, a)| a.id() == id).map(|(p, _)| p)
    }

    pub fn agent_count(&self) -> usize {
        self.count
    }

    /// Every occupied cell in row-major order.
    pub fn agents(&self) -> impl Iterator<Item = (Pos, &Agent)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.as_ref().map(|a| (self.pos_of_index(i), a)))
    }

    /// Every empty in-bounds cell in row-major order.
    pub fn free_positions(&self) -> Vec<Pos> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_none())
            .map(|(i, _)| self.pos_of_index(i))
            .collect()
    }

    // ── Radius queries ────────────────────────────────────────────────────

    /// All in-bounds cells within Chebyshev distance `radius` of `center`,
    /// `center` included when it is itself in bounds.
    ///
    /// The window is clipped at the grid edges rather than wrapped.
    pub fn positions_in_radius(&self, center: Pos, radius: u32) -> Vec<Pos> {
        if self.width == 0 || self.height == 0 {
            return Vec::new();
        }
        let r = radius as i64;
        let x0 = (center.x as i64 - r).max(0);
        let x1 = (center.x as i64 + r).min(self.width as i64 - 1);
        let y0 = (center.y as i64 - r).max(0);
        let y1 = (center.y as i64 + r).min(self.height as i64 - 1);
        if x0 > x1 || y0 > y1 {
            return Vec::new();
        }

        let mut out = Vec::with_capacity(((x1 - x0 + 1) * (y1 - y0 + 1)) as usize);
        for y in y0..=y1 {
            for x in x0..=x1 {
                out.push(Pos::new(x as i32, y as i32));
            }
        }
        out
    }

    /// Occupied cells within `radius` of `center`, excluding `center`.
    pub fn agents_in_radius(&self, center: Pos, radius: u32) -> Vec<(Pos, &Agent)> {
        self.positions_in_radius(center, radius)
            .into_iter()
            .filter(|&p| p != center)
            .filter_map(|p| self.agent_at(p).map(|a| (p, a)))
            .collect()
    }

    /// Empty cells within `radius` of `center`.
    pub fn free_positions_in_radius(&self, center: Pos, radius: u32) -> Vec<Pos> {
        self.positions_in_radius(center, radius)
            .into_iter()
            .filter(|&p| self.is_free(p))
            .collect()
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Place `agent` on an empty cell.
    pub fn add_agent(&mut self, pos: Pos, agent: Agent) -> StateResult<()> {
        let i = self.checked_index(pos)?;
        if self.cells[i].is_some() {
            return Err(StateError::OccupiedCell(pos));
        }
        self.cells[i] = Some(agent);
        self.count += 1;
        Ok(())
    }

    /// Remove and return the agent at `pos`, which must have id `id`.
    pub fn remove_agent(&mut self, pos: Pos, id: AgentId) -> StateResult<Agent> {
        let i = self.checked_index(pos)?;
        match &self.cells[i] {
            Some(a) if a.id() == id => {}
            _ => return Err(StateError::NotFound(pos)),
        }
        self.count -= 1;
        self.cells[i].take().ok_or(StateError::NotFound(pos))
    }

    /// Move the occupant of `from` to the empty cell `to`.
    ///
    /// Atomic: on any error neither cell changes.  Moving onto the agent's
    /// own cell is a no-op.
    pub fn move_agent(&mut self, from: Pos, to: Pos) -> StateResult<()> {
        let src = self.checked_index(from)?;
        let dst = self.checked_index(to)?;
        if self.cells[src].is_none() {
            return Err(StateError::NotFound(from));
        }
        if src == dst {
            return Ok(());
        }
        if self.cells[dst].is_some() {
            return Err(StateError::OccupiedCell(to));
        }
        self.cells[dst] = self.cells[src].take();
        Ok(())
    }

    /// Swap the occupant of `pos` for `agent`, returning the old occupant.
    ///
    /// Used for in-place conversion (a tree catching fire, a fire burning
    /// out).  The cell must be occupied.
    pub fn replace_agent(&mut self, pos: Pos, agent: Agent) -> StateResult<Agent> {
        let i = self.checked_index(pos)?;
        match self.cells[i].as_mut() {
            Some(slot) => Ok(std::mem::replace(slot, agent)),
            None => Err(StateError::NotFound(pos)),
        }
    }

    // ── Ticking ───────────────────────────────────────────────────────────

    /// Run the behavior of the agent at `pos` against this state.
    pub fn tick_agent(&mut self, pos: Pos, rng: &mut SimRng) -> AgentResult<()> {
        let behavior = self
            .agent_at(pos)
            .ok_or(StateError::NotFound(pos))?
            .behavior();
        behavior.tick(self, pos, rng)
    }

    // ── Snapshot ──────────────────────────────────────────────────────────

    /// An immutable copy of every occupied cell, in row-major order.
    pub fn snapshot(&self) -> StateSnapshot {
        let cells = self
            .agents()
            .map(|(pos, a)| CellSnapshot {
                pos,
                agent_id:   a.id(),
                agent_type: a.agent_type().to_owned(),
                parameters: a
                    .parameters()
                    .values()
                    .map(|(k, v)| (k.to_owned(), v.clone()))
                    .collect(),
            })
            .collect();
        StateSnapshot::new(self.width, self.height, cells)
    }
}

impl std::fmt::Debug for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("State")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("agents", &self.count)
            .finish()
    }
}
