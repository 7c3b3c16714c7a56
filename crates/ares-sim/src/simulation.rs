//! `Simulation`: one running instance of a model.

use std::sync::Arc;

use tracing::{debug, warn};

use ares_agent::{Agent, State, StateSnapshot};
use ares_core::{AgentId, Pos, SimRng, SimulationId, Tick};
use ares_model::Model;

use crate::{SimResult, SimulationOutputData};

/// A model instance with its live `State`.
///
/// Exactly one `State` is live per simulation.  The controller holds the
/// simulation behind a mutex and is the only writer during a step.
/// Lifecycle status (`Created`, `Running`, `Paused`) is tracked by the
/// controller next to it, so it can be read without waiting for a step.
pub struct Simulation {
    id:       SimulationId,
    model:    Model,
    state:    State,
    tick:     Tick,
    finished: bool,
    rng:      SimRng,
    /// Snapshot of the state after the previous step; the exit predicate
    /// compares against it.
    previous: Arc<StateSnapshot>,
}

impl Simulation {
    /// Lay out the model's initial state with an RNG derived from
    /// `master_seed` and `id`.
    ///
    /// Fails with `NotRunnable` if the model has unset required parameters.
    pub fn new(id: SimulationId, model: Model, master_seed: u64) -> SimResult<Self> {
        let mut rng = SimRng::for_simulation(master_seed, id);
        let state = model.init(&mut rng)?;
        let previous = Arc::new(state.snapshot());
        Ok(Self {
            id,
            model,
            state,
            tick: Tick::ZERO,
            finished: false,
            rng,
            previous,
        })
    }

    pub fn id(&self) -> SimulationId {
        self.id
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    /// Number of completed steps.
    pub fn tick(&self) -> Tick {
        self.tick
    }

    /// What the exit predicate said after the last step.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Advance one tick.
    ///
    /// Agents present when the step begins act once each, in row-major
    /// order, each seeing the state left by the previous one.  An agent
    /// that was moved, removed or converted before its turn is skipped.  A
    /// behavior error aborts that agent's turn only.
    pub fn step(&mut self) -> SimulationOutputData {
        let order: Vec<(Pos, AgentId)> = self.state.agents().map(|(p, a)| (p, a.id())).collect();
        for (pos, agent) in order {
            if self.state.agent_at(pos).map(Agent::id) != Some(agent) {
                continue;
            }
            if let Err(e) = self.state.tick_agent(pos, &mut self.rng) {
                warn!(sim = %self.id, %agent, at = %pos, error = %e, "agent tick failed");
            }
        }

        self.tick = self.tick.next();
        let snapshot = Arc::new(self.state.snapshot());
        self.finished = self.model.is_finished(&self.previous, &snapshot);
        self.previous = Arc::clone(&snapshot);
        debug!(sim = %self.id, tick = %self.tick, finished = self.finished, "step complete");

        SimulationOutputData {
            simulation_id: self.id,
            tick:          self.tick,
            finished:      self.finished,
            snapshot,
        }
    }

    /// The output describing the current state without advancing.
    pub fn current_output(&self) -> SimulationOutputData {
        SimulationOutputData {
            simulation_id: self.id,
            tick:          self.tick,
            finished:      self.finished,
            snapshot:      Arc::clone(&self.previous),
        }
    }
}
