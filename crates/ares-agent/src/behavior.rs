//! The `Behavior` trait and the inert `NoopBehavior`.

use ares_core::{Pos, SimRng};

use crate::{AgentResult, State};

/// Per-tick decision logic for one kind of agent.
///
/// A behavior is stateless: everything it needs to remember lives in the
/// owning agent's `Parameters`, reached through `state.agent_at(pos)`.  One
/// `Behavior` value is shared (via `Arc`) by every agent a factory builds.
///
/// # Contract
///
/// - `pos` is the cell the acting agent occupies when `tick` is called.
/// - A behavior may move, add, remove or replace agents in `state`, always
///   through the checked `State` operations.
/// - An `Err` aborts this agent's turn only.  Mutations already applied to
///   `state` stand.
pub trait Behavior: Send + Sync {
    fn tick(&self, state: &mut State, pos: Pos, rng: &mut SimRng) -> AgentResult<()>;

    /// Short label used in log lines.
    fn name(&self) -> &'static str {
        "behavior"
    }
}

/// A behavior that does nothing.
///
/// Used for passive agents (trees, burnt cells) whose only role is to be
/// observed or converted by others.
#[derive(Default, Debug, Clone, Copy)]
pub struct NoopBehavior;

impl Behavior for NoopBehavior {
    fn tick(&self, _state: &mut State, _pos: Pos, _rng: &mut SimRng) -> AgentResult<()> {
        Ok(())
    }

    fn name(&self) -> &'static str {
        "noop"
    }
}
