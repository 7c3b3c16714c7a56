//! `ares-agent`: the spatial grid and the agents that live on it.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                   |
//! |----------------|------------------------------------------------------------|
//! | [`state`]      | `State`: bounded grid, one agent per cell, radius queries  |
//! | [`snapshot`]   | `StateSnapshot`, `CellSnapshot`: immutable copies          |
//! | [`agent`]      | `Agent`: id, type label, owned `Parameters`, behavior      |
//! | [`behavior`]   | `Behavior` trait, `NoopBehavior`                           |
//! | [`builder`]    | `AgentBuilder`                                             |
//! | [`error`]      | `StateError`, `AgentError` and their result aliases        |
//!
//! # Ticking an agent
//!
//! An agent lives inside the `State` its behavior mutates, so the entry
//! point is [`State::tick_agent`]: it looks up the occupant of `pos`, takes a
//! shared handle to its behavior, and runs it against `&mut State`.  The
//! behavior re-reads its own parameters through `state.agent_at(pos)`.

pub mod agent;
pub mod behavior;
pub mod builder;
pub mod error;
pub mod snapshot;
pub mod state;


pub use agent::Agent;
pub use behavior::{Behavior, NoopBehavior};
pub use builder::AgentBuilder;
pub use error::{AgentError, AgentResult, StateError, StateResult};
pub use snapshot::{CellSnapshot, StateSnapshot};
pub use state::State;
