//! `ares-core`: foundational types for the `ares` simulation engine.
//!
//! This crate is a dependency of every other `ares-*` crate.  It has no
//! `ares-*` dependencies and only one external one (`rand`, plus optional
//! `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `SimulationId`, `ConfigId`                 |
//! | [`geometry`]    | `Pos`, `DirectionVector`, cone membership             |
//! | [`time`]        | `Tick`                                                |
//! | [`rng`]         | `SimRng` (per-simulation)                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod geometry;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use geometry::{DirectionVector, Pos, inside_cone};
pub use ids::{AgentId, ConfigId, SimulationId};
pub use rng::SimRng;
pub use time::Tick;
