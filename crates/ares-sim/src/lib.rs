//! `ares-sim`: running many simulations side by side.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                         |
//! |----------------|------------------------------------------------------------------|
//! | [`config`]     | `EngineConfig`: tick period, pool size, queue capacity, seed     |
//! | [`simulation`] | `Simulation`: one model instance, its `State`, RNG and counter   |
//! | [`output`]     | `SimulationOutputData`: what subscribers receive each tick       |
//! | [`feed`]       | `Subscription` and the per-simulation subscriber registry        |
//! | [`controller`] | `SimulationsController`: lifecycle, dispatch, publication        |
//! | [`ticker`]     | `Ticker`: periodic background driver                             |
//! | [`engine`]     | `Ares`: registry + configuration sessions + controller + ticker  |
//! | [`error`]      | `SimError`, `SimResult<T>`                                       |
//!
//! # Concurrency model
//!
//! ```text
//! Ticker ──every period──▶ controller.tick()
//!                            for each Running simulation with no step in flight:
//!                              claim in-flight flag
//!                              rayon pool: lock simulation → step → publish → release
//! ```
//!
//! Steps of different simulations run in parallel on the pool.  A single
//! simulation never has two steps in flight, so tick N+1 starts only after
//! tick N was published.  Inside a step agents act one after another.

pub mod config;
pub mod controller;
pub mod engine;
pub mod error;
pub mod feed;
pub mod output;
pub mod simulation;
pub mod ticker;


pub use config::EngineConfig;
pub use controller::{SimulationStatus, SimulationsController};
pub use engine::Ares;
pub use error::{SimError, SimResult};
pub use feed::Subscription;
pub use output::SimulationOutputData;
pub use simulation::Simulation;
pub use ticker::Ticker;
