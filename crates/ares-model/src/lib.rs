//! `ares-model`: what a simulation runs.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                       |
//! |---------------|----------------------------------------------------------------|
//! | [`template`]  | `AgentTemplate`, `AgentTemplates`: factory + configurable values  |
//! | [`model`]     | `Model`: parameters, templates, init function, exit predicate  |
//! | [`builder`]   | `ModelBuilder`                                                 |
//! | [`catalogue`] | Built-in models: Predator-Prey, Schelling, Fire Spread         |
//! | [`registry`]  | `ModelRegistry`: model constructors by name                    |
//! | [`error`]     | `ModelError`, `ModelResult<T>`                                 |
//!
//! # Lifecycle
//!
//! A registry constructor produces a fresh `Model`.  Its parameters and
//! template values are edited while configuring, then [`Model::init`]
//! checks runnability and lays out the initial `State`.  `Model` is cheap to
//! clone (functions are shared, parameter records are deep-copied), so one
//! configured model can seed several simulations.

pub mod builder;
pub mod catalogue;
pub mod error;
pub mod model;
pub mod registry;
pub mod template;

#[cfg(test)]
mod tests;

pub use builder::ModelBuilder;
pub use error::{ModelError, ModelResult};
pub use model::{ExitFn, InitFn, Model};
pub use registry::ModelRegistry;
pub use template::{AgentTemplate, AgentTemplates};
