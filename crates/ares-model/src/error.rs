use thiserror::Error;

use ares_agent::{AgentError, StateError};
use ares_behavior::BehaviorError;
use ares_params::ParamError;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ModelError {
    #[error("model is not runnable, missing: {}", .0.join(", "))]
    NotRunnable(Vec<String>),

    #[error("unknown model `{0}`")]
    UnknownModel(String),

    #[error("unknown agent `{0}`")]
    UnknownAgent(String),

    #[error("{what} `{name}` declared twice")]
    Duplicate {
        what: &'static str,
        name: String,
    },

    #[error("{agents} agents do not fit on a grid of {cells} cells")]
    Overcrowded { agents: u64, cells: u64 },

    #[error("illegal state: {0}")]
    IllegalState(String),

    #[error(transparent)]
    Param(#[from] ParamError),

    #[error(transparent)]
    Agent(#[from] AgentError),

    #[error(transparent)]
    State(#[from] StateError),

    #[error(transparent)]
    Behavior(#[from] BehaviorError),
}

pub type ModelResult<T> = Result<T, ModelError>;
