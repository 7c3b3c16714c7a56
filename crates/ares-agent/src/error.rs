use thiserror::Error;

use ares_core::Pos;
use ares_params::ParamError;

/// Spatial failures.  Every failing `State` operation leaves the grid as it
/// was before the call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error("cell {0} is already occupied")]
    OccupiedCell(Pos),

    #[error("position {0} is outside the grid")]
    OutOfBounds(Pos),

    #[error("no matching agent at {0}")]
    NotFound(Pos),
}

pub type StateResult<T> = Result<T, StateError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AgentError {
    #[error(transparent)]
    Param(#[from] ParamError),

    #[error(transparent)]
    State(#[from] StateError),

    #[error("illegal state: {0}")]
    IllegalState(String),
}

pub type AgentResult<T> = Result<T, AgentError>;
