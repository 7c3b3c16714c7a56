use thiserror::Error;

use ares_core::{ConfigId, SimulationId};
use ares_model::ModelError;
use ares_params::ParamError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("{0} not found")]
    NotFound(SimulationId),

    #[error("{0} already registered")]
    DuplicateId(SimulationId),

    #[error("unknown configuration session {0}")]
    UnknownConfig(ConfigId),

    #[error("illegal state: {0}")]
    IllegalState(String),

    #[error("worker pool: {0}")]
    Pool(String),

    #[error("ticker thread: {0}")]
    Ticker(#[from] std::io::Error),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Param(#[from] ParamError),
}

pub type SimResult<T> = Result<T, SimError>;
