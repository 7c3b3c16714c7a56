use thiserror::Error;

use ares_agent::AgentError;
use ares_params::ParamError;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum BehaviorError {
    #[error("unknown agent kind `{0}`")]
    UnknownAgent(String),

    #[error("agent kind `{0}` registered twice")]
    DuplicateAgent(String),

    #[error(transparent)]
    Agent(#[from] AgentError),

    #[error(transparent)]
    Param(#[from] ParamError),
}

pub type BehaviorResult<T> = Result<T, BehaviorError>;
