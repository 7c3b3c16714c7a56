use thiserror::Error;

use crate::ParamKind;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParamError {
    #[error("parameter `{0}` not found")]
    NotFound(String),

    #[error("parameter `{0}` declared twice")]
    DuplicateKey(String),

    #[error("parameter `{key}` expects {expected}, got {got}")]
    TypeMismatch {
        key:      String,
        expected: ParamKind,
        got:      ParamKind,
    },

    #[error("value {value} rejected for `{key}`: {domain}")]
    DomainValidation {
        key:    String,
        value:  String,
        domain: String,
    },

    #[error("parameter `{0}` is written by its behavior, not configured")]
    ReadOnly(String),

    #[error("required parameter `{0}` has no value")]
    MissingParameter(String),

    #[error("cannot parse {raw:?} as {kind}")]
    Parse { raw: String, kind: ParamKind },
}

pub type ParamResult<T> = Result<T, ParamError>;
