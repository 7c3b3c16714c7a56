//! `ares-params`: typed key/value parameters with domain predicates.
//!
//! Both models and agents are configured through a [`Parameters`] record.
//! Every [`Parameter`] declares its [`ParamKind`], whether it is required,
//! who may write it ([`Access`]), and optionally a [`ParameterDomain`] that
//! every stored value must satisfy.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`value`]       | `ParamKind`, `ParamValue`, `ParamType` conversions        |
//! | [`domain`]      | `ParameterDomain`: described boolean predicate            |
//! | [`parameter`]   | `Parameter`, `Access`                                     |
//! | [`parameters`]  | `Parameters`: insertion-ordered record                    |
//! | [`error`]       | `ParamError`, `ParamResult<T>`                            |
//!
//! # Write classes
//!
//! `Access::Config` keys are set by the user before a run and never touched
//! by behaviors.  `Access::Observed` keys are outputs that behaviors rewrite
//! every tick (e.g. the segregation ratio); they are never required.

pub mod domain;
pub mod error;
pub mod parameter;
pub mod parameters;
pub mod value;


pub use domain::ParameterDomain;
pub use error::{ParamError, ParamResult};
pub use parameter::{Access, Parameter};
pub use parameters::Parameters;
pub use value::{ParamKind, ParamType, ParamValue};
