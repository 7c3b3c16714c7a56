//! Domain predicates: a natural-language description plus a boolean test.
//!
//! The description is for whoever renders the parameter form; validation
//! only ever looks at the predicate.

use std::fmt;
use std::sync::Arc;

use crate::{ParamType, ParamValue};

type Predicate = Arc<dyn Fn(&ParamValue) -> bool + Send + Sync>;

/// The set of acceptable values for one parameter.
///
/// Cloning is cheap: the predicate is shared behind an `Arc` and never
/// mutated after construction.
#[derive(Clone)]
pub struct ParameterDomain {
    description: String,
    predicate:   Predicate,
}

impl ParameterDomain {
    /// A domain over raw [`ParamValue`]s.
    pub fn new(
        description: impl Into<String>,
        predicate:   impl Fn(&ParamValue) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            description: description.into(),
            predicate:   Arc::new(predicate),
        }
    }

    /// A domain over a typed value.  Values of any other kind are rejected.
    pub fn typed<T: ParamType + 'static>(
        description: impl Into<String>,
        predicate:   impl Fn(&T) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self::new(description, move |v| T::from_value(v).is_some_and(|t| predicate(&t)))
    }

    /// Integers strictly greater than zero.
    pub fn positive_int(description: impl Into<String>) -> Self {
        Self::typed::<i64>(description, |i| *i > 0)
    }

    /// Integers in `[0, max]`.
    pub fn int_at_most(description: impl Into<String>, max: i64) -> Self {
        Self::typed::<i64>(description, move |i| (0..=max).contains(i))
    }

    /// Floats in the closed interval `[lo, hi]`.
    pub fn float_range(description: impl Into<String>, lo: f64, hi: f64) -> Self {
        Self::typed::<f64>(description, move |x| (lo..=hi).contains(x))
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_valid(&self, value: &ParamValue) -> bool {
        (self.predicate)(value)
    }
}

impl fmt::Debug for ParameterDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParameterDomain")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}
