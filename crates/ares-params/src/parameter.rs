//! A single declared parameter and its (optional) current value.

use crate::{ParamError, ParamKind, ParamResult, ParamType, ParamValue, ParameterDomain};

/// Who is allowed to write a parameter.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Access {
    /// Set by the user before the run; behaviors only read it.
    #[default]
    Config,
    /// Written by the owning agent's behavior at run time (observability
    /// output).  Never required.
    Observed,
}

/// A declared parameter: key, kind, optional domain, required flag, value.
///
/// # Invariant
///
/// `value`, when present, has kind `kind` and is accepted by `domain`.  Every
/// write path goes through [`Parameter::set`], which rejects anything else
/// and leaves the previous value in place.
#[derive(Clone, Debug)]
pub struct Parameter {
    key:      String,
    kind:     ParamKind,
    value:    Option<ParamValue>,
    domain:   Option<ParameterDomain>,
    required: bool,
    access:   Access,
}

impl Parameter {
    /// An optional, unset, unconstrained `Config` parameter.
    pub fn new(key: impl Into<String>, kind: ParamKind) -> Self {
        Self {
            key: key.into(),
            kind,
            value: None,
            domain: None,
            required: false,
            access: Access::Config,
        }
    }

    /// Shorthand for `Parameter::new(key, T::KIND)`.
    pub fn of<T: ParamType>(key: impl Into<String>) -> Self {
        Self::new(key, T::KIND)
    }

    /// Mark as required: the owner is not runnable until a value is set.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Mark as a behavior-written output.  Observed parameters are never
    /// required.
    pub fn observed(mut self) -> Self {
        self.access = Access::Observed;
        self.required = false;
        self
    }

    pub fn with_domain(mut self, domain: ParameterDomain) -> Self {
        self.domain = Some(domain);
        self
    }

    /// Set an initial value, validated like any other write.
    pub fn with_value(mut self, value: impl Into<ParamValue>) -> ParamResult<Self> {
        self.set(value)?;
        Ok(self)
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn kind(&self) -> ParamKind {
        self.kind
    }

    pub fn value(&self) -> Option<&ParamValue> {
        self.value.as_ref()
    }

    pub fn domain(&self) -> Option<&ParameterDomain> {
        self.domain.as_ref()
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn access(&self) -> Access {
        self.access
    }

    pub fn is_set(&self) -> bool {
        self.value.is_some()
    }

    /// Typed read; `None` when unset or of a different kind.
    pub fn get<T: ParamType>(&self) -> Option<T> {
        self.value.as_ref().and_then(T::from_value)
    }

    // ── Writes ────────────────────────────────────────────────────────────

    /// Check `value` against kind and domain without storing it.
    pub fn validate(&self, value: ParamValue) -> ParamResult<ParamValue> {
        let value = value.coerce(self.kind);
        if value.kind() != self.kind {
            return Err(ParamError::TypeMismatch {
                key:      self.key.clone(),
                expected: self.kind,
                got:      value.kind(),
            });
        }
        if let Some(domain) = self.domain.as_ref().filter(|d| !d.is_valid(&value)) {
            return Err(ParamError::DomainValidation {
                key:    self.key.clone(),
                value:  value.to_string(),
                domain: domain.description().to_owned(),
            });
        }
        Ok(value)
    }

    /// Validate and store.  On error the previous value is untouched.
    pub fn set(&mut self, value: impl Into<ParamValue>) -> ParamResult<()> {
        let value = self.validate(value.into())?;
        self.value = Some(value);
        Ok(())
    }

    /// Parse `raw` according to this parameter's kind, then [`set`](Self::set).
    pub fn set_from_str(&mut self, raw: &str) -> ParamResult<()> {
        let value = ParamValue::parse(self.kind, raw)?;
        self.set(value)
    }

    /// Drop the stored value.
    pub fn clear(&mut self) {
        self.value = None;
    }
}
