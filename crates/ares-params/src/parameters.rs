//! `Parameters`: the insertion-ordered record owned by one model or agent.

use crate::{Access, Parameter, ParamError, ParamResult, ParamType, ParamValue};

/// An ordered set of [`Parameter`]s with unique keys.
///
/// Order is declaration order, which is also the order forms and snapshots
/// present them in.  Records are small (a handful of keys), so lookup is a
/// linear scan.
///
/// `Clone` is a deep copy of the values: an agent built from a template gets
/// its own record, and writes to it are never visible to the template or to
/// sibling agents.
#[derive(Clone, Debug, Default)]
pub struct Parameters {
    entries: Vec<Parameter>,
}

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a new parameter.  Keys must be unique.
    pub fn insert(&mut self, param: Parameter) -> ParamResult<()> {
        if self.contains(param.key()) {
            return Err(ParamError::DuplicateKey(param.key().to_owned()));
        }
        self.entries.push(param);
        Ok(())
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    pub fn contains(&self, key: &str) -> bool {
        self.parameter(key).is_some()
    }

    pub fn parameter(&self, key: &str) -> Option<&Parameter> {
        self.entries.iter().find(|p| p.key() == key)
    }

    fn parameter_mut(&mut self, key: &str) -> ParamResult<&mut Parameter> {
        self.entries
            .iter_mut()
            .find(|p| p.key() == key)
            .ok_or_else(|| ParamError::NotFound(key.to_owned()))
    }

    /// Type-checked lookup.  `None` if absent, unset, or of another kind.
    pub fn get<T: ParamType>(&self, key: &str) -> Option<T> {
        self.parameter(key).and_then(Parameter::get::<T>)
    }

    /// Like [`get`](Self::get) but reports why nothing was returned.
    ///
    /// Behaviors use this for their mandatory inputs.
    pub fn require<T: ParamType>(&self, key: &str) -> ParamResult<T> {
        let param = self
            .parameter(key)
            .ok_or_else(|| ParamError::MissingParameter(key.to_owned()))?;
        match param.value() {
            None => Err(ParamError::MissingParameter(key.to_owned())),
            Some(v) => T::from_value(v).ok_or_else(|| ParamError::TypeMismatch {
                key:      key.to_owned(),
                expected: T::KIND,
                got:      v.kind(),
            }),
        }
    }

    // ── Writes ────────────────────────────────────────────────────────────

    /// Validate and store `value` under an already declared `key`.
    ///
    /// Fails with `NotFound`, `TypeMismatch` or `DomainValidation`; the
    /// stored value is unchanged on failure.
    pub fn set(&mut self, key: &str, value: impl Into<ParamValue>) -> ParamResult<()> {
        self.parameter_mut(key)?.set(value)
    }

    /// Parse `raw` according to the declared kind of `key`, then store it.
    pub fn set_from_str(&mut self, key: &str, raw: &str) -> ParamResult<()> {
        self.parameter_mut(key)?.set_from_str(raw)
    }

    /// [`set`](Self::set) for configuration input.
    ///
    /// `Observed` parameters belong to the running behavior and are rejected
    /// with `ReadOnly`.
    pub fn configure(&mut self, key: &str, value: impl Into<ParamValue>) -> ParamResult<()> {
        self.configurable_mut(key)?.set(value)
    }

    pub fn configure_from_str(&mut self, key: &str, raw: &str) -> ParamResult<()> {
        self.configurable_mut(key)?.set_from_str(raw)
    }

    fn configurable_mut(&mut self, key: &str) -> ParamResult<&mut Parameter> {
        let param = self.parameter_mut(key)?;
        if param.access() == Access::Observed {
            return Err(ParamError::ReadOnly(key.to_owned()));
        }
        Ok(param)
    }

    pub fn clear(&mut self, key: &str) -> ParamResult<()> {
        self.parameter_mut(key)?.clear();
        Ok(())
    }

    /// Copy every set value from `other` onto keys declared here.
    ///
    /// Keys `other` has that `self` lacks are ignored; a value this record's
    /// domain rejects is an error and aborts the copy at that key.
    pub fn apply_values(&mut self, other: &Parameters) -> ParamResult<()> {
        for param in other.iter() {
            if let (Some(value), Ok(target)) = (param.value(), self.parameter_mut(param.key())) {
                target.set(value.clone())?;
            }
        }
        Ok(())
    }

    // ── Runnability ───────────────────────────────────────────────────────

    /// `true` iff every required parameter has a stored value.
    pub fn all_required_set(&self) -> bool {
        self.entries.iter().all(|p| !p.is_required() || p.is_set())
    }

    /// Keys of required parameters that are still unset.
    pub fn missing_required(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|p| p.is_required() && !p.is_set())
            .map(Parameter::key)
            .collect()
    }

    // ── Iteration ─────────────────────────────────────────────────────────

    pub fn iter(&self) -> impl Iterator<Item = &Parameter> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(Parameter::key)
    }

    /// `(key, value)` pairs of every parameter that currently has a value.
    pub fn values(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries
            .iter()
            .filter_map(|p| p.value().map(|v| (p.key(), v)))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
