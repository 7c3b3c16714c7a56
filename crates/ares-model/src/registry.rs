//! Model constructors by name.

use std::sync::Arc;

use crate::{Model, ModelError, ModelResult, catalogue};

/// Builds a fresh, unconfigured model.
pub type ModelFactory = Arc<dyn Fn() -> ModelResult<Model> + Send + Sync>;

/// The set of models a user can pick from.  Every [`create`](Self::create)
/// returns a new `Model`, so configuration sessions never share parameter
/// records.
#[derive(Clone, Default)]
pub struct ModelRegistry {
    entries: Vec<(String, ModelFactory)>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Predator-Prey, Schelling and Fire Spread.
    pub fn builtin() -> Self {
        let builtins: [(&str, fn() -> ModelResult<Model>); 3] = [
            (catalogue::PREDATOR_PREY, catalogue::predator_prey),
            (catalogue::SCHELLING, catalogue::schelling),
            (catalogue::FIRE_SPREAD, catalogue::fire_spread),
        ];
        let mut r = Self::new();
        for (name, build) in builtins {
            let factory: ModelFactory = Arc::new(build);
            r.entries.push((name.to_owned(), factory));
        }
        r
    }

    pub fn register(
        &mut self,
        name:    impl Into<String>,
        factory: impl Fn() -> ModelResult<Model> + Send + Sync + 'static,
    ) -> ModelResult<()> {
        let name = name.into();
        if self.contains(&name) {
            return Err(ModelError::Duplicate { what: "model", name });
        }
        let factory: ModelFactory = Arc::new(factory);
        self.entries.push((name, factory));
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn create(&self, name: &str) -> ModelResult<Model> {
        let (_, factory) = self
            .entries
            .iter()
            .find(|(n, _)| n == name)
            .ok_or_else(|| ModelError::UnknownModel(name.to_owned()))?;
        factory()
    }
}
