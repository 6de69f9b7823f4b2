//! Name to factory registry.

use std::fmt;

type Factory<T> = Box<dyn Fn() -> T + Send + Sync>;

/// Ordered map from a unique name to a zero-argument factory.
///
/// The built-in registries are written once by their registration routine
/// and only read afterwards, so lookups need no locking. Iteration follows
/// registration order.
pub struct Registry<T> {
    entries: Vec<(String, Factory<T>)>,
}

impl<T> Registry<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Bind `name` to `factory`. Registering an existing name replaces its
    /// factory and keeps its position.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        let name = name.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = Box::new(factory),
            None => self.entries.push((name, Box::new(factory))),
        }
        self
    }

    /// Build a fresh instance, or `None` if the name is not registered.
    pub fn build(&self, name: &str) -> Option<T> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, factory)| factory())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(existing, _)| existing == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Registry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
