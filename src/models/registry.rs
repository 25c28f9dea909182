//! Ordered registry of news sources.

use crate::error::{AppError, Result};
use crate::models::builtin;
use crate::models::{Config, SourceDefinition};

/// Sources in registration order. Iteration order is stable so that cycles
/// are reproducible.
#[derive(Debug, Clone, Default)]
pub struct SourceRegistry {
    sources: Vec<SourceDefinition>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in sources.
    pub fn builtin() -> Result<Self> {
        let mut registry = Self::new();
        for source in builtin::default_sources()? {
            registry.register(source)?;
        }
        Ok(registry)
    }

    /// Registry for a configuration: its `[[sources]]` when present,
    /// otherwise the built-ins.
    pub fn from_config(config: &Config) -> Result<Self> {
        if config.sources.is_empty() {
            return Self::builtin();
        }
        let mut registry = Self::new();
        for source in &config.sources {
            registry.register(SourceDefinition::from_config(source)?)?;
        }
        Ok(registry)
    }

    /// Append a source. Names must be unique.
    pub fn register(&mut self, source: SourceDefinition) -> Result<()> {
        if self.get(&source.name).is_some() {
            return Err(AppError::config(format!(
                "duplicate source name '{}'",
                source.name
            )));
        }
        self.sources.push(source);
        Ok(())
    }

    /// Look up a source by name.
    pub fn get(&self, name: &str) -> Option<&SourceDefinition> {
        self.sources.iter().find(|s| s.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SourceDefinition> {
        self.sources.iter()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl<'a> IntoIterator for &'a SourceRegistry {
    type Item = &'a SourceDefinition;
    type IntoIter = std::slice::Iter<'a, SourceDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.sources.iter()
    }
}
