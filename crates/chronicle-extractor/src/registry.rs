//! Registry mapping ingestion-strategy ids to orchestrators

use crate::config::EngineConfig;
use crate::error::ParseError;
use crate::orchestrator::Orchestrator;
use crate::types::Resolution;
use chronicle_domain::{EraContext, Span};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

/// Immutable lookup of orchestrators by id
///
/// Built once at startup; lookups hand out shared handles so callers on
/// different threads can resolve concurrently.
#[derive(Debug, Default)]
pub struct OrchestratorRegistry {
    orchestrators: HashMap<String, Arc<Orchestrator>>,
}

impl OrchestratorRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in orchestrators
    pub fn with_defaults() -> Self {
        Self::from_config(&EngineConfig::default())
    }

    /// Build every orchestrator named in the configuration
    pub fn from_config(config: &EngineConfig) -> Self {
        let mut registry = Self::new();
        for orchestrator in &config.orchestrators {
            registry.register(Orchestrator::from_config(orchestrator, config));
        }
        registry
    }

    /// Register an orchestrator, replacing any with the same id
    pub fn register(&mut self, orchestrator: Orchestrator) {
        self.orchestrators
            .insert(orchestrator.id().to_string(), Arc::new(orchestrator));
    }

    /// Look up an orchestrator
    pub fn get(&self, id: &str) -> Result<Arc<Orchestrator>, ParseError> {
        self.orchestrators.get(id).cloned().ok_or_else(|| {
            warn!(orchestrator = id, "Unknown orchestrator id");
            ParseError::UnknownOrchestrator(id.to_string())
        })
    }

    /// Registered ids, sorted
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.orchestrators.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Number of registered orchestrators
    pub fn len(&self) -> usize {
        self.orchestrators.len()
    }

    /// True when nothing is registered
    pub fn is_empty(&self) -> bool {
        self.orchestrators.is_empty()
    }

    /// Resolve `text` with the orchestrator registered under `id`
    pub fn resolve(&self, text: &str, era: &EraContext, id: &str) -> Result<Resolution, ParseError> {
        Ok(self.get(id)?.resolve(text, era))
    }

    /// Parse `text` with the orchestrator registered under `id`
    pub fn parse(&self, text: &str, era: &EraContext, id: &str) -> Result<Option<Span>, ParseError> {
        Ok(self.get(id)?.parse(text, era))
    }
}
