//! Orchestrator - ordered strategy selection with a fallback policy
//!
//! An orchestrator tries its strategies in priority order and returns the
//! first match. When every strategy declines, the configured
//! [`FallbackMode`] decides between the ambient section range and no span.
//! Orchestrators are immutable once built and safe to share across threads.

use crate::config::{EngineConfig, FallbackMode, OrchestratorConfig};
use crate::error::ParseError;
use crate::grammar::{clean_cell, strip_lead_in};
use crate::qualifiers;
use crate::strategies::DateParser;
use crate::types::{Resolution, ResolutionSummary};
use chronicle_domain::{Confidence, EraContext, Precision, Span};
use tracing::{debug, info};

/// An ordered list of strategies plus a fallback policy
#[derive(Debug)]
pub struct Orchestrator {
    id: String,
    parsers: Vec<Box<dyn DateParser>>,
    fallback: FallbackMode,
    apply_qualifiers: bool,
}

impl Orchestrator {
    /// Create an orchestrator from strategies in priority order
    pub fn new(id: impl Into<String>, parsers: Vec<Box<dyn DateParser>>, fallback: FallbackMode) -> Self {
        Self {
            id: id.into(),
            parsers,
            fallback,
            apply_qualifiers: true,
        }
    }

    /// Enable or disable legendary/contentious detection
    pub fn with_qualifiers(mut self, enabled: bool) -> Self {
        self.apply_qualifiers = enabled;
        self
    }

    /// Build an orchestrator from its configuration
    pub fn from_config(config: &OrchestratorConfig, engine: &EngineConfig) -> Self {
        let parsers = config.strategies.iter().map(|kind| kind.build(engine)).collect();
        Self::new(config.id.clone(), parsers, config.fallback).with_qualifiers(engine.apply_qualifiers)
    }

    /// Ingestion-strategy identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Fallback policy
    pub fn fallback(&self) -> FallbackMode {
        self.fallback
    }

    /// Strategy names in priority order
    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.parsers.iter().map(|p| p.name()).collect()
    }

    /// Resolve `text`, reporting which strategy matched or why none did
    pub fn resolve(&self, text: &str, era: &EraContext) -> Resolution {
        let cleaned = clean_cell(text);
        let body = strip_lead_in(&cleaned);

        for parser in &self.parsers {
            let strategy = parser.name();
            debug!(orchestrator = %self.id, strategy, text = body, "Trying strategy");

            let Some(span) = parser.try_parse(body, era) else {
                let miss = ParseError::NoMatch {
                    strategy,
                    text: body.to_string(),
                };
                debug!(orchestrator = %self.id, "{}", miss);
                continue;
            };

            let span = if self.apply_qualifiers {
                qualifiers::apply(span, &cleaned)
            } else {
                span
            };
            debug!(orchestrator = %self.id, strategy, span = %span, "Resolved");
            return Resolution::Resolved { span, strategy };
        }

        let attempted = self.strategy_names();
        let exhausted = ParseError::AllStrategiesExhausted {
            text: cleaned.clone(),
            attempted: attempted.clone(),
        };

        match self.fallback {
            FallbackMode::SectionRange => match section_span(era, &cleaned) {
                Some(span) => {
                    info!(orchestrator = %self.id, span = %span, "{}; using section range", exhausted);
                    Resolution::Fallback(span)
                }
                None => {
                    info!(orchestrator = %self.id, "{}; no section range available", exhausted);
                    Resolution::Undated { attempted }
                }
            },
            FallbackMode::None | FallbackMode::InlineNoFallback => {
                info!(orchestrator = %self.id, "{}", exhausted);
                Resolution::Undated { attempted }
            }
        }
    }

    /// Resolve `text` to a span, if any
    pub fn parse(&self, text: &str, era: &EraContext) -> Option<Span> {
        self.resolve(text, era).into_span()
    }

    /// Resolve a batch of texts against one era context
    pub fn resolve_all<'a, I>(&self, texts: I, era: &EraContext) -> (Vec<Resolution>, ResolutionSummary)
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut summary = ResolutionSummary::new();
        let resolutions = texts
            .into_iter()
            .map(|text| {
                let resolution = self.resolve(text, era);
                summary.record(resolution.status());
                resolution
            })
            .collect();

        info!(orchestrator = %self.id, total = summary.total(), skipped = summary.skipped, "Batch resolved");
        (resolutions, summary)
    }
}

/// Fallback span covering the ambient section range
fn section_span(era: &EraContext, text: &str) -> Option<Span> {
    let (start, end) = era.section_range?;
    Span::builder(start, end, Precision::YearOnly)
        .confidence(Confidence::Fallback)
        .notes(format!("fallback: section range for '{}'", text))
        .build()
        .ok()
}
