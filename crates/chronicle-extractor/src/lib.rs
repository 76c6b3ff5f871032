//! Chronicle Extractor
//!
//! Resolves free-form and tabular historical date expressions into
//! normalized [`Span`]s.
//!
//! # Overview
//!
//! Encyclopedia chronologies write dates in a dozen overlapping grammars:
//! plain years with or without an era, ranges whose era marker trails the
//! second bound, centuries with early/mid/late qualifiers, "N years ago",
//! circa and doubtful years, decades, and tables whose year cell spans
//! several rows. Each grammar is a [`DateParser`] strategy; an
//! [`Orchestrator`] tries strategies in a priority order chosen per
//! ingestion strategy and applies a fallback policy when none match.
//!
//! # Architecture
//!
//! ```text
//! bullet/prose text ─→ OrchestratorRegistry ─→ Orchestrator ─→ strategies ─→ Span
//! HTML table ─→ html::read_table ─→ TableExtractor ─→ RowspanContext + TableRowParser ─→ Span
//! ```
//!
//! # Example Usage
//!
//! ```
//! use chronicle_domain::{EraContext, Precision};
//! use chronicle_extractor::OrchestratorRegistry;
//!
//! let registry = OrchestratorRegistry::with_defaults();
//! let era = EraContext::default();
//!
//! let span = registry
//!     .parse("5th century BCE", &era, "bullet_list")?
//!     .expect("a century is recognized");
//! assert_eq!((span.start_year(), span.end_year()), (-500, -401));
//! assert_eq!(span.precision(), Precision::Century);
//! # Ok::<(), chronicle_extractor::ParseError>(())
//! ```
//!
//! Resolution is deterministic: identical text and era context always yield
//! an identical span, so downstream identity keys are stable across runs.

#![warn(missing_docs)]

pub mod config;
pub mod error;
mod grammar;
pub mod html;
pub mod orchestrator;
pub mod qualifiers;
pub mod registry;
pub mod strategies;
pub mod table;
pub mod types;

#[cfg(test)]
mod tests;

pub use chronicle_domain::{Confidence, Era, EraContext, Precision, RowspanContext, Span};
pub use config::{BeforeCenturyRule, EngineConfig, FallbackMode, OrchestratorConfig};
pub use error::{ParseError, RowWarning};
pub use html::{read_table, ColumnLayout};
pub use orchestrator::Orchestrator;
pub use registry::OrchestratorRegistry;
pub use strategies::{DateParser, ParserKind, TableRowParser};
pub use table::{parse_table_row, TableCell, TableExtractor, TableRow};
pub use types::{Resolution, ResolutionStatus, ResolutionSummary, RowOutcome, TableExtraction};

use std::sync::OnceLock;

fn default_registry() -> &'static OrchestratorRegistry {
    static REGISTRY: OnceLock<OrchestratorRegistry> = OnceLock::new();
    REGISTRY.get_or_init(OrchestratorRegistry::with_defaults)
}

/// Parse `text` with one of the built-in orchestrators
///
/// Fails only for an unknown `orchestrator_id`; text no strategy recognizes
/// yields `Ok(None)` unless the orchestrator falls back to the section range.
pub fn parse(text: &str, era: &EraContext, orchestrator_id: &str) -> Result<Option<Span>, ParseError> {
    default_registry().parse(text, era, orchestrator_id)
}
