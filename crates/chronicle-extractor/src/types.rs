//! Result types for inline and table resolution

use crate::error::RowWarning;
use chronicle_domain::Span;
use std::fmt;

/// Outcome of running one orchestrator over one text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A strategy matched
    Resolved {
        /// The resolved span
        span: Span,
        /// Name of the strategy that matched
        strategy: &'static str,
    },

    /// No strategy matched; the section range was used
    Fallback(Span),

    /// No strategy matched and no fallback applied
    Undated {
        /// Strategies tried, in order
        attempted: Vec<&'static str>,
    },
}

impl Resolution {
    /// The span, if any
    pub fn span(&self) -> Option<&Span> {
        match self {
            Resolution::Resolved { span, .. } | Resolution::Fallback(span) => Some(span),
            Resolution::Undated { .. } => None,
        }
    }

    /// Take the span, if any
    pub fn into_span(self) -> Option<Span> {
        match self {
            Resolution::Resolved { span, .. } | Resolution::Fallback(span) => Some(span),
            Resolution::Undated { .. } => None,
        }
    }

    /// Accounting status of this outcome
    pub fn status(&self) -> ResolutionStatus {
        match self {
            Resolution::Resolved { .. } => ResolutionStatus::Resolved,
            Resolution::Fallback(_) => ResolutionStatus::Fallback,
            Resolution::Undated { .. } => ResolutionStatus::Skipped,
        }
    }
}

/// How an item was dated, for summary accounting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolutionStatus {
    /// Dated from its own text or cells
    Resolved,
    /// Dated from a year inherited through a rowspan
    Inherited,
    /// Dated from the ambient section range
    Fallback,
    /// Not dated
    Skipped,
}

impl ResolutionStatus {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolutionStatus::Resolved => "resolved",
            ResolutionStatus::Inherited => "inherited",
            ResolutionStatus::Fallback => "fallback",
            ResolutionStatus::Skipped => "skipped",
        }
    }
}

impl fmt::Display for ResolutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Counts of resolved, inherited, fallback and skipped items
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolutionSummary {
    /// Items dated from their own text
    pub resolved: usize,
    /// Table rows dated through rowspan inheritance
    pub inherited: usize,
    /// Items dated from the section range
    pub fallback: usize,
    /// Items left undated
    pub skipped: usize,
}

impl ResolutionSummary {
    /// Create an empty summary
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one item
    pub fn record(&mut self, status: ResolutionStatus) {
        match status {
            ResolutionStatus::Resolved => self.resolved += 1,
            ResolutionStatus::Inherited => self.inherited += 1,
            ResolutionStatus::Fallback => self.fallback += 1,
            ResolutionStatus::Skipped => self.skipped += 1,
        }
    }

    /// Total items counted
    pub fn total(&self) -> usize {
        self.resolved + self.inherited + self.fallback + self.skipped
    }

    /// Items that received a span
    pub fn dated(&self) -> usize {
        self.resolved + self.inherited + self.fallback
    }

    /// Generate a summary report
    pub fn summary(&self) -> String {
        [
            "Resolution Summary".to_string(),
            "==================".to_string(),
            format!("Resolved: {}", self.resolved),
            format!("Inherited: {}", self.inherited),
            format!("Fallback: {}", self.fallback),
            format!("Skipped: {}", self.skipped),
            format!("Total: {}", self.total()),
        ]
        .join("\n")
    }
}

/// Result for one table row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowOutcome {
    /// Zero-based position of the row among the extracted rows
    pub index: usize,
    /// Span for the row, absent when skipped
    pub span: Option<Span>,
    /// Resolved, inherited or skipped
    pub status: ResolutionStatus,
    /// Non-fatal conditions met while reading the row
    pub warnings: Vec<RowWarning>,
}

/// Result of extracting one table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableExtraction {
    /// One outcome per input row, in document order
    pub outcomes: Vec<RowOutcome>,
    /// Counts over `outcomes`
    pub summary: ResolutionSummary,
}

impl TableExtraction {
    /// Spans of every dated row, in document order
    pub fn spans(&self) -> impl Iterator<Item = &Span> {
        self.outcomes.iter().filter_map(|o| o.span.as_ref())
    }

    /// Every warning raised, with its row index
    pub fn warnings(&self) -> impl Iterator<Item = (usize, &RowWarning)> {
        self.outcomes
            .iter()
            .flat_map(|o| o.warnings.iter().map(move |w| (o.index, w)))
    }
}
