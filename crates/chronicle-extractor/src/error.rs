//! Error and warning types for date resolution

use chronicle_domain::InvalidSpan;
use thiserror::Error;

/// Errors that can occur while resolving dates or loading configuration
///
/// Resolution failures are local: a strategy that does not match simply
/// yields nothing, and an exhausted orchestrator reports the text as undated.
/// These variants exist so callers and logs can say why.
#[derive(Error, Debug)]
pub enum ParseError {
    /// A single strategy did not recognize the text
    #[error("No match for '{text}' in strategy {strategy}")]
    NoMatch {
        /// Strategy that was tried
        strategy: &'static str,
        /// Raw input text
        text: String,
    },

    /// Every configured strategy was tried without success
    #[error("All strategies exhausted for '{text}' (tried: {})", .attempted.join(", "))]
    AllStrategiesExhausted {
        /// Raw input text
        text: String,
        /// Strategies tried, in order
        attempted: Vec<&'static str>,
    },

    /// A strategy matched but produced an invalid span
    #[error("Inconsistent span: {0}")]
    InconsistentSpan(#[from] InvalidSpan),

    /// No orchestrator is registered under the id
    #[error("Unknown orchestrator: {0}")]
    UnknownOrchestrator(String),

    /// A configured strategy name is not recognized
    #[error("Unknown parser strategy: {0}")]
    UnknownStrategy(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Failed to read a config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to serialize TOML
    #[error("Failed to serialize config TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

/// Non-fatal conditions recorded against a table row
///
/// Warnings never block a row; they are logged and attached to the
/// row outcome for later audit.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RowWarning {
    /// The row had no year cell and inherited one from a rowspan
    #[error("Year {year} inherited from row {origin_row:?} ({remaining} rows left)")]
    RowspanInheritance {
        /// Inherited signed year
        year: i32,
        /// Row that declared the rowspan
        origin_row: Option<usize>,
        /// Rows still allowed to inherit
        remaining: u32,
    },

    /// A year embedded in the description disagrees with the table columns
    #[error("Description mentions {description_year} but the year column says {column_year}")]
    DescriptionMismatch {
        /// Start year from the table columns
        column_year: i32,
        /// Year found in the description text
        description_year: i32,
    },

    /// The date cell could not be read; the row was dated by year only
    #[error("Unreadable date cell '{0}'")]
    UnreadableDateCell(String),

    /// The row could not be dated from table structure
    #[error("Row skipped: {reason}")]
    Skipped {
        /// Why the row was skipped
        reason: String,
    },
}
