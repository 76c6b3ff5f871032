//! Configuration for the resolution engine
//!
//! Orchestrator priority lists, fallback policies and the tunable constants
//! of individual grammars. Built once at startup and never mutated.

use crate::error::ParseError;
use crate::strategies::ParserKind;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// What an orchestrator does when every strategy fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FallbackMode {
    /// Report the text as undated
    #[default]
    None,

    /// Use the ambient section range with `confidence = fallback`
    SectionRange,

    /// Report as undated; for inline mentions where guessing would mislead
    InlineNoFallback,
}

/// Meaning of "Before Nth century"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BeforeCenturyRule {
    /// The late third of the preceding century
    #[default]
    LateThird,

    /// The whole preceding century
    FullCentury,
}

/// One orchestrator: an ordered strategy list and a fallback policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrchestratorConfig {
    /// Ingestion-strategy identifier
    pub id: String,

    /// Strategies in priority order
    pub strategies: Vec<ParserKind>,

    /// Policy applied when no strategy matches
    #[serde(default)]
    pub fallback: FallbackMode,
}

impl OrchestratorConfig {
    /// Create an orchestrator configuration
    pub fn new(id: impl Into<String>, strategies: Vec<ParserKind>, fallback: FallbackMode) -> Self {
        Self {
            id: id.into(),
            strategies,
            fallback,
        }
    }
}

/// Configuration for the resolution engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Year that "N years ago" counts back from
    #[serde(default = "default_reference_year")]
    pub reference_year: i32,

    /// Years-ago magnitudes at or above this are rounded
    #[serde(default = "default_rounding_threshold")]
    pub years_ago_rounding_threshold: u64,

    /// Rounding step for large years-ago magnitudes
    #[serde(default = "default_rounding_step")]
    pub years_ago_rounding_step: u64,

    /// Mapping used for "Before Nth century"
    #[serde(default)]
    pub before_century_rule: BeforeCenturyRule,

    /// Detect legendary/contentious wording and adjust confidence
    #[serde(default = "default_apply_qualifiers")]
    pub apply_qualifiers: bool,

    /// Orchestrators to register
    #[serde(default = "default_orchestrators")]
    pub orchestrators: Vec<OrchestratorConfig>,
}

fn default_reference_year() -> i32 {
    2026
}

fn default_rounding_threshold() -> u64 {
    10_000
}

fn default_rounding_step() -> u64 {
    1_000
}

fn default_apply_qualifiers() -> bool {
    true
}

fn default_orchestrators() -> Vec<OrchestratorConfig> {
    use ParserKind::*;

    vec![
        OrchestratorConfig::new(
            "bullet_list",
            vec![
                YearsAgo,
                CenturyModifier,
                CenturyRange,
                Century,
                Decade,
                Uncertain,
                Circa,
                FullDate,
                MonthYear,
                YearRange,
                Year,
            ],
            FallbackMode::SectionRange,
        ),
        OrchestratorConfig::new(
            "century_dominant",
            vec![
                CenturyModifier,
                CenturyRange,
                Century,
                Decade,
                Circa,
                YearRange,
                Year,
            ],
            FallbackMode::SectionRange,
        ),
        OrchestratorConfig::new(
            "prehistory",
            vec![
                YearsAgo,
                CenturyModifier,
                CenturyRange,
                Century,
                Circa,
                YearRange,
                Year,
            ],
            FallbackMode::SectionRange,
        ),
        OrchestratorConfig::new(
            "modern_events",
            vec![FullDate, MonthYear, Decade, Uncertain, Circa, YearRange, Year],
            FallbackMode::None,
        ),
        OrchestratorConfig::new(
            "inline_mentions",
            vec![FullDate, MonthYear, Circa, YearRange, Year],
            FallbackMode::InlineNoFallback,
        ),
    ]
}

impl Default for EngineConfig {
    /// Default configuration with the built-in orchestrators
    ///
    /// - Reference year: 2026
    /// - Years-ago rounding: nearest 1,000 from 10,000 years upward
    /// - "Before Nth century": late third of the preceding century
    /// - Qualifier detection: on
    fn default() -> Self {
        Self {
            reference_year: default_reference_year(),
            years_ago_rounding_threshold: default_rounding_threshold(),
            years_ago_rounding_step: default_rounding_step(),
            before_century_rule: BeforeCenturyRule::default(),
            apply_qualifiers: default_apply_qualifiers(),
            orchestrators: default_orchestrators(),
        }
    }
}

impl EngineConfig {
    /// Strict preset: no qualifier detection and no fallbacks
    pub fn strict() -> Self {
        let mut config = Self::default();
        config.apply_qualifiers = false;
        for orchestrator in &mut config.orchestrators {
            if orchestrator.fallback == FallbackMode::SectionRange {
                orchestrator.fallback = FallbackMode::None;
            }
        }
        config
    }

    /// Lenient preset: every orchestrator falls back to the section range
    pub fn lenient() -> Self {
        let mut config = Self::default();
        for orchestrator in &mut config.orchestrators {
            orchestrator.fallback = FallbackMode::SectionRange;
        }
        config
    }

    /// Look up an orchestrator configuration by id
    pub fn orchestrator(&self, id: &str) -> Option<&OrchestratorConfig> {
        self.orchestrators.iter().find(|o| o.id == id)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ParseError> {
        if self.reference_year == 0 {
            return Err(ParseError::Config("reference_year cannot be zero".to_string()));
        }
        if self.years_ago_rounding_step == 0 {
            return Err(ParseError::Config(
                "years_ago_rounding_step must be greater than 0".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for orchestrator in &self.orchestrators {
            if orchestrator.id.trim().is_empty() {
                return Err(ParseError::Config("orchestrator id cannot be empty".to_string()));
            }
            if !seen.insert(orchestrator.id.as_str()) {
                return Err(ParseError::Config(format!(
                    "duplicate orchestrator id '{}'",
                    orchestrator.id
                )));
            }
            if orchestrator.strategies.is_empty() {
                return Err(ParseError::Config(format!(
                    "orchestrator '{}' has no strategies",
                    orchestrator.id
                )));
            }
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ParseError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ParseError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, ParseError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
