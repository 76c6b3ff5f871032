//! Date-grammar parser strategies
//!
//! Each strategy recognizes one grammar and maps it to a [`Span`]. Strategies
//! are pure: no shared mutable state, no errors for text they do not
//! understand (they return `None` so the orchestrator can try the next one),
//! and no invalid spans (inconsistent results are discarded).

use crate::config::EngineConfig;
use chronicle_domain::{EraContext, Span};
use serde::{Deserialize, Serialize};
use std::fmt;

mod calendar_date;
mod century;
mod century_modifier;
mod century_range;
mod circa;
mod decade;
pub(crate) mod table_row;
mod uncertain;
mod year;
mod year_range;
mod years_ago;

pub use calendar_date::{FullDateParser, MonthYearParser};
pub use century::CenturyParser;
pub use century_modifier::CenturyModifierParser;
pub use century_range::CenturyRangeParser;
pub use circa::CircaParser;
pub use decade::DecadeParser;
pub use table_row::{MonthDay, TableRowParser, YearCell};
pub use uncertain::UncertainYearParser;
pub use year::YearParser;
pub use year_range::YearRangeParser;
pub use years_ago::YearsAgoParser;

/// A single date grammar
///
/// Implementations must be deterministic: identical `(text, era)` input
/// always yields an identical result.
pub trait DateParser: fmt::Debug + Send + Sync {
    /// Stable strategy name, recorded in span notes and logs
    fn name(&self) -> &'static str;

    /// Try to read a date from the start of `text`
    fn try_parse(&self, text: &str, era: &EraContext) -> Option<Span>;
}

/// The closed set of inline strategies an orchestrator can be built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParserKind {
    /// "509 BC", "AD 79"
    Year,
    /// "2500–1500 BCE", "1939–45"
    YearRange,
    /// "~1500", "c. 1200 BC", "circa 1200–1150 BC"
    Circa,
    /// "1990s", "early 1820s", "40s BC"
    Decade,
    /// "5th century BCE"
    Century,
    /// "5th–3rd centuries BCE"
    CenturyRange,
    /// "Late 16th century", "Before 17th century"
    CenturyModifier,
    /// "250,000 years ago"
    YearsAgo,
    /// "1066?", "possibly 1200 BC"
    Uncertain,
    /// "15 March 44 BC", "March 15, 1945"
    FullDate,
    /// "March 1945"
    MonthYear,
}

impl ParserKind {
    /// Every strategy, in declaration order
    pub const ALL: [ParserKind; 11] = [
        ParserKind::Year,
        ParserKind::YearRange,
        ParserKind::Circa,
        ParserKind::Decade,
        ParserKind::Century,
        ParserKind::CenturyRange,
        ParserKind::CenturyModifier,
        ParserKind::YearsAgo,
        ParserKind::Uncertain,
        ParserKind::FullDate,
        ParserKind::MonthYear,
    ];

    /// Get the strategy name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ParserKind::Year => "year",
            ParserKind::YearRange => "year_range",
            ParserKind::Circa => "circa",
            ParserKind::Decade => "decade",
            ParserKind::Century => "century",
            ParserKind::CenturyRange => "century_range",
            ParserKind::CenturyModifier => "century_modifier",
            ParserKind::YearsAgo => "years_ago",
            ParserKind::Uncertain => "uncertain",
            ParserKind::FullDate => "full_date",
            ParserKind::MonthYear => "month_year",
        }
    }

    /// Parse a strategy from its name
    pub fn parse(s: &str) -> Option<Self> {
        let lower = s.trim().to_lowercase();
        Self::ALL.into_iter().find(|kind| kind.as_str() == lower)
    }

    /// Build the strategy with the engine's tunables
    pub fn build(&self, config: &EngineConfig) -> Box<dyn DateParser> {
        match self {
            ParserKind::Year => Box::new(YearParser),
            ParserKind::YearRange => Box::new(YearRangeParser),
            ParserKind::Circa => Box::new(CircaParser),
            ParserKind::Decade => Box::new(DecadeParser),
            ParserKind::Century => Box::new(CenturyParser),
            ParserKind::CenturyRange => Box::new(CenturyRangeParser),
            ParserKind::CenturyModifier => {
                Box::new(CenturyModifierParser::new(config.before_century_rule))
            }
            ParserKind::YearsAgo => Box::new(YearsAgoParser::new(
                config.reference_year,
                config.years_ago_rounding_threshold,
                config.years_ago_rounding_step,
            )),
            ParserKind::Uncertain => Box::new(UncertainYearParser),
            ParserKind::FullDate => Box::new(FullDateParser),
            ParserKind::MonthYear => Box::new(MonthYearParser),
        }
    }
}

impl std::str::FromStr for ParserKind {
    type Err = crate::error::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| crate::error::ParseError::UnknownStrategy(s.to_string()))
    }
}

impl fmt::Display for ParserKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
