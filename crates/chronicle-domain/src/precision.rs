//! Precision module - granularity of a resolved date

/// Granularity of a resolved date
///
/// Describes how finely the source text pinned the date down. Independent of
/// [`Confidence`](crate::Confidence), which describes source reliability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Precision {
    /// Day, month and year are known
    ExactDate,

    /// Month and year are known
    MonthOnly,

    /// Only the year (or a year range) is known
    YearOnly,

    /// A decade such as "1990s"
    Decade,

    /// A single century
    Century,

    /// A range of centuries
    CenturyRange,

    /// A qualified part of a century (early, mid, late, before)
    CenturyModifier,

    /// Relative to the reference year ("N years ago")
    YearsAgo,

    /// Marked circa or with a tilde
    Approximate,

    /// Marked as doubtful ("1066?")
    Uncertain,
}

impl Precision {
    /// Get the precision name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Precision::ExactDate => "exact_date",
            Precision::MonthOnly => "month_only",
            Precision::YearOnly => "year_only",
            Precision::Decade => "decade",
            Precision::Century => "century",
            Precision::CenturyRange => "century_range",
            Precision::CenturyModifier => "century_modifier",
            Precision::YearsAgo => "years_ago",
            Precision::Approximate => "approximate",
            Precision::Uncertain => "uncertain",
        }
    }

    /// Parse a precision from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "exact_date" => Some(Precision::ExactDate),
            "month_only" => Some(Precision::MonthOnly),
            "year_only" => Some(Precision::YearOnly),
            "decade" => Some(Precision::Decade),
            "century" => Some(Precision::Century),
            "century_range" => Some(Precision::CenturyRange),
            "century_modifier" => Some(Precision::CenturyModifier),
            "years_ago" => Some(Precision::YearsAgo),
            "approximate" => Some(Precision::Approximate),
            "uncertain" => Some(Precision::Uncertain),
            _ => None,
        }
    }
}

impl std::str::FromStr for Precision {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid precision: {}", s))
    }
}
