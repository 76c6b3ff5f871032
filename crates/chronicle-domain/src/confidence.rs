//! Confidence module - provenance and reliability of a resolved date

/// Reliability of a resolved date
///
/// Orthogonal to [`Precision`](crate::Precision): a century can be explicit
/// and an exact day can be legendary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Confidence {
    /// Stated directly by the source
    #[default]
    Explicit,

    /// Derived from structure, such as a year inherited across table rows
    Inferred,

    /// The source marks the date as approximate
    Approximate,

    /// The source reports the date as disputed
    Contentious,

    /// The date comes from legend or tradition
    Legendary,

    /// No date was found; the section range was used instead
    Fallback,
}

impl Confidence {
    /// Get the confidence name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::Explicit => "explicit",
            Confidence::Inferred => "inferred",
            Confidence::Approximate => "approximate",
            Confidence::Contentious => "contentious",
            Confidence::Legendary => "legendary",
            Confidence::Fallback => "fallback",
        }
    }

    /// Parse a confidence from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "explicit" => Some(Confidence::Explicit),
            "inferred" => Some(Confidence::Inferred),
            "approximate" => Some(Confidence::Approximate),
            "contentious" => Some(Confidence::Contentious),
            "legendary" => Some(Confidence::Legendary),
            "fallback" => Some(Confidence::Fallback),
            _ => None,
        }
    }
}

impl std::str::FromStr for Confidence {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid confidence: {}", s))
    }
}
