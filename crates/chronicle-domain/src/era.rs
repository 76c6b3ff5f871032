//! Era module - BC/AD sign handling and ambient era context
//!
//! Years are stored as signed integers with no year zero: `1` is 1 AD and
//! `-1` is 1 BC. Astronomical numbering (where 1 BC is `0`) is only used
//! internally for arithmetic that crosses the era boundary.

use std::fmt;

/// Calendar era of a year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Era {
    /// Before Christ / Before Common Era
    Bc,

    /// Anno Domini / Common Era
    Ad,
}

impl Era {
    /// Get the canonical marker for this era
    pub fn as_str(&self) -> &'static str {
        match self {
            Era::Bc => "BC",
            Era::Ad => "AD",
        }
    }

    /// Parse an era marker such as `BC`, `B.C.E.`, `ad` or `CE`
    ///
    /// # Examples
    ///
    /// ```
    /// use chronicle_domain::Era;
    ///
    /// assert_eq!(Era::parse("B.C.E."), Some(Era::Bc));
    /// assert_eq!(Era::parse("ce"), Some(Era::Ad));
    /// assert_eq!(Era::parse("BP"), None);
    /// ```
    pub fn parse(marker: &str) -> Option<Self> {
        let compact: String = marker
            .chars()
            .filter(|c| c.is_ascii_alphabetic())
            .map(|c| c.to_ascii_uppercase())
            .collect();

        match compact.as_str() {
            "BC" | "BCE" => Some(Era::Bc),
            "AD" | "CE" => Some(Era::Ad),
            _ => None,
        }
    }

    /// Era of a signed year, `None` for the nonexistent year zero
    pub fn of(year: i32) -> Option<Self> {
        match year {
            0 => None,
            y if y < 0 => Some(Era::Bc),
            _ => Some(Era::Ad),
        }
    }

    /// Apply this era to an unsigned year magnitude
    ///
    /// Returns `None` for year zero or a magnitude that does not fit.
    ///
    /// # Examples
    ///
    /// ```
    /// use chronicle_domain::Era;
    ///
    /// assert_eq!(Era::Bc.apply(509), Some(-509));
    /// assert_eq!(Era::Ad.apply(1066), Some(1066));
    /// assert_eq!(Era::Bc.apply(0), None);
    /// ```
    pub fn apply(self, magnitude: u32) -> Option<i32> {
        if magnitude == 0 {
            return None;
        }
        let value = i32::try_from(magnitude).ok()?;
        Some(match self {
            Era::Bc => -value,
            Era::Ad => value,
        })
    }
}

impl fmt::Display for Era {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Convert a historical year (no zero) to astronomical numbering
pub fn to_astronomical(year: i32) -> i64 {
    if year < 0 {
        i64::from(year) + 1
    } else {
        i64::from(year)
    }
}

/// Convert an astronomical year back to historical numbering
///
/// Returns `None` when the result does not fit an `i32`.
pub fn from_astronomical(year: i64) -> Option<i32> {
    let historical = if year <= 0 { year - 1 } else { year };
    i32::try_from(historical).ok()
}

/// Offset a historical year by a number of years, skipping year zero
///
/// # Examples
///
/// ```
/// use chronicle_domain::era::offset_year;
///
/// assert_eq!(offset_year(1, -1), Some(-1));
/// assert_eq!(offset_year(-44, 50), Some(7));
/// ```
pub fn offset_year(year: i32, delta: i64) -> Option<i32> {
    from_astronomical(to_astronomical(year) + delta)
}

/// Ambient era assumptions inherited from the surrounding page or section
///
/// Threaded explicitly into every parser call; never read from shared state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EraContext {
    /// Era applied to years that carry no explicit marker
    pub default_era: Era,

    /// Section-level date range used by the section-range fallback
    pub section_range: Option<(i32, i32)>,
}

impl EraContext {
    /// Context that assumes AD with no section range
    pub fn new() -> Self {
        Self {
            default_era: Era::Ad,
            section_range: None,
        }
    }

    /// Context for pages whose unmarked years are BC
    pub fn bc() -> Self {
        Self {
            default_era: Era::Bc,
            section_range: None,
        }
    }

    /// Set the default era
    pub fn with_default_era(mut self, era: Era) -> Self {
        self.default_era = era;
        self
    }

    /// Set the section-level fallback range
    pub fn with_section_range(mut self, start_year: i32, end_year: i32) -> Self {
        self.section_range = Some((start_year, end_year));
        self
    }

    /// Resolve an optional explicit era against the ambient default
    pub fn resolve(&self, explicit: Option<Era>) -> Era {
        explicit.unwrap_or(self.default_era)
    }
}

impl Default for EraContext {
    fn default() -> Self {
        Self::new()
    }
}
