//! Calendar arithmetic: centuries, century thirds, decades and months
//!
//! All bounds are inclusive signed years (no year zero, BC negative).

use crate::era::Era;

/// An ordinal century in a given era
///
/// Century `N` AD covers `(N-1)*100 + 1 ..= N*100`; century `N` BC covers
/// `-(N*100) ..= -((N-1)*100 + 1)`. Adjacent centuries in the same era are
/// contiguous, and the 1st century BC is immediately followed by the 1st AD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Century {
    ordinal: u32,
    era: Era,
}

impl Century {
    /// Largest supported ordinal; keeps every bound inside `i32`
    pub const MAX_ORDINAL: u32 = 10_000;

    /// Create a century, `None` for ordinal zero or beyond [`Self::MAX_ORDINAL`]
    ///
    /// # Examples
    ///
    /// ```
    /// use chronicle_domain::{Century, Era};
    ///
    /// let fifth_bc = Century::new(5, Era::Bc).unwrap();
    /// assert_eq!(fifth_bc.bounds(), (-500, -401));
    /// ```
    pub fn new(ordinal: u32, era: Era) -> Option<Self> {
        if ordinal == 0 || ordinal > Self::MAX_ORDINAL {
            return None;
        }
        Some(Self { ordinal, era })
    }

    /// Ordinal number of the century
    pub fn ordinal(&self) -> u32 {
        self.ordinal
    }

    /// Era of the century
    pub fn era(&self) -> Era {
        self.era
    }

    /// Inclusive `(start, end)` years of the century
    pub fn bounds(&self) -> (i32, i32) {
        let n = self.ordinal as i32;
        match self.era {
            Era::Ad => ((n - 1) * 100 + 1, n * 100),
            Era::Bc => (-(n * 100), -((n - 1) * 100 + 1)),
        }
    }

    /// Inclusive bounds of one third of the century
    ///
    /// Thirds are counted from the century's own chronological start:
    /// years 1-33, 34-66 and 67-100.
    pub fn third(&self, third: CenturyThird) -> (i32, i32) {
        let (start, _) = self.bounds();
        let (lo, hi) = third.offsets();
        (start + lo, start + hi)
    }

    /// The century immediately before this one in time
    pub fn preceding(&self) -> Option<Self> {
        match self.era {
            Era::Ad if self.ordinal == 1 => Self::new(1, Era::Bc),
            Era::Ad => Self::new(self.ordinal - 1, Era::Ad),
            Era::Bc => Self::new(self.ordinal + 1, Era::Bc),
        }
    }

    /// The century immediately after this one in time
    pub fn following(&self) -> Option<Self> {
        match self.era {
            Era::Bc if self.ordinal == 1 => Self::new(1, Era::Ad),
            Era::Bc => Self::new(self.ordinal - 1, Era::Bc),
            Era::Ad => Self::new(self.ordinal + 1, Era::Ad),
        }
    }
}

/// A third of a century
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CenturyThird {
    /// Years 1-33
    Early,

    /// Years 34-66
    Mid,

    /// Years 67-100
    Late,
}

impl CenturyThird {
    /// Zero-based year offsets from the century start
    fn offsets(&self) -> (i32, i32) {
        match self {
            CenturyThird::Early => (0, 32),
            CenturyThird::Mid => (33, 65),
            CenturyThird::Late => (66, 99),
        }
    }

    /// Parse a modifier word (`early`, `mid`, `middle`, `late`)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "early" => Some(CenturyThird::Early),
            "mid" | "middle" => Some(CenturyThird::Mid),
            "late" => Some(CenturyThird::Late),
            _ => None,
        }
    }

    /// Get the modifier name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            CenturyThird::Early => "early",
            CenturyThird::Mid => "mid",
            CenturyThird::Late => "late",
        }
    }
}

/// Part of a decade ("early 1990s")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecadePart {
    /// First four years
    Early,

    /// Middle three years
    Mid,

    /// Last three years
    Late,
}

impl DecadePart {
    fn offsets(&self) -> (i32, i32) {
        match self {
            DecadePart::Early => (0, 3),
            DecadePart::Mid => (4, 6),
            DecadePart::Late => (7, 9),
        }
    }

    /// Parse a modifier word (`early`, `mid`, `middle`, `late`)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "early" => Some(DecadePart::Early),
            "mid" | "middle" => Some(DecadePart::Mid),
            "late" => Some(DecadePart::Late),
            _ => None,
        }
    }
}

/// Inclusive bounds of a decade named by its first year (`1990` for "1990s")
///
/// BC decades count down: "40s BC" is `-49 ..= -40`. The "0s" decade loses
/// its nonexistent year zero.
///
/// # Examples
///
/// ```
/// use chronicle_domain::{calendar::decade_bounds, Era};
///
/// assert_eq!(decade_bounds(1990, Era::Ad), Some((1990, 1999)));
/// assert_eq!(decade_bounds(40, Era::Bc), Some((-49, -40)));
/// assert_eq!(decade_bounds(1995, Era::Ad), None);
/// ```
pub fn decade_bounds(decade: u32, era: Era) -> Option<(i32, i32)> {
    decade_part_bounds(decade, era, None)
}

/// Inclusive bounds of a decade, optionally narrowed to one part of it
pub fn decade_part_bounds(decade: u32, era: Era, part: Option<DecadePart>) -> Option<(i32, i32)> {
    if decade % 10 != 0 {
        return None;
    }
    let d = i32::try_from(decade).ok().filter(|d| *d <= i32::MAX - 9)?;
    let (lo, hi) = part.map(|p| p.offsets()).unwrap_or((0, 9));

    // Chronological order inside the decade: AD runs d..d+9, BC runs -(d+9)..-d.
    let (start, end) = match era {
        Era::Ad => ((d + lo).max(1), d + hi),
        Era::Bc => (-(d + 9) + lo, (-(d + 9) + hi).min(-1)),
    };

    if start > end {
        return None;
    }
    Some((start, end))
}

const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Parse a month name or three-letter abbreviation into `1..=12`
///
/// # Examples
///
/// ```
/// use chronicle_domain::calendar::month_from_name;
///
/// assert_eq!(month_from_name("March"), Some(3));
/// assert_eq!(month_from_name("Sept."), Some(9));
/// assert_eq!(month_from_name("Smarch"), None);
/// ```
pub fn month_from_name(name: &str) -> Option<u8> {
    let lower = name.trim().trim_end_matches('.').to_lowercase();
    if lower.len() < 3 {
        return None;
    }

    if lower == "sept" {
        return Some(9);
    }

    MONTH_NAMES
        .iter()
        .position(|full| *full == lower || (lower.len() == 3 && full.starts_with(&lower)))
        .map(|idx| idx as u8 + 1)
}

/// Full English name of a month in `1..=12`
pub fn month_name(month: u8) -> Option<&'static str> {
    const DISPLAY: [&str; 12] = [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ];
    DISPLAY.get(usize::from(month).checked_sub(1)?).copied()
}

/// Maximum day number of a month, allowing 29 February
pub fn days_in_month(month: u8) -> Option<u8> {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => Some(31),
        4 | 6 | 9 | 11 => Some(30),
        2 => Some(29),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_century_bounds() {
        assert_eq!(Century::new(5, Era::Bc).unwrap().bounds(), (-500, -401));
        assert_eq!(Century::new(1, Era::Bc).unwrap().bounds(), (-100, -1));
        assert_eq!(Century::new(1, Era::Ad).unwrap().bounds(), (1, 100));
        assert_eq!(Century::new(21, Era::Ad).unwrap().bounds(), (2001, 2100));
        assert!(Century::new(0, Era::Ad).is_none());
    }

    #[test]
    fn test_century_thirds() {
        let sixteenth = Century::new(16, Era::Ad).unwrap();
        assert_eq!(sixteenth.third(CenturyThird::Early), (1501, 1533));
        assert_eq!(sixteenth.third(CenturyThird::Mid), (1534, 1566));
        assert_eq!(sixteenth.third(CenturyThird::Late), (1567, 1600));

        let fifth_bc = Century::new(5, Era::Bc).unwrap();
        assert_eq!(fifth_bc.third(CenturyThird::Early), (-500, -468));
        assert_eq!(fifth_bc.third(CenturyThird::Late), (-434, -401));
    }

    #[test]
    fn test_preceding_crosses_era() {
        let first_ad = Century::new(1, Era::Ad).unwrap();
        assert_eq!(first_ad.preceding(), Century::new(1, Era::Bc));
        assert_eq!(Century::new(1, Era::Bc).unwrap().following(), Some(first_ad));
        assert_eq!(
            Century::new(5, Era::Bc).unwrap().preceding(),
            Century::new(6, Era::Bc)
        );
        assert_eq!(
            Century::new(17, Era::Ad).unwrap().preceding(),
            Century::new(16, Era::Ad)
        );
    }

    #[test]
    fn test_decade_parts() {
        assert_eq!(decade_part_bounds(1990, Era::Ad, Some(DecadePart::Early)), Some((1990, 1993)));
        assert_eq!(decade_part_bounds(1990, Era::Ad, Some(DecadePart::Late)), Some((1997, 1999)));
        assert_eq!(decade_part_bounds(40, Era::Bc, Some(DecadePart::Early)), Some((-49, -46)));
        assert_eq!(decade_bounds(0, Era::Ad), Some((1, 9)));
        assert_eq!(decade_bounds(0, Era::Bc), Some((-9, -1)));
    }

    #[test]
    fn test_months() {
        assert_eq!(month_from_name("january"), Some(1));
        assert_eq!(month_from_name("Dec"), Some(12));
        assert_eq!(month_from_name("Ma"), None);
        assert_eq!(month_name(3), Some("March"));
        assert_eq!(month_name(0), None);
        assert_eq!(days_in_month(2), Some(29));
        assert_eq!(days_in_month(13), None);
    }
}
