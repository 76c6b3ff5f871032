//! Deep time: "250,000 years ago", "5–2 million years ago",
//! "12,000 years before present"

use super::DateParser;
use crate::grammar::{self, build_span, ends_expression, note};
use chronicle_domain::era::from_astronomical;
use chronicle_domain::{Confidence, EraContext, Precision, Span};
use regex::{Captures, Regex};
use std::sync::OnceLock;

const NUMBER: &str = r"\d{1,3}(?:,\d{3})+|\d+(?:\.\d+)?";

fn pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        grammar::compile(&format!(
            r"(?:(?:about|around|approximately|approx\.|circa|ca?\.|~)\s*)?(?P<n1>{num})(?:\s*(?P<m1>million|thousand))?(?:{dash}(?P<n2>{num})(?:\s*(?P<m2>million|thousand))?)?\s+years?\s+(?:ago|before\s+present|BP\b)",
            num = NUMBER,
            dash = grammar::DASH,
        ))
    })
}

fn multiplier(word: Option<&str>) -> f64 {
    match word.map(str::to_lowercase).as_deref() {
        Some("million") => 1_000_000.0,
        Some("thousand") => 1_000.0,
        _ => 1.0,
    }
}

fn magnitude(caps: &Captures<'_>, number: &str, scale: f64) -> Option<u64> {
    let value: f64 = caps.name(number)?.as_str().replace(',', "").parse().ok()?;
    let years = (value * scale).round();
    if !years.is_finite() || years < 1.0 || years > u32::MAX as f64 {
        return None;
    }
    Some(years as u64)
}

/// Years counted back from a fixed reference year
///
/// Large magnitudes carry no meaningful year-level precision, so results at
/// or above the rounding threshold are rounded to the nearest step: with the
/// defaults "250,000 years ago" is 248,000 BC rather than 247,975 BC.
#[derive(Debug, Clone, Copy)]
pub struct YearsAgoParser {
    reference_year: i32,
    rounding_threshold: u64,
    rounding_step: u64,
}

impl Default for YearsAgoParser {
    fn default() -> Self {
        Self::new(2026, 10_000, 1_000)
    }
}

impl YearsAgoParser {
    /// Create a parser counting back from `reference_year`
    pub fn new(reference_year: i32, rounding_threshold: u64, rounding_step: u64) -> Self {
        Self {
            reference_year,
            rounding_threshold,
            rounding_step,
        }
    }

    /// Signed historical year `years` before the reference year
    fn year_before(&self, years: u64) -> Option<i32> {
        let astronomical = i64::from(self.reference_year) - i64::try_from(years).ok()?;
        let year = from_astronomical(astronomical)?;
        if years < self.rounding_threshold || self.rounding_step == 0 {
            return Some(year);
        }

        let step = i64::try_from(self.rounding_step).ok()?;
        let magnitude = i64::from(year).abs();
        let rounded = (magnitude + step / 2) / step * step;
        if rounded == 0 {
            return Some(year);
        }
        i32::try_from(rounded * i64::from(year.signum())).ok()
    }
}

impl DateParser for YearsAgoParser {
    fn name(&self) -> &'static str {
        "years_ago"
    }

    fn try_parse(&self, text: &str, _era: &EraContext) -> Option<Span> {
        let caps = pattern().captures(text)?;
        let whole = caps.get(0)?;
        if !ends_expression(&text[whole.end()..]) {
            return None;
        }

        // "5–2 million": the trailing multiplier scales both bounds
        let second_scale = multiplier(caps.name("m2").map(|m| m.as_str()));
        let first_scale = match caps.name("m1") {
            Some(m) => multiplier(Some(m.as_str())),
            None => second_scale,
        };

        let first = magnitude(&caps, "n1", first_scale)?;
        let second = match caps.name("n2") {
            Some(_) => magnitude(&caps, "n2", second_scale)?,
            None => first,
        };

        let start = self.year_before(first.max(second))?;
        let end = self.year_before(first.min(second))?;
        let builder = Span::builder(start, end, Precision::YearsAgo)
            .circa(true)
            .confidence(Confidence::Approximate)
            .notes(note(self.name(), whole.as_str()));
        build_span(self.name(), text, builder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Option<(i32, i32)> {
        YearsAgoParser::default()
            .try_parse(text, &EraContext::default())
            .map(|s| (s.start_year(), s.end_year()))
    }

    #[test]
    fn test_large_magnitude_is_rounded() {
        let span = YearsAgoParser::default()
            .try_parse("250,000 years ago", &EraContext::default())
            .unwrap();
        assert_eq!((span.start_year(), span.end_year()), (-248_000, -248_000));
        assert!(span.circa());
        assert_eq!(span.precision(), Precision::YearsAgo);
    }

    #[test]
    fn test_small_magnitude_is_exact() {
        // 2026 - 3000 = astronomical -974 = 975 BC
        assert_eq!(parse("3,000 years ago"), Some((-975, -975)));
        assert_eq!(parse("about 500 years ago"), Some((1526, 1526)));
    }

    #[test]
    fn test_multipliers() {
        assert_eq!(parse("2.5 million years ago"), Some((-2_498_000, -2_498_000)));
        assert_eq!(parse("70 thousand years ago"), Some((-68_000, -68_000)));
    }

    #[test]
    fn test_range_shares_multiplier() {
        assert_eq!(parse("5–2 million years ago"), Some((-4_998_000, -1_998_000)));
        assert_eq!(parse("12,000–10,000 years ago"), Some((-10_000, -8_000)));
    }

    #[test]
    fn test_before_present() {
        assert_eq!(parse("12,000 years before present"), Some((-10_000, -10_000)));
        assert_eq!(parse("12,000 years BP"), Some((-10_000, -10_000)));
    }

    #[test]
    fn test_reference_year_is_configurable() {
        let parser = YearsAgoParser::new(2000, 10_000, 1_000);
        let span = parser.try_parse("100 years ago", &EraContext::default()).unwrap();
        assert_eq!(span.start_year(), 1900);
    }

    #[test]
    fn test_rejects_plain_years() {
        assert_eq!(parse("250,000 BC"), None);
        assert_eq!(parse("five years ago"), None);
    }
}
