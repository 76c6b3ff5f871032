//! Calendar dates with month detail: "15 March 44 BC", "March 15, 1945",
//! "March 1945"

use super::DateParser;
use crate::grammar::{self, build_span, ends_expression, note, year_from_caps};
use chronicle_domain::calendar::month_from_name;
use chronicle_domain::{EraContext, Precision, Span};
use regex::{Captures, Regex};
use std::sync::OnceLock;

fn day_first() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        grammar::compile(&format!(
            r"(?P<d>\d{{1,2}})(?:st|nd|rd|th)?\s+(?:of\s+)?(?P<m>{month})\.?,?\s+{year}",
            month = grammar::MONTH,
            year = grammar::year_term(""),
        ))
    })
}

fn month_first() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        grammar::compile(&format!(
            r"(?P<m>{month})\.?\s+(?P<d>\d{{1,2}})(?:st|nd|rd|th)?,?\s+{year}",
            month = grammar::MONTH,
            year = grammar::year_term(""),
        ))
    })
}

fn month_year() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        grammar::compile(&format!(
            r"(?:(?:in|during)\s+)?(?P<m>{month})\.?,?\s+{year}",
            month = grammar::MONTH,
            year = grammar::year_term(""),
        ))
    })
}

/// Signed year and month of a matched calendar date
fn year_and_month(caps: &Captures<'_>, era: &EraContext) -> Option<(i32, u8)> {
    let month = month_from_name(caps.name("m")?.as_str())?;
    let (magnitude, explicit) = year_from_caps(caps, "")?;
    Some((era.resolve(explicit).apply(magnitude)?, month))
}

/// Day, month and year
#[derive(Debug, Clone, Copy, Default)]
pub struct FullDateParser;

impl DateParser for FullDateParser {
    fn name(&self) -> &'static str {
        "full_date"
    }

    fn try_parse(&self, text: &str, era: &EraContext) -> Option<Span> {
        let caps = day_first()
            .captures(text)
            .or_else(|| month_first().captures(text))?;
        let whole = caps.get(0)?;
        if !ends_expression(&text[whole.end()..]) {
            return None;
        }

        let (year, month) = year_and_month(&caps, era)?;
        let day: u8 = caps.name("d")?.as_str().parse().ok()?;
        let builder = Span::point(year, Precision::ExactDate)
            .start_date(Some(month), Some(day))
            .notes(note(self.name(), whole.as_str()));
        build_span(self.name(), text, builder)
    }
}

/// Month and year without a day
///
/// A bare one- or two-digit number after the month is read as a day, not a
/// year, unless an era marker follows it ("January 27 BC").
#[derive(Debug, Clone, Copy, Default)]
pub struct MonthYearParser;

impl DateParser for MonthYearParser {
    fn name(&self) -> &'static str {
        "month_year"
    }

    fn try_parse(&self, text: &str, era: &EraContext) -> Option<Span> {
        let caps = month_year().captures(text)?;
        let whole = caps.get(0)?;
        let rest = &text[whole.end()..];
        if !ends_expression(rest) {
            return None;
        }

        // "March 15, 1945" is a full date
        let tail = rest.trim_start_matches(|c: char| c == ',' || c.is_whitespace());
        if tail.starts_with(|c: char| c.is_ascii_digit()) {
            return None;
        }
        let digits = caps.name("y")?.as_str();
        if digits.len() <= 2 && caps.name("e").is_none() && caps.name("pre").is_none() {
            return None;
        }

        let (year, month) = year_and_month(&caps, era)?;
        let builder = Span::point(year, Precision::MonthOnly)
            .start_date(Some(month), None)
            .notes(note(self.name(), whole.as_str()));
        build_span(self.name(), text, builder)
    }
}
