//! Year ranges: "2500–1500 BCE", "44 BC – AD 14", "1939–45", "from 1914 to 1918"

use super::DateParser;
use crate::grammar::{self, build_span, ends_expression, note, resolve_pair, year_from_caps};
use chronicle_domain::{Era, EraContext, Precision, Span};
use regex::{Captures, Regex};
use std::sync::OnceLock;

fn dash_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        grammar::compile(&format!(
            r"(?:from\s+)?{}{}{}",
            grammar::year_term("1"),
            grammar::DASH,
            grammar::year_term("2"),
        ))
    })
}

fn between_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        grammar::compile(&format!(
            r"between\s+{}\s+and\s+{}",
            grammar::year_term("1"),
            grammar::year_term("2"),
        ))
    })
}

/// Expand an abbreviated second bound ("1939–45" → 1945)
fn expand_abbreviated(first: u32, second: u32, second_digits: usize) -> u32 {
    let first_digits = first.to_string().len();
    if first > 9999 || second_digits >= first_digits || second >= first {
        return second;
    }
    let scale = 10u32.pow(second_digits as u32);
    let expanded = first - first % scale + second;
    if expanded < first {
        expanded + scale
    } else {
        expanded
    }
}

fn range_from_caps(caps: &Captures<'_>, era: &EraContext) -> Option<(i32, i32)> {
    let (first, e1) = year_from_caps(caps, "1")?;
    let (mut second, e2) = year_from_caps(caps, "2")?;
    let (era1, era2) = resolve_pair(e1, e2, era.default_era);

    if era1 == Era::Ad && era2 == Era::Ad {
        let digits = caps.name("y2")?.as_str().len();
        second = expand_abbreviated(first, second, digits);
    }

    Some((era1.apply(first)?, era2.apply(second)?))
}

/// Match a year range at the start of `text`
///
/// Returns the signed bounds in source order and the remainder.
pub(crate) fn match_range<'t>(text: &'t str, era: &EraContext) -> Option<((i32, i32), &'t str)> {
    let caps = dash_pattern()
        .captures(text)
        .or_else(|| between_pattern().captures(text))?;
    let bounds = range_from_caps(&caps, era)?;
    let end = caps.get(0)?.end();
    Some((bounds, &text[end..]))
}

/// Two years joined by a dash, "to" or "between ... and"
#[derive(Debug, Clone, Copy, Default)]
pub struct YearRangeParser;

impl DateParser for YearRangeParser {
    fn name(&self) -> &'static str {
        "year_range"
    }

    fn try_parse(&self, text: &str, era: &EraContext) -> Option<Span> {
        let ((start, end), rest) = match_range(text, era)?;
        if !ends_expression(rest) {
            return None;
        }

        let matched = &text[..text.len() - rest.len()];
        let builder = Span::builder(start, end, Precision::YearOnly).notes(note(self.name(), matched));
        build_span(self.name(), text, builder)
    }
}
