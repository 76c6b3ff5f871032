//! Single year with optional era: "509 BC", "AD 79", "1066"

use super::DateParser;
use crate::grammar::{self, build_span, ends_expression, note, year_from_caps};
use chronicle_domain::{EraContext, Precision, Span};
use regex::Regex;
use std::sync::OnceLock;

fn pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| grammar::compile(&grammar::year_term("")))
}

/// Match a year at the start of `text`
///
/// Returns the signed year and the unmatched remainder. The remainder is
/// not checked; callers decide what may follow.
pub(crate) fn match_year<'t>(text: &'t str, era: &EraContext) -> Option<(i32, &'t str)> {
    let caps = pattern().captures(text)?;
    let (magnitude, explicit) = year_from_caps(&caps, "")?;
    let year = era.resolve(explicit).apply(magnitude)?;
    let end = caps.get(0)?.end();
    Some((year, &text[end..]))
}

/// Single year, era-aware
#[derive(Debug, Clone, Copy, Default)]
pub struct YearParser;

impl DateParser for YearParser {
    fn name(&self) -> &'static str {
        "year"
    }

    fn try_parse(&self, text: &str, era: &EraContext) -> Option<Span> {
        let (year, rest) = match_year(text, era)?;
        if !ends_expression(rest) {
            return None;
        }

        let matched = &text[..text.len() - rest.len()];
        let builder = Span::point(year, Precision::YearOnly).notes(note(self.name(), matched));
        build_span(self.name(), text, builder)
    }
}
