//! Doubtful years: "1066?", "possibly 1200 BC"

use super::DateParser;
use crate::grammar::{self, build_span, ends_expression, note, year_from_caps};
use chronicle_domain::{Confidence, EraContext, Precision, Span};
use regex::Regex;
use std::sync::OnceLock;

fn pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        grammar::compile(&format!(
            r"(?:(?P<hedge>possibly|probably|perhaps|reportedly|uncertain:?)\s+)?{term}(?:\s*(?P<doubt>\?))?",
            term = grammar::year_term(""),
        ))
    })
}

/// A year the source itself doubts
///
/// Either a trailing question mark or a hedging word in front of the year.
#[derive(Debug, Clone, Copy, Default)]
pub struct UncertainYearParser;

impl DateParser for UncertainYearParser {
    fn name(&self) -> &'static str {
        "uncertain"
    }

    fn try_parse(&self, text: &str, era: &EraContext) -> Option<Span> {
        let caps = pattern().captures(text)?;
        if caps.name("hedge").is_none() && caps.name("doubt").is_none() {
            return None;
        }
        let whole = caps.get(0)?;
        if !ends_expression(&text[whole.end()..]) {
            return None;
        }

        let (magnitude, explicit) = year_from_caps(&caps, "")?;
        let year = era.resolve(explicit).apply(magnitude)?;
        let builder = Span::point(year, Precision::Uncertain)
            .confidence(Confidence::Contentious)
            .notes(note(self.name(), whole.as_str()));
        build_span(self.name(), text, builder)
    }
}
