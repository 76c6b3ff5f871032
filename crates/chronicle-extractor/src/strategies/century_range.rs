//! Century ranges: "5th–3rd centuries BCE", "3rd century BC – 2nd century AD"

use super::DateParser;
use crate::grammar::{self, build_span, ends_expression, era_from_caps, note, parse_ordinal, resolve_pair};
use chronicle_domain::{Century, EraContext, Precision, Span};
use regex::Regex;
use std::sync::OnceLock;

fn pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        grammar::compile(&format!(
            r"(?:the\s+)?(?P<o1>{ord})(?:[\s-]+century)?(?:\s*(?P<e1>{era}))?(?:{dash}|\s+and\s+)(?:the\s+)?(?P<o2>{ord})[\s-]+centur(?:y|ies)(?:\s*(?P<e2>{era}))?",
            ord = grammar::ORDINAL,
            era = grammar::ERA,
            dash = grammar::DASH,
        ))
    })
}

/// Union of two centuries
///
/// Each bound is resolved with the single-century rule; the result runs from
/// the earliest start to the latest end, so BC ranges that count down
/// ("5th–3rd") take their start from the larger ordinal.
#[derive(Debug, Clone, Copy, Default)]
pub struct CenturyRangeParser;

impl DateParser for CenturyRangeParser {
    fn name(&self) -> &'static str {
        "century_range"
    }

    fn try_parse(&self, text: &str, era: &EraContext) -> Option<Span> {
        let caps = pattern().captures(text)?;
        let whole = caps.get(0)?;
        if !ends_expression(&text[whole.end()..]) {
            return None;
        }

        let (era1, era2) = resolve_pair(
            era_from_caps(&caps, "e1"),
            era_from_caps(&caps, "e2"),
            era.default_era,
        );
        let first = Century::new(parse_ordinal(caps.name("o1")?.as_str())?, era1)?.bounds();
        let second = Century::new(parse_ordinal(caps.name("o2")?.as_str())?, era2)?.bounds();

        let builder = Span::builder(first.0.min(second.0), first.1.max(second.1), Precision::CenturyRange)
            .notes(note(self.name(), whole.as_str()));
        build_span(self.name(), text, builder)
    }
}
