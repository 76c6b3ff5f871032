//! Single centuries: "5th century BCE", "the twentieth century"

use super::DateParser;
use crate::grammar::{self, build_span, ends_expression, era_from_caps, note, parse_ordinal};
use chronicle_domain::{Century, EraContext, Precision, Span};
use regex::Regex;
use std::sync::OnceLock;

fn pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        grammar::compile(&format!(
            r"(?:the\s+)?(?P<ord>{ord})[\s-]+century(?:\s*(?P<era>{era}))?",
            ord = grammar::ORDINAL,
            era = grammar::ERA,
        ))
    })
}

/// One whole century
///
/// Century `N` BC spans `-(N*100) ..= -((N-1)*100 + 1)`; AD or unmarked
/// spans `(N-1)*100 + 1 ..= N*100`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CenturyParser;

impl DateParser for CenturyParser {
    fn name(&self) -> &'static str {
        "century"
    }

    fn try_parse(&self, text: &str, era: &EraContext) -> Option<Span> {
        let caps = pattern().captures(text)?;
        let whole = caps.get(0)?;
        if !ends_expression(&text[whole.end()..]) {
            return None;
        }

        let ordinal = parse_ordinal(caps.name("ord")?.as_str())?;
        let century = Century::new(ordinal, era.resolve(era_from_caps(&caps, "era")))?;
        let (start, end) = century.bounds();

        let builder = Span::builder(start, end, Precision::Century).notes(note(self.name(), whole.as_str()));
        build_span(self.name(), text, builder)
    }
}
