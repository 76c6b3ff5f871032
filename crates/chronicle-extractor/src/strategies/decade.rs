//! Decades: "1990s", "(1820s)", "the early 1960s", "40s BC"

use super::DateParser;
use crate::grammar::{self, build_span, ends_expression, era_from_caps, note};
use chronicle_domain::calendar::decade_part_bounds;
use chronicle_domain::{DecadePart, EraContext, Precision, Span};
use regex::Regex;
use std::sync::OnceLock;

fn pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        grammar::compile(&format!(
            r"(?P<open>\()?\s*(?:the\s+)?(?:(?P<part>early|mid|middle|late)[\s-]+)?(?P<decade>\d{{0,3}}0)['’]?s(?:\s*(?P<era>{era}))?\s*(?P<close>\))?",
            era = grammar::ERA,
        ))
    })
}

/// Decade with optional early/mid/late qualifier
#[derive(Debug, Clone, Copy, Default)]
pub struct DecadeParser;

impl DateParser for DecadeParser {
    fn name(&self) -> &'static str {
        "decade"
    }

    fn try_parse(&self, text: &str, era: &EraContext) -> Option<Span> {
        let caps = pattern().captures(text)?;
        if caps.name("open").is_some() != caps.name("close").is_some() {
            return None;
        }

        let whole = caps.get(0)?;
        let rest = &text[whole.end()..];
        if !ends_expression(rest) {
            return None;
        }

        let decade: u32 = caps.name("decade")?.as_str().parse().ok()?;
        let part = caps.name("part").and_then(|m| DecadePart::parse(m.as_str()));
        let resolved = era.resolve(era_from_caps(&caps, "era"));
        let (start, end) = decade_part_bounds(decade, resolved, part)?;

        let builder = Span::builder(start, end, Precision::Decade).notes(note(self.name(), whole.as_str()));
        build_span(self.name(), text, builder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Option<(i32, i32)> {
        DecadeParser
            .try_parse(text, &EraContext::default())
            .map(|s| (s.start_year(), s.end_year()))
    }

    #[test]
    fn test_plain_decade() {
        assert_eq!(parse("1990s"), Some((1990, 1999)));
        assert_eq!(parse("the 1820s"), Some((1820, 1829)));
        assert_eq!(parse("1960's"), Some((1960, 1969)));
    }

    #[test]
    fn test_parenthesized_decade() {
        assert_eq!(parse("(1990s)"), Some((1990, 1999)));
        assert_eq!(parse("(1990s"), None);
    }

    #[test]
    fn test_decade_parts() {
        assert_eq!(parse("early 1990s"), Some((1990, 1993)));
        assert_eq!(parse("mid-1990s"), Some((1994, 1996)));
        assert_eq!(parse("the late 1960s"), Some((1967, 1969)));
    }

    #[test]
    fn test_bc_decade_counts_down() {
        assert_eq!(parse("40s BC"), Some((-49, -40)));
    }

    #[test]
    fn test_precision() {
        let span = DecadeParser.try_parse("1990s", &EraContext::default()).unwrap();
        assert_eq!(span.precision(), Precision::Decade);
        assert_eq!(span.year_count(), 10);
    }

    #[test]
    fn test_rejects_non_decades() {
        assert_eq!(parse("1995s"), None);
        assert_eq!(parse("1990"), None);
    }
}
