//! Qualified centuries: "Late 16th century", "Before 17th century",
//! "Late 16th century – 17th century"

use super::DateParser;
use crate::config::BeforeCenturyRule;
use crate::grammar::{self, build_span, ends_expression, era_from_caps, note, parse_ordinal, resolve_pair};
use chronicle_domain::{Century, CenturyThird, Era, EraContext, Precision, Span};
use regex::{Captures, Regex};
use std::sync::OnceLock;

const MODIFIER: &str = r"early|middle|mid|late|before";

fn single_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        grammar::compile(&format!(
            r"(?:the\s+)?(?P<m>{modifier})[\s-]+(?:the\s+)?(?P<o>{ord})[\s-]+century(?:\s*(?P<e>{era}))?",
            modifier = MODIFIER,
            ord = grammar::ORDINAL,
            era = grammar::ERA,
        ))
    })
}

fn hybrid_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        grammar::compile(&format!(
            r"(?:the\s+)?(?:(?P<m1>{modifier})[\s-]+(?:the\s+)?)?(?P<o1>{ord})(?:[\s-]+century)?(?:\s*(?P<e1>{era}))?{dash}(?:the\s+)?(?:(?P<m2>{modifier})[\s-]+(?:the\s+)?)?(?P<o2>{ord})[\s-]+centur(?:y|ies)(?:\s*(?P<e2>{era}))?",
            modifier = MODIFIER,
            ord = grammar::ORDINAL,
            era = grammar::ERA,
            dash = grammar::DASH,
        ))
    })
}

/// Century narrowed to a third, or shifted before it
///
/// Early, mid and late select years 1-33, 34-66 and 67-100 of the
/// century. "Before Nth century" follows [`BeforeCenturyRule`]: by default
/// the late third of the chronologically preceding century, so "Before 1st
/// century AD" is the late 1st century BC.
#[derive(Debug, Clone, Copy, Default)]
pub struct CenturyModifierParser {
    before_rule: BeforeCenturyRule,
}

impl CenturyModifierParser {
    /// Create the parser with a mapping for "Before Nth century"
    pub fn new(before_rule: BeforeCenturyRule) -> Self {
        Self { before_rule }
    }

    /// Bounds of a century under an optional modifier
    fn bounds(&self, modifier: Option<&str>, century: Century) -> Option<(i32, i32)> {
        let Some(modifier) = modifier else {
            return Some(century.bounds());
        };

        if modifier.eq_ignore_ascii_case("before") {
            let preceding = century.preceding()?;
            return Some(match self.before_rule {
                BeforeCenturyRule::LateThird => preceding.third(CenturyThird::Late),
                BeforeCenturyRule::FullCentury => preceding.bounds(),
            });
        }

        CenturyThird::parse(modifier).map(|third| century.third(third))
    }

    fn century(caps: &Captures<'_>, ordinal: &str, era: Era) -> Option<Century> {
        Century::new(parse_ordinal(caps.name(ordinal)?.as_str())?, era)
    }

    fn try_hybrid(&self, text: &str, era: &EraContext) -> Option<(i32, i32, usize)> {
        let caps = hybrid_pattern().captures(text)?;
        let m1 = caps.name("m1").map(|m| m.as_str());
        let m2 = caps.name("m2").map(|m| m.as_str());
        if m1.is_none() && m2.is_none() {
            return None;
        }

        let (era1, era2) = resolve_pair(
            era_from_caps(&caps, "e1"),
            era_from_caps(&caps, "e2"),
            era.default_era,
        );
        let first = self.bounds(m1, Self::century(&caps, "o1", era1)?)?;
        let second = self.bounds(m2, Self::century(&caps, "o2", era2)?)?;
        let end = caps.get(0)?.end();
        Some((first.0.min(second.0), first.1.max(second.1), end))
    }

    fn try_single(&self, text: &str, era: &EraContext) -> Option<(i32, i32, usize)> {
        let caps = single_pattern().captures(text)?;
        let century = Self::century(&caps, "o", era.resolve(era_from_caps(&caps, "e")))?;
        let (start, end) = self.bounds(caps.name("m").map(|m| m.as_str()), century)?;
        Some((start, end, caps.get(0)?.end()))
    }
}

impl DateParser for CenturyModifierParser {
    fn name(&self) -> &'static str {
        "century_modifier"
    }

    fn try_parse(&self, text: &str, era: &EraContext) -> Option<Span> {
        let (start, end, matched_len) = self
            .try_hybrid(text, era)
            .or_else(|| self.try_single(text, era))?;
        if !ends_expression(&text[matched_len..]) {
            return None;
        }

        let builder = Span::builder(start, end, Precision::CenturyModifier)
            .notes(note(self.name(), &text[..matched_len]));
        build_span(self.name(), text, builder)
    }
}
