//! Shared grammar fragments and numeric helpers for the date strategies
//!
//! Every strategy matches at the start of its input (after leading
//! whitespace) and then checks that the match is not the prefix of some
//! longer expression, such as the `2500` of `2500–1500 BCE` or the `250`
//! of `250,000 years ago`.

use crate::error::ParseError;
use chronicle_domain::{calendar::month_from_name, Era, Span, SpanBuilder};
use regex::{Captures, Regex};
use tracing::warn;

/// Era markers; word forms need a boundary, dotted forms end in a period
pub(crate) const ERA: &str =
    r"(?:BCE|BC|AD|CE)\b|B\.\s?C\.(?:\s?E\.)?|A\.\s?D\.|C\.\s?E\.";

/// Era markers written before the year ("AD 79")
pub(crate) const ERA_PREFIX: &str = r"(?:AD|CE)\b|A\.\s?D\.";

/// Year digits, optionally grouped with commas ("10,000")
pub(crate) const YEAR: &str = r"\d{1,3}(?:,\d{3})+|\d{1,4}";

/// Range separators
pub(crate) const DASH: &str = r"(?:\s*[-–—‐]\s*|\s+to\s+)";

/// Month names and common abbreviations, longest first
pub(crate) const MONTH: &str = r"(?:january|february|march|april|may|june|july|august|september|october|november|december|jan|feb|mar|apr|jun|jul|aug|sept|sep|oct|nov|dec)\b";

/// Ordinals as digits or English words
pub(crate) const ORDINAL: &str = r"\d{1,2}(?:st|nd|rd|th)|twenty[-\s]first|twenty[-\s]second|first|second|third|fourth|fifth|sixth|seventh|eighth|ninth|tenth|eleventh|twelfth|thirteenth|fourteenth|fifteenth|sixteenth|seventeenth|eighteenth|nineteenth|twentieth";

const ORDINAL_WORDS: [&str; 20] = [
    "first",
    "second",
    "third",
    "fourth",
    "fifth",
    "sixth",
    "seventh",
    "eighth",
    "ninth",
    "tenth",
    "eleventh",
    "twelfth",
    "thirteenth",
    "fourteenth",
    "fifteenth",
    "sixteenth",
    "seventeenth",
    "eighteenth",
    "nineteenth",
    "twentieth",
];

/// Words that continue a number into a different grammar
const CONTINUATIONS: [&str; 9] = [
    "years",
    "year",
    "million",
    "thousand",
    "billion",
    "century",
    "centuries",
    "millennium",
    "millennia",
];

/// Compile a pattern anchored at the start of the input, case-insensitive
pub(crate) fn compile(pattern: &str) -> Regex {
    Regex::new(&format!(r"(?i)^\s*(?:{})", pattern)).expect("date grammar pattern must compile")
}

/// Year term with optional prefix and suffix era, group names suffixed
///
/// Produces groups `pre{s}`, `y{s}` and `e{s}`.
pub(crate) fn year_term(suffix: &str) -> String {
    format!(
        r"(?:(?P<pre{s}>{pre})\s*)?(?P<y{s}>{year})(?:\s*(?P<e{s}>{era}))?",
        s = suffix,
        pre = ERA_PREFIX,
        year = YEAR,
        era = ERA,
    )
}

/// Read the magnitude and explicit era of a [`year_term`]
pub(crate) fn year_from_caps(caps: &Captures<'_>, suffix: &str) -> Option<(u32, Option<Era>)> {
    let digits = caps.name(&format!("y{}", suffix))?.as_str();
    let magnitude = parse_grouped(digits)?;
    let era = era_from_caps(caps, &format!("e{}", suffix))
        .or_else(|| era_from_caps(caps, &format!("pre{}", suffix)));
    Some((magnitude, era))
}

/// Read an era marker from a named group
pub(crate) fn era_from_caps(caps: &Captures<'_>, name: &str) -> Option<Era> {
    caps.name(name).and_then(|m| Era::parse(m.as_str()))
}

/// Parse digits that may carry thousands separators
pub(crate) fn parse_grouped(digits: &str) -> Option<u32> {
    digits.replace(',', "").parse().ok()
}

/// Parse an ordinal ("5th", "fifth", "twenty-first")
pub(crate) fn parse_ordinal(token: &str) -> Option<u32> {
    let lower = token.trim().to_lowercase();
    let digits: String = lower.chars().take_while(|c| c.is_ascii_digit()).collect();
    if !digits.is_empty() {
        return digits.parse().ok();
    }

    if let Some(rest) = lower.strip_prefix("twenty") {
        let rest = rest.trim_start_matches(|c: char| c == '-' || c.is_whitespace());
        match rest {
            "first" => return Some(21),
            "second" => return Some(22),
            _ => {}
        }
    }

    ORDINAL_WORDS
        .iter()
        .position(|word| *word == lower)
        .map(|idx| idx as u32 + 1)
}

/// Resolve the eras of a two-bound expression
///
/// A marker on only one bound applies to both ("2500–1500 BCE"); with no
/// marker at all the ambient default applies.
pub(crate) fn resolve_pair(first: Option<Era>, second: Option<Era>, default: Era) -> (Era, Era) {
    match (first, second) {
        (Some(a), Some(b)) => (a, b),
        (None, Some(e)) | (Some(e), None) => (e, e),
        (None, None) => (default, default),
    }
}

pub(crate) fn is_dash(c: char) -> bool {
    matches!(c, '-' | '–' | '—' | '‐')
}

/// First alphabetic word of `s`, lowercased
fn first_word(s: &str) -> String {
    s.chars()
        .take_while(|c| c.is_alphabetic())
        .collect::<String>()
        .to_lowercase()
}

/// Whether the text after a match ends the date expression
///
/// Rejects continuations into another grammar: more digits, a suffix
/// (`1990s`), a range (`–1500`, ` to 1500`), a magnitude or unit word
/// (`million`, `years`, `century`), a doubt marker (`?`), or a month
/// followed by a number (the `15` of `15 March 44 BC`).
pub(crate) fn ends_expression(rest: &str) -> bool {
    let mut chars = rest.chars();
    match chars.next() {
        None => return true,
        Some(c) if c.is_alphanumeric() || matches!(c, '?' | '\'' | '’') => return false,
        Some(',' | '.') if chars.next().is_some_and(|c| c.is_ascii_digit()) => return false,
        _ => {}
    }

    let trimmed = rest.trim_start();
    if trimmed.starts_with('?') {
        return false;
    }

    let after_dash = trimmed.trim_start_matches(is_dash);
    let continues_range = |s: &str| {
        let s = s.trim_start();
        s.starts_with(|c: char| c.is_ascii_digit() || c == '~')
            || matches!(first_word(s).as_str(), "early" | "mid" | "middle" | "late" | "c" | "ca" | "circa")
    };
    if after_dash.len() != trimmed.len() && continues_range(after_dash) {
        return false;
    }

    let word = first_word(trimmed);
    if word == "to" && continues_range(&trimmed[2..]) {
        return false;
    }
    if CONTINUATIONS.contains(&word.as_str()) {
        return false;
    }
    if month_from_name(&word).is_some() {
        let after_month = trimmed[word.len()..].trim_start_matches(|c: char| c == '.' || c == ',');
        if after_month.trim_start().starts_with(|c: char| c.is_ascii_digit()) {
            return false;
        }
    }
    true
}

/// Strip footnote markers, non-breaking spaces and surrounding whitespace
///
/// `"44 BC[1][a]"` becomes `"44 BC"`.
pub(crate) fn clean_cell(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut depth = 0usize;
    for ch in text.chars() {
        match ch {
            '[' => depth += 1,
            ']' if depth > 0 => depth -= 1,
            _ if depth > 0 => {}
            '\u{a0}' | '\u{2009}' | '\u{202f}' => out.push(' '),
            _ => out.push(ch),
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Drop a leading preposition ("In 1066", "On 15 March 44 BC")
///
/// Only words that never start a date expression themselves are removed.
pub(crate) fn strip_lead_in(text: &str) -> &str {
    let trimmed = text.trim_start();
    let word = first_word(trimmed);
    if !matches!(word.as_str(), "in" | "on" | "by" | "during" | "since" | "until") {
        return trimmed;
    }
    let rest = &trimmed[word.len()..];
    if rest.starts_with(char::is_whitespace) {
        rest.trim_start()
    } else {
        trimmed
    }
}

/// Validate a candidate span, logging and discarding it when inconsistent
pub(crate) fn build_span(strategy: &'static str, text: &str, builder: SpanBuilder) -> Option<Span> {
    match builder.build() {
        Ok(span) => Some(span),
        Err(e) => {
            warn!(
                strategy,
                text,
                error = %ParseError::InconsistentSpan(e),
                "Discarding inconsistent span"
            );
            None
        }
    }
}

/// Provenance note for a span: strategy name and the matched text
pub(crate) fn note(strategy: &str, matched: &str) -> String {
    format!("{}: '{}'", strategy, matched.trim())
}
