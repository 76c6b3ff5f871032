//! Circa and tilde years: "~1500", "c. 1200 BC", "circa 1200–1150 BC"

use super::year::match_year;
use super::year_range::match_range;
use super::DateParser;
use crate::grammar::{self, build_span, ends_expression, note};
use chronicle_domain::{Confidence, EraContext, Precision, Span};
use regex::Regex;
use std::sync::OnceLock;

fn marker_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        grammar::compile(r"(?P<mark>~|circa\b|ca?\.|approx(?:imately|\.)|around\b|about\b)\s*")
    })
}

/// Approximate year or year range
///
/// A tilde must be followed by a three- or four-digit year. After the
/// prose markers "about", "around" and "approximately" the date must end
/// the phrase, so counts ("around 1500 people") are not read as years.
/// Era resolution falls back to the context.
#[derive(Debug, Clone, Copy, Default)]
pub struct CircaParser;

impl DateParser for CircaParser {
    fn name(&self) -> &'static str {
        "circa"
    }

    fn try_parse(&self, text: &str, era: &EraContext) -> Option<Span> {
        let caps = marker_pattern().captures(text)?;
        let body = &text[caps.get(0)?.end()..];

        let mark = caps.name("mark")?.as_str();
        if mark == "~" {
            let digits = body.chars().take_while(|c| c.is_ascii_digit()).count();
            if !(3..=4).contains(&digits) {
                return None;
            }
        }

        let ((start, end), rest) = match match_range(body, era) {
            Some(found) => found,
            None => {
                let (year, rest) = match_year(body, era)?;
                ((year, year), rest)
            }
        };
        if !ends_expression(rest) {
            return None;
        }
        if is_prose_marker(mark) && rest.trim_start().starts_with(char::is_alphabetic) {
            return None;
        }

        let matched = &text[..text.len() - rest.len()];
        let builder = Span::builder(start, end, Precision::Approximate)
            .circa(true)
            .confidence(Confidence::Approximate)
            .notes(note(self.name(), matched));
        build_span(self.name(), text, builder)
    }
}

fn is_prose_marker(mark: &str) -> bool {
    let lower = mark.to_lowercase();
    lower == "about" || lower == "around" || lower.starts_with("approx")
}
