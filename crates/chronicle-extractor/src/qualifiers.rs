//! Reliability qualifiers in the surrounding text
//!
//! A resolved span is only as good as its source. Wording such as
//! "according to legend" or "the date is disputed" lowers an explicit
//! confidence to `legendary` or `contentious`.

use chronicle_domain::{Confidence, Span};
use regex::Regex;
use std::sync::OnceLock;

fn legendary() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\b(?:according to (?:legend|tradition)|traditionally|traditional date|legendary|semi-legendary|mythical|legend(?:s)? (?:says|holds|has it))\b")
            .expect("legendary qualifier pattern must compile")
    })
}

fn contentious() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\b(?:disputed|contested|debated|controversial|uncertain date)\b")
            .expect("contentious qualifier pattern must compile")
    })
}

/// Detect a qualifier in `text`, returning the confidence and the matched words
///
/// Legendary wording wins when both kinds appear.
pub fn detect(text: &str) -> Option<(Confidence, &str)> {
    if let Some(m) = legendary().find(text) {
        return Some((Confidence::Legendary, m.as_str()));
    }
    contentious()
        .find(text)
        .map(|m| (Confidence::Contentious, m.as_str()))
}

/// Lower an explicit span's confidence when `text` qualifies it
///
/// Spans that are already inferred, approximate or otherwise qualified are
/// returned unchanged.
pub fn apply(span: Span, text: &str) -> Span {
    if span.confidence() != Confidence::Explicit {
        return span;
    }
    match detect(text) {
        Some((confidence, words)) => {
            span.with_confidence(confidence, &format!("qualifier: '{}'", words))
        }
        None => span,
    }
}
