//! Year and month/day columns of a chronology table

use super::year::match_year;
use super::year_range::match_range;
use crate::grammar::{self, build_span, clean_cell, ends_expression};
use chronicle_domain::calendar::{days_in_month, month_from_name};
use chronicle_domain::{Confidence, EraContext, Precision, Span};
use regex::{Captures, Regex};
use std::sync::OnceLock;

fn circa_mark() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| grammar::compile(r"(?:~|circa\b|ca?\.)\s*"))
}

/// Month/day layouts, tried in order; each must consume the whole cell
fn month_day_patterns() -> &'static [Regex] {
    static RE: OnceLock<Vec<Regex>> = OnceLock::new();
    RE.get_or_init(|| {
        let d1 = r"(?P<d1>\d{1,2})(?:st|nd|rd|th)?";
        let d2 = r"(?P<d2>\d{1,2})(?:st|nd|rd|th)?";
        let m1 = format!(r"(?P<m1>{})\.?", grammar::MONTH);
        let m2 = format!(r"(?P<m2>{})\.?", grammar::MONTH);
        let dash = grammar::DASH;

        [
            // "15 March", "28 February – 3 March"
            format!(r"{d1}\s+(?:of\s+)?{m1}(?:{dash}{d2}\s+(?:of\s+)?{m2})?"),
            // "15–17 March"
            format!(r"{d1}{dash}{d2}\s+{m1}"),
            // "March 15", "March 15–17", "March 30 – April 2"
            format!(r"{m1}\s+{d1}(?:{dash}(?:{m2}\s+)?{d2})?"),
            // "March"
            m1.clone(),
            // "3/15", "3-15"
            r"(?P<m1>\d{1,2})\s*[/.-]\s*(?P<d1>\d{1,2})".to_string(),
            // "3"
            r"(?P<m1>\d{1,2})".to_string(),
        ]
        .iter()
        .map(|p| grammar::compile(&format!(r"{}\s*$", p)))
        .collect()
    })
}

/// The parsed year column of a row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearCell {
    /// First signed year
    pub start: i32,
    /// Last signed year; equal to `start` for a single year
    pub end: i32,
    /// Marked approximate ("c. 44 BC")
    pub circa: bool,
    /// Marked doubtful ("44 BC?")
    pub uncertain: bool,
}

impl YearCell {
    /// A single, certain year
    pub fn point(year: i32) -> Self {
        Self {
            start: year,
            end: year,
            circa: false,
            uncertain: false,
        }
    }
}

/// The parsed month/day column of a row; all fields empty for a blank cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MonthDay {
    /// Start month
    pub month: Option<u8>,
    /// Start day
    pub day: Option<u8>,
    /// End month of a day range
    pub end_month: Option<u8>,
    /// End day of a day range
    pub end_day: Option<u8>,
}

impl MonthDay {
    /// True when the cell carried no month or day
    pub fn is_empty(&self) -> bool {
        self.month.is_none() && self.day.is_none()
    }
}

fn month_token(token: &str) -> Option<u8> {
    if token.chars().all(|c| c.is_ascii_digit()) {
        return token.parse().ok().filter(|m| (1..=12).contains(m));
    }
    month_from_name(token)
}

fn valid_day(month: u8, day: u8) -> Option<u8> {
    (day >= 1 && day <= days_in_month(month)?).then_some(day)
}

fn month_day_from_caps(caps: &Captures<'_>) -> Option<MonthDay> {
    let month = month_token(caps.name("m1")?.as_str())?;
    let day = match caps.name("d1") {
        Some(d) => Some(valid_day(month, d.as_str().parse().ok()?)?),
        None => None,
    };

    let (end_month, end_day) = match caps.name("d2") {
        Some(d) => {
            let end_month = match caps.name("m2") {
                Some(m) => month_token(m.as_str())?,
                None => month,
            };
            (Some(end_month), Some(valid_day(end_month, d.as_str().parse().ok()?)?))
        }
        None => (None, None),
    };

    Some(MonthDay {
        month: Some(month),
        day,
        end_month,
        end_day,
    })
}

/// Composes a span from a year column and an optional month/day column
///
/// The year cell is era-aware and may carry a range or circa/doubt marks.
/// The month/day cell may be blank, a month name, a numeric month, a day
/// and month in either order, or a day range.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableRowParser;

impl TableRowParser {
    /// Strategy name recorded in notes
    pub fn name(&self) -> &'static str {
        "table_row"
    }

    /// Parse a year column cell
    pub fn parse_year_cell(&self, cell: &str, era: &EraContext) -> Option<YearCell> {
        let cleaned = clean_cell(cell);
        let mut body = cleaned.as_str();

        let circa = match circa_mark().find(body) {
            Some(mark) => {
                body = &body[mark.end()..];
                true
            }
            None => false,
        };
        let uncertain = body.trim_end().ends_with('?');
        body = body.trim_end().trim_end_matches('?');

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

        Some(YearCell {
            start,
            end,
            circa,
            uncertain,
        })
    }

    /// Parse a month/day column cell; `None` when the cell is unreadable
    pub fn parse_month_day(&self, cell: &str) -> Option<MonthDay> {
        let cleaned = clean_cell(cell);
        if cleaned.is_empty() {
            return Some(MonthDay::default());
        }
        month_day_patterns()
            .iter()
            .find_map(|re| re.captures(&cleaned))
            .and_then(|caps| month_day_from_caps(&caps))
    }

    /// Combine parsed columns into a span
    ///
    /// Precision follows the most specific component present. A base
    /// confidence of `Explicit` is lowered for circa or doubtful years;
    /// any other base confidence (such as `Inferred`) is kept.
    pub fn compose(
        &self,
        year: &YearCell,
        date: &MonthDay,
        confidence: Confidence,
        notes: impl Into<String>,
    ) -> Option<Span> {
        let precision = if year.circa {
            Precision::Approximate
        } else if year.uncertain {
            Precision::Uncertain
        } else if date.day.is_some() {
            Precision::ExactDate
        } else if date.month.is_some() {
            Precision::MonthOnly
        } else {
            Precision::YearOnly
        };

        let confidence = match confidence {
            Confidence::Explicit if year.circa => Confidence::Approximate,
            Confidence::Explicit if year.uncertain => Confidence::Contentious,
            other => other,
        };

        let notes = notes.into();
        let builder = Span::builder(year.start, year.end, precision)
            .start_date(date.month, date.day)
            .end_date(date.end_month, date.end_day)
            .circa(year.circa)
            .confidence(confidence)
            .notes(notes.clone());
        build_span(self.name(), &notes, builder)
    }

    /// Parse a row from its own year and date cells
    pub fn try_parse(&self, year_cell: &str, date_cell: Option<&str>, era: &EraContext) -> Option<Span> {
        let year = self.parse_year_cell(year_cell, era)?;
        let date = match date_cell {
            Some(cell) => self.parse_month_day(cell)?,
            None => MonthDay::default(),
        };
        self.compose(&year, &date, Confidence::Explicit, row_note(year_cell, date_cell))
    }
}

/// Provenance note for a table row
pub(crate) fn row_note(year_cell: &str, date_cell: Option<&str>) -> String {
    let date = date_cell.map(clean_cell).unwrap_or_default();
    if date.is_empty() {
        format!("table_row: '{}'", clean_cell(year_cell))
    } else {
        format!("table_row: '{}' / '{}'", clean_cell(year_cell), date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn month_day(cell: &str) -> Option<MonthDay> {
        TableRowParser.parse_month_day(cell)
    }

    #[test]
    fn test_year_cell_forms() {
        let era = EraContext::default();
        let parser = TableRowParser;
        assert_eq!(parser.parse_year_cell("44 BC", &era), Some(YearCell::point(-44)));
        assert_eq!(parser.parse_year_cell(" 1066[1] ", &era), Some(YearCell::point(1066)));

        let range = parser.parse_year_cell("1914–1918", &era).unwrap();
        assert_eq!((range.start, range.end), (1914, 1918));

        let circa = parser.parse_year_cell("c. 500 BC", &era).unwrap();
        assert!(circa.circa);
        assert_eq!(circa.start, -500);

        let doubtful = parser.parse_year_cell("753 BC?", &era).unwrap();
        assert!(doubtful.uncertain);
        assert_eq!(doubtful.start, -753);

        assert_eq!(parser.parse_year_cell("", &era), None);
        assert_eq!(parser.parse_year_cell("Unknown", &era), None);
    }

    #[test]
    fn test_month_day_forms() {
        assert_eq!(month_day(""), Some(MonthDay::default()));
        assert_eq!(month_day("15 March").map(|m| (m.month, m.day)), Some((Some(3), Some(15))));
        assert_eq!(month_day("March 15").map(|m| (m.month, m.day)), Some((Some(3), Some(15))));
        assert_eq!(month_day("January").map(|m| (m.month, m.day)), Some((Some(1), None)));
        assert_eq!(month_day("Sept.").map(|m| m.month), Some(Some(9)));
        assert_eq!(month_day("3").map(|m| m.month), Some(Some(3)));
        assert_eq!(month_day("3/15").map(|m| (m.month, m.day)), Some((Some(3), Some(15))));
    }

    #[test]
    fn test_day_ranges() {
        let same_month = month_day("15–17 March").unwrap();
        assert_eq!(
            (same_month.month, same_month.day, same_month.end_month, same_month.end_day),
            (Some(3), Some(15), Some(3), Some(17))
        );

        let across = month_day("28 February – 3 March").unwrap();
        assert_eq!(
            (across.month, across.day, across.end_month, across.end_day),
            (Some(2), Some(28), Some(3), Some(3))
        );

        let trailing = month_day("March 30 – April 2").unwrap();
        assert_eq!((trailing.end_month, trailing.end_day), (Some(4), Some(2)));
    }

    #[test]
    fn test_unreadable_month_day() {
        assert_eq!(month_day("31 April"), None);
        assert_eq!(month_day("13"), None);
        assert_eq!(month_day("Spring"), None);
    }

    #[test]
    fn test_precision_follows_components() {
        let era = EraContext::default();
        let parser = TableRowParser;

        let exact = parser.try_parse("44 BC", Some("15 March"), &era).unwrap();
        assert_eq!(exact.precision(), Precision::ExactDate);
        assert_eq!(exact.confidence(), Confidence::Explicit);
        assert_eq!(exact.notes(), "table_row: '44 BC' / '15 March'");

        let month = parser.try_parse("44 BC", Some("January"), &era).unwrap();
        assert_eq!(month.precision(), Precision::MonthOnly);

        let year = parser.try_parse("44 BC", None, &era).unwrap();
        assert_eq!(year.precision(), Precision::YearOnly);

        let circa = parser.try_parse("c. 44 BC", Some("15 March"), &era).unwrap();
        assert_eq!(circa.precision(), Precision::Approximate);
        assert_eq!(circa.confidence(), Confidence::Approximate);
        assert!(circa.circa());
    }

    #[test]
    fn test_inferred_confidence_is_kept() {
        let parser = TableRowParser;
        let span = parser
            .compose(&YearCell::point(-44), &MonthDay::default(), Confidence::Inferred, "inherited")
            .unwrap();
        assert_eq!(span.confidence(), Confidence::Inferred);
    }
}
