//! Table extraction with rowspan year inheritance
//!
//! Chronology tables put the year in one column and the month/day in
//! another, and often let one year cell span several rows. The
//! [`TableExtractor`] walks rows in document order with a fresh
//! [`RowspanContext`] per table; rows without their own year cell take the
//! inherited year with `confidence = inferred`.

use crate::error::RowWarning;
use crate::grammar::{self, clean_cell};
use crate::strategies::table_row::row_note;
use crate::strategies::{MonthDay, TableRowParser, YearCell};
use crate::types::{ResolutionStatus, ResolutionSummary, RowOutcome, TableExtraction};
use chronicle_domain::{Confidence, Era, EraContext, RowspanContext, Span};
use regex::Regex;
use std::sync::OnceLock;
use tracing::{info, warn};

fn description_year() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!(
            r"(?i)\((?:c\.\s*)?(?P<y>\d{{1,4}})(?:\s*(?P<e>{}))?\)",
            grammar::ERA
        ))
        .expect("description year pattern must compile")
    })
}

/// One cell of a table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableCell {
    /// Cell text
    pub text: String,
    /// Declared `rowspan`, if any
    pub rowspan: Option<u32>,
}

impl TableCell {
    /// Cell without a rowspan
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            rowspan: None,
        }
    }

    /// Set the declared rowspan
    pub fn with_rowspan(mut self, rowspan: u32) -> Self {
        self.rowspan = Some(rowspan);
        self
    }
}

/// One logical row of a chronology table
///
/// `year_cell` is `None` for rows covered by an earlier cell's rowspan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableRow {
    /// Year column
    pub year_cell: Option<TableCell>,
    /// Month/day column
    pub date_cell: Option<TableCell>,
    /// Event description
    pub description: String,
}

impl TableRow {
    /// Create a row
    pub fn new(year_cell: Option<TableCell>, date_cell: Option<TableCell>, description: impl Into<String>) -> Self {
        Self {
            year_cell,
            date_cell,
            description: description.into(),
        }
    }
}

struct RowResult {
    span: Option<Span>,
    status: ResolutionStatus,
    warnings: Vec<RowWarning>,
}

impl RowResult {
    fn skipped(reason: String) -> Self {
        Self {
            span: None,
            status: ResolutionStatus::Skipped,
            warnings: vec![RowWarning::Skipped { reason }],
        }
    }
}

/// Resolve one row's year and date cells against the rowspan state
fn resolve_row(
    parser: &TableRowParser,
    index: Option<usize>,
    year_cell: Option<&str>,
    date_cell: Option<&str>,
    rowspan: Option<u32>,
    context: &mut RowspanContext,
    era: &EraContext,
) -> RowResult {
    let mut warnings = Vec::new();
    let year_text = year_cell.map(clean_cell).filter(|t| !t.is_empty());

    let (year, confidence, status, note) = match year_text {
        Some(text) => {
            let Some(year) = parser.parse_year_cell(&text, era) else {
                context.clear();
                info!(row = ?index, year_cell = %text, "Skipping row with unreadable year cell");
                return RowResult::skipped(format!("unreadable year cell '{}'", text));
            };
            match rowspan {
                Some(n) if n > 1 => context.open(year.start, Some(year.end), year.circa, n, index),
                _ => context.clear(),
            }
            (year, Confidence::Explicit, ResolutionStatus::Resolved, row_note(&text, date_cell))
        }
        None => {
            let Some(inherited) = context.inherit() else {
                info!(row = ?index, "Skipping row without a year cell or active rowspan");
                return RowResult::skipped("no year cell and no active rowspan".to_string());
            };

            let warning = RowWarning::RowspanInheritance {
                year: inherited.year,
                origin_row: inherited.origin_row,
                remaining: inherited.remaining_rows,
            };
            info!(row = ?index, "{}", warning);
            warnings.push(warning);

            let year = YearCell {
                start: inherited.year,
                end: inherited.end_year.unwrap_or(inherited.year),
                circa: inherited.circa,
                uncertain: false,
            };
            let origin = inherited
                .origin_row
                .map_or_else(|| "above".to_string(), |r| r.to_string());
            let date = date_cell.map(clean_cell).unwrap_or_default();
            let note = if date.is_empty() {
                format!("table_row: year inherited from row {}", origin)
            } else {
                format!("table_row: '{}', year inherited from row {}", date, origin)
            };
            (year, Confidence::Inferred, ResolutionStatus::Inherited, note)
        }
    };

    let date = match date_cell {
        Some(cell) => parser.parse_month_day(cell).unwrap_or_else(|| {
            let cleaned = clean_cell(cell);
            warn!(row = ?index, date_cell = %cleaned, "Unreadable date cell; dating by year only");
            warnings.push(RowWarning::UnreadableDateCell(cleaned));
            MonthDay::default()
        }),
        None => MonthDay::default(),
    };

    match parser.compose(&year, &date, confidence, note) {
        Some(span) => RowResult {
            span: Some(span),
            status,
            warnings,
        },
        None => {
            warnings.push(RowWarning::Skipped {
                reason: "row produced an inconsistent span".to_string(),
            });
            RowResult {
                span: None,
                status: ResolutionStatus::Skipped,
                warnings,
            }
        }
    }
}

/// Parse one table row, updating the table's rowspan state
///
/// A non-empty `year_cell` is parsed era-aware; with `rowspan = N > 1` it
/// opens a context the next `N - 1` year-less rows inherit from, otherwise
/// it clears any earlier context. An empty `year_cell` consumes one
/// inherited row, or yields `None` when no context is active.
///
/// # Examples
///
/// ```
/// use chronicle_domain::{Confidence, EraContext, Precision, RowspanContext};
/// use chronicle_extractor::parse_table_row;
///
/// let era = EraContext::default();
/// let mut ctx = RowspanContext::new();
///
/// let first = parse_table_row("44 BC", Some("15 March"), Some(2), &mut ctx, &era).unwrap();
/// assert_eq!(first.precision(), Precision::ExactDate);
///
/// let second = parse_table_row("", Some("January"), None, &mut ctx, &era).unwrap();
/// assert_eq!(second.start_year(), -44);
/// assert_eq!(second.confidence(), Confidence::Inferred);
/// assert_eq!(ctx.remaining_rows(), 0);
/// ```
pub fn parse_table_row(
    year_cell: &str,
    date_cell: Option<&str>,
    rowspan: Option<u32>,
    context: &mut RowspanContext,
    era: &EraContext,
) -> Option<Span> {
    resolve_row(&TableRowParser, None, Some(year_cell), date_cell, rowspan, context, era).span
}

/// Walks the rows of one table and dates each of them
#[derive(Debug, Clone, Copy)]
pub struct TableExtractor {
    parser: TableRowParser,
    check_descriptions: bool,
}

impl Default for TableExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TableExtractor {
    /// Create an extractor that cross-checks description years
    pub fn new() -> Self {
        Self {
            parser: TableRowParser,
            check_descriptions: true,
        }
    }

    /// Enable or disable the description cross-check
    pub fn with_description_check(mut self, enabled: bool) -> Self {
        self.check_descriptions = enabled;
        self
    }

    /// Extract spans from the rows of one table, in document order
    pub fn extract(&self, rows: &[TableRow], era: &EraContext) -> TableExtraction {
        let mut context = RowspanContext::new();
        let mut summary = ResolutionSummary::new();
        let mut outcomes = Vec::with_capacity(rows.len());

        for (index, row) in rows.iter().enumerate() {
            let mut result = resolve_row(
                &self.parser,
                Some(index),
                row.year_cell.as_ref().map(|c| c.text.as_str()),
                row.date_cell.as_ref().map(|c| c.text.as_str()),
                row.year_cell.as_ref().and_then(|c| c.rowspan),
                &mut context,
                era,
            );

            if self.check_descriptions {
                if let Some(warning) = result
                    .span
                    .as_ref()
                    .and_then(|span| description_mismatch(span, &row.description))
                {
                    warn!(row = index, description = %row.description, "{}", warning);
                    result.warnings.push(warning);
                }
            }

            summary.record(result.status);
            outcomes.push(RowOutcome {
                index,
                span: result.span,
                status: result.status,
                warnings: result.warnings,
            });
        }

        info!(
            rows = rows.len(),
            resolved = summary.resolved,
            inherited = summary.inherited,
            skipped = summary.skipped,
            "Table extracted"
        );
        TableExtraction { outcomes, summary }
    }
}

/// Compare a parenthesised year in the description with the column span
///
/// The columns always win; a disagreement is only reported. Without an era
/// marker the description year takes the era of the column year.
fn description_mismatch(span: &Span, description: &str) -> Option<RowWarning> {
    let caps = description_year().captures(description)?;
    let magnitude: u32 = caps.name("y")?.as_str().parse().ok()?;
    let era = caps
        .name("e")
        .and_then(|m| Era::parse(m.as_str()))
        .or_else(|| Era::of(span.start_year()))?;
    let year = era.apply(magnitude)?;

    (!span.contains_year(year)).then_some(RowWarning::DescriptionMismatch {
        column_year: span.start_year(),
        description_year: year,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chronicle_domain::Precision;

    fn row(year: Option<TableCell>, date: &str, description: &str) -> TableRow {
        TableRow::new(year, Some(TableCell::new(date)), description)
    }

    #[test]
    fn test_rowspan_inheritance() {
        let rows = vec![
            row(Some(TableCell::new("44 BC").with_rowspan(3)), "15 March", "Caesar assassinated"),
            row(None, "January", "Octavian arrives"),
            row(None, "", "Second Triumvirate"),
        ];
        let extraction = TableExtractor::new().extract(&rows, &EraContext::default());

        let first = extraction.outcomes[0].span.as_ref().unwrap();
        assert_eq!(first.start_year(), -44);
        assert_eq!(first.precision(), Precision::ExactDate);
        assert_eq!(first.confidence(), Confidence::Explicit);

        let second = extraction.outcomes[1].span.as_ref().unwrap();
        assert_eq!((second.start_year(), second.start_month()), (-44, Some(1)));
        assert_eq!(second.precision(), Precision::MonthOnly);
        assert_eq!(second.confidence(), Confidence::Inferred);
        assert_eq!(extraction.outcomes[1].status, ResolutionStatus::Inherited);
        assert_eq!(
            extraction.outcomes[1].warnings,
            vec![RowWarning::RowspanInheritance {
                year: -44,
                origin_row: Some(0),
                remaining: 1
            }]
        );

        let third = extraction.outcomes[2].span.as_ref().unwrap();
        assert_eq!(third.precision(), Precision::YearOnly);
        assert_eq!(extraction.summary.inherited, 2);
    }

    #[test]
    fn test_row_beyond_rowspan_is_skipped() {
        let rows = vec![
            row(Some(TableCell::new("1914").with_rowspan(2)), "28 July", "War declared"),
            row(None, "4 August", "Britain enters"),
            row(None, "", "Stray row"),
        ];
        let extraction = TableExtractor::new().extract(&rows, &EraContext::default());
        assert_eq!(extraction.outcomes[2].status, ResolutionStatus::Skipped);
        assert!(extraction.outcomes[2].span.is_none());
        assert_eq!(extraction.summary.skipped, 1);
    }

    #[test]
    fn test_new_year_cell_replaces_context() {
        let rows = vec![
            row(Some(TableCell::new("1914").with_rowspan(3)), "", "a"),
            row(Some(TableCell::new("1915")), "", "b"),
            row(None, "", "c"),
        ];
        let extraction = TableExtractor::new().extract(&rows, &EraContext::default());
        assert_eq!(extraction.outcomes[1].span.as_ref().unwrap().start_year(), 1915);
        assert_eq!(extraction.outcomes[2].status, ResolutionStatus::Skipped);
    }

    #[test]
    fn test_description_mismatch_only_warns() {
        let rows = vec![row(Some(TableCell::new("192 BC")), "", "Battle of Issus (194)")];
        let extraction = TableExtractor::new().extract(&rows, &EraContext::default());

        let outcome = &extraction.outcomes[0];
        assert_eq!(outcome.span.as_ref().unwrap().start_year(), -192);
        assert_eq!(
            outcome.warnings,
            vec![RowWarning::DescriptionMismatch {
                column_year: -192,
                description_year: -194
            }]
        );
    }

    #[test]
    fn test_description_ranges_ignored() {
        let rows = vec![row(Some(TableCell::new("1618")), "23 May", "Thirty Years' War (1618–1648) begins")];
        let extraction = TableExtractor::new().extract(&rows, &EraContext::default());
        assert!(extraction.outcomes[0].warnings.is_empty());
    }

    #[test]
    fn test_unreadable_date_cell_falls_back_to_year() {
        let rows = vec![row(Some(TableCell::new("1066")), "Autumn", "Hastings")];
        let extraction = TableExtractor::new().extract(&rows, &EraContext::default());

        let outcome = &extraction.outcomes[0];
        assert_eq!(outcome.span.as_ref().unwrap().precision(), Precision::YearOnly);
        assert_eq!(
            outcome.warnings,
            vec![RowWarning::UnreadableDateCell("Autumn".to_string())]
        );
    }

    #[test]
    fn test_parse_table_row_without_year_or_context() {
        let mut ctx = RowspanContext::new();
        assert!(parse_table_row("", Some("15 March"), None, &mut ctx, &EraContext::default()).is_none());
    }

    #[test]
    fn test_inherited_note() {
        let mut ctx = RowspanContext::new();
        let era = EraContext::default();
        parse_table_row("44 BC", None, Some(2), &mut ctx, &era).unwrap();
        let span = parse_table_row("", Some("January"), None, &mut ctx, &era).unwrap();
        assert_eq!(span.notes(), "table_row: 'January', year inherited from row above");
    }
}
