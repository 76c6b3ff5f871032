//! HTML chronology tables to [`TableRow`]s
//!
//! Rowspans and colspans are expanded into a logical grid. A covered year
//! cell is reported as absent so that the extractor's rowspan tracking
//! supplies it; any other covered cell repeats the spanning cell's text.

use crate::grammar::clean_cell;
use crate::table::{TableCell, TableRow};
use scraper::{ElementRef, Html, Selector};
use std::sync::OnceLock;
use tracing::debug;

/// Upper bound on a declared colspan
const MAX_COLSPAN: usize = 64;

fn selector(css: &'static str, cell: &'static OnceLock<Selector>) -> &'static Selector {
    cell.get_or_init(|| Selector::parse(css).expect("static selector must parse"))
}

fn table_selector() -> &'static Selector {
    static SEL: OnceLock<Selector> = OnceLock::new();
    selector("table", &SEL)
}

fn row_selector() -> &'static Selector {
    static SEL: OnceLock<Selector> = OnceLock::new();
    selector("tr", &SEL)
}

fn cell_selector() -> &'static Selector {
    static SEL: OnceLock<Selector> = OnceLock::new();
    selector("th, td", &SEL)
}

/// Column positions of the year, date and description
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    /// Year column
    pub year: usize,
    /// Month/day column, if the table has one
    pub date: Option<usize>,
    /// Description column
    pub description: Option<usize>,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            year: 0,
            date: Some(1),
            description: Some(2),
        }
    }
}

impl ColumnLayout {
    /// Find the columns from header labels; `None` without a year column
    pub fn detect<S: AsRef<str>>(headers: &[S]) -> Option<Self> {
        let labels: Vec<String> = headers
            .iter()
            .map(|h| clean_cell(h.as_ref()).to_lowercase())
            .collect();
        let find = |words: &[&str]| {
            labels
                .iter()
                .position(|label| words.iter().any(|w| label.contains(w)))
        };

        Some(Self {
            year: find(&["year"])?,
            date: find(&["date", "month", "day"]),
            description: find(&["event", "description", "what"]),
        })
    }
}

#[derive(Debug, Clone)]
struct GridCell {
    text: String,
    rowspan: Option<u32>,
    covered: bool,
}

#[derive(Debug, Clone)]
struct Carry {
    text: String,
    remaining: u32,
}

/// Fill columns still covered by earlier rowspans, from the current position
fn take_carried(grid: &mut Vec<GridCell>, carry: &mut [Option<Carry>]) {
    while let Some(Some(carried)) = carry.get_mut(grid.len()) {
        grid.push(GridCell {
            text: carried.text.clone(),
            rowspan: None,
            covered: true,
        });
        carried.remaining -= 1;
        if carried.remaining == 0 {
            carry[grid.len() - 1] = None;
        }
    }
}

/// Expand one `<tr>` into grid cells, consuming and refilling rowspan carries
fn expand_row(row: ElementRef<'_>, carry: &mut Vec<Option<Carry>>) -> (Vec<GridCell>, bool) {
    let mut grid = Vec::new();
    let mut all_header = true;
    let mut saw_cell = false;

    let cells = row
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|c| cell_selector().matches(c));
    for cell in cells {
        take_carried(&mut grid, carry);

        saw_cell = true;
        all_header &= cell.value().name() == "th";
        let text = clean_cell(&cell.text().collect::<String>());
        let span_attr = |name: &str| {
            cell.value()
                .attr(name)
                .and_then(|v| v.trim().parse::<u32>().ok())
                .filter(|n| *n > 0)
        };
        let rowspan = span_attr("rowspan");
        let colspan = span_attr("colspan").map_or(1, |n| (n as usize).min(MAX_COLSPAN));

        for _ in 0..colspan {
            let col = grid.len();
            if let Some(n) = rowspan.filter(|n| *n > 1) {
                if carry.len() <= col {
                    carry.resize(col + 1, None);
                }
                carry[col] = Some(Carry {
                    text: text.clone(),
                    remaining: n - 1,
                });
            }
            grid.push(GridCell {
                text: text.clone(),
                rowspan,
                covered: false,
            });
        }
    }
    take_carried(&mut grid, carry);

    (grid, saw_cell && all_header)
}

fn to_table_row(grid: &[GridCell], layout: &ColumnLayout) -> TableRow {
    let year_cell = grid.get(layout.year).filter(|c| !c.covered).map(|c| TableCell {
        text: c.text.clone(),
        rowspan: c.rowspan,
    });
    let date_cell = layout
        .date
        .and_then(|i| grid.get(i))
        .map(|c| TableCell::new(c.text.clone()));
    let description = layout
        .description
        .and_then(|i| grid.get(i))
        .map(|c| c.text.clone())
        .unwrap_or_default();

    TableRow::new(year_cell, date_cell, description)
}

/// Read the first `<table>` of an HTML fragment
///
/// With `layout = None` the columns are detected from the first header row
/// (all `<th>`), falling back to [`ColumnLayout::default`]. Header rows are
/// not returned.
pub fn read_table(html: &str, layout: Option<ColumnLayout>) -> Vec<TableRow> {
    let document = Html::parse_fragment(html);
    let Some(table) = document.select(table_selector()).next() else {
        debug!("No <table> element found");
        return Vec::new();
    };

    let mut layout = layout;
    let mut carry: Vec<Option<Carry>> = Vec::new();
    let mut rows = Vec::new();

    for tr in table.select(row_selector()) {
        // rows of nested tables belong to those tables
        let owner = tr
            .ancestors()
            .filter_map(ElementRef::wrap)
            .find(|e| e.value().name() == "table");
        if owner.map(|t| t.id()) != Some(table.id()) {
            continue;
        }

        let (grid, is_header) = expand_row(tr, &mut carry);
        if grid.is_empty() {
            continue;
        }
        if is_header {
            if layout.is_none() {
                let labels: Vec<&str> = grid.iter().map(|c| c.text.as_str()).collect();
                layout = ColumnLayout::detect(&labels);
            }
            continue;
        }

        rows.push(to_table_row(&grid, &layout.unwrap_or_default()));
    }

    debug!(rows = rows.len(), "Read HTML table");
    rows
}
