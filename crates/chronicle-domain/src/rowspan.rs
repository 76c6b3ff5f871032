//! Rowspan module - year inheritance across HTML table rows
//!
//! When a table's year cell declares `rowspan = N`, the next `N - 1` rows
//! have no year cell of their own and inherit it. [`RowspanContext`] tracks
//! that inheritance for a single table pass; it is owned by one extractor
//! and passed by `&mut`, never shared.

use crate::era::Era;

/// Year inherited from a rowspan cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InheritedYear {
    /// Signed start year of the spanning cell
    pub year: i32,

    /// Signed end year when the spanning cell held a range
    pub end_year: Option<i32>,

    /// Whether the spanning cell was marked circa
    pub circa: bool,

    /// Index of the row that declared the rowspan
    pub origin_row: Option<usize>,

    /// Rows still allowed to inherit after this one
    pub remaining_rows: u32,
}

/// Per-table rowspan inheritance state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowspanContext {
    inherited_year: Option<u32>,
    inherited_is_bc: bool,
    inherited_end_year: Option<i32>,
    inherited_circa: bool,
    origin_row: Option<usize>,
    remaining_rows: u32,
}

impl RowspanContext {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new inheritance window, replacing any prior one
    ///
    /// `rowspan` is the value declared on the year cell; the cell's own row
    /// is not counted, so `rowspan - 1` following rows may inherit. A
    /// rowspan of 0 or 1, or year zero, leaves the context empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use chronicle_domain::RowspanContext;
    ///
    /// let mut ctx = RowspanContext::new();
    /// ctx.open(-44, None, false, 3, Some(0));
    /// assert_eq!(ctx.remaining_rows(), 2);
    /// assert_eq!(ctx.inherit().map(|y| y.year), Some(-44));
    /// assert_eq!(ctx.inherit().map(|y| y.year), Some(-44));
    /// assert!(ctx.inherit().is_none());
    /// ```
    pub fn open(
        &mut self,
        year: i32,
        end_year: Option<i32>,
        circa: bool,
        rowspan: u32,
        origin_row: Option<usize>,
    ) {
        self.clear();
        if year == 0 || rowspan <= 1 {
            return;
        }
        self.inherited_year = Some(year.unsigned_abs());
        self.inherited_is_bc = year < 0;
        self.inherited_end_year = end_year.filter(|y| *y != year);
        self.inherited_circa = circa;
        self.origin_row = origin_row;
        self.remaining_rows = rowspan - 1;
    }

    /// Consume one inherited row, if any remain
    pub fn inherit(&mut self) -> Option<InheritedYear> {
        if self.remaining_rows == 0 {
            self.clear();
            return None;
        }
        let year = self.inherited_year()?;
        self.remaining_rows -= 1;

        let inherited = InheritedYear {
            year,
            end_year: self.inherited_end_year,
            circa: self.inherited_circa,
            origin_row: self.origin_row,
            remaining_rows: self.remaining_rows,
        };
        if self.remaining_rows == 0 {
            self.clear();
        }
        Some(inherited)
    }

    /// Discard any inheritance window
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Signed inherited year, if a window is open
    pub fn inherited_year(&self) -> Option<i32> {
        let era = if self.inherited_is_bc { Era::Bc } else { Era::Ad };
        era.apply(self.inherited_year?)
    }

    /// Whether the inherited year is BC
    pub fn inherited_is_bc(&self) -> bool {
        self.inherited_is_bc
    }

    /// Rows that may still inherit
    pub fn remaining_rows(&self) -> u32 {
        self.remaining_rows
    }

    /// Whether a following row would inherit a year
    pub fn is_active(&self) -> bool {
        self.inherited_year.is_some() && self.remaining_rows > 0
    }
}
