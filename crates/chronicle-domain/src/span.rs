//! Span module - the normalized output of date resolution
//!
//! A [`Span`] is an immutable, inclusive interval of signed years with
//! optional month/day detail, a [`Precision`] and a [`Confidence`]. Every
//! `Span` is constructed through [`SpanBuilder::build`], which normalizes
//! reversed bounds and rejects values that break the model invariants, so
//! downstream code never sees year zero or an inverted interval.

use crate::calendar::{days_in_month, month_name};
use crate::confidence::Confidence;
use crate::era::to_astronomical;
use crate::precision::Precision;
use std::fmt;

/// Reasons a candidate span is rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidSpan {
    /// A bound is the nonexistent year zero
    ZeroYear,

    /// A month outside `1..=12`
    MonthOutOfRange(u8),

    /// A day that does not exist in its month
    DayOutOfRange {
        /// Month of the offending day
        month: u8,
        /// The offending day
        day: u8,
    },

    /// A day was given without a month
    DayWithoutMonth,

    /// A circa date cannot claim exact-date precision
    CircaExactDate,

    /// Every span must say which rule produced it
    MissingNotes,
}

impl fmt::Display for InvalidSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidSpan::ZeroYear => write!(f, "year zero does not exist"),
            InvalidSpan::MonthOutOfRange(m) => write!(f, "month {} out of range [1, 12]", m),
            InvalidSpan::DayOutOfRange { month, day } => {
                write!(f, "day {} out of range for month {}", day, month)
            }
            InvalidSpan::DayWithoutMonth => write!(f, "day given without a month"),
            InvalidSpan::CircaExactDate => write!(f, "circa date cannot have exact-date precision"),
            InvalidSpan::MissingNotes => write!(f, "span has no provenance notes"),
        }
    }
}

impl std::error::Error for InvalidSpan {}

/// A resolved time interval
///
/// Field order drives the derived ordering: spans sort chronologically by
/// start (year, month, day), then by end.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Span {
    start_year: i32,
    start_month: Option<u8>,
    start_day: Option<u8>,
    end_year: i32,
    end_month: Option<u8>,
    end_day: Option<u8>,
    precision: Precision,
    circa: bool,
    confidence: Confidence,
    notes: String,
}

impl Span {
    /// Start building a span over `start_year ..= end_year`
    ///
    /// # Examples
    ///
    /// ```
    /// use chronicle_domain::{Confidence, Precision, Span};
    ///
    /// let span = Span::builder(-401, -500, Precision::Century)
    ///     .notes("century: 5th century BC")
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(span.start_year(), -500);
    /// assert_eq!(span.end_year(), -401);
    /// assert_eq!(span.confidence(), Confidence::Explicit);
    /// ```
    pub fn builder(start_year: i32, end_year: i32, precision: Precision) -> SpanBuilder {
        SpanBuilder {
            start_year,
            end_year,
            start_month: None,
            start_day: None,
            end_month: None,
            end_day: None,
            precision,
            circa: false,
            confidence: Confidence::Explicit,
            notes: String::new(),
        }
    }

    /// Start building a single-year span
    pub fn point(year: i32, precision: Precision) -> SpanBuilder {
        Self::builder(year, year, precision)
    }

    /// Inclusive start year (negative for BC)
    pub fn start_year(&self) -> i32 {
        self.start_year
    }

    /// Inclusive end year (negative for BC)
    pub fn end_year(&self) -> i32 {
        self.end_year
    }

    /// Start month, when the source gave one
    pub fn start_month(&self) -> Option<u8> {
        self.start_month
    }

    /// Start day, when the source gave one
    pub fn start_day(&self) -> Option<u8> {
        self.start_day
    }

    /// End month, when the source gave one
    pub fn end_month(&self) -> Option<u8> {
        self.end_month
    }

    /// End day, when the source gave one
    pub fn end_day(&self) -> Option<u8> {
        self.end_day
    }

    /// Granularity of the span
    pub fn precision(&self) -> Precision {
        self.precision
    }

    /// Whether the source marked the date as approximate
    pub fn circa(&self) -> bool {
        self.circa
    }

    /// Reliability of the span
    pub fn confidence(&self) -> Confidence {
        self.confidence
    }

    /// Trace of the rule that produced the span
    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// True when start and end fall in the same year
    pub fn is_point(&self) -> bool {
        self.start_year == self.end_year
    }

    /// Number of calendar years covered, counting both ends
    pub fn year_count(&self) -> u64 {
        (to_astronomical(self.end_year) - to_astronomical(self.start_year) + 1) as u64
    }

    /// Whether `year` falls inside the span
    pub fn contains_year(&self, year: i32) -> bool {
        year != 0 && self.start_year <= year && year <= self.end_year
    }

    /// Copy of this span with a different confidence and an extra note
    pub fn with_confidence(&self, confidence: Confidence, note: &str) -> Span {
        let mut span = self.clone();
        span.confidence = confidence;
        if !note.is_empty() {
            span.notes.push_str("; ");
            span.notes.push_str(note);
        }
        span
    }

    /// Re-check every invariant
    pub fn validate(&self) -> Result<(), InvalidSpan> {
        if self.start_year == 0 || self.end_year == 0 {
            return Err(InvalidSpan::ZeroYear);
        }
        check_month_day(self.start_month, self.start_day)?;
        check_month_day(self.end_month, self.end_day)?;
        if self.circa && self.precision == Precision::ExactDate {
            return Err(InvalidSpan::CircaExactDate);
        }
        if self.notes.trim().is_empty() {
            return Err(InvalidSpan::MissingNotes);
        }
        Ok(())
    }
}

fn check_month_day(month: Option<u8>, day: Option<u8>) -> Result<(), InvalidSpan> {
    match (month, day) {
        (None, Some(_)) => Err(InvalidSpan::DayWithoutMonth),
        (Some(m), _) if !(1..=12).contains(&m) => Err(InvalidSpan::MonthOutOfRange(m)),
        (Some(m), Some(d)) => {
            let max = days_in_month(m).ok_or(InvalidSpan::MonthOutOfRange(m))?;
            if d == 0 || d > max {
                Err(InvalidSpan::DayOutOfRange { month: m, day: d })
            } else {
                Ok(())
            }
        }
        _ => Ok(()),
    }
}

fn fmt_point(f: &mut fmt::Formatter<'_>, year: i32, month: Option<u8>, day: Option<u8>) -> fmt::Result {
    if let Some(d) = day {
        write!(f, "{} ", d)?;
    }
    if let Some(name) = month.and_then(month_name) {
        write!(f, "{} ", name)?;
    }
    if year < 0 {
        write!(f, "{} BC", -i64::from(year))
    } else {
        write!(f, "{}", year)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.circa {
            write!(f, "c. ")?;
        }
        fmt_point(f, self.start_year, self.start_month, self.start_day)?;

        let same_end = self.start_year == self.end_year
            && self.end_month.is_none()
            && self.end_day.is_none();
        if !same_end {
            write!(f, " – ")?;
            fmt_point(f, self.end_year, self.end_month, self.end_day)?;
        }
        Ok(())
    }
}

/// Builder that validates and normalizes a [`Span`]
#[derive(Debug, Clone)]
pub struct SpanBuilder {
    start_year: i32,
    end_year: i32,
    start_month: Option<u8>,
    start_day: Option<u8>,
    end_month: Option<u8>,
    end_day: Option<u8>,
    precision: Precision,
    circa: bool,
    confidence: Confidence,
    notes: String,
}

impl SpanBuilder {
    /// Set the month/day detail of the start bound
    pub fn start_date(mut self, month: Option<u8>, day: Option<u8>) -> Self {
        self.start_month = month;
        self.start_day = day;
        self
    }

    /// Set the month/day detail of the end bound
    pub fn end_date(mut self, month: Option<u8>, day: Option<u8>) -> Self {
        self.end_month = month;
        self.end_day = day;
        self
    }

    /// Mark the span as circa
    pub fn circa(mut self, circa: bool) -> Self {
        self.circa = circa;
        self
    }

    /// Set the confidence
    pub fn confidence(mut self, confidence: Confidence) -> Self {
        self.confidence = confidence;
        self
    }

    /// Set the provenance notes
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Normalize bound order and validate
    pub fn build(self) -> Result<Span, InvalidSpan> {
        let start = (self.start_year, self.start_month, self.start_day);
        let end = (self.end_year, self.end_month, self.end_day);

        let reversed = self.start_year > self.end_year
            || (self.start_year == self.end_year
                && matches!(
                    (self.start_month, self.end_month),
                    (Some(sm), Some(em)) if (em, self.end_day) < (sm, self.start_day)
                ));
        let (start, end) = if reversed { (end, start) } else { (start, end) };

        let span = Span {
            start_year: start.0,
            start_month: start.1,
            start_day: start.2,
            end_year: end.0,
            end_month: end.1,
            end_day: end.2,
            precision: self.precision,
            circa: self.circa,
            confidence: self.confidence,
            notes: self.notes,
        };
        span.validate()?;
        Ok(span)
    }
}
