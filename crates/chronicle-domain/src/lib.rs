//! Chronicle Domain Layer
//!
//! Value types for normalized historical dates. This crate has no runtime
//! dependencies; parsing and orchestration live in `chronicle-extractor`.
//!
//! ## Key Concepts
//!
//! - **Span**: an inclusive interval of signed years (BC negative, no year zero)
//!   with optional month/day detail
//! - **Precision**: how finely the source pinned the date down
//! - **Confidence**: how reliable the source is about it
//! - **EraContext**: ambient BC/AD default and section range for fallbacks
//! - **RowspanContext**: year inheritance across spanned table rows
//!
//! ## Calendar Conventions
//!
//! - Century `N` AD is `(N-1)*100+1 ..= N*100`; century `N` BC is
//!   `-(N*100) ..= -((N-1)*100+1)`
//! - Centuries split into thirds of 33/33/34 years (early, mid, late)
//! - No Julian/Gregorian conversion is performed

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod calendar;
pub mod confidence;
pub mod era;
pub mod precision;
pub mod rowspan;
pub mod span;


// Re-exports for convenience
pub use calendar::{Century, CenturyThird, DecadePart};
pub use confidence::Confidence;
pub use era::{Era, EraContext};
pub use precision::Precision;
pub use rowspan::{InheritedYear, RowspanContext};
pub use span::{InvalidSpan, Span, SpanBuilder};
