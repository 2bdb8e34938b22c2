//! Recurrence engine
//!
//! - `calendar`: advance a UTC day by one frequency step
//! - `expander`: expand a recurrence rule into concrete dated instances

pub mod calendar;
pub mod expander;

pub use calendar::{advance, parse_boundary_date, Anchor, FrequencyTable};
pub use expander::{expand, expand_dates, ExpandOptions};
