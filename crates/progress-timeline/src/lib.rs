//! Data layer for the solved-problems timeline dashboard.
//!
//! Problems come from a static dataset; this crate groups them by day,
//! orders them, summarizes them and formats the values the timeline shows.

pub mod format;
pub mod palette;
pub mod problem;
pub mod stats;

pub use format::*;
pub use palette::*;
pub use problem::*;
pub use stats::*;

use thiserror::Error;

/// Timeline errors.
#[derive(Error, Debug)]
pub enum TimelineError {
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Invalid date {value:?}: expected YYYY-MM-DD")]
    InvalidDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

pub type TimelineResult<T> = Result<T, TimelineError>;
