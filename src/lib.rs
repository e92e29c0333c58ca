//! # rankplot
//!
//! Reads player rank and hours-played records from a local SQLite database
//! and renders a scatter plot with a LOWESS trend overlay to a PNG image.

pub mod error;
pub mod logging;
pub mod lowess;
pub mod plot;
pub mod rankings;

// Re-export commonly used types
pub use error::{RankPlotError, Result};
pub use rankings::{AxisRange, RankingRecord};
