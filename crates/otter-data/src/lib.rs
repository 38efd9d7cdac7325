//! Postprocessor data readers for Otter.
//!
//! Simulations write scalar postprocessor values as CSV, one row per time
//! step. [`PostprocessorData`] loads such a file and hands out validated
//! [`otter_core::TimeSeries`] columns.

mod error;
mod postprocessor;

pub use error::Error;
pub use postprocessor::{DEFAULT_TIME_COLUMN, PostprocessorData};
