//! Time handling for Otter render sessions.
//!
//! Simulation outputs are sampled at their own times, but an image or movie
//! shows every quantity at one shared time. This crate provides the pieces
//! that line those samples up:
//!
//! - [`TimeSeries`] — validated `(time, value)` samples
//! - [`GlobalTimeAxis`] — the session's shared, ordered time axis
//! - [`interpolate`] and [`Resampler`] — values at arbitrary times
//! - [`index_at_or_before`] — which simulation step a time falls in
//! - [`TimeUnit`] and [`remap_time_unit`] — display units for elapsed time
//! - [`RenderContext`] — the current time, unit and axis for one session
//!
//! All operations are pure; types are `Send + Sync`.

mod axis;
mod context;
mod error;
mod resample;
mod series;
mod unit;

pub use axis::{GlobalTimeAxis, index_at_or_before};
pub use context::RenderContext;
pub use error::Error;
pub use resample::{Extrapolate, Resampler, Strategy, interpolate};
pub use series::TimeSeries;
pub use unit::{TimeUnit, remap_time_unit};
