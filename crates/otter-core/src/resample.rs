use ndarray::Array1;
use ninterp::{
    error::{InterpolateError, ValidateError},
    prelude::{Interp1D, Interp1DOwned, Interpolator, strategy},
};
use serde::{Deserialize, Serialize};

use crate::{Error, GlobalTimeAxis, TimeSeries};

/// Returns the value of `series` at `query_time` by linear interpolation.
///
/// Queries at or before the first sample return the first value, and queries
/// at or after the last sample return the last value. Inside the sampled
/// range the interval `[x_i, x_{i+1})` containing the query is located by
/// binary search and
///
/// ```text
/// y = y_i + (y_{i+1} - y_i) * (t - x_i) / (x_{i+1} - x_i)
/// ```
///
/// is returned. At a sample time `x_i` the result is exactly `y_i`.
///
/// # Errors
///
/// Returns [`Error::NanQuery`] if `query_time` is NaN.
pub fn interpolate(series: &TimeSeries, query_time: f64) -> Result<f64, Error> {
    if query_time.is_nan() {
        return Err(Error::NanQuery);
    }

    let times = series.times();
    let values = series.values();
    let last = times.len() - 1;

    if query_time <= times[0] {
        return Ok(values[0]);
    }
    if query_time >= times[last] {
        return Ok(values[last]);
    }

    // `times[0] < query_time < times[last]`, so `1 <= upper <= last`.
    let upper = series.count_at_or_before(query_time);
    let lower = upper - 1;

    let (x0, x1) = (times[lower], times[upper]);
    let (y0, y1) = (values[lower], values[upper]);

    Ok(y0 + (y1 - y0) * (query_time - x0) / (x1 - x0))
}

/// How values between samples are reconstructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Straight line between neighbouring samples.
    #[default]
    Linear,
    /// Hold the last sample value until the next sample (zero-order hold).
    Previous,
}

/// Extrapolation policy for queries outside the sampled range.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Extrapolate {
    /// Hold the first or last value flat.
    #[default]
    Clamp,
    /// Return this value instead.
    Fill(f64),
    /// Fail with [`Error::OutOfRange`].
    Error,
}

impl From<Extrapolate> for ninterp::interpolator::Extrapolate<f64> {
    fn from(value: Extrapolate) -> Self {
        match value {
            Extrapolate::Clamp => ninterp::interpolator::Extrapolate::Clamp,
            Extrapolate::Fill(fill) => ninterp::interpolator::Extrapolate::Fill(fill),
            Extrapolate::Error => ninterp::interpolator::Extrapolate::Error,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Interpolant {
    Linear(Interp1DOwned<f64, strategy::Linear>),
    Previous(Interp1DOwned<f64, strategy::LeftNearest>),
}

impl Interpolant {
    fn new(
        series: &TimeSeries,
        strategy: Strategy,
        extrapolate: Extrapolate,
    ) -> Result<Self, ValidateError> {
        let x = Array1::from(series.times().to_vec());
        let f_x = Array1::from(series.values().to_vec());

        Ok(match strategy {
            Strategy::Linear => Self::Linear(Interp1D::new(
                x,
                f_x,
                strategy::Linear,
                extrapolate.into(),
            )?),
            Strategy::Previous => Self::Previous(Interp1D::new(
                x,
                f_x,
                strategy::LeftNearest,
                extrapolate.into(),
            )?),
        })
    }

    fn interpolate(&self, time: f64) -> Result<f64, InterpolateError> {
        match self {
            Self::Linear(interp) => interp.interpolate(&[time]),
            Self::Previous(interp) => interp.interpolate(&[time]),
        }
    }
}

/// A time series paired with the rules used to sample it at arbitrary times.
///
/// The default configuration (linear, clamped) agrees with [`interpolate`]
/// and returns sample values exactly at sample times.
#[derive(Debug, Clone, PartialEq)]
pub struct Resampler {
    series: TimeSeries,
    strategy: Strategy,
    extrapolate: Extrapolate,
    interpolant: Interpolant,
}

impl Resampler {
    /// Builds an interpolator over `series`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Interpolator`] if the interpolator rejects the data.
    pub fn new(
        series: TimeSeries,
        strategy: Strategy,
        extrapolate: Extrapolate,
    ) -> Result<Self, Error> {
        let interpolant = Interpolant::new(&series, strategy, extrapolate)?;
        Ok(Self {
            series,
            strategy,
            extrapolate,
            interpolant,
        })
    }

    #[must_use]
    pub fn series(&self) -> &TimeSeries {
        &self.series
    }

    #[must_use]
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    #[must_use]
    pub fn extrapolate(&self) -> Extrapolate {
        self.extrapolate
    }

    /// Samples the series at `time`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NanQuery`] for a NaN query, or [`Error::OutOfRange`]
    /// if the query lies outside the series and extrapolation is
    /// [`Extrapolate::Error`].
    pub fn sample(&self, time: f64) -> Result<f64, Error> {
        if time.is_nan() {
            return Err(Error::NanQuery);
        }

        self.interpolant
            .interpolate(time)
            .map_err(|err| match err {
                InterpolateError::ExtrapolateError(_) => Error::OutOfRange {
                    time,
                    first: self.series.first().0,
                    last: self.series.last().0,
                },
                other => other.into(),
            })
    }

    /// Samples the series at every time on `axis`.
    ///
    /// # Errors
    ///
    /// Fails on the first time that [`Resampler::sample`] rejects.
    pub fn resample(&self, axis: &GlobalTimeAxis) -> Result<Vec<f64>, Error> {
        axis.times().iter().map(|&t| self.sample(t)).collect()
    }
}

impl TryFrom<TimeSeries> for Resampler {
    type Error = Error;

    fn try_from(series: TimeSeries) -> Result<Self, Self::Error> {
        Self::new(series, Strategy::default(), Extrapolate::default())
    }
}
