use serde::Serialize;

use crate::{Error, TimeSeries};

/// The ordered set of times shared by every quantity in one render session.
///
/// Independently sampled series are resampled onto this axis so that they
/// can be displayed in lockstep. Times are non-decreasing; the axis is never
/// empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct GlobalTimeAxis {
    times: Vec<f64>,
}

impl GlobalTimeAxis {
    /// Creates an axis after validating it.
    ///
    /// # Errors
    ///
    /// Returns an error if `times` is empty, holds a non-finite time, or
    /// decreases.
    pub fn new(times: Vec<f64>) -> Result<Self, Error> {
        validate_axis(&times)?;
        Ok(Self { times })
    }

    /// Builds the sorted, de-duplicated union of the sample times of `series`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyAxis`] if no series is given.
    pub fn union<'a, I>(series: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = &'a TimeSeries>,
    {
        let mut times: Vec<f64> = series
            .into_iter()
            .flat_map(|s| s.times().iter().copied())
            .collect();

        // Series times are finite.
        times.sort_by(f64::total_cmp);
        times.dedup();

        tracing::debug!(len = times.len(), "built global time axis from series union");
        Self::new(times)
    }

    /// Builds `count` evenly spaced times from `start` to `end` inclusive.
    ///
    /// A single time is placed at `end`, matching the "render the final
    /// state" default for images.
    ///
    /// # Errors
    ///
    /// Returns an error if `count` is zero, either bound is non-finite, or
    /// `end < start`.
    pub fn linspace(start: f64, end: f64, count: usize) -> Result<Self, Error> {
        if count == 0 {
            return Err(Error::ZeroFrames);
        }
        if count == 1 {
            return Self::new(vec![end]);
        }

        let step = (end - start) / (count - 1) as f64;
        let times = (0..count)
            .map(|i| {
                if i == count - 1 {
                    end
                } else {
                    start + step * i as f64
                }
            })
            .collect();

        Self::new(times)
    }

    #[must_use]
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Always `false`; an axis holds at least one time.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    #[must_use]
    pub fn first(&self) -> f64 {
        self.times[0]
    }

    #[must_use]
    pub fn last(&self) -> f64 {
        self.times[self.times.len() - 1]
    }

    /// Returns the index of the last axis time at or before `time`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NanQuery`] if `time` is NaN.
    pub fn index_at_or_before(&self, time: f64) -> Result<usize, Error> {
        if time.is_nan() {
            return Err(Error::NanQuery);
        }
        Ok(locate(&self.times, time))
    }
}

/// Returns the index of the rightmost element of `global_times` that is at or
/// before `query_time`.
///
/// Queries before the first time map to `0`; queries past the last time map
/// to the last index. Runs in `O(log n)`.
///
/// # Errors
///
/// Returns an error if `global_times` is empty or decreasing, or if
/// `query_time` is NaN.
pub fn index_at_or_before(global_times: &[f64], query_time: f64) -> Result<usize, Error> {
    validate_axis(global_times)?;
    if query_time.is_nan() {
        return Err(Error::NanQuery);
    }
    Ok(locate(global_times, query_time))
}

/// Bisect-right then step back one, clamped to `[0, len - 1]`.
fn locate(times: &[f64], time: f64) -> usize {
    let insertion = times.partition_point(|&t| t <= time);
    insertion.saturating_sub(1).min(times.len() - 1)
}

fn validate_axis(times: &[f64]) -> Result<(), Error> {
    if times.is_empty() {
        return Err(Error::EmptyAxis);
    }
    if let Some(index) = times.iter().position(|t| !t.is_finite()) {
        return Err(Error::NonFiniteTime {
            index,
            time: times[index],
        });
    }
    if let Some(index) = times.windows(2).position(|w| w[1] < w[0]) {
        return Err(Error::DecreasingAxis {
            index: index + 1,
            previous: times[index],
            current: times[index + 1],
        });
    }
    Ok(())
}
