use serde::Serialize;

use crate::Error;

/// An ordered sequence of `(time, value)` samples.
///
/// Times strictly increase and there is always at least one sample, so every
/// query has a well-defined answer. A series is read-only once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeries {
    times: Vec<f64>,
    values: Vec<f64>,
}

impl TimeSeries {
    /// Creates a series from parallel time and value vectors.
    ///
    /// # Errors
    ///
    /// Returns an error if the series is empty, the lengths differ, any sample
    /// is non-finite, or the times do not strictly increase.
    pub fn new(times: Vec<f64>, values: Vec<f64>) -> Result<Self, Error> {
        if times.len() != values.len() {
            return Err(Error::LengthMismatch {
                times: times.len(),
                values: values.len(),
            });
        }
        if times.is_empty() {
            return Err(Error::EmptySeries);
        }

        for (index, (&time, &value)) in times.iter().zip(&values).enumerate() {
            if !time.is_finite() || !value.is_finite() {
                return Err(Error::NonFiniteSample { index, time, value });
            }
        }

        if let Some(index) = times.windows(2).position(|w| w[1] <= w[0]) {
            return Err(Error::NotIncreasing {
                index: index + 1,
                previous: times[index],
                current: times[index + 1],
            });
        }

        Ok(Self { times, values })
    }

    /// Creates a series from `(time, value)` pairs.
    ///
    /// # Errors
    ///
    /// See [`TimeSeries::new`].
    pub fn from_pairs<I>(pairs: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let (times, values) = pairs.into_iter().unzip();
        Self::new(times, values)
    }

    /// Creates a series holding a single sample.
    ///
    /// # Errors
    ///
    /// Returns an error if either number is non-finite.
    pub fn constant(time: f64, value: f64) -> Result<Self, Error> {
        Self::new(vec![time], vec![value])
    }

    #[must_use]
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Always `false`; kept for API symmetry with slices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns the first sample.
    #[must_use]
    pub fn first(&self) -> (f64, f64) {
        (self.times[0], self.values[0])
    }

    /// Returns the last sample.
    #[must_use]
    pub fn last(&self) -> (f64, f64) {
        let n = self.times.len() - 1;
        (self.times[n], self.values[n])
    }

    /// Iterates over the samples as `(time, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.times.iter().copied().zip(self.values.iter().copied())
    }

    /// Returns the number of samples whose time is at or before `time`.
    ///
    /// This is the bisect-right insertion point of `time`.
    #[must_use]
    pub fn count_at_or_before(&self, time: f64) -> usize {
        self.times.partition_point(|&t| t <= time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_from_pairs() {
        let series = TimeSeries::from_pairs([(0.0, 1.0), (1.0, 2.0), (3.0, 5.0)]).unwrap();

        assert_eq!(series.len(), 3);
        assert_eq!(series.first(), (0.0, 1.0));
        assert_eq!(series.last(), (3.0, 5.0));
        assert_eq!(series.iter().collect::<Vec<_>>().len(), 3);
    }

    #[test]
    fn rejects_empty_series() {
        assert_eq!(TimeSeries::new(vec![], vec![]), Err(Error::EmptySeries));
    }

    #[test]
    fn rejects_mismatched_lengths() {
        assert_eq!(
            TimeSeries::new(vec![0.0, 1.0], vec![1.0]),
            Err(Error::LengthMismatch {
                times: 2,
                values: 1
            })
        );
    }

    #[test]
    fn rejects_repeated_time() {
        let err = TimeSeries::from_pairs([(0.0, 1.0), (1.0, 2.0), (1.0, 3.0)]).unwrap_err();

        assert_eq!(
            err,
            Error::NotIncreasing {
                index: 2,
                previous: 1.0,
                current: 1.0
            }
        );
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn rejects_non_finite_values() {
        let err = TimeSeries::from_pairs([(0.0, 1.0), (1.0, f64::NAN)]).unwrap_err();
        assert!(matches!(err, Error::NonFiniteSample { index: 1, .. }));
    }

    #[test]
    fn counts_samples_at_or_before() {
        let series = TimeSeries::from_pairs([(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]).unwrap();

        assert_eq!(series.count_at_or_before(-1.0), 0);
        assert_eq!(series.count_at_or_before(1.0), 2);
        assert_eq!(series.count_at_or_before(1.5), 2);
        assert_eq!(series.count_at_or_before(9.0), 3);
    }
}
