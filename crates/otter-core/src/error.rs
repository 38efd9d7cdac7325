use thiserror::Error;

/// Errors raised when constructing or querying time data.
///
/// Every variant except [`Error::OutOfRange`], [`Error::UnknownTimeUnit`] and
/// [`Error::Interpolation`] reports an invalid argument: a precondition the
/// caller must fix before calling again.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("time series must contain at least one sample")]
    EmptySeries,

    #[error("time series has {times} times but {values} values")]
    LengthMismatch { times: usize, values: usize },

    #[error("sample {index} is not finite (time = {time}, value = {value})")]
    NonFiniteSample { index: usize, time: f64, value: f64 },

    #[error("sample times must strictly increase: time[{index}] = {current} follows {previous}")]
    NotIncreasing {
        index: usize,
        previous: f64,
        current: f64,
    },

    #[error("global time axis must contain at least one time")]
    EmptyAxis,

    #[error("global time axis entry {index} is not finite ({time})")]
    NonFiniteTime { index: usize, time: f64 },

    #[error("global time axis must be non-decreasing: time[{index}] = {current} follows {previous}")]
    DecreasingAxis {
        index: usize,
        previous: f64,
        current: f64,
    },

    #[error("query time is NaN")]
    NanQuery,

    #[error("frame time must be finite, got {0}")]
    InfiniteFrameTime(f64),

    #[error("frame count must be at least one")]
    ZeroFrames,

    #[error("query time {time} is outside the sampled range [{first}, {last}]")]
    OutOfRange { time: f64, first: f64, last: f64 },

    #[error("unknown time unit `{0}` (expected seconds, minutes, hours or days)")]
    UnknownTimeUnit(String),

    #[error(transparent)]
    Interpolator(#[from] ninterp::error::ValidateError),

    #[error(transparent)]
    Interpolation(#[from] ninterp::error::InterpolateError),
}

impl Error {
    /// Returns `true` if the error reports a violated input precondition.
    #[must_use]
    pub fn is_invalid_argument(&self) -> bool {
        !matches!(
            self,
            Self::OutOfRange { .. } | Self::UnknownTimeUnit(_) | Self::Interpolation(_)
        )
    }
}
