use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use uom::si::{
    f64::Time,
    time::{day, hour, minute, second},
};

use crate::Error;

/// The unit used to display simulation time.
///
/// Raw simulation time is always in seconds. The unit only affects how time
/// is shown, for example in elapsed-time annotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TimeUnit {
    #[default]
    Seconds,
    Minutes,
    Hours,
    Days,
}

impl TimeUnit {
    pub const ALL: [TimeUnit; 4] = [Self::Seconds, Self::Minutes, Self::Hours, Self::Days];

    /// Returns the display label, e.g. `"hours"`.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Seconds => "seconds",
            Self::Minutes => "minutes",
            Self::Hours => "hours",
            Self::Days => "days",
        }
    }

    /// Returns the length of one unit in seconds.
    #[must_use]
    pub fn seconds_per_unit(self) -> f64 {
        let one = match self {
            Self::Seconds => Time::new::<second>(1.0),
            Self::Minutes => Time::new::<minute>(1.0),
            Self::Hours => Time::new::<hour>(1.0),
            Self::Days => Time::new::<day>(1.0),
        };
        one.get::<second>()
    }

    /// Converts a time in seconds into this unit.
    ///
    /// Divides by the unit length so whole multiples convert exactly.
    #[must_use]
    pub fn convert_seconds(self, seconds: f64) -> f64 {
        seconds / self.seconds_per_unit()
    }

    /// Returns the factor that converts seconds into this unit.
    ///
    /// `1` for seconds, `1/60` for minutes, `1/3600` for hours and
    /// `1/86400` for days.
    #[must_use]
    pub fn scale_factor(self) -> f64 {
        1.0 / self.seconds_per_unit()
    }
}

/// Scales `raw_time` (seconds) into `unit` and pairs it with the unit label.
#[must_use]
pub fn remap_time_unit(raw_time: f64, unit: TimeUnit) -> (f64, &'static str) {
    (unit.convert_seconds(raw_time), unit.label())
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TimeUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "s" | "sec" | "second" | "seconds" => Ok(Self::Seconds),
            "min" | "minute" | "minutes" => Ok(Self::Minutes),
            "h" | "hr" | "hour" | "hours" => Ok(Self::Hours),
            "d" | "day" | "days" => Ok(Self::Days),
            _ => Err(Error::UnknownTimeUnit(s.to_string())),
        }
    }
}

impl TryFrom<String> for TimeUnit {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeUnit> for String {
    fn from(unit: TimeUnit) -> Self {
        unit.label().to_string()
    }
}
