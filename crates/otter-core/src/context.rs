use crate::{Error, GlobalTimeAxis, TimeUnit, remap_time_unit};

/// Time state shared by everything drawn in one render session.
///
/// A context is built once per image or movie and handed by reference to
/// each viewport and annotation. Positioning it at a frame time produces a
/// new context; the session axis and unit never change.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderContext {
    current_time: f64,
    time_unit: TimeUnit,
    global_time_axis: GlobalTimeAxis,
}

impl RenderContext {
    /// Creates a context positioned at the start of `axis`.
    #[must_use]
    pub fn new(global_time_axis: GlobalTimeAxis, time_unit: TimeUnit) -> Self {
        Self {
            current_time: global_time_axis.first(),
            time_unit,
            global_time_axis,
        }
    }

    /// Returns a copy of this context positioned at `time` (seconds).
    ///
    /// # Errors
    ///
    /// Returns [`Error::NanQuery`] if `time` is NaN, or
    /// [`Error::InfiniteFrameTime`] if it is infinite.
    pub fn at_time(&self, time: f64) -> Result<Self, Error> {
        if time.is_nan() {
            return Err(Error::NanQuery);
        }
        if time.is_infinite() {
            return Err(Error::InfiniteFrameTime(time));
        }
        Ok(Self {
            current_time: time,
            ..self.clone()
        })
    }

    #[must_use]
    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    #[must_use]
    pub fn time_unit(&self) -> TimeUnit {
        self.time_unit
    }

    #[must_use]
    pub fn global_time_axis(&self) -> &GlobalTimeAxis {
        &self.global_time_axis
    }

    /// Index of the last global time at or before the current time.
    ///
    /// This is the number of completed simulation steps, minus one.
    #[must_use]
    pub fn time_index(&self) -> usize {
        // `current_time` is always finite.
        self.global_time_axis
            .index_at_or_before(self.current_time)
            .unwrap_or(0)
    }

    /// Current time expressed in the display unit, with its label.
    #[must_use]
    pub fn display_time(&self) -> (f64, &'static str) {
        remap_time_unit(self.current_time, self.time_unit)
    }

    /// Times at which movie frames are rendered.
    ///
    /// With `None` every global time becomes a frame. With `Some(n)` the
    /// session range is divided into `n` evenly spaced frames.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ZeroFrames`] for `Some(0)`.
    pub fn frame_times(&self, frames: Option<usize>) -> Result<Vec<f64>, Error> {
        match frames {
            None => Ok(self.global_time_axis.times().to_vec()),
            Some(count) => {
                let axis = GlobalTimeAxis::linspace(
                    self.global_time_axis.first(),
                    self.global_time_axis.last(),
                    count,
                )?;
                Ok(axis.times().to_vec())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn context() -> RenderContext {
        let axis = GlobalTimeAxis::new(vec![0.0, 3600.0, 7200.0, 10800.0]).unwrap();
        RenderContext::new(axis, TimeUnit::Hours)
    }

    #[test]
    fn starts_at_first_time() {
        let ctx = context();

        assert_eq!(ctx.current_time(), 0.0);
        assert_eq!(ctx.time_index(), 0);
    }

    #[test]
    fn positions_without_mutating_source_context() {
        let ctx = context();
        let later = ctx.at_time(5400.0).unwrap();

        assert_eq!(ctx.current_time(), 0.0);
        assert_eq!(later.current_time(), 5400.0);
        assert_eq!(later.time_index(), 1);

        let (time, unit) = later.display_time();
        assert_relative_eq!(time, 1.5);
        assert_eq!(unit, "hours");
    }

    #[test]
    fn past_the_end_maps_to_last_step() {
        let ctx = context().at_time(1e9).unwrap();
        assert_eq!(ctx.time_index(), 3);
    }

    #[test]
    fn frame_times_default_to_axis() {
        let ctx = context();
        assert_eq!(
            ctx.frame_times(None).unwrap(),
            vec![0.0, 3600.0, 7200.0, 10800.0]
        );
    }

    #[test]
    fn frame_times_can_be_resampled() {
        let ctx = context();

        let frames = ctx.frame_times(Some(7)).unwrap();
        assert_eq!(frames.len(), 7);
        assert_eq!(frames[0], 0.0);
        assert_eq!(frames[6], 10800.0);
        assert_relative_eq!(frames[3], 5400.0);

        assert_eq!(ctx.frame_times(Some(0)), Err(Error::ZeroFrames));
    }

    #[test]
    fn rejects_non_finite_position() {
        assert_eq!(context().at_time(f64::NAN), Err(Error::NanQuery));
        assert_eq!(
            context().at_time(f64::INFINITY),
            Err(Error::InfiniteFrameTime(f64::INFINITY))
        );
        assert_eq!(
            context().at_time(f64::NEG_INFINITY),
            Err(Error::InfiniteFrameTime(f64::NEG_INFINITY))
        );
    }
}
