use std::path::Path;

use otter_core::{GlobalTimeAxis, RenderContext};

use crate::{
    Annotation, FramePlan, SceneError, Viewport, ViewportKind, def::SceneDef, store::DataStore,
};

/// A loaded scene: typed viewports and annotations plus the session context.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    context: RenderContext,
    viewports: Vec<Viewport>,
    annotations: Vec<Annotation>,
}

impl Scene {
    /// Loads a TOML scene file. Relative data paths resolve against the
    /// file's directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, or if
    /// [`Scene::from_def`] rejects its contents.
    #[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SceneError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        Self::from_toml(&text, base_dir)
    }

    /// Parses TOML scene text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid scene, or if
    /// [`Scene::from_def`] rejects it.
    pub fn from_toml(text: &str, base_dir: impl AsRef<Path>) -> Result<Self, SceneError> {
        let def: SceneDef = toml::from_str(text)?;
        Self::from_def(&def, base_dir)
    }

    /// Builds a scene from its definition.
    ///
    /// Each viewport and annotation is built by its kind's constructor, and
    /// postprocessor files are read once each. The global time axis is the
    /// explicit `times` list when present, otherwise the union of every
    /// plot line's sample times.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown kinds, missing or invalid parameters,
    /// unreadable data, an invalid `times` list, or a scene without any
    /// time data.
    pub fn from_def(def: &SceneDef, base_dir: impl AsRef<Path>) -> Result<Self, SceneError> {
        let mut store = DataStore::new(base_dir.as_ref(), def.time_column.as_deref());

        let viewports = def
            .viewports
            .iter()
            .enumerate()
            .map(|(i, v)| Viewport::from_def(i, v, &mut store))
            .collect::<Result<Vec<_>, _>>()?;

        let annotations = def
            .annotations
            .iter()
            .map(|a| Annotation::from_def(a, &store))
            .collect::<Result<Vec<_>, _>>()?;

        let axis = match &def.times {
            Some(times) => {
                tracing::debug!(len = times.len(), "using explicit global time axis");
                GlobalTimeAxis::new(times.clone())?
            }
            None => {
                let series: Vec<_> = viewports
                    .iter()
                    .filter_map(|v| match v {
                        Viewport::Plot(plot) => Some(plot),
                        Viewport::Exodus(_) => None,
                    })
                    .flat_map(|plot| plot.lines.iter().map(|line| line.resampler.series()))
                    .collect();
                if series.is_empty() {
                    return Err(SceneError::NoTimeData);
                }
                GlobalTimeAxis::union(series)?
            }
        };

        tracing::info!(
            viewports = viewports.len(),
            annotations = annotations.len(),
            times = axis.len(),
            unit = %def.time_unit,
            "scene loaded"
        );

        Ok(Self {
            context: RenderContext::new(axis, def.time_unit),
            viewports,
            annotations,
        })
    }

    #[must_use]
    pub fn context(&self) -> &RenderContext {
        &self.context
    }

    #[must_use]
    pub fn viewports(&self) -> &[Viewport] {
        &self.viewports
    }

    #[must_use]
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Returns `true` if any viewport shows mesh results.
    #[must_use]
    pub fn has_mesh_viewport(&self) -> bool {
        self.viewports
            .iter()
            .any(|v| v.kind() == ViewportKind::Exodus)
    }

    /// Plans frame `index` at `time` seconds.
    ///
    /// # Errors
    ///
    /// Returns an error if `time` is NaN or a viewport cannot be sampled.
    pub fn plan_frame(&self, index: usize, time: f64) -> Result<FramePlan, SceneError> {
        let ctx = self.context.at_time(time)?;

        let viewports = self
            .viewports
            .iter()
            .map(|v| v.frame(&ctx))
            .collect::<Result<Vec<_>, _>>()?;
        let annotations = self.annotations.iter().map(|a| a.frame(&ctx)).collect();
        let (display_time, unit) = ctx.display_time();

        Ok(FramePlan {
            index,
            time,
            time_index: ctx.time_index(),
            display_time,
            unit,
            viewports,
            annotations,
        })
    }

    /// Plans a single image at `time`, or at the last global time.
    ///
    /// # Errors
    ///
    /// See [`Scene::plan_frame`].
    #[tracing::instrument(skip(self))]
    pub fn plan_image(&self, time: Option<f64>) -> Result<FramePlan, SceneError> {
        let time = time.unwrap_or_else(|| self.context.global_time_axis().last());
        self.plan_frame(0, time)
    }

    /// Plans every frame of a movie.
    ///
    /// With `frames` unset there is one frame per global time; otherwise the
    /// session range is split into `frames` evenly spaced frames.
    ///
    /// # Errors
    ///
    /// Returns an error for `Some(0)` frames, or see [`Scene::plan_frame`].
    #[tracing::instrument(skip(self))]
    pub fn plan_movie(&self, frames: Option<usize>) -> Result<Vec<FramePlan>, SceneError> {
        let times = self.context.frame_times(frames)?;
        tracing::debug!(frames = times.len(), "planning movie");

        times
            .into_iter()
            .enumerate()
            .map(|(index, time)| self.plan_frame(index, time))
            .collect()
    }
}
