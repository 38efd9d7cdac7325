use std::path::PathBuf;

use otter_core::{Error, Extrapolate, RenderContext, Resampler};
use serde::Serialize;

use crate::{
    SceneError, ViewportKind,
    def::{ColorbarDef, LineDef, ViewportDef},
    store::DataStore,
};

/// A typed viewport, built from a [`ViewportDef`] by its kind's constructor.
#[derive(Debug, Clone, PartialEq)]
pub enum Viewport {
    Exodus(ExodusViewport),
    Plot(PlotViewport),
}

/// A mesh result rendered by the external engine at the current time step.
#[derive(Debug, Clone, PartialEq)]
pub struct ExodusViewport {
    pub name: String,
    pub file: PathBuf,
    pub variable: String,
    pub colorbar: Option<Colorbar>,
}

/// A time-series chart with one or more lines.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotViewport {
    pub name: String,
    pub lines: Vec<PlotLine>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlotLine {
    pub label: String,
    pub resampler: Resampler,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Colorbar {
    pub range: Option<[f64; 2]>,
    pub location: ColorbarLocation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorbarLocation {
    Left,
    #[default]
    Right,
    Top,
    Bottom,
}

/// What a viewport shows in one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum ViewportFrame {
    Exodus(ExodusFrame),
    Plot(PlotFrame),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExodusFrame {
    pub name: String,
    pub file: PathBuf,
    pub variable: String,
    /// Index into the session's global time axis at the frame time.
    ///
    /// This matches the mesh file's own step numbering only when the axis is
    /// the mesh's time list, e.g. given through the scene's `times`. An axis
    /// built from plot CSV times indexes the CSV rows instead.
    pub timestep: usize,
    pub colorbar: Option<Colorbar>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotFrame {
    pub name: String,
    pub lines: Vec<LineFrame>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineFrame {
    pub label: String,
    /// The line's value at the frame time.
    pub current: [f64; 2],
    /// Samples up to the frame time, ending at `current` when the frame time
    /// falls between samples.
    pub trace: Vec<[f64; 2]>,
}

impl Viewport {
    /// Builds the viewport named by `def.kind`.
    pub(crate) fn from_def(
        index: usize,
        def: &ViewportDef,
        store: &mut DataStore,
    ) -> Result<Self, SceneError> {
        let kind: ViewportKind = def.kind.parse()?;
        let name = def
            .name
            .clone()
            .unwrap_or_else(|| format!("{}{index}", kind.name().to_ascii_lowercase()));

        match kind {
            ViewportKind::Exodus => ExodusViewport::build(name, def, store).map(Self::Exodus),
            ViewportKind::Plot => PlotViewport::build(name, def, store).map(Self::Plot),
        }
    }

    #[must_use]
    pub fn kind(&self) -> ViewportKind {
        match self {
            Self::Exodus(_) => ViewportKind::Exodus,
            Self::Plot(_) => ViewportKind::Plot,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Exodus(v) => &v.name,
            Self::Plot(v) => &v.name,
        }
    }

    /// Evaluates the viewport at the context's current time.
    ///
    /// # Errors
    ///
    /// Returns an error if a plot line cannot be sampled.
    pub fn frame(&self, ctx: &RenderContext) -> Result<ViewportFrame, Error> {
        match self {
            Self::Exodus(v) => Ok(ViewportFrame::Exodus(v.frame(ctx))),
            Self::Plot(v) => v.frame(ctx).map(ViewportFrame::Plot),
        }
    }
}

impl ExodusViewport {
    const KIND: &'static str = "Exodus";

    fn build(name: String, def: &ViewportDef, store: &DataStore) -> Result<Self, SceneError> {
        let file = def.file.as_deref().ok_or(SceneError::MissingParameter {
            kind: Self::KIND,
            parameter: "file",
        })?;
        let variable = def.variable.clone().ok_or(SceneError::MissingParameter {
            kind: Self::KIND,
            parameter: "variable",
        })?;
        if !def.lines.is_empty() {
            return Err(SceneError::invalid(
                Self::KIND,
                "lines",
                "only Plot viewports draw lines",
            ));
        }

        let colorbar = def.colorbar.as_ref().map(Colorbar::build).transpose()?;

        Ok(Self {
            name,
            file: store.resolve(file),
            variable,
            colorbar,
        })
    }

    fn frame(&self, ctx: &RenderContext) -> ExodusFrame {
        ExodusFrame {
            name: self.name.clone(),
            file: self.file.clone(),
            variable: self.variable.clone(),
            timestep: ctx.time_index(),
            colorbar: self.colorbar.clone(),
        }
    }
}

impl PlotViewport {
    const KIND: &'static str = "Plot";

    fn build(name: String, def: &ViewportDef, store: &mut DataStore) -> Result<Self, SceneError> {
        if def.lines.is_empty() {
            return Err(SceneError::MissingParameter {
                kind: Self::KIND,
                parameter: "lines",
            });
        }
        for (parameter, present) in [
            ("file", def.file.is_some()),
            ("variable", def.variable.is_some()),
            ("colorbar", def.colorbar.is_some()),
        ] {
            if present {
                return Err(SceneError::invalid(
                    Self::KIND,
                    parameter,
                    "set it on each line or use an Exodus viewport",
                ));
            }
        }

        let lines = def
            .lines
            .iter()
            .map(|line| PlotLine::build(line, store))
            .collect::<Result<_, _>>()?;

        Ok(Self { name, lines })
    }

    fn frame(&self, ctx: &RenderContext) -> Result<PlotFrame, Error> {
        let lines = self
            .lines
            .iter()
            .map(|line| line.frame(ctx.current_time()))
            .collect::<Result<_, _>>()?;

        Ok(PlotFrame {
            name: self.name.clone(),
            lines,
        })
    }
}

impl PlotLine {
    fn build(def: &LineDef, store: &mut DataStore) -> Result<Self, SceneError> {
        let series = store.series(&def.file, &def.column)?;
        let resampler = Resampler::new(series, def.strategy, Extrapolate::Clamp)?;

        Ok(Self {
            label: def.label.clone().unwrap_or_else(|| def.column.clone()),
            resampler,
        })
    }

    fn frame(&self, time: f64) -> Result<LineFrame, Error> {
        let value = self.resampler.sample(time)?;
        let series = self.resampler.series();

        let count = series.count_at_or_before(time);
        let mut trace: Vec<[f64; 2]> = series.iter().take(count).map(|(t, y)| [t, y]).collect();

        let (last_time, _) = series.last();
        let on_sample = trace.last().is_some_and(|&[t, _]| t == time);
        if count > 0 && time < last_time && !on_sample {
            trace.push([time, value]);
        }

        Ok(LineFrame {
            label: self.label.clone(),
            current: [time, value],
            trace,
        })
    }
}

impl Colorbar {
    const KIND: &'static str = "Colorbar";

    fn build(def: &ColorbarDef) -> Result<Self, SceneError> {
        if let Some([min, max]) = def.range {
            if !(min.is_finite() && max.is_finite() && min < max) {
                return Err(SceneError::invalid(
                    Self::KIND,
                    "range",
                    format!("expected finite [min, max] with min < max, got [{min}, {max}]"),
                ));
            }
        }

        let location = match def.location.as_deref() {
            None => ColorbarLocation::default(),
            Some("left") => ColorbarLocation::Left,
            Some("right") => ColorbarLocation::Right,
            Some("top") => ColorbarLocation::Top,
            Some("bottom") => ColorbarLocation::Bottom,
            Some(other) => {
                return Err(SceneError::invalid(
                    Self::KIND,
                    "location",
                    format!("`{other}` is not one of left, right, top, bottom"),
                ));
            }
        };

        Ok(Self {
            range: def.range,
            location,
        })
    }
}
