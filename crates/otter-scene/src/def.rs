//! Serialisable scene descriptions, as written in scene files.
//!
//! Definitions are deliberately loose: the `type` field is kept as text and
//! every kind-specific parameter is optional. Typed objects are built from
//! them by the kind registry, which reports unknown kinds and missing
//! parameters by name.

use std::path::PathBuf;

use otter_core::{Strategy, TimeUnit};
use serde::{Deserialize, Serialize};

/// A whole scene: session time settings, viewports and annotations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneDef {
    /// Unit used to display time.
    #[serde(default)]
    pub time_unit: TimeUnit,

    /// Explicit global time axis in seconds. When absent, the axis is the
    /// union of all plot-line sample times.
    #[serde(default)]
    pub times: Option<Vec<f64>>,

    /// Name of the time column in postprocessor CSV files.
    #[serde(default)]
    pub time_column: Option<String>,

    #[serde(default)]
    pub viewports: Vec<ViewportDef>,

    #[serde(default)]
    pub annotations: Vec<AnnotationDef>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ViewportDef {
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default)]
    pub name: Option<String>,

    /// Result file rendered by mesh viewports.
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// Field variable rendered by mesh viewports.
    #[serde(default)]
    pub variable: Option<String>,

    #[serde(default)]
    pub colorbar: Option<ColorbarDef>,

    /// Lines drawn by plot viewports.
    #[serde(default)]
    pub lines: Vec<LineDef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LineDef {
    pub file: PathBuf,
    pub column: String,

    #[serde(default)]
    pub label: Option<String>,

    #[serde(default)]
    pub strategy: Strategy,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColorbarDef {
    #[serde(default)]
    pub range: Option<[f64; 2]>,

    #[serde(default)]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnnotationDef {
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default)]
    pub text: Option<String>,

    #[serde(default)]
    pub file: Option<PathBuf>,

    /// Template for time annotations; see [`crate::Annotation`].
    #[serde(default)]
    pub format: Option<String>,

    #[serde(default)]
    pub precision: Option<usize>,

    /// Normalised `[x, y]` position within the frame.
    #[serde(default)]
    pub position: Option<[f64; 2]>,
}
