use serde::Serialize;

use crate::{AnnotationFrame, ViewportFrame};

/// Everything the rendering engine needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FramePlan {
    /// Position of the frame in the output sequence.
    pub index: usize,
    /// Frame time in seconds.
    pub time: f64,
    /// Index of the last global time at or before `time`.
    pub time_index: usize,
    /// `time` expressed in `unit`.
    pub display_time: f64,
    pub unit: &'static str,
    pub viewports: Vec<ViewportFrame>,
    pub annotations: Vec<AnnotationFrame>,
}
