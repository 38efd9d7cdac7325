//! Scene descriptions and frame planning for Otter.
//!
//! A scene file lists viewports (mesh results, time-series plots) and
//! annotations (text, images, elapsed time). Loading it builds typed objects
//! through a fixed registry of kinds and derives the session's global time
//! axis. Planning then evaluates every viewport and annotation at each frame
//! time and returns serialisable [`FramePlan`]s for the rendering engine.
//!
//! ```no_run
//! use otter_scene::Scene;
//!
//! let scene = Scene::from_path("movie.toml")?;
//! for plan in scene.plan_movie(None)? {
//!     println!("frame {} at t = {}", plan.index, plan.time);
//! }
//! # Ok::<(), otter_scene::SceneError>(())
//! ```

mod annotation;
pub mod def;
mod error;
mod kind;
mod plan;
mod scene;
mod store;
mod viewport;

pub use annotation::{Annotation, AnnotationFrame};
pub use error::SceneError;
pub use kind::{AnnotationKind, ViewportKind};
pub use plan::FramePlan;
pub use scene::Scene;
pub use viewport::{
    Colorbar, ColorbarLocation, ExodusFrame, ExodusViewport, LineFrame, PlotFrame, PlotLine,
    PlotViewport, Viewport, ViewportFrame,
};
