use std::path::PathBuf;

use otter_core::RenderContext;
use serde::Serialize;

use crate::{AnnotationKind, SceneError, def::AnnotationDef, store::DataStore};

const DEFAULT_TIME_FORMAT: &str = "Time: {time} {unit}";
const DEFAULT_PRECISION: usize = 2;
/// Digits past 17 add nothing to an `f64`.
const MAX_PRECISION: usize = 17;

/// Overlay content drawn on top of every frame.
///
/// Time annotations expand a template per frame. The placeholders are:
///
/// - `{time}` — current time in the scene's display unit
/// - `{unit}` — the display unit label
/// - `{step}` — index of the current global time step
#[derive(Debug, Clone, PartialEq)]
pub enum Annotation {
    Text {
        text: String,
        position: Option<[f64; 2]>,
    },
    Image {
        file: PathBuf,
        position: Option<[f64; 2]>,
    },
    Time {
        format: String,
        precision: usize,
        position: Option<[f64; 2]>,
    },
}

/// What an annotation shows in one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum AnnotationFrame {
    Text {
        text: String,
        position: Option<[f64; 2]>,
    },
    Image {
        file: PathBuf,
        position: Option<[f64; 2]>,
    },
    Time {
        text: String,
        position: Option<[f64; 2]>,
    },
}

impl Annotation {
    /// Builds the annotation named by `def.kind`.
    pub(crate) fn from_def(def: &AnnotationDef, store: &DataStore) -> Result<Self, SceneError> {
        let kind: AnnotationKind = def.kind.parse()?;
        let position = validate_position(kind, def.position)?;
        let name = kind.name();

        let annotation = match kind {
            AnnotationKind::Text => Self::Text {
                text: def.text.clone().ok_or(SceneError::MissingParameter {
                    kind: name,
                    parameter: "text",
                })?,
                position,
            },
            AnnotationKind::Image => Self::Image {
                file: def
                    .file
                    .as_deref()
                    .map(|file| store.resolve(file))
                    .ok_or(SceneError::MissingParameter {
                        kind: name,
                        parameter: "file",
                    })?,
                position,
            },
            AnnotationKind::Time => Self::Time {
                format: def
                    .format
                    .clone()
                    .unwrap_or_else(|| DEFAULT_TIME_FORMAT.to_string()),
                precision: validate_precision(def.precision)?,
                position,
            },
        };

        Ok(annotation)
    }

    #[must_use]
    pub fn kind(&self) -> AnnotationKind {
        match self {
            Self::Text { .. } => AnnotationKind::Text,
            Self::Image { .. } => AnnotationKind::Image,
            Self::Time { .. } => AnnotationKind::Time,
        }
    }

    /// Renders the annotation for the context's current time.
    #[must_use]
    pub fn frame(&self, ctx: &RenderContext) -> AnnotationFrame {
        match self {
            Self::Text { text, position } => AnnotationFrame::Text {
                text: text.clone(),
                position: *position,
            },
            Self::Image { file, position } => AnnotationFrame::Image {
                file: file.clone(),
                position: *position,
            },
            Self::Time {
                format,
                precision,
                position,
            } => {
                let (time, unit) = ctx.display_time();
                let precision = *precision;
                let text = format
                    .replace("{time}", &format!("{time:.precision$}"))
                    .replace("{unit}", unit)
                    .replace("{step}", &ctx.time_index().to_string());

                AnnotationFrame::Time {
                    text,
                    position: *position,
                }
            }
        }
    }
}

fn validate_precision(precision: Option<usize>) -> Result<usize, SceneError> {
    match precision {
        None => Ok(DEFAULT_PRECISION),
        Some(digits) if digits <= MAX_PRECISION => Ok(digits),
        Some(digits) => Err(SceneError::invalid(
            AnnotationKind::Time.name(),
            "precision",
            format!("{digits} exceeds the maximum of {MAX_PRECISION} decimal places"),
        )),
    }
}

fn validate_position(
    kind: AnnotationKind,
    position: Option<[f64; 2]>,
) -> Result<Option<[f64; 2]>, SceneError> {
    match position {
        Some([x, y]) if !((0.0..=1.0).contains(&x) && (0.0..=1.0).contains(&y)) => {
            Err(SceneError::invalid(
                kind.name(),
                "position",
                format!("[{x}, {y}] must lie within [0, 1] on both axes"),
            ))
        }
        _ => Ok(position),
    }
}

#[cfg(test)]
mod tests {
    use otter_core::{GlobalTimeAxis, TimeUnit};

    use super::*;

    fn ctx(unit: TimeUnit, time: f64) -> RenderContext {
        let axis = GlobalTimeAxis::new(vec![0.0, 3600.0, 7200.0]).unwrap();
        RenderContext::new(axis, unit).at_time(time).unwrap()
    }

    fn def(kind: &str) -> AnnotationDef {
        AnnotationDef {
            kind: kind.into(),
            ..AnnotationDef::default()
        }
    }

    #[test]
    fn time_annotation_uses_default_format() {
        let store = DataStore::new(".", None);
        let annotation = Annotation::from_def(&def("Time"), &store).unwrap();

        let frame = annotation.frame(&ctx(TimeUnit::Hours, 5400.0));
        assert_eq!(
            frame,
            AnnotationFrame::Time {
                text: "Time: 1.50 hours".into(),
                position: None
            }
        );
    }

    #[test]
    fn time_annotation_custom_template() {
        let store = DataStore::new(".", None);
        let annotation = Annotation::from_def(
            &AnnotationDef {
                format: Some("t = {time} {unit} (step {step})".into()),
                precision: Some(0),
                position: Some([0.1, 0.9]),
                ..def("Time")
            },
            &store,
        )
        .unwrap();

        let AnnotationFrame::Time { text, position } =
            annotation.frame(&ctx(TimeUnit::Minutes, 7200.0))
        else {
            panic!("expected a time annotation");
        };
        assert_eq!(text, "t = 120 minutes (step 2)");
        assert_eq!(position, Some([0.1, 0.9]));
    }

    #[test]
    fn text_requires_text() {
        let store = DataStore::new(".", None);
        assert!(matches!(
            Annotation::from_def(&def("Text"), &store),
            Err(SceneError::MissingParameter {
                kind: "Text",
                parameter: "text"
            })
        ));
    }

    #[test]
    fn image_path_is_resolved() {
        let store = DataStore::new("/scenes", None);
        let annotation = Annotation::from_def(
            &AnnotationDef {
                file: Some("logo.png".into()),
                ..def("Image")
            },
            &store,
        )
        .unwrap();

        assert_eq!(annotation.kind(), AnnotationKind::Image);
        assert_eq!(
            annotation.frame(&ctx(TimeUnit::Seconds, 0.0)),
            AnnotationFrame::Image {
                file: PathBuf::from("/scenes/logo.png"),
                position: None
            }
        );
    }

    #[test]
    fn rejects_position_outside_frame() {
        let store = DataStore::new(".", None);
        let result = Annotation::from_def(
            &AnnotationDef {
                text: Some("hello".into()),
                position: Some([1.5, 0.5]),
                ..def("Text")
            },
            &store,
        );

        assert!(matches!(
            result,
            Err(SceneError::InvalidParameter {
                parameter: "position",
                ..
            })
        ));
    }

    #[test]
    fn unknown_annotation_kind() {
        let store = DataStore::new(".", None);
        assert!(matches!(
            Annotation::from_def(&def("Colorbar"), &store),
            Err(SceneError::UnknownKind {
                category: "annotation",
                ..
            })
        ));
    }

    #[test]
    fn rejects_excessive_precision() {
        let store = DataStore::new(".", None);
        let result = Annotation::from_def(
            &AnnotationDef {
                precision: Some(70_000),
                ..def("Time")
            },
            &store,
        );

        assert!(matches!(
            result,
            Err(SceneError::InvalidParameter {
                kind: "Time",
                parameter: "precision",
                ..
            })
        ));
    }

    #[test]
    fn accepts_largest_precision() {
        let store = DataStore::new(".", None);
        let annotation = Annotation::from_def(
            &AnnotationDef {
                format: Some("{time}".into()),
                precision: Some(MAX_PRECISION),
                ..def("Time")
            },
            &store,
        )
        .unwrap();

        let AnnotationFrame::Time { text, .. } = annotation.frame(&ctx(TimeUnit::Seconds, 3600.0))
        else {
            panic!("expected a time annotation");
        };
        assert_eq!(text, "3600.00000000000000000");
    }
}
