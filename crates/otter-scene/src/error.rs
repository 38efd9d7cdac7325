use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading a scene or planning its frames.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("failed to read scene `{path}`")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid scene file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("unknown {category} type `{kind}` (expected one of: {expected})")]
    UnknownKind {
        category: &'static str,
        kind: String,
        expected: String,
    },

    #[error("{kind} requires parameter `{parameter}`")]
    MissingParameter {
        kind: &'static str,
        parameter: &'static str,
    },

    #[error("{kind} parameter `{parameter}` is invalid: {reason}")]
    InvalidParameter {
        kind: &'static str,
        parameter: &'static str,
        reason: String,
    },

    #[error("failed to load data from `{path}`")]
    Data {
        path: PathBuf,
        #[source]
        source: otter_data::Error,
    },

    #[error(transparent)]
    Time(#[from] otter_core::Error),

    #[error("scene has no time data: set `times` or add a plot line")]
    NoTimeData,
}

impl SceneError {
    pub(crate) fn invalid(
        kind: &'static str,
        parameter: &'static str,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidParameter {
            kind,
            parameter,
            reason: reason.into(),
        }
    }
}
