use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use otter_core::TimeSeries;
use otter_data::{DEFAULT_TIME_COLUMN, PostprocessorData};

use crate::SceneError;

/// Loads postprocessor files relative to a scene, reading each file once.
#[derive(Debug)]
pub(crate) struct DataStore {
    base_dir: PathBuf,
    time_column: String,
    files: HashMap<PathBuf, PostprocessorData>,
}

impl DataStore {
    pub(crate) fn new(base_dir: impl Into<PathBuf>, time_column: Option<&str>) -> Self {
        Self {
            base_dir: base_dir.into(),
            time_column: time_column.unwrap_or(DEFAULT_TIME_COLUMN).to_string(),
            files: HashMap::new(),
        }
    }

    /// Resolves `path` against the scene directory.
    pub(crate) fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    /// Returns one column of a postprocessor file as a time series.
    pub(crate) fn series(&mut self, file: &Path, column: &str) -> Result<TimeSeries, SceneError> {
        let path = self.resolve(file);

        if !self.files.contains_key(&path) {
            let data = PostprocessorData::from_path(&path, &self.time_column).map_err(|source| {
                SceneError::Data {
                    path: path.clone(),
                    source,
                }
            })?;
            self.files.insert(path.clone(), data);
        }

        self.files[&path]
            .series(column)
            .map_err(|source| SceneError::Data { path, source })
    }
}
