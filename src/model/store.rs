use std::fs;
use std::path::{Path, PathBuf};

use crate::ai::ValueTable;
use crate::error::ModelError;

/// Persists learned value tables as JSON on disk.
///
/// Saves go through a temporary file in the target directory followed by a
/// rename, so a crash mid-write never leaves a truncated model behind.
pub struct ModelStore {
    path: PathBuf,
}

impl ModelStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ModelStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn save(&self, table: &ValueTable) -> Result<(), ModelError> {
        let json = serde_json::to_string_pretty(table)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| ModelError::Write {
                    path: self.path.clone(),
                    source,
                })?;
            }
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|source| ModelError::Write {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &self.path).map_err(|source| ModelError::Write {
            path: self.path.clone(),
            source,
        })?;
        Ok(())
    }

    pub fn load(&self) -> Result<ValueTable, ModelError> {
        if !self.path.exists() {
            return Err(ModelError::NotFound(self.path.clone()));
        }
        let json = fs::read_to_string(&self.path).map_err(|source| ModelError::Read {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| ModelError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Load the saved table, or start from an empty one when no file exists
    /// yet. Corrupt files still fail.
    pub fn load_or_default(&self) -> Result<ValueTable, ModelError> {
        match self.load() {
            Ok(table) => Ok(table),
            Err(ModelError::NotFound(_)) => Ok(ValueTable::new()),
            Err(err) => Err(err),
        }
    }
}
