//! JSON persistence
//!
//! A mapping is stored as a JSON object whose keys are decimal logical page numbers
//! and whose values are physical page numbers, in ascending logical order.
//! [`MappingStore`] places those files under a case directory and lets callers
//! reuse a mapping built on an earlier run.

use crate::mapping::builder::PageMapping;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Error that can occur when reading or writing mappings
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistError {
    Io(String),
    Json(String),
}

impl fmt::Display for PersistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistError::Io(msg) => write!(f, "IO error: {}", msg),
            PersistError::Json(msg) => write!(f, "Invalid mapping JSON: {}", msg),
        }
    }
}

impl std::error::Error for PersistError {}

impl From<std::io::Error> for PersistError {
    fn from(err: std::io::Error) -> Self {
        PersistError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for PersistError {
    fn from(err: serde_json::Error) -> Self {
        PersistError::Json(err.to_string())
    }
}

/// Pretty-printed JSON with two-space indentation.
pub fn mapping_to_json(mapping: &PageMapping) -> Result<String, PersistError> {
    Ok(serde_json::to_string_pretty(mapping)?)
}

pub fn mapping_from_json(source: &str) -> Result<PageMapping, PersistError> {
    Ok(serde_json::from_str(source)?)
}

pub fn save_mapping<P: AsRef<Path>>(path: P, mapping: &PageMapping) -> Result<(), PersistError> {
    let json = mapping_to_json(mapping)?;
    fs::write(path, json)?;
    Ok(())
}

pub fn load_mapping<P: AsRef<Path>>(path: P) -> Result<PageMapping, PersistError> {
    let source = fs::read_to_string(path)?;
    mapping_from_json(&source)
}

/// Mapping files of one case: `<case_dir>/<dir_name>/<document stem><suffix>.json`
#[derive(Debug, Clone)]
pub struct MappingStore {
    dir: PathBuf,
    suffix: String,
}

impl MappingStore {
    pub fn new(case_dir: impl AsRef<Path>, dir_name: &str, suffix: &str) -> Self {
        Self {
            dir: case_dir.as_ref().join(dir_name),
            suffix: suffix.to_string(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn ensure_dir(&self) -> Result<(), PersistError> {
        fs::create_dir_all(&self.dir)?;
        Ok(())
    }

    /// Where the mapping for `document` lives; keyed by the document's file stem.
    pub fn path_for(&self, document: &Path) -> PathBuf {
        let stem = document
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string());
        self.dir.join(format!("{}{}.json", stem, self.suffix))
    }

    /// The stored mapping for `document`, if one exists.
    pub fn load_cached(&self, document: &Path) -> Result<Option<PageMapping>, PersistError> {
        let path = self.path_for(document);
        if !path.exists() {
            return Ok(None);
        }
        log::debug!("reusing cached mapping {}", path.display());
        load_mapping(&path).map(Some)
    }

    /// Saves the mapping for `document`, creating the directory if needed.
    pub fn save(&self, document: &Path, mapping: &PageMapping) -> Result<PathBuf, PersistError> {
        self.ensure_dir()?;
        let path = self.path_for(document);
        save_mapping(&path, mapping)?;
        Ok(path)
    }
}
