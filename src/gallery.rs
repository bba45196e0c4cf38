//! Named drawing records stored as JSON files in a gallery directory.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use thiserror::Error;

use crate::model::DrawingRecord;

#[derive(Debug, Error)]
pub enum GalleryError {
    #[error("no saved drawing named {0:?}")]
    NotFound(String),
    #[error("gallery storage failed: {0}")]
    Storage(#[from] io::Error),
    #[error("saved drawing {0:?} is malformed: {1}")]
    Malformed(String, serde_json::Error),
}

/// Snapshot storage capability. `fetch` returns exactly what `save` stored
/// under that name; `list` is stable across calls absent mutation.
pub trait Gallery {
    fn save(&mut self, record: &DrawingRecord) -> Result<String, GalleryError>;
    fn list(&self) -> Result<Vec<String>, GalleryError>;
    fn fetch(&self, name: &str) -> Result<DrawingRecord, GalleryError>;
}

pub struct DirGallery {
    dir: PathBuf,
}

impl DirGallery {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn record_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.json"))
    }
}

impl Gallery for DirGallery {
    fn save(&mut self, record: &DrawingRecord) -> Result<String, GalleryError> {
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(record)
            .map_err(|e| GalleryError::Malformed(record.filename.clone(), e))?;
        fs::write(self.record_path(&record.filename), json)?;
        Ok(record.filename.clone())
    }

    fn list(&self) -> Result<Vec<String>, GalleryError> {
        if !self.dir.is_dir() {
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    fn fetch(&self, name: &str) -> Result<DrawingRecord, GalleryError> {
        let json = match fs::read_to_string(self.record_path(name)) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(GalleryError::NotFound(name.to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        serde_json::from_str(&json).map_err(|e| GalleryError::Malformed(name.to_string(), e))
    }
}

/// Record name derived from the wall clock, to the second. Two saves inside
/// the same second collide and the later one overwrites.
pub fn timestamp_name() -> String {
    let since_epoch = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    let secs = since_epoch.as_secs();
    let days = secs / 86400;
    let years_since_1970 = days / 365;
    let year = 1970 + years_since_1970;
    let remaining_days = days % 365;
    let month = (remaining_days / 30) + 1;
    let day = (remaining_days % 30) + 1;
    let day_secs = secs % 86400;
    let hour = day_secs / 3600;
    let minute = (day_secs % 3600) / 60;
    let second = day_secs % 60;
    format!("drawing-{year:04}-{month:02}-{day:02}-{hour:02}{minute:02}{second:02}")
}
