use crate::error::AppError;
use crate::loader;
use crate::loader::records::LoadReport;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

struct CacheEntry {
    source: PathBuf,
    modified: SystemTime,
    report: Arc<LoadReport>,
}

/// Single-slot cache over the loaded bout table. A fetch for the same
/// file with an unchanged mtime reuses the parsed table; anything else
/// reloads from disk.
#[derive(Default)]
pub struct TableCache {
    slot: Option<CacheEntry>,
}

impl TableCache {
    pub fn new() -> Self {
        TableCache { slot: None }
    }

    pub fn fetch(&mut self, path: &Path) -> Result<Arc<LoadReport>, AppError> {
        let source = canonical_source(path)?;
        let modified = source_mtime(&source)?;

        if let Some(entry) = &self.slot {
            if entry.source == source && entry.modified == modified {
                return Ok(Arc::clone(&entry.report));
            }
        }

        let report = Arc::new(loader::load(&source)?);
        self.slot = Some(CacheEntry {
            source,
            modified,
            report: Arc::clone(&report),
        });
        Ok(report)
    }

    pub fn invalidate(&mut self) {
        self.slot = None;
    }
}

fn canonical_source(path: &Path) -> Result<PathBuf, AppError> {
    fs::canonicalize(path).map_err(|_| AppError::FileNotFound(path.to_path_buf()))
}

fn source_mtime(path: &Path) -> Result<SystemTime, AppError> {
    let metadata = fs::metadata(path).map_err(|_| AppError::FileNotFound(path.to_path_buf()))?;
    metadata
        .modified()
        .map_err(|e| AppError::ParseError(format!("cannot stat {}: {}", path.display(), e)))
}
