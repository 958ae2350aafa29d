//! Read-through dataset cache keyed by file path.
//!
//! Source files are immutable in normal operation, so a hit serves the parsed
//! dataset without re-parsing. Each entry records a blake3 hash of the file
//! bytes; if the file on disk changes between requests the entry is re-read
//! rather than served stale. The cache is an explicit object owned by its
//! session (TUI worker or CLI invocation), never a process global.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::load::{self, DataError};
use crate::domain::{DemandRecord, RawCombinedRecord, StationRecord};

#[derive(Debug, Clone)]
enum CachedData {
    Stations(Arc<Vec<StationRecord>>),
    Demand(Arc<Vec<DemandRecord>>),
    Combined(Arc<Vec<RawCombinedRecord>>),
}

#[derive(Debug)]
struct Entry {
    hash: blake3::Hash,
    data: CachedData,
}

/// Read-through cache over the CSV loading layer.
#[derive(Debug, Default)]
pub struct DataCache {
    entries: HashMap<PathBuf, Entry>,
}

impl DataCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Station dataset at `path`, parsed at most once per file content.
    pub fn stations(&mut self, path: &Path) -> Result<Arc<Vec<StationRecord>>, DataError> {
        let (bytes, hash) = self.read_and_hash(path)?;
        if let Some(Entry {
            data: CachedData::Stations(data),
            hash: cached,
        }) = self.entries.get(path)
        {
            if *cached == hash {
                return Ok(Arc::clone(data));
            }
        }
        let data = Arc::new(load::parse_stations(&bytes, path)?);
        self.insert(path, hash, CachedData::Stations(Arc::clone(&data)));
        Ok(data)
    }

    /// Demand dataset at `path`.
    pub fn demand(&mut self, path: &Path) -> Result<Arc<Vec<DemandRecord>>, DataError> {
        let (bytes, hash) = self.read_and_hash(path)?;
        if let Some(Entry {
            data: CachedData::Demand(data),
            hash: cached,
        }) = self.entries.get(path)
        {
            if *cached == hash {
                return Ok(Arc::clone(data));
            }
        }
        let data = Arc::new(load::parse_demand(&bytes, path)?);
        self.insert(path, hash, CachedData::Demand(Arc::clone(&data)));
        Ok(data)
    }

    /// Combined weather+demand dataset at `path`.
    pub fn combined(&mut self, path: &Path) -> Result<Arc<Vec<RawCombinedRecord>>, DataError> {
        let (bytes, hash) = self.read_and_hash(path)?;
        if let Some(Entry {
            data: CachedData::Combined(data),
            hash: cached,
        }) = self.entries.get(path)
        {
            if *cached == hash {
                return Ok(Arc::clone(data));
            }
        }
        let data = Arc::new(load::parse_combined(&bytes, path)?);
        self.insert(path, hash, CachedData::Combined(Arc::clone(&data)));
        Ok(data)
    }

    fn read_and_hash(&self, path: &Path) -> Result<(Vec<u8>, blake3::Hash), DataError> {
        let bytes = std::fs::read(path).map_err(|source| DataError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let hash = blake3::hash(&bytes);
        Ok((bytes, hash))
    }

    fn insert(&mut self, path: &Path, hash: blake3::Hash, data: CachedData) {
        self.entries.insert(path.to_path_buf(), Entry { hash, data });
    }
}
