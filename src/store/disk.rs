// Record store backed by JSON files.
// Handles partition reads, appends, and atomic replacement on disk.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CacheError, Result};

use super::paths;
use super::records::Record;

/// On-disk envelope for one partition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stored<T> {
    /// The stored rows.
    pub rows: T,
    /// When the partition was last written.
    pub stored_at: DateTime<Utc>,
}

impl<T> Stored<T> {
    pub fn new(rows: T) -> Self {
        Self {
            rows,
            stored_at: Utc::now(),
        }
    }
}

/// Durable record store rooted at a data directory.
///
/// Every (collection, key) pair lives in its own file, so writers for
/// unrelated keys never touch the same data. Writers for the *same* key must
/// be serialized by the caller.
#[derive(Debug, Clone)]
pub struct RecordStore {
    root: PathBuf,
}

impl RecordStore {
    /// Open (creating if needed) a store at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Point lookup. Returns the first row stored under `key`.
    pub fn get_by_key<R: Record>(&self, key: u64) -> Result<Option<R>> {
        Ok(self
            .read_partition::<R>(key)?
            .and_then(|stored| stored.rows.into_iter().next()))
    }

    /// All rows stored under `key`, in insertion order.
    pub fn query_by_key<R: Record>(&self, key: u64) -> Result<Vec<R>> {
        Ok(self
            .read_partition::<R>(key)?
            .map(|stored| stored.rows)
            .unwrap_or_default())
    }

    /// Whether any row is stored under `key`. Does not read the rows.
    pub fn exists<R: Record>(&self, key: u64) -> Result<bool> {
        let path = paths::partition_path(&self.root, R::COLLECTION, key);
        Ok(path.try_exists()?)
    }

    /// Append records. No dedupe or upsert, except that collections with a
    /// unique key reject a second row for the same key.
    pub fn bulk_insert<R: Record>(&self, records: &[R]) -> Result<()> {
        let mut partitions: BTreeMap<u64, Vec<R>> = BTreeMap::new();
        for record in records {
            partitions
                .entry(record.partition_key())
                .or_default()
                .push(record.clone());
        }

        for (key, rows) in partitions {
            let mut existing = self.query_by_key::<R>(key)?;

            if R::UNIQUE_KEY && (!existing.is_empty() || rows.len() > 1) {
                return Err(CacheError::Duplicate {
                    collection: R::COLLECTION,
                    key,
                });
            }

            existing.extend(rows);
            self.write_partition(key, &existing)?;
        }

        Ok(())
    }

    fn read_partition<R: Record>(&self, key: u64) -> Result<Option<Stored<Vec<R>>>> {
        let path = paths::partition_path(&self.root, R::COLLECTION, key);
        if !path.try_exists()? {
            return Ok(None);
        }

        let contents = fs::read_to_string(&path)?;
        let stored: Stored<Vec<R>> = serde_json::from_str(&contents)?;
        Ok(Some(stored))
    }

    fn write_partition<R: Record>(&self, key: u64, rows: &[R]) -> Result<()> {
        let path = paths::partition_path(&self.root, R::COLLECTION, key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_vec_pretty(&Stored::new(rows))?;

        // Readers see either the old partition or the new one, never a prefix.
        let temp_path = path.with_extension("tmp");
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(&json)?;
        file.sync_all()?;
        fs::rename(&temp_path, &path)?;

        Ok(())
    }
}
