// Record store path utilities.
// Lays out one JSON file per (collection, partition key) under the data directory.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

/// Platform data directory (~/.local/share/postcache on Linux).
pub fn default_data_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "postcache").map(|dirs| dirs.data_dir().to_path_buf())
}

/// Directory holding every partition of a collection.
pub fn collection_dir(root: &Path, collection: &str) -> PathBuf {
    root.join(collection)
}

/// File holding all records stored under `key`.
pub fn partition_path(root: &Path, collection: &str, key: u64) -> PathBuf {
    collection_dir(root, collection).join(format!("{}.json", key))
}
