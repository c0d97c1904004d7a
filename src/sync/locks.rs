// Per-key population locks.
// Serializes check-then-write for one (collection, key) without a global lock.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

type LockKey = (&'static str, u64);

/// Async mutexes keyed by collection and record key, created on demand.
#[derive(Debug, Default)]
pub struct KeyedLocks {
    locks: DashMap<LockKey, Arc<Mutex<()>>>,
}

/// Held for the duration of one population. Releases on drop.
pub struct KeyGuard<'a> {
    owner: &'a KeyedLocks,
    key: LockKey,
    guard: Option<OwnedMutexGuard<()>>,
}

impl KeyedLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `(collection, key)`.
    pub async fn lock(&self, collection: &'static str, key: u64) -> KeyGuard<'_> {
        let key = (collection, key);
        let mutex = self.locks.entry(key).or_default().value().clone();
        let guard = mutex.lock_owned().await;

        KeyGuard {
            owner: self,
            key,
            guard: Some(guard),
        }
    }

    /// Number of keys currently locked or awaited.
    pub fn active(&self) -> usize {
        self.locks.len()
    }
}

impl Drop for KeyGuard<'_> {
    fn drop(&mut self) {
        self.guard.take();
        // Only the map's own reference left: nobody holds or waits on it.
        self.owner
            .locks
            .remove_if(&self.key, |_, mutex| Arc::strong_count(mutex) == 1);
    }
}
