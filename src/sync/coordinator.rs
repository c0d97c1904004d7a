// Cache-aside coordinator.
// Decides when to serve from the record store and when to go to the remote.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::{CacheError, Result};
use crate::remote::{RemotePost, RemoteSource};
use crate::store::{Post, Record, RecordStore, User};

use super::locks::KeyedLocks;
use super::normalize;

/// Outcome of a population request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Population {
    /// True when the key was already cached and nothing was fetched.
    #[serde(rename = "exists")]
    pub already_existed: bool,
}

impl Population {
    pub fn existing() -> Self {
        Self {
            already_existed: true,
        }
    }

    pub fn populated() -> Self {
        Self {
            already_existed: false,
        }
    }
}

/// Cached user plus that user's posts as the remote serves them right now.
#[derive(Debug, Clone, Serialize)]
pub struct UserDetail {
    pub user: User,
    pub posts: Vec<RemotePost>,
}

/// Cache-aside policies for users and posts over one store and one remote.
pub struct Coordinator {
    store: RecordStore,
    remote: Arc<dyn RemoteSource>,
    locks: KeyedLocks,
}

impl Coordinator {
    pub fn new(store: RecordStore, remote: Arc<dyn RemoteSource>) -> Self {
        Self {
            store,
            remote,
            locks: KeyedLocks::new(),
        }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Serve a user from the store, fetching and storing it on a miss.
    pub async fn ensure_user_cached(&self, id: u64) -> Result<(User, Population)> {
        let _guard = self.locks.lock(User::COLLECTION, id).await;

        if let Some(user) = self.store.get_by_key::<User>(id)? {
            debug!(user_id = id, "user cache hit");
            return Ok((user, Population::existing()));
        }

        info!(user_id = id, "user cache miss, fetching from remote");
        let remote = self.remote.fetch_user(id).await.inspect_err(|e| {
            warn!(user_id = id, error = %e, "failed to fetch user");
        })?;

        let user = normalize::flatten_user(id, remote);
        self.store.bulk_insert(std::slice::from_ref(&user))?;

        Ok((user, Population::populated()))
    }

    /// Cache every post owned by `user_id`, tagging each with `annotation`.
    ///
    /// Only checks whether the key has any rows; cached rows are not read
    /// back. A failed fetch writes nothing.
    pub async fn populate_posts(
        &self,
        user_id: u64,
        annotation: Option<&str>,
    ) -> Result<Population> {
        let _guard = self.locks.lock(Post::COLLECTION, user_id).await;

        if self.store.exists::<Post>(user_id)? {
            debug!(user_id, "posts already cached");
            return Ok(Population::existing());
        }

        let remote = self.remote.fetch_posts(user_id).await.inspect_err(|e| {
            warn!(user_id, error = %e, "failed to fetch posts");
        })?;

        let posts = normalize::tag_posts(user_id, remote, annotation);
        self.store.bulk_insert(&posts)?;
        info!(
            user_id,
            count = posts.len(),
            annotation = annotation.unwrap_or_default(),
            "cached posts"
        );

        Ok(Population::populated())
    }

    /// Cached user with live posts. Never populates the user and never reads
    /// the post cache.
    pub async fn user_detail(&self, id: u64) -> Result<UserDetail> {
        let user = self
            .store
            .get_by_key::<User>(id)?
            .ok_or_else(|| CacheError::NotFound(format!("user {}", id)))?;

        let posts = self.remote.fetch_posts(id).await?;

        Ok(UserDetail { user, posts })
    }

    /// Remote user listing, passed through as served.
    pub async fn list_remote_users(&self) -> Result<Vec<Value>> {
        self.remote.list_users().await
    }
}
