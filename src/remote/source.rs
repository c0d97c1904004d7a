//! RemoteSource trait and its HTTP implementation.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

use super::client::PlaceholderClient;
use super::types::{RemotePost, RemoteUser};

/// Read-only source of users and posts.
///
/// Implementations are pure transports: no retry and no caching. A key the
/// source cannot resolve is `CacheError::NotFound`; anything else that goes
/// wrong is a remote failure.
#[async_trait]
pub trait RemoteSource: Send + Sync {
    /// Fetch one user by id.
    async fn fetch_user(&self, id: u64) -> Result<RemoteUser>;

    /// Fetch every post owned by `user_id`.
    async fn fetch_posts(&self, user_id: u64) -> Result<Vec<RemotePost>>;

    /// Fetch the full user listing as served.
    async fn list_users(&self) -> Result<Vec<Value>>;
}

#[async_trait]
impl RemoteSource for PlaceholderClient {
    async fn fetch_user(&self, id: u64) -> Result<RemoteUser> {
        self.get_user(id).await
    }

    async fn fetch_posts(&self, user_id: u64) -> Result<Vec<RemotePost>> {
        self.get_posts_for_user(user_id).await
    }

    async fn list_users(&self) -> Result<Vec<Value>> {
        self.get_users().await
    }
}
