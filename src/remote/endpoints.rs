// Remote API endpoint functions.
// Typed fetches for users and posts.

use serde_json::Value;

use crate::error::Result;

use super::client::PlaceholderClient;
use super::types::{RemotePost, RemoteUser};

impl PlaceholderClient {
    /// Get a single user.
    pub async fn get_user(&self, id: u64) -> Result<RemoteUser> {
        let response = self.get(&format!("/users/{}", id)).await?;
        let user: RemoteUser = response.json().await?;
        Ok(user)
    }

    /// Get every user, untouched.
    pub async fn get_users(&self) -> Result<Vec<Value>> {
        let response = self.get("/users").await?;
        let users: Vec<Value> = response.json().await?;
        Ok(users)
    }

    /// Get posts owned by a user.
    pub async fn get_posts_for_user(&self, user_id: u64) -> Result<Vec<RemotePost>> {
        let params = [("userId", user_id.to_string())];
        let response = self.get_with_params("/posts", &params).await?;
        let posts: Vec<RemotePost> = response.json().await?;
        Ok(posts)
    }
}
