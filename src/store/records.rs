// Record types persisted by the store.
// Flat rows: nested remote fields are resolved before they get here.

use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// A row type the store knows how to file.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// Collection (directory) name.
    const COLLECTION: &'static str;

    /// At most one row per partition key.
    const UNIQUE_KEY: bool = false;

    /// Rows sharing a partition key are written and read together.
    fn partition_key(&self) -> u64;
}

/// Cached user, keyed by its remote id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub website: String,
    /// From the remote `address.city`.
    pub city: String,
    /// From the remote `company.name`.
    pub company: String,
}

impl Record for User {
    const COLLECTION: &'static str = "users";
    const UNIQUE_KEY: bool = true;

    fn partition_key(&self) -> u64 {
        self.id
    }
}

/// Cached post, partitioned by owning user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub user_id: u64,
    pub title: String,
    pub body: String,
    /// Annotation supplied by whoever populated the cache, not by the remote.
    pub company: Option<String>,
}

impl Post {
    /// Column headers in stored field order.
    pub const COLUMNS: [&'static str; 4] = ["userId", "title", "body", "company"];
}

impl Record for Post {
    const COLLECTION: &'static str = "posts";

    fn partition_key(&self) -> u64 {
        self.user_id
    }
}
