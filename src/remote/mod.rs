// Remote API module.
// Client, trait seam, and types for the upstream users/posts provider.

pub mod client;
pub mod endpoints;
pub mod source;
pub mod types;

pub use client::{DEFAULT_BASE_URL, PlaceholderClient};
pub use source::RemoteSource;
pub use types::*;
