// postcache: cache-aside service for remote users and posts.
// Serves from a local record store, fetching from the remote on first request.

pub mod config;
pub mod error;
pub mod export;
pub mod remote;
pub mod server;
pub mod store;
pub mod sync;

pub use config::Config;
pub use error::{CacheError, ErrorKind, Result};
pub use server::build_router;
