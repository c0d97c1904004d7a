// Cache-aside synchronization module.
// Population policies, per-key locking, and remote-to-store normalization.

pub mod coordinator;
pub mod locks;
pub mod normalize;

pub use coordinator::{Coordinator, Population, UserDetail};
pub use locks::KeyedLocks;
