// Record store module.
// Durable local copies of users and posts fetched from the remote source.

pub mod disk;
pub mod paths;
pub mod records;

pub use disk::{RecordStore, Stored};
pub use records::{Post, Record, User};
