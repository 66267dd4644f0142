// Cache module for persisted, time-bounded data.
// Key-value stores plus the read-through TTL cache built on them.

pub mod paths;
pub mod store;
pub mod timed;

pub use paths::cache_dir;
pub use store::{FileStore, KvStore, MemoryStore};
pub use timed::{Fetched, Source, TimedCache};
