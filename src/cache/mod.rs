pub mod attempts;
pub mod bundle_cache;
pub mod store;

pub use attempts::AttemptTracker;
pub use bundle_cache::{CacheKeys, CacheStore};
pub use store::{FileStore, KeyValueStore, MemoryStore};
