//! Durable key/value storage and the TTL response cache.

mod cache;
mod clock;
mod codec;
mod file;
mod key;
mod memory;

pub use cache::{CacheSource, Cached, TtlCache, DEFAULT_TTL};
pub use clock::{ManualClock, SystemClock};
pub use codec::CacheEntry;
pub use file::FileStore;
pub use key::CacheKey;
pub use memory::MemoryStore;
