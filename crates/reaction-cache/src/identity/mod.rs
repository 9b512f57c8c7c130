//! Identity cache for reaction posts and notification threads

mod identity_cache;

pub use identity_cache::{create_shared_cache, CacheStats, IdentityCache, SharedIdentityCache};
