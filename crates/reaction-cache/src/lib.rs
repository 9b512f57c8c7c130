//! # reaction-cache
//!
//! In-process caching layer that cross-references reacted-to messages with
//! their reaction posts and notification threads.
//!
//! The cache is advisory. It starts empty on every run and a miss only means
//! "no reaction post known yet".
//!
//! ## Example
//!
//! ```ignore
//! use reaction_cache::{create_shared_cache, IdentityCache};
//!
//! let cache = create_shared_cache();
//! cache.register_post(target, &post_envelope);
//! let post_id = cache.reaction_post_for(target);
//! ```

pub mod identity;

pub use identity::{create_shared_cache, CacheStats, IdentityCache, SharedIdentityCache};
