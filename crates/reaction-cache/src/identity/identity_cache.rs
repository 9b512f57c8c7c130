//! Identity cache storage.
//!
//! Maps a reacted-to message to its reaction post, the last known envelope of
//! that post, and the forwarded copy that notifications are threaded under.
//! One reader/writer lock guards all three maps so a post id and its envelope
//! are always updated together.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use reaction_core::{Envelope, MessageId, MessageRef};
use tracing::debug;

/// Shared cache handle
pub type SharedIdentityCache = Arc<IdentityCache>;

/// Create a new, empty shared cache
pub fn create_shared_cache() -> SharedIdentityCache {
    Arc::new(IdentityCache::new())
}

#[derive(Debug, Default)]
struct Inner {
    posts: HashMap<MessageRef, MessageId>,
    envelopes: HashMap<MessageRef, Envelope>,
    notifications: HashMap<MessageRef, Envelope>,
}

/// Entry counts, for logs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub posts: usize,
    pub envelopes: usize,
    pub notifications: usize,
}

/// Cross-reference of targets, reaction posts, and notification threads.
///
/// All keys are the address of the reacted-to message.
#[derive(Debug, Default)]
pub struct IdentityCache {
    inner: RwLock<Inner>,
}

impl IdentityCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Reaction post id for a target, if one is known
    pub fn reaction_post_for(&self, target: MessageRef) -> Option<MessageId> {
        self.inner.read().posts.get(&target).copied()
    }

    /// Reaction post id and envelope for a target. Both must be known.
    pub fn reaction_post(&self, target: MessageRef) -> Option<(MessageId, Envelope)> {
        let inner = self.inner.read();
        let post_id = *inner.posts.get(&target)?;
        let envelope = inner.envelopes.get(&target)?.clone();
        Some((post_id, envelope))
    }

    /// Record a newly created reaction post
    pub fn register_post(&self, target: MessageRef, post: &Envelope) {
        self.store_envelope(target, post);
        debug!(target_message = %target, post_id = %post.id, "Registered reaction post");
    }

    /// Last known envelope of the reaction post for a target
    pub fn envelope(&self, target: MessageRef) -> Option<Envelope> {
        self.inner.read().envelopes.get(&target).cloned()
    }

    /// Replace the envelope after an edit. Also records the post id, so a
    /// post first seen through a reply becomes known.
    pub fn store_envelope(&self, target: MessageRef, post: &Envelope) {
        let mut inner = self.inner.write();
        inner.posts.insert(target, post.id);
        inner.envelopes.insert(target, post.clone());
    }

    /// Forwarded copy of the target that notifications reply under
    pub fn notification_thread(&self, target: MessageRef) -> Option<Envelope> {
        self.inner.read().notifications.get(&target).cloned()
    }

    /// Record the forwarded copy for a target
    pub fn store_notification(&self, target: MessageRef, forward: &Envelope) {
        self.inner
            .write()
            .notifications
            .insert(target, forward.clone());
        debug!(target_message = %target, forward_id = %forward.id, "Stored notification thread");
    }

    /// Current entry counts
    pub fn stats(&self) -> CacheStats {
        let inner = self.inner.read();
        CacheStats {
            posts: inner.posts.len(),
            envelopes: inner.envelopes.len(),
            notifications: inner.notifications.len(),
        }
    }

    /// Number of known reaction posts
    pub fn len(&self) -> usize {
        self.inner.read().posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
