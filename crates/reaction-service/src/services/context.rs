//! Service context - dependency container for services
//!
//! Holds the transport, the emoji scanner, the identity cache and the codec.

use std::sync::Arc;

use reaction_cache::{create_shared_cache, IdentityCache, SharedIdentityCache};
use reaction_codec::PostCodec;
use reaction_core::{EmojiScanner, Transport, UserId};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// Cheap to clone; every field is shared or `Copy`.
#[derive(Clone)]
pub struct ServiceContext {
    // Platform
    transport: Arc<dyn Transport>,
    scanner: Arc<dyn EmojiScanner>,
    bot_id: UserId,

    // State
    cache: SharedIdentityCache,
    codec: PostCodec,

    // Logging
    verbose: bool,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        transport: Arc<dyn Transport>,
        scanner: Arc<dyn EmojiScanner>,
        bot_id: UserId,
        cache: SharedIdentityCache,
        codec: PostCodec,
        verbose: bool,
    ) -> Self {
        Self {
            transport,
            scanner,
            bot_id,
            cache,
            codec,
            verbose,
        }
    }

    // === Platform ===

    /// Get the platform transport
    pub fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    /// Get the emoji scanner
    pub fn scanner(&self) -> &dyn EmojiScanner {
        self.scanner.as_ref()
    }

    /// ID of the bot's own account
    pub fn bot_id(&self) -> UserId {
        self.bot_id
    }

    // === State ===

    /// Get the identity cache
    pub fn cache(&self) -> &IdentityCache {
        self.cache.as_ref()
    }

    /// Get a shared handle to the identity cache
    pub fn shared_cache(&self) -> SharedIdentityCache {
        Arc::clone(&self.cache)
    }

    /// Get the reaction post codec
    pub fn codec(&self) -> &PostCodec {
        &self.codec
    }

    /// Whether to dump events and posts as JSON
    pub fn verbose(&self) -> bool {
        self.verbose
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("transport", &"dyn Transport")
            .field("scanner", &"dyn EmojiScanner")
            .field("bot_id", &self.bot_id)
            .field("cache", &self.cache.stats())
            .field("codec", &self.codec)
            .field("verbose", &self.verbose)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
pub struct ServiceContextBuilder {
    transport: Option<Arc<dyn Transport>>,
    scanner: Option<Arc<dyn EmojiScanner>>,
    bot_id: Option<UserId>,
    cache: Option<SharedIdentityCache>,
    codec: PostCodec,
    verbose: bool,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            transport: None,
            scanner: None,
            bot_id: None,
            cache: None,
            codec: PostCodec::default(),
            verbose: false,
        }
    }

    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn scanner(mut self, scanner: Arc<dyn EmojiScanner>) -> Self {
        self.scanner = Some(scanner);
        self
    }

    pub fn bot_id(mut self, bot_id: UserId) -> Self {
        self.bot_id = Some(bot_id);
        self
    }

    /// Share an existing cache. A fresh one is created otherwise.
    pub fn cache(mut self, cache: SharedIdentityCache) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn codec(mut self, codec: PostCodec) -> Self {
        self.codec = codec;
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.transport
                .ok_or_else(|| ServiceError::validation("transport is required"))?,
            self.scanner
                .ok_or_else(|| ServiceError::validation("scanner is required"))?,
            self.bot_id
                .ok_or_else(|| ServiceError::validation("bot_id is required"))?,
            self.cache.unwrap_or_else(create_shared_cache),
            self.codec,
            self.verbose,
        ))
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
