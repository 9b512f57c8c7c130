//! Notification service
//!
//! Tells the author of a reacted-to message who reacted. The target is
//! forwarded to the author's private chat once, and every notification is a
//! reply under that forward.

use reaction_core::{Envelope, OutgoingMessage, Sender, Target};
use tracing::{debug, info, instrument};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Notification service
pub struct NotificationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> NotificationService<'a> {
    /// Create a new NotificationService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Notification text: the added emoji followed by who added them
    pub fn notification_text(added: &[String], reactor: &Sender) -> String {
        format!("{} {} reacted", added.concat(), reactor.display_name())
    }

    /// Notify the target's author. Returns `false` when the author is unknown.
    #[instrument(skip(self, target, reactor), fields(target_message = %target.message_ref()))]
    pub async fn notify(
        &self,
        target: &Target,
        reactor: &Sender,
        added: &[String],
    ) -> ServiceResult<bool> {
        if !target.has_author() || !target.is_anchored() {
            debug!("Target author unknown, skipping notification");
            return Ok(false);
        }

        let thread = self.thread_for(target).await?;
        let text = Self::notification_text(added, reactor);

        self.ctx
            .transport()
            .send(
                thread.chat_id,
                &OutgoingMessage::plain(text).silent(),
                Some(thread.message_ref()),
            )
            .await
            .map_err(|e| ServiceError::platform("send notification", e))?;

        info!(
            author_id = %target.author_id,
            reactor_id = %reactor.id,
            emoji = %added.concat(),
            "Reaction notification sent"
        );
        Ok(true)
    }

    /// Forwarded copy of the target in the author's private chat, created on
    /// first use
    async fn thread_for(&self, target: &Target) -> ServiceResult<Envelope> {
        let key = target.message_ref();
        if let Some(thread) = self.ctx.cache().notification_thread(key) {
            return Ok(thread);
        }

        let forward = self
            .ctx
            .transport()
            .forward(target.author_id.private_chat(), key)
            .await
            .map_err(|e| ServiceError::platform("forward target", e))?;
        self.ctx.cache().store_notification(key, &forward);
        Ok(forward)
    }
}
