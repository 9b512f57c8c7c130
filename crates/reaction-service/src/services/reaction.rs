//! Reaction service
//!
//! Creates reaction posts and toggles reactions on existing ones.
//!
//! Every step is a platform call. A failed call aborts the remaining steps of
//! the event; nothing already done is rolled back.

use reaction_codec::EncodedPost;
use reaction_core::{Envelope, MessageRef, ReactionSet, Sender, Target, ToggleOutcome};
use tracing::{debug, info, instrument, warn};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::notification::NotificationService;

/// What an event did to a reaction post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostUpdate {
    /// Address of the reaction post
    pub post: MessageRef,
    /// Whether the post was created by this event
    pub created: bool,
    pub outcome: ToggleOutcome,
    /// Whether the target's author was notified
    pub notified: bool,
}

/// Reaction service
pub struct ReactionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReactionService<'a> {
    /// Create a new ReactionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// React to `target` with `tokens`.
    ///
    /// Toggles the known reaction post for the target, or creates one as a
    /// silent reply to the target. Nothing is posted when the tokens cancel
    /// out. `trigger` is the user's message and is deleted in every case.
    #[instrument(
        skip(self, target, reactor),
        fields(target_message = %target.message_ref(), reactor_id = %reactor.id)
    )]
    pub async fn create_or_toggle(
        &self,
        target: &Envelope,
        reactor: &Sender,
        tokens: &[String],
        trigger: MessageRef,
    ) -> ServiceResult<Option<PostUpdate>> {
        let key = target.message_ref();
        if let Some((post_id, post)) = self.ctx.cache().reaction_post(key) {
            debug!(post_id = %post_id, "Reaction post already exists");
            return self.toggle(&post, reactor, tokens, Some(trigger)).await;
        }

        let mut set = ReactionSet::new(Target::new(
            target.chat_id,
            target.id,
            target.sender_id().unwrap_or_default(),
            target.text.clone(),
        ));
        let outcome = set.add_or_remove(reactor.id, tokens);
        if set.is_empty() {
            debug!("Reactions cancel out, no post created");
            self.delete_trigger(trigger).await?;
            return Ok(None);
        }

        let encoded = self.encode(&set)?;
        let post = self
            .ctx
            .transport()
            .send(key.chat_id, &encoded.to_message().silent(), Some(key))
            .await
            .map_err(|e| ServiceError::platform("create reaction post", e))?;
        self.ctx.cache().register_post(key, &post);

        info!(
            post_id = %post.id,
            added = outcome.added_count(),
            "Reaction post created"
        );

        self.delete_trigger(trigger).await?;
        let notified = self.notify_if_added(&set.target, reactor, &outcome).await?;

        Ok(Some(PostUpdate {
            post: post.message_ref(),
            created: true,
            outcome,
            notified,
        }))
    }

    /// Apply `tokens` from `reactor` to an existing reaction post.
    ///
    /// Returns `None` when `post` carries no reaction state at all. `trigger`
    /// is deleted after the edit when given; button presses have none.
    #[instrument(
        skip(self, post, reactor),
        fields(post = %post.message_ref(), reactor_id = %reactor.id)
    )]
    pub async fn toggle(
        &self,
        post: &Envelope,
        reactor: &Sender,
        tokens: &[String],
        trigger: Option<MessageRef>,
    ) -> ServiceResult<Option<PostUpdate>> {
        let decoded = self.ctx.codec().decode(post);
        if decoded.set.is_empty()
            && !decoded.set.target.is_anchored()
            && post.link_urls().next().is_none()
        {
            debug!("Message is not a reaction post");
            return Ok(None);
        }
        if decoded.is_degraded() {
            warn!(
                errors = decoded.errors.len(),
                "Reaction post decoded with errors"
            );
        }

        let mut set = decoded.set;
        let outcome = set.add_or_remove(reactor.id, tokens);

        let encoded = self.encode(&set)?;
        let edited = self
            .ctx
            .transport()
            .edit(post.message_ref(), &encoded.to_message())
            .await
            .map_err(|e| ServiceError::platform("edit reaction post", e))?;
        if set.target.is_anchored() {
            self.ctx.cache().store_envelope(set.target.message_ref(), &edited);
        }

        info!(
            added = outcome.added_count(),
            removed = outcome.removed_count(),
            "Reaction post updated"
        );

        if let Some(trigger) = trigger {
            self.delete_trigger(trigger).await?;
        }
        let notified = self.notify_if_added(&set.target, reactor, &outcome).await?;

        Ok(Some(PostUpdate {
            post: edited.message_ref(),
            created: false,
            outcome,
            notified,
        }))
    }

    fn encode(&self, set: &ReactionSet) -> ServiceResult<EncodedPost> {
        let encoded = self.ctx.codec().encode(set)?;
        if let Err(e) = encoded.check_budget() {
            // Sent anyway; the platform decides
            warn!(error = %e, "Reaction post exceeds message budget");
        }
        if encoded.evicted_users > 0 || encoded.truncated_text {
            debug!(
                evicted_users = encoded.evicted_users,
                truncated_text = encoded.truncated_text,
                "Reaction post shrunk"
            );
        }
        if self.ctx.verbose() {
            debug!(
                set = %serde_json::to_string(set).unwrap_or_default(),
                "Encoded reaction set"
            );
        }
        Ok(encoded)
    }

    async fn delete_trigger(&self, trigger: MessageRef) -> ServiceResult<()> {
        self.ctx
            .transport()
            .delete(trigger)
            .await
            .map_err(|e| ServiceError::platform("delete trigger message", e))
    }

    async fn notify_if_added(
        &self,
        target: &Target,
        reactor: &Sender,
        outcome: &ToggleOutcome,
    ) -> ServiceResult<bool> {
        if !outcome.should_notify() {
            return Ok(false);
        }
        NotificationService::new(self.ctx)
            .notify(target, reactor, &outcome.added)
            .await
    }
}
