//! Event router
//!
//! Classifies each inbound event and hands it to the reaction service:
//!
//! | Event | Route |
//! |---|---|
//! | message from the bot itself | ignore |
//! | reaction reply to a bot message | toggle that post |
//! | reaction reply to any other message | create or toggle its post |
//! | button press | toggle the pressed post |
//! | anything else | ignore |
//!
//! A reaction reply is one made only of emoji, or of a single character.

use reaction_codec::decode_button;
use reaction_core::{ButtonPress, Envelope, InboundEvent};
use tracing::{debug, error, instrument, warn};
use unicode_segmentation::UnicodeSegmentation;

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::reaction::{PostUpdate, ReactionService};

/// Why an event was not acted on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    OwnMessage,
    NotAReply,
    AnonymousSender,
    NotAReaction,
    NotAReactionPost,
    MalformedButton,
    /// Tokens cancelled out before any post existed
    NothingToPost,
}

/// Classification of an inbound message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Ignore(IgnoreReason),
    /// Reply to one of the bot's messages
    Toggle { post: Envelope, tokens: Vec<String> },
    /// Reply to someone else's message
    CreateOrToggle { target: Envelope, tokens: Vec<String> },
}

/// Result of handling one event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome {
    Ignored(IgnoreReason),
    Created(PostUpdate),
    Toggled(PostUpdate),
}

impl RouteOutcome {
    /// The post update, if anything changed
    pub fn update(&self) -> Option<&PostUpdate> {
        match self {
            Self::Ignored(_) => None,
            Self::Created(update) | Self::Toggled(update) => Some(update),
        }
    }

    pub fn is_ignored(&self) -> bool {
        matches!(self, Self::Ignored(_))
    }

    fn from_update(update: Option<PostUpdate>, none: IgnoreReason) -> Self {
        match update {
            Some(update) if update.created => Self::Created(update),
            Some(update) => Self::Toggled(update),
            None => Self::Ignored(none),
        }
    }
}

/// Entry point for every inbound event
#[derive(Debug, Clone)]
pub struct EventRouter {
    ctx: ServiceContext,
}

impl EventRouter {
    /// Create a new EventRouter
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    /// Get the service context
    pub fn context(&self) -> &ServiceContext {
        &self.ctx
    }

    /// Handle one event. Failures are logged here and returned.
    #[instrument(skip(self, event), fields(event_type = event.event_type()))]
    pub async fn handle(&self, event: InboundEvent) -> ServiceResult<RouteOutcome> {
        if self.ctx.verbose() {
            debug!(
                event = %serde_json::to_string(&event).unwrap_or_default(),
                "Inbound event"
            );
        }

        let result = match &event {
            InboundEvent::Message(message) => self.handle_message(message).await,
            InboundEvent::ButtonPress(press) => self.handle_button_press(press).await,
        };

        match &result {
            Ok(RouteOutcome::Ignored(reason)) => debug!(?reason, "Event ignored"),
            Ok(_) => {}
            Err(e) => error!(error = %e, code = e.error_code(), "Event handling failed"),
        }
        result
    }

    /// Route a message
    pub async fn handle_message(&self, message: &Envelope) -> ServiceResult<RouteOutcome> {
        let service = ReactionService::new(&self.ctx);

        match self.classify(message) {
            Route::Ignore(reason) => Ok(RouteOutcome::Ignored(reason)),
            Route::Toggle { post, tokens } => {
                let Some(reactor) = &message.sender else {
                    return Ok(RouteOutcome::Ignored(IgnoreReason::AnonymousSender));
                };
                let update = service
                    .toggle(&post, reactor, &tokens, Some(message.message_ref()))
                    .await?;
                Ok(RouteOutcome::from_update(update, IgnoreReason::NotAReactionPost))
            }
            Route::CreateOrToggle { target, tokens } => {
                let Some(reactor) = &message.sender else {
                    return Ok(RouteOutcome::Ignored(IgnoreReason::AnonymousSender));
                };
                let update = service
                    .create_or_toggle(&target, reactor, &tokens, message.message_ref())
                    .await?;
                Ok(RouteOutcome::from_update(update, IgnoreReason::NothingToPost))
            }
        }
    }

    /// Route a button press on a reaction post
    pub async fn handle_button_press(&self, press: &ButtonPress) -> ServiceResult<RouteOutcome> {
        let entry = match decode_button(&press.data) {
            Ok(entry) => entry,
            Err(e) => {
                warn!(callback_id = %press.id, error = %e, "Ignoring malformed button press");
                return Ok(RouteOutcome::Ignored(IgnoreReason::MalformedButton));
            }
        };

        let update = ReactionService::new(&self.ctx)
            .toggle(&press.message, &press.sender, &[entry.emoji], None)
            .await?;
        Ok(RouteOutcome::from_update(update, IgnoreReason::NotAReactionPost))
    }

    /// Decide what to do with a message
    pub fn classify(&self, message: &Envelope) -> Route {
        if message.is_from(self.ctx.bot_id()) {
            return Route::Ignore(IgnoreReason::OwnMessage);
        }
        let Some(replied) = message.reply_to.as_deref() else {
            return Route::Ignore(IgnoreReason::NotAReply);
        };
        if message.sender.is_none() {
            return Route::Ignore(IgnoreReason::AnonymousSender);
        }
        let Some(tokens) = self.reaction_tokens(&message.text) else {
            return Route::Ignore(IgnoreReason::NotAReaction);
        };

        if replied.is_from(self.ctx.bot_id()) {
            Route::Toggle {
                post: replied.clone(),
                tokens,
            }
        } else {
            Route::CreateOrToggle {
                target: replied.clone(),
                tokens,
            }
        }
    }

    /// Reaction tokens in `text`: all emoji when the text holds nothing else,
    /// or the text itself when it is a single character
    pub fn reaction_tokens(&self, text: &str) -> Option<Vec<String>> {
        let scan = self.ctx.scanner().scan(text);
        if scan.is_emoji_only() {
            return Some(scan.emoji);
        }

        let mut graphemes = text.trim().graphemes(true);
        match (graphemes.next(), graphemes.next()) {
            (Some(single), None) => Some(vec![single.to_string()]),
            _ => None,
        }
    }
}
