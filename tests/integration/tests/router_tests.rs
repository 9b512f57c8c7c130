//! End-to-end reaction flows
//!
//! Every test drives the event router against the in-memory chat, so posts
//! are created, edited and decoded exactly as the platform would show them.
//!
//! Run with: cargo test -p integration-tests --test router_tests

use std::sync::Arc;

use integration_tests::{
    alice, bob, carol, labels, rows, unique_user, Call, TestBot, BOT_ID, GROUP,
};
use reaction_codec::PostCodec;
use reaction_core::{ButtonLayout, Sender};
use reaction_service::{IgnoreReason, RouteOutcome};

// ============================================================================
// Create, increment, undo
// ============================================================================

#[tokio::test]
async fn test_first_reaction_creates_post() {
    let bot = TestBot::start().unwrap();
    let target = bot.chat.post(GROUP, &carol(), "lunch at noon?");

    let trigger = bot.chat.reply(&alice(), &target, "👍");
    let outcome = bot.deliver(trigger.clone()).await.unwrap();

    let RouteOutcome::Created(update) = outcome else {
        panic!("expected a new post, got {outcome:?}");
    };
    let post = bot.reaction_post(&target).expect("post is cached");
    assert_eq!(post.message_ref(), update.post);
    assert_eq!(labels(&post), vec!["👍"]);
    assert_eq!(
        post.reply_to.as_ref().map(|m| m.message_ref()),
        Some(target.message_ref())
    );

    // The reaction reply is replaced by the post
    assert!(!bot.chat.exists(trigger.message_ref()));
    assert!(bot.chat.exists(target.message_ref()));
}

#[tokio::test]
async fn test_second_user_increments_and_notifies() {
    let bot = TestBot::start().unwrap();
    let target = bot.chat.post(GROUP, &carol(), "lunch at noon?");

    bot.reply(&alice(), &target, "👍").await.unwrap();
    let outcome = bot.reply(&bob(), &target, "👍").await.unwrap();

    let RouteOutcome::Toggled(update) = outcome else {
        panic!("expected a toggle, got {outcome:?}");
    };
    assert_eq!(update.outcome.added, vec!["👍"]);
    assert!(update.notified);

    let post = bot.reaction_post(&target).unwrap();
    assert_eq!(labels(&post), vec!["2 👍"]);

    let sends_to_group = bot
        .chat
        .calls()
        .iter()
        .filter(|c| matches!(c, Call::Send { chat_id, .. } if *chat_id == GROUP))
        .count();
    assert_eq!(sends_to_group, 1, "only one reaction post per target");

    assert_eq!(
        bot.chat.private_messages(carol().id),
        vec![
            "lunch at noon?".to_string(),
            "👍 @alice reacted".to_string(),
            "👍 Bob reacted".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_repeat_reaction_undoes_without_notification() {
    let bot = TestBot::start().unwrap();
    let target = bot.chat.post(GROUP, &carol(), "lunch at noon?");

    bot.reply(&alice(), &target, "👍").await.unwrap();
    bot.reply(&bob(), &target, "👍").await.unwrap();
    let notifications_before = bot.chat.private_messages(carol().id).len();

    let outcome = bot.reply(&bob(), &target, "👍").await.unwrap();
    let update = outcome.update().unwrap();
    assert_eq!(update.outcome.removed, vec!["👍"]);
    assert!(update.outcome.added.is_empty());
    assert!(!update.notified);

    let post = bot.reaction_post(&target).unwrap();
    assert_eq!(labels(&post), vec!["👍"]);
    assert_eq!(bot.chat.private_messages(carol().id).len(), notifications_before);
}

#[tokio::test]
async fn test_last_reaction_removed_keeps_empty_post() {
    let bot = TestBot::start().unwrap();
    let target = bot.chat.post(GROUP, &carol(), "lunch at noon?");

    bot.reply(&alice(), &target, "👍").await.unwrap();
    bot.reply(&alice(), &target, "👍").await.unwrap();

    let post = bot.reaction_post(&target).unwrap();
    assert!(labels(&post).is_empty());

    // The anchor still identifies the target, so the post is reused
    bot.reply(&bob(), &target, "🎉").await.unwrap();
    let post = bot.reaction_post(&target).unwrap();
    assert_eq!(labels(&post), vec!["🎉"]);
}

// ============================================================================
// Other ways to react
// ============================================================================

#[tokio::test]
async fn test_reply_to_post_toggles_it() {
    let bot = TestBot::start().unwrap();
    let target = bot.chat.post(GROUP, &carol(), "release is out");
    bot.reply(&alice(), &target, "🎉").await.unwrap();

    let post = bot.reaction_post(&target).unwrap();
    let outcome = bot.reply(&bob(), &post, "🎉🚀").await.unwrap();

    assert!(matches!(outcome, RouteOutcome::Toggled(_)));
    let post = bot.reaction_post(&target).unwrap();
    assert_eq!(labels(&post), vec!["2 🎉", "🚀"]);
}

#[tokio::test]
async fn test_button_press_toggles() {
    let bot = TestBot::start().unwrap();
    let target = bot.chat.post(GROUP, &carol(), "release is out");
    bot.reply(&alice(), &target, "🎉").await.unwrap();
    let post_ref = bot.reaction_post(&target).unwrap().message_ref();

    let outcome = bot.press(&bob(), post_ref, 0).await.unwrap();
    assert!(outcome.update().unwrap().notified);
    assert_eq!(labels(&bot.chat.message(post_ref).unwrap()), vec!["2 🎉"]);

    // Pressing again takes Bob's reaction back
    let outcome = bot.press(&bob(), post_ref, 0).await.unwrap();
    assert_eq!(outcome.update().unwrap().outcome.removed, vec!["🎉"]);
    assert_eq!(labels(&bot.chat.message(post_ref).unwrap()), vec!["🎉"]);

    // Button presses leave no message behind to delete
    assert!(!bot
        .chat
        .calls()
        .iter()
        .any(|c| matches!(c, Call::Delete(at) if *at == post_ref)));
}

#[tokio::test]
async fn test_single_character_reaction() {
    let bot = TestBot::start().unwrap();
    let target = bot.chat.post(GROUP, &carol(), "who is in?");

    let outcome = bot.reply(&alice(), &target, "+").await.unwrap();

    assert!(matches!(outcome, RouteOutcome::Created(_)));
    assert_eq!(labels(&bot.reaction_post(&target).unwrap()), vec!["+"]);
}

#[tokio::test]
async fn test_double_tap_in_one_message_posts_nothing_and_clears_trigger() {
    let bot = TestBot::start().unwrap();
    let target = bot.chat.post(GROUP, &carol(), "who is in?");

    let trigger = bot.chat.reply(&alice(), &target, "👍👍");
    let outcome = bot.deliver(trigger.clone()).await.unwrap();

    assert_eq!(outcome, RouteOutcome::Ignored(IgnoreReason::NothingToPost));
    assert!(bot.reaction_post(&target).is_none());
    assert!(!bot.chat.exists(trigger.message_ref()));
    assert_eq!(bot.chat.calls(), vec![Call::Delete(trigger.message_ref())]);
}

#[tokio::test]
async fn test_buttons_paginated() {
    let layout = ButtonLayout::new(5, 3).unwrap();
    let bot = TestBot::with_codec(PostCodec::new(layout, 4096)).unwrap();
    let target = bot.chat.post(GROUP, &carol(), "rate the talk");

    bot.reply(&alice(), &target, "😀😁😂🤣😃😄😅😆").await.unwrap();

    let post = bot.reaction_post(&target).unwrap();
    assert_eq!(
        rows(&post),
        vec![
            vec!["😀", "😁", "😂", "🤣", "😃"],
            vec!["😄", "😅", "😆"],
        ]
    );
}

// ============================================================================
// Ignored events
// ============================================================================

#[tokio::test]
async fn test_ignored_messages() {
    let bot = TestBot::start().unwrap();
    let target = bot.chat.post(GROUP, &carol(), "lunch at noon?");

    let chatter = bot.reply(&alice(), &target, "sounds good 👍").await.unwrap();
    assert_eq!(chatter, RouteOutcome::Ignored(IgnoreReason::NotAReaction));

    let standalone = bot.chat.post(GROUP, &alice(), "👍");
    let outcome = bot.deliver(standalone).await.unwrap();
    assert_eq!(outcome, RouteOutcome::Ignored(IgnoreReason::NotAReply));

    let me = Sender::new(BOT_ID, "ReactionBot");
    let own = bot.chat.reply(&me, &target, "👍");
    let outcome = bot.deliver(own).await.unwrap();
    assert_eq!(outcome, RouteOutcome::Ignored(IgnoreReason::OwnMessage));

    assert!(bot.chat.calls().is_empty());
}

#[tokio::test]
async fn test_reaction_to_other_bot_message_ignored() {
    let bot = TestBot::start().unwrap();
    let target = bot.chat.post(GROUP, &carol(), "lunch at noon?");
    bot.reply(&alice(), &target, "👍").await.unwrap();

    // The notification under the forwarded copy is a bot message without
    // reaction state
    let forward = bot
        .chat
        .calls()
        .iter()
        .find_map(|c| match c {
            Call::Forward { to, source } => Some((*to, *source)),
            _ => None,
        })
        .unwrap();
    assert_eq!(forward, (carol().id.private_chat(), target.message_ref()));

    let mut announcement = bot.chat.post(GROUP, &bob(), "standup moved to 10");
    announcement.sender = Some(Sender::new(BOT_ID, "ReactionBot"));
    let trigger = bot.chat.reply(&alice(), &announcement, "👍");
    let outcome = bot.deliver(trigger.clone()).await.unwrap();

    assert_eq!(outcome, RouteOutcome::Ignored(IgnoreReason::NotAReactionPost));
    assert!(bot.chat.exists(trigger.message_ref()));
    assert!(!bot
        .chat
        .calls()
        .iter()
        .any(|c| matches!(c, Call::Edit(at) if *at == announcement.message_ref())));
}

// ============================================================================
// Failure handling
// ============================================================================

#[tokio::test]
async fn test_failed_edit_leaves_trigger_in_place() {
    let bot = TestBot::start().unwrap();
    let target = bot.chat.post(GROUP, &carol(), "lunch at noon?");
    bot.reply(&alice(), &target, "👍").await.unwrap();

    bot.chat.fail_on("edit");
    let trigger = bot.chat.reply(&bob(), &target, "👍");
    let result = bot.deliver(trigger.clone()).await;

    assert!(result.is_err());
    assert!(bot.chat.exists(trigger.message_ref()));
    assert_eq!(labels(&bot.reaction_post(&target).unwrap()), vec!["👍"]);
}

#[tokio::test]
async fn test_failed_notification_keeps_reaction() {
    let bot = TestBot::start().unwrap();
    let target = bot.chat.post(GROUP, &carol(), "lunch at noon?");

    bot.chat.fail_on("forward");
    let result = bot.reply(&alice(), &target, "👍").await;

    assert!(result.is_err());
    assert_eq!(labels(&bot.reaction_post(&target).unwrap()), vec!["👍"]);
}

// ============================================================================
// State lives in the post
// ============================================================================

#[tokio::test]
async fn test_state_survives_restart() {
    let bot = TestBot::start().unwrap();
    let target = bot.chat.post(GROUP, &carol(), "lunch at noon?");
    bot.reply(&alice(), &target, "👍").await.unwrap();
    let post = bot.reaction_post(&target).unwrap();

    let restarted = bot.restart().unwrap();
    assert!(restarted.reaction_post(&target).is_none());

    // Alice's history is read back from the post, so her repeat is an undo
    let outcome = restarted.reply(&alice(), &post, "👍").await.unwrap();
    assert_eq!(outcome.update().unwrap().outcome.removed, vec!["👍"]);

    let post = bot.chat.message(post.message_ref()).unwrap();
    let decoded = restarted.decode(&post);
    assert!(decoded.set.is_empty());
    assert_eq!(decoded.set.target.message_ref(), target.message_ref());
    assert!(!decoded.is_degraded());
}

#[tokio::test]
async fn test_budget_keeps_counts_and_sheds_history() {
    // Measure the unconstrained post first
    let unbounded = TestBot::start().unwrap();
    let users: Vec<_> = (0..50).map(|_| unique_user()).collect();
    let target = unbounded.chat.post(GROUP, &carol(), "vote here");
    for (i, user) in users.iter().enumerate() {
        let emoji = if i % 2 == 0 { "👍" } else { "👎" };
        unbounded.reply(user, &target, emoji).await.unwrap();
    }
    let full = unbounded.reaction_post(&target).unwrap();
    let full_size = unbounded.chat.size_of(full.message_ref()).unwrap();

    let limit = full_size - 100;
    let bot = TestBot::with_codec(PostCodec::new(ButtonLayout::default(), limit)).unwrap();
    let target = bot.chat.post(GROUP, &carol(), "vote here");
    for (i, user) in users.iter().enumerate() {
        let emoji = if i % 2 == 0 { "👍" } else { "👎" };
        bot.reply(user, &target, emoji).await.unwrap();
    }

    let post = bot.reaction_post(&target).unwrap();
    assert!(bot.chat.size_of(post.message_ref()).unwrap() <= limit);
    assert_eq!(labels(&post), vec!["25 👍", "25 👎"]);

    let decoded = bot.decode(&post);
    assert!(decoded.set.history.user_count() < 50);
    assert_eq!(decoded.set.target.text, "vote here");
}

// ============================================================================
// Concurrency
// ============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_reactions_on_distinct_targets() {
    let bot = Arc::new(TestBot::start().unwrap());
    let targets: Vec<_> = (0..20)
        .map(|i| bot.chat.post(GROUP, &carol(), &format!("message {i}")))
        .collect();

    let tasks = targets.iter().cloned().map(|target| {
        let bot = bot.clone();
        tokio::spawn(async move { bot.reply(&unique_user(), &target, "🔥").await })
    });
    for result in futures::future::join_all(tasks).await {
        assert!(matches!(result.unwrap().unwrap(), RouteOutcome::Created(_)));
    }

    let mut posts = Vec::new();
    for target in &targets {
        let post = bot.reaction_post(target).expect("every target has a post");
        assert_eq!(labels(&post), vec!["🔥"]);
        assert_eq!(
            bot.decode(&post).set.target.message_ref(),
            target.message_ref()
        );
        posts.push(post.message_ref());
    }
    posts.sort_by_key(|p| p.message_id);
    posts.dedup();
    assert_eq!(posts.len(), targets.len());
    assert_eq!(bot.router.context().cache().len(), targets.len());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_presses_on_one_post_stay_consistent() {
    let bot = Arc::new(TestBot::start().unwrap());
    let target = bot.chat.post(GROUP, &carol(), "pick one");
    bot.reply(&alice(), &target, "👍").await.unwrap();
    let post_ref = bot.reaction_post(&target).unwrap().message_ref();

    let tasks = (0..10).map(|_| {
        let bot = bot.clone();
        tokio::spawn(async move { bot.press(&unique_user(), post_ref, 0).await })
    });
    for result in futures::future::join_all(tasks).await {
        result.unwrap().unwrap();
    }

    // Concurrent edits race and the last one wins, but every edit leaves a
    // self-consistent post behind
    let post = bot.chat.message(post_ref).unwrap();
    let decoded = bot.decode(&post);
    let count = decoded.set.count_of("👍");
    assert!((2..=11).contains(&count));
    assert!(decoded.set.is_consistent());
}
