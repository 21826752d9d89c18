mod common;

use chrono::{Duration, Utc};
use sketchday::{
    db::repositories::{
        AchievementRepository, PromptRepository, SubmissionRepository,
    },
    error::AppError,
    services::{
        achievements, comments, favorites, feed, friendships,
        reactions::{self, ReactionToggle},
        stats::{self, StatKind},
        submissions,
    },
};

use common::{create_user, test_state};

use sketchday::db::entities::reaction::ContentType;

#[tokio::test]
async fn streak_counts_run_through_grace_window() {
    let state = test_state().await;
    let user = create_user(&state, "ada").await;

    // Drew yesterday and the two days before, nothing yet today.
    let today = Utc::now().date_naive();
    for offset in 1..=3 {
        SubmissionRepository::create(
            state.db.connection(),
            user.id,
            today - Duration::days(offset),
            "https://img.example/a.png",
        )
        .await
        .expect("seed submission");
    }

    let streak = stats::compute(&state, user.id, StatKind::SubmissionStreak)
        .await
        .expect("compute streak");
    assert_eq!(streak, 3);
}

#[tokio::test]
async fn duplicate_submission_for_a_day_conflicts() {
    let state = test_state().await;
    let user = create_user(&state, "bea").await;
    let today = Utc::now().date_naive();

    SubmissionRepository::create(state.db.connection(), user.id, today, "https://img/1.png")
        .await
        .expect("first submission");

    let second =
        SubmissionRepository::create(state.db.connection(), user.id, today, "https://img/2.png")
            .await;
    assert!(matches!(second, Err(AppError::SubmissionExists)));
}

#[tokio::test]
async fn fortnight_streak_unlocks_reward_exactly_once() {
    let state = test_state().await;
    let user = create_user(&state, "cal").await;

    let today = Utc::now().date_naive();
    for offset in 0..14 {
        SubmissionRepository::create(
            state.db.connection(),
            user.id,
            today - Duration::days(offset),
            "https://img.example/day.png",
        )
        .await
        .expect("seed submission");
    }

    achievements::evaluate_once(&state, user.id)
        .await
        .expect("first evaluation");

    // Re-running the backfill gate and a field-scoped recheck must leave
    // exactly one unlock row.
    achievements::evaluate_once(&state, user.id)
        .await
        .expect("second evaluation");
    achievements::evaluate_by_fields(&state, user.id, &[StatKind::SubmissionStreak])
        .await
        .expect("field evaluation");

    let unlocks = AchievementRepository::unlocks_for(state.db.connection(), user.id)
        .await
        .expect("unlocks");
    let fortnight: Vec<_> = unlocks
        .iter()
        .filter(|unlock| unlock.achievement_id == "streak-14")
        .collect();
    assert_eq!(fortnight.len(), 1);

    let statuses = achievements::list_with_rewards(&state, user.id)
        .await
        .expect("list achievements");
    let status = statuses
        .iter()
        .find(|status| status.achievement.id == "streak-14")
        .expect("streak-14 in catalog");
    assert!(status.achieved_at.is_some());
    assert_eq!(
        status.achievement.reward.map(|reward| reward.id),
        Some("CUSTOM_PROFILE_PIC")
    );
}

#[tokio::test]
async fn friend_comment_appears_unread_then_read() {
    let state = test_state().await;
    let alice = create_user(&state, "alice").await;
    let bob = create_user(&state, "bob").await;

    friendships::add_friend(&state, alice.id, bob.id)
        .await
        .expect("befriend");

    let today = Utc::now().date_naive();
    PromptRepository::create(state.db.connection(), today, "Draw a lighthouse")
        .await
        .expect("prompt");
    let submission = SubmissionRepository::create(
        state.db.connection(),
        alice.id,
        today,
        "https://img.example/lighthouse.png",
    )
    .await
    .expect("submission");

    let comment = comments::add_comment(&state, bob.id, submission.id, "Love the colors!")
        .await
        .expect("comment");

    let entries = feed::feed(&state, alice.id).await.expect("feed");
    assert_eq!(entries.len(), 1);
    let entry = &entries[0];
    assert_eq!(entry.id, format!("comment-{}", comment.id));
    assert_eq!(entry.submission.prompt, "Draw a lighthouse");
    assert!(!entry.is_read);

    feed::set_watermark(&state, alice.id, &entry.id)
        .await
        .expect("mark read");

    let entries = feed::feed(&state, alice.id).await.expect("feed again");
    assert_eq!(entries.len(), 1);
    assert!(entries[0].is_read);
}

#[tokio::test]
async fn feed_excludes_requester_and_non_friends() {
    let state = test_state().await;
    let alice = create_user(&state, "alicia").await;
    let bob = create_user(&state, "bobby").await;
    let carol = create_user(&state, "carol").await;

    friendships::add_friend(&state, alice.id, bob.id)
        .await
        .expect("befriend");

    let today = Utc::now().date_naive();
    let submission = SubmissionRepository::create(
        state.db.connection(),
        alice.id,
        today,
        "https://img.example/self.png",
    )
    .await
    .expect("submission");

    // The requester's own comment and a stranger's comment are both
    // ineligible; only the friend's reaction should surface.
    comments::add_comment(&state, alice.id, submission.id, "my own note")
        .await
        .expect("own comment");
    comments::add_comment(&state, carol.id, submission.id, "drive-by comment")
        .await
        .expect("stranger comment");
    reactions::toggle_reaction(
        &state,
        bob.id,
        ContentType::Submission,
        submission.id,
        "heart",
    )
    .await
    .expect("friend reaction");

    let entries = feed::feed(&state, alice.id).await.expect("feed");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].actor.id, bob.id);
    assert_eq!(entries[0].reaction_id.as_deref(), Some("heart"));
}

#[tokio::test]
async fn feed_with_no_qualifying_submissions_is_empty() {
    let state = test_state().await;
    let loner = create_user(&state, "loner").await;

    let entries = feed::feed(&state, loner.id).await.expect("feed");
    assert!(entries.is_empty());
}

#[tokio::test]
async fn reaction_toggles_on_then_off() {
    let state = test_state().await;
    let alice = create_user(&state, "annie").await;
    let bob = create_user(&state, "bert").await;

    let today = Utc::now().date_naive();
    let submission = SubmissionRepository::create(
        state.db.connection(),
        alice.id,
        today,
        "https://img.example/s.png",
    )
    .await
    .expect("submission");

    let first = reactions::toggle_reaction(
        &state,
        bob.id,
        ContentType::Submission,
        submission.id,
        "star",
    )
    .await
    .expect("toggle on");
    assert!(matches!(first, ReactionToggle::Added(_)));

    let second = reactions::toggle_reaction(
        &state,
        bob.id,
        ContentType::Submission,
        submission.id,
        "star",
    )
    .await
    .expect("toggle off");
    assert!(matches!(second, ReactionToggle::Removed));

    let given = stats::compute(&state, bob.id, StatKind::ReactionGivenTotal)
        .await
        .expect("count");
    assert_eq!(given, 0);
}

#[tokio::test]
async fn favorite_swap_exchanges_order_numbers() {
    let state = test_state().await;
    let alice = create_user(&state, "ana").await;
    let bob = create_user(&state, "bo").await;
    let today = Utc::now().date_naive();

    let first_submission = SubmissionRepository::create(
        state.db.connection(),
        bob.id,
        today,
        "https://img.example/1.png",
    )
    .await
    .expect("submission one");
    let second_submission = SubmissionRepository::create(
        state.db.connection(),
        bob.id,
        today - Duration::days(1),
        "https://img.example/2.png",
    )
    .await
    .expect("submission two");

    let first = favorites::add_favorite(&state, alice.id, first_submission.id)
        .await
        .expect("favorite one");
    let second = favorites::add_favorite(&state, alice.id, second_submission.id)
        .await
        .expect("favorite two");
    assert_ne!(first.order_number, second.order_number);

    favorites::swap_favorites(&state, alice.id, first.id, second.id)
        .await
        .expect("swap");

    let listed = favorites::list_favorites(&state, alice.id)
        .await
        .expect("list");
    let swapped_first = listed.iter().find(|f| f.id == first.id).expect("first");
    let swapped_second = listed.iter().find(|f| f.id == second.id).expect("second");

    assert_eq!(swapped_first.order_number, second.order_number);
    assert_eq!(swapped_second.order_number, first.order_number);
    assert_ne!(swapped_first.order_number, swapped_second.order_number);

    // A third party cannot swap someone else's favorites.
    let denied = favorites::swap_favorites(&state, bob.id, first.id, second.id).await;
    assert!(matches!(denied, Err(AppError::NotFavoriteOwner)));
}

#[tokio::test]
async fn duplicate_friendship_conflicts_in_both_directions() {
    let state = test_state().await;
    let alice = create_user(&state, "ally").await;
    let bob = create_user(&state, "bill").await;

    friendships::add_friend(&state, alice.id, bob.id)
        .await
        .expect("befriend");

    let same_direction = friendships::add_friend(&state, alice.id, bob.id).await;
    assert!(matches!(same_direction, Err(AppError::FriendshipExists)));

    let reversed = friendships::add_friend(&state, bob.id, alice.id).await;
    assert!(matches!(reversed, Err(AppError::FriendshipExists)));
}

#[tokio::test]
async fn mutation_flows_unlock_first_achievements() {
    let state = test_state().await;
    let alice = create_user(&state, "amber").await;
    let bob = create_user(&state, "buck").await;

    friendships::add_friend(&state, alice.id, bob.id)
        .await
        .expect("befriend");

    let today = Utc::now().date_naive();
    let submission = SubmissionRepository::create(
        state.db.connection(),
        alice.id,
        today,
        "https://img.example/first.png",
    )
    .await
    .expect("submission");

    comments::add_comment(&state, bob.id, submission.id, "First!")
        .await
        .expect("comment");
    reactions::toggle_reaction(
        &state,
        bob.id,
        ContentType::Submission,
        submission.id,
        "wave",
    )
    .await
    .expect("reaction");

    let alice_unlocks = AchievementRepository::unlocks_for(state.db.connection(), alice.id)
        .await
        .expect("alice unlocks");
    assert!(
        alice_unlocks
            .iter()
            .any(|unlock| unlock.achievement_id == "first-friend")
    );

    let bob_unlocks = AchievementRepository::unlocks_for(state.db.connection(), bob.id)
        .await
        .expect("bob unlocks");
    assert!(
        bob_unlocks
            .iter()
            .any(|unlock| unlock.achievement_id == "first-comment")
    );
    assert!(
        bob_unlocks
            .iter()
            .any(|unlock| unlock.achievement_id == "first-reaction")
    );
}

/// Pins the lexicographic read-state comparison: `comment-*` always sorts
/// before `reaction-*`, so a watermark taken from a reaction entry marks
/// every comment read, even newer ones.
#[tokio::test]
async fn watermark_comparison_is_lexicographic_across_prefixes() {
    let state = test_state().await;
    let alice = create_user(&state, "astrid").await;
    let bob = create_user(&state, "bjorn").await;

    friendships::add_friend(&state, alice.id, bob.id)
        .await
        .expect("befriend");

    let today = Utc::now().date_naive();
    let submission = SubmissionRepository::create(
        state.db.connection(),
        alice.id,
        today,
        "https://img.example/w.png",
    )
    .await
    .expect("submission");

    // Reaction first, comment afterwards: the comment is the newer event.
    let toggled = reactions::toggle_reaction(
        &state,
        bob.id,
        ContentType::Submission,
        submission.id,
        "fire",
    )
    .await
    .expect("reaction");
    let ReactionToggle::Added(reaction) = toggled else {
        panic!("expected toggle-on");
    };

    comments::add_comment(&state, bob.id, submission.id, "newer than the reaction")
        .await
        .expect("comment");

    feed::set_watermark(&state, alice.id, &format!("reaction-{}", reaction.id))
        .await
        .expect("mark read");

    let entries = feed::feed(&state, alice.id).await.expect("feed");
    assert_eq!(entries.len(), 2);

    // Every entry compares <= the reaction watermark, including the newer
    // comment. Chronologically wrong, lexicographically consistent.
    assert!(entries.iter().all(|entry| entry.is_read));
}

#[tokio::test]
async fn submission_service_requires_a_prompt() {
    let state = test_state().await;
    let user = create_user(&state, "eve").await;

    let missing = submissions::create_submission(&state, user.id, "https://img/e.png").await;
    assert!(matches!(missing, Err(AppError::PromptNotFound)));

    let today = Utc::now().date_naive();
    PromptRepository::create(state.db.connection(), today, "Draw your breakfast")
        .await
        .expect("prompt");

    let created = submissions::create_submission(&state, user.id, "https://img/e.png")
        .await
        .expect("create");
    assert_eq!(created.day, today);

    let streak = stats::compute(&state, user.id, StatKind::SubmissionStreak)
        .await
        .expect("streak");
    assert_eq!(streak, 1);

    let unlocks = AchievementRepository::unlocks_for(state.db.connection(), user.id)
        .await
        .expect("unlocks");
    assert!(
        unlocks
            .iter()
            .any(|unlock| unlock.achievement_id == "first-drawing")
    );
}

#[tokio::test]
async fn cached_stat_persists_after_compute() {
    let state = test_state().await;
    let user = create_user(&state, "dot").await;
    let today = Utc::now().date_naive();

    SubmissionRepository::create(state.db.connection(), user.id, today, "https://img/x.png")
        .await
        .expect("submission");

    let fresh = stats::compute_and_cache(&state, user.id, StatKind::SubmissionTotal)
        .await
        .expect("compute");
    assert_eq!(fresh, 1);

    // The cache write is detached; give it a moment to land.
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    let cached = stats::cached(&state, user.id, StatKind::SubmissionTotal)
        .await
        .expect("cached read");
    assert_eq!(cached.map(|row| row.value), Some(1));
}
