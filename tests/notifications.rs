mod common;

use std::{
    collections::HashSet,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use chrono::Utc;
use sketchday::{
    db::{
        entities::{comment, reaction, reaction::ContentType},
        repositories::{PushRepository, SubmissionRepository},
    },
    error::{AppError, Result},
    services::{
        friendships, notifications,
        notifications::{EndpointKeys, PushDelivery},
    },
};
use uuid::Uuid;

use common::{create_user, test_state_with_push};

/// Fixture port: records every successful delivery, fails configured
/// endpoints the way an expired subscription would.
#[derive(Default)]
struct RecordingDelivery {
    sends: Mutex<Vec<String>>,
    failing: HashSet<String>,
}

impl RecordingDelivery {
    fn failing(endpoints: &[&str]) -> Self {
        Self {
            sends: Mutex::new(Vec::new()),
            failing: endpoints.iter().map(|e| e.to_string()).collect(),
        }
    }

    fn sent_endpoints(&self) -> Vec<String> {
        self.sends.lock().expect("sends lock").clone()
    }
}

#[async_trait]
impl PushDelivery for RecordingDelivery {
    async fn deliver(&self, keys: &EndpointKeys, _payload: &[u8]) -> Result<()> {
        if self.failing.contains(&keys.endpoint) {
            return Err(AppError::PushDelivery("410 Gone".into()));
        }

        self.sends.lock().expect("sends lock").push(keys.endpoint.clone());
        Ok(())
    }
}

#[tokio::test]
async fn submission_fans_out_to_all_friends() {
    let recorder = Arc::new(RecordingDelivery::default());
    let state = test_state_with_push(recorder.clone()).await;

    let alice = create_user(&state, "alice").await;
    let bob = create_user(&state, "bob").await;
    let carol = create_user(&state, "carol").await;

    friendships::add_friend(&state, alice.id, bob.id)
        .await
        .expect("befriend bob");
    friendships::add_friend(&state, carol.id, alice.id)
        .await
        .expect("befriend carol");

    let conn = state.db.connection();
    PushRepository::subscribe(conn, bob.id, "https://push/bob-1", "p256dh", "auth")
        .await
        .expect("bob subscription");
    PushRepository::subscribe(conn, carol.id, "https://push/carol-1", "p256dh", "auth")
        .await
        .expect("carol subscription");

    let submission = SubmissionRepository::create(
        conn,
        alice.id,
        Utc::now().date_naive(),
        "https://img.example/fanout.png",
    )
    .await
    .expect("submission");

    notifications::dispatch_submission(&state, &submission)
        .await
        .expect("dispatch");

    let sent = recorder.sent_endpoints();
    assert_eq!(sent.len(), 2);
    assert!(sent.contains(&"https://push/bob-1".to_string()));
    assert!(sent.contains(&"https://push/carol-1".to_string()));
}

#[tokio::test]
async fn failing_endpoint_does_not_block_other_deliveries() {
    let recorder = Arc::new(RecordingDelivery::failing(&["https://push/bob-dead"]));
    let state = test_state_with_push(recorder.clone()).await;

    let alice = create_user(&state, "ana").await;
    let bob = create_user(&state, "ben").await;
    let carol = create_user(&state, "cleo").await;

    friendships::add_friend(&state, alice.id, bob.id)
        .await
        .expect("befriend bob");
    friendships::add_friend(&state, alice.id, carol.id)
        .await
        .expect("befriend carol");

    let conn = state.db.connection();
    PushRepository::subscribe(conn, bob.id, "https://push/bob-dead", "p256dh", "auth")
        .await
        .expect("dead subscription");
    PushRepository::subscribe(conn, bob.id, "https://push/bob-live", "p256dh", "auth")
        .await
        .expect("live subscription");
    PushRepository::subscribe(conn, carol.id, "https://push/carol-live", "p256dh", "auth")
        .await
        .expect("carol subscription");

    let submission = SubmissionRepository::create(
        conn,
        alice.id,
        Utc::now().date_naive(),
        "https://img.example/resilient.png",
    )
    .await
    .expect("submission");

    notifications::dispatch_submission(&state, &submission)
        .await
        .expect("dispatch");

    // The dead endpoint loses only itself: the same user's second device
    // and the other recipient still receive the notification.
    let sent = recorder.sent_endpoints();
    assert_eq!(sent.len(), 2);
    assert!(sent.contains(&"https://push/bob-live".to_string()));
    assert!(sent.contains(&"https://push/carol-live".to_string()));
}

#[tokio::test]
async fn reacting_to_own_content_dispatches_nothing() {
    let recorder = Arc::new(RecordingDelivery::default());
    let state = test_state_with_push(recorder.clone()).await;

    let alice = create_user(&state, "aya").await;

    let conn = state.db.connection();
    PushRepository::subscribe(conn, alice.id, "https://push/aya-1", "p256dh", "auth")
        .await
        .expect("subscription");

    let submission = SubmissionRepository::create(
        conn,
        alice.id,
        Utc::now().date_naive(),
        "https://img.example/self.png",
    )
    .await
    .expect("submission");

    let reaction = reaction::Model {
        id: Uuid::new_v4(),
        user_id: alice.id,
        content_type: ContentType::Submission,
        content_id: submission.id,
        reaction_id: "heart".into(),
        created_at: Utc::now(),
    };

    notifications::dispatch_reaction(&state, &reaction)
        .await
        .expect("dispatch");

    assert!(recorder.sent_endpoints().is_empty());
}

#[tokio::test]
async fn reaction_notifies_the_content_owner() {
    let recorder = Arc::new(RecordingDelivery::default());
    let state = test_state_with_push(recorder.clone()).await;

    let alice = create_user(&state, "amy").await;
    let bob = create_user(&state, "bram").await;

    let conn = state.db.connection();
    PushRepository::subscribe(conn, alice.id, "https://push/amy-1", "p256dh", "auth")
        .await
        .expect("owner subscription");
    PushRepository::subscribe(conn, bob.id, "https://push/bram-1", "p256dh", "auth")
        .await
        .expect("actor subscription");

    let submission = SubmissionRepository::create(
        conn,
        alice.id,
        Utc::now().date_naive(),
        "https://img.example/owner.png",
    )
    .await
    .expect("submission");

    let reaction = reaction::Model {
        id: Uuid::new_v4(),
        user_id: bob.id,
        content_type: ContentType::Submission,
        content_id: submission.id,
        reaction_id: "star".into(),
        created_at: Utc::now(),
    };

    notifications::dispatch_reaction(&state, &reaction)
        .await
        .expect("dispatch");

    assert_eq!(recorder.sent_endpoints(), vec!["https://push/amy-1"]);
}

#[tokio::test]
async fn commenting_on_own_submission_is_suppressed() {
    let recorder = Arc::new(RecordingDelivery::default());
    let state = test_state_with_push(recorder.clone()).await;

    let alice = create_user(&state, "avery").await;

    let conn = state.db.connection();
    PushRepository::subscribe(conn, alice.id, "https://push/avery-1", "p256dh", "auth")
        .await
        .expect("subscription");

    let submission = SubmissionRepository::create(
        conn,
        alice.id,
        Utc::now().date_naive(),
        "https://img.example/own.png",
    )
    .await
    .expect("submission");

    let comment = comment::Model {
        id: Uuid::new_v4(),
        submission_id: submission.id,
        user_id: alice.id,
        text: "noting something for myself".into(),
        created_at: Utc::now(),
    };

    notifications::dispatch_comment(&state, &comment)
        .await
        .expect("dispatch");

    assert!(recorder.sent_endpoints().is_empty());
}

#[tokio::test]
async fn disabled_push_short_circuits_dispatch() {
    let recorder = Arc::new(RecordingDelivery::default());
    let mut state = test_state_with_push(recorder.clone()).await;

    let mut config = (*state.config).clone();
    config.push.enabled = false;
    state.config = Arc::new(config);

    let alice = create_user(&state, "ash").await;
    let bob = create_user(&state, "beau").await;

    friendships::add_friend(&state, alice.id, bob.id)
        .await
        .expect("befriend");

    let conn = state.db.connection();
    PushRepository::subscribe(conn, bob.id, "https://push/beau-1", "p256dh", "auth")
        .await
        .expect("subscription");

    let submission = SubmissionRepository::create(
        conn,
        alice.id,
        Utc::now().date_naive(),
        "https://img.example/quiet.png",
    )
    .await
    .expect("submission");

    notifications::dispatch_submission(&state, &submission)
        .await
        .expect("dispatch");

    assert!(recorder.sent_endpoints().is_empty());
}
