pub mod delivery;

pub use delivery::{EndpointKeys, NoopDelivery, PushDelivery, WebPushDelivery};

use futures::future::join_all;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::{
    AppState,
    db::{
        entities::{comment, reaction, reaction::ContentType, submission},
        repositories::{
            CommentRepository, FriendshipRepository, PushRepository, SubmissionRepository,
            UserRepository,
        },
    },
    error::{AppError, Result},
};

/// A new drawing fans out to every friend of the submitter. The submitter
/// is not a recipient by construction.
pub async fn dispatch_submission(state: &AppState, submission: &submission::Model) -> Result<()> {
    if !state.config.push.enabled {
        return Ok(());
    }

    let conn = state.db.connection();

    let recipients = FriendshipRepository::friend_ids_of(conn, submission.user_id).await?;
    if recipients.is_empty() {
        return Ok(());
    }

    let actor = UserRepository::find_by_id(conn, submission.user_id)
        .await?
        .ok_or(AppError::UserNotFound)?;

    let payload = json!({
        "kind": "submission",
        "actor_id": actor.id,
        "actor_name": actor.username,
        "submission_id": submission.id,
        "day": submission.day,
    });

    fan_out(state, &recipients, &payload).await
}

/// A reaction notifies the owner of the reacted-to content, unless the
/// actor reacted to their own content.
pub async fn dispatch_reaction(state: &AppState, reaction: &reaction::Model) -> Result<()> {
    if !state.config.push.enabled {
        return Ok(());
    }

    let conn = state.db.connection();

    let owner_id = match reaction.content_type {
        ContentType::Submission => {
            SubmissionRepository::find_by_id(conn, reaction.content_id)
                .await?
                .ok_or(AppError::SubmissionNotFound)?
                .user_id
        }
        ContentType::Comment => {
            CommentRepository::find_by_id(conn, reaction.content_id)
                .await?
                .ok_or(AppError::CommentNotFound)?
                .user_id
        }
    };

    if owner_id == reaction.user_id {
        return Ok(());
    }

    let actor = UserRepository::find_by_id(conn, reaction.user_id)
        .await?
        .ok_or(AppError::UserNotFound)?;

    let content_type = match reaction.content_type {
        ContentType::Submission => "submission",
        ContentType::Comment => "comment",
    };

    let payload = json!({
        "kind": "reaction",
        "actor_id": actor.id,
        "actor_name": actor.username,
        "content_type": content_type,
        "content_id": reaction.content_id,
        "reaction_id": reaction.reaction_id,
    });

    fan_out(state, &[owner_id], &payload).await
}

/// A comment notifies the submission's owner, unless they commented on
/// their own drawing.
pub async fn dispatch_comment(state: &AppState, comment: &comment::Model) -> Result<()> {
    if !state.config.push.enabled {
        return Ok(());
    }

    let conn = state.db.connection();

    let submission = SubmissionRepository::find_by_id(conn, comment.submission_id)
        .await?
        .ok_or(AppError::SubmissionNotFound)?;

    if submission.user_id == comment.user_id {
        return Ok(());
    }

    let actor = UserRepository::find_by_id(conn, comment.user_id)
        .await?
        .ok_or(AppError::UserNotFound)?;

    let payload = json!({
        "kind": "comment",
        "actor_id": actor.id,
        "actor_name": actor.username,
        "submission_id": submission.id,
        "text": comment.text,
    });

    fan_out(state, &[submission.user_id], &payload).await
}

async fn fan_out(state: &AppState, recipients: &[Uuid], payload: &Value) -> Result<()> {
    let body = serde_json::to_vec(payload)?;

    let deliveries = recipients
        .iter()
        .map(|recipient| deliver_to_user(state, *recipient, &body));

    join_all(deliveries).await;

    Ok(())
}

/// Every endpoint of the recipient is attempted; a dead endpoint only
/// loses itself.
async fn deliver_to_user(state: &AppState, recipient: Uuid, payload: &[u8]) {
    let subscriptions = match PushRepository::list_for_user(state.db.connection(), recipient).await
    {
        Ok(subscriptions) => subscriptions,
        Err(error) => {
            tracing::warn!(user_id = %recipient, error = %error, "Failed to load push subscriptions");
            return;
        }
    };

    for subscription in subscriptions {
        let keys = EndpointKeys {
            endpoint: subscription.endpoint,
            p256dh: subscription.p256dh,
            auth: subscription.auth,
        };

        if let Err(error) = state.push.deliver(&keys, payload).await {
            tracing::warn!(
                user_id = %recipient,
                endpoint = %keys.endpoint,
                error = %error,
                "Push delivery failed"
            );
        }
    }
}
