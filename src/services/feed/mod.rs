pub mod types;

pub use types::{ActivityActor, ActivityEntry, ActivityKind, SubmissionSummary};

use std::collections::{HashMap, HashSet};

use chrono::{Duration, NaiveDate, Utc};
use uuid::Uuid;

use crate::{
    AppState,
    db::repositories::{
        ActivityRepository, CommentRepository, FriendshipRepository, PromptRepository,
        ReactionRepository, SubmissionRepository,
    },
    error::Result,
};

/// Feed fetch using the user's stored read watermark.
pub async fn feed(state: &AppState, user_id: Uuid) -> Result<Vec<ActivityEntry>> {
    let watermark = ActivityRepository::watermark_for(state.db.connection(), user_id)
        .await?
        .map(|row| row.last_read_activity_id)
        .unwrap_or_default();

    feed_with_watermark(state, user_id, &watermark).await
}

/// Merge comment and reaction events on the friend set's submissions into a
/// single list, newest first, annotated with read state. An empty watermark
/// means nothing has been read. Never returns null; an empty list is valid.
pub async fn feed_with_watermark(
    state: &AppState,
    user_id: Uuid,
    watermark: &str,
) -> Result<Vec<ActivityEntry>> {
    let conn = state.db.connection();

    let mut visible_owners = FriendshipRepository::friend_ids_of(conn, user_id).await?;
    visible_owners.push(user_id);

    // Friends' submissions are the visibility boundary; nothing outside
    // this set is eligible.
    let submissions = SubmissionRepository::list_by_owners(conn, visible_owners.clone()).await?;
    if submissions.is_empty() {
        return Ok(Vec::new());
    }

    let submission_ids: Vec<Uuid> = submissions.iter().map(|s| s.id).collect();
    let since = Utc::now() - Duration::days(state.config.feed.activity_window_days);

    let comments =
        CommentRepository::list_since_on_submissions(conn, submission_ids.clone(), since).await?;
    let reactions =
        ReactionRepository::list_since_on_submissions(conn, submission_ids, since).await?;

    let friend_set: HashSet<Uuid> = visible_owners.into_iter().collect();

    let prompt_days: Vec<NaiveDate> = submissions
        .iter()
        .map(|s| s.day)
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    let prompt_text: HashMap<NaiveDate, String> = PromptRepository::find_for_days(conn, prompt_days)
        .await?
        .into_iter()
        .map(|prompt| (prompt.day, prompt.text))
        .collect();

    let summaries: HashMap<Uuid, SubmissionSummary> = submissions
        .into_iter()
        .map(|submission| {
            let summary = SubmissionSummary {
                id: submission.id,
                prompt: prompt_text
                    .get(&submission.day)
                    .cloned()
                    .unwrap_or_default(),
                image_url: submission.image_url,
            };
            (submission.id, summary)
        })
        .collect();

    let mut entries = Vec::new();

    for (comment, author) in comments {
        // No self-notifications, and a defensive re-check that the author
        // is still inside the friend set.
        if comment.user_id == user_id || !friend_set.contains(&comment.user_id) {
            continue;
        }
        let Some(author) = author else { continue };
        let Some(summary) = summaries.get(&comment.submission_id) else {
            continue;
        };

        entries.push(ActivityEntry {
            id: format!("comment-{}", comment.id),
            kind: ActivityKind::Comment,
            actor: ActivityActor {
                id: author.id,
                username: author.username,
            },
            submission: summary.clone(),
            text: Some(comment.text),
            reaction_id: None,
            created_at: comment.created_at,
            is_read: false,
        });
    }

    for (reaction, actor) in reactions {
        if reaction.user_id == user_id || !friend_set.contains(&reaction.user_id) {
            continue;
        }
        let Some(actor) = actor else { continue };
        let Some(summary) = summaries.get(&reaction.content_id) else {
            continue;
        };

        entries.push(ActivityEntry {
            id: format!("reaction-{}", reaction.id),
            kind: ActivityKind::Reaction,
            actor: ActivityActor {
                id: actor.id,
                username: actor.username,
            },
            submission: summary.clone(),
            text: None,
            reaction_id: Some(reaction.reaction_id),
            created_at: reaction.created_at,
            is_read: false,
        });
    }

    entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    // Read state is a lexicographic comparison of composite ids against the
    // stored watermark. Mixed `comment-`/`reaction-` prefixes do not track
    // chronology, so read state can be wrong across type boundaries.
    if !watermark.is_empty() {
        for entry in &mut entries {
            entry.is_read = entry.id.as_str() <= watermark;
        }
    }

    Ok(entries)
}

/// Idempotent last-write-wins upsert of the user's read marker.
pub async fn set_watermark(state: &AppState, user_id: Uuid, activity_id: &str) -> Result<()> {
    ActivityRepository::set_watermark(state.db.connection(), user_id, activity_id, Utc::now()).await
}
