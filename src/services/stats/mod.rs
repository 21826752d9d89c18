pub mod types;

pub use types::{StatKind, UserStats};

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::{
    AppState,
    db::{
        entities::{reaction::ContentType, stat_cache},
        repositories::{
            CommentRepository, FriendshipRepository, ReactionRepository, StatCacheRepository,
            SubmissionRepository,
        },
    },
    error::Result,
    tasks,
};

/// Length of the consecutive-day run ending at `today`, with a one-day grace
/// window: a user who has not yet drawn today keeps yesterday's run alive.
/// `days` must be sorted descending.
fn streak_from_days(days: &[NaiveDate], today: NaiveDate) -> i64 {
    let Some(most_recent) = days.first() else {
        return 0;
    };

    let mut cursor = if *most_recent == today {
        today
    } else {
        match today.pred_opt() {
            Some(yesterday) => yesterday,
            None => return 0,
        }
    };

    let mut streak = 0;
    for day in days {
        if *day != cursor {
            break;
        }

        streak += 1;
        match cursor.pred_opt() {
            Some(previous) => cursor = previous,
            None => break,
        }
    }

    streak
}

pub async fn compute(state: &AppState, user_id: Uuid, kind: StatKind) -> Result<i64> {
    let conn = state.db.connection();

    let value = match kind {
        StatKind::SubmissionStreak => {
            let days = SubmissionRepository::days_desc(conn, user_id).await?;
            streak_from_days(&days, Utc::now().date_naive())
        }
        StatKind::SubmissionTotal => SubmissionRepository::count_by_user(conn, user_id).await? as i64,
        StatKind::CommentTotal => CommentRepository::count_by_author(conn, user_id).await? as i64,
        StatKind::ReactionGivenTotal => ReactionRepository::count_given(conn, user_id).await? as i64,
        StatKind::ReactionReceivedTotal => {
            let submission_ids = SubmissionRepository::ids_by_owner(conn, user_id).await?;
            let comment_ids = CommentRepository::ids_by_author(conn, user_id).await?;

            let on_submissions =
                ReactionRepository::count_on_content(conn, ContentType::Submission, submission_ids)
                    .await?;
            let on_comments =
                ReactionRepository::count_on_content(conn, ContentType::Comment, comment_ids)
                    .await?;

            (on_submissions + on_comments) as i64
        }
        StatKind::FriendTotal => FriendshipRepository::count_for(conn, user_id).await? as i64,
    };

    Ok(value)
}

/// Compute a fresh value and persist it for display reuse. The cache write
/// is detached and allowed to fail silently; the returned value is always
/// the fresh one.
pub async fn compute_and_cache(state: &AppState, user_id: Uuid, kind: StatKind) -> Result<i64> {
    let value = compute(state, user_id, kind).await?;

    let task_state = state.clone();
    tasks::detach("stat-cache-write", async move {
        StatCacheRepository::upsert(
            task_state.db.connection(),
            user_id,
            kind.as_str(),
            value,
            Utc::now(),
        )
        .await
    });

    Ok(value)
}

/// Possibly-stale last-computed value. Callers that need freshness must
/// recompute explicitly.
pub async fn cached(
    state: &AppState,
    user_id: Uuid,
    kind: StatKind,
) -> Result<Option<stat_cache::Model>> {
    StatCacheRepository::find(state.db.connection(), user_id, kind.as_str()).await
}

pub async fn compute_all(state: &AppState, user_id: Uuid) -> Result<UserStats> {
    let mut stats = UserStats::default();

    for kind in StatKind::ALL {
        stats.set(kind, compute(state, user_id, kind).await?);
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(text: &str) -> NaiveDate {
        text.parse().unwrap()
    }

    #[test]
    fn empty_history_has_no_streak() {
        assert_eq!(streak_from_days(&[], day("2024-01-05")), 0);
    }

    #[test]
    fn run_ending_today_counts_every_day() {
        let days = [day("2024-01-05"), day("2024-01-04"), day("2024-01-03")];
        assert_eq!(streak_from_days(&days, day("2024-01-05")), 3);
    }

    #[test]
    fn run_ending_yesterday_keeps_streak_alive() {
        let days = [day("2024-01-04"), day("2024-01-03"), day("2024-01-02")];
        assert_eq!(streak_from_days(&days, day("2024-01-05")), 3);
    }

    #[test]
    fn gap_before_run_caps_the_streak() {
        // Submitted Jan 1-3, skipped Jan 4, submitted Jan 5. Seen from
        // Jan 5 the streak is exactly the new run of one.
        let days = [
            day("2024-01-05"),
            day("2024-01-03"),
            day("2024-01-02"),
            day("2024-01-01"),
        ];
        assert_eq!(streak_from_days(&days, day("2024-01-05")), 1);
    }

    #[test]
    fn run_ending_two_days_ago_is_broken() {
        let days = [day("2024-01-03"), day("2024-01-02")];
        assert_eq!(streak_from_days(&days, day("2024-01-05")), 0);
    }

    #[test]
    fn fourteen_day_run_counts_fourteen() {
        let mut days: Vec<NaiveDate> = (0..14)
            .map(|offset| day("2024-02-14") - chrono::Duration::days(offset))
            .collect();
        days.sort_unstable_by(|a, b| b.cmp(a));
        assert_eq!(streak_from_days(&days, day("2024-02-14")), 14);
    }
}
