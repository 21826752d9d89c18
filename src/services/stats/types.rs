use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// The metrics the engagement engine knows how to compute. The string form
/// doubles as the stat-cache row key and the achievement trigger field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatKind {
    SubmissionStreak,
    SubmissionTotal,
    CommentTotal,
    ReactionGivenTotal,
    ReactionReceivedTotal,
    FriendTotal,
}

impl StatKind {
    pub const ALL: [StatKind; 6] = [
        StatKind::SubmissionStreak,
        StatKind::SubmissionTotal,
        StatKind::CommentTotal,
        StatKind::ReactionGivenTotal,
        StatKind::ReactionReceivedTotal,
        StatKind::FriendTotal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StatKind::SubmissionStreak => "submission_streak",
            StatKind::SubmissionTotal => "submission_total",
            StatKind::CommentTotal => "comment_total",
            StatKind::ReactionGivenTotal => "reaction_given_total",
            StatKind::ReactionReceivedTotal => "reaction_received_total",
            StatKind::FriendTotal => "friend_total",
        }
    }
}

impl fmt::Display for StatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatKind {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        StatKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == value)
            .ok_or_else(|| AppError::UnknownStat(value.to_string()))
    }
}

#[derive(Clone, Copy, Debug, Default, Serialize)]
pub struct UserStats {
    pub submission_streak: i64,
    pub submission_total: i64,
    pub comment_total: i64,
    pub reaction_given_total: i64,
    pub reaction_received_total: i64,
    pub friend_total: i64,
}

impl UserStats {
    pub fn get(&self, kind: StatKind) -> i64 {
        match kind {
            StatKind::SubmissionStreak => self.submission_streak,
            StatKind::SubmissionTotal => self.submission_total,
            StatKind::CommentTotal => self.comment_total,
            StatKind::ReactionGivenTotal => self.reaction_given_total,
            StatKind::ReactionReceivedTotal => self.reaction_received_total,
            StatKind::FriendTotal => self.friend_total,
        }
    }

    pub fn set(&mut self, kind: StatKind, value: i64) {
        match kind {
            StatKind::SubmissionStreak => self.submission_streak = value,
            StatKind::SubmissionTotal => self.submission_total = value,
            StatKind::CommentTotal => self.comment_total = value,
            StatKind::ReactionGivenTotal => self.reaction_given_total = value,
            StatKind::ReactionReceivedTotal => self.reaction_received_total = value,
            StatKind::FriendTotal => self.friend_total = value,
        }
    }
}
