use serde::Serialize;

use crate::services::stats::StatKind;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Reward {
    pub id: &'static str,
    pub name: &'static str,
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct Achievement {
    pub id: &'static str,
    pub name: &'static str,
    pub field: StatKind,
    pub threshold: i64,
    pub reward: Option<Reward>,
}

/// The milestone table. Fixed at compile time; unlock rows reference these
/// ids, so renaming an id is a data migration.
pub const CATALOG: &[Achievement] = &[
    Achievement {
        id: "first-drawing",
        name: "First Drawing",
        field: StatKind::SubmissionTotal,
        threshold: 1,
        reward: None,
    },
    Achievement {
        id: "ten-drawings",
        name: "Ten Drawings",
        field: StatKind::SubmissionTotal,
        threshold: 10,
        reward: None,
    },
    Achievement {
        id: "hundred-drawings",
        name: "Century of Drawings",
        field: StatKind::SubmissionTotal,
        threshold: 100,
        reward: Some(Reward {
            id: "GOLD_FRAME",
            name: "Gold profile frame",
        }),
    },
    Achievement {
        id: "streak-3",
        name: "Warming Up",
        field: StatKind::SubmissionStreak,
        threshold: 3,
        reward: None,
    },
    Achievement {
        id: "streak-7",
        name: "One Week Wonder",
        field: StatKind::SubmissionStreak,
        threshold: 7,
        reward: None,
    },
    Achievement {
        id: "streak-14",
        name: "Fortnight of Form",
        field: StatKind::SubmissionStreak,
        threshold: 14,
        reward: Some(Reward {
            id: "CUSTOM_PROFILE_PIC",
            name: "Custom profile picture",
        }),
    },
    Achievement {
        id: "streak-30",
        name: "Thirty Days Strong",
        field: StatKind::SubmissionStreak,
        threshold: 30,
        reward: Some(Reward {
            id: "RAINBOW_PALETTE",
            name: "Rainbow palette",
        }),
    },
    Achievement {
        id: "first-comment",
        name: "First Comment",
        field: StatKind::CommentTotal,
        threshold: 1,
        reward: None,
    },
    Achievement {
        id: "chatterbox",
        name: "Chatterbox",
        field: StatKind::CommentTotal,
        threshold: 50,
        reward: None,
    },
    Achievement {
        id: "first-reaction",
        name: "First Reaction",
        field: StatKind::ReactionGivenTotal,
        threshold: 1,
        reward: None,
    },
    Achievement {
        id: "hype-machine",
        name: "Hype Machine",
        field: StatKind::ReactionGivenTotal,
        threshold: 100,
        reward: None,
    },
    Achievement {
        id: "crowd-pleaser",
        name: "Crowd Pleaser",
        field: StatKind::ReactionReceivedTotal,
        threshold: 25,
        reward: Some(Reward {
            id: "SPOTLIGHT_BADGE",
            name: "Spotlight badge",
        }),
    },
    Achievement {
        id: "first-friend",
        name: "First Friend",
        field: StatKind::FriendTotal,
        threshold: 1,
        reward: None,
    },
    Achievement {
        id: "social-circle",
        name: "Social Circle",
        field: StatKind::FriendTotal,
        threshold: 5,
        reward: None,
    },
];

pub fn find(id: &str) -> Option<&'static Achievement> {
    CATALOG.iter().find(|achievement| achievement.id == id)
}

pub fn with_fields(fields: &[StatKind]) -> impl Iterator<Item = &'static Achievement> + '_ {
    CATALOG
        .iter()
        .filter(move |achievement| fields.contains(&achievement.field))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_ids_are_unique() {
        let mut ids: Vec<&str> = CATALOG.iter().map(|a| a.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), CATALOG.len());
    }

    #[test]
    fn field_filter_only_returns_matching_achievements() {
        let streaks: Vec<_> = with_fields(&[StatKind::SubmissionStreak]).collect();
        assert!(!streaks.is_empty());
        assert!(streaks.iter().all(|a| a.field == StatKind::SubmissionStreak));
    }
}
