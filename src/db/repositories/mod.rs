pub mod achievement;
pub mod activity;
pub mod comment;
pub mod favorite;
pub mod friendship;
pub mod prompt;
pub mod push;
pub mod reaction;
pub mod stat_cache;
pub mod submission;
pub mod user;

pub use achievement::AchievementRepository;
pub use activity::ActivityRepository;
pub use comment::CommentRepository;
pub use favorite::FavoriteRepository;
pub use friendship::FriendshipRepository;
pub use prompt::PromptRepository;
pub use push::PushRepository;
pub use reaction::ReactionRepository;
pub use stat_cache::StatCacheRepository;
pub use submission::SubmissionRepository;
pub use user::UserRepository;

use sea_orm::TryInsertResult;

/// Outcome of an insert-ignore write: true when the row was written, false
/// when a unique-constraint conflict made the insert a no-op.
pub(crate) fn inserted<T>(result: &TryInsertResult<T>) -> bool {
    matches!(result, TryInsertResult::Inserted(_))
}
