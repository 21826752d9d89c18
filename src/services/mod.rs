pub mod achievements;
pub mod comments;
pub mod favorites;
pub mod feed;
pub mod friendships;
pub mod notifications;
pub mod reactions;
pub mod stats;
pub mod submissions;
