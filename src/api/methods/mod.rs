pub mod achievements;
pub mod content;
pub mod feed;
pub mod social;
pub mod stats;
