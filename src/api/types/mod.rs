mod achievements;
mod common;
mod content;
mod feed;
mod social;
mod stats;

pub use achievements::*;
pub use common::*;
pub use content::*;
pub use feed::*;
pub use social::*;
pub use stats::*;
