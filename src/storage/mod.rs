pub mod sqlite;
pub mod traits;

pub use sqlite::{SqliteFeedRepository, SqlitePostRepository, SqliteStorage};
pub use traits::{FeedRepository, PostRepository};
