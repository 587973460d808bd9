mod connection;
mod feed_repository;
mod post_repository;

pub use connection::SqliteStorage;
pub use feed_repository::SqliteFeedRepository;
pub use post_repository::SqlitePostRepository;
