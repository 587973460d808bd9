pub mod document;
pub mod feed;
pub mod outcome;
pub mod post;

pub use document::{DocumentItem, ParsedDocument};
pub use feed::Feed;
pub use outcome::FetchOutcome;
pub use post::Post;
