use crate::domain::{Feed, Post};
use crate::errors::HarvestResult;

#[cfg_attr(test, mockall::automock)]
pub trait FeedRepository: Send + Sync {
    fn add(&self, feed: &Feed) -> HarvestResult<i64>;
    fn remove(&self, id: i64) -> HarvestResult<()>;
    fn get_all(&self) -> HarvestResult<Vec<Feed>>;
    fn get_by_id(&self, id: i64) -> HarvestResult<Option<Feed>>;
    fn exists(&self, url: &str) -> HarvestResult<bool>;

    /// Page of feeds due for refresh, never-fetched feeds first. The caller
    /// owns the offset; repeated calls with an advancing offset sweep the
    /// whole feed set.
    fn get_next_to_fetch(&self, limit: u32, offset: u32) -> HarvestResult<Vec<Feed>>;

    fn mark_fetched(&self, id: i64) -> HarvestResult<()>;
}

#[cfg_attr(test, mockall::automock)]
pub trait PostRepository: Send + Sync {
    /// Insert a post. A post with the same feed and URL as an existing one is
    /// silently dropped; uniqueness lives here, not in the poller.
    fn create(&self, post: &Post) -> HarvestResult<()>;

    fn get_recent(&self, limit: u32) -> HarvestResult<Vec<Post>>;
}
