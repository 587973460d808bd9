use crate::domain::Feed;
use crate::storage::traits::FeedRepository;

/// Paging cursor over the feed set. An explicit value owned by the caller, so
/// several schedulers (and tests) can run without shared state.
#[derive(Debug)]
pub struct Cursor {
    limit: u32,
    offset: u32,
}

impl Cursor {
    pub fn new(limit: u32) -> Self {
        Self {
            limit: limit.max(1),
            offset: 0,
        }
    }

    /// Next page of feeds due for refresh.
    ///
    /// The offset advances by the page size on every non-empty page, whether
    /// or not the page was full, so repeated calls sweep the whole feed set.
    /// An empty page ends the sweep and rewinds to the start. A storage error
    /// is logged, yields no work, and leaves the offset where it was.
    pub fn next_batch(&mut self, feeds: &dyn FeedRepository) -> Vec<Feed> {
        let batch = match feeds.get_next_to_fetch(self.limit, self.offset) {
            Ok(batch) => batch,
            Err(err) => {
                log::error!("failed to select feeds for refresh: {}", err);
                return Vec::new();
            }
        };

        if batch.is_empty() {
            self.offset = 0;
        } else {
            self.offset += self.limit;
        }

        batch
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }
}
