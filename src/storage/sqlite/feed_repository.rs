use rusqlite::Row;

use crate::domain::Feed;
use crate::errors::{HarvestError, HarvestResult};
use crate::storage::sqlite::SqliteStorage;
use crate::storage::traits::FeedRepository;

const FEED_COLUMNS: &str = "id, url, title, last_fetched_at, created_at";

pub struct SqliteFeedRepository {
    storage: SqliteStorage,
}

impl SqliteFeedRepository {
    pub fn new(storage: SqliteStorage) -> Self {
        Self { storage }
    }

    fn feed_from_row(row: &Row<'_>) -> rusqlite::Result<Feed> {
        Ok(Feed {
            id: Some(row.get(0)?),
            url: row.get(1)?,
            title: row.get(2)?,
            last_fetched_at: row.get(3)?,
            created_at: row.get(4)?,
        })
    }
}

impl FeedRepository for SqliteFeedRepository {
    fn add(&self, feed: &Feed) -> HarvestResult<i64> {
        let conn = self.storage.connection()?;

        // Check within the same connection to avoid deadlock
        let mut stmt = conn.prepare("SELECT EXISTS(SELECT 1 FROM feeds WHERE url = ?1)")?;
        let exists: bool = stmt.query_row([&feed.url], |row| row.get(0))?;
        drop(stmt);

        if exists {
            return Err(HarvestError::FeedAlreadyExists(feed.url.clone()));
        }

        conn.execute(
            "INSERT INTO feeds (url, title) VALUES (?1, ?2)",
            (&feed.url, &feed.title),
        )?;

        Ok(conn.last_insert_rowid())
    }

    fn remove(&self, id: i64) -> HarvestResult<()> {
        let conn = self.storage.connection()?;
        let removed = conn.execute("DELETE FROM feeds WHERE id = ?1", [id])?;

        if removed == 0 {
            return Err(HarvestError::FeedNotFound(id.to_string()));
        }

        Ok(())
    }

    fn get_all(&self) -> HarvestResult<Vec<Feed>> {
        let conn = self.storage.connection()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM feeds ORDER BY created_at DESC",
            FEED_COLUMNS
        ))?;

        let feeds = stmt.query_map([], Self::feed_from_row)?;

        feeds
            .collect::<Result<Vec<_>, _>>()
            .map_err(HarvestError::from)
    }

    fn get_by_id(&self, id: i64) -> HarvestResult<Option<Feed>> {
        let conn = self.storage.connection()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM feeds WHERE id = ?1",
            FEED_COLUMNS
        ))?;

        match stmt.query_row([id], Self::feed_from_row) {
            Ok(feed) => Ok(Some(feed)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(HarvestError::from(e)),
        }
    }

    fn exists(&self, url: &str) -> HarvestResult<bool> {
        let conn = self.storage.connection()?;
        let mut stmt = conn.prepare("SELECT EXISTS(SELECT 1 FROM feeds WHERE url = ?1)")?;
        let exists: bool = stmt.query_row([url], |row| row.get(0))?;
        Ok(exists)
    }

    fn get_next_to_fetch(&self, limit: u32, offset: u32) -> HarvestResult<Vec<Feed>> {
        let conn = self.storage.connection()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM feeds
             ORDER BY last_fetched_at IS NOT NULL, last_fetched_at, id
             LIMIT ?1 OFFSET ?2",
            FEED_COLUMNS
        ))?;

        let feeds = stmt.query_map([limit, offset], Self::feed_from_row)?;

        feeds
            .collect::<Result<Vec<_>, _>>()
            .map_err(HarvestError::from)
    }

    fn mark_fetched(&self, id: i64) -> HarvestResult<()> {
        let conn = self.storage.connection()?;
        conn.execute(
            "UPDATE feeds SET last_fetched_at = datetime('now') WHERE id = ?1",
            [id],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_repo() -> SqliteFeedRepository {
        let storage = SqliteStorage::in_memory().unwrap();
        SqliteFeedRepository::new(storage)
    }

    fn feed(url: &str) -> Feed {
        Feed::new(url.to_string(), Some("Example Feed".to_string()))
    }

    #[test]
    fn test_add_and_get_feed() {
        let repo = setup_repo();

        let id = repo.add(&feed("https://example.com/feed")).unwrap();
        assert!(id > 0);

        let retrieved = repo.get_by_id(id).unwrap().unwrap();
        assert_eq!(retrieved.url, "https://example.com/feed");
        assert_eq!(retrieved.title.as_deref(), Some("Example Feed"));
        assert!(retrieved.last_fetched_at.is_none());
    }

    #[test]
    fn test_duplicate_url_rejected() {
        let repo = setup_repo();

        repo.add(&feed("https://example.com/feed")).unwrap();
        let result = repo.add(&feed("https://example.com/feed"));

        assert!(matches!(result, Err(HarvestError::FeedAlreadyExists(_))));
    }

    #[test]
    fn test_remove_feed() {
        let repo = setup_repo();

        let id = repo.add(&feed("https://example.com/feed")).unwrap();
        repo.remove(id).unwrap();

        assert!(repo.get_by_id(id).unwrap().is_none());
    }

    #[test]
    fn test_remove_unknown_feed_fails() {
        let repo = setup_repo();

        let result = repo.remove(42);

        assert!(matches!(result, Err(HarvestError::FeedNotFound(_))));
    }

    #[test]
    fn test_exists() {
        let repo = setup_repo();

        assert!(!repo.exists("https://example.com/feed").unwrap());
        repo.add(&feed("https://example.com/feed")).unwrap();
        assert!(repo.exists("https://example.com/feed").unwrap());
    }

    #[test]
    fn test_never_fetched_feeds_come_first() {
        let repo = setup_repo();

        let stale = repo.add(&feed("https://a.example.com/feed")).unwrap();
        let fresh = repo.add(&feed("https://b.example.com/feed")).unwrap();
        repo.mark_fetched(stale).unwrap();

        let batch = repo.get_next_to_fetch(10, 0).unwrap();

        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0].id, Some(fresh));
        assert_eq!(batch[1].id, Some(stale));
    }

    #[test]
    fn test_limit_and_offset_page_through_feeds() {
        let repo = setup_repo();
        for i in 0..5 {
            repo.add(&feed(&format!("https://example.com/feed/{}", i)))
                .unwrap();
        }

        let first = repo.get_next_to_fetch(2, 0).unwrap();
        let second = repo.get_next_to_fetch(2, 2).unwrap();
        let tail = repo.get_next_to_fetch(2, 4).unwrap();
        let past_end = repo.get_next_to_fetch(2, 6).unwrap();

        assert_eq!(first.len(), 2);
        assert_eq!(second.len(), 2);
        assert_eq!(tail.len(), 1);
        assert!(past_end.is_empty());
    }

    #[test]
    fn test_mark_fetched_sets_timestamp() {
        let repo = setup_repo();

        let id = repo.add(&feed("https://example.com/feed")).unwrap();
        repo.mark_fetched(id).unwrap();

        let retrieved = repo.get_by_id(id).unwrap().unwrap();
        assert!(retrieved.last_fetched_at.is_some());
    }
}
