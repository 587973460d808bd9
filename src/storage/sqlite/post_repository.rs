use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::Row;
use uuid::Uuid;

use crate::domain::Post;
use crate::errors::{HarvestError, HarvestResult};
use crate::storage::sqlite::SqliteStorage;
use crate::storage::traits::PostRepository;

pub struct SqlitePostRepository {
    storage: SqliteStorage,
}

impl SqlitePostRepository {
    pub fn new(storage: SqliteStorage) -> Self {
        Self { storage }
    }

    fn timestamp_from_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
        let raw: String = row.get(idx)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|date| date.with_timezone(&Utc))
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
    }

    fn post_from_row(row: &Row<'_>) -> rusqlite::Result<Post> {
        let raw_id: String = row.get(0)?;
        let id = Uuid::parse_str(&raw_id)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(e)))?;

        let published_at = match row.get::<_, Option<String>>(5)? {
            Some(raw) => Some(
                DateTime::parse_from_rfc3339(&raw)
                    .map(|date| date.with_timezone(&Utc))
                    .map_err(|e| {
                        rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(e))
                    })?,
            ),
            None => None,
        };

        Ok(Post {
            id,
            feed_id: row.get(1)?,
            title: row.get(2)?,
            url: row.get(3)?,
            description: row.get(4)?,
            published_at,
            created_at: Self::timestamp_from_column(row, 6)?,
            updated_at: Self::timestamp_from_column(row, 7)?,
        })
    }
}

impl PostRepository for SqlitePostRepository {
    fn create(&self, post: &Post) -> HarvestResult<()> {
        let conn = self.storage.connection()?;

        // OR IGNORE: a replay of the same channel link for the same feed is a
        // duplicate, not an error
        conn.execute(
            "INSERT OR IGNORE INTO posts
             (id, feed_id, title, url, description, published_at, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            (
                post.id.to_string(),
                post.feed_id,
                &post.title,
                &post.url,
                &post.description,
                post.published_at.map(|d| d.to_rfc3339()),
                post.created_at.to_rfc3339(),
                post.updated_at.to_rfc3339(),
            ),
        )?;

        Ok(())
    }

    fn get_recent(&self, limit: u32) -> HarvestResult<Vec<Post>> {
        let conn = self.storage.connection()?;
        let mut stmt = conn.prepare(
            "SELECT id, feed_id, title, url, description, published_at, created_at, updated_at
             FROM posts
             ORDER BY created_at DESC, id
             LIMIT ?1",
        )?;

        let posts = stmt.query_map([limit], Self::post_from_row)?;

        posts
            .collect::<Result<Vec<_>, _>>()
            .map_err(HarvestError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DocumentItem, Feed, ParsedDocument};
    use crate::storage::sqlite::SqliteFeedRepository;
    use crate::storage::traits::FeedRepository;

    fn setup() -> (SqliteFeedRepository, SqlitePostRepository) {
        let storage = SqliteStorage::in_memory().unwrap();
        let feed_repo = SqliteFeedRepository::new(storage.clone());
        let post_repo = SqlitePostRepository::new(storage);
        (feed_repo, post_repo)
    }

    fn registered_feed(feed_repo: &SqliteFeedRepository) -> i64 {
        feed_repo
            .add(&Feed::new(
                "https://example.com/feed".to_string(),
                Some("Example Feed".to_string()),
            ))
            .unwrap()
    }

    fn document() -> ParsedDocument {
        ParsedDocument {
            title: "Example Feed".to_string(),
            link: "https://example.com/".to_string(),
            description: "Sample".to_string(),
            items: vec![DocumentItem {
                pub_date: Some("Thu, 28 Dec 2023 10:30:00 +0000".to_string()),
                ..Default::default()
            }],
        }
    }

    #[test]
    fn test_create_and_get_recent() {
        let (feed_repo, post_repo) = setup();
        let feed_id = registered_feed(&feed_repo);

        let post = Post::from_document(feed_id, &document());
        post_repo.create(&post).unwrap();

        let recent = post_repo.get_recent(10).unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].id, post.id);
        assert_eq!(recent[0].feed_id, feed_id);
        assert_eq!(recent[0].title, "Example Feed");
        assert_eq!(recent[0].published_at, post.published_at);
    }

    #[test]
    fn test_duplicate_feed_url_pair_is_dropped() {
        let (feed_repo, post_repo) = setup();
        let feed_id = registered_feed(&feed_repo);

        let first = Post::from_document(feed_id, &document());
        let replay = Post::from_document(feed_id, &document());
        post_repo.create(&first).unwrap();
        post_repo.create(&replay).unwrap();

        let recent = post_repo.get_recent(10).unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].id, first.id);
    }

    #[test]
    fn test_post_without_published_at_round_trips() {
        let (feed_repo, post_repo) = setup();
        let feed_id = registered_feed(&feed_repo);

        let mut doc = document();
        doc.items.clear();
        let post = Post::from_document(feed_id, &doc);
        post_repo.create(&post).unwrap();

        let recent = post_repo.get_recent(10).unwrap();
        assert!(recent[0].published_at.is_none());
    }

    #[test]
    fn test_get_recent_respects_limit() {
        let (feed_repo, post_repo) = setup();
        let feed_id = registered_feed(&feed_repo);

        for i in 0..5 {
            let mut doc = document();
            doc.link = format!("https://example.com/{}", i);
            post_repo.create(&Post::from_document(feed_id, &doc)).unwrap();
        }

        let recent = post_repo.get_recent(3).unwrap();
        assert_eq!(recent.len(), 3);
    }

    #[test]
    fn test_removing_feed_cascades_to_posts() {
        let (feed_repo, post_repo) = setup();
        let feed_id = registered_feed(&feed_repo);

        post_repo
            .create(&Post::from_document(feed_id, &document()))
            .unwrap();
        feed_repo.remove(feed_id).unwrap();

        assert!(post_repo.get_recent(10).unwrap().is_empty());
    }
}
