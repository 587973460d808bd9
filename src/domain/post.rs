use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::ParsedDocument;

/// A durable record of one feed's content at time of fetch: channel-level
/// fields plus the publish date of the first item, when it has one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub feed_id: i64,
    pub title: String,
    pub url: String,
    pub description: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Build a post from a parsed document, attributed to `feed_id`.
    ///
    /// The publish date comes from the first item's `pubDate`, in the
    /// RFC 2822 layout feed publishers use (`Mon, 02 Jan 2006 15:04:05
    /// -0700`). A missing or unparsable date leaves `published_at` empty
    /// rather than failing the post.
    pub fn from_document(feed_id: i64, document: &ParsedDocument) -> Self {
        let published_at = document
            .items
            .first()
            .and_then(|item| item.pub_date.as_deref())
            .and_then(|raw| DateTime::parse_from_rfc2822(raw).ok())
            .map(|date| date.with_timezone(&Utc));

        let now = Utc::now();

        Post {
            id: Uuid::new_v4(),
            feed_id,
            title: document.title.clone(),
            url: document.link.clone(),
            description: if document.description.is_empty() {
                None
            } else {
                Some(document.description.clone())
            },
            published_at,
            created_at: now,
            updated_at: now,
        }
    }
}
