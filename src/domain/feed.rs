use serde::{Deserialize, Serialize};

/// A registered syndication source, polled on a cycle.
/// Identity and timestamps are owned by storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feed {
    pub id: Option<i64>,
    pub url: String,
    pub title: Option<String>,
    pub last_fetched_at: Option<String>,
    pub created_at: Option<String>,
}

impl Feed {
    pub fn new(url: String, title: Option<String>) -> Self {
        Self {
            id: None,
            url,
            title,
            last_fetched_at: None,
            created_at: None,
        }
    }
}
