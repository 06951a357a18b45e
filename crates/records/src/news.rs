//! Company news feed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use staffhub_auth::ScopedRecord;
use staffhub_core::{NewsId, Record};

/// A news item. Globally visible; publishing is admin-gated at the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub id: NewsId,
    pub title: String,
    pub content: String,
    pub category: Option<String>,
    pub author: String,
    pub views: u64,
    pub created_at: DateTime<Utc>,
}

impl NewsItem {
    pub fn new(
        author: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: NewsId::new(),
            title: title.into(),
            content: content.into(),
            category: None,
            author: author.into(),
            views: 0,
            created_at: Utc::now(),
        }
    }
}

impl Record for NewsItem {
    type Id = NewsId;

    fn id(&self) -> &NewsId {
        &self.id
    }
}

impl ScopedRecord for NewsItem {}
