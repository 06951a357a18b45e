//! Knowledge base: categories and articles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use staffhub_auth::ScopedRecord;
use staffhub_core::{ArticleId, CategoryId, Record};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeCategory {
    pub id: CategoryId,
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl KnowledgeCategory {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: CategoryId::new(),
            name: name.into(),
            description: None,
            icon: None,
            created_at: Utc::now(),
        }
    }
}

impl Record for KnowledgeCategory {
    type Id = CategoryId;

    fn id(&self) -> &CategoryId {
        &self.id
    }
}

impl ScopedRecord for KnowledgeCategory {}

/// An article. Reading one bumps its view counter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeArticle {
    pub id: ArticleId,
    pub category_id: CategoryId,
    pub title: String,
    pub content: String,
    pub author: String,
    pub views: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl KnowledgeArticle {
    pub fn new(
        category_id: CategoryId,
        author: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ArticleId::new(),
            category_id,
            title: title.into(),
            content: content.into(),
            author: author.into(),
            views: 0,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Record for KnowledgeArticle {
    type Id = ArticleId;

    fn id(&self) -> &ArticleId {
        &self.id
    }
}

impl ScopedRecord for KnowledgeArticle {}
