//! News model
//!
//! A news article is public content: anyone may read it and its comments,
//! and it is owned by no one. The `date` field drives the
//! reverse-chronological home page ordering.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// News entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct News {
    /// Unique identifier
    pub id: i64,
    /// Headline
    pub title: String,
    /// Body text
    pub text: String,
    /// Publication timestamp, defaults to creation time
    pub date: DateTime<Utc>,
}

/// Input for creating a news article
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNewsInput {
    /// Headline
    pub title: String,
    /// Body text
    pub text: String,
    /// Publication timestamp; `None` means "now"
    pub date: Option<DateTime<Utc>>,
}

impl CreateNewsInput {
    /// Create a new input with the publication date defaulted to now
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            date: None,
        }
    }

    /// Set an explicit publication date
    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }
}
