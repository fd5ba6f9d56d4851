//! Comment model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Comment entity
///
/// Always references an existing news article and an existing user.
/// `created` is assigned at insertion and drives chronological display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub news_id: i64,
    pub author_id: i64,
    pub text: String,
    pub created: DateTime<Utc>,
}

/// Comment joined with its author's username for display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentView {
    pub id: i64,
    pub news_id: i64,
    pub author_id: i64,
    pub author: String,
    pub text: String,
    pub created: DateTime<Utc>,
}
