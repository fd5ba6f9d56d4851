//! News service
//!
//! Read-side presentation of news articles: the paginated home page and
//! the detail view with its chronological comment thread.

use crate::db::repositories::{CommentRepository, NewsRepository};
use crate::models::{CommentView, CreateNewsInput, News};
use anyhow::Result;
use std::sync::Arc;

/// Default number of articles on the home page
pub const DEFAULT_NEWS_PER_PAGE: u32 = 10;

/// News service
pub struct NewsService {
    news_repo: Arc<dyn NewsRepository>,
    comment_repo: Arc<dyn CommentRepository>,
    news_per_page: u32,
}

impl NewsService {
    /// Create a new news service
    pub fn new(
        news_repo: Arc<dyn NewsRepository>,
        comment_repo: Arc<dyn CommentRepository>,
        news_per_page: u32,
    ) -> Self {
        Self {
            news_repo,
            comment_repo,
            news_per_page,
        }
    }

    /// Create a news article
    pub async fn create(&self, input: CreateNewsInput) -> Result<News> {
        self.news_repo.create(&input).await
    }

    /// Home page: the most recent articles, newest first
    pub async fn home_page(&self) -> Result<Vec<News>> {
        self.news_repo.list_recent(self.news_per_page as i64).await
    }

    /// Detail view: the article plus its comments, oldest comment first
    pub async fn detail(&self, id: i64) -> Result<Option<(News, Vec<CommentView>)>> {
        let news = match self.news_repo.get_by_id(id).await? {
            Some(n) => n,
            None => return Ok(None),
        };
        let comments = self.comment_repo.list_for_news(id).await?;
        Ok(Some((news, comments)))
    }

    /// Look up a single article
    pub async fn get(&self, id: i64) -> Result<Option<News>> {
        self.news_repo.get_by_id(id).await
    }
}
