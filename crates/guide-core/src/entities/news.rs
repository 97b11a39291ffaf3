//! News entity - site announcements

use chrono::{DateTime, Utc};

use crate::error::DomainError;

/// Maximum title length
pub const MAX_TITLE_LEN: usize = 200;

/// A news article
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct News {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub author_id: i64,
    pub view_count: i64,
    pub published_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl News {
    pub fn apply(&mut self, patch: NewsPatch) -> Result<(), DomainError> {
        if let Some(title) = patch.title {
            self.title = validate_title(&title)?;
        }
        if let Some(content) = patch.content {
            self.content = validate_content(&content)?;
        }
        if let Some(image_url) = patch.image_url {
            self.image_url = Some(image_url);
        }
        self.updated_at = Utc::now();
        Ok(())
    }
}

/// A validated article ready to insert
#[derive(Debug, Clone)]
pub struct NewNews {
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub author_id: i64,
}

impl NewNews {
    pub fn new(
        title: &str,
        content: &str,
        image_url: Option<String>,
        author_id: i64,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            title: validate_title(title)?,
            content: validate_content(content)?,
            image_url,
            author_id,
        })
    }
}

/// Editable article fields
#[derive(Debug, Clone, Default)]
pub struct NewsPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub image_url: Option<String>,
}

fn validate_title(title: &str) -> Result<String, DomainError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(DomainError::ValidationError("title is required".to_string()));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(DomainError::ContentTooLong { max: MAX_TITLE_LEN });
    }
    Ok(title.to_string())
}

fn validate_content(content: &str) -> Result<String, DomainError> {
    if content.trim().is_empty() {
        return Err(DomainError::ValidationError("content is required".to_string()));
    }
    Ok(content.to_string())
}
