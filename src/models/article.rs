use super::{Title, TitleInput};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct Article {
    pub id: i64,
    pub tree_id: Option<i64>,
    pub template: String,
    pub login_required: bool,
    pub creation_date: DateTime<Utc>,
    pub changed_date: DateTime<Utc>,
    pub publication_date: Option<DateTime<Utc>>,
    pub publication_end_date: Option<DateTime<Utc>>,
}

impl Article {
    /// Whether the article is visible at `at`, given its publication window.
    pub fn is_published_at(&self, at: DateTime<Utc>) -> bool {
        match self.publication_date {
            Some(start) if start <= at => self.publication_end_date.map_or(true, |end| at < end),
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ArticleWithTitles {
    #[serde(flatten)]
    pub article: Article,
    pub titles: Vec<Title>,
}

impl ArticleWithTitles {
    pub fn title(&self, language: &str) -> Option<&Title> {
        self.titles.iter().find(|t| t.language == language)
    }
}

/// Raw submission of the article edit form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArticleInput {
    pub language: Option<String>,
    pub tree: Option<i64>,
    pub template: Option<String>,
    #[serde(default)]
    pub login_required: bool,
    #[serde(flatten)]
    pub title: TitleInput,
}

/// Raw submission of the publication dates form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PublicationDatesInput {
    pub language: Option<String>,
    pub publication_date: Option<String>,
    pub publication_end_date: Option<String>,
}

/// Article and title values that passed form validation, ready to store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CleanedArticle {
    pub language: String,
    pub tree_id: Option<i64>,
    pub template: String,
    pub login_required: bool,
    /// Timestamp the slug was rendered with. Becomes the creation date of a
    /// new article.
    pub creation_date: DateTime<Utc>,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub page_title: Option<String>,
    pub menu_title: Option<String>,
    pub meta_description: Option<String>,
    pub image: Option<String>,
}
