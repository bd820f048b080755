use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Application hook a published page carries when it hosts an article tree.
pub const ARTICLES_APP: &str = "CMSArticlesApp";

/// A page of the host page tree. Articles hang below published pages that
/// host the articles application; categories attach to draft pages.
#[derive(Debug, Clone, Serialize)]
pub struct Page {
    pub id: i64,
    pub site_id: i64,
    pub title: String,
    pub publisher_is_draft: bool,
    pub application_urls: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Page {
    pub fn is_article_tree(&self) -> bool {
        !self.publisher_is_draft && self.application_urls.as_deref() == Some(ARTICLES_APP)
    }
}

impl std::fmt::Display for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.title)
    }
}

#[derive(Debug, Deserialize)]
pub struct CreatePage {
    pub site_id: i64,
    pub title: String,
    #[serde(default = "default_draft")]
    pub publisher_is_draft: bool,
    pub application_urls: Option<String>,
}

fn default_draft() -> bool {
    true
}
