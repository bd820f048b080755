use serde::{Deserialize, Serialize};

/// Per-language display fields of an article. `slug` holds the rendered,
/// stored form and is unique per (tree, language).
#[derive(Debug, Clone, Serialize)]
pub struct Title {
    pub id: i64,
    pub article_id: i64,
    pub language: String,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub page_title: Option<String>,
    pub menu_title: Option<String>,
    pub meta_description: Option<String>,
    pub image: Option<String>,
}

/// Title fields as they arrive from a submission, before cleaning.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TitleInput {
    #[serde(default)]
    pub title: String,
    /// `None` leaves the stored slug of an existing title untouched.
    pub slug: Option<String>,
    pub description: Option<String>,
    pub page_title: Option<String>,
    pub menu_title: Option<String>,
    pub meta_description: Option<String>,
    pub image: Option<String>,
}
