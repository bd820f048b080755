use serde::Serialize;

/// One-to-one attachment of a category to a draft page.
#[derive(Debug, Clone, Serialize)]
pub struct Category {
    pub id: i64,
    pub page_id: i64,
    pub page_title: String,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.page_title)
    }
}
