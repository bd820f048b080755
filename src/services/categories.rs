use crate::models::Category;
use crate::Database;
use rusqlite::{ErrorCode, OptionalExtension};

#[derive(Debug, thiserror::Error)]
pub enum CategoryError {
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),
    #[error(transparent)]
    Database(#[from] anyhow::Error),
}

impl From<rusqlite::Error> for CategoryError {
    fn from(err: rusqlite::Error) -> Self {
        match err.sqlite_error_code() {
            Some(ErrorCode::ConstraintViolation) => {
                Self::ConstraintViolation(err.to_string())
            }
            _ => Self::Database(err.into()),
        }
    }
}

/// Attaches a category to `page_id`. The page must be a draft on `site_id`
/// and must not already have a category; the store enforces all three.
pub fn attach(db: &Database, page_id: i64, site_id: i64) -> Result<i64, CategoryError> {
    let conn = db.get()?;
    let inserted = conn.execute(
        r#"
        INSERT INTO categories (page_id)
        SELECT id FROM pages WHERE id = ? AND publisher_is_draft = 1 AND site_id = ?
        "#,
        (page_id, site_id),
    )?;
    if inserted == 0 {
        return Err(CategoryError::ConstraintViolation(format!(
            "page {} is not a draft page on site {}",
            page_id, site_id
        )));
    }
    let id = conn.last_insert_rowid();
    tracing::info!("Attached category id={} to page id={}", id, page_id);
    Ok(id)
}

pub fn detach(db: &Database, page_id: i64) -> anyhow::Result<bool> {
    let conn = db.get()?;
    let deleted = conn.execute("DELETE FROM categories WHERE page_id = ?", [page_id])?;
    if deleted == 0 {
        tracing::warn!("Page id={} has no category", page_id);
    }
    Ok(deleted > 0)
}

pub fn get_for_page(db: &Database, page_id: i64) -> anyhow::Result<Option<Category>> {
    let conn = db.get()?;
    let category = conn
        .query_row(
            "SELECT c.id, c.page_id, p.title FROM categories c JOIN pages p ON c.page_id = p.id WHERE c.page_id = ?",
            [page_id],
            |row| {
                Ok(Category {
                    id: row.get(0)?,
                    page_id: row.get(1)?,
                    page_title: row.get(2)?,
                })
            },
        )
        .optional()?;
    Ok(category)
}

pub fn list_categories(db: &Database, site_id: i64) -> anyhow::Result<Vec<Category>> {
    let conn = db.get()?;
    let mut stmt = conn.prepare(
        "SELECT c.id, c.page_id, p.title FROM categories c JOIN pages p ON c.page_id = p.id WHERE p.site_id = ? ORDER BY p.title",
    )?;
    let categories = stmt
        .query_map([site_id], |row| {
            Ok(Category {
                id: row.get(0)?,
                page_id: row.get(1)?,
                page_title: row.get(2)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(categories)
}
