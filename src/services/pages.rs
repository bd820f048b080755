use crate::models::{CreatePage, Page, ARTICLES_APP};
use crate::Database;
use anyhow::Result;
use rusqlite::{Connection, OptionalExtension};

const PAGE_COLUMNS: &str = "id, site_id, title, publisher_is_draft, application_urls, created_at";

pub fn create_page(db: &Database, input: CreatePage) -> Result<i64> {
    let conn = db.get()?;
    conn.execute(
        "INSERT INTO pages (site_id, title, publisher_is_draft, application_urls) VALUES (?, ?, ?, ?)",
        (
            input.site_id,
            &input.title,
            input.publisher_is_draft,
            &input.application_urls,
        ),
    )?;
    let id = conn.last_insert_rowid();
    tracing::info!("Created page id={} site={}", id, input.site_id);
    Ok(id)
}

pub fn get_page(db: &Database, id: i64) -> Result<Option<Page>> {
    let conn = db.get()?;
    let page = conn
        .query_row(
            &format!("SELECT {} FROM pages WHERE id = ?", PAGE_COLUMNS),
            [id],
            row_to_page,
        )
        .optional()?;
    Ok(page)
}

pub fn list_pages(db: &Database, site_id: Option<i64>) -> Result<Vec<Page>> {
    let conn = db.get()?;
    let pages = match site_id {
        Some(site) => {
            let mut stmt = conn.prepare(&format!(
                "SELECT {} FROM pages WHERE site_id = ? ORDER BY id",
                PAGE_COLUMNS
            ))?;
            let rows = stmt
                .query_map([site], row_to_page)?
                .collect::<Result<Vec<_>, _>>()?;
            rows
        }
        None => {
            let mut stmt =
                conn.prepare(&format!("SELECT {} FROM pages ORDER BY id", PAGE_COLUMNS))?;
            let rows = stmt
                .query_map([], row_to_page)?
                .collect::<Result<Vec<_>, _>>()?;
            rows
        }
    };
    Ok(pages)
}

/// Published pages on `site_id` that host the articles application. These
/// are the placements an article can be filed under.
pub fn list_article_trees(conn: &Connection, site_id: i64) -> Result<Vec<Page>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM pages WHERE site_id = ? AND publisher_is_draft = 0 AND application_urls = ? ORDER BY id",
        PAGE_COLUMNS
    ))?;
    let trees = stmt
        .query_map((site_id, ARTICLES_APP), row_to_page)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(trees)
}

fn row_to_page(row: &rusqlite::Row) -> rusqlite::Result<Page> {
    Ok(Page {
        id: row.get(0)?,
        site_id: row.get(1)?,
        title: row.get(2)?,
        publisher_is_draft: row.get(3)?,
        application_urls: row.get(4)?,
        created_at: row.get(5)?,
    })
}
