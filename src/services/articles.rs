use crate::models::{Article, ArticleWithTitles, CleanedArticle, Title};
use crate::Database;
use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension};

const ARTICLE_COLUMNS: &str = "id, tree_id, template, login_required, creation_date, changed_date, publication_date, publication_end_date";
const TITLE_COLUMNS: &str = "id, article_id, language, title, slug, description, page_title, menu_title, meta_description, image";

/// True when no other article under `tree_id` already uses `slug` for
/// `language`. The article being edited (if any) is excluded.
pub fn is_valid_article_slug(
    conn: &Connection,
    article_id: Option<i64>,
    tree_id: i64,
    language: &str,
    slug: &str,
) -> Result<bool> {
    let taken: i64 = conn.query_row(
        r#"
        SELECT COUNT(*) FROM titles t
        JOIN articles a ON t.article_id = a.id
        WHERE a.tree_id = ?1 AND t.language = ?2 AND t.slug = ?3
          AND (?4 IS NULL OR a.id != ?4)
        "#,
        (tree_id, language, slug, article_id),
        |row| row.get(0),
    )?;
    Ok(taken == 0)
}

/// Inserts or updates the article and the title for `data.language` in a
/// single transaction. Returns the article id.
pub fn save_article(db: &Database, article_id: Option<i64>, data: &CleanedArticle) -> Result<i64> {
    let mut conn = db.get()?;
    let tx = conn.transaction()?;
    let now = Utc::now();

    let id = match article_id {
        Some(id) => {
            let updated = tx.execute(
                "UPDATE articles SET tree_id = ?, template = ?, login_required = ?, changed_date = ? WHERE id = ?",
                (data.tree_id, &data.template, data.login_required, now, id),
            )?;
            if updated == 0 {
                bail!("Article {} does not exist", id);
            }
            id
        }
        None => {
            tx.execute(
                "INSERT INTO articles (tree_id, template, login_required, creation_date, changed_date) VALUES (?, ?, ?, ?, ?)",
                (
                    data.tree_id,
                    &data.template,
                    data.login_required,
                    data.creation_date,
                    now,
                ),
            )?;
            tx.last_insert_rowid()
        }
    };

    tx.execute(
        r#"
        INSERT INTO titles (article_id, language, title, slug, description, page_title, menu_title, meta_description, image)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT(article_id, language) DO UPDATE SET
            title = excluded.title,
            slug = excluded.slug,
            description = excluded.description,
            page_title = excluded.page_title,
            menu_title = excluded.menu_title,
            meta_description = excluded.meta_description,
            image = excluded.image
        "#,
        (
            id,
            &data.language,
            &data.title,
            &data.slug,
            &data.description,
            &data.page_title,
            &data.menu_title,
            &data.meta_description,
            &data.image,
        ),
    )?;

    tx.commit()?;
    tracing::info!(
        "Saved article id={} language={} slug={}",
        id,
        data.language,
        data.slug
    );
    Ok(id)
}

pub fn set_publication_dates(
    db: &Database,
    article_id: i64,
    publication_date: Option<DateTime<Utc>>,
    publication_end_date: Option<DateTime<Utc>>,
) -> Result<()> {
    let conn = db.get()?;
    let updated = conn.execute(
        "UPDATE articles SET publication_date = ?, publication_end_date = ?, changed_date = ? WHERE id = ?",
        (publication_date, publication_end_date, Utc::now(), article_id),
    )?;
    if updated == 0 {
        bail!("Article {} does not exist", article_id);
    }
    tracing::info!("Updated publication dates of article id={}", article_id);
    Ok(())
}

pub fn get_article(db: &Database, id: i64) -> Result<Option<ArticleWithTitles>> {
    let conn = db.get()?;
    let article = conn
        .query_row(
            &format!("SELECT {} FROM articles WHERE id = ?", ARTICLE_COLUMNS),
            [id],
            row_to_article,
        )
        .optional()?;

    match article {
        Some(a) => Ok(Some(with_titles(&conn, a)?)),
        None => Ok(None),
    }
}

pub fn get_title(db: &Database, article_id: i64, language: &str) -> Result<Option<Title>> {
    let conn = db.get()?;
    let title = conn
        .query_row(
            &format!(
                "SELECT {} FROM titles WHERE article_id = ? AND language = ?",
                TITLE_COLUMNS
            ),
            (article_id, language),
            row_to_title,
        )
        .optional()?;
    Ok(title)
}

pub fn list_articles(db: &Database, tree_id: Option<i64>) -> Result<Vec<ArticleWithTitles>> {
    let conn = db.get()?;
    let articles = {
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM articles WHERE (?1 IS NULL OR tree_id = ?1) ORDER BY creation_date DESC, id DESC",
            ARTICLE_COLUMNS
        ))?;
        let rows = stmt
            .query_map([tree_id], row_to_article)?
            .collect::<Result<Vec<_>, _>>()?;
        rows
    };

    articles
        .into_iter()
        .map(|a| with_titles(&conn, a))
        .collect()
}

pub fn delete_article(db: &Database, id: i64) -> Result<bool> {
    let conn = db.get()?;
    let deleted = conn.execute("DELETE FROM articles WHERE id = ?", [id])?;
    if deleted > 0 {
        tracing::info!("Deleted article id={}", id);
    }
    Ok(deleted > 0)
}

fn with_titles(conn: &Connection, article: Article) -> Result<ArticleWithTitles> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM titles WHERE article_id = ? ORDER BY language",
        TITLE_COLUMNS
    ))?;
    let titles = stmt
        .query_map([article.id], row_to_title)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ArticleWithTitles { article, titles })
}

fn row_to_article(row: &rusqlite::Row) -> rusqlite::Result<Article> {
    Ok(Article {
        id: row.get(0)?,
        tree_id: row.get(1)?,
        template: row.get(2)?,
        login_required: row.get(3)?,
        creation_date: row.get(4)?,
        changed_date: row.get(5)?,
        publication_date: row.get(6)?,
        publication_end_date: row.get(7)?,
    })
}

fn row_to_title(row: &rusqlite::Row) -> rusqlite::Result<Title> {
    Ok(Title {
        id: row.get(0)?,
        article_id: row.get(1)?,
        language: row.get(2)?,
        title: row.get(3)?,
        slug: row.get(4)?,
        description: row.get(5)?,
        page_title: row.get(6)?,
        menu_title: row.get(7)?,
        meta_description: row.get(8)?,
        image: row.get(9)?,
    })
}
