use super::PageCommand;
use crate::models::{CreatePage, ARTICLES_APP};
use crate::services::pages;
use crate::{Config, Database};
use anyhow::Result;
use std::path::Path;

pub fn run(config_path: &Path, command: PageCommand) -> Result<()> {
    let config = Config::load(config_path)?;
    let db = Database::open_with_pool_size(&config.database.path, config.database.pool_size)?;

    match command {
        PageCommand::Add {
            title,
            site,
            published,
            articles_app,
        } => {
            let id = pages::create_page(
                &db,
                CreatePage {
                    site_id: site.unwrap_or(config.site.id),
                    title,
                    publisher_is_draft: !published,
                    application_urls: articles_app.then(|| ARTICLES_APP.to_string()),
                },
            )?;
            println!("{}", id);
        }
        PageCommand::List { site } => {
            println!("{:<6} {:<6} {:<10} {:<6} {}", "ID", "SITE", "STATE", "TREE", "TITLE");
            println!("{}", "-".repeat(60));
            for page in pages::list_pages(&db, site)? {
                println!(
                    "{:<6} {:<6} {:<10} {:<6} {}",
                    page.id,
                    page.site_id,
                    if page.publisher_is_draft { "draft" } else { "published" },
                    if page.is_article_tree() { "yes" } else { "" },
                    page.title
                );
            }
        }
    }

    Ok(())
}
