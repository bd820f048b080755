use super::CategoryCommand;
use crate::services::categories::{self, CategoryError};
use crate::{Config, Database};
use anyhow::Result;
use std::path::Path;

pub fn run(config_path: &Path, command: CategoryCommand) -> Result<()> {
    let config = Config::load(config_path)?;
    let db = Database::open_with_pool_size(&config.database.path, config.database.pool_size)?;

    match command {
        CategoryCommand::Attach { page } => match categories::attach(&db, page, config.site.id) {
            Ok(id) => println!("{}", id),
            Err(CategoryError::ConstraintViolation(reason)) => {
                anyhow::bail!("Could not save category: {}", reason)
            }
            Err(e) => return Err(e.into()),
        },
        CategoryCommand::Detach { page } => {
            if categories::detach(&db, page)? {
                tracing::info!("Category removed from page {}", page);
            }
        }
        CategoryCommand::List => {
            println!("{:<6} {:<6} {}", "ID", "PAGE", "CATEGORY");
            println!("{}", "-".repeat(40));
            for category in categories::list_categories(&db, config.site.id)? {
                println!("{:<6} {:<6} {}", category.id, category.page_id, category);
            }
        }
    }

    Ok(())
}
