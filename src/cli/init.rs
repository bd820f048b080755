use crate::config::{ArticlesConfig, Config, DatabaseConfig, SiteConfig};
use anyhow::Result;
use std::path::PathBuf;

pub fn run(path: PathBuf, site_id: i64, name: Option<String>) -> Result<()> {
    let config_path = path.join("cms-articles.toml");
    if config_path.exists() {
        anyhow::bail!("{} already exists", config_path.display());
    }

    std::fs::create_dir_all(path.join("data"))?;

    let config = Config {
        site: SiteConfig {
            id: site_id,
            name: name.unwrap_or_else(|| "example.com".to_string()),
        },
        database: DatabaseConfig {
            path: "./data/cms-articles.db".to_string(),
            pool_size: 10,
        },
        articles: ArticlesConfig::default(),
    };
    config.validate()?;

    std::fs::write(&config_path, toml::to_string(&config)?)?;

    tracing::info!("Created {:?}", config_path);
    tracing::info!("Run 'cms-articles migrate' to set up the database");

    Ok(())
}
