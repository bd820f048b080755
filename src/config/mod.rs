use crate::models::{Language, Languages};
use crate::services::slug::SlugFormat;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub site: SiteConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub articles: ArticlesConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SiteConfig {
    #[serde(default = "default_site_id")]
    pub id: i64,
    #[serde(default = "default_site_name")]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub path: String,
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArticlesConfig {
    /// Template for stored slugs. Receives `{slug}` and `{now}` / `{now:<strftime>}`.
    #[serde(default = "default_slug_format")]
    pub slug_format: String,
    #[serde(default = "default_languages")]
    pub languages: Vec<Language>,
    #[serde(default = "default_templates")]
    pub templates: Vec<TemplateConfig>,
}

impl Default for ArticlesConfig {
    fn default() -> Self {
        Self {
            slug_format: default_slug_format(),
            languages: default_languages(),
            templates: default_templates(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TemplateConfig {
    pub path: String,
    pub label: String,
}

/// Settings handed to forms and services. Built once from [`Config`].
#[derive(Debug, Clone)]
pub struct ArticleSettings {
    pub slug_format: SlugFormat,
    pub languages: Languages,
    pub templates: Vec<TemplateConfig>,
    pub site_id: i64,
}

impl ArticleSettings {
    pub fn has_template(&self, path: &str) -> bool {
        self.templates.iter().any(|t| t.path == path)
    }

    pub fn default_template(&self) -> Option<&str> {
        self.templates.first().map(|t| t.path.as_str())
    }
}

fn default_site_id() -> i64 {
    1
}

fn default_site_name() -> String {
    "example.com".to_string()
}

fn default_pool_size() -> u32 {
    10
}

fn default_slug_format() -> String {
    "{now:%Y-%m}-{slug}".to_string()
}

fn default_languages() -> Vec<Language> {
    vec![Language::new("en", "English")]
}

fn default_templates() -> Vec<TemplateConfig> {
    vec![TemplateConfig {
        path: "cms_articles/default.html".to_string(),
        label: "Default".to_string(),
    }]
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            anyhow::anyhow!(
                "Could not read config file '{}': {}. Run 'cms-articles init' first?",
                path.display(),
                e
            )
        })?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        SlugFormat::parse(&self.articles.slug_format)
            .map_err(|e| anyhow::anyhow!("articles.slug_format is invalid: {}", e))?;

        if self.articles.languages.is_empty() {
            anyhow::bail!("articles.languages must list at least one language");
        }
        let mut seen = HashSet::new();
        for lang in &self.articles.languages {
            if lang.code.trim().is_empty() {
                anyhow::bail!("articles.languages contains an empty language code");
            }
            if !seen.insert(lang.code.as_str()) {
                anyhow::bail!("articles.languages lists '{}' more than once", lang.code);
            }
        }

        if self.articles.templates.is_empty() {
            anyhow::bail!("articles.templates must list at least one template");
        }
        if self.database.pool_size == 0 {
            anyhow::bail!("database.pool_size must be greater than 0");
        }
        Ok(())
    }

    pub fn settings(&self) -> Result<ArticleSettings> {
        Ok(ArticleSettings {
            slug_format: SlugFormat::parse(&self.articles.slug_format)?,
            languages: Languages::new(self.articles.languages.clone()),
            templates: self.articles.templates.clone(),
            site_id: self.site.id,
        })
    }
}
