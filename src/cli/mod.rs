pub mod article;
pub mod category;
pub mod init;
pub mod migrate;
pub mod page;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cms-articles")]
#[command(version)]
#[command(about = "Multi-lingual articles and categories for a page-tree CMS", long_about = None)]
pub struct Cli {
    #[arg(short, long, default_value = "cms-articles.toml", env = "CMS_ARTICLES_CONFIG")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a starter configuration file
    Init {
        #[arg(default_value = ".")]
        path: PathBuf,
        #[arg(long, default_value = "1")]
        site_id: i64,
        #[arg(long)]
        name: Option<String>,
    },
    /// Apply database migrations
    Migrate {
        #[command(subcommand)]
        command: Option<MigrateCommand>,
    },
    Page {
        #[command(subcommand)]
        command: PageCommand,
    },
    Article {
        #[command(subcommand)]
        command: ArticleCommand,
    },
    Category {
        #[command(subcommand)]
        command: CategoryCommand,
    },
}

#[derive(Subcommand)]
pub enum MigrateCommand {
    /// Show applied and pending migrations
    Status,
}

#[derive(Subcommand)]
pub enum PageCommand {
    Add {
        #[arg(long)]
        title: String,
        /// Defaults to the configured site
        #[arg(long)]
        site: Option<i64>,
        /// Create the published revision instead of a draft
        #[arg(long)]
        published: bool,
        /// Hook the articles application onto the page, making it an article tree
        #[arg(long)]
        articles_app: bool,
    },
    List {
        #[arg(long)]
        site: Option<i64>,
    },
}

#[derive(Args)]
pub struct ArticleFields {
    #[arg(short, long)]
    pub language: Option<String>,
    #[arg(long)]
    pub tree: Option<i64>,
    #[arg(long)]
    pub template: Option<String>,
    #[arg(long)]
    pub login_required: Option<bool>,
    #[arg(long)]
    pub title: Option<String>,
    /// Defaults to the title
    #[arg(long)]
    pub slug: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub page_title: Option<String>,
    #[arg(long)]
    pub menu_title: Option<String>,
    #[arg(long)]
    pub meta_description: Option<String>,
    #[arg(long)]
    pub image: Option<String>,
}

#[derive(Subcommand)]
pub enum ArticleCommand {
    Create {
        #[command(flatten)]
        fields: ArticleFields,
    },
    /// Edit an article, or add a translation of it
    Edit {
        id: i64,
        #[command(flatten)]
        fields: ArticleFields,
    },
    /// Set the publication window. Pass an empty string to clear a date.
    Dates {
        id: i64,
        #[arg(short, long)]
        language: Option<String>,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
    },
    Show {
        id: i64,
        #[arg(long)]
        json: bool,
    },
    List {
        #[arg(long)]
        tree: Option<i64>,
    },
    Delete {
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum CategoryCommand {
    Attach { page: i64 },
    Detach { page: i64 },
    List,
}
