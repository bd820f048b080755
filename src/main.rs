use clap::Parser;
use cms_articles::cli::{Cli, Commands};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cms_articles=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init {
            path,
            site_id,
            name,
        }) => {
            cms_articles::cli::init::run(path, site_id, name)?;
        }
        Some(Commands::Migrate { command }) => {
            cms_articles::cli::migrate::run(&cli.config, command)?;
        }
        Some(Commands::Page { command }) => {
            cms_articles::cli::page::run(&cli.config, command)?;
        }
        Some(Commands::Article { command }) => {
            cms_articles::cli::article::run(&cli.config, command)?;
        }
        Some(Commands::Category { command }) => {
            cms_articles::cli::category::run(&cli.config, command)?;
        }
        None => {
            use clap::CommandFactory;
            Cli::command().print_help()?;
        }
    }

    Ok(())
}
