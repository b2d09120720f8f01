use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use pentasus::config::Config;
use pentasus::loader::Loader;
use pentasus::news::NewsItem;

/// Loads the Pentasus site content and prints it as JSON.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// The content directory. Defaults to the nearest `content` directory
    /// in the working directory or one of its parents.
    #[arg(long, short)]
    content: Option<PathBuf>,

    /// Resolve asset paths for the production deployment.
    #[arg(long)]
    production: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// All news articles, most recent first.
    News,

    /// A single news article, with its body rendered to HTML.
    Article {
        /// The article's slug.
        slug: String,
    },

    /// The slugs of all news articles.
    Slugs,

    /// The athlete roster.
    Team,

    /// The admin roster.
    Admin,

    /// The sponsors.
    Sponsors,

    /// The site configuration.
    Site,

    /// Everything above in a single document.
    All,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Article {
    #[serde(flatten)]
    item: NewsItem,
    content_html: String,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = match cli.content {
        Some(content_directory) => Config::new(content_directory, cli.production),
        None => Config::from_directory(&std::env::current_dir()?, cli.production),
    };
    let loader = Loader::new(&config.content_directory, &config.assets);

    match cli.command {
        Commands::News => print(&loader.news_items()),
        Commands::Article { slug } => {
            let item = loader
                .news_item_by_slug(&slug)
                .ok_or_else(|| anyhow!("No news article with slug `{}`", slug))?;
            let content_html = item.content_html();
            print(&Article { item, content_html })
        }
        Commands::Slugs => print(&loader.news_slugs()),
        Commands::Team => print(&loader.team_members()),
        Commands::Admin => print(&loader.admin_team()),
        Commands::Sponsors => print(&loader.sponsors()),
        Commands::Site => print(&loader.site_config()),
        Commands::All => print(&loader.load()),
    }
}

fn print<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
