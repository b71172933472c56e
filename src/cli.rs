use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use jiff::Timestamp;
use std::io;

use crate::query::parse_timestamp;
use crate::types::{Category, ItemStatus, VALID_CATEGORIES, VALID_STATUSES};

#[derive(Parser)]
#[command(name = "newsdesk")]
#[command(about = "Admin client for the news aggregation backend")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List, show, add and delete news articles
    #[command(subcommand)]
    News(NewsAction),

    /// Search articles by keywords
    #[command(visible_alias = "s")]
    Search {
        /// Keywords (joined with spaces)
        #[arg(required = true)]
        terms: Vec<String>,

        /// Number of pages to load
        #[arg(long, default_value = "1")]
        pages: u32,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Suggest search terms for partial input
    Suggest {
        /// Partial input
        text: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List and register publishers
    #[command(subcommand)]
    Publishers(PublisherAction),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigAction),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for [possible values: bash, zsh, fish, powershell, elvish]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum NewsAction {
    /// List news articles
    Ls {
        /// Only articles published at or after this time (RFC 3339)
        #[arg(long, value_parser = parse_timestamp_arg)]
        from: Option<Timestamp>,

        /// Only articles published at or before this time (RFC 3339)
        #[arg(long, value_parser = parse_timestamp_arg)]
        to: Option<Timestamp>,

        /// Filter by status: added, synced, failed
        #[arg(long, value_parser = parse_status)]
        status: Option<ItemStatus>,

        /// Number of pages to load
        #[arg(long, default_value = "1")]
        pages: u32,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one article
    Show {
        /// Article ID
        #[arg(value_parser = parse_id)]
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Submit an article URL for scraping
    Add {
        /// Article URL
        url: String,

        /// Category: politics, business, technology, science, health, sports, entertainment, world
        #[arg(short, long, value_parser = parse_category)]
        category: Category,

        /// Wait until the backend has processed the article
        #[arg(short, long)]
        follow: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete an article
    Rm {
        /// Article ID
        #[arg(value_parser = parse_id)]
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum PublisherAction {
    /// List publishers
    Ls {
        /// Number of pages to load
        #[arg(long, default_value = "1")]
        pages: u32,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Register a publisher
    Add {
        /// Display name
        name: String,

        /// Domain, e.g. example.com
        domain: String,

        /// Short description
        #[arg(short, long)]
        description: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the effective configuration
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print one value
    Get {
        /// Key, e.g. api_url or poll.max_attempts
        key: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Set one value
    Set {
        /// Key, e.g. api_url or poll.max_attempts
        key: String,

        /// New value
        value: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub async fn run(self) -> crate::error::Result<()> {
        use crate::commands::{
            NewsLsOptions, cmd_config_get, cmd_config_set, cmd_config_show, cmd_news_add,
            cmd_news_ls, cmd_news_rm, cmd_news_show, cmd_publishers_add, cmd_publishers_ls,
            cmd_search, cmd_suggest,
        };

        match self.command {
            Commands::News(action) => match action {
                NewsAction::Ls {
                    from,
                    to,
                    status,
                    pages,
                    json,
                } => {
                    cmd_news_ls(NewsLsOptions {
                        from,
                        to,
                        status,
                        pages,
                        json,
                    })
                    .await
                }
                NewsAction::Show { id, json } => cmd_news_show(&id, json).await,
                NewsAction::Add {
                    url,
                    category,
                    follow,
                    json,
                } => cmd_news_add(&url, category, follow, json).await,
                NewsAction::Rm { id, json } => cmd_news_rm(&id, json).await,
            },

            Commands::Search { terms, pages, json } => cmd_search(&terms, pages, json).await,
            Commands::Suggest { text, json } => cmd_suggest(&text, json).await,

            Commands::Publishers(action) => match action {
                PublisherAction::Ls { pages, json } => cmd_publishers_ls(pages, json).await,
                PublisherAction::Add {
                    name,
                    domain,
                    description,
                    json,
                } => cmd_publishers_add(&name, &domain, description.as_deref(), json).await,
            },

            Commands::Config(action) => match action {
                ConfigAction::Show { json } => cmd_config_show(json),
                ConfigAction::Get { key, json } => cmd_config_get(&key, json),
                ConfigAction::Set { key, value, json } => cmd_config_set(&key, &value, json),
            },

            Commands::Completions { shell } => {
                generate_completions(shell);
                Ok(())
            }
        }
    }
}

/// Generic validation helper for parsing values with a standard error message format.
fn parse_with_validation<T, F>(
    s: &str,
    parser: F,
    field_name: &str,
    valid_values: &[&str],
) -> Result<T, String>
where
    F: FnOnce(&str) -> Result<T, String>,
{
    parser(s).map_err(|_| {
        format!(
            "Invalid {}. Must be one of: {}",
            field_name,
            valid_values.join(", ")
        )
    })
}

fn parse_status(s: &str) -> Result<ItemStatus, String> {
    parse_with_validation(
        s,
        |v| v.parse().map_err(|_| String::new()),
        "status",
        VALID_STATUSES,
    )
}

fn parse_category(s: &str) -> Result<Category, String> {
    parse_with_validation(
        s,
        |v| v.parse().map_err(|_| String::new()),
        "category",
        VALID_CATEGORIES,
    )
}

fn parse_timestamp_arg(s: &str) -> Result<Timestamp, String> {
    parse_timestamp(s).map_err(|_| {
        format!("Invalid timestamp '{s}'. Expected RFC 3339, e.g. 2024-01-31T00:00:00Z")
    })
}

fn parse_id(s: &str) -> Result<String, String> {
    let id = s.trim();
    if id.is_empty() {
        return Err("ID cannot be empty".to_string());
    }
    if id.contains('/') {
        return Err(format!("Invalid ID '{s}'"));
    }
    Ok(id.to_string())
}

pub fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "newsdesk", &mut io::stdout());
}
