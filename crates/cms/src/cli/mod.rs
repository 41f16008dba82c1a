//! CLI command definitions.

use clap::{Parser, Subcommand, ValueEnum};

/// Inspect the posts published in a Prismic repository.
#[derive(Debug, Parser)]
#[command(name = "spacetravelling-cms")]
#[command(about = "Inspect posts published in the spacetravelling Prismic repository", long_about = None)]
pub struct Cli {
    /// Prismic API endpoint, e.g. https://my-repo.cdn.prismic.io/api/v2
    #[arg(long, env = "PRISMIC_API_ENDPOINT")]
    pub endpoint: String,

    /// Access token for private repositories.
    #[arg(long, env = "PRISMIC_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    /// Output format.
    #[arg(long, default_value = "pretty")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Human-readable output.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the post pages that would be pre-rendered.
    Paths,
    /// Show a single post by its slug.
    Get {
        /// The post slug (UID).
        slug: String,
    },
}
