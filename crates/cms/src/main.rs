//! spacetravelling-cms CLI entry point.

use clap::Parser;
use spacetravelling_cms::cli::{Cli, Commands, OutputFormat};
use spacetravelling_cms::output::{format_output, pretty};
use spacetravelling_cms::{ClientError, PrismicClient};
use spacetravelling_core::post::{enumerate_static_paths, RenderOptions};
use spacetravelling_core::storage::{ContentRepository, POSTS_DOCUMENT_TYPE};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = PrismicClient::new(&cli.endpoint, cli.access_token.clone())?;

    match cli.command {
        Commands::Paths => {
            let paths = enumerate_static_paths(&client).await?;
            match cli.format {
                OutputFormat::Json => println!("{}", format_output(&paths, cli.format)),
                OutputFormat::Pretty => println!("{}", pretty::format_paths(&paths)),
            }
        }
        Commands::Get { slug } => {
            let document = client
                .get_by_uid(POSTS_DOCUMENT_TYPE, &slug)
                .await?
                .ok_or(ClientError::NotFound { resource: slug })?;
            match cli.format {
                OutputFormat::Json => println!("{}", format_output(&document, cli.format)),
                OutputFormat::Pretty => println!(
                    "{}",
                    pretty::format_document(&document, &RenderOptions::default())
                ),
            }
        }
    }

    Ok(())
}
