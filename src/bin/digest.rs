//! Command-line front end: digest a URL (or a saved page) and print JSON.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use article_digest::config::DigestConfig;
use article_digest::observability::{init_logging, LogConfig, LogFormat};
use article_digest::Digester;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "digest")]
#[command(about = "Extract and summarize the main article of a web page")]
#[command(version)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true, env = "DIGEST_CONFIG")]
    config: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    /// Default log filter when RUST_LOG is unset
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch, extract and summarize a URL
    Url {
        url: String,
    },

    /// Digest a saved HTML file, using URL for classification
    Html {
        /// Page URL the file was saved from
        url: String,
        /// HTML file to read
        file: PathBuf,
    },

    /// Print the page title, or "Untitled Article"
    Title {
        url: String,
    },

    /// Print the effective non-article domain list
    Domains,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(LogConfig {
        default_filter: cli.log_level.clone(),
        format: if cli.json_logs { LogFormat::Json } else { LogFormat::Text },
        ..LogConfig::default()
    });

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let options = DigestConfig::load(cli.config.as_deref()).context("loading configuration")?;

    if let Commands::Domains = cli.command {
        for domain in options.non_article_domains.iter() {
            println!("{domain}");
        }
        return Ok(());
    }

    let digester = Digester::new(options)?;
    match cli.command {
        Commands::Url { url } => {
            let digest = digester.digest_url(&url).await?;
            println!("{}", serde_json::to_string_pretty(&digest)?);
        }
        Commands::Html { url, file } => {
            let bytes = std::fs::read(&file).with_context(|| format!("reading {}", file.display()))?;
            let html = article_digest::encoding::decode_html(&bytes);
            let digest = digester.digest_html(&url, &html).await?;
            println!("{}", serde_json::to_string_pretty(&digest)?);
        }
        Commands::Title { url } => {
            println!("{}", digester.fetch_page_title(&url).await);
        }
        Commands::Domains => {}
    }
    Ok(())
}
