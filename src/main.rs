use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info};

use sfc_license_scraper::apis::firecrawl::FirecrawlClient;
use sfc_license_scraper::config::{api_key_from_env, Config};
use sfc_license_scraper::constants::DEFAULT_CONFIG_PATH;
use sfc_license_scraper::logging;
use sfc_license_scraper::pipeline::Pipeline;
use sfc_license_scraper::storage;
use sfc_license_scraper::summary::render_summary;

#[derive(Parser)]
#[command(name = "sfc_license_scraper")]
#[command(about = "Scrape, clean and summarise the SFC licensed firm head counts")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to the TOML config file (optional; defaults apply when absent)
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Override where the cleaned report is written
    #[arg(long)]
    output: Option<PathBuf>,

    /// Override where the debug artifact is written
    #[arg(long)]
    debug_output: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the page through Firecrawl and process it
    Scrape {
        /// Page to scrape instead of the configured target
        #[arg(long)]
        url: Option<String>,
    },
    /// Process a previously saved provider envelope
    Process {
        /// JSON file holding the envelope
        #[arg(long)]
        input: PathBuf,
    },
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = Config::load(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    if let Some(output) = cli.output {
        config.output.report_path = output;
    }
    if let Some(debug_output) = cli.debug_output {
        config.output.debug_path = debug_output;
    }

    let pipeline = Pipeline::default();
    let (envelope, result) = match cli.command {
        Commands::Scrape { url } => {
            let api_key = api_key_from_env()?;
            let client = FirecrawlClient::new(&config.scrape, api_key)?;
            let url = url.unwrap_or_else(|| config.scrape.target_url.clone());
            pipeline
                .scrape(&client, &url)
                .await
                .with_context(|| format!("scraping {}", url))?
        }
        Commands::Process { input } => {
            let envelope = storage::read_envelope(&input)
                .with_context(|| format!("reading envelope from {}", input.display()))?;
            let result = pipeline.run(&envelope);
            (envelope, result)
        }
    };

    let persisted = pipeline
        .persist(&envelope, &result, &config.output)
        .context("writing report")?;
    print!("{}", render_summary(&result, &persisted));
    info!("Run finished");
    Ok(())
}

#[tokio::main]
async fn main() {
    logging::init_logging();
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        error!("Run failed: {:#}", e);
        eprintln!("Error during scraping: {:?}", e);
        std::process::exit(1);
    }
}
