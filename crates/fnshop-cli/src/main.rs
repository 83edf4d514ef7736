mod output;
mod publish;

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use fnshop_core::AppConfig;
use fnshop_scraper::{fetch_shop, FortniteApiClient};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "fnshop")]
#[command(about = "Fortnite item-shop snapshot and cross-poster")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch the shop, write shop.json, then post to the configured pages (default)
    Run {
        /// Skip Facebook and Twitter posting
        #[arg(long)]
        no_post: bool,

        /// Output directory (overrides WEB_OUT)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Fetch the shop and write shop.json; never posts
    Fetch {
        /// Output directory (overrides WEB_OUT)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

/// What a parsed command asks for once defaults are applied.
#[derive(Debug, PartialEq, Eq)]
struct RunPlan {
    out_dir: PathBuf,
    post: bool,
}

impl RunPlan {
    fn resolve(command: Option<Commands>, default_out: &Path) -> Self {
        let (out, post) = match command {
            None => (None, true),
            Some(Commands::Run { no_post, out }) => (out, !no_post),
            Some(Commands::Fetch { out }) => (out, false),
        };
        Self {
            out_dir: out.unwrap_or_else(|| default_out.to_path_buf()),
            post,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = fnshop_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let plan = RunPlan::resolve(cli.command, &config.output_dir);
    run(&config, &plan).await
}

async fn run(config: &AppConfig, plan: &RunPlan) -> anyhow::Result<()> {
    if config.fn_api_key.is_none() {
        tracing::warn!("FN_API_KEY is not set; the upstream API may reject requests");
    }

    let client =
        FortniteApiClient::from_config(config).context("failed to build fortnite-api client")?;
    let snapshot = fetch_shop(&client)
        .await
        .into_snapshot(chrono::Utc::now());

    let path = output::write_snapshot(&plan.out_dir, &snapshot)?;
    tracing::info!(
        path = %path.display(),
        count = snapshot.count,
        groups = snapshot.groups.len(),
        ok = snapshot.ok,
        "wrote shop snapshot"
    );

    if plan.post {
        publish::publish_all(config, &snapshot).await;
    } else {
        tracing::info!("posting disabled for this run");
    }

    Ok(())
}
