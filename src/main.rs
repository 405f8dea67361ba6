use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use yamohub_lib::bootstrap::{
    load_config, resolve_config_path, tracing::init_tracing_subscriber, wire_feed_runtime,
};
use yh_app::LoadOutcome;
use yh_core::{AppConfig, CollectionKey, OwnerId};

/// Pull pages of a YamoHub collection through the shared feed cache.
#[derive(Debug, Parser)]
#[command(name = "yamohub-feed", version, about)]
struct Cli {
    /// Config file (falls back to $YAMOHUB_CONFIG, then the user config dir)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Collection name, e.g. `home`, `videos` or `user`
    #[arg(long, default_value = "home")]
    collection: String,

    /// Owner id for owner-scoped collections
    #[arg(long)]
    owner: Option<String>,

    /// Maximum number of pages to pull
    #[arg(long, default_value_t = 3)]
    pages: u32,

    /// Items per page (defaults to the configured page limit)
    #[arg(long)]
    limit: Option<u32>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    init_tracing_subscriber().context("Failed to initialize tracing")?;

    let config = match resolve_config_path(cli.config.clone()) {
        Some(path) => load_config(&path)?,
        None => {
            warn!("No config file found, using built-in defaults");
            AppConfig::empty()
        }
    };

    let runtime = wire_feed_runtime(&config).context("Failed to wire feed runtime")?;
    let key = match cli.owner {
        Some(owner) => CollectionKey::owned(cli.collection, OwnerId::from(owner)),
        None => CollectionKey::singleton(cli.collection),
    };
    let limit = cli.limit.unwrap_or(runtime.settings.page_limit);
    info!(key = %key, limit, pages = cli.pages, "Starting feed pull");

    for pulled in 0..cli.pages {
        let outcome = if pulled == 0 {
            runtime.cache.ensure_loaded(&key, limit).await
        } else {
            runtime.cache.load_more(&key, limit).await
        };
        let window = runtime.cache.get(&key);

        match outcome {
            LoadOutcome::Loaded {
                page,
                received,
                has_more,
            } => {
                println!(
                    "{key} page {page}: {received} items (total {}, more: {has_more})",
                    window.len()
                );
            }
            LoadOutcome::Skipped(reason) => {
                println!("{key}: stopped ({reason:?}), {} items cached", window.len());
                break;
            }
            LoadOutcome::Failed(err) => {
                anyhow::bail!("Failed to load {key} page {}: {err}", window.next_page());
            }
        }

        if window.is_exhausted() {
            println!("{key}: end of collection");
            break;
        }
    }

    Ok(())
}
