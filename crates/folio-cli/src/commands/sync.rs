//! `folio sync` - run one follow synchronization.

use anyhow::{Context, Result};
use clap::Args;

use folio_core::FolioConfig;
use folio_graph::{GraphClient, GraphStore, SyncEngine};
use folio_stream::EventEmitter;

use crate::output;

#[derive(Args)]
pub struct SyncArgs {
    /// Group whose follow set is the source of truth
    #[arg(long)]
    pub group: String,

    /// User to bring up to date
    #[arg(long)]
    pub user: String,

    /// Skip the durable event write regardless of configuration
    #[arg(long)]
    pub dry_run: bool,
}

pub async fn run(args: SyncArgs) -> Result<()> {
    super::validate_uuid("--group", &args.group)?;
    super::validate_uuid("--user", &args.user)?;

    let mut config = FolioConfig::from_env();
    if args.dry_run {
        config.stream.enabled = false;
    }

    let client = GraphClient::new(&config).context("Failed to create graph client")?;
    let emitter =
        EventEmitter::new(config.stream.clone()).context("Failed to create event emitter")?;

    let engine = SyncEngine::new(GraphStore::new(&client), emitter);
    let outcome = engine
        .synchronize(&args.group, &args.user)
        .await
        .context("Synchronization failed; graph state may be partially updated")?;

    output::print_outcome(&outcome);
    Ok(())
}
