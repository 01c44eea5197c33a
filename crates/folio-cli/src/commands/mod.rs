//! CLI command definitions and handlers.

use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod follows;
pub mod members;
pub mod sync;

/// Folio - follow-set synchronization for the relationship graph
#[derive(Parser)]
#[command(name = "folio")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Synchronize a group's followed concepts onto a member user
    Sync(sync::SyncArgs),

    /// List followed concepts
    #[command(subcommand)]
    Follows(follows::FollowsCommands),

    /// List licence and group members
    #[command(subcommand)]
    Members(members::MembersCommands),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Sync(args) => sync::run(args).await,
            Commands::Follows(cmd) => follows::run(cmd).await,
            Commands::Members(cmd) => members::run(cmd).await,
        }
    }
}

/// Reject ids that are not UUIDs before any network call is made.
pub(crate) fn validate_uuid(label: &str, value: &str) -> Result<()> {
    uuid::Uuid::parse_str(value)
        .map(|_| ())
        .map_err(|_| anyhow::anyhow!("{label} must be a UUID, got '{value}'"))
}
