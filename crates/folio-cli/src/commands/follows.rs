//! `folio follows` - list followed concepts.

use anyhow::{Context, Result};
use clap::Subcommand;

use folio_core::FolioConfig;
use folio_graph::ops::follows;
use folio_graph::GraphClient;

use crate::output;

#[derive(Subcommand)]
pub enum FollowsCommands {
    /// Concepts a user follows
    User {
        /// User uuid
        uuid: String,
    },

    /// Concepts a group follows
    Group {
        /// Group uuid
        uuid: String,
    },
}

pub async fn run(cmd: FollowsCommands) -> Result<()> {
    let config = FolioConfig::from_env();
    let client = GraphClient::new(&config).context("Failed to create graph client")?;

    let concepts = match cmd {
        FollowsCommands::User { uuid } => {
            super::validate_uuid("uuid", &uuid)?;
            follows::concepts_followed_by_user(&client, &uuid)
                .await
                .context("Failed to fetch user follows")?
        }
        FollowsCommands::Group { uuid } => {
            super::validate_uuid("uuid", &uuid)?;
            follows::concepts_followed_by_group(&client, &uuid)
                .await
                .context("Failed to fetch group follows")?
        }
    };

    output::print_concepts(&concepts);
    Ok(())
}
