//! `folio members` - list licence and group membership.

use anyhow::{Context, Result};
use clap::Subcommand;

use folio_core::FolioConfig;
use folio_graph::ops::members;
use folio_graph::GraphClient;

use crate::output;

#[derive(Subcommand)]
pub enum MembersCommands {
    /// Users on a licence
    Licence {
        /// Licence uuid
        uuid: String,
    },

    /// Users in a group
    Group {
        /// Group uuid
        uuid: String,
    },
}

pub async fn run(cmd: MembersCommands) -> Result<()> {
    let config = FolioConfig::from_env();
    let client = GraphClient::new(&config).context("Failed to create graph client")?;

    let members = match cmd {
        MembersCommands::Licence { uuid } => {
            super::validate_uuid("uuid", &uuid)?;
            members::licence_members(&client, &uuid)
                .await
                .context("Failed to fetch licence members")?
        }
        MembersCommands::Group { uuid } => {
            super::validate_uuid("uuid", &uuid)?;
            members::group_members(&client, &uuid)
                .await
                .context("Failed to fetch group members")?
        }
    };

    output::print_members(&members);
    Ok(())
}
