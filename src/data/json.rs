//! JSON network descriptions

use std::fs;
use std::path::Path;
use anyhow::{Context, Result};
use serde::{Serialize, Deserialize};
use crate::config::Config;
use crate::forest::{ForestBuilder, SocialForest, UserId};

/// A user entry of a network description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,

    pub label: String,

    #[serde(default)]
    pub parent: Option<UserId>,
}

/// An interaction entry of a network description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionRecord {
    pub sender: UserId,

    pub recipient: UserId,

    pub message: String,
}

/// Users (parents listed before their children) and interactions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkDescription {
    pub users: Vec<UserRecord>,

    #[serde(default)]
    pub interactions: Vec<InteractionRecord>,
}

impl NetworkDescription {
    /// Build a forest from the description
    pub fn into_forest(self, config: &Config) -> Result<SocialForest> {
        let mut builder = ForestBuilder::with_capacity(config, self.users.len());

        for user in self.users {
            builder.add_user(user.id, user.label, user.parent);
        }
        for interaction in self.interactions {
            builder.add_interaction(interaction.sender, interaction.recipient, interaction.message);
        }

        builder.build()
    }
}

/// Read a network description from a JSON file
pub fn load_network(path: impl AsRef<Path>) -> Result<NetworkDescription> {
    let path = path.as_ref();
    log::info!("Reading network description: {}", path.display());

    if !path.exists() {
        return Err(anyhow::anyhow!("File not found: {}", path.display()));
    }

    let contents = fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let network: NetworkDescription = serde_json::from_str(&contents)
        .with_context(|| format!("parsing {}", path.display()))?;

    log::info!(
        "Loaded {} users and {} interactions",
        network.users.len(),
        network.interactions.len()
    );

    Ok(network)
}

/// Read a network description and build its forest
pub fn load_forest(path: impl AsRef<Path>, config: &Config) -> Result<SocialForest> {
    load_network(path)?.into_forest(config)
}
