//! Forest construction module

use anyhow::Result;
use crate::config::Config;
use crate::forest::{SocialForest, UserId};

/// A pending user insertion
#[derive(Debug, Clone)]
struct PendingUser {
    id: UserId,
    label: String,
    parent: Option<UserId>,
}

/// A pending interaction record
#[derive(Debug, Clone)]
struct PendingInteraction {
    sender: UserId,
    recipient: UserId,
    message: String,
}

/// Builder for incrementally describing a SocialForest.
///
/// Users are inserted in the order they were added, so a parent must be
/// added before its children for the link to resolve.
#[derive(Debug, Clone, Default)]
pub struct ForestBuilder {
    /// Reject what the permissive forest would silently accept
    strict: bool,

    /// Users in insertion order
    users: Vec<PendingUser>,

    /// Interactions, recorded after every user is inserted
    interactions: Vec<PendingInteraction>,
}

impl ForestBuilder {
    /// Create a builder following the strictness of `config`
    pub fn new(config: &Config) -> Self {
        Self {
            strict: config.strict,
            ..Self::default()
        }
    }

    /// Create a builder with room for `capacity` users
    pub fn with_capacity(config: &Config, capacity: usize) -> Self {
        Self {
            strict: config.strict,
            users: Vec::with_capacity(capacity),
            interactions: Vec::new(),
        }
    }

    /// Add a user, optionally under `parent`
    pub fn user(mut self, id: UserId, label: impl Into<String>, parent: Option<UserId>) -> Self {
        self.add_user(id, label, parent);
        self
    }

    /// Add an interaction message
    pub fn interaction(mut self, sender: UserId, recipient: UserId, message: impl Into<String>) -> Self {
        self.add_interaction(sender, recipient, message);
        self
    }

    pub fn add_user(&mut self, id: UserId, label: impl Into<String>, parent: Option<UserId>) {
        self.users.push(PendingUser {
            id,
            label: label.into(),
            parent,
        });
    }

    pub fn add_interaction(&mut self, sender: UserId, recipient: UserId, message: impl Into<String>) {
        self.interactions.push(PendingInteraction {
            sender,
            recipient,
            message: message.into(),
        });
    }

    /// Build the forest
    pub fn build(self) -> Result<SocialForest> {
        let mut forest = SocialForest::with_capacity(self.users.len());

        for user in self.users {
            if self.strict {
                forest.try_insert(user.id, user.label, user.parent)?;
            } else {
                forest.insert(user.id, user.label, user.parent);
            }
        }

        for interaction in self.interactions {
            if self.strict {
                forest.try_record_interaction(
                    interaction.sender,
                    interaction.recipient,
                    interaction.message,
                )?;
            } else {
                forest.record_interaction(
                    interaction.sender,
                    interaction.recipient,
                    interaction.message,
                );
            }
        }

        if self.strict {
            forest.check_consistency()?;
        }

        log::info!(
            "Built forest with {} users, {} links and {} interactions",
            forest.len(),
            forest.edge_count(),
            forest.interaction_count()
        );

        Ok(forest)
    }
}
