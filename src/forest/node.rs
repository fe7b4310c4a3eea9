//! A single user vertex of the social forest

use serde::{Serialize, Deserialize};
use crate::forest::UserId;

/// A user in the social forest.
///
/// Children and the parent are stored as ids; the owning `SocialForest`
/// resolves them. `parent` is a back-reference kept in sync with the
/// parent's `children` list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserNode {
    /// Unique identifier
    pub id: UserId,

    /// Display name
    pub label: String,

    /// Parent in the forest, `None` for roots
    pub parent: Option<UserId>,

    /// Children in insertion order
    pub children: Vec<UserId>,

    /// Most recent message sent to each recipient, in first-contact order
    pub interactions: Vec<(UserId, String)>,
}

impl UserNode {
    /// Create a detached node with no children or interactions
    pub fn new(id: UserId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            parent: None,
            children: Vec::new(),
            interactions: Vec::new(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Number of direct children
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Record a message to `recipient`, replacing any earlier one.
    ///
    /// A replaced message keeps the position of the first contact.
    pub fn add_interaction(&mut self, recipient: UserId, message: impl Into<String>) {
        let message = message.into();
        match self.interactions.iter_mut().find(|(to, _)| *to == recipient) {
            Some((_, existing)) => *existing = message,
            None => self.interactions.push((recipient, message)),
        }
    }

    /// The message last sent to `recipient`, if any
    pub fn message_to(&self, recipient: UserId) -> Option<&str> {
        self.interactions
            .iter()
            .find(|(to, _)| *to == recipient)
            .map(|(_, message)| message.as_str())
    }
}
