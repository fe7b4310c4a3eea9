//! Social forest representation and construction module

pub mod node;
pub mod social;
pub mod builder;

/// Stable identifier of a user in the forest
pub type UserId = u64;

pub use node::UserNode;
pub use social::SocialForest;
pub use builder::ForestBuilder;
