//! Community analysis module

pub mod detection;
pub mod metrics;

use serde::{Serialize, Deserialize};
use crate::forest::UserId;

/// Number of most central members kept per community
pub const CENTRAL_MEMBER_COUNT: usize = 5;

/// A connected group of users discovered by traversal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Community {
    /// Sequential identifier in discovery order
    pub id: u32,

    /// User the traversal started from
    pub root: UserId,

    /// Members in visitation order
    pub members: Vec<UserId>,

    /// Member labels, parallel to `members`
    pub labels: Vec<String>,

    /// Size of the community
    pub size: usize,

    /// Internal links / (size - 1); 1.0 for a tree
    pub density: f32,

    /// Members with the most children, highest first
    pub central_members: Vec<UserId>,
}
