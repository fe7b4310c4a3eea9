//! Core library functions for the social forest analyzer

pub mod config;
pub mod error;
pub mod forest;
pub mod traversal;
pub mod community;
pub mod sentiment;
pub mod data;
pub mod storage;
pub mod viz;

pub use anyhow::{Result, anyhow};
pub use error::ForestError;
pub use forest::{SocialForest, UserId, UserNode};
