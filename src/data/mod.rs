//! Network input module

pub mod json;
pub mod sample;
