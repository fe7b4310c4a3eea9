//! Configuration management for the social forest analyzer

/// Default configuration for the social forest analyzer
#[derive(Debug, Clone)]
pub struct Config {
    /// Spaces of indentation per tree level in the text rendering
    pub indent_width: usize,

    /// Reject duplicate ids, unknown parents and unknown senders instead of
    /// silently accepting them
    pub strict: bool,

    /// Minimum community size kept by `community::detection::detect`
    pub min_community_size: usize,

    /// Interaction count at which sentiment scoring switches to rayon
    pub parallel_threshold: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            indent_width: 2,
            strict: false,
            min_community_size: 1,
            parallel_threshold: 1000,
        }
    }
}

impl Config {
    /// Create a new configuration with custom values
    pub fn new(
        indent_width: usize,
        strict: bool,
        min_community_size: usize,
        parallel_threshold: usize,
    ) -> Self {
        Self {
            indent_width,
            strict,
            min_community_size,
            parallel_threshold,
        }
    }
}
