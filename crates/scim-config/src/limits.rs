use serde::Deserialize;

/// Input size bounds applied before any lexing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Longest attribute path accepted, in bytes.
    pub max_path_len: usize,
    /// Longest filter expression accepted, in bytes.
    pub max_filter_len: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_path_len: 1024,
            max_filter_len: 4096,
        }
    }
}
