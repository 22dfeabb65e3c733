use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;

/// Level names accepted in `[logging]`, matched case-insensitively.
pub const LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

/// The `[logging]` section of `scim.toml`. Every field defaults, so the
/// section may be left out.
///
/// ```toml
/// [logging]
/// level = "info"
/// format = "json"
/// file = "logs/scim.log"
///
/// [logging.modules]
/// scim_lang = "debug"        # rejected paths and filters
/// scim_validation = "trace"  # every attribute the validator visits
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level for every target without an override.
    pub level: String,
    /// Overrides keyed by crate or module target.
    pub modules: BTreeMap<String, String>,
    /// Log file written next to stderr, relative to the config file's
    /// directory.
    pub file: Option<PathBuf>,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            modules: BTreeMap::new(),
            file: None,
            format: LogFormat::default(),
        }
    }
}

impl LoggingConfig {
    /// Filter directives: the global level, then the overrides in target
    /// order.
    pub fn filter_directives(&self) -> String {
        self.modules
            .iter()
            .fold(self.level.clone(), |acc, (target, level)| {
                format!("{acc},{target}={level}")
            })
    }
}

pub fn is_level(name: &str) -> bool {
    LEVELS.iter().any(|level| level.eq_ignore_ascii_case(name))
}

/// `plain` prints `[domain]`-prefixed lines for operators; `json` keeps
/// `domain` as a field for log shippers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Plain,
    Json,
}
