use std::path::{Path, PathBuf};
use std::str::FromStr;

use scim_validation::ValidationOptions;
use serde::Deserialize;

use crate::limits::LimitsConfig;
use crate::logging::LoggingConfig;
use crate::service::ServiceConfig;
use crate::validate;

// ---------------------------------------------------------------------------
// Raw TOML structure (intermediate representation)
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ScimConfigRaw {
    #[serde(default)]
    service: ServiceConfig,
    #[serde(default)]
    validation: ValidationOptions,
    #[serde(default)]
    limits: LimitsConfig,
    #[serde(default)]
    logging: LoggingConfig,
}

// ---------------------------------------------------------------------------
// ScimConfig (resolved, validated)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct ScimConfig {
    pub service: ServiceConfig,
    pub validation: ValidationOptions,
    pub limits: LimitsConfig,
    pub logging: LoggingConfig,
}

impl Default for ScimConfig {
    fn default() -> Self {
        ScimConfigRaw::default().into()
    }
}

impl From<ScimConfigRaw> for ScimConfig {
    fn from(raw: ScimConfigRaw) -> Self {
        Self {
            service: raw.service,
            validation: raw.validation,
            limits: raw.limits,
            logging: raw.logging,
        }
    }
}

impl ScimConfig {
    /// Read and parse a `scim.toml` file.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.as_ref().display()))?;
        content.parse()
    }

    /// `service.schemas` patterns resolved against `base_dir`.
    pub fn schema_patterns(&self, base_dir: &Path) -> Vec<String> {
        self.service
            .schemas
            .iter()
            .map(|pattern| {
                resolve_relative(base_dir, Path::new(pattern))
                    .to_string_lossy()
                    .into_owned()
            })
            .collect()
    }
}

impl FromStr for ScimConfig {
    type Err = anyhow::Error;

    /// Parse a TOML string into a validated [`ScimConfig`].
    fn from_str(toml_str: &str) -> anyhow::Result<Self> {
        let raw: ScimConfigRaw = toml::from_str(toml_str)?;
        let config = ScimConfig::from(raw);
        validate::validate(&config)?;
        Ok(config)
    }
}

/// Join `path` onto `base_dir` unless it is already absolute.
pub fn resolve_relative(base_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
