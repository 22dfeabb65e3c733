use crate::logging::{LEVELS, is_level};
use crate::scim::ScimConfig;

/// Internal validation, called automatically during `ScimConfig::from_str` / `load`.
pub(crate) fn validate(config: &ScimConfig) -> anyhow::Result<()> {
    if config.service.items_per_page == 0 {
        anyhow::bail!("service.items_per_page must be > 0");
    }

    let ids = &config.service.internal_schema_id;
    for (key, id) in [("user", &ids.user), ("group", &ids.group), ("root", &ids.root)] {
        if id.trim().is_empty() {
            anyhow::bail!("service.internal_schema_id.{key} must not be empty");
        }
    }

    let params = &config.service.url_param;
    for (key, name) in [("user_id", &params.user_id), ("group_id", &params.group_id)] {
        if name.trim().is_empty() {
            anyhow::bail!("service.url_param.{key} must not be empty");
        }
    }

    if config.limits.max_path_len == 0 {
        anyhow::bail!("limits.max_path_len must be > 0");
    }
    if config.limits.max_filter_len == 0 {
        anyhow::bail!("limits.max_filter_len must be > 0");
    }

    let logging = &config.logging;
    if !is_level(&logging.level) {
        anyhow::bail!(
            "logging.level {:?} must be one of {}",
            logging.level,
            LEVELS.join(", ")
        );
    }
    for (target, level) in &logging.modules {
        if !is_level(level) {
            anyhow::bail!(
                "logging.modules.{target} {level:?} must be one of {}",
                LEVELS.join(", ")
            );
        }
    }

    Ok(())
}
