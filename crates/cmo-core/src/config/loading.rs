//! Configuration loading and merging logic.
//!
//! Configuration is loaded in the following order (later sources override
//! earlier ones):
//! 1. **Hardcoded defaults** - Built-in fallback values
//! 2. **User config** - `~/.cmo/config.toml`
//! 3. **Project config** - `./.cmo/config.toml`

use std::fs;
use std::path::Path;

use crate::config::types::{CmoConfig, RefreshConfig, StorageConfig};
use crate::errors::ConfigError;

/// Load configuration from the hierarchy of config files.
///
/// Missing config files are not errors; parse errors and invalid values
/// are.
pub fn load_hierarchy() -> Result<CmoConfig, ConfigError> {
    let mut config = CmoConfig::default();

    if let Some(home) = dirs::home_dir() {
        let user_path = home.join(".cmo").join("config.toml");
        if let Some(user_config) = load_config_file(&user_path)? {
            config = merge_configs(config, user_config);
        }
    }

    let project_path = Path::new(".cmo").join("config.toml");
    if let Some(project_config) = load_config_file(&project_path)? {
        config = merge_configs(config, project_config);
    }

    validate_config(&config)?;
    Ok(config)
}

/// Load a single config file. Returns `Ok(None)` if the file does not exist.
fn load_config_file(path: &Path) -> Result<Option<CmoConfig>, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(ConfigError::IoError { source: e }),
    };

    let config = toml::from_str(&content).map_err(|e| ConfigError::ConfigParseError {
        message: format!("{}: {}", path.display(), e),
    })?;
    Ok(Some(config))
}

/// Merge two configurations, with `override_config` taking precedence.
///
/// Fields set in the override replace base values; unset fields keep the
/// base value.
pub fn merge_configs(base: CmoConfig, override_config: CmoConfig) -> CmoConfig {
    CmoConfig {
        refresh: RefreshConfig {
            interval_secs: override_config
                .refresh
                .interval_secs
                .or(base.refresh.interval_secs),
            minimum_delay_ms: override_config
                .refresh
                .minimum_delay_ms
                .or(base.refresh.minimum_delay_ms),
            auto_enabled: override_config
                .refresh
                .auto_enabled
                .or(base.refresh.auto_enabled),
        },
        storage: StorageConfig {
            data_dir: override_config.storage.data_dir.or(base.storage.data_dir),
        },
    }
}

/// Validate the final merged configuration.
pub fn validate_config(config: &CmoConfig) -> Result<(), ConfigError> {
    if config.refresh.interval_secs == Some(0) {
        return Err(ConfigError::InvalidConfiguration {
            message: "refresh.interval_secs must be at least 1".to_string(),
        });
    }

    // The perceptual floor must fit inside one refresh cycle, or every
    // cycle would still be running when the next tick fires.
    let interval_ms = config.refresh.interval().as_millis();
    let floor_ms = config.refresh.minimum_delay().as_millis();
    if floor_ms > interval_ms {
        return Err(ConfigError::InvalidConfiguration {
            message: format!(
                "refresh.minimum_delay_ms ({floor_ms}) exceeds the refresh interval ({interval_ms} ms)"
            ),
        });
    }

    Ok(())
}
