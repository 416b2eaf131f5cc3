//! ConfigStore - Local Configuration Storage
//!
//! `AppConfig` is kept as TOML in the platform config directory.

use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::CONFIG_FILE_NAME;
use crate::domain::config::AppConfig;
use crate::error::Result;
use crate::helpers::get_or_create_config_dir;

/// Default location of the config file
pub fn config_path() -> Result<PathBuf> {
    Ok(get_or_create_config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load a config file; a missing file yields the defaults
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        tracing::info!("No config at {}, using defaults", path.display());
        return Ok(AppConfig::default());
    }

    let content = fs::read_to_string(path)?;
    AppConfig::from_toml_str(&content)
}

/// Save a config file
pub fn save_config_to(path: &Path, config: &AppConfig) -> Result<()> {
    config.validate()?;
    let content = config.to_toml_string()?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::NoiseMode;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE_NAME);
        assert_eq!(load_config_from(&path).expect("load"), AppConfig::default());
    }

    #[test]
    fn saved_config_loads_back() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE_NAME);
        let mut config = AppConfig::default();
        config.simulation.noise = NoiseMode::Proportional { ratio: 0.1 };
        config.simulation.tick_interval_ms = 3000;

        save_config_to(&path, &config).expect("save");
        assert_eq!(load_config_from(&path).expect("load"), config);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[simulation\n").expect("write");

        assert!(load_config_from(&path).is_err());
    }

    #[test]
    fn invalid_config_is_not_saved() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE_NAME);
        let mut config = AppConfig::default();
        config.simulation.tick_interval_ms = 0;

        assert!(save_config_to(&path, &config).is_err());
        assert!(!path.exists());
    }
}
