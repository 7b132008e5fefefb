use crate::error::{Result, SmartFarmError};
use crate::models::Language;
use crate::ui::ThemeMode;
use dialoguer::{Input, Select};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub farm: FarmConfig,
    #[serde(default)]
    pub monitoring: MonitoringConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FarmConfig {
    pub name: String,
    #[serde(default)]
    pub language: Language,
    #[serde(default)]
    pub theme: ThemeMode,
}

impl Default for FarmConfig {
    fn default() -> Self {
        Self {
            name: "My Farm".into(),
            language: Language::En,
            theme: ThemeMode::Light,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MonitoringConfig {
    /// Seconds between sensor refreshes
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    #[serde(default = "default_forecast_days")]
    pub forecast_days: usize,
    /// Fixed RNG seed for the simulated source; random when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_interval_secs() -> u64 {
    5
}

fn default_forecast_days() -> usize {
    5
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            forecast_days: default_forecast_days(),
            seed: None,
        }
    }
}

impl MonitoringConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs.max(1))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// YAML or JSON crop list replacing the bundled catalog
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl Config {
    /// Loads the config file. An explicit path must exist; otherwise the
    /// standard locations are searched and defaults are used if none is found.
    pub fn load(config_override: Option<&PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => {
                if !p.exists() {
                    return Err(SmartFarmError::Config(format!(
                        "Config file not found at {:?}",
                        p
                    )));
                }
                p.clone()
            }
            None => match Self::find_config_path() {
                Some(p) => p,
                None => {
                    tracing::info!("No config file found, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| SmartFarmError::Config(format!("Failed to read config: {}", e)))?;

        let config = Self::parse(&config_str)?;
        tracing::info!(path = %config_path.display(), "Loaded configuration");
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let content = Self::substitute_env_vars(content)?;
        serde_yaml::from_str(&content)
            .map_err(|e| SmartFarmError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Search for config.yaml in standard locations.
    fn find_config_path() -> Option<PathBuf> {
        // Try current directory first
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Some(local_config);
        }

        dirs::config_dir()
            .map(|dir| dir.join("smartfarm").join("config.yaml"))
            .filter(|p| p.exists())
    }

    /// Default path for writing new config files (~/.config/smartfarm/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| SmartFarmError::Config("Cannot determine config directory".into()))?
            .join("smartfarm");
        Ok(config_dir.join("config.yaml"))
    }

    /// Run interactive setup prompts and write config to disk.
    pub fn setup_interactive() -> Result<(Self, PathBuf)> {
        println!();
        println!("Let's set up SmartFarm!");
        println!();

        let name: String = Input::new()
            .with_prompt("  Farm name")
            .default("My Farm".into())
            .interact_text()
            .map_err(|e| SmartFarmError::Config(format!("Input error: {}", e)))?;

        let languages: Vec<String> = Language::all()
            .iter()
            .map(|l| format!("{} ({})", l.label(), l.code()))
            .collect();
        let language_idx = Select::new()
            .with_prompt("  Display language for crop names")
            .items(&languages)
            .default(0)
            .interact()
            .map_err(|e| SmartFarmError::Config(format!("Input error: {}", e)))?;

        let theme_idx = Select::new()
            .with_prompt("  Theme")
            .items(&["Light", "Dark"])
            .default(0)
            .interact()
            .map_err(|e| SmartFarmError::Config(format!("Input error: {}", e)))?;

        let interval_secs: u64 = Input::new()
            .with_prompt("  Sensor refresh interval (seconds)")
            .default(default_interval_secs())
            .interact_text()
            .map_err(|e| SmartFarmError::Config(format!("Input error: {}", e)))?;

        let catalog_path: String = Input::new()
            .with_prompt("  Custom crop catalog file (blank for built-in)")
            .default(String::new())
            .allow_empty(true)
            .interact_text()
            .map_err(|e| SmartFarmError::Config(format!("Input error: {}", e)))?;

        let config = Config {
            farm: FarmConfig {
                name,
                language: Language::all()[language_idx],
                theme: if theme_idx == 1 {
                    ThemeMode::Dark
                } else {
                    ThemeMode::Light
                },
            },
            monitoring: MonitoringConfig {
                interval_secs,
                ..MonitoringConfig::default()
            },
            catalog: CatalogConfig {
                path: if catalog_path.trim().is_empty() {
                    None
                } else {
                    Some(PathBuf::from(catalog_path.trim()))
                },
            },
        };

        let config_path = Self::default_config_path()?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(&config)
            .map_err(|e| SmartFarmError::Config(format!("Failed to serialize config: {}", e)))?;

        let content = format!(
            "# SmartFarm Configuration\n# Generated by `smartfarm init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(&config_path, content)?;

        println!();
        println!("Configuration saved to {}", config_path.display());
        println!();

        Ok((config, config_path))
    }

    fn substitute_env_vars(content: &str) -> Result<String> {
        let mut result = content.to_string();

        // Find all ${VAR_NAME} patterns and substitute
        let re = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
            .map_err(|e| SmartFarmError::Config(format!("Invalid substitution pattern: {}", e)))?;

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        Ok(result)
    }

    pub fn data_dir(data_dir_override: Option<&PathBuf>) -> Result<PathBuf> {
        // CLI override takes priority
        if let Some(dir) = data_dir_override {
            std::fs::create_dir_all(dir)?;
            return Ok(dir.clone());
        }

        // Then check env var
        if let Ok(dir) = std::env::var("SMARTFARM_DATA_DIR") {
            let p = PathBuf::from(dir);
            std::fs::create_dir_all(&p)?;
            return Ok(p);
        }

        // Use XDG data directory
        let data_dir = dirs::data_dir()
            .ok_or_else(|| SmartFarmError::Config("Cannot determine data directory".into()))?
            .join("smartfarm");

        std::fs::create_dir_all(&data_dir)?;
        Ok(data_dir)
    }

    pub fn db_path(data_dir_override: Option<&PathBuf>) -> Result<PathBuf> {
        Ok(Self::data_dir(data_dir_override)?.join("smartfarm.db"))
    }

    pub fn log_path(data_dir_override: Option<&PathBuf>) -> Result<PathBuf> {
        Ok(Self::data_dir(data_dir_override)?.join("smartfarm.log"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_config() {
        let config = Config::parse(
            r#"
farm:
  name: North Field
  language: hi
  theme: dark
monitoring:
  interval_secs: 10
  forecast_days: 3
  seed: 42
catalog:
  path: /tmp/crops.yaml
"#,
        )
        .unwrap();

        assert_eq!(config.farm.name, "North Field");
        assert_eq!(config.farm.language, Language::Hi);
        assert_eq!(config.farm.theme, ThemeMode::Dark);
        assert_eq!(config.monitoring.interval(), Duration::from_secs(10));
        assert_eq!(config.monitoring.forecast_days, 3);
        assert_eq!(config.monitoring.seed, Some(42));
        assert_eq!(config.catalog.path, Some(PathBuf::from("/tmp/crops.yaml")));
    }

    #[test]
    fn missing_sections_use_defaults() {
        let config = Config::parse("farm:\n  name: Plot 7\n").unwrap();
        assert_eq!(config.farm.name, "Plot 7");
        assert_eq!(config.farm.language, Language::En);
        assert_eq!(config.monitoring, MonitoringConfig::default());
        assert!(config.catalog.path.is_none());
    }

    #[test]
    fn zero_interval_is_clamped() {
        let config = Config::parse("monitoring:\n  interval_secs: 0\n").unwrap();
        assert_eq!(config.monitoring.interval(), Duration::from_secs(1));
    }

    #[test]
    fn env_vars_are_substituted() {
        std::env::set_var("SMARTFARM_TEST_FARM_NAME", "Riverside");
        let config = Config::parse("farm:\n  name: ${SMARTFARM_TEST_FARM_NAME}\n").unwrap();
        assert_eq!(config.farm.name, "Riverside");
    }

    #[test]
    fn unset_env_vars_are_left_alone() {
        let out = Config::substitute_env_vars("name: ${SMARTFARM_TEST_UNSET_VAR}").unwrap();
        assert_eq!(out, "name: ${SMARTFARM_TEST_UNSET_VAR}");
    }

    #[test]
    fn invalid_yaml_is_config_error() {
        assert!(matches!(
            Config::parse("farm: [unclosed"),
            Err(SmartFarmError::Config(_))
        ));
    }

    #[test]
    fn explicit_missing_path_is_error() {
        let path = PathBuf::from("/nonexistent/smartfarm/config.yaml");
        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    fn data_dir_override_is_created() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("nested").join("data");
        let db_path = Config::db_path(Some(&dir)).unwrap();
        assert!(dir.exists());
        assert_eq!(db_path, dir.join("smartfarm.db"));
    }
}
