use crate::error::{AdvisorError, Result};
use crate::models::{SystemKind, DEFAULT_CYCLE_RANGE, DEFAULT_SOIL_OPTION};
use dialoguer::{Input, Select};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

const APP_DIR: &str = "irrigation-advisor";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceConfig {
    pub base_url: String,
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    #[serde(default = "default_completion_marker")]
    pub completion_marker: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_poll_interval_secs() -> u64 {
    2
}

fn default_completion_marker() -> String {
    "Processamento completo".into()
}

fn default_enabled() -> bool {
    true
}

impl ServiceConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".into(),
            poll_interval_secs: default_poll_interval_secs(),
            completion_marker: default_completion_marker(),
            enabled: default_enabled(),
        }
    }
}

/// Values substituted for answers the wizard does not collect.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DefaultsConfig {
    #[serde(default = "default_irrigation_system")]
    pub irrigation_system: String,
    #[serde(default = "default_cycle_range")]
    pub cycle_range: String,
    #[serde(default = "default_soil")]
    pub soil: String,
}

fn default_irrigation_system() -> String {
    "FixedSprinkler".into()
}

fn default_cycle_range() -> String {
    DEFAULT_CYCLE_RANGE.into()
}

fn default_soil() -> String {
    DEFAULT_SOIL_OPTION.into()
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            irrigation_system: default_irrigation_system(),
            cycle_range: default_cycle_range(),
            soil: default_soil(),
        }
    }
}

impl DefaultsConfig {
    pub fn system(&self) -> Result<SystemKind> {
        SystemKind::from_str(&self.irrigation_system).ok_or_else(|| {
            AdvisorError::Config(format!(
                "unknown default irrigation system '{}'",
                self.irrigation_system
            ))
        })
    }
}

impl Config {
    pub fn load(config_override: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => p,
            None => Self::find_config_path()?,
        };

        if !config_path.exists() {
            return Err(AdvisorError::Config(format!(
                "Config file not found at {:?}. Run `irrigation-advisor init` to set up.",
                config_path
            )));
        }

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| AdvisorError::Config(format!("Failed to read config: {}", e)))?;

        let config_str = Self::substitute_env_vars(&config_str)?;

        let config: Config = serde_yaml::from_str(&config_str)
            .map_err(|e| AdvisorError::Config(format!("Failed to parse config: {}", e)))?;

        config.defaults.system()?;
        Ok(config)
    }

    /// Load the config if one exists, otherwise fall back to built-in defaults.
    pub fn load_or_default(config_override: Option<PathBuf>) -> Result<Self> {
        if Self::exists(config_override.as_ref()) {
            Self::load(config_override)
        } else {
            tracing::info!("No config file found - using built-in defaults");
            Ok(Self::default())
        }
    }

    /// Search for config.yaml in standard locations.
    /// Returns the path of the first found config, or the XDG default path if none found.
    fn find_config_path() -> Result<PathBuf> {
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join(APP_DIR).join("config.yaml");
            if xdg_config.exists() {
                return Ok(xdg_config);
            }
        }

        Self::default_config_path()
    }

    pub fn exists(config_override: Option<&PathBuf>) -> bool {
        match config_override {
            Some(p) => p.exists(),
            None => Self::find_config_path()
                .map(|p| p.exists())
                .unwrap_or(false),
        }
    }

    /// Default path for writing new config files (~/.config/irrigation-advisor/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| AdvisorError::Config("Cannot determine config directory".into()))?
            .join(APP_DIR);
        Ok(config_dir.join("config.yaml"))
    }

    /// Run interactive setup prompts and write config to disk.
    pub fn setup_interactive() -> Result<(Self, PathBuf)> {
        println!();
        println!("Irrigation Advisor setup");
        println!();

        println!("Analysis service");
        let base_url: String = Input::new()
            .with_prompt("  Base URL")
            .default("http://localhost:5000".into())
            .interact_text()
            .map_err(|e| AdvisorError::Config(format!("Input error: {}", e)))?;

        let poll_interval_secs: u64 = Input::new()
            .with_prompt("  Status poll interval (seconds)")
            .default(default_poll_interval_secs())
            .interact_text()
            .map_err(|e| AdvisorError::Config(format!("Input error: {}", e)))?;

        println!();
        println!("Defaults for answers the form does not collect");

        let systems = [
            SystemKind::FixedSprinkler,
            SystemKind::CenterPivot,
            SystemKind::Drip,
        ];
        let labels: Vec<&str> = systems.iter().map(|s| s.as_str()).collect();
        let selected = Select::new()
            .with_prompt("  Irrigation system")
            .items(&labels)
            .default(0)
            .interact()
            .map_err(|e| AdvisorError::Config(format!("Input error: {}", e)))?;

        let cycle_range: String = Input::new()
            .with_prompt("  Cycle range (min_max days)")
            .default(default_cycle_range())
            .interact_text()
            .map_err(|e| AdvisorError::Config(format!("Input error: {}", e)))?;

        let soil: String = Input::new()
            .with_prompt("  Soil texture")
            .default(default_soil())
            .interact_text()
            .map_err(|e| AdvisorError::Config(format!("Input error: {}", e)))?;

        println!();

        let config = Config {
            service: ServiceConfig {
                base_url,
                poll_interval_secs,
                ..ServiceConfig::default()
            },
            defaults: DefaultsConfig {
                irrigation_system: format!("{:?}", systems[selected]),
                cycle_range,
                soil,
            },
        };

        let config_path = Self::default_config_path()?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(&config)
            .map_err(|e| AdvisorError::Config(format!("Failed to serialize config: {}", e)))?;

        let content = format!(
            "# Irrigation Advisor Configuration\n# Generated by `irrigation-advisor init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(&config_path, content)?;

        println!("Configuration saved to {}", config_path.display());
        println!();

        Ok((config, config_path))
    }

    fn substitute_env_vars(content: &str) -> Result<String> {
        let mut result = content.to_string();

        let re = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
            .map_err(|e| AdvisorError::Config(format!("Invalid substitution pattern: {}", e)))?;

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_form_fallbacks() {
        let config = Config::default();
        assert_eq!(config.service.poll_interval(), Duration::from_secs(2));
        assert_eq!(config.service.completion_marker, "Processamento completo");
        assert_eq!(config.defaults.system().unwrap(), SystemKind::FixedSprinkler);
        assert_eq!(config.defaults.cycle_range, "100_150");
        assert_eq!(config.defaults.soil, "arenoso");
    }

    #[test]
    fn partial_yaml_fills_defaults() {
        let yaml = "service:\n  base_url: http://example.org\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.service.base_url, "http://example.org");
        assert_eq!(config.service.poll_interval_secs, 2);
        assert!(config.service.enabled);
        assert_eq!(config.defaults.irrigation_system, "FixedSprinkler");
    }

    #[test]
    fn unknown_default_system_is_config_error() {
        let defaults = DefaultsConfig {
            irrigation_system: "flood".into(),
            ..DefaultsConfig::default()
        };
        assert!(matches!(defaults.system(), Err(AdvisorError::Config(_))));
    }

    #[test]
    fn env_vars_are_substituted() {
        std::env::set_var("IRRIGATION_ADVISOR_TEST_URL", "http://10.0.0.5:5000");
        let out = Config::substitute_env_vars(
            "base_url: ${IRRIGATION_ADVISOR_TEST_URL}\nother: ${IRRIGATION_ADVISOR_UNSET_VAR}",
        )
        .unwrap();
        assert!(out.contains("base_url: http://10.0.0.5:5000"));
        assert!(out.contains("${IRRIGATION_ADVISOR_UNSET_VAR}"));
    }

    #[test]
    fn zero_poll_interval_is_raised_to_one_second() {
        let service = ServiceConfig {
            poll_interval_secs: 0,
            ..ServiceConfig::default()
        };
        assert_eq!(service.poll_interval(), Duration::from_secs(1));
    }
}
