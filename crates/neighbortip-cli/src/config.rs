//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use neighbortip_domain::{Wei, DEFAULT_TIP_AMOUNT};
use neighbortip_sdk::Connector;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name
    #[serde(default = "default_profile")]
    pub active_profile: String,

    /// Available profiles
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,

    /// Wallet connectors, in display order
    #[serde(default = "default_connectors")]
    pub connectors: Vec<Connector>,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// File this configuration was loaded from
    #[serde(skip)]
    source: Option<PathBuf>,
}

/// Connection profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    /// Directory Proxy URL
    pub proxy_url: String,

    /// Wallet connector used by default
    #[serde(default = "default_connector_name")]
    pub connector: String,

    /// Tip amount in ETH
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tip_amount: Option<String>,
}

impl Profile {
    /// Tip amount for this profile, falling back to the built-in default
    pub fn tip_amount(&self) -> Result<Wei> {
        let amount = self.tip_amount.as_deref().unwrap_or(DEFAULT_TIP_AMOUNT);
        Ok(Wei::parse_ether(amount)?)
    }
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Command history size
    #[serde(default = "default_history_size")]
    pub history_size: usize,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Directory holding the config file and REPL history.
    pub fn dir() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".neighbortip"))
    }

    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        Ok(Self::dir()?.join("config.toml"))
    }

    /// Load configuration from the default path or create default.
    pub fn load() -> Result<Self> {
        Self::load_from(Self::path()?)
    }

    /// Load configuration from `path`, or defaults if it does not exist.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let mut config = if path.exists() {
            let contents = fs::read_to_string(path)?;
            toml::from_str::<Config>(&contents)?
        } else {
            Self::default()
        };
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    /// Save configuration to the file it was loaded from.
    pub fn save(&self) -> Result<()> {
        let path = match &self.source {
            Some(path) => path.clone(),
            None => Self::path()?,
        };

        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(&path, contents)?;
        Ok(())
    }

    /// Get the active profile.
    pub fn get_active_profile(&self) -> Result<&Profile> {
        self.profiles
            .get(&self.active_profile)
            .ok_or_else(|| CliError::Config(format!("Profile '{}' not found", self.active_profile)))
    }

    /// Add or update a profile.
    pub fn set_profile(&mut self, name: String, profile: Profile) {
        self.profiles.insert(name, profile);
    }

    /// Switch to a different profile.
    pub fn switch_profile(&mut self, name: String) -> Result<()> {
        if !self.profiles.contains_key(&name) {
            return Err(CliError::Config(format!("Profile '{}' does not exist", name)));
        }
        self.active_profile = name;
        Ok(())
    }

    /// Find a connector by name, or the active profile's connector.
    pub fn connector(&self, name: Option<&str>) -> Result<&Connector> {
        let name = match name {
            Some(name) => name,
            None => self.get_active_profile()?.connector.as_str(),
        };
        self.connectors
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| CliError::Config(format!("Connector '{}' is not configured", name)))
    }
}

impl Default for Config {
    fn default() -> Self {
        let mut profiles = HashMap::new();
        profiles.insert(
            "default".to_string(),
            Profile {
                proxy_url: "http://localhost:3000".to_string(),
                connector: default_connector_name(),
                tip_amount: None,
            },
        );

        Self {
            active_profile: "default".to_string(),
            profiles,
            connectors: default_connectors(),
            settings: Settings::default(),
            source: None,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
            history_size: 1000,
        }
    }
}

fn default_profile() -> String {
    "default".to_string()
}

fn default_connector_name() -> String {
    "local".to_string()
}

fn default_connectors() -> Vec<Connector> {
    vec![Connector {
        name: default_connector_name(),
        rpc_url: "http://localhost:8545".to_string(),
    }]
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_history_size() -> usize {
    1000
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.active_profile, "default");
        assert!(config.profiles.contains_key("default"));
        assert!(config.settings.color);
        assert_eq!(config.connector(None).unwrap().rpc_url, "http://localhost:8545");
    }

    #[test]
    fn test_profile_management() {
        let mut config = Config::default();

        let profile = Profile {
            proxy_url: "https://tips.example.com".to_string(),
            connector: "frame".to_string(),
            tip_amount: Some("0.001".to_string()),
        };

        config.set_profile("prod".to_string(), profile);
        assert!(config.profiles.contains_key("prod"));

        config.switch_profile("prod".to_string()).unwrap();
        assert_eq!(config.active_profile, "prod");
        assert_eq!(
            config.get_active_profile().unwrap().tip_amount().unwrap().format_ether(),
            "0.001"
        );
        // "frame" is not among the connectors
        assert!(config.connector(None).is_err());
    }

    #[test]
    fn test_switch_to_nonexistent_profile() {
        let mut config = Config::default();
        let result = config.switch_profile("nonexistent".to_string());
        assert!(result.is_err());
    }

    #[test]
    fn test_default_tip_amount() {
        let config = Config::default();
        let amount = config.get_active_profile().unwrap().tip_amount().unwrap();
        assert_eq!(amount.value(), 100_000_000_000);
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
            active_profile = "base"

            [profiles.base]
            proxy_url = "https://tips.example.com"
            connector = "frame"
            tip_amount = "0.0005"

            [[connectors]]
            name = "frame"
            rpc_url = "http://127.0.0.1:1248"

            [settings]
            color = false
            format = "json"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.active_profile, "base");
        assert_eq!(config.connector(None).unwrap().rpc_url, "http://127.0.0.1:1248");
        assert_eq!(config.settings.format, OutputFormat::Json);
        assert_eq!(config.settings.history_size, 1000);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::load_from(&path).unwrap();
        config.set_profile(
            "test".to_string(),
            Profile {
                proxy_url: "http://localhost:4000".to_string(),
                connector: "local".to_string(),
                tip_amount: None,
            },
        );
        config.save().unwrap();

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.profiles["test"].proxy_url, "http://localhost:4000");
        assert_eq!(reloaded.connectors.len(), 1);
    }
}
