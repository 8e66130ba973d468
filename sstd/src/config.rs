use consensus_core::network::NetworkSelection;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::cli::Args;
use crate::error::DaemonError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub network: NetworkConfig,
    pub checkpoints: CheckpointConfig,
    pub logging: LoggingConfig,
    pub seeds: SeedConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// main, test, regtest or unittest; main when unset
    pub name: Option<String>,
    pub testnet: bool,
    pub regtest: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckpointConfig {
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    pub resolve: bool,
    pub timeout_secs: u64,
}

impl Default for CheckpointConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string() }
    }
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self { resolve: false, timeout_secs: 10 }
    }
}

impl Config {
    /// Load configuration from file if it exists, otherwise use defaults
    pub fn load(path: &Path) -> Result<Self, DaemonError> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|source| DaemonError::ConfigRead { path: path.to_path_buf(), source })?;
        Ok(toml::from_str(&content)?)
    }

    /// Override config with CLI arguments
    pub fn apply_cli_overrides(&mut self, args: &Args) {
        // any network flag on the command line replaces the file's selection
        if args.testnet || args.regtest || args.network.is_some() {
            self.network = NetworkConfig { name: args.network.clone(), testnet: args.testnet, regtest: args.regtest };
        }

        if let Some(enabled) = args.checkpoints {
            self.checkpoints.enabled = enabled;
        }

        if let Some(level) = &args.log_level {
            self.logging.level = level.clone();
        }

        if args.resolve_seeds {
            self.seeds.resolve = true;
        }
    }

    pub fn network_selection(&self) -> NetworkSelection {
        NetworkSelection { testnet: self.network.testnet, regtest: self.network.regtest, network: self.network.name.clone() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use consensus_core::network::NetworkType;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert!(config.checkpoints.enabled);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.network_selection().resolve().unwrap(), NetworkType::Mainnet);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: Config = toml::from_str("[network]\nname = \"test\"\n").unwrap();
        assert_eq!(config.network.name.as_deref(), Some("test"));
        assert!(config.checkpoints.enabled);
        assert_eq!(config.seeds.timeout_secs, 10);
    }

    #[test]
    fn cli_network_flags_replace_file_selection() {
        let mut config: Config = toml::from_str("[network]\nname = \"test\"\n[checkpoints]\nenabled = true\n").unwrap();
        let args = Args { regtest: true, checkpoints: Some(false), ..Default::default() };
        config.apply_cli_overrides(&args);
        assert_eq!(config.network_selection().resolve().unwrap(), NetworkType::Regtest);
        assert!(!config.checkpoints.enabled);
    }

    #[test]
    fn file_selection_survives_without_cli_flags() {
        let mut config: Config = toml::from_str("[network]\nregtest = true\n[logging]\nlevel = \"warn\"\n").unwrap();
        config.apply_cli_overrides(&Args::default());
        assert_eq!(config.network_selection().resolve().unwrap(), NetworkType::Regtest);
        assert_eq!(config.logging.level, "warn");
    }
}
