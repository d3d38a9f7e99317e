//! Configuration management infrastructure.
//!
//! Persists scanning limits, package search roots and output preferences as
//! a TOML file in the user's configuration directory.

use crate::infra::error::{FingerprintError, FingerprintResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default cap on the uncompressed size of one signature entry.
pub const DEFAULT_MAX_ENTRY_BYTES: u64 = 8 * 1024 * 1024;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FingerprintConfiguration {
    /// Signature entries larger than this are skipped without decoding
    pub max_entry_bytes: u64,

    /// Search roots used to resolve package identifiers to archives
    pub package_dirs: Vec<String>,

    /// CLI output format ("text" or "json")
    pub output_format: String,

    /// Fingerprint batches on worker threads
    pub parallel: bool,

    /// Whether to show verbose output
    pub verbose: bool,
}

impl Default for FingerprintConfiguration {
    fn default() -> Self {
        Self {
            max_entry_bytes: DEFAULT_MAX_ENTRY_BYTES,
            package_dirs: Vec::new(),
            output_format: "text".to_string(),
            parallel: true,
            verbose: false,
        }
    }
}

impl FingerprintConfiguration {
    /// Package search roots as paths.
    #[must_use]
    pub fn package_roots(&self) -> Vec<PathBuf> {
        self.package_dirs.iter().map(PathBuf::from).collect()
    }
}

/// Configuration manager for handling config files
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new configuration manager with default path
    pub fn new() -> FingerprintResult<Self> {
        let config_path = Self::default_config_path()?;
        Ok(Self { config_path })
    }

    /// Create a configuration manager with custom path
    pub fn with_path<P: AsRef<Path>>(path: P) -> Self {
        Self {
            config_path: path.as_ref().to_path_buf(),
        }
    }

    /// Get the default configuration file path
    pub fn default_config_path() -> FingerprintResult<PathBuf> {
        if let Some(config_dir) = dirs::config_dir() {
            Ok(config_dir.join("sigprint").join("config.toml"))
        } else {
            Ok(PathBuf::from("sigprint-config.toml"))
        }
    }

    /// Load configuration from file, creating default if it doesn't exist
    pub fn load_or_create_default(&self) -> FingerprintResult<FingerprintConfiguration> {
        if self.config_path.exists() {
            self.load()
        } else {
            log::info!(
                "Configuration file not found, creating default: {}",
                self.config_path.display()
            );
            let default_config = FingerprintConfiguration::default();
            self.save(&default_config)?;
            Ok(default_config)
        }
    }

    /// Load configuration from file, falling back to defaults when absent.
    ///
    /// Unlike [`ConfigManager::load_or_create_default`] this never writes.
    pub fn load_or_default(&self) -> FingerprintResult<FingerprintConfiguration> {
        if self.config_path.exists() {
            self.load()
        } else {
            Ok(FingerprintConfiguration::default())
        }
    }

    /// Load configuration from file
    pub fn load(&self) -> FingerprintResult<FingerprintConfiguration> {
        log::info!("Loading configuration from: {}", self.config_path.display());

        let content = fs::read_to_string(&self.config_path).map_err(|e| {
            FingerprintError::ConfigurationError(format!(
                "Failed to read config file {}: {}",
                self.config_path.display(),
                e
            ))
        })?;

        let config: FingerprintConfiguration = toml::from_str(&content).map_err(|e| {
            FingerprintError::ConfigurationError(format!("Failed to parse config file: {e}"))
        })?;

        validate_config(&config)?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, config: &FingerprintConfiguration) -> FingerprintResult<()> {
        log::info!("Saving configuration to: {}", self.config_path.display());

        if let Some(parent) = self.config_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    FingerprintError::ConfigurationError(format!(
                        "Failed to create config directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let content = toml::to_string_pretty(config).map_err(|e| {
            FingerprintError::ConfigurationError(format!("Failed to serialize config: {e}"))
        })?;

        fs::write(&self.config_path, content).map_err(|e| {
            FingerprintError::ConfigurationError(format!(
                "Failed to write config file {}: {}",
                self.config_path.display(),
                e
            ))
        })?;

        Ok(())
    }

    /// Update a specific configuration value
    pub fn update_value(&self, key: &str, value: &str) -> FingerprintResult<()> {
        let mut config = self.load_or_default()?;

        match key {
            "max_entry_bytes" => {
                config.max_entry_bytes = value.parse().map_err(|_| {
                    FingerprintError::ConfigurationError(format!("Invalid byte count: {value}"))
                })?;
            }
            "package_dirs" => {
                config.package_dirs = value
                    .split(',')
                    .map(str::trim)
                    .filter(|dir| !dir.is_empty())
                    .map(String::from)
                    .collect();
            }
            "output_format" => {
                config.output_format = value.to_string();
            }
            "parallel" => {
                config.parallel = value.parse().map_err(|_| {
                    FingerprintError::ConfigurationError(format!("Invalid boolean value: {value}"))
                })?;
            }
            "verbose" => {
                config.verbose = value.parse().map_err(|_| {
                    FingerprintError::ConfigurationError(format!("Invalid boolean value: {value}"))
                })?;
            }
            _ => {
                return Err(FingerprintError::ConfigurationError(format!(
                    "Unknown configuration key: {key}"
                )));
            }
        }

        validate_config(&config)?;
        self.save(&config)
    }

    /// Get the configuration file path
    #[must_use]
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Export configuration as a portable format
    pub fn export_config(&self, format: ExportFormat) -> FingerprintResult<String> {
        let config = self.load_or_default()?;

        match format {
            ExportFormat::Toml => toml::to_string_pretty(&config).map_err(|e| {
                FingerprintError::ConfigurationError(format!("TOML export failed: {e}"))
            }),
            ExportFormat::Json => serde_json::to_string_pretty(&config).map_err(|e| {
                FingerprintError::ConfigurationError(format!("JSON export failed: {e}"))
            }),
        }
    }
}

/// Configuration export formats
#[derive(Debug, Clone, Copy)]
pub enum ExportFormat {
    Toml,
    Json,
}

fn validate_config(config: &FingerprintConfiguration) -> FingerprintResult<()> {
    if config.max_entry_bytes == 0 {
        return Err(FingerprintError::ConfigurationError(
            "max_entry_bytes must be greater than 0".to_string(),
        ));
    }

    match config.output_format.as_str() {
        "text" | "json" => {}
        other => {
            return Err(FingerprintError::ConfigurationError(format!(
                "Invalid output format: {other} (expected text or json)"
            )));
        }
    }

    Ok(())
}
