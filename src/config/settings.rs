use crate::core::store::DEFAULT_RESERVATIONS_FILE;
use crate::core::EquipmentLimits;
use crate::utils::error::{RentalError, Result};
use crate::utils::validation::{validate_path, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_SETTINGS_FILE: &str = "rentals.toml";

/// Settings file. Every section is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Identifier recorded as `created_by` when no `--user` is given.
    pub operator: Option<String>,
    pub storage: StorageSettings,
    pub export: ExportSettings,
    pub limits: EquipmentLimits,
    pub dashboard: DashboardSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    pub data_dir: String,
    pub reservations_file: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            data_dir: ".".to_string(),
            reservations_file: DEFAULT_RESERVATIONS_FILE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    pub directory: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            directory: ".".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardSettings {
    pub recent: usize,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self { recent: 5 }
    }
}

impl Settings {
    /// Reads and parses a TOML settings file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// Loads `path` when it exists, defaults otherwise.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            tracing::debug!("Loading settings from {}", path.as_ref().display());
            Self::from_file(path)
        } else {
            tracing::debug!(
                "No settings file at {}, using defaults",
                path.as_ref().display()
            );
            Ok(Self::default())
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| RentalError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown names are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| RentalError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn recent_limit(&self) -> usize {
        self.dashboard.recent
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_path("storage.data_dir", &self.storage.data_dir)?;
        validate_path("storage.reservations_file", &self.storage.reservations_file)?;
        validate_path("export.directory", &self.export.directory)?;

        if let Some(operator) = &self.operator {
            if operator.trim().is_empty() {
                return Err(RentalError::ConfigError {
                    message: "operator cannot be blank".to_string(),
                });
            }
        }

        if self.dashboard.recent == 0 {
            return Err(RentalError::ConfigError {
                message: "dashboard.recent must be at least 1".to_string(),
            });
        }

        Ok(())
    }
}
