//! Configuration management for the challan console
//!
//! Config stored at: ~/.config/loading-challan/config.json

use std::path::{Path, PathBuf};

use challan_domain::model::CompanyProfile;
use challan_types::{ConfigError, ExportFormat, OutputFormat, Result};
use serde::{Deserialize, Serialize};

const APP_DIR: &str = "loading-challan";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Organization printed at the top of every challan
    #[serde(default = "default_company_name")]
    pub company_name: String,

    /// Address line used when a session has no dispatch origin
    #[serde(default = "default_company_address")]
    pub company_address: String,

    /// Directory for printed and exported files (current directory if unset)
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// Default output format (json, table)
    #[serde(default = "default_output_format")]
    pub output_format: OutputFormat,

    /// Default export file type (csv, xlsx)
    #[serde(default)]
    pub export_format: ExportFormat,
}

fn default_company_name() -> String {
    "MUMUKSH IMPEX LLP".to_string()
}

fn default_company_address() -> String {
    "Mumuksh Impex LLP, Ranala Shivar, Ranala, Nadurbar, Maharastra-425411".to_string()
}

fn default_output_format() -> OutputFormat {
    OutputFormat::Table
}

impl Default for Config {
    fn default() -> Self {
        Self {
            company_name: default_company_name(),
            company_address: default_company_address(),
            output_dir: None,
            output_format: default_output_format(),
            export_format: ExportFormat::default(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join(APP_DIR);
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)
            .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)))?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ConfigError::SaveError(format!("{}: {}", parent.display(), e)))?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .map_err(|e| ConfigError::SaveError(format!("{}: {}", path.display(), e)))?;
        Ok(())
    }

    /// Fixed page header for challans
    pub fn profile(&self) -> CompanyProfile {
        CompanyProfile {
            name: self.company_name.clone(),
            address: self.company_address.clone(),
        }
    }

    /// Where outputs go when no directory is given on the command line
    pub fn output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Loading Challan Configuration")?;
        writeln!(f, "=============================")?;
        writeln!(f)?;
        writeln!(f, "Company name:    {}", self.company_name)?;
        writeln!(f, "Company address: {}", self.company_address)?;
        writeln!(
            f,
            "Output dir:      {}",
            self.output_dir
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(current directory)".to_string())
        )?;
        writeln!(f, "Output format:   {}", self.output_format)?;
        writeln!(f, "Export format:   {}", self.export_format)?;

        if let Ok(path) = Self::config_path() {
            writeln!(f)?;
            writeln!(f, "Config file:     {}", path.display())?;
        }

        Ok(())
    }
}
