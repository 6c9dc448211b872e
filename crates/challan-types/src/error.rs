//! Error types for the loading challan console

use thiserror::Error;

/// Header fields that must be filled before a challan can be printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    ChallanNo,
    VehicleNo,
}

impl RequiredField {
    pub fn label(&self) -> &'static str {
        match self {
            RequiredField::ChallanNo => "Challan No",
            RequiredField::VehicleNo => "Vehicle No",
        }
    }
}

impl std::fmt::Display for RequiredField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Session validation errors. Recoverable: the user fixes the form and retries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{} required", join_fields(.0))]
    MissingRequiredField(Vec<RequiredField>),
}

fn join_fields(fields: &[RequiredField]) -> String {
    let labels: Vec<&str> = fields.iter().map(|f| f.label()).collect();
    match labels.len() {
        1 => format!("{} is", labels[0]),
        _ => format!("{} are", labels.join(" and ")),
    }
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration directory not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),
}

/// Failures of an output renderer (PDF, spreadsheet, delimited text)
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PDF rendering failed: {0}")]
    Pdf(String),

    #[error("Excel export failed: {0}")]
    Excel(String),

    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("TOML write error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Render(#[from] RenderError),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Unsupported session file: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Challan output not written: {0}")]
    OutputFailed(String),
}

pub type Result<T> = std::result::Result<T, Error>;
