//! JSON configuration and report persistence.

use crate::params::ValidatorParams;
use crate::report::ValidationReport;
use crate::validator::FlagValidator;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

#[derive(thiserror::Error, Debug)]
pub enum ReportIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Configuration for a validation run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ValidateConfig {
    pub image_path: String,
    /// Where to write the JSON report; defaults next to the working
    /// directory when unset.
    #[serde(default)]
    pub output_path: Option<String>,
    /// Pipeline parameter overrides; defaults apply when unset.
    #[serde(default)]
    pub params: Option<ValidatorParams>,
    /// Optional pre-decode size guard in bytes. Inputs larger than this are
    /// rejected before any pixel work.
    #[serde(default)]
    pub max_bytes: Option<u64>,
}

impl ValidateConfig {
    pub fn new(image_path: impl Into<String>) -> Self {
        Self {
            image_path: image_path.into(),
            output_path: None,
            params: None,
            max_bytes: None,
        }
    }

    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ReportIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), ReportIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Resolve the output report path.
    pub fn output_path(&self) -> PathBuf {
        self.output_path
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("flag_validation_report.json"))
    }

    /// Build a validator from the configured parameters.
    pub fn build_validator(&self) -> FlagValidator {
        FlagValidator::new(self.params.unwrap_or_default())
    }
}

impl ValidationReport {
    /// Load a report from JSON on disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ReportIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this report to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), ReportIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
