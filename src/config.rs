//! Layout configuration of the scheduling office template
//!
//! The producer's timetable sheets place a label row, a banner region and a
//! header probe row at fixed offsets. Those offsets and the inline header
//! tokens are kept here as named settings, deserializable from TOML.
use crate::error::RustyTimetableError;
use serde::Deserialize;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading or querying the configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read config file '{path}': {message}")]
    ReadError { path: String, message: String },

    #[error("Invalid config file '{path}': {message}")]
    ParseError { path: String, message: String },

    #[error("Speciality \"{0}\" has no configured sheet")]
    UnknownSpeciality(String),
}

/// Complete configuration of the extractor.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimetableConfig {
    /// Structural row offsets
    pub layout: LayoutConfig,
    /// Tokens of the header row repeated inside the data
    pub headers: HeaderTokens,
    /// Speciality name to sheet name
    pub specialities: BTreeMap<String, String>,
}

/// Row offsets of the template.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Sheet rows consumed as column labels before data offsets start
    pub label_rows: usize,
    /// Data offsets below this value are dropped
    pub banner_rows: usize,
    /// Data offset of the row whose width selects the column layout
    pub header_probe_row: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            label_rows: 1,
            banner_rows: 8,
            header_probe_row: 11,
        }
    }
}

/// Values marking a header row that reappears among data rows.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderTokens {
    pub day: String,
    pub time: String,
}

impl Default for HeaderTokens {
    fn default() -> Self {
        Self {
            day: "Дни".to_owned(),
            time: "Время".to_owned(),
        }
    }
}

impl TimetableConfig {
    /// Reads a TOML configuration file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self, RustyTimetableError> {
        let name = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|error| ConfigError::ReadError {
            path: name.to_owned(),
            message: error.to_string(),
        })?;
        let config = Self::parse(&content).map_err(|error| match error {
            RustyTimetableError::ConfigError(ConfigError::ParseError { message, .. }) => {
                ConfigError::ParseError { path: name.to_owned(), message }.into()
            }
            other => other,
        })?;
        tracing::debug!(path = %name, specialities = config.specialities.len(), "load config");
        Ok(config)
    }

    /// Parses a TOML configuration document.
    pub fn parse(content: &str) -> Result<Self, RustyTimetableError> {
        let config = toml::from_str(content).map_err(|error| ConfigError::ParseError {
            path: String::new(),
            message: error.message().to_owned(),
        })?;
        Ok(config)
    }

    /// Looks up the sheet configured for a speciality.
    pub fn sheet_for_speciality(&self, speciality: &str) -> Result<&str, RustyTimetableError> {
        match self.specialities.get(speciality) {
            Some(sheet) => Ok(sheet),
            None => Err(ConfigError::UnknownSpeciality(speciality.to_owned()))?,
        }
    }
}
