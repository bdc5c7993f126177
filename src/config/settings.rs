//! Application settings persisted as a flat JSON document.
//!
//! Holds the single user-editable setting, the company name shown in report
//! headers. The on-disk shape is the flat document
//! `{ "CompanyName": string | null }`.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::errors::Result;

/// User-editable application settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Company name printed in report headers, if configured.
    #[serde(rename = "CompanyName")]
    pub company_name: Option<String>,
}

impl Settings {
    /// Loads settings from a JSON file; a missing file yields the defaults.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        if !path_ref.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path_ref)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Saves settings as pretty-printed JSON, trimming the company name.
    ///
    /// # Errors
    /// Returns an error if serialization or the write fails.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let normalized = Self {
            company_name: self
                .company_name
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(ToString::to_string),
        };
        let json = serde_json::to_string_pretty(&normalized)?;
        fs::write(path, json)?;
        Ok(())
    }
}
