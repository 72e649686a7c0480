use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{LimitDatesError, Result};
use crate::jurisdiction::{default_jurisdictions, Jurisdiction};
use crate::schema::{INPUT_SUFFIX, OUTPUT_SUFFIX};

pub const DEFAULT_DATA_DIR: &str = "dmr_data";

/// What to do when a jurisdiction fails to process.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Stop the whole run at the first failing jurisdiction.
    #[default]
    Abort,
    /// Record the failure and move on to the next jurisdiction.
    Continue,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchConfig {
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
    pub jurisdictions: Vec<Jurisdiction>,
    pub on_error: FailurePolicy,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            output_dir: PathBuf::from(DEFAULT_DATA_DIR),
            jurisdictions: default_jurisdictions(),
            on_error: FailurePolicy::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    data_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    jurisdictions: Option<Vec<Jurisdiction>>,
    on_error: Option<FailurePolicy>,
}

impl BatchConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| LimitDatesError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents, &path.display().to_string())
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Self::parse(contents, "<inline>")
    }

    fn parse(contents: &str, origin: &str) -> Result<Self> {
        let file: ConfigFile =
            toml::from_str(contents).map_err(|err| LimitDatesError::Config {
                path: origin.to_string(),
                message: err.to_string(),
            })?;

        if file.jurisdictions.as_ref().is_some_and(Vec::is_empty) {
            return Err(LimitDatesError::Config {
                path: origin.to_string(),
                message: "jurisdictions must not be empty".to_string(),
            });
        }

        let mut config = Self::default();
        if let Some(data_dir) = file.data_dir {
            config.set_data_dir(data_dir);
        }
        if let Some(output_dir) = file.output_dir {
            config.output_dir = output_dir;
        }
        if let Some(jurisdictions) = file.jurisdictions {
            config.jurisdictions = jurisdictions;
        }
        if let Some(on_error) = file.on_error {
            config.on_error = on_error;
        }
        Ok(config)
    }

    /// Points the input directory at `data_dir`. The output directory follows
    /// along unless it was already moved somewhere else.
    pub fn set_data_dir(&mut self, data_dir: impl Into<PathBuf>) {
        let data_dir = data_dir.into();
        if self.output_dir == self.data_dir {
            self.output_dir = data_dir.clone();
        }
        self.data_dir = data_dir;
    }

    pub fn input_path(&self, jurisdiction: &Jurisdiction) -> PathBuf {
        self.data_dir
            .join(format!("{}{}", jurisdiction.as_str(), INPUT_SUFFIX))
    }

    pub fn output_path(&self, jurisdiction: &Jurisdiction) -> PathBuf {
        self.output_dir
            .join(format!("{}{}", jurisdiction.as_str(), OUTPUT_SUFFIX))
    }
}
