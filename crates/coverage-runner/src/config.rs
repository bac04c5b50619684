//! Configuration loading and typed config structures for the runner.
//!
//! Settings come from three layers, later layers winning:
//!
//! 1. Defaults compiled into the structs below.
//! 2. An optional YAML file (`coverage-config.yaml` in the working
//!    directory, or the path given with `--config`).
//! 3. Environment overrides (`TBA_API_KEY`) and command-line flags.

use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::error::RunnerError;

/// Default configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "coverage-config.yaml";

/// Top-level runner configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RunnerConfig {
    /// The Blue Alliance API settings.
    #[serde(default)]
    pub tba: TbaConfig,

    /// Defaults for analysis parameters not given on the command line.
    #[serde(default)]
    pub analysis: AnalysisDefaults,
}

impl RunnerConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Io`] if the file cannot be read, or
    /// [`RunnerError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, RunnerError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, RunnerError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Resolve the configuration for this run.
    ///
    /// An explicit `path` must exist. Without one, the default file is used
    /// when present and compiled defaults otherwise. Environment overrides
    /// are applied last.
    pub fn load(path: Option<&Path>) -> Result<Self, RunnerError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_PATH);
                if default_path.exists() {
                    Self::from_file(default_path)?
                } else {
                    info!("config file not found, using defaults");
                    Self::default()
                }
            }
        };
        config.tba.apply_env_overrides();
        Ok(config)
    }
}

/// The Blue Alliance API settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TbaConfig {
    /// API base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// `User-Agent` header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Pause between per-event requests, in milliseconds.
    #[serde(default = "default_request_delay_ms")]
    pub request_delay_ms: u64,

    /// API key. Usually supplied through `TBA_API_KEY` or `--api-key`
    /// rather than the file.
    #[serde(default)]
    pub api_key: Option<String>,
}

impl TbaConfig {
    /// Override the API key with `TBA_API_KEY` when set.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("TBA_API_KEY") {
            self.api_key = Some(val);
        }
    }
}

impl Default for TbaConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            request_delay_ms: default_request_delay_ms(),
            api_key: None,
        }
    }
}

/// Defaults for analysis parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AnalysisDefaults {
    /// Inclusive upper bound on eligible team numbers.
    #[serde(default = "default_max_team_number")]
    pub max_team_number: u32,

    /// How many alternative solutions to look for.
    #[serde(default = "default_max_solutions")]
    pub max_solutions: usize,

    /// Directory of local event JSON files.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

impl Default for AnalysisDefaults {
    fn default() -> Self {
        Self {
            max_team_number: default_max_team_number(),
            max_solutions: default_max_solutions(),
            data_dir: default_data_dir(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions
// ---------------------------------------------------------------------------

fn default_base_url() -> String {
    "https://www.thebluealliance.com/api/v3".to_owned()
}

fn default_user_agent() -> String {
    concat!("district-coverage/", env!("CARGO_PKG_VERSION")).to_owned()
}

const fn default_request_delay_ms() -> u64 {
    100
}

const fn default_max_team_number() -> u32 {
    coverage_types::DEFAULT_MAX_TEAM_NUMBER
}

const fn default_max_solutions() -> usize {
    5
}

fn default_data_dir() -> String {
    "event_data".to_owned()
}
