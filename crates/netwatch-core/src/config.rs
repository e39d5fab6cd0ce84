use crate::error::{NetwatchError, Result};
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const API_KEY_ENV_VAR: &str = "VT_API_KEY";
pub const AUTOGENERATED_TAG: &str = "autogenerated";
pub const RULESET_LINK: &str = "https://www.virustotal.com/yara-editor/livehunt/";

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Runtime settings. Every field has a default so an absent config file is
/// equivalent to an empty one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_ruleset_prefix")]
    pub ruleset_prefix: String,
    #[serde(default = "default_ruleset_tag")]
    pub ruleset_tag: String,
    /// Maximum number of rulesets read back from the service.
    #[serde(default = "default_fetch_limit")]
    pub fetch_limit: usize,
    #[serde(default = "default_workers")]
    pub workers: usize,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_templates_dir")]
    pub templates_dir: PathBuf,
}

fn default_api_url() -> String {
    "https://www.virustotal.com/api/v3".to_string()
}

fn default_ruleset_prefix() -> String {
    "auto_network_watch_".to_string()
}

fn default_ruleset_tag() -> String {
    AUTOGENERATED_TAG.to_string()
}

fn default_fetch_limit() -> usize {
    10
}

fn default_workers() -> usize {
    4
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_templates_dir() -> PathBuf {
    PathBuf::from(paths::DEFAULT_TEMPLATES_DIR)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            ruleset_prefix: default_ruleset_prefix(),
            ruleset_tag: default_ruleset_tag(),
            fetch_limit: default_fetch_limit(),
            workers: default_workers(),
            timeout_secs: default_timeout_secs(),
            templates_dir: default_templates_dir(),
        }
    }
}

impl Config {
    /// Load from a YAML file, or return defaults when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        if !path.exists() {
            return Err(NetwatchError::ConfigNotFound(path.to_path_buf()));
        }
        let data = std::fs::read_to_string(path)?;
        let cfg: Config = serde_yaml::from_str(&data)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(NetwatchError::InvalidConfig(
                "workers must be at least 1".into(),
            ));
        }
        if self.fetch_limit == 0 {
            return Err(NetwatchError::InvalidConfig(
                "fetch_limit must be at least 1".into(),
            ));
        }
        if self.ruleset_prefix.is_empty() {
            return Err(NetwatchError::InvalidConfig(
                "ruleset_prefix cannot be empty".into(),
            ));
        }
        Ok(())
    }

    /// Filter expression selecting the rulesets this tool owns.
    pub fn ruleset_filter(&self) -> String {
        format!("name:{}* tag:{}", self.ruleset_prefix, self.ruleset_tag)
    }
}

/// Editor link for a ruleset id.
pub fn ruleset_link(id: &str) -> String {
    format!("{RULESET_LINK}{id}")
}
