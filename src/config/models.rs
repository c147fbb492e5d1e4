// src/config/models.rs
use crate::checker::DEFAULT_TIMEOUT_SECS;
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub checker: CheckerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default = "default_sites")]
    pub sites: Vec<SiteConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            checker: CheckerConfig::default(),
            logging: LoggingConfig::default(),
            sites: default_sites(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        self.checker.validate()?;

        if self.sites.is_empty() {
            bail!("No sites configured");
        }

        let mut names = HashSet::new();
        for site in &self.sites {
            if site.name.trim().is_empty() {
                bail!("Site name must not be empty (url: {})", site.url);
            }
            if site.url.trim().is_empty() {
                bail!("Site {} has an empty url", site.name);
            }
            if !names.insert(site.name.as_str()) {
                bail!("Duplicate site name: {}", site.name);
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckerConfig {
    /// Bound on the whole request, connect included.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: f64,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl CheckerConfig {
    fn validate(&self) -> Result<()> {
        if !self.timeout_secs.is_finite() || self.timeout_secs <= 0.0 {
            bail!(
                "checker.timeout_secs must be a positive number, got {}",
                self.timeout_secs
            );
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Used when `RUST_LOG` is not set.
    #[serde(default = "default_level")]
    pub level: String,

    #[serde(default = "default_true")]
    pub console: bool,

    /// Appended to on every run. `null` disables the file sink.
    #[serde(default = "default_log_file")]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            console: true,
            file: default_log_file(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
    pub name: String,
    pub url: String,
}

impl SiteConfig {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

fn default_timeout_secs() -> f64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_log_file() -> Option<PathBuf> {
    Some(PathBuf::from("site_checker.log"))
}

fn default_sites() -> Vec<SiteConfig> {
    vec![
        SiteConfig::new("Primary Domain", "https://curiosityincode.com/"),
        SiteConfig::new("Google", "https://google.com"),
        SiteConfig::new("GitHub", "https://github.com"),
        SiteConfig::new("Bad Url", "https://this-definitely-does-not-exist.com"),
    ]
}
