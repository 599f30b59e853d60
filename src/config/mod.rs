//! Configuration system (layered: CLI flags > env > config file > defaults).
//!
//! [`AgentConfig`] is a plain value. Nothing in the library reads ambient
//! process state after it has been built, so independent loops can run with
//! independent configurations.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::error::{AgentError, Result};

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_MAX_TURNS: usize = 5;
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_WEATHER_BASE_URL: &str = "https://wttr.in";
pub const DEFAULT_SEARCH_BASE_URL: &str = "https://en.wikipedia.org";

const CONFIG_FILE_NAME: &str = "config.toml";

/// Everything a loop needs to talk to the model and the lookup services.
#[derive(Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AgentConfig {
    /// Model identifier sent with every completion request.
    pub model: String,
    /// Sampling temperature; `0.0` keeps decoding deterministic.
    pub temperature: f64,
    /// Upper bound on model invocations per question.
    pub max_turns: usize,
    pub api_key: Option<String>,
    pub base_url: String,
    pub weather_base_url: String,
    pub search_base_url: String,
    /// Per-request HTTP timeout. `None` leaves requests unbounded.
    pub request_timeout_secs: Option<u64>,
}

impl std::fmt::Debug for AgentConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentConfig")
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_turns", &self.max_turns)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("weather_base_url", &self.weather_base_url)
            .field("search_base_url", &self.search_base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.0,
            max_turns: DEFAULT_MAX_TURNS,
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            weather_base_url: DEFAULT_WEATHER_BASE_URL.to_string(),
            search_base_url: DEFAULT_SEARCH_BASE_URL.to_string(),
            request_timeout_secs: None,
        }
    }
}

impl AgentConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the full layered configuration once at process start.
    ///
    /// `explicit_file` wins over the per-user config file; a missing explicit
    /// file is an error, a missing per-user file is not.
    pub fn load(explicit_file: Option<&Path>) -> Result<Self> {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error
        Self::load_with(explicit_file, |key| std::env::var(key).ok())
    }

    /// Layer defaults, then the config file, then `lookup` over both.
    pub fn load_with<F>(explicit_file: Option<&Path>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match explicit_file {
            Some(path) => Self::from_file(path)?,
            None => match default_config_path().filter(|p| p.is_file()) {
                Some(path) => Self::from_file(&path)?,
                None => Self::default(),
            },
        };
        config.apply_env(lookup)?;
        Ok(config)
    }

    /// Parse a TOML config file. Absent keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&raw)?;
        debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    /// Overlay environment variables, read through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup("OPENAI_API_KEY") {
            self.api_key = Some(key);
        }
        if let Some(url) = lookup("OPENAI_BASE_URL") {
            self.base_url = url;
        }
        if let Some(model) = lookup("REAGENT_MODEL") {
            self.model = model;
        }
        if let Some(raw) = lookup("REAGENT_MAX_TURNS") {
            self.max_turns = raw.trim().parse().map_err(|_| {
                AgentError::Configuration(format!("REAGENT_MAX_TURNS is not a count: {raw:?}"))
            })?;
        }
        if let Some(url) = lookup("REAGENT_WEATHER_URL") {
            self.weather_base_url = url;
        }
        if let Some(url) = lookup("REAGENT_SEARCH_URL") {
            self.search_base_url = url;
        }
        Ok(())
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_max_turns(mut self, max_turns: usize) -> Self {
        self.max_turns = max_turns;
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_weather_base_url(mut self, url: impl Into<String>) -> Self {
        self.weather_base_url = url.into();
        self
    }

    pub fn with_search_base_url(mut self, url: impl Into<String>) -> Self {
        self.search_base_url = url.into();
        self
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Reject values the loop cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.max_turns == 0 {
            return Err(AgentError::Configuration(
                "max_turns must be at least 1".into(),
            ));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(AgentError::Configuration(format!(
                "temperature must be within 0.0..=2.0, got {}",
                self.temperature
            )));
        }
        if self.model.trim().is_empty() {
            return Err(AgentError::Configuration("model must not be empty".into()));
        }
        Ok(())
    }
}

/// `<user config dir>/reagent/config.toml`, if the platform has one.
pub fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "reagent")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}
