use std::time::Duration;

use serde::Deserialize;

static CONFIG: OnceCell<Config> = OnceCell::const_new();

mod config_dir;
pub use config_dir::{CONFIG_ENV, find_config_file, read_config, read_config_from};

mod error;
pub use error::{ConfigError, ConfigResult};
use tokio::sync::OnceCell;

pub const DEFAULT_REQUIRED_SCORE: u32 = 70;
pub const DEFAULT_DURATION_MINUTES: u32 = 30;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    api: Api,
    #[serde(default)]
    quiz: Quiz,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Api {
    base_url: String,
    #[serde(default = "default_timeout_secs")]
    timeout_secs: u64,
}

/// Fallbacks applied when a course or exam leaves a value unset.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Quiz {
    #[serde(default = "default_required_score")]
    required_score: u32,
    #[serde(default = "default_duration_minutes")]
    duration_minutes: u32,
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_required_score() -> u32 {
    DEFAULT_REQUIRED_SCORE
}

fn default_duration_minutes() -> u32 {
    DEFAULT_DURATION_MINUTES
}

impl Default for Api {
    fn default() -> Self {
        Self {
            base_url: String::from("http://127.0.0.1:8000/api"),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for Quiz {
    fn default() -> Self {
        Self {
            required_score: DEFAULT_REQUIRED_SCORE,
            duration_minutes: DEFAULT_DURATION_MINUTES,
        }
    }
}

impl Config {
    #[tracing::instrument]
    pub async fn get_or_init(use_local: bool) -> &'static Config {
        CONFIG
            .get_or_init(|| async {
                let read_cfg = |use_local| -> ConfigResult<Self> {
                    let bytes = read_config(use_local)?;
                    Self::from_toml(&String::from_utf8_lossy(&bytes))
                };

                match read_cfg(use_local) {
                    Ok(c) => c,
                    Err(ConfigError::ConfigNotFound) => {
                        tracing::warn!("config not found, using defaults");
                        Config::default()
                    }
                    Err(e) => {
                        crate::error::log_error(&e);
                        tracing::error!("Config is invalid.");
                        std::process::exit(1);
                    }
                }
            })
            .await
    }

    pub fn from_toml(raw: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(raw)?;
        config.check()?;
        Ok(config)
    }

    fn check(&self) -> ConfigResult<()> {
        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                key: "api.base_url",
                reason: format!("`{}` is not an http(s) url", self.api.base_url),
            });
        }
        if self.quiz.required_score > 100 {
            return Err(ConfigError::InvalidValue {
                key: "quiz.required_score",
                reason: String::from("must be within 0..=100"),
            });
        }
        if self.quiz.duration_minutes == 0 {
            return Err(ConfigError::InvalidValue {
                key: "quiz.duration_minutes",
                reason: String::from("must be positive"),
            });
        }
        Ok(())
    }

    #[inline]
    pub fn api(&self) -> &Api {
        &self.api
    }

    #[inline]
    pub fn quiz(&self) -> Quiz {
        self.quiz
    }
}

impl Api {
    #[inline]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[inline]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Quiz {
    pub fn new(required_score: u32, duration_minutes: u32) -> Self {
        Self {
            required_score,
            duration_minutes,
        }
    }

    #[inline]
    pub fn required_score(&self) -> u32 {
        self.required_score
    }

    #[inline]
    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[tokio::test]
    async fn config_test() {
        let config = Config::get_or_init(true).await;
        assert_eq!(config.api().base_url(), "http://127.0.0.1:8000/api"); // defaults
        assert_eq!(config.quiz().required_score(), 70);
    }

    #[test]
    fn partial_config_uses_defaults() {
        let config = Config::from_toml("[api]\nbase_url = 'https://learnup.example/api'\n").unwrap();
        assert_eq!(config.api().base_url(), "https://learnup.example/api");
        assert_eq!(config.api().timeout(), Duration::from_secs(15));
        assert_eq!(config.quiz().required_score(), DEFAULT_REQUIRED_SCORE);
        assert_eq!(config.quiz().duration_minutes(), DEFAULT_DURATION_MINUTES);
    }

    #[test]
    fn rejects_bad_values() {
        let err = Config::from_toml("[api]\nbase_url = 'ftp://x'\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "api.base_url", .. }));

        let err = Config::from_toml("[quiz]\nrequired_score = 101\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "quiz.required_score", .. }));

        let err = Config::from_toml("[quiz]\nduration_minutes = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "quiz.duration_minutes", .. }));
    }

    #[test]
    fn rejects_malformed_toml() {
        assert!(matches!(
            Config::from_toml("[api"),
            Err(ConfigError::TomlDeError(_))
        ));
    }
}
