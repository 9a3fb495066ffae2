use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use std::sync::OnceLock;
use thiserror::Error;

use crate::processing::Confidence;

/// Errors encountered while loading configuration from environment variables.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Environment variable contained a value that could not be parsed.
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}

/// Runtime configuration for the EduVision pipeline.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Summary bound applied when the caller does not supply one.
    pub summary_max_length: usize,
    /// Document answers longer than this many characters are reported with `High` confidence.
    pub high_confidence_min_chars: usize,
    /// Confidence reported for every visual answer.
    pub visual_confidence: Confidence,
    /// Number of characters shown in an upload preview.
    pub preview_chars: usize,
    /// Estimated narration time per word, in seconds.
    pub speech_seconds_per_word: f64,
    /// Explicit log file; `None` writes to `logs/eduvision.log`.
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            summary_max_length: 150,
            high_confidence_min_chars: 50,
            visual_confidence: Confidence::Medium,
            preview_chars: 200,
            speech_seconds_per_word: 0.5,
            log_file: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables, falling back to defaults for unset keys.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup, applying the same parsing rules as
    /// [`Config::from_env`]. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();
        Ok(Self {
            summary_max_length: parse_value(&read, "EDUVISION_SUMMARY_MAX_LENGTH")?
                .unwrap_or(defaults.summary_max_length),
            high_confidence_min_chars: parse_value(&read, "EDUVISION_HIGH_CONFIDENCE_MIN_CHARS")?
                .unwrap_or(defaults.high_confidence_min_chars),
            visual_confidence: parse_value(&read, "EDUVISION_VISUAL_CONFIDENCE")?
                .unwrap_or(defaults.visual_confidence),
            preview_chars: parse_value(&read, "EDUVISION_PREVIEW_CHARS")?
                .unwrap_or(defaults.preview_chars),
            speech_seconds_per_word: parse_speech_rate(&read)?
                .unwrap_or(defaults.speech_seconds_per_word),
            log_file: read("EDUVISION_LOG_FILE").map(PathBuf::from),
        })
    }
}

fn parse_value<T, F>(read: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    read(key)
        .map(|value| {
            value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue(key.to_string()))
        })
        .transpose()
}

// The rate multiplies a word count, so it must be a finite non-negative number.
fn parse_speech_rate<F>(read: &F) -> Result<Option<f64>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    const KEY: &str = "EDUVISION_SPEECH_SECONDS_PER_WORD";
    match parse_value::<f64, _>(read, KEY)? {
        Some(rate) if !rate.is_finite() || rate < 0.0 => {
            Err(ConfigError::InvalidValue(KEY.to_string()))
        }
        rate => Ok(rate),
    }
}

/// Global configuration cache populated during process start.
pub static CONFIG: OnceLock<Config> = OnceLock::new();

/// Retrieve the loaded configuration, falling back to defaults when `init_config` never ran.
pub fn get_config() -> &'static Config {
    CONFIG.get_or_init(Config::default)
}

/// Load configuration from the environment and install it in the global cache.
pub fn init_config() -> Result<&'static Config, ConfigError> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;
    tracing::debug!(
        summary_max_length = config.summary_max_length,
        high_confidence_min_chars = config.high_confidence_min_chars,
        visual_confidence = ?config.visual_confidence,
        preview_chars = config.preview_chars,
        "Loaded configuration"
    );
    Ok(CONFIG.get_or_init(|| config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_match_documented_values() {
        let config = Config::default();
        assert_eq!(config.summary_max_length, 150);
        assert_eq!(config.high_confidence_min_chars, 50);
        assert_eq!(config.visual_confidence, Confidence::Medium);
        assert_eq!(config.preview_chars, 200);
        assert!(config.log_file.is_none());
    }

    #[test]
    fn confidence_parses_case_insensitively() {
        assert_eq!("HIGH".parse::<Confidence>(), Ok(Confidence::High));
        assert_eq!(" medium ".trim().parse::<Confidence>(), Ok(Confidence::Medium));
        assert!("certain".parse::<Confidence>().is_err());
    }

    fn lookup<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        let values: HashMap<&str, &str> = pairs.iter().copied().collect();
        move |key: &str| values.get(key).map(|value| value.to_string())
    }

    #[test]
    fn unset_keys_fall_back_to_defaults() {
        let config = Config::from_lookup(lookup(&[("EDUVISION_PREVIEW_CHARS", "  ")]))
            .expect("config");
        assert_eq!(config.summary_max_length, 150);
        assert_eq!(config.preview_chars, 200);
        assert_eq!(config.speech_seconds_per_word, 0.5);
    }

    #[test]
    fn valid_values_override_defaults() {
        let config = Config::from_lookup(lookup(&[
            ("EDUVISION_SUMMARY_MAX_LENGTH", " 90 "),
            ("EDUVISION_HIGH_CONFIDENCE_MIN_CHARS", "20"),
            ("EDUVISION_VISUAL_CONFIDENCE", "high"),
            ("EDUVISION_SPEECH_SECONDS_PER_WORD", "0"),
            ("EDUVISION_LOG_FILE", "/tmp/eduvision.log"),
        ]))
        .expect("config");
        assert_eq!(config.summary_max_length, 90);
        assert_eq!(config.high_confidence_min_chars, 20);
        assert_eq!(config.visual_confidence, Confidence::High);
        assert_eq!(config.speech_seconds_per_word, 0.0);
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/eduvision.log")));
    }

    #[test]
    fn unparsable_value_names_the_variable() {
        let error = Config::from_lookup(lookup(&[("EDUVISION_SUMMARY_MAX_LENGTH", "short")]))
            .expect_err("invalid length");
        assert!(
            matches!(error, ConfigError::InvalidValue(ref key) if key == "EDUVISION_SUMMARY_MAX_LENGTH")
        );
    }

    #[test]
    fn out_of_range_speech_rate_is_rejected() {
        for value in ["-1", "NaN", "inf"] {
            let result =
                Config::from_lookup(lookup(&[("EDUVISION_SPEECH_SECONDS_PER_WORD", value)]));
            assert!(
                matches!(result, Err(ConfigError::InvalidValue(ref key)) if key == "EDUVISION_SPEECH_SECONDS_PER_WORD"),
                "{value} was accepted"
            );
        }
    }
}
