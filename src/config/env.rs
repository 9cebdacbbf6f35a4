use std::{str::FromStr, time::Duration};

use thiserror::Error;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub directories: DirectoryConfig,
    pub logging: LoggingConfig,
    pub presentation: PresentationConfig,
    pub heuristics: HeuristicConfig,
    pub web: WebContentConfig,
}

#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    pub logs_dir: String,
    pub data_dir: String,
    pub settings_filename: String,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
    /// Mirror logs to stderr in addition to the rolling file.
    pub console: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresentationMode {
    /// Full-viewport overlay over non-educational pages.
    Block,
    /// Highlight/dim elements in place, with a short-lived notice.
    Focus,
}

impl FromStr for PresentationMode {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "block" => Ok(PresentationMode::Block),
            "focus" => Ok(PresentationMode::Focus),
            other => Err(ConfigError::Invalid {
                key: "PRESENTATION_MODE",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PresentationConfig {
    pub mode: PresentationMode,
    pub rerun_delay: Duration,
    pub navigation_delay: Duration,
    pub notice_timeout: Duration,
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            mode: PresentationMode::Block,
            rerun_delay: Duration::from_millis(100),
            navigation_delay: Duration::from_millis(500),
            notice_timeout: Duration::from_millis(5_000),
        }
    }
}

/// Tuning constants for the keyword heuristics.
#[derive(Debug, Clone, PartialEq)]
pub struct HeuristicConfig {
    pub title_weight: f64,
    pub body_weight: f64,
    pub page_threshold: f64,
    pub element_min_chars: usize,
    pub element_min_score: usize,
}

impl Default for HeuristicConfig {
    fn default() -> Self {
        Self {
            title_weight: 1.0,
            body_weight: 0.01,
            page_threshold: 3.0,
            element_min_chars: 20,
            element_min_score: 2,
        }
    }
}

#[derive(Debug, Clone)]
pub struct WebContentConfig {
    pub fetch_timeout: Duration,
    pub content_max_length: usize,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}
