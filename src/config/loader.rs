use std::{env, str::FromStr, time::Duration};

use super::env::{
    AppConfig, ConfigError, DirectoryConfig, HeuristicConfig, LoggingConfig, PresentationConfig,
    PresentationMode, WebContentConfig,
};

pub fn load_config() -> Result<AppConfig, ConfigError> {
    AppConfig::from_env()
}

impl AppConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let directories = DirectoryConfig {
            logs_dir: env::var("LOGS_DIR").unwrap_or_else(|_| "logs".to_string()),
            data_dir: env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string()),
            settings_filename: env::var("SETTINGS_FILENAME")
                .unwrap_or_else(|_| "settings.json".to_string()),
        };

        let logging = LoggingConfig {
            level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            console: parse_var("LOG_CONSOLE").unwrap_or(true),
        };

        let defaults = PresentationConfig::default();
        let mode = match env::var("PRESENTATION_MODE").ok().filter(|v| !v.is_empty()) {
            Some(value) => value.parse::<PresentationMode>()?,
            None => defaults.mode,
        };
        let presentation = PresentationConfig {
            mode,
            rerun_delay: parse_millis("RERUN_DELAY_MS").unwrap_or(defaults.rerun_delay),
            navigation_delay: parse_millis("NAVIGATION_DELAY_MS")
                .unwrap_or(defaults.navigation_delay),
            notice_timeout: parse_millis("FOCUS_NOTICE_TIMEOUT_MS")
                .unwrap_or(defaults.notice_timeout),
        };

        let tuning = HeuristicConfig::default();
        let heuristics = HeuristicConfig {
            title_weight: parse_var("TITLE_WEIGHT").unwrap_or(tuning.title_weight),
            body_weight: parse_var("BODY_WEIGHT").unwrap_or(tuning.body_weight),
            page_threshold: parse_var("PAGE_THRESHOLD").unwrap_or(tuning.page_threshold),
            element_min_chars: parse_var("ELEMENT_MIN_CHARS").unwrap_or(tuning.element_min_chars),
            element_min_score: parse_var("ELEMENT_MIN_SCORE").unwrap_or(tuning.element_min_score),
        };

        let web = WebContentConfig {
            fetch_timeout: parse_millis("WEBPAGE_FETCH_TIMEOUT")
                .unwrap_or(Duration::from_millis(10_000)),
            content_max_length: parse_var("WEBPAGE_CONTENT_MAX_LENGTH").unwrap_or(20_000),
        };

        Ok(Self {
            directories,
            logging,
            presentation,
            heuristics,
            web,
        })
    }
}

fn parse_var<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|value| value.trim().parse::<T>().ok())
}

fn parse_millis(key: &str) -> Option<Duration> {
    parse_var::<u64>(key).map(Duration::from_millis)
}
