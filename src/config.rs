use std::env;
use std::str::FromStr;

use crate::logging::LogConfig;

#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub enable_file_logs: bool,
    pub log_dir: String,
    pub proctor: ProctorEnvConfig,
}

/// Environment overrides applied on top of the analysis defaults.
#[derive(Debug, Clone)]
pub struct ProctorEnvConfig {
    pub inference_timeout_ms: u64,
    pub monitor_sample_rate: f64,
    pub phone_confidence: f64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            log_level: env_or("RUST_LOG", "info"),
            enable_file_logs: env_or_bool("ENABLE_FILE_LOGS", false),
            log_dir: env_or("LOG_DIR", "./logs"),
            proctor: ProctorEnvConfig {
                inference_timeout_ms: env_or_parse("PROCTOR_INFERENCE_TIMEOUT_MS", 5000_u64),
                monitor_sample_rate: env_or_parse("PROCTOR_MONITOR_SAMPLE_RATE", 0.05_f64),
                phone_confidence: env_or_parse("PROCTOR_PHONE_CONFIDENCE", 0.4_f64),
            },
        }
    }

    pub fn log_config(&self) -> LogConfig {
        LogConfig {
            log_level: self.log_level.clone(),
            enable_file_logs: self.enable_file_logs,
            log_dir: self.log_dir.clone(),
        }
    }
}

pub fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

pub fn env_or_parse<T>(key: &str, default: T) -> T
where
    T: FromStr + Copy,
{
    match env::var(key) {
        Ok(raw) => match raw.parse::<T>() {
            Ok(v) => v,
            Err(_) => {
                tracing::warn!(
                    key,
                    value = %raw,
                    "Failed to parse env var, using default"
                );
                default
            }
        },
        Err(_) => default,
    }
}

pub fn env_or_bool(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => default,
        },
        Err(_) => default,
    }
}
