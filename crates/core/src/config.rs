use crate::util::BackoffConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_HISTORY_CAPACITY: usize = 30;
pub const DEFAULT_FRAME_SKIP_INTERVAL: u32 = 3;
pub const DEFAULT_MAX_CLASSIFY_WIDTH: u32 = 640;
pub const DEFAULT_MOVEMENT_PIXEL_THRESHOLD: u8 = 30;
pub const DEFAULT_MOVEMENT_SCALE: f64 = 8.0;
pub const DEFAULT_CLASSIFY_DEADLINE_MS: u64 = 250;
pub const DEFAULT_CAPTURE_INTERVAL_MS: u64 = 100;
pub const ENV_HISTORY_CAPACITY: &str = "COACH_HISTORY_CAPACITY";
pub const ENV_FRAME_SKIP: &str = "COACH_FRAME_SKIP";
pub const ENV_CLASSIFY_DEADLINE_MS: &str = "COACH_CLASSIFY_DEADLINE_MS";
pub const ENV_CAPTURE_INTERVAL_MS: &str = "COACH_CAPTURE_INTERVAL_MS";

/// Tunables of the per-frame analysis pipeline.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AnalyzerConfig {
    /// Capacity of each rolling history.
    pub history_capacity: usize,
    /// The emotion backend runs on every Nth classification; calls in between reuse the cache.
    pub frame_skip_interval: u32,
    /// Frames wider than this are downscaled before classification.
    pub max_classify_width: u32,
    /// Minimum absolute intensity delta for a pixel to count as changed.
    pub movement_pixel_threshold: u8,
    /// Multiplier applied to the changed-pixel fraction.
    pub movement_scale: f64,
    /// Soft deadline for a single backend classification.
    pub classify_deadline: Duration,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            frame_skip_interval: DEFAULT_FRAME_SKIP_INTERVAL,
            max_classify_width: DEFAULT_MAX_CLASSIFY_WIDTH,
            movement_pixel_threshold: DEFAULT_MOVEMENT_PIXEL_THRESHOLD,
            movement_scale: DEFAULT_MOVEMENT_SCALE,
            classify_deadline: Duration::from_millis(DEFAULT_CLASSIFY_DEADLINE_MS),
        }
    }
}

impl AnalyzerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history_capacity == 0 {
            return Err(ConfigError::ZeroHistoryCapacity);
        }
        if self.frame_skip_interval == 0 {
            return Err(ConfigError::ZeroFrameSkip);
        }
        if self.max_classify_width == 0 {
            return Err(ConfigError::ZeroClassifyWidth);
        }
        if !self.movement_scale.is_finite() || self.movement_scale <= 0.0 {
            return Err(ConfigError::InvalidMovementScale(self.movement_scale));
        }
        if self.classify_deadline.is_zero() {
            return Err(ConfigError::ZeroDuration("classify_deadline"));
        }
        Ok(())
    }
}

/// Configuration of a live capture session.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SessionConfig {
    pub analyzer: AnalyzerConfig,
    /// Cadence of the capture loop, independent of any UI refresh rate.
    pub capture_interval: Duration,
    /// Wait schedule after the camera yields no frame.
    pub backoff: BackoffConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            analyzer: AnalyzerConfig::default(),
            capture_interval: Duration::from_millis(DEFAULT_CAPTURE_INTERVAL_MS),
            backoff: BackoffConfig::default(),
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.analyzer.validate()?;
        if self.capture_interval.is_zero() {
            return Err(ConfigError::ZeroDuration("capture_interval"));
        }
        Ok(())
    }

    /// Builds a config from CLI overrides, falling back to environment variables and defaults.
    pub fn resolve(overrides: SessionOverrides, env: &impl Env) -> Result<Self, ConfigError> {
        let history_capacity = resolve_number(
            overrides.history_capacity.map(|v| v as u64),
            ENV_HISTORY_CAPACITY,
            env,
            DEFAULT_HISTORY_CAPACITY as u64,
        )?;
        let frame_skip_interval = resolve_number(
            overrides.frame_skip_interval.map(u64::from),
            ENV_FRAME_SKIP,
            env,
            u64::from(DEFAULT_FRAME_SKIP_INTERVAL),
        )?;
        let classify_deadline_ms = resolve_number(
            overrides.classify_deadline_ms,
            ENV_CLASSIFY_DEADLINE_MS,
            env,
            DEFAULT_CLASSIFY_DEADLINE_MS,
        )?;
        let capture_interval_ms = resolve_number(
            overrides.capture_interval_ms,
            ENV_CAPTURE_INTERVAL_MS,
            env,
            DEFAULT_CAPTURE_INTERVAL_MS,
        )?;

        let config = Self {
            analyzer: AnalyzerConfig {
                history_capacity: usize::try_from(history_capacity).map_err(|_| {
                    ConfigError::InvalidNumber {
                        key: ENV_HISTORY_CAPACITY,
                        value: history_capacity.to_string(),
                    }
                })?,
                frame_skip_interval: u32::try_from(frame_skip_interval).map_err(|_| {
                    ConfigError::InvalidNumber {
                        key: ENV_FRAME_SKIP,
                        value: frame_skip_interval.to_string(),
                    }
                })?,
                classify_deadline: Duration::from_millis(classify_deadline_ms),
                ..AnalyzerConfig::default()
            },
            capture_interval: Duration::from_millis(capture_interval_ms),
            backoff: BackoffConfig::default(),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Values supplied on the command line; `None` defers to the environment.
#[derive(Clone, Debug, Default)]
pub struct SessionOverrides {
    pub history_capacity: Option<usize>,
    pub frame_skip_interval: Option<u32>,
    pub classify_deadline_ms: Option<u64>,
    pub capture_interval_ms: Option<u64>,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("history capacity must be > 0")]
    ZeroHistoryCapacity,
    #[error("frame skip interval must be > 0")]
    ZeroFrameSkip,
    #[error("max classify width must be > 0")]
    ZeroClassifyWidth,
    #[error("movement scale must be a positive number, got {0}")]
    InvalidMovementScale(f64),
    #[error("{0} must be > 0")]
    ZeroDuration(&'static str),
    #[error("{key}: expected a non-negative integer, got {value:?}")]
    InvalidNumber { key: &'static str, value: String },
}

pub trait Env {
    fn var(&self, key: &str) -> Option<String>;
}

#[derive(Clone, Debug, Default)]
pub struct StdEnv;

impl Env for StdEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

#[derive(Clone, Debug, Default)]
pub struct MapEnv {
    vars: std::collections::BTreeMap<String, String>,
}

impl MapEnv {
    pub fn with_var(mut self, key: &str, value: &str) -> Self {
        self.vars.insert(key.to_owned(), value.to_owned());
        self
    }
}

impl Env for MapEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

pub fn resolve_number(
    cli_value: Option<u64>,
    env_key: &'static str,
    env: &impl Env,
    default: u64,
) -> Result<u64, ConfigError> {
    match cli_value {
        Some(v) => Ok(v),
        None => match env.var(env_key) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidNumber {
                    key: env_key,
                    value: raw,
                }),
            None => Ok(default),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_value_takes_precedence_over_env() {
        let env = MapEnv::default().with_var(ENV_FRAME_SKIP, "5");
        let v = resolve_number(Some(2), ENV_FRAME_SKIP, &env, 3).expect("valid");
        assert_eq!(v, 2);
    }

    #[test]
    fn env_used_when_cli_missing() {
        let env = MapEnv::default().with_var(ENV_FRAME_SKIP, " 5 ");
        let v = resolve_number(None, ENV_FRAME_SKIP, &env, 3).expect("valid");
        assert_eq!(v, 5);
    }

    #[test]
    fn default_used_when_both_missing() {
        let v = resolve_number(None, ENV_FRAME_SKIP, &MapEnv::default(), 3).expect("valid");
        assert_eq!(v, 3);
    }

    #[test]
    fn malformed_env_value_is_rejected() {
        let env = MapEnv::default().with_var(ENV_HISTORY_CAPACITY, "lots");
        let err = resolve_number(None, ENV_HISTORY_CAPACITY, &env, 30).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidNumber {
                key: ENV_HISTORY_CAPACITY,
                value: "lots".to_owned()
            }
        );
    }

    #[test]
    fn resolve_session_config_mixes_sources() {
        let env = MapEnv::default()
            .with_var(ENV_HISTORY_CAPACITY, "50")
            .with_var(ENV_CAPTURE_INTERVAL_MS, "40");
        let cfg = SessionConfig::resolve(
            SessionOverrides {
                frame_skip_interval: Some(1),
                ..Default::default()
            },
            &env,
        )
        .expect("valid config");

        assert_eq!(cfg.analyzer.history_capacity, 50);
        assert_eq!(cfg.analyzer.frame_skip_interval, 1);
        assert_eq!(cfg.capture_interval, Duration::from_millis(40));
        assert_eq!(
            cfg.analyzer.classify_deadline,
            Duration::from_millis(DEFAULT_CLASSIFY_DEADLINE_MS)
        );
    }

    #[test]
    fn zero_values_are_rejected() {
        let err = SessionConfig::resolve(
            SessionOverrides {
                history_capacity: Some(0),
                ..Default::default()
            },
            &MapEnv::default(),
        )
        .unwrap_err();
        assert_eq!(err, ConfigError::ZeroHistoryCapacity);

        let err = SessionConfig::resolve(
            SessionOverrides {
                capture_interval_ms: Some(0),
                ..Default::default()
            },
            &MapEnv::default(),
        )
        .unwrap_err();
        assert_eq!(err, ConfigError::ZeroDuration("capture_interval"));
    }

    #[test]
    fn defaults_are_valid() {
        assert!(SessionConfig::default().validate().is_ok());
    }
}
