use std::{str::FromStr, time::Duration};

use crate::error::ConfigError;

pub const DEFAULT_TITLE: &str = "Timer";
pub const DEFAULT_TICK_RATE: u32 = 60;
pub const DEFAULT_FONT_SIZE: f32 = 14.0;
pub const DEFAULT_LOG_FILTER: &str = "debug";

const NANOS_PER_SEC: u64 = 1_000_000_000;
/// Fastest rate whose period is still at least one nanosecond.
const MAX_TICK_RATE: u64 = NANOS_PER_SEC;

const ENV_TITLE: &str = "STOPWATCH_TITLE";
const ENV_TICK_RATE: &str = "STOPWATCH_TICK_RATE";
const ENV_FONT_SIZE: &str = "STOPWATCH_FONT_SIZE";
const ENV_LOG: &str = "STOPWATCH_LOG";

#[derive(Debug, Clone, PartialEq)]
pub struct StopwatchConfig {
    pub title: String,
    /// Worker ticks per second.
    pub tick_rate: u32,
    /// Point size of the time label.
    pub font_size: f32,
    pub window_size: [f32; 2],
    /// `env_logger` filter used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for StopwatchConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            tick_rate: DEFAULT_TICK_RATE,
            font_size: DEFAULT_FONT_SIZE,
            window_size: [240.0, 120.0],
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl StopwatchConfig {
    /// Defaults overlaid with any `STOPWATCH_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&'static str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(title) = lookup(ENV_TITLE) {
            config.title = title;
        }
        if let Some(value) = lookup(ENV_TICK_RATE) {
            config.tick_rate = parse_env(ENV_TICK_RATE, value)?;
        }
        if let Some(value) = lookup(ENV_FONT_SIZE) {
            config.font_size = parse_env(ENV_FONT_SIZE, value)?;
        }
        if let Some(filter) = lookup(ENV_LOG) {
            config.log_filter = filter;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_tick_rate(mut self, tick_rate: u32) -> Self {
        self.tick_rate = tick_rate;
        self
    }

    pub fn with_font_size(mut self, font_size: f32) -> Self {
        self.font_size = font_size;
        self
    }

    pub fn with_window_size(mut self, width: f32, height: f32) -> Self {
        self.window_size = [width, height];
        self
    }

    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_rate == 0 || u64::from(self.tick_rate) > MAX_TICK_RATE {
            return Err(ConfigError::InvalidTickRate(self.tick_rate));
        }
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(ConfigError::InvalidFontSize(self.font_size));
        }
        Ok(())
    }

    /// Time between worker ticks. A zero rate falls back to the default and
    /// the period never drops below one nanosecond.
    pub fn tick_period(&self) -> Duration {
        let rate = if self.tick_rate == 0 {
            DEFAULT_TICK_RATE
        } else {
            self.tick_rate
        };
        Duration::from_nanos((NANOS_PER_SEC / u64::from(rate)).max(1))
    }
}

fn parse_env<T: FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Env { key, value })
}
