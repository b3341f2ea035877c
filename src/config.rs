//! Tunable timings and thresholds for the page controller.
//!
//! Every field has a default, so a page that ships no configuration (or only a
//! partial one) still gets the stock behaviour. Pages may override values with
//! a JSON blob in `<script type="application/json" id="fx-config">`.

use serde::Deserialize;

use crate::error::FxError;

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct FxConfig {
    /// Navigation bar gains the scrolled state strictly above this offset.
    pub nav_threshold_px: f64,
    /// Back-to-top control is shown strictly above this offset.
    pub back_to_top_threshold_px: f64,
    /// Hero visual translation per pixel scrolled.
    pub parallax_rate: f64,
    /// Clearance left above an anchor target for the fixed navigation bar.
    pub anchor_offset_px: f64,
    pub card_stagger_ms: u32,
    pub node_float_stagger_ms: u32,
    pub path_stagger_ms: u32,
    pub hero_stagger_ms: u32,
    pub counter_duration_ms: u32,
    pub counter_steps: u32,
    pub ripple_ms: u32,
    pub theme_pulse_ms: u32,
    pub body_fade_delay_ms: u32,
    pub storage_key: String,
    /// One of `error`, `warn`, `info`, `debug`, `trace`.
    pub log_level: String,
}

impl Default for FxConfig {
    fn default() -> Self {
        Self {
            nav_threshold_px: 50.0,
            back_to_top_threshold_px: 300.0,
            parallax_rate: -0.5,
            anchor_offset_px: 80.0,
            card_stagger_ms: 100,
            node_float_stagger_ms: 1000,
            path_stagger_ms: 500,
            hero_stagger_ms: 200,
            counter_duration_ms: 2000,
            counter_steps: 60,
            ripple_ms: 600,
            theme_pulse_ms: 150,
            body_fade_delay_ms: 100,
            storage_key: "theme".to_owned(),
            log_level: "info".to_owned(),
        }
    }
}

impl FxConfig {
    /// Parse and validate a JSON override. Absent fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`FxError::Config`] for malformed JSON and
    /// [`FxError::InvalidConfig`] for values the controller cannot run with.
    pub fn from_json(raw: &str) -> Result<Self, FxError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), FxError> {
        if self.counter_steps == 0 {
            return Err(FxError::InvalidConfig("counter_steps must be positive".to_owned()));
        }
        if self.storage_key.is_empty() {
            return Err(FxError::InvalidConfig("storage_key must not be empty".to_owned()));
        }
        if self.log_level().is_none() {
            return Err(FxError::InvalidConfig(format!("unknown log_level `{}`", self.log_level)));
        }
        Ok(())
    }

    /// Interval between counter steps. The fixed step count wins over wall
    /// time, so a delayed timer stretches the whole animation.
    #[must_use]
    pub fn counter_step_ms(&self) -> u32 {
        self.counter_duration_ms / self.counter_steps.max(1)
    }

    #[must_use]
    pub fn log_level(&self) -> Option<log::Level> {
        match self.log_level.to_ascii_lowercase().as_str() {
            "error" => Some(log::Level::Error),
            "warn" => Some(log::Level::Warn),
            "info" => Some(log::Level::Info),
            "debug" => Some(log::Level::Debug),
            "trace" => Some(log::Level::Trace),
            _ => None,
        }
    }
}
