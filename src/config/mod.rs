#[cfg(feature = "cli")]
pub mod args;
pub mod cli;
pub mod toml_config;

use crate::core::generator::Canvas;
use crate::core::transition::DEFAULT_TRANSITION_DELAY;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_finite, validate_range};
use std::time::Duration;

/// Longest accepted transition delay, one day.
pub const MAX_DELAY_SECONDS: f64 = 86_400.0;

/// Checks the options every provider shares: canvas geometry and delay.
pub fn validate_provider(config: &impl ConfigProvider, delay_seconds: f64) -> Result<()> {
    Canvas::from_config(config)?;
    validate_finite("transition.delay_seconds", delay_seconds)?;
    validate_range("transition.delay_seconds", delay_seconds, 0.0, MAX_DELAY_SECONDS)?;
    Ok(())
}

pub(crate) fn delay_from_seconds(seconds: Option<f64>) -> Duration {
    seconds
        .and_then(|s| Duration::try_from_secs_f64(s).ok())
        .unwrap_or(DEFAULT_TRANSITION_DELAY)
}

#[cfg(feature = "cli")]
pub use args::{resolve, CliConfig, LogFormat};
