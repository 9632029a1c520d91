//! Runtime configuration for the burst scheduler.

use crate::error::{ClickerError, Result};

/// Default lower bound for clicks per burst.
pub const DEFAULT_CLICKS_MIN: u32 = 4;
/// Default upper bound for clicks per burst.
pub const DEFAULT_CLICKS_MAX: u32 = 5;
/// Default minimum gap between clicks, in seconds.
pub const DEFAULT_GAP_MIN: f64 = 0.2;
/// Default maximum gap between clicks, in seconds.
pub const DEFAULT_GAP_MAX: f64 = 1.0;
/// Default duration every burst is padded to, in seconds.
pub const DEFAULT_BURST_DURATION: f64 = 3.0;
/// Default minimum cooldown between bursts, in seconds.
pub const DEFAULT_COOLDOWN_MIN: f64 = 1.0;
/// Default maximum cooldown between bursts, in seconds.
pub const DEFAULT_COOLDOWN_MAX: f64 = 5.0;

/// Validated knobs controlling burst shape and pacing.
#[derive(Debug, Clone)]
pub struct Config {
    /// Minimum clicks per burst, inclusive.
    pub clicks_min: u32,
    /// Maximum clicks per burst, inclusive.
    pub clicks_max: u32,
    /// Minimum gap between consecutive clicks, in seconds.
    pub gap_min: f64,
    /// Maximum gap between consecutive clicks, in seconds.
    pub gap_max: f64,
    /// Total duration of one burst (pre-delay plus all gaps), in seconds.
    pub burst_duration: f64,
    /// Minimum cooldown between bursts, in seconds.
    pub cooldown_min: f64,
    /// Maximum cooldown between bursts, in seconds.
    pub cooldown_max: f64,
    /// Number of bursts to run; 0 means run until cancelled.
    pub repeats: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            clicks_min: DEFAULT_CLICKS_MIN,
            clicks_max: DEFAULT_CLICKS_MAX,
            gap_min: DEFAULT_GAP_MIN,
            gap_max: DEFAULT_GAP_MAX,
            burst_duration: DEFAULT_BURST_DURATION,
            cooldown_min: DEFAULT_COOLDOWN_MIN,
            cooldown_max: DEFAULT_COOLDOWN_MAX,
            repeats: 0,
        }
    }
}

impl Config {
    /// Check that every knob is usable before a run starts.
    ///
    /// Bounds must be ordered and durations finite. The gap bounds must
    /// also be able to fill the burst duration at the maximum click count.
    pub fn validate(&self) -> Result<()> {
        if self.clicks_min < 2 {
            return Err(ClickerError::config_validation(
                "clicks_min must be at least 2",
            ));
        }
        if self.clicks_max < self.clicks_min {
            return Err(ClickerError::config_validation(
                "clicks_max must not be below clicks_min",
            ));
        }
        if !self.gap_min.is_finite() || self.gap_min <= 0.0 {
            return Err(ClickerError::config_validation(
                "gap_min must be a positive number of seconds",
            ));
        }
        if !self.gap_max.is_finite() || self.gap_max < self.gap_min {
            return Err(ClickerError::config_validation(
                "gap_max must not be below gap_min",
            ));
        }
        if !self.burst_duration.is_finite() || self.burst_duration <= 0.0 {
            return Err(ClickerError::config_validation(
                "burst_duration must be a positive number of seconds",
            ));
        }
        if !self.cooldown_min.is_finite() || self.cooldown_min < 0.0 {
            return Err(ClickerError::config_validation(
                "cooldown_min must not be negative",
            ));
        }
        if !self.cooldown_max.is_finite() || self.cooldown_max < self.cooldown_min {
            return Err(ClickerError::config_validation(
                "cooldown_max must not be below cooldown_min",
            ));
        }

        // Even the largest burst must admit at least one interval layout.
        let floor = self.gap_min * (self.clicks_max - 1) as f64;
        if floor > self.burst_duration {
            return Err(ClickerError::infeasible_intervals(
                self.clicks_max,
                self.gap_min,
                self.burst_duration,
            ));
        }

        Ok(())
    }
}
