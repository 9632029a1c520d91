//! Custom error types for burst-clicker.
//!
//! This module provides structured error types using `thiserror` for better
//! error handling and more informative error messages.

use std::io;
use thiserror::Error;

/// Main error type for burst-clicker operations.
#[derive(Error, Debug)]
pub enum ClickerError {
    /// The external pointer tool could not be located or is not runnable.
    #[error("pointer tool '{tool}' not usable: {reason}")]
    ToolNotFound { tool: String, reason: String },

    /// Reading the current pointer position failed.
    #[error("failed to read pointer position: {reason}")]
    PointerRead { reason: String },

    /// Dispatching a click failed.
    #[error("failed to click at ({x}, {y}): {reason}")]
    ClickFailed { x: i32, y: i32, reason: String },

    /// The interval bounds cannot fill the requested burst duration.
    #[error("cannot fit {clicks} clicks with gaps of at least {gap_min}s into {total}s")]
    InfeasibleIntervals {
        clicks: u32,
        gap_min: f64,
        total: f64,
    },

    /// Configuration validation error.
    #[error("configuration error: {0}")]
    ConfigValidation(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type alias for burst-clicker operations.
pub type Result<T> = std::result::Result<T, ClickerError>;

impl ClickerError {
    /// Create a new ToolNotFound error.
    pub fn tool_not_found(tool: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ToolNotFound {
            tool: tool.into(),
            reason: reason.into(),
        }
    }

    /// Create a new PointerRead error.
    pub fn pointer_read(reason: impl Into<String>) -> Self {
        Self::PointerRead {
            reason: reason.into(),
        }
    }

    /// Create a new ClickFailed error.
    pub fn click_failed(x: i32, y: i32, reason: impl Into<String>) -> Self {
        Self::ClickFailed {
            x,
            y,
            reason: reason.into(),
        }
    }

    /// Create a new InfeasibleIntervals error.
    pub fn infeasible_intervals(clicks: u32, gap_min: f64, total: f64) -> Self {
        Self::InfeasibleIntervals {
            clicks,
            gap_min,
            total,
        }
    }

    /// Create a new ConfigValidation error.
    pub fn config_validation(message: impl Into<String>) -> Self {
        Self::ConfigValidation(message.into())
    }
}
