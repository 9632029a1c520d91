//! # Burst Clicker
//!
//! A command-line tool that fires small bursts of randomized mouse clicks
//! inside a screen region, pacing itself like an impatient human rather
//! than a metronome.
//!
//! ## Features
//!
//! - Randomized click counts and positions, with randomized gaps between
//!   clicks
//! - Every burst padded to a fixed duration so overall pacing stays steady
//! - Randomized cooldown between bursts, with an optional repeat budget
//! - Emergency stop via Ctrl+C or slamming the pointer into the top-left
//!   corner of the screen
//! - Click execution and pointer reads delegated to the external `cliclick`
//!   tool, every call bounded by a timeout
//! - Interactive region capture, or fully flag-driven headless setup
//!
//! ## Example
//!
//! ```no_run
//! use burst_clicker::{BurstScheduler, Cliclick, Config, Point, Region, StopToken};
//!
//! # async fn demo() -> burst_clicker::Result<()> {
//! let driver = Cliclick::locate()?;
//! let region = Region::from_corners(Point::new(100, 100), Point::new(400, 300));
//!
//! let token = StopToken::new();
//! burst_clicker::stop::spawn_interrupt_listener(token.clone());
//!
//! let mut scheduler = BurstScheduler::new(driver, region, Config::default(), token);
//! let summary = scheduler.run().await?;
//! println!("done after {} bursts", summary.bursts_completed);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod plan;
pub mod pointer;
pub mod region;
pub mod scheduler;
pub mod stop;

pub use config::Config;
pub use error::{ClickerError, Result};
pub use plan::BurstPlan;
pub use pointer::{Cliclick, PointerDriver};
pub use region::{Point, Region};
pub use scheduler::{BurstScheduler, RunOutcome, RunSummary};
pub use stop::StopToken;
