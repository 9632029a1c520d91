//! Burst execution and the top-level run loop.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::Result;
use crate::plan::BurstPlan;
use crate::pointer::PointerDriver;
use crate::region::Region;
use crate::stop::{in_panic_corner, StopToken};

/// Granularity of cancellation checks during waits, in seconds.
const CHECK_TICK: f64 = 0.1;

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The configured number of bursts ran to completion.
    Completed,
    /// The stop token tripped, via Ctrl+C or the panic corner.
    Cancelled,
}

/// Terminal state of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Bursts that ran through their final click.
    pub bursts_completed: u64,
    pub outcome: RunOutcome,
}

/// Fires bursts of randomized clicks until the repeat budget is spent or
/// the stop token trips.
pub struct BurstScheduler<D: PointerDriver> {
    driver: D,
    region: Region,
    config: Config,
    token: StopToken,
    rng: StdRng,
}

impl<D: PointerDriver> BurstScheduler<D> {
    pub fn new(driver: D, region: Region, config: Config, token: StopToken) -> Self {
        Self {
            driver,
            region,
            config,
            token,
            rng: StdRng::from_entropy(),
        }
    }

    /// Run bursts until the repeat budget is spent or cancellation wins.
    ///
    /// Cancellation is a normal outcome, not an error; the `Err` path is
    /// reserved for the click capability failing underneath us.
    pub async fn run(&mut self) -> Result<RunSummary> {
        let mut bursts_completed: u64 = 0;

        let outcome = loop {
            if self.token.is_stopped() {
                break RunOutcome::Cancelled;
            }

            let plan = BurstPlan::sample(&mut self.rng, &self.config)?;
            info!(burst = bursts_completed + 1, "starting burst: {}", plan.describe());

            if !self.run_burst(&plan).await? {
                break RunOutcome::Cancelled;
            }
            bursts_completed += 1;
            debug!(bursts_completed, "burst finished");

            if self.config.repeats != 0 && bursts_completed >= self.config.repeats {
                break RunOutcome::Completed;
            }

            let cooldown = self
                .rng
                .gen_range(self.config.cooldown_min..=self.config.cooldown_max);
            debug!(cooldown, "cooling down");
            self.pause_with_checks(cooldown).await;
        };

        info!(
            bursts = bursts_completed,
            cancelled = (outcome == RunOutcome::Cancelled),
            "run finished"
        );
        Ok(RunSummary {
            bursts_completed,
            outcome,
        })
    }

    /// Execute one burst. Returns false when cancellation cut it short.
    async fn run_burst(&mut self, plan: &BurstPlan) -> Result<bool> {
        self.pause_with_checks(plan.pre_delay).await;

        for click_index in 0..plan.clicks {
            if self.token.is_stopped() {
                return Ok(false);
            }
            self.check_panic_corner().await;
            if self.token.is_stopped() {
                return Ok(false);
            }

            let target = self.region.sample_point(&mut self.rng);
            self.driver.click_at(target).await?;
            debug!(click = click_index + 1, of = plan.clicks, %target, "clicked");

            if let Some(gap) = plan.gaps.get(click_index as usize) {
                self.pause_with_checks(*gap).await;
            }
        }

        Ok(true)
    }

    /// Sleep for `secs`, waking every tick to honor the token and watch for
    /// the panic corner. Returns early once the token trips.
    async fn pause_with_checks(&mut self, secs: f64) {
        let mut remaining = secs;
        while remaining > 0.0 {
            if self.token.is_stopped() {
                return;
            }

            let step = remaining.min(CHECK_TICK);
            tokio::time::sleep(Duration::from_secs_f64(step)).await;
            remaining -= step;

            self.check_panic_corner().await;
        }
    }

    /// Poll the pointer and trip the token when it sits in the panic corner.
    ///
    /// Read failures only blind this one check; a transient hiccup must not
    /// abort a long run.
    async fn check_panic_corner(&mut self) {
        match self.driver.position().await {
            Ok(p) if in_panic_corner(p) => {
                warn!(%p, "pointer in the panic corner, stopping");
                self.token.stop();
            }
            Ok(_) => {}
            Err(e) => debug!("pointer poll failed: {e}"),
        }
    }
}
