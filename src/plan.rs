//! Burst plans and randomized interval sampling.
//!
//! A burst is a fixed-length window holding a handful of clicks. The gaps
//! between clicks are drawn uniformly at random, and whatever part of the
//! window the gaps do not use becomes a pre-delay before the first click,
//! so every burst occupies exactly the same wall-clock span.

use rand::Rng;
use tracing::trace;

use crate::config::Config;
use crate::error::{ClickerError, Result};

/// Tolerance for floating-point interval accounting.
const SUM_EPSILON: f64 = 1e-9;

/// Sample the timing layout of one burst.
///
/// Returns the gaps between consecutive clicks plus the pre-delay that pads
/// the burst out to `total` seconds. Each gap is drawn uniformly from
/// `[gap_min, gap_max]`; draws whose sum exceeds `total` are rejected and
/// redrawn, so every returned layout satisfies `pre_delay >= 0` and
/// `pre_delay + sum(gaps) == total` up to floating-point tolerance.
///
/// Fails with [`ClickerError::InfeasibleIntervals`] when even all-minimum
/// gaps overflow `total`, instead of rejecting draws forever.
pub fn sample_intervals(
    rng: &mut impl Rng,
    n_clicks: u32,
    gap_min: f64,
    gap_max: f64,
    total: f64,
) -> Result<(Vec<f64>, f64)> {
    let n_gaps = n_clicks.saturating_sub(1) as usize;
    let floor = gap_min * n_gaps as f64;

    if floor > total {
        return Err(ClickerError::infeasible_intervals(n_clicks, gap_min, total));
    }
    if (total - floor).abs() <= SUM_EPSILON {
        // The only admissible layout here is all-minimum gaps; a random
        // draw would land on it with probability zero.
        return Ok((vec![gap_min; n_gaps], 0.0));
    }

    loop {
        let gaps: Vec<f64> = (0..n_gaps)
            .map(|_| rng.gen_range(gap_min..=gap_max))
            .collect();
        let sum: f64 = gaps.iter().sum();
        if sum <= total {
            return Ok((gaps, total - sum));
        }
        trace!(sum, total, "rejected interval draw");
    }
}

/// The timing layout of a single burst of clicks.
#[derive(Debug, Clone)]
pub struct BurstPlan {
    /// Number of clicks in this burst.
    pub clicks: u32,
    /// Delay before the first click, in seconds.
    pub pre_delay: f64,
    /// Gaps between consecutive clicks, in seconds; `clicks - 1` entries.
    pub gaps: Vec<f64>,
}

impl BurstPlan {
    /// Sample a fresh plan from the configured bounds.
    pub fn sample(rng: &mut impl Rng, config: &Config) -> Result<Self> {
        let clicks = rng.gen_range(config.clicks_min..=config.clicks_max);
        let (gaps, pre_delay) = sample_intervals(
            rng,
            clicks,
            config.gap_min,
            config.gap_max,
            config.burst_duration,
        )?;

        Ok(Self {
            clicks,
            pre_delay,
            gaps,
        })
    }

    /// Total wall-clock span of the burst, in seconds.
    pub fn duration(&self) -> f64 {
        self.pre_delay + self.gaps.iter().sum::<f64>()
    }

    /// One-line human summary for run logs.
    pub fn describe(&self) -> String {
        let gaps: Vec<String> = self.gaps.iter().map(|g| format!("{g:.2}")).collect();
        format!(
            "{} clicks, {:.2}s pre-delay, gaps [{}]s",
            self.clicks,
            self.pre_delay,
            gaps.join(", ")
        )
    }
}
