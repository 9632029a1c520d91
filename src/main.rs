use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use burst_clicker::config::{
    DEFAULT_BURST_DURATION, DEFAULT_CLICKS_MAX, DEFAULT_CLICKS_MIN, DEFAULT_COOLDOWN_MAX,
    DEFAULT_COOLDOWN_MIN, DEFAULT_GAP_MAX, DEFAULT_GAP_MIN,
};
use burst_clicker::stop::spawn_interrupt_listener;
use burst_clicker::{
    BurstScheduler, Cliclick, Config, Point, PointerDriver, Region, RunOutcome, StopToken,
};

/// Fire bursts of randomized clicks inside a screen region.
///
/// Needs the `cliclick` tool (brew install cliclick) and, on macOS,
/// Accessibility permission for the terminal running it. Stop a run with
/// Ctrl+C or by slamming the pointer into the top-left screen corner.
#[derive(Parser, Debug)]
#[command(name = "bclick", version, about)]
struct Cli {
    /// Path to the cliclick binary (default: search PATH and Homebrew prefixes)
    #[arg(long, value_name = "PATH")]
    cliclick: Option<PathBuf>,

    /// Click region as X1,Y1,X2,Y2 (default: capture both corners interactively)
    #[arg(long, value_name = "X1,Y1,X2,Y2")]
    region: Option<String>,

    /// Minimum clicks per burst
    #[arg(long, default_value_t = DEFAULT_CLICKS_MIN)]
    clicks_min: u32,

    /// Maximum clicks per burst
    #[arg(long, default_value_t = DEFAULT_CLICKS_MAX)]
    clicks_max: u32,

    /// Minimum seconds between clicks in a burst
    #[arg(long, default_value_t = DEFAULT_GAP_MIN)]
    gap_min: f64,

    /// Maximum seconds between clicks in a burst
    #[arg(long, default_value_t = DEFAULT_GAP_MAX)]
    gap_max: f64,

    /// Seconds every burst is padded to
    #[arg(long, default_value_t = DEFAULT_BURST_DURATION)]
    burst_duration: f64,

    /// Minimum seconds between bursts (prompted for when omitted)
    #[arg(long)]
    cooldown_min: Option<f64>,

    /// Maximum seconds between bursts (prompted for when omitted)
    #[arg(long)]
    cooldown_max: Option<f64>,

    /// Bursts to run before stopping, 0 for unlimited (prompted for when omitted)
    #[arg(long)]
    repeats: Option<u64>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("{} {e:#}", "error:".red().bold());
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let driver = match &cli.cliclick {
        Some(path) => Cliclick::at_path(path.clone()),
        None => Cliclick::locate(),
    }
    .context("cliclick is required (try 'brew install cliclick')")?;
    println!(
        "🖱️  using pointer tool at {}",
        driver.path().display().to_string().cyan()
    );

    // The listener goes up before any prompt so Ctrl+C during setup is
    // already honored.
    let token = StopToken::new();
    spawn_interrupt_listener(token.clone());

    let region = match &cli.region {
        Some(spec) => Region::from_corner_spec(spec)?,
        None => capture_region(&driver).await?,
    };
    println!("📐 clicking inside {}", region.to_string().cyan());

    let cooldown_min = match cli.cooldown_min {
        Some(v) => v,
        None => prompt_number("Minimum seconds between bursts", DEFAULT_COOLDOWN_MIN).await?,
    };
    let cooldown_max = match cli.cooldown_max {
        Some(v) => v,
        None => prompt_number("Maximum seconds between bursts", DEFAULT_COOLDOWN_MAX).await?,
    };
    let repeats = match cli.repeats {
        Some(v) => v,
        None => prompt_number("Bursts to run (0 = until stopped)", 0u64).await?,
    };

    if token.is_stopped() {
        println!("{}", "stopped during setup".yellow());
        return Ok(());
    }

    let config = Config {
        clicks_min: cli.clicks_min,
        clicks_max: cli.clicks_max,
        gap_min: cli.gap_min,
        gap_max: cli.gap_max,
        burst_duration: cli.burst_duration,
        cooldown_min,
        cooldown_max,
        repeats,
    };
    config.validate()?;

    println!(
        "▶️  {} bursts of {}-{} clicks over {}s each; Ctrl+C or the top-left corner stops the run",
        if repeats == 0 {
            "unlimited".to_string()
        } else {
            repeats.to_string()
        },
        config.clicks_min,
        config.clicks_max,
        config.burst_duration,
    );

    let mut scheduler = BurstScheduler::new(driver, region, config, token);
    let summary = scheduler.run().await?;

    match summary.outcome {
        RunOutcome::Completed => println!(
            "✅ {} after {} bursts",
            "finished".green().bold(),
            summary.bursts_completed
        ),
        RunOutcome::Cancelled => println!(
            "🛑 {} after {} bursts",
            "stopped".yellow().bold(),
            summary.bursts_completed
        ),
    }

    Ok(())
}

/// Capture the click region from two live pointer positions.
async fn capture_region(driver: &Cliclick) -> Result<Region> {
    println!("{}", "Set the click region:".bold());
    let first = capture_corner(driver, "  move the pointer to the FIRST corner, then press Enter")
        .await?;
    let second = capture_corner(
        driver,
        "  move the pointer to the OPPOSITE corner, then press Enter",
    )
    .await?;

    Ok(Region::from_corners(first, second))
}

async fn capture_corner(driver: &Cliclick, prompt: &str) -> Result<Point> {
    prompt_line(prompt).await?;
    let p = driver.position().await.context(
        "could not read the pointer position (is your terminal allowed to control the \
         computer under System Settings > Privacy & Security > Accessibility?)",
    )?;
    println!("    captured {}", p.to_string().cyan());
    Ok(p)
}

/// Prompt for a number, re-asking on bad input; empty input takes `default`.
async fn prompt_number<T>(label: &str, default: T) -> Result<T>
where
    T: std::str::FromStr + std::fmt::Display + Copy,
{
    loop {
        let line = prompt_line(&format!("{label} [{default}]")).await?;
        if line.is_empty() {
            return Ok(default);
        }
        match line.parse::<T>() {
            Ok(value) => return Ok(value),
            Err(_) => println!("  {} '{line}' is not a valid value", "!".yellow()),
        }
    }
}

/// Print `prompt` and wait for one line of input without blocking the
/// runtime.
async fn prompt_line(prompt: &str) -> Result<String> {
    let prompt = prompt.to_string();
    tokio::task::spawn_blocking(move || -> Result<String> {
        print!("{prompt}: ");
        io::stdout().flush()?;
        let mut line = String::new();
        io::stdin().read_line(&mut line)?;
        Ok(line.trim().to_string())
    })
    .await
    .context("input task failed")?
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
