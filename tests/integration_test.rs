use anyhow::Result;
use burst_clicker::{Cliclick, ClickerError, Config, Point, Region};

#[cfg(unix)]
use burst_clicker::{BurstScheduler, PointerDriver, RunOutcome, StopToken};
#[cfg(unix)]
use std::fs;
#[cfg(unix)]
use std::path::{Path, PathBuf};
#[cfg(unix)]
use tempfile::TempDir;

/// Write a fake `cliclick` shell script into `dir` and make it executable.
#[cfg(unix)]
fn write_tool(dir: &TempDir, body: &str) -> Result<PathBuf> {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.path().join("cliclick");
    fs::write(&path, format!("#!/bin/sh\n{body}\n"))?;

    let mut perms = fs::metadata(&path)?.permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms)?;

    Ok(path)
}

/// A fake tool that answers position queries with `position` and appends
/// every other argument to `log`.
#[cfg(unix)]
fn scripted_tool(dir: &TempDir, position: &str, log: &Path) -> Result<PathBuf> {
    write_tool(
        dir,
        &format!(
            r#"case "$1" in
  p) echo "{position}" ;;
  *) printf '%s\n' "$1" >> "{log}" ;;
esac"#,
            log = log.display()
        ),
    )
}

// Cliclick adapter tests

#[cfg(unix)]
#[tokio::test]
async fn test_position_query_parses_tool_output() -> Result<()> {
    let dir = TempDir::new()?;
    let tool = write_tool(&dir, r#"echo "640,480""#)?;

    let driver = Cliclick::at_path(tool)?;
    assert_eq!(driver.position().await?, Point::new(640, 480));

    Ok(())
}

#[cfg(unix)]
#[tokio::test]
async fn test_click_uses_coordinate_subcommand() -> Result<()> {
    let dir = TempDir::new()?;
    let log = dir.path().join("calls.log");
    let tool = scripted_tool(&dir, "640,480", &log)?;

    let driver = Cliclick::at_path(tool)?;
    driver.click_at(Point::new(123, 456)).await?;
    driver.click_at(Point::new(-10, 45)).await?;

    let calls = fs::read_to_string(&log)?;
    assert_eq!(calls, "c:123,456\nc:-10,45\n");

    Ok(())
}

#[cfg(unix)]
#[tokio::test]
async fn test_malformed_position_output_is_an_error() -> Result<()> {
    let dir = TempDir::new()?;
    let tool = write_tool(&dir, r#"echo "not a point""#)?;

    let driver = Cliclick::at_path(tool)?;
    let err = driver.position().await.unwrap_err();
    assert!(matches!(err, ClickerError::PointerRead { .. }));

    Ok(())
}

#[cfg(unix)]
#[tokio::test]
async fn test_nonzero_tool_exit_fails_the_click() -> Result<()> {
    let dir = TempDir::new()?;
    let tool = write_tool(&dir, "exit 3")?;

    let driver = Cliclick::at_path(tool)?;
    let err = driver.click_at(Point::new(10, 20)).await.unwrap_err();
    assert!(matches!(err, ClickerError::ClickFailed { x: 10, y: 20, .. }));

    Ok(())
}

#[test]
fn test_missing_tool_is_reported() {
    let err = Cliclick::at_path("/nonexistent/path/to/cliclick").unwrap_err();
    assert!(matches!(err, ClickerError::ToolNotFound { .. }));
}

#[cfg(unix)]
#[test]
fn test_tool_without_exec_bit_is_reported() -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new()?;
    let path = dir.path().join("cliclick");
    fs::write(&path, "#!/bin/sh\nexit 0\n")?;
    fs::set_permissions(&path, fs::Permissions::from_mode(0o644))?;

    let err = Cliclick::at_path(&path).unwrap_err();
    assert!(matches!(err, ClickerError::ToolNotFound { .. }), "{err}");

    Ok(())
}

// End-to-end runs against the scripted tool

#[cfg(unix)]
fn quick_config(repeats: u64) -> Config {
    Config {
        clicks_min: 2,
        clicks_max: 3,
        gap_min: 0.05,
        gap_max: 0.1,
        burst_duration: 0.4,
        cooldown_min: 0.05,
        cooldown_max: 0.05,
        repeats,
    }
}

#[cfg(unix)]
#[tokio::test]
async fn test_full_run_keeps_clicks_inside_the_region() -> Result<()> {
    let dir = TempDir::new()?;
    let log = dir.path().join("clicks.log");
    let tool = scripted_tool(&dir, "640,480", &log)?;

    let region = Region::from_corners(Point::new(600, 400), Point::new(700, 500));
    let config = quick_config(2);
    config.validate()?;

    let driver = Cliclick::at_path(tool)?;
    let mut scheduler = BurstScheduler::new(driver, region, config, StopToken::new());
    let summary = scheduler.run().await?;

    assert_eq!(summary.outcome, RunOutcome::Completed);
    assert_eq!(summary.bursts_completed, 2);

    let calls = fs::read_to_string(&log)?;
    let clicks: Vec<&str> = calls.lines().collect();
    assert!(
        (4..=6).contains(&clicks.len()),
        "expected 2 bursts of 2-3 clicks, got {clicks:?}"
    );
    for line in clicks {
        let coords = line.strip_prefix("c:").expect("click subcommand");
        let (x, y) = coords.split_once(',').expect("x,y coordinates");
        let p = Point::new(x.parse()?, y.parse()?);
        assert!(region.contains(p), "{p} outside the region");
    }

    Ok(())
}

#[cfg(unix)]
#[tokio::test]
async fn test_panic_corner_position_cancels_without_clicking() -> Result<()> {
    let dir = TempDir::new()?;
    let log = dir.path().join("clicks.log");
    // Every position poll reports the pointer parked in the corner.
    let tool = scripted_tool(&dir, "1,1", &log)?;

    let region = Region::from_corners(Point::new(600, 400), Point::new(700, 500));
    let driver = Cliclick::at_path(tool)?;
    let mut scheduler = BurstScheduler::new(driver, region, quick_config(1), StopToken::new());
    let summary = scheduler.run().await?;

    assert_eq!(summary.outcome, RunOutcome::Cancelled);
    assert_eq!(summary.bursts_completed, 0);
    assert!(!log.exists(), "no click may be dispatched");

    Ok(())
}

// Config and region validation

#[test]
fn test_config_validation_rejects_bad_bounds() {
    assert!(Config::default().validate().is_ok());

    let config = Config {
        clicks_min: 5,
        clicks_max: 4,
        ..Config::default()
    };
    assert!(config.validate().is_err());

    let config = Config {
        gap_min: 0.9,
        gap_max: 0.3,
        ..Config::default()
    };
    assert!(config.validate().is_err());

    // Four gaps of at least 1s cannot fit into a 3s burst.
    let config = Config {
        gap_min: 1.0,
        gap_max: 2.0,
        ..Config::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ClickerError::InfeasibleIntervals { .. })
    ));
}

#[test]
fn test_region_specs_parse_and_normalize() -> Result<()> {
    let region = Region::from_corner_spec("600,400,700,500")?;
    let swapped = Region::from_corner_spec("700,500,600,400")?;

    assert_eq!(region, swapped);
    assert!(region.contains(Point::new(640, 480)));
    assert!(!region.contains(Point::new(599, 480)));

    assert!(Region::from_corner_spec("600,400,700").is_err());
    assert!(Region::from_corner_spec("a,b,c,d").is_err());

    Ok(())
}

// Error type tests

#[test]
fn test_error_messages_name_the_failure() {
    let err = ClickerError::tool_not_found("cliclick", "not on PATH");
    assert!(err.to_string().contains("cliclick"));

    let err = ClickerError::click_failed(120, 45, "timed out");
    assert!(err.to_string().contains("120"));
    assert!(err.to_string().contains("45"));

    let err = ClickerError::infeasible_intervals(5, 1.0, 3.0);
    assert!(err.to_string().contains("5 clicks"));
}
