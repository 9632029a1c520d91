//! Pointer capabilities and the external `cliclick` adapter.
//!
//! The scheduler never talks to the operating system directly. It sees two
//! capabilities, reading the pointer position and dispatching a click, and
//! the default implementation shells out to the `cliclick` command-line
//! tool for both.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

use crate::error::{ClickerError, Result};
use crate::region::Point;

/// Time allowed for a position query before the tool counts as stuck.
const POSITION_TIMEOUT: Duration = Duration::from_secs(1);
/// Time allowed for a click dispatch.
const CLICK_TIMEOUT: Duration = Duration::from_secs(5);

/// Locations checked when `cliclick` is not on `$PATH`.
const FALLBACK_PATHS: &[&str] = &["/opt/homebrew/bin/cliclick", "/usr/local/bin/cliclick"];

/// The two pointer capabilities the scheduler needs.
pub trait PointerDriver: Send + Sync {
    /// Current pointer position in screen coordinates.
    fn position(&self) -> impl Future<Output = Result<Point>> + Send;

    /// Synthesize a click at `p`.
    fn click_at(&self, p: Point) -> impl Future<Output = Result<()>> + Send;
}

/// Adapter over the `cliclick` command-line tool.
///
/// Every call spawns a short-lived `cliclick` process and enforces a
/// timeout, so a hung tool cannot wedge the scheduler; abandoned children
/// are killed rather than left running.
#[derive(Debug, Clone)]
pub struct Cliclick {
    path: PathBuf,
}

impl Cliclick {
    /// Find `cliclick` on `$PATH` or in the usual Homebrew locations.
    pub fn locate() -> Result<Self> {
        if let Some(path) = find_in_path("cliclick") {
            return Ok(Self { path });
        }
        for candidate in FALLBACK_PATHS {
            let path = Path::new(candidate);
            if is_executable(path) {
                return Ok(Self {
                    path: path.to_path_buf(),
                });
            }
        }

        Err(ClickerError::tool_not_found(
            "cliclick",
            "not on PATH and not in a Homebrew prefix",
        ))
    }

    /// Use an explicit tool path instead of searching for one.
    pub fn at_path(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if is_executable(&path) {
            Ok(Self { path })
        } else {
            Err(ClickerError::tool_not_found(
                path.display().to_string(),
                "not an executable file",
            ))
        }
    }

    /// The resolved tool path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn query_position(&self) -> Result<Point> {
        let output = timeout(
            POSITION_TIMEOUT,
            Command::new(&self.path).arg("p").kill_on_drop(true).output(),
        )
        .await
        .map_err(|_| ClickerError::pointer_read("position query timed out"))?
        .map_err(|e| ClickerError::pointer_read(e.to_string()))?;

        if !output.status.success() {
            return Err(ClickerError::pointer_read(exit_reason(
                output.status,
                &output.stderr,
            )));
        }

        parse_position(&String::from_utf8_lossy(&output.stdout))
    }

    async fn dispatch_click(&self, p: Point) -> Result<()> {
        let arg = format!("c:{},{}", p.x, p.y);
        let output = timeout(
            CLICK_TIMEOUT,
            Command::new(&self.path)
                .arg(&arg)
                .kill_on_drop(true)
                .output(),
        )
        .await
        .map_err(|_| ClickerError::click_failed(p.x, p.y, "click dispatch timed out"))?
        .map_err(|e| ClickerError::click_failed(p.x, p.y, e.to_string()))?;

        if output.status.success() {
            debug!(x = p.x, y = p.y, "click dispatched");
            Ok(())
        } else {
            Err(ClickerError::click_failed(
                p.x,
                p.y,
                exit_reason(output.status, &output.stderr),
            ))
        }
    }
}

impl PointerDriver for Cliclick {
    async fn position(&self) -> Result<Point> {
        self.query_position().await
    }

    async fn click_at(&self, p: Point) -> Result<()> {
        self.dispatch_click(p).await
    }
}

/// Parse the `x,y` line that `cliclick p` prints.
///
/// The tool emits exactly two comma-separated integers; any extra fields
/// mean we are not looking at a position line and the read fails.
fn parse_position(raw: &str) -> Result<Point> {
    let line = raw.trim();
    let parts: Vec<&str> = line.split(',').collect();
    if parts.len() != 2 {
        return Err(ClickerError::pointer_read(format!(
            "expected 'x,y' output, got '{line}'"
        )));
    }

    let x = parts[0].trim().parse::<i32>().map_err(|_| {
        ClickerError::pointer_read(format!("invalid x coordinate '{}'", parts[0].trim()))
    })?;
    let y = parts[1].trim().parse::<i32>().map_err(|_| {
        ClickerError::pointer_read(format!("invalid y coordinate '{}'", parts[1].trim()))
    })?;

    Ok(Point::new(x, y))
}

fn exit_reason(status: std::process::ExitStatus, stderr: &[u8]) -> String {
    let stderr = String::from_utf8_lossy(stderr);
    let stderr = stderr.trim();
    if stderr.is_empty() {
        format!("tool exited with {status}")
    } else {
        format!("tool exited with {status}: {stderr}")
    }
}

fn find_in_path(name: &str) -> Option<PathBuf> {
    let path_var = std::env::var_os("PATH")?;
    std::env::split_paths(&path_var)
        .map(|dir| dir.join(name))
        .find(|candidate| is_executable(candidate))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
