use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{info, warn};

use crate::region::Point;

/// Pointer positions with both coordinates at or below this value count as
/// the emergency corner.
pub const PANIC_CORNER_EXTENT: i32 = 3;

/// Shared cancellation flag checked between every click and sleep tick.
///
/// Clones are cheap and all observe the same flag. The transition is
/// one-way: once stopped, a token never reads as running again.
#[derive(Debug, Clone, Default)]
pub struct StopToken {
    stopped: Arc<AtomicBool>,
}

impl StopToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Idempotent.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::Relaxed);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Relaxed)
    }
}

/// True when the pointer sits in the emergency corner at the top-left of
/// the primary display. Slamming the mouse there stops the run without
/// touching the keyboard.
pub fn in_panic_corner(p: Point) -> bool {
    p.x <= PANIC_CORNER_EXTENT && p.y <= PANIC_CORNER_EXTENT
}

/// Spawn a background task that trips `token` on every Ctrl+C.
///
/// The task keeps listening after the first signal, so repeated presses are
/// absorbed instead of killing the process mid-click.
pub fn spawn_interrupt_listener(token: StopToken) {
    tokio::spawn(async move {
        loop {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    info!("interrupt received, finishing up");
                    token.stop();
                }
                Err(e) => {
                    warn!("interrupt listener failed: {e}");
                    break;
                }
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_trips_once_and_stays_tripped() {
        let token = StopToken::new();
        assert!(!token.is_stopped());

        token.stop();
        assert!(token.is_stopped());

        // A second stop is harmless and changes nothing.
        token.stop();
        assert!(token.is_stopped());
    }

    #[test]
    fn test_clones_share_the_flag() {
        let token = StopToken::new();
        let clone = token.clone();

        clone.stop();
        assert!(token.is_stopped());
        assert!(clone.is_stopped());
    }

    #[test]
    fn test_panic_corner_boundary() {
        assert!(in_panic_corner(Point::new(0, 0)));
        assert!(in_panic_corner(Point::new(2, 1)));
        assert!(in_panic_corner(Point::new(3, 3)));
        assert!(in_panic_corner(Point::new(-5, 2)));

        assert!(!in_panic_corner(Point::new(4, 4)));
        assert!(!in_panic_corner(Point::new(4, 0)));
        assert!(!in_panic_corner(Point::new(0, 4)));
        assert!(!in_panic_corner(Point::new(640, 480)));
    }
}
