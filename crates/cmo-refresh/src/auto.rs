//! Periodic auto-refresh task.
//!
//! The dashboard refreshes on a fixed interval in addition to the manual
//! trigger. Both paths call [`RefreshCoordinator::refresh`] and share its
//! re-entrancy guard, so a tick that lands while a manual refresh is
//! still running is suppressed, not queued.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::coordinator::RefreshCoordinator;
use crate::types::RefreshOutcome;

/// Spawn the periodic refresh task.
///
/// Ticks every `interval` until `shutdown` carries `true` (or its sender
/// is dropped). The first refresh fires one full interval after spawn;
/// the initial load is the caller's responsibility.
pub fn spawn_auto_refresh(
    coordinator: Arc<RefreshCoordinator>,
    interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // interval() completes immediately on the first tick; consume it
        // so ticking starts one interval from now.
        ticker.tick().await;

        info!(event = "refresh.auto_started", interval_secs = interval.as_secs());

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let RefreshOutcome::AlreadyRunning = coordinator.refresh().await {
                        debug!(event = "refresh.auto_tick_suppressed");
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        info!(event = "refresh.auto_stopped");
                        break;
                    }
                }
            }
        }
    })
}
