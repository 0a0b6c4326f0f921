//! The dashboard's refresh coordinator.
//!
//! Runs the registered per-domain refresh callbacks concurrently as one
//! logical cycle, with re-entrancy protection and a perceptual
//! minimum-duration floor. See the crate docs for the contract.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use futures::FutureExt;
use futures::future::join_all;
use tokio::time::{Instant, sleep};
use tracing::{debug, info, warn};

use cmo_core::config::RefreshConfig;
use cmo_core::config::defaults::DEFAULT_MINIMUM_DELAY_MS;

use crate::errors::{RefreshError, SourceFailure};
use crate::types::{RefreshDomain, RefreshOutcome, SourceError, SourceFn};

/// Clears the in-flight flag when the cycle ends, on every exit path.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Coordinates one logical refresh across the dashboard's data domains.
///
/// Sources register in display order; a domain whose module has not
/// exposed a refresh callback yet registers `None` and is skipped.
/// The coordinator is shared between the manual refresh trigger and the
/// interval timer (see [`crate::auto::spawn_auto_refresh`]), so the
/// re-entrancy guard is an atomic flag.
pub struct RefreshCoordinator {
    sources: Vec<(RefreshDomain, Option<SourceFn>)>,
    minimum_delay: Duration,
    on_success: Option<Arc<dyn Fn() + Send + Sync>>,
    on_error: Option<Arc<dyn Fn(&RefreshError) + Send + Sync>>,
    in_flight: AtomicBool,
}

impl RefreshCoordinator {
    /// Create a coordinator with no sources and the default perceptual
    /// floor.
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
            minimum_delay: Duration::from_millis(DEFAULT_MINIMUM_DELAY_MS),
            on_success: None,
            on_error: None,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Override the minimum visible duration of a cycle.
    pub fn with_minimum_delay(mut self, minimum_delay: Duration) -> Self {
        self.minimum_delay = minimum_delay;
        self
    }

    /// Take the perceptual floor from loaded configuration.
    pub fn with_config(self, config: &RefreshConfig) -> Self {
        let minimum_delay = config.minimum_delay();
        self.with_minimum_delay(minimum_delay)
    }

    /// Register a refresh source for a domain.
    pub fn with_source<F, Fut>(mut self, domain: RefreshDomain, source: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), SourceError>> + Send + 'static,
    {
        let source: SourceFn = Arc::new(move || source().boxed());
        self.sources.push((domain, Some(source)));
        self
    }

    /// Register a possibly-absent refresh source. `None` keeps the
    /// domain's slot in the cycle but skips it - the owning module has
    /// not exposed a callback yet.
    pub fn with_maybe_source(mut self, domain: RefreshDomain, source: Option<SourceFn>) -> Self {
        self.sources.push((domain, source));
        self
    }

    /// Callback invoked after a fully successful cycle.
    pub fn with_on_success<F>(mut self, on_success: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_success = Some(Arc::new(on_success));
        self
    }

    /// Callback invoked exactly once when any source of a cycle fails.
    pub fn with_on_error<F>(mut self, on_error: F) -> Self
    where
        F: Fn(&RefreshError) + Send + Sync + 'static,
    {
        self.on_error = Some(Arc::new(on_error));
        self
    }

    /// Number of registered (non-`None`) sources.
    pub fn source_count(&self) -> usize {
        self.sources.iter().filter(|(_, s)| s.is_some()).count()
    }

    /// Run one refresh cycle.
    ///
    /// 1. If a cycle is already in flight, returns
    ///    [`RefreshOutcome::AlreadyRunning`] without invoking anything.
    /// 2. Runs all registered sources concurrently and waits for every
    ///    one to settle - a failing source does not cancel its siblings.
    /// 3. If the cycle finished under the minimum delay, sleeps out the
    ///    remainder before signaling.
    /// 4. Invokes `on_success` or (exactly once) `on_error`, then clears
    ///    the in-flight flag regardless of outcome.
    pub async fn refresh(&self) -> RefreshOutcome {
        if self.in_flight.swap(true, Ordering::SeqCst) {
            debug!(event = "refresh.cycle_suppressed");
            return RefreshOutcome::AlreadyRunning;
        }
        let _guard = InFlightGuard(&self.in_flight);

        let started = Instant::now();
        let active: Vec<(RefreshDomain, SourceFn)> = self
            .sources
            .iter()
            .filter_map(|(domain, source)| source.clone().map(|s| (*domain, s)))
            .collect();
        let total = active.len();
        debug!(event = "refresh.cycle_started", sources = total);

        let settled = join_all(active.into_iter().map(|(domain, source)| {
            let fut = source();
            async move { (domain, fut.await) }
        }))
        .await;

        let failed: Vec<SourceFailure> = settled
            .into_iter()
            .filter_map(|(domain, result)| {
                result.err().map(|e| SourceFailure {
                    domain,
                    message: e.to_string(),
                })
            })
            .collect();

        // Perceptual floor: never signal completion faster than the
        // operator can see the spinner.
        let elapsed = started.elapsed();
        if elapsed < self.minimum_delay {
            sleep(self.minimum_delay - elapsed).await;
        }

        if failed.is_empty() {
            info!(
                event = "refresh.cycle_completed",
                sources = total,
                elapsed_ms = elapsed.as_millis() as u64
            );
            if let Some(on_success) = &self.on_success {
                on_success();
            }
            RefreshOutcome::Completed
        } else {
            let error = RefreshError { failed, total };
            warn!(event = "refresh.cycle_failed", error = %error);
            if let Some(on_error) = &self.on_error {
                on_error(&error);
            }
            RefreshOutcome::Failed(error)
        }
    }
}

impl Default for RefreshCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_count_skips_none() {
        let coordinator = RefreshCoordinator::new()
            .with_source(RefreshDomain::Alertas, || async { Ok::<(), SourceError>(()) })
            .with_maybe_source(RefreshDomain::Transitos, None)
            .with_source(RefreshDomain::Precintos, || async { Ok::<(), SourceError>(()) });
        assert_eq!(coordinator.source_count(), 2);
    }

    #[test]
    fn test_default_floor_matches_config_default() {
        let coordinator = RefreshCoordinator::new();
        assert_eq!(
            coordinator.minimum_delay,
            Duration::from_millis(DEFAULT_MINIMUM_DELAY_MS)
        );
    }

    #[test]
    fn test_with_config_applies_floor() {
        let config = RefreshConfig {
            minimum_delay_ms: Some(250),
            ..Default::default()
        };
        let coordinator = RefreshCoordinator::new().with_config(&config);
        assert_eq!(coordinator.minimum_delay, Duration::from_millis(250));
    }
}
