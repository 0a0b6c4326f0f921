//! Temporal contract tests for the refresh coordinator.
//!
//! All tests run under tokio's paused clock, so sleeps auto-advance and
//! the timing assertions are deterministic.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;
use tokio::time::{Instant, sleep};

use cmo_core::alerts::types::{Alerta, Severidad, TipoAlarma};
use cmo_core::precintos::types::{EstadoEslinga, PrecintoActivo};
use cmo_core::state::dispatch::CoreStore;
use cmo_refresh::{
    RefreshCoordinator, RefreshDomain, RefreshOutcome, SourceError, SourceFn, spawn_auto_refresh,
};

/// A counting source that sleeps for `delay_ms` and then succeeds.
fn slow_source(calls: Arc<AtomicUsize>, delay_ms: u64) -> SourceFn {
    Arc::new(move || {
        let calls = calls.clone();
        Box::pin(async move {
            calls.fetch_add(1, Ordering::SeqCst);
            sleep(Duration::from_millis(delay_ms)).await;
            Ok(())
        })
    })
}

#[tokio::test(start_paused = true)]
async fn refresh_in_flight_suppresses_reentry() {
    let calls = Arc::new(AtomicUsize::new(0));
    let coordinator = Arc::new(
        RefreshCoordinator::new()
            .with_minimum_delay(Duration::ZERO)
            .with_maybe_source(RefreshDomain::Alertas, Some(slow_source(calls.clone(), 100))),
    );

    let first = tokio::spawn({
        let coordinator = coordinator.clone();
        async move { coordinator.refresh().await }
    });
    // Let the first cycle start and take the in-flight flag.
    tokio::task::yield_now().await;

    let second = coordinator.refresh().await;
    assert!(second.is_already_running());
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    let first = first.await.unwrap();
    assert!(first.is_completed());
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    // Once the first cycle finished, a new one may run.
    let third = coordinator.refresh().await;
    assert!(third.is_completed());
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn fast_sources_wait_out_the_minimum_delay() {
    // Sources of 10/50/20 ms with a 400 ms floor complete at 400 ms,
    // not 50 ms.
    let calls = Arc::new(AtomicUsize::new(0));
    let success_at = Arc::new(Mutex::new(None::<Instant>));
    let success_at_probe = success_at.clone();

    let coordinator = RefreshCoordinator::new()
        .with_minimum_delay(Duration::from_millis(400))
        .with_maybe_source(RefreshDomain::Alertas, Some(slow_source(calls.clone(), 10)))
        .with_maybe_source(RefreshDomain::Transitos, Some(slow_source(calls.clone(), 50)))
        .with_maybe_source(RefreshDomain::Precintos, Some(slow_source(calls.clone(), 20)))
        .with_on_success(move || {
            *success_at_probe.lock().unwrap() = Some(Instant::now());
        });

    let started = Instant::now();
    let outcome = coordinator.refresh().await;
    let elapsed = started.elapsed();

    assert!(outcome.is_completed());
    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert!(elapsed >= Duration::from_millis(400), "elapsed {elapsed:?}");
    assert!(elapsed < Duration::from_millis(450), "elapsed {elapsed:?}");

    let fired_at = success_at.lock().unwrap().expect("on_success fired");
    assert!(fired_at - started >= Duration::from_millis(400));
}

#[tokio::test(start_paused = true)]
async fn slow_sources_pay_no_floor_penalty() {
    let calls = Arc::new(AtomicUsize::new(0));
    let coordinator = RefreshCoordinator::new()
        .with_minimum_delay(Duration::from_millis(400))
        .with_maybe_source(RefreshDomain::Alertas, Some(slow_source(calls.clone(), 500)));

    let started = Instant::now();
    let outcome = coordinator.refresh().await;
    let elapsed = started.elapsed();

    assert!(outcome.is_completed());
    assert!(elapsed >= Duration::from_millis(500), "elapsed {elapsed:?}");
    assert!(elapsed < Duration::from_millis(550), "elapsed {elapsed:?}");
}

#[tokio::test(start_paused = true)]
async fn unregistered_sources_are_skipped() {
    let calls = Arc::new(AtomicUsize::new(0));
    let coordinator = RefreshCoordinator::new()
        .with_minimum_delay(Duration::ZERO)
        .with_maybe_source(RefreshDomain::Alertas, Some(slow_source(calls.clone(), 10)))
        .with_maybe_source(RefreshDomain::Transitos, None)
        .with_maybe_source(RefreshDomain::Precintos, Some(slow_source(calls.clone(), 10)))
        .with_maybe_source(RefreshDomain::Estado, None);

    assert_eq!(coordinator.source_count(), 2);
    let outcome = coordinator.refresh().await;
    assert!(outcome.is_completed());
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn failing_source_calls_on_error_exactly_once() {
    let success_calls = Arc::new(AtomicUsize::new(0));
    let error_calls = Arc::new(AtomicUsize::new(0));
    let sibling_finished = Arc::new(AtomicBool::new(false));

    let success_probe = success_calls.clone();
    let error_probe = error_calls.clone();
    let sibling_probe = sibling_finished.clone();

    let coordinator = RefreshCoordinator::new()
        .with_minimum_delay(Duration::ZERO)
        .with_source(RefreshDomain::Alertas, || async {
            sleep(Duration::from_millis(10)).await;
            Err::<(), SourceError>("backend devolvio 500".into())
        })
        .with_source(RefreshDomain::Precintos, move || {
            let sibling = sibling_probe.clone();
            async move {
                // Outlives the failing source: must still run to completion.
                sleep(Duration::from_millis(50)).await;
                sibling.store(true, Ordering::SeqCst);
                Ok(())
            }
        })
        .with_on_success(move || {
            success_probe.fetch_add(1, Ordering::SeqCst);
        })
        .with_on_error(move |_| {
            error_probe.fetch_add(1, Ordering::SeqCst);
        });

    let outcome = coordinator.refresh().await;

    let RefreshOutcome::Failed(error) = outcome else {
        panic!("expected Failed, got {outcome:?}");
    };
    assert_eq!(error_calls.load(Ordering::SeqCst), 1);
    assert_eq!(success_calls.load(Ordering::SeqCst), 0);
    // One failure does not cancel the sibling fetch.
    assert!(sibling_finished.load(Ordering::SeqCst));
    assert_eq!(error.domains(), vec![RefreshDomain::Alertas]);
    assert_eq!(error.succeeded(), 1);
    assert!(error.failed[0].message.contains("500"));
}

#[tokio::test(start_paused = true)]
async fn failed_refresh_does_not_wedge_the_flag() {
    let calls = Arc::new(AtomicUsize::new(0));
    let calls_probe = calls.clone();
    let coordinator = RefreshCoordinator::new()
        .with_minimum_delay(Duration::ZERO)
        .with_source(RefreshDomain::Alertas, move || {
            let calls = calls_probe.clone();
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err::<(), SourceError>("fallo transitorio".into())
            }
        });

    assert!(matches!(
        coordinator.refresh().await,
        RefreshOutcome::Failed(_)
    ));
    // The in-flight flag was cleared; a second attempt runs the source again.
    assert!(matches!(
        coordinator.refresh().await,
        RefreshOutcome::Failed(_)
    ));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn empty_coordinator_still_honors_the_floor() {
    let coordinator =
        RefreshCoordinator::new().with_minimum_delay(Duration::from_millis(400));
    let started = Instant::now();
    let outcome = coordinator.refresh().await;
    assert!(outcome.is_completed());
    assert!(started.elapsed() >= Duration::from_millis(400));
}

#[tokio::test(start_paused = true)]
async fn auto_refresh_ticks_until_shutdown() {
    let calls = Arc::new(AtomicUsize::new(0));
    let coordinator = Arc::new(
        RefreshCoordinator::new()
            .with_minimum_delay(Duration::ZERO)
            .with_maybe_source(RefreshDomain::Alertas, Some(slow_source(calls.clone(), 10))),
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let handle = spawn_auto_refresh(coordinator, Duration::from_secs(60), shutdown_rx);

    // Ticks land at 60, 120 and 180 seconds.
    sleep(Duration::from_secs(190)).await;
    assert_eq!(calls.load(Ordering::SeqCst), 3);

    shutdown_tx.send(true).unwrap();
    handle.await.unwrap();

    // No further ticks after shutdown.
    sleep(Duration::from_secs(120)).await;
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test(start_paused = true)]
async fn refresh_applies_snapshots_to_the_store() {
    let store = Arc::new(Mutex::new(CoreStore::new()));

    let alertas_store = store.clone();
    let precintos_store = store.clone();
    let coordinator = RefreshCoordinator::new()
        .with_minimum_delay(Duration::ZERO)
        .with_source(RefreshDomain::Alertas, move || {
            let store = alertas_store.clone();
            async move {
                // Simulated backend fetch for the alerts domain.
                let snapshot = vec![Alerta {
                    id: "a-1".to_string(),
                    tipo: TipoAlarma::SNA,
                    codigo_precinto: "BT-1042".to_string(),
                    severidad: Severidad::Critica,
                    timestamp: Utc::now(),
                    ubicacion: None,
                    atendida: false,
                }];
                store.lock().unwrap().apply_alertas(snapshot);
                Ok(())
            }
        })
        .with_source(RefreshDomain::Precintos, move || {
            let store = precintos_store.clone();
            async move {
                let snapshot = vec![PrecintoActivo {
                    codigo: "BT-1042".to_string(),
                    bateria_pct: 64,
                    gps_activo: true,
                    eslinga: EstadoEslinga::Cerrada,
                    ultimo_reporte: Utc::now(),
                    ubicacion: None,
                }];
                store.lock().unwrap().apply_precintos(snapshot);
                Ok(())
            }
        });

    let outcome = coordinator.refresh().await;
    assert!(outcome.is_completed());

    let store = store.lock().unwrap();
    assert_eq!(store.alertas().len(), 1);
    assert_eq!(store.precintos().len(), 1);
    assert_eq!(
        store.precintos().get("BT-1042").unwrap().eslinga,
        EstadoEslinga::Cerrada
    );
}
