mod common;

use common::{FakeSurface, default_harness, drain_event_names, drain_events, harness};
use googletest::prelude::*;
use std::time::Duration;
use wg_config::MonitoringConfig;
use wg_core::{EvalError, StartMonitoringOptions};

fn without_initial_check() -> StartMonitoringOptions {
    StartMonitoringOptions {
        run_initial_check: Some(false),
        ..Default::default()
    }
}

#[tokio::test(start_paused = true)]
async fn given_start_when_get_state_then_monitoring_is_true() {
    // Given
    let h = default_harness().await;

    // When
    let started = h
        .guardian
        .start_monitoring(without_initial_check())
        .await
        .unwrap();
    let state = h.guardian.get_state().await.unwrap();

    // Then
    assert_that!(started.monitoring, eq(true));
    assert_that!(started.reason.as_str(), eq("start"));
    assert_that!(state.monitoring, eq(true));
}

#[tokio::test(start_paused = true)]
async fn given_start_with_initial_check_then_probe_runs_after_debounce() {
    // Given
    let mut h = default_harness().await;

    // When
    h.guardian
        .start_monitoring(StartMonitoringOptions::default())
        .await
        .unwrap();

    // Then
    assert_that!(h.surface.evaluations(), eq(0));
    tokio::time::sleep(Duration::from_millis(601)).await;
    assert_that!(h.surface.evaluations(), eq(1));

    let events = drain_events(&mut h.events);
    assert_that!(events.len(), eq(1));
    assert_that!(events[0].name(), eq("webviewHealthy"));
    assert_that!(events[0].state.reason.as_str(), eq("start"));
}

#[tokio::test(start_paused = true)]
async fn given_config_disables_initial_check_when_started_then_no_probe() {
    // Given
    let config = MonitoringConfig {
        run_initial_check: false,
        ..Default::default()
    };
    let h = harness(config, FakeSurface::new()).await;

    // When
    h.guardian
        .start_monitoring(StartMonitoringOptions::default())
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_secs(2)).await;

    // Then
    assert_that!(h.surface.evaluations(), eq(0));
}

#[tokio::test(start_paused = true)]
async fn given_monitoring_when_foreground_then_event_then_debounced_probe() {
    // Given
    let mut h = default_harness().await;
    h.guardian
        .start_monitoring(without_initial_check())
        .await
        .unwrap();

    // When
    h.lifecycle.foreground();
    tokio::time::sleep(Duration::from_millis(599)).await;

    // Then
    assert_that!(h.surface.evaluations(), eq(0));
    assert_that!(drain_event_names(&mut h.events), eq(&vec!["foreground"]));

    tokio::time::sleep(Duration::from_millis(2)).await;
    assert_that!(h.surface.evaluations(), eq(1));
    let events = drain_events(&mut h.events);
    assert_that!(events.len(), eq(1));
    assert_that!(events[0].name(), eq("webviewHealthy"));
    assert_that!(events[0].state.reason.as_str(), eq("foreground"));
}

#[tokio::test(start_paused = true)]
async fn given_custom_debounce_when_foreground_then_probe_waits_that_long() {
    // Given
    let h = default_harness().await;
    h.guardian
        .start_monitoring(StartMonitoringOptions {
            foreground_debounce_ms: Some(2_000),
            run_initial_check: Some(false),
            ..Default::default()
        })
        .await
        .unwrap();

    // When
    h.lifecycle.foreground();
    tokio::time::sleep(Duration::from_millis(1_999)).await;
    let before = h.surface.evaluations();
    tokio::time::sleep(Duration::from_millis(2)).await;

    // Then
    assert_that!(before, eq(0));
    assert_that!(h.surface.evaluations(), eq(1));
}

#[tokio::test(start_paused = true)]
async fn given_stopped_when_foreground_then_no_event_and_no_probe() {
    // Given
    let mut h = default_harness().await;
    h.guardian
        .start_monitoring(without_initial_check())
        .await
        .unwrap();
    let stopped = h.guardian.stop_monitoring().await.unwrap();

    // When
    h.lifecycle.foreground();
    tokio::time::sleep(Duration::from_secs(2)).await;

    // Then
    assert_that!(stopped.monitoring, eq(false));
    assert_that!(stopped.reason.as_str(), eq("stop"));
    assert_that!(h.guardian.get_state().await.unwrap().monitoring, eq(false));
    assert_that!(h.surface.evaluations(), eq(0));
    assert_that!(drain_event_names(&mut h.events), is_empty());
}

#[tokio::test(start_paused = true)]
async fn given_probe_scheduled_when_stopped_then_scheduled_probe_still_runs() {
    // Given
    let h = default_harness().await;
    h.guardian
        .start_monitoring(StartMonitoringOptions::default())
        .await
        .unwrap();

    // When
    h.guardian.stop_monitoring().await.unwrap();
    tokio::time::sleep(Duration::from_millis(601)).await;

    // Then
    assert_that!(h.surface.evaluations(), eq(1));
}

#[tokio::test(start_paused = true)]
async fn given_pending_restart_when_background_then_pending_is_cleared() {
    // Given
    let h = default_harness().await;
    h.guardian
        .start_monitoring(StartMonitoringOptions {
            auto_restart: Some(false),
            run_initial_check: Some(false),
            ..Default::default()
        })
        .await
        .unwrap();
    h.surface.push_result(Err(EvalError::process_terminated()));
    h.guardian.check_now(None).await.unwrap();
    assert_that!(
        h.guardian.get_state().await.unwrap().pending_restart_reason,
        some(anything())
    );

    // When
    h.lifecycle.background();

    // Then
    let state = h.guardian.get_state().await.unwrap();
    assert_that!(state.pending_restart_reason, none());
    assert_that!(state.last_crash_at, some(anything()));
}

#[tokio::test(start_paused = true)]
async fn given_monitoring_stopped_when_background_then_pending_is_still_cleared() {
    // Given
    let h = default_harness().await;
    h.guardian
        .start_monitoring(StartMonitoringOptions {
            auto_restart: Some(false),
            run_initial_check: Some(false),
            ..Default::default()
        })
        .await
        .unwrap();
    h.surface.push_result(Err(EvalError::process_terminated()));
    h.guardian.check_now(None).await.unwrap();
    h.guardian.stop_monitoring().await.unwrap();

    // When
    h.lifecycle.background();

    // Then
    assert_that!(
        h.guardian.get_state().await.unwrap().pending_restart_reason,
        none()
    );
}

#[tokio::test(start_paused = true)]
async fn given_non_terminal_error_on_scheduled_probe_then_no_events() {
    // Given
    let mut h = default_harness().await;
    h.surface.push_result(Err(EvalError::script("ReferenceError")));
    h.guardian
        .start_monitoring(StartMonitoringOptions {
            debug: Some(true),
            ..Default::default()
        })
        .await
        .unwrap();

    // When
    tokio::time::sleep(Duration::from_millis(601)).await;

    // Then
    assert_that!(h.surface.evaluations(), eq(1));
    assert_that!(drain_event_names(&mut h.events), is_empty());
    assert_that!(h.guardian.get_state().await.unwrap().last_healthy_at, none());
}

#[tokio::test(start_paused = true)]
async fn given_terminal_on_foreground_probe_then_crash_and_restart_events() {
    // Given
    let mut h = default_harness().await;
    h.guardian
        .start_monitoring(without_initial_check())
        .await
        .unwrap();
    h.surface.push_result(Err(EvalError::process_terminated()));

    // When
    h.lifecycle.foreground();
    tokio::time::sleep(Duration::from_millis(601)).await;

    // Then
    let names = drain_event_names(&mut h.events);
    assert_that!(
        names,
        eq(&vec!["foreground", "webviewCrashed", "webviewRestarted"])
    );
    let state = h.guardian.get_state().await.unwrap();
    assert_that!(state.last_restart_at, some(anything()));
}

#[tokio::test(start_paused = true)]
async fn given_second_start_then_options_merge_onto_previous() {
    // Given
    let h = default_harness().await;
    h.guardian
        .start_monitoring(StartMonitoringOptions {
            foreground_debounce_ms: Some(100),
            auto_restart: Some(false),
            run_initial_check: Some(false),
            ..Default::default()
        })
        .await
        .unwrap();

    // When
    h.guardian
        .start_monitoring(StartMonitoringOptions {
            debug: Some(true),
            run_initial_check: Some(false),
            ..Default::default()
        })
        .await
        .unwrap();
    let options = h.guardian.options().await.unwrap();

    // Then
    assert_that!(options.foreground_debounce_ms, eq(100));
    assert_that!(options.auto_restart, eq(false));
    assert_that!(options.debug, eq(true));
}

#[tokio::test]
async fn given_crash_pending_when_background_then_next_command_sees_it_cleared() {
    // Given
    let h = default_harness().await;
    h.guardian
        .start_monitoring(StartMonitoringOptions {
            auto_restart: Some(false),
            run_initial_check: Some(false),
            ..Default::default()
        })
        .await
        .unwrap();
    h.surface.push_result(Err(EvalError::process_terminated()));
    h.guardian.check_now(None).await.unwrap();

    // When
    let delivered = h.lifecycle.background();
    let state = h.guardian.get_state().await.unwrap();

    // Then
    assert_that!(delivered, eq(1));
    assert_that!(state.pending_restart_reason, none());
}

#[tokio::test]
async fn given_foreground_then_stop_when_sent_back_to_back_then_foreground_is_handled_first() {
    // Given
    let mut h = default_harness().await;
    h.guardian
        .start_monitoring(without_initial_check())
        .await
        .unwrap();

    // When
    h.lifecycle.foreground();
    h.guardian.stop_monitoring().await.unwrap();

    // Then
    assert_that!(drain_event_names(&mut h.events), eq(&vec!["foreground"]));
}

#[tokio::test]
async fn given_no_monitor_when_notified_then_nothing_is_delivered() {
    // Given
    let lifecycle = wg_core::LifecycleNotifier::new();

    // When
    let delivered = lifecycle.foreground();

    // Then
    assert_that!(delivered, eq(0));
    assert_that!(lifecycle.monitor_count(), eq(0));
}
