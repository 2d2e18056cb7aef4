//! Tauri plugin that keeps the main webview alive.
//!
//! Register with `.plugin(tauri_plugin_webview_guardian::init())`. The guest
//! drives the guardian through four commands (`ping_ack` is internal to the
//! wrapped ping script) and listens on
//! `webview-guardian://<event>` for `foreground`, `webviewHealthy`,
//! `webviewCrashed` and `webviewRestarted`.

mod commands;
mod host_signal;
mod logging;
mod ping_ack;
mod surface;


pub use logging::setup_logging;
pub use ping_ack::PingAcks;
pub use surface::TauriSurface;

use host_signal::HostSignal;

use std::path::PathBuf;
use std::sync::Arc;

use tauri::plugin::{Builder, TauriPlugin};
use tauri::{AppHandle, Emitter, Manager, RunEvent, Runtime};
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};
use wg_config::{CONFIG_DIR_ENV, CONFIG_DIR_NAME, GuardianConfig};
use wg_core::{GuardianHandle, LifecycleNotifier};

/// Plugin name used for command routing and event channels.
pub const PLUGIN_NAME: &str = "webview-guardian";
/// Native plugin identifier.
pub const IDENTIFIER: &str = "WebviewGuardianPlugin";
/// Name the guest-side bindings register under.
pub const JS_NAME: &str = "WebviewGuardian";
/// Label of the window whose webview is monitored.
pub const MONITORED_WINDOW: &str = "main";

/// Plugin with configuration from `guardian.toml` and `WG_*` environment overrides.
///
/// The file is looked up in `WG_CONFIG_DIR` when set, else in
/// `.webview-guardian/` under the app config directory.
pub fn init<R: Runtime>() -> TauriPlugin<R> {
    build(None)
}

/// Plugin with configuration supplied by the host.
pub fn init_with_config<R: Runtime>(config: GuardianConfig) -> TauriPlugin<R> {
    build(Some(config))
}

fn build<R: Runtime>(config: Option<GuardianConfig>) -> TauriPlugin<R> {
    Builder::new(PLUGIN_NAME)
        .invoke_handler(tauri::generate_handler![
            commands::start_monitoring,
            commands::stop_monitoring,
            commands::get_state,
            commands::check_now,
            commands::ping_ack,
        ])
        .setup(move |app, _api| setup(app, config))
        .on_event(|app, event| {
            let signal = match event {
                RunEvent::WindowEvent { label, event, .. } if label == MONITORED_WINDOW => {
                    host_signal::window_signal(event)
                }
                other => host_signal::run_signal(other),
            };
            if let Some(signal) = signal {
                handle_signal(app, signal);
            }
        })
        .build()
}

fn setup<R: Runtime>(
    app: &AppHandle<R>,
    config: Option<GuardianConfig>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = match config {
        Some(config) => config,
        None => GuardianConfig::load_from(&config_dir(app)?)?,
    };
    config.validate()?;

    if config.logging.enabled {
        let log_dir = app.path().app_data_dir()?.join(&config.logging.dir);
        setup_logging(&log_dir, &config.logging)?;
    }

    info!("Starting {IDENTIFIER} v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let lifecycle = LifecycleNotifier::new();
    let runtime = tauri::async_runtime::handle();
    let guardian = {
        let _entered = runtime.inner().enter();
        GuardianHandle::spawn(&config.monitoring, &lifecycle)
    };

    forward_events(app, &guardian);
    app.manage(PingAcks::new());
    app.manage(lifecycle);
    app.manage(guardian);

    // Windows declared in the app config may not exist yet; RunEvent::Ready retries.
    attach_monitored_window(app);

    Ok(())
}

fn config_dir<R: Runtime>(app: &AppHandle<R>) -> Result<PathBuf, Box<dyn std::error::Error>> {
    if std::env::var_os(CONFIG_DIR_ENV).is_some() {
        return Ok(GuardianConfig::config_dir()?);
    }
    Ok(app.path().app_config_dir()?.join(CONFIG_DIR_NAME))
}

/// Re-emit guardian events to the frontend until the guardian shuts down.
fn forward_events<R: Runtime>(app: &AppHandle<R>, guardian: &GuardianHandle) {
    let app = app.clone();
    let mut events = guardian.subscribe();

    tauri::async_runtime::spawn(async move {
        loop {
            let event = match events.recv().await {
                Ok(event) => event,
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "frontend event forwarding fell behind");
                    continue;
                }
                Err(RecvError::Closed) => break,
            };

            let channel = host_signal::event_channel(event.kind);
            if let Err(e) = app.emit(&channel, &event.state) {
                warn!("Failed to emit {channel}: {e}");
            }
        }
    });
}

fn attach_monitored_window<R: Runtime>(app: &AppHandle<R>) {
    let Some(window) = app.get_webview_window(MONITORED_WINDOW) else {
        return;
    };
    let (Some(guardian), Some(acks)) = (
        app.try_state::<GuardianHandle>(),
        app.try_state::<Arc<PingAcks>>(),
    ) else {
        return;
    };
    let guardian = guardian.inner().clone();
    let surface = TauriSurface::new(window, acks.inner().clone());

    tauri::async_runtime::spawn(async move {
        let label = surface.label().to_string();
        match guardian.attach_surface(Arc::new(surface)).await {
            Ok(()) => info!("Monitoring webview window '{label}'"),
            Err(e) => warn!("Failed to attach webview window '{label}': {e}"),
        }
    });
}

fn handle_signal<R: Runtime>(app: &AppHandle<R>, signal: HostSignal) {
    match signal {
        HostSignal::Attach => attach_monitored_window(app),
        HostSignal::Transition(transition) => {
            if let Some(lifecycle) = app.try_state::<LifecycleNotifier>() {
                lifecycle.notify(transition);
            }
        }
        HostSignal::Detach => {
            let Some(guardian) = app.try_state::<GuardianHandle>() else {
                return;
            };
            let guardian = guardian.inner().clone();
            tauri::async_runtime::spawn(async move {
                let _ = guardian.detach_surface().await;
            });
        }
        HostSignal::Shutdown => {
            if let Some(guardian) = app.try_state::<GuardianHandle>() {
                let guardian = guardian.inner().clone();
                tauri::async_runtime::block_on(guardian.shutdown());
                info!("WebView guardian stopped");
            }
        }
    }
}
