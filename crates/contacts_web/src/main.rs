#![forbid(unsafe_code)]

use contacts_web::{build_router, AppState, ServerConfig};
use log::{error, info};
use tokio::net::TcpListener;

/// Resolves on Ctrl-C. If the handler cannot be installed this never resolves,
/// so the server keeps running instead of shutting down at once.
async fn ctrl_c_or_pending() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("event=signal_register module=main status=error signal=ctrl_c error={err}");
        std::future::pending::<()>().await;
    }
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = ctrl_c_or_pending() => {}
                }
            }
            Err(err) => {
                error!("event=signal_register module=main status=error signal=sigterm error={err}");
                ctrl_c_or_pending().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        ctrl_c_or_pending().await;
    }
}

#[tokio::main]
async fn main() -> Result<(), String> {
    let config = ServerConfig::from_env().map_err(|err| err.to_string())?;
    contacts_core::init_logging(config.log_level, config.log_dir.as_deref())?;

    let conn = config
        .database
        .open()
        .map_err(|err| format!("failed to open database: {err}"))?;
    let app = build_router(AppState::new(conn));

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .map_err(|err| format!("failed to bind {}: {err}", config.bind_addr))?;
    info!(
        "event=server_start module=main status=ok addr={} version={}",
        config.bind_addr,
        contacts_core::core_version()
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await
        .map_err(|err| format!("server failed: {err}"))?;

    info!("event=server_stop module=main status=ok");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::ctrl_c_or_pending;
    use std::time::Duration;

    #[tokio::test]
    async fn ctrl_c_wait_stays_pending_without_a_signal() {
        let waited = tokio::time::timeout(Duration::from_millis(50), ctrl_c_or_pending()).await;
        assert!(waited.is_err());
    }
}
