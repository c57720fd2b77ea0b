use eyre::Result;
use tokio::net::TcpListener;

use cerebra_server::state::AppState;
use cerebra_server::{config, routes, telemetry};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let config = config::load_config()?;
    telemetry::init(config.log_format);

    let state = AppState::new(&config).map_err(|e| eyre::eyre!("page templates: {e}"))?;
    let app = routes::router(state);

    let listener = TcpListener::bind(&config.bind_addr).await?;
    tracing::info!(
        addr = %listener.local_addr()?,
        session_ttl_secs = config.session_ttl_secs,
        "cerebra listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("shut down cleanly");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for ctrl-c: {e}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => tracing::error!("failed to listen for SIGTERM: {e}"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
