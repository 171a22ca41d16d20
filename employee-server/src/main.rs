use anyhow::Context;
use employee_server::utils::init_logger;
use employee_server::{AppState, Config, api};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    let _ = dotenvy::dotenv();

    let config = Config::from_env();
    init_logger(&config.log_level, config.log_dir.as_deref());

    tracing::info!(
        "Starting employee-server v{} (env: {})",
        env!("CARGO_PKG_VERSION"),
        config.environment
    );

    let state = AppState::initialize(config.clone())
        .await
        .context("failed to initialize application state")?;
    let app = api::build_app(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("employee-server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    tracing::info!("employee-server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
