//! Planboard server entry point.

use clap::Parser;
use log::{error, info};
use planboard_server::{build_router, AppState, Collections, ServerConfig};
use std::error::Error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = ServerConfig::parse();
    planboard_core::init_logging(config.log_level(), config.log_dir.as_deref())?;

    let addr = config.listen_addr()?;
    let collections = match config.db.as_deref() {
        Some(path) => Collections::open_sqlite(path).map_err(|err| {
            error!("event=server_start module=main status=error error_code=db_open_failed error={err}");
            err
        })?,
        None => Collections::in_memory(),
    };
    let app = build_router(AppState::new(collections));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("event=server_start module=main status=ok listen={addr}");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("event=server_stop module=main status=ok");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("event=server_stop module=main status=error error_code=signal_failed error={err}");
    }
}
