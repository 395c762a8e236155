// File: crates/services/schedbot_backend/src/main.rs
use schedbot_backend::app;
use schedbot_common::logging::{self, log_result};
use schedbot_config::load_settings;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    logging::init();

    let Ok(settings) = log_result(load_settings(), "Settings loaded", "Failed to load config")
    else {
        return ExitCode::FAILURE;
    };
    let settings = Arc::new(settings);
    info!(
        "Environment: {} (calendar access: {})",
        settings.app_env,
        settings.has_calendar_access()
    );

    let addr = format!("0.0.0.0:{}", settings.http_port);
    let Ok(listener) = log_result(
        TcpListener::bind(&addr).await,
        &format!("Starting server at http://{}", addr),
        "Failed to bind listener",
    ) else {
        return ExitCode::FAILURE;
    };

    if let Err(e) = axum::serve(listener, app(settings)).await {
        error!("Server stopped with error: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
