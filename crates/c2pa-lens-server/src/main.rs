//! C2PA Lens Gateway Binary
//!
//! Runs the HTTP gateway in front of the upstream C2PA service.

use std::process;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use c2pa_lens_client::{HttpProvenanceService, ProvenanceService};
use c2pa_lens_server::{create_router, AppState, ServerConfig};

#[tokio::main]
async fn main() {
    // Configuration
    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Invalid configuration: {}", err);
            process::exit(2);
        }
    };

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .with_target(true)
        .with_thread_ids(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    // Upstream service
    let service = HttpProvenanceService::with_timeout(&config.core_url, config.upstream_timeout)
        .expect("C2PA_LENS_CORE_URL must be an http(s) URL");

    info!(
        upstream = service.description(),
        core_url = %config.core_url,
        timeout_secs = config.upstream_timeout.as_secs(),
        max_upload_bytes = config.max_upload_bytes,
        port = config.port,
        "Starting C2PA Lens gateway"
    );

    // Create application state
    let port = config.port;
    let state = Arc::new(AppState {
        service: Arc::new(service),
        config,
    });

    // Build router
    let app = create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    info!(addr = %addr, "C2PA Lens gateway listening");

    axum::serve(listener, app)
        .await
        .expect("Server error");
}
