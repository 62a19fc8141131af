//! ID card enrollment portal - server-rendered web application.
//!
//! This is the main entry point for the idcard service.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use idcard_service::{create_router, AppState, ServiceConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,idcard=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting ID card enrollment portal");

    // Load configuration from environment
    let config = ServiceConfig::from_env();

    tracing::info!(
        listen_addr = %config.listen_addr,
        backend = ?config.backend,
        supabase_configured = %config.supabase_url.is_some(),
        cookie_secure = config.cookie_secure,
        max_body_bytes = config.max_body_bytes,
        "Service configuration loaded"
    );

    let listen_addr = config.listen_addr.clone();
    let state = AppState::new(config)?;

    let app = create_router(state);
    tracing::info!("Router configured with all pages");

    tracing::info!(listen_addr = %listen_addr, "Starting HTTP server");
    let listener = tokio::net::TcpListener::bind(&listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
