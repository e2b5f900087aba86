use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use counsel_api::config::ServerConfig;
use counsel_api::router::build_app_router;
use counsel_api::state::AppState;
use counsel_core::blob_store::BlobStore;
use counsel_mail::{ContactMailer, SmtpTransport};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "counsel_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(message) = run().await {
        tracing::error!("{message}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), String> {
    // --- Configuration ---
    let config = ServerConfig::from_env().map_err(|e| format!("Invalid configuration: {e}"))?;
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let pool = counsel_db::create_pool(&config.database_url)
        .await
        .map_err(|e| format!("Failed to connect to database: {e}"))?;
    tracing::info!("Database connection pool created");

    counsel_db::health_check(&pool)
        .await
        .map_err(|e| format!("Database health check failed: {e}"))?;
    tracing::info!("Database health check passed");

    counsel_db::run_migrations(&pool)
        .await
        .map_err(|e| format!("Failed to run database migrations: {e}"))?;
    tracing::info!("Database migrations applied");

    // --- Uploads ---
    let blobs = BlobStore::new(config.upload_dir.clone());
    blobs
        .init()
        .await
        .map_err(|e| format!("Failed to prepare upload directory: {e}"))?;
    tracing::info!(dir = %blobs.root().display(), "Upload directory ready");

    // --- Mail ---
    let transport = SmtpTransport::from_config(&config.mail)
        .map_err(|e| format!("Failed to configure SMTP transport: {e}"))?;
    if let Some(redirect) = &config.mail.recipient_override {
        tracing::warn!(
            configured = %config.mail.recipient,
            redirect = %redirect,
            "EMAIL_TO_OVERRIDE is set, contact emails are redirected"
        );
    }
    let mailer = ContactMailer::new(config.mail.clone(), Arc::new(transport));

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        blobs: Arc::new(blobs),
        mailer: Arc::new(mailer),
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let ip: IpAddr = config
        .host
        .parse()
        .map_err(|e| format!("Invalid HOST address '{}': {e}", config.host))?;
    let addr = SocketAddr::new(ip, config.port);
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| format!("Failed to bind to {addr}: {e}"))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| format!("Server error: {e}"))?;

    tracing::info!("Graceful shutdown complete");
    Ok(())
}

/// Wait for SIGINT (Ctrl-C) or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
