use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use pgwale_events::{EmailConfig, EventBus, MailTransport, Notifier, Recipients, SmtpMailer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pgwale_api::config::ServerConfig;
use pgwale_api::router::build_app_router;
use pgwale_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pgwale_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        firebase = config.firebase.is_some(),
        admin_login = config.admin.password.is_some(),
        "Loaded server configuration"
    );

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = pgwale_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    pgwale_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    pgwale_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Event bus + email notifier ---
    let event_bus = Arc::new(EventBus::default());

    let transport: Option<Arc<dyn MailTransport>> = match EmailConfig::from_env() {
        Some(email_config) => match SmtpMailer::new(&email_config) {
            Ok(mailer) => {
                tracing::info!(host = %email_config.smtp_host, "SMTP delivery enabled");
                Some(Arc::new(mailer) as Arc<dyn MailTransport>)
            }
            Err(e) => {
                tracing::error!(error = %e, "Invalid SMTP configuration, email delivery disabled");
                None
            }
        },
        None => {
            tracing::warn!("SMTP_HOST not set, email delivery disabled");
            None
        }
    };
    let notifier = Notifier::new(
        transport,
        Recipients {
            admin_email: config.admin.email.clone(),
            site_url: config.public_site_url.clone(),
        },
    );
    let notifier_handle = tokio::spawn(notifier.run(event_bus.subscribe()));
    tracing::info!("Email notifier started");

    // --- App state ---
    let state = AppState::new(pool, config.clone(), Arc::clone(&event_bus))
        .expect("Failed to hash admin password");

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    // The router and its state are gone; dropping the last bus handle closes
    // the channel so the notifier drains and exits.
    drop(event_bus);
    let _ = tokio::time::timeout(Duration::from_secs(10), notifier_handle).await;
    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
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
