use std::sync::Arc;

use barangay_api_rust::config;
use barangay_api_rust::database::{DatabaseManager, PgEntityStore};
use barangay_api_rust::realtime::{
    Broadcaster, HttpPushTransport, NoopTransport, NotificationTransport,
};
use barangay_api_rust::state::AppState;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    // Initialize configuration (this loads the config singleton)
    let config = config::config();

    tracing_subscriber::fmt::init();
    tracing::info!("Starting Barangay API in {:?} mode", config.environment);

    let pool = DatabaseManager::connect_lazy()
        .unwrap_or_else(|e| panic!("failed to create database pool: {}", e));

    // Pool is lazy; a down database leaves the server up but degraded,
    // so a failed migration run is a warning rather than a crash.
    if let Err(e) = sqlx::migrate!("./migrations").run(&pool).await {
        tracing::warn!("Migrations not applied (database unavailable?): {}", e);
    }

    let transport: Arc<dyn NotificationTransport> = match &config.realtime.endpoint {
        Some(endpoint) => {
            tracing::info!("Realtime push transport -> {}", endpoint);
            Arc::new(HttpPushTransport::new(
                endpoint.clone(),
                config.realtime.api_key.clone(),
            ))
        }
        None => {
            tracing::info!("No realtime endpoint configured; events are dropped");
            Arc::new(NoopTransport)
        }
    };

    let state = AppState::new(
        Arc::new(PgEntityStore::new(pool.clone())),
        Broadcaster::new(transport),
    );

    let app = barangay_api_rust::app(state);

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    println!("🚀 Barangay API server listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server");

    DatabaseManager::close(&pool).await;
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("Shutdown signal received");
}
