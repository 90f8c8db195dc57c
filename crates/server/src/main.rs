//! Wayfare REST backend
//!
//! The entry point for all external API requests. Handles:
//! - Attraction and event retrieval with passthrough filtering
//! - The favorites relation
//! - Delegated session exchange with the external identity provider
//! - Delegated itinerary generation
//! - Observability (logging, metrics, tracing)

mod handlers;
mod services;

use axum::{
    extract::Request,
    middleware::{self, Next},
    response::Response,
    routing::{delete, get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusBuilder;
use services::{identity::IdentityClient, itinerary::ItineraryGenerator};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;
use wayfare_common::{config::AppConfig, db::DbPool, metrics};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub db: DbPool,
    pub identity: IdentityClient,
    pub generator: ItineraryGenerator,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Arc::new(AppConfig::load()?);

    init_tracing(&config.observability);
    info!("Starting Wayfare API v{}", wayfare_common::VERSION);

    // Initialize metrics
    metrics::register_metrics();
    if config.observability.metrics_port > 0 {
        let addr = SocketAddr::from(([0, 0, 0, 0], config.observability.metrics_port));
        PrometheusBuilder::new()
            .with_http_listener(addr)
            .install()?;
        info!("Prometheus exporter on {}", addr);
    }

    // Initialize database connection
    info!("Connecting to database...");
    let db = DbPool::new(&config.database).await?;

    // Delegated external services
    let identity = IdentityClient::new(config.identity.clone());
    let generator = ItineraryGenerator::new(config.generator.clone());

    // Create app state
    let state = AppState {
        config: config.clone(),
        db,
        identity,
        generator,
    };

    // Build the router
    let app = create_router(state);

    // Start the server
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Initialize logging. RUST_LOG wins over the configured level.
fn init_tracing(config: &wayfare_common::config::ObservabilityConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    if config.json_logging {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Create the main application router
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Request ID propagation
    let request_id = SetRequestIdLayer::x_request_id(MakeRequestUuid);
    let propagate_id = PropagateRequestIdLayer::x_request_id();

    // API routes
    let api_routes = Router::new()
        // Banner and health (no auth)
        .route("/", get(handlers::health::root))
        .route("/health", get(handlers::health::health))

        // Attraction endpoints
        .route("/attractions", get(handlers::attractions::list_attractions))
        .route("/attractions/{id}", get(handlers::attractions::get_attraction))

        // Event endpoints
        .route("/events", get(handlers::events::list_events))
        .route("/events/{id}", get(handlers::events::get_event))

        // Analytics & holidays
        .route("/analytics", get(handlers::analytics::list_analytics))
        .route("/holidays", get(handlers::analytics::list_holidays))

        // Favorites
        .route("/favorites", post(handlers::favorites::add_favorite))
        .route("/favorites/{user_id}", get(handlers::favorites::list_favorites))
        .route(
            "/favorites/{user_id}/{attraction_id}",
            delete(handlers::favorites::remove_favorite),
        )

        // Itinerary generation (delegated)
        .route("/itinerary/generate", post(handlers::itinerary::generate))

        // Session endpoints (delegated exchange)
        .route("/auth/session", post(handlers::auth::exchange_session))
        .route("/auth/me", get(handlers::auth::me))
        .route("/auth/logout", post(handlers::auth::logout));

    // Compose the app
    Router::new()
        .nest("/api", api_routes)
        .layer(middleware::from_fn(track_requests))
        .layer(TimeoutLayer::new(state.config.request_timeout()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(request_id)
        .layer(propagate_id)
        .with_state(state)
}

/// Per-request counter and latency histogram
async fn track_requests(request: Request, next: Next) -> Response {
    let tracker = metrics::RequestMetrics::start(
        request.method().as_str(),
        request.uri().path(),
    );

    let response = next.run(request).await;
    tracker.finish(response.status().as_u16());
    response
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, starting shutdown..."),
        _ = terminate => info!("Received SIGTERM, starting shutdown..."),
    }
}
