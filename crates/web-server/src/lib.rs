use api_client::{AccountDataProvider, FixtureClient};
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use configuration::Settings;
use database::StrategyRepository;
use service::StrategyService;
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

pub mod error;
pub mod handlers;

/// The shared application state that all handlers can access.
pub struct AppState {
    pub strategies: Arc<StrategyService>,
    pub account_data: Arc<dyn AccountDataProvider>,
}

/// Builds the full `/api` router with CORS, request tracing and the body limit applied.
pub fn build_router(app_state: Arc<AppState>, body_limit_bytes: usize) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(AllowMethods::any())
        .allow_headers(AllowHeaders::any());

    Router::new()
        .route("/api/health", get(handlers::health_check))
        .route("/api/account", get(handlers::get_account_balance))
        .route("/api/positions", get(handlers::get_positions))
        .route(
            "/api/strategies",
            get(handlers::list_strategies).post(handlers::upload_strategy),
        )
        .route("/api/strategies/ai", post(handlers::save_ai_strategy))
        .route("/api/strategies/:id/toggle", post(handlers::toggle_strategy))
        .route("/api/strategies/:id/schedule", post(handlers::update_schedule))
        .route("/api/strategies/:id/logs", get(handlers::get_strategy_logs))
        .with_state(app_state)
        .layer(cors)
        // This middleware will automatically log information about every incoming request.
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(body_limit_bytes))
}

/// The main function to configure and run the web server.
///
/// Tracing must already be initialized by the caller.
pub async fn run_server(settings: Settings) -> anyhow::Result<()> {
    let repository = StrategyRepository::new(settings.storage.file_path());
    let strategies = Arc::new(StrategyService::open(repository).await?);

    let app_state = Arc::new(AppState {
        strategies,
        account_data: Arc::new(FixtureClient::new()),
    });
    let app = build_router(app_state, settings.server.body_limit_bytes());

    let addr = settings.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Web server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Web server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal.");
        // Without a signal handler, keep serving until the process is killed.
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received.");
}
