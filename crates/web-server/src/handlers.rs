use crate::{error::AppError, AppState};
use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use core_types::{AccountBalance, LogEntry, Position, Strategy, StrategyStatus};
use serde::{Deserialize, Serialize};
use service::ScheduleUpdate;
use std::sync::Arc;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub strategy_count: usize,
}

/// Body of `POST /api/strategies/ai`.
#[derive(Debug, Deserialize)]
pub struct AiStrategyPayload {
    pub name: String,
    pub description: String,
    pub code: String,
}

#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub status: StrategyStatus,
    pub strategy: Strategy,
}

/// # GET /api/health
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        strategy_count: state.strategies.count().await,
    })
}

/// # GET /api/account
pub async fn get_account_balance(
    State(state): State<Arc<AppState>>,
) -> Result<Json<AccountBalance>, AppError> {
    let balance = state.account_data.get_account_balance().await?;
    Ok(Json(balance))
}

/// # GET /api/positions
pub async fn get_positions(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Position>>, AppError> {
    let positions = state.account_data.get_open_positions().await?;
    Ok(Json(positions))
}

/// # GET /api/strategies
pub async fn list_strategies(State(state): State<Arc<AppState>>) -> Json<Vec<Strategy>> {
    Json(state.strategies.list().await)
}

/// # POST /api/strategies
/// Multipart upload with a required `name`, an optional `description` and
/// the script itself in a `file` part.
pub async fn upload_strategy(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<Strategy>, AppError> {
    let mut name = None;
    let mut description = String::new();
    let mut file = None;

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().map(str::to_string);
        match field_name.as_deref() {
            Some("name") => name = Some(field.text().await?),
            Some("description") => description = field.text().await?,
            Some("file") => file = Some(field.bytes().await?.to_vec()),
            other => tracing::debug!(field = ?other, "Ignoring unknown multipart field."),
        }
    }

    let name = name.ok_or_else(|| AppError::BadRequest("missing form field: name".to_string()))?;
    let file = file.ok_or_else(|| AppError::BadRequest("missing file part: file".to_string()))?;

    let strategy = state
        .strategies
        .ingest_from_content(name, description, file)
        .await?;
    Ok(Json(strategy))
}

/// # POST /api/strategies/ai
pub async fn save_ai_strategy(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<AiStrategyPayload>,
) -> Result<Json<Strategy>, AppError> {
    let strategy = state
        .strategies
        .ingest_from_payload(payload.name, payload.description, payload.code)
        .await?;
    Ok(Json(strategy))
}

/// # POST /api/strategies/:id/toggle
pub async fn toggle_strategy(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<ToggleResponse>, AppError> {
    let strategy = state.strategies.toggle(&id).await?;
    Ok(Json(ToggleResponse {
        status: strategy.status,
        strategy,
    }))
}

/// # POST /api/strategies/:id/schedule
pub async fn update_schedule(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(update): Json<ScheduleUpdate>,
) -> Result<Json<Strategy>, AppError> {
    let strategy = state.strategies.update_schedule(&id, update).await?;
    Ok(Json(strategy))
}

/// # GET /api/strategies/:id/logs
pub async fn get_strategy_logs(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<LogEntry>>, AppError> {
    let logs = state.strategies.logs(&id).await?;
    Ok(Json(logs))
}
