use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use server_api::{create_model, delete_model, get_model, list_models, ApiContext};
use shared::{
    domain::{Model, ModelId},
    error::{ApiError, ErrorCode},
    protocol::{CreateModelRequest, CreateModelResponse, ListModelsQuery, HEALTHZ_ROUTE, MODELS_ROUTE},
};
use storage::Storage;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod app_state;
mod config;

use app_state::AppState;
use config::{load_settings, prepare_database_url};

type HttpError = (StatusCode, Json<ApiError>);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = load_settings();
    let database_url = prepare_database_url(&settings.database_url)?;
    let storage = Storage::new(&database_url).await.map_err(|error| {
        error!(
            %database_url,
            %error,
            "failed to open SQLite database; verify parent directory exists and permissions are correct"
        );
        error
    })?;

    let state = AppState {
        api: ApiContext { storage },
    };
    let app = build_router(Arc::new(state), settings.max_body_bytes);

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, "catalog server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>, max_body_bytes: usize) -> Router {
    Router::new()
        .route(HEALTHZ_ROUTE, get(healthz))
        .route(MODELS_ROUTE, get(http_list_models).post(http_create_model))
        .route(
            &format!("{MODELS_ROUTE}/:model_id"),
            get(http_get_model).delete(http_delete_model),
        )
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Validation => StatusCode::BAD_REQUEST,
        ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn reject(err: ApiError) -> HttpError {
    let status = status_for(err.code);
    if status.is_server_error() {
        error!(message = %err.message, "catalog request failed");
    } else {
        warn!(code = ?err.code, message = %err.message, "catalog request rejected");
    }
    (status, Json(err))
}

async fn healthz(State(state): State<Arc<AppState>>) -> Result<&'static str, HttpError> {
    state
        .api
        .storage
        .health_check()
        .await
        .map_err(|e| reject(ApiError::new(ErrorCode::Internal, e.to_string())))?;
    Ok("ok")
}

async fn http_list_models(
    State(state): State<Arc<AppState>>,
    Query(q): Query<ListModelsQuery>,
) -> Result<Json<Vec<Model>>, HttpError> {
    let models = list_models(&state.api, q.model_type).await.map_err(reject)?;
    Ok(Json(models))
}

async fn http_create_model(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateModelRequest>,
) -> Result<(StatusCode, Json<CreateModelResponse>), HttpError> {
    let id = create_model(&state.api, req).await.map_err(reject)?;
    Ok((StatusCode::CREATED, Json(CreateModelResponse { id })))
}

async fn http_get_model(
    State(state): State<Arc<AppState>>,
    Path(model_id): Path<i64>,
) -> Result<Json<Model>, HttpError> {
    let model = get_model(&state.api, ModelId(model_id))
        .await
        .map_err(reject)?;
    Ok(Json(model))
}

async fn http_delete_model(
    State(state): State<Arc<AppState>>,
    Path(model_id): Path<i64>,
) -> Result<StatusCode, HttpError> {
    delete_model(&state.api, ModelId(model_id))
        .await
        .map_err(reject)?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
