//! HTTP surface: router construction and request handlers.
//!
//! Every data endpoint follows the same shape: validate the raw date
//! token(s), resolve the physical query target, run one projection, return
//! the rows as a JSON array. Validation and resolution failures short-circuit
//! before any connection is checked out.

use axum::{
    extract::{Path, State},
    http::{header, Method, StatusCode},
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

use crate::database::Storage;
use crate::dates;
use crate::error::GatewayError;
use crate::models::{InventoryEntry, ObservationRecord, PermitRecord};
use crate::shard::{self, RangeScheme};

const FAVICON_PATH: &str = "static/butterfly_net.ico";

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub storage: Storage,
}

/// Build the full router with tracing and CORS layers.
pub fn build_router(storage: Storage) -> Router {
    let state = AppState { storage };

    Router::new()
        .route("/", get(root))
        .route("/favicon.ico", get(favicon))
        .route("/health/db", get(health_db))
        .route("/monarchs/dayscan/:date", get(scan_day))
        .route("/permits/scanner/:start/:end", get(scan_permit_shard))
        .route("/permits/durations/:start/:end", get(scan_permit_window))
        .route("/monarchs/scanneddates", get(scanned_dates))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods([
                            Method::GET,
                            Method::POST,
                            Method::PUT,
                            Method::DELETE,
                            Method::OPTIONS,
                        ])
                        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
                ),
        )
        .with_state(state)
}

async fn root() -> Html<&'static str> {
    Html("This is the gateway for the monarch butterflies and permit tracker datasets.")
}

async fn favicon() -> Response {
    match tokio::fs::read(FAVICON_PATH).await {
        Ok(bytes) => ([(header::CONTENT_TYPE, "image/x-icon")], bytes).into_response(),
        Err(_) => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Backend liveness probe. Reports the underlying error text when the
/// database cannot be reached.
async fn health_db(State(state): State<AppState>) -> Response {
    match state.storage.ping().await {
        Ok(()) => Json(json!({
            "status": "ok",
            "database": "reachable",
        }))
        .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "database ping failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "status": "error",
                    "database": "unreachable",
                    "error": e.to_string(),
                })),
            )
                .into_response()
        }
    }
}

/// Observation day scan: one `MMDDYYYY` token resolved to a per-day shard.
async fn scan_day(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<Vec<ObservationRecord>>, GatewayError> {
    let parts = dates::parse_day_token(&date)?;
    let table = shard::day_table(&parts)?;
    info!(%date, %table, "scanning observation shard");

    let records = state.storage.scan_observations(&table).await?;
    Ok(Json(records))
}

/// Permit scan against a dedicated range shard.
async fn scan_permit_shard(
    State(state): State<AppState>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Json<Vec<PermitRecord>>, GatewayError> {
    scan_permits(state, start, end, RangeScheme::NamedShard).await
}

/// Permit scan against the static table, filtered by file date.
async fn scan_permit_window(
    State(state): State<AppState>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Json<Vec<PermitRecord>>, GatewayError> {
    scan_permits(state, start, end, RangeScheme::Filtered).await
}

async fn scan_permits(
    state: AppState,
    start: String,
    end: String,
    scheme: RangeScheme,
) -> Result<Json<Vec<PermitRecord>>, GatewayError> {
    dates::validate_range_token(&start)?;
    dates::validate_range_token(&end)?;

    let target = scheme.target(&start, &end);
    info!(%start, %end, table = target.table_name(), "scanning permit range");

    let records = state.storage.scan_permits(&target).await?;
    Ok(Json(records))
}

/// Registry dump: every known shard and its ingestion metadata.
async fn scanned_dates(
    State(state): State<AppState>,
) -> Result<Json<Vec<InventoryEntry>>, GatewayError> {
    let entries = state.storage.fetch_inventory().await?;
    Ok(Json(entries))
}
