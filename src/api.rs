// Analytics HTTP API - REST endpoints with Axum
//
// Every query endpoint reads the processor's current dataset; POST
// /data/reload is the only write.

use crate::aggregation::SalesStatistics;
use crate::error::AnalyticsError;
use crate::processor::{ProcessorState, SalesProcessor};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

pub const SERVICE_NAME: &str = "analytics-service";

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub processor: Arc<SalesProcessor>,
    /// File re-read by POST /data/reload
    pub data_path: PathBuf,
}

impl AppState {
    pub fn new(processor: Arc<SalesProcessor>, data_path: impl Into<PathBuf>) -> Self {
        AppState {
            processor,
            data_path: data_path.into(),
        }
    }
}

// ============================================================================
// Response bodies
// ============================================================================

#[derive(Serialize, Deserialize)]
struct StatusResponse {
    status: String,
    service: String,
}

#[derive(Serialize, Deserialize)]
struct TotalRevenueResponse {
    total_revenue: f64,
}

#[derive(Serialize, Deserialize)]
struct PopularProductResponse {
    most_popular_product: String,
}

#[derive(Serialize, Deserialize)]
struct MessageResponse {
    message: String,
}

#[derive(Serialize, Deserialize)]
struct ReloadResponse {
    message: String,
    count: usize,
}

#[derive(Serialize, Deserialize)]
struct ErrorResponse {
    detail: String,
}

/// Current dataset, for GET /data/status
#[derive(Serialize)]
struct DataStatusResponse {
    state: ProcessorState,
    record_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    loaded_at: Option<DateTime<Utc>>,
}

fn error_response(status: StatusCode, detail: impl Into<String>) -> Response {
    (status, Json(ErrorResponse { detail: detail.into() })).into_response()
}

// ============================================================================
// Handlers
// ============================================================================

/// GET / - Service status
async fn service_status() -> impl IntoResponse {
    Json(StatusResponse {
        status: "online".to_string(),
        service: SERVICE_NAME.to_string(),
    })
}

/// GET /analytics/revenue/total
async fn get_total_revenue(State(state): State<AppState>) -> impl IntoResponse {
    Json(TotalRevenueResponse {
        total_revenue: state.processor.total_revenue(),
    })
}

/// GET /analytics/revenue/category
async fn get_revenue_by_category(State(state): State<AppState>) -> Json<BTreeMap<String, f64>> {
    Json(state.processor.revenue_by_category())
}

/// GET /analytics/products/top-sale - the record, or a message when empty
async fn get_top_sale(State(state): State<AppState>) -> Response {
    match state.processor.top_performing_sale() {
        Some(sale) => Json(sale).into_response(),
        None => Json(MessageResponse {
            message: "No sales data".to_string(),
        })
        .into_response(),
    }
}

/// GET /analytics/products/popular
async fn get_popular_product(State(state): State<AppState>) -> impl IntoResponse {
    Json(PopularProductResponse {
        most_popular_product: state.processor.most_popular_product(),
    })
}

/// GET /analytics/stats
async fn get_stats(State(state): State<AppState>) -> Json<SalesStatistics> {
    Json(state.processor.sales_statistics())
}

/// GET /analytics/summary - all views in one response
async fn get_summary(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.processor.summary())
}

/// GET /data/status - Empty/Loaded state and where the data came from
async fn get_data_status(State(state): State<AppState>) -> impl IntoResponse {
    let processor = &state.processor;
    Json(DataStatusResponse {
        state: processor.state(),
        record_count: processor.len(),
        source: processor.source().map(|p| p.display().to_string()),
        loaded_at: processor.loaded_at(),
    })
}

/// POST /data/reload - Re-read the data file; previous data survives any failure
async fn reload_data(State(state): State<AppState>) -> Response {
    match state.processor.load(&state.data_path) {
        Ok(count) => {
            info!(count, "data reloaded via API");
            (
                StatusCode::OK,
                Json(ReloadResponse {
                    message: "Data reloaded".to_string(),
                    count,
                }),
            )
                .into_response()
        }
        Err(AnalyticsError::NotFound { .. }) => {
            error_response(StatusCode::NOT_FOUND, "Data file not found")
        }
        Err(e) if e.is_parse() => error_response(StatusCode::UNPROCESSABLE_ENTITY, e.to_string()),
        Err(e) => {
            warn!(error = %e, "reload failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn router(state: AppState) -> Router {
    let analytics_routes = Router::new()
        .route("/revenue/total", get(get_total_revenue))
        .route("/revenue/category", get(get_revenue_by_category))
        .route("/products/top-sale", get(get_top_sale))
        .route("/products/popular", get(get_popular_product))
        .route("/stats", get(get_stats))
        .route("/summary", get(get_summary));

    Router::new()
        .route("/", get(service_status))
        .nest("/analytics", analytics_routes)
        .route("/data/status", get(get_data_status))
        .route("/data/reload", post(reload_data))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ============================================================================
// TESTS
// ============================================================================
