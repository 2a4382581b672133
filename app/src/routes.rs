//! FILENAME: app/src/routes.rs
//! HTTP routes for the dashboard API.
//!
//! Every core output is its own endpoint so the frontend (or a test
//! harness) can fetch each panel's data independently; `/api/dashboard`
//! bundles the full snapshot for a single-request render.

use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::api_types::{
    CategoriesResponse, DashboardQuery, DashboardResponse, KpiResponse, OverviewResponse,
    ProductsResponse, RegionsResponse, ScatterResponse, SubCategoriesResponse, TableResponse,
    TimeSeriesResponse,
};
use crate::AppState;
use dataset::{Dataset, ParseChoiceError};
use kpi_engine::{DashboardSnapshot, FilterOptions, KpiSummary, MarginGauge, TOP_PRODUCT_LIMIT};
use persistence::PersistenceError;

pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/filters", get(filters))
        .route("/api/kpis", get(kpis))
        .route("/api/timeseries", get(timeseries))
        .route("/api/products", get(products))
        .route("/api/regions", get(regions))
        .route("/api/categories", get(categories))
        .route("/api/subcategories", get(sub_categories))
        .route("/api/scatter", get(scatter))
        .route("/api/overview", get(overview))
        .route("/api/dashboard", get(dashboard))
        .route("/api/export", get(export))
        .layer(cors)
        .with_state(state)
}

// ============================================================================
// ERROR TYPE
// ============================================================================

/// Handler error: load failures surface as 500, bad query choices as 400.
pub struct AppError {
    status: StatusCode,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({ "error": self.message }));
        (self.status, body).into_response()
    }
}

impl From<PersistenceError> for AppError {
    fn from(e: PersistenceError) -> Self {
        tracing::error!("dataset unavailable: {e}");
        AppError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: e.to_string(),
        }
    }
}

impl From<ParseChoiceError> for AppError {
    fn from(e: ParseChoiceError) -> Self {
        AppError {
            status: StatusCode::BAD_REQUEST,
            message: e.to_string(),
        }
    }
}

// ============================================================================
// HANDLERS
// ============================================================================

/// Filters the source dataset once for the current request. Returns the
/// working dataset and any rendered warnings.
fn prepare(state: &AppState, query: &DashboardQuery) -> Result<(Dataset, Vec<String>), AppError> {
    let source = state.dataset()?;
    let selection = query.selection();
    let warnings = kpi_engine::validate(&selection)
        .iter()
        .map(|w| w.to_string())
        .collect();
    let working = kpi_engine::apply(&source, &selection);
    Ok((working, warnings))
}

async fn filters(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<FilterOptions>, AppError> {
    let source = state.dataset()?;
    let selection = query.selection();
    Ok(Json(kpi_engine::cascade_options(&source, &selection)))
}

async fn kpis(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<KpiResponse>, AppError> {
    let (working, warnings) = prepare(&state, &query)?;
    let summary = KpiSummary::compute(&working);
    Ok(Json(KpiResponse {
        row_count: working.len(),
        tiles: summary.tiles(),
        gauge: MarginGauge::from_summary(&summary),
        kpis: summary,
        warnings,
    }))
}

async fn timeseries(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<TimeSeriesResponse>, AppError> {
    let granularity = query.granularity()?;
    let metric = query.metric()?;
    let (working, warnings) = prepare(&state, &query)?;
    Ok(Json(TimeSeriesResponse {
        granularity: granularity.label(),
        metric: metric.label(),
        rolling_window: granularity.rolling_window(),
        buckets: kpi_engine::resample(&working, granularity, metric),
        warnings,
    }))
}

async fn products(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<ProductsResponse>, AppError> {
    let metric = query.metric()?;
    let (working, warnings) = prepare(&state, &query)?;
    Ok(Json(ProductsResponse {
        metric: metric.label(),
        products: kpi_engine::top_products(&working, metric, TOP_PRODUCT_LIMIT),
        warnings,
    }))
}

async fn regions(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<RegionsResponse>, AppError> {
    let (working, warnings) = prepare(&state, &query)?;
    Ok(Json(TableResponse {
        rows: kpi_engine::sales_by_region(&working),
        warnings,
    }))
}

async fn categories(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<CategoriesResponse>, AppError> {
    let (working, warnings) = prepare(&state, &query)?;
    Ok(Json(TableResponse {
        rows: kpi_engine::profit_by_category(&working),
        warnings,
    }))
}

async fn sub_categories(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<SubCategoriesResponse>, AppError> {
    let (working, warnings) = prepare(&state, &query)?;
    Ok(Json(TableResponse {
        rows: kpi_engine::sales_by_sub_category(&working),
        warnings,
    }))
}

async fn scatter(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<ScatterResponse>, AppError> {
    let (working, warnings) = prepare(&state, &query)?;
    Ok(Json(TableResponse {
        rows: kpi_engine::discount_margin_points(&working),
        warnings,
    }))
}

async fn overview(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<OverviewResponse>, AppError> {
    let (working, warnings) = prepare(&state, &query)?;
    Ok(Json(OverviewResponse {
        buckets: kpi_engine::monthly_overview(&working),
        warnings,
    }))
}

async fn dashboard(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DashboardResponse>, AppError> {
    let granularity = query.granularity()?;
    let metric = query.metric()?;
    let theme = query.theme()?;
    let source = state.dataset()?;
    let selection = query.selection();
    let snapshot = DashboardSnapshot::compute(&source, &selection, granularity, metric);
    Ok(Json(DashboardResponse {
        template: theme.template(),
        snapshot,
    }))
}

/// CSV download of the current working dataset.
async fn export(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DashboardQuery>,
) -> Result<Response, AppError> {
    let (working, _) = prepare(&state, &query)?;
    let bytes = persistence::write_csv(&working)?;

    let headers = [
        (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", persistence::EXPORT_FILE_NAME),
        ),
    ];
    Ok((headers, bytes).into_response())
}
