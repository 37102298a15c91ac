//! HTTP surface: the analysis page plus JSON endpoints over the shared table.

pub mod page;

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::chart::{ChartRenderer, ChartSpec};
use crate::model::record::Table;
use crate::query::{top_k_by_year, trend_for_entity, TopKResult, TrendResult, TOP_K};
use crate::shell::{analyze, Analysis, AnalysisRequest, YearInput, KNOWN_ENTITIES};

#[derive(Clone)]
pub struct AppState {
    pub table: Arc<Table>,
    pub renderer: Arc<ChartRenderer>,
}

impl AppState {
    pub fn new(table: Table, renderer: ChartRenderer) -> Self {
        Self { table: Arc::new(table), renderer: Arc::new(renderer) }
    }
}

#[derive(Debug, Deserialize)]
pub struct YearQuery {
    year: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CountryQuery {
    country: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChartResponse<R> {
    pub result: R,
    pub chart: ChartSpec,
}

type ApiError = (StatusCode, Json<serde_json::Value>);

fn bad_request(msg: impl Into<String>) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": msg.into() })))
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/healthz", get(healthz))
        .route("/analysis", post(run_analysis))
        .route("/top_emitters", get(top_emitters))
        .route("/trend", get(trend))
        .route("/countries", get(countries))
        .with_state(state)
}

async fn healthz(State(st): State<AppState>) -> impl IntoResponse {
    Json(json!({ "ok": true, "records": st.table.len() }))
}

// Without any query parameters the form has not been submitted yet.
async fn index(State(st): State<AppState>, Query(req): Query<AnalysisRequest>) -> Html<String> {
    let submitted = req.year.is_some() || req.country.is_some();
    let analysis = submitted.then(|| analyze(&st.table, &st.renderer, &req));
    Html(page::render_page(&st.renderer.labels, &req, analysis.as_ref()))
}

async fn run_analysis(State(st): State<AppState>, Json(req): Json<AnalysisRequest>) -> Json<Analysis> {
    Json(analyze(&st.table, &st.renderer, &req))
}

async fn top_emitters(
    State(st): State<AppState>,
    Query(q): Query<YearQuery>,
) -> Result<Json<ChartResponse<TopKResult>>, ApiError> {
    let year = match YearInput::parse(q.year.as_deref()) {
        YearInput::Year(y) => y,
        YearInput::Absent => return Err(bad_request("missing 'year'")),
        YearInput::Invalid(raw) => return Err(bad_request(format!("invalid year '{raw}'"))),
    };
    let result = top_k_by_year(&st.table, year, TOP_K);
    let chart = st.renderer.render_top_k(&result);
    Ok(Json(ChartResponse { result, chart }))
}

async fn trend(
    State(st): State<AppState>,
    Query(q): Query<CountryQuery>,
) -> Result<Json<ChartResponse<TrendResult>>, ApiError> {
    let entity = q
        .country
        .filter(|c| !c.is_empty())
        .ok_or_else(|| bad_request("missing 'country'"))?;
    let result = trend_for_entity(&st.table, &entity);
    let chart = st.renderer.render_trend(&result);
    Ok(Json(ChartResponse { result, chart }))
}

async fn countries() -> Json<[&'static str; 20]> {
    Json(KNOWN_ENTITIES)
}
