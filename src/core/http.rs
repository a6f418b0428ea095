//! HTTP endpoint server using Axum

use axum::{
    extract::{rejection::JsonRejection, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Json, Response},
    routing::{get, post, put},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{error, info, warn, Level};

use crate::config::Config;
use crate::core::session::{AnalysisSession, SessionCommand};
use crate::indicators::error::IndicatorError;
use crate::metrics::Metrics;
use crate::models::bar::PriceBar;
use crate::models::indicators::RsiSettings;
use crate::signals::engine::{MarketAnalysis, SignalEngine};

#[derive(Clone)]
pub struct AppState {
    pub health: Arc<RwLock<HealthStatus>>,
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
    pub config: Arc<Config>,
    pub session: Arc<RwLock<AnalysisSession>>,
}

impl AppState {
    pub fn new(config: Config, metrics: Arc<Metrics>) -> Self {
        let session = AnalysisSession::new(config.settings, config.insights.clone());
        Self {
            health: Arc::new(RwLock::new(HealthStatus::default())),
            metrics,
            start_time: Arc::new(Instant::now()),
            config: Arc::new(config),
            session: Arc::new(RwLock::new(session)),
        }
    }
}

#[derive(Clone, Debug)]
pub struct HealthStatus {
    pub status: String,
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}

/// Error reply carrying the message shown to the user.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl From<IndicatorError> for ApiError {
    fn from(e: IndicatorError) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let health = state.health.read().await;
    let uptime_seconds = state.start_time.elapsed().as_secs();
    Ok(Json(json!({
        "status": health.status,
        "uptime_seconds": uptime_seconds,
        "service": "confluence-engine",
        "symbol": state.config.symbol,
    })))
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Middleware to track HTTP request metrics
async fn metrics_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    state.metrics.http_requests_in_flight.inc();

    let response = next.run(request).await;
    let status = response.status();
    let duration = start.elapsed();

    state.metrics.http_requests_in_flight.dec();

    state.metrics.http_requests_total.inc();
    state
        .metrics
        .http_request_duration_seconds
        .observe(duration.as_secs_f64());

    if status.is_server_error() {
        error!(
            method = %method,
            path = %path,
            status = %status,
            duration_ms = duration.as_millis(),
            "HTTP request error"
        );
    }

    response
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub bars: Vec<PriceBar>,
    #[serde(default)]
    pub settings: Option<RsiSettings>,
}

fn analysis_response(analysis: Option<&MarketAnalysis>) -> Response {
    match analysis {
        Some(analysis) => Json(analysis).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

/// One-shot analysis of the posted bars; leaves the session untouched
async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<MarketAnalysis>, ApiError> {
    let Json(request) = payload?;
    let settings = request.settings.unwrap_or(state.config.settings);
    let analysis = SignalEngine::analyze(&request.bars, &settings, &state.config.insights)
        .map_err(|e| {
            warn!(error = %e, bars = request.bars.len(), "Analysis rejected");
            ApiError::from(e)
        })?;

    state.metrics.record_report(&analysis.report);
    Ok(Json(analysis))
}

async fn get_settings(State(state): State<AppState>) -> Json<RsiSettings> {
    Json(*state.session.read().await.settings())
}

async fn update_settings(
    State(state): State<AppState>,
    payload: Result<Json<RsiSettings>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(settings) = payload?;
    let mut session = state.session.write().await;
    let analysis = session.apply(SessionCommand::UpdateSettings(settings))?;
    if let Some(analysis) = analysis {
        state.metrics.record_report(&analysis.report);
    }
    info!(
        period = settings.period,
        smoothing = %settings.smoothing,
        "RSI settings updated"
    );
    Ok(analysis_response(analysis))
}

async fn replace_bars(
    State(state): State<AppState>,
    payload: Result<Json<Vec<PriceBar>>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(bars) = payload?;
    let mut session = state.session.write().await;
    let analysis = session.apply(SessionCommand::ReplaceBars(bars))?;
    if let Some(analysis) = analysis {
        state.metrics.record_report(&analysis.report);
    }
    Ok(analysis_response(analysis))
}

async fn get_analysis(State(state): State<AppState>) -> Response {
    let session = state.session.read().await;
    analysis_response(session.analysis())
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/api/analyze", post(analyze))
        .route("/api/settings", get(get_settings).put(update_settings))
        .route("/api/bars", put(replace_bars))
        .route("/api/analysis", get(get_analysis))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    metrics_middleware,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn start_server(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let port = config.port;
    let metrics = Arc::new(Metrics::new()?);
    let state = AppState::new(config, metrics);
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!(port = port, "HTTP server listening on port {}", port);
    info!(
        "Metrics endpoint available at http://0.0.0.0:{}/metrics",
        port
    );
    axum::serve(listener, app).await?;

    Ok(())
}
