use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use super::alerts::NewAlert;
use super::analysis::{AnalysisOracle, AnalysisType, ChatMessage, OracleError};
use super::domain::EmployeeId;
use super::repository::{RepositoryError, RosterRepository};
use super::roster::RosterImporter;
use super::scoring::WeightConfiguration;
use super::service::{RecognitionService, RecognitionServiceError};
use crate::error::AppError;

#[derive(Debug, Deserialize)]
pub(crate) struct AnalysisPayload {
    #[serde(default)]
    pub(crate) analysis_type: Option<AnalysisType>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WeightProfilePayload {
    #[serde(default = "default_profile_name")]
    pub(crate) name: String,
    pub(crate) weights: WeightConfiguration,
    #[serde(default = "default_is_default")]
    pub(crate) is_default: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatPayload {
    pub(crate) message: String,
    #[serde(default)]
    pub(crate) history: Vec<ChatMessage>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct AlertQuery {
    #[serde(default)]
    pub(crate) unread_only: bool,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ImportQuery {
    #[serde(default)]
    pub(crate) as_of: Option<NaiveDate>,
}

fn default_profile_name() -> String {
    "default".to_string()
}

fn default_is_default() -> bool {
    true
}

/// Router builder exposing the roster, scoring and analytics endpoints.
pub fn recognition_router<R, O>(service: Arc<RecognitionService<R, O>>) -> Router
where
    R: RosterRepository + 'static,
    O: AnalysisOracle + 'static,
{
    Router::new()
        .route("/api/v1/employees", get(list_handler::<R, O>))
        .route("/api/v1/employees/:employee_id", get(employee_handler::<R, O>))
        .route(
            "/api/v1/employees/:employee_id/score",
            get(score_handler::<R, O>).post(what_if_handler::<R, O>),
        )
        .route(
            "/api/v1/employees/:employee_id/report",
            get(report_handler::<R, O>),
        )
        .route(
            "/api/v1/employees/:employee_id/analysis",
            get(analysis_history_handler::<R, O>).post(analysis_handler::<R, O>),
        )
        .route(
            "/api/v1/scores/recalculate",
            post(recalculate_handler::<R, O>),
        )
        .route(
            "/api/v1/weights",
            get(weights_handler::<R, O>).put(save_weights_handler::<R, O>),
        )
        .route(
            "/api/v1/weights/profiles",
            get(weight_profiles_handler::<R, O>),
        )
        .route("/api/v1/roster/import", post(import_handler::<R, O>))
        .route(
            "/api/v1/alerts",
            get(alerts_handler::<R, O>).post(create_alert_handler::<R, O>),
        )
        .route(
            "/api/v1/alerts/:alert_id/read",
            post(mark_alert_read_handler::<R, O>),
        )
        .route("/api/v1/chat", post(chat_handler::<R, O>))
        .route("/api/v1/chat/status", get(chat_status_handler::<R, O>))
        .route("/api/v1/dashboard", get(dashboard_handler::<R, O>))
        .route("/api/v1/promotions", get(promotions_handler::<R, O>))
        .route("/api/v1/budget", get(budget_handler::<R, O>))
        .with_state(service)
}

pub(crate) async fn list_handler<R, O>(
    State(service): State<Arc<RecognitionService<R, O>>>,
) -> Response
where
    R: RosterRepository + 'static,
    O: AnalysisOracle + 'static,
{
    match service.employees() {
        Ok(employees) => (StatusCode::OK, axum::Json(employees)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn employee_handler<R, O>(
    State(service): State<Arc<RecognitionService<R, O>>>,
    Path(employee_id): Path<String>,
) -> Response
where
    R: RosterRepository + 'static,
    O: AnalysisOracle + 'static,
{
    match service.employee(&EmployeeId(employee_id)) {
        Ok(employee) => (StatusCode::OK, axum::Json(employee)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn score_handler<R, O>(
    State(service): State<Arc<RecognitionService<R, O>>>,
    Path(employee_id): Path<String>,
) -> Response
where
    R: RosterRepository + 'static,
    O: AnalysisOracle + 'static,
{
    match service.breakdown(&EmployeeId(employee_id), None) {
        Ok(breakdown) => (StatusCode::OK, axum::Json(breakdown)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn what_if_handler<R, O>(
    State(service): State<Arc<RecognitionService<R, O>>>,
    Path(employee_id): Path<String>,
    axum::Json(weights): axum::Json<WeightConfiguration>,
) -> Response
where
    R: RosterRepository + 'static,
    O: AnalysisOracle + 'static,
{
    match service.breakdown(&EmployeeId(employee_id), Some(weights)) {
        Ok(breakdown) => (StatusCode::OK, axum::Json(breakdown)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn report_handler<R, O>(
    State(service): State<Arc<RecognitionService<R, O>>>,
    Path(employee_id): Path<String>,
) -> Response
where
    R: RosterRepository + 'static,
    O: AnalysisOracle + 'static,
{
    match service.report(&EmployeeId(employee_id)) {
        Ok(report) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/markdown; charset=utf-8")],
            report,
        )
            .into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn analysis_handler<R, O>(
    State(service): State<Arc<RecognitionService<R, O>>>,
    Path(employee_id): Path<String>,
    axum::Json(payload): axum::Json<AnalysisPayload>,
) -> Response
where
    R: RosterRepository + 'static,
    O: AnalysisOracle + 'static,
{
    let analysis_type = payload.analysis_type.unwrap_or(AnalysisType::Recognition);
    let id = EmployeeId(employee_id);
    match off_runtime(move || service.analyze(&id, analysis_type)).await {
        Ok(record) => (StatusCode::CREATED, axum::Json(record)).into_response(),
        Err(response) => response,
    }
}

pub(crate) async fn analysis_history_handler<R, O>(
    State(service): State<Arc<RecognitionService<R, O>>>,
    Path(employee_id): Path<String>,
) -> Response
where
    R: RosterRepository + 'static,
    O: AnalysisOracle + 'static,
{
    match service.analysis_history(&EmployeeId(employee_id)) {
        Ok(history) => (StatusCode::OK, axum::Json(history)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn recalculate_handler<R, O>(
    State(service): State<Arc<RecognitionService<R, O>>>,
) -> Response
where
    R: RosterRepository + 'static,
    O: AnalysisOracle + 'static,
{
    match service.recalculate_all() {
        Ok(count) => {
            let payload = json!({ "recalculated": count });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn weights_handler<R, O>(
    State(service): State<Arc<RecognitionService<R, O>>>,
) -> Response
where
    R: RosterRepository + 'static,
    O: AnalysisOracle + 'static,
{
    match service.weights() {
        Ok(weights) => (StatusCode::OK, axum::Json(weights)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn save_weights_handler<R, O>(
    State(service): State<Arc<RecognitionService<R, O>>>,
    axum::Json(payload): axum::Json<WeightProfilePayload>,
) -> Response
where
    R: RosterRepository + 'static,
    O: AnalysisOracle + 'static,
{
    match service.save_weights(payload.name, payload.weights, payload.is_default) {
        Ok(profile) => (StatusCode::OK, axum::Json(profile)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn weight_profiles_handler<R, O>(
    State(service): State<Arc<RecognitionService<R, O>>>,
) -> Response
where
    R: RosterRepository + 'static,
    O: AnalysisOracle + 'static,
{
    match service.weight_profiles() {
        Ok(profiles) => (StatusCode::OK, axum::Json(profiles)).into_response(),
        Err(error) => error_response(error),
    }
}

/// Imports a CSV roster export posted as the request body.
pub(crate) async fn import_handler<R, O>(
    State(service): State<Arc<RecognitionService<R, O>>>,
    Query(query): Query<ImportQuery>,
    body: String,
) -> Result<Response, AppError>
where
    R: RosterRepository + 'static,
    O: AnalysisOracle + 'static,
{
    let as_of = query.as_of.unwrap_or_else(|| Utc::now().date_naive());
    let records = RosterImporter::from_reader(body.as_bytes(), as_of)?;
    let imported = service.import(records)?;
    Ok((StatusCode::CREATED, axum::Json(json!({ "imported": imported }))).into_response())
}

pub(crate) async fn alerts_handler<R, O>(
    State(service): State<Arc<RecognitionService<R, O>>>,
    Query(query): Query<AlertQuery>,
) -> Response
where
    R: RosterRepository + 'static,
    O: AnalysisOracle + 'static,
{
    match service.alerts(query.unread_only) {
        Ok(feed) => (StatusCode::OK, axum::Json(feed)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn create_alert_handler<R, O>(
    State(service): State<Arc<RecognitionService<R, O>>>,
    axum::Json(alert): axum::Json<NewAlert>,
) -> Response
where
    R: RosterRepository + 'static,
    O: AnalysisOracle + 'static,
{
    match service.create_alert(alert) {
        Ok(alert) => (StatusCode::CREATED, axum::Json(alert)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn mark_alert_read_handler<R, O>(
    State(service): State<Arc<RecognitionService<R, O>>>,
    Path(alert_id): Path<u64>,
) -> Response
where
    R: RosterRepository + 'static,
    O: AnalysisOracle + 'static,
{
    match service.mark_alert_read(alert_id) {
        Ok(alert) => (StatusCode::OK, axum::Json(alert)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn chat_handler<R, O>(
    State(service): State<Arc<RecognitionService<R, O>>>,
    axum::Json(payload): axum::Json<ChatPayload>,
) -> Response
where
    R: RosterRepository + 'static,
    O: AnalysisOracle + 'static,
{
    let ChatPayload { message, history } = payload;
    match off_runtime(move || service.chat(&message, history)).await {
        Ok(reply) => (StatusCode::OK, axum::Json(json!({ "reply": reply }))).into_response(),
        Err(response) => response,
    }
}

pub(crate) async fn chat_status_handler<R, O>(
    State(service): State<Arc<RecognitionService<R, O>>>,
) -> Response
where
    R: RosterRepository + 'static,
    O: AnalysisOracle + 'static,
{
    match off_runtime(move || Ok(service.oracle_status())).await {
        Ok(status) => (StatusCode::OK, axum::Json(status)).into_response(),
        Err(response) => response,
    }
}

pub(crate) async fn dashboard_handler<R, O>(
    State(service): State<Arc<RecognitionService<R, O>>>,
) -> Response
where
    R: RosterRepository + 'static,
    O: AnalysisOracle + 'static,
{
    match service.dashboard() {
        Ok(metrics) => (StatusCode::OK, axum::Json(metrics)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn promotions_handler<R, O>(
    State(service): State<Arc<RecognitionService<R, O>>>,
) -> Response
where
    R: RosterRepository + 'static,
    O: AnalysisOracle + 'static,
{
    match service.promotions() {
        Ok(candidates) => (StatusCode::OK, axum::Json(candidates)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn budget_handler<R, O>(
    State(service): State<Arc<RecognitionService<R, O>>>,
) -> Response
where
    R: RosterRepository + 'static,
    O: AnalysisOracle + 'static,
{
    match service.budget() {
        Ok(analysis) => (StatusCode::OK, axum::Json(analysis)).into_response(),
        Err(error) => error_response(error),
    }
}

/// Runs an oracle-backed call on the blocking pool so the model round trip never
/// stalls a runtime worker.
async fn off_runtime<T, F>(task: F) -> Result<T, Response>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, RecognitionServiceError> + Send + 'static,
{
    match tokio::task::spawn_blocking(task).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(error)) => Err(error_response(error)),
        Err(join_error) => {
            warn!(%join_error, "oracle task aborted");
            let payload = json!({ "error": "oracle task aborted" });
            Err((StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response())
        }
    }
}

impl RecognitionServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
            Self::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
            Self::Repository(RepositoryError::Unavailable(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Weights(_) | Self::InvalidRequest(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Oracle(OracleError::NotConfigured) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Oracle(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

fn error_response(error: RecognitionServiceError) -> Response {
    let payload = json!({
        "error": error.to_string(),
    });
    (error.status_code(), axum::Json(payload)).into_response()
}
