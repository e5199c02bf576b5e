//! HTTP route handlers for Axum.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::Html,
    Json,
};
use tracing::{debug, error};

use crate::{
    api::types::{ClassifyQuery, ErrorBody, HealthDto, QueryPairs, TextQuery},
    error::NlpError,
    nlp::{
        ner::EntityGroup,
        sentiment::SentimentPrediction,
        zero_shot::{ZeroShotOutput, ZeroShotRequest},
    },
    ui,
};

use super::AppState;

pub const MISSING_TEXT: &str = "Missing 'text' parameter";
pub const MISSING_TEXT_OR_LABELS: &str = "Missing 'text' or 'labels' parameters";
pub const BAD_TEMPLATE: &str = "hypothesis_template must contain '{}'";

pub type ApiError = (StatusCode, Json<ErrorBody>);
type ApiResult<T> = Result<Json<T>, ApiError>;

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
}

/// Present and non-empty parameter value.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Query pairs, with undecodable query strings reported as JSON.
fn query_pairs(query: Result<Query<QueryPairs>, QueryRejection>) -> Result<QueryPairs, ApiError> {
    query
        .map(|Query(pairs)| pairs)
        .map_err(|rejection| api_error(StatusCode::BAD_REQUEST, rejection.body_text()))
}

fn check_length(text: &str, limit: usize) -> Result<(), ApiError> {
    if text.chars().count() > limit {
        return Err(api_error(
            StatusCode::PAYLOAD_TOO_LARGE,
            format!("'text' exceeds {limit} characters"),
        ));
    }
    Ok(())
}

/// Run CPU-bound inference off the async workers.
async fn run_blocking<T, F>(task: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, NlpError> + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(task).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => {
            error!(%err, "inference failed");
            Err(api_error(StatusCode::INTERNAL_SERVER_ERROR, err.to_string()))
        }
        Err(join) => {
            error!(%join, "inference task aborted");
            Err(api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "inference task aborted",
            ))
        }
    }
}

/// Landing page listing the endpoints.
pub async fn home(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    ui::render_home(state.pipelines.backend.as_str())
        .map(Html)
        .map_err(|err| {
            error!(%err, "rendering home page");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        })
}

pub async fn analyze(
    State(state): State<AppState>,
    query: Result<Query<QueryPairs>, QueryRejection>,
) -> ApiResult<SentimentPrediction> {
    let query = TextQuery::from_pairs(&query_pairs(query)?);
    let text = present(query.text)
        .ok_or_else(|| api_error(StatusCode::BAD_REQUEST, MISSING_TEXT))?;
    check_length(&text, state.settings.max_input_chars)?;

    let model = state.pipelines.sentiment.clone();
    let prediction = run_blocking(move || model.predict(&text)).await?;
    debug!(label = %prediction.label, score = prediction.score, "sentiment");
    Ok(Json(prediction))
}

pub async fn classify(
    State(state): State<AppState>,
    query: Result<Query<QueryPairs>, QueryRejection>,
) -> ApiResult<ZeroShotOutput> {
    let query = ClassifyQuery::from_pairs(&query_pairs(query)?)
        .map_err(|message| api_error(StatusCode::BAD_REQUEST, message))?;
    let text = present(query.text);
    let labels = query.labels;
    let (Some(text), false) = (text, labels.is_empty()) else {
        return Err(api_error(StatusCode::BAD_REQUEST, MISSING_TEXT_OR_LABELS));
    };
    check_length(&text, state.settings.max_input_chars)?;

    let template = present(query.hypothesis_template)
        .unwrap_or_else(|| state.settings.hypothesis_template.clone());
    if !template.contains("{}") {
        return Err(api_error(StatusCode::BAD_REQUEST, BAD_TEMPLATE));
    }
    let multi_label = query.multi_label.unwrap_or(false);

    let model = state.pipelines.zero_shot.clone();
    let output = run_blocking(move || {
        model.classify(&ZeroShotRequest {
            text: &text,
            labels: &labels,
            hypothesis_template: &template,
            multi_label,
        })
    })
    .await?;
    debug!(labels = output.labels.len(), multi_label, "zero-shot");
    Ok(Json(output))
}

pub async fn extract(
    State(state): State<AppState>,
    query: Result<Query<QueryPairs>, QueryRejection>,
) -> ApiResult<Vec<EntityGroup>> {
    let query = TextQuery::from_pairs(&query_pairs(query)?);
    let text = present(query.text)
        .ok_or_else(|| api_error(StatusCode::BAD_REQUEST, MISSING_TEXT))?;
    check_length(&text, state.settings.max_input_chars)?;

    let model = state.pipelines.ner.clone();
    let entities = run_blocking(move || model.extract(&text)).await?;
    debug!(entities = entities.len(), "ner");
    Ok(Json(entities))
}

pub async fn health(State(state): State<AppState>) -> Json<HealthDto> {
    Json(HealthDto {
        status: "ok",
        backend: state.pipelines.backend.to_string(),
        models: state.pipelines.models.clone(),
        started_at: state.started_at,
    })
}
