//! Axum route handlers for the evaluation API.

use axum::{
    extract::{
        multipart::MultipartRejection,
        rejection::{JsonRejection, QueryRejection},
        Multipart, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use crate::errors::AppError;
use crate::evaluation::models::{CompleteEvaluationResult, EvaluationResult, QuestionOutcome};
use crate::evaluation::orchestrator;
use crate::evaluation::upload::{read_upload, UploadForm};
use crate::state::AppState;

/// Name of the multipart field (or query parameter) carrying the `/questions` JSON.
const DATA_FIELD: &str = "data";

#[derive(Debug, Default, Deserialize)]
pub struct DataQuery {
    pub data: Option<String>,
}

/// POST /questions
///
/// Multipart: `file` (PDF résumé) and `data`, a JSON string with `techStack`,
/// `difficultyLevel` and `questionCount`. `data` may also be sent as a query parameter.
pub async fn handle_questions(
    State(state): State<AppState>,
    query: Result<Query<DataQuery>, QueryRejection>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, AppError> {
    let Query(query) = query.map_err(|e| {
        AppError::InvalidInput(format!("Invalid query string: {}", e.body_text()))
    })?;
    let form = read_form(multipart).await?;
    let data = form
        .field(DATA_FIELD)
        .map(str::to_string)
        .or(query.data);

    let outcome = orchestrator::generate_questions(
        state.extractor.as_ref(),
        state.evaluator.as_ref(),
        form,
        data.as_deref(),
    )
    .await?;

    Ok(match outcome {
        QuestionOutcome::Generated(response) => Json(response).into_response(),
        // 204 carries no body; clients only see the status.
        QuestionOutcome::NoQuestions => StatusCode::NO_CONTENT.into_response(),
    })
}

/// POST /check-answers
///
/// Body: JSON object mapping each question to the candidate's answer.
pub async fn handle_check_answers(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<EvaluationResult>, AppError> {
    let Json(payload) = payload.map_err(|e| {
        AppError::InvalidInput(format!(
            "Data must be a dictionary mapping questions to answers: {}",
            e.body_text()
        ))
    })?;

    let result = orchestrator::check_answers(state.evaluator.as_ref(), &payload).await?;
    Ok(Json(result))
}

/// POST /complete-evaluation
///
/// Multipart: `file` plus text fields `tech_stack`, `difficulty`, `question_count`
/// and `answers` (JSON object string).
pub async fn handle_complete_evaluation(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<CompleteEvaluationResult>, AppError> {
    let form = read_form(multipart).await?;
    let result = orchestrator::complete_evaluation(
        state.extractor.as_ref(),
        state.evaluator.as_ref(),
        form,
    )
    .await?;
    Ok(Json(result))
}

async fn read_form(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<UploadForm, AppError> {
    let multipart = multipart.map_err(|e| {
        AppError::InvalidInput(format!("Expected a multipart/form-data body: {}", e.body_text()))
    })?;
    read_upload(multipart).await
}
