//! Evaluation pipelines: validate → extract → prompt → evaluate → respond.
//!
//! Each operation is a straight line with early exits. Validation always runs to
//! completion before the extractor or the evaluation client is touched.

use chrono::Utc;
use serde_json::Value;
use tracing::{error, info, warn};

use crate::errors::AppError;
use crate::evaluation::evaluator::{EvaluationClient, EvaluationError};
use crate::evaluation::feedback::feedback_for_score;
use crate::evaluation::models::{
    AnswerSheet, CandidateParams, CompleteEvaluationResult, EvaluationResult, EvaluationStatus,
    QuestionGenerationRequest, QuestionOutcome, QuestionParams, QuestionsResponse,
    UploadMetadata,
};
use crate::evaluation::prompts::{build_answer_check_prompt, build_question_prompt};
use crate::evaluation::upload::UploadForm;
use crate::evaluation::validation::{
    parse_answer_sheet, parse_candidate_form, parse_question_params, require_pdf,
};
use crate::extraction::{extract_resume_text, DocumentTextExtractor};

/// `POST /questions` pipeline. `data` is the JSON parameter string.
pub async fn generate_questions(
    extractor: &dyn DocumentTextExtractor,
    evaluator: &dyn EvaluationClient,
    form: UploadForm,
    data: Option<&str>,
) -> Result<QuestionOutcome, AppError> {
    let file = require_pdf(form.file.as_ref())?;
    let params = parse_question_params(data)?;

    let metadata = UploadMetadata {
        file_name: file.file_name.clone(),
        file_size: file.bytes.len(),
        json_data: params.clone(),
    };

    let resume_text = extract_resume_text(extractor, file.bytes.clone()).await?;
    let request = QuestionGenerationRequest {
        resume_text,
        params,
    };

    let prompt = build_question_prompt(&request);
    info!("Generated prompt for questions, length: {}", prompt.len());

    let questions = request_questions(evaluator, &prompt, &request.params)
        .await
        .map_err(|e| {
            error!("Error generating questions: {e}");
            AppError::EvaluationFailure(format!("Failed to generate questions: {e}"))
        })?;

    if questions.is_empty() {
        warn!("No questions were generated");
        return Ok(QuestionOutcome::NoQuestions);
    }

    info!(count = questions.len(), "Questions generated");
    Ok(QuestionOutcome::Generated(QuestionsResponse {
        metadata,
        count: questions.len(),
        questions,
    }))
}

/// `POST /check-answers` pipeline.
pub async fn check_answers(
    evaluator: &dyn EvaluationClient,
    payload: &Value,
) -> Result<EvaluationResult, AppError> {
    let answers = parse_answer_sheet(payload)?;

    let score = score_sheet(evaluator, &answers).await.map_err(|e| {
        error!("Evaluation error: {e}");
        AppError::EvaluationFailure(format!("Evaluation failed: {e}"))
    })?;

    Ok(EvaluationResult {
        score,
        feedback: feedback_for_score(score).to_string(),
        evaluated_answers: answers.len(),
        status: EvaluationStatus::Success,
    })
}

/// `POST /complete-evaluation` pipeline.
pub async fn complete_evaluation(
    extractor: &dyn DocumentTextExtractor,
    evaluator: &dyn EvaluationClient,
    form: UploadForm,
) -> Result<CompleteEvaluationResult, AppError> {
    let file = require_pdf(form.file.as_ref())?;
    let params = parse_candidate_form(&form)?;

    let resume_text = extract_resume_text(extractor, file.bytes.clone()).await?;

    let result = evaluate_candidate(evaluator, &resume_text, params).await;
    if result.status == EvaluationStatus::Error {
        let message = result
            .error
            .unwrap_or_else(|| "Candidate evaluation failed".to_string());
        error!("Candidate evaluation failed: {message}");
        return Err(AppError::EvaluationFailure(message));
    }

    Ok(result)
}

/// Generates questions from the résumé, then scores the supplied answers.
///
/// Never fails: backend errors are reported through `status: error` with the
/// message embedded, and whatever was produced before the failure is kept.
pub async fn evaluate_candidate(
    evaluator: &dyn EvaluationClient,
    resume_text: &str,
    params: CandidateParams,
) -> CompleteEvaluationResult {
    let CandidateParams {
        tech_stack,
        difficulty,
        question_count,
        answers,
    } = params;

    let mut result = CompleteEvaluationResult {
        status: EvaluationStatus::Success,
        error: None,
        tech_stack,
        difficulty,
        question_count,
        questions: Vec::new(),
        score: None,
        feedback: None,
        evaluated_answers: answers.len(),
        evaluated_at: Utc::now(),
    };

    let request = QuestionGenerationRequest {
        resume_text: resume_text.to_string(),
        params: QuestionParams {
            tech_stack: result.tech_stack.clone(),
            difficulty_level: difficulty,
            question_count,
        },
    };
    let prompt = build_question_prompt(&request);

    match request_questions(evaluator, &prompt, &request.params).await {
        Ok(questions) => {
            if questions.is_empty() {
                warn!("No questions were generated for candidate evaluation");
            }
            result.questions = questions;
        }
        Err(e) => {
            result.status = EvaluationStatus::Error;
            result.error = Some(format!("Failed to generate questions: {e}"));
            return result;
        }
    }

    match score_sheet(evaluator, &answers).await {
        Ok(score) => {
            result.score = Some(score);
            result.feedback = Some(feedback_for_score(score).to_string());
        }
        Err(e) => {
            result.status = EvaluationStatus::Error;
            result.error = Some(format!("Evaluation failed: {e}"));
        }
    }

    result
}

/// Calls the backend and caps the list at the requested count.
async fn request_questions(
    evaluator: &dyn EvaluationClient,
    prompt: &str,
    params: &QuestionParams,
) -> Result<Vec<String>, EvaluationError> {
    let mut questions = evaluator.generate_questions(prompt).await?;
    questions.truncate(usize::from(params.question_count));
    Ok(questions)
}

async fn score_sheet(
    evaluator: &dyn EvaluationClient,
    answers: &AnswerSheet,
) -> Result<f64, EvaluationError> {
    let prompt = build_answer_check_prompt(answers);
    info!(
        answers = answers.len(),
        "Scoring answers, prompt length: {}",
        prompt.len()
    );
    evaluator.score_answers(&prompt).await
}
