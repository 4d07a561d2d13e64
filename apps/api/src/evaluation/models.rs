//! Request-scoped value objects for question generation and answer evaluation.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Validated `/questions` payload, before the résumé has been read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionParams {
    pub tech_stack: String,
    pub difficulty_level: u8,
    pub question_count: u8,
}

/// Everything the question prompt needs. Only built once extraction succeeded.
#[derive(Debug, Clone)]
pub struct QuestionGenerationRequest {
    pub resume_text: String,
    pub params: QuestionParams,
}

/// A single question and the candidate's answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionAnswer {
    pub question: String,
    pub answer: String,
}

/// Non-empty, order-preserving question → answer mapping with no blank answers.
#[derive(Debug, Clone)]
pub struct AnswerSheet {
    entries: Vec<QuestionAnswer>,
}

impl AnswerSheet {
    /// Only the validator builds sheets, so the invariants hold everywhere else.
    pub(crate) fn new(entries: Vec<QuestionAnswer>) -> Self {
        debug_assert!(!entries.is_empty());
        Self { entries }
    }

    pub fn entries(&self) -> &[QuestionAnswer] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Validated `/complete-evaluation` form, before the résumé has been read.
#[derive(Debug, Clone)]
pub struct CandidateParams {
    pub tech_stack: String,
    pub difficulty: u8,
    pub question_count: u8,
    pub answers: AnswerSheet,
}

#[derive(Debug, Clone, Serialize)]
pub struct UploadMetadata {
    pub file_name: Option<String>,
    pub file_size: usize,
    pub json_data: QuestionParams,
}

/// Successful `/questions` body.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionsResponse {
    pub metadata: UploadMetadata,
    pub questions: Vec<String>,
    pub count: usize,
}

/// Outcome of the question-generation pipeline. `NoQuestions` is a success.
#[derive(Debug, Clone)]
pub enum QuestionOutcome {
    Generated(QuestionsResponse),
    NoQuestions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EvaluationStatus {
    Success,
    Error,
}

/// `/check-answers` body.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationResult {
    pub score: f64,
    pub feedback: String,
    pub evaluated_answers: usize,
    pub status: EvaluationStatus,
}

/// `/complete-evaluation` body. `error` is only present when `status` is `error`.
#[derive(Debug, Clone, Serialize)]
pub struct CompleteEvaluationResult {
    pub status: EvaluationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub tech_stack: String,
    pub difficulty: u8,
    pub question_count: u8,
    pub questions: Vec<String>,
    pub score: Option<f64>,
    pub feedback: Option<String>,
    pub evaluated_answers: usize,
    pub evaluated_at: DateTime<Utc>,
}
