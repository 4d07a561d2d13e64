//! Evaluation client: the seam between the orchestrator and the language model.
//!
//! `AppState` holds an `Arc<dyn EvaluationClient>`. Production uses
//! `LlmEvaluator`; router tests use an in-memory fake.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::evaluation::prompts::{ANSWER_CHECK_PERSONA, QUESTION_PERSONA};
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{LlmClient, LlmError};

pub const MAX_SCORE: f64 = 10.0;

#[derive(Debug, Error)]
pub enum EvaluationError {
    #[error("{0}")]
    Backend(String),

    #[error("malformed backend response: {0}")]
    Malformed(String),

    #[error("score {0} is outside the 0-10 scale")]
    ScoreOutOfRange(f64),
}

impl From<LlmError> for EvaluationError {
    fn from(e: LlmError) -> Self {
        match e {
            LlmError::Parse(e) => EvaluationError::Malformed(e.to_string()),
            e @ LlmError::EmptyContent => EvaluationError::Malformed(e.to_string()),
            other => EvaluationError::Backend(other.to_string()),
        }
    }
}

#[async_trait]
pub trait EvaluationClient: Send + Sync {
    /// Ordered questions; an empty list is a legitimate outcome, not an error.
    async fn generate_questions(&self, prompt: &str) -> Result<Vec<String>, EvaluationError>;

    /// Overall score on a 0–10 scale.
    async fn score_answers(&self, prompt: &str) -> Result<f64, EvaluationError>;
}

/// Question list as returned by the model: `{"questions": [...]}` or a bare array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum QuestionsPayload {
    Wrapped { questions: Vec<String> },
    Bare(Vec<String>),
}

impl QuestionsPayload {
    /// Trimmed, non-blank questions in model order.
    pub fn into_questions(self) -> Vec<String> {
        let raw = match self {
            QuestionsPayload::Wrapped { questions } | QuestionsPayload::Bare(questions) => {
                questions
            }
        };
        raw.into_iter()
            .map(|q| q.trim().to_string())
            .filter(|q| !q.is_empty())
            .collect()
    }
}

#[derive(Debug, Deserialize)]
pub struct ScorePayload {
    pub score: f64,
}

impl ScorePayload {
    pub fn into_score(self) -> Result<f64, EvaluationError> {
        if self.score.is_finite() && (0.0..=MAX_SCORE).contains(&self.score) {
            Ok(self.score)
        } else {
            Err(EvaluationError::ScoreOutOfRange(self.score))
        }
    }
}

pub struct LlmEvaluator {
    llm: LlmClient,
}

impl LlmEvaluator {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl EvaluationClient for LlmEvaluator {
    async fn generate_questions(&self, prompt: &str) -> Result<Vec<String>, EvaluationError> {
        let system = format!("{QUESTION_PERSONA} {JSON_ONLY_SYSTEM}");
        let payload: QuestionsPayload = self.llm.call_json(prompt, &system).await?;
        Ok(payload.into_questions())
    }

    async fn score_answers(&self, prompt: &str) -> Result<f64, EvaluationError> {
        let system = format!("{ANSWER_CHECK_PERSONA} {JSON_ONLY_SYSTEM}");
        let payload: ScorePayload = self.llm.call_json(prompt, &system).await?;
        payload.into_score()
    }
}
