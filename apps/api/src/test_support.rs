//! In-memory collaborators that record how often they were called.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;

use crate::evaluation::evaluator::{EvaluationClient, EvaluationError};
use crate::extraction::{DocumentTextExtractor, ExtractionError};

pub const RESUME_TEXT: &str = "Experienced Python developer with 6 years building \
    Django and FastAPI services on AWS. Led migration of a monolith to async workers.";

pub struct FakeExtractor {
    result: Result<String, String>,
    calls: AtomicUsize,
}

impl FakeExtractor {
    pub fn with_text(text: &str) -> Self {
        Self {
            result: Ok(text.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            result: Err(message.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DocumentTextExtractor for FakeExtractor {
    async fn extract(&self, _document: Bytes) -> Result<String, ExtractionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone().map_err(ExtractionError::Parse)
    }
}

pub struct FakeEvaluator {
    questions: Result<Vec<String>, String>,
    score: Result<f64, String>,
    question_calls: AtomicUsize,
    score_calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl FakeEvaluator {
    pub fn new(questions: &[&str], score: f64) -> Self {
        Self {
            questions: Ok(questions.iter().map(|q| q.to_string()).collect()),
            score: Ok(score),
            question_calls: AtomicUsize::new(0),
            score_calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_questions(mut self, message: &str) -> Self {
        self.questions = Err(message.to_string());
        self
    }

    pub fn failing_score(mut self, message: &str) -> Self {
        self.score = Err(message.to_string());
        self
    }

    pub fn question_calls(&self) -> usize {
        self.question_calls.load(Ordering::SeqCst)
    }

    pub fn score_calls(&self) -> usize {
        self.score_calls.load(Ordering::SeqCst)
    }

    pub fn total_calls(&self) -> usize {
        self.question_calls() + self.score_calls()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl EvaluationClient for FakeEvaluator {
    async fn generate_questions(&self, prompt: &str) -> Result<Vec<String>, EvaluationError> {
        self.question_calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.questions.clone().map_err(EvaluationError::Backend)
    }

    async fn score_answers(&self, prompt: &str) -> Result<f64, EvaluationError> {
        self.score_calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.score.clone().map_err(EvaluationError::Backend)
    }
}
