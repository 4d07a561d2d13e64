use std::sync::Arc;

use crate::config::Config;
use crate::evaluation::evaluator::EvaluationClient;
use crate::extraction::DocumentTextExtractor;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Résumé text extraction. Default: `PdfTextExtractor`.
    pub extractor: Arc<dyn DocumentTextExtractor>,
    /// Question generation and answer scoring. Default: `LlmEvaluator`.
    pub evaluator: Arc<dyn EvaluationClient>,
}
