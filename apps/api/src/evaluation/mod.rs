// Interview evaluation: question generation from a résumé and answer scoring.
// All LLM calls go through llm_client via the EvaluationClient seam.

pub mod evaluator;
pub mod feedback;
pub mod handlers;
pub mod models;
pub mod orchestrator;
pub mod prompts;
pub mod upload;
pub mod validation;
