//! Request validation: every inbound payload is checked and coerced here,
//! before any extraction or LLM work is started.

use serde_json::{Map, Value};

use crate::errors::AppError;
use crate::evaluation::models::{AnswerSheet, CandidateParams, QuestionAnswer, QuestionParams};
use crate::evaluation::upload::{UploadForm, UploadedFile};
use crate::extraction::PDF_CONTENT_TYPES;

pub const DIFFICULTY_RANGE: std::ops::RangeInclusive<i64> = 1..=5;
pub const QUESTION_COUNT_RANGE: std::ops::RangeInclusive<i64> = 1..=20;

/// Required keys of the `/questions` JSON payload, in reporting order.
const QUESTION_FIELDS: [&str; 3] = ["techStack", "difficultyLevel", "questionCount"];

/// Required form fields of `/complete-evaluation`, in reporting order.
const CANDIDATE_FIELDS: [&str; 4] = ["tech_stack", "difficulty", "question_count", "answers"];

/// Returns the upload if it is present and carries a PDF content type.
pub fn require_pdf(file: Option<&UploadedFile>) -> Result<&UploadedFile, AppError> {
    let file = file
        .ok_or_else(|| AppError::InvalidInput("Missing required file upload".to_string()))?;

    match file.media_type() {
        Some(media_type) if PDF_CONTENT_TYPES.contains(&media_type.as_str()) => Ok(file),
        _ => Err(AppError::UnsupportedMediaType(
            "File is not a valid PDF".to_string(),
        )),
    }
}

/// Parses the JSON string sent alongside a `/questions` upload.
pub fn parse_question_params(data: Option<&str>) -> Result<QuestionParams, AppError> {
    let data = data.map(str::trim).unwrap_or_default();
    if data.is_empty() {
        return Err(missing_parameters());
    }

    let value: Value = serde_json::from_str(data)
        .map_err(|_| AppError::InvalidInput("Invalid JSON data format".to_string()))?;

    let object = match value {
        Value::Object(map) if map.is_empty() => return Err(missing_parameters()),
        Value::Object(map) => map,
        _ => {
            return Err(AppError::InvalidInput(
                "JSON data must be an object with techStack, difficultyLevel and questionCount"
                    .to_string(),
            ))
        }
    };

    if let Some(missing) = QUESTION_FIELDS.iter().find(|f| !object.contains_key(**f)) {
        return Err(AppError::InvalidInput(format!(
            "Missing required field: {missing}"
        )));
    }

    let tech_stack = coerce_tech_stack(&object["techStack"])
        .ok_or_else(|| invalid("techStack must be a non-empty string or list of strings"))?;
    let difficulty_level = coerce_in_range(&object["difficultyLevel"], DIFFICULTY_RANGE)
        .ok_or_else(|| invalid("difficultyLevel must be an integer between 1 and 5"))?;
    let question_count = coerce_in_range(&object["questionCount"], QUESTION_COUNT_RANGE)
        .ok_or_else(|| invalid("questionCount must be an integer between 1 and 20"))?;

    Ok(QuestionParams {
        tech_stack,
        difficulty_level,
        question_count,
    })
}

/// Validates the `/check-answers` body.
pub fn parse_answer_sheet(payload: &Value) -> Result<AnswerSheet, AppError> {
    let map = payload.as_object().ok_or_else(|| {
        invalid("Data must be a dictionary mapping questions to answers")
    })?;
    answer_sheet_from_map(map, "No question-answer pairs provided")
}

/// Validates the `/complete-evaluation` text fields.
///
/// Checks run in the order tech stack, difficulty, question count, answers, so the
/// first violated constraint is the one reported.
pub fn parse_candidate_form(form: &UploadForm) -> Result<CandidateParams, AppError> {
    if let Some(missing) = CANDIDATE_FIELDS.iter().find(|f| form.field(f).is_none()) {
        return Err(AppError::InvalidInput(format!(
            "Missing required field: {missing}"
        )));
    }
    let field = |name: &str| form.field(name).unwrap_or_default();

    let tech_stack = field("tech_stack").trim();
    if tech_stack.is_empty() {
        return Err(invalid("Tech stack cannot be empty"));
    }

    let difficulty = parse_int_in_range(field("difficulty"), DIFFICULTY_RANGE)
        .ok_or_else(|| invalid("Difficulty must be an integer between 1 and 5"))?;
    let question_count = parse_int_in_range(field("question_count"), QUESTION_COUNT_RANGE)
        .ok_or_else(|| invalid("Question count must be an integer between 1 and 20"))?;

    let answers = field("answers").trim();
    if answers.is_empty() {
        return Err(no_answers());
    }
    let answers: Value = serde_json::from_str(answers)
        .map_err(|_| invalid("Answers must be a JSON object mapping questions to answers"))?;
    let answers = match &answers {
        Value::Object(map) => answer_sheet_from_map(map, "No answers provided for evaluation")?,
        Value::Null => return Err(no_answers()),
        _ => return Err(invalid("Answers must be a JSON object mapping questions to answers")),
    };

    Ok(CandidateParams {
        tech_stack: tech_stack.to_string(),
        difficulty,
        question_count,
        answers,
    })
}

fn answer_sheet_from_map(map: &Map<String, Value>, empty_message: &str) -> Result<AnswerSheet, AppError> {
    if map.is_empty() {
        return Err(invalid(empty_message));
    }

    let mut entries = Vec::with_capacity(map.len());
    let mut empty = 0usize;

    for (question, answer) in map {
        match answer {
            Value::String(s) if !s.trim().is_empty() => entries.push(QuestionAnswer {
                question: question.clone(),
                answer: s.clone(),
            }),
            Value::String(_) | Value::Null => empty += 1,
            _ => {
                return Err(AppError::InvalidInput(format!(
                    "Answer for question '{question}' must be a string"
                )))
            }
        }
    }

    if empty > 0 {
        return Err(AppError::InvalidInput(format!(
            "Empty answers provided for {empty} questions"
        )));
    }

    Ok(AnswerSheet::new(entries))
}

/// Accepts `"Python, Rust"` or `["Python", "Rust"]`.
fn coerce_tech_stack(value: &Value) -> Option<String> {
    let joined = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Array(items) => {
            let parts: Option<Vec<&str>> = items
                .iter()
                .map(|v| v.as_str().map(str::trim))
                .collect();
            parts?
                .into_iter()
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join(", ")
        }
        _ => return None,
    };
    (!joined.is_empty()).then_some(joined)
}

/// JSON integer, integral float, or numeric string, within `range`.
fn coerce_in_range(value: &Value, range: std::ops::RangeInclusive<i64>) -> Option<u8> {
    let n = match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))?,
        Value::String(s) => s.trim().parse::<i64>().ok()?,
        _ => return None,
    };
    narrow(n, range)
}

fn parse_int_in_range(raw: &str, range: std::ops::RangeInclusive<i64>) -> Option<u8> {
    narrow(raw.trim().parse::<i64>().ok()?, range)
}

fn narrow(n: i64, range: std::ops::RangeInclusive<i64>) -> Option<u8> {
    if range.contains(&n) {
        u8::try_from(n).ok()
    } else {
        None
    }
}

fn invalid(message: &str) -> AppError {
    AppError::InvalidInput(message.to_string())
}

fn missing_parameters() -> AppError {
    invalid("Missing required parameters in JSON data")
}

fn no_answers() -> AppError {
    invalid("No answers provided for evaluation")
}
