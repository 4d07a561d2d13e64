// Prompt templates and renderers for question generation and answer checking.
// Rendering is pure string substitution; the same inputs always give the same prompt.

use crate::evaluation::models::{AnswerSheet, QuestionGenerationRequest};

/// Persona for question generation. Combined with `JSON_ONLY_SYSTEM` by the evaluator.
pub const QUESTION_PERSONA: &str = "You are a senior technical interviewer who writes \
    interview questions grounded in a candidate's résumé.";

/// Replace: {tech_stack}, {difficulty}, {difficulty_label}, {question_count}, {resume}
pub const QUESTION_PROMPT_TEMPLATE: &str = r#"Prepare technical interview questions for the candidate below.

TECH STACK TO FOCUS ON: {tech_stack}
DIFFICULTY LEVEL: {difficulty} out of 5 ({difficulty_label})
NUMBER OF QUESTIONS: {question_count}

Rules:
1. Ask exactly {question_count} questions, never more.
2. Every question must target the tech stack above and, where possible, a project or role from the résumé.
3. Match the difficulty level: 1 checks fundamentals, 5 probes architecture, trade-offs and failure modes.
4. Questions must be answerable in a few paragraphs of free text. No multiple choice.
5. Do not repeat a question or ask two questions about the same topic.

Return a JSON object with this EXACT schema:
{
  "questions": ["first question", "second question"]
}

CANDIDATE RÉSUMÉ:
{resume}"#;

/// Persona for answer scoring.
pub const ANSWER_CHECK_PERSONA: &str = "You are a strict but fair technical interviewer \
    grading a candidate's written answers.";

/// Replace: {answer_count}, {qa_pairs}
pub const ANSWER_CHECK_PROMPT_TEMPLATE: &str = r#"Evaluate the candidate's answers to the {answer_count} interview questions below.

Scoring:
- Score the answers as a whole on a scale from 0 to 10.
- 10: every answer is correct, complete and shows production experience.
- 5: answers are partially correct or miss important details.
- 0: answers are wrong, irrelevant or missing.
- Judge technical accuracy first, then depth, then clarity.

Return a JSON object with this EXACT schema:
{
  "score": 7.5
}

QUESTIONS AND ANSWERS:
{qa_pairs}"#;

pub fn difficulty_label(difficulty: u8) -> &'static str {
    match difficulty {
        0 | 1 => "beginner",
        2 => "junior",
        3 => "intermediate",
        4 => "advanced",
        _ => "expert",
    }
}

pub fn build_question_prompt(request: &QuestionGenerationRequest) -> String {
    let params = &request.params;
    fill_template(
        QUESTION_PROMPT_TEMPLATE,
        &[
            ("tech_stack", &params.tech_stack),
            ("difficulty_label", difficulty_label(params.difficulty_level)),
            ("difficulty", &params.difficulty_level.to_string()),
            ("question_count", &params.question_count.to_string()),
            ("resume", request.resume_text.trim()),
        ],
    )
}

pub fn build_answer_check_prompt(answers: &AnswerSheet) -> String {
    let qa_pairs = answers
        .entries()
        .iter()
        .enumerate()
        .map(|(i, qa)| {
            format!(
                "Question {n}: {q}\nAnswer {n}: {a}",
                n = i + 1,
                q = qa.question.trim(),
                a = qa.answer.trim()
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    fill_template(
        ANSWER_CHECK_PROMPT_TEMPLATE,
        &[
            ("answer_count", &answers.len().to_string()),
            ("qa_pairs", &qa_pairs),
        ],
    )
}

/// Single pass over `template`: each `{name}` is replaced once and inserted
/// values are never rescanned. Unknown braces are copied through.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start + 1..];
        let hit = values.iter().find(|(name, _)| {
            tail.starts_with(name) && tail[name.len()..].starts_with('}')
        });
        match hit {
            Some((name, value)) => {
                out.push_str(value);
                rest = &tail[name.len() + 1..];
            }
            None => {
                out.push('{');
                rest = tail;
            }
        }
    }

    out.push_str(rest);
    out
}
