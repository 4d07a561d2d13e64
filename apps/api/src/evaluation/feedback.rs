/// Maps a 0–10 score to qualitative feedback.
///
/// Total over every `f64`: scores above 10 land in the top band, negative
/// scores and NaN in the bottom one.
pub fn feedback_for_score(score: f64) -> &'static str {
    if score >= 9.0 {
        "Excellent! The answers are accurate, thorough and show deep practical understanding."
    } else if score >= 7.0 {
        "Good job! The answers are mostly correct with minor gaps in depth or detail."
    } else if score >= 5.0 {
        "Satisfactory. The fundamentals are there, but several answers lack precision or depth."
    } else if score >= 3.0 {
        "Needs improvement. Key concepts are misunderstood or missing; review the core topics."
    } else {
        "Poor. Most answers are incorrect or incomplete; significant study is recommended."
    }
}
