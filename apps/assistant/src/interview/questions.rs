//! Question prompt construction and response parsing.

use crate::interview::models::{CandidateProfile, Difficulty};
use crate::interview::prompts::{QUESTION_COUNT_MAX, QUESTION_COUNT_MIN, QUESTION_PROMPT_TEMPLATE};

/// Splits the raw comma-separated stack field. An empty field yields `[""]`.
pub fn split_tech_stack(raw: &str) -> Vec<String> {
    raw.split(',').map(|t| t.trim().to_string()).collect()
}

/// Builds the question-generation prompt for a profile and its declared stack.
pub fn build_question_prompt(profile: &CandidateProfile, tech_stack: &[String]) -> String {
    let difficulty = Difficulty::from_experience(profile.experience);
    QUESTION_PROMPT_TEMPLATE
        .replace("{count_min}", &QUESTION_COUNT_MIN.to_string())
        .replace("{count_max}", &QUESTION_COUNT_MAX.to_string())
        .replace("{difficulty}", difficulty.label())
        .replace("{tech_stack}", &tech_stack.join(", "))
        .replace("{experience}", &profile.experience.to_string())
}

/// Keeps the trimmed, non-empty lines that start with an ASCII digit, in order.
/// No cap on the number of questions.
pub fn parse_questions(response: &str) -> Vec<String> {
    response
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with(|c: char| c.is_ascii_digit()))
        .map(str::to_string)
        .collect()
}
