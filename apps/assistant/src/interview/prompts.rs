// Prompt constants for interview question generation.

pub const QUESTION_COUNT_MIN: u32 = 6;
pub const QUESTION_COUNT_MAX: u32 = 7;

/// Replace: {count_min}, {count_max}, {difficulty}, {tech_stack}, {experience}
pub const QUESTION_PROMPT_TEMPLATE: &str = "You are an AI interviewer. Generate {count_min} to {count_max} \
{difficulty}-level technical questions for a candidate with expertise in {tech_stack} \
and {experience} years of experience.";
