//! Interview session state and its reducer.
//!
//! The whole interview is one `InterviewSession` value. Every user action goes through
//! `reduce`, which takes the current session and returns the next one plus an optional
//! notice. Gates open strictly in order:
//!
//! 1. candidate profile
//! 2. tech stack
//! 3. question generation (driven by the flow layer, which feeds the raw model response back
//!    in as `Action::QuestionsGenerated`)
//! 4. answer walk
//! 5. complete
//!
//! `EndSession` is accepted at any stage and resets everything.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::interview::models::{CandidateProfile, ChatEntry, ProfileInput, Role};
use crate::interview::questions::{parse_questions, split_tech_stack};

pub const PROFILE_SAVED: &str = "Details saved! Now enter your tech stack.";
pub const STACK_SAVED: &str = "Tech stack saved! Preparing your interview...";
pub const ANSWER_SAVED: &str = "Answer submitted! Moving to the next question...";
pub const EMPTY_ANSWER: &str = "Please provide an answer before submitting.";
pub const FAREWELL: &str = "Thank you for your time!";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    CandidateInfo,
    TechStack,
    GeneratingQuestions,
    Answering,
    Complete,
}

#[derive(Debug, Error, PartialEq)]
pub enum InterviewError {
    #[error("cannot {action} while the interview is at stage {stage:?}")]
    GateClosed { action: &'static str, stage: Stage },
}

#[derive(Debug, Clone)]
pub enum Action {
    SubmitProfile(ProfileInput),
    SubmitTechStack(String),
    /// Raw model response for the question-generation prompt.
    QuestionsGenerated(String),
    SubmitAnswer(String),
    EndSession,
}

impl Action {
    fn name(&self) -> &'static str {
        match self {
            Action::SubmitProfile(_) => "submit_profile",
            Action::SubmitTechStack(_) => "submit_tech_stack",
            Action::QuestionsGenerated(_) => "store_questions",
            Action::SubmitAnswer(_) => "submit_answer",
            Action::EndSession => "end_session",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "level", content = "message", rename_all = "snake_case")]
pub enum Notice {
    Success(String),
    Warning(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub session: InterviewSession,
    pub notice: Option<Notice>,
}

impl Transition {
    fn with(session: InterviewSession, notice: Notice) -> Self {
        Self {
            session,
            notice: Some(notice),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct InterviewSession {
    pub candidate: Option<CandidateProfile>,
    pub tech_stack: Vec<String>,
    /// `None` until generation has run; `Some(vec![])` when the model produced nothing usable.
    pub questions: Option<Vec<String>>,
    pub current_index: usize,
    pub answers: Vec<String>,
    pub chat_history: Vec<ChatEntry>,
}

impl InterviewSession {
    pub fn stage(&self) -> Stage {
        if self.candidate.is_none() {
            Stage::CandidateInfo
        } else if self.tech_stack.is_empty() {
            Stage::TechStack
        } else if self.questions.is_none() {
            Stage::GeneratingQuestions
        } else if self.current_index < self.total_questions() {
            Stage::Answering
        } else {
            Stage::Complete
        }
    }

    /// True when the question-generation gate should fire.
    pub fn needs_questions(&self) -> bool {
        self.stage() == Stage::GeneratingQuestions
    }

    pub fn total_questions(&self) -> usize {
        self.questions.as_ref().map_or(0, Vec::len)
    }

    pub fn current_question(&self) -> Option<&str> {
        self.questions
            .as_ref()
            .and_then(|q| q.get(self.current_index))
            .map(String::as_str)
    }

    /// `current_index / total` in `[0, 1]`, or `0` when there are no questions.
    pub fn progress(&self) -> f64 {
        match self.total_questions() {
            0 => 0.0,
            total => self.current_index as f64 / total as f64,
        }
    }

    /// Percentage shown on the progress bar. A finished walk, including one with zero
    /// questions, reads as 100.
    pub fn progress_percent(&self) -> u8 {
        if self.stage() == Stage::Complete {
            100
        } else {
            (self.progress() * 100.0).round() as u8
        }
    }
}

/// Applies one action. Gate violations are errors; an empty answer is a warning with the
/// session left untouched.
pub fn reduce(session: InterviewSession, action: Action) -> Result<Transition, InterviewError> {
    let stage = session.stage();
    let closed = |action: &Action| InterviewError::GateClosed {
        action: action.name(),
        stage,
    };

    match action {
        Action::EndSession => Ok(Transition::with(
            InterviewSession::default(),
            Notice::Success(FAREWELL.to_string()),
        )),

        Action::SubmitProfile(input) => {
            if stage != Stage::CandidateInfo {
                return Err(closed(&Action::SubmitProfile(input)));
            }
            let next = InterviewSession {
                candidate: Some(input.into()),
                ..session
            };
            Ok(Transition::with(next, Notice::Success(PROFILE_SAVED.to_string())))
        }

        Action::SubmitTechStack(raw) => {
            if stage != Stage::TechStack {
                return Err(closed(&Action::SubmitTechStack(raw)));
            }
            let next = InterviewSession {
                tech_stack: split_tech_stack(&raw),
                ..session
            };
            Ok(Transition::with(next, Notice::Success(STACK_SAVED.to_string())))
        }

        Action::QuestionsGenerated(response) => {
            if stage != Stage::GeneratingQuestions {
                return Err(closed(&Action::QuestionsGenerated(response)));
            }
            let next = InterviewSession {
                questions: Some(parse_questions(&response)),
                current_index: 0,
                ..session
            };
            Ok(Transition {
                session: next,
                notice: None,
            })
        }

        Action::SubmitAnswer(answer) => {
            if stage != Stage::Answering {
                return Err(closed(&Action::SubmitAnswer(answer)));
            }
            if answer.trim().is_empty() {
                return Ok(Transition::with(
                    session,
                    Notice::Warning(EMPTY_ANSWER.to_string()),
                ));
            }

            let mut next = session;
            let question = next.current_question().unwrap_or_default().to_string();
            next.chat_history.push(ChatEntry::new(Role::Bot, question));
            next.chat_history.push(ChatEntry::new(Role::User, answer.clone()));
            next.answers.push(answer);
            next.current_index += 1;
            Ok(Transition::with(next, Notice::Success(ANSWER_SAVED.to_string())))
        }
    }
}
