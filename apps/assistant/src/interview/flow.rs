//! Interview flow — load → reduce → run gates → save.
//!
//! Question generation is the only gate that fires without user input: whenever a session
//! has a tech stack but no questions, the next request through here generates them.

use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::interview::questions::build_question_prompt;
use crate::interview::session::{reduce, Action, InterviewSession, Transition};
use crate::sessions::require;
use crate::state::AppState;

/// Applies one user action to a stored session and persists the result.
pub async fn apply(state: &AppState, id: Uuid, action: Action) -> Result<Transition, AppError> {
    let session = require(state.sessions.as_ref(), id).await?;
    let from = session.stage();

    let transition = reduce(session, action)?;
    state.sessions.save(id, &transition.session).await?;
    info!(
        "Session {id}: {:?} -> {:?}",
        from,
        transition.session.stage()
    );

    let session = run_gates(state, id, transition.session).await?;
    Ok(Transition {
        session,
        notice: transition.notice,
    })
}

/// Loads a session and fires any gate that is ready. Used on every page render.
pub async fn refresh(state: &AppState, id: Uuid) -> Result<InterviewSession, AppError> {
    let session = require(state.sessions.as_ref(), id).await?;
    run_gates(state, id, session).await
}

async fn run_gates(
    state: &AppState,
    id: Uuid,
    session: InterviewSession,
) -> Result<InterviewSession, AppError> {
    if !session.needs_questions() {
        return Ok(session);
    }

    let response = generate_questions(state, &session).await?;
    let transition = reduce(session, Action::QuestionsGenerated(response))?;
    let count = transition.session.total_questions();
    if count == 0 {
        warn!("Session {id}: model response contained no numbered questions");
    } else {
        info!("Session {id}: generated {count} questions");
    }

    state.sessions.save(id, &transition.session).await?;
    Ok(transition.session)
}

/// Sends the question prompt through a fresh conversational chain and returns the raw answer.
async fn generate_questions(
    state: &AppState,
    session: &InterviewSession,
) -> Result<String, AppError> {
    let profile = session
        .candidate
        .as_ref()
        .ok_or_else(|| AppError::Conflict("No candidate profile to generate questions for".into()))?;

    let prompt = build_question_prompt(profile, &session.tech_stack);
    info!(
        "Generating questions with {} (stack: {:?})",
        state.llm.model_id(),
        session.tech_stack
    );

    let mut chain = state.chain();
    let answer = chain.ask(&prompt).await?;
    Ok(answer)
}
