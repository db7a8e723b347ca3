//! Axum route handlers for the Interview JSON API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::interview::flow::{apply, refresh};
use crate::interview::models::ProfileInput;
use crate::interview::session::{Action, InterviewSession, Notice, Stage, Transition};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct TechStackRequest {
    pub tech_stack: String,
}

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub answer: String,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session_id: Uuid,
    pub stage: Stage,
    pub progress: f64,
    pub total_questions: usize,
    pub current_question: Option<String>,
    pub session: InterviewSession,
    pub notice: Option<Notice>,
}

impl SessionResponse {
    fn new(session_id: Uuid, session: InterviewSession, notice: Option<Notice>) -> Self {
        Self {
            session_id,
            stage: session.stage(),
            progress: session.progress(),
            total_questions: session.total_questions(),
            current_question: session.current_question().map(str::to_string),
            session,
            notice,
        }
    }

    fn from_transition(session_id: Uuid, transition: Transition) -> Self {
        Self::new(session_id, transition.session, transition.notice)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<SessionResponse>), AppError> {
    let id = state.sessions.create().await?;
    info!("Created session {id} ({} store)", state.sessions.backend());
    Ok((
        StatusCode::CREATED,
        Json(SessionResponse::new(id, InterviewSession::default(), None)),
    ))
}

/// GET /api/v1/sessions/:id
///
/// Runs any ready gate first, so a session whose question generation failed earlier
/// retries here.
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = refresh(&state, id).await?;
    Ok(Json(SessionResponse::new(id, session, None)))
}

/// POST /api/v1/sessions/:id/profile
pub async fn handle_submit_profile(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<ProfileInput>,
) -> Result<Json<SessionResponse>, AppError> {
    let transition = apply(&state, id, Action::SubmitProfile(request)).await?;
    Ok(Json(SessionResponse::from_transition(id, transition)))
}

/// POST /api/v1/sessions/:id/tech-stack
///
/// Question generation fires in the same request.
pub async fn handle_submit_tech_stack(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<TechStackRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let transition = apply(&state, id, Action::SubmitTechStack(request.tech_stack)).await?;
    Ok(Json(SessionResponse::from_transition(id, transition)))
}

/// POST /api/v1/sessions/:id/answers
pub async fn handle_submit_answer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<AnswerRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let transition = apply(&state, id, Action::SubmitAnswer(request.answer)).await?;
    Ok(Json(SessionResponse::from_transition(id, transition)))
}

/// DELETE /api/v1/sessions/:id
///
/// Ends the interview: the session id stays valid and starts over at the first gate.
pub async fn handle_end_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionResponse>, AppError> {
    let transition = apply(&state, id, Action::EndSession).await?;
    Ok(Json(SessionResponse::from_transition(id, transition)))
}
