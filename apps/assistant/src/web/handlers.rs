//! HTML form handlers. Every POST applies its action and answers `303 See Other` back to the
//! session page, so a browser refresh re-fetches the page instead of re-posting the form.
//! The resulting notice travels across the redirect as a short `?notice=` key.

use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::interview::flow::{apply, refresh};
use crate::interview::models::ProfileInput;
use crate::interview::session::{
    Action, Notice, ANSWER_SAVED, EMPTY_ANSWER, FAREWELL, PROFILE_SAVED, STACK_SAVED,
};
use crate::state::AppState;
use crate::web::render::{render_error, render_page};

pub const INVALID_EXPERIENCE: &str = "Please enter your years of experience as a whole number.";

/// `AppError` rendered as an HTML page instead of JSON.
pub struct PageError {
    error: AppError,
    session: Option<Uuid>,
}

impl PageError {
    fn for_session(session: Uuid) -> impl FnOnce(AppError) -> PageError {
        move |error| PageError {
            error,
            session: Some(session),
        }
    }
}

impl From<AppError> for PageError {
    fn from(error: AppError) -> Self {
        Self {
            error,
            session: None,
        }
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let (status, _code, message) = self.error.parts();
        (status, Html(render_error(&message, self.session))).into_response()
    }
}

fn notice_key(notice: &Notice) -> Option<&'static str> {
    match notice {
        Notice::Success(m) if m == PROFILE_SAVED => Some("profile_saved"),
        Notice::Success(m) if m == STACK_SAVED => Some("stack_saved"),
        Notice::Success(m) if m == ANSWER_SAVED => Some("answer_saved"),
        Notice::Success(m) if m == FAREWELL => Some("farewell"),
        Notice::Warning(m) if m == EMPTY_ANSWER => Some("empty_answer"),
        _ => None,
    }
}

fn notice_from_key(key: &str) -> Option<Notice> {
    let notice = match key {
        "profile_saved" => Notice::Success(PROFILE_SAVED.to_string()),
        "stack_saved" => Notice::Success(STACK_SAVED.to_string()),
        "answer_saved" => Notice::Success(ANSWER_SAVED.to_string()),
        "farewell" => Notice::Success(FAREWELL.to_string()),
        "empty_answer" => Notice::Warning(EMPTY_ANSWER.to_string()),
        "invalid_experience" => Notice::Warning(INVALID_EXPERIENCE.to_string()),
        _ => return None,
    };
    Some(notice)
}

fn to_page(id: Uuid, notice: Option<&str>) -> Redirect {
    match notice {
        Some(key) => Redirect::to(&format!("/sessions/{id}?notice={key}")),
        None => Redirect::to(&format!("/sessions/{id}")),
    }
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub notice: Option<String>,
}

/// Candidate form. `experience` arrives as raw text: a cleared number input posts
/// `experience=`, which counts as zero.
#[derive(Debug, Deserialize)]
pub struct ProfileForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub position: String,
}

impl ProfileForm {
    /// `None` when experience is neither blank nor a whole number of years.
    pub fn into_input(self) -> Option<ProfileInput> {
        let experience = match self.experience.trim() {
            "" => 0,
            raw => raw.parse::<u32>().ok()?,
        };
        Some(ProfileInput {
            name: self.name,
            email: self.email,
            phone: self.phone,
            experience,
            position: self.position,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct TechStackForm {
    #[serde(default)]
    pub tech_stack: String,
}

#[derive(Debug, Deserialize)]
pub struct AnswerForm {
    #[serde(default)]
    pub answer: String,
}

/// GET /
/// Starts a new session and redirects to its page.
pub async fn handle_index(State(state): State<AppState>) -> Result<Redirect, PageError> {
    let id = state.sessions.create().await?;
    info!("Created session {id} ({} store)", state.sessions.backend());
    Ok(to_page(id, None))
}

/// GET /sessions/:id
pub async fn handle_page(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>, PageError> {
    let session = refresh(&state, id).await.map_err(PageError::for_session(id))?;
    let notice = query.notice.as_deref().and_then(notice_from_key);
    Ok(Html(render_page(id, &session, notice.as_ref())))
}

async fn act(state: &AppState, id: Uuid, action: Action) -> Result<Redirect, PageError> {
    let transition = apply(state, id, action)
        .await
        .map_err(PageError::for_session(id))?;
    Ok(to_page(id, transition.notice.as_ref().and_then(notice_key)))
}

/// POST /sessions/:id/profile
pub async fn handle_profile(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Form(form): Form<ProfileForm>,
) -> Result<Redirect, PageError> {
    match form.into_input() {
        Some(input) => act(&state, id, Action::SubmitProfile(input)).await,
        None => {
            warn!("Session {id}: rejected non-numeric experience");
            Ok(to_page(id, Some("invalid_experience")))
        }
    }
}

/// POST /sessions/:id/tech-stack
pub async fn handle_tech_stack(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Form(form): Form<TechStackForm>,
) -> Result<Redirect, PageError> {
    act(&state, id, Action::SubmitTechStack(form.tech_stack)).await
}

/// POST /sessions/:id/answer
pub async fn handle_answer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Form(form): Form<AnswerForm>,
) -> Result<Redirect, PageError> {
    act(&state, id, Action::SubmitAnswer(form.answer)).await
}

/// POST /sessions/:id/end
pub async fn handle_end(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Redirect, PageError> {
    act(&state, id, Action::EndSession).await
}
