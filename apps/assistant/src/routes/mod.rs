pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::interview::handlers;
use crate::state::AppState;
use crate::web::handlers as pages;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Browser pages
        .route("/", get(pages::handle_index))
        .route("/sessions/:id", get(pages::handle_page))
        .route("/sessions/:id/profile", post(pages::handle_profile))
        .route("/sessions/:id/tech-stack", post(pages::handle_tech_stack))
        .route("/sessions/:id/answer", post(pages::handle_answer))
        .route("/sessions/:id/end", post(pages::handle_end))
        // Interview JSON API
        .route("/api/v1/sessions", post(handlers::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(handlers::handle_get_session).delete(handlers::handle_end_session),
        )
        .route(
            "/api/v1/sessions/:id/profile",
            post(handlers::handle_submit_profile),
        )
        .route(
            "/api/v1/sessions/:id/tech-stack",
            post(handlers::handle_submit_tech_stack),
        )
        .route(
            "/api/v1/sessions/:id/answers",
            post(handlers::handle_submit_answer),
        )
        .with_state(state)
}
