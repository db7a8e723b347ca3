use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service status with the configured model and store backends.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "hiring-assistant",
        "model": state.llm.model_id(),
        "sessions": state.sessions.backend(),
        "vector_documents": state.vector_store.len(),
    }))
}
