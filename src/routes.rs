use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tracing::{error, info};

use crate::models::{ResearchRequest, ResearchResponse};
use crate::research::ResearchError;
use crate::state::AppState;

pub fn create_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/research", post(do_research))
}

async fn health_check() -> Json<Value> {
    Json(json!({"status": "healthy"}))
}

async fn do_research(
    State(state): State<AppState>,
    Json(request): Json<ResearchRequest>,
) -> Result<Json<ResearchResponse>, (StatusCode, Json<Value>)> {
    info!(
        "Received research request - Topic: '{}', Format: '{}'",
        request.topic, request.format
    );

    match state
        .research
        .perform_research(&request.topic, &request.format)
        .await
    {
        Ok(result) => {
            info!("Successfully completed research for topic: '{}'", request.topic);
            Ok(Json(result))
        }
        Err(err) => {
            error!("{err}");
            Err(error_response(&err))
        }
    }
}

fn error_response(err: &ResearchError) -> (StatusCode, Json<Value>) {
    let status = match err {
        ResearchError::AgentSession(_) => StatusCode::SERVICE_UNAVAILABLE,
        ResearchError::Response(_) | ResearchError::Other(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, Json(json!({"detail": err.to_string()})))
}
