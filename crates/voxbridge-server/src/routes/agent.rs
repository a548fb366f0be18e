use crate::error::ApiError;
use crate::state::AppState;
use axum::{extract::State, routing::post, Json, Router};
use bytes::Bytes;
use voxbridge::{
    errors::AgentResult,
    models::{request::AgentCreationRequest, response::AgentResponse},
};

async fn create_agent(body: &[u8], state: &AppState) -> AgentResult<AgentResponse> {
    let request = AgentCreationRequest::from_slice(body)?;
    let provider = state.providers.get(request.provider)?;

    let response = provider.create_agent(&request.params).await?;
    tracing::info!(
        "Agent created successfully for provider {}",
        request.provider
    );
    Ok(response)
}

// The body is taken raw so that an absent or unparseable payload gets our own error
async fn handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<AgentResponse>, ApiError> {
    match create_agent(&body, &state).await {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            tracing::error!("Error creating agent: {}", e);
            Err(e.into())
        }
    }
}

// Configure routes for this module
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/create-agent", post(handler))
        .with_state(state)
}
