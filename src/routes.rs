use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;

use crate::{
    fal::{FalClient, FalError},
    models::{GenerateRequest, GenerateResponse},
};

#[derive(Clone)]
pub struct AppState {
    pub fal: Arc<FalClient>,
}

/// User-facing failure. Everything the adapter can hit funnels through here;
/// nothing is retried.
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn invalid(message: String) -> Self {
        Self { status: StatusCode::UNPROCESSABLE_ENTITY, message }
    }
}

impl From<FalError> for ApiError {
    fn from(err: FalError) -> Self {
        tracing::error!("Generation failed: {}", err);
        Self {
            status: StatusCode::BAD_GATEWAY,
            message: "Image generation failed. Make sure your API key is valid and try again."
                .into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

pub async fn index() -> Html<&'static str> {
    Html(include_str!("../static/index.html"))
}

pub async fn generate(
    State(state): State<AppState>,
    Json(body): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, ApiError> {
    body.validate().map_err(ApiError::invalid)?;

    tracing::info!(
        "Generating {} image(s) for a {} char prompt",
        body.num_images,
        body.prompt.trim().chars().count()
    );

    let result = state.fal.generate(&body).await?;

    tracing::info!("Generation complete: {} image(s)", result.images.len());
    Ok(Json(result))
}
