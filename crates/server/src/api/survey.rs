use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use busplan::prelude::ResponseSink;
use std::sync::Arc;
use tracing::error;

use crate::{dto::SurveyDto, state::AppState};

pub async fn survey(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SurveyDto>,
) -> Result<Response, StatusCode> {
    if body.source.trim().is_empty() || body.destination.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    let response = body.into_response_record();
    state
        .sink
        .lock()
        .await
        .append(&response)
        .map_err(|err| {
            error!("Failed to save survey response: {err}");
            StatusCode::INTERNAL_SERVER_ERROR
        })?;
    Ok(StatusCode::CREATED.into_response())
}
