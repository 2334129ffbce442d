//! External objects proxy handler

use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
};
use tasktracker_common::{Error, Result};

use crate::api::middleware::TasksState;

/// Fetch the external objects catalogue and pass the body through
pub async fn get_objects(State(state): State<TasksState>) -> Result<impl IntoResponse> {
    let body = state.external.fetch_objects().await.map_err(|e| {
        tracing::error!(source = state.external.source(), error = %e, "External API call failed");
        Error::Downstream(e.to_string())
    })?;

    Ok(([(header::CONTENT_TYPE, "application/json")], body))
}
