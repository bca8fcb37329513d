use crate::error::{AppError, Result};
use crate::model::GetLinkResponse;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use foodgram_core::ShortCode;
use tracing::debug;

/// Returns the recipe's short link, assigning a code on first request.
pub async fn get_link_handler(
    Path(recipe_id): Path<u64>,
    State(state): State<AppState>,
) -> Result<Json<GetLinkResponse>> {
    let code = state.links().get_link(recipe_id).await?;

    Ok(Json(GetLinkResponse {
        short_link: code.to_url(state.base_url()),
    }))
}

/// Redirects a short link to its recipe page.
///
/// A code that could never have been issued is treated like an unknown one.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response> {
    let code = ShortCode::new(&code).map_err(|e| {
        debug!(error = %e, "rejected malformed short code");
        AppError::ShortLinkNotFound
    })?;

    let recipe_id = state
        .links()
        .resolve(&code)
        .await?
        .ok_or(AppError::ShortLinkNotFound)?;

    debug!(%code, recipe_id, "redirecting short link");
    let location = format!("/recipes/{recipe_id}/");
    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}
