/*
 * Copyright 2025 Security Union LLC
 *
 * Licensed under either of
 *
 * * Apache License, Version 2.0
 *   (http://www.apache.org/licenses/LICENSE-2.0)
 * * MIT license
 *   (http://opensource.org/licenses/MIT)
 *
 * at your option.
 */

//! OAuth route handlers: authorize redirect and provider callback.
//!
//! The callback always sends the browser on to `/home`. Failures talking to
//! the provider are logged, not shown to the user.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use oauth2::AuthorizationCode;
use serde::Deserialize;

use super::home::HOME_PATH;
use crate::error::AppError;
use crate::provider;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: String,
}

/// `302 Found` pointing at `location`.
fn found(location: &str) -> Result<Response, AppError> {
    let location = HeaderValue::from_str(location)
        .map_err(|e| AppError::internal(&format!("invalid redirect location: {e}")))?;
    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}

/// GET /authorize
///
/// Redirects the browser to the provider's consent page.
pub async fn authorize(State(state): State<AppState>) -> Result<Response, AppError> {
    let url = provider::build_authorize_url(&state.oauth);
    tracing::info!("Authorize URL: {url}");
    found(url.as_str())
}

/// GET /oauth/redirect?code=...
///
/// Exchanges the authorization code for an access token, fetches the user's
/// profile with it, then redirects to `/home` whatever the outcome.
pub async fn callback(
    State(state): State<AppState>,
    query: Result<Query<CallbackQuery>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(query) = query.map_err(|rejection| AppError::bad_request(&rejection.body_text()))?;
    tracing::debug!("Received authorization code {}", query.code);

    let code = AuthorizationCode::new(query.code);

    match provider::exchange_code(&state.http, &state.oauth, &code).await {
        Ok(Some(token)) => {
            match provider::fetch_user_info(&state.http, &state.oauth, &token).await {
                Ok(user_info) => tracing::info!("User info: {user_info}"),
                Err(e) => tracing::error!("User info request failed: {e}"),
            }
        }
        Ok(None) => {
            tracing::warn!("Token endpoint issued no access_token, skipping user info");
        }
        Err(e) => tracing::error!("Authorization code exchange failed: {e}"),
    }

    tracing::info!("Redirecting to {HOME_PATH}");
    found(HOME_PATH)
}
