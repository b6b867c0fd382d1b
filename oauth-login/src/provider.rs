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

//! Identity provider calls: authorize URL construction, authorization code →
//! access token exchange, and the user profile fetch.

use oauth2::{AccessToken, AuthorizationCode};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::config::OAuthConfig;

const JSON: &str = "application/json";
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Errors returned by calls to the identity provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// A network or transport error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The provider answered with a non-2xx status.
    #[error("Provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The token endpoint body was non-empty and not a JSON object.
    #[error("Invalid JSON from provider: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Body of the token endpoint response.
///
/// GitHub answers a rejected code with HTTP 200 and an `error` object, so
/// every field is optional.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct AccessTokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
}

/// Build the HTTP client used for provider calls.
///
/// GitHub's API rejects requests without a `User-Agent`.
pub fn build_client() -> Result<reqwest::Client, ProviderError> {
    Ok(reqwest::Client::builder().user_agent(USER_AGENT).build()?)
}

/// Build the provider consent URL: the configured authorize endpoint with
/// `client_id` and `redirect_uri` appended.
pub fn build_authorize_url(config: &OAuthConfig) -> Url {
    let mut url = config.authorize_url.url().clone();
    url.query_pairs_mut()
        .append_pair("client_id", config.client_id.as_str())
        .append_pair("redirect_uri", config.redirect_url.as_str());
    url
}

/// Value of the `Authorization` header sent to the user-info endpoint.
pub fn authorization_header(token: &AccessToken) -> String {
    format!("token {}", token.secret())
}

/// Parse a token endpoint body. An empty body, or one without
/// `access_token`, is not an error.
pub fn parse_access_token_response(body: &str) -> Result<AccessTokenResponse, ProviderError> {
    if body.trim().is_empty() {
        return Ok(AccessTokenResponse::default());
    }
    Ok(serde_json::from_str(body)?)
}

/// Exchange an authorization code for an access token.
///
/// Returns `Ok(None)` when the provider answered but issued no token.
pub async fn exchange_code(
    http: &reqwest::Client,
    config: &OAuthConfig,
    code: &AuthorizationCode,
) -> Result<Option<AccessToken>, ProviderError> {
    let token_url = config.access_token_url.url();
    tracing::info!("Exchanging authorization code at {token_url}");

    let response = http
        .post(token_url.clone())
        .query(&[
            ("client_id", config.client_id.as_str()),
            ("client_secret", config.client_secret.secret().as_str()),
            ("code", code.secret().as_str()),
            ("grant_type", "authorization_code"),
        ])
        .header(ACCEPT, JSON)
        .send()
        .await?;

    let body = success_body(response).await?;
    let token_response = parse_access_token_response(&body)?;

    if let Some(error) = &token_response.error {
        tracing::warn!(
            "Token endpoint rejected the code: {error} ({})",
            token_response.error_description.as_deref().unwrap_or("no description")
        );
    }

    tracing::debug!(
        "Token endpoint issued token: {}, type: {:?}, scope: {:?}",
        token_response.access_token.is_some(),
        token_response.token_type,
        token_response.scope
    );

    Ok(token_response.access_token.map(AccessToken::new))
}

/// Fetch the user's profile. The body is returned as-is.
pub async fn fetch_user_info(
    http: &reqwest::Client,
    config: &OAuthConfig,
    token: &AccessToken,
) -> Result<String, ProviderError> {
    tracing::info!("Fetching user info from {}", config.user_info_url);

    let response = http
        .get(config.user_info_url.clone())
        .header(ACCEPT, JSON)
        .header(AUTHORIZATION, authorization_header(token))
        .send()
        .await?;

    success_body(response).await
}

async fn success_body(response: reqwest::Response) -> Result<String, ProviderError> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        tracing::error!("Provider request failed. Status: {status}, Body: {body}");
        return Err(ProviderError::Status {
            status: status.as_u16(),
            body,
        });
    }
    Ok(body)
}
