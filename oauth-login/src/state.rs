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

//! Shared application state passed to every Axum handler via `State`.

use crate::config::{Config, OAuthConfig};
use crate::provider::{self, ProviderError};

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Identity provider registration.
    pub oauth: OAuthConfig,
    /// HTTP client for calls to the identity provider.
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self, ProviderError> {
        Ok(Self {
            oauth: config.oauth.clone(),
            http: provider::build_client()?,
        })
    }
}
