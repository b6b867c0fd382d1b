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

//! Axum router configuration for the login service.

pub mod home;
pub mod oauth;

use axum::{routing::get, Router};

use crate::state::AppState;

/// Build the full application router.
pub fn router() -> Router<AppState> {
    Router::new()
        // OAuth flow
        .route("/authorize", get(oauth::authorize))
        .route("/oauth/redirect", get(oauth::callback))
        // Landing page
        .route(home::HOME_PATH, get(home::home))
}
