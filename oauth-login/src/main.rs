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

//! OAuth login service entry point.
//!
//! Redirects the browser to the identity provider, exchanges the returned
//! authorization code for an access token and fetches the user's profile.

use anyhow::Context;
use oauth_login::config::Config;
use oauth_login::routes;
use oauth_login::state::AppState;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = Config::from_env().context("failed to load configuration")?;

    tracing::info!(
        "Using authorize endpoint {} with client id {}",
        config.oauth.authorize_url.as_str(),
        config.oauth.client_id.as_str()
    );

    let state = AppState::new(&config).context("failed to build HTTP client")?;
    let app = routes::router().with_state(state);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;

    tracing::info!("OAuth login service listening on {}", config.listen_addr);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
