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

//! Application configuration loaded from environment variables.

use std::env;

use oauth2::{AuthUrl, ClientId, ClientSecret, RedirectUrl, TokenUrl};
use thiserror::Error;
use url::Url;

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_AUTHORIZE_URL: &str = "https://github.com/login/oauth/authorize";
pub const DEFAULT_ACCESS_TOKEN_URL: &str = "https://github.com/login/oauth/access_token";
pub const DEFAULT_USER_INFO_URL: &str = "https://api.github.com/user";

/// Errors raised while reading configuration at start-up.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    Missing(&'static str),

    #[error("{name} must be a valid URL: {source}")]
    InvalidUrl {
        name: &'static str,
        #[source]
        source: url::ParseError,
    },

    #[error("{0} must not carry a query string")]
    UnexpectedQuery(&'static str),
}

/// Configuration for the OAuth login service.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to bind the HTTP server (e.g. "0.0.0.0:8080").
    pub listen_addr: String,
    pub oauth: OAuthConfig,
}

/// Identity provider registration. Read-only once loaded.
///
/// `Debug` output redacts the client secret.
#[derive(Debug, Clone)]
pub struct OAuthConfig {
    pub client_id: ClientId,
    pub client_secret: ClientSecret,
    /// Provider consent page the browser is sent to.
    pub authorize_url: AuthUrl,
    /// Endpoint that trades an authorization code for an access token.
    pub access_token_url: TokenUrl,
    /// Profile endpoint queried with the access token.
    pub user_info_url: Url,
    /// Callback URL registered with the provider.
    pub redirect_url: RedirectUrl,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Required
    /// - `OAUTH_CLIENT_ID`
    /// - `OAUTH_CLIENT_SECRET`
    /// - `OAUTH_REDIRECT_URL`
    ///
    /// # Optional
    /// - `LISTEN_ADDR` (default: `"0.0.0.0:8080"`)
    /// - `OAUTH_AUTHORIZE_URL`, `OAUTH_ACCESS_TOKEN_URL`, `OAUTH_USER_INFO_URL`
    ///   (default: GitHub's endpoints). `OAUTH_AUTHORIZE_URL` must not carry
    ///   a query string.
    ///
    /// Empty values are treated as unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|s| !s.is_empty());
        let required = |key: &'static str| var(key).ok_or(ConfigError::Missing(key));
        let with_default =
            |key: &str, default: &str| var(key).unwrap_or_else(|| default.to_string());

        let listen_addr = with_default("LISTEN_ADDR", DEFAULT_LISTEN_ADDR);

        // The consent redirect appends exactly `client_id` and `redirect_uri`.
        let authorize_url = parse_url(
            "OAUTH_AUTHORIZE_URL",
            with_default("OAUTH_AUTHORIZE_URL", DEFAULT_AUTHORIZE_URL),
            AuthUrl::new,
        )?;
        if authorize_url.url().query().is_some() {
            return Err(ConfigError::UnexpectedQuery("OAUTH_AUTHORIZE_URL"));
        }

        let oauth = OAuthConfig {
            client_id: ClientId::new(required("OAUTH_CLIENT_ID")?),
            client_secret: ClientSecret::new(required("OAUTH_CLIENT_SECRET")?),
            authorize_url,
            access_token_url: parse_url(
                "OAUTH_ACCESS_TOKEN_URL",
                with_default("OAUTH_ACCESS_TOKEN_URL", DEFAULT_ACCESS_TOKEN_URL),
                TokenUrl::new,
            )?,
            user_info_url: parse_url(
                "OAUTH_USER_INFO_URL",
                with_default("OAUTH_USER_INFO_URL", DEFAULT_USER_INFO_URL),
                |raw| Url::parse(&raw),
            )?,
            redirect_url: parse_url(
                "OAUTH_REDIRECT_URL",
                required("OAUTH_REDIRECT_URL")?,
                RedirectUrl::new,
            )?,
        };

        Ok(Self { listen_addr, oauth })
    }
}

fn parse_url<T, F>(name: &'static str, raw: String, parse: F) -> Result<T, ConfigError>
where
    F: FnOnce(String) -> Result<T, url::ParseError>,
{
    parse(raw).map_err(|source| ConfigError::InvalidUrl { name, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    const REQUIRED: [(&str, &str); 3] = [
        ("OAUTH_CLIENT_ID", "client123"),
        ("OAUTH_CLIENT_SECRET", "s3cret"),
        ("OAUTH_REDIRECT_URL", "http://localhost:8080/oauth/redirect"),
    ];

    #[test]
    fn defaults_point_at_github() {
        let config = Config::from_lookup(lookup_from(&REQUIRED)).unwrap();

        assert_eq!(config.listen_addr, DEFAULT_LISTEN_ADDR);
        assert_eq!(config.oauth.client_id.as_str(), "client123");
        assert_eq!(config.oauth.client_secret.secret(), "s3cret");
        assert_eq!(config.oauth.authorize_url.as_str(), DEFAULT_AUTHORIZE_URL);
        assert_eq!(config.oauth.access_token_url.as_str(), DEFAULT_ACCESS_TOKEN_URL);
        assert_eq!(config.oauth.user_info_url.as_str(), DEFAULT_USER_INFO_URL);
        assert_eq!(
            config.oauth.redirect_url.as_str(),
            "http://localhost:8080/oauth/redirect"
        );
    }

    #[test]
    fn overrides_are_honoured() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("LISTEN_ADDR", "127.0.0.1:9000"));
        pairs.push(("OAUTH_AUTHORIZE_URL", "https://idp.example.com/authorize"));
        pairs.push(("OAUTH_ACCESS_TOKEN_URL", "https://idp.example.com/token"));
        pairs.push(("OAUTH_USER_INFO_URL", "https://idp.example.com/me"));

        let config = Config::from_lookup(lookup_from(&pairs)).unwrap();

        assert_eq!(config.listen_addr, "127.0.0.1:9000");
        assert_eq!(
            config.oauth.authorize_url.as_str(),
            "https://idp.example.com/authorize"
        );
        assert_eq!(
            config.oauth.access_token_url.as_str(),
            "https://idp.example.com/token"
        );
        assert_eq!(config.oauth.user_info_url.as_str(), "https://idp.example.com/me");
    }

    #[test]
    fn missing_client_id_is_reported() {
        let err = Config::from_lookup(lookup_from(&REQUIRED[1..])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("OAUTH_CLIENT_ID")));
    }

    #[test]
    fn empty_value_counts_as_missing() {
        let mut pairs = REQUIRED.to_vec();
        pairs[1] = ("OAUTH_CLIENT_SECRET", "");
        let err = Config::from_lookup(lookup_from(&pairs)).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("OAUTH_CLIENT_SECRET")));
    }

    #[test]
    fn invalid_url_names_the_variable() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("OAUTH_ACCESS_TOKEN_URL", "not a url"));
        let err = Config::from_lookup(lookup_from(&pairs)).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidUrl {
                name: "OAUTH_ACCESS_TOKEN_URL",
                ..
            }
        ));
        assert!(err.to_string().starts_with("OAUTH_ACCESS_TOKEN_URL"));
    }

    #[test]
    fn authorize_url_with_query_is_rejected() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("OAUTH_AUTHORIZE_URL", "https://idp.example.com/authorize?scope=user"));
        let err = Config::from_lookup(lookup_from(&pairs)).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::UnexpectedQuery("OAUTH_AUTHORIZE_URL")
        ));
    }

    #[test]
    fn debug_output_redacts_secret() {
        let config = Config::from_lookup(lookup_from(&REQUIRED)).unwrap();
        let printed = format!("{config:?}");
        assert!(!printed.contains("s3cret"));
    }
}
