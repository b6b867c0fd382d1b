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

//! Post-login landing page.

pub const HOME_PATH: &str = "/home";

/// GET /home
///
/// Placeholder page. Reachable without completing the login flow.
pub async fn home() -> &'static str {
    "hello world"
}
