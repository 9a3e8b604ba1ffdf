// ABOUTME: Session cookie helpers for the token-carrying `token` cookie
// ABOUTME: Builds Set-Cookie values for login and logout and reads cookies from requests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::cookies::{PATH, SESSION_COOKIE};
use axum::http::{header, HeaderMap, HeaderValue};
use tracing::warn;

/// `SameSite` attribute values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameSite {
    /// Sent on same-site requests and top-level navigations
    Lax,
    /// Sent on same-site requests only
    Strict,
}

impl SameSite {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Lax => "Lax",
            Self::Strict => "Strict",
        }
    }
}

/// Cookie attributes for a single Set-Cookie header
#[derive(Debug, Clone)]
pub struct SecureCookieConfig {
    /// Cookie name
    pub name: String,
    /// Cookie value
    pub value: String,
    /// Lifetime in seconds; zero expires the cookie immediately
    pub max_age_secs: i64,
    /// Hide the cookie from client-side scripts
    pub http_only: bool,
    /// Only send over HTTPS
    pub secure: bool,
    /// Cross-site policy
    pub same_site: SameSite,
    /// Cookie path
    pub path: String,
}

impl SecureCookieConfig {
    /// `HttpOnly`, `SameSite=Lax`, `Path=/`, not `Secure`
    #[must_use]
    pub fn new(name: String, value: String, max_age_secs: i64) -> Self {
        Self {
            name,
            value,
            max_age_secs,
            http_only: true,
            secure: false,
            same_site: SameSite::Lax,
            path: PATH.to_owned(),
        }
    }

    /// Toggle the `Secure` attribute
    #[must_use]
    pub const fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Render the Set-Cookie header value
    #[must_use]
    pub fn build(&self) -> String {
        let mut cookie = format!(
            "{}={}; Path={}; Max-Age={}",
            self.name, self.value, self.path, self.max_age_secs
        );
        if self.max_age_secs <= 0 {
            cookie.push_str("; Expires=Thu, 01 Jan 1970 00:00:00 GMT");
        }
        if self.http_only {
            cookie.push_str("; HttpOnly");
        }
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie.push_str("; SameSite=");
        cookie.push_str(self.same_site.as_str());
        cookie
    }

    fn append_to(&self, headers: &mut HeaderMap) {
        match HeaderValue::from_str(&self.build()) {
            Ok(value) => {
                headers.append(header::SET_COOKIE, value);
            }
            Err(e) => warn!(cookie = %self.name, "Failed to encode Set-Cookie header: {e}"),
        }
    }
}

/// Attach the session cookie carrying `token`
pub fn set_session_cookie(headers: &mut HeaderMap, token: &str, max_age_secs: i64, secure: bool) {
    SecureCookieConfig::new(SESSION_COOKIE.to_owned(), token.to_owned(), max_age_secs)
        .with_secure(secure)
        .append_to(headers);
}

/// Attach an expired, empty session cookie so the client drops it
pub fn clear_session_cookie(headers: &mut HeaderMap, secure: bool) {
    SecureCookieConfig::new(SESSION_COOKIE.to_owned(), String::new(), 0)
        .with_secure(secure)
        .append_to(headers);
}

/// Read a cookie value from the request `Cookie` header(s)
#[must_use]
pub fn get_cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|raw| raw.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_owned())
}
