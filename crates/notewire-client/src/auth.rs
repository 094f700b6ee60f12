//! Credential extraction and per-request auth attachment.
//!
//! Where the sign-in token travels differs per revision: v0.24 sets a
//! `memos.access-token` cookie, v0.25 a `user_session` cookie, v0.26 puts
//! the token in the response body. A gRPC-gateway in front of the server
//! may rewrite `set-cookie` into `grpc-metadata-set-cookie`, so cookie
//! extraction searches that name first.

use notewire_core::{Error, Result};
use reqwest::header::{HeaderMap, HeaderName, AUTHORIZATION, COOKIE};

use crate::version::ServerVersion;

/// Header names that may carry the session cookie, in search order.
const COOKIE_HEADER_CANDIDATES: [&str; 2] = ["grpc-metadata-set-cookie", "set-cookie"];

/// The session cookie name for revisions whose sign-in flow sets one.
pub fn session_cookie_name(version: ServerVersion) -> Option<&'static str> {
    match version {
        ServerVersion::V024 => Some("memos.access-token"),
        ServerVersion::V025 => Some("user_session"),
        ServerVersion::V026 => None,
    }
}

/// Search the response headers for the named cookie.
///
/// Each candidate header is parsed as `;`-delimited cookie pairs; the
/// first pair whose name matches wins.
pub fn extract_cookie_value(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let prefix = format!("{cookie_name}=");
    for header_name in COOKIE_HEADER_CANDIDATES {
        for value in headers.get_all(header_name) {
            let Ok(raw) = value.to_str() else { continue };
            if let Some(token) = raw
                .split(';')
                .map(str::trim)
                .find_map(|pair| pair.strip_prefix(prefix.as_str()))
            {
                return Some(token.to_string());
            }
        }
    }
    None
}

/// Extract the session token from a successful sign-in response's headers
/// for a cookie-carrying revision. Only call this on 2xx responses; a
/// failed response must be surfaced as its status error instead.
pub fn extract_session_token(version: ServerVersion, headers: &HeaderMap) -> Result<String> {
    let cookie_name = session_cookie_name(version).ok_or_else(|| {
        Error::EmptyResponse(format!("{version} does not deliver the token in a cookie"))
    })?;
    extract_cookie_value(headers, cookie_name).ok_or_else(|| {
        Error::EmptyResponse(format!("no {cookie_name} cookie in sign-in response"))
    })
}

/// The header to attach the stored credential with. Pure; never validates
/// or refreshes the token — an invalid token surfaces as 401/403.
pub fn auth_header(version: ServerVersion, token: &str) -> (HeaderName, String) {
    match version {
        // v0.25 uses session-based auth via Cookie header
        ServerVersion::V025 => (COOKIE, format!("user_session={token}")),
        // v0.24/v0.26 use Bearer token auth
        ServerVersion::V024 | ServerVersion::V026 => (AUTHORIZATION, format!("Bearer {token}")),
    }
}
