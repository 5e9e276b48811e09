//! Cookie extraction from HTTP request headers.

use axum::http::{HeaderMap, header::COOKIE};

/// Error returned when a `Cookie` header is not valid UTF-8.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MalformedCookieHeader;

/// Finds the value of cookie `name` across all `Cookie` headers.
///
/// Handles multiple cookies per header by splitting on semicolons and
/// ignoring unrelated pairs.
///
/// # Returns
///
/// - `Ok(Some(value))` when the cookie is present
/// - `Ok(None)` when no header carries it
///
/// # Errors
///
/// Returns [`MalformedCookieHeader`] if a `Cookie` header is not valid UTF-8.
pub fn find_cookie(headers: &HeaderMap, name: &str) -> Result<Option<String>, MalformedCookieHeader> {
    for header in headers.get_all(COOKIE) {
        let cookie_str = header.to_str().map_err(|_| MalformedCookieHeader)?;

        let found = cookie_str.split(';').find_map(|cookie| {
            let mut parts = cookie.trim().splitn(2, '=');
            match (parts.next(), parts.next()) {
                (Some(key), Some(value)) if key == name => Some(value.to_string()),
                _ => None,
            }
        });

        if found.is_some() {
            return Ok(found);
        }
    }

    Ok(None)
}
