//! Per-request view handed to gates and collaborators.

use axum::extract::{ConnectInfo, Request};
use axum::http::{Extensions, HeaderMap, HeaderName, Method, Uri, Version, request::Parts};
use std::fmt;
use std::net::SocketAddr;

/// Immutable snapshot of the parts of an inbound request that gates inspect.
///
/// Built from the request head only; the body is never touched.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub method: Method,
    pub uri: Uri,
    pub version: Version,
    pub headers: HeaderMap,
    /// Peer socket address, present when the server runs with connect-info.
    pub remote_addr: Option<SocketAddr>,
    /// Value of the configured forwarded-for header, if any.
    pub forwarded_for: Option<String>,
}

impl RequestContext {
    /// Captures the request head, reading the forwarded-for value from `forward_header`.
    pub fn from_request(req: &Request, forward_header: &HeaderName) -> Self {
        Self::capture(
            req.method(),
            req.uri(),
            req.version(),
            req.headers(),
            req.extensions(),
            forward_header,
        )
    }

    /// Same as [`RequestContext::from_request`], for extractors holding only the head.
    pub fn from_parts(parts: &Parts, forward_header: &HeaderName) -> Self {
        Self::capture(
            &parts.method,
            &parts.uri,
            parts.version,
            &parts.headers,
            &parts.extensions,
            forward_header,
        )
    }

    fn capture(
        method: &Method,
        uri: &Uri,
        version: Version,
        headers: &HeaderMap,
        extensions: &Extensions,
        forward_header: &HeaderName,
    ) -> Self {
        let remote_addr = extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| *addr);

        let forwarded_for = headers
            .get(forward_header)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .map(str::to_string);

        Self {
            method: method.clone(),
            uri: uri.clone(),
            version,
            headers: headers.clone(),
            remote_addr,
            forwarded_for,
        }
    }

    /// Renders the originating address for logs.
    ///
    /// - `<forwarded> via <remote>` when the forwarded-for header is present
    /// - `<remote>` otherwise
    ///
    /// A missing peer address renders as `-`.
    pub fn origin(&self) -> String {
        let remote = self
            .remote_addr
            .map(|addr| addr.to_string())
            .unwrap_or_else(|| "-".to_string());

        match &self.forwarded_for {
            Some(xff) => format!("{xff} via {remote}"),
            None => remote,
        }
    }

    #[cfg(test)]
    pub(crate) fn for_tests() -> Self {
        Self {
            method: Method::GET,
            uri: Uri::from_static("/v1/test"),
            version: Version::HTTP_11,
            headers: HeaderMap::new(),
            remote_addr: Some(SocketAddr::from(([127, 0, 0, 1], 50000))),
            forwarded_for: None,
        }
    }
}

/// One-line summary: `<origin> <method> <target> <protocol>`.
impl fmt::Display for RequestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {:?}",
            self.origin(),
            self.method,
            self.uri,
            self.version
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn forward_header() -> HeaderName {
        HeaderName::from_static("x-forwarded-for")
    }

    fn request(xff: Option<&str>, addr: Option<SocketAddr>) -> Request {
        let mut builder = axum::http::Request::builder()
            .method(Method::POST)
            .uri("/v1/user/me?x=1");
        if let Some(xff) = xff {
            builder = builder.header("X-Forwarded-For", xff);
        }
        let mut req = builder.body(Body::empty()).unwrap();
        if let Some(addr) = addr {
            req.extensions_mut().insert(ConnectInfo(addr));
        }
        req
    }

    #[test]
    fn test_origin_direct_address() {
        let addr = SocketAddr::from(([10, 0, 0, 5], 4242));
        let ctx = RequestContext::from_request(&request(None, Some(addr)), &forward_header());

        assert_eq!(ctx.origin(), "10.0.0.5:4242");
    }

    #[test]
    fn test_origin_with_forwarded_for() {
        let addr = SocketAddr::from(([10, 0, 0, 5], 4242));
        let ctx = RequestContext::from_request(
            &request(Some("203.0.113.9"), Some(addr)),
            &forward_header(),
        );

        assert_eq!(ctx.origin(), "203.0.113.9 via 10.0.0.5:4242");
    }

    #[test]
    fn test_origin_without_peer_address() {
        let ctx = RequestContext::from_request(&request(None, None), &forward_header());
        assert_eq!(ctx.origin(), "-");

        let ctx = RequestContext::from_request(&request(Some("203.0.113.9"), None), &forward_header());
        assert_eq!(ctx.origin(), "203.0.113.9 via -");
    }

    #[test]
    fn test_empty_forwarded_for_is_ignored() {
        let addr = SocketAddr::from(([10, 0, 0, 5], 4242));
        let ctx = RequestContext::from_request(&request(Some(""), Some(addr)), &forward_header());

        assert_eq!(ctx.forwarded_for, None);
        assert_eq!(ctx.origin(), "10.0.0.5:4242");
    }

    #[test]
    fn test_custom_forward_header() {
        let mut req = request(Some("ignored"), None);
        req.headers_mut()
            .insert("x-real-ip", "198.51.100.1".parse().unwrap());

        let ctx = RequestContext::from_request(&req, &HeaderName::from_static("x-real-ip"));

        assert_eq!(ctx.forwarded_for.as_deref(), Some("198.51.100.1"));
    }

    #[test]
    fn test_display_summary_line() {
        let addr = SocketAddr::from(([10, 0, 0, 5], 4242));
        let ctx = RequestContext::from_request(&request(None, Some(addr)), &forward_header());

        assert_eq!(ctx.to_string(), "10.0.0.5:4242 POST /v1/user/me?x=1 HTTP/1.1");
    }
}
