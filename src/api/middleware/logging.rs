//! Request trace and access logging gate.
//!
//! Every request produces one info line:
//!
//! ```text
//! INFO 203.0.113.9 via 10.0.0.5:4242 POST /v1/user/me HTTP/1.1
//! ```
//!
//! With `RUST_LOG=trace` the full request (line, headers, body) is dumped
//! first. The dump includes credentials and request bodies verbatim, so
//! trace logging must stay off in production.

use axum::{
    body::{Body, Bytes, to_bytes},
    extract::{Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use http_body::Body as _;
use std::fmt;
use tracing::Level;

use crate::{domain::RequestContext, state::AppState};

/// Display adapter that runs the producer only when formatted.
///
/// Passed to `tracing::trace!`, the producer never runs unless a
/// subscriber records the event.
pub struct LazyDump<F>(F);

impl<F: Fn() -> String> LazyDump<F> {
    pub fn new(produce: F) -> Self {
        Self(produce)
    }
}

impl<F: Fn() -> String> fmt::Display for LazyDump<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&(self.0)())
    }
}

/// Logs every inbound request, then delegates. Never rejects.
pub async fn layer(State(st): State<AppState>, req: Request, next: Next) -> Response {
    let req = if tracing::enabled!(Level::TRACE) {
        trace_request(req, st.trace_body_limit).await
    } else {
        req
    };

    let ctx = RequestContext::from_request(&req, &st.forward_header);
    tracing::info!("{ctx}");

    next.run(req).await
}

enum DumpBody {
    Buffered(Bytes),
    Omitted(String),
    Failed(axum::Error),
}

/// Emits the trace dump and returns the request with an equivalent body.
///
/// Bodies with no known upper size or larger than `limit` are passed through
/// unread and left out of the dump.
async fn trace_request(req: Request, limit: usize) -> Request {
    let (parts, body) = req.into_parts();

    let (body, dump) = match body.size_hint().upper() {
        Some(len) if len as usize <= limit => match to_bytes(body, limit).await {
            Ok(bytes) => (Body::from(bytes.clone()), DumpBody::Buffered(bytes)),
            // The stream is already broken; the handler sees an empty body.
            Err(err) => (Body::empty(), DumpBody::Failed(err)),
        },
        upper => {
            let reason = match upper {
                Some(len) => format!("<body omitted: {len} bytes>"),
                None => "<body omitted: streaming>".to_string(),
            };
            (body, DumpBody::Omitted(reason))
        }
    };

    tracing::trace!(
        "{}",
        LazyDump::new(|| match &dump {
            DumpBody::Buffered(bytes) => dump_request(&parts, bytes),
            DumpBody::Omitted(reason) => dump_request(&parts, reason.as_bytes()),
            DumpBody::Failed(err) => format!("logging: dump request: {err}"),
        })
    );

    Request::from_parts(parts, body)
}

/// Renders the request in HTTP/1.x wire form.
fn dump_request(parts: &Parts, body: &[u8]) -> String {
    let mut out = format!("{} {} {:?}\r\n", parts.method, parts.uri, parts.version);

    for (name, value) in &parts.headers {
        out.push_str(name.as_str());
        out.push_str(": ");
        out.push_str(&String::from_utf8_lossy(value.as_bytes()));
        out.push_str("\r\n");
    }

    out.push_str("\r\n");
    out.push_str(&String::from_utf8_lossy(body));
    out
}
