//! Request body closure guarantee.
//!
//! The inner handler reads the body through a [`LeasedBody`]. The
//! underlying body stays owned by a [`BodyLease`] held by this gate and is
//! dropped only after the inner service has returned. Because the lease is
//! released on drop, the body is also closed on panic unwinding and when
//! the request future is cancelled.

use axum::{
    body::{Body, Bytes},
    extract::Request,
    middleware::Next,
    response::Response,
};
use http_body::Body as _;
use http_body::{Frame, SizeHint};
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard};
use std::task::{Context, Poll};

type Slot = Arc<Mutex<Option<Body>>>;

fn lock(slot: &Slot) -> MutexGuard<'_, Option<Body>> {
    slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Owner of a request body; closes it exactly once.
pub struct BodyLease {
    slot: Slot,
}

impl BodyLease {
    /// Takes ownership of `body` and returns the handle given to inner services.
    pub fn new(body: Body) -> (Self, LeasedBody) {
        let slot = Arc::new(Mutex::new(Some(body)));
        (Self { slot: slot.clone() }, LeasedBody { slot })
    }

    /// Closes the body now. Later calls and the drop are no-ops.
    pub fn release(&self) -> bool {
        let released = lock(&self.slot).take().is_some();
        if released {
            tracing::trace!("close_body: request body released");
        }
        released
    }
}

impl Drop for BodyLease {
    fn drop(&mut self) {
        self.release();
    }
}

/// Readable view of a leased body. Yields end-of-stream once released.
pub struct LeasedBody {
    slot: Slot,
}

impl http_body::Body for LeasedBody {
    type Data = Bytes;
    type Error = axum::Error;

    fn poll_frame(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        match lock(&self.slot).as_mut() {
            Some(body) => Pin::new(body).poll_frame(cx),
            None => Poll::Ready(None),
        }
    }

    fn is_end_stream(&self) -> bool {
        lock(&self.slot).as_ref().is_none_or(|body| body.is_end_stream())
    }

    fn size_hint(&self) -> SizeHint {
        lock(&self.slot)
            .as_ref()
            .map(|body| body.size_hint())
            .unwrap_or_else(|| SizeHint::with_exact(0))
    }
}

/// Runs the inner service, then closes the request body.
///
/// Must wrap every gate that reads the body.
pub async fn layer(req: Request, next: Next) -> Response {
    let (parts, body) = req.into_parts();
    let (lease, body) = BodyLease::new(body);
    let req = Request::from_parts(parts, Body::new(body));

    let response = next.run(req).await;
    lease.release();
    response
}
