use axum::http::HeaderName;
use std::sync::Arc;

use crate::domain::{AdminCheck, Inventory, SessionResolver};

/// Default header carrying the client address set by a reverse proxy.
pub const DEFAULT_FORWARD_HEADER: &str = "x-forwarded-for";

/// Default upper bound on body bytes buffered for a trace dump.
pub const DEFAULT_TRACE_BODY_LIMIT: usize = 64 * 1024;

/// Collaborators and settings shared by gates and handlers.
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<dyn SessionResolver>,
    pub admins: Arc<dyn AdminCheck>,
    pub inventory: Arc<dyn Inventory>,
    pub forward_header: HeaderName,
    pub trace_body_limit: usize,
}

impl AppState {
    pub fn new(
        sessions: Arc<dyn SessionResolver>,
        admins: Arc<dyn AdminCheck>,
        inventory: Arc<dyn Inventory>,
    ) -> Self {
        Self {
            sessions,
            admins,
            inventory,
            forward_header: HeaderName::from_static(DEFAULT_FORWARD_HEADER),
            trace_body_limit: DEFAULT_TRACE_BODY_LIMIT,
        }
    }

    pub fn with_forward_header(mut self, header: HeaderName) -> Self {
        self.forward_header = header;
        self
    }

    pub fn with_trace_body_limit(mut self, limit: usize) -> Self {
        self.trace_body_limit = limit;
        self
    }
}
