//! Shared fixtures for gate tests.

use axum::{
    body::to_bytes,
    extract::Request,
    response::Response,
    routing::{MethodRouter, any},
};
use serde_json::Value;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{Level, subscriber::DefaultGuard};
use tracing_subscriber::fmt::MakeWriter;

use crate::domain::{MockAdminCheck, MockInventory, MockSessionResolver};
use crate::state::AppState;

pub fn mock_state(
    sessions: MockSessionResolver,
    admins: MockAdminCheck,
    inventory: MockInventory,
) -> AppState {
    AppState::new(Arc::new(sessions), Arc::new(admins), Arc::new(inventory))
}

/// Terminal handler that counts invocations and echoes
/// `<method> <uri> x-custom=<header> <body>`.
pub fn counting_echo(calls: Arc<AtomicUsize>) -> MethodRouter {
    any(move |req: Request| {
        let calls = calls.clone();
        async move {
            calls.fetch_add(1, Ordering::SeqCst);
            echo(req).await
        }
    })
}

async fn echo(req: Request) -> String {
    let (parts, body) = req.into_parts();
    let custom = parts
        .headers
        .get("x-custom")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();
    let body = to_bytes(body, usize::MAX).await.unwrap();

    format!(
        "{} {} x-custom={} {}",
        parts.method,
        parts.uri,
        custom,
        String::from_utf8_lossy(&body)
    )
}

pub async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Log output captured by a thread-local subscriber.
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }

    pub fn lines_containing(&self, needle: &str) -> usize {
        self.contents()
            .lines()
            .filter(|line| line.contains(needle))
            .count()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Installs a subscriber at `level` for the current thread.
///
/// Records are captured until the returned guard is dropped.
pub fn capture_logs(level: Level) -> (CapturedLogs, DefaultGuard) {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(logs.clone())
        .with_ansi(false)
        .without_time()
        .finish();

    (logs, tracing::subscriber::set_default(subscriber))
}
