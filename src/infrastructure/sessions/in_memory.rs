//! Process-local session store backing both session collaborators.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::RwLock;
use tracing::{debug, info};

use crate::domain::{AdminCheck, RequestContext, SessionError, SessionResolver};
use crate::utils::cookie::find_cookie;

/// Default name of the cookie carrying the session token.
pub const DEFAULT_SESSION_COOKIE: &str = "session";

#[derive(Debug, Clone)]
struct Session {
    email: String,
    expires_at: Option<DateTime<Utc>>,
}

impl Session {
    fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_none_or(|expires_at| expires_at > now)
    }
}

/// Seed file format accepted by [`InMemorySessionStore::from_file`].
///
/// ```json
/// {
///   "users": [{ "email": "admin@example.com", "admin": true }],
///   "sessions": [{ "token": "abc", "email": "admin@example.com", "expiresAt": null }]
/// }
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSeed {
    #[serde(default)]
    pub users: Vec<UserSeed>,
    #[serde(default)]
    pub sessions: Vec<SessionEntrySeed>,
}

#[derive(Debug, Deserialize)]
pub struct UserSeed {
    pub email: String,
    #[serde(default)]
    pub admin: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionEntrySeed {
    pub token: String,
    pub email: String,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

/// Session tokens and user privileges held in process memory.
///
/// Resolution reads the token from the configured cookie. Missing, unknown
/// and expired tokens resolve to an empty identity; only a malformed
/// `Cookie` header is an error.
pub struct InMemorySessionStore {
    cookie_name: String,
    sessions: RwLock<HashMap<String, Session>>,
    admins: RwLock<HashMap<String, bool>>,
}

impl InMemorySessionStore {
    pub fn new(cookie_name: impl Into<String>) -> Self {
        Self {
            cookie_name: cookie_name.into(),
            sessions: RwLock::new(HashMap::new()),
            admins: RwLock::new(HashMap::new()),
        }
    }

    /// Builds a store from a JSON seed file.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Unavailable`] if the file cannot be read or parsed.
    pub fn from_file(cookie_name: impl Into<String>, path: &Path) -> Result<Self, SessionError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            SessionError::Unavailable(format!("failed to read {}: {e}", path.display()))
        })?;
        let seed: SessionSeed = serde_json::from_str(&raw).map_err(|e| {
            SessionError::Unavailable(format!("failed to parse {}: {e}", path.display()))
        })?;

        let store = Self::new(cookie_name);
        store.apply_seed(seed);
        Ok(store)
    }

    pub fn apply_seed(&self, seed: SessionSeed) {
        let (users, sessions) = (seed.users.len(), seed.sessions.len());

        for user in seed.users {
            self.insert_user(user.email, user.admin);
        }
        for session in seed.sessions {
            self.insert_session(session.token, session.email, session.expires_at);
        }

        info!("Session store seeded: {} users, {} sessions", users, sessions);
    }

    pub fn insert_user(&self, email: impl Into<String>, admin: bool) {
        write(&self.admins).insert(email.into(), admin);
    }

    pub fn insert_session(
        &self,
        token: impl Into<String>,
        email: impl Into<String>,
        expires_at: Option<DateTime<Utc>>,
    ) {
        write(&self.sessions).insert(
            token.into(),
            Session {
                email: email.into(),
                expires_at,
            },
        );
    }

    #[cfg(test)]
    fn remove_session(&self, token: &str) -> bool {
        write(&self.sessions).remove(token).is_some()
    }

    fn lookup(&self, ctx: &RequestContext) -> Result<String, SessionError> {
        let token = find_cookie(&ctx.headers, &self.cookie_name)
            .map_err(|_| SessionError::MalformedCookie)?;

        let Some(token) = token else {
            return Ok(String::new());
        };

        let sessions = read(&self.sessions);
        match sessions.get(&token) {
            Some(session) if session.is_active(Utc::now()) => Ok(session.email.clone()),
            Some(_) => {
                debug!("Session expired");
                Ok(String::new())
            }
            None => Ok(String::new()),
        }
    }
}

fn read<T>(lock: &RwLock<T>) -> std::sync::RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn write<T>(lock: &RwLock<T>) -> std::sync::RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl SessionResolver for InMemorySessionStore {
    async fn resolve(&self, ctx: &RequestContext) -> Result<String, SessionError> {
        self.lookup(ctx)
    }
}

#[async_trait]
impl AdminCheck for InMemorySessionStore {
    async fn is_admin(&self, ctx: &RequestContext) -> Result<bool, SessionError> {
        let email = self.lookup(ctx)?;
        if email.is_empty() {
            return Err(SessionError::NotLoggedIn);
        }

        read(&self.admins)
            .get(&email)
            .copied()
            .ok_or(SessionError::UserNotFound(email))
    }
}
