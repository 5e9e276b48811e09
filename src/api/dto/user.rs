//! DTOs for session-scoped user endpoints.

use serde::{Deserialize, Serialize};

/// Identity of the caller behind the current session.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub email: String,
    pub is_admin: bool,
}
