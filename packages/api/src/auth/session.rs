//! Session keys and the request-scoped identity.

use serde::{Deserialize, Serialize};

/// Key for storing the authenticated username in the session.
pub const SESSION_USERNAME_KEY: &str = "username";

/// Key for the queue of one-shot flash messages.
pub const FLASH_KEY: &str = "_flashes";

/// Identity resolved from the session for a single request.
///
/// Built once per request by the HTTP layer and handed to every handler;
/// handlers never read the session themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {
    pub username: Option<String>,
}

impl RequestContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn signed_in(username: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
        }
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }
}
