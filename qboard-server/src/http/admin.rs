//! Admin guard for moderation endpoints
//!
//! A single shared secret, handed out of band, gates hide/unhide/delete.
//! The secret is injected at construction rather than read from the
//! environment here, so multiple values can be exercised in-process.

use super::error::ApiError;

/// Validates caller-supplied admin tokens against the configured secret.
#[derive(Debug, Clone)]
pub struct AdminGuard {
    token: Option<String>,
}

impl AdminGuard {
    /// Build a guard from the configured secret.
    ///
    /// An empty string counts as unconfigured: moderation stays disabled
    /// rather than being gated on a blank token.
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: token.filter(|t| !t.is_empty()),
        }
    }

    /// Whether a secret is configured at all.
    pub fn is_configured(&self) -> bool {
        self.token.is_some()
    }

    /// Check a supplied token.
    ///
    /// No secret configured is 503 (the feature is off, not the caller's
    /// fault); a missing or mismatched token is 401. Comparison is exact
    /// match; there is no session or token issuance.
    pub fn require(&self, supplied: Option<&str>) -> Result<(), ApiError> {
        let Some(secret) = &self.token else {
            return Err(ApiError::Unavailable {
                reason: "admin token not configured on this server",
            });
        };

        match supplied {
            Some(token) if token == secret => Ok(()),
            _ => Err(ApiError::Unauthorized {
                reason: "invalid admin token",
            }),
        }
    }
}
