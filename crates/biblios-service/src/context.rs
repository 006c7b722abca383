//! Request context carrying the authenticated user and role.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use biblios_core::error::AppError;
use biblios_entity::user::UserRole;

/// Context for the current authenticated request.
///
/// Extracted by the API layer from the session cookie and passed into
/// service methods so that every operation knows *who* is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// The user's role at the time the session token was issued.
    pub role: UserRole,
    /// The username (convenience field from the session claims).
    pub username: String,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: Uuid, role: UserRole, username: String) -> Self {
        Self {
            user_id,
            role,
            username,
            request_time: Utc::now(),
        }
    }

    /// Returns whether the current user is an admin.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Returns whether the current user is at least a librarian.
    pub fn is_librarian_or_above(&self) -> bool {
        self.role.is_librarian_or_above()
    }

    /// Rejects the request unless the user is at least a librarian.
    pub fn require_librarian(&self) -> Result<(), AppError> {
        if self.is_librarian_or_above() {
            Ok(())
        } else {
            Err(AppError::forbidden("Librarian privileges required"))
        }
    }

    /// Rejects the request unless the user is an admin.
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::forbidden("Administrator privileges required"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_checks() {
        let member = RequestContext::new(Uuid::new_v4(), UserRole::Member, "m".into());
        assert!(member.require_librarian().is_err());
        assert!(member.require_admin().is_err());

        let librarian = RequestContext::new(Uuid::new_v4(), UserRole::Librarian, "l".into());
        assert!(librarian.require_librarian().is_ok());
        assert!(librarian.require_admin().is_err());

        let admin = RequestContext::new(Uuid::new_v4(), UserRole::Admin, "a".into());
        assert!(admin.require_librarian().is_ok());
        assert!(admin.require_admin().is_ok());
    }
}
