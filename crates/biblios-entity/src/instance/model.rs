//! Book instance entity model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::InstanceStatus;

/// One physical copy of a catalog book, tracked independently for
/// availability.
///
/// Invariant: `borrower_id` is set iff `status` is `Loaned`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BookInstance {
    /// Unique instance identifier.
    pub id: Uuid,
    /// The catalog book this copy belongs to.
    pub book_id: Uuid,
    /// Publisher imprint label of this copy.
    pub imprint: String,
    /// Lifecycle status.
    pub status: InstanceStatus,
    /// Date the copy is expected to be back on the shelf (set while
    /// loaned).
    pub available_by: Option<NaiveDate>,
    /// Current borrower (set while loaned).
    pub borrower_id: Option<Uuid>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}

impl BookInstance {
    /// Check the borrower/status invariant.
    pub fn is_consistent(&self) -> bool {
        (self.status == InstanceStatus::Loaned) == self.borrower_id.is_some()
    }
}

/// Data required to register a new copy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBookInstance {
    /// The catalog book this copy belongs to.
    pub book_id: Uuid,
    /// Publisher imprint label.
    pub imprint: String,
}

/// Data for updating a copy's descriptive fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateBookInstance {
    /// The instance ID to update.
    pub id: Uuid,
    /// New imprint label.
    pub imprint: Option<String>,
    /// New expected-back date.
    pub available_by: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instance(status: InstanceStatus, borrower: Option<Uuid>) -> BookInstance {
        BookInstance {
            id: Uuid::new_v4(),
            book_id: Uuid::new_v4(),
            imprint: "Third edition, 2019".to_string(),
            status,
            available_by: None,
            borrower_id: borrower,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_borrower_requires_loaned_status() {
        assert!(instance(InstanceStatus::Loaned, Some(Uuid::new_v4())).is_consistent());
        assert!(instance(InstanceStatus::Available, None).is_consistent());
        assert!(!instance(InstanceStatus::Available, Some(Uuid::new_v4())).is_consistent());
        assert!(!instance(InstanceStatus::Loaned, None).is_consistent());
    }
}
