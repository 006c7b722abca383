//! Reservation entity model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A pending claim by a user on a specific book instance.
///
/// Created when a user reserves an available copy; destroyed when the
/// reservation is issued (converted into a loan) or cancelled. At most one
/// reservation exists per copy.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Reservation {
    /// Unique reservation identifier.
    pub id: Uuid,
    /// The requesting user.
    pub user_id: Uuid,
    /// The claimed copy.
    pub instance_id: Uuid,
    /// Date the reservation was placed.
    pub reserved_on: NaiveDate,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to place a reservation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReservation {
    /// The requesting user.
    pub user_id: Uuid,
    /// The copy to claim.
    pub instance_id: Uuid,
}
