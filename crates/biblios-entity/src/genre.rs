//! Genre entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A genre in the catalog.
///
/// Deletion is rejected while any book still references the genre.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Genre {
    /// Unique genre identifier.
    pub id: Uuid,
    /// Genre name (unique).
    pub name: String,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new genre.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGenre {
    /// Genre name.
    pub name: String,
}
