//! Author entity model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An author in the catalog.
///
/// Deletion is rejected while any book still references the author.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Author {
    /// Unique author identifier.
    pub id: Uuid,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub family_name: String,
    /// Date of birth (optional).
    pub date_of_birth: Option<NaiveDate>,
    /// Date of death (optional).
    pub date_of_death: Option<NaiveDate>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Author {
    /// Full display name, family name last.
    pub fn name(&self) -> String {
        format!("{} {}", self.first_name, self.family_name)
    }
}

/// Data required to create a new author.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAuthor {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub family_name: String,
    /// Date of birth (optional).
    pub date_of_birth: Option<NaiveDate>,
    /// Date of death (optional).
    pub date_of_death: Option<NaiveDate>,
}

/// Data for updating an existing author.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateAuthor {
    /// The author ID to update.
    pub id: Uuid,
    /// New given name.
    pub first_name: Option<String>,
    /// New family name.
    pub family_name: Option<String>,
    /// New date of birth.
    pub date_of_birth: Option<NaiveDate>,
    /// New date of death.
    pub date_of_death: Option<NaiveDate>,
}
