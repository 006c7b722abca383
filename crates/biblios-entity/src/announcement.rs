//! Announcement entity model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A notice shown to library patrons.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Announcement {
    /// Unique announcement identifier.
    pub id: Uuid,
    /// Headline.
    pub title: String,
    /// Announcement text.
    pub body: String,
    /// Publication date.
    pub published_on: NaiveDate,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create an announcement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAnnouncement {
    /// Headline.
    pub title: String,
    /// Announcement text.
    pub body: String,
    /// Publication date.
    pub published_on: NaiveDate,
}

/// Data for updating an announcement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateAnnouncement {
    /// The announcement ID to update.
    pub id: Uuid,
    /// New headline.
    pub title: Option<String>,
    /// New text.
    pub body: Option<String>,
    /// New publication date.
    pub published_on: Option<NaiveDate>,
}
