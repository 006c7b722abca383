//! Book entity model.
//!
//! A `Book` is a catalog record; the physical lending copies are
//! [`crate::instance::BookInstance`] rows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A catalog book.
///
/// Deletion is rejected while any book instance still references the book.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Book {
    /// Unique book identifier.
    pub id: Uuid,
    /// Book title.
    pub title: String,
    /// Owning author.
    pub author_id: Uuid,
    /// Genre classification.
    pub genre_id: Uuid,
    /// Back-cover summary.
    pub summary: String,
    /// ISBN label.
    pub isbn: String,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}

/// A book together with its copy count, for the "top books" listing.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BookWithCopyCount {
    /// Unique book identifier.
    pub id: Uuid,
    /// Book title.
    pub title: String,
    /// Owning author.
    pub author_id: Uuid,
    /// Genre classification.
    pub genre_id: Uuid,
    /// Back-cover summary.
    pub summary: String,
    /// ISBN label.
    pub isbn: String,
    /// Number of physical copies tracked for this book.
    pub copy_count: i64,
}

/// Data required to create a new book.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBook {
    /// Book title.
    pub title: String,
    /// Owning author.
    pub author_id: Uuid,
    /// Genre classification.
    pub genre_id: Uuid,
    /// Back-cover summary.
    pub summary: String,
    /// ISBN label.
    pub isbn: String,
}

/// Data for updating an existing book.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateBook {
    /// The book ID to update.
    pub id: Uuid,
    /// New title.
    pub title: Option<String>,
    /// New author reference.
    pub author_id: Option<Uuid>,
    /// New genre reference.
    pub genre_id: Option<Uuid>,
    /// New summary.
    pub summary: Option<String>,
    /// New ISBN label.
    pub isbn: Option<String>,
}
