//! Budget entry entity model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A library spending record.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Budget {
    /// Unique budget entry identifier.
    pub id: Uuid,
    /// Short description of the expense.
    pub title: String,
    /// Amount spent, in EUR.
    pub amount: f64,
    /// Date of the expense.
    pub spent_on: NaiveDate,
    /// Free-form note (optional).
    pub note: Option<String>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a budget entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBudget {
    /// Short description of the expense.
    pub title: String,
    /// Amount spent, in EUR.
    pub amount: f64,
    /// Date of the expense.
    pub spent_on: NaiveDate,
    /// Free-form note (optional).
    pub note: Option<String>,
}

/// Data for updating a budget entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateBudget {
    /// The budget entry ID to update.
    pub id: Uuid,
    /// New title.
    pub title: Option<String>,
    /// New amount.
    pub amount: Option<f64>,
    /// New expense date.
    pub spent_on: Option<NaiveDate>,
    /// New note.
    pub note: Option<String>,
}
