//! Policy entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A named configurable library rule (property/value pair).
///
/// Core policies are part of the library's baseline configuration and
/// cannot be deleted, only edited.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Policy {
    /// Unique policy identifier.
    pub id: Uuid,
    /// Property name (unique), e.g. `loan_period_days`.
    pub property: String,
    /// Configured value, stored as text.
    pub value: String,
    /// Whether the policy is core (non-deletable).
    pub is_core: bool,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePolicy {
    /// Property name.
    pub property: String,
    /// Configured value.
    pub value: String,
    /// Whether the policy is core.
    pub is_core: bool,
}
