//! Book instance status enumeration and transition guards.
//!
//! The status forms a small state machine with no terminal state:
//!
//! ```text
//! Available --reserve--> Reserved --issue--> Loaned --return--> Available
//! Available/Loaned --maintenance--> Maintenance --activate--> Available
//! ```
//!
//! The guards here are pure; the circulation service enforces them inside
//! database transactions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a physical copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "instance_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum InstanceStatus {
    /// On the shelf, can be reserved.
    Available,
    /// Claimed by a pending reservation.
    Reserved,
    /// Lent out to a borrower.
    Loaned,
    /// Withdrawn from circulation for repair or review.
    Maintenance,
}

impl InstanceStatus {
    /// A copy may be deleted only while it is not claimed or lent out.
    pub fn is_deletable(&self) -> bool {
        matches!(self, Self::Available | Self::Maintenance)
    }

    /// A reservation may be placed only against an available copy.
    pub fn can_reserve(&self) -> bool {
        matches!(self, Self::Available)
    }

    /// A reservation may be issued (converted to a loan) only while the
    /// copy is still held by that reservation.
    pub fn can_issue(&self) -> bool {
        matches!(self, Self::Reserved)
    }

    /// Only a lent-out copy can be returned.
    pub fn can_return(&self) -> bool {
        matches!(self, Self::Loaned)
    }

    /// A copy can be pulled for maintenance unless a reservation holds it;
    /// the claim must be cancelled first.
    pub fn can_enter_maintenance(&self) -> bool {
        matches!(self, Self::Available | Self::Loaned)
    }

    /// Only a copy under maintenance can be put back on the shelf.
    pub fn can_activate(&self) -> bool {
        matches!(self, Self::Maintenance)
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Reserved => "reserved",
            Self::Loaned => "loaned",
            Self::Maintenance => "maintenance",
        }
    }
}

impl fmt::Display for InstanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InstanceStatus {
    type Err = biblios_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "available" => Ok(Self::Available),
            "reserved" => Ok(Self::Reserved),
            "loaned" => Ok(Self::Loaned),
            "maintenance" => Ok(Self::Maintenance),
            _ => Err(biblios_core::AppError::validation(format!(
                "Invalid instance status: '{s}'. Expected one of: available, reserved, loaned, maintenance"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deletable_states() {
        assert!(InstanceStatus::Available.is_deletable());
        assert!(InstanceStatus::Maintenance.is_deletable());
        assert!(!InstanceStatus::Reserved.is_deletable());
        assert!(!InstanceStatus::Loaned.is_deletable());
    }

    #[test]
    fn test_reserve_only_from_available() {
        assert!(InstanceStatus::Available.can_reserve());
        assert!(!InstanceStatus::Reserved.can_reserve());
        assert!(!InstanceStatus::Loaned.can_reserve());
        assert!(!InstanceStatus::Maintenance.can_reserve());
    }

    #[test]
    fn test_issue_only_from_reserved() {
        assert!(InstanceStatus::Reserved.can_issue());
        assert!(!InstanceStatus::Available.can_issue());
    }

    #[test]
    fn test_return_only_from_loaned() {
        assert!(InstanceStatus::Loaned.can_return());
        assert!(!InstanceStatus::Available.can_return());
        assert!(!InstanceStatus::Maintenance.can_return());
    }

    #[test]
    fn test_maintenance_not_reachable_from_reserved() {
        assert!(InstanceStatus::Available.can_enter_maintenance());
        assert!(InstanceStatus::Loaned.can_enter_maintenance());
        assert!(!InstanceStatus::Reserved.can_enter_maintenance());
        assert!(!InstanceStatus::Maintenance.can_enter_maintenance());
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            "Reserved".parse::<InstanceStatus>().unwrap(),
            InstanceStatus::Reserved
        );
        assert_eq!(
            "loaned".parse::<InstanceStatus>().unwrap(),
            InstanceStatus::Loaned
        );
        assert!("lost".parse::<InstanceStatus>().is_err());
    }
}
