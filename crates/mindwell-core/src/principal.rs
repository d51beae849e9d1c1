//! The authenticated caller and what it may do.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::health_worker::Role;

/// Which account table the principal was authenticated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum AccountKind {
    Admin,
    Staff,
}

/// Operations gated at the entry of each domain operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Create, delete, and (de)activate admin and health-worker accounts.
    ManageStaff,
    /// Write departments, personnel types, and PHQ-9 questions.
    ManageReferenceData,
    /// Remove patients, sessions, and anything recorded against them.
    DeleteClinicalRecords,
    ClinicalRead,
    ClinicalWrite,
    Messaging,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Principal {
    pub account: AccountKind,
    pub user_id: i64,
    pub email: String,
    pub role: Role,
}

impl Principal {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn can(&self, capability: Capability) -> bool {
        match capability {
            Capability::ManageStaff
            | Capability::ManageReferenceData
            | Capability::DeleteClinicalRecords => self.is_admin(),
            Capability::ClinicalRead | Capability::ClinicalWrite | Capability::Messaging => true,
        }
    }

    /// True when this principal is the given health-worker account.
    pub fn is_staff_member(&self, health_worker_id: i64) -> bool {
        self.account == AccountKind::Staff && self.user_id == health_worker_id
    }
}
