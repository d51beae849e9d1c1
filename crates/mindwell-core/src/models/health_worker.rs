use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;
use crate::query::empty_as_none;

/// Coarse access-control role of a staff account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Role {
    Admin,
    #[serde(rename = "healthworker")]
    HealthWorker,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::HealthWorker => "healthworker",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "healthworker" => Ok(Role::HealthWorker),
            other => Err(CoreError::InvalidRole(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct HealthWorker {
    pub id: i64,
    pub employee_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub personnel_type_id: Option<i64>,
    pub job_title: String,
    pub image_url: String,
    pub address: String,
    pub contact: String,
    pub bio: String,
    pub qualification: String,
    pub education_level: String,
    pub years_of_practice: i64,
    pub department_id: Option<i64>,
    pub supervisor_id: Option<i64>,
    pub role: Role,
    pub is_active: bool,
    pub created_at: jiff::Timestamp,
    pub updated_at: jiff::Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewHealthWorker {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub department_id: i64,
    #[serde(default)]
    pub personnel_type_id: Option<i64>,
    #[serde(default)]
    pub supervisor_id: Option<i64>,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub contact: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub qualification: String,
    #[serde(default)]
    pub education_level: String,
    #[serde(default)]
    pub years_of_practice: i64,
}

/// Selective update: `None` keeps the stored value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HealthWorkerUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub personnel_type_id: Option<i64>,
    pub department_id: Option<i64>,
    pub supervisor_id: Option<i64>,
    pub role: Option<Role>,
    pub job_title: Option<String>,
    pub image_url: Option<String>,
    pub address: Option<String>,
    pub contact: Option<String>,
    pub bio: Option<String>,
    pub qualification: Option<String>,
    pub education_level: Option<String>,
    pub years_of_practice: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HealthWorkerCriteria {
    /// Substring match on first or last name.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub employee_id: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub role: Option<Role>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub department_id: Option<i64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub personnel_type_id: Option<i64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub is_active: Option<bool>,
}
