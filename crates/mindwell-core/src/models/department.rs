use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::health_worker::HealthWorker;
use crate::query::empty_as_none;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Department {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub created_at: jiff::Timestamp,
    pub updated_at: jiff::Timestamp,
}

/// A department together with the health workers assigned to it.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DepartmentDetail {
    #[serde(flatten)]
    pub department: Department,
    pub health_workers: Vec<HealthWorker>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewDepartment {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DepartmentUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DepartmentCriteria {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub name: Option<String>,
}
