pub mod admins;
pub mod auth;
pub mod departments;
pub mod health;
pub mod health_workers;
pub mod medications;
pub mod messages;
pub mod patients;
pub mod personnel_types;
pub mod phq9;
pub mod sessions;
pub mod summaries;

use serde::Deserialize;

/// Body of the `/active` toggles.
#[derive(Deserialize)]
pub struct ActiveBody {
    pub active: bool,
}
