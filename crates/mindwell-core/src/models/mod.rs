pub mod admin;
pub mod department;
pub mod diagnosis;
pub mod health_worker;
pub mod medication;
pub mod message;
pub mod patient;
pub mod personnel_type;
pub mod phq9;
pub mod session;
pub mod summary;
