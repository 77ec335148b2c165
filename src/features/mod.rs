pub mod analyze;
pub mod frontend;
pub mod health;
pub mod reports;
