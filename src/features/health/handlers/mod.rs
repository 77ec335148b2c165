pub mod health_handler;

pub use health_handler::{__path_health_check, health_check, HealthState};
