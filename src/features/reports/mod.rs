pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;

pub use services::ReportService;
pub use store::{PostgisReportStore, ReportStore};
