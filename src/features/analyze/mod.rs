pub mod dtos;
pub mod handlers;
pub mod routes;
