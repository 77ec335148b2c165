//! Modules layer - Infrastructure components for external integrations
//!
//! Contains clients and adapters for external services like the image classifier.

pub mod classifier;
