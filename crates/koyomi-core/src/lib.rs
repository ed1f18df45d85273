//! Shared domain model, configuration, and errors for the koyomi calendar.

pub mod config;
pub mod error;
pub mod model;
