//! Backend worker: owns the tokio runtime and the catalog client.

pub mod commands;
pub mod runtime;
