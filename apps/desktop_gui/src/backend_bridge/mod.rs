//! Worker thread owning the async runtime and the classification client.

pub mod commands;
pub mod runtime;
