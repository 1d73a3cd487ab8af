//! Bridge between the UI thread and the tokio-backed client worker.

pub mod commands;
pub mod runtime;
