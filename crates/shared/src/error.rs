use thiserror::Error;

/// Normalized gateway failures. Every transport- or status-level error is
/// folded into one of these at the gateway boundary; no raw reqwest error
/// crosses into the state machines.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GatewayError {
    /// Endpoint unreachable or a non-success status with no actionable body.
    #[error("connection failed: {0}")]
    Network(String),
    /// Upload-specific failure, message sourced from the backend error body
    /// when one is present.
    #[error("{message}")]
    Upload { message: String },
    /// Query-specific failure, same message-sourcing rule as uploads.
    #[error("{message}")]
    Query { message: String },
}

impl GatewayError {
    /// Human-readable detail suitable for embedding in user-facing text.
    pub fn detail(&self) -> &str {
        match self {
            GatewayError::Network(detail) => detail,
            GatewayError::Upload { message } | GatewayError::Query { message } => message,
        }
    }
}
