use thiserror::Error;

/// Failure raised by the compute backend. Never handled locally, the
/// handler hands it back to whatever runtime invoked it.
#[derive(Debug, Error)]
#[error("BackendError: {message}")]
pub struct BackendError {
    pub message: String,
}

impl From<String> for BackendError {
    fn from(message: String) -> Self {
        BackendError { message }
    }
}

impl From<&str> for BackendError {
    fn from(message: &str) -> Self {
        BackendError { message: message.to_string() }
    }
}

/// Client input errors. The `Display` text is what ends up in the
/// `error` field of the 400 response body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid action. Use 'start' or 'stop'.")]
    InvalidAction,
    #[error("Missing instanceId in JSON body.")]
    MissingInstanceId,
}
