pub mod config;
pub mod error;
pub mod handler;
pub mod request;
pub mod response;

use async_trait::async_trait;
use error::BackendError;

pub use config::BackendConfig;
pub use handler::handle;
pub use request::{Action, InstanceRequest, ProxyEvent, RequestBody, ValidatedRequest};
pub use response::ProxyResponse;

/// Compute-management backend that owns instance lifecycle state.
///
/// Start and stop only request the transition, they do not wait for it.
#[async_trait]
pub trait InstanceBackend: Send + Sync {
    async fn start_instance(&self, instance_id: &str) -> Result<(), BackendError>;
    async fn stop_instance(&self, instance_id: &str) -> Result<(), BackendError>;
    async fn describe_state(&self, instance_id: &str) -> Result<InstanceState, BackendError>;
}

/// Lifecycle state name as reported by the backend, e.g. "pending" or "stopped".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceState(pub String);

impl InstanceState {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for InstanceState {
    fn from(name: &str) -> Self {
        InstanceState(name.to_string())
    }
}

impl std::fmt::Display for InstanceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
