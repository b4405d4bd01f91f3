use tracing::{info, warn};

use crate::InstanceBackend;
use crate::error::BackendError;
use crate::request::{Action, ProxyEvent};
use crate::response::ProxyResponse;

/// Handle one start/stop request.
///
/// Validation failures come back as a 400 response without touching the
/// backend. Backend failures are not translated, they are returned as `Err`
/// for the hosting runtime to report.
pub async fn handle(backend: &dyn InstanceBackend, event: ProxyEvent) -> Result<ProxyResponse, BackendError> {
    let request = match event.into_request().validate() {
        Ok(request) => request,
        Err(e) => {
            warn!(error = %e, "Rejecting request");
            return Ok(ProxyResponse::bad_request(&e));
        }
    };

    info!(action = %request.action, instance_id = %request.instance_id, "Issuing instance command");

    match request.action {
        Action::Start => backend.start_instance(&request.instance_id).await?,
        Action::Stop => backend.stop_instance(&request.instance_id).await?,
    }

    // The transition was only requested, so this may well be "pending" or "stopping"
    let state = backend.describe_state(&request.instance_id).await?;

    info!(instance_id = %request.instance_id, %state, "Instance state observed");

    Ok(ProxyResponse::ok(&request, &state))
}
