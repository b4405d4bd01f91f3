use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_ec2::Client;
use aws_sdk_ec2::error::DisplayErrorContext;
use aws_sdk_ec2::operation::describe_instances::DescribeInstancesOutput;
use ec2ctl_core::error::BackendError;
use ec2ctl_core::{BackendConfig, InstanceBackend, InstanceState};
use tracing::debug;

/// EC2 (or an EC2-compatible endpoint such as LocalStack) as instance backend.
pub struct Ec2 {
    client: Client,
}

#[async_trait]
impl InstanceBackend for Ec2 {
    async fn start_instance(&self, instance_id: &str) -> Result<(), BackendError> {
        self.client
            .start_instances()
            .instance_ids(instance_id)
            .send()
            .await
            .map_err(|e| {
                BackendError::from(format!("StartInstances failed for {}: {}", instance_id, DisplayErrorContext(&e)))
            })?;

        debug!(instance_id, "StartInstances accepted");
        Ok(())
    }

    async fn stop_instance(&self, instance_id: &str) -> Result<(), BackendError> {
        self.client
            .stop_instances()
            .instance_ids(instance_id)
            .send()
            .await
            .map_err(|e| {
                BackendError::from(format!("StopInstances failed for {}: {}", instance_id, DisplayErrorContext(&e)))
            })?;

        debug!(instance_id, "StopInstances accepted");
        Ok(())
    }

    async fn describe_state(&self, instance_id: &str) -> Result<InstanceState, BackendError> {
        let output = self
            .client
            .describe_instances()
            .instance_ids(instance_id)
            .send()
            .await
            .map_err(|e| {
                BackendError::from(format!("DescribeInstances failed for {}: {}", instance_id, DisplayErrorContext(&e)))
            })?;

        state_name(&output, instance_id)
    }
}

impl Ec2 {
    /// Build a client against the configured endpoint and region. Credentials
    /// come from the default AWS provider chain.
    pub async fn connect(config: &BackendConfig) -> Ec2 {
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .endpoint_url(config.endpoint.clone())
            .load()
            .await;

        Ec2::new(Client::new(&sdk_config))
    }

    pub fn new(client: Client) -> Ec2 {
        Ec2 { client }
    }
}

/// Reads `Reservations[0].Instances[0].State.Name`.
fn state_name(output: &DescribeInstancesOutput, instance_id: &str) -> Result<InstanceState, BackendError> {
    let reservation = output
        .reservations()
        .first()
        .ok_or_else(|| BackendError::from(format!("No reservation returned for instance {}", instance_id)))?;

    let instance = reservation
        .instances()
        .first()
        .ok_or_else(|| BackendError::from(format!("No instance returned for {}", instance_id)))?;

    let name = instance
        .state()
        .and_then(|state| state.name())
        .ok_or_else(|| BackendError::from(format!("Instance {} has no reported state", instance_id)))?;

    Ok(InstanceState::from(name.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_ec2::types::{Instance, InstanceStateName, Reservation};

    fn output_with(state: Option<InstanceStateName>) -> DescribeInstancesOutput {
        let mut instance = Instance::builder().instance_id("i-123");
        if let Some(name) = state {
            instance = instance.state(aws_sdk_ec2::types::InstanceState::builder().name(name).build());
        }

        DescribeInstancesOutput::builder()
            .reservations(Reservation::builder().instances(instance.build()).build())
            .build()
    }

    #[test]
    fn reads_first_instance_state() {
        let state = state_name(&output_with(Some(InstanceStateName::Pending)), "i-123").unwrap();
        assert_eq!(state.as_str(), "pending");

        let state = state_name(&output_with(Some(InstanceStateName::Stopping)), "i-123").unwrap();
        assert_eq!(state.as_str(), "stopping");
    }

    #[test]
    fn relays_state_names_verbatim() {
        let state = state_name(&output_with(Some(InstanceStateName::ShuttingDown)), "i-123").unwrap();
        assert_eq!(state.as_str(), "shutting-down");
    }

    #[test]
    fn no_reservations_is_an_error() {
        let output = DescribeInstancesOutput::builder().build();

        let err = state_name(&output, "i-gone").unwrap_err();
        assert!(err.message.contains("i-gone"));
    }

    #[test]
    fn empty_reservation_is_an_error() {
        let output = DescribeInstancesOutput::builder()
            .reservations(Reservation::builder().build())
            .build();

        assert!(state_name(&output, "i-123").is_err());
    }

    #[test]
    fn missing_state_is_an_error() {
        assert!(state_name(&output_with(None), "i-123").is_err());
    }
}
