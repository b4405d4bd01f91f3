use ec2ctl_core::{BackendConfig, InstanceBackend, ProxyEvent, ProxyResponse};
use ec2ctl_ec2::Ec2;
use lambda_runtime::{Error, LambdaEvent, run, service_fn};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Backend errors are passed through as invocation failures.
async fn function_handler(
    backend: &dyn InstanceBackend,
    event: LambdaEvent<ProxyEvent>,
) -> Result<ProxyResponse, Error> {
    info!(request_id = %event.context.request_id, "Handling instance control request");

    let response = ec2ctl_core::handle(backend, event.payload).await?;
    Ok(response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .without_time()
        .init();

    let config = BackendConfig::from_env();
    info!(endpoint = %config.endpoint, region = %config.region, "Instance control handler starting");

    let backend = Ec2::connect(&config).await;
    let backend = &backend;

    run(service_fn(move |event: LambdaEvent<ProxyEvent>| async move {
        function_handler(backend, event).await
    }))
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use ec2ctl_core::error::BackendError;
    use ec2ctl_core::{InstanceState, RequestBody};
    use lambda_runtime::Context;

    struct UnreachableBackend;

    #[async_trait]
    impl InstanceBackend for UnreachableBackend {
        async fn start_instance(&self, _instance_id: &str) -> Result<(), BackendError> {
            Err(BackendError::from("connection refused"))
        }

        async fn stop_instance(&self, _instance_id: &str) -> Result<(), BackendError> {
            Err(BackendError::from("connection refused"))
        }

        async fn describe_state(&self, _instance_id: &str) -> Result<InstanceState, BackendError> {
            Err(BackendError::from("connection refused"))
        }
    }

    fn event(body: &str) -> LambdaEvent<ProxyEvent> {
        LambdaEvent::new(ProxyEvent::with_body(RequestBody::Raw(body.to_string())), Context::default())
    }

    #[tokio::test]
    async fn backend_failure_fails_the_invocation() {
        let result = function_handler(&UnreachableBackend, event("{\"action\":\"start\",\"instanceId\":\"i-1\"}")).await;

        let err = result.unwrap_err();
        assert!(err.to_string().contains("connection refused"));
    }

    #[tokio::test]
    async fn validation_failure_is_a_response() {
        let response = function_handler(&UnreachableBackend, event("{\"action\":\"reboot\",\"instanceId\":\"i-1\"}"))
            .await
            .unwrap();

        assert_eq!(response.status_code, 400);
    }
}
