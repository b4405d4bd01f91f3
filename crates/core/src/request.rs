use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::ValidationError;

/// Inbound HTTP-proxy event. Only `body` is read, every other field the
/// proxy sends along (headers, path, requestContext) is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProxyEvent {
    #[serde(default)]
    pub body: Option<RequestBody>,
}

/// The proxy hands the body over either as a JSON-encoded string or as an
/// already decoded object.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RequestBody {
    Raw(String),
    Parsed(Value),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Start,
    Stop,
}

/// Request fields as found in the body, before any validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstanceRequest {
    pub action: Option<String>,
    pub instance_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRequest {
    pub action: Action,
    pub instance_id: String,
}

impl ProxyEvent {
    pub fn with_body(body: RequestBody) -> ProxyEvent {
        ProxyEvent { body: Some(body) }
    }

    pub fn into_request(self) -> InstanceRequest {
        match self.body {
            Some(body) => body.into_request(),
            None => InstanceRequest::empty(),
        }
    }
}

impl RequestBody {
    /// Resolves the body into a single request record. A string that is not
    /// valid JSON becomes the empty request; an object is never decoded twice.
    pub fn into_request(self) -> InstanceRequest {
        match self {
            RequestBody::Raw(raw) if raw.is_empty() => InstanceRequest::empty(),
            RequestBody::Raw(raw) => match serde_json::from_str::<Value>(&raw) {
                Ok(value) => InstanceRequest::from_value(&value),
                Err(e) => {
                    debug!(error = %e, "Request body is not valid JSON, treating it as empty");
                    InstanceRequest::empty()
                }
            },
            RequestBody::Parsed(value) => InstanceRequest::from_value(&value),
        }
    }
}

impl Action {
    /// Case-insensitive match against the two accepted actions.
    pub fn parse(raw: &str) -> Option<Action> {
        match raw.to_lowercase().as_str() {
            "start" => Some(Action::Start),
            "stop" => Some(Action::Stop),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Start => "start",
            Action::Stop => "stop",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl InstanceRequest {
    /// Fallback used for a missing, empty or unparsable body: no fields at all.
    pub fn empty() -> InstanceRequest {
        InstanceRequest::default()
    }

    /// Non-object values yield the empty request, non-string fields count as absent.
    /// A numeric `instanceId` is therefore rejected here instead of being sent to the backend.
    pub fn from_value(value: &Value) -> InstanceRequest {
        let field = |name: &str| value.get(name).and_then(Value::as_str).map(str::to_string);

        InstanceRequest {
            action: field("action"),
            instance_id: field("instanceId"),
        }
    }

    /// Checks the action, then the instance id. A request with no fields at
    /// all (missing, empty or unparsable body) reports the missing id.
    pub fn validate(self) -> Result<ValidatedRequest, ValidationError> {
        if self == InstanceRequest::empty() {
            return Err(ValidationError::MissingInstanceId);
        }

        let action = self
            .action
            .as_deref()
            .and_then(Action::parse)
            .ok_or(ValidationError::InvalidAction)?;

        let instance_id = self
            .instance_id
            .filter(|id| !id.is_empty())
            .ok_or(ValidationError::MissingInstanceId)?;

        Ok(ValidatedRequest { action, instance_id })
    }
}
