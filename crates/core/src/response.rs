use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Value, json};

use crate::InstanceState;
use crate::error::ValidationError;
use crate::request::ValidatedRequest;

/// HTTP-proxy result handed back to the runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProxyResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

/// Wraps a payload into a JSON response with the fixed content-type header.
fn respond(status_code: u16, payload: Value) -> ProxyResponse {
    let mut headers = BTreeMap::new();
    headers.insert("Content-Type".to_string(), "application/json".to_string());

    ProxyResponse {
        status_code,
        headers,
        body: payload.to_string(),
    }
}

impl ProxyResponse {
    pub fn ok(request: &ValidatedRequest, state: &InstanceState) -> ProxyResponse {
        respond(
            200,
            json!({
                "ok": true,
                "action": request.action.as_str(),
                "instanceId": request.instance_id,
                "state": state.as_str(),
            }),
        )
    }

    pub fn bad_request(error: &ValidationError) -> ProxyResponse {
        respond(400, json!({ "error": error.to_string() }))
    }
}
