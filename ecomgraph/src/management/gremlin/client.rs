// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Blocking HTTP client for the Gremlin Server script endpoint

use log::debug;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use uuid::Uuid;

use crate::management::error::{ManagementError, ManagementResult};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ScriptRequest<'a> {
    gremlin: &'a str,
    language: &'a str,
    request_id: Uuid,
}

#[derive(Debug, Deserialize)]
struct ScriptResponse {
    #[serde(default)]
    status: Option<ResponseStatus>,
    #[serde(default)]
    result: Option<ResponseResult>,
}

#[derive(Debug, Deserialize)]
struct ResponseStatus {
    code: u16,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct ResponseResult {
    #[serde(default)]
    data: Value,
}

/// Submits Groovy scripts to a Gremlin Server over HTTP
#[derive(Debug, Clone)]
pub struct GremlinClient {
    endpoint: String,
    http: reqwest::blocking::Client,
}

impl GremlinClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> ManagementResult<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self {
            endpoint: endpoint.into(),
            http,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Submit a script and return its result data with GraphSON wrappers removed
    pub fn submit(&self, script: &str) -> ManagementResult<Value> {
        debug!("Submitting management script to {}:\n{}", self.endpoint, script);

        let response = self
            .http
            .post(&self.endpoint)
            .json(&ScriptRequest {
                gremlin: script,
                language: "gremlin-groovy",
                request_id: Uuid::new_v4(),
            })
            .send()?;

        let http_status = response.status();
        let body = response.text()?;

        if !http_status.is_success() {
            return Err(ManagementError::Remote {
                code: http_status.as_u16(),
                message: error_message(&body),
            });
        }

        let parsed: ScriptResponse = serde_json::from_str(&body)?;
        if let Some(status) = parsed.status {
            if status.code != 200 && status.code != 204 {
                return Err(ManagementError::Remote {
                    code: status.code,
                    message: status.message,
                });
            }
        }

        Ok(parsed
            .result
            .map(|r| strip_graphson(r.data))
            .unwrap_or(Value::Null))
    }

    /// Submit a script whose single result is a JSON document encoded as a string
    pub fn submit_json<T: DeserializeOwned>(&self, script: &str) -> ManagementResult<T> {
        let data = self.submit(script)?;
        let document = first_string(&data).ok_or_else(|| {
            ManagementError::Protocol(format!("expected a JSON string result, got {}", data))
        })?;
        Ok(serde_json::from_str(document)?)
    }
}

/// Remove GraphSON `{"@type": .., "@value": ..}` wrappers recursively
pub fn strip_graphson(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.contains_key("@value") => {
            strip_graphson(map.remove("@value").unwrap_or(Value::Null))
        }
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (k, strip_graphson(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(strip_graphson).collect()),
        other => other,
    }
}

fn first_string(data: &Value) -> Option<&str> {
    match data {
        Value::String(s) => Some(s),
        Value::Array(items) => items.first().and_then(first_string),
        _ => None,
    }
}

fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            v.get("message")
                .or_else(|| v.pointer("/status/message"))
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strip_graphson_list() {
        let data = json!({"@type": "g:List", "@value": ["{\"committed\":3}"]});
        assert_eq!(strip_graphson(data), json!(["{\"committed\":3}"]));
    }

    #[test]
    fn test_strip_graphson_nested_map() {
        let data = json!({"outer": {"@type": "g:Int32", "@value": 7}, "plain": [1, 2]});
        assert_eq!(strip_graphson(data), json!({"outer": 7, "plain": [1, 2]}));
    }

    #[test]
    fn test_first_string_digs_into_lists() {
        let data = json!([["{}"]]);
        assert_eq!(first_string(&data), Some("{}"));
        assert_eq!(first_string(&json!([1])), None);
    }

    #[test]
    fn test_error_message_prefers_server_message() {
        assert_eq!(
            error_message(r#"{"message":"Unknown property key: user_id","Exception-Class":"x"}"#),
            "Unknown property key: user_id"
        );
        assert_eq!(error_message("gateway timeout\n"), "gateway timeout");
    }
}
