//! Mapping of non-success responses onto [`ApiError`].

use league_core::error::{ApiError, FieldErrors};
use reqwest::StatusCode;
use serde_json::{Map, Value};

/// Build the error for a failed response from its status and raw body.
pub(crate) fn error_from_body(status: StatusCode, body: &str) -> ApiError {
    let json: Option<Value> = serde_json::from_str(body).ok();
    let object = json.as_ref().and_then(Value::as_object);
    let message = object
        .and_then(message_of)
        .unwrap_or_else(|| fallback_message(status, body));

    if status == StatusCode::UNAUTHORIZED {
        return ApiError::Unauthorized { message };
    }

    if status == StatusCode::BAD_REQUEST {
        if let Some(fields) = object.and_then(field_errors) {
            return ApiError::Validation(fields);
        }
    }

    ApiError::Rejected {
        status: status.as_u16(),
        message,
    }
}

/// `error` wins over `detail`.
fn message_of(object: &Map<String, Value>) -> Option<String> {
    ["error", "detail"]
        .iter()
        .find_map(|k| object.get(*k).and_then(Value::as_str))
        .map(str::to_string)
}

fn fallback_message(status: StatusCode, body: &str) -> String {
    let body = body.trim();
    if !body.is_empty() && body.len() <= 200 && !body.starts_with('<') {
        return body.to_string();
    }
    match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => format!("HTTP {}", status.as_u16()),
    }
}

/// Field errors from `{"errors": {...}}` or a bare field map.
fn field_errors(object: &Map<String, Value>) -> Option<FieldErrors> {
    if let Some(nested) = object.get("errors").and_then(Value::as_object) {
        return collect_fields(nested);
    }
    if object.contains_key("error") || object.contains_key("detail") {
        return None;
    }
    collect_fields(object)
}

fn collect_fields(map: &Map<String, Value>) -> Option<FieldErrors> {
    let mut fields = FieldErrors::new();
    for (field, value) in map {
        match value {
            Value::String(msg) => fields.insert(field.as_str(), msg.as_str()),
            Value::Array(items) => {
                for item in items {
                    match item {
                        Value::String(msg) => fields.insert(field.as_str(), msg.as_str()),
                        other => fields.insert(field.as_str(), other.to_string()),
                    }
                }
            }
            _ => return None,
        }
    }
    (!fields.is_empty()).then_some(fields)
}
