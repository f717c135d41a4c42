use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::domain::{MessageText, PhoneNumber, SendSms};

#[derive(Debug, Clone, Deserialize)]
struct ErrorJsonResponse {
    #[serde(default)]
    error: Option<String>,
}

/// Encode the outbound envelope: exactly `{"to": ..., "message": ...}`.
pub fn encode_send_sms_json(request: &SendSms) -> String {
    let mut body = serde_json::Map::new();
    body.insert(
        PhoneNumber::FIELD.to_owned(),
        Value::String(request.to().as_str().to_owned()),
    );
    body.insert(
        MessageText::FIELD.to_owned(),
        Value::String(request.message().as_str().to_owned()),
    );
    Value::Object(body).to_string()
}

/// Extract the top-level `error` code from a response body.
///
/// Tolerant by design: a body that is not valid JSON, has no `error` field,
/// or carries a non-string value yields an empty string, meaning "no error
/// code known". The caller decides what an unknown code implies.
pub fn decode_error_code(body: &str) -> String {
    match serde_json::from_str::<ErrorJsonResponse>(body) {
        Ok(parsed) => parsed.error.unwrap_or_default(),
        Err(_) => {
            warn!("invalid syntax in error response from SMS REST backend");
            String::new()
        }
    }
}
