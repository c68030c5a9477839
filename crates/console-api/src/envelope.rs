//! Response envelope unwrapping.
//!
//! Most backend endpoints wrap their payload in `{code, message?, data?}`.
//! Older endpoints return the payload bare; a body without a top-level `code`
//! field passes through unchanged.

use serde_json::Value;

/// Message used when a rejecting envelope carries none.
pub const DEFAULT_FAILURE_MESSAGE: &str = "request failed";

/// Outcome of decoding a response body.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    /// The call resolves with this payload.
    Payload(Value),
    /// Enveloped response with a non-success code.
    Rejected { code: i64, message: String },
}

/// Unwrap an envelope body, or pass a legacy raw body through unchanged.
pub fn decode_body(body: Value, success_code: i64) -> Decoded {
    let is_envelope = body
        .as_object()
        .map(|o| o.contains_key("code"))
        .unwrap_or(false);
    if !is_envelope {
        return Decoded::Payload(body);
    }

    let code = body.get("code").and_then(Value::as_i64);
    if code == Some(success_code) {
        let data = body.get("data").cloned().unwrap_or(Value::Null);
        return Decoded::Payload(data);
    }

    let message = body
        .get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .map(String::from)
        .unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_string());

    Decoded::Rejected {
        code: code.unwrap_or(-1),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_envelope_resolves_to_data() {
        let body = json!({"code": 200, "message": "ok", "data": {"x": 1}});
        assert_eq!(decode_body(body, 200), Decoded::Payload(json!({"x": 1})));
    }

    #[test]
    fn test_success_envelope_without_data_resolves_null() {
        let body = json!({"code": 200, "message": "ok"});
        assert_eq!(decode_body(body, 200), Decoded::Payload(Value::Null));
    }

    #[test]
    fn test_failure_envelope_rejects_with_message() {
        let body = json!({"code": 500, "message": "boom"});
        assert_eq!(
            decode_body(body, 200),
            Decoded::Rejected {
                code: 500,
                message: "boom".to_string()
            }
        );
    }

    #[test]
    fn test_failure_envelope_without_message_uses_default() {
        let body = json!({"code": 500});
        assert_eq!(
            decode_body(body, 200),
            Decoded::Rejected {
                code: 500,
                message: DEFAULT_FAILURE_MESSAGE.to_string()
            }
        );
    }

    #[test]
    fn test_legacy_body_passes_through() {
        let body = json!({"x": 1});
        assert_eq!(decode_body(body.clone(), 200), Decoded::Payload(body));
    }

    #[test]
    fn test_legacy_array_passes_through() {
        let body = json!([1, 2, 3]);
        assert_eq!(decode_body(body.clone(), 200), Decoded::Payload(body));
    }

    #[test]
    fn test_legacy_scalar_passes_through() {
        let body = json!("plain text");
        assert_eq!(decode_body(body.clone(), 200), Decoded::Payload(body));
    }

    #[test]
    fn test_envelope_data_may_be_explicit_null() {
        let body = json!({"code": 200, "data": null});
        assert_eq!(decode_body(body, 200), Decoded::Payload(Value::Null));
    }

    #[test]
    fn test_non_integer_code_rejects() {
        // A `code` field marks an envelope even when it is malformed; a
        // string code can never equal the success code.
        let body = json!({"code": "200", "message": "odd"});
        assert_eq!(
            decode_body(body, 200),
            Decoded::Rejected {
                code: -1,
                message: "odd".to_string()
            }
        );
    }

    #[test]
    fn test_custom_success_code() {
        let body = json!({"code": 0, "data": {"x": 1}});
        assert_eq!(decode_body(body, 0), Decoded::Payload(json!({"x": 1})));
    }
}
