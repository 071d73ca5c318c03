//! Response body type and decoding.

use serde_json::{Map, Value};

use crate::error::DecodeError;

/// The parsed JSON object every verb returns.
pub type ResponseBody = Map<String, Value>;

/// Parse raw response bytes into a [`ResponseBody`].
///
/// The HTTP status plays no part here: an error page that happens to be a
/// JSON object decodes like any other body.
///
/// # Errors
///
/// Returns [`DecodeError::InvalidJson`] if the bytes are not JSON (an empty
/// body included) and [`DecodeError::NotAnObject`] for JSON that is not an
/// object.
pub fn decode_body(bytes: &[u8]) -> Result<ResponseBody, DecodeError> {
    match serde_json::from_slice::<Value>(bytes)? {
        Value::Object(map) => Ok(map),
        other => Err(DecodeError::NotAnObject {
            found: kind(&other),
        }),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_object() {
        let body = decode_body(br#"{"ok": true, "n": 3}"#).unwrap();
        assert_eq!(body["ok"], Value::Bool(true));
        assert_eq!(body["n"], 3);
    }

    #[test]
    fn empty_body_is_invalid_json() {
        assert!(matches!(
            decode_body(b""),
            Err(DecodeError::InvalidJson { .. })
        ));
    }

    #[test]
    fn html_is_invalid_json() {
        assert!(matches!(
            decode_body(b"<html>502 Bad Gateway</html>"),
            Err(DecodeError::InvalidJson { .. })
        ));
    }

    #[test]
    fn array_is_not_an_object() {
        let err = decode_body(b"[1, 2]").unwrap_err();
        assert!(matches!(err, DecodeError::NotAnObject { found: "an array" }));
        assert_eq!(err.to_string(), "expected a JSON object, found an array");
    }
}
