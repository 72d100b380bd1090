use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Response body for `POST /login` and `POST /signup`.
///
/// A successful authentication carries `idToken`. Error bodies carry an
/// `error` field whose shape varies: the backend reports plain strings for
/// its own validation failures and forwards structured
/// `{"error": {"message": ...}}` objects from the identity provider, so
/// the field is kept as a raw JSON value and flattened on demand.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    /// The session token issued on success.
    #[serde(rename = "idToken", skip_serializing_if = "Option::is_none")]
    pub id_token: Option<String>,

    /// Server-reported error, either a bare string or an object with a
    /// `message` field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
}

impl AuthResponse {
    /// Returns the token if the response carries a non-empty one.
    pub fn token(&self) -> Option<&str> {
        self.id_token.as_deref().filter(|token| !token.is_empty())
    }

    /// Returns the human-readable error message, if one can be extracted.
    pub fn error_message(&self) -> Option<String> {
        match self.error.as_ref()? {
            Value::String(message) if !message.is_empty() => Some(message.clone()),
            Value::Object(fields) => match fields.get("message") {
                Some(Value::String(message)) if !message.is_empty() => Some(message.clone()),
                _ => None,
            },
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_body() {
        let body: AuthResponse = serde_json::from_str(r#"{"idToken": "T1"}"#).unwrap();
        assert_eq!(body.token(), Some("T1"));
        assert_eq!(body.error_message(), None);
    }

    #[test]
    fn string_error_body() {
        let body: AuthResponse =
            serde_json::from_str(r#"{"error": "Invalid email format"}"#).unwrap();
        assert_eq!(body.token(), None);
        assert_eq!(body.error_message(), Some("Invalid email format".to_string()));
    }

    #[test]
    fn structured_error_body() {
        let body: AuthResponse =
            serde_json::from_str(r#"{"error": {"message": "bad creds"}}"#).unwrap();
        assert_eq!(body.error_message(), Some("bad creds".to_string()));
    }

    #[test]
    fn opaque_error_body_has_no_message() {
        let body: AuthResponse = serde_json::from_str(r#"{"error": 42}"#).unwrap();
        assert_eq!(body.error_message(), None);
    }

    #[test]
    fn empty_token_is_absent() {
        let body: AuthResponse = serde_json::from_str(r#"{"idToken": ""}"#).unwrap();
        assert_eq!(body.token(), None);
    }
}
