use serde::{Deserialize, Serialize};

/// Response body for `POST /chat`.
///
/// A successful round trip carries a non-empty `response`; error bodies
/// carry `error` instead. Both fields are optional on the wire so that a
/// 200 with a missing or empty `response` can still be deserialized and
/// then rejected by the client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    /// The bot's reply text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,

    /// Server-reported error text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ChatResponse {
    /// Returns the reply text if the response carries a non-empty one.
    pub fn reply(&self) -> Option<&str> {
        self.response.as_deref().filter(|text| !text.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_body() {
        let body: ChatResponse = serde_json::from_str(r#"{"response": "hi there"}"#).unwrap();
        assert_eq!(body.reply(), Some("hi there"));
        assert!(body.error.is_none());
    }

    #[test]
    fn error_body() {
        let body: ChatResponse =
            serde_json::from_str(r#"{"error": "No message provided"}"#).unwrap();
        assert_eq!(body.reply(), None);
        assert_eq!(body.error.as_deref(), Some("No message provided"));
    }

    #[test]
    fn empty_response_is_not_a_reply() {
        let body: ChatResponse = serde_json::from_str(r#"{"response": ""}"#).unwrap();
        assert_eq!(body.reply(), None);
    }
}
