use serde::{Deserialize, Serialize};

/// Response body for `POST /clear-history`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearHistoryResponse {
    /// Whether the server-side history was reset.
    pub success: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_history_body() {
        let body: ClearHistoryResponse = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(body.success);
    }
}
