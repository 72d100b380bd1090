//! Integration tests against a live Llama chat backend.
//! These tests require LLAMACHAT_TEST_BASE_URL in the environment to run.

#[cfg(test)]
mod tests {
    use llamachat::Llama;
    use llamachat::types::ChatRequest;

    fn base_url() -> Option<String> {
        std::env::var("LLAMACHAT_TEST_BASE_URL").ok()
    }

    #[tokio::test]
    async fn test_chat_round_trip() {
        let Some(base_url) = base_url() else {
            eprintln!("Skipping test: LLAMACHAT_TEST_BASE_URL not set");
            return;
        };

        let client = Llama::new(Some(base_url)).expect("Failed to create client");
        let request = ChatRequest::new("hello");
        let reply = client.chat(&request).await;
        assert!(reply.is_ok(), "Chat request should succeed: {reply:?}");
        assert!(!reply.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_chat_with_reply_annotation() {
        let Some(base_url) = base_url() else {
            eprintln!("Skipping test: LLAMACHAT_TEST_BASE_URL not set");
            return;
        };

        let client = Llama::new(Some(base_url)).expect("Failed to create client");
        let request = ChatRequest::new("hello").with_reply_to(Some("earlier text".to_string()));
        let reply = client.chat(&request).await;
        assert!(reply.is_ok(), "Annotated request should succeed: {reply:?}");
    }

    #[tokio::test]
    async fn test_clear_history() {
        let Some(base_url) = base_url() else {
            eprintln!("Skipping test: LLAMACHAT_TEST_BASE_URL not set");
            return;
        };

        let client = Llama::new(Some(base_url)).expect("Failed to create client");
        let cleared = client.clear_history().await;
        assert!(cleared.is_ok(), "Clear history should succeed: {cleared:?}");
    }
}
