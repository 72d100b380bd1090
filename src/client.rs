use bytes::Bytes;
use futures::Stream;
use futures::stream::{self, StreamExt};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client as ReqwestClient, Response, header};
use std::env;
use std::pin::Pin;
use std::time::Duration;
use url::Url;

use crate::error::{Error, Result};
use crate::observability::{
    CLIENT_REQUEST_ERRORS, CLIENT_REQUESTS, STREAM_BYTES, STREAM_ERRORS, STREAM_EVENTS,
};
use crate::types::{
    AuthResponse, ChatRequest, ChatResponse, ChatStreamEvent, ChunkPayload, ClearHistoryResponse,
    Credentials, StreamChatRequest,
};

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000/";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Client for the Llama chat backend.
#[derive(Debug, Clone)]
pub struct Llama {
    client: ReqwestClient,
    base_url: String,
    timeout: Duration,
}

impl Llama {
    /// Create a new client.
    ///
    /// The base URL can be provided directly or read from the
    /// LLAMACHAT_BASE_URL environment variable; otherwise the backend's
    /// development address is used.
    pub fn new(base_url: Option<String>) -> Result<Self> {
        Self::with_options(base_url, None)
    }

    /// Create a new client with custom settings.
    pub fn with_options(base_url: Option<String>, timeout: Option<Duration>) -> Result<Self> {
        let base_url = base_url
            .or_else(|| env::var("LLAMACHAT_BASE_URL").ok())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Url::parse(&base_url)?;
        let base_url = if base_url.ends_with('/') {
            base_url
        } else {
            format!("{base_url}/")
        };

        let timeout = timeout.unwrap_or(DEFAULT_TIMEOUT);
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                Error::http_client(
                    format!("Failed to build HTTP client: {e}"),
                    Some(Box::new(e)),
                )
            })?;

        Ok(Self {
            client,
            base_url,
            timeout,
        })
    }

    /// Returns the base URL requests are issued against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create and return default headers for API requests.
    fn default_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }

    /// Classify a reqwest error into our error type.
    fn classify_request_error(&self, e: reqwest::Error) -> Error {
        CLIENT_REQUEST_ERRORS.click();
        if e.is_timeout() {
            Error::timeout(
                format!("Request timed out: {e}"),
                Some(self.timeout.as_secs_f64()),
            )
        } else if e.is_connect() {
            Error::connection(format!("Connection error: {e}"), Some(Box::new(e)))
        } else {
            Error::http_client(format!("Request failed: {e}"), Some(Box::new(e)))
        }
    }

    /// Process API response errors and convert to our Error type.
    async fn process_error_response(response: Response) -> Error {
        let status_code = response.status().as_u16();

        let error_body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                return Error::http_client(
                    format!("Failed to read error response: {e}"),
                    Some(Box::new(e)),
                );
            }
        };

        // Error bodies are either {"error": "..."} or {"error": {"message": "..."}};
        // AuthResponse's error field handles both shapes.
        let error_message = serde_json::from_str::<AuthResponse>(&error_body)
            .ok()
            .and_then(|body| body.error_message())
            .unwrap_or_default();

        // Timeouts detected by reqwest become Error::Timeout; a status the
        // server chose to send back stays an API error so its message can be
        // surfaced verbatim.
        match status_code {
            400 => Error::bad_request(error_message, None),
            401 => Error::authentication(error_message),
            _ => Error::api(status_code, error_message),
        }
    }

    /// Authenticate against `POST /login` and return the session token.
    pub async fn login(&self, credentials: &Credentials) -> Result<String> {
        self.authenticate("login", credentials).await
    }

    /// Register against `POST /signup` and return the session token.
    pub async fn signup(&self, credentials: &Credentials) -> Result<String> {
        self.authenticate("signup", credentials).await
    }

    async fn authenticate(&self, endpoint: &str, credentials: &Credentials) -> Result<String> {
        let url = format!("{}{}", self.base_url, endpoint);
        CLIENT_REQUESTS.click();

        let response = self
            .client
            .post(&url)
            .headers(self.default_headers())
            .json(credentials)
            .send()
            .await
            .map_err(|e| self.classify_request_error(e))?;

        if !response.status().is_success() {
            return Err(Self::process_error_response(response).await);
        }

        let status_code = response.status().as_u16();
        let body: AuthResponse = response.json().await.map_err(|e| {
            Error::serialization(format!("Failed to parse response: {e}"), Some(Box::new(e)))
        })?;

        // A success status without a token is still a failure; surface the
        // server's error text when it supplied one.
        match body.token() {
            Some(token) => Ok(token.to_string()),
            None => Err(Error::api(
                status_code,
                body.error_message().unwrap_or_default(),
            )),
        }
    }

    /// Send one message to `POST /chat` and return the reply text.
    ///
    /// Exactly one request is issued per invocation; there is no retry and
    /// no deduplication.
    pub async fn chat(&self, request: &ChatRequest) -> Result<String> {
        let url = format!("{}chat", self.base_url);
        CLIENT_REQUESTS.click();

        let response = self
            .client
            .post(&url)
            .headers(self.default_headers())
            .json(request)
            .send()
            .await
            .map_err(|e| self.classify_request_error(e))?;

        if !response.status().is_success() {
            return Err(Self::process_error_response(response).await);
        }

        let status_code = response.status().as_u16();
        let body: ChatResponse = response.json().await.map_err(|e| {
            Error::serialization(format!("Failed to parse response: {e}"), Some(Box::new(e)))
        })?;

        match body.reply() {
            Some(reply) => Ok(reply.to_string()),
            None => Err(Error::api(status_code, body.error.unwrap_or_default())),
        }
    }

    /// Send one message to `POST /ollama` and stream the reply.
    ///
    /// Returns a stream of `ChatStreamEvent` values; the stream yields
    /// `Done` when the server signals the end of the reply.
    pub async fn chat_stream(
        &self,
        request: &StreamChatRequest,
    ) -> Result<Pin<Box<dyn Stream<Item = Result<ChatStreamEvent>> + Send>>> {
        let url = format!("{}ollama", self.base_url);
        CLIENT_REQUESTS.click();

        let mut headers = self.default_headers();
        headers.insert(
            header::ACCEPT,
            HeaderValue::from_static("text/event-stream"),
        );

        let response = self
            .client
            .post(&url)
            .headers(headers)
            .json(request)
            .send()
            .await
            .map_err(|e| self.classify_request_error(e))?;

        if !response.status().is_success() {
            return Err(Self::process_error_response(response).await);
        }

        let stream = response.bytes_stream();
        Ok(Box::pin(process_chunk_sse(stream)))
    }

    /// Reset the server-side conversation history via `POST /clear-history`.
    pub async fn clear_history(&self) -> Result<()> {
        let url = format!("{}clear-history", self.base_url);
        CLIENT_REQUESTS.click();

        let response = self
            .client
            .post(&url)
            .headers(self.default_headers())
            .send()
            .await
            .map_err(|e| self.classify_request_error(e))?;

        if !response.status().is_success() {
            return Err(Self::process_error_response(response).await);
        }

        let body: ClearHistoryResponse = response.json().await.map_err(|e| {
            Error::serialization(format!("Failed to parse response: {e}"), Some(Box::new(e)))
        })?;

        if body.success {
            Ok(())
        } else {
            Err(Error::api(200, "history was not cleared"))
        }
    }
}

/// Process a stream of bytes into a stream of chunk events.
fn process_chunk_sse<S>(byte_stream: S) -> impl Stream<Item = Result<ChatStreamEvent>>
where
    S: Stream<Item = std::result::Result<Bytes, reqwest::Error>> + Unpin + 'static,
{
    // Convert reqwest errors to our error type
    let stream = byte_stream.map(|result| {
        result
            .map_err(|e| Error::streaming(format!("Error in HTTP stream: {e}"), Some(Box::new(e))))
    });

    // Use a state machine to process the SSE stream
    let buffer = String::new();

    stream::unfold(
        (stream, buffer),
        move |(mut stream, mut buffer)| async move {
            loop {
                // First check if we have a complete event in the buffer
                if let Some((event, remaining)) = extract_chunk_event(&buffer) {
                    buffer = remaining;
                    match event {
                        Some(event) => {
                            if event.is_err() {
                                STREAM_ERRORS.click();
                            } else {
                                STREAM_EVENTS.click();
                            }
                            return Some((event, (stream, buffer)));
                        }
                        // Comment or empty frame; keep reading.
                        None => continue,
                    }
                }

                // Read more data
                match stream.next().await {
                    Some(Ok(bytes)) => {
                        STREAM_BYTES.count(bytes.len() as u64);
                        match String::from_utf8(bytes.to_vec()) {
                            Ok(text) => buffer.push_str(&text),
                            Err(e) => {
                                return Some((
                                    Err(Error::encoding(
                                        format!("Invalid UTF-8 in stream: {e}"),
                                        Some(Box::new(e)),
                                    )),
                                    (stream, buffer),
                                ));
                            }
                        }
                    }
                    Some(Err(e)) => {
                        STREAM_ERRORS.click();
                        return Some((Err(e), (stream, buffer)));
                    }
                    None => {
                        // End of stream
                        if !buffer.is_empty()
                            && let Some((Some(event), _)) = extract_chunk_event(&buffer)
                        {
                            buffer.clear();
                            return Some((event, (stream, buffer)));
                        }
                        return None;
                    }
                }
            }
        },
    )
}

/// Extract a complete SSE event from a buffer string.
///
/// Returns `None` when no complete event is buffered yet; returns
/// `Some((None, rest))` for comment-only frames that should be skipped.
fn extract_chunk_event(buffer: &str) -> Option<(Option<Result<ChatStreamEvent>>, String)> {
    // Simple SSE parsing - each event is delimited by double newlines
    let parts: Vec<&str> = buffer.splitn(2, "\n\n").collect();
    if parts.len() != 2 {
        return None;
    }

    let event_text = parts[0];
    let rest = parts[1].to_string();

    // Process the event data
    let mut data = None;
    for line in event_text.lines() {
        if line.starts_with("data: ") {
            data = Some(line.trim_start_matches("data: "));
        }
    }

    match data {
        Some("[DONE]") => Some((Some(Ok(ChatStreamEvent::Done)), rest)),
        Some(json_str) => match serde_json::from_str::<ChunkPayload>(json_str) {
            Ok(payload) => {
                if let Some(message) = payload.error {
                    // Server-reported, not a transport failure; keep the
                    // message so it can be surfaced verbatim.
                    Some((Some(Err(Error::api(200, message))), rest))
                } else if let Some(chunk) = payload.chunk {
                    Some((Some(Ok(ChatStreamEvent::Chunk(chunk))), rest))
                } else {
                    Some((None, rest))
                }
            }
            Err(e) => Some((
                Some(Err(Error::serialization(
                    format!("Failed to parse event JSON: {e}"),
                    Some(Box::new(e)),
                ))),
                rest,
            )),
        },
        // Comment frames like ": stream started" carry no data field.
        None => Some((None, rest)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on_stream;

    #[test]
    fn client_creation() {
        let client = Llama::new(Some("http://127.0.0.1:5000/".to_string())).unwrap();
        assert_eq!(client.base_url, DEFAULT_BASE_URL);
        assert_eq!(client.timeout, DEFAULT_TIMEOUT);

        let client = Llama::with_options(
            Some("http://chat.example.com".to_string()),
            Some(Duration::from_secs(30)),
        )
        .unwrap();
        assert_eq!(client.base_url, "http://chat.example.com/");
        assert_eq!(client.timeout, Duration::from_secs(30));
    }

    #[test]
    fn client_rejects_invalid_base_url() {
        let result = Llama::new(Some("not a url".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn extract_incomplete_event() {
        assert!(extract_chunk_event("data: {\"chunk\": \"me\"}").is_none());
    }

    #[test]
    fn extract_chunk() {
        let (event, rest) = extract_chunk_event("data: {\"chunk\": \"me\"}\n\nrest").unwrap();
        assert_eq!(
            event.unwrap().unwrap(),
            ChatStreamEvent::Chunk("me".to_string())
        );
        assert_eq!(rest, "rest");
    }

    #[test]
    fn extract_done_marker() {
        let (event, rest) = extract_chunk_event("data: [DONE]\n\n").unwrap();
        assert_eq!(event.unwrap().unwrap(), ChatStreamEvent::Done);
        assert_eq!(rest, "");
    }

    #[test]
    fn extract_comment_frame() {
        let (event, rest) = extract_chunk_event(": stream started\n\ndata: [DONE]\n\n").unwrap();
        assert!(event.is_none());
        assert_eq!(rest, "data: [DONE]\n\n");
    }

    #[test]
    fn extract_server_error_frame() {
        let (event, _) = extract_chunk_event("data: {\"error\": \"Streaming failed\"}\n\n").unwrap();
        assert!(event.unwrap().is_err());
    }

    #[test]
    fn chunk_stream_skips_comments() {
        let frames = b": stream started\n\ndata: {\"chunk\": \"me\"}\n\ndata: {\"chunk\": \"ow\"}\n\ndata: [DONE]\n\n";
        let byte_stream = stream::iter(vec![Ok::<Bytes, reqwest::Error>(Bytes::from_static(
            frames,
        ))]);
        let events: Vec<_> = block_on_stream(Box::pin(process_chunk_sse(byte_stream)))
            .map(|event| event.unwrap())
            .collect();
        assert_eq!(
            events,
            vec![
                ChatStreamEvent::Chunk("me".to_string()),
                ChatStreamEvent::Chunk("ow".to_string()),
                ChatStreamEvent::Done,
            ]
        );
    }
}
