use biometrics::{Collector, Counter};

pub(crate) static CLIENT_REQUESTS: Counter = Counter::new("llamachat.client.requests");
pub(crate) static CLIENT_REQUEST_ERRORS: Counter = Counter::new("llamachat.client.request_errors");

pub(crate) static AUTH_ATTEMPTS: Counter = Counter::new("llamachat.auth.attempts");
pub(crate) static AUTH_FAILURES: Counter = Counter::new("llamachat.auth.failures");

pub(crate) static CHAT_SENDS: Counter = Counter::new("llamachat.chat.sends");
pub(crate) static CHAT_SEND_ERRORS: Counter = Counter::new("llamachat.chat.send_errors");

pub(crate) static STREAM_EVENTS: Counter = Counter::new("llamachat.stream.events");
pub(crate) static STREAM_ERRORS: Counter = Counter::new("llamachat.stream.errors");
pub(crate) static STREAM_BYTES: Counter = Counter::new("llamachat.stream.bytes");

/// Register this crate's biometrics with the provided collector.
pub fn register_biometrics(collector: Collector) {
    collector.register_counter(&CLIENT_REQUESTS);
    collector.register_counter(&CLIENT_REQUEST_ERRORS);

    collector.register_counter(&AUTH_ATTEMPTS);
    collector.register_counter(&AUTH_FAILURES);

    collector.register_counter(&CHAT_SENDS);
    collector.register_counter(&CHAT_SEND_ERRORS);

    collector.register_counter(&STREAM_EVENTS);
    collector.register_counter(&STREAM_ERRORS);
    collector.register_counter(&STREAM_BYTES);
}
