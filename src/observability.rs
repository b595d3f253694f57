use biometrics::{Collector, Counter, Moments};

pub(crate) static CLIENT_REQUESTS: Counter = Counter::new("ragchat.client.requests");
pub(crate) static CLIENT_REQUEST_ERRORS: Counter = Counter::new("ragchat.client.request_errors");
pub(crate) static CLIENT_REQUEST_DURATION: Moments =
    Moments::new("ragchat.client.request_duration_seconds");

pub(crate) static CHAT_QUERIES: Counter = Counter::new("ragchat.chat.queries");
pub(crate) static CHAT_QUERY_FAILURES: Counter = Counter::new("ragchat.chat.query_failures");
pub(crate) static CHAT_DROPPED_SUBMISSIONS: Counter =
    Counter::new("ragchat.chat.dropped_submissions");
pub(crate) static CHAT_NOTIFICATIONS: Counter = Counter::new("ragchat.chat.notifications");

/// Register this crate's biometrics with the provided collector.
pub fn register_biometrics(collector: Collector) {
    collector.register_counter(&CLIENT_REQUESTS);
    collector.register_counter(&CLIENT_REQUEST_ERRORS);
    collector.register_moments(&CLIENT_REQUEST_DURATION);

    collector.register_counter(&CHAT_QUERIES);
    collector.register_counter(&CHAT_QUERY_FAILURES);
    collector.register_counter(&CHAT_DROPPED_SUBMISSIONS);
    collector.register_counter(&CHAT_NOTIFICATIONS);
}
