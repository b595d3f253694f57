//! Logging trait for ragchat client operations.
//!
//! This module provides the [`ClientLogger`] trait that allows callers to
//! observe every HTTP exchange passing through the [`RagClient`](crate::RagClient).

use std::io::Write;
use std::time::Duration;

use crate::Error;

/// A trait for logging client operations.
///
/// Implement this trait to record requests, their outcomes and how long they
/// took.  The client never logs on its own; without a logger attached nothing
/// is written anywhere.
///
/// # Example
///
/// ```rust,ignore
/// use ragchat::{ClientLogger, Error};
/// use std::time::Duration;
///
/// struct CountingLogger(std::sync::atomic::AtomicUsize);
///
/// impl ClientLogger for CountingLogger {
///     fn log_request(&self, _method: &str, _url: &str) {
///         self.0.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
///     }
///     fn log_response(&self, _method: &str, _url: &str, _status: u16, _elapsed: Duration) {}
///     fn log_error(&self, _method: &str, _url: &str, _error: &Error, _elapsed: Duration) {}
/// }
/// ```
pub trait ClientLogger: Send + Sync {
    /// Called right before a request is sent.
    fn log_request(&self, method: &str, url: &str);

    /// Called when the server answered with a 2xx status.
    fn log_response(&self, method: &str, url: &str, status: u16, elapsed: Duration);

    /// Called when the request failed, either in transport or with a non-2xx status.
    fn log_error(&self, method: &str, url: &str, error: &Error, elapsed: Duration);
}

/// A [`ClientLogger`] that writes one line per event to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrLogger;

impl StderrLogger {
    fn line(&self, text: std::fmt::Arguments<'_>) {
        let mut stderr = std::io::stderr().lock();
        let _ = writeln!(stderr, "[ragchat] {text}");
    }
}

impl ClientLogger for StderrLogger {
    fn log_request(&self, method: &str, url: &str) {
        self.line(format_args!("{method} {url}"));
    }

    fn log_response(&self, method: &str, url: &str, status: u16, elapsed: Duration) {
        self.line(format_args!(
            "{method} {url} -> {status} in {:.3}s",
            elapsed.as_secs_f64()
        ));
    }

    fn log_error(&self, method: &str, url: &str, error: &Error, elapsed: Duration) {
        match error.status_code() {
            Some(status) => self.line(format_args!(
                "{method} {url} -> {status} in {:.3}s: {}",
                elapsed.as_secs_f64(),
                error.message()
            )),
            None => self.line(format_args!(
                "{method} {url} failed after {:.3}s: {error}",
                elapsed.as_secs_f64()
            )),
        }
    }
}
