//! Transient notifications.
//!
//! Toasts stack in push order and expire independently of one another.
//! Expiry uses [`tokio::time::Instant`] so tests can drive it with a paused clock.

use std::time::Duration;

use tokio::time::Instant;

/// How long a toast stays visible.
pub const TOAST_DURATION: Duration = Duration::from_secs(3);

/// Visual style of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    /// Confirmation or progress.
    Success,
    /// Something went wrong.
    Error,
}

/// A single notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    /// Identifier unique within one [`Notifications`] queue.
    pub id: u64,
    /// Style.
    pub kind: ToastKind,
    /// Text shown to the user.
    pub message: String,
    /// Instant after which the toast is gone.
    pub expires_at: Instant,
}

impl Toast {
    /// True if the toast should still be shown at `now`.
    pub fn is_live(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// The stack of live toasts.
#[derive(Debug, Clone)]
pub struct Notifications {
    toasts: Vec<Toast>,
    duration: Duration,
    next_id: u64,
}

impl Notifications {
    /// An empty stack with the default [`TOAST_DURATION`].
    pub fn new() -> Self {
        Self::with_duration(TOAST_DURATION)
    }

    /// An empty stack whose toasts live for `duration`.
    pub fn with_duration(duration: Duration) -> Self {
        Self {
            toasts: Vec::new(),
            duration,
            next_id: 0,
        }
    }

    /// Push a toast that expires `duration` from now.
    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>) -> &Toast {
        let now = Instant::now();
        self.prune(now);
        let toast = Toast {
            id: self.next_id,
            kind,
            message: message.into(),
            expires_at: now + self.duration,
        };
        self.next_id += 1;
        self.toasts.push(toast);
        &self.toasts[self.toasts.len() - 1]
    }

    /// Drop every toast that has expired at `now`.
    pub fn prune(&mut self, now: Instant) {
        self.toasts.retain(|toast| toast.is_live(now));
    }

    /// Toasts still live at `now`, oldest first.
    pub fn visible(&self, now: Instant) -> impl Iterator<Item = &Toast> {
        self.toasts.iter().filter(move |toast| toast.is_live(now))
    }

    /// Every toast pushed and not yet pruned, oldest first.
    pub fn all(&self) -> &[Toast] {
        &self.toasts
    }
}

impl Default for Notifications {
    fn default() -> Self {
        Self::new()
    }
}
