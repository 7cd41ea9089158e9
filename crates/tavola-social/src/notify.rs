//! User-facing notification surface.
//!
//! The presentation layer shows these as toasts. Every store failure in the
//! synchronizer ends up here as a non-fatal [`NoticeKind::Error`]; the page
//! stays interactive after any of them.

use std::sync::Mutex;

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// A completed action worth celebrating (a new like, a saved comment).
    Success,
    /// Neutral feedback (like removed, operation still in flight).
    Info,
    /// A failed action; prior state was kept.
    Error,
}

/// A user-visible message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Severity.
    pub kind: NoticeKind,
    /// Display text.
    pub message: String,
}

impl Notice {
    /// A success notice.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    /// An info notice.
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }

    /// An error notice.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

/// Sink for user-visible notices.
pub trait Notifier {
    /// Surface a notice to the user.
    fn notify(&self, notice: Notice);
}

/// Notifier that forwards notices to the tracing subscriber. Default for
/// demos and headless use.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notice: Notice) {
        match notice.kind {
            NoticeKind::Success | NoticeKind::Info => tracing::info!("{}", notice.message),
            NoticeKind::Error => tracing::warn!("{}", notice.message),
        }
    }
}

/// Notifier that records every notice, for tests.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// All notices seen so far.
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().expect("notifier lock").clone()
    }

    /// The most recent notice, if any.
    pub fn last(&self) -> Option<Notice> {
        self.notices().last().cloned()
    }

    /// Number of notices with the given kind.
    pub fn count_of(&self, kind: NoticeKind) -> usize {
        self.notices().iter().filter(|n| n.kind == kind).count()
    }

    /// Drop all recorded notices.
    pub fn clear(&self) {
        self.notices.lock().expect("notifier lock").clear();
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().expect("notifier lock").push(notice);
    }
}

impl<N: Notifier> Notifier for &N {
    fn notify(&self, notice: Notice) {
        (**self).notify(notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recorder_keeps_order() {
        let recorder = RecordingNotifier::new();
        recorder.notify(Notice::success("one"));
        recorder.notify(Notice::error("two"));

        let notices = recorder.notices();
        assert_eq!(notices.len(), 2);
        assert_eq!(notices[0].message, "one");
        assert_eq!(notices[1].kind, NoticeKind::Error);
        assert_eq!(recorder.count_of(NoticeKind::Error), 1);
    }
}
