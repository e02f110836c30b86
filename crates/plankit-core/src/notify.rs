//! Transient user-facing notifications.
//!
//! Every non-fatal failure (precondition rejections, advisory outages,
//! persistence errors) degrades to a notification with auto-dismiss after a
//! fixed delay plus a manual dismiss option. None of these are fatal to the
//! session.

use std::time::{Duration, Instant};

use uuid::Uuid;

/// How long a notification stays visible before it is pruned.
pub const AUTO_DISMISS: Duration = Duration::from_secs(6);

/// Notification severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// A single transient message shown to the user.
#[derive(Debug, Clone)]
pub struct Notification {
    pub id: Uuid,
    pub severity: Severity,
    pub message: String,
    pub created_at: Instant,
}

/// Active notification list with auto-dismiss semantics.
#[derive(Debug, Default)]
pub struct Notifications {
    items: Vec<Notification>,
}

impl Notifications {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes a new notification and returns its id.
    pub fn push(&mut self, severity: Severity, message: impl Into<String>) -> Uuid {
        let note = Notification {
            id: Uuid::new_v4(),
            severity,
            message: message.into(),
            created_at: Instant::now(),
        };
        let id = note.id;
        self.items.push(note);
        id
    }

    /// Manually dismisses a notification. Returns true if it was present.
    pub fn dismiss(&mut self, id: Uuid) -> bool {
        let before = self.items.len();
        self.items.retain(|n| n.id != id);
        self.items.len() != before
    }

    /// Drops notifications older than the auto-dismiss window.
    pub fn prune(&mut self, now: Instant) {
        self.items
            .retain(|n| now.duration_since(n.created_at) < AUTO_DISMISS);
    }

    /// Currently visible notifications, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_dismiss() {
        let mut notes = Notifications::new();
        let id = notes.push(Severity::Warning, "layout check unavailable");
        assert_eq!(notes.len(), 1);
        assert!(notes.dismiss(id));
        assert!(notes.is_empty());
        assert!(!notes.dismiss(id));
    }

    #[test]
    fn test_prune_honors_auto_dismiss_window() {
        let mut notes = Notifications::new();
        notes.push(Severity::Info, "saved");
        notes.prune(Instant::now());
        assert_eq!(notes.len(), 1);

        notes.prune(Instant::now() + AUTO_DISMISS + Duration::from_millis(1));
        assert!(notes.is_empty());
    }
}
