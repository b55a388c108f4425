//! Transient toast notifications.

use std::time::{Duration, Instant};
use uuid::Uuid;

/// Delay before a new toast is drawn as fully shown.
const ENTER_DELAY: Duration = Duration::from_millis(10);

/// A notification to display to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
}

/// Notification severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Info,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Success,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Warning,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Error,
        }
    }
}

/// Visibility phase of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    Entering,
    Visible,
    Leaving,
}

/// One self-dismissing toast.
#[derive(Debug, Clone)]
pub struct Toast {
    pub id: Uuid,
    pub notification: Notification,
    pub created_at: Instant,
    pub phase: ToastPhase,
}

/// Independent toasts, oldest first. No deduplication.
#[derive(Debug)]
pub struct ToastStack {
    toasts: Vec<Toast>,
    duration: Duration,
    transition: Duration,
}

impl Default for ToastStack {
    fn default() -> Self {
        Self::new(Duration::from_millis(2500), Duration::from_millis(250))
    }
}

impl ToastStack {
    pub fn new(duration: Duration, transition: Duration) -> Self {
        Self {
            toasts: Vec::new(),
            duration,
            transition,
        }
    }

    /// Append a toast and return its ID.
    pub fn push(&mut self, notification: Notification, now: Instant) -> Uuid {
        let id = Uuid::new_v4();
        self.toasts.push(Toast {
            id,
            notification,
            created_at: now,
            phase: ToastPhase::Entering,
        });
        id
    }

    /// Advance every toast and drop the ones whose exit transition finished.
    pub fn tick(&mut self, now: Instant) {
        let (duration, transition) = (self.duration, self.transition);
        self.toasts.retain_mut(|toast| {
            let age = now.duration_since(toast.created_at);
            if age >= duration + transition {
                return false;
            }
            toast.phase = if age >= duration {
                ToastPhase::Leaving
            } else if age >= ENTER_DELAY {
                ToastPhase::Visible
            } else {
                ToastPhase::Entering
            };
            true
        });
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_lifecycle() {
        let mut stack = ToastStack::default();
        let t0 = Instant::now();
        stack.push(Notification::info("hello"), t0);

        stack.tick(t0 + Duration::from_millis(5));
        assert_eq!(stack.iter().next().unwrap().phase, ToastPhase::Entering);

        stack.tick(t0 + Duration::from_millis(100));
        assert_eq!(stack.iter().next().unwrap().phase, ToastPhase::Visible);

        stack.tick(t0 + Duration::from_millis(2600));
        assert_eq!(stack.iter().next().unwrap().phase, ToastPhase::Leaving);

        stack.tick(t0 + Duration::from_millis(2750));
        assert!(stack.is_empty());
    }

    #[test]
    fn test_toasts_stack_independently_without_dedup() {
        let mut stack = ToastStack::default();
        let t0 = Instant::now();
        let a = stack.push(Notification::error("boom"), t0);
        let b = stack.push(Notification::error("boom"), t0 + Duration::from_millis(1000));
        assert_ne!(a, b);
        assert_eq!(stack.len(), 2);

        stack.tick(t0 + Duration::from_millis(2800));
        assert_eq!(stack.len(), 1);
        assert_eq!(stack.iter().next().unwrap().id, b);
    }
}
