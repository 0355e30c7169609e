//! Toast notifications
//!
//! A small shared queue of user-facing messages. Anything holding a
//! `Notifier` clone can push; the UI renders whatever is still active.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// One toast
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub text: String,
    pub shown_at: Instant,
}

#[derive(Debug, Default)]
struct Queue {
    next_id: u64,
    toasts: Vec<Toast>,
}

#[derive(Debug, Clone)]
pub struct Notifier {
    queue: Arc<Mutex<Queue>>,
    duration: Duration,
}

impl Notifier {
    pub fn new(duration: Duration) -> Self {
        Self {
            queue: Arc::new(Mutex::new(Queue::default())),
            duration,
        }
    }

    pub fn show_snack_bar(&self, text: impl Into<String>) {
        let text = text.into();
        tracing::info!("[TOAST] {}", text);
        if let Ok(mut queue) = self.queue.lock() {
            queue.next_id += 1;
            let id = queue.next_id;
            queue.toasts.push(Toast {
                id,
                text,
                shown_at: Instant::now(),
            });
        }
    }

    /// Toasts still on screen; expired ones are dropped.
    pub fn active(&self) -> Vec<Toast> {
        let Ok(mut queue) = self.queue.lock() else {
            return Vec::new();
        };
        let duration = self.duration;
        queue.toasts.retain(|t| t.shown_at.elapsed() < duration);
        queue.toasts.clone()
    }

    /// Texts of the active toasts, oldest first
    pub fn texts(&self) -> Vec<String> {
        self.active().into_iter().map(|t| t.text).collect()
    }

    pub fn dismiss(&self, id: u64) {
        if let Ok(mut queue) = self.queue.lock() {
            queue.toasts.retain(|t| t.id != id);
        }
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(Duration::from_secs(3))
    }
}
