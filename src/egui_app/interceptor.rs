//! HTTP Error Interceptor
//!
//! Sees the status of every response that goes through the API client.
//! A 401 shows a notification and forces logout after a fixed delay;
//! everything else is left to the caller.

use crate::egui_app::notification::Notifier;
use crate::egui_app::session::Session;
use reqwest::StatusCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ErrorInterceptor {
    session: Session,
    notifier: Notifier,
    logout_delay: Duration,
    /// Set while a forced logout is scheduled
    logout_pending: Arc<AtomicBool>,
}

impl ErrorInterceptor {
    pub fn new(session: Session, notifier: Notifier, logout_delay: Duration) -> Self {
        Self {
            session,
            notifier,
            logout_delay,
            logout_pending: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Inspect a failed response. Must be called from within a tokio runtime.
    pub fn intercept(&self, status: StatusCode) {
        if status != StatusCode::UNAUTHORIZED {
            return;
        }

        self.notifier.show_snack_bar("Error");
        if self.logout_pending.swap(true, Ordering::SeqCst) {
            return;
        }

        tracing::warn!(
            "[API] 401 received, logging out in {} ms",
            self.logout_delay.as_millis()
        );
        let session = self.session.clone();
        let pending = Arc::clone(&self.logout_pending);
        let delay = self.logout_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            session.log_out();
            pending.store(false, Ordering::SeqCst);
        });
    }
}
