//! Profile-image-changed signal
//!
//! Views that show a profile picture subscribe and re-fetch it whenever
//! an upload or delete goes through.

use tokio::sync::broadcast;

const CAPACITY: usize = 16;

#[derive(Debug, Clone)]
pub struct ProfilePictureEvents {
    tx: broadcast::Sender<()>,
}

impl ProfilePictureEvents {
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(CAPACITY);
        Self { tx }
    }

    pub fn notify_profile_picture_updated(&self) {
        // No subscribers is fine.
        let _ = self.tx.send(());
    }

    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }
}

impl Default for ProfilePictureEvents {
    fn default() -> Self {
        Self::new()
    }
}

/// Drain a receiver without blocking; true if at least one event arrived.
pub fn drain(rx: &mut broadcast::Receiver<()>) -> bool {
    let mut seen = false;
    loop {
        match rx.try_recv() {
            Ok(()) | Err(broadcast::error::TryRecvError::Lagged(_)) => seen = true,
            Err(_) => return seen,
        }
    }
}
