//! Background work for the UI thread
//!
//! egui redraws every frame and must never block, so async calls run on the
//! app's tokio runtime and report back through a std channel that the view
//! polls once per frame.

use std::future::Future;
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use tokio::runtime::Handle;

/// Result of a spawned future, collected without blocking
#[derive(Debug)]
pub struct Pending<T> {
    rx: Receiver<T>,
}

impl<T> Pending<T> {
    /// `Some` exactly once, when the future has finished
    pub fn poll(&self) -> Option<T> {
        match self.rx.try_recv() {
            Ok(value) => Some(value),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }
}

/// Run `fut` on `handle` and hand back a [`Pending`] for its output
pub fn spawn_pending<F>(handle: &Handle, fut: F) -> Pending<F::Output>
where
    F: Future + Send + 'static,
    F::Output: Send + 'static,
{
    let (tx, rx) = channel();
    handle.spawn(async move {
        let _ = tx.send(fut.await);
    });
    Pending { rx }
}

/// Poll an optional pending slot, clearing it once the value arrives
pub fn take_ready<T>(slot: &mut Option<Pending<T>>) -> Option<T> {
    let value = slot.as_ref()?.poll()?;
    *slot = None;
    Some(value)
}
