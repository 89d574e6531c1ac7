//! Cooperative cancellation token.

use smol::channel::{self, Receiver, Sender};

/// Cancellation signal shared between a session and its pending reply.
///
/// Cancelling closes an internal channel, so every clone observes it and any
/// task parked in [`CancellationToken::cancelled`] wakes immediately.
#[derive(Debug, Clone)]
pub struct CancellationToken {
    tx: Sender<()>,
    rx: Receiver<()>,
}

impl CancellationToken {
    /// Create a new cancellation token (not cancelled).
    pub fn new() -> Self {
        let (tx, rx) = channel::bounded(1);
        Self { tx, rx }
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.tx.close();
    }

    pub fn is_cancelled(&self) -> bool {
        self.tx.is_closed()
    }

    /// Resolves once [`cancel`](Self::cancel) has been called on any clone.
    pub async fn cancelled(&self) {
        // Nothing is ever sent, so recv only returns once the channel closes.
        let _ = self.rx.recv().await;
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn clones_share_state() {
        let a = CancellationToken::new();
        let b = a.clone();
        assert!(!b.is_cancelled());
        a.cancel();
        a.cancel();
        assert!(b.is_cancelled());
    }

    #[test]
    fn cancelled_wakes_waiter() {
        let token = CancellationToken::new();
        let waiter = token.clone();
        smol::block_on(async {
            let task = smol::spawn(async move { waiter.cancelled().await });
            smol::Timer::after(Duration::from_millis(10)).await;
            token.cancel();
            task.await;
        });
    }
}
