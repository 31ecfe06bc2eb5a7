//! One-shot readiness notification for the serving layer and test harnesses.

use tokio::sync::watch;

/// Create a connected signal/listener pair.
#[must_use]
pub fn readiness() -> (ReadySignal, ReadyListener) {
    let (sender, receiver) = watch::channel(false);
    (ReadySignal { sender }, ReadyListener { receiver })
}

/// Write side; consumed by [`ReadySignal::signal`] so it fires at most once.
#[derive(Debug)]
pub struct ReadySignal {
    sender: watch::Sender<bool>,
}

impl ReadySignal {
    /// Mark startup as complete. Never blocks, even with no listeners.
    pub fn signal(self) {
        let _ = self.sender.send_replace(true);
    }
}

/// Read side; clone freely.
#[derive(Debug, Clone)]
pub struct ReadyListener {
    receiver: watch::Receiver<bool>,
}

impl ReadyListener {
    /// Whether the signal has fired.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        *self.receiver.borrow()
    }

    /// Wait for the signal.
    ///
    /// Returns `false` when the signal was dropped without firing, which is
    /// what a failed startup looks like to a listener.
    pub async fn wait(mut self) -> bool {
        self.receiver.wait_for(|ready| *ready).await.is_ok()
    }
}
