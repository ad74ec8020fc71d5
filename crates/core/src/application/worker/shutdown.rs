// Worker Shutdown Token

use tokio::sync::watch;

/// Cooperative shutdown signal observed by workers and discovery.
#[derive(Clone)]
pub struct ShutdownToken {
    rx: watch::Receiver<bool>,
}

impl ShutdownToken {
    /// True once shutdown has been requested
    pub fn is_shutdown(&self) -> bool {
        *self.rx.borrow()
    }

    /// Suspend until shutdown is requested
    pub async fn wait(&mut self) {
        let _ = self.rx.changed().await;
    }
}

/// Sending half; one per run, held by the caller.
pub struct ShutdownSender {
    tx: watch::Sender<bool>,
}

impl ShutdownSender {
    /// Signal every token holder to finish the current job and stop
    pub fn shutdown(&self) {
        let _ = self.tx.send(true);
    }
}

/// Create a shutdown channel
pub fn shutdown_channel() -> (ShutdownSender, ShutdownToken) {
    let (tx, rx) = watch::channel(false);
    (ShutdownSender { tx }, ShutdownToken { rx })
}
