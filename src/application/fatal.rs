//! Fatal-error channel from request tasks to `main`.
//!
//! Request tasks never return errors to the server loop. When one of them
//! hits an unrecoverable configuration problem it raises it here; `main`
//! waits on the listener alongside the server and exits non-zero.

use tokio::sync::mpsc;

use crate::domain::verification::VerificationError;

/// Sending half, cloned into every task.
#[derive(Debug, Clone)]
pub struct FatalSignal {
    tx: mpsc::UnboundedSender<VerificationError>,
}

/// Receiving half, owned by `main`.
#[derive(Debug)]
pub struct FatalListener {
    rx: mpsc::UnboundedReceiver<VerificationError>,
}

impl FatalSignal {
    pub fn channel() -> (FatalSignal, FatalListener) {
        let (tx, rx) = mpsc::unbounded_channel();
        (FatalSignal { tx }, FatalListener { rx })
    }

    pub fn raise(&self, error: VerificationError) {
        tracing::error!(error = %error, "Fatal configuration error, shutting down");
        if self.tx.send(error).is_err() {
            tracing::warn!("Fatal error raised after the listener was dropped");
        }
    }
}

impl FatalListener {
    /// Resolves with the first fatal error. Pends forever once every
    /// signal has been dropped without raising.
    pub async fn triggered(&mut self) -> VerificationError {
        match self.rx.recv().await {
            Some(error) => error,
            None => std::future::pending().await,
        }
    }

    /// Non-blocking check, for tests.
    pub fn try_triggered(&mut self) -> Option<VerificationError> {
        self.rx.try_recv().ok()
    }
}
