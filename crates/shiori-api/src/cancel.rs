use std::sync::Arc;

use tokio::sync::watch;

/// Cancellation handle for an in-flight catalog request.
///
/// The owning session invalidates the previous token before issuing a new
/// request; the client races the transport future against [`cancelled`]
/// so a cancelled request resolves to [`CatalogError::Cancelled`] instead
/// of delivering a stale result.
///
/// [`cancelled`]: CancelToken::cancelled
/// [`CatalogError::Cancelled`]: crate::error::CatalogError::Cancelled
#[derive(Debug, Clone)]
pub struct CancelToken {
    tx: Arc<watch::Sender<bool>>,
}

impl CancelToken {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// Invalidate the token. Idempotent.
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }

    /// Resolve once the token has been cancelled. Resolves immediately if
    /// cancellation already happened.
    pub async fn cancelled(&self) {
        let mut rx = self.tx.subscribe();
        // The sender lives in `self`, so `wait_for` cannot observe a closed
        // channel while we are borrowed.
        let _ = rx.wait_for(|cancelled| *cancelled).await;
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}
