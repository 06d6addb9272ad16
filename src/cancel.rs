//! Cooperative cancellation for generation runs.

use tokio_util::sync::CancellationToken as SharedToken;

use crate::error::{Error, Result};

/// Token the caller cancels to stop a run.
///
/// Clones observe the same state, so one clone can live in a signal handler
/// while another is polled by the processor. Needs no async runtime.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    inner: SharedToken,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.inner.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.is_cancelled()
    }

    /// Returns `Error::CancelledError` once the token has been cancelled.
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            return Err(Error::CancelledError);
        }
        Ok(())
    }
}

impl From<SharedToken> for CancellationToken {
    fn from(inner: SharedToken) -> Self {
        Self { inner }
    }
}
