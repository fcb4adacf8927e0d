use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::SortError;

/// Cooperative cancellation flag shared between a caller and a running
/// operation.
///
/// Clones share the same flag. The running operation polls the token at the
/// top of each line-read or merge iteration and unwinds with
/// [SortError::Canceled] once the flag is set. Cancellation is advisory:
/// partially written output may remain on disk.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    canceled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> CancellationToken {
        CancellationToken {
            canceled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Request cancellation. Safe to call from another thread.
    pub fn cancel(&self) {
        self.canceled.store(true, Ordering::Relaxed);
    }

    pub fn is_canceled(&self) -> bool {
        self.canceled.load(Ordering::Relaxed)
    }

    /// Fail with [SortError::Canceled] when cancellation was requested.
    pub fn ensure_active(&self) -> Result<(), SortError> {
        if self.is_canceled() {
            Err(SortError::Canceled)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::cancellation::CancellationToken;
    use crate::error::SortError;

    #[test]
    fn test_fresh_token_is_active() {
        let token = CancellationToken::new();
        assert!(!token.is_canceled());
        assert!(token.ensure_active().is_ok());
    }

    #[test]
    fn test_cancel_is_visible_through_clones() {
        let token = CancellationToken::new();
        let clone = token.clone();
        clone.cancel();
        assert!(token.is_canceled());
        assert!(matches!(token.ensure_active(), Err(SortError::Canceled)));
    }
}
