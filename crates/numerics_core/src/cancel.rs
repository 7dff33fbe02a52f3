//! Cooperative cancellation for iterative algorithms.
//!
//! A [`CancellationToken`] is cloned into a long-running solve and checked
//! once per iteration. Setting it from another thread makes the solver return
//! [`NumericError::Cancelled`] at the next iteration boundary.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::types::NumericError;

/// Shared cancellation flag.
///
/// # Examples
/// ```
/// use numerics_core::CancellationToken;
///
/// let token = CancellationToken::new();
/// let handle = token.clone();
/// assert!(token.check(0).is_ok());
///
/// handle.cancel();
/// assert!(token.is_cancelled());
/// assert!(token.check(3).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Create a token in the not-cancelled state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Visible to every clone of this token.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
        tracing::debug!("cancellation requested");
    }

    /// Clear a previous cancellation request.
    pub fn reset(&self) {
        self.cancelled.store(false, Ordering::SeqCst);
    }

    /// Returns `true` once [`cancel`](Self::cancel) has been called.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Fail with [`NumericError::Cancelled`] if cancellation was requested.
    pub fn check(&self, iteration: usize) -> Result<(), NumericError> {
        if self.is_cancelled() {
            return Err(NumericError::Cancelled { iteration });
        }
        Ok(())
    }
}

/// Check an optional token, treating `None` as never cancelled.
pub fn check_optional(
    token: Option<&CancellationToken>,
    iteration: usize,
) -> Result<(), NumericError> {
    match token {
        Some(token) => token.check(iteration),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_clone_shares_flag() {
        let token = CancellationToken::new();
        let clone = token.clone();
        assert!(!clone.is_cancelled());
        token.cancel();
        assert!(clone.is_cancelled());
        clone.reset();
        assert!(!token.is_cancelled());
    }

    #[test]
    fn test_cancel_from_other_thread() {
        let token = CancellationToken::new();
        let remote = token.clone();
        thread::spawn(move || remote.cancel()).join().unwrap();
        assert_eq!(token.check(9), Err(NumericError::Cancelled { iteration: 9 }));
    }

    #[test]
    fn test_check_optional_none() {
        assert!(check_optional(None, 0).is_ok());
    }
}
