// SPDX-License-Identifier: Apache-2.0

//! Cooperative cancellation handles.
//!
//! The parser polls [`CancelToken::is_cancelled`] once per scanned byte and
//! once per tree-building step. A positive answer aborts the parse with
//! [`ParseError::Cancelled`](crate::ParseError::Cancelled).

use alloc::sync::Arc;
use core::sync::atomic::{AtomicBool, Ordering};

/// A signal the parser polls to find out whether it should stop
pub trait CancelToken {
    /// Returns `true` once the work should be abandoned
    fn is_cancelled(&self) -> bool;
}

/// A token that never fires
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NeverCancel;

impl CancelToken for NeverCancel {
    #[inline]
    fn is_cancelled(&self) -> bool {
        false
    }
}

impl CancelToken for AtomicBool {
    #[inline]
    fn is_cancelled(&self) -> bool {
        self.load(Ordering::Relaxed)
    }
}

impl<T: CancelToken + ?Sized> CancelToken for &T {
    #[inline]
    fn is_cancelled(&self) -> bool {
        (**self).is_cancelled()
    }
}

impl<T: CancelToken + ?Sized> CancelToken for Arc<T> {
    #[inline]
    fn is_cancelled(&self) -> bool {
        (**self).is_cancelled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn never_cancel_stays_quiet() {
        assert!(!NeverCancel.is_cancelled());
    }

    #[test]
    fn atomic_flag_is_observed_through_shared_handles() {
        let flag = Arc::new(AtomicBool::new(false));
        let observer = Arc::clone(&flag);
        assert!(!observer.is_cancelled());

        flag.store(true, Ordering::Relaxed);
        assert!(observer.is_cancelled());
        assert!((&*observer).is_cancelled());
    }
}
