//! Cooperative cancellation for the frame loop.
//!
//! A ticker session owns a [`CancellationSource`]; the loop driving it holds
//! a [`CancellationToken`]. Cancelling the source stops the loop before its
//! next frame and wakes it if it is waiting between frames.
//!
//! # Example
//!
//! ```
//! use ftick_core::cancellation::CancellationSource;
//! use std::time::Duration;
//!
//! let source = CancellationSource::new();
//! let token = source.token();
//! assert!(!token.wait_timeout(Duration::from_millis(1)));
//!
//! source.cancel();
//! assert!(token.is_cancelled());
//! assert!(token.wait_timeout(Duration::from_secs(60)));
//! ```

#![forbid(unsafe_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex};
use std::time::Duration;
use web_time::Instant;

/// Observes whether the owning session has been stopped.
///
/// Cheap to clone; all clones observe the same source.
#[derive(Clone)]
pub struct CancellationToken {
    inner: Arc<Shared>,
}

/// The control side. Dropping it does **not** cancel; call
/// [`cancel`](Self::cancel).
pub struct CancellationSource {
    inner: Arc<Shared>,
}

struct Shared {
    cancelled: AtomicBool,
    wake: (Mutex<()>, Condvar),
}

impl std::fmt::Debug for CancellationToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CancellationToken")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

impl std::fmt::Debug for CancellationSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CancellationSource")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

impl CancellationSource {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Shared {
                cancelled: AtomicBool::new(false),
                wake: (Mutex::new(()), Condvar::new()),
            }),
        }
    }

    /// A token observing this source.
    pub fn token(&self) -> CancellationToken {
        CancellationToken {
            inner: Arc::clone(&self.inner),
        }
    }

    /// Request cancellation and wake any waiter.
    ///
    /// Returns `true` only for the call that actually flipped the flag.
    pub fn cancel(&self) -> bool {
        let first = !self.inner.cancelled.swap(true, Ordering::AcqRel);
        let (lock, cvar) = &self.inner.wake;
        let _guard = lock.lock().unwrap_or_else(|e| e.into_inner());
        cvar.notify_all();
        first
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::Acquire)
    }
}

impl Default for CancellationSource {
    fn default() -> Self {
        Self::new()
    }
}

impl CancellationToken {
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::Acquire)
    }

    /// Sleep for up to `duration`, waking early on cancellation.
    ///
    /// Returns `true` if cancelled, `false` if the full duration elapsed.
    pub fn wait_timeout(&self, duration: Duration) -> bool {
        if self.is_cancelled() {
            return true;
        }
        let (lock, cvar) = &self.inner.wake;
        let mut guard = lock.lock().unwrap_or_else(|e| e.into_inner());
        let start = Instant::now();
        let mut remaining = duration;
        loop {
            // Checked under the lock so a concurrent cancel cannot slip
            // between the check and the wait.
            if self.is_cancelled() {
                return true;
            }
            if remaining.is_zero() {
                return false;
            }
            let (next, result) = cvar
                .wait_timeout(guard, remaining)
                .unwrap_or_else(|e| e.into_inner());
            guard = next;
            if self.is_cancelled() {
                return true;
            }
            if result.timed_out() {
                return false;
            }
            remaining = duration.saturating_sub(start.elapsed());
        }
    }
}
