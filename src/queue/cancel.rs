//! Cooperative cancellation for blocking operations.
//!
//! A [`CancellationSource`] owns the signal; any number of cheap
//! [`CancellationToken`] handles observe it. A blocking operation may attach
//! a wake callback for the duration of its wait via
//! [`CancellationToken::register`]; the returned [`Registration`] is a scoped
//! resource that detaches the callback when dropped, whichever way the wait
//! exits.
//!
//! ## Key Components
//!
//! - [`CancellationSource`]: sets the signal, runs registered callbacks.
//! - [`CancellationToken`]: clonable observer handle.
//! - [`Registration`]: scoped callback attachment.
//!
//! ## Semantics
//!
//! - `cancel()` is idempotent; each registered callback runs at most once,
//!   on the cancelling thread.
//! - `register` on an already-cancelled token returns an inert registration
//!   and does **not** run the callback; waiters must re-check
//!   [`is_cancelled`](CancellationToken::is_cancelled) after registering.
//!   This keeps `register` safe to call while holding the lock a callback
//!   would re-acquire.
//!
//! ## Example
//!
//! ```
//! use synckit::queue::CancellationSource;
//!
//! let source = CancellationSource::new();
//! let token = source.token();
//! assert!(!token.is_cancelled());
//!
//! source.cancel();
//! assert!(token.is_cancelled());
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

type Callback = Box<dyn FnOnce() + Send>;

/// Callback slots with free-list reuse, so long-lived tokens do not grow
/// without bound across many short waits.
#[derive(Default)]
struct Registry {
    slots: Vec<Option<Callback>>,
    free: Vec<usize>,
}

#[derive(Default)]
struct Inner {
    cancelled: AtomicBool,
    registry: Mutex<Registry>,
}

/// Owner side of a cancellation signal.
pub struct CancellationSource {
    inner: Arc<Inner>,
}

impl CancellationSource {
    /// Creates a new, unsignalled source.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner::default()),
        }
    }

    /// Returns an observer token for this source.
    pub fn token(&self) -> CancellationToken {
        CancellationToken {
            inner: Arc::clone(&self.inner),
        }
    }

    /// Returns `true` if [`cancel`](Self::cancel) has been called.
    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::SeqCst)
    }

    /// Signals cancellation and runs every registered callback.
    ///
    /// Idempotent: only the first call runs callbacks. Callbacks execute on
    /// the calling thread, outside the registry lock, so a callback may
    /// itself take locks or drop registrations.
    pub fn cancel(&self) {
        if self.inner.cancelled.swap(true, Ordering::SeqCst) {
            return;
        }
        let callbacks: Vec<Callback> = {
            let mut registry = self.inner.registry.lock();
            registry.slots.iter_mut().filter_map(Option::take).collect()
        };
        for callback in callbacks {
            callback();
        }
    }
}

impl Default for CancellationSource {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CancellationSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CancellationSource")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

/// Observer handle for a [`CancellationSource`].
#[derive(Clone)]
pub struct CancellationToken {
    inner: Arc<Inner>,
}

impl CancellationToken {
    /// Returns `true` if the source has been cancelled.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::SeqCst)
    }

    /// Attaches a callback that runs when the source is cancelled.
    ///
    /// The callback is detached when the returned [`Registration`] is
    /// dropped. If the token is already cancelled the callback is discarded
    /// and an inert registration is returned; callers re-check
    /// [`is_cancelled`](Self::is_cancelled) after registering.
    pub fn register(&self, callback: impl FnOnce() + Send + 'static) -> Registration {
        let mut registry = self.inner.registry.lock();
        if self.inner.cancelled.load(Ordering::SeqCst) {
            return Registration { inner: None, slot: 0 };
        }
        let callback: Callback = Box::new(callback);
        let slot = match registry.free.pop() {
            Some(index) => {
                registry.slots[index] = Some(callback);
                index
            }
            None => {
                registry.slots.push(Some(callback));
                registry.slots.len() - 1
            }
        };
        Registration {
            inner: Some(Arc::clone(&self.inner)),
            slot,
        }
    }
}

impl std::fmt::Debug for CancellationToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CancellationToken")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

/// Scoped callback attachment returned by [`CancellationToken::register`].
///
/// Dropping the registration detaches the callback if it has not already
/// been taken by a `cancel()`.
pub struct Registration {
    inner: Option<Arc<Inner>>,
    slot: usize,
}

impl Drop for Registration {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.take() {
            let mut registry = inner.registry.lock();
            let taken = registry
                .slots
                .get_mut(self.slot)
                .and_then(|slot| slot.take())
                .is_some();
            if taken {
                registry.free.push(self.slot);
            }
        }
    }
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("active", &self.inner.is_some())
            .finish()
    }
}
